use std::f64::consts::PI;

use far_west::ai::*;
use far_west::config::GameConfig;
use far_west::entities::*;
use far_west::spawn::{new_enemy, new_player};

use rand::rngs::StdRng;
use rand::SeedableRng;

fn seeded_rng() -> StdRng {
    StdRng::seed_from_u64(42)
}

fn action(kind: ActionKind) -> Action {
    Action {
        kind,
        duration: 100,
        direction: None,
    }
}

/// An enemy at `(x, y)` holding `kind`, with its sight state already
/// matching `in_sight` so no re-roll happens on the first tick.
fn enemy_at(x: f64, y: f64, kind: ActionKind, visual_dist: f64, in_sight: bool) -> Enemy {
    let config = GameConfig::default();
    let mut enemy = new_enemy(x, y, &config, &mut seeded_rng());
    enemy.action = action(kind);
    enemy.visual_dist = visual_dist;
    enemy.player_in_sight = in_sight;
    enemy
}

fn player_bullet(x: f64, y: f64) -> Bullet {
    Bullet {
        x,
        y,
        rotation: 0.0,
        speed: 6.0,
        scale: 1.0,
        duration: 100,
        damage: 10,
    }
}

// ── Rolling actions ───────────────────────────────────────────────────────────

#[test]
fn rolled_actions_are_move_or_dodge() {
    let mut rng = seeded_rng();
    let mut dodges = 0;
    for _ in 0..1000 {
        let a = roll_action(&mut rng);
        assert!((300..540).contains(&a.duration));
        match a.kind {
            ActionKind::Dodge => {
                dodges += 1;
                assert_eq!(a.direction, None);
            }
            ActionKind::Move => assert!(a.direction.is_some()),
            other => panic!("unexpected action {:?}", other),
        }
    }
    assert!((400..600).contains(&dodges), "dodges: {}", dodges);
}

#[test]
fn spotting_the_player_mostly_opens_fire() {
    let mut rng = seeded_rng();
    let mut engaged = 0;
    for _ in 0..1000 {
        let a = roll_on_sight_change(true, &mut rng);
        assert!((300..540).contains(&a.duration));
        match a.kind {
            ActionKind::MoveAndShoot => engaged += 1,
            ActionKind::Dodge => {}
            other => panic!("unexpected action {:?}", other),
        }
    }
    assert!((600..800).contains(&engaged), "engaged: {}", engaged);
}

#[test]
fn losing_the_player_rolls_normally() {
    let mut rng = seeded_rng();
    for _ in 0..200 {
        let a = roll_on_sight_change(false, &mut rng);
        assert!(matches!(a.kind, ActionKind::Move | ActionKind::Dodge));
    }
}

// ── Sight and timers ──────────────────────────────────────────────────────────

#[test]
fn entering_sight_rerolls() {
    let mut rng = seeded_rng();
    let config = GameConfig::default();
    let player = new_player(&config);
    let mut enemy = enemy_at(100.0, 0.0, ActionKind::FindCover, 400.0, false);

    think_and_act(&mut enemy, &player, 1, &config, &mut rng);
    assert!(enemy.player_in_sight);
    assert!(matches!(
        enemy.action.kind,
        ActionKind::MoveAndShoot | ActionKind::Dodge
    ));
}

#[test]
fn leaving_sight_rerolls() {
    let mut rng = seeded_rng();
    let config = GameConfig::default();
    let player = new_player(&config);
    let mut enemy = enemy_at(1000.0, 0.0, ActionKind::MoveAndShoot, 400.0, true);

    think_and_act(&mut enemy, &player, 1, &config, &mut rng);
    assert!(!enemy.player_in_sight);
    assert!(matches!(enemy.action.kind, ActionKind::Move | ActionKind::Dodge));
}

#[test]
fn expired_action_is_replaced() {
    let mut rng = seeded_rng();
    let config = GameConfig::default();
    let player = new_player(&config);
    let mut enemy = enemy_at(1000.0, 0.0, ActionKind::FindCover, 100.0, false);
    enemy.action.duration = 1;

    think_and_act(&mut enemy, &player, 1, &config, &mut rng);
    assert!(matches!(enemy.action.kind, ActionKind::Move | ActionKind::Dodge));
    assert!(enemy.action.duration >= 300);
}

#[test]
fn unrolled_kinds_stand_still() {
    let mut rng = seeded_rng();
    let config = GameConfig::default();
    let player = new_player(&config);
    let mut enemy = enemy_at(1000.0, 0.0, ActionKind::Shoot, 100.0, false);

    think_and_act(&mut enemy, &player, 2, &config, &mut rng);
    assert_eq!((enemy.actor.x, enemy.actor.y), (1000.0, 0.0));
    assert_eq!(enemy.action.duration, 99);
    assert!(enemy.actor.bullets.is_empty());
}

// ── Chase and shoot ───────────────────────────────────────────────────────────

#[test]
fn aligned_shooter_fires_at_the_player() {
    let mut rng = seeded_rng();
    let config = GameConfig::default();
    let player = new_player(&config);
    let mut enemy = enemy_at(300.0, 0.0, ActionKind::MoveAndShoot, 400.0, true);
    enemy.reload = 1;

    think_and_act(&mut enemy, &player, 2, &config, &mut rng);
    // Same row as the player, so there is nothing to line up.
    assert_eq!((enemy.actor.x, enemy.actor.y), (300.0, 0.0));
    assert_eq!(enemy.actor.visual_dir, Direction::Left);
    assert_eq!(enemy.actor.bullets.len(), 1);
    assert!((enemy.actor.bullets[0].rotation - PI).abs() < 1e-9);
    assert_eq!(enemy.reload, enemy.shoot_speed);
}

#[test]
fn shooter_waits_for_reload() {
    let mut rng = seeded_rng();
    let config = GameConfig::default();
    let player = new_player(&config);
    let mut enemy = enemy_at(300.0, 0.0, ActionKind::MoveAndShoot, 400.0, true);
    enemy.reload = 5;

    think_and_act(&mut enemy, &player, 2, &config, &mut rng);
    assert!(enemy.actor.bullets.is_empty());
    assert_eq!(enemy.reload, 4);
}

#[test]
fn chase_closes_the_smaller_gap() {
    let mut rng = seeded_rng();
    let config = GameConfig::default();
    let player = new_player(&config);
    let mut enemy = enemy_at(100.0, 200.0, ActionKind::Move, 400.0, true);

    think_and_act(&mut enemy, &player, 2, &config, &mut rng);
    assert_eq!((enemy.actor.x, enemy.actor.y), (98.0, 200.0));
    assert!(enemy.actor.bullets.is_empty());
}

#[test]
fn chase_only_steps_on_move_ticks() {
    let mut rng = seeded_rng();
    let config = GameConfig::default();
    let player = new_player(&config);
    let mut enemy = enemy_at(100.0, 200.0, ActionKind::Move, 400.0, true);

    think_and_act(&mut enemy, &player, 3, &config, &mut rng);
    assert_eq!((enemy.actor.x, enemy.actor.y), (100.0, 200.0));
}

#[test]
fn wandering_follows_the_rolled_direction() {
    let mut rng = seeded_rng();
    let config = GameConfig::default();
    let player = new_player(&config);
    let mut enemy = enemy_at(1000.0, 0.0, ActionKind::Move, 100.0, false);
    enemy.action.direction = Some(Direction::Right);

    think_and_act(&mut enemy, &player, 2, &config, &mut rng);
    assert_eq!(enemy.actor.x, 1002.0);
    assert_eq!(enemy.actor.visual_dir, Direction::Right);
}

// ── Dodge ─────────────────────────────────────────────────────────────────────

#[test]
fn bullet_from_the_side_is_dodged_vertically() {
    let mut rng = seeded_rng();
    let config = GameConfig::default();
    let mut player = new_player(&config);
    player.bullets.push(player_bullet(116.0, 16.0));
    let mut enemy = enemy_at(200.0, 0.0, ActionKind::Dodge, 50.0, false);

    think_and_act(&mut enemy, &player, 2, &config, &mut rng);
    assert_eq!(enemy.actor.x, 200.0);
    assert_eq!(enemy.actor.y.abs(), 2.0);
    assert!(matches!(
        enemy.action.direction,
        Some(Direction::Up | Direction::Down)
    ));
}

#[test]
fn bullet_from_below_is_dodged_horizontally() {
    let mut rng = seeded_rng();
    let config = GameConfig::default();
    let mut player = new_player(&config);
    player.bullets.push(player_bullet(216.0, 116.0));
    let mut enemy = enemy_at(200.0, 0.0, ActionKind::Dodge, 50.0, false);

    think_and_act(&mut enemy, &player, 2, &config, &mut rng);
    assert_eq!(enemy.actor.y, 0.0);
    assert_eq!((enemy.actor.x - 200.0).abs(), 2.0);
    assert!(matches!(
        enemy.action.direction,
        Some(Direction::Left | Direction::Right)
    ));
}

#[test]
fn dodge_keeps_its_side_on_the_same_axis() {
    let mut rng = seeded_rng();
    let config = GameConfig::default();
    let mut player = new_player(&config);
    player.bullets.push(player_bullet(116.0, 16.0));
    let mut enemy = enemy_at(200.0, 0.0, ActionKind::Dodge, 50.0, false);
    enemy.action.direction = Some(Direction::Down);

    think_and_act(&mut enemy, &player, 2, &config, &mut rng);
    assert_eq!(enemy.actor.y, 2.0);
    assert_eq!(enemy.action.direction, Some(Direction::Down));
}

#[test]
fn no_threat_no_dodge() {
    let mut rng = seeded_rng();
    let config = GameConfig::default();
    let mut player = new_player(&config);
    // Well outside the dodge radius.
    player.bullets.push(player_bullet(-500.0, 16.0));
    let mut enemy = enemy_at(200.0, 0.0, ActionKind::Dodge, 50.0, false);

    think_and_act(&mut enemy, &player, 2, &config, &mut rng);
    assert_eq!((enemy.actor.x, enemy.actor.y), (200.0, 0.0));
    assert!(!enemy.actor.state.is_running());
}

// ── Player contact ────────────────────────────────────────────────────────────

#[test]
fn enemy_cannot_walk_into_the_player() {
    let mut rng = seeded_rng();
    let config = GameConfig::default();
    let player = new_player(&config);
    // Hitboxes one unit apart; a wandering step left would touch.
    let mut enemy = enemy_at(28.0, 0.0, ActionKind::Move, 10.0, false);
    enemy.action.direction = Some(Direction::Left);
    assert!(!player.hitbox().overlaps(&enemy.actor.hitbox()));

    think_and_act(&mut enemy, &player, 2, &config, &mut rng);
    assert_eq!(enemy.actor.x, 28.0);
}
