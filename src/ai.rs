//! Enemy decision making: a small action state machine re-rolled on a
//! timer or when the player comes into or leaves view.

use log::debug;
use rand::Rng;

use crate::collision::undo_moves;
use crate::config::GameConfig;
use crate::entities::{Action, ActionKind, Bullet, Direction, Enemy, Player};
use crate::geometry::{
    angle_between_points, cardinal_from_angle, distance_between_points, dodge_axis,
};

const BASE_DURATION: i32 = 300;
const DURATION_SPREAD: i32 = 240;

/// Chance of opening fire when the player comes into view.
const ENGAGE_CHANCE: f64 = 0.7;

fn roll_duration(rng: &mut impl Rng) -> i32 {
    BASE_DURATION + rng.gen_range(0..DURATION_SPREAD)
}

fn wander_action(rng: &mut impl Rng) -> Action {
    let direction = Direction::CARDINALS[rng.gen_range(0..Direction::CARDINALS.len())];
    Action {
        kind: ActionKind::Move,
        duration: roll_duration(rng),
        direction: Some(direction),
    }
}

fn dodge_action(rng: &mut impl Rng) -> Action {
    Action {
        kind: ActionKind::Dodge,
        duration: roll_duration(rng),
        direction: None,
    }
}

/// A fresh action once the current one runs out: move or dodge, even odds.
pub fn roll_action(rng: &mut impl Rng) -> Action {
    if rng.gen_bool(0.5) {
        dodge_action(rng)
    } else {
        wander_action(rng)
    }
}

/// A fresh action when the player enters (`in_sight`) or leaves view.
pub fn roll_on_sight_change(in_sight: bool, rng: &mut impl Rng) -> Action {
    if !in_sight {
        return roll_action(rng);
    }
    if rng.gen_bool(ENGAGE_CHANCE) {
        Action {
            kind: ActionKind::MoveAndShoot,
            duration: roll_duration(rng),
            direction: None,
        }
    } else {
        dodge_action(rng)
    }
}

/// Run one tick of an enemy's behaviour against the player.
pub fn think_and_act(
    enemy: &mut Enemy,
    player: &Player,
    frame_count: u32,
    config: &GameConfig,
    rng: &mut impl Rng,
) {
    enemy.action.duration -= 1;
    enemy.reload = enemy.reload.saturating_sub(1);

    let (ex, ey) = enemy.actor.center();
    let (px, py) = player.center();
    let in_sight = distance_between_points(ex, ey, px, py) <= enemy.visual_dist;

    if in_sight != enemy.player_in_sight {
        enemy.player_in_sight = in_sight;
        enemy.action = roll_on_sight_change(in_sight, rng);
        debug!(
            "enemy at ({:.0}, {:.0}) {} the player, now {:?}",
            ex,
            ey,
            if in_sight { "spotted" } else { "lost" },
            enemy.action.kind
        );
    } else if enemy.action.duration <= 0 {
        enemy.action = roll_action(rng);
        debug!("enemy at ({:.0}, {:.0}) now {:?}", ex, ey, enemy.action.kind);
    }

    let step = frame_count % enemy.move_speed.max(1) == 0;
    let walking = match enemy.action.kind {
        ActionKind::Move | ActionKind::MoveAndShoot if in_sight => {
            let walking = chase(enemy, px, py, step);
            if enemy.action.kind == ActionKind::MoveAndShoot && enemy.reload == 0 {
                enemy.actor.shoot_at(angle_between_points(ex, ey, px, py), config);
                enemy.reload = enemy.shoot_speed;
            }
            walking
        }
        ActionKind::Move => wander(enemy, step),
        ActionKind::Dodge => dodge(enemy, &player.bullets, config.dodge_radius, step, rng),
        ActionKind::MoveAndShoot | ActionKind::FindCover | ActionKind::Shoot => false,
    };

    if player.hitbox().overlaps(&enemy.actor.hitbox()) {
        undo_moves(&mut enemy.actor);
    }

    if walking {
        if frame_count % enemy.actor.animation_speed == 0 {
            enemy.actor.animate();
        }
    } else {
        enemy.actor.stop_animation();
    }
}

/// Face the player and line up with them on the axis with the smaller gap.
/// Returns whether the enemy is still walking.
fn chase(enemy: &mut Enemy, px: f64, py: f64, step: bool) -> bool {
    let (ex, ey) = enemy.actor.center();
    enemy
        .actor
        .change_visual_direction(cardinal_from_angle(angle_between_points(ex, ey, px, py)));

    let (dx, dy) = (px - ex, py - ey);
    let speed = enemy.actor.speed;
    let dir = if dx.abs() <= dy.abs() {
        if dx.abs() < speed {
            return false;
        }
        if dx > 0.0 {
            Direction::Right
        } else {
            Direction::Left
        }
    } else {
        if dy.abs() < speed {
            return false;
        }
        if dy > 0.0 {
            Direction::Down
        } else {
            Direction::Up
        }
    };

    if step {
        enemy.actor.move_dir(dir);
    }
    true
}

fn wander(enemy: &mut Enemy, step: bool) -> bool {
    let dir = enemy.action.direction.unwrap_or(Direction::Left);
    if matches!(dir, Direction::Left | Direction::Right) {
        enemy.actor.change_visual_direction(dir);
    }
    if step {
        enemy.actor.move_dir(dir);
    }
    true
}

/// Side-step the closest player bullet within `radius`. The side is
/// rolled once and kept while the threat comes from the same axis.
fn dodge(
    enemy: &mut Enemy,
    bullets: &[Bullet],
    radius: f64,
    step: bool,
    rng: &mut impl Rng,
) -> bool {
    let (ex, ey) = enemy.actor.center();
    let threat = bullets
        .iter()
        .map(|b| {
            let (bx, by) = b.center();
            (distance_between_points(bx, by, ex, ey), bx, by)
        })
        .filter(|(dist, _, _)| *dist <= radius)
        .min_by(|a, b| a.0.total_cmp(&b.0));

    let Some((_, bx, by)) = threat else {
        return false;
    };

    let axis = dodge_axis(angle_between_points(bx, by, ex, ey));
    let dir = match enemy.action.direction {
        Some(dir) if axis.contains(dir) => dir,
        _ => {
            let options = axis.directions();
            let dir = options[rng.gen_range(0..options.len())];
            enemy.action.direction = Some(dir);
            dir
        }
    };

    if step {
        enemy.actor.move_dir(dir);
    }
    true
}
