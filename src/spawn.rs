//! World construction: the player, the enemy posse and the cactus field.

use log::{debug, info, warn};
use rand::Rng;

use crate::ai::roll_action;
use crate::config::GameConfig;
use crate::entities::{
    Cactus, Direction, Enemy, GameState, HitBox, Mode, Player, SpriteState, Weapon,
    ACTOR_HITBOX_OFFSET, SPRITE_SIZE,
};

/// Re-roll budget when a spawn position lands on something solid.
const SPAWN_ATTEMPTS: usize = 32;

/// Trunk hitboxes for each frame of the cactus sheet, in unscaled sprite
/// pixels relative to the frame's top-left corner.
pub const CACTUS_HITBOXES: [HitBox; 6] = [
    HitBox { x: 11.0, y: 12.0, w: 7.0, h: 13.0 },
    HitBox { x: 10.0, y: 12.0, w: 9.0, h: 13.0 },
    HitBox { x: 11.0, y: 9.0, w: 8.0, h: 16.0 },
    HitBox { x: 11.0, y: 6.0, w: 8.0, h: 19.0 },
    HitBox { x: 11.0, y: 16.0, w: 7.0, h: 9.0 },
    HitBox { x: 11.0, y: 12.0, w: 8.0, h: 13.0 },
];

// ── Actors ───────────────────────────────────────────────────────────────────

fn new_actor(x: f64, y: f64, health: u32, config: &GameConfig) -> Player {
    Player {
        x,
        y,
        w: SPRITE_SIZE,
        h: SPRITE_SIZE,
        scale: config.sprite_scale,
        speed: config.player_speed,
        animation_speed: config.animation_speed,
        visual_dir: Direction::Right,
        weapon: Weapon::Fists,
        state: SpriteState::NoGunRight,
        hitbox_w: (SPRITE_SIZE - 5.0) as f32,
        hitbox_h: SPRITE_SIZE as f32,
        hitbox_offset: ACTOR_HITBOX_OFFSET,
        move_dirs: Vec::new(),
        bullets: Vec::new(),
        health,
        max_health: health,
    }
}

/// The player starts at the world origin, empty-handed.
pub fn new_player(config: &GameConfig) -> Player {
    new_actor(0.0, 0.0, config.player_health, config)
}

/// An enemy with its revolver drawn, facing left, and randomised senses.
pub fn new_enemy(x: f64, y: f64, config: &GameConfig, rng: &mut impl Rng) -> Enemy {
    let mut actor = new_actor(x, y, config.enemy_health, config);
    actor.visual_dir = Direction::Left;
    actor.draw_weapon(Weapon::Revolver);

    let shoot_speed = 25 + rng.gen_range(0..15);
    Enemy {
        actor,
        action: roll_action(rng),
        visual_dist: f64::from(rng.gen_range(250u32..450)),
        move_speed: 2,
        shoot_speed,
        reload: shoot_speed,
        player_in_sight: false,
    }
}

/// Scatter `config.enemy_count` enemies over the first screen, away from
/// `blocked` boxes and from each other.
pub fn spawn_enemies(config: &GameConfig, blocked: &[HitBox], rng: &mut impl Rng) -> Vec<Enemy> {
    let mut enemies: Vec<Enemy> = Vec::with_capacity(config.enemy_count);
    for _ in 0..config.enemy_count {
        let mut enemy = None;
        for _ in 0..SPAWN_ATTEMPTS {
            let x = rng.gen::<f64>() * config.screen_width + 20.0;
            let y = rng.gen::<f64>() * config.screen_height + 20.0;
            let candidate = new_enemy(x, y, config, rng);
            let hitbox = candidate.actor.hitbox();
            let clear = !blocked.iter().any(|b| b.overlaps(&hitbox))
                && !enemies.iter().any(|e| e.actor.hitbox().overlaps(&hitbox));
            if clear {
                enemy = Some(candidate);
                break;
            }
        }
        match enemy {
            Some(enemy) => enemies.push(enemy),
            None => warn!("no free spot for an enemy after {} attempts", SPAWN_ATTEMPTS),
        }
    }
    debug!("spawned {} enemies", enemies.len());
    enemies
}

// ── Cacti ────────────────────────────────────────────────────────────────────

pub fn new_cactus(x: f64, y: f64, variant: usize, scale: f64) -> Cactus {
    let local = CACTUS_HITBOXES[variant % CACTUS_HITBOXES.len()];
    let s = scale as f32;
    Cactus {
        x,
        y,
        variant,
        scale,
        hitbox: HitBox {
            x: x as f32 + local.x * s,
            y: y as f32 + local.y * s,
            w: local.w * s,
            h: local.h * s,
        },
    }
}

/// Scatter `config.cactus_count` cacti over three screens in each
/// direction, keeping `blocked` boxes clear.
pub fn spawn_cacti(config: &GameConfig, blocked: &[HitBox], rng: &mut impl Rng) -> Vec<Cactus> {
    let x_bound = (3.0 * config.screen_width) as u32;
    let y_bound = (3.0 * config.screen_height) as u32;

    let mut cacti = Vec::with_capacity(config.cactus_count);
    for _ in 0..config.cactus_count {
        for _ in 0..SPAWN_ATTEMPTS {
            let x = f64::from(rng.gen_range(0..x_bound.max(1)));
            let y = f64::from(rng.gen_range(0..y_bound.max(1)));
            let variant = rng.gen_range(0..CACTUS_HITBOXES.len());
            let cactus = new_cactus(x, y, variant, config.cactus_scale);
            if !blocked.iter().any(|b| b.overlaps(&cactus.hitbox)) {
                cacti.push(cactus);
                break;
            }
        }
    }
    debug!("spawned {} cacti", cacti.len());
    cacti
}

// ── Whole scene ──────────────────────────────────────────────────────────────

/// Build the initial game state, waiting on the title screen.
pub fn init_state(config: GameConfig, rng: &mut impl Rng) -> GameState {
    let config = config.validated();
    let player = new_player(&config);
    let enemies = spawn_enemies(&config, &[player.hitbox()], rng);

    let mut blocked = vec![player.hitbox()];
    blocked.extend(enemies.iter().map(|e| e.actor.hitbox()));
    let cacti = spawn_cacti(&config, &blocked, rng);

    let mut state = GameState {
        mode: Mode::Title,
        player,
        enemies,
        cacti,
        hits: Vec::new(),
        cam_x: 0.0,
        cam_y: 0.0,
        view_width: config.screen_width,
        view_height: config.screen_height,
        frame_count: 1,
        kills: 0,
        config,
    };
    crate::compute::center_camera(&mut state);
    state
}

/// Start a new round on the same cactus field.
pub fn reset(state: &mut GameState, rng: &mut impl Rng) {
    state.player = new_player(&state.config);

    let mut blocked = vec![state.player.hitbox()];
    blocked.extend(state.cacti.iter().map(|c| c.hitbox));
    state.enemies = spawn_enemies(&state.config, &blocked, rng);

    state.hits.clear();
    state.frame_count = 1;
    state.kills = 0;
    crate::compute::center_camera(state);
    info!("new round with {} enemies", state.enemies.len());
}
