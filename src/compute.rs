//! Game-logic functions.
//!
//! `tick` takes an immutable reference to the current `GameState` plus the
//! controls for one frame and returns a brand-new `GameState`. All
//! randomness comes through the injected RNG, so a seeded RNG replays a game
//! exactly.

use log::info;
use rand::Rng;

use crate::ai::think_and_act;
use crate::collision::check_collisions;
use crate::config::GameConfig;
use crate::entities::{
    Bullet, Direction, FrameInput, GameState, Mode, Player, Weapon, SPRITE_SIZE,
};
use crate::hud::update_hits;
use crate::spawn::reset;

// ── Actor actions ────────────────────────────────────────────────────────────

impl Player {
    /// Take one cardinal step and remember it for collision undo.
    pub fn move_dir(&mut self, dir: Direction) {
        let (dx, dy) = dir.delta();
        self.x += dx * self.speed;
        self.y += dy * self.speed;
        self.move_dirs.push(dir);
    }

    /// Fire along the facing direction. Returns `false` without a revolver.
    pub fn shoot(&mut self, config: &GameConfig) -> bool {
        if self.weapon != Weapon::Revolver {
            return false;
        }
        self.shoot_at(self.visual_dir.rotation(), config);
        true
    }

    /// Fire a bullet from the sprite centre with the given heading.
    pub fn shoot_at(&mut self, rotation: f64, config: &GameConfig) {
        let (cx, cy) = self.center();
        let half = SPRITE_SIZE / 2.0;
        self.bullets.push(Bullet {
            x: cx - half,
            y: cy - half,
            rotation,
            speed: config.bullet_speed,
            scale: 1.0,
            duration: config.bullet_duration,
            damage: config.bullet_damage,
        });
    }

    /// Advance every bullet and drop the spent ones.
    pub fn update_bullets(&mut self) {
        for bullet in &mut self.bullets {
            bullet.advance();
        }
        self.bullets.retain(|b| b.duration > 0);
    }

    pub fn take_damage(&mut self, amount: u32) {
        self.health = self.health.saturating_sub(amount);
    }
}

impl Bullet {
    pub fn advance(&mut self) {
        self.x += self.speed * self.rotation.cos();
        self.y += self.speed * self.rotation.sin();
        self.duration -= 1;
    }
}

// ── Per-frame tick ───────────────────────────────────────────────────────────

/// Advance the game by one frame.
pub fn tick(state: &GameState, input: &FrameInput, rng: &mut impl Rng) -> GameState {
    let mut next = state.clone();

    match state.mode {
        Mode::Title | Mode::Pause => {
            if input.confirm {
                set_mode(&mut next, Mode::Game);
            }
        }
        Mode::GameOver => {
            if input.confirm {
                reset(&mut next, rng);
                set_mode(&mut next, Mode::Game);
            }
        }
        Mode::Game => play_frame(&mut next, input, rng),
    }

    next
}

fn set_mode(state: &mut GameState, mode: Mode) {
    if state.mode != mode {
        info!("mode {:?} -> {:?}", state.mode, mode);
        state.mode = mode;
    }
}

fn play_frame(state: &mut GameState, input: &FrameInput, rng: &mut impl Rng) {
    // ── 1. Forget last frame's steps, move bullets ───────────────────────────
    state.player.move_dirs.clear();
    for enemy in state.enemies.iter_mut() {
        enemy.actor.move_dirs.clear();
        enemy.actor.update_bullets();
    }
    state.frame_count += 1;
    state.player.update_bullets();

    // ── 2. Player controls ───────────────────────────────────────────────────
    apply_player_input(state, input);

    // ── 3. Enemies think ─────────────────────────────────────────────────────
    let frame_count = state.frame_count;
    for enemy in state.enemies.iter_mut() {
        think_and_act(enemy, &state.player, frame_count, &state.config, rng);
    }

    // ── 4. Collisions, overlays, camera ──────────────────────────────────────
    check_collisions(state);
    update_hits(&mut state.hits);
    center_camera(state);

    if state.frame_count % state.config.max_frame_count == 0 {
        state.frame_count = 1;
    }

    // ── 5. Status ────────────────────────────────────────────────────────────
    if state.player.is_dead() {
        set_mode(state, Mode::GameOver);
    } else if input.pause {
        set_mode(state, Mode::Pause);
    }
}

fn apply_player_input(state: &mut GameState, input: &FrameInput) {
    let player = &mut state.player;

    if input.draw_revolver {
        player.draw_weapon(Weapon::Revolver);
    }
    if input.holster {
        player.draw_weapon(Weapon::Fists);
    }
    if input.cycle_weapon {
        player.draw_weapon(player.weapon.next());
    }

    let mut moving = false;
    for (pressed, dir) in [
        (input.move_down, Direction::Down),
        (input.move_up, Direction::Up),
        (input.move_right, Direction::Right),
        (input.move_left, Direction::Left),
    ] {
        if pressed {
            player.move_dir(dir);
            moving = true;
        }
    }

    // Opposite look keys cancel out.
    let side = (input.look_left != input.look_right).then_some(input.look_left);
    let tilt = match (input.look_up, input.look_down) {
        (true, false) => Some(Direction::Up),
        (false, true) => Some(Direction::Down),
        _ => None,
    };
    if side.is_some() || tilt.is_some() {
        let left = side.unwrap_or_else(|| player.visual_dir.is_left());
        player.change_visual_direction(Direction::compose(left, tilt));
    }

    if moving {
        if state.frame_count % player.animation_speed == 0 {
            player.animate();
        }
    } else {
        player.stop_animation();
    }

    if input.shoot {
        player.shoot(&state.config);
    }
}

/// Keep the player in the middle of the view.
pub fn center_camera(state: &mut GameState) {
    let (cx, cy) = state.player.center();
    state.cam_x = cx - state.view_width / 2.0;
    state.cam_y = cy - state.view_height / 2.0;
}

/// Resize the visible area and re-centre on the player. The world and its
/// spawn areas keep the configured screen size.
pub fn set_view_size(state: &mut GameState, width: f64, height: f64) {
    state.view_width = width.max(1.0);
    state.view_height = height.max(1.0);
    center_camera(state);
}
