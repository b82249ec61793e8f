//! AABB overlap and the per-tick collision pass.
//!
//! Every pair is tested by brute force; entity counts stay in the tens, so
//! there is no broad phase.

use log::info;

use crate::entities::{Cactus, Enemy, GameState, Hit, HitBox, HitTarget, Player};

impl HitBox {
    pub fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self { x, y, w, h }
    }

    /// Edge comparison; boxes that merely touch count as overlapping.
    pub fn overlaps(&self, other: &HitBox) -> bool {
        self.x + self.w >= other.x
            && self.x <= other.x + other.w
            && self.y + self.h >= other.y
            && self.y <= other.y + other.h
    }
}

/// Reverse every step `actor` took this tick and forget them, so a second
/// collision in the same tick does not push it back again.
pub fn undo_moves(actor: &mut Player) {
    for dir in std::mem::take(&mut actor.move_dirs) {
        let (dx, dy) = dir.delta();
        actor.x -= dx * actor.speed;
        actor.y -= dy * actor.speed;
    }
}

/// Resolve every collision for one tick: bullets against cacti and
/// targets, actors against cacti and each other. Dead enemies are removed
/// and counted.
pub fn check_collisions(state: &mut GameState) {
    let GameState {
        player,
        enemies,
        cacti,
        hits,
        kills,
        config,
        ..
    } = state;

    // ── Bullets ↔ cacti ───────────────────────────────────────────────────────
    player
        .bullets
        .retain(|b| !cacti.iter().any(|c| b.hitbox().overlaps(&c.hitbox)));
    for enemy in enemies.iter_mut() {
        enemy
            .actor
            .bullets
            .retain(|b| !cacti.iter().any(|c| b.hitbox().overlaps(&c.hitbox)));
    }

    // ── Enemy bullets ↔ player ────────────────────────────────────────────────
    let player_box = player.hitbox();
    let mut damage_taken: u32 = 0;
    for enemy in enemies.iter_mut() {
        enemy.actor.bullets.retain(|b| {
            if b.hitbox().overlaps(&player_box) {
                damage_taken = damage_taken.saturating_add(b.damage);
                false
            } else {
                true
            }
        });
    }
    if damage_taken > 0 {
        player.take_damage(damage_taken);
        hits.push(hit_marker(
            player,
            damage_taken,
            HitTarget::Player,
            config.hit_duration,
        ));
    }

    // ── Player bullets ↔ enemies ──────────────────────────────────────────────
    player.bullets.retain(|b| {
        let bullet_box = b.hitbox();
        match enemies
            .iter_mut()
            .find(|e| !e.actor.is_dead() && e.actor.hitbox().overlaps(&bullet_box))
        {
            Some(enemy) => {
                enemy.actor.take_damage(b.damage);
                hits.push(hit_marker(
                    &enemy.actor,
                    b.damage,
                    HitTarget::Enemy,
                    config.hit_duration,
                ));
                false
            }
            None => true,
        }
    });

    let before = enemies.len();
    enemies.retain(|e| !e.actor.is_dead());
    let killed = (before - enemies.len()) as u32;
    if killed > 0 {
        *kills += killed;
        info!("{} enemy(s) down, {} total", killed, kills);
    }

    // ── Actors ↔ obstacles ────────────────────────────────────────────────────
    let player_box = player.hitbox();
    let player_blocked = cacti.iter().any(|c| player_box.overlaps(&c.hitbox))
        || enemies.iter().any(|e| player_box.overlaps(&e.actor.hitbox()));
    if player_blocked {
        undo_moves(player);
    }

    let blocked = blocked_enemies(enemies, cacti);
    for (enemy, blocked) in enemies.iter_mut().zip(blocked) {
        if blocked {
            undo_moves(&mut enemy.actor);
        }
    }
}

/// Which enemies overlap a cactus or another enemy. Each enemy pair is
/// tested once and both sides are flagged.
fn blocked_enemies(enemies: &[Enemy], cacti: &[Cactus]) -> Vec<bool> {
    let boxes: Vec<HitBox> = enemies.iter().map(|e| e.actor.hitbox()).collect();
    let mut blocked: Vec<bool> = boxes
        .iter()
        .map(|own| cacti.iter().any(|c| own.overlaps(&c.hitbox)))
        .collect();
    for (i, own) in boxes.iter().enumerate() {
        for (j, other) in boxes.iter().enumerate().skip(i + 1) {
            if own.overlaps(other) {
                blocked[i] = true;
                blocked[j] = true;
            }
        }
    }
    blocked
}

fn hit_marker(target: &Player, damage: u32, kind: HitTarget, duration: i32) -> Hit {
    let (x, _) = target.center();
    Hit {
        x,
        y: target.y,
        msg: format!("-{}", damage),
        target: kind,
        duration,
    }
}
