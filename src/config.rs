//! Gameplay tuning, loadable from a JSON file. Every field has a default,
//! so a config file only needs the values it changes.

use std::fs;
use std::path::Path;

use anyhow::Context;
use log::warn;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Logical screen size in world units. Enemies spawn inside it and
    /// cacti are scattered over 3× this area.
    pub screen_width: f64,
    pub screen_height: f64,
    pub enemy_count: usize,
    pub cactus_count: usize,
    pub cactus_scale: f64,
    pub sprite_scale: f64,
    pub player_speed: f64,
    pub player_health: u32,
    pub enemy_health: u32,
    /// Ticks between two frames of the running animation.
    pub animation_speed: u32,
    /// The frame counter wraps back to 1 at this value.
    pub max_frame_count: u32,
    pub bullet_speed: f64,
    pub bullet_duration: i32,
    pub bullet_damage: u32,
    /// Player bullets closer than this make a dodging enemy move.
    pub dodge_radius: f64,
    /// Ticks a damage number stays on screen.
    pub hit_duration: i32,
    pub seed: Option<u64>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            screen_width: 1280.0,
            screen_height: 860.0,
            enemy_count: 5,
            cactus_count: 60,
            cactus_scale: 4.0,
            sprite_scale: 2.0,
            player_speed: 2.0,
            player_health: 100,
            enemy_health: 30,
            animation_speed: 15,
            max_frame_count: 60,
            bullet_speed: 6.0,
            bullet_duration: 120,
            bullet_damage: 10,
            dodge_radius: 150.0,
            hit_duration: 40,
            seed: None,
        }
    }
}

impl GameConfig {
    pub fn from_json(content: &str) -> serde_json::Result<Self> {
        serde_json::from_str(content)
    }

    pub fn load(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)
            .with_context(|| format!("when loading config file at {:?}", path))?;
        Self::from_json(&content)
            .with_context(|| format!("when parsing config file at {:?}", path))
    }

    /// Clamp values that would stall the simulation or divide by zero.
    pub fn validated(mut self) -> Self {
        if self.animation_speed == 0 {
            warn!("animation_speed must be at least 1, using 1");
            self.animation_speed = 1;
        }
        if self.max_frame_count < 2 {
            warn!("max_frame_count must be at least 2, using 2");
            self.max_frame_count = 2;
        }
        if self.player_health == 0 {
            warn!("player_health must be at least 1, using 1");
            self.player_health = 1;
        }
        if self.enemy_health == 0 {
            warn!("enemy_health must be at least 1, using 1");
            self.enemy_health = 1;
        }
        if self.screen_width < 1.0 || self.screen_height < 1.0 {
            warn!(
                "screen size {}x{} is too small, using 1x1 minimum",
                self.screen_width, self.screen_height
            );
            self.screen_width = self.screen_width.max(1.0);
            self.screen_height = self.screen_height.max(1.0);
        }
        self
    }
}
