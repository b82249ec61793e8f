//! Health bars and floating damage numbers.

use crate::entities::{Enemy, HealthBar, Hit, Player};

impl HealthBar {
    /// Screen-anchored bar of fixed width for the player.
    pub fn for_player(player: &Player, x: f64, y: f64, w: f64) -> Self {
        Self {
            x,
            y,
            w,
            points: player.health,
            max_points: player.max_health,
            font_size: 1.0,
            padding: 2.0,
            fixed_size: true,
            fixed_pos: true,
        }
    }

    /// World-anchored bar sized to its label, centred above the enemy.
    pub fn for_enemy(enemy: &Enemy, font_size: f64) -> Self {
        let (x, _) = enemy.actor.center();
        Self {
            x,
            y: enemy.actor.y,
            w: 0.0,
            points: enemy.actor.health,
            max_points: enemy.actor.max_health,
            font_size,
            padding: 2.0 * font_size,
            fixed_size: false,
            fixed_pos: false,
        }
    }

    pub fn label(&self) -> String {
        format!("{}/{}", self.points, self.max_points)
    }

    pub fn width(&self) -> f64 {
        if self.fixed_size {
            self.w
        } else {
            self.label().len() as f64 * self.font_size + self.padding
        }
    }

    /// Widths of the remaining-health and lost-health segments.
    pub fn segments(&self) -> (f64, f64) {
        let width = self.width();
        if self.max_points == 0 {
            return (0.0, width);
        }
        let points = self.points.min(self.max_points);
        let filled = width * f64::from(points) / f64::from(self.max_points);
        (filled, width - filled)
    }

    /// Top-left corner of the bar on screen. World-anchored bars are
    /// centred on their anchor point and follow the camera.
    pub fn origin(&self, cam_x: f64, cam_y: f64) -> (f64, f64) {
        if self.fixed_pos {
            (self.x, self.y)
        } else {
            (self.x - self.width() / 2.0 - cam_x, self.y - cam_y)
        }
    }
}

impl Hit {
    /// Drift one unit upward and age one tick.
    pub fn update(&mut self) {
        self.y -= 1.0;
        self.duration -= 1;
    }
}

pub fn update_hits(hits: &mut Vec<Hit>) {
    for hit in hits.iter_mut() {
        hit.update();
    }
    hits.retain(|h| h.duration > 0);
}
