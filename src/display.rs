//! Rendering layer. All terminal I/O lives here.
//!
//! Each function receives a mutable writer and an immutable view of the
//! game state. No game logic is performed; this module only translates
//! state into terminal commands.

use std::io::Write;

use crossterm::{
    cursor,
    style::{self, Color, Print},
    terminal, QueueableCommand,
};
use far_west::entities::{
    Bullet, Cactus, Direction, Enemy, GameState, HealthBar, Hit, HitTarget, Mode, Player,
    SpriteState, Weapon,
};

/// World units covered by one terminal cell.
pub const CELL_W: f64 = 10.0;
pub const CELL_H: f64 = 20.0;

const PLAYER_BAR_WIDTH: f64 = 20.0;

// ── Colour palette ────────────────────────────────────────────────────────────

const C_GROUND: Color = Color::Rgb { r: 76, g: 70, b: 50 };
const C_CACTUS: Color = Color::Green;
const C_PLAYER: Color = Color::White;
const C_ENEMY: Color = Color::DarkYellow;
const C_BULLET_PLAYER: Color = Color::Cyan;
const C_BULLET_ENEMY: Color = Color::Magenta;
const C_HEALTH: Color = Color::Green;
const C_HEALTH_LOST: Color = Color::DarkRed;
const C_HIT_PLAYER: Color = Color::Red;
const C_HIT_ENEMY: Color = Color::Yellow;
const C_HUD: Color = Color::Yellow;
const C_HINT: Color = Color::DarkGrey;
const C_TITLE: Color = Color::White;

/// Maps world coordinates onto the terminal grid around the camera.
struct View {
    cols: u16,
    rows: u16,
    cam_x: f64,
    cam_y: f64,
}

impl View {
    fn to_cell(&self, x: f64, y: f64) -> (i32, i32) {
        (
            ((x - self.cam_x) / CELL_W).round() as i32,
            ((y - self.cam_y) / CELL_H).round() as i32,
        )
    }

    /// Queue `text` at a cell, skipping anything outside the play area
    /// (row 0 is the HUD, the last row the controls hint).
    fn put<W: Write>(
        &self,
        out: &mut W,
        col: i32,
        row: i32,
        text: &str,
        color: Color,
    ) -> std::io::Result<()> {
        let len = text.chars().count() as i32;
        if row < 1 || row >= self.rows as i32 - 1 || col < 0 || col + len > self.cols as i32 {
            return Ok(());
        }
        out.queue(cursor::MoveTo(col as u16, row as u16))?;
        out.queue(style::SetForegroundColor(color))?;
        out.queue(Print(text))?;
        Ok(())
    }
}

// ── Public entry point ────────────────────────────────────────────────────────

/// Render one complete frame.
pub fn render<W: Write>(out: &mut W, state: &GameState) -> std::io::Result<()> {
    let (cols, rows) = terminal::size()?;
    let view = View {
        cols,
        rows,
        cam_x: state.cam_x,
        cam_y: state.cam_y,
    };

    out.queue(style::SetBackgroundColor(C_GROUND))?;
    out.queue(terminal::Clear(terminal::ClearType::All))?;

    match state.mode {
        Mode::Title => {
            draw_cacti(out, &view, &state.cacti)?;
            for enemy in &state.enemies {
                draw_actor(out, &view, &enemy.actor, C_ENEMY)?;
            }
            draw_banner(out, &view, &["FAR WEST", "", "PRESS SPACE KEY"])?;
        }
        Mode::Game => {
            draw_world(out, &view, state)?;
            draw_hud(out, &view, state)?;
        }
        Mode::Pause => {
            draw_world(out, &view, state)?;
            draw_hud(out, &view, state)?;
            draw_banner(out, &view, &["PAUSED", "", "PRESS SPACE KEY"])?;
        }
        Mode::GameOver => {
            let kills = format!("OUTLAWS DOWN: {}", state.kills);
            draw_banner(out, &view, &["GAME OVER!", &kills, "", "PRESS SPACE KEY"])?;
        }
    }
    draw_controls_hint(out, &view)?;

    // Park cursor in a harmless spot and flush
    out.queue(style::ResetColor)?;
    out.queue(cursor::MoveTo(0, rows.saturating_sub(1)))?;
    out.flush()?;
    Ok(())
}

// ── World ─────────────────────────────────────────────────────────────────────

fn draw_world<W: Write>(out: &mut W, view: &View, state: &GameState) -> std::io::Result<()> {
    draw_cacti(out, view, &state.cacti)?;
    for enemy in &state.enemies {
        draw_actor(out, view, &enemy.actor, C_ENEMY)?;
        draw_enemy_health(out, view, enemy)?;
        draw_bullets(out, view, &enemy.actor.bullets, C_BULLET_ENEMY)?;
    }
    draw_actor(out, view, &state.player, C_PLAYER)?;
    draw_bullets(out, view, &state.player.bullets, C_BULLET_PLAYER)?;
    for hit in &state.hits {
        draw_hit(out, view, hit)?;
    }
    Ok(())
}

fn draw_cacti<W: Write>(out: &mut W, view: &View, cacti: &[Cactus]) -> std::io::Result<()> {
    for cactus in cacti {
        let hb = cactus.hitbox;
        let (col, row) = view.to_cell(f64::from(hb.x), f64::from(hb.y));
        let (col_end, row_end) = view.to_cell(f64::from(hb.x + hb.w), f64::from(hb.y + hb.h));
        // Trunk drawn over the hitbox so what blocks is what you see.
        for r in row..=row_end.max(row) {
            for c in col..=col_end.max(col) {
                let glyph = if r == row { "¥" } else { "║" };
                view.put(out, c, r, glyph, C_CACTUS)?;
            }
        }
    }
    Ok(())
}

/// Two-cell actor glyph: body plus weapon on the facing side.
fn actor_glyph(state: SpriteState) -> String {
    let body = if state.is_running() { '&' } else { '@' };
    let facing = state.facing();
    let weapon = match (state.weapon(), facing.is_left()) {
        (Weapon::Fists, false) => '>',
        (Weapon::Fists, true) => '<',
        (Weapon::Revolver, _) => match facing {
            Direction::RightUp | Direction::LeftDown => '/',
            Direction::RightDown | Direction::LeftUp => '\\',
            _ => '=',
        },
    };
    if facing.is_left() {
        format!("{}{}", weapon, body)
    } else {
        format!("{}{}", body, weapon)
    }
}

fn draw_actor<W: Write>(
    out: &mut W,
    view: &View,
    actor: &Player,
    color: Color,
) -> std::io::Result<()> {
    let (x, y) = actor.center();
    let (col, row) = view.to_cell(x, y);
    let glyph = actor_glyph(actor.state);
    let col = if actor.state.facing().is_left() { col - 1 } else { col };
    view.put(out, col, row, &glyph, color)
}

fn draw_bullets<W: Write>(
    out: &mut W,
    view: &View,
    bullets: &[Bullet],
    color: Color,
) -> std::io::Result<()> {
    for bullet in bullets {
        let (x, y) = bullet.center();
        let (col, row) = view.to_cell(x, y);
        view.put(out, col, row, "•", color)?;
    }
    Ok(())
}

fn draw_hit<W: Write>(out: &mut W, view: &View, hit: &Hit) -> std::io::Result<()> {
    let color = match hit.target {
        HitTarget::Player => C_HIT_PLAYER,
        HitTarget::Enemy => C_HIT_ENEMY,
    };
    let (col, row) = view.to_cell(hit.x, hit.y);
    view.put(out, col, row - 1, &hit.msg, color)
}

// ── Health bars ───────────────────────────────────────────────────────────────

/// Queue a bar starting at a cell: coloured cells for the remaining and
/// lost health, with the `points/max` label printed over them.
fn draw_bar<W: Write>(
    out: &mut W,
    col: i32,
    row: i32,
    bar: &HealthBar,
    cells: f64,
) -> std::io::Result<()> {
    let (filled, _) = bar.segments();
    let total = (bar.width() / cells).round().max(1.0) as usize;
    let kept = ((filled / cells).round() as usize).min(total);
    let label = bar.label();
    let mut text: Vec<char> = vec![' '; total];
    let start = total.saturating_sub(label.len()) / 2;
    for (i, ch) in label.chars().enumerate() {
        if let Some(slot) = text.get_mut(start + i) {
            *slot = ch;
        }
    }

    let (kept_text, lost_text): (String, String) = (
        text[..kept].iter().collect(),
        text[kept..].iter().collect(),
    );
    out.queue(style::SetForegroundColor(Color::Black))?;
    if !kept_text.is_empty() && row >= 0 && col >= 0 {
        out.queue(cursor::MoveTo(col as u16, row as u16))?;
        out.queue(style::SetBackgroundColor(C_HEALTH))?;
        out.queue(Print(&kept_text))?;
    }
    if !lost_text.is_empty() && row >= 0 && col + kept as i32 >= 0 {
        out.queue(cursor::MoveTo((col + kept as i32) as u16, row as u16))?;
        out.queue(style::SetBackgroundColor(C_HEALTH_LOST))?;
        out.queue(Print(&lost_text))?;
    }
    out.queue(style::SetBackgroundColor(C_GROUND))?;
    Ok(())
}

fn draw_enemy_health<W: Write>(out: &mut W, view: &View, enemy: &Enemy) -> std::io::Result<()> {
    let bar = HealthBar::for_enemy(enemy, CELL_W);
    let (x, y) = bar.origin(view.cam_x, view.cam_y);
    let col = (x / CELL_W).round() as i32;
    let row = (y / CELL_H).round() as i32 - 1;
    let cells = (bar.width() / CELL_W).round() as i32;
    if row < 1 || row >= view.rows as i32 - 1 || col < 0 || col + cells > view.cols as i32 {
        return Ok(());
    }
    draw_bar(out, col, row, &bar, CELL_W)
}

// ── HUD (row 0) ───────────────────────────────────────────────────────────────

fn draw_hud<W: Write>(out: &mut W, view: &View, state: &GameState) -> std::io::Result<()> {
    let bar = HealthBar::for_player(&state.player, 1.0, 0.0, PLAYER_BAR_WIDTH);
    let (x, y) = bar.origin(view.cam_x, view.cam_y);
    draw_bar(out, x as i32, y as i32, &bar, 1.0)?;

    let weapon = match state.player.weapon {
        Weapon::Fists => "FISTS",
        Weapon::Revolver => "REVOLVER",
    };
    let right = format!("{}   OUTLAWS DOWN: {}", weapon, state.kills);
    let col = view.cols.saturating_sub(right.chars().count() as u16 + 1);
    out.queue(cursor::MoveTo(col, 0))?;
    out.queue(style::SetForegroundColor(C_HUD))?;
    out.queue(Print(&right))?;
    Ok(())
}

// ── Overlays ──────────────────────────────────────────────────────────────────

fn draw_banner<W: Write>(out: &mut W, view: &View, lines: &[&str]) -> std::io::Result<()> {
    let cx = view.cols / 2;
    let start_row = (view.rows / 3).max(1);
    for (i, line) in lines.iter().enumerate() {
        let col = cx.saturating_sub(line.chars().count() as u16 / 2);
        out.queue(cursor::MoveTo(col, start_row + i as u16))?;
        out.queue(style::SetForegroundColor(C_TITLE))?;
        out.queue(Print(*line))?;
    }
    Ok(())
}

fn draw_controls_hint<W: Write>(out: &mut W, view: &View) -> std::io::Result<()> {
    out.queue(cursor::MoveTo(1, view.rows.saturating_sub(1)))?;
    out.queue(style::SetForegroundColor(C_HINT))?;
    out.queue(Print(
        "WASD: Move  Arrows: Aim  SPACE: Shoot  1/0/TAB: Weapon  P: Pause  ESC: Quit",
    ))?;
    Ok(())
}
