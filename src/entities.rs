//! All game entity types. Plain data plus a handful of read-only
//! accessors; the rules that mutate them live in `compute`, `animation`,
//! `ai` and `collision`.

use std::f64::consts::{FRAC_PI_2, FRAC_PI_4, PI};

use crate::config::GameConfig;

/// Side length of one unscaled sprite frame in the atlas.
pub const SPRITE_SIZE: f64 = 32.0;

/// Offset from an actor's top-left corner to its hitbox.
pub const ACTOR_HITBOX_OFFSET: f64 = 16.0;

/// Offset from a bullet's top-left corner to its hitbox (before scaling).
pub const BULLET_HITBOX_OFFSET: f64 = 14.0;

pub const BULLET_HITBOX_SIZE: f32 = 4.0;

// ── Directions, weapons, sprite states ───────────────────────────────────────

/// Facing and movement directions. The first six are facings the sprite
/// atlas can show; `Up`/`Down`/`Left`/`Right` double as cardinal moves.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Direction {
    Right,
    RightUp,
    RightDown,
    Left,
    LeftUp,
    LeftDown,
    Up,
    Down,
}

impl Direction {
    pub const CARDINALS: [Direction; 4] =
        [Direction::Up, Direction::Down, Direction::Left, Direction::Right];

    pub fn is_left(self) -> bool {
        matches!(self, Direction::Left | Direction::LeftUp | Direction::LeftDown)
    }

    pub fn opposite(self) -> Direction {
        match self {
            Direction::Right => Direction::Left,
            Direction::RightUp => Direction::LeftDown,
            Direction::RightDown => Direction::LeftUp,
            Direction::Left => Direction::Right,
            Direction::LeftUp => Direction::RightDown,
            Direction::LeftDown => Direction::RightUp,
            Direction::Up => Direction::Down,
            Direction::Down => Direction::Up,
        }
    }

    /// Unit step for this direction in screen space (y grows downward).
    pub fn delta(self) -> (f64, f64) {
        match self {
            Direction::Right => (1.0, 0.0),
            Direction::RightUp => (1.0, -1.0),
            Direction::RightDown => (1.0, 1.0),
            Direction::Left => (-1.0, 0.0),
            Direction::LeftUp => (-1.0, -1.0),
            Direction::LeftDown => (-1.0, 1.0),
            Direction::Up => (0.0, -1.0),
            Direction::Down => (0.0, 1.0),
        }
    }

    /// Bullet rotation in radians for a shot fired in this direction.
    pub fn rotation(self) -> f64 {
        match self {
            Direction::Right => 0.0,
            Direction::RightUp => -FRAC_PI_4,
            Direction::RightDown => FRAC_PI_4,
            Direction::Left => PI,
            Direction::LeftUp => -3.0 * FRAC_PI_4,
            Direction::LeftDown => 3.0 * FRAC_PI_4,
            Direction::Up => -FRAC_PI_2,
            Direction::Down => FRAC_PI_2,
        }
    }

    /// Combine a horizontal side with an optional vertical tilt.
    pub fn compose(left: bool, tilt: Option<Direction>) -> Direction {
        match (left, tilt) {
            (false, Some(Direction::Up)) => Direction::RightUp,
            (false, Some(Direction::Down)) => Direction::RightDown,
            (true, Some(Direction::Up)) => Direction::LeftUp,
            (true, Some(Direction::Down)) => Direction::LeftDown,
            (true, _) => Direction::Left,
            (false, _) => Direction::Right,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Weapon {
    Fists,
    Revolver,
}

impl Weapon {
    pub fn next(self) -> Weapon {
        match self {
            Weapon::Fists => Weapon::Revolver,
            Weapon::Revolver => Weapon::Fists,
        }
    }
}

/// Sprite atlas states, in atlas order: the no-gun sheet first, then the
/// revolver sheet.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SpriteState {
    NoGunRight,
    NoGunLeft,
    NoGunRunRight,
    NoGunRunLeft,
    RevolverRight,
    RevolverRightUp,
    RevolverRightDown,
    RevolverLeft,
    RevolverLeftUp,
    RevolverLeftDown,
    RevolverRunRight,
    RevolverRunRightUp,
    RevolverRunRightDown,
    RevolverRunLeft,
    RevolverRunLeftUp,
    RevolverRunLeftDown,
}

impl SpriteState {
    pub const COUNT: usize = 16;

    /// Index of this state's frame in the sprite atlas.
    pub fn index(self) -> usize {
        self as usize
    }
}

// ── Game mode ─────────────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Mode {
    Title,
    Game,
    Pause,
    GameOver,
}

// ── Enemy actions ─────────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ActionKind {
    Dodge,
    /// Never rolled yet; enemies holding it stand still.
    FindCover,
    /// Never rolled yet; enemies holding it stand still.
    Shoot,
    Move,
    MoveAndShoot,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Action {
    pub kind: ActionKind,
    /// Ticks left before the action is re-rolled.
    pub duration: i32,
    /// Wander direction for `Move`, chosen dodge side for `Dodge`.
    pub direction: Option<Direction>,
}

// ── Collision boxes ───────────────────────────────────────────────────────────

/// Axis-aligned bounding box in world units.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct HitBox {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
}

// ── Projectiles ───────────────────────────────────────────────────────────────

#[derive(Clone, Debug, PartialEq)]
pub struct Bullet {
    pub x: f64,
    pub y: f64,
    /// Heading in radians; 0 points right, positive turns downward.
    pub rotation: f64,
    pub speed: f64,
    pub scale: f64,
    /// Ticks left before the bullet vanishes.
    pub duration: i32,
    pub damage: u32,
}

impl Bullet {
    pub fn hitbox(&self) -> HitBox {
        HitBox {
            x: (self.x + BULLET_HITBOX_OFFSET * self.scale) as f32,
            y: (self.y + BULLET_HITBOX_OFFSET * self.scale) as f32,
            w: BULLET_HITBOX_SIZE * self.scale as f32,
            h: BULLET_HITBOX_SIZE * self.scale as f32,
        }
    }

    pub fn center(&self) -> (f64, f64) {
        let half = SPRITE_SIZE * self.scale / 2.0;
        (self.x + half, self.y + half)
    }
}

// ── Player & enemy ────────────────────────────────────────────────────────────

#[derive(Clone, Debug, PartialEq)]
pub struct Player {
    /// Top-left corner of the sprite.
    pub x: f64,
    pub y: f64,
    /// Unscaled sprite frame size.
    pub w: f64,
    pub h: f64,
    pub scale: f64,
    pub speed: f64,
    /// Ticks between two animation frames while running.
    pub animation_speed: u32,
    pub visual_dir: Direction,
    pub weapon: Weapon,
    pub state: SpriteState,
    pub hitbox_w: f32,
    pub hitbox_h: f32,
    pub hitbox_offset: f64,
    /// Cardinal steps taken this tick, in order. Cleared every tick.
    pub move_dirs: Vec<Direction>,
    pub bullets: Vec<Bullet>,
    pub health: u32,
    pub max_health: u32,
}

impl Player {
    /// The hitbox is derived from the position, so it can never lag behind
    /// a move.
    pub fn hitbox(&self) -> HitBox {
        HitBox {
            x: (self.x + self.hitbox_offset) as f32,
            y: (self.y + self.hitbox_offset) as f32,
            w: self.hitbox_w,
            h: self.hitbox_h,
        }
    }

    pub fn center(&self) -> (f64, f64) {
        (
            self.x + self.w * self.scale / 2.0,
            self.y + self.h * self.scale / 2.0,
        )
    }

    pub fn is_dead(&self) -> bool {
        self.health == 0
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct Enemy {
    pub actor: Player,
    pub action: Action,
    /// Detection radius around the enemy's centre.
    pub visual_dist: f64,
    /// Ticks between two steps.
    pub move_speed: u32,
    /// Ticks between two shots.
    pub shoot_speed: u32,
    /// Ticks until the next shot is allowed.
    pub reload: u32,
    /// Whether the player was inside `visual_dist` on the previous tick.
    pub player_in_sight: bool,
}

// ── World ─────────────────────────────────────────────────────────────────────

#[derive(Clone, Debug, PartialEq)]
pub struct Cactus {
    pub x: f64,
    pub y: f64,
    /// Index into the cactus sprite sheet and hitbox table.
    pub variant: usize,
    pub scale: f64,
    pub hitbox: HitBox,
}

// ── HUD overlays ──────────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HitTarget {
    Player,
    Enemy,
}

/// A floating damage number.
#[derive(Clone, Debug, PartialEq)]
pub struct Hit {
    pub x: f64,
    pub y: f64,
    pub msg: String,
    pub target: HitTarget,
    pub duration: i32,
}

#[derive(Clone, Debug, PartialEq)]
pub struct HealthBar {
    pub x: f64,
    pub y: f64,
    /// Bar width when `fixed_size` is set.
    pub w: f64,
    pub points: u32,
    pub max_points: u32,
    /// Width of one label character.
    pub font_size: f64,
    pub padding: f64,
    pub fixed_size: bool,
    /// Screen-anchored rather than following the camera.
    pub fixed_pos: bool,
}

// ── Per-tick input ────────────────────────────────────────────────────────────

/// Everything the simulation needs to know about the controls for one tick.
/// Movement and look flags are level-triggered; the rest fire once.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct FrameInput {
    pub move_up: bool,
    pub move_down: bool,
    pub move_left: bool,
    pub move_right: bool,
    pub look_up: bool,
    pub look_down: bool,
    pub look_left: bool,
    pub look_right: bool,
    pub shoot: bool,
    pub draw_revolver: bool,
    pub holster: bool,
    pub cycle_weapon: bool,
    pub confirm: bool,
    pub pause: bool,
}

// ── Master game state ─────────────────────────────────────────────────────────

/// The entire game state. Cloneable so `compute::tick` can return a new
/// copy without mutating its input.
#[derive(Clone, Debug, PartialEq)]
pub struct GameState {
    pub mode: Mode,
    pub player: Player,
    pub enemies: Vec<Enemy>,
    pub cacti: Vec<Cactus>,
    pub hits: Vec<Hit>,
    pub cam_x: f64,
    pub cam_y: f64,
    /// Visible area in world units. Starts at the configured screen size;
    /// a front end with a different window sets its own.
    pub view_width: f64,
    pub view_height: f64,
    /// Runs from 1 to `config.max_frame_count` and wraps.
    pub frame_count: u32,
    pub kills: u32,
    pub config: GameConfig,
}
