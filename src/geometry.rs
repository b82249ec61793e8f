//! Angle and distance helpers, and the quadrant buckets the AI uses to turn
//! an angle into a direction.

use std::f64::consts::{FRAC_PI_4, PI};

use crate::entities::Direction;

/// Angle of the vector from `(x1, y1)` to `(x2, y2)`, in `[-π, π]`.
pub fn angle_between_points(x1: f64, y1: f64, x2: f64, y2: f64) -> f64 {
    (y2 - y1).atan2(x2 - x1)
}

pub fn distance_between_points(x1: f64, y1: f64, x2: f64, y2: f64) -> f64 {
    ((x2 - x1) * (x2 - x1) + (y2 - y1) * (y2 - y1)).sqrt()
}

/// The cardinal direction whose quadrant contains `angle`.
///
/// Quadrants are centred on the axes and closed on their clockwise edge:
/// `(-π/4, π/4]` is `Right`, `(π/4, 3π/4]` is `Down`,
/// `(-3π/4, -π/4]` is `Up` and the rest is `Left`. Screen y grows downward.
pub fn cardinal_from_angle(angle: f64) -> Direction {
    let angle = normalize(angle);
    if angle > -FRAC_PI_4 && angle <= FRAC_PI_4 {
        Direction::Right
    } else if angle > FRAC_PI_4 && angle <= 3.0 * FRAC_PI_4 {
        Direction::Down
    } else if angle > -3.0 * FRAC_PI_4 && angle <= -FRAC_PI_4 {
        Direction::Up
    } else {
        Direction::Left
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Axis {
    Horizontal,
    Vertical,
}

impl Axis {
    /// The two cardinal directions along this axis.
    pub fn directions(self) -> [Direction; 2] {
        match self {
            Axis::Horizontal => [Direction::Left, Direction::Right],
            Axis::Vertical => [Direction::Up, Direction::Down],
        }
    }

    pub fn contains(self, dir: Direction) -> bool {
        self.directions().contains(&dir)
    }
}

/// Axis an actor should dodge along, given the angle from an incoming
/// bullet to the actor. A bullet coming from the side is dodged vertically,
/// one coming from above or below horizontally.
pub fn dodge_axis(bullet_to_actor: f64) -> Axis {
    match cardinal_from_angle(bullet_to_actor) {
        Direction::Left | Direction::Right => Axis::Vertical,
        _ => Axis::Horizontal,
    }
}

/// Wrap an angle into `(-π, π]`.
fn normalize(angle: f64) -> f64 {
    let mut a = angle % (2.0 * PI);
    if a <= -PI {
        a += 2.0 * PI;
    } else if a > PI {
        a -= 2.0 * PI;
    }
    a
}
