//! Directional sprite state machine: which atlas frame an actor shows for a
//! given weapon, facing and running phase.

use crate::entities::{Direction, Player, SpriteState, Weapon};

/// Sprite for a weapon, facing and running phase.
///
/// Fists only have left/right frames, so tilted facings collapse onto
/// their side. A bare `Up`/`Down` facing is treated as right-tilted.
pub fn sprite_for(weapon: Weapon, dir: Direction, running: bool) -> SpriteState {
    use SpriteState::*;

    match weapon {
        Weapon::Fists => match (dir.is_left(), running) {
            (false, false) => NoGunRight,
            (true, false) => NoGunLeft,
            (false, true) => NoGunRunRight,
            (true, true) => NoGunRunLeft,
        },
        Weapon::Revolver => match (dir, running) {
            (Direction::Right, false) => RevolverRight,
            (Direction::RightUp | Direction::Up, false) => RevolverRightUp,
            (Direction::RightDown | Direction::Down, false) => RevolverRightDown,
            (Direction::Left, false) => RevolverLeft,
            (Direction::LeftUp, false) => RevolverLeftUp,
            (Direction::LeftDown, false) => RevolverLeftDown,
            (Direction::Right, true) => RevolverRunRight,
            (Direction::RightUp | Direction::Up, true) => RevolverRunRightUp,
            (Direction::RightDown | Direction::Down, true) => RevolverRunRightDown,
            (Direction::Left, true) => RevolverRunLeft,
            (Direction::LeftUp, true) => RevolverRunLeftUp,
            (Direction::LeftDown, true) => RevolverRunLeftDown,
        },
    }
}

impl SpriteState {
    pub fn is_running(self) -> bool {
        use SpriteState::*;
        matches!(
            self,
            NoGunRunRight
                | NoGunRunLeft
                | RevolverRunRight
                | RevolverRunRightUp
                | RevolverRunRightDown
                | RevolverRunLeft
                | RevolverRunLeftUp
                | RevolverRunLeftDown
        )
    }

    pub fn weapon(self) -> Weapon {
        use SpriteState::*;
        match self {
            NoGunRight | NoGunLeft | NoGunRunRight | NoGunRunLeft => Weapon::Fists,
            _ => Weapon::Revolver,
        }
    }

    /// Facing shown by this frame.
    pub fn facing(self) -> Direction {
        use SpriteState::*;
        match self {
            NoGunRight | NoGunRunRight | RevolverRight | RevolverRunRight => Direction::Right,
            NoGunLeft | NoGunRunLeft | RevolverLeft | RevolverRunLeft => Direction::Left,
            RevolverRightUp | RevolverRunRightUp => Direction::RightUp,
            RevolverRightDown | RevolverRunRightDown => Direction::RightDown,
            RevolverLeftUp | RevolverRunLeftUp => Direction::LeftUp,
            RevolverLeftDown | RevolverRunLeftDown => Direction::LeftDown,
        }
    }

    /// The other phase of the two-frame running cycle.
    pub fn toggled(self) -> SpriteState {
        sprite_for(self.weapon(), self.facing(), !self.is_running())
    }

    pub fn standing(self) -> SpriteState {
        sprite_for(self.weapon(), self.facing(), false)
    }
}

impl Player {
    /// Face `dir`, keeping the running phase. `Up`/`Down` tilt the aim
    /// while keeping the current side.
    pub fn change_visual_direction(&mut self, dir: Direction) {
        self.visual_dir = match dir {
            Direction::Up | Direction::Down => {
                Direction::compose(self.visual_dir.is_left(), Some(dir))
            }
            d => d,
        };
        self.state = sprite_for(self.weapon, self.visual_dir, self.state.is_running());
    }

    pub fn draw_weapon(&mut self, weapon: Weapon) {
        self.weapon = weapon;
        self.state = sprite_for(weapon, self.visual_dir, false);
    }

    /// Advance the running cycle by one frame.
    pub fn animate(&mut self) {
        self.state = self.state.toggled();
    }

    pub fn stop_animation(&mut self) {
        self.state = self.state.standing();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_state_round_trips_through_the_table() {
        use SpriteState::*;
        let all = [
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
        ];
        assert_eq!(all.len(), SpriteState::COUNT);
        for (i, state) in all.iter().enumerate() {
            assert_eq!(state.index(), i);
            assert_eq!(
                sprite_for(state.weapon(), state.facing(), state.is_running()),
                *state
            );
        }
    }
}
