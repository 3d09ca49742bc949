//! Abstract player operations fed to `Game::tick`.
//!
//! Input polling and key mapping live outside the engine; collaborators
//! translate whatever input they have into one `OperationType` per tick.

use serde::{Deserialize, Serialize};

use super::direction::{Direction, Displacement};

/// One player operation.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OperationType {
    /// No input. Ignored by the engine.
    #[default]
    None,
    Up,
    Down,
    Left,
    Right,
    /// Advance one tick without moving You-blocks.
    Wait,
}

impl OperationType {
    /// Direction the You-blocks attempt to move in, if any.
    #[must_use]
    pub const fn direction(self) -> Option<Direction> {
        match self {
            OperationType::Up => Some(Direction::Up),
            OperationType::Down => Some(Direction::Down),
            OperationType::Left => Some(Direction::Left),
            OperationType::Right => Some(Direction::Right),
            OperationType::None | OperationType::Wait => None,
        }
    }

    /// Displacement for this operation. `Wait` and `None` map to zero.
    #[must_use]
    pub const fn displacement(self) -> Displacement {
        match self.direction() {
            Some(direction) => direction.displacement(),
            None => Displacement::ZERO,
        }
    }

    /// True if this operation advances the game.
    #[must_use]
    pub const fn is_tick(self) -> bool {
        !matches!(self, OperationType::None)
    }
}

impl From<Direction> for OperationType {
    fn from(direction: Direction) -> Self {
        match direction {
            Direction::Up => OperationType::Up,
            Direction::Down => OperationType::Down,
            Direction::Left => OperationType::Left,
            Direction::Right => OperationType::Right,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_operation_direction() {
        assert_eq!(OperationType::Up.direction(), Some(Direction::Up));
        assert_eq!(OperationType::Wait.direction(), None);
        assert_eq!(OperationType::None.direction(), None);
    }

    #[test]
    fn test_wait_has_zero_displacement() {
        assert!(OperationType::Wait.displacement().is_zero());
        assert_eq!(OperationType::Left.displacement(), Displacement::new(-1, 0));
    }

    #[test]
    fn test_is_tick() {
        assert!(!OperationType::None.is_tick());
        assert!(OperationType::Wait.is_tick());
        assert!(OperationType::Right.is_tick());
    }

    #[test]
    fn test_from_direction() {
        for direction in Direction::ALL {
            assert_eq!(OperationType::from(direction).direction(), Some(direction));
        }
    }
}
