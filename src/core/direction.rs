//! Grid directions, positions and displacements.
//!
//! The grid uses screen coordinates: `x` grows to the right and `y` grows
//! downward. Row-major iteration is therefore `y` outer, `x` inner.
//!
//! ```
//! use rulegrid::core::{Direction, Position};
//!
//! let start = Position::new(2, 2);
//! assert_eq!(start + Direction::Up.displacement(), Position::new(2, 1));
//! assert_eq!(Direction::Left.opposite(), Direction::Right);
//! assert!(Direction::Up.is_parallel(Direction::Down));
//! ```

use std::ops::{Add, AddAssign, Mul, Neg, Sub};

use serde::{Deserialize, Serialize};

/// One of the four cardinal facings a block can have.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    #[default]
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    /// All directions, in declaration order.
    pub const ALL: [Direction; 4] = [Direction::Up, Direction::Down, Direction::Left, Direction::Right];

    /// Unit displacement for one step in this direction.
    #[must_use]
    pub const fn displacement(self) -> Displacement {
        match self {
            Direction::Up => Displacement::new(0, -1),
            Direction::Down => Displacement::new(0, 1),
            Direction::Left => Displacement::new(-1, 0),
            Direction::Right => Displacement::new(1, 0),
        }
    }

    /// The direction pointing the other way.
    #[must_use]
    pub const fn opposite(self) -> Self {
        match self {
            Direction::Up => Direction::Down,
            Direction::Down => Direction::Up,
            Direction::Left => Direction::Right,
            Direction::Right => Direction::Left,
        }
    }

    /// True if both directions lie on the same axis.
    #[must_use]
    pub const fn is_parallel(self, other: Direction) -> bool {
        matches!(self.axis(), Axis::Vertical) == matches!(other.axis(), Axis::Vertical)
    }

    /// The axis this direction moves along.
    #[must_use]
    pub const fn axis(self) -> Axis {
        match self {
            Direction::Up | Direction::Down => Axis::Vertical,
            Direction::Left | Direction::Right => Axis::Horizontal,
        }
    }

    /// True if this direction points toward growing coordinates on its axis.
    #[must_use]
    pub const fn is_positive(self) -> bool {
        matches!(self, Direction::Down | Direction::Right)
    }

    /// Convert a unit displacement back to a direction.
    ///
    /// Returns `None` for the zero displacement and for anything that is not
    /// a single orthogonal step.
    #[must_use]
    pub fn from_displacement(displacement: Displacement) -> Option<Self> {
        Direction::ALL.into_iter().find(|d| d.displacement() == displacement)
    }
}

impl std::fmt::Display for Direction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Direction::Up => "Up",
            Direction::Down => "Down",
            Direction::Left => "Left",
            Direction::Right => "Right",
        };
        f.write_str(name)
    }
}

/// Grid axis.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Axis {
    Horizontal,
    Vertical,
}

impl Axis {
    /// The direction pointing toward growing coordinates on this axis.
    #[must_use]
    pub const fn positive(self) -> Direction {
        match self {
            Axis::Horizontal => Direction::Right,
            Axis::Vertical => Direction::Down,
        }
    }

    /// The direction pointing toward shrinking coordinates on this axis.
    #[must_use]
    pub const fn negative(self) -> Direction {
        self.positive().opposite()
    }
}

/// A cell coordinate. May lie outside the grid; see `Grid::in_bounds`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    #[must_use]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

impl std::fmt::Display for Position {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// Difference between two positions.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Displacement {
    pub dx: i32,
    pub dy: i32,
}

impl Displacement {
    pub const ZERO: Displacement = Displacement::new(0, 0);

    #[must_use]
    pub const fn new(dx: i32, dy: i32) -> Self {
        Self { dx, dy }
    }

    #[must_use]
    pub const fn is_zero(self) -> bool {
        self.dx == 0 && self.dy == 0
    }
}

impl Add<Displacement> for Position {
    type Output = Position;

    fn add(self, rhs: Displacement) -> Position {
        Position::new(self.x + rhs.dx, self.y + rhs.dy)
    }
}

impl AddAssign<Displacement> for Position {
    fn add_assign(&mut self, rhs: Displacement) {
        self.x += rhs.dx;
        self.y += rhs.dy;
    }
}

impl Sub<Displacement> for Position {
    type Output = Position;

    fn sub(self, rhs: Displacement) -> Position {
        Position::new(self.x - rhs.dx, self.y - rhs.dy)
    }
}

impl Sub<Position> for Position {
    type Output = Displacement;

    fn sub(self, rhs: Position) -> Displacement {
        Displacement::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl Neg for Displacement {
    type Output = Displacement;

    fn neg(self) -> Displacement {
        Displacement::new(-self.dx, -self.dy)
    }
}

impl Mul<i32> for Displacement {
    type Output = Displacement;

    fn mul(self, rhs: i32) -> Displacement {
        Displacement::new(self.dx * rhs, self.dy * rhs)
    }
}
