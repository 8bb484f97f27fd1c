//! Grid adjacency directions and their unit offsets

use std::fmt;

/// Integer grid coordinate `(x, y)`
///
/// Ordered by `x` then `y` so position sets iterate deterministically.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Position {
    /// Column, growing rightwards
    pub x: usize,
    /// Row, growing upwards
    pub y: usize,
}

impl Position {
    /// Create a position from its coordinates
    pub const fn new(x: usize, y: usize) -> Self {
        Self { x, y }
    }

    /// Step one cell towards `direction`, staying inside `[0, width) x [0, height)`
    pub const fn step(self, direction: Direction, width: usize, height: usize) -> Option<Self> {
        let (dx, dy) = direction.offset();
        let x = match self.x.checked_add_signed(dx) {
            Some(x) if x < width => x,
            _ => return None,
        };
        let y = match self.y.checked_add_signed(dy) {
            Some(y) if y < height => y,
            _ => return None,
        };
        Some(Self { x, y })
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// The four grid-adjacency directions
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Direction {
    /// Towards `y + 1`
    Up,
    /// Towards `x + 1`
    Right,
    /// Towards `y - 1`
    Down,
    /// Towards `x - 1`
    Left,
}

impl Direction {
    /// Every direction in rule-table order
    pub const ALL: [Self; 4] = [Self::Up, Self::Right, Self::Down, Self::Left];

    /// Direction seen from the neighbour's side
    pub const fn opposite(self) -> Self {
        match self {
            Self::Up => Self::Down,
            Self::Right => Self::Left,
            Self::Down => Self::Up,
            Self::Left => Self::Right,
        }
    }

    /// Unit vector `(dx, dy)`
    pub const fn offset(self) -> (isize, isize) {
        match self {
            Self::Up => (0, 1),
            Self::Right => (1, 0),
            Self::Down => (0, -1),
            Self::Left => (-1, 0),
        }
    }

    /// Slot of this direction in per-direction tables
    pub const fn index(self) -> usize {
        match self {
            Self::Up => 0,
            Self::Right => 1,
            Self::Down => 2,
            Self::Left => 3,
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Up => "UP",
            Self::Right => "RIGHT",
            Self::Down => "DOWN",
            Self::Left => "LEFT",
        };
        f.write_str(name)
    }
}
