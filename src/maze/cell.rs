use std::fmt;

/// One of the four sides of a cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    /// Fixed enumeration order. Solvers walk neighbors in this order, which keeps
    /// their output deterministic for a given maze.
    pub const ALL: [Direction; 4] = [
        Direction::Up,
        Direction::Down,
        Direction::Left,
        Direction::Right,
    ];

    pub fn opposite(self) -> Self {
        match self {
            Direction::Up => Direction::Down,
            Direction::Down => Direction::Up,
            Direction::Left => Direction::Right,
            Direction::Right => Direction::Left,
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Direction::Up => write!(f, "up"),
            Direction::Down => write!(f, "down"),
            Direction::Left => write!(f, "left"),
            Direction::Right => write!(f, "right"),
        }
    }
}

/// A single maze cell.
///
/// Each side flag is `true` when the side is open and `false` when it is a wall.
/// Cells never hold references to their neighbors; adjacency is derived from
/// coordinates by [`Maze`](super::Maze).
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Cell {
    up: bool,
    down: bool,
    left: bool,
    right: bool,
    /// Generation bookkeeping only. Always `false` once a maze has been handed out.
    visited: bool,
}

impl Cell {
    /// A cell with all four walls standing.
    pub const WALLED: Cell = Cell {
        up: false,
        down: false,
        left: false,
        right: false,
        visited: false,
    };

    /// Whether this cell's own flag on the given side is open.
    /// This says nothing about the neighbor's reciprocal flag.
    pub fn is_open(&self, direction: Direction) -> bool {
        match direction {
            Direction::Up => self.up,
            Direction::Down => self.down,
            Direction::Left => self.left,
            Direction::Right => self.right,
        }
    }

    pub(crate) fn set_open(&mut self, direction: Direction, open: bool) {
        match direction {
            Direction::Up => self.up = open,
            Direction::Down => self.down = open,
            Direction::Left => self.left = open,
            Direction::Right => self.right = open,
        }
    }

    /// Number of open sides.
    pub fn open_sides(&self) -> usize {
        Direction::ALL
            .iter()
            .filter(|&&direction| self.is_open(direction))
            .count()
    }

    pub fn is_visited(&self) -> bool {
        self.visited
    }

    pub(crate) fn set_visited(&mut self, visited: bool) {
        self.visited = visited;
    }
}
