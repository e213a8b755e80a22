use std::time::Duration;

use thiserror::Error;

use crate::maze::Coord;

/// Errors raised while building or mutating a maze.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum MazeError {
    /// Both dimensions must be at least 1.
    #[error("maze dimensions must be positive, got {width}x{height}")]
    InvalidDimensions { width: usize, height: usize },
    /// A passage was requested between cells that do not share a side.
    #[error("cells {from:?} and {to:?} are not adjacent")]
    NotAdjacent { from: Coord, to: Coord },
}

/// Errors raised by the background solve worker and its coordinator.
#[derive(Debug, Error)]
pub enum WorkerError {
    #[error("failed to spawn solve worker: {0}")]
    Spawn(#[from] std::io::Error),
    #[error("solve worker did not stop within {timeout:?}")]
    JoinTimeout { timeout: Duration },
    #[error("solve worker panicked")]
    Panicked,
    #[error("no maze available to solve")]
    NoMaze,
}
