use std::{
    sync::atomic::{AtomicBool, Ordering},
    time::Duration,
};

mod exhaustive;
mod greedy;

pub use exhaustive::solve_exhaustive;
pub use greedy::{solve_greedy, solve_greedy_streaming};

use crate::maze::{Coord, Maze, VisitedMatrix};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Solver {
    /// First path found by a depth-first walk. Not necessarily the shortest.
    Greedy,
    /// Backtracking search over all simple paths, keeping the shortest.
    Exhaustive,
}

impl std::fmt::Display for Solver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Solver::Greedy => write!(f, "Greedy Depth-First Walk"),
            Solver::Exhaustive => write!(f, "Exhaustive Backtracking"),
        }
    }
}

impl std::str::FromStr for Solver {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "greedy" => Ok(Solver::Greedy),
            "exhaustive" => Ok(Solver::Exhaustive),
            other => Err(format!(
                "unknown solver '{}', expected 'greedy' or 'exhaustive'",
                other
            )),
        }
    }
}

/// Result of a single solve.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Solution {
    /// Cells from start to end, or empty when no path was found or the search was
    /// cancelled before reaching the end.
    pub path: Vec<Coord>,
    /// Per-solver marking, see [`solve_greedy`] and [`solve_exhaustive`].
    pub visited: VisitedMatrix,
    pub elapsed: Duration,
    /// Number of cells the search stepped onto.
    pub explored: usize,
    /// Set when the search observed a cancellation request and stopped early.
    pub interrupted: bool,
}

impl Solution {
    pub(crate) fn empty(maze: &Maze) -> Self {
        Solution {
            path: Vec::new(),
            visited: VisitedMatrix::new(maze.width(), maze.height()),
            elapsed: Duration::ZERO,
            explored: 0,
            interrupted: false,
        }
    }

    pub fn is_found(&self) -> bool {
        !self.path.is_empty()
    }

    /// Number of steps in the path, `None` when there is no path.
    pub fn edge_count(&self) -> Option<usize> {
        self.path.len().checked_sub(1)
    }
}

/// Snapshot of a running search handed to progress callbacks.
#[derive(Debug, Clone, Copy)]
pub struct SearchProgress<'a> {
    pub path: &'a [Coord],
    pub visited: &'a VisitedMatrix,
    pub explored: usize,
}

/// Optional cancellation flag and progress callback threaded through a search.
///
/// The flag is only read, never written, and is checked once per step of the
/// search. The callback runs on whichever thread runs the search.
#[derive(Default)]
pub struct SearchHooks<'a> {
    cancel: Option<&'a AtomicBool>,
    on_progress: Option<&'a mut dyn FnMut(SearchProgress<'_>)>,
}

impl<'a> SearchHooks<'a> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_cancel(mut self, cancel: &'a AtomicBool) -> Self {
        self.cancel = Some(cancel);
        self
    }

    pub fn with_progress(mut self, on_progress: &'a mut dyn FnMut(SearchProgress<'_>)) -> Self {
        self.on_progress = Some(on_progress);
        self
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancel
            .is_some_and(|cancel| cancel.load(Ordering::Acquire))
    }

    fn report(&mut self, progress: SearchProgress<'_>) {
        if let Some(on_progress) = self.on_progress.as_mut() {
            on_progress(progress);
        }
    }
}

/// Solve the maze from its entrance to its exit with the selected solver.
pub fn solve_maze(maze: &Maze, solver: Solver, hooks: SearchHooks<'_>) -> Solution {
    let (start, end) = (maze.entrance(), maze.exit());
    tracing::debug!("[solve] {} from {:?} to {:?}", solver, start, end);
    let solution = match solver {
        Solver::Greedy => solve_greedy_streaming(maze, start, end, hooks),
        Solver::Exhaustive => solve_exhaustive(maze, start, end, hooks),
    };
    tracing::info!(
        "[solve] {} finished in {:?}: {} cells on path, {} explored{}",
        solver,
        solution.elapsed,
        solution.path.len(),
        solution.explored,
        if solution.interrupted {
            " (cancelled)"
        } else {
            ""
        }
    );
    solution
}
