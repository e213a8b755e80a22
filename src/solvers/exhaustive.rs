use std::time::Instant;

use super::{SearchHooks, SearchProgress, Solution};
use crate::maze::{Coord, Maze, VisitedMatrix};

struct ExhaustiveSearch<'m, 'h> {
    maze: &'m Maze,
    end: Coord,
    /// Cells on the path currently being extended. Unmarked on backtrack.
    on_path: VisitedMatrix,
    path: Vec<Coord>,
    best: Option<Vec<Coord>>,
    hooks: SearchHooks<'h>,
    explored: usize,
    interrupted: bool,
}

impl ExhaustiveSearch<'_, '_> {
    fn explore(&mut self, coord: Coord) {
        if self.hooks.is_cancelled() {
            self.interrupted = true;
            return;
        }
        if !self.maze.contains(coord) || self.on_path.is_visited(coord) {
            return;
        }
        // Anything at least as long as the incumbent cannot beat it
        if let Some(best) = &self.best
            && self.path.len() >= best.len()
        {
            return;
        }

        self.on_path.mark(coord);
        self.path.push(coord);
        self.explored += 1;
        self.hooks.report(SearchProgress {
            path: &self.path,
            visited: &self.on_path,
            explored: self.explored,
        });

        if coord == self.end {
            if self
                .best
                .as_ref()
                .is_none_or(|best| self.path.len() < best.len())
            {
                tracing::trace!("[exhaustive] new best path of {} cells", self.path.len());
                self.best = Some(self.path.clone());
            }
        } else {
            let maze = self.maze;
            for next in maze.open_neighbors(coord) {
                self.explore(next);
            }
        }

        self.on_path.unmark(coord);
        self.path.pop();
    }
}

/// Search every simple path from `start` to `end` by recursive backtracking and
/// return the shortest one. Branches that are already as long as the best path
/// found so far are cut off.
///
/// The cancellation flag is checked once per recursive call. A cancelled search
/// returns whatever best path it had found, possibly none, with `interrupted` set.
///
/// The returned visited matrix is entirely `true`: it signals that the search has
/// finished rather than which cells were explored. Progress reports carry the
/// live path-only marking instead.
///
/// Runtime is exponential in the number of loops in the worst case.
pub fn solve_exhaustive(
    maze: &Maze,
    start: Coord,
    end: Coord,
    hooks: SearchHooks<'_>,
) -> Solution {
    let timer = Instant::now();
    let mut search = ExhaustiveSearch {
        maze,
        end,
        on_path: VisitedMatrix::new(maze.width(), maze.height()),
        path: Vec::new(),
        best: None,
        hooks,
        explored: 0,
        interrupted: false,
    };
    search.explore(start);
    debug_assert!(search.on_path.none() && search.path.is_empty());

    let mut visited = search.on_path;
    visited.fill(true);

    Solution {
        path: search.best.unwrap_or_default(),
        visited,
        elapsed: timer.elapsed(),
        explored: search.explored,
        interrupted: search.interrupted,
    }
}
