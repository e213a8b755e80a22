use std::time::Instant;

use super::{SearchHooks, SearchProgress, Solution};
use crate::maze::{Coord, Maze, VisitedMatrix};

/// Walk the maze depth-first from `start`, always taking the first unvisited open
/// neighbor in up, down, left, right order, and return the first path that reaches
/// `end`. The path is not necessarily the shortest.
///
/// The returned visited matrix holds every cell the walk stepped onto, including
/// dead ends it backed out of.
pub fn solve_greedy(maze: &Maze, start: Coord, end: Coord) -> Solution {
    solve_greedy_streaming(maze, start, end, SearchHooks::new())
}

/// [`solve_greedy`] with a cancellation check before each step and a progress report
/// after it. On cancellation the path is empty and `interrupted` is set.
pub fn solve_greedy_streaming(
    maze: &Maze,
    start: Coord,
    end: Coord,
    mut hooks: SearchHooks<'_>,
) -> Solution {
    let timer = Instant::now();
    if !maze.contains(start) {
        return Solution::empty(maze);
    }

    let mut visited = VisitedMatrix::new(maze.width(), maze.height());
    // The stack doubles as the current path: it only ever holds the chain of cells
    // from `start` to the cell being examined.
    let mut stack = vec![start];
    visited.mark(start);
    let mut explored = 1;
    let mut interrupted = false;

    while let Some(&current) = stack.last() {
        if hooks.is_cancelled() {
            interrupted = true;
            stack.clear();
            break;
        }
        hooks.report(SearchProgress {
            path: &stack,
            visited: &visited,
            explored,
        });

        if current == end {
            break;
        }

        let next = maze
            .open_neighbors(current)
            .find(|&coord| !visited.is_visited(coord));
        match next {
            Some(next) => {
                visited.mark(next);
                explored += 1;
                stack.push(next);
            }
            None => {
                // Dead end, it stays marked and is never entered again
                stack.pop();
            }
        }
    }

    Solution {
        path: stack,
        visited,
        elapsed: timer.elapsed(),
        explored,
        interrupted,
    }
}
