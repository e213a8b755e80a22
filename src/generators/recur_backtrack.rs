use rand::{Rng, rngs::StdRng};

use crate::{
    error::MazeError,
    maze::{Coord, Maze},
};

/// Carves a spanning tree into a fully walled maze with an iterative randomized
/// depth-first search rooted at the entrance. Every cell ends up visited and
/// reachable from the entrance.
pub fn recursive_backtrack(maze: &mut Maze, rng: &mut StdRng) -> Result<(), MazeError> {
    let start = maze.entrance();
    maze.cell_mut(start).set_visited(true);

    // Initialize the stack with the starting point
    let mut stack = vec![start];
    let mut carved = 0usize;

    while let Some(&cell) = stack.last() {
        let neighbors = maze
            .neighbors(cell)
            .map(|(_, coord)| coord)
            .filter(|&coord| !maze[coord].is_visited())
            .collect::<Vec<Coord>>();

        if neighbors.is_empty() {
            // Dead end, backtrack
            stack.pop();
            continue;
        }

        let neighbor = neighbors[rng.random_range(0..neighbors.len())];
        maze.set_passage(cell, neighbor)?;
        maze.cell_mut(neighbor).set_visited(true);
        carved += 1;
        stack.push(neighbor);
    }

    tracing::trace!("[generate] spanning tree carved with {} passages", carved);
    Ok(())
}
