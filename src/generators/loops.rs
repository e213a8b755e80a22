use rand::{Rng, rngs::StdRng};

use crate::{
    error::MazeError,
    maze::{Direction, Maze},
};

/// Number of interior walls still standing between adjacent cells.
fn closed_walls(maze: &Maze) -> usize {
    maze.coords()
        .flat_map(|coord| {
            [Direction::Down, Direction::Right]
                .into_iter()
                .filter(move |&direction| {
                    maze.neighbor(coord, direction).is_some() && !maze.has_passage(coord, direction)
                })
        })
        .count()
}

/// Opens up to `count` extra walls picked uniformly at random, turning the spanning
/// tree into a maze with loops.
///
/// Picks that land on the outer boundary or on an already open side are retried.
/// Gives up once `max_attempts` picks have been made or no interior walls remain,
/// and returns the number of walls actually opened.
pub fn add_loops(
    maze: &mut Maze,
    count: usize,
    max_attempts: usize,
    rng: &mut StdRng,
) -> Result<usize, MazeError> {
    let target = count.min(closed_walls(maze));
    let mut added = 0;
    let mut attempts = 0;

    while added < target && attempts < max_attempts {
        attempts += 1;
        let coord = (
            rng.random_range(0..maze.width()),
            rng.random_range(0..maze.height()),
        );
        let direction = Direction::ALL[rng.random_range(0..Direction::ALL.len())];

        let Some(neighbor) = maze.neighbor(coord, direction) else {
            continue;
        };
        if maze[coord].is_open(direction) {
            continue;
        }
        maze.set_passage(coord, neighbor)?;
        added += 1;
    }

    if added < count {
        tracing::warn!(
            "[generate] loop augmentation stopped after {} attempts with {}/{} loops",
            attempts,
            added,
            count
        );
    }
    Ok(added)
}
