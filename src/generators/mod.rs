use rand::{SeedableRng, rngs::StdRng};

mod loops;
mod recur_backtrack;

use loops::add_loops;
use recur_backtrack::recursive_backtrack;

use crate::{
    error::MazeError,
    maze::{Direction, Maze},
};

/// Get a random number generator, optionally seeded for reproducibility.
fn get_rng(seed: Option<u64>) -> StdRng {
    match seed {
        Some(s) => StdRng::seed_from_u64(s),
        None => StdRng::from_os_rng(),
    }
}

/// Settings for [`generate_maze`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GeneratorConfig {
    /// Seed for the random number generator. `None` draws from OS entropy.
    pub seed: Option<u64>,
    /// One extra passage is added for every `loop_divisor` cells.
    pub loop_divisor: usize,
    /// Random picks allowed per requested loop before loop augmentation gives up.
    pub max_attempts_per_loop: usize,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            seed: None,
            loop_divisor: 20,
            max_attempts_per_loop: 64,
        }
    }
}

impl GeneratorConfig {
    pub fn with_seed(seed: u64) -> Self {
        Self {
            seed: Some(seed),
            ..Self::default()
        }
    }
}

/// Builds a `width x height` maze: a randomized depth-first spanning tree rooted at
/// the entrance, a sprinkle of extra passages that create loops, and openings on
/// the upper side of the entrance and the lower side of the exit.
pub fn generate_maze(
    width: usize,
    height: usize,
    config: &GeneratorConfig,
) -> Result<Maze, MazeError> {
    let mut maze = Maze::new(width, height)?;
    let mut rng = get_rng(config.seed);
    tracing::debug!(
        "[generate] carving {}x{} maze with seed {:?}",
        width,
        height,
        config.seed
    );

    recursive_backtrack(&mut maze, &mut rng)?;

    let requested = match config.loop_divisor {
        0 => 0,
        divisor => width * height / divisor,
    };
    let max_attempts = requested.saturating_mul(config.max_attempts_per_loop);
    let added = add_loops(&mut maze, requested, max_attempts, &mut rng)?;

    let (entrance, exit) = (maze.entrance(), maze.exit());
    maze.open_boundary(entrance, Direction::Up);
    maze.open_boundary(exit, Direction::Down);

    // Visited flags were carving bookkeeping only
    maze.coords()
        .for_each(|coord| maze.cell_mut(coord).set_visited(false));

    tracing::info!(
        "[generate] {}x{} maze ready, {}/{} loops added",
        width,
        height,
        added,
        requested
    );
    Ok(maze)
}
