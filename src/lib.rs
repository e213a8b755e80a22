pub mod app;
pub mod error;
pub mod generators;
pub mod maze;
pub mod solvers;
pub mod worker;

pub use error::{MazeError, WorkerError};
pub use generators::{GeneratorConfig, generate_maze};
pub use maze::{Cell, Coord, Direction, Maze, VisitedMatrix};
pub use solvers::{
    SearchHooks, SearchProgress, Solution, Solver, solve_exhaustive, solve_greedy,
    solve_greedy_streaming, solve_maze,
};
pub use worker::{Coordinator, SolveConfig, SolveEvent, SolveOutcome, SolveTask};
