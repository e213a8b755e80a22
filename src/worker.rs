//! Background solving.
//!
//! A [`SolveTask`] takes ownership of a [`Maze`] for the duration of one solve and
//! hands it back when joined. The [`Coordinator`] keeps at most one task alive:
//! starting a new solve cancels and joins the previous one first.

use std::{
    sync::{
        Arc,
        atomic::{AtomicBool, Ordering},
        mpsc::{SyncSender, TrySendError},
    },
    thread::JoinHandle,
    time::{Duration, Instant},
};

use crate::{
    error::WorkerError,
    maze::{Coord, Maze, VisitedMatrix},
    solvers::{SearchHooks, SearchProgress, Solution, Solver, solve_maze},
};

/// How often to re-check a finished flag while waiting on a worker.
const JOIN_POLL_INTERVAL: Duration = Duration::from_millis(5);
/// How long a blocked animated send sleeps before retrying.
const SEND_RETRY_INTERVAL: Duration = Duration::from_millis(1);

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SolveConfig {
    /// Pace the search to the consumer: every progress step is delivered, waiting
    /// for room in the channel, followed by `animation_delay`.
    pub animate: bool,
    pub animation_delay: Duration,
    /// Minimum time between progress events when not animating. Events that find
    /// the channel full are dropped.
    pub progress_interval: Duration,
    /// Upper bound on waiting for a cancelled worker to exit.
    pub join_timeout: Duration,
    /// Stack size of the worker thread. The exhaustive solver recurses once per
    /// cell on the current path.
    pub stack_size: usize,
}

impl Default for SolveConfig {
    fn default() -> Self {
        Self {
            animate: false,
            animation_delay: Duration::from_millis(1),
            progress_interval: Duration::from_millis(16),
            join_timeout: Duration::from_secs(2),
            stack_size: 64 * 1024 * 1024,
        }
    }
}

/// Messages streamed from a worker to its consumer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SolveEvent {
    Started {
        solver: Solver,
    },
    Progress {
        path: Vec<Coord>,
        visited: VisitedMatrix,
        explored: usize,
    },
    Finished {
        explored: usize,
        elapsed: Duration,
        cancelled: bool,
    },
}

/// What a finished worker reports back.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SolveOutcome {
    pub solver: Solver,
    pub solution: Solution,
    /// The search stopped because it was cancelled, not because it ran out of paths.
    pub cancelled: bool,
}

/// Handle to a solve running on its own thread.
#[derive(Debug)]
pub struct SolveTask {
    solver: Solver,
    cancel: Arc<AtomicBool>,
    handle: JoinHandle<(Maze, SolveOutcome)>,
}

impl SolveTask {
    /// Move `maze` onto a new worker thread and solve it there. Progress events are
    /// sent on `events` when given; the sender is dropped when the worker exits.
    pub fn spawn(
        maze: Maze,
        solver: Solver,
        config: &SolveConfig,
        events: Option<SyncSender<SolveEvent>>,
    ) -> Result<Self, WorkerError> {
        let cancel = Arc::new(AtomicBool::new(false));
        let cancel_for_worker = cancel.clone();
        let config = config.clone();
        let handle = std::thread::Builder::new()
            .name("solve-worker".to_string())
            .stack_size(config.stack_size)
            .spawn(move || {
                let solution = run_solve(&maze, solver, &cancel_for_worker, &config, events);
                let cancelled = solution.interrupted;
                (
                    maze,
                    SolveOutcome {
                        solver,
                        solution,
                        cancelled,
                    },
                )
            })?;
        tracing::debug!("[worker] spawned {} worker", solver);
        Ok(SolveTask {
            solver,
            cancel,
            handle,
        })
    }

    pub fn solver(&self) -> Solver {
        self.solver
    }

    /// Ask the worker to stop. The solver notices at its next step.
    pub fn cancel(&self) {
        self.cancel.store(true, Ordering::Release);
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancel.load(Ordering::Acquire)
    }

    pub fn is_finished(&self) -> bool {
        self.handle.is_finished()
    }

    /// Block until the worker finishes or `timeout` elapses.
    /// Returns whether the worker has finished.
    pub fn wait(&self, timeout: Duration) -> bool {
        let deadline = Instant::now() + timeout;
        while !self.is_finished() {
            if Instant::now() >= deadline {
                return false;
            }
            std::thread::sleep(JOIN_POLL_INTERVAL);
        }
        true
    }

    /// Block until the worker finishes and take back the maze and the outcome.
    pub fn join(self) -> Result<(Maze, SolveOutcome), WorkerError> {
        self.handle.join().map_err(|_| WorkerError::Panicked)
    }
}

/// Runs on the worker thread.
fn run_solve(
    maze: &Maze,
    solver: Solver,
    cancel: &AtomicBool,
    config: &SolveConfig,
    events: Option<SyncSender<SolveEvent>>,
) -> Solution {
    let Some(events) = events else {
        return solve_maze(maze, solver, SearchHooks::new().with_cancel(cancel));
    };

    send_paced(&events, SolveEvent::Started { solver }, cancel);

    let mut last_sent: Option<Instant> = None;
    let mut on_progress = |progress: SearchProgress<'_>| {
        if config.animate {
            let event = progress_event(progress);
            send_paced(&events, event, cancel);
            std::thread::sleep(config.animation_delay);
            return;
        }
        if last_sent.is_some_and(|sent| sent.elapsed() < config.progress_interval) {
            return;
        }
        last_sent = Some(Instant::now());
        // Drop the frame if the consumer is behind
        events.try_send(progress_event(progress)).ok();
    };
    let hooks = SearchHooks::new()
        .with_cancel(cancel)
        .with_progress(&mut on_progress);
    let solution = solve_maze(maze, solver, hooks);

    let finished = SolveEvent::Finished {
        explored: solution.explored,
        elapsed: solution.elapsed,
        cancelled: solution.interrupted,
    };
    send_paced(&events, finished, cancel);
    solution
}

fn progress_event(progress: SearchProgress<'_>) -> SolveEvent {
    SolveEvent::Progress {
        path: progress.path.to_vec(),
        visited: progress.visited.clone(),
        explored: progress.explored,
    }
}

/// Send `event`, waiting for room in the channel unless the solve gets cancelled
/// or the consumer goes away. A consumer that stopped listening is not an error.
fn send_paced(events: &SyncSender<SolveEvent>, mut event: SolveEvent, cancel: &AtomicBool) {
    loop {
        match events.try_send(event) {
            Ok(()) | Err(TrySendError::Disconnected(_)) => return,
            Err(TrySendError::Full(returned)) => {
                if cancel.load(Ordering::Acquire) {
                    return;
                }
                event = returned;
                std::thread::sleep(SEND_RETRY_INTERVAL);
            }
        }
    }
}

/// Owns the maze between solves and the single solve worker during one.
#[derive(Debug)]
pub struct Coordinator {
    maze: Option<Maze>,
    task: Option<SolveTask>,
    config: SolveConfig,
}

impl Coordinator {
    pub fn new(maze: Maze, config: SolveConfig) -> Self {
        Self {
            maze: Some(maze),
            task: None,
            config,
        }
    }

    pub fn config(&self) -> &SolveConfig {
        &self.config
    }

    /// The maze, unless a worker currently owns it.
    pub fn maze(&self) -> Option<&Maze> {
        self.maze.as_ref()
    }

    /// Whether a worker exists and has not finished yet.
    pub fn is_running(&self) -> bool {
        self.task.as_ref().is_some_and(|task| !task.is_finished())
    }

    /// Start solving with `solver` on a fresh worker. Any running worker is
    /// cancelled and joined first; its outcome is returned.
    pub fn start(
        &mut self,
        solver: Solver,
        events: Option<SyncSender<SolveEvent>>,
    ) -> Result<Option<SolveOutcome>, WorkerError> {
        let previous = self.stop()?;
        let maze = self.maze.take().ok_or(WorkerError::NoMaze)?;
        tracing::info!(
            "[coordinator] starting {} on {}x{} maze",
            solver,
            maze.width(),
            maze.height()
        );
        self.task = Some(SolveTask::spawn(maze, solver, &self.config, events)?);
        Ok(previous)
    }

    /// Signal the running worker to stop without waiting for it.
    pub fn cancel(&self) {
        if let Some(task) = &self.task {
            tracing::debug!("[coordinator] cancelling {} worker", task.solver());
            task.cancel();
        }
    }

    /// Cancel the running worker and wait up to the configured timeout for it to
    /// exit. Returns its outcome, or `None` if no worker was running.
    ///
    /// On timeout the worker is kept and can be stopped again later.
    pub fn stop(&mut self) -> Result<Option<SolveOutcome>, WorkerError> {
        let Some(task) = self.task.take() else {
            return Ok(None);
        };
        task.cancel();
        let timeout = self.config.join_timeout;
        if !task.wait(timeout) {
            tracing::warn!("[coordinator] worker did not stop within {:?}", timeout);
            self.task = Some(task);
            return Err(WorkerError::JoinTimeout { timeout });
        }
        self.reclaim(task).map(Some)
    }

    /// Wait for the running worker to finish on its own.
    pub fn wait(&mut self) -> Result<Option<SolveOutcome>, WorkerError> {
        match self.task.take() {
            Some(task) => self.reclaim(task).map(Some),
            None => Ok(None),
        }
    }

    /// Swap in a new maze, stopping any running worker first.
    pub fn replace_maze(&mut self, maze: Maze) -> Result<Option<SolveOutcome>, WorkerError> {
        let previous = self.stop()?;
        self.maze = Some(maze);
        Ok(previous)
    }

    fn reclaim(&mut self, task: SolveTask) -> Result<SolveOutcome, WorkerError> {
        let (maze, outcome) = task.join()?;
        tracing::debug!(
            "[coordinator] {} worker joined, cancelled: {}",
            outcome.solver,
            outcome.cancelled
        );
        self.maze = Some(maze);
        Ok(outcome)
    }
}

impl Drop for Coordinator {
    fn drop(&mut self) {
        if let Some(task) = self.task.take() {
            task.cancel();
            if task.wait(self.config.join_timeout) {
                task.join().ok();
            } else {
                tracing::warn!("[coordinator] detaching worker that did not stop");
            }
        }
    }
}
