mod renderer;

pub use renderer::{Glyph, compose, frame_size};

use std::{
    io::{Stdout, Write},
    sync::mpsc::{Receiver, RecvTimeoutError},
    time::Duration,
};

use crossterm::{
    ExecutableCommand, cursor,
    event::{self, KeyCode},
    queue,
    style::{self, Attribute, Color, Stylize},
    terminal::{self, ClearType},
};

use crate::{
    generators::{GeneratorConfig, generate_maze},
    maze::Maze,
    solvers::Solver,
    worker::{Coordinator, SolveConfig, SolveEvent, SolveOutcome},
};

/// Maximum number of solve events to buffer in the channel between worker and renderer
const MAX_EVENTS_IN_CHANNEL_BUFFER: usize = 1000;
/// How long to wait for a solve event before checking for user input again
const EVENT_RECV_TIMEOUT: Duration = Duration::from_millis(10);

const USAGE: &str = "\
Usage: mazepath [OPTIONS]

Options:
  -w, --width <N>        Maze width in cells (default 16)
  -H, --height <N>       Maze height in cells (default 12)
  -s, --seed <N>         Seed for maze generation (default: random)
      --solver <NAME>    greedy or exhaustive (default exhaustive)
      --animate          Pace the solver so every step is drawn
      --plain            Print the solved maze instead of opening the viewer
  -h, --help             Show this message";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub width: usize,
    pub height: usize,
    pub seed: Option<u64>,
    pub solver: Solver,
    pub animate: bool,
    /// Open the full-screen viewer. When `false` the result is printed once.
    pub interactive: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            width: 16,
            height: 12,
            seed: None,
            solver: Solver::Exhaustive,
            animate: false,
            interactive: true,
        }
    }
}

impl AppConfig {
    /// Parse command-line arguments, excluding the program name.
    /// The error carries a message meant for the user, including for `--help`.
    pub fn from_args<I: IntoIterator<Item = String>>(args: I) -> Result<Self, String> {
        let mut config = AppConfig::default();
        let mut args = args.into_iter();
        while let Some(arg) = args.next() {
            match arg.as_str() {
                "-w" | "--width" => config.width = parse_dimension(&arg, args.next())?,
                "-H" | "--height" => config.height = parse_dimension(&arg, args.next())?,
                "-s" | "--seed" => {
                    let value = args.next().ok_or(format!("{} needs a value", arg))?;
                    let seed = value
                        .parse::<u64>()
                        .map_err(|_| format!("invalid seed '{}'", value))?;
                    config.seed = Some(seed);
                }
                "--solver" => {
                    let value = args.next().ok_or(format!("{} needs a value", arg))?;
                    config.solver = value.parse()?;
                }
                "--animate" => config.animate = true,
                "--plain" => config.interactive = false,
                "-h" | "--help" => return Err(USAGE.to_string()),
                other => return Err(format!("unknown argument '{}'\n\n{}", other, USAGE)),
            }
        }
        Ok(config)
    }

    pub fn generator_config(&self) -> GeneratorConfig {
        GeneratorConfig {
            seed: self.seed,
            ..GeneratorConfig::default()
        }
    }

    pub fn solve_config(&self) -> SolveConfig {
        SolveConfig {
            animate: self.animate,
            ..SolveConfig::default()
        }
    }
}

fn parse_dimension(flag: &str, value: Option<String>) -> Result<usize, String> {
    let value = value.ok_or(format!("{} needs a value", flag))?;
    match value.parse::<usize>() {
        Ok(n) if n > 0 => Ok(n),
        _ => Err(format!(
            "{} must be a positive number, got '{}'",
            flag, value
        )),
    }
}

/// Set a panic hook to restore terminal state on panic
/// This ensures that the terminal is not left in raw mode or alternate screen on panic
/// even if the panic occurs in a different thread
fn set_panic_hook() {
    let hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        let _ = restore_terminal(&mut std::io::stdout()); // ignore any errors as we are already failing
        hook(panic_info);
    }));
}

/// Setup terminal in raw mode and enter alternate screen
/// Also sets a panic hook to restore terminal on panic
pub fn setup_terminal(stdout: &mut Stdout) -> std::io::Result<()> {
    terminal::enable_raw_mode()?;
    set_panic_hook();
    queue!(
        stdout,
        terminal::EnterAlternateScreen,
        terminal::Clear(ClearType::All),
        cursor::Hide,
        cursor::MoveTo(0, 0)
    )?;
    stdout.flush()?;
    Ok(())
}

/// Restore terminal to original state
/// Leave alternate screen and disable raw mode
pub fn restore_terminal(stdout: &mut Stdout) -> std::io::Result<()> {
    queue!(stdout, terminal::LeaveAlternateScreen, cursor::Show)?;
    stdout.flush()?;
    terminal::disable_raw_mode()?;
    Ok(())
}

/// Block until one of `codes` is pressed and return it
fn wait_for_keypress(codes: &[KeyCode]) -> std::io::Result<KeyCode> {
    loop {
        if let event::Event::Key(event::KeyEvent { code, kind, .. }) = event::read()?
            && kind == event::KeyEventKind::Press
            && codes.contains(&code)
        {
            return Ok(code);
        }
    }
}

fn new_maze(config: &AppConfig, round: u64) -> std::io::Result<Maze> {
    let mut generator_config = config.generator_config();
    // Each regeneration with a fixed seed still yields a new maze
    generator_config.seed = generator_config.seed.map(|seed| seed.wrapping_add(round));
    generate_maze(config.width, config.height, &generator_config)
        .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidInput, e))
}

fn summary(outcome: &SolveOutcome) -> String {
    let solution = &outcome.solution;
    let result = match (solution.edge_count(), outcome.cancelled) {
        (Some(steps), false) => format!("path of {} steps", steps),
        (Some(steps), true) => format!("cancelled, best path so far {} steps", steps),
        (None, false) => "no path found".to_string(),
        (None, true) => "cancelled before a path was found".to_string(),
    };
    format!(
        "{}: {} ({} cells explored in {:?})",
        outcome.solver, result, solution.explored, solution.elapsed
    )
}

/// Entry point of the terminal app
pub fn run(stdout: &mut Stdout, config: &AppConfig) -> std::io::Result<()> {
    let maze = new_maze(config, 0)?;
    if !config.interactive {
        return run_plain(stdout, maze, config);
    }

    setup_terminal(stdout)?;
    let result = run_interactive(stdout, maze, config);
    restore_terminal(stdout)?;
    result
}

/// Solve once on the worker and print the final frame
fn run_plain(stdout: &mut Stdout, maze: Maze, config: &AppConfig) -> std::io::Result<()> {
    let view = maze.clone();
    let mut coordinator = Coordinator::new(maze, config.solve_config());
    coordinator
        .start(config.solver, None)
        .map_err(std::io::Error::other)?;
    let outcome = coordinator
        .wait()
        .map_err(std::io::Error::other)?
        .ok_or_else(|| std::io::Error::other("solve worker vanished"))?;

    let frame = compose(&view, &outcome.solution.path, Some(&outcome.solution.visited));
    renderer::print_plain(stdout, &frame)?;
    writeln!(stdout, "{}", summary(&outcome))?;
    Ok(())
}

fn run_interactive(stdout: &mut Stdout, maze: Maze, config: &AppConfig) -> std::io::Result<()> {
    let mut coordinator = Coordinator::new(maze, config.solve_config());
    let mut round = 0;

    loop {
        let view = coordinator
            .maze()
            .cloned()
            .ok_or_else(|| std::io::Error::other("maze is owned by a running worker"))?;

        let (term_width, term_height) = terminal::size()?;
        let (frame_width, frame_height) = frame_size(&view);
        if (term_width as usize) < frame_width || (term_height as usize) < frame_height {
            stdout.execute(style::PrintStyledContent(
                format!(
                    "Terminal size ({}x{}) is too small for the maze ({}x{}). Press Esc to exit...\r\n",
                    term_width, term_height, frame_width, frame_height
                )
                .with(Color::Yellow)
                .attribute(Attribute::Bold),
            ))?;
            wait_for_keypress(&[KeyCode::Esc])?;
            return Ok(());
        }

        stdout.execute(terminal::Clear(ClearType::All))?;
        let (events_tx, events_rx) =
            std::sync::mpsc::sync_channel::<SolveEvent>(MAX_EVENTS_IN_CHANNEL_BUFFER);
        coordinator
            .start(config.solver, Some(events_tx))
            .map_err(std::io::Error::other)?;

        if !solve_loop(stdout, &view, &mut coordinator, events_rx)? {
            tracing::info!("[app] quit while solving");
            coordinator.stop().map_err(std::io::Error::other)?;
            return Ok(());
        }

        let Some(outcome) = coordinator.wait().map_err(std::io::Error::other)? else {
            return Ok(());
        };
        let frame = compose(&view, &outcome.solution.path, Some(&outcome.solution.visited));
        let status = format!("{}  [r] regenerate  [Esc] exit", summary(&outcome));
        renderer::draw(stdout, &frame, &status)?;

        match wait_for_keypress(&[KeyCode::Esc, KeyCode::Char('q'), KeyCode::Char('r')])? {
            KeyCode::Char('r') => {
                round += 1;
                coordinator
                    .replace_maze(new_maze(config, round)?)
                    .map_err(std::io::Error::other)?;
                tracing::info!("[app] regenerated maze, round {}", round);
            }
            _ => return Ok(()),
        }
    }
}

/// Repaint on every solve event until the worker hangs up.
/// Esc cancels the solve and keeps whatever it found; `q` quits.
/// Returns `false` if the user asked to quit.
fn solve_loop(
    stdout: &mut Stdout,
    view: &Maze,
    coordinator: &mut Coordinator,
    events_rx: Receiver<SolveEvent>,
) -> std::io::Result<bool> {
    tracing::info!("[app] started solve loop");
    let mut status = String::new();
    loop {
        if event::poll(Duration::ZERO)?
            && let event::Event::Key(key_event) = event::read()?
            && key_event.kind == event::KeyEventKind::Press
        {
            match key_event.code {
                KeyCode::Esc => {
                    tracing::debug!("[app] Esc key pressed, cancelling solve");
                    coordinator.cancel();
                }
                KeyCode::Char('q') => return Ok(false),
                _ => {}
            }
        }

        match events_rx.recv_timeout(EVENT_RECV_TIMEOUT) {
            Ok(SolveEvent::Started { solver }) => {
                status = format!("Solving with {}...  [Esc] cancel  [q] quit", solver);
                renderer::draw(stdout, &compose(view, &[], None), &status)?;
            }
            Ok(SolveEvent::Progress {
                path,
                visited,
                explored,
            }) => {
                let frame = compose(view, &path, Some(&visited));
                let line = format!("{}  {} explored", status, explored);
                renderer::draw(stdout, &frame, &line)?;
            }
            Ok(SolveEvent::Finished { cancelled, .. }) => {
                tracing::debug!("[app] worker finished, cancelled: {}", cancelled);
            }
            Err(RecvTimeoutError::Timeout) => continue,
            // Worker dropped its sender, the solve is over
            Err(RecvTimeoutError::Disconnected) => break,
        }
    }
    tracing::info!("[app] exiting solve loop");
    Ok(true)
}

/// Headless benchmark: generate mazes and time both solvers on each
pub fn profile(
    width: usize,
    height: usize,
    seed: u64,
    iterations: usize,
) -> std::io::Result<()> {
    let mut stdout = std::io::stdout();
    for i in 0..iterations {
        let config = GeneratorConfig::with_seed(seed.wrapping_add(i as u64));
        let maze = generate_maze(width, height, &config)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidInput, e))?;
        let mut coordinator = Coordinator::new(maze, SolveConfig::default());
        for solver in [Solver::Greedy, Solver::Exhaustive] {
            coordinator
                .start(solver, None)
                .map_err(std::io::Error::other)?;
            if let Some(outcome) = coordinator.wait().map_err(std::io::Error::other)? {
                writeln!(stdout, "[{}] {}", i, summary(&outcome))?;
            }
        }
    }
    Ok(())
}
