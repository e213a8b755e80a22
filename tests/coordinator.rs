use std::{sync::mpsc::sync_channel, time::Duration};

use mazepath::{
    Coordinator, GeneratorConfig, SolveConfig, SolveEvent, Solver, generate_maze,
};

fn coordinator(width: usize, height: usize, seed: u64) -> Coordinator {
    let maze = generate_maze(width, height, &GeneratorConfig::with_seed(seed)).unwrap();
    Coordinator::new(maze, SolveConfig::default())
}

#[test]
fn test_solve_to_completion() {
    let mut coordinator = coordinator(10, 10, 1);
    for solver in [Solver::Greedy, Solver::Exhaustive] {
        coordinator.start(solver, None).unwrap();
        let outcome = coordinator.wait().unwrap().unwrap();
        assert_eq!(outcome.solver, solver);
        assert!(!outcome.cancelled);
        let maze = coordinator.maze().unwrap();
        assert!(maze.is_path_valid(&outcome.solution.path));
        assert_eq!(outcome.solution.path.last(), Some(&maze.exit()));
    }
}

#[test]
fn test_stop_large_exhaustive_solve() {
    let mut coordinator = coordinator(50, 50, 7);
    coordinator.start(Solver::Exhaustive, None).unwrap();
    std::thread::sleep(Duration::from_millis(10));
    let outcome = coordinator.stop().unwrap().unwrap();
    assert!(!coordinator.is_running());
    let maze = coordinator.maze().unwrap();
    // Whatever was found before the cancel must still be a real path
    assert!(maze.is_path_valid(&outcome.solution.path));
}

#[test]
fn test_restart_cancels_previous() {
    let mut coordinator = coordinator(50, 50, 8);
    assert!(coordinator.start(Solver::Exhaustive, None).unwrap().is_none());
    let previous = coordinator.start(Solver::Greedy, None).unwrap().unwrap();
    assert_eq!(previous.solver, Solver::Exhaustive);
    let outcome = coordinator.wait().unwrap().unwrap();
    assert_eq!(outcome.solver, Solver::Greedy);
    assert!(outcome.solution.is_found());
}

#[test]
fn test_replace_maze() {
    let mut coordinator = coordinator(6, 6, 2);
    coordinator.start(Solver::Greedy, None).unwrap();
    let replacement = generate_maze(3, 4, &GeneratorConfig::with_seed(3)).unwrap();
    coordinator.replace_maze(replacement.clone()).unwrap();
    assert_eq!(coordinator.maze(), Some(&replacement));
}

#[test]
fn test_stop_when_idle() {
    let mut coordinator = coordinator(3, 3, 4);
    assert!(coordinator.stop().unwrap().is_none());
    assert!(coordinator.wait().unwrap().is_none());
}

#[test]
fn test_start_reclaims_finished_worker() {
    let mut coordinator = coordinator(3, 3, 5);
    coordinator.start(Solver::Greedy, None).unwrap();
    assert!(coordinator.maze().is_none());
    // The maze comes back from the first worker before the second one starts
    let previous = coordinator.start(Solver::Exhaustive, None).unwrap();
    assert_eq!(previous.map(|outcome| outcome.solver), Some(Solver::Greedy));
    coordinator.wait().unwrap();
    assert!(coordinator.maze().is_some());
}

#[test]
fn test_progress_events_stream() {
    let mut coordinator = coordinator(12, 12, 6);
    let (tx, rx) = sync_channel(1000);
    coordinator.start(Solver::Exhaustive, Some(tx)).unwrap();
    let events = rx.iter().collect::<Vec<_>>();
    let outcome = coordinator.wait().unwrap().unwrap();

    assert!(matches!(events.first(), Some(SolveEvent::Started { .. })));
    match events.last() {
        Some(SolveEvent::Finished {
            explored,
            cancelled,
            ..
        }) => {
            assert_eq!(*explored, outcome.solution.explored);
            assert!(!cancelled);
        }
        other => panic!("expected Finished, got {:?}", other),
    }
    for event in &events {
        if let SolveEvent::Progress { path, visited, .. } = event {
            assert!(path.iter().all(|&c| visited[c]));
        }
    }
}
