use std::{
    collections::VecDeque,
    sync::atomic::AtomicBool,
    time::{Duration, Instant},
};

use mazepath::{
    Direction, GeneratorConfig, Maze, SearchHooks, VisitedMatrix, generate_maze,
    solve_exhaustive, solve_greedy,
};

const SEEDS: [u64; 6] = [0, 1, 2, 17, 99, 2024];

fn maze(width: usize, height: usize, seed: u64) -> Maze {
    generate_maze(width, height, &GeneratorConfig::with_seed(seed)).unwrap()
}

/// Breadth-first reachability through confirmed passages.
fn reachable_from(maze: &Maze, start: (usize, usize)) -> usize {
    let mut seen = VisitedMatrix::new(maze.width(), maze.height());
    let mut queue = VecDeque::from([start]);
    seen.mark(start);
    while let Some(coord) = queue.pop_front() {
        for next in maze.open_neighbors(coord) {
            if seen.mark(next) {
                queue.push_back(next);
            }
        }
    }
    seen.count()
}

#[test]
fn test_wall_symmetry_after_generation_and_solving() {
    for seed in SEEDS {
        let maze = maze(9, 7, seed);
        assert!(maze.is_symmetric(), "seed {}", seed);
        let before = maze.clone();
        solve_greedy(&maze, maze.entrance(), maze.exit());
        solve_exhaustive(&maze, maze.entrance(), maze.exit(), SearchHooks::new());
        assert_eq!(maze, before);
    }
}

#[test]
fn test_every_cell_reachable() {
    for seed in SEEDS {
        for (width, height) in [(1, 1), (1, 6), (6, 1), (12, 12), (25, 10)] {
            let maze = maze(width, height, seed);
            assert_eq!(
                reachable_from(&maze, maze.entrance()),
                width * height,
                "{}x{} seed {}",
                width,
                height,
                seed
            );
        }
    }
}

#[test]
fn test_entrance_and_exit_open() {
    for seed in SEEDS {
        let maze = maze(11, 5, seed);
        assert!(maze[maze.entrance()].is_open(Direction::Up));
        assert!(maze[maze.exit()].is_open(Direction::Down));
        assert!(maze.coords().all(|c| !maze[c].is_visited()));
    }
}

#[test]
fn test_greedy_path_is_valid() {
    for seed in SEEDS {
        let maze = maze(15, 10, seed);
        let solution = solve_greedy(&maze, maze.entrance(), maze.exit());
        assert_eq!(solution.path.first(), Some(&maze.entrance()));
        assert_eq!(solution.path.last(), Some(&maze.exit()));
        assert!(maze.is_path_valid(&solution.path));
        // Everything on the path was explored
        assert!(solution.path.iter().all(|&c| solution.visited[c]));
    }
}

#[test]
fn test_exhaustive_never_longer_than_greedy() {
    for seed in SEEDS {
        let maze = maze(8, 8, seed);
        let greedy = solve_greedy(&maze, maze.entrance(), maze.exit());
        let exhaustive =
            solve_exhaustive(&maze, maze.entrance(), maze.exit(), SearchHooks::new());
        assert!(maze.is_path_valid(&exhaustive.path));
        assert_eq!(exhaustive.path.first(), Some(&maze.entrance()));
        assert_eq!(exhaustive.path.last(), Some(&maze.exit()));
        assert!(exhaustive.edge_count() <= greedy.edge_count(), "seed {}", seed);
        assert!(exhaustive.visited.all());
    }
}

#[test]
fn test_exhaustive_matches_bfs_distance() {
    for seed in SEEDS {
        let maze = maze(7, 6, seed);
        let exhaustive =
            solve_exhaustive(&maze, maze.entrance(), maze.exit(), SearchHooks::new());

        let mut distance = vec![usize::MAX; maze.width() * maze.height()];
        let index = |(x, y): (usize, usize)| y * maze.width() + x;
        distance[index(maze.entrance())] = 0;
        let mut queue = VecDeque::from([maze.entrance()]);
        while let Some(coord) = queue.pop_front() {
            for next in maze.open_neighbors(coord) {
                if distance[index(next)] == usize::MAX {
                    distance[index(next)] = distance[index(coord)] + 1;
                    queue.push_back(next);
                }
            }
        }
        assert_eq!(exhaustive.edge_count(), Some(distance[index(maze.exit())]));
    }
}

#[test]
fn test_repeated_solves_are_identical() {
    for seed in SEEDS {
        let maze = maze(8, 6, seed);
        let (start, end) = (maze.entrance(), maze.exit());
        assert_eq!(
            solve_greedy(&maze, start, end).path,
            solve_greedy(&maze, start, end).path
        );
        assert_eq!(
            solve_exhaustive(&maze, start, end, SearchHooks::new()).path,
            solve_exhaustive(&maze, start, end, SearchHooks::new()).path
        );
    }
}

#[test]
fn test_two_by_two() {
    for seed in SEEDS {
        let maze = maze(2, 2, seed);
        let greedy = solve_greedy(&maze, (0, 0), (1, 1));
        assert!(
            greedy.path == vec![(0, 0), (1, 0), (1, 1)]
                || greedy.path == vec![(0, 0), (0, 1), (1, 1)],
            "seed {}: {:?}",
            seed,
            greedy.path
        );
        let exhaustive = solve_exhaustive(&maze, (0, 0), (1, 1), SearchHooks::new());
        assert_eq!(greedy.edge_count(), Some(2));
        assert_eq!(exhaustive.edge_count(), Some(2));
    }
}

#[test]
fn test_no_path_on_walled_grid() {
    let maze = Maze::new(4, 4).unwrap();
    let greedy = solve_greedy(&maze, (0, 0), (3, 3));
    assert!(greedy.path.is_empty());
    assert_eq!(greedy.visited.count(), 1);
    let exhaustive = solve_exhaustive(&maze, (0, 0), (3, 3), SearchHooks::new());
    assert!(exhaustive.path.is_empty());
    assert!(!exhaustive.interrupted);
}

#[test]
fn test_cancel_before_exhaustive_on_large_maze() {
    let maze = maze(50, 50, 5);
    let cancel = AtomicBool::new(true);
    let timer = Instant::now();
    let solution = solve_exhaustive(
        &maze,
        maze.entrance(),
        maze.exit(),
        SearchHooks::new().with_cancel(&cancel),
    );
    assert!(timer.elapsed() < Duration::from_secs(1));
    assert!(solution.interrupted);
    assert!(solution.path.is_empty());
    assert_eq!(solution.explored, 0);
}
