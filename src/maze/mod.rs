pub mod cell;
mod visited;

pub use cell::{Cell, Direction};
pub use visited::VisitedMatrix;

use crate::error::MazeError;

/// Cell coordinate `(x, y)`: `x` is the column, `y` the row, both 0-based.
pub type Coord = (usize, usize);

/// A fixed-size grid of cells and their walls.
///
/// Cells live in a flat row-major slice owned by the maze. Neighbor relations are
/// computed from coordinates, so there are no cell-to-cell references to keep alive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Maze {
    cells: Box<[Cell]>,
    width: usize,
    height: usize,
}

impl Maze {
    /// Creates a fully walled maze with the given width and height.
    pub fn new(width: usize, height: usize) -> Result<Self, MazeError> {
        if width == 0 || height == 0 {
            return Err(MazeError::InvalidDimensions { width, height });
        }
        let cells = vec![Cell::WALLED; width * height].into_boxed_slice();
        Ok(Maze {
            cells,
            width,
            height,
        })
    }

    /// Returns the width of the maze in cells.
    pub fn width(&self) -> usize {
        self.width
    }

    /// Returns the height of the maze in cells.
    pub fn height(&self) -> usize {
        self.height
    }

    /// Top-left cell. Generation opens its upper side.
    pub fn entrance(&self) -> Coord {
        (0, 0)
    }

    /// Bottom-right cell. Generation opens its lower side.
    pub fn exit(&self) -> Coord {
        (self.width - 1, self.height - 1)
    }

    /// Checks if the given coordinate is within the bounds of the maze.
    pub fn contains(&self, coord: Coord) -> bool {
        coord.0 < self.width && coord.1 < self.height
    }

    fn ravel_index(&self, (x, y): Coord) -> usize {
        y * self.width + x
    }

    /// Iterates over every coordinate in row-major order.
    pub fn coords(&self) -> impl Iterator<Item = Coord> + use<> {
        let (width, height) = (self.width, self.height);
        (0..height).flat_map(move |y| (0..width).map(move |x| (x, y)))
    }

    /// The coordinate one step from `coord` in `direction`, if it is inside the maze.
    /// Walls are not inspected.
    pub fn neighbor(&self, coord: Coord, direction: Direction) -> Option<Coord> {
        if !self.contains(coord) {
            return None;
        }
        let (x, y) = coord;
        let next = match direction {
            Direction::Up => (x, y.checked_sub(1)?),
            Direction::Down => (x, y + 1),
            Direction::Left => (x.checked_sub(1)?, y),
            Direction::Right => (x + 1, y),
        };
        self.contains(next).then_some(next)
    }

    /// All in-bounds neighbors of `coord` in up, down, left, right order, paired with
    /// the direction leading to them.
    pub fn neighbors(&self, coord: Coord) -> impl Iterator<Item = (Direction, Coord)> + '_ {
        Direction::ALL
            .into_iter()
            .filter_map(move |direction| Some((direction, self.neighbor(coord, direction)?)))
    }

    /// Whether there is a confirmed passage from `coord` in `direction`: both the
    /// cell's own flag and the neighbor's reciprocal flag are open.
    ///
    /// Boundary openings have no neighbor and are therefore never confirmed.
    pub fn has_passage(&self, coord: Coord, direction: Direction) -> bool {
        match self.neighbor(coord, direction) {
            Some(next) => {
                self[coord].is_open(direction) && self[next].is_open(direction.opposite())
            }
            None => false,
        }
    }

    /// Neighbors reachable from `coord` through confirmed passages, in up, down,
    /// left, right order.
    pub fn open_neighbors(&self, coord: Coord) -> impl Iterator<Item = Coord> + '_ {
        self.neighbors(coord)
            .filter(move |&(direction, next)| {
                self[coord].is_open(direction) && self[next].is_open(direction.opposite())
            })
            .map(|(_, next)| next)
    }

    /// The direction leading from `from` to `to` if the two cells share a side.
    pub fn direction_between(from: Coord, to: Coord) -> Option<Direction> {
        let (x1, y1) = from;
        let (x2, y2) = to;
        if x1 == x2 {
            if y2.checked_add(1) == Some(y1) {
                return Some(Direction::Up);
            }
            if y1.checked_add(1) == Some(y2) {
                return Some(Direction::Down);
            }
        } else if y1 == y2 {
            if x2.checked_add(1) == Some(x1) {
                return Some(Direction::Left);
            }
            if x1.checked_add(1) == Some(x2) {
                return Some(Direction::Right);
            }
        }
        None
    }

    /// Opens the walls between two adjacent cells on both sides.
    ///
    /// Fails with [`MazeError::NotAdjacent`] if the cells do not share a side or
    /// either lies outside the maze.
    pub fn set_passage(&mut self, from: Coord, to: Coord) -> Result<(), MazeError> {
        let direction = Maze::direction_between(from, to)
            .filter(|_| self.contains(from) && self.contains(to))
            .ok_or(MazeError::NotAdjacent { from, to })?;
        self.cell_mut(from).set_open(direction, true);
        self.cell_mut(to).set_open(direction.opposite(), true);
        Ok(())
    }

    /// Opens a single flag without touching the neighbor. Only used for the
    /// entrance and exit, which face outside the maze.
    pub(crate) fn open_boundary(&mut self, coord: Coord, direction: Direction) {
        self.cell_mut(coord).set_open(direction, true);
    }

    pub(crate) fn cell_mut(&mut self, coord: Coord) -> &mut Cell {
        assert!(
            self.contains(coord),
            "coordinate {:?} is out of bounds",
            coord
        );
        let idx = self.ravel_index(coord);
        &mut self.cells[idx]
    }

    /// Checks that every pair of adjacent cells agrees on the wall between them.
    pub fn is_symmetric(&self) -> bool {
        self.coords().all(|coord| {
            self.neighbors(coord).all(|(direction, next)| {
                self[coord].is_open(direction) == self[next].is_open(direction.opposite())
            })
        })
    }

    /// Checks that `path` is a walk through confirmed passages, one cell at a time.
    /// An empty path is considered valid.
    pub fn is_path_valid(&self, path: &[Coord]) -> bool {
        path.iter().all(|&coord| self.contains(coord))
            && path.windows(2).all(|pair| {
                Maze::direction_between(pair[0], pair[1])
                    .is_some_and(|direction| self.has_passage(pair[0], direction))
            })
    }
}

impl std::ops::Index<Coord> for Maze {
    type Output = Cell;

    fn index(&self, index: Coord) -> &Self::Output {
        assert!(
            self.contains(index),
            "coordinate {:?} is out of bounds",
            index
        );
        &self.cells[self.ravel_index(index)]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_dimensions() {
        assert_eq!(
            Maze::new(0, 3),
            Err(MazeError::InvalidDimensions {
                width: 0,
                height: 3
            })
        );
        assert!(Maze::new(3, 0).is_err());
        assert!(Maze::new(1, 1).is_ok());
    }

    #[test]
    fn test_neighbor_bounds() {
        let maze = Maze::new(3, 2).unwrap();
        assert_eq!(maze.neighbor((0, 0), Direction::Up), None);
        assert_eq!(maze.neighbor((0, 0), Direction::Left), None);
        assert_eq!(maze.neighbor((0, 0), Direction::Right), Some((1, 0)));
        assert_eq!(maze.neighbor((0, 0), Direction::Down), Some((0, 1)));
        assert_eq!(maze.neighbor((2, 1), Direction::Right), None);
        assert_eq!(maze.neighbor((2, 1), Direction::Down), None);
        assert_eq!(maze.neighbor((3, 0), Direction::Left), None);
    }

    #[test]
    fn test_neighbors_order() {
        let maze = Maze::new(3, 3).unwrap();
        let neighbors = maze.neighbors((1, 1)).map(|(_, c)| c).collect::<Vec<_>>();
        assert_eq!(neighbors, vec![(1, 0), (1, 2), (0, 1), (2, 1)]);
    }

    #[test]
    fn test_set_passage() {
        let mut maze = Maze::new(3, 3).unwrap();
        maze.set_passage((1, 1), (2, 1)).unwrap();
        assert!(maze[(1, 1)].is_open(Direction::Right));
        assert!(maze[(2, 1)].is_open(Direction::Left));
        assert!(maze.is_symmetric());
        assert_eq!(maze.open_neighbors((1, 1)).collect::<Vec<_>>(), vec![(2, 1)]);
        assert_eq!(maze.open_neighbors((2, 1)).collect::<Vec<_>>(), vec![(1, 1)]);
    }

    #[test]
    fn test_set_passage_not_adjacent() {
        let mut maze = Maze::new(3, 3).unwrap();
        assert_eq!(
            maze.set_passage((0, 0), (1, 1)),
            Err(MazeError::NotAdjacent {
                from: (0, 0),
                to: (1, 1)
            })
        );
        assert!(maze.set_passage((0, 0), (2, 0)).is_err());
        assert!(maze.set_passage((0, 0), (0, 0)).is_err());
        assert!(maze.set_passage((2, 2), (3, 2)).is_err());
        assert_eq!(maze, Maze::new(3, 3).unwrap());
    }

    #[test]
    fn test_one_sided_flag_is_not_a_passage() {
        let mut maze = Maze::new(2, 1).unwrap();
        maze.cell_mut((0, 0)).set_open(Direction::Right, true);
        assert!(!maze.is_symmetric());
        assert!(!maze.has_passage((0, 0), Direction::Right));
        assert_eq!(maze.open_neighbors((0, 0)).count(), 0);
    }

    #[test]
    fn test_boundary_opening_is_not_a_passage() {
        let mut maze = Maze::new(2, 2).unwrap();
        maze.open_boundary((0, 0), Direction::Up);
        assert!(maze[(0, 0)].is_open(Direction::Up));
        assert!(!maze.has_passage((0, 0), Direction::Up));
        assert!(maze.is_symmetric());
    }

    #[test]
    fn test_path_validity() {
        let mut maze = Maze::new(2, 2).unwrap();
        maze.set_passage((0, 0), (1, 0)).unwrap();
        maze.set_passage((1, 0), (1, 1)).unwrap();
        assert!(maze.is_path_valid(&[]));
        assert!(maze.is_path_valid(&[(0, 0), (1, 0), (1, 1)]));
        assert!(!maze.is_path_valid(&[(0, 0), (0, 1), (1, 1)]));
        assert!(!maze.is_path_valid(&[(0, 0), (1, 1)]));
    }

    #[test]
    fn test_entrance_and_exit() {
        let maze = Maze::new(5, 4).unwrap();
        assert_eq!(maze.entrance(), (0, 0));
        assert_eq!(maze.exit(), (4, 3));
        assert_eq!(maze.coords().count(), 20);
    }
}
