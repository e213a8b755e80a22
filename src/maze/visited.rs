use super::Coord;

/// A `width x height` boolean matrix produced by a single solve.
///
/// What a `true` entry means depends on the solver that produced it: the greedy
/// solver marks every cell it explored, the exhaustive solver marks the whole
/// matrix once its search has finished.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VisitedMatrix {
    data: Box<[bool]>,
    width: usize,
    height: usize,
}

impl VisitedMatrix {
    pub fn new(width: usize, height: usize) -> Self {
        VisitedMatrix {
            data: vec![false; width * height].into_boxed_slice(),
            width,
            height,
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    fn ravel_index(&self, (x, y): Coord) -> Option<usize> {
        (x < self.width && y < self.height).then(|| y * self.width + x)
    }

    /// Returns `false` for coordinates outside the matrix.
    pub fn is_visited(&self, coord: Coord) -> bool {
        self.ravel_index(coord).is_some_and(|idx| self.data[idx])
    }

    /// Marks `coord`. Returns `true` if it was not already marked.
    ///
    /// # Panics
    /// If `coord` is out of bounds.
    pub fn mark(&mut self, coord: Coord) -> bool {
        let idx = self
            .ravel_index(coord)
            .unwrap_or_else(|| panic!("coordinate {:?} is out of bounds", coord));
        !std::mem::replace(&mut self.data[idx], true)
    }

    /// # Panics
    /// If `coord` is out of bounds.
    pub fn unmark(&mut self, coord: Coord) {
        let idx = self
            .ravel_index(coord)
            .unwrap_or_else(|| panic!("coordinate {:?} is out of bounds", coord));
        self.data[idx] = false;
    }

    pub fn fill(&mut self, value: bool) {
        self.data.fill(value);
    }

    pub fn count(&self) -> usize {
        self.data.iter().filter(|&&v| v).count()
    }

    pub fn all(&self) -> bool {
        self.data.iter().all(|&v| v)
    }

    pub fn none(&self) -> bool {
        self.data.iter().all(|&v| !v)
    }

    /// Iterate over marked coordinates in row-major order.
    pub fn iter_marked(&self) -> impl Iterator<Item = Coord> + '_ {
        self.data
            .iter()
            .enumerate()
            .filter(|&(_, &v)| v)
            .map(|(idx, _)| (idx % self.width, idx / self.width))
    }
}

impl std::ops::Index<Coord> for VisitedMatrix {
    type Output = bool;

    fn index(&self, index: Coord) -> &Self::Output {
        match self.ravel_index(index) {
            Some(idx) => &self.data[idx],
            None => panic!("coordinate {:?} is out of bounds", index),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mark_and_unmark() {
        let mut visited = VisitedMatrix::new(3, 2);
        assert!(visited.none());
        assert!(visited.mark((2, 1)));
        assert!(!visited.mark((2, 1)));
        assert!(visited[(2, 1)]);
        assert_eq!(visited.iter_marked().collect::<Vec<_>>(), vec![(2, 1)]);
        visited.unmark((2, 1));
        assert!(visited.none());
    }

    #[test]
    fn test_out_of_bounds_is_unvisited() {
        let visited = VisitedMatrix::new(2, 2);
        assert!(!visited.is_visited((2, 0)));
        assert!(!visited.is_visited((0, 2)));
    }

    #[test]
    fn test_fill() {
        let mut visited = VisitedMatrix::new(4, 4);
        visited.fill(true);
        assert!(visited.all());
        assert_eq!(visited.count(), 16);
    }
}
