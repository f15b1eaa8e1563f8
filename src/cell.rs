//! Grid cell state.

/// A single grid cell.
///
/// `location` is fixed when the cell is built; `neighbor_count` is scratch state
/// written by the engine during an evaluation and carries no meaning afterwards.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cell {
    location: (usize, usize),
    pub alive: bool,
    pub neighbor_count: u8,
}

impl Cell {
    pub fn new(row: usize, col: usize, alive: bool) -> Self {
        Cell {
            location: (row, col),
            alive,
            neighbor_count: 0,
        }
    }

    /// `(row, col)` of this cell on its board.
    #[inline]
    pub fn location(&self) -> (usize, usize) {
        self.location
    }

    #[inline]
    pub fn row(&self) -> usize {
        self.location.0
    }

    #[inline]
    pub fn col(&self) -> usize {
        self.location.1
    }

    /// Fresh cell at the same location with the same state and a cleared count.
    pub fn fresh_copy(&self) -> Self {
        Cell::new(self.location.0, self.location.1, self.alive)
    }
}
