//! The square cell grid: construction, copying, comparison, and the
//! `0`/`1` text form used by run records.

use std::fmt;
use std::str::FromStr;

use rand::RngExt;

use crate::cell::Cell;
use crate::error::{LifeError, Result};

/// Square grid of cells, stored row-major.
///
/// A `Board` is a value: `copy()` and `clone()` build fresh cells, so a snapshot
/// never shares state with the board it was taken from.
#[derive(Debug)]
pub struct Board {
    size: usize,
    cells: Vec<Cell>,
}

/// Largest side length accepted from user input.
pub const MAX_SIZE: usize = 1 << 14;

/// Validate a signed side length from user input.
pub fn checked_size(size: i64) -> Result<usize> {
    match usize::try_from(size) {
        Ok(side) if (1..=MAX_SIZE).contains(&side) => Ok(side),
        _ => Err(LifeError::InvalidSize(size)),
    }
}

impl Board {
    /// All-dead `size`×`size` board.
    pub fn new(size: usize) -> Result<Self> {
        let count = size
            .checked_mul(size)
            .filter(|&n| n > 0)
            .ok_or_else(|| LifeError::InvalidSize(i64::try_from(size).unwrap_or(i64::MAX)))?;
        let cells = (0..count)
            .map(|i| Cell::new(i / size, i % size, false))
            .collect();
        Ok(Board { size, cells })
    }

    /// Deep copy with neighbor counts cleared.
    pub fn copy(&self) -> Self {
        Board {
            size: self.size,
            cells: self.cells.iter().map(Cell::fresh_copy).collect(),
        }
    }

    /// Set every cell alive or dead with an unbiased coin flip.
    pub fn randomize<R: RngExt + ?Sized>(&mut self, rng: &mut R) {
        for cell in &mut self.cells {
            cell.alive = rng.random_bool(0.5);
        }
    }

    /// True iff both boards have the same size and the same alive pattern.
    /// Boards of different sizes are simply unequal.
    pub fn equals(&self, other: &Board) -> bool {
        self.size == other.size
            && self
                .cells
                .iter()
                .zip(&other.cells)
                .all(|(a, b)| a.alive == b.alive)
    }

    /// One line per row, `1` for alive and `0` for dead, no trailing newline.
    pub fn serialize(&self) -> String {
        let mut out = String::with_capacity(self.size * (self.size + 1));
        for (r, row) in self.rows().enumerate() {
            if r > 0 {
                out.push('\n');
            }
            out.extend(row.iter().map(|c| if c.alive { '1' } else { '0' }));
        }
        out
    }

    /// Parse the output of [`Board::serialize`].
    pub fn deserialize(text: &str) -> Result<Self> {
        let mut lines: Vec<&str> = text.lines().map(str::trim_end).collect();
        while lines.last().is_some_and(|l| l.is_empty()) {
            lines.pop();
        }
        let size = lines.len();
        let mut board = Board::new(size)?;
        for (r, line) in lines.iter().enumerate() {
            let width = line.chars().count();
            if width != size {
                return Err(LifeError::parse(
                    r + 1,
                    format!("expected {} cells, found {}", size, width),
                ));
            }
            for (c, ch) in line.chars().enumerate() {
                let alive = match ch {
                    '1' => true,
                    '0' => false,
                    other => {
                        return Err(LifeError::parse(
                            r + 1,
                            format!("unexpected character {:?}", other),
                        ));
                    }
                };
                board.set_alive(r, c, alive);
            }
        }
        Ok(board)
    }

    #[inline]
    pub fn size(&self) -> usize {
        self.size
    }

    #[inline]
    fn index(&self, row: usize, col: usize) -> usize {
        assert!(
            row < self.size && col < self.size,
            "cell ({}, {}) outside {}x{} board",
            row,
            col,
            self.size,
            self.size
        );
        row * self.size + col
    }

    pub fn get(&self, row: usize, col: usize) -> &Cell {
        &self.cells[self.index(row, col)]
    }

    pub(crate) fn get_mut(&mut self, row: usize, col: usize) -> &mut Cell {
        let idx = self.index(row, col);
        &mut self.cells[idx]
    }

    #[inline]
    pub fn is_alive(&self, row: usize, col: usize) -> bool {
        self.get(row, col).alive
    }

    pub fn set_alive(&mut self, row: usize, col: usize, alive: bool) {
        self.get_mut(row, col).alive = alive;
    }

    /// All cells in row-major order.
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    pub fn rows(&self) -> impl Iterator<Item = &[Cell]> {
        self.cells.chunks(self.size)
    }

    /// Number of live cells.
    pub fn population(&self) -> usize {
        self.cells.iter().filter(|c| c.alive).count()
    }
}

impl Clone for Board {
    fn clone(&self) -> Self {
        self.copy()
    }
}

impl PartialEq for Board {
    fn eq(&self, other: &Self) -> bool {
        self.equals(other)
    }
}

impl Eq for Board {}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.serialize())
    }
}

impl FromStr for Board {
    type Err = LifeError;

    fn from_str(s: &str) -> Result<Self> {
        Board::deserialize(s)
    }
}
