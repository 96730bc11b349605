//! Grid representation and utilities for Game of Life

use super::error::{LifeError, LifeResult};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use std::fmt;

/// A fixed-shape Game of Life grid.
///
/// Cells are stored row-major; `true` is alive. The shape never changes
/// after construction, only the cell contents do.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    rows: usize,
    cols: usize,
    cells: Vec<bool>,
}

impl Grid {
    /// Create a new grid with every cell dead
    pub fn new(rows: usize, cols: usize) -> LifeResult<Self> {
        Self::check_dimensions(rows, cols)?;
        Ok(Self {
            rows,
            cols,
            cells: vec![false; rows * cols],
        })
    }

    /// Create a grid where each cell is alive with probability 0.5.
    ///
    /// `seed` - random seed (if `None`, a fresh one is drawn from entropy)
    pub fn random(rows: usize, cols: usize, seed: Option<u64>) -> LifeResult<Self> {
        Self::check_dimensions(rows, cols)?;
        let mut rng = match seed {
            Some(x) => ChaCha8Rng::seed_from_u64(x),
            None => ChaCha8Rng::from_entropy(),
        };
        let cells = (0..rows * cols).map(|_| rng.gen_bool(0.5)).collect();
        Ok(Self { rows, cols, cells })
    }

    /// Create a grid from a 2D boolean array
    pub fn from_cells(cells: Vec<Vec<bool>>) -> LifeResult<Self> {
        let rows = cells.len();
        let cols = cells.first().map_or(0, Vec::len);
        Self::check_dimensions(rows, cols)?;

        for (row, line) in cells.iter().enumerate() {
            if line.len() != cols {
                return Err(LifeError::RaggedRow {
                    row,
                    len: line.len(),
                    expected: cols,
                });
            }
        }

        Ok(Self {
            rows,
            cols,
            cells: cells.into_iter().flatten().collect(),
        })
    }

    /// Create a grid from rows of `0`/`1` values
    pub fn from_values(values: Vec<Vec<u8>>) -> LifeResult<Self> {
        let cells = values
            .into_iter()
            .map(|row| row.into_iter().map(value_to_state).collect::<LifeResult<Vec<_>>>())
            .collect::<LifeResult<Vec<_>>>()?;
        Self::from_cells(cells)
    }

    fn check_dimensions(rows: usize, cols: usize) -> LifeResult<()> {
        match rows.checked_mul(cols) {
            Some(cells) if cells > 0 => Ok(()),
            _ => Err(LifeError::InvalidDimensions { rows, cols }),
        }
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    #[inline]
    fn index(&self, row: usize, col: usize) -> usize {
        row * self.cols + col
    }

    fn checked_index(&self, row: usize, col: usize) -> LifeResult<usize> {
        if row >= self.rows || col >= self.cols {
            return Err(LifeError::OutOfBounds {
                row,
                col,
                rows: self.rows,
                cols: self.cols,
            });
        }
        Ok(self.index(row, col))
    }

    /// Get cell state at coordinates
    pub fn get(&self, row: usize, col: usize) -> LifeResult<bool> {
        self.checked_index(row, col).map(|idx| self.cells[idx])
    }

    #[inline]
    pub(crate) fn cell(&self, row: usize, col: usize) -> bool {
        self.cells[self.index(row, col)]
    }

    /// Get cell state as a `0`/`1` value
    pub fn value(&self, row: usize, col: usize) -> LifeResult<u8> {
        self.get(row, col).map(u8::from)
    }

    /// Get cell state with both coordinates wrapped onto the torus
    pub fn get_wrapped(&self, row: isize, col: isize) -> bool {
        let r = row.rem_euclid(self.rows as isize) as usize;
        let c = col.rem_euclid(self.cols as isize) as usize;
        self.cells[self.index(r, c)]
    }

    /// Get cell state, treating anything outside the grid as absent
    pub fn get_bounded(&self, row: isize, col: isize) -> Option<bool> {
        if row < 0 || col < 0 || row >= self.rows as isize || col >= self.cols as isize {
            return None;
        }
        Some(self.cells[self.index(row as usize, col as usize)])
    }

    /// Set cell state at coordinates
    pub fn set(&mut self, row: usize, col: usize, alive: bool) -> LifeResult<()> {
        let idx = self.checked_index(row, col)?;
        self.cells[idx] = alive;
        Ok(())
    }

    /// Set cell from a `0`/`1` value
    pub fn set_value(&mut self, row: usize, col: usize, value: u8) -> LifeResult<()> {
        let alive = value_to_state(value)?;
        self.set(row, col, alive)
    }

    /// Flip a cell and return its new state
    pub fn toggle(&mut self, row: usize, col: usize) -> LifeResult<bool> {
        let idx = self.checked_index(row, col)?;
        self.cells[idx] = !self.cells[idx];
        Ok(self.cells[idx])
    }

    /// Get all living cell coordinates
    pub fn living_cells(&self) -> Vec<(usize, usize)> {
        self.cells
            .iter()
            .enumerate()
            .filter(|(_, alive)| **alive)
            .map(|(idx, _)| (idx / self.cols, idx % self.cols))
            .collect()
    }

    /// Count total living cells
    pub fn living_count(&self) -> usize {
        self.cells.iter().filter(|&&cell| cell).count()
    }

    /// Check if the grid is empty (no living cells)
    pub fn is_empty(&self) -> bool {
        self.cells.iter().all(|&cell| !cell)
    }

    /// Iterate over the rows as slices
    pub fn iter_rows(&self) -> impl Iterator<Item = &[bool]> {
        self.cells.chunks(self.cols)
    }

    pub(crate) fn from_raw(rows: usize, cols: usize, cells: Vec<bool>) -> Self {
        debug_assert_eq!(cells.len(), rows * cols);
        Self { rows, cols, cells }
    }
}

fn value_to_state(value: u8) -> LifeResult<bool> {
    match value {
        0 => Ok(false),
        1 => Ok(true),
        _ => Err(LifeError::InvalidCellValue { value }),
    }
}

impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in self.iter_rows() {
            for &cell in row {
                let symbol = if cell { "⬛" } else { "⬜" };
                write!(f, "{}", symbol)?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
