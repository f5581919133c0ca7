//! Output character grid.

use std::fmt;

/// Row-major grid of characters, `rows × cols`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AsciiGrid {
    cols: usize,
    cells: Vec<char>,
}

impl AsciiGrid {
    /// Wraps `cells` into rows of `cols`; `cells.len()` must be a multiple of `cols`.
    pub fn from_cells(cols: usize, cells: Vec<char>) -> Option<Self> {
        let fits = if cols == 0 { cells.is_empty() } else { cells.len() % cols == 0 };
        fits.then_some(Self { cols, cells })
    }

    pub fn rows(&self) -> usize {
        if self.cols == 0 {
            0
        } else {
            self.cells.len() / self.cols
        }
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn get(&self, row: usize, col: usize) -> Option<char> {
        if col >= self.cols {
            return None;
        }
        self.cells.get(row * self.cols + col).copied()
    }

    pub fn row(&self, row: usize) -> Option<&[char]> {
        let start = row.checked_mul(self.cols)?;
        self.cells.get(start..start + self.cols).filter(|_| self.cols > 0)
    }

    pub fn lines(&self) -> impl Iterator<Item = String> + '_ {
        (0..self.rows()).map(|r| self.cells[r * self.cols..(r + 1) * self.cols].iter().collect())
    }
}

impl fmt::Display for AsciiGrid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for line in self.lines() {
            writeln!(f, "{}", line)?;
        }
        Ok(())
    }
}
