//! Grid representation for the cellular automaton
//!
//! A grid is a fixed-size, row-major array of cell values. In classical games
//! a value is 0 (dead) or 1 (alive); in ageing games a positive value is the
//! cell's remaining vitality. Edges are hard: cells outside the grid simply do
//! not exist and are never counted as neighbours.

use super::error::GridError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Relative positions of the Moore neighbourhood, in row-major order
const NEIGHBOUR_OFFSETS: [(isize, isize); 8] = [
    (-1, -1),
    (-1, 0),
    (-1, 1),
    (0, -1),
    (0, 1),
    (1, -1),
    (1, 0),
    (1, 1),
];

/// Represents a cellular automaton grid
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawGrid")]
pub struct Grid {
    pub width: usize,
    pub height: usize,
    cells: Vec<u32>,
}

/// Unchecked serialized form, validated on the way into [`Grid`]
#[derive(Deserialize)]
struct RawGrid {
    width: usize,
    height: usize,
    cells: Vec<u32>,
}

impl TryFrom<RawGrid> for Grid {
    type Error = GridError;

    fn try_from(raw: RawGrid) -> Result<Self, Self::Error> {
        let expected = raw.width.checked_mul(raw.height);
        if expected != Some(raw.cells.len()) {
            return Err(GridError::CellCountMismatch {
                width: raw.width,
                height: raw.height,
                actual: raw.cells.len(),
            });
        }

        Ok(Self {
            width: raw.width,
            height: raw.height,
            cells: raw.cells,
        })
    }
}

impl Grid {
    /// Create a new grid with every cell dead
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            cells: vec![0; width * height],
        }
    }

    /// Create a dead square grid of the given extent
    pub fn square(size: usize) -> Self {
        Self::new(size, size)
    }

    /// Create a grid from rows of cell values
    pub fn from_cells(cells: Vec<Vec<u32>>) -> Result<Self, GridError> {
        let height = cells.len();
        let width = cells.first().map_or(0, Vec::len);

        if width == 0 {
            return Err(GridError::Empty);
        }

        for (row, values) in cells.iter().enumerate() {
            if values.len() != width {
                return Err(GridError::RaggedRow {
                    row,
                    actual: values.len(),
                    expected: width,
                });
            }
        }

        Ok(Self {
            width,
            height,
            cells: cells.into_iter().flatten().collect(),
        })
    }

    #[inline]
    fn index(&self, row: usize, col: usize) -> usize {
        row * self.width + col
    }

    fn check_bounds(&self, row: usize, col: usize) -> Result<(), GridError> {
        if row < self.height && col < self.width {
            Ok(())
        } else {
            Err(GridError::OutOfBounds {
                row,
                col,
                width: self.width,
                height: self.height,
            })
        }
    }

    /// Get cell value at coordinates
    pub fn get(&self, row: usize, col: usize) -> Result<u32, GridError> {
        self.check_bounds(row, col)?;
        Ok(self.cells[self.index(row, col)])
    }

    /// Set cell value at coordinates
    pub fn set(&mut self, row: usize, col: usize, value: u32) -> Result<(), GridError> {
        self.check_bounds(row, col)?;
        let idx = self.index(row, col);
        self.cells[idx] = value;
        Ok(())
    }

    /// Values of the Moore neighbours of a cell, skipping positions off the grid
    pub fn neighbours(&self, row: usize, col: usize) -> Result<Vec<u32>, GridError> {
        self.check_bounds(row, col)?;

        let mut values = Vec::with_capacity(NEIGHBOUR_OFFSETS.len());
        for (dr, dc) in NEIGHBOUR_OFFSETS {
            let r = row as isize + dr;
            let c = col as isize + dc;

            if r >= 0 && r < self.height as isize && c >= 0 && c < self.width as isize {
                values.push(self.cells[self.index(r as usize, c as usize)]);
            }
        }

        Ok(values)
    }

    /// Count total living cells
    pub fn living_count(&self) -> usize {
        self.cells.iter().filter(|&&value| value > 0).count()
    }

    /// Highest vitality on the grid, 0 when everything is dead
    pub fn max_vitality(&self) -> u32 {
        self.cells.iter().copied().max().unwrap_or(0)
    }

    /// Check if the grid is empty (no living cells)
    pub fn is_empty(&self) -> bool {
        self.cells.iter().all(|&value| value == 0)
    }

    /// Iterate over rows as slices
    pub fn rows(&self) -> impl Iterator<Item = &[u32]> {
        // chunks(0) panics; a zero-width grid has no rows to show
        self.cells.chunks(self.width.max(1)).take(self.height)
    }
}

impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in self.rows() {
            for &value in row {
                let symbol = match value {
                    0 => '·',
                    1..=9 => char::from_digit(value, 10).unwrap_or('#'),
                    _ => '#',
                };
                write!(f, "{}", symbol)?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
