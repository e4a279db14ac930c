use serde::{Deserialize, Serialize};

use crate::models::Coordinate;

/// Size of one grid cell in centimetres.
///
/// Every stored grid was sized with this value: changing it re-addresses the
/// cells of all existing gardens.
pub const CELL_SIZE_CM: u32 = 25;

/// Number of grid columns for a garden width: `ceil(width_cm / CELL_SIZE_CM)`.
pub fn columns(width_cm: u32) -> usize {
    width_cm.div_ceil(CELL_SIZE_CM) as usize
}

/// Number of grid rows for a garden length: `ceil(length_cm / CELL_SIZE_CM)`.
pub fn rows(length_cm: u32) -> usize {
    length_cm.div_ceil(CELL_SIZE_CM) as usize
}

/// Flat index of cell (x, y) in a row-major grid, or `None` when the
/// coordinate falls outside the grid.
pub fn index(x: i64, y: i64, width_cm: u32, length_cm: u32) -> Option<usize> {
    GridShape::from_dimensions(width_cm, length_cm).index(x, y)
}

/// Columns and rows derived from a garden's physical dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GridShape {
    pub columns: usize,
    pub rows: usize,
}

impl GridShape {
    pub fn from_dimensions(width_cm: u32, length_cm: u32) -> Self {
        Self {
            columns: columns(width_cm),
            rows: rows(length_cm),
        }
    }

    /// Length of the flat grid array.
    pub fn len(&self) -> usize {
        self.columns * self.rows
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// `x * columns + y`, with `x` the row and `y` the column.
    pub fn index(&self, x: i64, y: i64) -> Option<usize> {
        if x < 0 || y < 0 {
            return None;
        }
        let (x, y) = (usize::try_from(x).ok()?, usize::try_from(y).ok()?);
        if y >= self.columns {
            return None;
        }
        let idx = x.checked_mul(self.columns)?.checked_add(y)?;
        (idx < self.len()).then_some(idx)
    }

    /// Inverse of [`GridShape::index`].
    pub fn coordinate(&self, index: usize) -> Option<Coordinate> {
        if index >= self.len() {
            return None;
        }
        Some(Coordinate {
            x: index / self.columns,
            y: index % self.columns,
        })
    }
}
