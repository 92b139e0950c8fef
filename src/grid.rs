// The intensity grid: N x N values in [0, 1], row-major, zeroed at creation.
// One owner (the surface) mutates it in place; collaborators only ever see a
// flattened copy from `snapshot`.

use crate::error::{PadError, PadResult};

#[derive(Debug, Clone, PartialEq)]
pub struct Grid {
    size: usize,
    cells: Vec<f32>, // length = size * size, every value in [0.0, 1.0]
}

impl Grid {
    /// Fully zeroed `size x size` grid.
    pub fn new(size: usize) -> Self {
        Self { size, cells: vec![0.0; size * size] }
    }

    /// Build a grid cell-by-cell; values are clamped into [0, 1].
    pub fn from_fn(size: usize, mut f: impl FnMut(usize, usize) -> f32) -> Self {
        let mut cells = Vec::with_capacity(size * size);
        for row in 0..size {
            for col in 0..size {
                cells.push(clamp_unit(f(row, col)));
            }
        }
        Self { size, cells }
    }

    /// Load a matrix wholesale. It must be exactly `size x size` with finite
    /// values; finite values are clamped into [0, 1].
    pub fn from_rows(size: usize, rows: &[Vec<f32>]) -> PadResult<Self> {
        if rows.len() != size {
            return Err(PadError::validation(format!(
                "matrix has {} rows, expected {size}",
                rows.len()
            )));
        }
        let mut cells = Vec::with_capacity(size * size);
        for (i, row) in rows.iter().enumerate() {
            if row.len() != size {
                return Err(PadError::validation(format!(
                    "matrix row {i} has {} values, expected {size}",
                    row.len()
                )));
            }
            for (j, &v) in row.iter().enumerate() {
                if !v.is_finite() {
                    return Err(PadError::validation(format!(
                        "matrix value at ({i}, {j}) is not finite"
                    )));
                }
                cells.push(clamp_unit(v));
            }
        }
        Ok(Self { size, cells })
    }

    pub fn size(&self) -> usize {
        self.size
    }

    /// Value at (row, col). Panics when out of range, like slice indexing.
    pub fn get(&self, row: usize, col: usize) -> f32 {
        self.cells[self.index(row, col)]
    }

    /// Overwrite one cell; returns true if the stored value changed.
    pub(crate) fn set(&mut self, row: usize, col: usize, value: f32) -> bool {
        let idx = self.index(row, col);
        let value = clamp_unit(value);
        if self.cells[idx] == value {
            return false;
        }
        self.cells[idx] = value;
        true
    }

    /// Reset every cell to 0.
    pub fn clear(&mut self) {
        self.cells.fill(0.0);
    }

    pub fn is_blank(&self) -> bool {
        self.cells.iter().all(|&v| v == 0.0)
    }

    /// Row-major cell values.
    pub fn cells(&self) -> &[f32] {
        &self.cells
    }

    /// Flattened row-major copy, safe to hand to a collaborator.
    pub fn snapshot(&self) -> Vec<f32> {
        self.cells.clone()
    }

    #[inline]
    fn index(&self, row: usize, col: usize) -> usize {
        assert!(
            row < self.size && col < self.size,
            "cell ({row}, {col}) outside {size}x{size} grid",
            size = self.size
        );
        row * self.size + col
    }
}

#[inline]
fn clamp_unit(v: f32) -> f32 {
    if v.is_nan() { 0.0 } else { v.clamp(0.0, 1.0) }
}
