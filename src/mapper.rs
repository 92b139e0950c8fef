// Viewport -> cell coordinates.
// The canvas can sit anywhere on screen, so the bounding box's top-left is
// subtracted before dividing by the cell size. Results are NOT clamped.

use crate::types::{CanvasBounds, CellCoordinate, PointerSample};

/// Map a pointer sample onto the grid. Floors toward negative infinity, so
/// a sample just left of or above the canvas lands on row/col -1, not 0.
/// Non-finite samples (or a zero cell size) give `CellCoordinate::OUTSIDE`.
pub fn map(sample: PointerSample, bounds: CanvasBounds, cell_px: u32) -> CellCoordinate {
    if cell_px == 0 || !sample.x.is_finite() || !sample.y.is_finite() {
        return CellCoordinate::OUTSIDE;
    }
    let cell = cell_px as f64;
    let local_x = sample.x as f64 - bounds.left as f64;
    let local_y = sample.y as f64 - bounds.top as f64;

    // `as` saturates, so huge values stay far outside any grid.
    let col = (local_x / cell).floor() as i32;
    let row = (local_y / cell).floor() as i32;
    CellCoordinate::new(row, col)
}
