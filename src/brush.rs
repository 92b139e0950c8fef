// Square brush dabbing into the grid.
// A radius-r brush covers every offset in [-r/2, r/2] on both axes (a square,
// not a disc). Footprint cells outside the grid are skipped silently, so a
// stroke that runs off the canvas edge just paints the part that's inside.

use crate::grid::Grid;
use crate::types::{BrushSpec, CellCoordinate};

/// In-bounds cells a dab at `center` would cover, row by row.
pub fn footprint(
    center: CellCoordinate,
    brush: BrushSpec,
    size: usize,
) -> impl Iterator<Item = (usize, usize)> {
    let reach = brush.reach();
    let n = size as i64;
    let (cy, cx) = (center.row as i64, center.col as i64);

    // Clip to the grid before walking; empty when the dab misses it.
    let rows = (cy - reach).max(0)..=(cy + reach).min(n - 1);
    let cols = (cx - reach).max(0)..=(cx + reach).min(n - 1);
    rows.flat_map(move |r| cols.clone().map(move |c| (r as usize, c as usize)))
}

/// Overwrite every in-bounds footprint cell with the brush value.
/// Returns true if at least one cell actually changed value; repainting
/// cells that already hold the value, or dabbing fully off-grid, returns false.
pub fn paint(grid: &mut Grid, center: CellCoordinate, brush: BrushSpec) -> bool {
    let mut changed = false;
    for (row, col) in footprint(center, brush, grid.size()) {
        changed |= grid.set(row, col, brush.value());
    }
    changed
}
