// Grid -> raster. Every call is a full repaint: cell fills first, then the
// gridline lattice on top. Same grid in, same bytes out.

use crate::grid::Grid;
use image::{Rgb, RgbImage};

/// Light-gray gridlines (#e0e0e0).
pub const GRIDLINE: Rgb<u8> = Rgb([0xE0, 0xE0, 0xE0]);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Renderer {
    cell_px: u32,
    gridline: Rgb<u8>,
}

impl Renderer {
    pub fn new(cell_px: u32) -> Self {
        Self { cell_px, gridline: GRIDLINE }
    }

    pub fn cell_px(&self) -> u32 {
        self.cell_px
    }

    /// Side length of the raster for a grid of `size` cells, or `None` when
    /// `size * cell_px` does not fit in a `u32`.
    pub fn raster_side(&self, size: usize) -> Option<u32> {
        u32::try_from(size).ok()?.checked_mul(self.cell_px)
    }

    /// # Panics
    /// If the raster side overflows `u32` (see [`Renderer::raster_side`]).
    pub fn render(&self, grid: &Grid) -> RgbImage {
        let side = self.side_for(grid);
        let mut raster = RgbImage::new(side, side);
        self.render_into(grid, &mut raster);
        raster
    }

    /// Repaint `raster` from scratch. A raster of the wrong size is
    /// reallocated first.
    ///
    /// # Panics
    /// If the raster side overflows `u32` (see [`Renderer::raster_side`]).
    pub fn render_into(&self, grid: &Grid, raster: &mut RgbImage) {
        let side = self.side_for(grid);
        if raster.dimensions() != (side, side) {
            *raster = RgbImage::new(side, side);
        }
        let n = grid.size();
        let cell = self.cell_px;

        // 1) Cells: intensity 1.0 is black, 0.0 is white.
        for i in 0..n {
            for j in 0..n {
                let gray = intensity_to_gray(grid.get(i, j));
                fill_rect(raster, j as u32 * cell, i as u32 * cell, cell, Rgb([gray; 3]));
            }
        }

        // 2) N+1 lines per axis. The closing line at N*cell would fall just
        //    outside the raster, so it sits on the last pixel instead.
        if side == 0 {
            return;
        }
        for k in 0..=n as u32 {
            let at = (k * cell).min(side - 1);
            for t in 0..side {
                raster.put_pixel(at, t, self.gridline); // vertical
                raster.put_pixel(t, at, self.gridline); // horizontal
            }
        }
    }

    fn side_for(&self, grid: &Grid) -> u32 {
        match self.raster_side(grid.size()) {
            Some(side) => side,
            None => panic!(
                "raster for {} cells of {} px overflows u32",
                grid.size(),
                self.cell_px
            ),
        }
    }
}

/// `255 * (1 - intensity)`, rounded.
#[inline]
pub fn intensity_to_gray(intensity: f32) -> u8 {
    (255.0 * (1.0 - intensity.clamp(0.0, 1.0))).round() as u8
}

fn fill_rect(raster: &mut RgbImage, x: u32, y: u32, side: u32, color: Rgb<u8>) {
    for py in y..y + side {
        for px in x..x + side {
            raster.put_pixel(px, py, color);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::brush;
    use crate::types::{BrushSpec, CellCoordinate};

    #[test]
    fn gray_mapping() {
        assert_eq!(intensity_to_gray(0.0), 255);
        assert_eq!(intensity_to_gray(1.0), 0);
        assert_eq!(intensity_to_gray(0.5), 128);
    }

    #[test]
    fn raster_has_grid_dimensions() {
        let r = Renderer::new(12).render(&Grid::new(32));
        assert_eq!(r.dimensions(), (384, 384));
        assert_eq!(Renderer::new(12).raster_side(32), Some(384));
    }

    #[test]
    fn raster_side_overflow_is_reported() {
        assert_eq!(Renderer::new(u32::MAX).raster_side(2), None);
        assert_eq!(Renderer::new(2).raster_side(1 << 31), None);
        assert_eq!(Renderer::new(1).raster_side(usize::MAX), None);
        assert_eq!(Renderer::new(u32::MAX).raster_side(1), Some(u32::MAX));
    }

    #[test]
    fn blank_grid_is_white_with_lattice() {
        let r = Renderer::new(4).render(&Grid::new(3));
        // interior of a cell
        assert_eq!(*r.get_pixel(1, 1), Rgb([255, 255, 255]));
        // boundaries at 0, 4, 8 and the closing line on pixel 11
        for at in [0, 4, 8, 11] {
            assert_eq!(*r.get_pixel(at, 2), GRIDLINE, "vertical line at {at}");
            assert_eq!(*r.get_pixel(2, at), GRIDLINE, "horizontal line at {at}");
        }
        assert_eq!(*r.get_pixel(10, 10), Rgb([255, 255, 255]));
    }

    #[test]
    fn painted_cell_is_black_under_the_lattice() {
        let mut g = Grid::new(3);
        brush::paint(&mut g, CellCoordinate::new(1, 2), BrushSpec::ink(1).unwrap());
        let r = Renderer::new(4).render(&g);
        // cell (row 1, col 2) spans x 8..12, y 4..8
        assert_eq!(*r.get_pixel(9, 5), Rgb([0, 0, 0]));
        assert_eq!(*r.get_pixel(8, 5), GRIDLINE);
        assert_eq!(*r.get_pixel(9, 4), GRIDLINE);
        assert_eq!(*r.get_pixel(5, 5), Rgb([255, 255, 255]));
    }

    #[test]
    fn render_is_idempotent() {
        let g = Grid::from_fn(8, |r, c| ((r * 8 + c) % 7) as f32 / 6.0);
        let renderer = Renderer::new(5);
        assert_eq!(renderer.render(&g).into_raw(), renderer.render(&g).into_raw());
    }

    #[test]
    fn render_into_leaves_no_stale_cells() {
        let renderer = Renderer::new(4);
        let mut g = Grid::new(4);
        brush::paint(&mut g, CellCoordinate::new(1, 1), BrushSpec::ink(3).unwrap());
        let mut target = renderer.render(&g);

        g.clear();
        renderer.render_into(&g, &mut target);
        assert_eq!(target.into_raw(), renderer.render(&Grid::new(4)).into_raw());
    }

    #[test]
    fn render_into_resizes_wrong_targets() {
        let renderer = Renderer::new(4);
        let mut target = RgbImage::new(1, 1);
        renderer.render_into(&Grid::new(2), &mut target);
        assert_eq!(target.dimensions(), (8, 8));
    }
}
