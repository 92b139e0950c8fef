// Core value types shared by the mapper, brush, stroke session and window.

use crate::error::{PadError, PadResult};
use image::RgbImage;

/// Window-sized pixel buffer handed to minifb.
#[derive(Clone)]
pub struct FrameBuffer {
    pub width: usize,      // how wide the window is (pixels)
    pub height: usize,     // how tall the window is (pixels)
    pub pixels: Vec<u32>,  // each entry is 0x00RRGGBB for minifb
}

impl FrameBuffer {
    pub fn new(width: usize, height: usize, fill: u32) -> Self {
        Self { width, height, pixels: vec![fill; width * height] }
    }

    pub fn fill(&mut self, color: u32) {
        self.pixels.fill(color);
    }

    /// Copy an RGB raster into this buffer with its top-left at (x, y),
    /// packing each pixel as 0x00RRGGBB. Parts that fall outside are dropped.
    pub fn blit_rgb(&mut self, raster: &RgbImage, x: usize, y: usize) {
        for (rx, ry, pixel) in raster.enumerate_pixels() {
            let (dx, dy) = (x + rx as usize, y + ry as usize);
            if dx >= self.width || dy >= self.height {
                continue;
            }
            let r = pixel[0] as u32;
            let g = pixel[1] as u32;
            let b = pixel[2] as u32;
            self.pixels[dy * self.width + dx] = (r << 16) | (g << 8) | b;
        }
    }
}

/// A grid cell address. May lie outside the grid: the mapper never clamps,
/// bounds are checked per footprint cell by the brush.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CellCoordinate {
    pub row: i32,
    pub col: i32,
}

impl CellCoordinate {
    /// Designated out-of-bounds signal. Far enough out that no brush
    /// footprint reaches back into a grid.
    pub const OUTSIDE: CellCoordinate = CellCoordinate { row: i32::MIN, col: i32::MIN };

    pub const fn new(row: i32, col: i32) -> Self {
        Self { row, col }
    }

    pub fn is_within(self, size: usize) -> bool {
        let n = size as i64;
        (0..n).contains(&(self.row as i64)) && (0..n).contains(&(self.col as i64))
    }
}

/// One pointer/touch position in viewport coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointerSample {
    pub x: f32,
    pub y: f32,
}

impl PointerSample {
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// On-screen position of the canvas's top-left corner, in the same viewport
/// space as the pointer samples.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct CanvasBounds {
    pub left: f32,
    pub top: f32,
}

impl CanvasBounds {
    pub const fn new(left: f32, top: f32) -> Self {
        Self { left, top }
    }
}

/// Square brush: radius `r` covers offsets `-r/2..=r/2` on both axes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BrushSpec {
    radius: u32,
    value: f32,
}

impl BrushSpec {
    /// Fully "on" brush of the given radius.
    pub fn ink(radius: u32) -> PadResult<Self> {
        Self::new(radius, 1.0)
    }

    pub fn new(radius: u32, value: f32) -> PadResult<Self> {
        if radius == 0 {
            return Err(PadError::validation("brush radius must be at least 1"));
        }
        if !(0.0..=1.0).contains(&value) {
            return Err(PadError::validation(format!(
                "brush value {value} is outside [0, 1]"
            )));
        }
        Ok(Self { radius, value })
    }

    pub fn radius(&self) -> u32 {
        self.radius
    }

    pub fn value(&self) -> f32 {
        self.value
    }

    /// Largest offset from the center cell, i.e. `floor(r / 2)`.
    pub fn reach(&self) -> i64 {
        (self.radius / 2) as i64
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgb;

    #[test]
    fn brush_rejects_zero_radius_and_bad_values() {
        assert!(BrushSpec::new(0, 1.0).is_err());
        assert!(BrushSpec::new(2, 1.5).is_err());
        assert!(BrushSpec::new(2, f32::NAN).is_err());
        assert_eq!(BrushSpec::ink(3).unwrap().radius(), 3);
        assert_eq!(BrushSpec::ink(3).unwrap().reach(), 1);
        assert_eq!(BrushSpec::ink(1).unwrap().reach(), 0);
        assert_eq!(BrushSpec::ink(4).unwrap().reach(), 2);
    }

    #[test]
    fn outside_is_never_within() {
        assert!(!CellCoordinate::OUTSIDE.is_within(32));
        assert!(CellCoordinate::new(0, 31).is_within(32));
        assert!(!CellCoordinate::new(32, 0).is_within(32));
        assert!(!CellCoordinate::new(-1, 0).is_within(32));
    }

    #[test]
    fn blit_packs_rgb_and_clips() {
        let width = 3;
        let mut fb = FrameBuffer::new(width, 2, 0);
        let raster = RgbImage::from_pixel(2, 2, Rgb([0x12, 0x34, 0x56]));
        fb.blit_rgb(&raster, 2, 1);
        assert_eq!(fb.pixels[width + 2], 0x0012_3456);
        assert_eq!(fb.pixels.iter().filter(|&&p| p != 0).count(), 1);
    }
}
