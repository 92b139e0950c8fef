//! Grid painting and rendering for a small digit drawing pad.
//!
//! Pointer/touch samples are mapped onto an `N x N` intensity grid, dabbed in
//! with a square brush and redrawn as a grayscale raster with a gridline
//! overlay. The same engine backs both the drawing pad and the generation
//! preview; model calls sit behind the collaborator traits in [`client`].

pub mod brush;
pub mod client;
pub mod config;
pub mod draw;
pub mod error;
pub mod grid;
pub mod mapper;
pub mod render;
pub mod stroke;
pub mod surface;
pub mod types;

pub use error::{PadError, PadResult};
pub use grid::Grid;
pub use render::Renderer;
pub use stroke::{DeviceBrushes, InputEvent, StrokeSession, StrokeState};
pub use surface::{GenerationOutcome, Surface};
pub use types::{BrushSpec, CanvasBounds, CellCoordinate, PointerSample};
