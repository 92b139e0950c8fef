// A drawing surface: owns the grid, the stroke session and the last raster.
// The flow is always "mutate, then render": any event that changes the grid
// triggers exactly one full redraw before `handle` returns.

use crate::client::{
    GenerationClient, GenerationParams, InferenceClient, PredictionOutcome, request_prediction,
};
use crate::error::{PadError, PadResult};
use crate::grid::Grid;
use crate::render::Renderer;
use crate::stroke::{DeviceBrushes, InputEvent, StrokeSession};
use crate::types::CanvasBounds;
use image::RgbImage;

/// Result of a generate request. A fallback still loads a (diagnostic)
/// pattern so the user sees that something went wrong.
#[derive(Debug, Clone, PartialEq)]
pub enum GenerationOutcome {
    Generated,
    Fallback { reason: String },
}

pub struct Surface {
    grid: Grid,
    session: StrokeSession,
    renderer: Renderer,
    raster: RgbImage,
    bounds: CanvasBounds,
    redraws: u64,
}

impl Surface {
    /// Fails when a `size x size` grid at `cell_px` would need a raster
    /// wider than `u32::MAX` pixels.
    pub fn new(size: usize, cell_px: u32, brushes: DeviceBrushes) -> PadResult<Self> {
        let renderer = Renderer::new(cell_px);
        if renderer.raster_side(size).is_none() {
            return Err(PadError::validation(format!(
                "raster for {size} cells of {cell_px} px overflows u32"
            )));
        }
        let grid = Grid::new(size);
        let raster = renderer.render(&grid);
        Ok(Self {
            grid,
            session: StrokeSession::new(brushes),
            renderer,
            raster,
            bounds: CanvasBounds::default(),
            redraws: 1,
        })
    }

    /// Where the canvas currently sits on screen.
    pub fn set_bounds(&mut self, bounds: CanvasBounds) {
        self.bounds = bounds;
    }

    pub fn bounds(&self) -> CanvasBounds {
        self.bounds
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn raster(&self) -> &RgbImage {
        &self.raster
    }

    pub fn session(&self) -> &StrokeSession {
        &self.session
    }

    /// Number of full redraws so far (the initial one included).
    pub fn redraws(&self) -> u64 {
        self.redraws
    }

    /// Feed one input event. Returns true if the grid changed (and was redrawn).
    pub fn handle(&mut self, event: &InputEvent) -> bool {
        let changed =
            self.session
                .handle(event, &mut self.grid, self.bounds, self.renderer.cell_px());
        if changed {
            self.redraw();
        }
        changed
    }

    /// Drop the drawing: fresh zeroed grid, one redraw.
    pub fn clear(&mut self) {
        self.grid = Grid::new(self.grid.size());
        tracing::info!("grid cleared");
        self.redraw();
    }

    /// Replace the grid wholesale (validated) and redraw once.
    pub fn load(&mut self, rows: &[Vec<f32>]) -> PadResult<()> {
        self.grid = Grid::from_rows(self.grid.size(), rows)?;
        tracing::info!(size = self.grid.size(), "grid loaded");
        self.redraw();
        Ok(())
    }

    /// Flattened copy of the grid, taken now.
    pub fn snapshot(&self) -> Vec<f32> {
        self.grid.snapshot()
    }

    pub fn predict(&self, client: &mut dyn InferenceClient) -> PredictionOutcome {
        request_prediction(client, self.snapshot())
    }

    /// Run the generator and load its matrix. On any failure the grid is
    /// replaced by the fallback checkerboard instead.
    #[tracing::instrument(skip(self, client))]
    pub fn generate(
        &mut self,
        client: &mut dyn GenerationClient,
        params: &GenerationParams,
    ) -> PadResult<GenerationOutcome> {
        params.validate()?;
        let loaded = client
            .generate(&params.request())
            .and_then(|rows| self.load(&rows));
        match loaded {
            Ok(()) => Ok(GenerationOutcome::Generated),
            Err(e) => {
                tracing::warn!(error = %e, "generation failed, showing fallback pattern");
                self.grid = fallback_pattern(self.grid.size());
                self.redraw();
                Ok(GenerationOutcome::Fallback { reason: e.to_string() })
            }
        }
    }

    fn redraw(&mut self) {
        self.renderer.render_into(&self.grid, &mut self.raster);
        self.redraws += 1;
        tracing::debug!(redraws = self.redraws, "surface redrawn");
    }
}

/// 0.5 on cells where row + col is even, 0 elsewhere.
pub fn fallback_pattern(size: usize) -> Grid {
    Grid::from_fn(size, |i, j| if (i + j) % 2 == 0 { 0.5 } else { 0.0 })
}
