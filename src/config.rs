// Command-line flags, parsed with clap and checked into a PadConfig.

use crate::client::GenerationParams;
use crate::error::{PadError, PadResult};
use clap::{Parser, ValueEnum};

pub const GRID_SIZE_RANGE: (usize, usize) = (4, 128);
pub const CELL_PX_RANGE: (u32, u32) = (2, 64);

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum Mode {
    /// Hand-draw a digit and ask the classifier about it.
    Draw,
    /// Render synthetic digits from the generator.
    Generate,
}

#[derive(Parser, Debug)]
#[command(name = "digit-pad", version, about = "Draw or generate small digit bitmaps")]
pub struct Cli {
    /// Which surface to open.
    #[arg(long, value_enum, default_value_t = Mode::Draw)]
    pub mode: Mode,

    /// Cells per side of the grid.
    #[arg(long, default_value_t = 32)]
    pub grid_size: usize,

    /// Pixels per side of one cell.
    #[arg(long, default_value_t = 12)]
    pub cell_size: u32,

    /// Diffusion steps (10-100, multiples of 5).
    #[arg(long, default_value_t = 50)]
    pub steps: u32,

    /// Guidance scale (1.0-15.0, multiples of 0.5).
    #[arg(long, default_value_t = 7.5)]
    pub guidance: f32,

    /// Target digit; omit for a random one.
    #[arg(long)]
    pub digit: Option<u8>,

    /// Seed for the placeholder generator.
    #[arg(long, default_value_t = 0x5EED)]
    pub seed: u32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PadConfig {
    pub mode: Mode,
    pub grid_size: usize,
    pub cell_px: u32,
    pub params: GenerationParams,
    pub seed: u32,
}

impl Cli {
    pub fn validate(self) -> PadResult<PadConfig> {
        let (lo, hi) = GRID_SIZE_RANGE;
        if !(lo..=hi).contains(&self.grid_size) {
            return Err(PadError::validation(format!(
                "--grid-size must be in [{lo}, {hi}], got {}",
                self.grid_size
            )));
        }
        let (lo, hi) = CELL_PX_RANGE;
        if !(lo..=hi).contains(&self.cell_size) {
            return Err(PadError::validation(format!(
                "--cell-size must be in [{lo}, {hi}], got {}",
                self.cell_size
            )));
        }
        let params = GenerationParams {
            steps: self.steps,
            guidance_scale: self.guidance,
            digit: self.digit,
        };
        params.validate()?;

        Ok(PadConfig {
            mode: self.mode,
            grid_size: self.grid_size,
            cell_px: self.cell_size,
            params,
            seed: self.seed,
        })
    }
}
