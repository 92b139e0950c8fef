// Boundary to the model collaborators: an inference client that labels a
// drawing, and a generation client that synthesizes one. Neither touches the
// grid. The classifier gets a flattened copy taken before the call, and a
// generated matrix is validated before it replaces anything.

use crate::error::{PadError, PadResult};
use serde::{Deserialize, Serialize};

pub const STEPS_RANGE: (u32, u32) = (10, 100);
pub const STEPS_INCREMENT: u32 = 5;
pub const GUIDANCE_RANGE: (f32, f32) = (1.0, 15.0);
pub const GUIDANCE_INCREMENT: f32 = 0.5;

/// Knobs for the generative demo.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GenerationParams {
    pub steps: u32,
    pub guidance_scale: f32,
    pub digit: Option<u8>, // None = random digit
}

impl Default for GenerationParams {
    fn default() -> Self {
        Self { steps: 50, guidance_scale: 7.5, digit: None }
    }
}

impl GenerationParams {
    pub fn validate(&self) -> PadResult<()> {
        let (lo, hi) = STEPS_RANGE;
        if !(lo..=hi).contains(&self.steps) || self.steps % STEPS_INCREMENT != 0 {
            return Err(PadError::validation(format!(
                "steps must be a multiple of {STEPS_INCREMENT} in [{lo}, {hi}], got {}",
                self.steps
            )));
        }
        let (lo, hi) = GUIDANCE_RANGE;
        let halves = self.guidance_scale / GUIDANCE_INCREMENT;
        if !(lo..=hi).contains(&self.guidance_scale) || halves.fract() != 0.0 {
            return Err(PadError::validation(format!(
                "guidance scale must be a multiple of {GUIDANCE_INCREMENT} in [{lo}, {hi}], got {}",
                self.guidance_scale
            )));
        }
        if let Some(d) = self.digit
            && d > 9
        {
            return Err(PadError::validation(format!("target digit must be 0-9, got {d}")));
        }
        Ok(())
    }

    /// Step the steps slider, saturating at its ends.
    pub fn nudge_steps(&mut self, up: bool) {
        let (lo, hi) = STEPS_RANGE;
        self.steps = if up {
            (self.steps + STEPS_INCREMENT).min(hi)
        } else {
            self.steps.saturating_sub(STEPS_INCREMENT).max(lo)
        };
    }

    /// Step the guidance slider, saturating at its ends.
    pub fn nudge_guidance(&mut self, up: bool) {
        let (lo, hi) = GUIDANCE_RANGE;
        let delta = if up { GUIDANCE_INCREMENT } else { -GUIDANCE_INCREMENT };
        self.guidance_scale = (self.guidance_scale + delta).clamp(lo, hi);
    }

    pub fn request(&self) -> GenerateRequest {
        GenerateRequest {
            inputs: match self.digit {
                Some(d) => format!("digit {d}"),
                None => "random digit".to_string(),
            },
            parameters: GenerateParameters {
                num_inference_steps: self.steps,
                guidance_scale: self.guidance_scale,
            },
        }
    }
}

/// `{"inputs": [...]}`: the N*N row-major snapshot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PredictRequest {
    pub inputs: Vec<f32>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenerateRequest {
    pub inputs: String,
    pub parameters: GenerateParameters,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenerateParameters {
    pub num_inference_steps: u32,
    pub guidance_scale: f32,
}

/// Labels a drawing. The response is opaque JSON passed through for display.
pub trait InferenceClient {
    fn predict(&mut self, request: &PredictRequest) -> PadResult<serde_json::Value>;
}

/// Synthesizes a drawing as rows of intensities.
pub trait GenerationClient {
    fn generate(&mut self, request: &GenerateRequest) -> PadResult<Vec<Vec<f32>>>;
}

/// What the results panel shows. Failures are a payload, never a panic.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum PredictionOutcome {
    Prediction(serde_json::Value),
    Failed { error: String },
}

impl PredictionOutcome {
    pub fn is_failure(&self) -> bool {
        matches!(self, Self::Failed { .. })
    }

    pub fn to_pretty_json(&self) -> PadResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

/// Ask the classifier about `snapshot`, folding any error into the outcome.
#[tracing::instrument(skip(client, snapshot), fields(cells = snapshot.len()))]
pub fn request_prediction(client: &mut dyn InferenceClient, snapshot: Vec<f32>) -> PredictionOutcome {
    let request = PredictRequest { inputs: snapshot };
    match client.predict(&request) {
        Ok(value) => PredictionOutcome::Prediction(value),
        Err(e) => {
            tracing::warn!(error = %e, "prediction failed");
            PredictionOutcome::Failed {
                error: "Failed to predict. Please make sure the model URL is configured.".to_string(),
            }
        }
    }
}

/// Stand-in classifier while no model endpoint is wired up: every call fails.
#[derive(Debug, Default)]
pub struct UnconfiguredClassifier;

impl InferenceClient for UnconfiguredClassifier {
    fn predict(&mut self, request: &PredictRequest) -> PadResult<serde_json::Value> {
        let body = serde_json::to_string(request)?;
        tracing::debug!(bytes = body.len(), "prediction request built");
        Err(PadError::collaborator("model endpoint is not configured"))
    }
}

/// Stand-in generator: uniform noise in [0, 1), reproducible from a seed.
#[derive(Debug, Clone)]
pub struct PlaceholderGenerator {
    size: usize,
    rng: Rng32,
}

impl PlaceholderGenerator {
    pub fn new(size: usize, seed: u32) -> Self {
        Self { size, rng: Rng32::from_seed(seed) }
    }
}

impl GenerationClient for PlaceholderGenerator {
    fn generate(&mut self, request: &GenerateRequest) -> PadResult<Vec<Vec<f32>>> {
        let body = serde_json::to_string(request)?;
        tracing::debug!(%body, "generation request built");
        let rows: Vec<Vec<f32>> = (0..self.size)
            .map(|_| (0..self.size).map(|_| self.rng.next_f32()).collect::<Vec<f32>>())
            .collect();
        Ok(rows)
    }
}

/// Deterministic xorshift32, plenty for placeholder noise.
#[derive(Debug, Clone)]
struct Rng32 {
    state: u32,
}

impl Rng32 {
    fn from_seed(seed: u32) -> Self {
        Self { state: seed | 1 }
    }

    #[inline]
    fn next_u32(&mut self) -> u32 {
        let mut x = self.state;
        x ^= x << 13;
        x ^= x >> 17;
        x ^= x << 5;
        self.state = x;
        x
    }

    #[inline]
    fn next_f32(&mut self) -> f32 {
        // Uniform [0,1)
        (self.next_u32() >> 8) as f32 / ((1u32 << 24) as f32)
    }
}
