// Error type for the pad. Every variant states *where* things went wrong.
// Painting itself never fails: out-of-bounds input is clipped, stray events
// are ignored. Errors only come from setup, the window and collaborators.

pub type PadResult<T> = Result<T, PadError>;

#[derive(thiserror::Error, Debug)]
pub enum PadError {
    #[error("validation error: {0}")]
    Validation(String), // a config value or brush/param is out of range

    #[error("window error: {0}")]
    Window(String), // creating or updating the minifb window failed

    #[error("collaborator error: {0}")]
    Collaborator(String), // the inference/generation client failed

    #[error("serialization error: {0}")]
    Serde(#[from] serde_json::Error),
}

impl PadError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn window(msg: impl Into<String>) -> Self {
        Self::Window(msg.into())
    }

    pub fn collaborator(msg: impl Into<String>) -> Self {
        Self::Collaborator(msg.into())
    }
}
