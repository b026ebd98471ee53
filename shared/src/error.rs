use thiserror::Error;

/// Errors surfaced by wheel operations. None of them are fatal: the widget
/// turns each one into a status message or ignores it.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum WheelError {
    #[error("a spin is already in progress")]
    Busy,
    #[error("all outcomes have been chosen")]
    Exhausted,
    #[error("outcome index {index} is out of range for {len} slices")]
    UnknownOutcome { index: usize, len: usize },
    #[error("invalid hex color `{0}`")]
    InvalidColor(String),
    #[error("a wheel needs at least one outcome")]
    EmptyWheel,
}

/// Reasons a persisted snapshot is discarded on load.
#[derive(Debug, Error)]
pub enum SnapshotError {
    #[error("malformed snapshot: {0}")]
    Malformed(#[from] serde_json::Error),
    #[error("snapshot has {found} entries but the wheel has {expected}")]
    LengthMismatch { expected: usize, found: usize },
    #[error("snapshot entry {index} does not match the outcome shape")]
    ShapeMismatch { index: usize },
}
