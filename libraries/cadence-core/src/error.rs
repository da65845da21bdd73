/// Core error types for the Cadence player
use thiserror::Error;

/// Result type alias using `CoreError`
pub type Result<T> = std::result::Result<T, CoreError>;

/// Core error type for Cadence domain conversions
#[derive(Error, Debug)]
pub enum CoreError {
    /// A catalog track arrived without a playable audio reference
    #[error("track {0} has no audio source")]
    MissingAudioSource(String),

    /// Serialization errors
    #[error(transparent)]
    Serialization(#[from] serde_json::Error),
}
