//! Error types for playback coordination

use thiserror::Error;

/// Playback errors
#[derive(Debug, Error)]
pub enum PlaybackError {
    /// Caller passed an out-of-range queue index
    #[error("index out of bounds: {0}")]
    InvalidIndex(usize),

    /// No track is currently loaded
    #[error("no track loaded")]
    NoTrackLoaded,

    /// The engine could not fetch or decode an audio source
    ///
    /// Surfaced asynchronously through the event stream, never thrown across
    /// the coordinator boundary.
    #[error("media load failed: {0}")]
    MediaLoad(String),

    /// The audio bytes were unreachable over the network
    ///
    /// Handled identically to [`PlaybackError::MediaLoad`]; this core has no
    /// retry logic of its own.
    #[error("network unavailable: {0}")]
    NetworkUnavailable(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for playback operations
pub type Result<T> = std::result::Result<T, PlaybackError>;
