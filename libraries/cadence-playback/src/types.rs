//! Core types for playback coordination

use cadence_core::Track;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Playback state
///
/// `is_playing` as observed by UI surfaces is `state == Playing`; the
/// coordinator mirrors the engine here and never the reverse.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PlaybackState {
    /// No track loaded
    Empty,

    /// A track is loaded and paused
    Paused,

    /// A track is loaded and playing
    Playing,
}

/// One consistent snapshot of everything a UI surface renders
///
/// Produced by `PlayerCoordinator::state()`; all fields are captured under a
/// single borrow, so a snapshot never mixes one track's metadata with
/// another track's timeline.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlayerState {
    /// Track at the queue cursor (if any)
    pub current_track: Option<Track>,

    /// Whether audio is currently playing
    pub is_playing: bool,

    /// Elapsed time in the current track
    pub position: Duration,

    /// Track length; starts at the catalog value, replaced by the engine's
    /// observed duration once metadata resolves
    pub duration: Duration,

    /// Volume level in `[0.0, 1.0]`; `0.0` means muted
    pub volume: f32,

    /// The queue in playback order
    pub queue: Vec<Track>,

    /// Cursor into `queue` (if any)
    pub queue_index: Option<usize>,

    /// Most recent recoverable playback error, if any
    pub last_error: Option<String>,
}

/// Configuration for the player coordinator
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayerConfig {
    /// Initial volume in `[0.0, 1.0]` (default: 1.0)
    pub volume: f32,

    /// `play_previous` restarts the current track instead of retreating when
    /// more than this much has elapsed (default: 3 seconds)
    pub restart_threshold: Duration,

    /// How often engine backends report playback progress (default: 200 ms)
    pub progress_interval: Duration,
}

impl Default for PlayerConfig {
    fn default() -> Self {
        Self {
            volume: 1.0,
            restart_threshold: Duration::from_secs(3),
            progress_interval: Duration::from_millis(200),
        }
    }
}
