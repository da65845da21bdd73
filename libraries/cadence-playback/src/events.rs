//! Player events
//!
//! Event-based communication for UI synchronization. The coordinator queues
//! events as state changes happen; UI surfaces call
//! `PlayerCoordinator::drain_events` once per frame (after `pump`) so every
//! subscriber observes updates within one frame of the triggering change.

use serde::{Deserialize, Serialize};

/// Events emitted by the player coordinator
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum PlayerEvent {
    /// Play/pause status changed
    StateChanged {
        /// Whether audio is now playing
        playing: bool,
    },

    /// A different track became current
    TrackChanged {
        /// ID of the new current track
        track_id: String,
        /// ID of the previous track (if any)
        previous_track_id: Option<String>,
    },

    /// Queue contents changed (replaced, appended, or removed)
    QueueChanged {
        /// New queue length
        length: usize,
    },

    /// Playback progressed (periodic, at the engine's cadence)
    PositionUpdate {
        /// Elapsed time in the current track
        position_ms: u64,
        /// Total track duration as currently known
        duration_ms: u64,
    },

    /// The engine resolved the real media duration
    DurationKnown {
        /// Observed track duration
        duration_ms: u64,
    },

    /// Volume level changed
    VolumeChanged {
        /// New level in `[0.0, 1.0]`
        level: f32,
    },

    /// A track could not be loaded or decoded
    ///
    /// The player stays paused on the failed track; it does not auto-skip.
    PlaybackFailed {
        /// ID of the track that failed (if one was current)
        track_id: Option<String>,
        /// Human-readable failure description
        message: String,
    },
}
