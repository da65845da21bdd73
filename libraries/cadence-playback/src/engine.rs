//! Platform-agnostic playback engine seam
//!
//! Abstracts the single underlying audio output resource. The coordinator
//! talks to the engine exclusively through this trait, which lets it run
//! against the desktop backend in production and a scripted fake in tests.

use cadence_core::AudioRef;
use std::time::Duration;

/// Load generation token
///
/// The coordinator mints a fresh token for every load and tags each engine
/// event with the token of the load that produced it. Events carrying a
/// token other than the current one are stale ("last call wins") and are
/// discarded on receipt.
pub type LoadToken = u64;

/// Kind of asynchronous engine failure
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EngineErrorKind {
    /// The source could not be opened or decoded
    Decode,

    /// The audio bytes were unreachable over the network
    Network,
}

/// Events reported by a playback engine
///
/// All events are asynchronous and tagged with the [`LoadToken`] of the load
/// they belong to.
#[derive(Debug, Clone, PartialEq)]
pub enum EngineEvent {
    /// Media metadata resolved; `duration` is the observed track length
    DurationKnown {
        token: LoadToken,
        duration: Duration,
    },

    /// Playback progressed
    TimeUpdate {
        token: LoadToken,
        position: Duration,
    },

    /// Playback reached the end of the loaded source
    Ended { token: LoadToken },

    /// The source could not be fetched or decoded
    ///
    /// Load failures arrive here, never as a synchronous error: loading is
    /// inherently asynchronous.
    Error {
        token: LoadToken,
        kind: EngineErrorKind,
        message: String,
    },
}

impl EngineEvent {
    /// The load generation this event belongs to
    pub fn token(&self) -> LoadToken {
        match self {
            EngineEvent::DurationKnown { token, .. }
            | EngineEvent::TimeUpdate { token, .. }
            | EngineEvent::Ended { token }
            | EngineEvent::Error { token, .. } => *token,
        }
    }
}

/// The single audio output resource behind the coordinator
///
/// Implementations hold at most one loaded source at a time. A `load` call
/// supersedes any in-flight load; there is no separate abort primitive.
/// Commands on an engine with nothing loaded are no-ops.
pub trait PlaybackEngine: Send {
    /// Begin loading a new audio source, superseding any in-flight load.
    ///
    /// Completion and failure are reported through [`EngineEvent`]s tagged
    /// with `token`.
    fn load(&mut self, audio: &AudioRef, token: LoadToken);

    /// Start or resume playback of the loaded source.
    fn play(&mut self);

    /// Pause playback.
    fn pause(&mut self);

    /// Seek within the loaded source; out-of-range positions are clamped to
    /// `[0, duration]`, never rejected.
    fn seek(&mut self, position: Duration);

    /// Set the output volume level; clamped to `[0.0, 1.0]`.
    fn set_volume(&mut self, level: f32);

    /// Release the loaded source entirely.
    fn stop(&mut self);

    /// Drain pending events (non-blocking).
    fn poll_events(&mut self) -> Vec<EngineEvent>;
}
