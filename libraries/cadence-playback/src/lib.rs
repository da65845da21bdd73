//! Cadence Player - Playback Coordination
//!
//! Platform-agnostic playback coordination for the Cadence player: the
//! single authoritative source of truth that every UI surface reads and
//! mutates.
//!
//! This crate provides:
//! - Queue store (ordered tracks + current-position cursor)
//! - Player coordinator state machine (play/pause/seek/next/previous,
//!   auto-advance, "last call wins" load supersession)
//! - Playback engine seam (trait + typed events) for platform backends
//! - Volume control (`[0.0, 1.0]`, muted at zero, perceptual amplitude)
//! - Caller-side shuffle helper (Fisher–Yates)
//!
//! # Architecture
//!
//! `cadence-playback` has no audio I/O dependency of its own. The actual
//! audio resource lives behind the [`PlaybackEngine`] trait; the desktop
//! backend is provided by `cadence-audio-desktop`, and tests drive the
//! coordinator with scripted fakes.
//!
//! One coordinator exists per application session. UI surfaces call its
//! operations, then once per frame call [`PlayerCoordinator::pump`] followed
//! by [`PlayerCoordinator::drain_events`] / [`PlayerCoordinator::state`], so
//! every surface observes one consistent snapshot.
//!
//! # Example
//!
//! ```rust,no_run
//! use cadence_core::{AudioRef, Track};
//! use cadence_playback::{PlaybackEngine, PlayerConfig, PlayerCoordinator};
//! use std::time::Duration;
//!
//! fn run(engine: Box<dyn PlaybackEngine>) {
//!     let mut player = PlayerCoordinator::new(engine, PlayerConfig::default());
//!
//!     let album = vec![
//!         Track::new(
//!             "t-1",
//!             "Opener",
//!             Duration::from_secs(201),
//!             AudioRef::Remote("https://cdn.example.com/audio/t-1.mp3".into()),
//!         ),
//!         Track::new(
//!             "t-2",
//!             "Closer",
//!             Duration::from_secs(244),
//!             AudioRef::Remote("https://cdn.example.com/audio/t-2.mp3".into()),
//!         ),
//!     ];
//!
//!     player.play_queue(album, 0).unwrap();
//!     player.set_volume(0.8);
//!
//!     // once per UI frame:
//!     player.pump();
//!     for event in player.drain_events() {
//!         // update the mini player, fullscreen player, queue drawer ...
//!         let _ = event;
//!     }
//! }
//! ```

mod coordinator;
mod engine;
mod error;
mod events;
mod queue;
pub mod shuffle;
pub mod types;
mod volume;

// Public exports
pub use coordinator::PlayerCoordinator;
pub use engine::{EngineErrorKind, EngineEvent, LoadToken, PlaybackEngine};
pub use error::{PlaybackError, Result};
pub use events::PlayerEvent;
pub use queue::QueueStore;
pub use types::{PlaybackState, PlayerConfig, PlayerState};
pub use volume::Volume;
