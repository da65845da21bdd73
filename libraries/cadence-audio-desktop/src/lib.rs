//! Cadence Player - Desktop Audio Engine
//!
//! Desktop implementation of the `cadence-playback` engine seam, built on
//! rodio. One background worker thread owns the audio output stream and at
//! most one sink; commands arrive over a channel and progress flows back as
//! typed engine events drained by the coordinator's `pump`.
//!
//! Remote tracks (`AudioRef::Remote`) are fetched over HTTP before decoding;
//! local drafts (`AudioRef::Local`) are read from disk. Either way the bytes
//! stay cached for the lifetime of the load so seeking and replay never hit
//! the network twice.
//!
//! # Example
//!
//! ```rust,no_run
//! use cadence_audio_desktop::RodioEngine;
//! use cadence_playback::{PlayerConfig, PlayerCoordinator};
//!
//! let config = PlayerConfig::default();
//! let engine = RodioEngine::new(config.progress_interval);
//! let mut player = PlayerCoordinator::new(Box::new(engine), config);
//! # let _ = &mut player;
//! ```

mod engine;
mod fetch;

pub use engine::RodioEngine;
