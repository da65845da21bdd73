//! Cadence Player - Core Types
//!
//! Domain types shared by every part of the Cadence player core.
//!
//! This crate defines:
//! - **Track model**: [`Track`], [`ArtistRef`], [`AudioRef`]
//! - **Catalog API shapes**: [`api::ApiTrack`] and its conversion into [`Track`]
//! - **Error handling**: [`CoreError`] and [`Result`]
//!
//! # Example
//!
//! ```rust
//! use cadence_core::{AudioRef, Track};
//! use std::time::Duration;
//!
//! let track = Track::new(
//!     "t-1",
//!     "Night Drive",
//!     Duration::from_secs(214),
//!     AudioRef::Remote("https://cdn.example.com/audio/t-1.mp3".into()),
//! );
//!
//! assert_eq!(track.artist_line(), "Unknown Artist");
//! ```

pub mod api;
pub mod error;
pub mod types;

pub use error::{CoreError, Result};
pub use types::{ArtistRef, AudioRef, Track};
