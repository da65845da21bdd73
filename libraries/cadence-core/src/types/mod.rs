//! Domain types for the Cadence player

mod track;

pub use track::{ArtistRef, AudioRef, Track};
