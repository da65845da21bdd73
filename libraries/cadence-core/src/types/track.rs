/// Track domain type
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

/// Reference to an artist as carried on a track
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArtistRef {
    /// Unique artist identifier
    pub id: String,

    /// Artist display name
    pub name: String,
}

/// Reference to the audio bytes of a track
///
/// Catalog tracks point at a URL served by the streaming backend. Tracks in
/// preview-before-upload flows have no URL yet and point at a local file
/// instead. Playback code must handle both; it may not assume `Remote`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum AudioRef {
    /// Audio served over HTTP (catalog tracks)
    Remote(String),

    /// Audio on the local filesystem (not-yet-uploaded drafts)
    Local(PathBuf),
}

/// A playable track
///
/// Value type, immutable once constructed. `duration` is the catalog's
/// expected length and may be provisional; once playback starts, the audio
/// engine's observed duration is the source of truth.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Track {
    /// Unique track identifier
    pub id: String,

    /// Track title
    pub title: String,

    /// Expected track length (may be provisional)
    pub duration: Duration,

    /// Cover art URL (optional)
    pub artwork_url: Option<String>,

    /// Credited artists, in display order (may be empty)
    pub artists: Vec<ArtistRef>,

    /// Where the audio bytes live
    pub audio: AudioRef,
}

impl Track {
    /// Create a new track with minimal metadata
    pub fn new(
        id: impl Into<String>,
        title: impl Into<String>,
        duration: Duration,
        audio: AudioRef,
    ) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            duration,
            artwork_url: None,
            artists: Vec::new(),
            audio,
        }
    }

    /// Human-readable artist credit line
    ///
    /// Joins artist names with ", "; an empty artist list renders as
    /// "Unknown Artist".
    pub fn artist_line(&self) -> String {
        if self.artists.is_empty() {
            return "Unknown Artist".to_string();
        }

        self.artists
            .iter()
            .map(|a| a.name.as_str())
            .collect::<Vec<_>>()
            .join(", ")
    }

    /// Whether the audio bytes are served remotely
    pub fn is_remote(&self) -> bool {
        matches!(self.audio, AudioRef::Remote(_))
    }
}
