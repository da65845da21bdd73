//! Types for the Cadence catalog API responses.
//!
//! The catalog/playlist endpoints return tracks as camelCase JSON. These are
//! the wire shapes only; playback code works with [`Track`].

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

use crate::error::{CoreError, Result};
use crate::types::{ArtistRef, AudioRef, Track};

/// An artist as embedded in a catalog track response.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ApiArtist {
    pub id: String,
    pub name: String,
}

/// A track as returned by the catalog API.
///
/// `song_url` is absent for tracks handed to preview-before-upload flows;
/// those must be converted with [`ApiTrack::into_track_with_local`].
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiTrack {
    pub id: String,
    pub title: String,
    /// Track length in whole seconds
    pub total_duration: u64,
    #[serde(default)]
    pub cover_url: Option<String>,
    #[serde(default)]
    pub artists: Vec<ApiArtist>,
    #[serde(default)]
    pub song_url: Option<String>,
}

impl ApiTrack {
    /// Convert into a playable [`Track`].
    ///
    /// Fails with [`CoreError::MissingAudioSource`] when the catalog did not
    /// provide a `songUrl`.
    pub fn into_track(self) -> Result<Track> {
        let Some(url) = self.song_url else {
            return Err(CoreError::MissingAudioSource(self.id));
        };

        Ok(Self::build(
            self.id,
            self.title,
            self.total_duration,
            self.cover_url,
            self.artists,
            AudioRef::Remote(url),
        ))
    }

    /// Convert into a [`Track`] backed by a local file.
    ///
    /// Used by preview flows where the audio has not been uploaded yet; any
    /// `songUrl` the response carried is ignored in favor of the local path.
    pub fn into_track_with_local(self, path: PathBuf) -> Track {
        Self::build(
            self.id,
            self.title,
            self.total_duration,
            self.cover_url,
            self.artists,
            AudioRef::Local(path),
        )
    }

    fn build(
        id: String,
        title: String,
        total_duration: u64,
        cover_url: Option<String>,
        artists: Vec<ApiArtist>,
        audio: AudioRef,
    ) -> Track {
        Track {
            id,
            title,
            duration: Duration::from_secs(total_duration),
            artwork_url: cover_url,
            artists: artists
                .into_iter()
                .map(|a| ArtistRef {
                    id: a.id,
                    name: a.name,
                })
                .collect(),
            audio,
        }
    }
}
