//! Queue store
//!
//! Owns the ordered list of tracks plus the cursor identifying the current
//! one. All mutation goes through the operations here and is atomic from the
//! caller's perspective.
//!
//! Invariant: an empty queue has no cursor; a non-empty queue with a current
//! track keeps `cursor < items.len()`.

use cadence_core::Track;

use crate::error::{PlaybackError, Result};

/// Ordered playback queue with a current-position cursor
///
/// Insertion order is playback order. Duplicate track ids are allowed at
/// different positions; bulk removal by id must therefore be driven by
/// index, in descending order (see `PlayerCoordinator::remove_from_queue_by_id`).
#[derive(Debug, Clone, Default)]
pub struct QueueStore {
    /// Tracks in playback order
    items: Vec<Track>,

    /// Index of the current track (None = no current track)
    cursor: Option<usize>,
}

impl QueueStore {
    /// Create a new empty queue
    pub fn new() -> Self {
        Self {
            items: Vec::new(),
            cursor: None,
        }
    }

    /// Replace the queue wholesale and set the cursor to `start_index`.
    ///
    /// An empty `tracks` clears the queue and unsets the cursor (any
    /// `start_index` is accepted). For non-empty `tracks`, `start_index`
    /// must be in `[0, tracks.len())`.
    pub fn replace(&mut self, tracks: Vec<Track>, start_index: usize) -> Result<()> {
        if tracks.is_empty() {
            self.items.clear();
            self.cursor = None;
            return Ok(());
        }

        if start_index >= tracks.len() {
            return Err(PlaybackError::InvalidIndex(start_index));
        }

        self.items = tracks;
        self.cursor = Some(start_index);
        Ok(())
    }

    /// Append a track to the end of the queue.
    ///
    /// Never moves the cursor: appending to an empty queue does not make the
    /// new track current. Appending is distinct from playing.
    pub fn append(&mut self, track: Track) {
        self.items.push(track);
    }

    /// Remove the track at `index`, returning it.
    ///
    /// Cursor adjustment:
    /// - removal before the cursor decrements it (same logical track stays
    ///   current)
    /// - removal at the cursor leaves it pointing at the item that shifted
    ///   in, clamped to the new last index when the tail was removed
    /// - removal after the cursor leaves it untouched
    ///
    /// The queue becoming empty unsets the cursor.
    pub fn remove_at(&mut self, index: usize) -> Result<Track> {
        if index >= self.items.len() {
            return Err(PlaybackError::InvalidIndex(index));
        }

        let removed = self.items.remove(index);

        if self.items.is_empty() {
            self.cursor = None;
        } else if let Some(cursor) = self.cursor {
            if index < cursor {
                self.cursor = Some(cursor - 1);
            } else if index == cursor && cursor >= self.items.len() {
                self.cursor = Some(self.items.len() - 1);
            }
        }

        Ok(removed)
    }

    /// Move the cursor forward by one.
    ///
    /// Returns `false` (and leaves the cursor unchanged) when unset or
    /// already at the last index.
    pub fn advance(&mut self) -> bool {
        match self.cursor {
            Some(cursor) if cursor + 1 < self.items.len() => {
                self.cursor = Some(cursor + 1);
                true
            }
            _ => false,
        }
    }

    /// Move the cursor back by one.
    ///
    /// Returns `false` (and leaves the cursor unchanged) when unset or at
    /// index 0.
    pub fn retreat(&mut self) -> bool {
        match self.cursor {
            Some(cursor) if cursor > 0 => {
                self.cursor = Some(cursor - 1);
                true
            }
            _ => false,
        }
    }

    /// Whether a track exists after the cursor
    pub fn has_next(&self) -> bool {
        matches!(self.cursor, Some(cursor) if cursor + 1 < self.items.len())
    }

    /// Whether a track exists before the cursor
    pub fn has_previous(&self) -> bool {
        matches!(self.cursor, Some(cursor) if cursor > 0)
    }

    /// Track at the cursor (if any)
    pub fn current(&self) -> Option<&Track> {
        self.cursor.and_then(|cursor| self.items.get(cursor))
    }

    /// Current cursor position
    pub fn cursor(&self) -> Option<usize> {
        self.cursor
    }

    /// All tracks in playback order
    pub fn tracks(&self) -> &[Track] {
        &self.items
    }

    /// Number of tracks in the queue
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether the queue is empty
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Empty the queue and unset the cursor
    pub fn clear(&mut self) {
        self.items.clear();
        self.cursor = None;
    }
}
