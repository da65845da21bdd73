//! Player coordinator - core orchestration
//!
//! The single authoritative state machine combining the queue store and the
//! playback engine. Every UI surface (mini player, fullscreen player, queue
//! drawer, song rows) mutates playback through the operations here and reads
//! the published state; none of them touches the engine directly, which is
//! what keeps two surfaces from racing conflicting play/pause calls against
//! each other.
//!
//! "Last call wins": every load mints a fresh generation token, and engine
//! events carrying a stale token are discarded in [`PlayerCoordinator::pump`].
//! A rapid next/next/next burst therefore settles on the last requested
//! track no matter when the superseded loads report back.

use std::time::Duration;

use cadence_core::Track;
use tracing::{debug, warn};

use crate::engine::{EngineErrorKind, EngineEvent, LoadToken, PlaybackEngine};
use crate::error::{PlaybackError, Result};
use crate::events::PlayerEvent;
use crate::queue::QueueStore;
use crate::types::{PlaybackState, PlayerConfig, PlayerState};
use crate::volume::Volume;

/// Central playback coordination
///
/// Owns the queue, the volume preference, and the engine handle. One
/// instance exists per application session; it is created at startup and
/// torn down only by [`PlayerCoordinator::reset`].
pub struct PlayerCoordinator {
    // The single underlying audio resource; exclusively owned
    engine: Box<dyn PlaybackEngine>,

    // Queue and cursor
    queue: QueueStore,

    // State machine
    state: PlaybackState,

    // User volume preference; survives track changes and reset
    volume: Volume,

    // Timeline of the current track, sourced from engine events
    position: Duration,
    duration: Duration,

    // Current load generation; engine events from other generations are stale
    generation: LoadToken,

    // Most recent recoverable playback error
    last_error: Option<String>,

    config: PlayerConfig,

    // Event queue for UI synchronization
    pending_events: Vec<PlayerEvent>,
}

impl PlayerCoordinator {
    /// Create a new coordinator driving the given engine
    pub fn new(mut engine: Box<dyn PlaybackEngine>, config: PlayerConfig) -> Self {
        let volume = Volume::new(config.volume);
        engine.set_volume(volume.level());

        Self {
            engine,
            queue: QueueStore::new(),
            state: PlaybackState::Empty,
            volume,
            position: Duration::ZERO,
            duration: Duration::ZERO,
            generation: 0,
            last_error: None,
            config,
            pending_events: Vec::new(),
        }
    }

    // ===== Playback Control =====

    /// Play a single track.
    ///
    /// If `track` is already current this toggles play/pause instead of
    /// reloading. Otherwise the queue is replaced by `[track]` and playback
    /// starts.
    pub fn play_track(&mut self, track: Track) {
        let is_current = self.state != PlaybackState::Empty
            && self.queue.current().is_some_and(|t| t.id == track.id);

        if is_current {
            self.toggle_play();
            return;
        }

        let previous = self.current_track_id();
        // a single-item list at index 0 is always in bounds
        let _ = self.queue.replace(vec![track], 0);
        self.emit_queue_changed();
        self.load_current(previous, true);
    }

    /// Replace the queue and start playing from `start_index`.
    ///
    /// The single entry point behind "play album", "play playlist", "play
    /// shuffled" and "play from the queue drawer"; callers hand over the
    /// already-ordered list (see [`crate::shuffle::shuffle_tracks`]).
    pub fn play_queue(&mut self, tracks: Vec<Track>, start_index: usize) -> Result<()> {
        let previous = self.current_track_id();
        self.queue.replace(tracks, start_index)?;
        self.emit_queue_changed();

        if self.queue.is_empty() {
            self.stop_playback();
            return Ok(());
        }

        self.load_current(previous, true);
        Ok(())
    }

    /// Toggle play/pause. No-op with nothing loaded.
    pub fn toggle_play(&mut self) {
        match self.state {
            PlaybackState::Empty => {}
            PlaybackState::Playing => {
                self.engine.pause();
                self.set_state(PlaybackState::Paused);
            }
            PlaybackState::Paused => {
                self.engine.play();
                self.set_state(PlaybackState::Playing);
            }
        }
    }

    /// Seek within the current track. No state-machine transition.
    pub fn seek_to(&mut self, position: Duration) {
        if self.state == PlaybackState::Empty {
            return;
        }

        // the engine clamps as well; clamping here keeps the published
        // position honest until the next TimeUpdate arrives
        let target = if self.duration > Duration::ZERO {
            position.min(self.duration)
        } else {
            position
        };

        self.engine.seek(target);
        self.position = target;
        self.emit_position_update();
    }

    /// Set the volume level (clamped to `[0.0, 1.0]`; 0.0 = muted).
    ///
    /// Volume is a user preference: it persists across track changes and
    /// `reset`.
    pub fn set_volume(&mut self, level: f32) {
        let previous = self.volume.level();
        self.volume.set_level(level);
        self.engine.set_volume(self.volume.level());

        if self.volume.level() != previous {
            self.emit(PlayerEvent::VolumeChanged {
                level: self.volume.level(),
            });
        }
    }

    /// Skip to the next queue entry, preserving play/pause mode.
    ///
    /// No-op at the end of the queue; the player never wraps.
    pub fn play_next(&mut self) {
        if !self.queue.has_next() {
            return;
        }

        let resume = self.state == PlaybackState::Playing;
        let previous = self.current_track_id();
        self.queue.advance();
        self.load_current(previous, resume);
    }

    /// Go to the previous queue entry, or restart the current track.
    ///
    /// More than `restart_threshold` into the track, this restarts from the
    /// top instead of moving the cursor (and likewise when there is no prior
    /// entry). Near the start it retreats, preserving play/pause mode.
    pub fn play_previous(&mut self) {
        if self.state == PlaybackState::Empty {
            return;
        }

        if self.position > self.config.restart_threshold || !self.queue.has_previous() {
            self.engine.seek(Duration::ZERO);
            self.position = Duration::ZERO;
            self.emit_position_update();
            return;
        }

        let resume = self.state == PlaybackState::Playing;
        let previous = self.current_track_id();
        self.queue.retreat();
        self.load_current(previous, resume);
    }

    // ===== Queue Management =====

    /// Append a track to the queue. Playback state is untouched.
    pub fn add_to_queue(&mut self, track: Track) {
        self.queue.append(track);
        self.emit_queue_changed();
    }

    /// Remove the track at `index` from the queue.
    ///
    /// Removing the currently-playing entry loads whatever shifted into its
    /// slot, preserving play/pause mode; removing the only entry stops
    /// playback and empties the player (volume preserved).
    pub fn remove_from_queue(&mut self, index: usize) -> Result<Track> {
        let was_current = self.queue.cursor() == Some(index);
        let resume = self.state == PlaybackState::Playing;
        let previous = self.current_track_id();

        let removed = self.queue.remove_at(index)?;
        self.emit_queue_changed();

        if was_current {
            if self.queue.is_empty() {
                self.stop_playback();
            } else {
                self.load_current(previous, resume);
            }
        }

        Ok(removed)
    }

    /// Remove every occurrence of `id` from the queue.
    ///
    /// The same track may sit at several positions, so the matching indices
    /// are removed in descending order; ascending removal would shift the
    /// later targets and delete the wrong rows.
    pub fn remove_from_queue_by_id(&mut self, id: &str) -> usize {
        let matches: Vec<usize> = self
            .queue
            .tracks()
            .iter()
            .enumerate()
            .filter(|(_, track)| track.id == id)
            .map(|(index, _)| index)
            .collect();

        for &index in matches.iter().rev() {
            // in-bounds by construction: strictly descending removals leave
            // the remaining indices valid
            let _ = self.remove_from_queue(index);
        }

        matches.len()
    }

    /// Stop playback, clear the queue, and return to `Empty`.
    ///
    /// Guarantees that no event from the previous source is applied after
    /// this returns (the generation is bumped before the engine is told to
    /// stop). Volume is preserved; it is a user preference, not playback
    /// session state.
    pub fn reset(&mut self) {
        debug!("resetting player");
        self.generation += 1;
        self.engine.stop();
        self.queue.clear();
        self.position = Duration::ZERO;
        self.duration = Duration::ZERO;
        self.last_error = None;
        self.set_state(PlaybackState::Empty);
        self.emit_queue_changed();
    }

    // ===== Engine Event Application =====

    /// Drain the engine's pending events and apply the current-generation
    /// ones.
    ///
    /// Hosts call this once per UI frame, before `drain_events`; stale
    /// events from superseded loads are discarded here.
    pub fn pump(&mut self) {
        for event in self.engine.poll_events() {
            if event.token() != self.generation {
                debug!(
                    token = event.token(),
                    current = self.generation,
                    "discarding stale engine event"
                );
                continue;
            }
            self.apply_engine_event(event);
        }
    }

    fn apply_engine_event(&mut self, event: EngineEvent) {
        match event {
            EngineEvent::DurationKnown { duration, .. } => {
                self.duration = duration;
                self.emit(PlayerEvent::DurationKnown {
                    duration_ms: duration.as_millis() as u64,
                });
            }
            EngineEvent::TimeUpdate { position, .. } => {
                self.position = position;
                self.emit_position_update();
            }
            EngineEvent::Ended { .. } => self.handle_ended(),
            EngineEvent::Error { kind, message, .. } => self.handle_engine_error(kind, &message),
        }
    }

    /// Auto-advance rule: on natural end of track, continue with the next
    /// queue entry; with none left, settle paused at the end of the last
    /// track (the UI shows it fully elapsed, not rewound).
    fn handle_ended(&mut self) {
        if self.queue.has_next() {
            let previous = self.current_track_id();
            self.queue.advance();
            self.load_current(previous, true);
        } else {
            self.position = self.duration;
            self.set_state(PlaybackState::Paused);
            self.emit_position_update();
        }
    }

    /// Load-failure policy: halt and surface, uniformly. The player settles
    /// paused on the failed track so the failure is visible; it never
    /// auto-skips, and it never keeps reporting `is_playing` while nothing
    /// is audible.
    fn handle_engine_error(&mut self, kind: EngineErrorKind, message: &str) {
        let error = match kind {
            EngineErrorKind::Network => PlaybackError::NetworkUnavailable(message.to_string()),
            EngineErrorKind::Decode => PlaybackError::MediaLoad(message.to_string()),
        };
        warn!(%error, "playback failed");

        let message = error.to_string();
        self.last_error = Some(message.clone());
        self.engine.pause();
        self.set_state(PlaybackState::Paused);
        self.emit(PlayerEvent::PlaybackFailed {
            track_id: self.current_track_id(),
            message,
        });
    }

    // ===== State Queries =====

    /// One consistent snapshot of the observable player state
    pub fn state(&self) -> PlayerState {
        PlayerState {
            current_track: self.queue.current().cloned(),
            is_playing: self.state == PlaybackState::Playing,
            position: self.position,
            duration: self.duration,
            volume: self.volume.level(),
            queue: self.queue.tracks().to_vec(),
            queue_index: self.queue.cursor(),
            last_error: self.last_error.clone(),
        }
    }

    /// Whether audio is currently playing
    pub fn is_playing(&self) -> bool {
        self.state == PlaybackState::Playing
    }

    /// Track at the queue cursor (if any)
    pub fn current_track(&self) -> Option<&Track> {
        self.queue.current()
    }

    /// Current volume level
    pub fn volume(&self) -> f32 {
        self.volume.level()
    }

    /// Number of tracks in the queue
    pub fn queue_len(&self) -> usize {
        self.queue.len()
    }

    /// Whether a track exists after the current one
    pub fn has_next(&self) -> bool {
        self.queue.has_next()
    }

    /// Whether a track exists before the current one
    pub fn has_previous(&self) -> bool {
        self.queue.has_previous()
    }

    // ===== Events =====

    /// Drain all pending player events.
    ///
    /// UI surfaces call this once per frame (after [`PlayerCoordinator::pump`])
    /// to synchronize with playback state.
    pub fn drain_events(&mut self) -> Vec<PlayerEvent> {
        std::mem::take(&mut self.pending_events)
    }

    /// Check if there are pending events
    pub fn has_pending_events(&self) -> bool {
        !self.pending_events.is_empty()
    }

    // ===== Internal =====

    fn current_track_id(&self) -> Option<String> {
        self.queue.current().map(|t| t.id.clone())
    }

    /// Load the track at the cursor into the engine under a fresh
    /// generation. `resume` decides whether playback starts immediately
    /// (skipping while paused loads but does not auto-play).
    fn load_current(&mut self, previous_track_id: Option<String>, resume: bool) {
        let Some(track) = self.queue.current().cloned() else {
            return;
        };

        self.generation += 1;
        self.position = Duration::ZERO;
        self.duration = track.duration;
        self.last_error = None;

        debug!(track_id = %track.id, generation = self.generation, "loading track");
        self.engine.load(&track.audio, self.generation);

        if resume {
            self.engine.play();
            self.set_state(PlaybackState::Playing);
        } else {
            self.set_state(PlaybackState::Paused);
        }

        if previous_track_id.as_deref() != Some(track.id.as_str()) {
            self.emit(PlayerEvent::TrackChanged {
                track_id: track.id,
                previous_track_id,
            });
        }
    }

    /// Release the engine's source and return to `Empty`, keeping volume.
    fn stop_playback(&mut self) {
        self.generation += 1;
        self.engine.stop();
        self.position = Duration::ZERO;
        self.duration = Duration::ZERO;
        self.set_state(PlaybackState::Empty);
    }

    fn set_state(&mut self, state: PlaybackState) {
        if self.state == state {
            return;
        }

        let was_playing = self.state == PlaybackState::Playing;
        self.state = state;

        let playing = state == PlaybackState::Playing;
        if playing != was_playing {
            self.emit(PlayerEvent::StateChanged { playing });
        }
    }

    fn emit(&mut self, event: PlayerEvent) {
        self.pending_events.push(event);
    }

    fn emit_queue_changed(&mut self) {
        self.emit(PlayerEvent::QueueChanged {
            length: self.queue.len(),
        });
    }

    fn emit_position_update(&mut self) {
        self.emit(PlayerEvent::PositionUpdate {
            position_ms: self.position.as_millis() as u64,
            duration_ms: self.duration.as_millis() as u64,
        });
    }
}
