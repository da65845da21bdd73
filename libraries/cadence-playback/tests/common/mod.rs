//! Shared helpers for integration tests: a controllable fake engine and
//! track constructors.

#![allow(dead_code)]

use cadence_core::{AudioRef, Track};
use cadence_playback::{
    EngineErrorKind, EngineEvent, LoadToken, PlaybackEngine, PlayerConfig, PlayerCoordinator,
};
use std::sync::{Arc, Mutex};
use std::time::Duration;

pub fn track(id: &str, duration_secs: u64) -> Track {
    Track::new(
        id,
        format!("Track {}", id),
        Duration::from_secs(duration_secs),
        AudioRef::Remote(format!("https://cdn.example.com/audio/{}.mp3", id)),
    )
}

pub fn tracks(ids: &[&str]) -> Vec<Track> {
    ids.iter().map(|id| track(id, 180)).collect()
}

/// Commands the coordinator issued to the engine, in order
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Load { audio: AudioRef, token: LoadToken },
    Play,
    Pause,
    Seek(Duration),
    SetVolume(f32),
    Stop,
}

#[derive(Debug, Default)]
pub struct FakeState {
    pub commands: Vec<Command>,
    pub pending: Vec<EngineEvent>,
}

/// Test-side handle onto a [`FakeEngine`]
#[derive(Clone, Default)]
pub struct FakeHandle(Arc<Mutex<FakeState>>);

impl FakeHandle {
    pub fn commands(&self) -> Vec<Command> {
        self.0.lock().unwrap().commands.clone()
    }

    pub fn load_count(&self) -> usize {
        self.commands()
            .iter()
            .filter(|c| matches!(c, Command::Load { .. }))
            .count()
    }

    pub fn play_count(&self) -> usize {
        self.commands()
            .iter()
            .filter(|c| matches!(c, Command::Play))
            .count()
    }

    pub fn seeks(&self) -> Vec<Duration> {
        self.commands()
            .iter()
            .filter_map(|c| match c {
                Command::Seek(position) => Some(*position),
                _ => None,
            })
            .collect()
    }

    pub fn last_token(&self) -> LoadToken {
        self.commands()
            .iter()
            .rev()
            .find_map(|c| match c {
                Command::Load { token, .. } => Some(*token),
                _ => None,
            })
            .expect("no load recorded")
    }

    pub fn push(&self, event: EngineEvent) {
        self.0.lock().unwrap().pending.push(event);
    }

    /// Report the real media duration for the most recent load
    pub fn resolve_duration(&self, duration: Duration) {
        let token = self.last_token();
        self.push(EngineEvent::DurationKnown { token, duration });
    }

    /// Report playback progress for the most recent load
    pub fn progress(&self, position: Duration) {
        let token = self.last_token();
        self.push(EngineEvent::TimeUpdate { token, position });
    }

    /// Report that the most recent load played to the end
    pub fn finish_track(&self) {
        let token = self.last_token();
        self.push(EngineEvent::Ended { token });
    }

    /// Report a load/decode failure for the most recent load
    pub fn fail(&self, kind: EngineErrorKind, message: &str) {
        let token = self.last_token();
        self.push(EngineEvent::Error {
            token,
            kind,
            message: message.to_string(),
        });
    }
}

/// In-memory engine controlled by the test
pub struct FakeEngine {
    state: FakeHandle,
}

impl FakeEngine {
    pub fn boxed() -> (Box<dyn PlaybackEngine>, FakeHandle) {
        let handle = FakeHandle::default();
        (
            Box::new(Self {
                state: handle.clone(),
            }),
            handle,
        )
    }
}

impl PlaybackEngine for FakeEngine {
    fn load(&mut self, audio: &AudioRef, token: LoadToken) {
        self.state.0.lock().unwrap().commands.push(Command::Load {
            audio: audio.clone(),
            token,
        });
    }

    fn play(&mut self) {
        self.state.0.lock().unwrap().commands.push(Command::Play);
    }

    fn pause(&mut self) {
        self.state.0.lock().unwrap().commands.push(Command::Pause);
    }

    fn seek(&mut self, position: Duration) {
        self.state
            .0
            .lock()
            .unwrap()
            .commands
            .push(Command::Seek(position));
    }

    fn set_volume(&mut self, level: f32) {
        self.state
            .0
            .lock()
            .unwrap()
            .commands
            .push(Command::SetVolume(level));
    }

    fn stop(&mut self) {
        self.state.0.lock().unwrap().commands.push(Command::Stop);
    }

    fn poll_events(&mut self) -> Vec<EngineEvent> {
        std::mem::take(&mut self.state.0.lock().unwrap().pending)
    }
}

/// A coordinator wired to a fresh fake engine with default config
pub fn new_player() -> (PlayerCoordinator, FakeHandle) {
    let (engine, handle) = FakeEngine::boxed();
    (PlayerCoordinator::new(engine, PlayerConfig::default()), handle)
}
