//! Rodio-backed playback engine
//!
//! A dedicated worker thread owns the audio output stream and at most one
//! sink at a time; the [`RodioEngine`] handle implements the
//! `cadence-playback` engine trait by exchanging commands and events with it
//! over channels. Decoding and HTTP fetches happen on the worker, never on
//! the caller's thread.
//!
//! Elapsed time is tracked as accumulated-while-paused plus a start instant,
//! and reported as periodic `TimeUpdate`s at the configured cadence. A sink
//! that drains while playing is reported as `Ended`; the decoded bytes stay
//! cached so an explicit replay or seek rebuilds the sink without re-reading
//! the source.

use std::io::Cursor;
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

use cadence_core::AudioRef;
use cadence_playback::{EngineErrorKind, EngineEvent, LoadToken, PlaybackEngine, Volume};
use crossbeam_channel::{bounded, unbounded, Receiver, RecvTimeoutError, Sender};
use rodio::{Decoder, OutputStream, OutputStreamBuilder, Sink, Source};
use tracing::{debug, error, warn};

/// Commands sent to the worker thread
enum EngineCmd {
    Load { audio: AudioRef, token: LoadToken },
    Play,
    Pause,
    Seek(Duration),
    SetVolume(f32),
    Stop,
    Shutdown,
}

/// Desktop playback engine handle
///
/// Cheap to command: every trait method is a non-blocking channel send. The
/// worker thread is joined on drop.
pub struct RodioEngine {
    cmd_tx: Sender<EngineCmd>,
    event_rx: Receiver<EngineEvent>,
    worker: Option<JoinHandle<()>>,
}

impl RodioEngine {
    /// Spawn the engine worker.
    ///
    /// `progress_interval` sets the cadence of `TimeUpdate` events while
    /// playing (`PlayerConfig::progress_interval` is the usual source).
    pub fn new(progress_interval: Duration) -> Self {
        let (cmd_tx, cmd_rx) = unbounded::<EngineCmd>();
        let (event_tx, event_rx) = bounded::<EngineEvent>(256);

        let worker = thread::Builder::new()
            .name("cadence-audio".to_string())
            .spawn(move || run_worker(&cmd_rx, &event_tx, progress_interval))
            .expect("failed to spawn audio worker thread");

        Self {
            cmd_tx,
            event_rx,
            worker: Some(worker),
        }
    }

    fn send(&self, cmd: EngineCmd) {
        // a closed channel means the worker is gone; commands become no-ops
        let _ = self.cmd_tx.send(cmd);
    }
}

impl Default for RodioEngine {
    fn default() -> Self {
        Self::new(Duration::from_millis(200))
    }
}

impl PlaybackEngine for RodioEngine {
    fn load(&mut self, audio: &AudioRef, token: LoadToken) {
        self.send(EngineCmd::Load {
            audio: audio.clone(),
            token,
        });
    }

    fn play(&mut self) {
        self.send(EngineCmd::Play);
    }

    fn pause(&mut self) {
        self.send(EngineCmd::Pause);
    }

    fn seek(&mut self, position: Duration) {
        self.send(EngineCmd::Seek(position));
    }

    fn set_volume(&mut self, level: f32) {
        self.send(EngineCmd::SetVolume(level));
    }

    fn stop(&mut self) {
        self.send(EngineCmd::Stop);
    }

    fn poll_events(&mut self) -> Vec<EngineEvent> {
        self.event_rx.try_iter().collect()
    }
}

impl Drop for RodioEngine {
    fn drop(&mut self) {
        self.send(EngineCmd::Shutdown);
        if let Some(worker) = self.worker.take() {
            let _ = worker.join();
        }
    }
}

/// Audio bytes shared between the cache and the decoder
#[derive(Clone)]
struct SharedBytes(Arc<Vec<u8>>);

impl AsRef<[u8]> for SharedBytes {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

/// The bytes and metadata of the currently loaded track
#[derive(Clone)]
struct LoadedSource {
    bytes: SharedBytes,
    total: Option<Duration>,
}

fn run_worker(
    cmd_rx: &Receiver<EngineCmd>,
    event_tx: &Sender<EngineEvent>,
    progress_interval: Duration,
) {
    let mut stream = match OutputStreamBuilder::open_default_stream() {
        Ok(stream) => stream,
        Err(err) => {
            error!(%err, "no audio output device");
            run_degraded(cmd_rx, event_tx);
            return;
        }
    };
    // rodio logs to stderr when OutputStream is dropped; noisy for an app
    stream.log_on_drop(false);

    let mut worker = Worker {
        stream,
        event_tx: event_tx.clone(),
        sink: None,
        current: None,
        token: 0,
        paused: true,
        started_at: None,
        accumulated: Duration::ZERO,
        volume: Volume::default(),
    };

    loop {
        match cmd_rx.recv_timeout(progress_interval) {
            Ok(EngineCmd::Shutdown) => {
                worker.stop();
                break;
            }
            Ok(cmd) => worker.handle(cmd),
            Err(RecvTimeoutError::Timeout) => worker.tick(),
            Err(RecvTimeoutError::Disconnected) => break,
        }
    }
}

/// Fallback loop when no output device exists: every load fails loudly
/// instead of the engine pretending to play.
fn run_degraded(cmd_rx: &Receiver<EngineCmd>, event_tx: &Sender<EngineEvent>) {
    while let Ok(cmd) = cmd_rx.recv() {
        match cmd {
            EngineCmd::Load { token, .. } => {
                let _ = event_tx.try_send(EngineEvent::Error {
                    token,
                    kind: EngineErrorKind::Decode,
                    message: "no audio output device".to_string(),
                });
            }
            EngineCmd::Shutdown => break,
            _ => {}
        }
    }
}

/// Worker-thread state: the output stream, at most one sink, and the timing
/// bookkeeping for the loaded track.
struct Worker {
    stream: OutputStream,
    event_tx: Sender<EngineEvent>,
    sink: Option<Sink>,
    current: Option<LoadedSource>,
    token: LoadToken,
    paused: bool,
    started_at: Option<Instant>,
    accumulated: Duration,
    volume: Volume,
}

impl Worker {
    fn handle(&mut self, cmd: EngineCmd) {
        match cmd {
            EngineCmd::Load { audio, token } => self.load(&audio, token),
            EngineCmd::Play => self.play(),
            EngineCmd::Pause => self.pause(),
            EngineCmd::Seek(position) => self.seek(position),
            EngineCmd::SetVolume(level) => self.set_volume(level),
            EngineCmd::Stop | EngineCmd::Shutdown => self.stop(),
        }
    }

    fn emit(&self, event: EngineEvent) {
        if self.event_tx.try_send(event).is_err() {
            // the consumer stopped pumping; dropping is the only option that
            // cannot deadlock the audio thread
            warn!("engine event channel full, dropping event");
        }
    }

    fn load(&mut self, audio: &AudioRef, token: LoadToken) {
        if let Some(sink) = self.sink.take() {
            sink.stop();
        }
        self.token = token;
        self.paused = true;
        self.started_at = None;
        self.accumulated = Duration::ZERO;
        self.current = None;

        let bytes = match read_audio_bytes(audio) {
            Ok(bytes) => bytes,
            Err((kind, message)) => {
                self.emit(EngineEvent::Error {
                    token,
                    kind,
                    message,
                });
                return;
            }
        };

        match self.build_sink(&bytes, Duration::ZERO) {
            Ok((sink, total)) => {
                debug!(token, total_secs = total.map(|d| d.as_secs()), "track loaded");
                self.sink = Some(sink);
                self.current = Some(LoadedSource { bytes, total });
                if let Some(duration) = total {
                    self.emit(EngineEvent::DurationKnown { token, duration });
                }
            }
            Err(message) => {
                self.emit(EngineEvent::Error {
                    token,
                    kind: EngineErrorKind::Decode,
                    message,
                });
            }
        }
    }

    /// Decode the cached bytes into a fresh paused sink starting at
    /// `start_at`. Rebuilding is also our seeking primitive.
    fn build_sink(
        &self,
        bytes: &SharedBytes,
        start_at: Duration,
    ) -> Result<(Sink, Option<Duration>), String> {
        let decoder = Decoder::new(Cursor::new(bytes.clone()))
            .map_err(|err| format!("failed to decode audio: {}", err))?;
        let total = decoder.total_duration();
        let source = decoder.skip_duration(start_at);

        let sink = Sink::connect_new(self.stream.mixer());
        sink.append(source);
        sink.pause();
        sink.set_volume(self.volume.amplitude());
        Ok((sink, total))
    }

    fn play(&mut self) {
        if self.sink.is_none() {
            // drained or never built; replay from the cached bytes
            let Some(current) = self.current.clone() else {
                return;
            };
            match self.build_sink(&current.bytes, Duration::ZERO) {
                Ok((sink, _)) => {
                    self.sink = Some(sink);
                    self.accumulated = Duration::ZERO;
                }
                Err(message) => {
                    self.emit(EngineEvent::Error {
                        token: self.token,
                        kind: EngineErrorKind::Decode,
                        message,
                    });
                    return;
                }
            }
        }

        if let Some(sink) = &self.sink {
            sink.play();
            if self.paused {
                self.started_at = Some(Instant::now());
                self.paused = false;
            }
        }
    }

    fn pause(&mut self) {
        if let Some(sink) = &self.sink {
            sink.pause();
            if !self.paused {
                if let Some(started) = self.started_at.take() {
                    self.accumulated += started.elapsed();
                }
                self.paused = true;
            }
        }
    }

    fn seek(&mut self, position: Duration) {
        let Some(current) = self.current.clone() else {
            return;
        };

        // clamp rather than reject out-of-range targets
        let target = match current.total {
            Some(total) => position.min(total),
            None => position,
        };

        if let Some(sink) = self.sink.take() {
            sink.stop();
        }

        match self.build_sink(&current.bytes, target) {
            Ok((sink, _)) => {
                if self.paused {
                    self.started_at = None;
                } else {
                    sink.play();
                    self.started_at = Some(Instant::now());
                }
                self.sink = Some(sink);
                self.accumulated = target;
                self.emit(EngineEvent::TimeUpdate {
                    token: self.token,
                    position: target,
                });
            }
            Err(message) => {
                self.paused = true;
                self.started_at = None;
                self.emit(EngineEvent::Error {
                    token: self.token,
                    kind: EngineErrorKind::Decode,
                    message,
                });
            }
        }
    }

    fn set_volume(&mut self, level: f32) {
        self.volume.set_level(level);
        if let Some(sink) = &self.sink {
            sink.set_volume(self.volume.amplitude());
        }
    }

    fn stop(&mut self) {
        if let Some(sink) = self.sink.take() {
            sink.stop();
        }
        self.current = None;
        self.paused = true;
        self.started_at = None;
        self.accumulated = Duration::ZERO;
    }

    fn elapsed(&self) -> Duration {
        self.accumulated
            + self
                .started_at
                .map_or(Duration::ZERO, |started| started.elapsed())
    }

    /// Periodic check while idle on the command channel: report progress, or
    /// the end of the track once the sink drains.
    fn tick(&mut self) {
        let Some(sink) = &self.sink else {
            return;
        };
        if self.paused {
            return;
        }

        if sink.empty() {
            if let Some(started) = self.started_at.take() {
                self.accumulated += started.elapsed();
            }
            self.paused = true;
            self.sink = None;
            debug!(token = self.token, "track drained");
            self.emit(EngineEvent::Ended { token: self.token });
        } else {
            self.emit(EngineEvent::TimeUpdate {
                token: self.token,
                position: self.elapsed(),
            });
        }
    }
}

fn read_audio_bytes(audio: &AudioRef) -> Result<SharedBytes, (EngineErrorKind, String)> {
    match audio {
        AudioRef::Local(path) => std::fs::read(path)
            .map(|bytes| SharedBytes(Arc::new(bytes)))
            .map_err(|err| {
                (
                    EngineErrorKind::Decode,
                    format!("failed to open {}: {}", path.display(), err),
                )
            }),
        AudioRef::Remote(url) => crate::fetch::fetch_bytes(url)
            .map(|bytes| SharedBytes(Arc::new(bytes)))
            .map_err(|message| (EngineErrorKind::Network, message)),
    }
}
