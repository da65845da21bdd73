//! Playback lifecycle integration tests
//!
//! Drives the coordinator end-to-end through a scripted fake engine:
//! auto-advance, end-of-queue behavior, skip semantics, stale-load
//! supersession, and failure handling.

mod common;

use cadence_playback::{
    EngineErrorKind, EngineEvent, PlayerConfig, PlayerCoordinator, PlayerEvent,
};
use common::{new_player, track, tracks, Command, FakeEngine};
use std::time::Duration;

// ===== Auto-advance & End of Queue =====

#[test]
fn finished_track_advances_to_next_and_keeps_playing() {
    let (mut player, engine) = new_player();
    player.play_queue(tracks(&["a", "b", "c"]), 0).unwrap();

    engine.finish_track();
    player.pump();

    let state = player.state();
    assert_eq!(state.current_track.unwrap().id, "b");
    assert!(state.is_playing);
    assert_eq!(state.queue_index, Some(1));
    assert_eq!(engine.load_count(), 2);
}

#[test]
fn end_of_queue_settles_and_does_not_wrap() {
    let (mut player, engine) = new_player();
    player.play_queue(tracks(&["a", "b", "c"]), 2).unwrap();

    engine.resolve_duration(Duration::from_secs(200));
    engine.progress(Duration::from_secs(199));
    engine.finish_track();
    player.pump();

    let state = player.state();
    assert!(!state.is_playing);
    // still on the last item, shown fully elapsed rather than rewound
    assert_eq!(state.current_track.unwrap().id, "c");
    assert_eq!(state.position, Duration::from_secs(200));
    assert_eq!(state.position, state.duration);
    // no reload happened
    assert_eq!(engine.load_count(), 1);
}

#[test]
fn queue_plays_through_to_the_end() {
    let (mut player, engine) = new_player();
    player.play_queue(tracks(&["a", "b", "c"]), 0).unwrap();

    for _ in 0..3 {
        engine.finish_track();
        player.pump();
    }

    let state = player.state();
    assert!(!state.is_playing);
    assert_eq!(state.current_track.unwrap().id, "c");
    assert_eq!(engine.load_count(), 3);
}

// ===== Skip Semantics =====

#[test]
fn play_next_preserves_paused_mode() {
    let (mut player, engine) = new_player();
    player.play_queue(tracks(&["a", "b"]), 0).unwrap();
    assert_eq!(engine.play_count(), 1);

    player.toggle_play();
    assert!(!player.is_playing());

    player.play_next();

    // skipping while paused loads but does not auto-play
    let state = player.state();
    assert_eq!(state.current_track.unwrap().id, "b");
    assert!(!state.is_playing);
    assert_eq!(engine.load_count(), 2);
    assert_eq!(engine.play_count(), 1);
}

#[test]
fn play_next_at_end_of_queue_is_a_noop() {
    let (mut player, engine) = new_player();
    player.play_queue(tracks(&["a", "b"]), 1).unwrap();

    player.play_next();

    let state = player.state();
    assert_eq!(state.current_track.unwrap().id, "b");
    assert!(state.is_playing);
    assert_eq!(engine.load_count(), 1);
}

#[test]
fn play_previous_restarts_when_deep_into_the_track() {
    let (mut player, engine) = new_player();
    player.play_queue(tracks(&["a", "b"]), 1).unwrap();

    engine.progress(Duration::from_secs(30));
    player.pump();

    player.play_previous();

    let state = player.state();
    // past the restart threshold: same track, rewound to the top
    assert_eq!(state.current_track.unwrap().id, "b");
    assert_eq!(state.queue_index, Some(1));
    assert_eq!(state.position, Duration::ZERO);
    assert_eq!(engine.seeks(), vec![Duration::ZERO]);
    assert_eq!(engine.load_count(), 1);
}

#[test]
fn play_previous_retreats_near_the_start() {
    let (mut player, engine) = new_player();
    player.play_queue(tracks(&["a", "b"]), 1).unwrap();

    engine.progress(Duration::from_secs(1));
    player.pump();

    player.play_previous();

    let state = player.state();
    assert_eq!(state.current_track.unwrap().id, "a");
    assert_eq!(state.queue_index, Some(0));
    assert!(state.is_playing);
    assert_eq!(engine.load_count(), 2);
}

#[test]
fn play_previous_on_first_track_restarts_from_zero() {
    let (mut player, engine) = new_player();
    player.play_queue(tracks(&["a", "b"]), 0).unwrap();

    engine.progress(Duration::from_secs(1));
    player.pump();

    player.play_previous();

    let state = player.state();
    assert_eq!(state.current_track.unwrap().id, "a");
    assert_eq!(state.position, Duration::ZERO);
    assert_eq!(engine.load_count(), 1);
}

#[test]
fn restart_threshold_is_configurable() {
    let (engine, handle) = FakeEngine::boxed();
    let config = PlayerConfig {
        restart_threshold: Duration::from_secs(10),
        ..Default::default()
    };
    let mut player = PlayerCoordinator::new(engine, config);
    player.play_queue(tracks(&["a", "b"]), 1).unwrap();

    // 5 seconds in: under the custom threshold, so this retreats
    handle.progress(Duration::from_secs(5));
    player.pump();
    player.play_previous();

    assert_eq!(player.state().current_track.unwrap().id, "a");
}

// ===== Load Supersession =====

#[test]
fn late_events_from_a_superseded_load_are_ignored() {
    let (mut player, engine) = new_player();

    player.play_queue(tracks(&["old-1", "old-2"]), 0).unwrap();
    let stale = engine.last_token();

    player.play_queue(vec![track("new", 240)], 0).unwrap();

    // the first load resolves late, after being superseded
    engine.push(EngineEvent::DurationKnown {
        token: stale,
        duration: Duration::from_secs(1),
    });
    engine.push(EngineEvent::TimeUpdate {
        token: stale,
        position: Duration::from_secs(77),
    });
    engine.push(EngineEvent::Ended { token: stale });
    player.pump();

    let state = player.state();
    assert_eq!(state.current_track.unwrap().id, "new");
    assert_eq!(state.duration, Duration::from_secs(240));
    assert_eq!(state.position, Duration::ZERO);
    assert!(state.is_playing);
}

#[test]
fn rapid_skips_settle_on_the_last_request() {
    let (mut player, engine) = new_player();
    player.play_queue(tracks(&["a", "b", "c", "d"]), 0).unwrap();
    let first = engine.last_token();

    player.play_next();
    player.play_next();
    player.play_next();

    // the very first load reports back only now
    engine.push(EngineEvent::Ended { token: first });
    player.pump();

    let state = player.state();
    assert_eq!(state.current_track.unwrap().id, "d");
    assert!(state.is_playing);
}

// ===== Timeline =====

#[test]
fn engine_duration_overrides_catalog_metadata() {
    let (mut player, engine) = new_player();
    player.play_queue(vec![track("a", 180)], 0).unwrap();
    assert_eq!(player.state().duration, Duration::from_secs(180));

    // the engine observed the real media duration
    engine.resolve_duration(Duration::from_secs(187));
    player.pump();
    assert_eq!(player.state().duration, Duration::from_secs(187));
}

#[test]
fn seek_is_clamped_to_known_duration() {
    let (mut player, engine) = new_player();
    player.play_queue(vec![track("a", 180)], 0).unwrap();

    engine.resolve_duration(Duration::from_secs(100));
    player.pump();

    player.seek_to(Duration::from_secs(500));

    assert_eq!(player.state().position, Duration::from_secs(100));
    assert_eq!(engine.seeks(), vec![Duration::from_secs(100)]);
}

#[test]
fn position_updates_flow_to_subscribers() {
    let (mut player, engine) = new_player();
    player.play_queue(vec![track("a", 180)], 0).unwrap();
    player.drain_events();

    engine.progress(Duration::from_secs(12));
    player.pump();

    let events = player.drain_events();
    assert!(events.iter().any(|e| matches!(
        e,
        PlayerEvent::PositionUpdate { position_ms: 12_000, .. }
    )));
    assert_eq!(player.state().position, Duration::from_secs(12));
}

// ===== Failure Handling =====

#[test]
fn decode_failure_pauses_on_the_failed_track() {
    let (mut player, engine) = new_player();
    player.play_queue(tracks(&["broken", "fine"]), 0).unwrap();
    player.drain_events();

    engine.fail(EngineErrorKind::Decode, "corrupt stream");
    player.pump();

    let state = player.state();
    assert!(!state.is_playing);
    assert_eq!(state.current_track.unwrap().id, "broken");
    assert!(state.last_error.is_some());

    let events = player.drain_events();
    assert!(events.iter().any(|e| matches!(
        e,
        PlayerEvent::PlaybackFailed { track_id: Some(id), .. } if id == "broken"
    )));

    // manual skip past the broken track still works
    player.play_next();
    assert!(player.is_playing());
    assert_eq!(player.state().current_track.unwrap().id, "fine");
    assert!(player.state().last_error.is_none());
}

#[test]
fn stale_failure_from_superseded_load_is_ignored() {
    let (mut player, engine) = new_player();
    player.play_queue(vec![track("a", 180)], 0).unwrap();
    let stale = engine.last_token();

    player.play_queue(vec![track("b", 180)], 0).unwrap();

    engine.push(EngineEvent::Error {
        token: stale,
        kind: EngineErrorKind::Network,
        message: "timed out".into(),
    });
    player.pump();

    let state = player.state();
    assert!(state.is_playing);
    assert!(state.last_error.is_none());
}

// ===== Reset =====

#[test]
fn reset_returns_to_empty_and_silences_the_engine() {
    let (mut player, engine) = new_player();
    player.set_volume(0.7);
    player.play_queue(tracks(&["a", "b", "c"]), 1).unwrap();

    player.reset();

    let state = player.state();
    assert!(state.queue.is_empty());
    assert_eq!(state.queue_index, None);
    assert!(state.current_track.is_none());
    assert!(!state.is_playing);
    assert_eq!(state.volume, 0.7);
    assert!(engine.commands().contains(&Command::Stop));

    // events that were already in flight must not resurrect the old track
    engine.progress(Duration::from_secs(50));
    engine.finish_track();
    player.pump();
    assert_eq!(player.state().position, Duration::ZERO);
    assert!(player.state().current_track.is_none());
}
