//! Caller-side shuffle helper
//!
//! The coordinator is always a plain ordered-list player and has no shuffle
//! concept of its own. Surfaces that offer "play shuffled" randomize the
//! track list here before handing it to `PlayerCoordinator::play_queue`,
//! keeping all randomness at one boundary.

use cadence_core::Track;
use rand::seq::SliceRandom;
use rand::thread_rng;

/// Shuffle tracks in place (Fisher–Yates)
///
/// Each track has equal probability of landing at any position.
pub fn shuffle_tracks(tracks: &mut [Track]) {
    let mut rng = thread_rng();
    tracks.shuffle(&mut rng);
}

#[cfg(test)]
mod tests {
    use super::*;
    use cadence_core::AudioRef;
    use std::collections::HashSet;
    use std::time::Duration;

    fn create_test_track(id: &str) -> Track {
        Track::new(
            id,
            format!("Track {}", id),
            Duration::from_secs(180),
            AudioRef::Remote(format!("https://cdn.example.com/audio/{}.mp3", id)),
        )
    }

    #[test]
    fn shuffle_preserves_all_tracks() {
        let mut tracks: Vec<Track> = (0..10)
            .map(|i| create_test_track(&format!("t{}", i)))
            .collect();

        shuffle_tracks(&mut tracks);

        let ids: HashSet<String> = tracks.iter().map(|t| t.id.clone()).collect();
        assert_eq!(ids.len(), 10);
        for i in 0..10 {
            assert!(ids.contains(&format!("t{}", i)));
        }
    }

    #[test]
    fn shuffle_changes_order() {
        let original: Vec<Track> = (0..20)
            .map(|i| create_test_track(&format!("t{}", i)))
            .collect();
        let mut tracks = original.clone();

        shuffle_tracks(&mut tracks);

        // 20! orderings; a same-order result is astronomically unlikely.
        let before: Vec<&str> = original.iter().map(|t| t.id.as_str()).collect();
        let after: Vec<&str> = tracks.iter().map(|t| t.id.as_str()).collect();
        assert_ne!(before, after);
    }

    #[test]
    fn shuffle_handles_tiny_inputs() {
        let mut empty: Vec<Track> = Vec::new();
        shuffle_tracks(&mut empty);
        assert!(empty.is_empty());

        let mut single = vec![create_test_track("only")];
        shuffle_tracks(&mut single);
        assert_eq!(single[0].id, "only");
    }
}
