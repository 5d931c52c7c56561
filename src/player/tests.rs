use std::path::{Path, PathBuf};

use super::*;
use crate::media::{MediaElement, MediaError, MediaEvent};
use crate::playlist::{Playlist, Track};

/// Scripted media element: records commands and resolves play requests per
/// the configured outcome as soon as the controller polls.
struct FakeElement {
    source: Option<PathBuf>,
    position: f64,
    duration: Option<f64>,
    volume: f32,
    playing: bool,
    fail_plays: bool,
    play_requests: usize,
    events: Vec<MediaEvent>,
}

impl FakeElement {
    fn new() -> Self {
        Self {
            source: None,
            position: 0.0,
            duration: None,
            volume: 1.0,
            playing: false,
            fail_plays: false,
            play_requests: 0,
            events: Vec::new(),
        }
    }

    fn with_duration(duration: f64) -> Self {
        let mut element = Self::new();
        element.duration = Some(duration);
        element
    }
}

impl MediaElement for FakeElement {
    fn set_source(&mut self, source: &Path) {
        self.source = Some(source.to_path_buf());
        self.position = 0.0;
        self.playing = false;
    }

    fn request_play(&mut self) {
        self.play_requests += 1;
        if self.fail_plays {
            self.events.push(MediaEvent::PlayResolved(Err(MediaError::Open {
                uri: "fake".to_string(),
                reason: "start blocked".to_string(),
            })));
        } else {
            self.playing = true;
            self.events.push(MediaEvent::PlayResolved(Ok(())));
        }
    }

    fn pause(&mut self) {
        self.playing = false;
    }

    fn position(&self) -> f64 {
        self.position
    }

    fn seek_to(&mut self, seconds: f64) {
        let cap = self.duration.unwrap_or(0.0);
        self.position = seconds.clamp(0.0, cap);
    }

    fn duration(&self) -> Option<f64> {
        self.duration
    }

    fn set_volume(&mut self, volume: f32) {
        self.volume = volume;
    }

    fn poll_events(&mut self) -> Vec<MediaEvent> {
        std::mem::take(&mut self.events)
    }
}

fn track(title: &str) -> Track {
    Track {
        title: title.to_string(),
        source: PathBuf::from(format!("/music/{title}.mp3")),
        duration_label: "2:16".to_string(),
    }
}

fn playlist(len: usize) -> Playlist {
    let tracks = (0..len).map(|i| track(&format!("track-{i}"))).collect();
    Playlist::new("Test Album", tracks).unwrap()
}

fn deck(len: usize) -> PlayerController<FakeElement> {
    PlayerController::new("deck-test", playlist(len), FakeElement::new(), 0.7)
}

#[test]
fn format_time_floors_and_never_wraps_into_hours() {
    assert_eq!(format_time(0.0), "0:00");
    assert_eq!(format_time(65.0), "1:05");
    assert_eq!(format_time(65.9), "1:05");
    assert_eq!(format_time(3661.0), "61:01");
}

#[test]
fn mounting_cues_the_first_track_paused() {
    let deck = deck(3);
    assert_eq!(deck.state().current_index, 0);
    assert!(!deck.state().is_playing);
    assert_eq!(deck.view().active_entry, 0);
    assert_eq!(deck.view().transport_glyph, TransportGlyph::Play);
    assert_eq!(deck.view().volume_label, "70%");
    assert!(
        deck.media()
            .source
            .as_ref()
            .unwrap()
            .ends_with("track-0.mp3")
    );
}

#[test]
fn load_sets_index_and_resets_readouts() {
    let mut deck = deck(3);
    deck.load(1);

    assert_eq!(deck.state().current_index, 1);
    assert_eq!(deck.view().active_entry, 1);
    assert_eq!(deck.view().progress_percent, 0.0);
    assert_eq!(deck.view().elapsed_label, "0:00");
    assert_eq!(deck.view().duration_label, "2:16");
    assert!(
        deck.media()
            .source
            .as_ref()
            .unwrap()
            .ends_with("track-1.mp3")
    );
}

#[test]
fn load_out_of_bounds_leaves_state_unchanged() {
    let mut deck = deck(3);
    deck.load(1);
    deck.load(3);
    deck.load(usize::MAX);

    assert_eq!(deck.state().current_index, 1);
    assert_eq!(deck.view().active_entry, 1);
}

#[test]
fn next_composed_len_times_closes_the_loop() {
    let mut deck = deck(4);
    for _ in 0..4 {
        deck.next();
    }
    assert_eq!(deck.state().current_index, 0);
}

#[test]
fn previous_composed_len_times_closes_the_loop() {
    let mut deck = deck(4);
    for _ in 0..4 {
        deck.previous();
    }
    assert_eq!(deck.state().current_index, 0);
}

#[test]
fn previous_wraps_to_the_last_track() {
    let mut deck = deck(3);
    deck.previous();
    assert_eq!(deck.state().current_index, 2);
}

#[test]
fn play_flips_to_playing_only_once_resolved() {
    let mut deck = deck(3);
    deck.play();
    assert!(!deck.state().is_playing);

    deck.poll_media();
    assert!(deck.state().is_playing);
    assert_eq!(deck.view().transport_glyph, TransportGlyph::Pause);
    assert!(deck.view().cover_playing);
}

#[test]
fn play_failure_is_swallowed_and_leaves_the_deck_paused() {
    let mut deck = deck(3);
    deck.media_mut().fail_plays = true;

    deck.play();
    deck.poll_media();

    assert!(!deck.state().is_playing);
    assert_eq!(deck.view().transport_glyph, TransportGlyph::Play);
    assert!(!deck.view().cover_playing);
}

#[test]
fn pause_always_leaves_is_playing_false() {
    let mut deck = deck(3);
    deck.pause();
    assert!(!deck.state().is_playing);

    deck.play();
    deck.poll_media();
    assert!(deck.state().is_playing);

    deck.pause();
    assert!(!deck.state().is_playing);
    assert_eq!(deck.view().transport_glyph, TransportGlyph::Play);
    assert!(!deck.view().cover_playing);
}

#[test]
fn toggle_alternates_between_playing_and_paused() {
    let mut deck = deck(3);
    deck.toggle();
    deck.poll_media();
    assert!(deck.state().is_playing);

    deck.toggle();
    assert!(!deck.state().is_playing);
}

#[test]
fn track_switch_while_playing_keeps_claiming_playing_on_failure() {
    let mut deck = deck(3);
    deck.play();
    deck.poll_media();
    assert!(deck.state().is_playing);

    // The new source refuses to start; the widget keeps its playing flag.
    deck.media_mut().fail_plays = true;
    deck.next();
    deck.poll_media();

    assert_eq!(deck.state().current_index, 1);
    assert!(deck.state().is_playing);
    assert_eq!(deck.view().transport_glyph, TransportGlyph::Pause);
}

#[test]
fn next_while_playing_issues_continuation_and_start_requests() {
    let mut deck = deck(3);
    deck.play();
    deck.poll_media();
    assert_eq!(deck.media().play_requests, 1);

    deck.next();
    assert_eq!(deck.media().play_requests, 3);
    deck.poll_media();
    assert!(deck.state().is_playing);
}

#[test]
fn next_while_paused_does_not_request_playback() {
    let mut deck = deck(3);
    deck.next();
    assert_eq!(deck.media().play_requests, 0);
    assert!(!deck.state().is_playing);
}

#[test]
fn select_always_starts_playback() {
    let mut deck = deck(3);
    deck.select(2);
    deck.poll_media();

    assert_eq!(deck.state().current_index, 2);
    assert!(deck.state().is_playing);
}

#[test]
fn on_ended_advances_with_wraparound() {
    let mut deck = deck(3);
    deck.on_ended();
    deck.on_ended();
    assert_eq!(deck.state().current_index, 2);

    deck.on_ended();
    assert_eq!(deck.state().current_index, 0);
}

#[test]
fn seek_half_of_a_known_duration() {
    let mut deck =
        PlayerController::new("deck-test", playlist(3), FakeElement::with_duration(120.0), 0.7);
    deck.seek(0.5);
    assert_eq!(deck.media().position, 60.0);
}

#[test]
fn seek_without_duration_is_a_no_op() {
    let mut deck = deck(3);
    deck.seek(0.5);
    assert_eq!(deck.media().position, 0.0);
}

#[test]
fn set_volume_updates_element_and_percent_label() {
    let mut deck = deck(3);

    deck.set_volume(0.7);
    assert_eq!(deck.view().volume_label, "70%");
    assert_eq!(deck.media().volume, 0.7);

    deck.set_volume(0.0);
    assert_eq!(deck.view().volume_label, "0%");

    deck.set_volume(1.0);
    assert_eq!(deck.view().volume_label, "100%");
}

#[test]
fn set_volume_clamps_out_of_range_values() {
    let mut deck = deck(3);

    deck.set_volume(1.5);
    assert_eq!(deck.state().volume, 1.0);
    assert_eq!(deck.view().volume_label, "100%");

    deck.set_volume(-0.3);
    assert_eq!(deck.state().volume, 0.0);
    assert_eq!(deck.view().volume_label, "0%");
}

#[test]
fn time_update_refreshes_progress_and_labels() {
    let mut deck = deck(3);
    deck.media_mut().duration = Some(120.0);
    deck.media_mut().position = 30.0;

    deck.on_time_update();

    assert_eq!(deck.view().progress_percent, 25.0);
    assert_eq!(deck.view().elapsed_label, "0:30");
    assert_eq!(deck.view().duration_label, "2:00");
}

#[test]
fn time_update_without_duration_changes_nothing() {
    let mut deck = deck(3);
    deck.media_mut().position = 30.0;

    deck.on_time_update();

    assert_eq!(deck.view().progress_percent, 0.0);
    assert_eq!(deck.view().elapsed_label, "0:00");
    assert_eq!(deck.view().duration_label, "2:16");
}

#[test]
fn metadata_overwrites_the_preformatted_duration_label() {
    let mut deck = deck(3);
    assert_eq!(deck.view().duration_label, "2:16");

    // The manifest label was stale; the decoded duration wins.
    deck.media_mut().duration = Some(140.0);
    deck.on_metadata_loaded();
    assert_eq!(deck.view().duration_label, "2:20");
}

#[test]
fn decks_are_fully_isolated() {
    let mut left = deck(3);
    let mut right =
        PlayerController::new("deck-right", playlist(2), FakeElement::new(), 0.4);

    left.play();
    left.poll_media();
    left.next();

    assert!(left.state().is_playing);
    assert_eq!(left.state().current_index, 1);

    assert!(!right.state().is_playing);
    assert_eq!(right.state().current_index, 0);
    assert_eq!(right.view().volume_label, "40%");

    right.select(1);
    right.poll_media();
    assert_eq!(left.state().current_index, 1);
    assert!(right.state().is_playing);
}

#[test]
fn ended_event_from_the_element_chains_to_the_next_track() {
    let mut deck = deck(3);
    deck.play();
    deck.poll_media();

    deck.media_mut().events.push(MediaEvent::Ended);
    deck.poll_media();

    assert_eq!(deck.state().current_index, 1);
    // The re-entered play attempt settles on the following poll.
    deck.poll_media();
    assert!(deck.state().is_playing);
}
