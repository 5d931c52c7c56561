use std::collections::VecDeque;

use tracing::warn;

use crate::media::{MediaElement, MediaError, MediaEvent};
use crate::playlist::{Playlist, Track};

use super::model::{PlayerState, format_time};
use super::view::{PlayerView, TransportGlyph};

/// Why a play request was issued. Outcomes are matched FIFO against
/// `PlayResolved` events.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
enum PlayIntent {
    /// Explicit start: success flips the deck to playing.
    Start,
    /// Continuation after a track switch while already playing: success
    /// changes nothing, failure is logged and swallowed without resetting
    /// `is_playing`.
    Continue,
}

/// Owns the playback state for one playlist and mediates between user
/// intent and the media element.
///
/// Every mutation of [`PlayerState`] goes through these methods; the UI
/// reads [`PlayerView`] and never reaches into state directly. Instances
/// are fully isolated from each other.
pub struct PlayerController<M: MediaElement> {
    label: String,
    playlist: Playlist,
    state: PlayerState,
    view: PlayerView,
    media: M,
    pending_plays: VecDeque<PlayIntent>,
}

impl<M: MediaElement> PlayerController<M> {
    /// Mount a deck: bind the playlist, mirror the initial volume into the
    /// element and cue the first track.
    pub fn new(
        label: impl Into<String>,
        playlist: Playlist,
        media: M,
        initial_volume: f32,
    ) -> Self {
        let mut controller = Self {
            label: label.into(),
            playlist,
            state: PlayerState::new(0.0),
            view: PlayerView::new(),
            media,
            pending_plays: VecDeque::new(),
        };
        controller.set_volume(initial_volume);
        controller.load(0);
        controller
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn playlist(&self) -> &Playlist {
        &self.playlist
    }

    pub fn state(&self) -> &PlayerState {
        &self.state
    }

    pub fn view(&self) -> &PlayerView {
        &self.view
    }

    pub fn media(&self) -> &M {
        &self.media
    }

    pub fn media_mut(&mut self) -> &mut M {
        &mut self.media
    }

    /// The loaded track. `current_index` is kept in bounds by `load`, and
    /// playlists are never empty.
    pub fn current_track(&self) -> &Track {
        &self.playlist.tracks()[self.state.current_index]
    }

    /// Cue the track at `index`; out-of-bounds indices are ignored.
    ///
    /// Resets the progress read-outs to zero and the duration label to the
    /// track's pre-formatted value, and marks the entry active. Does not
    /// itself change the play/pause state: a playing deck issues a
    /// continuation play request on the new source.
    pub fn load(&mut self, index: usize) {
        let Some(track) = self.playlist.track(index) else {
            return;
        };

        self.state.current_index = index;
        self.media.set_source(&track.source);

        self.view.progress_percent = 0.0;
        self.view.elapsed_label = "0:00".to_string();
        self.view.duration_label = track.duration_label.clone();
        self.view.active_entry = index;

        if self.state.is_playing {
            self.request_play(PlayIntent::Continue);
        }
    }

    /// Request playback of the loaded track. The deck flips to playing only
    /// once the element reports that the start succeeded.
    pub fn play(&mut self) {
        self.request_play(PlayIntent::Start);
    }

    /// Pause. Always succeeds, regardless of prior state.
    pub fn pause(&mut self) {
        self.media.pause();
        self.state.is_playing = false;
        self.view.transport_glyph = TransportGlyph::Play;
        self.view.cover_playing = false;
    }

    /// Transport button: pause when playing, otherwise request playback.
    pub fn toggle(&mut self) {
        if self.state.is_playing {
            self.pause();
        } else {
            self.play();
        }
    }

    /// Skip to the next track, wrapping at the end of the playlist.
    pub fn next(&mut self) {
        let next = (self.state.current_index + 1) % self.playlist.len();
        self.load(next);
        if self.state.is_playing {
            self.play();
        }
    }

    /// Skip to the previous track, wrapping at the start of the playlist.
    pub fn previous(&mut self) {
        let len = self.playlist.len();
        let prev = (self.state.current_index + len - 1) % len;
        self.load(prev);
        if self.state.is_playing {
            self.play();
        }
    }

    /// Playlist entry activation: always starts playback, it never merely
    /// cues the track.
    pub fn select(&mut self, index: usize) {
        self.load(index);
        self.play();
    }

    /// Move the playhead to `fraction` of the duration. A no-op until the
    /// duration is known; out-of-range fractions are left to the element to
    /// clamp.
    pub fn seek(&mut self, fraction: f64) {
        if let Some(duration) = self.media.duration().filter(|d| *d > 0.0) {
            self.media.seek_to(fraction * duration);
        }
    }

    /// Set the volume, clamped to [0, 1], mirror it into the element and
    /// refresh the percent label.
    pub fn set_volume(&mut self, volume: f32) {
        let volume = volume.clamp(0.0, 1.0);
        self.state.volume = volume;
        self.media.set_volume(volume);
        self.view.volume_label = format!("{}%", (volume * 100.0).round() as u32);
    }

    /// Drain and apply the element's pending notifications.
    pub fn poll_media(&mut self) {
        for event in self.media.poll_events() {
            match event {
                MediaEvent::TimeUpdate => self.on_time_update(),
                MediaEvent::MetadataLoaded => self.on_metadata_loaded(),
                MediaEvent::Ended => self.on_ended(),
                MediaEvent::PlayResolved(outcome) => self.on_play_resolved(outcome),
            }
        }
    }

    /// Refresh the progress fill and both time labels from the element's
    /// playhead. Skipped while the duration is unknown or zero.
    pub fn on_time_update(&mut self) {
        let Some(duration) = self.media.duration().filter(|d| *d > 0.0) else {
            return;
        };
        let position = self.media.position();

        self.view.progress_percent = position / duration * 100.0;
        self.view.elapsed_label = format_time(position);
        self.view.duration_label = format_time(duration);
    }

    /// Replace the pre-formatted duration label once the decoded duration
    /// is known. The manifest label may be wrong or stale; the decoder
    /// wins.
    pub fn on_metadata_loaded(&mut self) {
        if let Some(duration) = self.media.duration() {
            self.view.duration_label = format_time(duration);
        }
    }

    /// End of track: continuous playback advances to the next entry,
    /// wrapping from the last track back to the first.
    pub fn on_ended(&mut self) {
        self.next();
    }

    fn request_play(&mut self, intent: PlayIntent) {
        self.pending_plays.push_back(intent);
        self.media.request_play();
    }

    fn on_play_resolved(&mut self, outcome: Result<(), MediaError>) {
        let intent = self.pending_plays.pop_front().unwrap_or(PlayIntent::Start);

        match outcome {
            Ok(()) => {
                if intent == PlayIntent::Start {
                    self.state.is_playing = true;
                    self.view.transport_glyph = TransportGlyph::Pause;
                    self.view.cover_playing = true;
                }
            }
            Err(e) => {
                // No retry, no user-facing message, no state rollback: the
                // failure only reaches the diagnostic log.
                warn!("[{}] failed to start playback: {e}", self.label);
            }
        }
    }
}
