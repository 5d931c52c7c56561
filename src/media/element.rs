use std::path::Path;

use thiserror::Error;

use super::types::MediaEvent;

/// Playback backend contract consumed by the deck controller.
///
/// This mirrors the surface of a host media element: assign a source, issue
/// transport commands, read the playhead, read a duration that becomes
/// available asynchronously, and drain status notifications.
///
/// `request_play` is fire-and-forget; its outcome arrives later as
/// [`MediaEvent::PlayResolved`]. `pause` is synchronous and cannot fail.
/// `seek_to` accepts any target; the element clamps to the playable range.
pub trait MediaElement {
    fn set_source(&mut self, source: &Path);
    fn request_play(&mut self);
    fn pause(&mut self);
    /// Current playhead position in seconds.
    fn position(&self) -> f64;
    fn seek_to(&mut self, seconds: f64);
    /// Decoded duration in seconds, once metadata is available.
    fn duration(&self) -> Option<f64>;
    fn set_volume(&mut self, volume: f32);
    /// Drain pending notifications, oldest first.
    fn poll_events(&mut self) -> Vec<MediaEvent>;
}

/// The single failure class of the player: a playback start request that
/// could not be satisfied.
#[derive(Debug, Error)]
pub enum MediaError {
    #[error("no source assigned")]
    NoSource,
    #[error("failed to open {uri}: {reason}")]
    Open { uri: String, reason: String },
    #[error("failed to decode {uri}: {reason}")]
    Decode { uri: String, reason: String },
    #[error("no audio output device available")]
    NoDevice,
}
