//! Deck playback state and time formatting.

/// Mutable playback state of one deck.
#[derive(Clone, Debug)]
pub struct PlayerState {
    /// Index of the loaded track; always valid for the bound playlist.
    pub current_index: usize,
    /// Whether the deck believes its media element is playing. Updated only
    /// through explicit transitions, never polled.
    pub is_playing: bool,
    /// Volume in [0, 1], mirrored into the media element on every change.
    pub volume: f32,
}

impl PlayerState {
    pub(super) fn new(volume: f32) -> Self {
        Self {
            current_index: 0,
            is_playing: false,
            volume,
        }
    }
}

/// Format a position in seconds as `m:ss`, flooring to whole seconds.
///
/// Minutes are not wrapped into hours: 3661 seconds renders as "61:01".
pub fn format_time(seconds: f64) -> String {
    let total = seconds as u64;
    format!("{}:{:02}", total / 60, total % 60)
}
