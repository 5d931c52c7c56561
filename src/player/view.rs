//! The fixed set of UI read-outs per deck: the controller writes them, the
//! renderer only reads.

/// Glyph shown on the transport play/pause button.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum TransportGlyph {
    Play,
    Pause,
}

impl TransportGlyph {
    pub fn as_str(&self) -> &'static str {
        match self {
            TransportGlyph::Play => "▶",
            TransportGlyph::Pause => "⏸",
        }
    }
}

#[derive(Clone, Debug)]
pub struct PlayerView {
    /// Progress bar fill, 0..=100.
    pub progress_percent: f64,
    /// Elapsed time label, `m:ss`.
    pub elapsed_label: String,
    /// Duration label: the track's pre-formatted label until the decoded
    /// duration is known.
    pub duration_label: String,
    pub transport_glyph: TransportGlyph,
    /// Whether the cover block renders in its "playing" style.
    pub cover_playing: bool,
    /// The single highlighted playlist entry.
    pub active_entry: usize,
    /// Volume read-out, e.g. "70%".
    pub volume_label: String,
}

impl PlayerView {
    pub(super) fn new() -> Self {
        Self {
            progress_percent: 0.0,
            elapsed_label: "0:00".to_string(),
            duration_label: "0:00".to_string(),
            transport_glyph: TransportGlyph::Play,
            cover_playing: false,
            active_entry: 0,
            volume_label: "100%".to_string(),
        }
    }
}
