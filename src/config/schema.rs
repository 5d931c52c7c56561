use serde::Deserialize;

/// Top-level application settings loaded from `config.toml`.
///
/// File format: TOML
/// Default path (Linux/XDG): `$XDG_CONFIG_HOME/deck/config.toml` or `~/.config/deck/config.toml`
///
/// Precedence (highest wins):
/// 1) Environment variables (prefix `DECK__`, `__` as nested separator)
/// 2) Config file (if present)
/// 3) Struct defaults
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub playback: PlaybackSettings,
    pub controls: ControlsSettings,
    pub ui: UiSettings,
    pub media: MediaSettings,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            playback: PlaybackSettings::default(),
            controls: ControlsSettings::default(),
            ui: UiSettings::default(),
            media: MediaSettings::default(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct PlaybackSettings {
    /// Volume every deck starts with, in [0, 1].
    pub initial_volume: f32,
    /// Whether the first deck requests playback right after mounting.
    /// Start requests the host refuses are logged and swallowed.
    pub autoplay: bool,
}

impl Default for PlaybackSettings {
    fn default() -> Self {
        Self {
            initial_volume: 0.7,
            autoplay: false,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ControlsSettings {
    /// Volume change applied per `-` / `+` press, in (0, 1].
    pub volume_step: f32,
    /// Playhead jump applied per `H` / `L` press, as a percentage of the
    /// track duration.
    pub seek_step_percent: u8,
}

impl Default for ControlsSettings {
    fn default() -> Self {
        Self {
            volume_step: 0.1,
            seek_step_percent: 5,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct UiSettings {
    /// The text rendered inside the top header box.
    pub header_text: String,
    /// Whether deck panes render the cover block.
    pub show_cover: bool,
}

impl Default for UiSettings {
    fn default() -> Self {
        Self {
            header_text: " ~ deck: albums, side by side ~ ".to_string(),
            show_cover: true,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct MediaSettings {
    /// Fade-out duration when quitting (milliseconds).
    /// Set to 0 to stop immediately.
    pub quit_fade_out_ms: u64,
    /// Cadence of playhead updates from the audio thread (milliseconds).
    pub tick_ms: u64,
}

impl Default for MediaSettings {
    fn default() -> Self {
        Self {
            quit_fade_out_ms: 500,
            tick_ms: 200,
        }
    }
}
