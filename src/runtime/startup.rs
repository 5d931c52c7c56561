use std::path::Path;

use tracing::info;

use crate::config::Settings;
use crate::media::AudioElement;
use crate::player::PlayerController;
use crate::playlist::{self, PlaylistError};

pub type Deck = PlayerController<AudioElement>;

/// Build one deck per album: manifest files declare albums explicitly,
/// directories mount as a single scanned album.
pub fn mount_decks(source: &Path, settings: &Settings) -> Result<Vec<Deck>, PlaylistError> {
    let albums = if source.is_dir() {
        vec![("deck-1".to_string(), playlist::scan_album(source)?)]
    } else {
        playlist::load_manifest(source)?
    };

    let decks = albums
        .into_iter()
        .map(|(label, album)| {
            info!(
                "[{label}] mounting {:?} ({} tracks)",
                album.title(),
                album.len()
            );
            let element = AudioElement::new(settings.media.clone());
            PlayerController::new(label, album, element, settings.playback.initial_volume)
        })
        .collect();

    Ok(decks)
}

/// Apply configured startup behavior: optionally request playback on the
/// first deck. A refused start is logged and swallowed like any other.
pub fn apply_playback_defaults(decks: &mut [Deck], settings: &Settings) {
    if settings.playback.autoplay {
        if let Some(deck) = decks.first_mut() {
            deck.play();
        }
    }
}
