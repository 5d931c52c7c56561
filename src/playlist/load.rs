use std::path::Path;

use lofty::prelude::{AudioFile, ItemKey, TaggedFileExt};
use serde::Deserialize;
use walkdir::WalkDir;

use crate::player::format_time;

use super::model::{Playlist, PlaylistError, Track};

/// Album manifest file contents.
///
/// ```toml
/// [[album]]
/// title = "First Takes"
/// label = "deck-a"
///
/// [[album.track]]
/// title = "Opener"
/// source = "audio/opener.mp3"
/// duration = "2:16"
/// ```
#[derive(Debug, Deserialize)]
struct Manifest {
    #[serde(default)]
    album: Vec<AlbumEntry>,
}

#[derive(Debug, Deserialize)]
struct AlbumEntry {
    title: String,
    /// Instance label for the mounted deck; tags diagnostics and the pane
    /// title. Defaults to `deck-N`.
    label: Option<String>,
    #[serde(default, rename = "track")]
    tracks: Vec<TrackEntry>,
}

#[derive(Debug, Deserialize)]
struct TrackEntry {
    title: String,
    source: String,
    /// Pre-formatted `m:ss` label shown before the source is decoded.
    duration: String,
}

/// Load every album declared in a TOML manifest. Track sources resolve
/// relative to the manifest's directory.
pub fn load_manifest(path: &Path) -> Result<Vec<(String, Playlist)>, PlaylistError> {
    let text = std::fs::read_to_string(path).map_err(|e| PlaylistError::Read {
        path: path.display().to_string(),
        reason: e.to_string(),
    })?;

    let manifest: Manifest = toml::from_str(&text).map_err(|e| PlaylistError::Parse {
        path: path.display().to_string(),
        reason: e.to_string(),
    })?;

    if manifest.album.is_empty() {
        return Err(PlaylistError::NoAlbums {
            path: path.display().to_string(),
        });
    }

    let base = path.parent().unwrap_or_else(|| Path::new("."));

    let mut albums = Vec::new();
    for (i, entry) in manifest.album.into_iter().enumerate() {
        let label = entry
            .label
            .filter(|l| !l.trim().is_empty())
            .unwrap_or_else(|| format!("deck-{}", i + 1));

        let tracks = entry
            .tracks
            .into_iter()
            .map(|t| Track {
                title: t.title,
                source: base.join(t.source),
                duration_label: t.duration,
            })
            .collect();

        albums.push((label, Playlist::new(entry.title, tracks)?));
    }

    Ok(albums)
}

pub(super) fn is_audio_file(path: &Path) -> bool {
    path.extension()
        .and_then(|s| s.to_str())
        .map(|ext| {
            matches!(
                ext.to_ascii_lowercase().as_str(),
                "mp3" | "flac" | "wav" | "ogg"
            )
        })
        .unwrap_or(false)
}

/// Build a single album from the audio files under `dir`. Track titles and
/// duration labels come from the file tags when available, the file name
/// otherwise.
pub fn scan_album(dir: &Path) -> Result<Playlist, PlaylistError> {
    let mut tracks: Vec<Track> = Vec::new();

    for entry in WalkDir::new(dir)
        .follow_links(true)
        .into_iter()
        .filter_map(Result::ok)
    {
        let path = entry.path();
        if !(path.is_file() && is_audio_file(path)) {
            continue;
        }

        let mut title = path
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or("UNKNOWN")
            .to_string();
        let mut duration_label = "0:00".to_string();

        if let Ok(tagged) = lofty::read_from_path(path) {
            duration_label = format_time(tagged.properties().duration().as_secs_f64());

            if let Some(tag) = tagged.primary_tag().or_else(|| tagged.first_tag()) {
                if let Some(v) = tag.get_string(ItemKey::TrackTitle) {
                    if !v.trim().is_empty() {
                        title = v.to_string();
                    }
                }
            }
        }

        tracks.push(Track {
            title,
            source: path.to_path_buf(),
            duration_label,
        });
    }

    if tracks.is_empty() {
        return Err(PlaylistError::NoAudioFiles {
            dir: dir.display().to_string(),
        });
    }

    tracks.sort_by(|a, b| a.title.to_lowercase().cmp(&b.title.to_lowercase()));

    let album_title = dir
        .file_name()
        .and_then(|s| s.to_str())
        .unwrap_or("Album")
        .to_string();

    Playlist::new(album_title, tracks)
}
