use std::path::PathBuf;

use thiserror::Error;

/// One playable item: title, source location, and the pre-formatted
/// duration label shown until the real duration has been decoded.
#[derive(Clone, Debug)]
pub struct Track {
    pub title: String,
    pub source: PathBuf,
    pub duration_label: String,
}

/// The ordered set of tracks bound to one deck. Immutable after
/// construction and never empty.
#[derive(Clone, Debug)]
pub struct Playlist {
    title: String,
    tracks: Vec<Track>,
}

#[derive(Debug, Error)]
pub enum PlaylistError {
    /// Empty albums are rejected at construction; a mounted deck always has
    /// at least one track to cue.
    #[error("album {title:?} has no tracks")]
    Empty { title: String },
    #[error("failed to read album manifest {path}: {reason}")]
    Read { path: String, reason: String },
    #[error("failed to parse album manifest {path}: {reason}")]
    Parse { path: String, reason: String },
    #[error("manifest {path} declares no albums")]
    NoAlbums { path: String },
    #[error("no audio files found under {dir}")]
    NoAudioFiles { dir: String },
}

impl Playlist {
    pub fn new(title: impl Into<String>, tracks: Vec<Track>) -> Result<Self, PlaylistError> {
        let title = title.into();
        if tracks.is_empty() {
            return Err(PlaylistError::Empty { title });
        }
        Ok(Self { title, tracks })
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn len(&self) -> usize {
        self.tracks.len()
    }

    pub fn track(&self, index: usize) -> Option<&Track> {
        self.tracks.get(index)
    }

    pub fn tracks(&self) -> &[Track] {
        &self.tracks
    }
}
