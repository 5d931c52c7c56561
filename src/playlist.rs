//! Playlist model and loading.
//!
//! A `Playlist` is the ordered, immutable set of tracks bound to one deck.
//! Playlists come from an album manifest (TOML) or from scanning a
//! directory of audio files.

mod load;
mod model;

pub use load::{load_manifest, scan_album};
pub use model::{Playlist, PlaylistError, Track};

#[cfg(test)]
mod tests;
