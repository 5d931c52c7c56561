use std::fs;
use std::path::{Path, PathBuf};

use tempfile::tempdir;

use super::*;

fn t(title: &str) -> Track {
    Track {
        title: title.into(),
        source: PathBuf::from(format!("/music/{title}.mp3")),
        duration_label: "1:00".into(),
    }
}

#[test]
fn playlist_rejects_empty_track_lists() {
    let err = Playlist::new("Empty Album", Vec::new()).unwrap_err();
    assert!(matches!(err, PlaylistError::Empty { ref title } if title == "Empty Album"));
}

#[test]
fn playlist_keeps_track_order_and_bounds() {
    let playlist = Playlist::new("Album", vec![t("a"), t("b"), t("c")]).unwrap();
    assert_eq!(playlist.len(), 3);
    assert_eq!(playlist.track(0).unwrap().title, "a");
    assert_eq!(playlist.track(2).unwrap().title, "c");
    assert!(playlist.track(3).is_none());
}

#[test]
fn load_manifest_resolves_sources_relative_to_manifest_dir() {
    let dir = tempdir().unwrap();
    let manifest = dir.path().join("albums.toml");
    fs::write(
        &manifest,
        r#"
[[album]]
title = "First Takes"
label = "left"

[[album.track]]
title = "Opener"
source = "audio/opener.mp3"
duration = "2:16"

[[album.track]]
title = "Closer"
source = "audio/closer.mp3"
duration = "1:53"

[[album]]
title = "Second Takes"

[[album.track]]
title = "Only One"
source = "only.mp3"
duration = "2:04"
"#,
    )
    .unwrap();

    let albums = load_manifest(&manifest).unwrap();
    assert_eq!(albums.len(), 2);

    let (label, playlist) = &albums[0];
    assert_eq!(label, "left");
    assert_eq!(playlist.title(), "First Takes");
    assert_eq!(playlist.len(), 2);
    assert_eq!(
        playlist.track(0).unwrap().source,
        dir.path().join("audio/opener.mp3")
    );
    assert_eq!(playlist.track(0).unwrap().duration_label, "2:16");

    // Unlabeled albums get positional labels.
    let (label, playlist) = &albums[1];
    assert_eq!(label, "deck-2");
    assert_eq!(playlist.len(), 1);
}

#[test]
fn load_manifest_rejects_albums_without_tracks() {
    let dir = tempdir().unwrap();
    let manifest = dir.path().join("albums.toml");
    fs::write(
        &manifest,
        r#"
[[album]]
title = "Hollow"
"#,
    )
    .unwrap();

    let err = load_manifest(&manifest).unwrap_err();
    assert!(matches!(err, PlaylistError::Empty { ref title } if title == "Hollow"));
}

#[test]
fn load_manifest_rejects_empty_manifests() {
    let dir = tempdir().unwrap();
    let manifest = dir.path().join("albums.toml");
    fs::write(&manifest, "").unwrap();

    let err = load_manifest(&manifest).unwrap_err();
    assert!(matches!(err, PlaylistError::NoAlbums { .. }));
}

#[test]
fn load_manifest_reports_missing_and_malformed_files() {
    let dir = tempdir().unwrap();

    let missing = dir.path().join("nope.toml");
    assert!(matches!(
        load_manifest(&missing).unwrap_err(),
        PlaylistError::Read { .. }
    ));

    let broken = dir.path().join("broken.toml");
    fs::write(&broken, "[[album]\ntitle = ").unwrap();
    assert!(matches!(
        load_manifest(&broken).unwrap_err(),
        PlaylistError::Parse { .. }
    ));
}

#[test]
fn scan_album_filters_non_audio_and_sorts_by_title() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join("b.MP3"), b"not a real mp3").unwrap();
    fs::write(dir.path().join("A.ogg"), b"not a real ogg").unwrap();
    fs::write(dir.path().join("c.txt"), b"ignore me").unwrap();

    let playlist = scan_album(dir.path()).unwrap();
    assert_eq!(playlist.len(), 2);
    assert_eq!(playlist.track(0).unwrap().title, "A");
    assert_eq!(playlist.track(1).unwrap().title, "b");
    // Untagged files keep the zero label until the element decodes them.
    assert_eq!(playlist.track(0).unwrap().duration_label, "0:00");
}

#[test]
fn scan_album_fails_on_directories_without_audio() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join("readme.txt"), b"no music here").unwrap();

    let err = scan_album(dir.path()).unwrap_err();
    assert!(matches!(err, PlaylistError::NoAudioFiles { .. }));
}

#[test]
fn scan_album_titles_the_playlist_after_the_directory() {
    let dir = tempdir().unwrap();
    let album_dir = dir.path().join("Live Sessions");
    fs::create_dir_all(&album_dir).unwrap();
    fs::write(album_dir.join("one.wav"), b"not real").unwrap();

    let playlist = scan_album(&album_dir).unwrap();
    assert_eq!(playlist.title(), "Live Sessions");
}

#[test]
fn is_audio_file_matches_known_extensions_case_insensitive() {
    assert!(load::is_audio_file(Path::new("/tmp/a.mp3")));
    assert!(load::is_audio_file(Path::new("/tmp/a.MP3")));
    assert!(load::is_audio_file(Path::new("/tmp/a.flac")));
    assert!(load::is_audio_file(Path::new("/tmp/a.wav")));
    assert!(load::is_audio_file(Path::new("/tmp/a.ogg")));
    assert!(!load::is_audio_file(Path::new("/tmp/a.txt")));
    assert!(!load::is_audio_file(Path::new("/tmp/a")));
}
