//! Utilities for creating `rodio` sinks from a source path.

use std::fs::File;
use std::io::BufReader;
use std::path::Path;
use std::time::Duration;

use rodio::{Decoder, OutputStream, Sink, Source};

use super::element::MediaError;

/// Create a paused `Sink` for `source` that starts playback at `start_at`.
pub(super) fn create_sink_at(
    handle: &OutputStream,
    source: &Path,
    start_at: Duration,
) -> Result<Sink, MediaError> {
    let file = File::open(source).map_err(|e| MediaError::Open {
        uri: source.display().to_string(),
        reason: e.to_string(),
    })?;

    let decoded = Decoder::new(BufReader::new(file))
        .map_err(|e| MediaError::Decode {
            uri: source.display().to_string(),
            reason: e.to_string(),
        })?
        // `skip_duration` is the seeking primitive; even Duration::ZERO is fine.
        .skip_duration(start_at);

    let sink = Sink::connect_new(handle.mixer());
    sink.append(decoded);
    sink.pause();
    Ok(sink)
}
