//! Plumbing shared between the UI-side element handle and its audio
//! thread: commands, the status snapshot, and the event queue.

use std::collections::VecDeque;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use super::element::MediaError;

#[derive(Debug)]
pub(super) enum ElementCmd {
    /// Assign a new source: stops output, resets the playhead, re-probes
    /// metadata.
    SetSource(PathBuf),
    /// Asynchronous playback start request; settles as a `PlayResolved`
    /// event.
    Play,
    /// Pause output. Never fails.
    Pause,
    /// Move the playhead. Targets past the end are clamped.
    Seek(Duration),
    /// Mirror the given volume onto the output.
    SetVolume(f32),
    /// Stop the thread, fading out over `fade_out_ms` milliseconds.
    Shutdown { fade_out_ms: u64 },
}

/// Snapshot of the element as observed from the UI thread.
#[derive(Debug, Clone, Default)]
pub(super) struct ElementStatus {
    pub position: Duration,
    /// `None` until the source's metadata has been probed.
    pub duration: Option<Duration>,
    pub playing: bool,
}

pub(super) type StatusHandle = Arc<Mutex<ElementStatus>>;

/// Notifications emitted by a media element, drained by the controller.
#[derive(Debug)]
pub enum MediaEvent {
    /// The playhead advanced (or was moved).
    TimeUpdate,
    /// The decoded duration is now known.
    MetadataLoaded,
    /// Playback reached the end of the current source.
    Ended,
    /// A previous play request settled.
    PlayResolved(Result<(), MediaError>),
}

/// Pending `MediaEvent`s, oldest first. Consecutive `TimeUpdate`s are
/// coalesced so a slow consumer never drowns in ticks.
#[derive(Clone, Default)]
pub(super) struct EventQueue {
    inner: Arc<Mutex<VecDeque<MediaEvent>>>,
}

impl EventQueue {
    pub fn push(&self, event: MediaEvent) {
        if let Ok(mut queue) = self.inner.lock() {
            if matches!(event, MediaEvent::TimeUpdate)
                && matches!(queue.back(), Some(MediaEvent::TimeUpdate))
            {
                return;
            }
            queue.push_back(event);
        }
    }

    pub fn drain(&self) -> Vec<MediaEvent> {
        match self.inner.lock() {
            Ok(mut queue) => queue.drain(..).collect(),
            Err(_) => Vec::new(),
        }
    }
}
