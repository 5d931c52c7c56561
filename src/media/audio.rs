use std::path::Path;
use std::sync::mpsc::{self, Sender};
use std::sync::{Arc, Mutex};
use std::thread::JoinHandle;
use std::time::Duration;

use crate::config::MediaSettings;

use super::element::MediaElement;
use super::thread::spawn_element_thread;
use super::types::{ElementCmd, ElementStatus, EventQueue, MediaEvent, StatusHandle};

/// The rodio-backed media element.
///
/// The handle lives on the UI thread; a dedicated audio thread owns the
/// output stream and sink, publishes a status snapshot and pushes
/// notifications onto a shared event queue. One `AudioElement` per mounted
/// deck, nothing shared between them.
pub struct AudioElement {
    tx: Sender<ElementCmd>,
    status: StatusHandle,
    events: EventQueue,
    join: Mutex<Option<JoinHandle<()>>>,
    fade_out_ms: u64,
}

impl AudioElement {
    pub fn new(settings: MediaSettings) -> Self {
        let (tx, rx) = mpsc::channel::<ElementCmd>();
        let status: StatusHandle = Arc::new(Mutex::new(ElementStatus::default()));
        let events = EventQueue::default();

        let fade_out_ms = settings.quit_fade_out_ms;
        let join = spawn_element_thread(rx, status.clone(), events.clone(), settings);

        Self {
            tx,
            status,
            events,
            join: Mutex::new(Some(join)),
            fade_out_ms,
        }
    }

    fn send(&self, cmd: ElementCmd) {
        let _ = self.tx.send(cmd);
    }

    fn snapshot(&self) -> ElementStatus {
        self.status.lock().map(|st| st.clone()).unwrap_or_default()
    }

    /// Fade out and stop the audio thread. Used on teardown.
    pub fn quit_softly(&self) {
        self.send(ElementCmd::Shutdown {
            fade_out_ms: self.fade_out_ms,
        });

        if let Ok(mut join) = self.join.lock() {
            if let Some(handle) = join.take() {
                let _ = handle.join();
            }
        }
    }
}

impl MediaElement for AudioElement {
    fn set_source(&mut self, source: &Path) {
        self.send(ElementCmd::SetSource(source.to_path_buf()));
    }

    fn request_play(&mut self) {
        self.send(ElementCmd::Play);
    }

    fn pause(&mut self) {
        self.send(ElementCmd::Pause);
    }

    fn position(&self) -> f64 {
        self.snapshot().position.as_secs_f64()
    }

    fn seek_to(&mut self, seconds: f64) {
        if !seconds.is_finite() {
            return;
        }
        self.send(ElementCmd::Seek(Duration::from_secs_f64(seconds.max(0.0))));
    }

    fn duration(&self) -> Option<f64> {
        self.snapshot().duration.map(|d| d.as_secs_f64())
    }

    fn set_volume(&mut self, volume: f32) {
        self.send(ElementCmd::SetVolume(volume.clamp(0.0, 1.0)));
    }

    fn poll_events(&mut self) -> Vec<MediaEvent> {
        self.events.drain()
    }
}
