use std::path::{Path, PathBuf};
use std::sync::mpsc::{Receiver, RecvTimeoutError};
use std::thread;
use std::thread::JoinHandle;
use std::time::{Duration, Instant};

use lofty::prelude::AudioFile;
use rodio::{OutputStream, OutputStreamBuilder, Sink};
use tracing::warn;

use crate::config::MediaSettings;

use super::element::MediaError;
use super::sink::create_sink_at;
use super::types::{ElementCmd, EventQueue, MediaEvent, StatusHandle};

pub(super) fn spawn_element_thread(
    rx: Receiver<ElementCmd>,
    status: StatusHandle,
    events: EventQueue,
    settings: MediaSettings,
) -> JoinHandle<()> {
    thread::spawn(move || {
        let stream = match OutputStreamBuilder::open_default_stream() {
            Ok(mut s) => {
                // rodio logs to stderr when OutputStream is dropped. That's useful in
                // debugging, but noisy for a TUI app.
                s.log_on_drop(false);
                Some(s)
            }
            Err(e) => {
                // Play requests will resolve with NoDevice.
                warn!("no audio output device: {e}");
                None
            }
        };

        let mut source: Option<PathBuf> = None;
        let mut sink: Option<Sink> = None;
        let mut paused = true;
        let mut volume: f32 = 1.0;

        // Playhead: start time of the current run plus the time accumulated
        // across pauses and seeks.
        let mut started_at: Option<Instant> = None;
        let mut accumulated = Duration::ZERO;
        let mut duration: Option<Duration> = None;

        let tick = Duration::from_millis(settings.tick_ms.max(50));

        loop {
            match rx.recv_timeout(tick) {
                Ok(ElementCmd::SetSource(path)) => {
                    if let Some(s) = sink.take() {
                        s.stop();
                    }
                    paused = true;
                    started_at = None;
                    accumulated = Duration::ZERO;

                    duration = probe_duration(&path);
                    source = Some(path);

                    if let Ok(mut st) = status.lock() {
                        st.position = Duration::ZERO;
                        st.duration = duration;
                        st.playing = false;
                    }
                    if duration.is_some() {
                        events.push(MediaEvent::MetadataLoaded);
                    }
                }

                Ok(ElementCmd::Play) => {
                    let outcome = start_playback(
                        stream.as_ref(),
                        source.as_deref(),
                        &mut sink,
                        &mut paused,
                        &mut started_at,
                        accumulated,
                        volume,
                    );
                    if outcome.is_ok() {
                        if let Ok(mut st) = status.lock() {
                            st.playing = true;
                        }
                    }
                    events.push(MediaEvent::PlayResolved(outcome));
                }

                Ok(ElementCmd::Pause) => {
                    if let Some(s) = sink.as_ref() {
                        s.pause();
                    }
                    if let Some(st) = started_at.take() {
                        accumulated += st.elapsed();
                    }
                    paused = true;
                    if let Ok(mut st) = status.lock() {
                        st.playing = false;
                    }
                }

                Ok(ElementCmd::Seek(target)) => {
                    let Some(src) = source.clone() else {
                        continue;
                    };
                    let target = duration.map_or(target, |d| target.min(d));

                    if let Some(s) = sink.take() {
                        s.stop();
                    }

                    if paused {
                        // The next play request rebuilds the sink at the new
                        // offset.
                        started_at = None;
                    } else {
                        match stream
                            .as_ref()
                            .ok_or(MediaError::NoDevice)
                            .and_then(|st| create_sink_at(st, &src, target))
                        {
                            Ok(new_sink) => {
                                new_sink.set_volume(volume);
                                new_sink.play();
                                sink = Some(new_sink);
                                started_at = Some(Instant::now());
                            }
                            Err(e) => {
                                warn!("seek rebuild failed: {e}");
                                paused = true;
                                started_at = None;
                                if let Ok(mut st) = status.lock() {
                                    st.playing = false;
                                }
                            }
                        }
                    }

                    accumulated = target;
                    if let Ok(mut st) = status.lock() {
                        st.position = target;
                    }
                    events.push(MediaEvent::TimeUpdate);
                }

                Ok(ElementCmd::SetVolume(v)) => {
                    volume = v;
                    if let Some(s) = sink.as_ref() {
                        s.set_volume(v);
                    }
                }

                Ok(ElementCmd::Shutdown { fade_out_ms }) => {
                    if let Some(s) = sink.as_ref() {
                        fade_out_sink(s, fade_out_ms);
                        s.stop();
                    }
                    if let Ok(mut st) = status.lock() {
                        st.playing = false;
                    }
                    break;
                }

                Err(RecvTimeoutError::Timeout) => {
                    if paused {
                        continue;
                    }

                    let drained = sink.as_ref().map(|s| s.empty()).unwrap_or(true);
                    if drained {
                        // End of source: report once, return to the start.
                        sink = None;
                        paused = true;
                        started_at = None;
                        accumulated = Duration::ZERO;
                        if let Ok(mut st) = status.lock() {
                            st.position = Duration::ZERO;
                            st.playing = false;
                        }
                        events.push(MediaEvent::Ended);
                    } else {
                        let position =
                            accumulated + started_at.map_or(Duration::ZERO, |st| st.elapsed());
                        if let Ok(mut st) = status.lock() {
                            st.position = position;
                        }
                        events.push(MediaEvent::TimeUpdate);
                    }
                }

                Err(RecvTimeoutError::Disconnected) => break,
            }
        }
    })
}

fn start_playback(
    stream: Option<&OutputStream>,
    source: Option<&Path>,
    sink: &mut Option<Sink>,
    paused: &mut bool,
    started_at: &mut Option<Instant>,
    accumulated: Duration,
    volume: f32,
) -> Result<(), MediaError> {
    if let Some(s) = sink.as_ref() {
        // Resume; a play request on an already-playing sink settles as a
        // successful no-op.
        if *paused {
            s.play();
            *paused = false;
            *started_at = Some(Instant::now());
        }
        return Ok(());
    }

    let src = source.ok_or(MediaError::NoSource)?;
    let stream = stream.ok_or(MediaError::NoDevice)?;

    let new_sink = create_sink_at(stream, src, accumulated)?;
    new_sink.set_volume(volume);
    new_sink.play();
    *sink = Some(new_sink);
    *paused = false;
    *started_at = Some(Instant::now());
    Ok(())
}

fn probe_duration(path: &Path) -> Option<Duration> {
    lofty::read_from_path(path)
        .ok()
        .map(|tagged| tagged.properties().duration())
}

fn fade_out_sink(sink: &Sink, fade_out_ms: u64) {
    if fade_out_ms == 0 {
        sink.set_volume(0.0);
        return;
    }
    let steps: u64 = 20;
    let step_ms = (fade_out_ms / steps).max(1);
    let start = sink.volume();
    for step in 1..=steps {
        let t = step as f32 / steps as f32;
        sink.set_volume(start * (1.0 - t));
        thread::sleep(Duration::from_millis(step_ms));
    }
    sink.set_volume(0.0);
}
