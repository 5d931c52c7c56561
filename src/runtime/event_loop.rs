use std::sync::mpsc;
use std::time::Duration;

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind};
use ratatui::{Terminal, backend::CrosstermBackend};

use crate::config;
use crate::mpris::{ControlCmd, MprisHandle};
use crate::runtime::mpris_sync::update_mpris;
use crate::runtime::startup::Deck;
use crate::ui;

/// State tracked by the runtime event loop across iterations.
pub struct EventLoopState {
    /// Which deck currently has keyboard focus.
    pub focused: usize,
    /// Per-deck playlist selection cursor.
    pub cursors: Vec<usize>,
    /// Last title pushed to MPRIS.
    last_mpris_title: Option<String>,
    /// Last playing flag pushed to MPRIS.
    last_mpris_playing: bool,
}

impl EventLoopState {
    /// Construct a new `EventLoopState` for the mounted decks.
    pub fn new(decks: &[Deck]) -> Self {
        Self {
            focused: 0,
            cursors: vec![0; decks.len()],
            last_mpris_title: None,
            last_mpris_playing: false,
        }
    }
}

/// Main terminal event loop: pumps media element notifications into every
/// deck, draws, and handles MPRIS and keyboard input for the focused deck.
/// Returns `Ok(())` when shutdown is requested.
pub fn run(
    terminal: &mut Terminal<CrosstermBackend<std::io::Stdout>>,
    settings: &config::Settings,
    decks: &mut [Deck],
    mpris: &MprisHandle,
    control_tx: &mpsc::Sender<ControlCmd>,
    control_rx: &mpsc::Receiver<ControlCmd>,
    state: &mut EventLoopState,
) -> Result<(), Box<dyn std::error::Error>> {
    loop {
        // Apply pending media notifications on every deck, focused or not:
        // time updates, metadata, track endings, play outcomes.
        for deck in decks.iter_mut() {
            deck.poll_media();
        }

        // Keep MPRIS pointed at the focused deck, including changes driven
        // by auto-advance rather than input.
        if let Some(focused) = decks.get(state.focused) {
            let title = focused.current_track().title.clone();
            let playing = focused.state().is_playing;
            if state.last_mpris_title.as_deref() != Some(title.as_str())
                || state.last_mpris_playing != playing
            {
                update_mpris(mpris, focused);
                state.last_mpris_title = Some(title);
                state.last_mpris_playing = playing;
            }
        }

        terminal.draw(|f| {
            ui::draw(
                f,
                decks,
                &state.cursors,
                state.focused,
                &settings.ui,
                &settings.controls,
            )
        })?;

        while let Ok(cmd) = control_rx.try_recv() {
            if handle_control_cmd(cmd, decks, state) {
                quit(decks);
                return Ok(());
            }
        }

        if event::poll(Duration::from_millis(50))? {
            if let Event::Key(key) = event::read()? {
                if key.kind != KeyEventKind::Press {
                    continue;
                }
                if handle_key_event(key, settings, decks, control_tx, state) {
                    quit(decks);
                    return Ok(());
                }
            }
        }
    }
}

fn quit(decks: &[Deck]) {
    for deck in decks {
        deck.media().quit_softly();
    }
}

fn handle_control_cmd(cmd: ControlCmd, decks: &mut [Deck], state: &mut EventLoopState) -> bool {
    let Some(deck) = decks.get_mut(state.focused) else {
        return matches!(cmd, ControlCmd::Quit);
    };

    match cmd {
        ControlCmd::Quit => return true,
        ControlCmd::Play => deck.play(),
        ControlCmd::Pause => deck.pause(),
        ControlCmd::PlayPause => deck.toggle(),
        ControlCmd::Next => deck.next(),
        ControlCmd::Prev => deck.previous(),
    }

    false
}

fn handle_key_event(
    key: KeyEvent,
    settings: &config::Settings,
    decks: &mut [Deck],
    control_tx: &mpsc::Sender<ControlCmd>,
    state: &mut EventLoopState,
) -> bool {
    match key.code {
        KeyCode::Char('q') => return true,
        KeyCode::Tab => {
            state.focused = (state.focused + 1) % decks.len();
        }
        KeyCode::BackTab => {
            state.focused = (state.focused + decks.len() - 1) % decks.len();
        }
        KeyCode::Char('j') | KeyCode::Down => {
            if let Some(deck) = decks.get(state.focused) {
                let len = deck.playlist().len();
                let cursor = &mut state.cursors[state.focused];
                *cursor = (*cursor + 1) % len;
            }
        }
        KeyCode::Char('k') | KeyCode::Up => {
            if let Some(deck) = decks.get(state.focused) {
                let len = deck.playlist().len();
                let cursor = &mut state.cursors[state.focused];
                *cursor = (*cursor + len - 1) % len;
            }
        }
        KeyCode::Enter => {
            // Selecting an entry always starts it, matching a playlist
            // click rather than the transport toggle.
            if let Some(deck) = decks.get_mut(state.focused) {
                deck.select(state.cursors[state.focused]);
            }
        }
        KeyCode::Char('p') | KeyCode::Char(' ') => {
            let _ = control_tx.send(ControlCmd::PlayPause);
        }
        KeyCode::Char('l') => {
            let _ = control_tx.send(ControlCmd::Next);
        }
        KeyCode::Char('h') => {
            let _ = control_tx.send(ControlCmd::Prev);
        }
        KeyCode::Char('L') => {
            seek_by_step(
                decks,
                state,
                settings.controls.seek_step_percent as f64 / 100.0,
            );
        }
        KeyCode::Char('H') => {
            seek_by_step(
                decks,
                state,
                -(settings.controls.seek_step_percent as f64) / 100.0,
            );
        }
        KeyCode::Char('+') | KeyCode::Char('=') => {
            if let Some(deck) = decks.get_mut(state.focused) {
                let target = deck.state().volume + settings.controls.volume_step;
                deck.set_volume(target);
            }
        }
        KeyCode::Char('-') => {
            if let Some(deck) = decks.get_mut(state.focused) {
                let target = deck.state().volume - settings.controls.volume_step;
                deck.set_volume(target);
            }
        }
        _ => {}
    }

    false
}

/// Nudge the focused deck's playhead by `step` of the track duration,
/// relative to the current fill. Out-of-range fractions are clamped by the
/// media element.
fn seek_by_step(decks: &mut [Deck], state: &EventLoopState, step: f64) {
    if let Some(deck) = decks.get_mut(state.focused) {
        let fraction = deck.view().progress_percent / 100.0 + step;
        deck.seek(fraction);
    }
}
