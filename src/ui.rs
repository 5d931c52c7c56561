//! UI rendering for the deck panes.
//!
//! The renderer only reads each deck's [`PlayerView`] read-outs; all state
//! transitions happen in the controller.

use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    widgets::{Block, Borders, Gauge, List, ListItem, ListState, Padding, Paragraph, Wrap},
};

use crate::config::{ControlsSettings, UiSettings};
use crate::media::MediaElement;
use crate::player::PlayerController;

const VOLUME_BAR_WIDTH: usize = 10;

/// Build the volume read-out line, e.g. `vol █████░░░░░ 70%`.
fn volume_line(volume: f32, label: &str) -> String {
    let filled = (volume.clamp(0.0, 1.0) * VOLUME_BAR_WIDTH as f32).round() as usize;
    let mut bar = String::new();
    for i in 0..VOLUME_BAR_WIDTH {
        bar.push(if i < filled { '█' } else { '░' });
    }
    format!("vol {bar} {label}")
}

/// Build one playlist row: `1. Title  2:16`, marking the active entry.
fn entry_line(index: usize, title: &str, duration_label: &str, active: bool) -> String {
    let marker = if active { "▶" } else { " " };
    format!("{marker} {}. {title}  {duration_label}", index + 1)
}

/// Render the controls help text for the footer.
fn controls_text(controls: &ControlsSettings) -> String {
    format!(
        "[tab] switch deck | [j/k] move | [enter] play entry | [space/p] play/pause | [h/l] prev/next | [H/L] seek -/+{}% | [-/+] volume | [q] quit",
        controls.seek_step_percent
    )
}

/// Render the entire UI: a header, one column per deck, and the controls
/// footer.
pub fn draw<M: MediaElement>(
    frame: &mut Frame,
    decks: &[PlayerController<M>],
    cursors: &[usize],
    focused: usize,
    ui_settings: &UiSettings,
    controls_settings: &ControlsSettings,
) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(1),
            Constraint::Length(3),
        ])
        .split(frame.area());

    // Header
    let header = Paragraph::new(ui_settings.header_text.as_str())
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(" deck ")
                .title_alignment(Alignment::Center),
        );
    frame.render_widget(header, chunks[0]);

    // One column per deck.
    let count = decks.len().max(1) as u32;
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints(vec![Constraint::Ratio(1, count); count as usize])
        .split(chunks[1]);

    for (i, deck) in decks.iter().enumerate() {
        let cursor = cursors.get(i).copied().unwrap_or(0);
        draw_deck(frame, deck, columns[i], cursor, i == focused, ui_settings);
    }

    // Footer
    let footer = Paragraph::new(controls_text(controls_settings))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(" controls ")
                .padding(Padding {
                    left: 1,
                    right: 0,
                    top: 0,
                    bottom: 0,
                }),
        )
        .wrap(Wrap { trim: true });
    frame.render_widget(footer, chunks[2]);
}

fn draw_deck<M: MediaElement>(
    frame: &mut Frame,
    deck: &PlayerController<M>,
    area: Rect,
    cursor: usize,
    focused: bool,
    ui_settings: &UiSettings,
) {
    let view = deck.view();

    let border_style = if focused {
        Style::default().add_modifier(Modifier::BOLD)
    } else {
        Style::default().add_modifier(Modifier::DIM)
    };

    let pane = Block::default()
        .borders(Borders::ALL)
        .border_style(border_style)
        .title(format!(" {} - {} ", deck.playlist().title(), deck.label()));
    let inner = pane.inner(area);
    frame.render_widget(pane, area);

    let cover_height = if ui_settings.show_cover { 3 } else { 0 };
    let sections = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(cover_height),
            Constraint::Length(3),
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Min(1),
        ])
        .split(inner);

    // Cover block: flips into its "playing" style with the transport.
    if ui_settings.show_cover {
        let cover_style = if view.cover_playing {
            Style::default().add_modifier(Modifier::REVERSED)
        } else {
            Style::default()
        };
        let cover = Paragraph::new("♪ ♪ ♪")
            .alignment(Alignment::Center)
            .style(cover_style)
            .block(Block::default().borders(Borders::ALL).title(" cover "));
        frame.render_widget(cover, sections[0]);
    }

    // Progress bar with the two time labels.
    let progress = Gauge::default()
        .block(Block::default().borders(Borders::ALL))
        .ratio((view.progress_percent / 100.0).clamp(0.0, 1.0))
        .label(format!("{} / {}", view.elapsed_label, view.duration_label));
    frame.render_widget(progress, sections[1]);

    // Transport buttons.
    let transport = Paragraph::new(format!("⏮   {}   ⏭", view.transport_glyph.as_str()))
        .alignment(Alignment::Center);
    frame.render_widget(transport, sections[2]);

    // Volume slider read-out.
    let volume = Paragraph::new(volume_line(deck.state().volume, &view.volume_label));
    frame.render_widget(volume, sections[3]);

    // Playlist: the active entry is marked, the cursor is highlighted.
    let items: Vec<ListItem> = deck
        .playlist()
        .tracks()
        .iter()
        .enumerate()
        .map(|(i, track)| {
            let active = i == view.active_entry;
            let line = entry_line(i, &track.title, &track.duration_label, active);
            let item = ListItem::new(line);
            if active {
                item.style(Style::default().add_modifier(Modifier::BOLD))
            } else {
                item
            }
        })
        .collect();

    let list = List::new(items)
        .block(Block::default().borders(Borders::ALL).title(" tracks "))
        .highlight_style(Style::default().add_modifier(Modifier::REVERSED))
        .highlight_symbol("> ");
    let mut state = ListState::default();
    state.select(Some(cursor));
    frame.render_stateful_widget(list, sections[4], &mut state);
}

#[cfg(test)]
mod tests {
    use super::{entry_line, volume_line};

    #[test]
    fn volume_line_fills_proportionally() {
        assert_eq!(volume_line(0.0, "0%"), "vol ░░░░░░░░░░ 0%");
        assert_eq!(volume_line(0.5, "50%"), "vol █████░░░░░ 50%");
        assert_eq!(volume_line(1.0, "100%"), "vol ██████████ 100%");
    }

    #[test]
    fn entry_line_marks_only_the_active_entry() {
        assert_eq!(entry_line(0, "Opener", "2:16", true), "▶ 1. Opener  2:16");
        assert_eq!(entry_line(1, "Closer", "1:53", false), "  2. Closer  1:53");
    }
}
