//! UI rendering helpers for the terminal user interface.
//!
//! Everything here is a pure function of `PlayerState`; the screen keeps no
//! playback state of its own.

use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    widgets::{Block, Borders, Gauge, List, ListItem, ListState, Padding, Paragraph, Wrap},
};
use std::{collections::BTreeMap, sync::LazyLock};

use crate::app::PlayerState;
use crate::config::UiSettings;

static CONTROLS_MAP: LazyLock<BTreeMap<&'static str, &'static str>> = LazyLock::new(|| {
    let mut map = BTreeMap::new();
    map.insert("space/p", "play/pause");
    map.insert("s", "stop");
    map.insert("h/l", "prev/next song");
    // H/L is filled dynamically from the seek step.
    map.insert("0-9", "jump to 0%..90%");
    map.insert("click", "seek on the bar");
    map.insert("q", "quit");
    map
});

/// Render the controls help text, incorporating the relative seek step.
fn controls_text(seek_step: f32) -> String {
    // Keep the rendered order stable and human-friendly.
    let order = ["space/p", "s", "h/l", "H/L", "0-9", "click", "q"];
    order
        .iter()
        .filter_map(|k| {
            if *k == "H/L" {
                let pct = (seek_step * 100.0).round() as u32;
                Some(format!("[H/L] seek -/+{pct}%"))
            } else {
                CONTROLS_MAP.get(*k).map(|v| format!("[{k}] {v}"))
            }
        })
        .collect::<Vec<String>>()
        .join(" | ")
}

/// Areas of the screen that input handling needs to know about.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ScreenLayout {
    pub header: Rect,
    pub now_playing: Rect,
    pub playlist: Rect,
    pub progress: Rect,
    pub footer: Rect,
}

impl ScreenLayout {
    pub fn new(area: Rect) -> Self {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3),
                Constraint::Length(5),
                Constraint::Min(1),
                Constraint::Length(3),
                Constraint::Length(4),
            ])
            .split(area);
        Self {
            header: chunks[0],
            now_playing: chunks[1],
            playlist: chunks[2],
            progress: chunks[3],
            footer: chunks[4],
        }
    }

    /// Slider value under a mouse cell on the progress bar, if it is on it.
    pub fn progress_fraction_at(&self, column: u16, row: u16) -> Option<f32> {
        let bar = self.progress;
        // Borders take one cell on each side.
        let inner_x = bar.x.saturating_add(1);
        let inner_w = bar.width.saturating_sub(2);
        if inner_w == 0 || row < bar.y || row >= bar.y.saturating_add(bar.height) {
            return None;
        }
        if column < bar.x || column >= bar.x.saturating_add(bar.width) {
            return None;
        }
        let offset = column.saturating_sub(inner_x).min(inner_w);
        Some(f32::from(offset) / f32::from(inner_w))
    }
}

/// `"<elapsed> sec / <total> sec"`, whole seconds.
fn progress_label(state: &PlayerState) -> String {
    let total_ms = state.duration_ms();
    let elapsed_ms = state.slider_position.clamp(0.0, 1.0) * total_ms;
    format!(
        "{} sec / {} sec",
        (elapsed_ms / 1000.0) as u64,
        (total_ms / 1000.0) as u64
    )
}

fn now_playing_text(state: &PlayerState) -> String {
    let name = |t: Option<&crate::library::Track>| {
        t.map_or_else(|| "None".to_string(), |t| t.display_name.clone())
    };
    let mut lines = vec![
        format!("Current Track: {}", name(state.current_track.as_ref())),
        format!("Next Track: {}", name(state.next_track.as_ref())),
    ];
    let mut status = state.playback.label().to_string();
    if let Some(track) = state.current_track.as_ref() {
        status.push_str(" • ");
        status.push_str(&track.label());
    }
    lines.push(status);
    lines.join("\n")
}

/// Render the entire UI into `frame` and return where everything went.
pub fn draw(
    frame: &mut Frame,
    state: &PlayerState,
    ui_settings: &UiSettings,
    seek_step: f32,
) -> ScreenLayout {
    let layout = ScreenLayout::new(frame.area());

    let header = Paragraph::new(ui_settings.header_text.as_str())
        .alignment(Alignment::Center)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(" chill ")
                .title_alignment(Alignment::Center),
        );
    frame.render_widget(header, layout.header);

    let now_playing = Paragraph::new(now_playing_text(state))
        .block(
            Block::bordered()
                .padding(Padding {
                    left: 1,
                    right: 0,
                    top: 0,
                    bottom: 0,
                })
                .title(" now playing "),
        )
        .wrap(Wrap { trim: true });
    frame.render_widget(now_playing, layout.now_playing);

    let items: Vec<ListItem> = state
        .playlist
        .iter()
        .map(|t| ListItem::new(t.display_name.as_str()))
        .collect();
    let title = if items.is_empty() {
        " tracks (no audio files found) "
    } else {
        " tracks "
    };
    let list = List::new(items)
        .block(Block::default().borders(Borders::ALL).title(title))
        .highlight_style(Style::default().add_modifier(Modifier::REVERSED))
        .highlight_symbol("> ");
    let mut list_state = ListState::default();
    if !state.playlist.is_empty() {
        list_state.select(Some(state.current_index));
    }
    frame.render_stateful_widget(list, layout.playlist, &mut list_state);

    let gauge = Gauge::default()
        .block(Block::default().borders(Borders::ALL).title(" progress "))
        .ratio(f64::from(state.slider_position.clamp(0.0, 1.0)))
        .label(progress_label(state));
    frame.render_widget(gauge, layout.progress);

    let footer = Paragraph::new(controls_text(seek_step))
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
    frame.render_widget(footer, layout.footer);

    layout
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::PlaybackState;
    use crate::audio::fake::track;
    use std::rc::Rc;
    use std::time::Duration;

    #[test]
    fn controls_text_lists_the_seek_step() {
        let text = controls_text(0.05);
        assert!(text.starts_with("[space/p] play/pause"));
        assert!(text.contains("[H/L] seek -/+5%"));
        assert!(text.ends_with("[q] quit"));
    }

    #[test]
    fn progress_label_shows_whole_seconds() {
        let state = PlayerState {
            duration: Duration::from_millis(200_900),
            slider_position: 0.5,
            ..PlayerState::default()
        };
        assert_eq!(progress_label(&state), "100 sec / 200 sec");
        assert_eq!(progress_label(&PlayerState::default()), "0 sec / 0 sec");
    }

    #[test]
    fn now_playing_names_current_and_next() {
        let tracks = vec![track("A.mp3", 10), track("B.mp3", 10)];
        let state = PlayerState {
            current_track: Some(tracks[0].clone()),
            next_track: Some(tracks[1].clone()),
            playback: PlaybackState::Playing,
            playlist: Rc::from(tracks),
            ..PlayerState::default()
        };
        let text = now_playing_text(&state);
        assert!(text.contains("Current Track: A.mp3"));
        assert!(text.contains("Next Track: B.mp3"));
        assert!(text.contains("Playing • A"));

        let empty = now_playing_text(&PlayerState::default());
        assert!(empty.contains("Current Track: None"));
        assert!(empty.contains("Next Track: None"));
    }

    #[test]
    fn progress_fraction_maps_columns_inside_the_bar() {
        let layout = ScreenLayout {
            progress: Rect::new(0, 10, 22, 3),
            ..ScreenLayout::default()
        };
        // Inner cells are columns 1..=20.
        assert_eq!(layout.progress_fraction_at(1, 11), Some(0.0));
        assert_eq!(layout.progress_fraction_at(11, 11), Some(0.5));
        assert_eq!(layout.progress_fraction_at(21, 11), Some(1.0));
        assert_eq!(layout.progress_fraction_at(0, 11), Some(0.0));
        assert_eq!(layout.progress_fraction_at(11, 9), None);
        assert_eq!(layout.progress_fraction_at(11, 13), None);
        assert_eq!(layout.progress_fraction_at(30, 11), None);
    }

    #[test]
    fn layout_stacks_sections_top_to_bottom() {
        let layout = ScreenLayout::new(Rect::new(0, 0, 80, 30));
        assert_eq!(layout.header.height, 3);
        assert_eq!(layout.progress.height, 3);
        assert!(layout.playlist.y < layout.progress.y);
        assert!(layout.progress.y < layout.footer.y);
    }
}
