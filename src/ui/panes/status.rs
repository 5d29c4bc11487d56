//! Status bar: current file and message on the left, key hints on the right

use crate::ui::theme::DEFAULT_THEME;
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

/// Key, description
const KEY_HINTS: &[(&str, &str)] = &[
    ("↑/↓", "move"),
    ("↵", "fold"),
    ("[ / ]", "file"),
    ("⇥", "pane"),
    ("q", "quit"),
];

/// What the status bar reports about the current document
pub struct StatusRenderData<'a> {
    pub file_name: &'a str,
    pub file_index: usize,
    pub file_count: usize,
    pub message: &'a str,
    pub has_error: bool,
}

fn file_spans(data: &StatusRenderData) -> Vec<Span<'static>> {
    let badge_bg = if data.has_error {
        DEFAULT_THEME.error
    } else {
        DEFAULT_THEME.ok
    };
    let message_fg = if data.has_error {
        DEFAULT_THEME.error
    } else {
        DEFAULT_THEME.text
    };
    let bar = Style::default().bg(DEFAULT_THEME.bar_bg);

    vec![
        Span::styled(
            format!(
                " {} ({}/{}) ",
                data.file_name,
                data.file_index + 1,
                data.file_count
            ),
            Style::default()
                .bg(badge_bg)
                .fg(Color::Black)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(format!(" {}", data.message), bar.fg(message_fg)),
    ]
}

fn hint_spans() -> Vec<Span<'static>> {
    let key_style = Style::default().bg(DEFAULT_THEME.muted).fg(Color::Black);
    let desc_style = Style::default()
        .bg(DEFAULT_THEME.bar_bg)
        .fg(DEFAULT_THEME.text);

    let mut spans = Vec::with_capacity(KEY_HINTS.len() * 2);
    for (key, desc) in KEY_HINTS {
        spans.push(Span::styled(format!(" {} ", key), key_style));
        spans.push(Span::styled(format!(" {} ", desc), desc_style));
    }
    spans
}

/// Render the status bar at the bottom.
pub fn render_status_bar(frame: &mut Frame, area: Rect, data: &StatusRenderData) {
    let halves = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(60), Constraint::Percentage(40)])
        .split(area);
    let bar = Style::default().bg(DEFAULT_THEME.bar_bg);

    frame.render_widget(
        Paragraph::new(Line::from(file_spans(data))).style(bar),
        halves[0],
    );
    frame.render_widget(
        Paragraph::new(Line::from(hint_spans()))
            .style(bar)
            .alignment(Alignment::Right),
        halves[1],
    );
}
