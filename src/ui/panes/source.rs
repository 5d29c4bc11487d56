//! Source code pane rendering with syntax highlighting
//!
//! This module renders the source code pane, which displays the Jack class
//! being inspected with basic syntax highlighting and the span of the
//! selected tree node (or of a syntax error) marked in place.
//!
//! # Rendering
//!
//! Highlighting is a per-line character scan rather than a real tokenizer
//! pass, so a file that fails to tokenize still renders.  Block comment state
//! is carried from one line to the next.

use crate::parser::ast::{Keyword, SourceLocation};
use crate::ui::theme::DEFAULT_THEME;
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

/// Span of source to mark
#[derive(Debug, Clone, Copy)]
pub struct Highlight {
    pub location: SourceLocation,
    /// Characters to mark, at least one
    pub width: usize,
    pub is_error: bool,
}

/// Scroll state for the source pane
#[derive(Debug, Default)]
pub struct SourceScrollState {
    pub offset: usize,
    /// Keep the highlighted line in view
    pub follow: bool,
}

/// Simple syntax highlighting for Jack code
fn highlight_source_code(line: &str, in_block_comment: &mut bool) -> Line<'static> {
    let mut spans = Vec::new();
    let mut current_word = String::new();
    let comment_style = Style::default().fg(DEFAULT_THEME.muted);

    let chars: Vec<char> = line.chars().collect();
    let mut i = 0;

    while i < chars.len() {
        let c = chars[i];

        // Inside a block comment carried over from an earlier line
        if *in_block_comment {
            let start = i;
            while i < chars.len() && !(chars[i] == '*' && chars.get(i + 1) == Some(&'/')) {
                i += 1;
            }
            if i < chars.len() {
                i += 2;
                *in_block_comment = false;
            }
            spans.push(Span::styled(chars[start..i].iter().collect::<String>(), comment_style));
            continue;
        }

        if c == '/' && matches!(chars.get(i + 1), Some('/') | Some('*')) {
            flush_word(&mut spans, &mut current_word, false);
            if chars[i + 1] == '/' {
                spans.push(Span::styled(chars[i..].iter().collect::<String>(), comment_style));
                break;
            }
            *in_block_comment = true;
            spans.push(Span::styled("/*", comment_style));
            i += 2;
            continue;
        }

        if c == '"' {
            flush_word(&mut spans, &mut current_word, false);
            let mut end = i + 1;
            while end < chars.len() && chars[end] != '"' {
                end += 1;
            }
            if end < chars.len() {
                end += 1;
            }
            spans.push(Span::styled(
                chars[i..end].iter().collect::<String>(),
                Style::default().fg(DEFAULT_THEME.string),
            ));
            i = end;
            continue;
        }

        if !c.is_alphanumeric() && c != '_' {
            flush_word(&mut spans, &mut current_word, c == '(' || c == '.');

            let style = match c {
                '{' | '}' | '(' | ')' | '[' | ']' => Style::default().fg(DEFAULT_THEME.bracket),
                _ => Style::default().fg(DEFAULT_THEME.text),
            };
            spans.push(Span::styled(c.to_string(), style));
            i += 1;
            continue;
        }

        current_word.push(c);
        i += 1;
    }

    flush_word(&mut spans, &mut current_word, false);
    Line::from(spans)
}

fn flush_word(spans: &mut Vec<Span<'static>>, word: &mut String, before_call: bool) {
    if word.is_empty() {
        return;
    }
    let style = get_keyword_style(word, before_call);
    spans.push(Span::styled(std::mem::take(word), style));
}

fn get_keyword_style(word: &str, before_call: bool) -> Style {
    match Keyword::from_word(word) {
        Some(Keyword::Int | Keyword::Char | Keyword::Boolean | Keyword::Void) => {
            Style::default().fg(DEFAULT_THEME.identifier)
        }
        Some(keyword) if keyword.is_constant() => Style::default().fg(DEFAULT_THEME.constant),
        Some(_) => Style::default()
            .fg(DEFAULT_THEME.keyword)
            .add_modifier(Modifier::BOLD),
        None if word.starts_with(|c: char| c.is_ascii_digit()) => {
            Style::default().fg(DEFAULT_THEME.constant)
        }
        None if before_call => Style::default().fg(DEFAULT_THEME.construct),
        None => Style::default().fg(DEFAULT_THEME.text),
    }
}

/// Split a line around the highlighted columns
fn mark_span(line: &str, highlight: &Highlight) -> Vec<Span<'static>> {
    let chars: Vec<char> = line.chars().collect();
    let start = highlight.location.column.saturating_sub(1).min(chars.len());
    let end = (start + highlight.width.max(1)).min(chars.len());

    let mark_style = if highlight.is_error {
        Style::default()
            .bg(DEFAULT_THEME.error)
            .fg(Color::White)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default()
            .bg(DEFAULT_THEME.span_mark)
            .fg(Color::Black)
            .add_modifier(Modifier::BOLD)
    };
    let base = Style::default()
        .bg(DEFAULT_THEME.bar_bg)
        .fg(DEFAULT_THEME.text);

    let mut marked: String = chars[start..end].iter().collect();
    if marked.is_empty() {
        // Errors at end of line or end of input still get a visible cell
        marked.push(' ');
    }

    vec![
        Span::styled(chars[..start].iter().collect::<String>(), base),
        Span::styled(marked, mark_style),
        Span::styled(chars[end..].iter().collect::<String>(), base),
    ]
}

/// Render the source code pane
pub fn render_source_pane(
    frame: &mut Frame,
    area: Rect,
    title: &str,
    source_code: &str,
    highlight: Option<Highlight>,
    is_focused: bool,
    scroll_state: &mut SourceScrollState,
) {
    let border_style = if is_focused {
        Style::default()
            .fg(DEFAULT_THEME.border_focused)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(DEFAULT_THEME.border_normal)
    };

    let block = Block::default()
        .title(format!(" {} ", title))
        .borders(Borders::ALL)
        .border_style(border_style);

    let lines: Vec<&str> = source_code.lines().collect();
    let total_lines = lines.len();
    let visible_height = area.height.saturating_sub(2).max(1) as usize; // Account for borders (2), min 1

    let current_line = highlight.map(|h| h.location.line).unwrap_or(0);

    // Scroll just enough to keep the highlighted line visible
    if scroll_state.follow && current_line > 0 {
        let idx = current_line - 1;
        if idx < scroll_state.offset {
            scroll_state.offset = idx;
        } else if idx >= scroll_state.offset + visible_height {
            scroll_state.offset = idx + 1 - visible_height;
        }
    }
    let max_scroll = total_lines.saturating_sub(visible_height);
    scroll_state.offset = scroll_state.offset.min(max_scroll);

    // Block comments opened above the visible window still colour it
    let mut in_block_comment = false;
    for line in lines.iter().take(scroll_state.offset) {
        highlight_source_code(line, &mut in_block_comment);
    }

    let visible_lines: Vec<Line> = lines
        .iter()
        .enumerate()
        .skip(scroll_state.offset)
        .take(visible_height)
        .map(|(idx, line)| {
            let line_num = idx + 1;
            let highlighted = highlight.filter(|_| line_num == current_line);
            let line_num_str = format!("{:4} ", line_num);

            let content = highlight_source_code(line, &mut in_block_comment);

            match highlighted {
                Some(h) => {
                    let num_style = Style::default()
                        .fg(if h.is_error {
                            DEFAULT_THEME.error
                        } else {
                            DEFAULT_THEME.marker
                        })
                        .add_modifier(Modifier::BOLD);
                    let mut spans = vec![Span::styled(line_num_str, num_style)];
                    spans.extend(mark_span(line, &h));
                    Line::from(spans)
                }
                None => {
                    let mut spans = vec![Span::styled(
                        line_num_str,
                        Style::default().fg(DEFAULT_THEME.muted),
                    )];
                    spans.extend(content.spans);
                    Line::from(spans)
                }
            }
        })
        .collect();

    let paragraph = Paragraph::new(visible_lines).block(block);
    frame.render_widget(paragraph, area);
}
