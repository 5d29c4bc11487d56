//! Parse tree pane: an indented outline of the selected file's tree, or the
//! error that stopped it from parsing.

use crate::parser::ast::TokenKind;
use crate::parser::ParseError;
use crate::ui::theme::DEFAULT_THEME;
use crate::ui::tree_view::{RowKind, TreeRow, TreeView};
use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

fn leaf_style(kind: TokenKind) -> Style {
    let color = match kind {
        TokenKind::Keyword => DEFAULT_THEME.keyword,
        TokenKind::Symbol => DEFAULT_THEME.text,
        TokenKind::Identifier => DEFAULT_THEME.identifier,
        TokenKind::IntegerConstant => DEFAULT_THEME.constant,
        TokenKind::StringConstant => DEFAULT_THEME.string,
    };
    Style::default().fg(color)
}

fn row_line(row: &TreeRow, collapsed: bool, selected: bool) -> Line<'static> {
    let mut spans = vec![Span::raw("  ".repeat(row.depth))];

    match &row.kind {
        RowKind::Interior { label, child_count } => {
            let marker = match (*child_count, collapsed) {
                (0, _) => "  ",
                (_, true) => "▸ ",
                (_, false) => "▾ ",
            };
            spans.push(Span::styled(marker, Style::default().fg(DEFAULT_THEME.muted)));
            spans.push(Span::styled(
                label.tag(),
                Style::default()
                    .fg(DEFAULT_THEME.construct)
                    .add_modifier(Modifier::BOLD),
            ));
            if collapsed {
                spans.push(Span::styled(
                    format!(" … {} children", child_count),
                    Style::default().fg(DEFAULT_THEME.muted),
                ));
            }
        }
        RowKind::Leaf { kind, text } => {
            spans.push(Span::raw("  "));
            spans.push(Span::styled(
                format!("{} ", kind.tag()),
                Style::default().fg(DEFAULT_THEME.muted),
            ));
            let shown = if *kind == TokenKind::StringConstant {
                format!("\"{}\"", text)
            } else {
                text.clone()
            };
            spans.push(Span::styled(shown, leaf_style(*kind)));
        }
    }

    let line = Line::from(spans);
    if selected {
        line.style(Style::default().bg(DEFAULT_THEME.bar_bg))
    } else {
        line
    }
}

/// Render the tree pane
pub fn render_tree_pane(
    frame: &mut Frame,
    area: Rect,
    view: Result<&TreeView, &ParseError>,
    is_focused: bool,
    scroll: &mut usize,
) {
    let border_style = if is_focused {
        Style::default()
            .fg(DEFAULT_THEME.border_focused)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(DEFAULT_THEME.border_normal)
    };

    let view = match view {
        Ok(view) => view,
        Err(err) => {
            let block = Block::default()
                .title(" Parse Error ")
                .borders(Borders::ALL)
                .border_style(Style::default().fg(DEFAULT_THEME.error));
            let paragraph = Paragraph::new(Line::from(Span::styled(
                err.to_string(),
                Style::default().fg(DEFAULT_THEME.error),
            )))
            .wrap(Wrap { trim: true })
            .block(block);
            frame.render_widget(paragraph, area);
            return;
        }
    };

    let visible = view.visible();
    let visible_height = area.height.saturating_sub(2).max(1) as usize;
    let position = view.selected_position();

    // Keep the selection inside the window
    if position < *scroll {
        *scroll = position;
    } else if position >= *scroll + visible_height {
        *scroll = position + 1 - visible_height;
    }

    let lines: Vec<Line> = visible
        .iter()
        .skip(*scroll)
        .take(visible_height)
        .map(|&index| {
            row_line(
                &view.rows()[index],
                view.is_collapsed(index),
                index == view.selected(),
            )
        })
        .collect();

    let block = Block::default()
        .title(format!(" Parse Tree ({} nodes) ", view.rows().len()))
        .borders(Borders::ALL)
        .border_style(border_style);

    frame.render_widget(Paragraph::new(lines).block(block), area);
}
