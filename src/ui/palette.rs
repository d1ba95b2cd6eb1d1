//! Palette pane listing creatable element types

use super::layout::{contains, inner};
use crate::app::App;
use crate::state::{palette_lines, Focus, PaletteLine};
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

/// Palette entry under a screen cell
pub fn item_at(area: Rect, column: u16, row: u16) -> Option<usize> {
    let content = inner(area);
    if !contains(content, column, row) {
        return None;
    }
    match palette_lines().get((row - content.y) as usize) {
        Some(PaletteLine::Item(index, _)) => Some(*index),
        _ => None,
    }
}

/// Draw the palette
pub fn draw(frame: &mut Frame, area: Rect, app: &App) {
    let is_focused = app.state.focus == Focus::Palette;
    let dragging_from_palette = app.state.palette_press.filter(|_| app.state.drag.is_dragging());

    let lines: Vec<Line> = palette_lines()
        .into_iter()
        .map(|line| match line {
            PaletteLine::Header(title) => Line::from(Span::styled(
                title,
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD),
            )),
            PaletteLine::Item(index, item) => {
                let is_selected = is_focused && index == app.state.palette_index;
                let is_dragged = dragging_from_palette == Some(index);
                let (prefix, style) = if is_dragged {
                    ("≡ ", Style::default().fg(Color::Magenta))
                } else if is_selected {
                    (
                        "▸ ",
                        Style::default()
                            .fg(Color::Cyan)
                            .add_modifier(Modifier::BOLD),
                    )
                } else {
                    ("  ", Style::default().fg(Color::White))
                };
                Line::from(Span::styled(format!("{prefix}{}", item.label), style))
            }
        })
        .collect();

    let border_style = if is_focused {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default().fg(Color::DarkGray)
    };

    let palette = Paragraph::new(lines).block(
        Block::default()
            .title(" Form Elements ")
            .borders(Borders::ALL)
            .border_style(border_style),
    );

    frame.render_widget(palette, area);
}
