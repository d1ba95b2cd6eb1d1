//! JSON export viewer overlay

use crate::app::App;
use ratatui::{
    layout::Rect,
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

/// Highlight one line of pretty-printed JSON: keys cyan, strings green
fn highlight(line: &str) -> Line<'_> {
    let trimmed = line.trim_start();
    let indent = &line[..line.len() - trimmed.len()];

    if let Some((key, rest)) = trimmed.split_once("\": ") {
        if key.starts_with('"') {
            let value_style = if rest.starts_with('"') {
                Style::default().fg(Color::Green)
            } else {
                Style::default().fg(Color::Yellow)
            };
            return Line::from(vec![
                Span::raw(indent),
                Span::styled(format!("{key}\""), Style::default().fg(Color::Cyan)),
                Span::raw(": "),
                Span::styled(rest, value_style),
            ]);
        }
    }

    let style = if trimmed.starts_with('"') {
        Style::default().fg(Color::Green)
    } else {
        Style::default().fg(Color::White)
    };
    Line::from(vec![Span::raw(indent), Span::styled(trimmed, style)])
}

/// Largest useful scroll offset for `text` in an area of `height` rows
pub fn max_scroll(text: &str, height: u16) -> u16 {
    let lines = text.lines().count() as u16;
    lines.saturating_sub(height.saturating_sub(2))
}

/// Draw the viewer over `area`
pub fn draw(frame: &mut Frame, area: Rect, app: &App) {
    let text = &app.state.json_text;
    let lines: Vec<Line> = text.lines().map(highlight).collect();

    let viewer = Paragraph::new(lines)
        .block(
            Block::default()
                .title(" Form JSON ")
                .title_bottom(Line::from(" y:copy  j/k:scroll  Esc:close ").right_aligned())
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Magenta))
                .style(Style::default().bg(Color::Black)),
        )
        .scroll((app.state.json_scroll, 0));

    frame.render_widget(Clear, area);
    frame.render_widget(viewer, area);
}
