//! Read-only preview of the form as an end user would see it

use super::layout::inner;
use crate::app::App;
use crate::state::{pack_rows, FormElement, InputKind, LayoutMode, Width};
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

/// Rows an element needs in the preview
fn element_height(element: &FormElement) -> u16 {
    match element.kind.input_kind() {
        InputKind::Heading | InputKind::Subheading => 2,
        InputKind::MultilineText => 5,
        InputKind::Radio => 2 + element.options.len().max(1) as u16,
        _ => 3,
    }
}

fn title_line(element: &FormElement) -> Line<'_> {
    let mut spans = vec![Span::styled(
        format!(" {} ", element.label),
        Style::default().fg(Color::White),
    )];
    if element.required {
        spans.push(Span::styled("* ", Style::default().fg(Color::Red)));
    }
    Line::from(spans)
}

fn input_lines(element: &FormElement) -> Vec<Line<'_>> {
    let muted = Style::default().fg(Color::DarkGray);
    match element.kind.input_kind() {
        InputKind::Text | InputKind::MultilineText => {
            vec![Line::from(Span::styled(element.placeholder.as_str(), muted))]
        }
        InputKind::Date => vec![Line::from(Span::styled("yyyy-mm-dd", muted))],
        InputKind::Time => vec![Line::from(Span::styled("--:--", muted))],
        InputKind::Checkbox => vec![Line::from("[ ]")],
        InputKind::Radio => element
            .options
            .iter()
            .map(|option| Line::from(format!("( ) {option}")))
            .collect(),
        InputKind::Select => vec![Line::from(vec![
            Span::styled("Select an option", muted),
            Span::raw(" ▾"),
        ])],
        InputKind::Step => vec![Line::from(Span::styled("── next step ──", muted))],
        InputKind::Heading | InputKind::Subheading => Vec::new(),
    }
}

fn draw_element(frame: &mut Frame, area: Rect, element: &FormElement) {
    match element.kind.input_kind() {
        InputKind::Heading => {
            let heading = Paragraph::new(vec![
                Line::from(Span::styled(
                    element.label.to_uppercase(),
                    Style::default()
                        .fg(Color::Yellow)
                        .add_modifier(Modifier::BOLD),
                )),
                Line::from(Span::styled(
                    "─".repeat(area.width as usize),
                    Style::default().fg(Color::DarkGray),
                )),
            ]);
            frame.render_widget(heading, area);
        }
        InputKind::Subheading => {
            let subheading = Paragraph::new(Line::from(Span::styled(
                element.label.as_str(),
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::ITALIC),
            )));
            frame.render_widget(subheading, area);
        }
        InputKind::Radio => {
            let mut lines = vec![title_line(element)];
            lines.extend(input_lines(element));
            frame.render_widget(Paragraph::new(lines), area);
        }
        _ => {
            let block = Block::default()
                .title(title_line(element))
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Gray));
            frame.render_widget(Paragraph::new(input_lines(element)).block(block), area);
        }
    }
}

/// Draw the preview in place of the canvas
pub fn draw(frame: &mut Frame, area: Rect, app: &App) {
    let document = &app.state.document;
    let title = format!(" Preview · {} ", app.state.form_info.name);
    frame.render_widget(
        Block::default()
            .title(title)
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Green)),
        area,
    );

    let content = inner(area);
    if document.is_empty() {
        frame.render_widget(
            Paragraph::new("Nothing to preview yet").style(Style::default().fg(Color::DarkGray)),
            content,
        );
        return;
    }

    let mode = document.layout_mode();
    let bottom = content.y + content.height;
    let half_width = content.width / 2;
    let mut y = content.y;

    for row in pack_rows(document.elements(), mode)
        .iter()
        .skip(app.state.canvas_scroll)
    {
        let height = row.iter().map(|e| element_height(e)).max().unwrap_or(0);
        if y + height > bottom {
            break;
        }

        let mut x = content.x;
        for element in row {
            let width = match (mode, element.width) {
                (LayoutMode::Grid, Width::Half) if x == content.x => half_width,
                (LayoutMode::Grid, Width::Half) => content.width - half_width,
                _ => content.width,
            };
            draw_element(frame, Rect::new(x, y, width, element_height(element)), element);
            x += width;
        }
        y += height;
    }
}
