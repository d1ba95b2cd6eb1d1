//! Properties panel for the selected element

use super::layout::inner;
use crate::app::App;
use crate::state::{Focus, FormElement, FormField, LayoutMode, PropertiesForm};
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

/// Rows taken by the type/width summary above the fields
const SUMMARY_HEIGHT: u16 = 3;

/// Height of a field box, borders included
fn field_height(field: &FormField) -> u16 {
    if field.is_multiline {
        let lines = field.as_text().lines().count().max(1) as u16;
        lines + 3
    } else {
        3
    }
}

/// Stack field boxes from `top` down, clipping the one that reaches the bottom of `area`
fn field_rects(area: Rect, top: u16, fields: &[FormField]) -> Vec<Rect> {
    let bottom = area.y + area.height;
    let mut rects = Vec::with_capacity(fields.len());
    let mut y = top;
    for field in fields {
        // A box needs both borders and one content row
        if bottom.saturating_sub(y) < 3 {
            break;
        }
        let height = field_height(field).min(bottom - y);
        rects.push(Rect::new(area.x, y, area.width, height));
        y += height;
    }
    rects
}

/// Draw one property field
fn draw_field(frame: &mut Frame, area: Rect, field: &FormField, is_active: bool) {
    let style = if is_active {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default().fg(Color::Gray)
    };

    let cursor = if is_active && !field.is_toggle() {
        "▌"
    } else {
        ""
    };
    let cursor_style = Style::default().fg(Color::Cyan);

    let mut scroll = 0;
    let content = if field.is_multiline {
        let mut lines: Vec<Line> = field
            .as_text()
            .lines()
            .map(|l| Line::from(Span::styled(l.to_string(), style)))
            .collect();
        if field.as_text().ends_with('\n') || lines.is_empty() {
            lines.push(Line::from(""));
        }
        if let Some(last) = lines.last_mut() {
            last.spans.push(Span::styled(cursor, cursor_style));
        }
        // Keep the cursor line visible when the box is clipped
        if is_active {
            scroll = (lines.len() as u16).saturating_sub(area.height.saturating_sub(2));
        }
        Paragraph::new(lines)
    } else {
        let display = field.display_value();
        let display = if display.is_empty() && !is_active {
            "(empty)".to_string()
        } else {
            display
        };
        Paragraph::new(Line::from(vec![
            Span::styled(display, style),
            Span::styled(cursor, cursor_style),
        ]))
    };

    let border_style = if is_active {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default().fg(Color::DarkGray)
    };

    let block = Block::default()
        .title(format!(" {} ", field.label))
        .borders(Borders::ALL)
        .border_style(border_style);

    frame.render_widget(
        content
            .wrap(Wrap { trim: false })
            .block(block)
            .scroll((scroll, 0)),
        area,
    );
}

fn summary_lines(element: &FormElement, layout: LayoutMode) -> Vec<Line<'_>> {
    let mut width = Span::styled(element.width.label(), Style::default().fg(Color::White));
    if element.kind.is_layout_locked() {
        width = Span::styled(
            format!("{} (locked)", element.width.label()),
            Style::default().fg(Color::DarkGray),
        );
    }

    let mut lines = vec![
        Line::from(vec![
            Span::styled("Type  ", Style::default().fg(Color::DarkGray)),
            Span::styled(
                format!(" {} ", element.kind.tag()),
                Style::default()
                    .fg(Color::Black)
                    .bg(Color::Cyan)
                    .add_modifier(Modifier::BOLD),
            ),
        ]),
        Line::from(vec![
            Span::styled("Width ", Style::default().fg(Color::DarkGray)),
            width,
        ]),
    ];
    if layout == LayoutMode::Vertical {
        lines.push(Line::from(Span::styled(
            "Width applies in grid layout",
            Style::default().fg(Color::DarkGray),
        )));
    }
    lines
}

fn draw_form(frame: &mut Frame, area: Rect, form: &PropertiesForm, app: &App) {
    let Some(element) = app.state.document.get(&form.element_id) else {
        return;
    };
    let is_focused = app.state.focus == Focus::Properties;

    let summary = Rect::new(area.x, area.y, area.width, SUMMARY_HEIGHT.min(area.height));
    frame.render_widget(
        Paragraph::new(summary_lines(element, app.state.document.layout_mode())),
        summary,
    );

    let rects = field_rects(area, area.y + summary.height, &form.fields);
    for (index, (field, rect)) in form.fields.iter().zip(rects).enumerate() {
        let is_active = is_focused && index == form.active_field_index;
        draw_field(frame, rect, field, is_active);
    }
}

/// Draw the properties panel
pub fn draw(frame: &mut Frame, area: Rect, app: &App) {
    let is_focused = app.state.focus == Focus::Properties;
    let border_style = if is_focused {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default().fg(Color::DarkGray)
    };

    frame.render_widget(
        Block::default()
            .title(" Properties ")
            .borders(Borders::ALL)
            .border_style(border_style),
        area,
    );

    let content = inner(area);
    match &app.state.properties {
        Some(form) => draw_form(frame, content, form, app),
        None => {
            let note = Paragraph::new(vec![
                Line::from(""),
                Line::from(Span::styled(
                    "Note: select an element to edit properties",
                    Style::default().fg(Color::DarkGray),
                )),
            ])
            .wrap(Wrap { trim: true });
            frame.render_widget(note, content);
        }
    }
}
