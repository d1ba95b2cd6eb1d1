//! Screen layout (palette, toolbar, canvas, properties, status bar)
//!
//! ```text
//! +----------+-----------------------------+--------------+
//! | Palette  | Toolbar (BUTTON_HEIGHT)     | Properties   |
//! |          +-----------------------------+              |
//! |          | Canvas / Preview            |              |
//! +----------+-----------------------------+--------------+
//! | Status bar (1 row)                                    |
//! +-------------------------------------------------------+
//! ```
//!
//! The same function is used for drawing and for mouse hit testing.

use super::components::BUTTON_HEIGHT;
use crate::app::App;
use crate::platform::{EXPORT_SHORTCUT, SAVE_SHORTCUT};
use crate::state::{AppState, Focus};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

/// Width of the palette pane
pub const PALETTE_WIDTH: u16 = 26;

/// Width of the properties pane
pub const PROPERTIES_WIDTH: u16 = 38;

/// Screen regions
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PaneAreas {
    pub palette: Rect,
    pub toolbar: Rect,
    pub canvas: Rect,
    pub properties: Rect,
    pub status: Rect,
}

/// Split the terminal into panes
pub fn create_layout(area: Rect) -> PaneAreas {
    // Reserve bottom line for status bar
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(0),    // Content
            Constraint::Length(1), // Status bar
        ])
        .split(area);

    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Length(PALETTE_WIDTH),
            Constraint::Min(0),
            Constraint::Length(PROPERTIES_WIDTH),
        ])
        .split(rows[0]);

    let centre = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(BUTTON_HEIGHT), // Toolbar
            Constraint::Min(0),                // Canvas
        ])
        .split(columns[1]);

    PaneAreas {
        palette: columns[0],
        toolbar: centre[0],
        canvas: centre[1],
        properties: columns[2],
        status: rows[1],
    }
}

/// Area inside a one-cell border
pub fn inner(area: Rect) -> Rect {
    Rect {
        x: area.x.saturating_add(1),
        y: area.y.saturating_add(1),
        width: area.width.saturating_sub(2),
        height: area.height.saturating_sub(2),
    }
}

/// Check if a screen cell lies inside `area`
pub fn contains(area: Rect, column: u16, row: u16) -> bool {
    column >= area.x
        && column < area.x.saturating_add(area.width)
        && row >= area.y
        && row < area.y.saturating_add(area.height)
}

/// Keyboard hints for the current focus and gesture
fn get_hints(state: &AppState) -> String {
    if state.show_json {
        return "y:copy  j/k:scroll  Esc:close".to_string();
    }
    if state.drag.is_dragging() {
        return "j/k:target  Enter:drop  Esc:cancel".to_string();
    }
    if state.document.is_preview() {
        return "p:edit  v:json  Tab:pane".to_string();
    }
    match state.focus {
        Focus::Palette => "j/k:nav  Enter:add  Tab:pane  g:layout  p:preview".to_string(),
        Focus::Canvas => format!(
            "j/k:nav  m:move  d:delete  w:width  g:layout  {SAVE_SHORTCUT}:save  {EXPORT_SHORTCUT}:export"
        ),
        Focus::Properties => "Tab:pane  ↑/↓:field  Space:toggle  Enter:newline".to_string(),
    }
}

/// Draw the status bar
pub fn draw_status_bar(frame: &mut Frame, area: Rect, app: &App) {
    let mut spans = vec![Span::styled(
        format!(" {} ", app.state.document.layout_mode().label()),
        Style::default().fg(Color::Black).bg(Color::Cyan),
    )];
    spans.push(Span::raw(" "));
    spans.push(Span::styled(
        get_hints(&app.state),
        Style::default().fg(Color::Gray),
    ));

    if let Some(msg) = &app.state.status_message {
        spans.push(Span::raw(" | "));
        spans.push(Span::styled(msg, Style::default().fg(Color::Green)));
    }

    let status = Paragraph::new(Line::from(spans)).style(Style::default().bg(Color::DarkGray));
    frame.render_widget(status, area);

    // Quit hint on the right (double Ctrl+C to quit)
    let quit_hint = " ^C^C:quit ";
    let width = (quit_hint.len() as u16).min(area.width);
    let quit_area = Rect {
        x: area.x + area.width.saturating_sub(width),
        y: area.y,
        width,
        height: 1,
    };
    let quit_widget =
        Paragraph::new(quit_hint).style(Style::default().bg(Color::DarkGray).fg(Color::Gray));
    frame.render_widget(quit_widget, quit_area);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_panes_cover_screen() {
        let areas = create_layout(Rect::new(0, 0, 120, 40));
        assert_eq!(areas.palette.width, PALETTE_WIDTH);
        assert_eq!(areas.properties.width, PROPERTIES_WIDTH);
        assert_eq!(areas.canvas.width, 120 - PALETTE_WIDTH - PROPERTIES_WIDTH);
        assert_eq!(areas.toolbar.height, BUTTON_HEIGHT);
        assert_eq!(areas.canvas.y, BUTTON_HEIGHT);
        assert_eq!(areas.canvas.height, 40 - 1 - BUTTON_HEIGHT);
        assert_eq!(areas.status, Rect::new(0, 39, 120, 1));
    }

    #[test]
    fn test_inner_saturates() {
        assert_eq!(inner(Rect::new(0, 0, 10, 5)), Rect::new(1, 1, 8, 3));
        assert_eq!(inner(Rect::new(0, 0, 1, 1)).width, 0);
    }

    #[test]
    fn test_contains_edges() {
        let area = Rect::new(2, 3, 4, 2);
        assert!(contains(area, 2, 3));
        assert!(contains(area, 5, 4));
        assert!(!contains(area, 6, 4));
        assert!(!contains(area, 5, 5));
        assert!(!contains(area, 1, 3));
    }

    #[test]
    fn test_hints_follow_focus_and_drag() {
        use crate::state::{Command, DragPayload, ElementKind};

        let mut state = AppState::default();
        state.focus = Focus::Palette;
        assert!(get_hints(&state).starts_with("j/k:nav  Enter:add"));

        state.dispatch(Command::BeginDrag(DragPayload::Palette(ElementKind::Time)));
        assert!(get_hints(&state).contains("Enter:drop"));

        state.show_json = true;
        assert!(get_hints(&state).contains("y:copy"));
    }
}
