//! Builder toolbar (save, preview, layout, JSON, export)

use super::components::render_button;
use crate::app::App;
use crate::state::LayoutMode;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::Color,
    Frame,
};

/// Action triggered by a toolbar button
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToolbarAction {
    Save,
    Preview,
    Layout,
    Json,
    Export,
}

const ACTIONS: [ToolbarAction; 5] = [
    ToolbarAction::Save,
    ToolbarAction::Preview,
    ToolbarAction::Layout,
    ToolbarAction::Json,
    ToolbarAction::Export,
];

/// Button rectangles, left to right
pub fn toolbar_buttons(area: Rect) -> Vec<(ToolbarAction, Rect)> {
    let count = ACTIONS.len() as u32;
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints(ACTIONS.iter().map(|_| Constraint::Ratio(1, count)))
        .split(area);

    ACTIONS.iter().copied().zip(chunks.iter().copied()).collect()
}

/// Toolbar action under a screen cell
pub fn action_at(area: Rect, column: u16, row: u16) -> Option<ToolbarAction> {
    toolbar_buttons(area)
        .into_iter()
        .find(|(_, rect)| super::layout::contains(*rect, column, row))
        .map(|(action, _)| action)
}

fn label(action: ToolbarAction, app: &App) -> String {
    match action {
        ToolbarAction::Save if app.state.save_in_flight => "SAVING...".to_string(),
        ToolbarAction::Save => "SAVE".to_string(),
        ToolbarAction::Preview if app.state.document.is_preview() => "EDIT".to_string(),
        ToolbarAction::Preview => "PREVIEW".to_string(),
        ToolbarAction::Layout => match app.state.document.layout_mode() {
            LayoutMode::Vertical => "LAYOUT: 1 COL".to_string(),
            LayoutMode::Grid => "LAYOUT: 2 COL".to_string(),
        },
        ToolbarAction::Json => "JSON".to_string(),
        ToolbarAction::Export => "EXPORT".to_string(),
    }
}

/// Draw the toolbar
pub fn draw(frame: &mut Frame, area: Rect, app: &App) {
    let has_elements = !app.state.document.is_empty();

    for (action, rect) in toolbar_buttons(area) {
        let (accent, is_active, is_enabled) = match action {
            ToolbarAction::Save => (Color::Green, app.state.save_in_flight, has_elements),
            ToolbarAction::Preview => (Color::Cyan, app.state.document.is_preview(), true),
            ToolbarAction::Layout => (
                Color::Yellow,
                app.state.document.layout_mode() == LayoutMode::Grid,
                true,
            ),
            ToolbarAction::Json => (Color::Magenta, app.state.show_json, true),
            ToolbarAction::Export => (Color::Blue, false, has_elements),
        };
        render_button(frame, rect, &label(action, app), accent, is_active, is_enabled);
    }
}
