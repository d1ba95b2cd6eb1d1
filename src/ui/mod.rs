//! UI module for rendering the TUI

pub mod canvas;
mod components;
mod json_viewer;
pub mod layout;
pub mod palette;
mod preview;
mod properties;
pub mod toolbar;

pub use json_viewer::max_scroll as json_max_scroll;

use crate::app::App;
use components::{render_error_dialog, render_notice_dialog};
use ratatui::Frame;

/// Main draw function
pub fn draw(frame: &mut Frame, app: &App) {
    let areas = layout::create_layout(frame.area());

    palette::draw(frame, areas.palette, app);
    toolbar::draw(frame, areas.toolbar, app);

    if app.state.document.is_preview() {
        preview::draw(frame, areas.canvas, app);
    } else {
        canvas::draw(frame, areas.canvas, app);
    }

    properties::draw(frame, areas.properties, app);

    if app.state.show_json {
        json_viewer::draw(frame, areas.canvas, app);
    }

    layout::draw_status_bar(frame, areas.status, app);

    // Modal overlays last so they sit on top
    if let Some(error) = app.state.current_error() {
        render_error_dialog(frame, error);
    } else if app.state.save_in_flight {
        render_notice_dialog(frame, "Saving", "Saving form...");
    }
}
