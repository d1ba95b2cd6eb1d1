//! Application state and core logic

use crate::config::TuiConfig;
use crate::error::SaveError;
use crate::platform::has_command_modifier;
use crate::state::{
    export_document, pack_rows, palette_item, palette_len, AppState, Command, DragPayload,
    DropTarget, Focus, Form,
};
use crate::storage::{StorageClient, StorageClientTrait};
use crate::ui::{self, canvas, layout, palette, toolbar, toolbar::ToolbarAction};
use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEvent, MouseEventKind};
use ratatui::layout::Rect;
use std::time::{Duration, Instant};

/// Window in which a second Ctrl+C quits
const DOUBLE_PRESS_WINDOW: Duration = Duration::from_secs(1);

/// Main application struct
pub struct App {
    /// Current application state
    pub state: AppState,
    /// Where saved forms and exports are written
    storage: Box<dyn StorageClientTrait>,
    /// Whether the app should quit
    quit: bool,
    /// Terminal size for hit testing (height, width)
    pub terminal_size: Option<(u16, u16)>,
}

impl App {
    /// Create a new App instance
    pub fn new(config: &TuiConfig) -> Result<Self> {
        let storage = StorageClient::from_config(config)?;
        tracing::info!(
            "Saving forms to {}, exports to {}",
            storage.forms_dir().display(),
            storage.export_dir().display()
        );
        let state = AppState::new(config.layout(), config.form_info());
        Ok(Self::with_storage(state, Box::new(storage)))
    }

    pub fn with_storage(state: AppState, storage: Box<dyn StorageClientTrait>) -> Self {
        Self {
            state,
            storage,
            quit: false,
            terminal_size: None,
        }
    }

    /// Check if app should quit
    pub fn should_quit(&self) -> bool {
        self.quit
    }

    /// Push an error message to the error queue for display
    pub fn push_error(&mut self, message: impl Into<String>) {
        self.state.push_error(message.into());
    }

    /// Full screen rectangle from the last known terminal size
    fn screen(&self) -> Rect {
        // terminal_size is (height, width)
        let (height, width) = self.terminal_size.unwrap_or((24, 80));
        Rect::new(0, 0, width, height)
    }

    /// Handle keyboard input
    pub async fn handle_key(&mut self, key: KeyEvent) -> Result<()> {
        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            self.handle_ctrl_c();
            return Ok(());
        }

        // Handle error dialog dismissal first (modal)
        if self.state.has_errors() {
            if matches!(key.code, KeyCode::Enter | KeyCode::Esc) {
                self.state.dismiss_error();
            }
            return Ok(());
        }

        // Clear any status messages on key press
        self.state.status_message = None;

        if has_command_modifier(key.modifiers) {
            match key.code {
                KeyCode::Char('s') => {
                    let _ = self.request_save();
                    return Ok(());
                }
                KeyCode::Char('e') => {
                    self.export_form().await;
                    return Ok(());
                }
                _ => {}
            }
        }

        if self.state.show_json {
            self.handle_json_key(key);
            return Ok(());
        }

        if self.state.drag.is_dragging() {
            self.handle_move_key(key);
            return Ok(());
        }

        match key.code {
            KeyCode::Tab => {
                self.state.focus = self.state.focus.next();
                return Ok(());
            }
            KeyCode::BackTab => {
                self.state.focus = self.state.focus.prev();
                return Ok(());
            }
            _ => {}
        }

        if self.state.focus == Focus::Properties {
            self.handle_properties_key(key);
            return Ok(());
        }

        match key.code {
            KeyCode::Char('p') => {
                self.state.dispatch(Command::TogglePreview);
                self.state.canvas_scroll = 0;
            }
            KeyCode::Char('v') => self.open_json_viewer(),
            KeyCode::Char('g') => {
                let mode = self.state.document.layout_mode().toggle();
                self.state.dispatch(Command::SetLayoutMode(mode));
                self.ensure_selected_visible();
            }
            _ => match self.state.focus {
                Focus::Palette => self.handle_palette_key(key),
                Focus::Canvas => self.handle_canvas_key(key),
                Focus::Properties => {}
            },
        }

        Ok(())
    }

    fn handle_ctrl_c(&mut self) {
        let now = Instant::now();
        let is_double = self
            .state
            .last_ctrl_c
            .is_some_and(|t| now.duration_since(t) < DOUBLE_PRESS_WINDOW);
        if is_double {
            self.quit = true;
        } else {
            self.state.last_ctrl_c = Some(now);
            self.state.status_message = Some("Press Ctrl+C again to quit".to_string());
        }
    }

    fn handle_json_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Esc | KeyCode::Char('v') | KeyCode::Char('q') => {
                self.state.show_json = false;
            }
            KeyCode::Char('j') | KeyCode::Down => self.scroll_json(1),
            KeyCode::Char('k') | KeyCode::Up => self.scroll_json(-1),
            KeyCode::PageDown => self.scroll_json(10),
            KeyCode::PageUp => self.scroll_json(-10),
            KeyCode::Char('y') => self.copy_json(),
            _ => {}
        }
    }

    fn scroll_json(&mut self, delta: i32) {
        let height = layout::create_layout(self.screen()).canvas.height;
        let max = ui::json_max_scroll(&self.state.json_text, height);
        let next = (self.state.json_scroll as i32 + delta).clamp(0, max as i32);
        self.state.json_scroll = next as u16;
    }

    /// Keyboard move of the selected element
    fn handle_move_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char('j') | KeyCode::Down => {
                self.state.step_drag_target(1);
                self.ensure_hover_visible();
            }
            KeyCode::Char('k') | KeyCode::Up => {
                self.state.step_drag_target(-1);
                self.ensure_hover_visible();
            }
            KeyCode::Enter => match self.state.drag.hover().cloned() {
                Some(target) => {
                    self.state.dispatch(Command::Drop(target));
                    self.ensure_selected_visible();
                }
                None => self.state.dispatch(Command::CancelDrag),
            },
            KeyCode::Esc => self.state.dispatch(Command::CancelDrag),
            _ => {}
        }
    }

    fn handle_palette_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char('j') | KeyCode::Down => {
                self.state.palette_index = (self.state.palette_index + 1).min(palette_len() - 1);
            }
            KeyCode::Char('k') | KeyCode::Up => {
                self.state.palette_index = self.state.palette_index.saturating_sub(1);
            }
            KeyCode::Enter => self.add_from_palette(self.state.palette_index),
            _ => {}
        }
    }

    fn add_from_palette(&mut self, index: usize) {
        if let Some(item) = palette_item(index) {
            self.state.dispatch(Command::AddElement(item.kind()));
            self.ensure_selected_visible();
        }
    }

    fn handle_canvas_key(&mut self, key: KeyEvent) {
        if self.state.document.is_preview() {
            match key.code {
                KeyCode::Char('j') | KeyCode::Down => self.state.canvas_scroll += 1,
                KeyCode::Char('k') | KeyCode::Up => {
                    self.state.canvas_scroll = self.state.canvas_scroll.saturating_sub(1);
                }
                _ => {}
            }
            self.clamp_canvas_scroll();
            return;
        }

        let selected = self.state.document.selected_id().cloned();
        match key.code {
            KeyCode::Char('j') | KeyCode::Down => {
                self.state.dispatch(Command::SelectNext);
                self.ensure_selected_visible();
            }
            KeyCode::Char('k') | KeyCode::Up => {
                self.state.dispatch(Command::SelectPrevious);
                self.ensure_selected_visible();
            }
            KeyCode::Char('d') | KeyCode::Delete => {
                if let Some(id) = selected {
                    self.state.dispatch(Command::RemoveElement(id));
                    self.state.status_message = Some("Element removed".to_string());
                    self.clamp_canvas_scroll();
                }
            }
            KeyCode::Char('w') => {
                if let Some(id) = selected {
                    self.state.dispatch(Command::ToggleWidth(id));
                }
            }
            KeyCode::Char('m') => {
                if let Some(id) = selected {
                    self.state
                        .dispatch(Command::BeginDrag(DragPayload::Existing(id.clone())));
                    self.state
                        .dispatch(Command::DragOver(Some(DropTarget::Element(id))));
                }
            }
            KeyCode::Enter => {
                if selected.is_some() {
                    self.state.focus = Focus::Properties;
                }
            }
            KeyCode::Esc => self.state.dispatch(Command::SelectElement(None)),
            _ => {}
        }
    }

    fn handle_properties_key(&mut self, key: KeyEvent) {
        let Some(form) = self.state.properties.as_mut() else {
            if key.code == KeyCode::Esc {
                self.state.focus = Focus::Canvas;
            }
            return;
        };

        let patch = match key.code {
            KeyCode::Esc => {
                self.state.focus = Focus::Canvas;
                return;
            }
            KeyCode::Down => {
                form.next_field();
                return;
            }
            KeyCode::Up => {
                form.prev_field();
                return;
            }
            KeyCode::Enter if form.is_active_field_multiline() => form.input_char('\n'),
            KeyCode::Enter => {
                form.next_field();
                return;
            }
            KeyCode::Backspace => form.backspace(),
            KeyCode::Char(' ') => match form.toggle() {
                Some(patch) => Some(patch),
                None => form.input_char(' '),
            },
            KeyCode::Char(c) => form.input_char(c),
            _ => None,
        };

        if let Some(patch) = patch {
            let id = form.element_id.clone();
            self.state.dispatch(Command::PropertyChanged(id, patch));
        }
    }

    /// Handle mouse input
    pub async fn handle_mouse(&mut self, mouse: MouseEvent) -> Result<()> {
        if self.state.has_errors() {
            return Ok(());
        }

        let areas = layout::create_layout(self.screen());
        let (column, row) = (mouse.column, mouse.row);

        match mouse.kind {
            MouseEventKind::Down(MouseButton::Left) => {
                self.state.status_message = None;

                if let Some(action) = toolbar::action_at(areas.toolbar, column, row) {
                    self.run_toolbar_action(action).await;
                } else if let Some(index) = palette::item_at(areas.palette, column, row) {
                    self.state.focus = Focus::Palette;
                    self.state.palette_index = index;
                    if let Some(item) = palette_item(index) {
                        self.state.palette_press = Some(index);
                        self.state
                            .dispatch(Command::BeginDrag(DragPayload::Palette(item.kind())));
                    }
                } else if layout::contains(areas.canvas, column, row) {
                    if self.state.show_json || self.state.document.is_preview() {
                        return Ok(());
                    }
                    self.state.focus = Focus::Canvas;
                    let geometry = canvas::geometry_for(self, areas.canvas);
                    match geometry.element_at(column, row).cloned() {
                        Some(id) => self
                            .state
                            .dispatch(Command::BeginDrag(DragPayload::Existing(id))),
                        None => self.state.dispatch(Command::SelectElement(None)),
                    }
                } else if layout::contains(areas.properties, column, row) {
                    self.state.focus = Focus::Properties;
                }
            }
            MouseEventKind::Drag(MouseButton::Left) => {
                if self.state.drag.is_dragging() {
                    let target = self.canvas_target(areas.canvas, column, row);
                    self.state.dispatch(Command::DragOver(target));
                }
            }
            MouseEventKind::Up(MouseButton::Left) => {
                let press = self.state.palette_press.take();
                if !self.state.drag.is_dragging() {
                    return Ok(());
                }

                let released_on = palette::item_at(areas.palette, column, row);
                if press.is_some() && press == released_on {
                    // Click on a palette entry
                    self.state.dispatch(Command::CancelDrag);
                    if let Some(index) = press {
                        self.add_from_palette(index);
                    }
                    return Ok(());
                }

                match self.canvas_target(areas.canvas, column, row) {
                    Some(target) => {
                        self.state.dispatch(Command::Drop(target));
                        self.ensure_selected_visible();
                    }
                    None => self.state.dispatch(Command::CancelDrag),
                }
            }
            MouseEventKind::ScrollDown => self.scroll_at(areas.canvas, column, row, 1),
            MouseEventKind::ScrollUp => self.scroll_at(areas.canvas, column, row, -1),
            _ => {}
        }

        Ok(())
    }

    /// Drop target under the cursor, if it is over the builder canvas
    fn canvas_target(&self, canvas_area: Rect, column: u16, row: u16) -> Option<DropTarget> {
        if self.state.document.is_preview() || !layout::contains(canvas_area, column, row) {
            return None;
        }
        canvas::geometry_for(self, canvas_area).target_at(column, row)
    }

    fn scroll_at(&mut self, canvas_area: Rect, column: u16, row: u16, delta: i32) {
        if !layout::contains(canvas_area, column, row) {
            return;
        }
        if self.state.show_json {
            self.scroll_json(delta * 3);
        } else if delta > 0 {
            self.state.canvas_scroll += 1;
            self.clamp_canvas_scroll();
        } else {
            self.state.canvas_scroll = self.state.canvas_scroll.saturating_sub(1);
        }
    }

    async fn run_toolbar_action(&mut self, action: ToolbarAction) {
        tracing::debug!("Toolbar action {action:?}");
        match action {
            ToolbarAction::Save => {
                let _ = self.request_save();
            }
            ToolbarAction::Preview => {
                self.state.dispatch(Command::TogglePreview);
                self.state.canvas_scroll = 0;
            }
            ToolbarAction::Layout => {
                let mode = self.state.document.layout_mode().toggle();
                self.state.dispatch(Command::SetLayoutMode(mode));
                self.ensure_selected_visible();
            }
            ToolbarAction::Json => {
                if self.state.show_json {
                    self.state.show_json = false;
                } else {
                    self.open_json_viewer();
                }
            }
            ToolbarAction::Export => self.export_form().await,
        }
    }

    /// Number of packed rows currently on the canvas
    fn row_count(&self) -> usize {
        let document = &self.state.document;
        pack_rows(document.elements(), document.layout_mode()).len()
    }

    fn clamp_canvas_scroll(&mut self) {
        let max = self.row_count().saturating_sub(1);
        self.state.canvas_scroll = self.state.canvas_scroll.min(max);
    }

    /// Scroll the canvas so that the row holding `id` is visible
    fn scroll_to_row_of(&mut self, id: &crate::state::ElementId) {
        let document = &self.state.document;
        let rows = pack_rows(document.elements(), document.layout_mode());
        let Some(row) = rows.iter().position(|r| r.iter().any(|e| &e.id == id)) else {
            return;
        };

        let areas = layout::create_layout(self.screen());
        let visible = canvas::visible_rows(areas.canvas).max(1);
        let scroll = &mut self.state.canvas_scroll;
        if row < *scroll {
            *scroll = row;
        } else if row >= *scroll + visible {
            *scroll = row + 1 - visible;
        }
    }

    fn ensure_selected_visible(&mut self) {
        if let Some(id) = self.state.document.selected_id().cloned() {
            self.scroll_to_row_of(&id);
        }
        self.clamp_canvas_scroll();
    }

    fn ensure_hover_visible(&mut self) {
        if let Some(DropTarget::Element(id)) = self.state.drag.hover().cloned() {
            self.scroll_to_row_of(&id);
        }
    }

    /// Validate and mark a save as pending.
    ///
    /// The storage call itself runs in [`App::complete_save`] so the
    /// in-flight notice is drawn first.
    pub fn request_save(&mut self) -> Result<(), SaveError> {
        if self.state.document.is_empty() {
            let err = SaveError::EmptyForm;
            self.push_error(err.to_string());
            return Err(err);
        }
        if self.state.save_in_flight {
            tracing::debug!("Save requested while another is in flight");
            let err = SaveError::InFlight;
            self.state.status_message = Some(err.to_string());
            return Err(err);
        }
        self.state.save_in_flight = true;
        Ok(())
    }

    /// Run a pending save, if any
    pub async fn complete_save(&mut self) -> Result<(), SaveError> {
        if !self.state.save_in_flight {
            return Ok(());
        }

        let form = export_document(&self.state.document, &self.state.form_info);
        let result = self.storage.save_form(&form).await;
        self.state.save_in_flight = false;

        match result {
            Ok(location) => {
                tracing::debug!("Save of {} finished", form.id);
                self.state.status_message = Some(format!("Form saved to {location}"));
                Ok(())
            }
            Err(e) => {
                let err = SaveError::Storage(e);
                self.push_error(err.to_string());
                Err(err)
            }
        }
    }

    /// Save the document end to end
    #[cfg(test)]
    pub async fn save_form(&mut self) -> Result<(), SaveError> {
        self.request_save()?;
        self.complete_save().await
    }

    /// Write the exported JSON to a timestamped file
    pub async fn export_form(&mut self) {
        let form = export_document(&self.state.document, &self.state.form_info);
        let json = match form.to_json_pretty() {
            Ok(json) => json,
            Err(e) => {
                self.push_error(format!("Failed to serialize form: {e:#}"));
                return;
            }
        };

        match self
            .storage
            .write_export(&form.file_name(), json.as_bytes())
            .await
        {
            Ok(path) => {
                tracing::info!("Exported form to {}", path.display());
                self.state.status_message = Some(format!("Exported to {}", path.display()));
            }
            Err(e) => self.push_error(format!("Failed to export form: {e:#}")),
        }
    }

    /// Render the export and show it in the viewer
    fn open_json_viewer(&mut self) {
        match self.state.refresh_json() {
            Ok(()) => {
                self.state.json_scroll = 0;
                self.state.show_json = true;
            }
            Err(e) => self.push_error(format!("Failed to serialize form: {e:#}")),
        }
    }

    fn copy_json(&mut self) {
        match copy_to_clipboard(&self.state.json_text) {
            Ok(()) => {
                self.state.status_message = Some(format!(
                    "Copied {} chars",
                    self.state.json_text.chars().count()
                ));
            }
            Err(e) => self.push_error(format!("Failed to copy to clipboard: {e:#}")),
        }
    }
}

fn copy_to_clipboard(text: &str) -> Result<()> {
    use arboard::Clipboard;
    let mut clipboard = Clipboard::new()?;
    clipboard.set_text(text)?;
    Ok(())
}
