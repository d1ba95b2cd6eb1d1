//! Application state definitions

use super::commands::Command;
use super::document::DocumentStore;
use super::drag::{DragPayload, DragState, DropOutcome, DropTarget};
use super::export::{export_document, FormInfo};
use super::forms::PropertiesForm;
use super::packing::LayoutMode;
use std::collections::VecDeque;
use std::time::Instant;

/// Pane that receives keyboard input
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Focus {
    Palette,
    #[default]
    Canvas,
    Properties,
}

impl Focus {
    pub fn next(self) -> Self {
        match self {
            Self::Palette => Self::Canvas,
            Self::Canvas => Self::Properties,
            Self::Properties => Self::Palette,
        }
    }

    pub fn prev(self) -> Self {
        match self {
            Self::Palette => Self::Properties,
            Self::Canvas => Self::Palette,
            Self::Properties => Self::Canvas,
        }
    }
}

/// Main application state
#[derive(Debug, Default)]
pub struct AppState {
    // Document
    pub document: DocumentStore,
    pub form_info: FormInfo,

    // Gestures
    pub drag: DragState,
    /// Palette entry under the last mouse press, to tell clicks from drags
    pub palette_press: Option<usize>,

    // Navigation
    pub focus: Focus,
    pub palette_index: usize,
    pub canvas_scroll: usize,

    // Properties panel
    pub properties: Option<PropertiesForm>,

    // JSON viewer
    pub show_json: bool,
    /// Export rendered for the viewer, refreshed after every command
    pub json_text: String,
    pub json_scroll: u16,

    // Save workflow
    pub save_in_flight: bool,

    // Feedback
    pub status_message: Option<String>,
    pub error_queue: VecDeque<String>,

    // Double Ctrl+C to quit
    pub last_ctrl_c: Option<Instant>,
}

impl AppState {
    /// Fresh state for a document starting in `layout`
    pub fn new(layout: LayoutMode, form_info: FormInfo) -> Self {
        Self {
            document: DocumentStore::with_layout(layout),
            form_info,
            ..Self::default()
        }
    }

    /// Apply one command to the document and gesture state
    pub fn dispatch(&mut self, command: Command) {
        tracing::trace!("dispatch {command:?}");
        match command {
            Command::AddElement(kind) => {
                if self.document.add_element(kind).is_some() {
                    self.status_message = Some("Element added".to_string());
                }
            }
            Command::SelectElement(id) => self.document.select_element(id),
            Command::SelectNext => self.document.select_next(),
            Command::SelectPrevious => self.document.select_previous(),
            Command::PropertyChanged(id, patch) => self.document.update_properties(&id, &patch),
            Command::RemoveElement(id) => {
                self.document.remove_element(&id);
                if self.drag.source_id() == Some(&id) {
                    self.drag.cancel();
                }
            }
            Command::ToggleWidth(id) => self.document.toggle_width(&id),
            Command::SetLayoutMode(mode) => {
                self.document.set_layout_mode(mode);
                self.status_message = Some(format!("Layout: {}", mode.label()));
            }
            Command::TogglePreview => {
                self.drag.cancel();
                self.document.toggle_preview();
            }
            Command::BeginDrag(payload) => {
                if let DragPayload::Existing(id) = &payload {
                    if !self.document.contains(id) {
                        return;
                    }
                    self.document.select_element(Some(id.clone()));
                }
                self.drag.begin(payload);
            }
            Command::DragOver(target) => self.drag.drag_over(target),
            Command::Drop(target) => {
                match self.drag.drop_on(target, &mut self.document) {
                    DropOutcome::Reordered => {
                        self.status_message = Some("Element moved".to_string());
                    }
                    DropOutcome::Added(_) => {
                        self.status_message = Some("Element added".to_string());
                    }
                    DropOutcome::Ignored => {}
                }
            }
            Command::CancelDrag => self.drag.cancel(),
        }
        self.sync_properties();

        if self.show_json {
            if let Err(e) = self.refresh_json() {
                self.push_error(format!("Failed to serialize form: {e:#}"));
            }
        }
    }

    /// Re-render the JSON viewer text from the live document
    pub fn refresh_json(&mut self) -> anyhow::Result<()> {
        self.json_text = export_document(&self.document, &self.form_info).to_json_pretty()?;
        Ok(())
    }

    /// Keep the properties form pointed at the current selection
    pub fn sync_properties(&mut self) {
        match self.document.selected() {
            Some(element) => match &mut self.properties {
                Some(form) if form.element_id == element.id => form.refresh(element),
                _ => self.properties = Some(PropertiesForm::from_element(element)),
            },
            None => self.properties = None,
        }
    }

    /// Move the keyboard drag target by `delta` elements
    pub fn step_drag_target(&mut self, delta: isize) {
        let Some(source) = self.drag.source_id() else {
            return;
        };
        let elements = self.document.elements();
        if elements.is_empty() {
            return;
        }

        let current = match self.drag.hover() {
            Some(DropTarget::Element(id)) => self.document.position(id),
            _ => self.document.position(source),
        }
        .unwrap_or(0);

        let next = current
            .saturating_add_signed(delta)
            .min(elements.len() - 1);
        let target = DropTarget::Element(elements[next].id.clone());
        self.drag.drag_over(Some(target));
    }

    /// Push an error message for display
    pub fn push_error(&mut self, message: String) {
        tracing::warn!("{message}");
        self.error_queue.push_back(message);
    }

    pub fn has_errors(&self) -> bool {
        !self.error_queue.is_empty()
    }

    /// The error currently shown in the dialog
    pub fn current_error(&self) -> Option<&str> {
        self.error_queue.front().map(String::as_str)
    }

    pub fn dismiss_error(&mut self) {
        self.error_queue.pop_front();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::element::{ElementId, ElementKind, ElementPatch, Width};
    use pretty_assertions::assert_eq;

    fn state_with(n: usize) -> (AppState, Vec<ElementId>) {
        let mut state = AppState::default();
        for _ in 0..n {
            state.dispatch(Command::AddElement(ElementKind::TextField));
        }
        let ids = state
            .document
            .elements()
            .iter()
            .map(|e| e.id.clone())
            .collect();
        (state, ids)
    }

    mod dispatch {
        use super::*;
        use pretty_assertions::assert_eq;

        #[test]
        fn test_add_opens_properties_for_new_element() {
            let (state, ids) = state_with(2);
            let form = state.properties.as_ref().unwrap();
            assert_eq!(form.element_id, ids[1]);
        }

        #[test]
        fn test_property_change_refreshes_form() {
            let (mut state, ids) = state_with(1);
            state.dispatch(Command::PropertyChanged(
                ids[0].clone(),
                ElementPatch::label("Surname"),
            ));
            let form = state.properties.as_ref().unwrap();
            assert_eq!(form.fields[0].as_text(), "Surname");
        }

        #[test]
        fn test_remove_selected_closes_properties() {
            let (mut state, ids) = state_with(1);
            state.dispatch(Command::RemoveElement(ids[0].clone()));
            assert!(state.properties.is_none());
            assert!(state.document.is_empty());
        }

        #[test]
        fn test_set_layout_reports_status() {
            let (mut state, ids) = state_with(1);
            state.dispatch(Command::ToggleWidth(ids[0].clone()));
            state.dispatch(Command::SetLayoutMode(LayoutMode::Grid));
            assert_eq!(state.status_message.as_deref(), Some("Layout: Grid"));
            assert_eq!(state.document.get(&ids[0]).unwrap().width, Width::Half);
        }

        #[test]
        fn test_toggle_preview_cancels_drag() {
            let (mut state, ids) = state_with(1);
            state.dispatch(Command::BeginDrag(DragPayload::Existing(ids[0].clone())));
            state.dispatch(Command::TogglePreview);
            assert!(!state.drag.is_dragging());
            assert!(state.document.is_preview());
        }
    }

    mod drag {
        use super::*;
        use pretty_assertions::assert_eq;

        #[test]
        fn test_begin_drag_selects_source() {
            let (mut state, ids) = state_with(3);
            state.dispatch(Command::BeginDrag(DragPayload::Existing(ids[0].clone())));
            assert_eq!(state.document.selected_id(), Some(&ids[0]));
            assert!(state.drag.is_dragging());
        }

        #[test]
        fn test_begin_drag_of_missing_element_is_ignored() {
            let (mut state, _) = state_with(1);
            state.dispatch(Command::BeginDrag(DragPayload::Existing(ElementId::from("x"))));
            assert!(!state.drag.is_dragging());
        }

        #[test]
        fn test_drop_reorders_and_reports() {
            let (mut state, ids) = state_with(3);
            state.dispatch(Command::BeginDrag(DragPayload::Existing(ids[2].clone())));
            state.dispatch(Command::Drop(DropTarget::Element(ids[0].clone())));
            let order: Vec<_> = state.document.elements().iter().map(|e| e.id.clone()).collect();
            assert_eq!(order, vec![ids[2].clone(), ids[0].clone(), ids[1].clone()]);
            assert_eq!(state.status_message.as_deref(), Some("Element moved"));
            assert!(!state.drag.is_dragging());
        }

        #[test]
        fn test_removing_dragged_element_cancels_drag() {
            let (mut state, ids) = state_with(2);
            state.dispatch(Command::BeginDrag(DragPayload::Existing(ids[0].clone())));
            state.dispatch(Command::RemoveElement(ids[0].clone()));
            assert!(!state.drag.is_dragging());
        }

        #[test]
        fn test_step_drag_target_moves_and_clamps() {
            let (mut state, ids) = state_with(3);
            state.dispatch(Command::BeginDrag(DragPayload::Existing(ids[1].clone())));
            state.step_drag_target(1);
            assert_eq!(state.drag.hover(), Some(&DropTarget::Element(ids[2].clone())));
            state.step_drag_target(1);
            assert_eq!(state.drag.hover(), Some(&DropTarget::Element(ids[2].clone())));
            state.step_drag_target(-5);
            assert_eq!(state.drag.hover(), Some(&DropTarget::Element(ids[0].clone())));
        }

        #[test]
        fn test_step_drag_target_requires_existing_payload() {
            let (mut state, _) = state_with(2);
            state.dispatch(Command::BeginDrag(DragPayload::Palette(ElementKind::Time)));
            state.step_drag_target(1);
            assert!(state.drag.hover().is_none());
        }
    }

    mod json_viewer {
        use super::*;
        use pretty_assertions::assert_eq;

        fn total_elements(state: &AppState) -> serde_json::Value {
            let json: serde_json::Value = serde_json::from_str(&state.json_text).unwrap();
            json["metadata"]["totalElements"].clone()
        }

        #[test]
        fn test_open_viewer_follows_document_changes() {
            let (mut state, ids) = state_with(1);
            state.refresh_json().unwrap();
            state.show_json = true;
            assert_eq!(total_elements(&state), 1);

            state.dispatch(Command::AddElement(ElementKind::Time));
            assert_eq!(total_elements(&state), 2);

            state.dispatch(Command::PropertyChanged(
                ids[0].clone(),
                ElementPatch::label("Surname"),
            ));
            assert!(state.json_text.contains("\"label\": \"Surname\""));
        }

        #[test]
        fn test_closed_viewer_is_not_refreshed() {
            let (mut state, _) = state_with(1);
            state.dispatch(Command::AddElement(ElementKind::Time));
            assert!(state.json_text.is_empty());
        }
    }

    mod errors {
        use super::*;
        use pretty_assertions::assert_eq;

        #[test]
        fn test_error_queue_is_fifo() {
            let mut state = AppState::default();
            assert!(!state.has_errors());
            state.push_error("first".into());
            state.push_error("second".into());
            assert_eq!(state.current_error(), Some("first"));
            state.dismiss_error();
            assert_eq!(state.current_error(), Some("second"));
            state.dismiss_error();
            assert!(!state.has_errors());
        }
    }

    #[test]
    fn test_focus_cycles() {
        assert_eq!(Focus::Palette.next().next().next(), Focus::Palette);
        assert_eq!(Focus::Canvas.prev(), Focus::Palette);
    }

    #[test]
    fn test_new_uses_layout() {
        let state = AppState::new(LayoutMode::Grid, FormInfo::default());
        assert_eq!(state.document.layout_mode(), LayoutMode::Grid);
    }
}
