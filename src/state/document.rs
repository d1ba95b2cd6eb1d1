//! The form document store
//!
//! Owns the element sequence, the selection and the global layout mode.
//! Every operation is total: unknown ids degrade to no-ops.

use super::element::{ElementId, ElementKind, ElementPatch, FormElement, Width};
use super::packing::LayoutMode;

/// Aggregate document state and its mutation surface
#[derive(Debug, Clone, Default)]
pub struct DocumentStore {
    elements: Vec<FormElement>,
    selected_id: Option<ElementId>,
    layout_mode: LayoutMode,
    preview_mode: bool,
}

impl DocumentStore {
    #[cfg(test)]
    pub fn new() -> Self {
        Self::default()
    }

    /// Empty document starting in the given layout mode
    pub fn with_layout(layout_mode: LayoutMode) -> Self {
        Self {
            layout_mode,
            ..Self::default()
        }
    }

    pub fn elements(&self) -> &[FormElement] {
        &self.elements
    }

    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    pub fn layout_mode(&self) -> LayoutMode {
        self.layout_mode
    }

    pub fn is_preview(&self) -> bool {
        self.preview_mode
    }

    pub fn selected_id(&self) -> Option<&ElementId> {
        self.selected_id.as_ref()
    }

    /// The selected element, read from the live collection
    pub fn selected(&self) -> Option<&FormElement> {
        self.selected_id.as_ref().and_then(|id| self.get(id))
    }

    pub fn get(&self, id: &ElementId) -> Option<&FormElement> {
        self.elements.iter().find(|e| &e.id == id)
    }

    pub fn position(&self, id: &ElementId) -> Option<usize> {
        self.elements.iter().position(|e| &e.id == id)
    }

    pub fn contains(&self, id: &ElementId) -> bool {
        self.position(id).is_some()
    }

    /// Create an element of the given kind, append it and select it
    pub fn add_element(&mut self, kind: ElementKind) -> Option<ElementId> {
        if kind.tag().is_empty() {
            tracing::warn!("Ignoring element with empty type tag");
            return None;
        }

        let mut element = FormElement::new(kind);
        while self.contains(&element.id) {
            element.id = ElementId::generate();
        }

        let id = element.id.clone();
        tracing::debug!("Adding {} element {id}", element.kind);
        self.elements.push(element);
        self.selected_id = Some(id.clone());
        Some(id)
    }

    /// Set or clear the selection
    pub fn select_element(&mut self, id: Option<ElementId>) {
        self.selected_id = id;
    }

    /// Select the element after the current selection
    pub fn select_next(&mut self) {
        if self.elements.is_empty() {
            return;
        }
        let next = match self.selected_id.as_ref().and_then(|id| self.position(id)) {
            Some(idx) => (idx + 1).min(self.elements.len() - 1),
            None => 0,
        };
        self.selected_id = Some(self.elements[next].id.clone());
    }

    /// Select the element before the current selection
    pub fn select_previous(&mut self) {
        if self.elements.is_empty() {
            return;
        }
        let prev = match self.selected_id.as_ref().and_then(|id| self.position(id)) {
            Some(idx) => idx.saturating_sub(1),
            None => self.elements.len() - 1,
        };
        self.selected_id = Some(self.elements[prev].id.clone());
    }

    /// Merge a partial update into the matching element
    pub fn update_properties(&mut self, id: &ElementId, patch: &ElementPatch) {
        match self.elements.iter_mut().find(|e| &e.id == id) {
            Some(element) => element.apply(patch),
            None => tracing::debug!("update_properties: no element {id}"),
        }
    }

    /// Delete the matching element, clearing the selection if it pointed there
    pub fn remove_element(&mut self, id: &ElementId) {
        let before = self.elements.len();
        self.elements.retain(|e| &e.id != id);
        if self.elements.len() == before {
            tracing::debug!("remove_element: no element {id}");
        }
        if self.selected_id.as_ref() == Some(id) {
            self.selected_id = None;
        }
    }

    /// Move `source` into the index `target` occupies before the move
    pub fn reorder(&mut self, source: &ElementId, target: &ElementId) {
        if source == target {
            return;
        }
        let (Some(from), Some(to)) = (self.position(source), self.position(target)) else {
            return;
        };

        let moved = self.elements.remove(from);
        self.elements.insert(to, moved);
    }

    /// Flip full/half unless the element kind is layout-locked
    pub fn toggle_width(&mut self, id: &ElementId) {
        if let Some(element) = self.elements.iter_mut().find(|e| &e.id == id) {
            if element.kind.is_layout_locked() {
                return;
            }
            element.width = element.width.toggle();
        }
    }

    /// Switch layout mode. Entering grid narrows every unlocked full element.
    pub fn set_layout_mode(&mut self, mode: LayoutMode) {
        if mode == LayoutMode::Grid && self.layout_mode != LayoutMode::Grid {
            for element in &mut self.elements {
                if !element.kind.is_layout_locked() && element.width == Width::Full {
                    element.width = Width::Half;
                }
            }
        }
        self.layout_mode = mode;
    }

    pub fn toggle_preview(&mut self) {
        self.preview_mode = !self.preview_mode;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn store_with(tags: &[&str]) -> (DocumentStore, Vec<ElementId>) {
        let mut store = DocumentStore::new();
        let ids = tags
            .iter()
            .map(|tag| store.add_element(ElementKind::from_tag(tag)).unwrap())
            .collect();
        (store, ids)
    }

    fn order(store: &DocumentStore) -> Vec<ElementId> {
        store.elements().iter().map(|e| e.id.clone()).collect()
    }

    mod add_and_select {
        use super::*;
        use pretty_assertions::assert_eq;

        #[test]
        fn test_add_appends_and_selects() {
            let mut store = DocumentStore::new();
            for n in 1..=4 {
                let id = store.add_element(ElementKind::TextField).unwrap();
                assert_eq!(store.len(), n);
                assert_eq!(store.selected_id(), Some(&id));
                assert_eq!(store.elements().last().unwrap().id, id);
            }
        }

        #[test]
        fn test_add_accepts_unknown_kind() {
            let mut store = DocumentStore::new();
            let id = store.add_element(ElementKind::from_tag("signature"));
            assert!(id.is_some());
            assert_eq!(store.len(), 1);
        }

        #[test]
        fn test_add_rejects_empty_tag() {
            let mut store = DocumentStore::new();
            assert!(store.add_element(ElementKind::from_tag("")).is_none());
            assert!(store.is_empty());
        }

        #[test]
        fn test_dangling_selection_reads_as_none() {
            let (mut store, _) = store_with(&["time"]);
            store.select_element(Some(ElementId::from("missing")));
            assert!(store.selected().is_none());
        }

        #[test]
        fn test_select_next_and_previous_clamp() {
            let (mut store, ids) = store_with(&["time", "radio", "checkbox"]);
            store.select_element(None);
            store.select_next();
            assert_eq!(store.selected_id(), Some(&ids[0]));
            store.select_previous();
            assert_eq!(store.selected_id(), Some(&ids[0]));
            store.select_next();
            store.select_next();
            store.select_next();
            assert_eq!(store.selected_id(), Some(&ids[2]));

            store.select_element(None);
            store.select_previous();
            assert_eq!(store.selected_id(), Some(&ids[2]));
        }
    }

    mod update {
        use super::*;
        use pretty_assertions::assert_eq;

        #[test]
        fn test_update_is_idempotent() {
            let (mut store, ids) = store_with(&["text-field"]);
            let patch = ElementPatch {
                label: Some("Email".into()),
                required: Some(true),
                ..Default::default()
            };
            store.update_properties(&ids[0], &patch);
            let once = store.get(&ids[0]).unwrap().clone();
            store.update_properties(&ids[0], &patch);
            assert_eq!(store.get(&ids[0]).unwrap(), &once);
            assert_eq!(once.label, "Email");
            assert!(once.required);
            assert_eq!(once.options.len(), 2);
        }

        #[test]
        fn test_selected_element_reflects_update() {
            let (mut store, ids) = store_with(&["dropdown"]);
            store.update_properties(&ids[0], &ElementPatch::options(vec!["A".into()]));
            assert_eq!(store.selected().unwrap().options, vec!["A".to_string()]);
        }

        #[test]
        fn test_update_missing_id_is_noop() {
            let (mut store, _) = store_with(&["time"]);
            let before = store.elements().to_vec();
            store.update_properties(&ElementId::from("nope"), &ElementPatch::label("x"));
            assert_eq!(store.elements(), before.as_slice());
        }
    }

    mod remove {
        use super::*;
        use pretty_assertions::assert_eq;

        #[test]
        fn test_remove_twice_is_idempotent() {
            let (mut store, ids) = store_with(&["time", "radio"]);
            store.remove_element(&ids[0]);
            let after_first = order(&store);
            store.remove_element(&ids[0]);
            assert_eq!(order(&store), after_first);
            assert_eq!(store.len(), 1);
        }

        #[test]
        fn test_remove_selected_clears_selection() {
            let (mut store, ids) = store_with(&["time", "radio"]);
            assert_eq!(store.selected_id(), Some(&ids[1]));
            store.remove_element(&ids[1]);
            assert!(store.selected_id().is_none());
        }

        #[test]
        fn test_remove_other_keeps_selection() {
            let (mut store, ids) = store_with(&["time", "radio"]);
            store.remove_element(&ids[0]);
            assert_eq!(store.selected_id(), Some(&ids[1]));
        }
    }

    mod reorder {
        use super::*;
        use pretty_assertions::assert_eq;

        #[test]
        fn test_forward_move() {
            let (mut store, ids) = store_with(&["time", "radio", "checkbox"]);
            store.reorder(&ids[0], &ids[1]);
            assert_eq!(order(&store), vec![ids[1].clone(), ids[0].clone(), ids[2].clone()]);
        }

        #[test]
        fn test_backward_move() {
            let (mut store, ids) = store_with(&["time", "radio", "checkbox"]);
            store.reorder(&ids[2], &ids[0]);
            assert_eq!(order(&store), vec![ids[2].clone(), ids[0].clone(), ids[1].clone()]);
        }

        #[test]
        fn test_self_and_missing_are_noops() {
            let (mut store, ids) = store_with(&["time", "radio", "checkbox"]);
            let before = order(&store);
            store.reorder(&ids[1], &ids[1]);
            store.reorder(&ElementId::from("ghost"), &ids[0]);
            store.reorder(&ids[0], &ElementId::from("ghost"));
            assert_eq!(order(&store), before);
        }
    }

    mod width_and_layout {
        use super::*;
        use pretty_assertions::assert_eq;

        #[test]
        fn test_toggle_width_twice_restores() {
            let (mut store, ids) = store_with(&["text-field"]);
            store.toggle_width(&ids[0]);
            assert_eq!(store.get(&ids[0]).unwrap().width, Width::Full);
            store.toggle_width(&ids[0]);
            assert_eq!(store.get(&ids[0]).unwrap().width, Width::Half);
        }

        #[test]
        fn test_toggle_width_locked_stays_full() {
            let (mut store, ids) = store_with(&["workflow-step", "textarea"]);
            for id in &ids {
                store.toggle_width(id);
                assert_eq!(store.get(id).unwrap().width, Width::Full);
            }
        }

        #[test]
        fn test_entering_grid_narrows_unlocked_full() {
            let (mut store, ids) = store_with(&["text-field", "container-heading"]);
            store.toggle_width(&ids[0]);
            store.set_layout_mode(LayoutMode::Grid);
            assert_eq!(store.layout_mode(), LayoutMode::Grid);
            assert_eq!(store.get(&ids[0]).unwrap().width, Width::Half);
            assert_eq!(store.get(&ids[1]).unwrap().width, Width::Full);
        }

        #[test]
        fn test_grid_width_choice_survives_mode_round_trip_until_reentry() {
            let (mut store, ids) = store_with(&["text-field"]);
            store.set_layout_mode(LayoutMode::Grid);
            store.toggle_width(&ids[0]);
            assert_eq!(store.get(&ids[0]).unwrap().width, Width::Full);

            store.set_layout_mode(LayoutMode::Vertical);
            assert_eq!(store.get(&ids[0]).unwrap().width, Width::Full);

            store.set_layout_mode(LayoutMode::Grid);
            assert_eq!(store.get(&ids[0]).unwrap().width, Width::Half);
        }

        #[test]
        fn test_setting_grid_while_in_grid_keeps_widths() {
            let (mut store, ids) = store_with(&["text-field"]);
            store.set_layout_mode(LayoutMode::Grid);
            store.toggle_width(&ids[0]);
            store.set_layout_mode(LayoutMode::Grid);
            assert_eq!(store.get(&ids[0]).unwrap().width, Width::Full);
        }
    }

    #[test]
    fn test_toggle_preview_leaves_elements() {
        let (mut store, _) = store_with(&["time"]);
        let before = store.elements().to_vec();
        store.toggle_preview();
        assert!(store.is_preview());
        assert_eq!(store.elements(), before.as_slice());
        store.toggle_preview();
        assert!(!store.is_preview());
    }
}
