//! Drag-and-drop gesture protocol
//!
//! A drag carries either an existing element (reorder) or a palette type
//! (create). The payload decides what a drop does; the state only records
//! that a gesture is in progress.

use super::document::DocumentStore;
use super::element::{ElementId, ElementKind};

/// What is being dragged
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DragPayload {
    /// An element already on the canvas
    Existing(ElementId),
    /// A new element type picked from the palette
    Palette(ElementKind),
}

/// Where a drag was released
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DropTarget {
    /// On top of an element on the canvas
    Element(ElementId),
    /// The empty area after the last element
    EndZone,
}

/// Result of a drop, for status feedback
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DropOutcome {
    Reordered,
    Added(ElementId),
    Ignored,
}

/// Gesture state held outside the document
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum DragState {
    #[default]
    Idle,
    Dragging {
        payload: DragPayload,
        /// Target currently under the pointer, for highlighting only
        hover: Option<DropTarget>,
    },
}

impl DragState {
    pub fn is_dragging(&self) -> bool {
        matches!(self, DragState::Dragging { .. })
    }

    pub fn payload(&self) -> Option<&DragPayload> {
        match self {
            DragState::Idle => None,
            DragState::Dragging { payload, .. } => Some(payload),
        }
    }

    pub fn hover(&self) -> Option<&DropTarget> {
        match self {
            DragState::Idle => None,
            DragState::Dragging { hover, .. } => hover.as_ref(),
        }
    }

    /// Id of the element being moved, if the drag carries one
    pub fn source_id(&self) -> Option<&ElementId> {
        match self.payload() {
            Some(DragPayload::Existing(id)) => Some(id),
            _ => None,
        }
    }

    /// Pick something up. A drag already in progress is replaced.
    pub fn begin(&mut self, payload: DragPayload) {
        *self = DragState::Dragging {
            payload,
            hover: None,
        };
    }

    /// Record the target under the pointer
    pub fn drag_over(&mut self, target: Option<DropTarget>) {
        if let DragState::Dragging { hover, .. } = self {
            *hover = target;
        }
    }

    /// Release over a target. Always ends the gesture.
    pub fn drop_on(&mut self, target: DropTarget, store: &mut DocumentStore) -> DropOutcome {
        let DragState::Dragging { payload, .. } = std::mem::take(self) else {
            return DropOutcome::Ignored;
        };

        match (payload, target) {
            (DragPayload::Existing(source), DropTarget::Element(target)) => {
                if source == target || !store.contains(&source) || !store.contains(&target) {
                    return DropOutcome::Ignored;
                }
                store.reorder(&source, &target);
                DropOutcome::Reordered
            }
            (DragPayload::Existing(_), DropTarget::EndZone) => DropOutcome::Ignored,
            (DragPayload::Palette(kind), _) => match store.add_element(kind) {
                Some(id) => DropOutcome::Added(id),
                None => DropOutcome::Ignored,
            },
        }
    }

    /// Abandon the gesture without touching the document
    pub fn cancel(&mut self) {
        *self = DragState::Idle;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn store_with(n: usize) -> (DocumentStore, Vec<ElementId>) {
        let mut store = DocumentStore::new();
        let ids = (0..n)
            .map(|_| store.add_element(ElementKind::TextField).unwrap())
            .collect();
        (store, ids)
    }

    fn order(store: &DocumentStore) -> Vec<ElementId> {
        store.elements().iter().map(|e| e.id.clone()).collect()
    }

    #[test]
    fn test_begin_enters_dragging() {
        let mut drag = DragState::default();
        assert!(!drag.is_dragging());
        drag.begin(DragPayload::Existing(ElementId::from("a")));
        assert!(drag.is_dragging());
        assert_eq!(drag.source_id(), Some(&ElementId::from("a")));
    }

    #[test]
    fn test_drop_on_other_element_reorders() {
        let (mut store, ids) = store_with(3);
        let mut drag = DragState::default();
        drag.begin(DragPayload::Existing(ids[0].clone()));
        let outcome = drag.drop_on(DropTarget::Element(ids[1].clone()), &mut store);

        assert_eq!(outcome, DropOutcome::Reordered);
        assert_eq!(drag, DragState::Idle);
        assert_eq!(order(&store), vec![ids[1].clone(), ids[0].clone(), ids[2].clone()]);
    }

    #[test]
    fn test_drop_on_self_leaves_order() {
        let (mut store, ids) = store_with(3);
        let before = order(&store);
        let mut drag = DragState::default();
        drag.begin(DragPayload::Existing(ids[1].clone()));
        let outcome = drag.drop_on(DropTarget::Element(ids[1].clone()), &mut store);

        assert_eq!(outcome, DropOutcome::Ignored);
        assert_eq!(drag, DragState::Idle);
        assert_eq!(order(&store), before);
    }

    #[test]
    fn test_existing_on_end_zone_is_ignored() {
        let (mut store, ids) = store_with(2);
        let before = order(&store);
        let mut drag = DragState::default();
        drag.begin(DragPayload::Existing(ids[0].clone()));
        assert_eq!(
            drag.drop_on(DropTarget::EndZone, &mut store),
            DropOutcome::Ignored
        );
        assert_eq!(order(&store), before);
        assert!(!drag.is_dragging());
    }

    #[test]
    fn test_palette_drop_adds_element() {
        let (mut store, _) = store_with(1);
        let mut drag = DragState::default();
        drag.begin(DragPayload::Palette(ElementKind::Dropdown));
        let outcome = drag.drop_on(DropTarget::EndZone, &mut store);

        let DropOutcome::Added(id) = outcome else {
            panic!("expected an added element, got {outcome:?}");
        };
        assert_eq!(store.len(), 2);
        assert_eq!(store.selected_id(), Some(&id));
        assert_eq!(store.get(&id).unwrap().kind, ElementKind::Dropdown);
    }

    #[test]
    fn test_palette_drop_on_element_appends() {
        let (mut store, ids) = store_with(2);
        let mut drag = DragState::default();
        drag.begin(DragPayload::Palette(ElementKind::Time));
        drag.drop_on(DropTarget::Element(ids[0].clone()), &mut store);
        assert_eq!(store.len(), 3);
        assert_eq!(store.elements()[2].kind, ElementKind::Time);
    }

    #[test]
    fn test_drop_while_idle_does_nothing() {
        let (mut store, ids) = store_with(2);
        let mut drag = DragState::default();
        assert_eq!(
            drag.drop_on(DropTarget::Element(ids[0].clone()), &mut store),
            DropOutcome::Ignored
        );
        assert_eq!(store.len(), 2);
    }

    #[test]
    fn test_cancel_returns_to_idle_without_mutation() {
        let (store, ids) = store_with(2);
        let before = order(&store);
        let mut drag = DragState::default();
        drag.begin(DragPayload::Existing(ids[0].clone()));
        drag.drag_over(Some(DropTarget::Element(ids[1].clone())));
        assert_eq!(drag.hover(), Some(&DropTarget::Element(ids[1].clone())));
        drag.cancel();
        assert_eq!(drag, DragState::Idle);
        assert_eq!(order(&store), before);
    }

    #[test]
    fn test_drag_over_ignored_when_idle() {
        let mut drag = DragState::default();
        drag.drag_over(Some(DropTarget::EndZone));
        assert!(drag.hover().is_none());
    }
}
