//! Commands translated from user gestures
//!
//! Key presses and mouse events are turned into these values and applied
//! one at a time by [`AppState::dispatch`](super::AppState::dispatch).

use super::drag::{DragPayload, DropTarget};
use super::element::{ElementId, ElementKind, ElementPatch};
use super::packing::LayoutMode;

#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    AddElement(ElementKind),
    SelectElement(Option<ElementId>),
    SelectNext,
    SelectPrevious,
    PropertyChanged(ElementId, ElementPatch),
    RemoveElement(ElementId),
    ToggleWidth(ElementId),
    SetLayoutMode(LayoutMode),
    TogglePreview,
    BeginDrag(DragPayload),
    DragOver(Option<DropTarget>),
    Drop(DropTarget),
    CancelDrag,
}
