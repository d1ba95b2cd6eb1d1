//! Builder canvas
//!
//! Draws the packed rows of the document and resolves screen cells back to
//! drop targets for the drag protocol.

use super::layout::{contains, inner};
use crate::app::App;
use crate::state::{
    pack_rows, DropTarget, ElementId, Focus, FormElement, InputKind, LayoutMode, Row, Width,
};
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

/// Height of one element card on the canvas
pub const ELEMENT_HEIGHT: u16 = 3;

/// Screen position of one element card
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ElementSlot {
    pub id: ElementId,
    pub area: Rect,
}

/// Hit map of the canvas content
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CanvasGeometry {
    pub slots: Vec<ElementSlot>,
    /// Empty space after the last row, when visible
    pub end_zone: Option<Rect>,
}

impl CanvasGeometry {
    /// Drop target under a screen cell
    pub fn target_at(&self, column: u16, row: u16) -> Option<DropTarget> {
        if let Some(slot) = self
            .slots
            .iter()
            .find(|slot| contains(slot.area, column, row))
        {
            return Some(DropTarget::Element(slot.id.clone()));
        }
        self.end_zone
            .filter(|zone| contains(*zone, column, row))
            .map(|_| DropTarget::EndZone)
    }

    pub fn element_at(&self, column: u16, row: u16) -> Option<&ElementId> {
        self.slots
            .iter()
            .find(|slot| contains(slot.area, column, row))
            .map(|slot| &slot.id)
    }
}

/// Number of rows that fit in the canvas
pub fn visible_rows(canvas: Rect) -> usize {
    (inner(canvas).height / ELEMENT_HEIGHT) as usize
}

/// Lay out packed rows inside the canvas border, skipping `scroll` rows
pub fn canvas_geometry(
    canvas: Rect,
    rows: &[Row<'_>],
    mode: LayoutMode,
    scroll: usize,
) -> CanvasGeometry {
    let content = inner(canvas);
    let bottom = content.y + content.height;
    let half_width = content.width / 2;

    let mut slots = Vec::new();
    let mut y = content.y;
    let mut all_rows_shown = true;

    for row in rows.iter().skip(scroll) {
        if y + ELEMENT_HEIGHT > bottom {
            all_rows_shown = false;
            break;
        }

        let mut x = content.x;
        for element in row {
            let width = match (mode, element.width) {
                (LayoutMode::Grid, Width::Half) if x == content.x => half_width,
                (LayoutMode::Grid, Width::Half) => content.width - half_width,
                _ => content.width,
            };
            slots.push(ElementSlot {
                id: element.id.clone(),
                area: Rect::new(x, y, width, ELEMENT_HEIGHT),
            });
            x += width;
        }
        y += ELEMENT_HEIGHT;
    }

    let end_zone = (all_rows_shown && y < bottom)
        .then(|| Rect::new(content.x, y, content.width, bottom - y));

    CanvasGeometry { slots, end_zone }
}

/// Geometry for the current app state
pub fn geometry_for(app: &App, canvas: Rect) -> CanvasGeometry {
    let document = &app.state.document;
    let rows = pack_rows(document.elements(), document.layout_mode());
    canvas_geometry(canvas, &rows, document.layout_mode(), app.state.canvas_scroll)
}

/// One-line summary of the widget an element renders as
fn widget_summary(element: &FormElement) -> String {
    match element.kind.input_kind() {
        InputKind::Text | InputKind::MultilineText => {
            if element.placeholder.is_empty() {
                "[________]".to_string()
            } else {
                format!("[{}]", element.placeholder)
            }
        }
        InputKind::Date => "[yyyy-mm-dd]".to_string(),
        InputKind::Time => "[--:--]".to_string(),
        InputKind::Checkbox => "[ ]".to_string(),
        InputKind::Radio => element
            .options
            .iter()
            .map(|o| format!("( ) {o}"))
            .collect::<Vec<_>>()
            .join("  "),
        InputKind::Select => format!(
            "[{} ▾]",
            element.options.first().map(String::as_str).unwrap_or("")
        ),
        InputKind::Step => "workflow step".to_string(),
        InputKind::Heading => "heading".to_string(),
        InputKind::Subheading => "subheading".to_string(),
    }
}

fn draw_element(frame: &mut Frame, area: Rect, element: &FormElement, app: &App) {
    let is_selected = app.state.document.selected_id() == Some(&element.id);
    let is_dragged = app.state.drag.source_id() == Some(&element.id);
    let is_drop_target =
        matches!(app.state.drag.hover(), Some(DropTarget::Element(id)) if id == &element.id);

    let border_color = if is_drop_target {
        Color::Magenta
    } else if is_dragged {
        Color::Yellow
    } else if is_selected {
        Color::Cyan
    } else {
        Color::DarkGray
    };

    let mut title = vec![Span::styled(
        format!(" {} ", element.label),
        Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
    )];
    if element.required {
        title.push(Span::styled("* ", Style::default().fg(Color::Red)));
    }

    let mut meta = element.kind.tag().to_string();
    if app.state.document.layout_mode() == LayoutMode::Grid {
        meta.push_str(&format!(" · {}", element.width.label()));
        if element.kind.is_layout_locked() {
            meta.push_str(" (locked)");
        }
    }

    let body = Line::from(vec![
        Span::styled(widget_summary(element), Style::default().fg(Color::Gray)),
        Span::raw("  "),
        Span::styled(meta, Style::default().fg(Color::DarkGray)),
    ]);

    let block = Block::default()
        .title(Line::from(title))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(border_color));

    frame.render_widget(Paragraph::new(body).block(block), area);
}

/// Draw the canvas
pub fn draw(frame: &mut Frame, area: Rect, app: &App) {
    let document = &app.state.document;
    let is_focused = app.state.focus == Focus::Canvas;

    let title = format!(
        " Form Builder · {} · {} element{} ",
        document.layout_mode().label(),
        document.len(),
        if document.len() == 1 { "" } else { "s" }
    );
    let border_style = if is_focused {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default().fg(Color::DarkGray)
    };
    frame.render_widget(
        Block::default()
            .title(title)
            .borders(Borders::ALL)
            .border_style(border_style),
        area,
    );

    if document.is_empty() {
        let hint = Paragraph::new(vec![
            Line::from(""),
            Line::from(Span::styled(
                "Drag and drop form elements here",
                Style::default().fg(Color::White),
            )),
            Line::from(Span::styled(
                "or press Enter on a palette entry",
                Style::default().fg(Color::DarkGray),
            )),
        ])
        .alignment(ratatui::layout::Alignment::Center);
        let content = inner(area);
        let style = if app.state.drag.hover() == Some(&DropTarget::EndZone) {
            Style::default().bg(Color::DarkGray)
        } else {
            Style::default()
        };
        frame.render_widget(hint.style(style), content);
        return;
    }

    let geometry = geometry_for(app, area);
    for slot in &geometry.slots {
        if let Some(element) = document.get(&slot.id) {
            draw_element(frame, slot.area, element, app);
        }
    }

    if let Some(zone) = geometry.end_zone {
        let is_hovered = app.state.drag.hover() == Some(&DropTarget::EndZone);
        if app.state.drag.is_dragging() {
            let style = if is_hovered {
                Style::default().fg(Color::Magenta)
            } else {
                Style::default().fg(Color::DarkGray)
            };
            frame.render_widget(
                Paragraph::new("drop here to add")
                    .alignment(ratatui::layout::Alignment::Center)
                    .style(style),
                zone,
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::{DocumentStore, ElementKind};
    use pretty_assertions::assert_eq;

    fn grid_store() -> (DocumentStore, Vec<ElementId>) {
        let mut store = DocumentStore::with_layout(LayoutMode::Grid);
        let ids = ["text-field", "time", "textarea", "radio"]
            .iter()
            .map(|tag| store.add_element(ElementKind::from_tag(tag)).unwrap())
            .collect();
        (store, ids)
    }

    #[test]
    fn test_grid_geometry_places_halves_side_by_side() {
        let (store, ids) = grid_store();
        let canvas = Rect::new(0, 0, 42, 20);
        let rows = pack_rows(store.elements(), LayoutMode::Grid);
        let geometry = canvas_geometry(canvas, &rows, LayoutMode::Grid, 0);

        assert_eq!(geometry.slots.len(), 4);
        assert_eq!(geometry.slots[0].area, Rect::new(1, 1, 20, 3));
        assert_eq!(geometry.slots[1].area, Rect::new(21, 1, 20, 3));
        assert_eq!(geometry.slots[2].area, Rect::new(1, 4, 40, 3));
        assert_eq!(geometry.slots[3].area, Rect::new(1, 7, 20, 3));
        assert_eq!(geometry.slots[2].id, ids[2]);
        assert_eq!(geometry.end_zone, Some(Rect::new(1, 10, 40, 9)));
    }

    #[test]
    fn test_vertical_geometry_uses_full_width() {
        let (mut store, _) = grid_store();
        store.set_layout_mode(LayoutMode::Vertical);
        let rows = pack_rows(store.elements(), LayoutMode::Vertical);
        let geometry = canvas_geometry(Rect::new(0, 0, 42, 20), &rows, LayoutMode::Vertical, 0);
        assert!(geometry.slots.iter().all(|s| s.area.width == 40));
        assert_eq!(geometry.slots[3].area.y, 10);
    }

    #[test]
    fn test_target_at_resolves_elements_and_end_zone() {
        let (store, ids) = grid_store();
        let rows = pack_rows(store.elements(), LayoutMode::Grid);
        let geometry = canvas_geometry(Rect::new(0, 0, 42, 20), &rows, LayoutMode::Grid, 0);

        assert_eq!(geometry.target_at(25, 2), Some(DropTarget::Element(ids[1].clone())));
        assert_eq!(geometry.target_at(5, 15), Some(DropTarget::EndZone));
        assert_eq!(geometry.target_at(30, 8), None);
        assert_eq!(geometry.target_at(0, 0), None);
    }

    #[test]
    fn test_overflowing_rows_hide_end_zone() {
        let (store, _) = grid_store();
        let rows = pack_rows(store.elements(), LayoutMode::Grid);
        let geometry = canvas_geometry(Rect::new(0, 0, 42, 8), &rows, LayoutMode::Grid, 0);
        assert_eq!(geometry.slots.len(), 3);
        assert!(geometry.end_zone.is_none());
    }

    #[test]
    fn test_scroll_skips_rows() {
        let (store, ids) = grid_store();
        let rows = pack_rows(store.elements(), LayoutMode::Grid);
        let geometry = canvas_geometry(Rect::new(0, 0, 42, 20), &rows, LayoutMode::Grid, 1);
        assert_eq!(geometry.slots[0].id, ids[2]);
        assert_eq!(geometry.slots[0].area.y, 1);
    }

    #[test]
    fn test_empty_document_is_all_end_zone() {
        let geometry = canvas_geometry(Rect::new(0, 0, 42, 20), &[], LayoutMode::Vertical, 0);
        assert!(geometry.slots.is_empty());
        assert_eq!(geometry.end_zone, Some(Rect::new(1, 1, 40, 18)));
    }

    #[test]
    fn test_visible_rows() {
        assert_eq!(visible_rows(Rect::new(0, 0, 40, 20)), 6);
    }

    #[test]
    fn test_widget_summary_for_select_shows_first_option() {
        let element = FormElement::new(ElementKind::Dropdown);
        assert_eq!(widget_summary(&element), "[Option 1 ▾]");
    }
}
