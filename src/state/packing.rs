//! Row packing for the builder canvas and the preview
//!
//! Both surfaces group elements with [`pack_rows`] so that what the user
//! arranges is exactly what the preview shows.

use super::element::{FormElement, Width};
use serde::{Deserialize, Serialize};

/// Slots available in one grid row
pub const GRID_ROW_SLOTS: u8 = 2;

/// Global layout mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LayoutMode {
    /// Single column, one element per row
    #[default]
    Vertical,
    /// Two slots per row, driven by element width
    Grid,
}

impl LayoutMode {
    pub fn toggle(self) -> Self {
        match self {
            Self::Vertical => Self::Grid,
            Self::Grid => Self::Vertical,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Vertical => "Vertical",
            Self::Grid => "Grid",
        }
    }
}

/// One display row
pub type Row<'a> = Vec<&'a FormElement>;

/// Group elements into display rows.
///
/// In vertical mode every element gets its own row. In grid mode a full-width
/// element always owns a row and up to two half-width elements share one.
pub fn pack_rows(elements: &[FormElement], mode: LayoutMode) -> Vec<Row<'_>> {
    match mode {
        LayoutMode::Vertical => elements.iter().map(|e| vec![e]).collect(),
        LayoutMode::Grid => pack_grid(elements),
    }
}

fn pack_grid(elements: &[FormElement]) -> Vec<Row<'_>> {
    let mut rows = Vec::new();
    let mut current: Row<'_> = Vec::new();
    let mut filled: u8 = 0;

    for element in elements {
        match element.width {
            Width::Full => {
                if !current.is_empty() {
                    rows.push(std::mem::take(&mut current));
                }
                rows.push(vec![element]);
                filled = 0;
            }
            Width::Half => {
                if filled >= GRID_ROW_SLOTS {
                    rows.push(std::mem::take(&mut current));
                    filled = 0;
                }
                current.push(element);
                filled += element.width.slots();
            }
        }
    }

    if !current.is_empty() {
        rows.push(current);
    }

    rows
}
