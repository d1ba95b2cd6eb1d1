//! Palette catalog of creatable element types

use super::element::ElementKind;

/// One palette entry
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PaletteItem {
    pub tag: &'static str,
    pub label: &'static str,
}

impl PaletteItem {
    pub fn kind(&self) -> ElementKind {
        ElementKind::from_tag(self.tag)
    }
}

/// A titled group of palette entries
#[derive(Debug, Clone, Copy)]
pub struct PaletteCategory {
    pub title: &'static str,
    pub items: &'static [PaletteItem],
}

/// Palette shown in the left pane
pub const PALETTE: &[PaletteCategory] = &[
    PaletteCategory {
        title: "Containers",
        items: &[PaletteItem {
            tag: "workflow-step",
            label: "WORKFLOW STEP",
        }],
    },
    PaletteCategory {
        title: "Text Elements",
        items: &[
            PaletteItem {
                tag: "text-field",
                label: "TEXT FIELD",
            },
            PaletteItem {
                tag: "textarea",
                label: "NOTES",
            },
        ],
    },
    PaletteCategory {
        title: "Date Elements",
        items: &[
            PaletteItem {
                tag: "date-picker",
                label: "DATE PICKER",
            },
            PaletteItem {
                tag: "time",
                label: "TIME",
            },
        ],
    },
    PaletteCategory {
        title: "Other Elements",
        items: &[
            PaletteItem {
                tag: "radio",
                label: "RADIO",
            },
            PaletteItem {
                tag: "dropdown",
                label: "DROPDOWN",
            },
            PaletteItem {
                tag: "checkbox",
                label: "CHECKBOX",
            },
            PaletteItem {
                tag: "signature",
                label: "SIGNATURE",
            },
        ],
    },
    PaletteCategory {
        title: "Media Elements",
        items: &[
            PaletteItem {
                tag: "file-upload",
                label: "UPLOAD",
            },
            PaletteItem {
                tag: "image",
                label: "IMAGE",
            },
        ],
    },
    PaletteCategory {
        title: "Issue",
        items: &[
            PaletteItem {
                tag: "container-heading",
                label: "CONTAINER HEADING",
            },
            PaletteItem {
                tag: "container-subheading",
                label: "CONTAINER SUBHEADING",
            },
        ],
    },
];

/// Total number of selectable palette entries
pub fn palette_len() -> usize {
    PALETTE.iter().map(|c| c.items.len()).sum()
}

/// Palette entry by flat index across all categories
pub fn palette_item(index: usize) -> Option<&'static PaletteItem> {
    PALETTE.iter().flat_map(|c| c.items.iter()).nth(index)
}

/// A line of the rendered palette: category headers and entries interleaved
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PaletteLine {
    Header(&'static str),
    Item(usize, &'static PaletteItem),
}

/// Palette flattened into display lines
pub fn palette_lines() -> Vec<PaletteLine> {
    let mut lines = Vec::new();
    let mut index = 0;
    for category in PALETTE {
        lines.push(PaletteLine::Header(category.title));
        for item in category.items {
            lines.push(PaletteLine::Item(index, item));
            index += 1;
        }
    }
    lines
}
