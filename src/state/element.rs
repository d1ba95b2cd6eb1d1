//! Form element model and element factory

use chrono::Utc;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::BTreeMap;
use std::fmt;
use uuid::Uuid;

/// Options every new element starts with
pub const DEFAULT_OPTIONS: [&str; 2] = ["Option 1", "Option 2"];

/// Length of the random suffix in generated element ids
const ID_SUFFIX_LEN: usize = 9;

/// Opaque element identifier
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ElementId(String);

impl ElementId {
    /// Generate a fresh id from the wall clock and a random suffix
    pub fn generate() -> Self {
        let random = Uuid::new_v4().simple().to_string();
        Self(format!(
            "element-{}-{}",
            Utc::now().timestamp_millis(),
            &random[..ID_SUFFIX_LEN]
        ))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for ElementId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl From<String> for ElementId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl fmt::Display for ElementId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How an element is drawn as an input widget
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputKind {
    Text,
    MultilineText,
    Date,
    Time,
    Checkbox,
    Radio,
    Select,
    Heading,
    Subheading,
    Step,
}

/// Kind of a form element.
///
/// Unknown tags are kept verbatim in `Other` so that palettes can offer kinds
/// this build does not know how to draw; they fall back to a text input.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ElementKind {
    TextField,
    Textarea,
    DatePicker,
    Time,
    Checkbox,
    Radio,
    Dropdown,
    WorkflowStep,
    ContainerHeading,
    ContainerSubheading,
    Other(String),
}

impl ElementKind {
    /// Parse a type tag
    pub fn from_tag(tag: &str) -> Self {
        match tag {
            "text-field" => Self::TextField,
            "textarea" => Self::Textarea,
            "date-picker" => Self::DatePicker,
            "time" => Self::Time,
            "checkbox" => Self::Checkbox,
            "radio" => Self::Radio,
            "dropdown" => Self::Dropdown,
            "workflow-step" => Self::WorkflowStep,
            "container-heading" => Self::ContainerHeading,
            "container-subheading" => Self::ContainerSubheading,
            other => Self::Other(other.to_string()),
        }
    }

    /// The type tag as used in exported documents
    pub fn tag(&self) -> &str {
        match self {
            Self::TextField => "text-field",
            Self::Textarea => "textarea",
            Self::DatePicker => "date-picker",
            Self::Time => "time",
            Self::Checkbox => "checkbox",
            Self::Radio => "radio",
            Self::Dropdown => "dropdown",
            Self::WorkflowStep => "workflow-step",
            Self::ContainerHeading => "container-heading",
            Self::ContainerSubheading => "container-subheading",
            Self::Other(tag) => tag,
        }
    }

    /// Kinds whose width is pinned to `full`
    pub fn is_layout_locked(&self) -> bool {
        matches!(
            self,
            Self::WorkflowStep | Self::Textarea | Self::ContainerHeading | Self::ContainerSubheading
        )
    }

    /// Kinds whose renderers consume `options`
    pub fn supports_options(&self) -> bool {
        matches!(self, Self::Dropdown | Self::Radio)
    }

    /// Text-like kinds that show a placeholder
    pub fn supports_placeholder(&self) -> bool {
        matches!(self, Self::TextField | Self::Textarea | Self::Other(_))
    }

    pub fn input_kind(&self) -> InputKind {
        match self {
            Self::TextField | Self::Other(_) => InputKind::Text,
            Self::Textarea => InputKind::MultilineText,
            Self::DatePicker => InputKind::Date,
            Self::Time => InputKind::Time,
            Self::Checkbox => InputKind::Checkbox,
            Self::Radio => InputKind::Radio,
            Self::Dropdown => InputKind::Select,
            Self::WorkflowStep => InputKind::Step,
            Self::ContainerHeading => InputKind::Heading,
            Self::ContainerSubheading => InputKind::Subheading,
        }
    }

    /// Default width for a freshly created element of this kind
    pub fn default_width(&self) -> Width {
        if self.is_layout_locked() {
            Width::Full
        } else {
            Width::Half
        }
    }

    /// Human readable label derived from the tag.
    ///
    /// `date-picker` becomes `Date Picker Field`, `text-field` stays `Text Field`.
    pub fn default_label(&self) -> String {
        let words: Vec<String> = self
            .tag()
            .split(['-', '_', ' '])
            .filter(|w| !w.is_empty())
            .map(capitalize)
            .collect();

        let mut label = words.join(" ");
        if words.last().map(String::as_str) != Some("Field") {
            if !label.is_empty() {
                label.push(' ');
            }
            label.push_str("Field");
        }
        label
    }
}

impl From<String> for ElementKind {
    fn from(value: String) -> Self {
        Self::from_tag(&value)
    }
}

impl From<ElementKind> for String {
    fn from(value: ElementKind) -> Self {
        value.tag().to_string()
    }
}

impl fmt::Display for ElementKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Sizing hint consulted by grid packing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Width {
    #[default]
    Full,
    Half,
}

impl Width {
    pub fn toggle(self) -> Self {
        match self {
            Self::Full => Self::Half,
            Self::Half => Self::Full,
        }
    }

    /// Number of grid slots this width occupies
    pub fn slots(self) -> u8 {
        match self {
            Self::Full => 2,
            Self::Half => 1,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Full => "full",
            Self::Half => "half",
        }
    }
}

/// One placeable field or container
#[derive(Debug, Clone, PartialEq)]
pub struct FormElement {
    pub id: ElementId,
    pub kind: ElementKind,
    pub label: String,
    pub placeholder: String,
    pub required: bool,
    pub options: Vec<String>,
    pub width: Width,
    /// Fill-time value, never exported
    pub value: String,
    /// Properties this build does not model, kept for forward compatibility
    pub extra: BTreeMap<String, Value>,
}

impl FormElement {
    /// Create an element of the given kind with type-appropriate defaults
    pub fn new(kind: ElementKind) -> Self {
        Self {
            id: ElementId::generate(),
            label: kind.default_label(),
            placeholder: String::new(),
            required: false,
            options: DEFAULT_OPTIONS.iter().map(|o| o.to_string()).collect(),
            width: kind.default_width(),
            value: String::new(),
            extra: BTreeMap::new(),
            kind,
        }
    }

    /// Create an element from a raw type tag
    #[cfg(test)]
    pub fn from_tag(tag: &str) -> Self {
        Self::new(ElementKind::from_tag(tag))
    }

    /// Merge a partial update into this element.
    ///
    /// A width patch on a layout-locked kind is ignored.
    pub fn apply(&mut self, patch: &ElementPatch) {
        if let Some(label) = &patch.label {
            self.label = label.clone();
        }
        if let Some(placeholder) = &patch.placeholder {
            self.placeholder = placeholder.clone();
        }
        if let Some(required) = patch.required {
            self.required = required;
        }
        if let Some(options) = &patch.options {
            self.options = options.clone();
        }
        if let Some(width) = patch.width {
            self.width = if self.kind.is_layout_locked() {
                Width::Full
            } else {
                width
            };
        }
        if let Some(value) = &patch.value {
            self.value = value.clone();
        }
        for (key, value) in &patch.extra {
            if RESERVED_KEYS.contains(&key.as_str()) {
                continue;
            }
            self.extra.insert(key.clone(), value.clone());
        }
    }
}

/// Keys a patch may never overwrite through its open map
const RESERVED_KEYS: &[&str] = &["id", "type"];

/// Partial element update; absent fields are left untouched
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ElementPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub placeholder: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub required: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub options: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub width: Option<Width>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl ElementPatch {
    pub fn label(label: impl Into<String>) -> Self {
        Self {
            label: Some(label.into()),
            ..Default::default()
        }
    }

    pub fn placeholder(placeholder: impl Into<String>) -> Self {
        Self {
            placeholder: Some(placeholder.into()),
            ..Default::default()
        }
    }

    pub fn required(required: bool) -> Self {
        Self {
            required: Some(required),
            ..Default::default()
        }
    }

    pub fn options(options: Vec<String>) -> Self {
        Self {
            options: Some(options),
            ..Default::default()
        }
    }

    #[cfg(test)]
    pub fn width(width: Width) -> Self {
        Self {
            width: Some(width),
            ..Default::default()
        }
    }
}
