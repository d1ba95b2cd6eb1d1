//! Property field value objects

use crate::state::element::{ElementPatch, FormElement};

/// Element property edited by a field
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Property {
    Label,
    Placeholder,
    Required,
    Options,
}

/// Type-safe field values
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    Text(String),
    Toggle(bool),
}

impl Default for FieldValue {
    fn default() -> Self {
        FieldValue::Text(String::new())
    }
}

/// Represents a single property field with its configuration and value
#[derive(Debug, Clone)]
pub struct FormField {
    pub property: Property,
    pub label: String,
    pub value: FieldValue,
    pub is_multiline: bool,
}

impl FormField {
    /// Create a new text field with initial value
    pub fn text_with_value(property: Property, label: &str, value: String, is_multiline: bool) -> Self {
        Self {
            property,
            label: label.to_string(),
            value: FieldValue::Text(value),
            is_multiline,
        }
    }

    /// Create a new toggle field with initial value
    pub fn toggle_with_value(property: Property, label: &str, value: bool) -> Self {
        Self {
            property,
            label: label.to_string(),
            value: FieldValue::Toggle(value),
            is_multiline: false,
        }
    }

    /// Build the field for `property` from an element's current state
    pub fn for_property(property: Property, element: &FormElement) -> Self {
        match property {
            Property::Label => Self::text_with_value(property, "Label", element.label.clone(), false),
            Property::Placeholder => Self::text_with_value(
                property,
                "Placeholder",
                element.placeholder.clone(),
                false,
            ),
            Property::Required => {
                Self::toggle_with_value(property, "Required Field", element.required)
            }
            Property::Options => Self::text_with_value(
                property,
                "Options (one per line)",
                element.options.join("\n"),
                true,
            ),
        }
    }

    /// Get the text value (returns empty string for toggle fields)
    pub fn as_text(&self) -> &str {
        match &self.value {
            FieldValue::Text(s) => s,
            FieldValue::Toggle(_) => "",
        }
    }

    /// Get the toggle value (returns false for text fields)
    pub fn as_toggle(&self) -> bool {
        match &self.value {
            FieldValue::Toggle(b) => *b,
            FieldValue::Text(_) => false,
        }
    }

    pub fn is_toggle(&self) -> bool {
        matches!(self.value, FieldValue::Toggle(_))
    }

    /// Push a character to the field value
    pub fn push_char(&mut self, c: char) {
        match &mut self.value {
            FieldValue::Text(s) => {
                if c == '\n' && !self.is_multiline {
                    return;
                }
                s.push(c);
            }
            FieldValue::Toggle(b) => {
                if c == ' ' {
                    *b = !*b;
                }
            }
        }
    }

    /// Remove the last character from the field value
    pub fn pop_char(&mut self) {
        if let FieldValue::Text(s) = &mut self.value {
            s.pop();
        }
    }

    /// Flip a toggle field
    pub fn toggle(&mut self) {
        if let FieldValue::Toggle(b) = &mut self.value {
            *b = !*b;
        }
    }

    /// Get the display value for rendering
    pub fn display_value(&self) -> String {
        match &self.value {
            FieldValue::Text(s) => s.clone(),
            FieldValue::Toggle(true) => "[x]".to_string(),
            FieldValue::Toggle(false) => "[ ]".to_string(),
        }
    }

    /// Patch carrying this field's current value
    pub fn to_patch(&self) -> ElementPatch {
        match self.property {
            Property::Label => ElementPatch::label(self.as_text()),
            Property::Placeholder => ElementPatch::placeholder(self.as_text()),
            Property::Required => ElementPatch::required(self.as_toggle()),
            Property::Options => {
                ElementPatch::options(self.as_text().split('\n').map(String::from).collect())
            }
        }
    }
}
