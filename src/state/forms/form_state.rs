//! Properties form state for the selected element

use super::field::{FormField, Property};
use crate::state::element::{ElementId, ElementPatch, FormElement};

/// Trait for common form operations
pub trait Form {
    fn field_count(&self) -> usize;
    fn active_field(&self) -> usize;
    fn set_active_field(&mut self, index: usize);
    fn next_field(&mut self) {
        let count = self.field_count();
        if count == 0 {
            return;
        }
        let current = self.active_field();
        self.set_active_field((current + 1) % count);
    }
    fn prev_field(&mut self) {
        let count = self.field_count();
        if count == 0 {
            return;
        }
        let current = self.active_field();
        if current == 0 {
            self.set_active_field(count - 1);
        } else {
            self.set_active_field(current - 1);
        }
    }
    fn get_active_field_mut(&mut self) -> Option<&mut FormField>;
    fn get_field(&self, index: usize) -> Option<&FormField>;
}

/// Editable properties of one element.
///
/// Fields are chosen from the element kind's capabilities: placeholder only
/// for text-like kinds and options only for kinds that render them.
#[derive(Debug, Clone)]
pub struct PropertiesForm {
    pub element_id: ElementId,
    pub fields: Vec<FormField>,
    pub active_field_index: usize,
}

impl PropertiesForm {
    pub fn from_element(element: &FormElement) -> Self {
        let fields = Self::properties_for(element)
            .into_iter()
            .map(|p| FormField::for_property(p, element))
            .collect();

        Self {
            element_id: element.id.clone(),
            fields,
            active_field_index: 0,
        }
    }

    fn properties_for(element: &FormElement) -> Vec<Property> {
        let mut properties = vec![Property::Label];
        if element.kind.supports_placeholder() {
            properties.push(Property::Placeholder);
        }
        properties.push(Property::Required);
        if element.kind.supports_options() {
            properties.push(Property::Options);
        }
        properties
    }

    /// Reload field values from the element, keeping the active field
    pub fn refresh(&mut self, element: &FormElement) {
        let active = self.active_field_index;
        *self = Self::from_element(element);
        self.set_active_field(active);
    }

    pub fn is_active_field_multiline(&self) -> bool {
        self.get_field(self.active_field_index)
            .is_some_and(|f| f.is_multiline)
    }

    /// Type a character into the active field
    pub fn input_char(&mut self, c: char) -> Option<ElementPatch> {
        let field = self.get_active_field_mut()?;
        field.push_char(c);
        Some(field.to_patch())
    }

    /// Delete the last character of the active field
    pub fn backspace(&mut self) -> Option<ElementPatch> {
        let field = self.get_active_field_mut()?;
        if field.is_toggle() {
            return None;
        }
        field.pop_char();
        Some(field.to_patch())
    }

    /// Flip the active field if it is a toggle
    pub fn toggle(&mut self) -> Option<ElementPatch> {
        let field = self.get_active_field_mut()?;
        if !field.is_toggle() {
            return None;
        }
        field.toggle();
        Some(field.to_patch())
    }
}

impl Form for PropertiesForm {
    fn field_count(&self) -> usize {
        self.fields.len()
    }
    fn active_field(&self) -> usize {
        self.active_field_index
    }
    fn set_active_field(&mut self, index: usize) {
        self.active_field_index = index.min(self.fields.len().saturating_sub(1));
    }
    fn get_active_field_mut(&mut self) -> Option<&mut FormField> {
        self.fields.get_mut(self.active_field_index)
    }
    fn get_field(&self, index: usize) -> Option<&FormField> {
        self.fields.get(index)
    }
}
