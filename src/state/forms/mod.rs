//! Properties panel form layer
//!
//! Type-safe editing of the selected element's properties. Edits produce
//! element patches that are dispatched to the document store.

mod field;
mod form_state;

pub use field::FormField;
#[cfg(test)]
pub use field::Property;
pub use form_state::{Form, PropertiesForm};
