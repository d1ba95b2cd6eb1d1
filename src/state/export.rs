//! Exported form document
//!
//! A read-only projection of the document store into the JSON shape handed
//! to storage, the clipboard and file export.

use super::document::DocumentStore;
use super::element::{ElementKind, FormElement, Width};
use super::packing::LayoutMode;
use anyhow::Result;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Schema version written into every export
pub const EXPORT_VERSION: &str = "1.0.0";

/// Name used when none is configured
pub const DEFAULT_FORM_NAME: &str = "Untitled Form";

/// Form-level metadata that is not part of the document
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormInfo {
    pub name: String,
    pub description: String,
}

impl Default for FormInfo {
    fn default() -> Self {
        Self {
            name: DEFAULT_FORM_NAME.to_string(),
            description: String::new(),
        }
    }
}

/// Persisted element fields
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExportedElement {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: ElementKind,
    pub label: String,
    pub required: bool,
    pub placeholder: String,
    pub options: Vec<String>,
    pub width: Width,
}

impl From<&FormElement> for ExportedElement {
    fn from(element: &FormElement) -> Self {
        Self {
            id: element.id.to_string(),
            kind: element.kind.clone(),
            label: element.label.clone(),
            required: element.required,
            placeholder: element.placeholder.clone(),
            options: element.options.clone(),
            width: element.width,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportMetadata {
    pub total_elements: usize,
    pub version: String,
}

/// Snapshot of a form ready to be persisted or downloaded
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportedForm {
    pub id: String,
    pub name: String,
    pub description: String,
    pub created_at: DateTime<Utc>,
    pub layout: LayoutMode,
    pub elements: Vec<ExportedElement>,
    pub metadata: ExportMetadata,
}

impl ExportedForm {
    /// Pretty-printed JSON payload
    pub fn to_json_pretty(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Suggested download file name
    pub fn file_name(&self) -> String {
        format!("form-{}.json", self.created_at.format("%Y%m%d-%H%M%S"))
    }
}

/// Project the current document into its exported shape
pub fn export_document(store: &DocumentStore, info: &FormInfo) -> ExportedForm {
    let elements: Vec<ExportedElement> = store.elements().iter().map(Into::into).collect();

    ExportedForm {
        id: format!("form-{}", Uuid::new_v4()),
        name: info.name.clone(),
        description: info.description.clone(),
        created_at: Utc::now(),
        layout: store.layout_mode(),
        metadata: ExportMetadata {
            total_elements: elements.len(),
            version: EXPORT_VERSION.to_string(),
        },
        elements,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::element::ElementPatch;
    use pretty_assertions::assert_eq;
    use serde_json::Value;

    fn sample_store() -> DocumentStore {
        let mut store = DocumentStore::new();
        let id = store.add_element(ElementKind::TextField).unwrap();
        store.update_properties(
            &id,
            &ElementPatch {
                label: Some("Full name".into()),
                value: Some("typed by a user".into()),
                ..Default::default()
            },
        );
        store.add_element(ElementKind::Dropdown);
        store.add_element(ElementKind::WorkflowStep);
        store.set_layout_mode(LayoutMode::Grid);
        store
    }

    #[test]
    fn test_export_counts_match() {
        let form = export_document(&sample_store(), &FormInfo::default());
        assert_eq!(form.elements.len(), 3);
        assert_eq!(form.metadata.total_elements, 3);
        assert_eq!(form.metadata.version, EXPORT_VERSION);
        assert_eq!(form.layout, LayoutMode::Grid);
        assert_eq!(form.name, DEFAULT_FORM_NAME);
    }

    #[test]
    fn test_export_json_shape() {
        let form = export_document(&sample_store(), &FormInfo::default());
        let json: Value = serde_json::from_str(&form.to_json_pretty().unwrap()).unwrap();

        assert_eq!(json["layout"], "grid");
        assert_eq!(json["metadata"]["totalElements"], 3);
        assert!(json["createdAt"].is_string());
        assert!(json["id"].as_str().unwrap().starts_with("form-"));

        let first = &json["elements"][0];
        assert_eq!(first["type"], "text-field");
        assert_eq!(first["label"], "Full name");
        assert_eq!(first["width"], "half");
        assert_eq!(json["elements"][2]["width"], "full");
    }

    #[test]
    fn test_export_never_contains_value() {
        let form = export_document(&sample_store(), &FormInfo::default());
        let json: Value = serde_json::to_value(&form).unwrap();
        for element in json["elements"].as_array().unwrap() {
            let keys: Vec<&str> = element
                .as_object()
                .unwrap()
                .keys()
                .map(String::as_str)
                .collect();
            assert!(!keys.contains(&"value"));
            assert_eq!(keys.len(), 7);
        }
    }

    #[test]
    fn test_export_does_not_mutate_store() {
        let store = sample_store();
        let before = store.elements().to_vec();
        let _ = export_document(&store, &FormInfo::default());
        assert_eq!(store.elements(), before.as_slice());
    }

    #[test]
    fn test_empty_document_exports() {
        let form = export_document(&DocumentStore::new(), &FormInfo::default());
        assert!(form.elements.is_empty());
        assert_eq!(form.metadata.total_elements, 0);
        assert_eq!(form.layout, LayoutMode::Vertical);
    }

    #[test]
    fn test_configured_info_is_used() {
        let info = FormInfo {
            name: "Intake".into(),
            description: "Patient intake".into(),
        };
        let form = export_document(&DocumentStore::new(), &info);
        assert_eq!(form.name, "Intake");
        assert_eq!(form.description, "Patient intake");
    }

    #[test]
    fn test_file_name_uses_timestamp() {
        let form = export_document(&DocumentStore::new(), &FormInfo::default());
        let name = form.file_name();
        assert!(name.starts_with("form-"));
        assert!(name.ends_with(".json"));
        assert_eq!(name.len(), "form-20250101-120000.json".len());
    }

    #[test]
    fn test_round_trip_through_json() {
        let form = export_document(&sample_store(), &FormInfo::default());
        let parsed: ExportedForm = serde_json::from_str(&form.to_json_pretty().unwrap()).unwrap();
        assert_eq!(parsed, form);
    }
}
