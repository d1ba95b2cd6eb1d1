//! File-backed storage client
//!
//! Saved forms land as `<forms dir>/<form id>.json`; exports are written
//! into the export directory under the name the caller picks.

use super::traits::StorageClientTrait;
use crate::config::TuiConfig;
use crate::state::ExportedForm;
use anyhow::{anyhow, Context, Result};
use async_trait::async_trait;
use std::path::{Path, PathBuf};
use tokio::fs;

/// Subdirectory of the data dir holding saved forms
const FORMS_SUBDIR: &str = "forms";

/// Client for writing forms to the local filesystem
#[derive(Debug, Clone)]
pub struct StorageClient {
    /// Directory for saved forms
    forms_dir: PathBuf,
    /// Directory for exported downloads
    export_dir: PathBuf,
}

impl StorageClient {
    pub fn new(forms_dir: PathBuf, export_dir: PathBuf) -> Self {
        Self {
            forms_dir,
            export_dir,
        }
    }

    /// Create a client from the user configuration
    pub fn from_config(config: &TuiConfig) -> Result<Self> {
        let data_dir = config
            .resolved_storage_dir()
            .ok_or_else(|| anyhow!("No data directory available for saved forms"))?;
        Ok(Self::new(
            data_dir.join(FORMS_SUBDIR),
            config.resolved_export_dir(),
        ))
    }

    pub fn forms_dir(&self) -> &Path {
        &self.forms_dir
    }

    pub fn export_dir(&self) -> &Path {
        &self.export_dir
    }
}

/// Reject names that would escape the target directory
fn checked_file_name(file_name: &str) -> Result<&str> {
    let is_plain = !file_name.is_empty()
        && Path::new(file_name)
            .file_name()
            .is_some_and(|name| name == file_name);
    if is_plain {
        Ok(file_name)
    } else {
        Err(anyhow!("Invalid export file name: {file_name:?}"))
    }
}

#[async_trait]
impl StorageClientTrait for StorageClient {
    async fn save_form(&mut self, form: &ExportedForm) -> Result<String> {
        fs::create_dir_all(&self.forms_dir)
            .await
            .with_context(|| format!("Failed to create {}", self.forms_dir.display()))?;

        let path = self.forms_dir.join(format!("{}.json", form.id));
        let content = form.to_json_pretty()?;
        fs::write(&path, content)
            .await
            .with_context(|| format!("Failed to write {}", path.display()))?;

        tracing::info!(
            "Saved form {} ({} elements) to {}",
            form.id,
            form.metadata.total_elements,
            path.display()
        );
        Ok(path.display().to_string())
    }

    async fn write_export(&mut self, file_name: &str, bytes: &[u8]) -> Result<PathBuf> {
        let file_name = checked_file_name(file_name)?;
        fs::create_dir_all(&self.export_dir)
            .await
            .with_context(|| format!("Failed to create {}", self.export_dir.display()))?;

        let path = self.export_dir.join(file_name);
        fs::write(&path, bytes)
            .await
            .with_context(|| format!("Failed to write {}", path.display()))?;

        tracing::info!("Exported {} bytes to {}", bytes.len(), path.display());
        Ok(path)
    }
}
