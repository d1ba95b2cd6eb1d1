//! Configuration handling for the TUI

use crate::state::{FormInfo, LayoutMode, DEFAULT_FORM_NAME};
use anyhow::Result;
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

/// Environment variable overriding the data directory
pub const DATA_DIR_ENV: &str = "FORMSMITH_DATA_DIR";

/// User configuration for the TUI
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct TuiConfig {
    /// Layout mode new documents start in
    pub default_layout: Option<LayoutMode>,
    /// Name written into exported forms
    pub form_name: Option<String>,
    /// Description written into exported forms
    pub form_description: Option<String>,
    /// Directory for saved forms
    pub storage_dir: Option<PathBuf>,
    /// Directory for exported JSON files
    pub export_dir: Option<PathBuf>,
}

impl TuiConfig {
    fn project_dirs() -> Option<ProjectDirs> {
        ProjectDirs::from("io", "formsmith", "formsmith-tui")
    }

    /// Get the config file path
    fn config_path() -> Option<PathBuf> {
        Self::project_dirs().map(|dirs| dirs.config_dir().join("config.json"))
    }

    /// Load configuration from file
    pub fn load() -> Result<Self> {
        let path = Self::config_path();

        if let Some(path) = path {
            if path.exists() {
                let content = fs::read_to_string(&path)?;
                let config: TuiConfig = serde_json::from_str(&content)?;
                tracing::debug!("Loaded config from {}", path.display());
                return Ok(config);
            }
        }

        Ok(Self::default())
    }

    pub fn layout(&self) -> LayoutMode {
        self.default_layout.unwrap_or_default()
    }

    /// Form metadata for exports
    pub fn form_info(&self) -> FormInfo {
        FormInfo {
            name: self
                .form_name
                .clone()
                .unwrap_or_else(|| DEFAULT_FORM_NAME.to_string()),
            description: self.form_description.clone().unwrap_or_default(),
        }
    }

    /// Data directory: environment, then config, then the platform default
    pub fn resolved_storage_dir(&self) -> Option<PathBuf> {
        std::env::var_os(DATA_DIR_ENV)
            .map(PathBuf::from)
            .or_else(|| self.storage_dir.clone())
            .or_else(|| Self::project_dirs().map(|dirs| dirs.data_dir().to_path_buf()))
    }

    /// Export directory: config, else the working directory
    pub fn resolved_export_dir(&self) -> PathBuf {
        self.export_dir
            .clone()
            .unwrap_or_else(|| PathBuf::from("."))
    }
}
