//! Trait abstraction for the storage client to enable mocking in tests

use crate::state::ExportedForm;
use anyhow::Result;
use async_trait::async_trait;
use std::path::PathBuf;

/// Where saved forms and downloads go
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait StorageClientTrait: Send + Sync {
    /// Persist a form snapshot, returning a human readable location
    async fn save_form(&mut self, form: &ExportedForm) -> Result<String>;

    /// Write an export payload under the given file name
    async fn write_export(&mut self, file_name: &str, bytes: &[u8]) -> Result<PathBuf>;
}
