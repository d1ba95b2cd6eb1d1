//! User-facing errors of the save workflow

use thiserror::Error;

#[derive(Debug, Error)]
pub enum SaveError {
    #[error("Add at least one element before saving")]
    EmptyForm,
    #[error("A save is already in progress")]
    InFlight,
    #[error("Failed to save form: {0:#}")]
    Storage(anyhow::Error),
}
