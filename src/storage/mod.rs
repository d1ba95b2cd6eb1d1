//! Storage collaborators for saved and exported forms

mod client;
mod traits;

pub use client::StorageClient;
pub use traits::StorageClientTrait;

#[cfg(test)]
pub use traits::MockStorageClientTrait;
