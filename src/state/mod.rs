//! Application state module

mod app_state;
mod catalog;
mod commands;
mod document;
mod drag;
mod element;
mod export;
mod forms;
mod packing;

pub use app_state::*;
pub use catalog::*;
pub use commands::*;
#[cfg(test)]
pub use document::*;
pub use drag::*;
pub use element::*;
pub use export::*;
pub use forms::*;
pub use packing::*;
