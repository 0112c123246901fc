//! Core data model for versioned text
//!
//! This module contains pure data structures with minimal external dependencies.

pub mod action;
pub mod error;
pub mod history;
pub mod position;

pub use action::{Action, ActionKind, Edit};
pub use error::HistoryError;
pub use history::History;
pub use position::Position;
