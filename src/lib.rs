//! Versioned text library - an append-only log of edit actions over a text buffer

pub mod config;
pub mod model;
pub mod script;
pub mod services;

pub use model::{Action, ActionKind, Edit, History, HistoryError, Position};
