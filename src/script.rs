//! Edit scripts
//!
//! A script is a JSON array of commands run in order against a
//! [`History`]:
//!
//! ```json
//! [
//!   { "op": "insert", "text": "hello" },
//!   { "op": "replace", "text": "J", "pos": 0 },
//!   { "op": "delete", "pos": 1, "length": 2 },
//!   { "op": "apply", "action": { "op": "insert", "text": "!", "from_version": 3, "to_version": 5 } }
//! ]
//! ```

use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

use crate::model::{Action, History, HistoryError, Position};

/// One step of an edit script
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum EditCommand {
    Insert {
        text: String,
        #[serde(default)]
        pos: Position,
    },
    Replace {
        text: String,
        #[serde(default)]
        pos: Position,
    },
    Delete {
        pos: usize,
        length: usize,
    },
    /// Merge an action produced elsewhere
    Apply { action: Action },
}

impl EditCommand {
    /// Run this command, returning the new version
    pub fn run(&self, history: &mut History) -> Result<u64, HistoryError> {
        match self {
            EditCommand::Insert { text, pos } => history.insert(text.as_str(), *pos),
            EditCommand::Replace { text, pos } => history.replace(text.as_str(), *pos),
            EditCommand::Delete { pos, length } => history.delete(*pos, *length),
            EditCommand::Apply { action } => history.apply_action(action.clone()),
        }
    }
}

/// Errors from loading or running a script
#[derive(Debug, Error)]
pub enum ScriptError {
    #[error("failed to read script: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse script: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("command #{index} failed: {source}")]
    Command {
        index: usize,
        #[source]
        source: HistoryError,
    },
}

/// Parse a script from JSON text
pub fn parse(json: &str) -> Result<Vec<EditCommand>, ScriptError> {
    Ok(serde_json::from_str(json)?)
}

/// Load a script from a JSON file
pub fn load<P: AsRef<Path>>(path: P) -> Result<Vec<EditCommand>, ScriptError> {
    let contents = std::fs::read_to_string(path.as_ref())?;
    parse(&contents)
}

/// Run `commands` in order, stopping at the first failing one.
///
/// Commands before the failure stay applied. Returns the final version.
pub fn run(history: &mut History, commands: &[EditCommand]) -> Result<u64, ScriptError> {
    for (index, command) in commands.iter().enumerate() {
        command
            .run(history)
            .map_err(|source| ScriptError::Command { index, source })?;
    }
    tracing::info!(
        commands = commands.len(),
        version = history.version(),
        "script complete"
    );
    Ok(history.version())
}
