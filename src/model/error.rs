use thiserror::Error;

/// Errors from building, applying or querying edit actions.
///
/// Every variant is a local validation failure. A rejected mutation leaves
/// the history exactly as it was before the call.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum HistoryError {
    /// An offset or range falls outside the text it is applied to.
    ///
    /// `span` is the number of code points the edit needs past `pos`
    /// (0 for a plain insertion point).
    #[error("position {pos} (span {span}) is outside text of length {text_len}")]
    InvalidPosition {
        pos: usize,
        span: usize,
        text_len: usize,
    },

    /// An action whose `from_version` is not strictly below its `to_version`.
    #[error("invalid version range: {from} -> {to}")]
    InvalidVersionRange { from: u64, to: u64 },

    /// A version window that is inverted or reaches past the current version.
    #[error("invalid version window {from}..{to} (current version is {current})")]
    InvalidRange { from: u64, to: u64, current: u64 },

    /// An external action starting before the current version.
    #[error("action starts at version {found}, behind current version {expected}")]
    VersionMismatch { expected: u64, found: u64 },
}
