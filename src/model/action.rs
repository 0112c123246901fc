//! Edit actions
//!
//! An [`Action`] is an immutable record of one edit together with the
//! version transition it performs. Actions can be built, validated and
//! applied without any [`History`](super::history::History), which is what
//! makes it possible to ship them between histories and replay them.

use serde::{Deserialize, Serialize};

use super::error::HistoryError;
use super::position::{byte_offset, char_len, Position};

/// The type of edit an action performs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ActionKind {
    Insert,
    Replace,
    Delete,
}

/// The text transformation carried by an action
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum Edit {
    /// Splice `text` in at `pos`
    Insert {
        #[serde(default)]
        pos: Position,
        text: String,
    },
    /// Overwrite `text.len()` code points starting at `pos`.
    /// Running past the end extends the text.
    Replace {
        #[serde(default)]
        pos: Position,
        text: String,
    },
    /// Remove `length` code points starting at `pos`
    Delete { pos: usize, length: usize },
}

impl Edit {
    pub fn kind(&self) -> ActionKind {
        match self {
            Edit::Insert { .. } => ActionKind::Insert,
            Edit::Replace { .. } => ActionKind::Replace,
            Edit::Delete { .. } => ActionKind::Delete,
        }
    }

    /// Compute the text produced by this edit.
    pub fn apply(&self, text: &str) -> Result<String, HistoryError> {
        let text_len = char_len(text);
        let (start, end, inserted) = match self {
            Edit::Insert { pos, text: inserted } => {
                let at = byte_offset(text, pos.resolve(text_len)?);
                (at, at, inserted.as_str())
            }
            Edit::Replace {
                pos,
                text: replacement,
            } => {
                let at = pos.resolve(text_len)?;
                // byte_offset clamps, so an overrun swallows the rest of the text
                let until = at.saturating_add(char_len(replacement));
                (
                    byte_offset(text, at),
                    byte_offset(text, until),
                    replacement.as_str(),
                )
            }
            Edit::Delete { pos, length } => {
                let until = pos
                    .checked_add(*length)
                    .filter(|until| *until <= text_len)
                    .ok_or(HistoryError::InvalidPosition {
                        pos: *pos,
                        span: *length,
                        text_len,
                    })?;
                (byte_offset(text, *pos), byte_offset(text, until), "")
            }
        };

        let mut output = String::with_capacity(text.len() - (end - start) + inserted.len());
        output.push_str(&text[..start]);
        output.push_str(inserted);
        output.push_str(&text[end..]);
        Ok(output)
    }

    /// Reject a replacement at an explicit offset that runs past the end
    /// of a text of `text_len` code points.
    ///
    /// Every other edit passes; `apply` still validates its position.
    pub fn check_overrun(&self, text_len: usize) -> Result<(), HistoryError> {
        match self {
            Edit::Replace {
                pos: Position::At(pos),
                text,
            } if pos.saturating_add(char_len(text)) > text_len => {
                Err(HistoryError::InvalidPosition {
                    pos: *pos,
                    span: char_len(text),
                    text_len,
                })
            }
            _ => Ok(()),
        }
    }
}

/// One edit and the version transition it performs.
///
/// Fields are only readable; an action never changes after construction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawAction", into = "RawAction")]
pub struct Action {
    edit: Edit,
    from_version: u64,
    to_version: u64,
}

/// Wire shape of an action, validated on the way in
#[derive(Serialize, Deserialize)]
struct RawAction {
    #[serde(flatten)]
    edit: Edit,
    from_version: u64,
    to_version: u64,
}

impl TryFrom<RawAction> for Action {
    type Error = HistoryError;

    fn try_from(raw: RawAction) -> Result<Self, Self::Error> {
        Action::new(raw.edit, raw.from_version, raw.to_version)
    }
}

impl From<Action> for RawAction {
    fn from(action: Action) -> Self {
        RawAction {
            edit: action.edit,
            from_version: action.from_version,
            to_version: action.to_version,
        }
    }
}

impl Action {
    /// Create an action transitioning `from_version` to `to_version`.
    ///
    /// # Errors
    ///
    /// Returns `HistoryError::InvalidVersionRange` unless
    /// `from_version < to_version`.
    pub fn new(edit: Edit, from_version: u64, to_version: u64) -> Result<Self, HistoryError> {
        check_version_range(from_version, to_version)?;
        Ok(Self {
            edit,
            from_version,
            to_version,
        })
    }

    /// Create an insert action
    pub fn insert(
        text: impl Into<String>,
        pos: impl Into<Position>,
        from_version: u64,
        to_version: u64,
    ) -> Result<Self, HistoryError> {
        Self::new(
            Edit::Insert {
                pos: pos.into(),
                text: text.into(),
            },
            from_version,
            to_version,
        )
    }

    /// Create a replace action
    pub fn replace(
        text: impl Into<String>,
        pos: impl Into<Position>,
        from_version: u64,
        to_version: u64,
    ) -> Result<Self, HistoryError> {
        Self::new(
            Edit::Replace {
                pos: pos.into(),
                text: text.into(),
            },
            from_version,
            to_version,
        )
    }

    /// Create a delete action
    pub fn delete(
        pos: usize,
        length: usize,
        from_version: u64,
        to_version: u64,
    ) -> Result<Self, HistoryError> {
        Self::new(Edit::Delete { pos, length }, from_version, to_version)
    }

    /// Compute the text this action produces from `text`.
    ///
    /// Pure: the same input always yields the same output.
    pub fn apply(&self, text: &str) -> Result<String, HistoryError> {
        self.edit.apply(text)
    }

    pub fn edit(&self) -> &Edit {
        &self.edit
    }

    pub fn kind(&self) -> ActionKind {
        self.edit.kind()
    }

    /// Where the edit applies. Deletes always carry an explicit offset.
    pub fn pos(&self) -> Position {
        match &self.edit {
            Edit::Insert { pos, .. } | Edit::Replace { pos, .. } => *pos,
            Edit::Delete { pos, .. } => Position::At(*pos),
        }
    }

    /// Inserted or replacement text (empty for deletes)
    pub fn text(&self) -> &str {
        match &self.edit {
            Edit::Insert { text, .. } | Edit::Replace { text, .. } => text,
            Edit::Delete { .. } => "",
        }
    }

    /// Number of code points removed (deletes only)
    pub fn length(&self) -> usize {
        match &self.edit {
            Edit::Delete { length, .. } => *length,
            _ => 0,
        }
    }

    pub fn from_version(&self) -> u64 {
        self.from_version
    }

    pub fn to_version(&self) -> u64 {
        self.to_version
    }
}

pub(crate) fn check_version_range(from: u64, to: u64) -> Result<(), HistoryError> {
    if from >= to {
        return Err(HistoryError::InvalidVersionRange { from, to });
    }
    Ok(())
}
