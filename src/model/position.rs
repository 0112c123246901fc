use serde::{Deserialize, Serialize};

use super::error::HistoryError;

/// Position in a text, counted in code points (`char`s), never in bytes.
///
/// `End` is resolved against the text an action is applied to, so an
/// action built with `End` always appends regardless of how long the text
/// has grown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "Option<usize>", into = "Option<usize>")]
pub enum Position {
    /// End of the text
    #[default]
    End,
    /// Zero-based code point offset
    At(usize),
}

impl Position {
    /// Resolve to a concrete offset into a text of `text_len` code points.
    ///
    /// Fails with `InvalidPosition` if the offset lies past the end.
    pub fn resolve(self, text_len: usize) -> Result<usize, HistoryError> {
        match self {
            Position::End => Ok(text_len),
            Position::At(pos) if pos <= text_len => Ok(pos),
            Position::At(pos) => Err(HistoryError::InvalidPosition {
                pos,
                span: 0,
                text_len,
            }),
        }
    }

    /// The concrete offset, if any
    pub fn offset(self) -> Option<usize> {
        match self {
            Position::End => None,
            Position::At(pos) => Some(pos),
        }
    }
}

impl From<usize> for Position {
    fn from(pos: usize) -> Self {
        Position::At(pos)
    }
}

impl From<Option<usize>> for Position {
    fn from(pos: Option<usize>) -> Self {
        pos.map_or(Position::End, Position::At)
    }
}

impl From<Position> for Option<usize> {
    fn from(pos: Position) -> Self {
        pos.offset()
    }
}

/// Number of code points in `text`
pub(crate) fn char_len(text: &str) -> usize {
    text.chars().count()
}

/// Byte offset of the code point at `char_idx`.
///
/// `char_idx == char_len(text)` maps to `text.len()`; anything beyond that
/// is clamped to the end as well. Callers validate ranges before slicing.
pub(crate) fn byte_offset(text: &str, char_idx: usize) -> usize {
    text.char_indices()
        .nth(char_idx)
        .map_or(text.len(), |(offset, _)| offset)
}
