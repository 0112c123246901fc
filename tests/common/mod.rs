// Common test utilities

#[allow(dead_code)]
pub mod tracing;

use textlog::{History, Position};

/// A history built from empty text by a fixed sequence of local edits
#[allow(dead_code)]
pub fn sample_history() -> History {
    let mut history = History::default();
    history.insert("hello", Position::End).unwrap();
    history.insert(" world", Position::End).unwrap();
    history.replace("J", Position::At(0)).unwrap();
    history.delete(5, 6).unwrap();
    history.insert(", again", Position::End).unwrap();
    history
}
