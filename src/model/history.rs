//! Versioned text history
//!
//! [`History`] owns the current text, its version counter and the
//! append-only log of every [`Action`] applied to it. All mutation goes
//! through it: an operation either fully applies (new text, one more log
//! entry, higher version) or is rejected and leaves the history untouched.
//!
//! Versions only move forward along the log: each entry starts at or after
//! the version the previous one produced. Actions built by `insert`,
//! `replace` and `delete` are unit steps, so for a purely local history the
//! version is also the log length. Actions merged through
//! [`History::apply_action`] may span several versions at once or start past
//! the current version, leaving a gap of versions this history never held.

use std::ops::{Bound, RangeBounds};

use crate::config::{HistoryConfig, ReplaceOverrun};

use super::action::{check_version_range, Action};
use super::error::HistoryError;
use super::position::{char_len, Position};

#[derive(Debug, Clone, Default)]
pub struct History {
    /// Text the history was created with; replay starts here
    base: String,

    /// Current materialized text
    text: String,

    /// Current version, always the `to_version` of the last log entry (0 if empty)
    version: u64,

    /// Every action applied so far, in application order
    log: Vec<Action>,

    replace_overrun: ReplaceOverrun,
}

impl History {
    /// Create a history at version 0 holding `initial_text`
    pub fn new(initial_text: impl Into<String>) -> Self {
        Self::with_config(initial_text, &HistoryConfig::default())
    }

    /// Create a history using the engine policy from `config`
    pub fn with_config(initial_text: impl Into<String>, config: &HistoryConfig) -> Self {
        let text = initial_text.into();
        Self {
            base: text.clone(),
            text,
            version: 0,
            log: Vec::new(),
            replace_overrun: config.replace_overrun,
        }
    }

    /// Current text
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Current version
    pub fn version(&self) -> u64 {
        self.version
    }

    /// Text the history was created with
    pub fn base_text(&self) -> &str {
        &self.base
    }

    /// The full action log
    pub fn actions(&self) -> &[Action] {
        &self.log
    }

    /// Insert `text` at `pos` (or append with `Position::End`).
    ///
    /// Returns the new version.
    pub fn insert(
        &mut self,
        text: impl Into<String>,
        pos: impl Into<Position>,
    ) -> Result<u64, HistoryError> {
        let action = Action::insert(text, pos, self.version, self.version + 1)?;
        self.commit(action)
    }

    /// Overwrite text starting at `pos` with `text`.
    ///
    /// A replacement running past the end extends the text unless the
    /// history is configured with `ReplaceOverrun::Reject`.
    pub fn replace(
        &mut self,
        text: impl Into<String>,
        pos: impl Into<Position>,
    ) -> Result<u64, HistoryError> {
        let action = Action::replace(text, pos, self.version, self.version + 1)?;
        self.commit(action)
    }

    /// Remove `length` code points starting at `pos`.
    ///
    /// The whole range must lie inside the current text.
    pub fn delete(&mut self, pos: usize, length: usize) -> Result<u64, HistoryError> {
        let action = Action::delete(pos, length, self.version, self.version + 1)?;
        self.commit(action)
    }

    /// Apply an action built elsewhere, such as one taken from another
    /// history's log.
    ///
    /// The version is set to `action.to_version()` rather than incremented,
    /// so an action spanning several versions moves the counter by that
    /// many. An action starting past the current version is merged as is,
    /// jumping over the versions in between. An action starting before the
    /// current version is rejected with `VersionMismatch`: it would move the
    /// version backward or sideways, and replaying the same actions twice
    /// becomes an error rather than a duplicate edit.
    pub fn apply_action(&mut self, action: Action) -> Result<u64, HistoryError> {
        check_version_range(action.from_version(), action.to_version())?;
        if action.from_version() < self.version {
            tracing::debug!(
                expected = self.version,
                found = action.from_version(),
                "rejecting action that starts before the current version"
            );
            return Err(HistoryError::VersionMismatch {
                expected: self.version,
                found: action.from_version(),
            });
        }
        self.commit(action)
    }

    /// Apply `actions` in order via [`apply_action`](Self::apply_action).
    ///
    /// Stops at the first failure; actions before it stay applied.
    pub fn replay<I>(&mut self, actions: I) -> Result<u64, HistoryError>
    where
        I: IntoIterator<Item = Action>,
    {
        for action in actions {
            self.apply_action(action)?;
        }
        Ok(self.version)
    }

    /// The actions covering the half-open version window `range`, in
    /// application order.
    ///
    /// `..` covers the whole log. Actions spanning several versions are
    /// included only when they lie entirely inside the window.
    pub fn get_actions<R>(&self, range: R) -> Result<&[Action], HistoryError>
    where
        R: RangeBounds<u64>,
    {
        let from = match range.start_bound() {
            Bound::Included(&v) => v,
            Bound::Excluded(&v) => v.saturating_add(1),
            Bound::Unbounded => 0,
        };
        let to = match range.end_bound() {
            Bound::Included(&v) => v.saturating_add(1),
            Bound::Excluded(&v) => v,
            Bound::Unbounded => self.version,
        };

        if from > to || to > self.version {
            return Err(HistoryError::InvalidRange {
                from,
                to,
                current: self.version,
            });
        }

        // from/to versions increase strictly along the log
        let start = self.log.partition_point(|a| a.from_version() < from);
        let end = self.log.partition_point(|a| a.to_version() <= to);
        Ok(&self.log[start..end.max(start)])
    }

    /// Reconstruct the text as it was at `version` by replaying the log
    /// from the base text.
    ///
    /// `version` must be 0 or a version some logged action produced;
    /// versions inside a multi-version action or a merge gap were never held
    /// and fail with `InvalidRange`.
    pub fn text_at(&self, version: u64) -> Result<String, HistoryError> {
        if version == self.version {
            return Ok(self.text.clone());
        }
        let produced = self
            .log
            .binary_search_by_key(&version, |a| a.to_version())
            .is_ok();
        if version > self.version || (version != 0 && !produced) {
            return Err(HistoryError::InvalidRange {
                from: version,
                to: version,
                current: self.version,
            });
        }

        let applied = self.log.partition_point(|a| a.to_version() <= version);
        self.log[..applied]
            .iter()
            .try_fold(self.base.clone(), |text, action| action.apply(&text))
    }

    /// Apply, append and advance. Leaves the history untouched on failure.
    fn commit(&mut self, action: Action) -> Result<u64, HistoryError> {
        if self.replace_overrun == ReplaceOverrun::Reject {
            action.edit().check_overrun(char_len(&self.text))?;
        }

        let text = action.apply(&self.text)?;
        tracing::debug!(
            kind = ?action.kind(),
            from = action.from_version(),
            to = action.to_version(),
            "applied action"
        );
        self.text = text;
        self.version = action.to_version();
        self.log.push(action);
        Ok(self.version)
    }
}
