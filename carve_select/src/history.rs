// Copyright 2025 the Carve Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Undo/redo history over selections.
//!
//! ## Usage
//!
//! Every edit goes through [`SelectionHistory::apply`] (or the [`select`] and
//! [`deselect`] shorthands). An edit that changes the selection pushes the old value on
//! the undo stack and clears the redo stack; an edit that changes nothing is dropped.
//!
//! Each mutating call returns the availability transitions it caused, so a caller can
//! enable or disable undo and redo controls without polling.
//!
//! ```
//! use carve_mesh::ElementId;
//! use carve_select::{HistoryEvent, SelectionHistory};
//!
//! let mut history = SelectionHistory::new();
//! let found = [ElementId(1), ElementId(2)].into_iter().collect();
//! assert_eq!(history.select(&found), vec![HistoryEvent::UndoAvailable(true)]);
//! assert_eq!(
//!     history.undo(),
//!     vec![HistoryEvent::RedoAvailable(true), HistoryEvent::UndoAvailable(false)]
//! );
//! assert!(history.current().is_empty());
//! ```
//!
//! [`select`]: SelectionHistory::select
//! [`deselect`]: SelectionHistory::deselect

use alloc::collections::BTreeSet;
use alloc::vec::Vec;

use carve_mesh::ElementId;

use crate::selection::Selection;

/// A change in whether undo or redo can be performed.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum HistoryEvent {
    /// Undo became available (`true`) or unavailable (`false`).
    UndoAvailable(bool),
    /// Redo became available (`true`) or unavailable (`false`).
    RedoAvailable(bool),
}

/// The current selection plus its undo and redo stacks.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SelectionHistory {
    current: Selection,
    undo: Vec<Selection>,
    redo: Vec<Selection>,
}

impl SelectionHistory {
    /// Empty selection, empty stacks.
    pub fn new() -> Self {
        Self::default()
    }

    /// The current selection.
    pub fn current(&self) -> &Selection {
        &self.current
    }

    /// Whether [`undo`](Self::undo) would do anything.
    pub fn can_undo(&self) -> bool {
        !self.undo.is_empty()
    }

    /// Whether [`redo`](Self::redo) would do anything.
    pub fn can_redo(&self) -> bool {
        !self.redo.is_empty()
    }

    /// Number of states on the undo stack.
    pub fn undo_depth(&self) -> usize {
        self.undo.len()
    }

    /// Replace the current selection with `next`.
    pub fn apply(&mut self, next: Selection) -> Vec<HistoryEvent> {
        let mut events = Vec::new();
        if next == self.current {
            return events;
        }
        if self.undo.is_empty() {
            events.push(HistoryEvent::UndoAvailable(true));
        }
        if !self.redo.is_empty() {
            self.redo.clear();
            events.push(HistoryEvent::RedoAvailable(false));
        }
        self.undo.push(core::mem::replace(&mut self.current, next));
        events
    }

    /// Add `found` to the current selection.
    pub fn select(&mut self, found: &BTreeSet<ElementId>) -> Vec<HistoryEvent> {
        let next = self.current.union(found);
        self.apply(next)
    }

    /// Remove `found` from the current selection.
    pub fn deselect(&mut self, found: &BTreeSet<ElementId>) -> Vec<HistoryEvent> {
        let next = self.current.difference(found);
        self.apply(next)
    }

    /// Step back to the previous selection.
    pub fn undo(&mut self) -> Vec<HistoryEvent> {
        let mut events = Vec::new();
        let Some(previous) = self.undo.pop() else {
            return events;
        };
        self.redo.push(core::mem::replace(&mut self.current, previous));
        if self.redo.len() == 1 {
            events.push(HistoryEvent::RedoAvailable(true));
        }
        if self.undo.is_empty() {
            events.push(HistoryEvent::UndoAvailable(false));
        }
        events
    }

    /// Step forward to the most recently undone selection.
    pub fn redo(&mut self) -> Vec<HistoryEvent> {
        let mut events = Vec::new();
        let Some(next) = self.redo.pop() else {
            return events;
        };
        self.undo.push(core::mem::replace(&mut self.current, next));
        if self.undo.len() == 1 {
            events.push(HistoryEvent::UndoAvailable(true));
        }
        if self.redo.is_empty() {
            events.push(HistoryEvent::RedoAvailable(false));
        }
        events
    }

    /// Drop the selection and both stacks.
    pub fn clear(&mut self) -> Vec<HistoryEvent> {
        let mut events = Vec::new();
        if self.can_undo() {
            events.push(HistoryEvent::UndoAvailable(false));
        }
        if self.can_redo() {
            events.push(HistoryEvent::RedoAvailable(false));
        }
        *self = Self::default();
        events
    }
}
