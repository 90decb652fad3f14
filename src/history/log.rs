//! The undo/redo log.
//!
//! Entries up to `cursor` are applied; entries after it are the redo tail.
//! Committing a new action discards the redo tail. The log only stores and
//! hands out entries: the game applies and reverts their atoms.

use im::Vector;

use crate::core::{Atom, HistoryEntry, MoveRejected};

/// Ordered history of player actions with an undo cursor.
///
/// Uses `im::Vector` so snapshots of long histories clone cheaply.
#[derive(Clone, Debug, Default)]
pub struct MoveLog {
    entries: Vector<HistoryEntry>,
    cursor: usize,
    open: Option<HistoryEntry>,
}

impl MoveLog {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuild a log from saved entries.
    ///
    /// Panics if `cursor` is past the end.
    #[must_use]
    pub fn from_parts(entries: Vec<HistoryEntry>, cursor: usize) -> Self {
        assert!(cursor <= entries.len(), "history cursor out of range");
        Self {
            entries: entries.into_iter().collect(),
            cursor,
            open: None,
        }
    }

    /// Whether an action is currently being recorded.
    #[must_use]
    pub fn is_open(&self) -> bool {
        self.open.is_some()
    }

    /// Start recording a new action.
    pub fn begin(&mut self) -> Result<(), MoveRejected> {
        if self.open.is_some() {
            return Err(MoveRejected::ActionInProgress);
        }
        self.open = Some(HistoryEntry::new(self.cursor as u32));
        Ok(())
    }

    /// Append an atom to the open action. Ignored when nothing is open.
    pub fn record(&mut self, atom: Atom) {
        if let Some(entry) = self.open.as_mut() {
            entry.push(atom);
        }
    }

    /// Atoms recorded so far in the open action.
    #[must_use]
    pub fn open_atoms(&self) -> &[Atom] {
        self.open.as_ref().map_or(&[], |e| &e.atoms[..])
    }

    /// Close the open action.
    ///
    /// Returns the committed entry's sequence number, or `None` if the action
    /// changed nothing (empty actions are dropped).
    pub fn commit(&mut self) -> Option<u32> {
        let entry = self.open.take()?;
        if entry.is_empty() {
            return None;
        }
        self.entries.truncate(self.cursor);
        let seq = entry.seq;
        self.entries.push_back(entry);
        self.cursor += 1;
        Some(seq)
    }

    /// Drop the open action, returning it so the caller can revert its atoms.
    pub fn abort(&mut self) -> Option<HistoryEntry> {
        self.open.take()
    }

    #[must_use]
    pub fn can_undo(&self) -> bool {
        self.open.is_none() && self.cursor > 0
    }

    #[must_use]
    pub fn can_redo(&self) -> bool {
        self.open.is_none() && self.cursor < self.entries.len()
    }

    /// Step the cursor back and return the entry to revert.
    pub fn step_back(&mut self) -> Option<HistoryEntry> {
        if !self.can_undo() {
            return None;
        }
        self.cursor -= 1;
        self.entries.get(self.cursor).cloned()
    }

    /// Step the cursor forward and return the entry to re-apply.
    pub fn step_forward(&mut self) -> Option<HistoryEntry> {
        if !self.can_redo() {
            return None;
        }
        let entry = self.entries.get(self.cursor).cloned();
        self.cursor += 1;
        entry
    }

    /// Number of applied entries.
    #[must_use]
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Total entries including the redo tail.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn entries(&self) -> impl Iterator<Item = &HistoryEntry> {
        self.entries.iter()
    }

    /// Forget everything.
    pub fn clear(&mut self) {
        self.entries.clear();
        self.cursor = 0;
        self.open = None;
    }
}
