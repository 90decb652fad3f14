//! Atomic state changes and the history entries built from them.
//!
//! Every change to a game's table goes through an `Atom`. Atoms carry enough
//! data to be applied forwards (redo, replay) and backwards (undo) without
//! consulting any rule. A player-level action is one `HistoryEntry`: the
//! ordered atoms it produced.
//!
//! ## Example
//!
//! ```
//! use rust_solitaire::core::{Atom, HistoryEntry, StackId};
//!
//! let mut entry = HistoryEntry::new(0);
//! entry.push(Atom::Move { from: StackId(3), to: StackId(1), ncards: 1 });
//! entry.push(Atom::Flip { stack: StackId(3) });
//! assert_eq!(entry.len(), 2);
//! ```

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use thiserror::Error;

use super::config::StackId;
use super::rng::GameRngState;
use crate::cards::Card;

/// One reversible change to the game.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Atom {
    /// Top `ncards` of `from` onto `to`, order preserved.
    Move {
        from: StackId,
        to: StackId,
        ncards: usize,
    },
    /// Turn the top card of a stack over.
    Flip { stack: StackId },
    /// Reorder a stack's cards with the game's RNG.
    Shuffle {
        stack: StackId,
        before: Vec<Card>,
        after: Vec<Card>,
        rng_before: GameRngState,
        rng_after: GameRngState,
    },
    /// Advance the talon round counter.
    NextRound { before: u32, after: u32 },
    /// Change a variant-specific auxiliary value.
    UpdateModel { key: String, old: i64, new: i64 },
    /// Random draws made outside of a shuffle.
    Reseed {
        before: GameRngState,
        after: GameRngState,
    },
}

/// An atom that could not be applied to the current state.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct AtomError {
    pub message: String,
}

impl AtomError {
    pub(crate) fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// All atoms of one player-level action.
///
/// SmallVec keeps the common one-to-four-atom entries off the heap.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryEntry {
    /// Position in the game's history (0-based).
    pub seq: u32,
    pub atoms: SmallVec<[Atom; 4]>,
}

impl HistoryEntry {
    #[must_use]
    pub fn new(seq: u32) -> Self {
        Self {
            seq,
            atoms: SmallVec::new(),
        }
    }

    pub fn push(&mut self, atom: Atom) {
        self.atoms.push(atom);
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.atoms.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.atoms.is_empty()
    }

    /// Number of card transfers in this entry.
    #[must_use]
    pub fn move_count(&self) -> usize {
        self.atoms
            .iter()
            .filter(|a| matches!(a, Atom::Move { .. }))
            .count()
    }
}
