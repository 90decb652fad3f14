//! Error types.
//!
//! Three families, one per caller-facing surface:
//! - `GameInfoError`: catalog registration and lookup
//! - `MoveRejected`: a player request that is not legal right now
//! - `LoadError`: restoring a saved game
//!
//! Broken engine invariants (a deal running out of cards, history replay
//! diverging during undo) are programming errors and panic instead.

use thiserror::Error;

use super::StackId;

/// Catalog registration and lookup failures.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GameInfoError {
    #[error("Invalid game id {id}: must be within 1..=999999")]
    InvalidId { id: u32 },

    #[error("Game id {id} is reserved for {reserved_for}")]
    ProtectedId { id: u32, reserved_for: u32 },

    #[error("Invalid number of decks for game {id}: {decks}")]
    InvalidDecks { id: u32, decks: u8 },

    #[error("Game {id} has an empty name")]
    EmptyName { id: u32 },

    #[error("Duplicate game id {id}")]
    DuplicateId { id: u32 },

    #[error("Duplicate game name: {name}")]
    DuplicateName { name: String },

    #[error("Duplicate alternate name: {name}")]
    DuplicateAltName { name: String },

    #[error("Variant class {class} already registered")]
    DuplicateClass { class: String },

    #[error("Registry is sealed, cannot register game {id}")]
    RegistrySealed { id: u32 },

    #[error("Unknown game id {id}")]
    UnknownGame { id: u32 },
}

/// A player-level request that the current position does not allow.
///
/// The game state is untouched whenever one of these is returned.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MoveRejected {
    #[error("{stack} has no cards to move")]
    EmptySource { stack: StackId },

    #[error("Cannot move cards from {stack} onto itself")]
    SameStack { stack: StackId },

    #[error("Cannot move {ncards} cards from {stack}")]
    CannotMove { stack: StackId, ncards: usize },

    #[error("{to} does not accept cards from {from}")]
    NotAccepted { from: StackId, to: StackId },

    #[error("{stack} is full")]
    StackFull { stack: StackId },

    #[error("No redeals left")]
    NoMoreRedeals,

    #[error("Nothing to deal")]
    NothingToDeal,

    #[error("Cannot flip the top card of {stack}")]
    CannotFlip { stack: StackId },

    #[error("Another action is still in progress")]
    ActionInProgress,

    #[error("Nothing to undo")]
    NothingToUndo,

    #[error("Nothing to redo")]
    NothingToRedo,
}

/// Saved-game restore failures. Loading is all-or-nothing.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("Decode error: {message}")]
    Decode { message: String },

    #[error("Encode error: {message}")]
    Encode { message: String },

    #[error("Unsupported save format version {found} (expected {expected})")]
    VersionMismatch { found: u32, expected: u32 },

    #[error("Saved game refers to unknown game id {id}")]
    UnknownGame { id: u32 },

    #[error("Saved game was written by {saved}, catalog has {current}")]
    ClassMismatch { saved: String, current: String },

    #[error("Replay failed at history entry {index}: {message}")]
    ReplayFailed { index: usize, message: String },

    #[error("Replayed state does not match the saved snapshot: {detail}")]
    StateMismatch { detail: String },

    #[error("Saved game lacks auxiliary field {key}")]
    MissingAuxField { key: String },
}

impl From<bincode::Error> for LoadError {
    fn from(err: bincode::Error) -> Self {
        LoadError::Decode {
            message: err.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages() {
        assert_eq!(
            GameInfoError::ProtectedId { id: 22, reserved_for: 106 }.to_string(),
            "Game id 22 is reserved for 106"
        );
        assert_eq!(
            MoveRejected::NotAccepted { from: StackId(1), to: StackId(4) }.to_string(),
            "Stack(4) does not accept cards from Stack(1)"
        );
        assert_eq!(
            LoadError::MissingAuxField { key: "draw_done".into() }.to_string(),
            "Saved game lacks auxiliary field draw_done"
        );
    }
}
