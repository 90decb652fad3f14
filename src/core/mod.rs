//! Core engine types: state, history atoms, RNG, configuration, errors.
//!
//! This module contains the variant-agnostic building blocks. Variants
//! configure these via `StackConfig` rather than modifying the core.

pub mod action;
pub mod config;
pub mod error;
pub mod rng;
pub mod state;

pub use action::{Atom, AtomError, HistoryEntry};
pub use config::{GameOptions, StackConfig, StackId, StackRole};
pub use error::{GameInfoError, LoadError, MoveRejected};
pub use rng::{GameRng, GameRngState};
pub use state::{GameState, DRAW_DONE};
