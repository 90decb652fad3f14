//! # rust-solitaire
//!
//! A rules engine for patience games.
//!
//! ## Design Principles
//!
//! 1. **Variants Are Data**: A game is a `VariantDef` built from closed
//!    enums (acceptance policies, deal scripts, talon policies, win rules).
//!    Adding a variant never touches the engine.
//!
//! 2. **Every Change Is an Atom**: Cards move only through primitives that
//!    record reversible atoms. Undo, redo, replay and save files all work on
//!    those atoms.
//!
//! 3. **Seeded and Reproducible**: The same game id and seed always deal the
//!    same cards, and the RNG state travels with the history.
//!
//! ## Modules
//!
//! - `core`: stack ids, state, history atoms, RNG, errors
//! - `cards`: card values, decks and pre-deal arrangement
//! - `stacks`: stacks, capabilities and acceptance policies
//! - `history`: the undo/redo log
//! - `rules`: layouts, deal scripts, talon policies, win and highlight rules
//! - `hint`: legal-move enumeration and ranking
//! - `game`: the game in progress, autopilot and save files
//! - `registry`: game descriptors and the catalog
//! - `games`: the built-in game families
//!
//! ## Example
//!
//! ```
//! use rust_solitaire::{games, Game};
//!
//! let manager = games::builtin_manager();
//! let info = manager.get_by_name("Yukon").unwrap();
//! let mut game = Game::new(info, 42);
//! if let Some(hint) = game.hints().first().copied() {
//!     game.try_move(hint.ncards, hint.from, hint.to).unwrap();
//!     game.undo().unwrap();
//! }
//! assert!(!game.can_undo());
//! ```

pub mod core;
pub mod cards;
pub mod stacks;
pub mod history;
pub mod rules;
pub mod hint;
pub mod game;
pub mod registry;
pub mod games;

// Re-export commonly used types
pub use crate::core::{
    Atom, HistoryEntry,
    GameRng, GameRngState,
    GameOptions, GameState, StackConfig, StackId, StackRole,
    GameInfoError, LoadError, MoveRejected,
};

pub use crate::cards::{Card, CardId, DeckSpec, ShuffleHook};

pub use crate::stacks::{AcceptPolicy, BaseRank, Caps, Sequencing, Stack, StackSet, StackSnapshot};

pub use crate::history::MoveLog;

pub use crate::rules::{DealScript, Layout, TalonPolicy, VariantDef, WinRule};

pub use crate::hint::{Hint, HintPolicy};

pub use crate::game::{
    AutoPilot, CancelToken, PilotOutcome,
    Game, GameBuilder, GameObserver, NullObserver, Sample,
    SaveGame, SAVE_VERSION,
};

pub use crate::registry::{GameFlags, GameInfo, GameManager, GameType, SkillLevel};
