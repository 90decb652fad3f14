//! Game registry.
//!
//! ## Sections
//!
//! - `info`: the `GameInfo` descriptor and its classification types
//! - `manager`: `GameManager`, the validated catalog with sorted views
//! - `tables`: retired ids, compatibility/version groups, type filters
//! - `plugin`: extra registrations loaded after the built-ins
//! - `global`: the process-wide sealed catalog

pub mod global;
pub mod info;
pub mod manager;
pub mod plugin;
pub mod tables;

pub use global::{catalog, init};
pub use info::{
    Category, GameFlags, GameInfo, GameType, Provenance, SelectionInfo, SkillLevel, MAX_GAME_ID,
};
pub use manager::GameManager;
pub use plugin::{load_plugins, PluginDescriptor};
pub use tables::{
    replacement_for, IdGroup, Selector, TypeFilter, CHILDREN_GAMES, GAMES_BY_COMPATIBILITY,
    GAMES_BY_VERSION, POPULAR_GAMES, PROTECTED_GAMES, SELECT_CONTRIB_GAME_BY_TYPE,
    SELECT_GAME_BY_TYPE, SELECT_ORIENTAL_GAME_BY_TYPE, SELECT_ORIGINAL_GAME_BY_TYPE,
    SELECT_SPECIAL_GAME_BY_TYPE,
};
