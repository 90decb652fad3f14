//! Game configuration types.
//!
//! Variants configure the engine at startup by providing:
//! - `StackConfig`: one per pile (talon, foundations, rows, ...)
//! - `GameOptions`: per-session player preferences
//!
//! The engine never hardcodes a layout - each variant lists its stacks.

use serde::{Deserialize, Serialize};

use crate::stacks::{AcceptPolicy, Caps};

/// Stack identifier, unique within one game.
///
/// Ids are dense: the talon is created first, then the waste (if any),
/// foundations, rows, reserves and internal stacks, in that order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct StackId(pub u16);

impl StackId {
    /// Create a new stack ID.
    #[must_use]
    pub const fn new(id: u16) -> Self {
        Self(id)
    }

    /// Get the raw ID value.
    #[must_use]
    pub const fn raw(self) -> u16 {
        self.0
    }

    /// Index into the game's stack list.
    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

impl std::fmt::Display for StackId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Stack({})", self.0)
    }
}

/// Which group a stack belongs to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StackRole {
    /// Undealt cards.
    Talon,
    /// Cards turned from the talon.
    Waste,
    /// Target piles; filling them wins.
    Foundation,
    /// Tableau piles.
    Row,
    /// Free cells and side piles.
    Reserve,
    /// Invisible holding piles (e.g. removed aces).
    Internal,
}

impl StackRole {
    /// Roles the hint engine and auto-play treat as move sources.
    #[must_use]
    pub const fn is_drop_source(self) -> bool {
        matches!(self, Self::Waste | Self::Row | Self::Reserve)
    }
}

/// Configuration for a single stack.
///
/// ## Example
///
/// ```
/// use rust_solitaire::core::{StackConfig, StackRole};
/// use rust_solitaire::stacks::{AcceptPolicy, Caps, Sequencing};
///
/// let row = StackConfig::new(StackRole::Row, AcceptPolicy::Sequence(Sequencing::AC))
///     .with_caps(Caps::row().with_max_move(1));
/// assert_eq!(row.caps.max_move, 1);
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StackConfig {
    pub role: StackRole,
    pub caps: Caps,
    pub policy: AcceptPolicy,
}

impl StackConfig {
    /// Create a stack config with the role's default caps.
    #[must_use]
    pub fn new(role: StackRole, policy: AcceptPolicy) -> Self {
        let caps = match role {
            StackRole::Talon => Caps::talon(),
            StackRole::Waste => Caps::waste(),
            StackRole::Foundation => Caps::foundation(0),
            StackRole::Row => Caps::row(),
            StackRole::Reserve => Caps::reserve(),
            StackRole::Internal => Caps::closed(),
        };
        Self { role, caps, policy }
    }

    /// Replace the capability profile.
    #[must_use]
    pub fn with_caps(mut self, caps: Caps) -> Self {
        self.caps = caps;
        self
    }

    /// Adjust the capability profile in place.
    #[must_use]
    pub fn map_caps(mut self, f: impl FnOnce(Caps) -> Caps) -> Self {
        self.caps = f(self.caps);
        self
    }

    /// Same config with the foundation suit filled in.
    ///
    /// Only touches `suit`/`base_suit` when the template constrains them.
    #[must_use]
    pub fn for_suit(mut self, suit: u8) -> Self {
        if self.caps.suit.is_some() {
            self.caps.suit = Some(suit);
        }
        if self.caps.base_suit.is_some() {
            self.caps.base_suit = Some(suit);
        }
        self
    }
}

/// Per-session preferences that change how moves are carried out, not which
/// moves are legal.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameOptions {
    /// Turn face-down top cards of rows automatically after each move.
    pub autoflip: bool,
    /// The game is being played by the demo/auto-pilot.
    pub demo: bool,
    /// Animation frames passed to the presenter; -1 means default.
    pub animation_frames: i32,
}

impl Default for GameOptions {
    fn default() -> Self {
        Self {
            autoflip: true,
            demo: false,
            animation_frames: -1,
        }
    }
}

impl GameOptions {
    /// Default options.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Enable or disable automatic flipping.
    #[must_use]
    pub fn with_autoflip(mut self, autoflip: bool) -> Self {
        self.autoflip = autoflip;
        self
    }

    /// Mark the session as demo play.
    #[must_use]
    pub fn with_demo(mut self, demo: bool) -> Self {
        self.demo = demo;
        self
    }
}
