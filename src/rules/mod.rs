//! Variant rules.
//!
//! A variant is a `VariantDef`: a layout plus one choice from each closed
//! policy set. The engine calls into these policies but never interprets
//! game-specific concepts directly.
//!
//! ## Sections
//!
//! - `variant`: the configuration record and stack layout
//! - `deal`: initial deal scripts
//! - `talon`: what a click on the stock does
//! - `predicates`: win, highlight and quick-play rules

pub mod deal;
pub mod predicates;
pub mod talon;
pub mod variant;

pub use deal::DealScript;
pub use predicates::{HighlightRule, QuickPlayRule, WinRule};
pub use talon::{SpacePick, TalonPolicy};
pub use variant::{FillHook, Layout, MoveHook, VariantDef};
