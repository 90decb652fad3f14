//! Stacks: piles of cards with capability limits and acceptance rules.
//!
//! ## Sections
//!
//! - `caps`: numeric limits and card filters (`Caps`)
//! - `sequence`: when one card follows another (`Sequencing`)
//! - `policy`: per-stack acceptance/movability rules (`AcceptPolicy`)
//! - `stack`: a single pile (`Stack`)
//! - `set`: the whole table grouped by role (`StackSet`)

pub mod caps;
pub mod policy;
pub mod sequence;
pub mod set;
pub mod stack;

pub use caps::{BaseRank, Caps, NO_WRAP, UNLIMITED};
pub use policy::{AcceptPolicy, GapRule, Grid};
pub use sequence::{Sequencing, SuitRule};
pub use set::StackSet;
pub use stack::{Stack, StackSnapshot};
