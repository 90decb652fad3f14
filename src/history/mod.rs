//! Move history: grouping atoms into player actions, undo and redo.

pub mod log;

pub use log::MoveLog;
