//! Shared helpers for the integration tests.

#![allow(dead_code)]

use once_cell::sync::OnceCell;
use tracing_subscriber::{fmt, EnvFilter};

use rust_solitaire::{Game, StackSnapshot};

static INITIALIZED: OnceCell<()> = OnceCell::new();

/// Install a test-friendly subscriber once per test binary.
///
/// The level comes from `TEST_LOG`, then `RUST_LOG`, then defaults to
/// `warn`.
pub fn init_logging() {
    INITIALIZED.get_or_init(|| {
        let filter = std::env::var("TEST_LOG")
            .or_else(|_| std::env::var("RUST_LOG"))
            .map(EnvFilter::new)
            .unwrap_or_else(|_| EnvFilter::new("warn"));

        fmt()
            .with_env_filter(filter)
            .with_test_writer()
            .without_time()
            .try_init()
            .ok();
    });
}

pub fn snapshot(game: &Game) -> Vec<StackSnapshot> {
    game.state().stacks.snapshot()
}

/// Undo everything; returns how many entries were undone.
pub fn undo_all(game: &mut Game) -> usize {
    let mut n = 0;
    while game.can_undo() {
        game.undo().unwrap();
        n += 1;
    }
    n
}
