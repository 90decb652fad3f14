//! Deterministic random number generation for deals and redeals.
//!
//! ## Key Features
//!
//! - **Deterministic**: Same seed produces identical deals
//! - **Serializable**: O(1) state capture and restore, so a redeal can be
//!   undone and replayed bit-for-bit
//! - **One stream per game**: the initial shuffle and every mid-game
//!   reshuffle draw from the same stream
//!
//! ## Usage
//!
//! ```
//! use rust_solitaire::core::GameRng;
//!
//! let mut rng = GameRng::new(42);
//! let mut deck: Vec<u32> = (0..52).collect();
//! rng.shuffle(&mut deck);
//!
//! // Same seed, same deal
//! let mut again = GameRng::new(42);
//! let mut deck2: Vec<u32> = (0..52).collect();
//! again.shuffle(&mut deck2);
//! assert_eq!(deck, deck2);
//! ```

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

/// Deterministic RNG bound to a single game instance.
///
/// Uses ChaCha8 for speed; the stream position can be captured and restored
/// so history entries can rewind the generator along with the cards.
#[derive(Clone, Debug)]
pub struct GameRng {
    inner: ChaCha8Rng,
    seed: u64,
}

impl GameRng {
    /// Create a new RNG with the given seed.
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self {
            inner: ChaCha8Rng::seed_from_u64(seed),
            seed,
        }
    }

    /// Draw a fresh seed for a new (non-replayed) game.
    #[must_use]
    pub fn fresh_seed() -> u64 {
        rand::random::<u64>()
    }

    /// The seed this stream was created from.
    #[must_use]
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Generate a random usize in the given range.
    pub fn gen_range_usize(&mut self, range: std::ops::Range<usize>) -> usize {
        self.inner.gen_range(range)
    }

    /// Shuffle a slice in place.
    pub fn shuffle<T>(&mut self, slice: &mut [T]) {
        use rand::seq::SliceRandom;
        slice.shuffle(&mut self.inner);
    }

    /// Choose a random element from a slice.
    #[must_use]
    pub fn choose<'a, T>(&mut self, slice: &'a [T]) -> Option<&'a T> {
        use rand::seq::SliceRandom;
        slice.choose(&mut self.inner)
    }

    /// Get the current state for serialization.
    #[must_use]
    pub fn state(&self) -> GameRngState {
        GameRngState {
            seed: self.seed,
            word_pos: self.inner.get_word_pos(),
        }
    }

    /// Restore from a saved state.
    #[must_use]
    pub fn from_state(state: &GameRngState) -> Self {
        let mut inner = ChaCha8Rng::seed_from_u64(state.seed);
        inner.set_word_pos(state.word_pos);
        Self {
            inner,
            seed: state.seed,
        }
    }
}

/// Serializable RNG state for checkpointing.
///
/// Uses ChaCha8 word position for O(1) serialization regardless of
/// how many random numbers have been generated.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameRngState {
    /// Original seed
    pub seed: u64,
    /// ChaCha8 word position (128-bit counter)
    pub word_pos: u128,
}
