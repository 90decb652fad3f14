//! Card system: card values, decks and pre-deal arrangement.
//!
//! ## Key Types
//!
//! - `Card`: one playing card (identity plus face orientation)
//! - `CardId`: unique card identifier within a game
//! - `DeckSpec`: the decks a game is played with
//! - `ShuffleHook`: moves chosen cards to the top or bottom after shuffling

pub mod card;
pub mod deck;

pub use card::{
    Card, CardId, ACE, BLACK, CLUBS, DIAMONDS, HEARTS, JACK, KING, QUEEN, RED, SPADES, TWO,
};
pub use deck::{CardSelector, DeckSpec, ShuffleHook};
