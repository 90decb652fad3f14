//! Playing cards and their identity.
//!
//! A `Card` is a plain value: immutable identity (`id`, `deck`, `suit`,
//! `rank`) plus one mutable bit, the face orientation. Every card in a game
//! has a unique `CardId`; ids are assigned deck by deck, suit by suit, rank by
//! rank, so `id = deck * cards_per_deck + suit * ranks + rank` for the
//! French-suited decks.

use serde::{Deserialize, Serialize};

/// Rank of an ace (the lowest rank).
pub const ACE: u8 = 0;
/// Rank of a two.
pub const TWO: u8 = 1;
/// Rank of a jack.
pub const JACK: u8 = 10;
/// Rank of a queen.
pub const QUEEN: u8 = 11;
/// Rank of a king (the highest French rank).
pub const KING: u8 = 12;

/// Suit index of clubs.
pub const CLUBS: u8 = 0;
/// Suit index of spades.
pub const SPADES: u8 = 1;
/// Suit index of hearts.
pub const HEARTS: u8 = 2;
/// Suit index of diamonds.
pub const DIAMONDS: u8 = 3;

/// Color of clubs and spades.
pub const BLACK: u8 = 0;
/// Color of hearts and diamonds.
pub const RED: u8 = 1;

const RANK_CHARS: &[u8; 13] = b"A23456789TJQK";
const SUIT_CHARS: &[u8; 4] = b"CSHD";

/// Unique card identifier within one game.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct CardId(pub u16);

impl CardId {
    /// Create a new card ID.
    #[must_use]
    pub const fn new(id: u16) -> Self {
        Self(id)
    }

    /// Get the raw ID value.
    #[must_use]
    pub const fn raw(self) -> u16 {
        self.0
    }
}

impl std::fmt::Display for CardId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Card({})", self.0)
    }
}

/// A single playing card.
///
/// Cards are `Copy`; stacks own them by value. The only field that changes
/// during play is `face_up`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Card {
    pub id: CardId,
    /// Which physical deck (0-based) the card came from.
    pub deck: u8,
    pub suit: u8,
    pub rank: u8,
    pub face_up: bool,
}

impl Card {
    /// Create a face-down card.
    #[must_use]
    pub const fn new(id: u16, deck: u8, suit: u8, rank: u8) -> Self {
        Self {
            id: CardId(id),
            deck,
            suit,
            rank,
            face_up: false,
        }
    }

    /// Same card, face up.
    #[must_use]
    pub const fn face_up(mut self) -> Self {
        self.face_up = true;
        self
    }

    /// Color derived from the suit: clubs/spades are black, hearts/diamonds red.
    #[must_use]
    pub const fn color(&self) -> u8 {
        self.suit / 2
    }

    /// Turn the card over.
    pub fn flip(&mut self) {
        self.face_up = !self.face_up;
    }
}

impl std::fmt::Display for Card {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let rank = RANK_CHARS.get(self.rank as usize).copied().unwrap_or(b'?');
        let suit = SUIT_CHARS.get(self.suit as usize).copied().unwrap_or(b'?');
        write!(f, "{}{}", rank as char, suit as char)?;
        if !self.face_up {
            write!(f, "*")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_color_from_suit() {
        assert_eq!(Card::new(0, 0, CLUBS, ACE).color(), BLACK);
        assert_eq!(Card::new(13, 0, SPADES, ACE).color(), BLACK);
        assert_eq!(Card::new(26, 0, HEARTS, ACE).color(), RED);
        assert_eq!(Card::new(39, 0, DIAMONDS, ACE).color(), RED);
    }

    #[test]
    fn test_flip() {
        let mut card = Card::new(5, 0, CLUBS, 5);
        assert!(!card.face_up);
        card.flip();
        assert!(card.face_up);
        card.flip();
        assert!(!card.face_up);
    }

    #[test]
    fn test_display() {
        assert_eq!(Card::new(12, 0, CLUBS, KING).face_up().to_string(), "KC");
        assert_eq!(Card::new(35, 0, HEARTS, 9).to_string(), "TH*");
        assert_eq!(CardId(7).to_string(), "Card(7)");
    }
}
