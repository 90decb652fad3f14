//! Deck construction and pre-deal arrangement.
//!
//! ## Sections
//!
//! - `DeckSpec`: how many decks, suits and ranks make up a game's cards
//! - `CardSelector`: picks cards out of the shuffled talon and orders them
//! - `ShuffleHook`: moves the selected cards to the top or bottom of the
//!   talon after shuffling
//!
//! Shuffle hooks keep the rest of the shuffle intact: only the selected cards
//! change position, and the talon's top is the END of the vector, so the
//! selected card with the smallest order is dealt first.

use serde::{Deserialize, Serialize};

use super::card::{Card, ACE, KING};

/// Composition of the cards a game is played with.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeckSpec {
    pub decks: u8,
    pub suits: u8,
    pub ranks: u8,
    pub trumps: u8,
}

impl DeckSpec {
    /// Standard 52-card French deck(s).
    #[must_use]
    pub const fn french(decks: u8) -> Self {
        Self {
            decks,
            suits: 4,
            ranks: 13,
            trumps: 0,
        }
    }

    /// Cards in one deck.
    #[must_use]
    pub const fn cards_per_deck(&self) -> usize {
        self.suits as usize * self.ranks as usize + self.trumps as usize
    }

    /// Total number of cards.
    #[must_use]
    pub const fn total_cards(&self) -> usize {
        self.decks as usize * self.cards_per_deck()
    }

    /// Build every card, face down, in id order.
    ///
    /// Trumps get suit index `suits` and rank equal to their position.
    #[must_use]
    pub fn create_cards(&self) -> Vec<Card> {
        let mut cards = Vec::with_capacity(self.total_cards());
        let mut id: u16 = 0;
        for deck in 0..self.decks {
            for suit in 0..self.suits {
                for rank in 0..self.ranks {
                    cards.push(Card::new(id, deck, suit, rank));
                    id += 1;
                }
            }
            for trump in 0..self.trumps {
                cards.push(Card::new(id, deck, self.suits, trump));
                id += 1;
            }
        }
        cards
    }
}

/// Chooses cards for a shuffle hook and gives each a sort order.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CardSelector {
    /// All aces, ordered by suit.
    Aces,
    /// All aces, ordered by (deck, suit).
    AcesByDeckAndSuit,
    /// Kings of the first deck, ordered by suit.
    FirstDeckKings,
    /// Aces of clubs/spades and kings of hearts/diamonds, ordered by suit.
    AceBlackKingRed,
    /// Cards with the listed ids, ordered by suit.
    Ids(&'static [u16]),
}

impl CardSelector {
    /// Sort order for a selected card, `None` when not selected.
    #[must_use]
    pub fn select(&self, card: &Card) -> Option<u32> {
        match self {
            Self::Aces => (card.rank == ACE).then_some(card.suit as u32),
            Self::AcesByDeckAndSuit => {
                (card.rank == ACE).then_some(card.deck as u32 * 16 + card.suit as u32)
            }
            Self::FirstDeckKings => {
                (card.rank == KING && card.deck == 0).then_some(card.suit as u32)
            }
            Self::AceBlackKingRed => {
                let picked = (card.rank == ACE && card.suit < 2) || (card.rank == KING && card.suit >= 2);
                picked.then_some(card.suit as u32)
            }
            Self::Ids(ids) => ids.contains(&card.id.0).then_some(card.suit as u32),
        }
    }
}

/// Post-shuffle rearrangement applied before the deal.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ShuffleHook {
    #[default]
    None,
    /// Selected cards end up on top of the talon (dealt first).
    MoveToTop(CardSelector),
    /// Selected cards end up at the bottom of the talon (dealt last).
    MoveToBottom(CardSelector),
}

impl ShuffleHook {
    /// Rearrange a shuffled talon. The last element is the top card.
    #[must_use]
    pub fn apply(&self, cards: Vec<Card>) -> Vec<Card> {
        let (selector, to_top) = match self {
            Self::None => return cards,
            Self::MoveToTop(selector) => (selector, true),
            Self::MoveToBottom(selector) => (selector, false),
        };

        let total = cards.len();
        let mut rest = Vec::with_capacity(total);
        let mut picked: Vec<(u32, usize, Card)> = Vec::new();
        for (pos, card) in cards.into_iter().enumerate() {
            match selector.select(&card) {
                Some(order) => picked.push((order, total - pos, card)),
                None => rest.push(card),
            }
        }
        picked.sort_by_key(|&(order, pos, _)| (order, pos));
        picked.reverse();
        let picked = picked.into_iter().map(|(_, _, card)| card);

        if to_top {
            rest.extend(picked);
            rest
        } else {
            let mut out: Vec<Card> = picked.collect();
            out.extend(rest);
            out
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::GameRng;

    fn shuffled(seed: u64, decks: u8) -> Vec<Card> {
        let mut cards = DeckSpec::french(decks).create_cards();
        GameRng::new(seed).shuffle(&mut cards);
        cards
    }

    #[test]
    fn test_create_cards_ids() {
        let cards = DeckSpec::french(2).create_cards();
        assert_eq!(cards.len(), 104);
        assert!(cards.iter().enumerate().all(|(i, c)| c.id.0 as usize == i));
        let c = cards[52 + 2 * 13 + 5];
        assert_eq!((c.deck, c.suit, c.rank), (1, 2, 5));
        assert!(cards.iter().all(|c| !c.face_up));
    }

    #[test]
    fn test_move_aces_to_top() {
        let cards = ShuffleHook::MoveToTop(CardSelector::Aces).apply(shuffled(7, 1));
        assert_eq!(cards.len(), 52);
        let top: Vec<_> = cards.iter().rev().take(4).map(|c| (c.rank, c.suit)).collect();
        assert_eq!(top, vec![(ACE, 0), (ACE, 1), (ACE, 2), (ACE, 3)]);
    }

    #[test]
    fn test_move_aces_to_bottom() {
        let cards = ShuffleHook::MoveToBottom(CardSelector::Aces).apply(shuffled(7, 1));
        let bottom: Vec<_> = cards.iter().take(4).map(|c| (c.rank, c.suit)).collect();
        assert_eq!(bottom, vec![(ACE, 3), (ACE, 2), (ACE, 1), (ACE, 0)]);
        assert!(cards[4..].iter().all(|c| c.rank != ACE));
    }

    #[test]
    fn test_hook_preserves_other_order() {
        let original = shuffled(99, 1);
        let expected: Vec<_> = original.iter().filter(|c| c.rank != ACE).copied().collect();
        let cards = ShuffleHook::MoveToTop(CardSelector::Aces).apply(original);
        assert_eq!(&cards[..48], &expected[..]);
    }

    #[test]
    fn test_duplicate_order_keeps_talon_position() {
        // Two decks: equal sort keys fall back to talon position.
        let cards = ShuffleHook::MoveToTop(CardSelector::Aces).apply(shuffled(3, 2));
        let top: Vec<_> = cards.iter().rev().take(8).map(|c| c.suit).collect();
        assert_eq!(top, vec![0, 0, 1, 1, 2, 2, 3, 3]);
    }

    #[test]
    fn test_ace_black_king_red() {
        let sel = CardSelector::AceBlackKingRed;
        assert!(sel.select(&Card::new(0, 0, 0, ACE)).is_some());
        assert!(sel.select(&Card::new(26, 0, 2, ACE)).is_none());
        assert!(sel.select(&Card::new(38, 0, 2, KING)).is_some());
        assert!(sel.select(&Card::new(12, 0, 0, KING)).is_none());
    }
}
