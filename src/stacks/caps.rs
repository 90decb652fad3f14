//! Capability profiles: the numeric and filter limits every stack checks
//! before its policy gets a say.

use serde::{Deserialize, Serialize};

use crate::cards::{Card, ACE, KING};

/// Stand-in for "no limit" in count caps.
pub const UNLIMITED: usize = 999_999;

/// Default rank modulus, large enough that sequences never wrap.
pub const NO_WRAP: u16 = 8192;

/// What an empty stack accepts as its first card.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BaseRank {
    /// Any rank may start the stack.
    #[default]
    Any,
    /// Nothing may be placed on the empty stack.
    None,
    /// Only this rank.
    Rank(u8),
}

impl BaseRank {
    /// Shorthand for a king-only empty stack.
    pub const KING: Self = Self::Rank(KING);
    /// Shorthand for an ace-only empty stack.
    pub const ACE: Self = Self::Rank(ACE);

    /// Whether `rank` may start an empty stack.
    #[must_use]
    pub const fn allows(self, rank: u8) -> bool {
        match self {
            Self::Any => true,
            Self::None => false,
            Self::Rank(r) => r == rank,
        }
    }
}

/// Stack capability profile.
///
/// Filters (`suit`, `color`, `rank`) apply to every incoming card; the
/// `base_*` fields only apply when the stack is empty.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Caps {
    pub suit: Option<u8>,
    pub color: Option<u8>,
    pub rank: Option<u8>,
    pub base_suit: Option<u8>,
    pub base_color: Option<u8>,
    pub base_rank: BaseRank,
    /// Rank step between consecutive cards (-1 building down, +1 up, 0 same rank).
    pub dir: i8,
    /// Rank arithmetic modulus; 13 lets a king wrap onto an ace.
    pub modulus: u16,
    pub min_move: usize,
    pub max_move: usize,
    pub min_accept: usize,
    pub max_accept: usize,
    pub max_cards: usize,
    /// Cards that must always stay behind.
    pub min_cards: usize,
    /// Talon passes allowed; `None` means unlimited.
    pub max_rounds: Option<u32>,
    /// Cards turned per talon deal.
    pub num_deal: usize,
}

impl Default for Caps {
    fn default() -> Self {
        Self {
            suit: None,
            color: None,
            rank: None,
            base_suit: None,
            base_color: None,
            base_rank: BaseRank::Any,
            dir: 0,
            modulus: NO_WRAP,
            min_move: 1,
            max_move: 0,
            min_accept: 1,
            max_accept: 0,
            max_cards: UNLIMITED,
            min_cards: 0,
            max_rounds: Some(1),
            num_deal: 1,
        }
    }
}

impl Caps {
    /// Nothing in, nothing out.
    #[must_use]
    pub fn closed() -> Self {
        Self::default()
    }

    /// Talon: cards only leave through dealing.
    #[must_use]
    pub fn talon() -> Self {
        Self::default()
    }

    /// Waste: the top card may be played, nothing may be dropped on it.
    #[must_use]
    pub fn waste() -> Self {
        Self {
            max_move: 1,
            ..Self::default()
        }
    }

    /// Tableau row building down, any pile size in or out.
    #[must_use]
    pub fn row() -> Self {
        Self {
            dir: -1,
            max_move: UNLIMITED,
            max_accept: UNLIMITED,
            ..Self::default()
        }
    }

    /// Single-card free cell.
    #[must_use]
    pub fn reserve() -> Self {
        Self {
            max_move: 1,
            max_accept: 1,
            max_cards: 1,
            ..Self::default()
        }
    }

    /// Foundation for one suit, ace up to king.
    #[must_use]
    pub fn foundation(suit: u8) -> Self {
        Self {
            suit: Some(suit),
            base_suit: Some(suit),
            base_rank: BaseRank::ACE,
            dir: 1,
            modulus: 13,
            max_move: 1,
            max_accept: 1,
            max_cards: 13,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_suit(mut self, suit: Option<u8>) -> Self {
        self.suit = suit;
        self
    }

    #[must_use]
    pub fn with_base_suit(mut self, suit: Option<u8>) -> Self {
        self.base_suit = suit;
        self
    }

    #[must_use]
    pub fn with_base_rank(mut self, base_rank: BaseRank) -> Self {
        self.base_rank = base_rank;
        self
    }

    #[must_use]
    pub fn with_dir(mut self, dir: i8) -> Self {
        self.dir = dir;
        self
    }

    #[must_use]
    pub fn with_mod(mut self, modulus: u16) -> Self {
        self.modulus = modulus;
        self
    }

    #[must_use]
    pub fn with_min_move(mut self, n: usize) -> Self {
        self.min_move = n;
        self
    }

    #[must_use]
    pub fn with_max_move(mut self, n: usize) -> Self {
        self.max_move = n;
        self
    }

    #[must_use]
    pub fn with_min_accept(mut self, n: usize) -> Self {
        self.min_accept = n;
        self
    }

    #[must_use]
    pub fn with_max_accept(mut self, n: usize) -> Self {
        self.max_accept = n;
        self
    }

    #[must_use]
    pub fn with_max_cards(mut self, n: usize) -> Self {
        self.max_cards = n;
        self
    }

    #[must_use]
    pub fn with_min_cards(mut self, n: usize) -> Self {
        self.min_cards = n;
        self
    }

    #[must_use]
    pub fn with_max_rounds(mut self, rounds: Option<u32>) -> Self {
        self.max_rounds = rounds;
        self
    }

    #[must_use]
    pub fn with_num_deal(mut self, n: usize) -> Self {
        self.num_deal = n;
        self
    }

    /// Whether a talon at `round` has passes left to use.
    #[must_use]
    pub fn has_rounds_left(&self, round: u32) -> bool {
        self.max_rounds.map_or(true, |max| round < max)
    }

    /// Shape checks shared by every policy when `cards` would land on a
    /// stack currently holding `current`.
    #[must_use]
    pub fn accepts_shape(&self, current: &[Card], cards: &[Card]) -> bool {
        let n = cards.len();
        if n == 0 || n < self.min_accept || n > self.max_accept {
            return false;
        }
        if current.len() + n > self.max_cards {
            return false;
        }
        for card in cards {
            if !card.face_up
                || self.suit.is_some_and(|s| s != card.suit)
                || self.color.is_some_and(|c| c != card.color())
                || self.rank.is_some_and(|r| r != card.rank)
            {
                return false;
            }
        }
        match current.last() {
            Some(top) => top.face_up,
            None => {
                let first = &cards[0];
                self.base_suit.map_or(true, |s| s == first.suit)
                    && self.base_color.map_or(true, |c| c == first.color())
                    && self.base_rank.allows(first.rank)
            }
        }
    }

    /// Shape checks for lifting the top `cards` off a stack holding `current`.
    #[must_use]
    pub fn can_move_shape(&self, current: &[Card], cards: &[Card]) -> bool {
        let n = cards.len();
        if n == 0 || n < self.min_move || n > self.max_move || n > current.len() {
            return false;
        }
        if current.len() - n < self.min_cards {
            return false;
        }
        cards.iter().all(|c| c.face_up)
    }
}
