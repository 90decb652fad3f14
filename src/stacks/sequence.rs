//! Sequence rules: when does card `b` follow card `a` in a build?

use serde::{Deserialize, Serialize};

use super::caps::Caps;
use crate::cards::Card;

/// Suit relation between consecutive cards.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SuitRule {
    /// Same suit.
    Same,
    /// Alternating colors.
    AlternateColor,
    /// Any suit.
    Any,
    /// Any suit except the same one.
    AnyButSame,
    /// Same suit with a suit-dependent step: suit `s` builds down by `s + 1`
    /// modulo 13.
    Stepped,
}

impl SuitRule {
    #[must_use]
    pub fn matches(self, a: &Card, b: &Card) -> bool {
        match self {
            Self::Same | Self::Stepped => a.suit == b.suit,
            Self::AlternateColor => a.color() != b.color(),
            Self::Any => true,
            Self::AnyButSame => a.suit != b.suit,
        }
    }
}

/// Suit rule plus direction flexibility.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Sequencing {
    pub suits: SuitRule,
    /// Accept the step in either direction.
    pub up_or_down: bool,
}

impl Sequencing {
    pub const SS: Self = Self::new(SuitRule::Same);
    pub const AC: Self = Self::new(SuitRule::AlternateColor);
    pub const RK: Self = Self::new(SuitRule::Any);
    pub const BO: Self = Self::new(SuitRule::AnyButSame);
    pub const UD_SS: Self = Self::new(SuitRule::Same).either_way();
    pub const UD_AC: Self = Self::new(SuitRule::AlternateColor).either_way();
    pub const UD_RK: Self = Self::new(SuitRule::Any).either_way();
    pub const STEPPED: Self = Self::new(SuitRule::Stepped);

    #[must_use]
    pub const fn new(suits: SuitRule) -> Self {
        Self {
            suits,
            up_or_down: false,
        }
    }

    #[must_use]
    pub const fn either_way(mut self) -> Self {
        self.up_or_down = true;
        self
    }

    /// Whether `b` may sit directly on `a`.
    #[must_use]
    pub fn follows(&self, caps: &Caps, a: &Card, b: &Card) -> bool {
        if !self.suits.matches(a, b) {
            return false;
        }
        let (dir, modulus) = match self.suits {
            SuitRule::Stepped => (-(a.suit as i32 + 1), 13),
            _ => (caps.dir as i32, caps.modulus as i32),
        };
        step(a.rank, dir, modulus) == b.rank as i32
            || (self.up_or_down && step(b.rank, dir, modulus) == a.rank as i32)
    }

    /// Whether every adjacent pair in `cards` follows.
    #[must_use]
    pub fn is_run(&self, caps: &Caps, cards: &[Card]) -> bool {
        cards.windows(2).all(|w| self.follows(caps, &w[0], &w[1]))
    }
}

fn step(rank: u8, dir: i32, modulus: i32) -> i32 {
    (rank as i32 + dir).rem_euclid(modulus)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::{ACE, KING};

    fn up(suit: u8, rank: u8) -> Card {
        Card::new(suit as u16 * 13 + rank as u16, 0, suit, rank).face_up()
    }

    #[test]
    fn test_same_suit_down() {
        let caps = Caps::row();
        assert!(Sequencing::SS.follows(&caps, &up(0, 5), &up(0, 4)));
        assert!(!Sequencing::SS.follows(&caps, &up(0, 5), &up(1, 4)));
        assert!(!Sequencing::SS.follows(&caps, &up(0, 4), &up(0, 5)));
        assert!(Sequencing::UD_SS.follows(&caps, &up(0, 4), &up(0, 5)));
    }

    #[test]
    fn test_alternate_color() {
        let caps = Caps::row();
        assert!(Sequencing::AC.follows(&caps, &up(0, 9), &up(2, 8)));
        assert!(!Sequencing::AC.follows(&caps, &up(0, 9), &up(1, 8)));
    }

    #[test]
    fn test_no_wrap_by_default() {
        let caps = Caps::row();
        assert!(!Sequencing::RK.follows(&caps, &up(0, ACE), &up(1, KING)));
        let wrap = caps.with_mod(13);
        assert!(Sequencing::RK.follows(&wrap, &up(0, ACE), &up(1, KING)));
    }

    #[test]
    fn test_same_rank_dir_zero() {
        let caps = Caps::row().with_dir(0);
        assert!(Sequencing::RK.follows(&caps, &up(0, 7), &up(3, 7)));
        assert!(!Sequencing::RK.follows(&caps, &up(0, 7), &up(3, 6)));
    }

    #[test]
    fn test_stepped() {
        let caps = Caps::row();
        // Spades (suit 1) step down by two.
        assert!(Sequencing::STEPPED.follows(&caps, &up(1, 5), &up(1, 3)));
        assert!(!Sequencing::STEPPED.follows(&caps, &up(1, 5), &up(1, 4)));
        // Diamonds step by four and wrap.
        assert!(Sequencing::STEPPED.follows(&caps, &up(3, 1), &up(3, 10)));
    }

    #[test]
    fn test_is_run() {
        let caps = Caps::row();
        let run = [up(0, 9), up(2, 8), up(1, 7)];
        assert!(Sequencing::AC.is_run(&caps, &run));
        assert!(!Sequencing::SS.is_run(&caps, &run));
        assert!(Sequencing::SS.is_run(&caps, &run[..1]));
    }
}
