//! Acceptance and movability policies.
//!
//! A policy is the rule layer on top of `Caps`: the caps decide whether the
//! shape of a transfer is possible at all, the policy decides whether the
//! cards form a legal build. Policies that need to look at other stacks
//! (neighbouring gaps, draw reserves) are evaluated by
//! [`GameState::accepts_cards`](crate::core::GameState::accepts_cards).

use serde::{Deserialize, Serialize};

use super::caps::Caps;
use super::sequence::Sequencing;
use crate::cards::Card;

/// How a gap in a Montana-style grid may be filled.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GapRule {
    /// Same suit, one rank above the left neighbour.
    LeftSuccessor,
    /// As `LeftSuccessor`, or one rank below the right neighbour.
    EitherNeighbour,
    /// One rank above the left neighbour, any suit.
    LeftSuccessorAnySuit,
    /// Same suit, any higher rank than the left neighbour.
    LeftHigherSameSuit,
}

/// Grid geometry shared by the gap rule, the redeal and the win check.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Grid {
    /// Cells per grid row.
    pub step: usize,
    /// Rank required in column zero.
    pub base: u8,
}

impl Grid {
    #[must_use]
    pub const fn new(step: usize, base: u8) -> Self {
        Self { step, base }
    }

    /// Column of a cell.
    #[must_use]
    pub const fn column(&self, index: usize) -> usize {
        index % self.step
    }
}

/// Rule set deciding which piles a stack accepts and releases.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AcceptPolicy {
    /// Caps only: talon, waste, invisible piles.
    Closed,
    /// Builds and moves runs under one sequencing rule.
    Sequence(Sequencing),
    /// Accepts a pile whose first card continues the top card; any face-up
    /// pile may be lifted whether it forms a run or not.
    Yukon(Sequencing),
    /// Accepts runs under `accept`, but only releases runs under `moves`.
    Spider {
        accept: Sequencing,
        moves: Sequencing,
    },
    /// Foundation building one card at a time from the base rank.
    Foundation(Sequencing),
    /// Foundation taking a complete same-suit run in one move.
    FullRun,
    /// Free cell: caps only.
    Reserve,
    /// Grid cell in a gaps layout.
    Gap { rule: GapRule, grid: Grid },
    /// Row that may be started only by the foundation base ranks of a
    /// clover-leaf layout.
    CloverLeaf,
    /// One-card reserve that takes a card from a row so the card beneath it
    /// can be played.
    DrawReserve,
}

impl AcceptPolicy {
    /// Checks that only need the receiving stack's own cards.
    ///
    /// Returns `None` for policies that also depend on other stacks.
    #[must_use]
    pub fn accepts_local(&self, caps: &Caps, current: &[Card], cards: &[Card]) -> Option<bool> {
        if !caps.accepts_shape(current, cards) {
            return Some(false);
        }
        let top = current.last();
        let continues = |seq: &Sequencing| top.map_or(true, |t| seq.follows(caps, t, &cards[0]));
        let ok = match self {
            Self::Closed | Self::Reserve => true,
            Self::Sequence(seq) | Self::Foundation(seq) => {
                seq.is_run(caps, cards) && continues(seq)
            }
            Self::Yukon(seq) => continues(seq),
            Self::Spider { accept, .. } => accept.is_run(caps, cards) && continues(accept),
            Self::FullRun => Sequencing::SS.is_run(caps, cards),
            Self::CloverLeaf => {
                let seq = Sequencing::UD_SS;
                seq.is_run(caps, cards)
                    && match top {
                        Some(t) => seq.follows(caps, t, &cards[0]),
                        None => matches!(cards[0].rank, crate::cards::ACE | crate::cards::KING),
                    }
            }
            Self::Gap { .. } | Self::DrawReserve => return None,
        };
        Some(ok)
    }

    /// Whether the top `cards` of a stack holding `current` may be lifted.
    #[must_use]
    pub fn can_move(&self, caps: &Caps, current: &[Card], cards: &[Card]) -> bool {
        if !caps.can_move_shape(current, cards) {
            return false;
        }
        match self {
            Self::Sequence(seq) => seq.is_run(caps, cards),
            Self::Spider { moves, .. } => moves.is_run(caps, cards),
            Self::CloverLeaf => Sequencing::UD_SS.is_run(caps, cards),
            Self::FullRun => false,
            Self::Closed
            | Self::Yukon(_)
            | Self::Foundation(_)
            | Self::Reserve
            | Self::Gap { .. }
            | Self::DrawReserve => true,
        }
    }

    /// Whether a face-down top card may be turned by the player.
    #[must_use]
    pub fn can_flip(&self) -> bool {
        !matches!(self, Self::Closed | Self::FullRun | Self::Foundation(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::{ACE, KING};
    use crate::stacks::BaseRank;

    fn up(suit: u8, rank: u8) -> Card {
        Card::new(suit as u16 * 13 + rank as u16, 0, suit, rank).face_up()
    }

    #[test]
    fn test_sequence_row() {
        let policy = AcceptPolicy::Sequence(Sequencing::AC);
        let caps = Caps::row();
        assert_eq!(policy.accepts_local(&caps, &[up(0, 9)], &[up(2, 8), up(1, 7)]), Some(true));
        assert_eq!(policy.accepts_local(&caps, &[up(0, 9)], &[up(1, 8)]), Some(false));
        assert!(policy.can_move(&caps, &[up(0, 9), up(2, 8)], &[up(0, 9), up(2, 8)]));
        assert!(!policy.can_move(&caps, &[up(0, 9), up(1, 8)], &[up(0, 9), up(1, 8)]));
    }

    #[test]
    fn test_yukon_moves_any_face_up_pile() {
        let policy = AcceptPolicy::Yukon(Sequencing::AC);
        let caps = Caps::row().with_base_rank(BaseRank::KING);
        let pile = [up(0, 9), up(0, 3), up(2, 11)];
        assert!(policy.can_move(&caps, &pile, &pile[1..]));
        // Only the join with the top card matters.
        assert_eq!(policy.accepts_local(&caps, &[up(2, 4)], &pile[1..]), Some(true));
        assert_eq!(policy.accepts_local(&caps, &[], &pile[1..]), Some(false));
        assert_eq!(policy.accepts_local(&caps, &[], &[up(1, KING)]), Some(true));
    }

    #[test]
    fn test_spider_split_rules() {
        let policy = AcceptPolicy::Spider {
            accept: Sequencing::RK,
            moves: Sequencing::SS,
        };
        let caps = Caps::row();
        let mixed = [up(0, 6), up(2, 5)];
        assert_eq!(policy.accepts_local(&caps, &[up(3, 7)], &mixed), Some(true));
        assert!(!policy.can_move(&caps, &mixed, &mixed));
        let same = [up(0, 6), up(0, 5)];
        assert!(policy.can_move(&caps, &same, &same));
    }

    #[test]
    fn test_foundation() {
        let policy = AcceptPolicy::Foundation(Sequencing::SS);
        let caps = Caps::foundation(0);
        assert_eq!(policy.accepts_local(&caps, &[], &[up(0, ACE)]), Some(true));
        assert_eq!(policy.accepts_local(&caps, &[up(0, ACE)], &[up(0, 1)]), Some(true));
        assert_eq!(policy.accepts_local(&caps, &[up(0, ACE)], &[up(0, 2)]), Some(false));
    }

    #[test]
    fn test_clover_leaf_empty_base() {
        let policy = AcceptPolicy::CloverLeaf;
        let caps = Caps::row().with_max_move(1).with_max_accept(1);
        assert_eq!(policy.accepts_local(&caps, &[], &[up(2, KING)]), Some(true));
        assert_eq!(policy.accepts_local(&caps, &[], &[up(0, ACE)]), Some(true));
        assert_eq!(policy.accepts_local(&caps, &[], &[up(0, 5)]), Some(false));
        assert_eq!(policy.accepts_local(&caps, &[up(0, 5)], &[up(0, 6)]), Some(true));
    }

    #[test]
    fn test_gap_needs_context() {
        let policy = AcceptPolicy::Gap {
            rule: GapRule::LeftSuccessor,
            grid: Grid::new(13, 1),
        };
        let caps = Caps::reserve();
        assert_eq!(policy.accepts_local(&caps, &[], &[up(0, 3)]), None);
        assert_eq!(policy.accepts_local(&caps, &[up(0, 2)], &[up(0, 3)]), Some(false));
    }
}
