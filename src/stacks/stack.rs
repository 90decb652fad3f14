//! A single pile of cards.

use serde::{Deserialize, Serialize};

use super::caps::Caps;
use super::policy::AcceptPolicy;
use crate::cards::Card;
use crate::core::{StackConfig, StackId, StackRole};

/// One pile on the table.
///
/// The last card in `cards` is the top of the pile.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Stack {
    pub id: StackId,
    pub role: StackRole,
    /// Position within the stack's role group (row 0, row 1, ...).
    pub group_index: usize,
    pub caps: Caps,
    pub policy: AcceptPolicy,
    pub cards: Vec<Card>,
}

impl Stack {
    /// Create an empty stack from its config.
    #[must_use]
    pub fn from_config(id: StackId, group_index: usize, config: &StackConfig) -> Self {
        Self {
            id,
            role: config.role,
            group_index,
            caps: config.caps,
            policy: config.policy,
            cards: Vec::new(),
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.cards.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    #[must_use]
    pub fn top(&self) -> Option<&Card> {
        self.cards.last()
    }

    /// The top `n` cards, or `None` if the stack is shorter.
    #[must_use]
    pub fn top_cards(&self, n: usize) -> Option<&[Card]> {
        (n <= self.cards.len()).then(|| &self.cards[self.cards.len() - n..])
    }

    /// Whether the top `n` cards may be lifted under this stack's rules.
    #[must_use]
    pub fn can_move_cards(&self, n: usize) -> bool {
        self.top_cards(n)
            .is_some_and(|cards| self.policy.can_move(&self.caps, &self.cards, cards))
    }

    /// Size of the largest movable pile on top, 0 if none.
    #[must_use]
    pub fn movable_pile_len(&self) -> usize {
        let max = self.cards.len().min(self.caps.max_move);
        (1..=max).rev().find(|&n| self.can_move_cards(n)).unwrap_or(0)
    }

    /// Whether the top card is face down and may be turned by the player.
    #[must_use]
    pub fn can_flip_top(&self) -> bool {
        self.top().is_some_and(|c| !c.face_up) && self.policy.can_flip()
    }
}

/// Plain card listing of one stack, used for snapshots and save files.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct StackSnapshot {
    pub id: StackId,
    pub cards: Vec<Card>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stacks::Sequencing;

    fn up(suit: u8, rank: u8) -> Card {
        Card::new(suit as u16 * 13 + rank as u16, 0, suit, rank).face_up()
    }

    fn row(cards: Vec<Card>) -> Stack {
        let cfg = StackConfig::new(StackRole::Row, AcceptPolicy::Sequence(Sequencing::AC));
        let mut stack = Stack::from_config(StackId(3), 0, &cfg);
        stack.cards = cards;
        stack
    }

    #[test]
    fn test_top_cards() {
        let stack = row(vec![up(0, 9), up(2, 8)]);
        assert_eq!(stack.top_cards(1), Some(&[up(2, 8)][..]));
        assert_eq!(stack.top_cards(3), None);
        assert_eq!(stack.top(), Some(&up(2, 8)));
    }

    #[test]
    fn test_movable_pile_len() {
        let mut down = up(1, 12);
        down.face_up = false;
        let stack = row(vec![down, up(0, 9), up(2, 8), up(0, 7)]);
        assert_eq!(stack.movable_pile_len(), 3);

        let broken = row(vec![up(0, 9), up(1, 8)]);
        assert_eq!(broken.movable_pile_len(), 1);
        assert_eq!(row(vec![]).movable_pile_len(), 0);
    }

    #[test]
    fn test_can_flip_top() {
        let mut down = up(1, 12);
        down.face_up = false;
        assert!(row(vec![down]).can_flip_top());
        assert!(!row(vec![up(1, 12)]).can_flip_top());
    }
}
