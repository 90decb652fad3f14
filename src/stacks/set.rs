//! The full table: every stack of one game, grouped by role.
//!
//! `StackSet` owns the cards. Raw transfers here perform no rule checks;
//! callers validate with the policies first and record history themselves.

use super::stack::{Stack, StackSnapshot};
use crate::cards::Card;
use crate::core::{StackConfig, StackId, StackRole};

/// All stacks of a game plus role groups for quick iteration.
///
/// ## Usage
///
/// ```
/// use rust_solitaire::core::{StackConfig, StackRole};
/// use rust_solitaire::stacks::{AcceptPolicy, StackSet};
///
/// let mut set = StackSet::new();
/// let talon = set.add(StackConfig::new(StackRole::Talon, AcceptPolicy::Closed));
/// let row = set.add(StackConfig::new(StackRole::Row, AcceptPolicy::Reserve));
/// assert_eq!(set.talon(), Some(talon));
/// assert_eq!(set.rows(), &[row]);
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct StackSet {
    stacks: Vec<Stack>,
    talon: Option<StackId>,
    waste: Option<StackId>,
    foundations: Vec<StackId>,
    rows: Vec<StackId>,
    reserves: Vec<StackId>,
    internals: Vec<StackId>,
}

impl StackSet {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an empty stack and return its id.
    ///
    /// Panics if a second talon or waste is added.
    pub fn add(&mut self, config: StackConfig) -> StackId {
        let id = StackId(self.stacks.len() as u16);
        let group = match config.role {
            StackRole::Talon => {
                assert!(self.talon.is_none(), "game already has a talon");
                self.talon = Some(id);
                0
            }
            StackRole::Waste => {
                assert!(self.waste.is_none(), "game already has a waste");
                self.waste = Some(id);
                0
            }
            StackRole::Foundation => push_index(&mut self.foundations, id),
            StackRole::Row => push_index(&mut self.rows, id),
            StackRole::Reserve => push_index(&mut self.reserves, id),
            StackRole::Internal => push_index(&mut self.internals, id),
        };
        self.stacks.push(Stack::from_config(id, group, &config));
        id
    }

    /// Get a stack. Panics on an unknown id.
    #[must_use]
    pub fn get(&self, id: StackId) -> &Stack {
        &self.stacks[id.index()]
    }

    /// Get a stack if the id exists.
    #[must_use]
    pub fn try_get(&self, id: StackId) -> Option<&Stack> {
        self.stacks.get(id.index())
    }

    pub(crate) fn get_mut(&mut self, id: StackId) -> &mut Stack {
        &mut self.stacks[id.index()]
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.stacks.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.stacks.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Stack> {
        self.stacks.iter()
    }

    #[must_use]
    pub fn talon(&self) -> Option<StackId> {
        self.talon
    }

    #[must_use]
    pub fn waste(&self) -> Option<StackId> {
        self.waste
    }

    #[must_use]
    pub fn foundations(&self) -> &[StackId] {
        &self.foundations
    }

    #[must_use]
    pub fn rows(&self) -> &[StackId] {
        &self.rows
    }

    #[must_use]
    pub fn reserves(&self) -> &[StackId] {
        &self.reserves
    }

    #[must_use]
    pub fn internals(&self) -> &[StackId] {
        &self.internals
    }

    /// Stacks a player may take cards from: waste, rows and reserves.
    #[must_use]
    pub fn drop_sources(&self) -> Vec<StackId> {
        self.waste
            .iter()
            .chain(&self.rows)
            .chain(&self.reserves)
            .copied()
            .collect()
    }

    /// Total cards on the table.
    #[must_use]
    pub fn total_cards(&self) -> usize {
        self.stacks.iter().map(Stack::len).sum()
    }

    /// Move the top `n` cards from one stack to another, keeping their order.
    ///
    /// Panics if `from` holds fewer than `n` cards.
    pub(crate) fn transfer(&mut self, from: StackId, to: StackId, n: usize) -> Vec<Card> {
        let src = &mut self.stacks[from.index()].cards;
        assert!(n <= src.len(), "{from} holds {} cards, cannot take {n}", src.len());
        let moved = src.split_off(src.len() - n);
        self.stacks[to.index()].cards.extend_from_slice(&moved);
        moved
    }

    /// Turn the top card of a stack over. Panics on an empty stack.
    pub(crate) fn flip_top(&mut self, id: StackId) -> Card {
        let card = self.stacks[id.index()]
            .cards
            .last_mut()
            .unwrap_or_else(|| panic!("{id} is empty, nothing to flip"));
        card.flip();
        *card
    }

    /// Replace a stack's cards wholesale (shuffles and deal setup).
    pub(crate) fn set_cards(&mut self, id: StackId, cards: Vec<Card>) {
        self.stacks[id.index()].cards = cards;
    }

    /// Copy of the table with one stack's cards replaced.
    ///
    /// Used to ask "what would this stack accept after the move" without
    /// touching the live table.
    #[must_use]
    pub fn with_cards(&self, id: StackId, cards: &[Card]) -> Self {
        let mut copy = self.clone();
        copy.stacks[id.index()].cards = cards.to_vec();
        copy
    }

    /// Card listing of every stack, in id order.
    #[must_use]
    pub fn snapshot(&self) -> Vec<StackSnapshot> {
        self.stacks
            .iter()
            .map(|s| StackSnapshot {
                id: s.id,
                cards: s.cards.clone(),
            })
            .collect()
    }
}

fn push_index(group: &mut Vec<StackId>, id: StackId) -> usize {
    group.push(id);
    group.len() - 1
}
