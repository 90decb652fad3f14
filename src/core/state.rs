//! Game state: the table plus the small amount of model state around it.
//!
//! ## GameState
//!
//! - `stacks`: every pile and its cards
//! - `aux`: variant-specific values (booleans as 0/1)
//! - `round`: talon pass counter, starting at 1
//! - the game's RNG stream
//!
//! Rule queries that need more than one stack (`accepts_cards`,
//! `can_move_cards`) live here so policies can look at neighbours.

use rustc_hash::FxHashMap;

use super::action::{Atom, AtomError};
use super::config::StackId;
use super::rng::{GameRng, GameRngState};
use crate::cards::Card;
use crate::stacks::{AcceptPolicy, GapRule, Grid, Stack, StackSet};

/// Auxiliary key toggled by the draw reserve.
pub const DRAW_DONE: &str = "draw_done";

/// Complete mutable state of one game.
///
/// ## Auxiliary Values (i64 only)
///
/// `aux` uses `FxHashMap<String, i64>`:
/// - Booleans: use 0/1
/// - Counters: use the value directly
#[derive(Clone, Debug)]
pub struct GameState {
    pub stacks: StackSet,
    pub aux: FxHashMap<String, i64>,
    pub round: u32,
    rng: GameRng,
}

impl GameState {
    /// Create a state over an empty table.
    #[must_use]
    pub fn new(stacks: StackSet, seed: u64) -> Self {
        Self {
            stacks,
            aux: FxHashMap::default(),
            round: 1,
            rng: GameRng::new(seed),
        }
    }

    #[must_use]
    pub fn rng(&self) -> &GameRng {
        &self.rng
    }

    pub(crate) fn rng_mut(&mut self) -> &mut GameRng {
        &mut self.rng
    }

    // === Auxiliary Values ===

    /// Get an auxiliary value with default.
    #[must_use]
    pub fn get_aux(&self, key: &str, default: i64) -> i64 {
        self.aux.get(key).copied().unwrap_or(default)
    }

    /// Set an auxiliary value (unrecorded; use the game's `update_model`
    /// during play).
    pub fn set_aux(&mut self, key: impl Into<String>, value: i64) {
        self.aux.insert(key.into(), value);
    }

    // === Rule Queries ===

    #[must_use]
    pub fn stack(&self, id: StackId) -> &Stack {
        self.stacks.get(id)
    }

    /// Would stack `to` accept `cards` coming from stack `from`?
    ///
    /// A stack never accepts cards from itself.
    #[must_use]
    pub fn accepts_cards(&self, to: StackId, from: StackId, cards: &[Card]) -> bool {
        if to == from {
            return false;
        }
        let stack = self.stacks.get(to);
        if let Some(ok) = stack.policy.accepts_local(&stack.caps, &stack.cards, cards) {
            return ok;
        }
        match stack.policy {
            AcceptPolicy::Gap { rule, grid } => self.gap_accepts(stack, rule, grid, &cards[0]),
            AcceptPolicy::DrawReserve => {
                self.stacks.get(from).role == crate::core::StackRole::Row
                    && self.get_aux(DRAW_DONE, 0) == 0
                    && self.draw_target(from).is_some()
            }
            _ => false,
        }
    }

    /// May the top `ncards` of `from` be picked up?
    #[must_use]
    pub fn can_move_cards(&self, from: StackId, ncards: usize) -> bool {
        self.stacks.get(from).can_move_cards(ncards)
    }

    /// First foundation or row (other than `from`) that would take the
    /// second card from the top of `from`.
    #[must_use]
    pub fn draw_target(&self, from: StackId) -> Option<StackId> {
        let cards = &self.stacks.get(from).cards;
        if cards.len() < 2 {
            return None;
        }
        let pile = &cards[cards.len() - 2..cards.len() - 1];
        self.stacks
            .foundations()
            .iter()
            .chain(self.stacks.rows())
            .copied()
            .find(|&s| s != from && self.accepts_cards(s, from, pile))
    }

    fn gap_accepts(&self, stack: &Stack, rule: GapRule, grid: Grid, card: &Card) -> bool {
        let idx = stack.group_index;
        if grid.column(idx) == 0 {
            return card.rank == grid.base;
        }
        let rows = self.stacks.rows();
        let left = self.stacks.get(rows[idx - 1]).top();
        let left_ok = match rule {
            GapRule::LeftSuccessor | GapRule::EitherNeighbour => {
                left.is_some_and(|l| l.suit == card.suit && l.rank + 1 == card.rank)
            }
            GapRule::LeftSuccessorAnySuit => left.is_some_and(|l| l.rank + 1 == card.rank),
            GapRule::LeftHigherSameSuit => {
                left.is_some_and(|l| l.suit == card.suit && l.rank < card.rank)
            }
        };
        if left_ok || rule != GapRule::EitherNeighbour || idx + 1 >= rows.len() {
            return left_ok;
        }
        self.stacks
            .get(rows[idx + 1])
            .top()
            .is_some_and(|r| r.suit == card.suit && r.rank == card.rank + 1)
    }

    // === Atoms ===

    /// Apply an atom forwards.
    pub(crate) fn apply(&mut self, atom: &Atom) -> Result<(), AtomError> {
        match atom {
            Atom::Move { from, to, ncards } => self.transfer(*from, *to, *ncards),
            Atom::Flip { stack } => self.flip(*stack),
            Atom::Shuffle {
                stack,
                before,
                after,
                rng_before,
                rng_after,
            } => {
                self.expect_cards(*stack, before)?;
                self.expect_rng(rng_before)?;
                self.stacks.set_cards(*stack, after.clone());
                self.rng = GameRng::from_state(rng_after);
                Ok(())
            }
            Atom::NextRound { before, after } => {
                self.expect_round(*before)?;
                self.round = *after;
                Ok(())
            }
            Atom::UpdateModel { key, old, new } => {
                self.expect_aux(key, *old)?;
                self.set_aux(key.clone(), *new);
                Ok(())
            }
            Atom::Reseed { before, after } => {
                self.expect_rng(before)?;
                self.rng = GameRng::from_state(after);
                Ok(())
            }
        }
    }

    /// Apply an atom backwards.
    pub(crate) fn revert(&mut self, atom: &Atom) -> Result<(), AtomError> {
        match atom {
            Atom::Move { from, to, ncards } => self.transfer(*to, *from, *ncards),
            Atom::Flip { stack } => self.flip(*stack),
            Atom::Shuffle {
                stack,
                before,
                after,
                rng_before,
                rng_after,
            } => {
                self.expect_cards(*stack, after)?;
                self.expect_rng(rng_after)?;
                self.stacks.set_cards(*stack, before.clone());
                self.rng = GameRng::from_state(rng_before);
                Ok(())
            }
            Atom::NextRound { before, after } => {
                self.expect_round(*after)?;
                self.round = *before;
                Ok(())
            }
            Atom::UpdateModel { key, old, new } => {
                self.expect_aux(key, *new)?;
                self.set_aux(key.clone(), *old);
                Ok(())
            }
            Atom::Reseed { before, after } => {
                self.expect_rng(after)?;
                self.rng = GameRng::from_state(before);
                Ok(())
            }
        }
    }

    fn transfer(&mut self, from: StackId, to: StackId, n: usize) -> Result<(), AtomError> {
        let (Some(src), Some(_)) = (self.stacks.try_get(from), self.stacks.try_get(to)) else {
            return Err(AtomError::new(format!("unknown stack in move {from} -> {to}")));
        };
        if src.len() < n {
            return Err(AtomError::new(format!(
                "{from} holds {} cards, cannot move {n}",
                src.len()
            )));
        }
        self.stacks.transfer(from, to, n);
        Ok(())
    }

    fn flip(&mut self, stack: StackId) -> Result<(), AtomError> {
        match self.stacks.try_get(stack) {
            Some(s) if !s.is_empty() => {
                self.stacks.flip_top(stack);
                Ok(())
            }
            _ => Err(AtomError::new(format!("{stack} has no card to flip"))),
        }
    }

    fn expect_cards(&self, stack: StackId, cards: &[Card]) -> Result<(), AtomError> {
        match self.stacks.try_get(stack) {
            Some(s) if s.cards == cards => Ok(()),
            _ => Err(AtomError::new(format!("{stack} does not hold the expected cards"))),
        }
    }

    fn expect_round(&self, round: u32) -> Result<(), AtomError> {
        if self.round == round {
            Ok(())
        } else {
            Err(AtomError::new(format!("round is {}, expected {round}", self.round)))
        }
    }

    fn expect_rng(&self, expected: &GameRngState) -> Result<(), AtomError> {
        let current = self.rng.state();
        if current == *expected {
            Ok(())
        } else {
            Err(AtomError::new(format!(
                "rng at word {} of seed {}, expected word {} of seed {}",
                current.word_pos, current.seed, expected.word_pos, expected.seed
            )))
        }
    }

    fn expect_aux(&self, key: &str, value: i64) -> Result<(), AtomError> {
        let current = self.get_aux(key, 0);
        if current == value {
            Ok(())
        } else {
            Err(AtomError::new(format!("{key} is {current}, expected {value}")))
        }
    }
}
