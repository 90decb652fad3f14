//! Demo autopilot: plays the best hint, deals when there is none.
//!
//! The pilot remembers every position it has produced and never steers
//! back into one, so it always terminates: it wins, runs out of fresh
//! moves, hits its step limit or is cancelled from another thread.

use std::hash::{Hash, Hasher};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use rustc_hash::{FxHashSet, FxHasher};
use tracing::{debug, info};

use super::{Game, Sample};
use crate::core::StackId;
use crate::hint::Hint;
use crate::stacks::StackSnapshot;

/// Shared flag that stops a running pilot between steps.
#[derive(Clone, Debug, Default)]
pub struct CancelToken(Arc<AtomicBool>);

impl CancelToken {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::Relaxed);
    }

    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::Relaxed)
    }
}

/// How a pilot run ended.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PilotOutcome {
    Won,
    /// No hint leads to an unseen position and the talon cannot help.
    Stuck,
    Cancelled,
    StepLimit,
}

/// Plays a game on its own.
#[derive(Clone, Debug)]
pub struct AutoPilot {
    max_steps: usize,
    cancel: CancelToken,
}

impl Default for AutoPilot {
    fn default() -> Self {
        Self {
            max_steps: 2000,
            cancel: CancelToken::new(),
        }
    }
}

impl AutoPilot {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_max_steps(mut self, max_steps: usize) -> Self {
        self.max_steps = max_steps;
        self
    }

    #[must_use]
    pub fn with_cancel_token(mut self, cancel: CancelToken) -> Self {
        self.cancel = cancel;
        self
    }

    /// Handle for stopping this pilot from elsewhere.
    #[must_use]
    pub fn cancel_token(&self) -> CancelToken {
        self.cancel.clone()
    }

    /// Play until the game ends or the pilot gives up.
    pub fn run(&self, game: &mut Game) -> PilotOutcome {
        let mut seen = FxHashSet::default();
        seen.insert(position_key(&game.state().stacks.snapshot()));

        let mut steps = 0;
        let outcome = loop {
            if game.is_won() {
                break PilotOutcome::Won;
            }
            if self.cancel.is_cancelled() {
                break PilotOutcome::Cancelled;
            }
            if steps == self.max_steps {
                break PilotOutcome::StepLimit;
            }
            steps += 1;
            if !self.step(game, &mut seen) {
                break PilotOutcome::Stuck;
            }
        };

        match outcome {
            PilotOutcome::Won => game.play_sample(Sample::AutoPilotWon, 1000),
            PilotOutcome::Stuck => game.play_sample(Sample::AutoPilotLost, 1000),
            PilotOutcome::Cancelled | PilotOutcome::StepLimit => {}
        }
        info!(game = game.info().id, seed = game.seed(), steps, ?outcome, "autopilot finished");
        outcome
    }

    /// Make one move or deal. Returns false when nothing new is reachable.
    fn step(&self, game: &mut Game, seen: &mut FxHashSet<u64>) -> bool {
        let snapshot = game.state().stacks.snapshot();
        let fresh = game.hints().into_iter().find_map(|hint| {
            let key = position_key(&after_move(&snapshot, &hint));
            (!seen.contains(&key)).then_some((hint, key))
        });
        if let Some((hint, key)) = fresh {
            if game.try_move(hint.ncards, hint.from, hint.to).is_ok() {
                debug!(from = %hint.from, to = %hint.to, ncards = hint.ncards, "autopilot move");
                seen.insert(key);
                seen.insert(position_key(&game.state().stacks.snapshot()));
                return true;
            }
        }
        if !game.can_deal_cards() || game.deal_cards().is_err() {
            return false;
        }
        debug!(round = game.round(), "autopilot deal");
        seen.insert(position_key(&game.state().stacks.snapshot()))
    }
}

fn position_key(stacks: &[StackSnapshot]) -> u64 {
    let mut hasher = FxHasher::default();
    stacks.hash(&mut hasher);
    hasher.finish()
}

/// Card layout after `hint`, ignoring any flip it would trigger.
fn after_move(snapshot: &[StackSnapshot], hint: &Hint) -> Vec<StackSnapshot> {
    let mut stacks = snapshot.to_vec();
    let find = |stacks: &[StackSnapshot], id: StackId| stacks.iter().position(|s| s.id == id);
    let (Some(from), Some(to)) = (find(&stacks, hint.from), find(&stacks, hint.to)) else {
        return stacks;
    };
    let split = stacks[from].cards.len().saturating_sub(hint.ncards);
    let moved = stacks[from].cards.split_off(split);
    stacks[to].cards.extend(moved);
    stacks
}
