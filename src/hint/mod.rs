//! Hint engine: enumerate legal moves and rank them.
//!
//! `compute` walks every non-empty drop source (waste, rows, reserves), tries
//! each movable pile against every stack that currently accepts it and
//! scores the move. Scores are heuristics, not a planner:
//!
//! | Move                               | Base score |
//! |------------------------------------|-----------:|
//! | onto a foundation                  | 90000      |
//! | onto a non-empty row               | 40000      |
//! | onto a reserve, freeing a drop     | 30000      |
//! | onto an empty row                  | 20000      |
//!
//! Bonuses for turning a face-down card and for emptying a row are added on
//! top, plus small tie-breakers (lower foundation ranks first, longer piles
//! first). Only the relative order is meaningful.
//!
//! Cautious policies simulate a row-to-row move on a cloned state and drop
//! it unless it empties the source, turns a card, or gives the foundations
//! more to play.

use crate::cards::{Card, KING};
use crate::core::{Atom, GameState, StackId, StackRole};
use crate::rules::VariantDef;
use crate::stacks::{Grid, Stack};

/// Which scoring and filtering rules a variant's hints use.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum HintPolicy {
    #[default]
    Default,
    /// Default scoring, row-to-row moves must make progress.
    Cautious,
    /// Large bonus for turning cards; moves that bury a card the target
    /// needs lose part of their bonus.
    Yukon,
    /// One-card moves into grid gaps.
    Grid { cautious: bool },
}

/// One suggested move.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Hint {
    pub score: i32,
    pub ncards: usize,
    pub from: StackId,
    pub to: StackId,
}

// =============================================================================
// Scores
// =============================================================================

const SCORE_FOUNDATION: i32 = 90_000;
const SCORE_ROW: i32 = 40_000;
const SCORE_RESERVE: i32 = 30_000;
const SCORE_EMPTY_ROW: i32 = 20_000;
const SCORE_GRID_NO_NEIGHBOUR: i32 = 50_000;

/// Bonus weights for the structural effects of a move.
#[derive(Clone, Copy, Debug)]
struct Bonus {
    flip_card: i32,
    create_empty_row: i32,
}

impl HintPolicy {
    const fn bonus(self) -> Bonus {
        match self {
            Self::Yukon => Bonus {
                flip_card: 9000,
                create_empty_row: 100,
            },
            _ => Bonus {
                flip_card: 1500,
                create_empty_row: 1000,
            },
        }
    }
}

/// Legal moves for the current position, best first.
///
/// Ties keep the enumeration order: sources by stack id, piles from the
/// single top card upwards, targets foundations before rows before
/// reserves.
#[must_use]
pub fn compute(state: &GameState, variant: &VariantDef) -> Vec<Hint> {
    let mut hints = match variant.hint {
        HintPolicy::Grid { cautious } => match grid_of(state) {
            Some(grid) => grid_hints(state, grid, cautious),
            None => Vec::new(),
        },
        policy => pile_hints(state, policy),
    };
    hints.sort_by(|a, b| b.score.cmp(&a.score));
    hints
}

/// The best hint, if any.
#[must_use]
pub fn best(state: &GameState, variant: &VariantDef) -> Option<Hint> {
    compute(state, variant).into_iter().next()
}

// =============================================================================
// Pile Moves
// =============================================================================

fn pile_hints(state: &GameState, policy: HintPolicy) -> Vec<Hint> {
    let bonus = policy.bonus();
    let playable_before = foundation_playable(state);
    let mut hints = Vec::new();

    for from in state.stacks.drop_sources() {
        let src = state.stack(from);
        for n in 1..=src.len().min(src.caps.max_move) {
            if !src.can_move_cards(n) {
                continue;
            }
            let Some(pile) = src.top_cards(n) else {
                continue;
            };
            let rest = &src.cards[..src.len() - n];
            let uncovers = rest.last().is_some_and(|c| !c.face_up);
            let empties = rest.is_empty() && src.role == StackRole::Row;

            let mut effect = 0;
            if uncovers {
                effect += bonus.flip_card;
            }
            if empties {
                effect += bonus.create_empty_row;
            }

            for &to in state.stacks.foundations() {
                if state.accepts_cards(to, from, pile) {
                    let rank_bias = i32::from(KING) - i32::from(pile[0].rank);
                    hints.push(Hint {
                        score: SCORE_FOUNDATION + effect + rank_bias,
                        ncards: n,
                        from,
                        to,
                    });
                }
            }

            if breaks_run(src, rest, pile) {
                continue;
            }

            for &to in state.stacks.rows() {
                if !state.accepts_cards(to, from, pile) {
                    continue;
                }
                let dst = state.stack(to);
                if dst.is_empty() && rest.is_empty() && src.role == StackRole::Row {
                    // Moving a whole row into another empty row gains nothing.
                    continue;
                }
                if policy == HintPolicy::Cautious
                    && src.role == StackRole::Row
                    && !uncovers
                    && !empties
                    && !improves(state, from, to, n, playable_before)
                {
                    continue;
                }
                let base = if dst.is_empty() {
                    SCORE_EMPTY_ROW
                } else {
                    SCORE_ROW
                };
                let mut gain = effect;
                if policy == HintPolicy::Yukon && blocks_target(src, pile, dst) {
                    gain = (gain / 1000) * 1000 + gain % 100;
                }
                hints.push(Hint {
                    score: base + gain + n as i32,
                    ncards: n,
                    from,
                    to,
                });
            }

            if n == 1 && src.role == StackRole::Row {
                for &to in state.stacks.reserves() {
                    if state.accepts_cards(to, from, pile) && frees_drop(state, from) {
                        hints.push(Hint {
                            score: SCORE_RESERVE + effect,
                            ncards: 1,
                            from,
                            to,
                        });
                    }
                }
            }
        }
    }
    hints
}

/// Would lifting `pile` split a run the source itself built?
fn breaks_run(src: &Stack, rest: &[Card], pile: &[Card]) -> bool {
    match rest.last() {
        Some(under) if under.face_up => {
            src.policy.accepts_local(&src.caps, rest, pile) == Some(true)
        }
        _ => false,
    }
}

/// Number of drop-source top cards some foundation would take.
fn foundation_playable(state: &GameState) -> usize {
    state
        .stacks
        .drop_sources()
        .into_iter()
        .filter(|&s| {
            let stack = state.stack(s);
            stack.can_move_cards(1)
                && stack.top_cards(1).is_some_and(|card| {
                    state
                        .stacks
                        .foundations()
                        .iter()
                        .any(|&f| state.accepts_cards(f, s, card))
                })
        })
        .count()
}

/// Simulate the move on a clone and compare what the foundations can take.
fn improves(state: &GameState, from: StackId, to: StackId, ncards: usize, before: usize) -> bool {
    let mut sim = state.clone();
    if sim.apply(&Atom::Move { from, to, ncards }).is_err() {
        return false;
    }
    foundation_playable(&sim) > before
}

/// Whether the card under the top of `from` could go to a foundation or row
/// once the top is parked.
fn frees_drop(state: &GameState, from: StackId) -> bool {
    state.draw_target(from).is_some()
}

/// Does `pile` hold a card that one of the target's face-up cards needs to
/// be built on?
fn blocks_target(src: &Stack, pile: &[Card], dst: &Stack) -> bool {
    let target_pile: Vec<&Card> = dst.cards.iter().filter(|c| c.face_up).collect();
    pile.iter().any(|cr| {
        target_pile.iter().any(|ct| {
            src.policy
                .accepts_local(&src.caps, std::slice::from_ref(cr), std::slice::from_ref(*ct))
                == Some(true)
        })
    })
}

// =============================================================================
// Grid Moves
// =============================================================================

fn grid_of(state: &GameState) -> Option<Grid> {
    let first = state.stacks.rows().first()?;
    match state.stack(*first).policy {
        crate::stacks::AcceptPolicy::Gap { grid, .. } => Some(grid),
        _ => None,
    }
}

fn grid_hints(state: &GameState, grid: Grid, cautious: bool) -> Vec<Hint> {
    let rows = state.stacks.rows();
    let free: Vec<StackId> = rows
        .iter()
        .copied()
        .filter(|&r| state.stack(r).is_empty())
        .collect();
    let mut hints = Vec::new();

    for (i, &from) in rows.iter().enumerate() {
        let Some(card) = state.stack(from).top() else {
            continue;
        };
        let left = (grid.column(i) > 0).then(|| state.stack(rows[i - 1]).top()).flatten();
        if grid.column(i) == 0 && card.rank == grid.base {
            continue;
        }
        if cautious
            && left.is_some_and(|l| l.suit == card.suit && l.rank + 1 == card.rank)
        {
            continue;
        }
        let score = match left {
            Some(l) => SCORE_ROW + i32::from(KING) - i32::from(l.rank),
            None => SCORE_GRID_NO_NEIGHBOUR,
        };
        for &to in &free {
            if state.accepts_cards(to, from, std::slice::from_ref(card)) {
                hints.push(Hint {
                    score,
                    ncards: 1,
                    from,
                    to,
                });
            }
        }
    }
    hints
}
