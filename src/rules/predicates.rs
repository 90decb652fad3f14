//! Pure per-variant predicates: win detection, highlight matching and
//! quick-play scoring.

use crate::cards::Card;
use crate::core::{GameState, StackId};
use crate::stacks::Grid;

/// When is the game won?
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum WinRule {
    /// Every card rests on a foundation.
    #[default]
    AllFoundationsFull,
    /// Each grid row holds a same-suit run from the base rank, one card per
    /// cell, in all but the last column.
    GridRows(Grid),
}

impl WinRule {
    #[must_use]
    pub fn is_won(&self, state: &GameState) -> bool {
        match self {
            Self::AllFoundationsFull => {
                let on_foundations: usize = state
                    .stacks
                    .foundations()
                    .iter()
                    .map(|&f| state.stack(f).len())
                    .sum();
                !state.stacks.foundations().is_empty()
                    && on_foundations == state.stacks.total_cards()
            }
            Self::GridRows(grid) => grid_won(state, *grid),
        }
    }
}

fn grid_won(state: &GameState, grid: Grid) -> bool {
    let rows = state.stacks.rows();
    (0..rows.len()).step_by(grid.step).all(|start| {
        let Some(first) = state.stack(rows[start]).top() else {
            return false;
        };
        (0..grid.step - 1).all(|j| {
            state
                .stack(rows[start + j])
                .top()
                .is_some_and(|c| c.suit == first.suit && c.rank as usize == grid.base as usize + j)
        })
    })
}

/// Which pairs of cards the UI highlights as "belonging together".
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum HighlightRule {
    #[default]
    None,
    SameSuitAdjacent,
    /// Same suit, adjacent with king/ace wrap.
    SameSuitAdjacentWrap,
    AlternateColorAdjacent,
    AnyAdjacent,
    AnyButSameSuitAdjacent,
    SameRank,
    /// Same suit, rank step depending on suit (`-(suit + 1)` modulo 13).
    SuitStepped,
}

impl HighlightRule {
    #[must_use]
    pub fn matches(&self, a: &Card, b: &Card) -> bool {
        let adjacent = a.rank.abs_diff(b.rank) == 1;
        match self {
            Self::None => false,
            Self::SameSuitAdjacent => a.suit == b.suit && adjacent,
            Self::SameSuitAdjacentWrap => {
                a.suit == b.suit && ((a.rank + 1) % 13 == b.rank || (b.rank + 1) % 13 == a.rank)
            }
            Self::AlternateColorAdjacent => a.color() != b.color() && adjacent,
            Self::AnyAdjacent => adjacent,
            Self::AnyButSameSuitAdjacent => a.suit != b.suit && adjacent,
            Self::SameRank => a.rank == b.rank,
            Self::SuitStepped => {
                let dir = -(a.suit as i32 + 1);
                a.suit == b.suit
                    && ((a.rank as i32 + dir).rem_euclid(13) == b.rank as i32
                        || (b.rank as i32 + dir).rem_euclid(13) == a.rank as i32)
            }
        }
    }
}

/// Weight of a candidate quick-play target; higher wins, negative forbids.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum QuickPlayRule {
    /// Prefer non-empty targets.
    #[default]
    Default,
    /// Never move a correctly placed card out of column zero.
    Grid(Grid),
    /// Prefer non-empty targets, more so when the suit matches.
    SuitPreferring,
}

impl QuickPlayRule {
    #[must_use]
    pub fn score(&self, state: &GameState, from: StackId, to: StackId) -> i32 {
        let src = state.stack(from);
        let dst = state.stack(to);
        match self {
            Self::Default => i32::from(!dst.is_empty()),
            Self::Grid(grid) => match src.top() {
                Some(c) if grid.column(src.group_index) == 0 && c.rank == grid.base => -1,
                _ => 1,
            },
            Self::SuitPreferring => match (src.top(), dst.top()) {
                (Some(s), Some(d)) => i32::from(s.suit == d.suit) + 1,
                _ => 0,
            },
        }
    }
}
