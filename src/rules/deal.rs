//! Initial deal scripts.
//!
//! Each script is a fixed sequence of talon deals. Scripts run before the
//! history is recorded; the talon shape afterwards is checked by the game
//! (single-pass variants must leave it empty).

use crate::cards::ACE;
use crate::core::StackId;
use crate::game::Game;
use crate::stacks::Grid;

/// Named initial deal strategies.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DealScript {
    /// Two passes over all rows but the last, then one over every row.
    Fan,
    /// Full passes over the rows, then one card to each foundation.
    PassesThenFoundations { passes: usize },
    /// One pass per entry, dealing to the first `n` rows.
    RowPrefixes(&'static [usize]),
    /// Up to `per_row` cards to each row in turn; aces go to their
    /// foundation instead.
    Troika { per_row: usize },
    /// Three passes with aces routed to the foundations, rest to the reserve.
    Intelligence,
    /// One card per grid cell, aces set aside.
    Montana,
    /// Fill all but column zero, then move the aces into column zero.
    BlueMoon,
    /// Aces dealt to column zero, gaps left in column one.
    RedMoon,
    /// Optional foundation deal, one pass to the rows, six to the reserves.
    Carthage { foundations_from: Option<usize> },
    /// Face-down triangle, four face-up passes from row one, final pass.
    Yukon,
    Odessa,
    Grandfather,
    /// Mixed face-up/face-down passes, final pass, talon keeps the rest.
    ChineseDiscipline,
    /// Shrinking passes from row `i`, optionally reversed; Abacus deals its
    /// foundations first.
    Staircase {
        flip: bool,
        reverse: bool,
        foundations_first: bool,
    },
    RussianPoint,
    /// Face-down triangle skipping the last row, `up_passes` face-up passes.
    DoubleYukon { up_passes: usize },
    /// Face-down triangle over every row, `up_passes` face-up passes.
    TripleYukon { up_passes: usize },
    TenAcross,
    Panopticon,
    /// `passes` face-up passes plus one, then the first waste card.
    Australian { passes: usize },
    Geoffrey,
    /// Klondike triangle from row `i + 1`, final pass, first waste card.
    Harp { flip: bool },
    /// Klondike triangle over rows `..i`, final pass, first waste card.
    BigHarp,
}

impl DealScript {
    /// Run the script on a freshly shuffled game.
    pub fn run(&self, game: &mut Game) {
        let rows = game.rows().to_vec();
        let n = rows.len();
        let foundations = game.foundations().to_vec();
        let reserves = game.reserves().to_vec();

        match *self {
            Self::Fan => {
                for _ in 0..2 {
                    game.deal_row(&rows[..n - 1], true, false, 0);
                }
                game.start_deal_sample();
                game.deal_row(&rows, true, false, -1);
            }
            Self::PassesThenFoundations { passes } => {
                for i in 0..passes {
                    if i + 1 == passes {
                        game.start_deal_sample();
                    }
                    game.deal_row(&rows, true, false, if i + 1 == passes { -1 } else { 0 });
                }
                game.deal_row(&foundations, true, false, -1);
            }
            Self::RowPrefixes(prefixes) => {
                for (i, &len) in prefixes.iter().enumerate() {
                    if i + 1 == prefixes.len() {
                        game.start_deal_sample();
                    }
                    game.deal_row(&rows[..len], true, false, 0);
                }
            }
            Self::Troika { per_row } => troika(game, &rows, &foundations, per_row),
            Self::Intelligence => {
                let talon = game.talon();
                for _ in 0..2 {
                    game.deal_to_stacks_or_foundations(talon, &rows, true, false, 0);
                }
                game.start_deal_sample();
                game.deal_to_stacks_or_foundations(talon, &rows, true, false, -1);
                let rest = game.stack(talon).len();
                if rest > 0 {
                    game.transfer(rest, talon, reserves[0], 0);
                }
            }
            Self::Montana => montana(game, &rows),
            Self::BlueMoon => blue_moon(game, &rows, Grid::new(14, 0)),
            Self::RedMoon => {
                game.deal_row(&[rows[0], rows[14], rows[28], rows[42]], true, false, 0);
                for i in 0..4 {
                    if i == 3 {
                        game.start_deal_sample();
                    }
                    let start = i * 14 + 2;
                    game.deal_row(&rows[start..start + 12], true, false, 0);
                }
            }
            Self::Carthage { foundations_from } => {
                if let Some(from) = foundations_from {
                    game.deal_row(&foundations[from..], true, false, 0);
                }
                game.deal_row(&rows, true, false, 0);
                for _ in 0..5 {
                    game.deal_row(&reserves, true, false, 0);
                }
                game.start_deal_sample();
                game.deal_row(&reserves, true, false, -1);
            }
            Self::Yukon => {
                face_down_triangle(game, &rows, 1..n);
                for _ in 0..4 {
                    game.deal_row(&rows[1..], true, false, 0);
                }
                game.start_deal_sample();
                game.deal_row(&rows, true, false, -1);
            }
            Self::Odessa => {
                for _ in 0..3 {
                    game.deal_row(&rows, false, false, 0);
                }
                for _ in 0..2 {
                    game.deal_row(&rows, true, false, 0);
                }
                for _ in 0..2 {
                    game.deal_row(&rows[1..6], true, false, 0);
                }
                game.start_deal_sample();
                game.deal_row(&rows, true, false, -1);
            }
            Self::Grandfather => {
                for (i, &count) in [2, 4, 6, 5, 3, 1].iter().enumerate() {
                    game.deal_row(&vec![rows[i + 1]; count], false, false, 0);
                }
                game.start_deal_sample();
                for (i, &count) in [1, 5, 5, 5, 5, 5, 5].iter().enumerate() {
                    game.deal_row(&vec![rows[i]; count], true, false, -1);
                }
            }
            Self::ChineseDiscipline => {
                for split in [3, 3, 3, 4, 5, 6] {
                    game.deal_row(&rows[..split], true, false, 0);
                    game.deal_row(&rows[split..], false, false, 0);
                }
                game.start_deal_sample();
                game.deal_row(&rows, true, false, -1);
            }
            Self::Staircase {
                flip,
                reverse,
                foundations_first,
            } => {
                if foundations_first {
                    game.deal_row(&foundations, true, false, 0);
                }
                for i in 1..n {
                    game.deal_row(&rows[i..], flip, reverse, 0);
                }
                game.start_deal_sample();
                game.deal_row(&rows, true, reverse, -1);
            }
            Self::RussianPoint => {
                for i in [1, 1, 2, 2, 3, 3] {
                    game.deal_row(&rows[i..n - i], false, false, 0);
                }
                game.start_deal_sample();
                game.deal_row(&rows, true, false, -1);
            }
            Self::DoubleYukon { up_passes } => {
                face_down_triangle(game, &rows, 1..n - 1);
                for _ in 0..up_passes {
                    game.deal_row(&rows, true, false, 0);
                }
                game.start_deal_sample();
                game.deal_row(&rows, true, false, -1);
            }
            Self::TripleYukon { up_passes } => {
                face_down_triangle(game, &rows, 1..n);
                for _ in 0..up_passes {
                    game.deal_row(&rows, true, false, 0);
                }
                game.start_deal_sample();
                game.deal_row(&rows, true, false, -1);
            }
            Self::TenAcross => {
                for k in 1..=4 {
                    framed_pass(game, &rows, k);
                }
                game.start_deal_sample();
                game.deal_row(&rows, true, false, -1);
                game.deal_row(&reserves, true, false, -1);
            }
            Self::Panopticon => {
                game.deal_row(&rows, false, false, 0);
                for k in 1..=3 {
                    framed_pass(game, &rows, k);
                }
                game.deal_row(&rows, true, false, 0);
                game.start_deal_sample();
                game.deal_row(&rows, true, false, -1);
                game.deal_row(&reserves, true, false, -1);
            }
            Self::Australian { passes } => {
                for _ in 0..passes {
                    game.deal_row(&rows, true, false, 0);
                }
                game.start_deal_sample();
                game.deal_row(&rows, true, false, -1);
                game.deal_to_waste(1);
            }
            Self::Geoffrey => {
                for split in [4, 4, 4, 4, 8] {
                    game.deal_row(&rows[..split], true, false, 0);
                    game.deal_row(&rows[split..], false, false, 0);
                }
                game.start_deal_sample();
                game.deal_row(&rows, true, false, -1);
                game.deal_row(&rows[..4], true, false, -1);
            }
            Self::Harp { flip } => {
                for i in 0..n {
                    game.deal_row(&rows[i + 1..], flip, false, 0);
                }
                game.start_deal_sample();
                game.deal_row(&rows, true, false, -1);
                game.deal_to_waste(1);
            }
            Self::BigHarp => {
                for i in 0..n {
                    game.deal_row(&rows[..i], false, false, 0);
                }
                game.start_deal_sample();
                game.deal_row(&rows, true, false, -1);
                game.deal_to_waste(1);
            }
        }
        game.stop_deal_sample();
    }
}

/// Face-down passes dealing to `rows[i..]` for each `i` in `range`.
fn face_down_triangle(game: &mut Game, rows: &[StackId], range: std::ops::Range<usize>) {
    for i in range {
        game.deal_row(&rows[i..], false, false, 0);
    }
}

/// `k` face-up cards at each end, face-down in the middle.
fn framed_pass(game: &mut Game, rows: &[StackId], k: usize) {
    let n = rows.len();
    game.deal_row(&rows[..k], true, false, 0);
    game.deal_row(&rows[k..n - k], false, false, 0);
    game.deal_row(&rows[n - k..], true, false, 0);
}

fn troika(game: &mut Game, rows: &[StackId], foundations: &[StackId], per_row: usize) {
    let talon = game.talon();
    for &row in rows {
        for _ in 0..per_row {
            let Some(top) = game.stack(talon).top().copied() else {
                return;
            };
            let target = if top.rank == ACE {
                foundations[top.suit as usize]
            } else {
                row
            };
            game.deal_row(&[target], true, false, 0);
        }
    }
}

fn montana(game: &mut Game, rows: &[StackId]) {
    let talon = game.talon();
    let aces = game.internals()[0];
    for (i, &row) in rows.iter().enumerate().take(52) {
        let Some(top) = game.stack(talon).top().copied() else {
            break;
        };
        if top.rank == ACE {
            game.deal_row(&[aces], true, false, 0);
        } else {
            if i == 39 {
                game.start_deal_sample();
            }
            game.deal_row(&[row], true, false, 0);
        }
    }
}

fn blue_moon(game: &mut Game, rows: &[StackId], grid: Grid) {
    let mut j = 0;
    for i in 0..52 {
        if grid.column(j) == 0 {
            j += 1;
        }
        if i == 39 {
            game.start_deal_sample();
        }
        game.deal_row(&[rows[j]], true, false, 0);
        j += 1;
    }
    let ace_rows: Vec<StackId> = rows
        .iter()
        .copied()
        .filter(|&r| game.stack(r).top().is_some_and(|c| c.rank == ACE))
        .collect();
    for (k, from) in ace_rows.into_iter().enumerate() {
        game.transfer(1, from, rows[k * grid.step], -1);
    }
}
