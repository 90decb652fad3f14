//! Talon policies: what happens when the player clicks the stock.
//!
//! Redealing talons work in three ordered steps, each made of logged
//! primitives so undo can stop anywhere in between:
//!
//! 1. collect the cards still in play onto the talon
//! 2. shuffle the talon and advance the round
//! 3. redistribute
//!
//! `can_deal` is a pure query; `deal` runs inside the game's grouped action.

use tracing::debug;

use crate::core::{MoveRejected, StackId};
use crate::game::{Game, Sample};
use crate::stacks::Grid;

/// How the redeal chooses which grid cells stay empty.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SpacePick {
    /// The cell right after each row's sorted prefix.
    Gaps,
    /// Random cells drawn from the game's stream.
    Random(usize),
}

/// Stock behaviour of a variant.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum TalonPolicy {
    /// Everything is dealt at the start; the talon never deals again.
    #[default]
    InitialDeal,
    /// One card to each row while cards last.
    DealRow,
    /// Turn `num_deal` cards onto the waste; recycle the waste face down
    /// while rounds remain.
    Waste,
    /// One card per row when exactly a row's worth is left, otherwise two
    /// passes over the reserves.
    Carthage,
    /// Gather the rows, shuffle, deal them back three at a time.
    LaBelleLucie,
    /// Gather rows and reserve face down, shuffle, refill every row to three
    /// cards and put the rest back in the reserve.
    Intelligence,
    /// Keep each grid row's sorted prefix, shuffle and redeal the rest,
    /// leaving one space per row.
    Grid { grid: Grid, spaces: SpacePick },
}

impl TalonPolicy {
    /// Whether the initial deal must leave the talon empty.
    #[must_use]
    pub const fn exhausts_on_start(&self) -> bool {
        matches!(
            self,
            Self::InitialDeal | Self::LaBelleLucie | Self::Intelligence | Self::Grid { .. }
        )
    }

    #[must_use]
    pub const fn is_redeal(&self) -> bool {
        matches!(self, Self::LaBelleLucie | Self::Intelligence | Self::Grid { .. })
    }

    /// Whether a click on the talon would do anything right now.
    #[must_use]
    pub fn can_deal(&self, game: &Game) -> bool {
        let talon = game.stack(game.talon());
        match self {
            Self::InitialDeal => false,
            Self::DealRow | Self::Carthage => !talon.is_empty(),
            Self::Waste => {
                !talon.is_empty()
                    || (game.waste().is_some_and(|w| !game.stack(w).is_empty())
                        && talon.caps.has_rounds_left(game.round()))
            }
            Self::LaBelleLucie | Self::Intelligence | Self::Grid { .. } => {
                talon.caps.has_rounds_left(game.round()) && !game.is_won()
            }
        }
    }

    /// The rejection reported when `can_deal` is false.
    #[must_use]
    pub fn refusal(&self, game: &Game) -> MoveRejected {
        let talon = game.stack(game.talon());
        let out_of_rounds = !talon.caps.has_rounds_left(game.round());
        let recyclable = match self {
            Self::Waste => game.waste().is_some_and(|w| !game.stack(w).is_empty()),
            _ => self.is_redeal(),
        };
        if out_of_rounds && recyclable {
            MoveRejected::NoMoreRedeals
        } else {
            MoveRejected::NothingToDeal
        }
    }

    /// Carry out one talon action; returns the number of cards dealt.
    pub fn deal(&self, game: &mut Game) -> Result<usize, MoveRejected> {
        match *self {
            Self::InitialDeal => Err(MoveRejected::NothingToDeal),
            Self::DealRow => {
                let rows = game.rows().to_vec();
                let n = game.deal_row_avail(&rows, true, false, -1);
                game.play_sample(Sample::Deal, 100);
                Ok(n)
            }
            Self::Waste => deal_waste(game),
            Self::Carthage => {
                let talon = game.talon();
                let rows = game.rows().to_vec();
                let n = if game.stack(talon).len() == rows.len() {
                    game.deal_row_avail(&rows, true, false, -1)
                } else {
                    let reserves = game.reserves().to_vec();
                    let first = game.deal_row_avail(&reserves, true, false, -1);
                    first + game.deal_row_avail(&reserves, true, false, -1)
                };
                game.play_sample(Sample::Deal, 100);
                Ok(n)
            }
            Self::LaBelleLucie => {
                let n = collect_rows(game, true);
                if n == 0 {
                    return Err(MoveRejected::NothingToDeal);
                }
                shuffle_and_advance(game);
                game.start_deal_sample();
                deal_threes(game);
                game.stop_deal_sample();
                Ok(n)
            }
            Self::Intelligence => {
                let n = collect_rows(game, false);
                if n == 0 {
                    return Err(MoveRejected::NothingToDeal);
                }
                shuffle_and_advance(game);
                game.start_deal_sample();
                refill_rows(game);
                game.stop_deal_sample();
                Ok(n)
            }
            Self::Grid { grid, spaces } => redeal_grid(game, grid, spaces),
        }
    }
}

fn deal_waste(game: &mut Game) -> Result<usize, MoveRejected> {
    let talon = game.talon();
    let Some(waste) = game.waste() else {
        return Err(MoveRejected::NothingToDeal);
    };
    if !game.stack(talon).is_empty() {
        let num_deal = game.stack(talon).caps.num_deal;
        let n = game.deal_to_waste(num_deal);
        game.play_sample(Sample::DealWaste, 100);
        return Ok(n);
    }

    let n = game.stack(waste).len();
    if n == 0 {
        return Err(MoveRejected::NothingToDeal);
    }
    game.next_round();
    for _ in 0..n {
        game.flip(waste)?;
        game.move_cards(1, waste, talon, 0)?;
    }
    game.play_sample(Sample::TurnWaste, 20);
    Ok(n)
}

/// Step 1: move every row card onto the talon.
///
/// `keep_faces` leaves the cards as they are; otherwise each card is
/// turned face down on arrival and the first reserve is gathered too.
fn collect_rows(game: &mut Game, keep_faces: bool) -> usize {
    let talon = game.talon();
    let mut collected = 0;
    if !keep_faces {
        if let Some(&reserve) = game.reserves().first() {
            let n = game.stack(reserve).len();
            if n > 0 {
                game.transfer(n, reserve, talon, 0);
                collected += n;
            }
        }
    }
    let rows = game.rows().to_vec();
    for row in rows {
        let n = game.stack(row).len();
        if n == 0 {
            continue;
        }
        if keep_faces {
            game.transfer(n, row, talon, 0);
        } else {
            for _ in 0..n {
                game.transfer(1, row, talon, 0);
                game.turn_face(talon, false);
            }
        }
        collected += n;
    }
    assert_eq!(game.stack(talon).len(), collected, "talon holds stray cards before a redeal");
    collected
}

/// Step 2.
fn shuffle_and_advance(game: &mut Game) {
    let talon = game.talon();
    game.shuffle_stack(talon);
    game.next_round();
}

/// Step 3 for La Belle Lucie: three cards to each row in order, the last
/// row taking whatever is left.
fn deal_threes(game: &mut Game) {
    let talon = game.talon();
    let rows = game.rows().to_vec();
    let n = game.stack(talon).len().min(3 * rows.len());
    for (pass, j) in [n / 3, (n + 1) / 3, (n + 2) / 3].into_iter().enumerate() {
        let frames = if pass == 2 { 4 } else { 0 };
        game.deal_row(&rows[..j], true, false, frames);
    }
}

/// Step 3 for Intelligence.
fn refill_rows(game: &mut Game) {
    let talon = game.talon();
    let rows = game.rows().to_vec();
    for row in rows {
        while game.stack(row).len() < 3 {
            game.deal_to_stacks_or_foundations(talon, &[row], true, false, 4);
            if game.stack(talon).is_empty() {
                return;
            }
        }
    }
    let rest = game.stack(talon).len();
    if let Some(&reserve) = game.reserves().first() {
        if rest > 0 {
            game.transfer(rest, talon, reserve, 0);
        }
    }
}

fn redeal_grid(game: &mut Game, grid: Grid, spaces: SpacePick) -> Result<usize, MoveRejected> {
    let talon = game.talon();
    let rows = game.rows().to_vec();

    let mut cells: Vec<StackId> = Vec::new();
    let mut gaps: Vec<StackId> = Vec::new();
    let mut collected = 0;
    for start in (0..rows.len()).step_by(grid.step) {
        let lead = game.stack(rows[start]).top().copied();
        let suit = lead.filter(|c| c.rank == grid.base).map(|c| c.suit);
        let mut in_sequence = suit.is_some();
        let mut gap = None;
        for j in 0..grid.step {
            let cell = rows[start + j];
            if in_sequence {
                in_sequence = game
                    .stack(cell)
                    .top()
                    .is_some_and(|c| Some(c.suit) == suit && c.rank as usize == grid.base as usize + j);
            }
            if in_sequence {
                continue;
            }
            cells.push(cell);
            gap.get_or_insert(cell);
            if !game.stack(cell).is_empty() {
                game.transfer(1, cell, talon, 0);
                collected += 1;
            }
        }
        gaps.extend(gap);
    }
    if collected == 0 {
        return Err(MoveRejected::NothingToDeal);
    }

    game.start_deal_sample();
    shuffle_and_advance(game);
    let spaces: Vec<StackId> = match spaces {
        SpacePick::Gaps => gaps,
        SpacePick::Random(count) => game.with_rng(|rng| {
            let mut picked: Vec<StackId> = Vec::with_capacity(count);
            while picked.len() < count.min(cells.len()) {
                if let Some(&cell) = rng.choose(&cells) {
                    if !picked.contains(&cell) {
                        picked.push(cell);
                    }
                }
            }
            picked
        }),
    };
    for &cell in cells.iter().filter(|c| !spaces.contains(c)) {
        if game.stack(talon).is_empty() {
            break;
        }
        game.transfer(1, talon, cell, 4);
    }
    game.stop_deal_sample();
    assert!(game.stack(talon).is_empty(), "grid redeal left cards in the talon");
    debug!(game = game.info().id, collected, round = game.round(), "grid redeal");
    Ok(collected)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::games;

    #[test]
    fn test_exhausts_on_start() {
        assert!(TalonPolicy::InitialDeal.exhausts_on_start());
        assert!(TalonPolicy::LaBelleLucie.exhausts_on_start());
        assert!(!TalonPolicy::Waste.exhausts_on_start());
        assert!(!TalonPolicy::DealRow.exhausts_on_start());
    }

    #[test]
    fn test_initial_deal_never_deals() {
        let manager = games::builtin_manager();
        let mut game = Game::new(manager.get(56).unwrap(), 1);
        assert!(!game.can_deal_cards());
        assert_eq!(game.deal_cards(), Err(MoveRejected::NothingToDeal));
        assert!(game.log().is_empty());
    }

    #[test]
    fn test_lucie_redeal_collects_everything() {
        let manager = games::builtin_manager();
        let mut game = Game::new(manager.get(901).unwrap(), 21);
        let on_rows: usize = game.rows().iter().map(|&r| game.stack(r).len()).sum();
        assert_eq!(on_rows, 52);

        let n = game.deal_cards().unwrap();
        assert_eq!(n, 52);
        assert_eq!(game.round(), 2);
        assert!(game.stack(game.talon()).is_empty());
        let lens: Vec<usize> = game.rows().iter().map(|&r| game.stack(r).len()).collect();
        assert_eq!(lens.iter().sum::<usize>(), 52);
        assert!(lens[..17].iter().all(|&n| n == 3));
        assert_eq!(lens[17], 1);
    }

    #[test]
    fn test_lucie_refuses_after_last_round() {
        let manager = games::builtin_manager();
        let mut game = Game::new(manager.get(901).unwrap(), 21);
        game.deal_cards().unwrap();
        game.deal_cards().unwrap();
        assert_eq!(game.round(), 3);
        assert!(!game.can_deal_cards());
        assert_eq!(game.deal_cards(), Err(MoveRejected::NoMoreRedeals));
    }

    #[test]
    fn test_waste_recycles_face_down() {
        let manager = games::builtin_manager();
        let mut game = Game::new(manager.get(25).unwrap(), 8);
        let talon = game.talon();
        let waste = game.waste().unwrap();
        while !game.stack(talon).is_empty() {
            game.deal_cards().unwrap();
        }
        let in_waste = game.stack(waste).len();
        assert!(game.stack(waste).cards.iter().all(|c| c.face_up));

        assert_eq!(game.deal_cards(), Ok(in_waste));
        assert_eq!(game.round(), 2);
        assert!(game.stack(waste).is_empty());
        assert!(game.stack(talon).cards.iter().all(|c| !c.face_up));

        while !game.stack(talon).is_empty() {
            game.deal_cards().unwrap();
        }
        assert_eq!(game.deal_cards(), Err(MoveRejected::NoMoreRedeals));
    }

    #[test]
    fn test_redeal_undo_restores_rng() {
        let manager = games::builtin_manager();
        let mut game = Game::new(manager.get(116).unwrap(), 4);
        let before = game.state().stacks.snapshot();
        let rng = game.state().rng().state();
        game.deal_cards().unwrap();
        let after = game.state().stacks.snapshot();

        game.undo().unwrap();
        assert_eq!(game.state().stacks.snapshot(), before);
        assert_eq!(game.state().rng().state(), rng);
        game.redo().unwrap();
        assert_eq!(game.state().stacks.snapshot(), after);
    }
}
