//! Montana family: a grid of single-card cells where gaps are filled with
//! the successor of the left neighbour.

use crate::cards::{CardSelector, DeckSpec, ShuffleHook, TWO};
use crate::core::{GameInfoError, StackConfig, StackRole};
use crate::hint::HintPolicy;
use crate::registry::{GameFlags, GameInfo, GameManager, GameType, SkillLevel};
use crate::rules::{
    DealScript, HighlightRule, Layout, QuickPlayRule, SpacePick, TalonPolicy, VariantDef, WinRule,
};
use crate::stacks::{AcceptPolicy, Caps, GapRule, Grid};

/// 4 x 13 with the twos in column zero and the aces removed.
const MONTANA_GRID: Grid = Grid::new(13, TWO);
/// 4 x 14 with the aces in column zero.
const MOON_GRID: Grid = Grid::new(14, 0);

const GRID_HINTS: HintPolicy = HintPolicy::Grid { cautious: false };
/// Skips cards that already follow their left neighbour.
const CAUTIOUS_GRID_HINTS: HintPolicy = HintPolicy::Grid { cautious: true };

fn grid_variant(
    grid: Grid,
    rule: GapRule,
    deal: DealScript,
    max_rounds: u32,
    hint: HintPolicy,
) -> VariantDef {
    let cell = StackConfig::new(StackRole::Row, AcceptPolicy::Gap { rule, grid }).with_caps(Caps::reserve());
    let mut layout = Layout::new(DeckSpec::french(1))
        .with_talon(Caps::talon().with_max_rounds(Some(max_rounds)))
        .with_rows(4 * grid.step, cell);
    if grid.base != 0 {
        layout = layout.with_internal();
    }
    VariantDef::new(layout, deal)
        .with_talon(TalonPolicy::Grid {
            grid,
            spaces: SpacePick::Gaps,
        })
        .with_win(WinRule::GridRows(grid))
        .with_highlight(HighlightRule::SameSuitAdjacent)
        .with_quick_play(QuickPlayRule::Grid(grid))
        .with_hint(hint)
}

#[must_use]
pub fn montana() -> VariantDef {
    grid_variant(MONTANA_GRID, GapRule::LeftSuccessor, DealScript::Montana, 3, GRID_HINTS)
}

/// Montana whose redeal leaves four random cells empty.
#[must_use]
pub fn spaces() -> VariantDef {
    montana().with_talon(TalonPolicy::Grid {
        grid: MONTANA_GRID,
        spaces: SpacePick::Random(4),
    })
}

#[must_use]
pub fn blue_moon() -> VariantDef {
    grid_variant(MOON_GRID, GapRule::LeftSuccessor, DealScript::BlueMoon, 3, GRID_HINTS)
}

#[must_use]
pub fn red_moon() -> VariantDef {
    blue_moon()
        .with_shuffle_hook(ShuffleHook::MoveToTop(CardSelector::Aces))
        .with_deal(DealScript::RedMoon)
}

#[must_use]
pub fn galary() -> VariantDef {
    grid_variant(
        MOON_GRID,
        GapRule::EitherNeighbour,
        DealScript::RedMoon,
        3,
        CAUTIOUS_GRID_HINTS,
    )
        .with_shuffle_hook(ShuffleHook::MoveToTop(CardSelector::Aces))
}

#[must_use]
pub fn moonlight() -> VariantDef {
    grid_variant(
        MONTANA_GRID,
        GapRule::EitherNeighbour,
        DealScript::Montana,
        3,
        CAUTIOUS_GRID_HINTS,
    )
}

#[must_use]
pub fn jungle() -> VariantDef {
    grid_variant(MOON_GRID, GapRule::LeftSuccessorAnySuit, DealScript::BlueMoon, 2, GRID_HINTS)
}

/// Blue Moon without redeals; a gap takes any higher card of the suit.
#[must_use]
pub fn spaces_and_aces() -> VariantDef {
    grid_variant(
        MOON_GRID,
        GapRule::LeftHigherSameSuit,
        DealScript::BlueMoon,
        1,
        CAUTIOUS_GRID_HINTS,
    )
        .with_talon(TalonPolicy::InitialDeal)
}

fn info(id: u32, class: &'static str, build: fn() -> VariantDef, name: &str, redeals: i32) -> GameInfo {
    GameInfo::new(id, class, build, name, GameType::Montana, 1, redeals)
        .with_flags(GameFlags::OPEN)
        .with_skill(SkillLevel::MostlySkill)
}

pub fn register(m: &mut GameManager) -> Result<(), GameInfoError> {
    m.register(
        info(53, "Montana", montana, "Montana", 2)
            .with_altnames(&["Gaps"])
            .with_si_ncards(48),
    )?;
    m.register(info(116, "Spaces", spaces, "Spaces", 2).with_si_ncards(48))?;
    m.register(info(63, "BlueMoon", blue_moon, "Blue Moon", 2).with_altnames(&["Rangoon"]))?;
    m.register(info(117, "RedMoon", red_moon, "Red Moon", 2))?;
    m.register(
        info(275, "Galary", galary, "Galary", 2)
            .with_flags(GameFlags::OPEN | GameFlags::ORIGINAL),
    )?;
    m.register(
        info(276, "Moonlight", moonlight, "Moonlight", 2)
            .with_flags(GameFlags::OPEN | GameFlags::ORIGINAL)
            .with_si_ncards(48),
    )?;
    m.register(info(380, "Jungle", jungle, "Jungle", 1))?;
    m.register(info(381, "SpacesAndAces", spaces_and_aces, "Spaces and Aces", 0))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::{Card, ACE};
    use crate::core::{MoveRejected, StackId};
    use crate::game::Game;
    use crate::games::builtin_manager;

    fn up(suit: u8, rank: u8) -> Card {
        Card::new(suit as u16 * 13 + rank as u16, 0, suit, rank).face_up()
    }

    /// Every grid row a same-suit run from the base rank, last column empty.
    fn lay_out_solved(game: &mut Game, grid: Grid) {
        let rows = game.rows().to_vec();
        let stacks = &mut game.state_mut().stacks;
        for (i, &r) in rows.iter().enumerate() {
            let (suit, col) = ((i / grid.step) as u8, grid.column(i));
            let cards = if col + 1 < grid.step {
                vec![up(suit, grid.base + col as u8)]
            } else {
                Vec::new()
            };
            stacks.set_cards(r, cards);
        }
    }

    fn swap_cells(game: &mut Game, a: StackId, b: StackId) {
        let stacks = &mut game.state_mut().stacks;
        let (ca, cb) = (stacks.get(a).cards.clone(), stacks.get(b).cards.clone());
        stacks.set_cards(a, cb);
        stacks.set_cards(b, ca);
    }

    fn check_grid_win(id: u32, grid: Grid) {
        let m = builtin_manager();
        let mut game = Game::new(m.get(id).unwrap(), 10);
        assert!(!game.is_won());
        lay_out_solved(&mut game, grid);
        assert!(game.is_won());
        let rows = game.rows().to_vec();

        // Out of sequence.
        swap_cells(&mut game, rows[3], rows[4]);
        assert!(!game.is_won());
        swap_cells(&mut game, rows[3], rows[4]);
        assert!(game.is_won());

        // Same ranks, suits mixed between two grid rows.
        swap_cells(&mut game, rows[5], rows[grid.step + 5]);
        assert!(!game.is_won());
        swap_cells(&mut game, rows[5], rows[grid.step + 5]);

        // One card short of a full row.
        let last = 2 * grid.step + grid.step - 2;
        let card = game.stack(rows[last]).cards.clone();
        game.state_mut().stacks.set_cards(rows[last], Vec::new());
        assert!(!game.is_won());
        game.state_mut().stacks.set_cards(rows[last], card);
        assert!(game.is_won());
    }

    #[test]
    fn test_montana_grid_win() {
        check_grid_win(53, MONTANA_GRID);
    }

    #[test]
    fn test_moon_grid_win() {
        check_grid_win(63, MOON_GRID);
        check_grid_win(117, MOON_GRID);
    }

    #[test]
    fn test_montana_deal_removes_aces() {
        let m = builtin_manager();
        let game = Game::new(m.get(53).unwrap(), 10);
        let aces = game.internals()[0];
        assert_eq!(game.stack(aces).len(), 4);
        let filled = game.rows().iter().filter(|&&r| !game.stack(r).is_empty()).count();
        assert_eq!(filled, 48);
        assert_eq!(game.info().si.ncards, 48);
    }

    #[test]
    fn test_blue_moon_aces_in_column_zero() {
        let m = builtin_manager();
        let game = Game::new(m.get(63).unwrap(), 10);
        for start in (0..56).step_by(14) {
            let top = game.stack(game.rows()[start]).top().unwrap();
            assert_eq!(top.rank, ACE);
        }
        assert!(game.internals().is_empty());
    }

    #[test]
    fn test_red_moon_gaps_in_column_one() {
        let m = builtin_manager();
        let game = Game::new(m.get(117).unwrap(), 10);
        for start in (0..56).step_by(14) {
            assert!(game.stack(game.rows()[start + 1]).is_empty());
            let top = game.stack(game.rows()[start]).top().unwrap();
            assert_eq!(top.rank, ACE);
        }
    }

    #[test]
    fn test_gap_fill_rules() {
        let m = builtin_manager();
        let mut game = Game::new(m.get(53).unwrap(), 10);
        let rows = game.rows().to_vec();
        {
            let stacks = &mut game.state_mut().stacks;
            for &r in &rows {
                stacks.set_cards(r, Vec::new());
            }
            stacks.set_cards(rows[0], vec![up(2, TWO)]);
            stacks.set_cards(rows[20], vec![up(2, 2)]);
            stacks.set_cards(rows[21], vec![up(1, 2)]);
            stacks.set_cards(rows[30], vec![up(0, TWO)]);
        }
        // Three of hearts goes right of the two of hearts.
        game.try_move(1, rows[20], rows[1]).unwrap();
        // Wrong suit.
        assert_eq!(
            game.try_move(1, rows[21], rows[2]),
            Err(MoveRejected::NotAccepted { from: rows[21], to: rows[2] })
        );
        // Column zero takes only twos.
        assert!(game.try_move(1, rows[21], rows[13]).is_err());
        game.try_move(1, rows[30], rows[13]).unwrap();
    }

    #[test]
    fn test_quick_play_keeps_placed_twos() {
        let m = builtin_manager();
        let mut game = Game::new(m.get(53).unwrap(), 10);
        let rows = game.rows().to_vec();
        game.state_mut().stacks.set_cards(rows[0], vec![up(2, TWO)]);
        assert!(game.quick_play_score(rows[0], rows[13]) < 0);
        assert!(game.quick_play_score(rows[1], rows[13]) > 0);
    }

    #[test]
    fn test_montana_redeal_keeps_sorted_prefix() {
        let m = builtin_manager();
        let mut game = Game::new(m.get(53).unwrap(), 12);
        let rows = game.rows().to_vec();
        let aces = game.internals()[0];
        {
            // 2H 3H 4H lead the first grid row; the rest go in high ranks
            // first so no other row starts with a two.
            let cards: Vec<Card> = rows.iter().flat_map(|&r| game.stack(r).cards.clone()).collect();
            let (mut prefix, mut rest): (Vec<Card>, Vec<Card>) =
                cards.into_iter().partition(|c| c.suit == 2 && c.rank <= 3);
            prefix.sort_by_key(|c| c.rank);
            rest.sort_by_key(|c| std::cmp::Reverse(c.rank));
            let stacks = &mut game.state_mut().stacks;
            for &r in &rows {
                stacks.set_cards(r, Vec::new());
            }
            let mut cards = prefix.into_iter().chain(rest);
            for (i, &r) in rows.iter().enumerate() {
                if MONTANA_GRID.column(i) == 12 {
                    continue;
                }
                if let Some(c) = cards.next() {
                    stacks.set_cards(r, vec![c]);
                }
            }
        }
        let prefix: Vec<Card> = rows[..3].iter().map(|&r| *game.stack(r).top().unwrap()).collect();
        assert_eq!(prefix.iter().map(|c| c.rank).collect::<Vec<_>>(), vec![TWO, 2, 3]);

        let n = game.deal_cards().unwrap();
        assert_eq!(n, 45);
        assert_eq!(game.round(), 2);
        let now: Vec<Card> = rows[..3].iter().map(|&r| *game.stack(r).top().unwrap()).collect();
        assert_eq!(now, prefix);
        for gap in [3, 13, 26, 39] {
            assert!(game.stack(rows[gap]).is_empty());
        }
        let filled = rows.iter().filter(|&&r| !game.stack(r).is_empty()).count();
        assert_eq!(filled, 48);
        assert_eq!(game.stack(aces).len(), 4);
    }

    #[test]
    fn test_spaces_redeal_is_seeded() {
        let m = builtin_manager();
        let info = m.get(116).unwrap();
        let mut a = Game::new(info, 77);
        let mut b = Game::new(info, 77);
        a.deal_cards().unwrap();
        b.deal_cards().unwrap();
        assert_eq!(a.state().stacks.snapshot(), b.state().stacks.snapshot());
        let empty = a.rows().iter().filter(|&&r| a.stack(r).is_empty()).count();
        assert_eq!(empty, 4);
    }
}
