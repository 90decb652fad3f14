//! Klondike played with two or three decks: a Klondike triangle, a waste
//! talon and foundations for every deck.

use crate::cards::DeckSpec;
use crate::core::{GameInfoError, StackConfig, StackRole};
use crate::registry::{GameInfo, GameManager, GameType, SkillLevel};
use crate::rules::{DealScript, HighlightRule, Layout, QuickPlayRule, TalonPolicy, VariantDef};
use crate::stacks::{AcceptPolicy, BaseRank, Caps, Sequencing};

/// Talon passes and cards turned per deal.
#[derive(Clone, Copy)]
struct Stock {
    max_rounds: Option<u32>,
    num_deal: usize,
}

const UNLIMITED_ONES: Stock = Stock {
    max_rounds: None,
    num_deal: 1,
};

fn row(policy: AcceptPolicy, base: BaseRank) -> StackConfig {
    StackConfig::new(StackRole::Row, policy).map_caps(|c| c.with_base_rank(base))
}

fn king_ac() -> StackConfig {
    row(AcceptPolicy::Sequence(Sequencing::AC), BaseRank::KING)
}

fn spider_row(base: BaseRank) -> StackConfig {
    row(
        AcceptPolicy::Spider {
            accept: Sequencing::RK,
            moves: Sequencing::SS,
        },
        base,
    )
}

fn harp_variant(decks: u8, rows: usize, row: StackConfig, stock: Stock, deal: DealScript) -> VariantDef {
    let talon = Caps::talon()
        .with_max_rounds(stock.max_rounds)
        .with_num_deal(stock.num_deal);
    let layout = Layout::new(DeckSpec::french(decks))
        .with_talon(talon)
        .with_waste()
        .with_foundation_sets(StackConfig::new(
            StackRole::Foundation,
            AcceptPolicy::Foundation(Sequencing::SS),
        ))
        .with_rows(rows, row);
    VariantDef::new(layout, deal)
        .with_talon(TalonPolicy::Waste)
        .with_highlight(HighlightRule::AlternateColorAdjacent)
}

const TRIANGLE: DealScript = DealScript::Harp { flip: false };
const OPEN_TRIANGLE: DealScript = DealScript::Harp { flip: true };

#[must_use]
pub fn double_klondike() -> VariantDef {
    harp_variant(2, 9, king_ac(), UNLIMITED_ONES, TRIANGLE)
}

#[must_use]
pub fn double_klondike_by_threes() -> VariantDef {
    let stock = Stock {
        num_deal: 3,
        ..UNLIMITED_ONES
    };
    harp_variant(2, 9, king_ac(), stock, TRIANGLE)
}

#[must_use]
pub fn gargantua() -> VariantDef {
    let stock = Stock {
        max_rounds: Some(2),
        num_deal: 1,
    };
    harp_variant(2, 9, king_ac(), stock, TRIANGLE)
}

/// Ten rows, the long piles on the left, a single pass through the talon.
#[must_use]
pub fn big_harp() -> VariantDef {
    let stock = Stock {
        max_rounds: Some(1),
        num_deal: 1,
    };
    let row = row(AcceptPolicy::Sequence(Sequencing::AC), BaseRank::Any);
    harp_variant(2, 10, row, stock, DealScript::BigHarp)
}

#[must_use]
pub fn steps() -> VariantDef {
    let stock = Stock {
        max_rounds: Some(2),
        num_deal: 1,
    };
    let row = row(AcceptPolicy::Sequence(Sequencing::AC), BaseRank::Any);
    harp_variant(2, 7, row, stock, TRIANGLE)
}

#[must_use]
pub fn triple_klondike() -> VariantDef {
    harp_variant(3, 13, king_ac(), UNLIMITED_ONES, TRIANGLE)
}

#[must_use]
pub fn triple_klondike_by_threes() -> VariantDef {
    let stock = Stock {
        num_deal: 3,
        ..UNLIMITED_ONES
    };
    harp_variant(3, 13, king_ac(), stock, TRIANGLE)
}

/// Spider-style rows: build down regardless of suit, move only suited runs.
#[must_use]
pub fn lady_jane() -> VariantDef {
    let stock = Stock {
        max_rounds: Some(2),
        num_deal: 3,
    };
    harp_variant(2, 10, spider_row(BaseRank::Any), stock, OPEN_TRIANGLE)
        .with_highlight(HighlightRule::AnyAdjacent)
        .with_quick_play(QuickPlayRule::SuitPreferring)
}

#[must_use]
pub fn inquisitor() -> VariantDef {
    let stock = Stock {
        max_rounds: Some(3),
        num_deal: 3,
    };
    let row = row(AcceptPolicy::Sequence(Sequencing::SS), BaseRank::Any);
    harp_variant(2, 10, row, stock, OPEN_TRIANGLE).with_highlight(HighlightRule::SameSuitAdjacent)
}

#[must_use]
pub fn arabella() -> VariantDef {
    let stock = Stock {
        max_rounds: Some(1),
        num_deal: 1,
    };
    harp_variant(3, 13, spider_row(BaseRank::KING), stock, OPEN_TRIANGLE)
        .with_highlight(HighlightRule::AnyAdjacent)
}

fn info(
    id: u32,
    class: &'static str,
    build: fn() -> VariantDef,
    name: &str,
    decks: u8,
    redeals: i32,
) -> GameInfo {
    GameInfo::new(id, class, build, name, GameType::Klondike, decks, redeals)
        .with_skill(SkillLevel::Balanced)
}

pub fn register(m: &mut GameManager) -> Result<(), GameInfoError> {
    m.register(info(21, "DoubleKlondike", double_klondike, "Double Klondike", 2, -1))?;
    m.register(
        info(
            28,
            "DoubleKlondikeByThrees",
            double_klondike_by_threes,
            "Double Klondike by Threes",
            2,
            -1,
        )
        .with_skill(SkillLevel::MostlyLuck),
    )?;
    m.register(info(25, "Gargantua", gargantua, "Gargantua", 2, 1))?;
    m.register(info(15, "BigHarp", big_harp, "Big Harp", 2, 0).with_altnames(&["Die große Harfe"]))?;
    m.register(info(51, "Steps", steps, "Steps", 2, 1))?;
    m.register(info(273, "TripleKlondike", triple_klondike, "Triple Klondike", 3, -1))?;
    m.register(
        info(
            274,
            "TripleKlondikeByThrees",
            triple_klondike_by_threes,
            "Triple Klondike by Threes",
            3,
            -1,
        )
        .with_skill(SkillLevel::MostlyLuck),
    )?;
    m.register(info(495, "LadyJane", lady_jane, "Lady Jane", 2, 1))?;
    m.register(info(496, "Inquisitor", inquisitor, "Inquisitor", 2, 2))?;
    m.register(info(497, "Arabella", arabella, "Arabella", 3, 0))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::Card;
    use crate::core::{MoveRejected, StackId};
    use crate::game::Game;
    use crate::games::builtin_manager;

    fn up(suit: u8, rank: u8) -> Card {
        Card::new(suit as u16 * 13 + rank as u16, 0, suit, rank).face_up()
    }

    fn lens(game: &Game, stacks: &[StackId]) -> Vec<usize> {
        stacks.iter().map(|&s| game.stack(s).len()).collect()
    }

    #[test]
    fn test_double_klondike_triangle() {
        let m = builtin_manager();
        let game = Game::new(m.get(21).unwrap(), 4);
        assert_eq!(lens(&game, game.rows()), (1..=9).collect::<Vec<_>>());
        for &r in game.rows() {
            let stack = game.stack(r);
            let up = stack.cards.iter().filter(|c| c.face_up).count();
            assert_eq!(up, 1);
            assert!(stack.top().unwrap().face_up);
        }
        assert_eq!(game.stack(game.waste().unwrap()).len(), 1);
        assert_eq!(game.stack(game.talon()).len(), 104 - 45 - 1);
        assert_eq!(game.foundations().len(), 8);
    }

    #[test]
    fn test_big_harp_long_piles_left() {
        let m = builtin_manager();
        let game = Game::new(m.get(15).unwrap(), 4);
        assert_eq!(lens(&game, game.rows()), (1..=10).rev().collect::<Vec<_>>());
        assert_eq!(m.get_by_name("Die große Harfe").unwrap().id, 15);
    }

    #[test]
    fn test_open_triangle_is_face_up() {
        let m = builtin_manager();
        let game = Game::new(m.get(496).unwrap(), 4);
        assert!(game
            .rows()
            .iter()
            .all(|&r| game.stack(r).cards.iter().all(|c| c.face_up)));
    }

    #[test]
    fn test_by_threes_turns_three() {
        let m = builtin_manager();
        let mut game = Game::new(m.get(28).unwrap(), 4);
        let waste = game.waste().unwrap();
        assert_eq!(game.deal_cards(), Ok(3));
        assert_eq!(game.stack(waste).len(), 4);
    }

    #[test]
    fn test_unlimited_redeals() {
        let m = builtin_manager();
        let mut game = Game::new(m.get(21).unwrap(), 4);
        let talon = game.talon();
        for _ in 0..3 {
            while !game.stack(talon).is_empty() {
                game.deal_cards().unwrap();
            }
            assert!(game.can_deal_cards());
            game.deal_cards().unwrap();
        }
        assert_eq!(game.round(), 4);
    }

    #[test]
    fn test_lady_jane_moves_suited_runs_only() {
        let m = builtin_manager();
        let mut game = Game::new(m.get(495).unwrap(), 4);
        let (r0, r1) = (game.rows()[0], game.rows()[1]);
        {
            let stacks = &mut game.state_mut().stacks;
            stacks.set_cards(r0, vec![up(3, 9)]);
            stacks.set_cards(r1, vec![up(0, 8), up(2, 7)]);
        }
        assert_eq!(
            game.try_move(2, r1, r0),
            Err(MoveRejected::CannotMove { stack: r1, ncards: 2 })
        );
        game.state_mut().stacks.set_cards(r1, vec![up(0, 8), up(0, 7)]);
        game.try_move(2, r1, r0).unwrap();
        assert_eq!(game.stack(r0).len(), 3);
    }

    #[test]
    fn test_lady_jane_quick_play_prefers_suit() {
        let m = builtin_manager();
        let mut game = Game::new(m.get(495).unwrap(), 4);
        let rows = game.rows().to_vec();
        {
            let stacks = &mut game.state_mut().stacks;
            stacks.set_cards(rows[0], vec![up(1, 6)]);
            stacks.set_cards(rows[1], vec![up(2, 6)]);
            stacks.set_cards(rows[2], vec![up(2, 5)]);
        }
        assert_eq!(game.quick_play_score(rows[2], rows[1]), 2);
        assert_eq!(game.quick_play_score(rows[2], rows[0]), 1);
        assert_eq!(game.quick_play(rows[2]), Ok(rows[1]));
    }
}
