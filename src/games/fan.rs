//! Fan family: open tableaus of three-card fans, one card moved at a time.

use crate::cards::{CardSelector, DeckSpec, ShuffleHook};
use crate::core::{GameInfoError, StackConfig, StackRole, DRAW_DONE};
use crate::hint::HintPolicy;
use crate::registry::{GameFlags, GameInfo, GameManager, GameType, SkillLevel};
use crate::rules::{DealScript, FillHook, HighlightRule, Layout, MoveHook, TalonPolicy, VariantDef};
use crate::stacks::{AcceptPolicy, BaseRank, Caps, Sequencing, UNLIMITED};

/// Single-card row building by `seq`.
fn row(seq: Sequencing, base: BaseRank) -> StackConfig {
    StackConfig::new(StackRole::Row, AcceptPolicy::Sequence(seq))
        .map_caps(|c| c.with_base_rank(base).with_max_move(1).with_max_accept(1))
}

fn ss_foundation() -> StackConfig {
    StackConfig::new(StackRole::Foundation, AcceptPolicy::Foundation(Sequencing::SS))
}

/// Same-suit foundation from king down to ace.
fn ss_foundation_down() -> StackConfig {
    ss_foundation().map_caps(|c| c.with_base_rank(BaseRank::KING).with_dir(-1))
}

fn base(decks: u8, rows: usize, row: StackConfig) -> Layout {
    Layout::new(DeckSpec::french(decks))
        .with_foundation_sets(ss_foundation())
        .with_rows(rows, row)
}

fn fan_variant(layout: Layout, deal: DealScript) -> VariantDef {
    VariantDef::new(layout, deal)
        .with_hint(HintPolicy::Cautious)
        .with_highlight(HighlightRule::SameSuitAdjacent)
}

fn lucie_talon() -> Caps {
    Caps::talon().with_max_rounds(Some(3))
}

// === Variants ===

#[must_use]
pub fn fan() -> VariantDef {
    fan_variant(base(1, 18, row(Sequencing::SS, BaseRank::KING)), DealScript::Fan)
}

#[must_use]
pub fn scotch_patience() -> VariantDef {
    let ac_foundation = StackConfig::new(StackRole::Foundation, AcceptPolicy::Foundation(Sequencing::AC))
        .map_caps(|c| c.with_suit(None));
    let layout = Layout::new(DeckSpec::french(1))
        .with_foundation_set(ac_foundation)
        .with_rows(18, row(Sequencing::RK, BaseRank::None));
    fan_variant(layout, DealScript::Fan).with_highlight(HighlightRule::AnyAdjacent)
}

#[must_use]
pub fn shamrocks() -> VariantDef {
    let row = row(Sequencing::UD_RK, BaseRank::None).map_caps(|c| c.with_max_cards(3));
    fan_variant(base(1, 18, row), DealScript::Fan).with_highlight(HighlightRule::AnyAdjacent)
}

#[must_use]
pub fn la_belle_lucie() -> VariantDef {
    let layout = base(1, 18, row(Sequencing::SS, BaseRank::None)).with_talon(lucie_talon());
    fan_variant(layout, DealScript::Fan).with_talon(TalonPolicy::LaBelleLucie)
}

#[must_use]
pub fn super_flower_garden() -> VariantDef {
    la_belle_lucie().map_layout(|l| Layout {
        rows: vec![row(Sequencing::RK, BaseRank::None); 18],
        ..l
    })
}

/// La Belle Lucie plus one draw: a card may be pulled from under a row's
/// top card once per game.
#[must_use]
pub fn three_shuffles_and_a_draw() -> VariantDef {
    la_belle_lucie()
        .map_layout(|l| l.with_reserves(1, StackConfig::new(StackRole::Reserve, AcceptPolicy::DrawReserve)))
        .with_move_hook(MoveHook::DrawUnder)
        .with_aux_fields(&[DRAW_DONE])
}

#[must_use]
pub fn trefoil() -> VariantDef {
    let layout = Layout::new(DeckSpec::french(1))
        .with_talon(lucie_talon())
        .with_foundation_set(ss_foundation().map_caps(|c| c.with_min_cards(1)))
        .with_rows(16, row(Sequencing::SS, BaseRank::None));
    fan_variant(layout, DealScript::PassesThenFoundations { passes: 3 })
        .with_talon(TalonPolicy::LaBelleLucie)
        .with_shuffle_hook(ShuffleHook::MoveToBottom(CardSelector::Aces))
}

fn intelligence_with(rows: usize) -> VariantDef {
    let reserve = StackConfig::new(StackRole::Reserve, AcceptPolicy::Closed)
        .with_caps(Caps::closed().with_max_cards(UNLIMITED));
    let layout = base(2, rows, row(Sequencing::UD_SS, BaseRank::None))
        .with_talon(lucie_talon())
        .with_reserves(1, reserve);
    fan_variant(layout, DealScript::Intelligence)
        .with_talon(TalonPolicy::Intelligence)
        .with_fill(FillHook::RefillFromReserve(3))
}

#[must_use]
pub fn intelligence() -> VariantDef {
    intelligence_with(18)
}

#[must_use]
pub fn intelligence_plus() -> VariantDef {
    intelligence_with(19)
}

#[must_use]
pub fn house_in_the_wood() -> VariantDef {
    fan_variant(
        base(2, 35, row(Sequencing::UD_SS, BaseRank::None)),
        DealScript::RowPrefixes(&[34, 35, 35]),
    )
}

#[must_use]
pub fn house_on_the_hill() -> VariantDef {
    house_in_the_wood().map_layout(|l| {
        Layout {
            foundations: Vec::new(),
            ..l
        }
        .with_foundation_set(ss_foundation())
        .with_foundation_set(ss_foundation_down())
    })
}

/// Black suits build up from the ace, red suits down from the king.
#[must_use]
pub fn clover_leaf() -> VariantDef {
    let row = StackConfig::new(StackRole::Row, AcceptPolicy::CloverLeaf)
        .map_caps(|c| c.with_max_move(1).with_max_accept(1));
    let layout = Layout::new(DeckSpec::french(1))
        .with_foundation(ss_foundation().for_suit(0))
        .with_foundation(ss_foundation().for_suit(1))
        .with_foundation(ss_foundation_down().for_suit(2))
        .with_foundation(ss_foundation_down().for_suit(3))
        .with_rows(16, row);
    fan_variant(layout, DealScript::PassesThenFoundations { passes: 3 })
        .with_shuffle_hook(ShuffleHook::MoveToBottom(CardSelector::AceBlackKingRed))
}

#[must_use]
pub fn free_fan() -> VariantDef {
    fan().map_layout(|l| l.with_reserves(2, StackConfig::new(StackRole::Reserve, AcceptPolicy::Reserve)))
}

#[must_use]
pub fn box_fan() -> VariantDef {
    fan_variant(
        base(1, 16, row(Sequencing::AC, BaseRank::KING)),
        DealScript::PassesThenFoundations { passes: 3 },
    )
    .with_shuffle_hook(ShuffleHook::MoveToBottom(CardSelector::Aces))
    .with_highlight(HighlightRule::AlternateColorAdjacent)
}

fn troika_with(rows: usize, max_cards: usize, base_rank: BaseRank) -> VariantDef {
    let row = row(Sequencing::RK, base_rank).map_caps(|c| c.with_dir(0).with_max_cards(max_cards));
    fan_variant(base(1, rows, row), DealScript::Troika { per_row: max_cards })
        .with_highlight(HighlightRule::SameRank)
}

#[must_use]
pub fn troika() -> VariantDef {
    troika_with(18, 3, BaseRank::None)
}

#[must_use]
pub fn troika_plus() -> VariantDef {
    troika_with(13, 4, BaseRank::Any)
}

// === Registration ===

fn open(
    id: u32,
    class: &'static str,
    build: fn() -> VariantDef,
    name: &str,
    decks: u8,
    redeals: i32,
) -> GameInfo {
    GameInfo::new(id, class, build, name, GameType::Fan, decks, redeals)
        .with_flags(GameFlags::OPEN)
        .with_skill(SkillLevel::MostlySkill)
}

pub fn register(m: &mut GameManager) -> Result<(), GameInfoError> {
    m.register(open(56, "Fan", fan, "Fan", 1, 0))?;
    m.register(open(87, "ScotchPatience", scotch_patience, "Scotch Patience", 1, 0))?;
    m.register(open(57, "Shamrocks", shamrocks, "Shamrocks", 1, 0))?;
    m.register(
        open(901, "LaBelleLucie", la_belle_lucie, "La Belle Lucie", 1, 2)
            .with_altnames(&["Fair Lucy", "Midnight Oil"]),
    )?;
    m.register(open(132, "SuperFlowerGarden", super_flower_garden, "Super Flower Garden", 1, 2))?;
    m.register(open(
        128,
        "ThreeShufflesAndADraw",
        three_shuffles_and_a_draw,
        "Three Shuffles and a Draw",
        1,
        2,
    ))?;
    m.register(open(88, "Trefoil", trefoil, "Trefoil", 1, 2))?;
    m.register(
        GameInfo::new(227, "Intelligence", intelligence, "Intelligence", GameType::Fan, 2, 2)
            .with_skill(SkillLevel::Balanced),
    )?;
    m.register(
        GameInfo::new(340, "IntelligencePlus", intelligence_plus, "Intelligence +", GameType::Fan, 2, 2)
            .with_skill(SkillLevel::Balanced),
    )?;
    m.register(open(268, "HouseInTheWood", house_in_the_wood, "House in the Wood", 2, 0))?;
    m.register(open(317, "HouseOnTheHill", house_on_the_hill, "House on the Hill", 2, 0))?;
    m.register(open(320, "CloverLeaf", clover_leaf, "Clover Leaf", 1, 0))?;
    m.register(open(347, "FreeFan", free_fan, "Free Fan", 1, 0))?;
    m.register(open(385, "BoxFan", box_fan, "Box Fan", 1, 0))?;
    m.register(open(516, "Troika", troika, "Troika", 1, 0))?;
    m.register(open(517, "TroikaPlus", troika_plus, "Troika +", 1, 0))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::{Card, ACE, KING};
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
    fn test_trefoil_aces_on_foundations() {
        let m = builtin_manager();
        let game = Game::new(m.get(88).unwrap(), 17);
        assert_eq!(lens(&game, game.rows()), vec![3; 16]);
        for (suit, &f) in game.foundations().iter().enumerate() {
            let top = game.stack(f).top().unwrap();
            assert_eq!((top.rank, top.suit as usize), (ACE, suit));
        }
    }

    #[test]
    fn test_clover_leaf_foundation_bases() {
        let m = builtin_manager();
        let game = Game::new(m.get(320).unwrap(), 5);
        let tops: Vec<(u8, u8)> = game
            .foundations()
            .iter()
            .map(|&f| {
                let c = game.stack(f).top().unwrap();
                (c.suit, c.rank)
            })
            .collect();
        assert_eq!(tops, vec![(0, ACE), (1, ACE), (2, KING), (3, KING)]);
    }

    #[test]
    fn test_troika_deal_routes_aces() {
        let m = builtin_manager();
        let game = Game::new(m.get(516).unwrap(), 3);
        assert!(game.stack(game.talon()).is_empty());
        let on_foundations: usize = lens(&game, game.foundations()).iter().sum();
        assert_eq!(on_foundations, 4);
        assert!(lens(&game, game.rows()).iter().all(|&n| n <= 3));
        for &f in game.foundations() {
            assert_eq!(game.stack(f).top().map(|c| c.rank), Some(ACE));
        }
    }

    #[test]
    fn test_house_in_the_wood_prefix_deal() {
        let m = builtin_manager();
        let game = Game::new(m.get(268).unwrap(), 3);
        let lens = lens(&game, game.rows());
        assert_eq!(lens[..34], [3; 34]);
        assert_eq!(lens[34], 2);
    }

    #[test]
    fn test_draw_under_plays_hidden_card_once() {
        let m = builtin_manager();
        let mut game = Game::new(m.get(128).unwrap(), 2);
        let r0 = game.rows()[0];
        let clubs = game.foundations()[0];
        let reserve = game.reserves()[0];
        {
            let stacks = &mut game.state_mut().stacks;
            stacks.set_cards(clubs, vec![up(0, ACE)]);
            stacks.set_cards(r0, vec![up(1, KING), up(0, 1), up(2, 11)]);
        }

        game.try_move(1, r0, reserve).unwrap();
        let row: Vec<(u8, u8)> = game.stack(r0).cards.iter().map(|c| (c.suit, c.rank)).collect();
        assert_eq!(row, vec![(1, KING), (2, 11)]);
        assert_eq!(game.stack(clubs).len(), 2);
        assert!(game.stack(reserve).is_empty());
        assert_eq!(game.state().get_aux(DRAW_DONE, 0), 1);
        assert_eq!(game.log().cursor(), 1);

        // The draw is used up.
        game.state_mut().stacks.set_cards(r0, vec![up(0, 2), up(2, 11)]);
        assert_eq!(
            game.try_move(1, r0, reserve),
            Err(MoveRejected::NotAccepted { from: r0, to: reserve })
        );
    }

    #[test]
    fn test_draw_undo_rearms() {
        let m = builtin_manager();
        let mut game = Game::new(m.get(128).unwrap(), 2);
        let r0 = game.rows()[0];
        let clubs = game.foundations()[0];
        let reserve = game.reserves()[0];
        {
            let stacks = &mut game.state_mut().stacks;
            stacks.set_cards(clubs, vec![up(0, ACE)]);
            stacks.set_cards(r0, vec![up(1, KING), up(0, 1), up(2, 11)]);
        }
        let before = game.state().stacks.snapshot();
        game.try_move(1, r0, reserve).unwrap();
        game.undo().unwrap();
        assert_eq!(game.state().stacks.snapshot(), before);
        assert_eq!(game.state().get_aux(DRAW_DONE, 0), 0);
    }

    #[test]
    fn test_intelligence_refills_empty_row() {
        let m = builtin_manager();
        let mut game = Game::new(m.get(227).unwrap(), 6);
        let r0 = game.rows()[0];
        let reserve = game.reserves()[0];
        let foundations = game.foundations().to_vec();
        {
            let stacks = &mut game.state_mut().stacks;
            for &f in &foundations {
                stacks.set_cards(f, Vec::new());
            }
            stacks.set_cards(r0, vec![up(0, ACE)]);
        }
        let reserve_before = game.stack(reserve).len();
        assert!(reserve_before >= 3);

        assert_eq!(game.quick_play(r0), Ok(foundations[0]));
        assert_eq!(game.stack(r0).len(), 3);
        assert!(game.stack(r0).cards.iter().all(|c| c.face_up));
        assert!(game.stack(reserve).len() <= reserve_before - 3);
        assert_eq!(game.log().cursor(), 1);

        game.undo().unwrap();
        assert_eq!(game.stack(r0).cards, vec![up(0, ACE)]);
        assert_eq!(game.stack(reserve).len(), reserve_before);
    }

    #[test]
    fn test_registration_metadata() {
        let m = builtin_manager();
        let lucie = m.get(901).unwrap();
        assert_eq!(lucie.redeals, 2);
        assert!(lucie.flags.contains(GameFlags::OPEN));
        assert_eq!(m.get(227).unwrap().skill_level, Some(SkillLevel::Balanced));
        assert!(!m.get(227).unwrap().flags.contains(GameFlags::OPEN));
    }
}
