//! Carthage and the Algerian Patience games: two-pass reserve deals from a
//! multi-deck talon.

use crate::cards::{CardSelector, DeckSpec, ShuffleHook};
use crate::core::{GameInfoError, StackConfig, StackRole};
use crate::hint::HintPolicy;
use crate::registry::{GameFlags, GameInfo, GameManager, GameType, SkillLevel};
use crate::rules::{DealScript, HighlightRule, Layout, TalonPolicy, VariantDef};
use crate::stacks::{AcceptPolicy, BaseRank, Sequencing};

fn ss_foundation() -> StackConfig {
    StackConfig::new(StackRole::Foundation, AcceptPolicy::Foundation(Sequencing::SS))
}

fn row(seq: Sequencing) -> StackConfig {
    StackConfig::new(StackRole::Row, AcceptPolicy::Sequence(seq))
        .map_caps(|c| c.with_max_move(1).with_max_accept(1))
}

fn carthage_with(layout: Layout, reserves: usize, foundations_from: Option<usize>) -> VariantDef {
    let reserve = StackConfig::new(StackRole::Reserve, AcceptPolicy::Reserve);
    VariantDef::new(layout.with_reserves(reserves, reserve), DealScript::Carthage { foundations_from })
        .with_talon(TalonPolicy::Carthage)
        .with_hint(HintPolicy::Cautious)
        .with_highlight(HighlightRule::SameSuitAdjacentWrap)
}

#[must_use]
pub fn carthage() -> VariantDef {
    let layout = Layout::new(DeckSpec::french(2))
        .with_foundation_sets(ss_foundation())
        .with_rows(8, row(Sequencing::SS));
    carthage_with(layout, 6, None)
}

/// One set of foundations builds up from the ace, the other down from the
/// king; the first deck's kings start on the descending set.
#[must_use]
pub fn algerian_patience() -> VariantDef {
    let layout = Layout::new(DeckSpec::french(2))
        .with_foundation_set(ss_foundation())
        .with_foundation_set(ss_foundation().map_caps(|c| c.with_base_rank(BaseRank::KING).with_dir(-1)))
        .with_rows(8, row(Sequencing::UD_SS).map_caps(|c| c.with_mod(13)));
    carthage_with(layout, 6, Some(4))
        .with_shuffle_hook(ShuffleHook::MoveToTop(CardSelector::FirstDeckKings))
}

#[must_use]
pub fn algerian_patience_3() -> VariantDef {
    let layout = Layout::new(DeckSpec::french(3))
        .with_foundation_sets(ss_foundation())
        .with_rows(8, row(Sequencing::UD_SS).map_caps(|c| c.with_mod(13)));
    carthage_with(layout, 8, Some(0))
        .with_shuffle_hook(ShuffleHook::MoveToTop(CardSelector::AcesByDeckAndSuit))
}

pub fn register(m: &mut GameManager) -> Result<(), GameInfoError> {
    m.register(
        GameInfo::new(321, "Carthage", carthage, "Carthage", GameType::TwoDeck, 2, 0)
            .with_skill(SkillLevel::MostlySkill),
    )?;
    m.register(
        GameInfo::new(
            322,
            "AlgerianPatience",
            algerian_patience,
            "Algerian Patience",
            GameType::TwoDeck,
            2,
            0,
        )
        .with_skill(SkillLevel::MostlySkill),
    )?;
    m.register(
        GameInfo::new(
            457,
            "AlgerianPatience3",
            algerian_patience_3,
            "Algerian Patience (3 decks)",
            GameType::ThreeDeck,
            3,
            0,
        )
        .with_flags(GameFlags::ORIGINAL)
        .with_skill(SkillLevel::MostlySkill),
    )
}
