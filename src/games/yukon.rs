//! Yukon family.
//!
//! Rows accept a pile whose bottom card continues the row, but any face-up
//! pile may be lifted, sequence or not. Most members start empty rows with a
//! king and keep the foundations closed once built.
//!
//! ## Members
//!
//! | Build          | Games                                                 |
//! |----------------|-------------------------------------------------------|
//! | alternate      | Yukon, Chinese Discipline/Solitaire, Queenie, Double  |
//! |                | and Triple Yukon                                      |
//! | same suit      | Russian Solitaire, Odessa, Grandfather, Rushdike,     |
//! |                | Russian Point, Ten Across, Panopticon, Geoffrey, the  |
//! |                | Australian games and the multi-deck Russian games     |
//! | either way     | Alaska (suit), Roslin (colour)                        |
//! | other          | Moosehide (any other suit), Abacus (suit-stepped)     |

use crate::cards::{CardSelector, DeckSpec, ShuffleHook};
use crate::core::{GameInfoError, StackConfig, StackRole};
use crate::hint::HintPolicy;
use crate::registry::{GameFlags, GameInfo, GameManager, GameType, SkillLevel};
use crate::rules::{DealScript, HighlightRule, Layout, TalonPolicy, VariantDef};
use crate::stacks::{AcceptPolicy, BaseRank, Sequencing};

fn yukon_row(seq: Sequencing, base: BaseRank) -> StackConfig {
    StackConfig::new(StackRole::Row, AcceptPolicy::Yukon(seq)).map_caps(|c| c.with_base_rank(base))
}

/// Same-suit foundation that keeps its cards.
fn closed_foundation() -> StackConfig {
    StackConfig::new(StackRole::Foundation, AcceptPolicy::Foundation(Sequencing::SS))
        .map_caps(|c| c.with_max_move(0))
}

fn yukon_layout(decks: u8, rows: usize, row: StackConfig) -> Layout {
    Layout::new(DeckSpec::french(decks))
        .with_foundation_sets(closed_foundation())
        .with_rows(rows, row)
}

fn yukon_variant(layout: Layout, deal: DealScript, highlight: HighlightRule) -> VariantDef {
    VariantDef::new(layout, deal)
        .with_hint(HintPolicy::Yukon)
        .with_highlight(highlight)
}

/// Seven king-based rows dealt as a Yukon triangle.
fn classic(seq: Sequencing, highlight: HighlightRule) -> VariantDef {
    yukon_variant(yukon_layout(1, 7, yukon_row(seq, BaseRank::KING)), DealScript::Yukon, highlight)
}

// === Single deck ===

#[must_use]
pub fn yukon() -> VariantDef {
    classic(Sequencing::AC, HighlightRule::AlternateColorAdjacent)
}

#[must_use]
pub fn russian_solitaire() -> VariantDef {
    classic(Sequencing::SS, HighlightRule::SameSuitAdjacent)
}

#[must_use]
pub fn odessa() -> VariantDef {
    russian_solitaire().with_deal(DealScript::Odessa)
}

#[must_use]
pub fn grandfather() -> VariantDef {
    russian_solitaire().with_deal(DealScript::Grandfather)
}

#[must_use]
pub fn alaska() -> VariantDef {
    classic(Sequencing::UD_SS, HighlightRule::SameSuitAdjacent)
}

#[must_use]
pub fn moosehide() -> VariantDef {
    classic(Sequencing::BO, HighlightRule::AnyButSameSuitAdjacent)
}

#[must_use]
pub fn roslin() -> VariantDef {
    classic(Sequencing::UD_AC, HighlightRule::AlternateColorAdjacent)
}

/// Yukon rows with a dealing talon holding back the last cards.
fn dealing(row: StackConfig, deal: DealScript, highlight: HighlightRule) -> VariantDef {
    yukon_variant(yukon_layout(1, 7, row), deal, highlight).with_talon(TalonPolicy::DealRow)
}

#[must_use]
pub fn chinese_discipline() -> VariantDef {
    dealing(
        yukon_row(Sequencing::AC, BaseRank::KING),
        DealScript::ChineseDiscipline,
        HighlightRule::AlternateColorAdjacent,
    )
}

/// Chinese Discipline where any card may fill a space.
#[must_use]
pub fn chinese_solitaire() -> VariantDef {
    dealing(
        yukon_row(Sequencing::AC, BaseRank::Any),
        DealScript::ChineseDiscipline,
        HighlightRule::AlternateColorAdjacent,
    )
}

const STAIRCASE_UP: DealScript = DealScript::Staircase {
    flip: true,
    reverse: true,
    foundations_first: false,
};

#[must_use]
pub fn queenie() -> VariantDef {
    dealing(
        yukon_row(Sequencing::AC, BaseRank::KING),
        STAIRCASE_UP,
        HighlightRule::AlternateColorAdjacent,
    )
}

#[must_use]
pub fn rushdike() -> VariantDef {
    dealing(
        yukon_row(Sequencing::SS, BaseRank::KING),
        DealScript::Staircase {
            flip: false,
            reverse: true,
            foundations_first: false,
        },
        HighlightRule::SameSuitAdjacent,
    )
}

#[must_use]
pub fn russian_point() -> VariantDef {
    rushdike().with_deal(DealScript::RussianPoint)
}

/// Each suit builds by its own step: clubs by one, spades by two, hearts
/// by three, diamonds by four, all wrapping to end on the king.
#[must_use]
pub fn abacus() -> VariantDef {
    let mut layout = Layout::new(DeckSpec::french(1));
    for suit in 0..4u8 {
        layout = layout.with_foundation(closed_foundation().for_suit(suit).map_caps(|c| {
            c.with_base_rank(BaseRank::Rank(suit))
                .with_dir(suit as i8 + 1)
                .with_mod(13)
        }));
    }
    let layout = layout.with_rows(7, yukon_row(Sequencing::STEPPED, BaseRank::Any));
    yukon_variant(
        layout,
        DealScript::Staircase {
            flip: true,
            reverse: true,
            foundations_first: true,
        },
        HighlightRule::SuitStepped,
    )
    .with_talon(TalonPolicy::DealRow)
    .with_shuffle_hook(ShuffleHook::MoveToTop(CardSelector::Ids(&[0, 14, 28, 42])))
}

/// Whole king-to-ace runs go to the foundations in one move.
#[must_use]
pub fn ten_across() -> VariantDef {
    let full_run = StackConfig::new(StackRole::Foundation, AcceptPolicy::FullRun).map_caps(|c| {
        c.with_base_rank(BaseRank::KING)
            .with_dir(-1)
            .with_min_accept(13)
            .with_max_accept(13)
            .with_max_move(0)
    });
    let layout = Layout::new(DeckSpec::french(1))
        .with_foundation_set(full_run)
        .with_rows(10, yukon_row(Sequencing::SS, BaseRank::KING))
        .with_reserves(2, StackConfig::new(StackRole::Reserve, AcceptPolicy::Reserve));
    yukon_variant(layout, DealScript::TenAcross, HighlightRule::SameSuitAdjacent)
}

#[must_use]
pub fn panopticon() -> VariantDef {
    let layout = Layout::new(DeckSpec::french(1))
        .with_foundation_set(StackConfig::new(
            StackRole::Foundation,
            AcceptPolicy::Foundation(Sequencing::SS),
        ))
        .with_rows(8, yukon_row(Sequencing::SS, BaseRank::KING))
        .with_reserves(4, StackConfig::new(StackRole::Reserve, AcceptPolicy::Reserve));
    yukon_variant(layout, DealScript::Panopticon, HighlightRule::SameSuitAdjacent)
}

fn australian_with(decks: u8, rows: usize, base: BaseRank, passes: usize) -> VariantDef {
    let foundation = StackConfig::new(StackRole::Foundation, AcceptPolicy::Foundation(Sequencing::SS));
    let layout = Layout::new(DeckSpec::french(decks))
        .with_waste()
        .with_foundation_sets(foundation)
        .with_rows(rows, yukon_row(Sequencing::SS, base));
    yukon_variant(layout, DealScript::Australian { passes }, HighlightRule::SameSuitAdjacent)
        .with_talon(TalonPolicy::Waste)
}

#[must_use]
pub fn australian_patience() -> VariantDef {
    australian_with(1, 7, BaseRank::KING, 3)
}

#[must_use]
pub fn raw_prawn() -> VariantDef {
    australian_with(1, 7, BaseRank::Any, 3)
}

#[must_use]
pub fn bim_bom() -> VariantDef {
    australian_with(2, 8, BaseRank::Any, 4)
}

#[must_use]
pub fn geoffrey() -> VariantDef {
    yukon_variant(
        yukon_layout(1, 8, yukon_row(Sequencing::SS, BaseRank::KING)),
        DealScript::Geoffrey,
        HighlightRule::SameSuitAdjacent,
    )
}

// === Multi-deck ===

#[must_use]
pub fn double_yukon() -> VariantDef {
    yukon_variant(
        yukon_layout(2, 10, yukon_row(Sequencing::AC, BaseRank::KING)),
        DealScript::DoubleYukon { up_passes: 5 },
        HighlightRule::AlternateColorAdjacent,
    )
}

#[must_use]
pub fn double_russian_solitaire() -> VariantDef {
    yukon_variant(
        yukon_layout(2, 10, yukon_row(Sequencing::SS, BaseRank::KING)),
        DealScript::DoubleYukon { up_passes: 5 },
        HighlightRule::SameSuitAdjacent,
    )
}

#[must_use]
pub fn triple_yukon() -> VariantDef {
    yukon_variant(
        yukon_layout(3, 13, yukon_row(Sequencing::AC, BaseRank::KING)),
        DealScript::TripleYukon { up_passes: 5 },
        HighlightRule::AlternateColorAdjacent,
    )
}

#[must_use]
pub fn triple_russian_solitaire() -> VariantDef {
    yukon_variant(
        yukon_layout(3, 13, yukon_row(Sequencing::SS, BaseRank::KING)),
        DealScript::TripleYukon { up_passes: 5 },
        HighlightRule::SameSuitAdjacent,
    )
}

// === Registration ===

fn info(
    id: u32,
    class: &'static str,
    build: fn() -> VariantDef,
    name: &str,
    decks: u8,
    skill: SkillLevel,
) -> GameInfo {
    GameInfo::new(id, class, build, name, GameType::Yukon, decks, 0).with_skill(skill)
}

pub fn register(m: &mut GameManager) -> Result<(), GameInfoError> {
    use SkillLevel::{Balanced, MostlyLuck, MostlySkill};

    m.register(info(19, "Yukon", yukon, "Yukon", 1, Balanced))?;
    m.register(info(20, "RussianSolitaire", russian_solitaire, "Russian Solitaire", 1, Balanced))?;
    m.register(info(27, "Odessa", odessa, "Odessa", 1, Balanced))?;
    m.register(info(278, "Grandfather", grandfather, "Grandfather", 1, MostlyLuck))?;
    m.register(info(186, "Alaska", alaska, "Alaska", 1, Balanced))?;

    let xoriginal = [
        (187, "ChineseDiscipline", chinese_discipline as fn() -> VariantDef, "Chinese Discipline"),
        (188, "ChineseSolitaire", chinese_solitaire, "Chinese Solitaire"),
        (189, "Queenie", queenie, "Queenie"),
        (190, "Rushdike", rushdike, "Rushdike"),
        (191, "RussianPoint", russian_point, "Russian Point"),
        (192, "Abacus", abacus, "Abacus"),
    ];
    for (id, class, build, name) in xoriginal {
        m.register(info(id, class, build, name, 1, Balanced).with_flags(GameFlags::XORIGINAL))?;
    }

    m.register(info(271, "DoubleYukon", double_yukon, "Double Yukon", 2, Balanced))?;
    m.register(info(272, "TripleYukon", triple_yukon, "Triple Yukon", 3, Balanced))?;
    m.register(info(284, "TenAcross", ten_across, "Ten Across", 1, MostlySkill))?;
    m.register(
        info(285, "Panopticon", panopticon, "Panopticon", 1, MostlySkill).with_flags(GameFlags::ORIGINAL),
    )?;
    m.register(info(339, "Moosehide", moosehide, "Moosehide", 1, MostlySkill))?;
    m.register(info(387, "Roslin", roslin, "Roslin", 1, MostlySkill))?;
    m.register(info(447, "AustralianPatience", australian_patience, "Australian Patience", 1, Balanced))?;
    m.register(info(450, "RawPrawn", raw_prawn, "Raw Prawn", 1, Balanced))?;
    m.register(info(456, "BimBom", bim_bom, "Bim Bom", 2, Balanced).with_flags(GameFlags::ORIGINAL))?;
    m.register(info(
        466,
        "DoubleRussianSolitaire",
        double_russian_solitaire,
        "Double Russian Solitaire",
        2,
        Balanced,
    ))?;
    m.register(info(
        488,
        "TripleRussianSolitaire",
        triple_russian_solitaire,
        "Triple Russian Solitaire",
        3,
        Balanced,
    ))?;
    m.register(info(492, "Geoffrey", geoffrey, "Geoffrey", 1, MostlySkill))
}
