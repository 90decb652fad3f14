//! Game descriptors.
//!
//! A `GameInfo` names a variant and classifies it for the selection UI:
//! type, flags, deck count, redeals and skill level. It also carries the
//! constructor for the variant's `VariantDef`, so the registry is the one
//! place a game is looked up by id before it is played.
//!
//! Descriptors are built with `GameInfo::new` plus `with_*` builders and
//! validated when registered.

use std::fmt;
use std::ops::BitOr;

use crate::cards::DeckSpec;
use crate::core::GameInfoError;
use crate::rules::VariantDef;

use super::tables::replacement_for;

/// Highest valid game id.
pub const MAX_GAME_ID: u32 = 999_999;

/// Game family, used for menus and type filters.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(u16)]
pub enum GameType {
    OneDeck = 0,
    TwoDeck = 1,
    ThreeDeck = 2,
    FourDeck = 3,
    BakersDozen = 4,
    BeleagueredCastle = 5,
    Canfield = 6,
    DashavataraGanjifa = 7,
    Fan = 8,
    FortyThieves = 9,
    FreeCell = 10,
    Golf = 11,
    Gypsy = 12,
    Hanafuda = 13,
    HexADeck = 14,
    Klondike = 15,
    Mahjongg = 16,
    Matrix = 17,
    Memory = 18,
    Montana = 19,
    MughalGanjifa = 20,
    Napoleon = 21,
    NavagrahaGanjifa = 22,
    Numerica = 23,
    Pairing = 24,
    Poker = 25,
    Puzzle = 26,
    Raglan = 27,
    Row = 28,
    Simple = 29,
    Spider = 30,
    Tarock = 31,
    Terrace = 32,
    Yukon = 33,
    ShisenSho = 34,
}

impl GameType {
    /// Menu name of the type, if it has one.
    #[must_use]
    pub const fn menu_name(self) -> Option<&'static str> {
        Some(match self {
            Self::BakersDozen => "Baker's Dozen",
            Self::BeleagueredCastle => "Beleaguered Castle",
            Self::Canfield => "Canfield",
            Self::Fan => "Fan",
            Self::FortyThieves => "Forty Thieves",
            Self::FreeCell => "FreeCell",
            Self::Golf => "Golf",
            Self::Gypsy => "Gypsy",
            Self::Klondike => "Klondike",
            Self::Montana => "Montana",
            Self::Napoleon => "Napoleon",
            Self::Numerica => "Numerica",
            Self::Pairing => "Pairing",
            Self::Raglan => "Raglan",
            Self::Simple => "Simple games",
            Self::Spider => "Spider",
            Self::Terrace => "Terrace",
            Self::Yukon => "Yukon",
            Self::OneDeck => "One-Deck games",
            Self::TwoDeck => "Two-Deck games",
            Self::ThreeDeck => "Three-Deck games",
            Self::FourDeck => "Four-Deck games",
            _ => return None,
        })
    }

    /// Card category a game of this type is played with.
    #[must_use]
    pub const fn default_category(self) -> Category {
        match self {
            Self::Hanafuda => Category::Hanafuda,
            Self::Tarock => Category::Tarock,
            Self::Mahjongg => Category::Mahjongg,
            Self::HexADeck => Category::HexADeck,
            Self::MughalGanjifa => Category::MughalGanjifa,
            Self::NavagrahaGanjifa => Category::NavagrahaGanjifa,
            Self::DashavataraGanjifa => Category::DashavataraGanjifa,
            _ => Category::French,
        }
    }

    /// Ganjifa decks of any kind.
    #[must_use]
    pub const fn is_ganjifa(self) -> bool {
        matches!(
            self,
            Self::MughalGanjifa | Self::NavagrahaGanjifa | Self::DashavataraGanjifa
        )
    }

    /// Types played with a non-French deck.
    #[must_use]
    pub const fn is_oriental_or_special_deck(self) -> bool {
        matches!(self, Self::Hanafuda | Self::HexADeck | Self::Tarock) || self.is_ganjifa()
    }
}

/// Extra classification bits of a game.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct GameFlags(u32);

impl GameFlags {
    pub const NONE: Self = Self(0);
    /// Driver still in beta.
    pub const BETA: Self = Self(1 << 12);
    pub const CHILDREN: Self = Self(1 << 13);
    /// Contributed under the GPL.
    pub const CONTRIB: Self = Self(1 << 14);
    /// Loadable but not listed in menus.
    pub const HIDDEN: Self = Self(1 << 15);
    /// All cards visible from the start.
    pub const OPEN: Self = Self(1 << 16);
    pub const ORIGINAL: Self = Self(1 << 17);
    pub const POPULAR: Self = Self(1 << 18);
    pub const RELAXED: Self = Self(1 << 19);
    pub const SCORE: Self = Self(1 << 20);
    pub const SEPARATE_DECKS: Self = Self(1 << 21);
    /// Original game by other authors.
    pub const XORIGINAL: Self = Self(1 << 22);

    #[must_use]
    pub const fn bits(self) -> u32 {
        self.0
    }

    #[must_use]
    pub const fn contains(self, other: Self) -> bool {
        self.0 & other.0 == other.0
    }

    #[must_use]
    pub const fn intersects(self, other: Self) -> bool {
        self.0 & other.0 != 0
    }
}

impl BitOr for GameFlags {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        Self(self.0 | rhs.0)
    }
}

/// How much a game depends on skill.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(u8)]
pub enum SkillLevel {
    Luck = 1,
    MostlyLuck = 2,
    Balanced = 3,
    MostlySkill = 4,
    Skill = 5,
}

/// Kind of card set a game needs.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum Category {
    French = 1,
    Hanafuda = 2,
    Tarock = 3,
    Mahjongg = 4,
    HexADeck = 5,
    MughalGanjifa = 6,
    NavagrahaGanjifa = 7,
    DashavataraGanjifa = 8,
    TrumpOnly = 9,
}

/// Where a registration came from. Query-only metadata.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum Provenance {
    #[default]
    BuiltIn,
    Plugin(String),
}

/// Values shown by the game selection dialogs; may differ from the
/// playing values (Montana shows 48 cards).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SelectionInfo {
    pub game_type: GameType,
    pub flags: GameFlags,
    pub decks: u8,
    pub redeals: i32,
    pub ncards: usize,
}

/// Immutable descriptor of one game variant.
#[derive(Clone)]
pub struct GameInfo {
    pub id: u32,
    /// Unique name of the variant definition.
    pub class: &'static str,
    pub build: fn() -> VariantDef,
    pub name: String,
    pub short_name: String,
    pub altnames: Vec<String>,
    pub game_type: GameType,
    pub flags: GameFlags,
    pub decks: u8,
    /// Number of redeals; -1 is unlimited.
    pub redeals: i32,
    pub skill_level: Option<SkillLevel>,
    pub category: Category,
    pub suits: u8,
    pub ranks: u8,
    pub trumps: u8,
    pub si: SelectionInfo,
    pub provenance: Provenance,
}

impl GameInfo {
    /// A French-deck descriptor.
    #[must_use]
    pub fn new(
        id: u32,
        class: &'static str,
        build: fn() -> VariantDef,
        name: impl Into<String>,
        game_type: GameType,
        decks: u8,
        redeals: i32,
    ) -> Self {
        let name = name.into();
        let ncards = DeckSpec::french(decks).total_cards();
        Self {
            id,
            class,
            build,
            short_name: name.clone(),
            name,
            altnames: Vec::new(),
            game_type,
            flags: GameFlags::NONE,
            decks,
            redeals,
            skill_level: None,
            category: game_type.default_category(),
            suits: 4,
            ranks: 13,
            trumps: 0,
            si: SelectionInfo {
                game_type,
                flags: GameFlags::NONE,
                decks,
                redeals,
                ncards,
            },
            provenance: Provenance::BuiltIn,
        }
    }

    #[must_use]
    pub fn with_flags(mut self, flags: GameFlags) -> Self {
        self.flags = flags;
        self.si.flags = flags;
        self
    }

    #[must_use]
    pub fn with_skill(mut self, skill: SkillLevel) -> Self {
        self.skill_level = Some(skill);
        self
    }

    #[must_use]
    pub fn with_short_name(mut self, short_name: impl Into<String>) -> Self {
        self.short_name = short_name.into();
        self
    }

    #[must_use]
    pub fn with_altnames(mut self, names: &[&str]) -> Self {
        self.altnames = names.iter().map(|n| (*n).to_string()).collect();
        self
    }

    #[must_use]
    pub fn with_category(mut self, category: Category) -> Self {
        self.category = category;
        self
    }

    /// Non-French card composition.
    #[must_use]
    pub fn with_deck_shape(mut self, suits: u8, ranks: u8, trumps: u8) -> Self {
        self.suits = suits;
        self.ranks = ranks;
        self.trumps = trumps;
        self.si.ncards = self.deck_spec().total_cards();
        self
    }

    /// Card count shown in selection dialogs.
    #[must_use]
    pub fn with_si_ncards(mut self, ncards: usize) -> Self {
        self.si.ncards = ncards;
        self
    }

    /// Cards the game is actually played with.
    #[must_use]
    pub fn ncards(&self) -> usize {
        self.deck_spec().total_cards()
    }

    #[must_use]
    pub fn deck_spec(&self) -> DeckSpec {
        DeckSpec {
            decks: self.decks,
            suits: self.suits,
            ranks: self.ranks,
            trumps: self.trumps,
        }
    }

    #[must_use]
    pub fn is_hidden(&self) -> bool {
        self.flags.contains(GameFlags::HIDDEN)
    }

    /// Check the descriptor on its own, before it meets the registry.
    pub fn validate(&self) -> Result<(), GameInfoError> {
        if !(1..=MAX_GAME_ID).contains(&self.id) {
            return Err(GameInfoError::InvalidId { id: self.id });
        }
        let decks_ok = match self.category {
            Category::Mahjongg => self.decks % 4 == 0,
            _ => (1..=4).contains(&self.decks),
        };
        if !decks_ok {
            return Err(GameInfoError::InvalidDecks {
                id: self.id,
                decks: self.decks,
            });
        }
        if self.name.is_empty() {
            return Err(GameInfoError::EmptyName { id: self.id });
        }
        if let Some(reserved_for) = replacement_for(self.id) {
            return Err(GameInfoError::ProtectedId {
                id: self.id,
                reserved_for,
            });
        }
        Ok(())
    }
}

impl fmt::Debug for GameInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GameInfo")
            .field("id", &self.id)
            .field("class", &self.class)
            .field("name", &self.name)
            .field("game_type", &self.game_type)
            .field("decks", &self.decks)
            .field("redeals", &self.redeals)
            .field("provenance", &self.provenance)
            .finish_non_exhaustive()
    }
}
