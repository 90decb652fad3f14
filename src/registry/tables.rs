//! Static catalog tables: retired ids, compatibility and release groups,
//! legacy flag lists and the named type filters of the selection menus.

use super::info::{GameFlags, GameType, SelectionInfo};

/// Retired ids and the id that replaced each of them.
pub const PROTECTED_GAMES: &[(u32, u32)] = &[
    (22, 106),
    (32, 901),
    (52, 903),
    (72, 115),
    (75, 126),
    (82, 901),
    (262, 105),
    (902, 88),
    (904, 68),
];

/// Replacement for a retired id, `None` if `id` is not protected.
#[must_use]
pub fn replacement_for(id: u32) -> Option<u32> {
    PROTECTED_GAMES
        .iter()
        .find(|&&(retired, _)| retired == id)
        .map(|&(_, replacement)| replacement)
}

/// A set of game ids: either listed or a contiguous range.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum IdGroup {
    Ids(&'static [u32]),
    /// Half-open range `start..end`.
    Range(u32, u32),
}

impl IdGroup {
    #[must_use]
    pub fn contains(&self, id: u32) -> bool {
        match *self {
            Self::Ids(ids) => ids.contains(&id),
            Self::Range(start, end) => (start..end).contains(&id),
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = u32> + '_ {
        const NONE: &[u32] = &[];
        let (ids, range) = match *self {
            Self::Ids(ids) => (ids, 0..0),
            Self::Range(start, end) => (NONE, start..end),
        };
        ids.iter().copied().chain(range)
    }
}

/// Games that play the same as in other solitaire programs.
pub const GAMES_BY_COMPATIBILITY: &[(&str, IdGroup)] = &[
    (
        "Atari ST Patience",
        IdGroup::Ids(&[1, 3, 4, 7, 12, 14, 15, 16, 17, 39]),
    ),
    (
        "Gnome AisleRiot",
        IdGroup::Ids(&[
            1, 2, 8, 9, 11, 12, 19, 24, 27, 29, 31, 33, 34, 35, 36, 40, 41, 42, 43, 45, 48, 58,
            59, 67, 89, 91, 92, 93, 94, 95, 96, 100, 105, 111, 112, 113, 130, 139, 144, 146, 147,
            148, 200, 201, 206, 224, 225, 229, 230, 233, 257, 258, 280, 281, 282, 283, 284,
        ]),
    ),
    (
        "KDE Patience",
        IdGroup::Ids(&[1, 2, 7, 8, 18, 19, 23, 36, 50, 256, 261, 277, 278, 279, 903]),
    ),
    (
        "xpat2",
        IdGroup::Ids(&[1, 2, 8, 9, 11, 31, 54, 63, 89, 105, 901, 256, 345, 903]),
    ),
];

/// Release in which each game first appeared.
pub const GAMES_BY_VERSION: &[(&str, IdGroup)] = &[
    ("1.00", IdGroup::Ids(&[1, 2, 3, 4])),
    ("1.01", IdGroup::Ids(&[5, 6])),
    ("1.02", IdGroup::Ids(&[7, 8, 9])),
    ("1.03", IdGroup::Ids(&[10, 11, 12, 13])),
    ("1.10", IdGroup::Ids(&[14])),
    ("1.11", IdGroup::Ids(&[15, 16, 17])),
    ("2.00", IdGroup::Ids(&[256, 257])),
    ("2.01", IdGroup::Ids(&[258, 259, 260, 261])),
    ("2.02", IdGroup::Ids(&[105])),
    (
        "2.90",
        IdGroup::Ids(&[
            18, 19, 20, 21, 106, 23, 24, 25, 26, 27, 28, 29, 30, 31, 901, 33, 34, 35, 36,
        ]),
    ),
    ("2.99", IdGroup::Ids(&[37])),
    (
        "3.00",
        IdGroup::Ids(&[
            38, 39, 40, 41, 42, 43, 45, 46, 47, 48, 49, 50, 51, 903, 53, 54, 55, 56, 57, 58, 59,
            60, 61, 62, 63, 64, 65, 66, 67, 68, 69, 70, 71, 115, 73, 74, 126, 76, 77, 78, 79, 80,
            81, 83, 84, 85, 86, 87, 88, 89, 90, 91, 92, 93, 94, 95, 96, 97, 98, 99, 100, 101, 102,
            103, 104, 107, 108,
        ]),
    ),
    (
        "3.10",
        IdGroup::Ids(&[
            109, 110, 111, 112, 113, 114, 116, 117, 118, 119, 120, 121, 122, 123, 124, 125, 127,
        ]),
    ),
    (
        "3.20",
        IdGroup::Ids(&[
            128, 129, 130, 131, 132, 133, 134, 135, 136, 137, 138, 139, 140, 141, 142, 12345,
            12346, 12347, 12348, 12349, 12350, 12351, 12352,
        ]),
    ),
    ("3.21", IdGroup::Ids(&[143, 144])),
    ("3.30", IdGroup::Ids(&[145, 146, 147, 148, 149, 150, 151])),
    ("3.40", IdGroup::Ids(&[152, 153, 154])),
    ("4.00", IdGroup::Ids(&[157, 158, 159, 160, 161, 162, 163, 164])),
    ("4.20", IdGroup::Range(165, 179)),
    ("4.30", IdGroup::Range(179, 185)),
    ("4.41", IdGroup::Range(185, 200)),
    ("4.60", IdGroup::Range(200, 237)),
    ("4.70", IdGroup::Ids(&[237])),
    (
        "fc-0.5.0",
        IdGroup::Ids(&[
            5301, 5302, 9011, 11001, 11002, 11003, 11004, 11005, 11006, 12353, 12354, 12355,
            12356, 12357, 12358, 12359, 12360, 12361, 12362, 12363, 12364, 12365, 12366, 12367,
            12368, 12369, 12370, 12371, 12372, 12373, 12374, 12375, 12376, 12377, 12378, 12379,
            12380, 12381, 12382, 12383, 12384, 12385, 13001, 13002, 13003, 13004, 13005, 13006,
            13007, 13008, 13009, 13010, 13011, 13012, 13013, 13014, 13163, 13164, 13165, 13166,
            13167, 14401, 14402, 14403, 14404, 14405, 14406, 14407, 14408, 14409, 14410, 14411,
            14412, 14413, 15406, 15407, 15408, 15409, 15410, 15411, 15412, 15413, 15414, 15415,
            15416, 15417, 15418, 15419, 15420, 15421, 15422, 16000, 16001, 16002, 16003, 16004,
            16666, 16667, 16668, 16669, 16670, 16671, 16672, 16673, 16674, 16675, 16676, 16677,
            16678, 16679, 16680, 22216, 22217, 22218, 22219, 22220, 22221, 22223, 22224, 22225,
            22226, 22227, 22228, 22229, 22230, 22231, 22232,
        ]),
    ),
    ("fc-0.8.0", IdGroup::Range(263, 323)),
    ("fc-0.9.0", IdGroup::Range(323, 421)),
    ("fc-0.9.1", IdGroup::Range(421, 441)),
    ("fc-0.9.2", IdGroup::Range(441, 466)),
];

/// Ids that carry the children flag whether or not their descriptor says so.
pub const CHILDREN_GAMES: &[u32] = &[16, 33, 55, 90, 91, 96, 97, 176, 903];

/// Ids that carry the popular flag whether or not their descriptor says so.
pub const POPULAR_GAMES: &[u32] = &[
    1, 2, 7, 8, 11, 12, 13, 14, 19, 31, 36, 38, 105, 158, 279, 903, 5034, 5401, 12345,
];

// =============================================================================
// Type Filters
// =============================================================================

const GANJIFA: &[GameType] = &[
    GameType::MughalGanjifa,
    GameType::NavagrahaGanjifa,
    GameType::DashavataraGanjifa,
];

/// Predicate over a game's selection info.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Selector {
    Type(GameType),
    AnyType(&'static [GameType]),
    /// Flag set, played with a French deck.
    FlaggedFrench(GameFlags),
    /// Flag set, type among the listed ones.
    FlaggedTypes(GameFlags, &'static [GameType]),
}

impl Selector {
    #[must_use]
    pub fn matches(&self, si: &SelectionInfo) -> bool {
        match *self {
            Self::Type(t) => si.game_type == t,
            Self::AnyType(types) => types.contains(&si.game_type),
            Self::FlaggedFrench(flags) => {
                si.flags.intersects(flags) && !si.game_type.is_oriental_or_special_deck()
            }
            Self::FlaggedTypes(flags, types) => {
                si.flags.intersects(flags) && types.contains(&si.game_type)
            }
        }
    }
}

/// A named entry of a selection menu.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TypeFilter {
    pub name: &'static str,
    pub selector: Selector,
}

const fn by_type(name: &'static str, t: GameType) -> TypeFilter {
    TypeFilter {
        name,
        selector: Selector::Type(t),
    }
}

const fn flagged(name: &'static str, flags: GameFlags, types: &'static [GameType]) -> TypeFilter {
    TypeFilter {
        name,
        selector: Selector::FlaggedTypes(flags, types),
    }
}

pub const SELECT_GAME_BY_TYPE: &[TypeFilter] = &[
    by_type("Baker's Dozen type", GameType::BakersDozen),
    by_type("Beleaguered Castle type", GameType::BeleagueredCastle),
    by_type("Canfield type", GameType::Canfield),
    by_type("Fan type", GameType::Fan),
    by_type("Forty Thieves type", GameType::FortyThieves),
    by_type("FreeCell type", GameType::FreeCell),
    by_type("Golf type", GameType::Golf),
    by_type("Gypsy type", GameType::Gypsy),
    by_type("Klondike type", GameType::Klondike),
    by_type("Montana type", GameType::Montana),
    by_type("Napoleon type", GameType::Napoleon),
    by_type("Numerica type", GameType::Numerica),
    by_type("Pairing type", GameType::Pairing),
    by_type("Raglan type", GameType::Raglan),
    by_type("Simple games", GameType::Simple),
    by_type("Spider type", GameType::Spider),
    by_type("Terrace type", GameType::Terrace),
    by_type("Yukon type", GameType::Yukon),
    by_type("One-Deck games", GameType::OneDeck),
    by_type("Two-Deck games", GameType::TwoDeck),
    by_type("Three-Deck games", GameType::ThreeDeck),
    by_type("Four-Deck games", GameType::FourDeck),
];

pub const SELECT_ORIGINAL_GAME_BY_TYPE: &[TypeFilter] = &[
    TypeFilter {
        name: "French type",
        selector: Selector::FlaggedFrench(GameFlags::ORIGINAL),
    },
    flagged("Ganjifa type", GameFlags::ORIGINAL, GANJIFA),
    flagged("Hanafuda type", GameFlags::ORIGINAL, &[GameType::Hanafuda]),
    flagged("Hex A Deck type", GameFlags::ORIGINAL, &[GameType::HexADeck]),
    flagged("Tarock type", GameFlags::ORIGINAL, &[GameType::Tarock]),
];

pub const SELECT_CONTRIB_GAME_BY_TYPE: &[TypeFilter] = &[
    TypeFilter {
        name: "French type",
        selector: Selector::FlaggedFrench(GameFlags::CONTRIB),
    },
    flagged("Ganjifa type", GameFlags::CONTRIB, GANJIFA),
    flagged("Hanafuda type", GameFlags::CONTRIB, &[GameType::Hanafuda]),
    flagged("Hex A Deck type", GameFlags::CONTRIB, &[GameType::HexADeck]),
    flagged("Tarock type", GameFlags::CONTRIB, &[GameType::Tarock]),
];

pub const SELECT_ORIENTAL_GAME_BY_TYPE: &[TypeFilter] = &[
    by_type("Dashavatara Ganjifa type", GameType::DashavataraGanjifa),
    TypeFilter {
        name: "Ganjifa type",
        selector: Selector::AnyType(GANJIFA),
    },
    by_type("Hanafuda type", GameType::Hanafuda),
    by_type("Mughal Ganjifa type", GameType::MughalGanjifa),
    by_type("Navagraha Ganjifa type", GameType::NavagrahaGanjifa),
];

pub const SELECT_SPECIAL_GAME_BY_TYPE: &[TypeFilter] = &[
    by_type("Shisen-Sho", GameType::ShisenSho),
    by_type("Hex A Deck type", GameType::HexADeck),
    by_type("Matrix type", GameType::Matrix),
    by_type("Memory type", GameType::Memory),
    by_type("Poker type", GameType::Poker),
    by_type("Puzzle type", GameType::Puzzle),
    by_type("Tarock type", GameType::Tarock),
];
