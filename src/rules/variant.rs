//! Variant definitions: the configuration record that turns the generic
//! engine into one specific patience game.
//!
//! A variant is data. Each field selects one policy from a closed set and
//! parameterizes it; the handful of games with genuinely unique behaviour
//! get a named strategy inside the relevant enum.

use crate::cards::{DeckSpec, ShuffleHook};
use crate::core::{StackConfig, StackRole};
use crate::hint::HintPolicy;
use crate::stacks::{AcceptPolicy, Caps, StackSet};

use super::deal::DealScript;
use super::predicates::{HighlightRule, QuickPlayRule, WinRule};
use super::talon::TalonPolicy;

/// The stacks a variant plays with, in creation order.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Layout {
    pub deck: DeckSpec,
    pub talon: Caps,
    pub waste: bool,
    pub foundations: Vec<StackConfig>,
    pub rows: Vec<StackConfig>,
    pub reserves: Vec<StackConfig>,
    pub internals: usize,
}

impl Layout {
    /// Empty layout over the given deck with a single-pass talon.
    #[must_use]
    pub fn new(deck: DeckSpec) -> Self {
        Self {
            deck,
            talon: Caps::talon(),
            waste: false,
            foundations: Vec::new(),
            rows: Vec::new(),
            reserves: Vec::new(),
            internals: 0,
        }
    }

    #[must_use]
    pub fn with_talon(mut self, caps: Caps) -> Self {
        self.talon = caps;
        self
    }

    #[must_use]
    pub fn with_waste(mut self) -> Self {
        self.waste = true;
        self
    }

    /// Add four foundations, one per suit, from a template.
    #[must_use]
    pub fn with_foundation_set(mut self, template: StackConfig) -> Self {
        for suit in 0..4 {
            self.foundations.push(template.clone().for_suit(suit));
        }
        self
    }

    /// Add one foundation set per deck.
    #[must_use]
    pub fn with_foundation_sets(mut self, template: StackConfig) -> Self {
        for _ in 0..self.deck.decks {
            self = self.with_foundation_set(template.clone());
        }
        self
    }

    /// Add a single foundation exactly as configured.
    #[must_use]
    pub fn with_foundation(mut self, config: StackConfig) -> Self {
        self.foundations.push(config);
        self
    }

    #[must_use]
    pub fn with_rows(mut self, n: usize, template: StackConfig) -> Self {
        self.rows.extend(std::iter::repeat(template).take(n));
        self
    }

    #[must_use]
    pub fn with_reserves(mut self, n: usize, template: StackConfig) -> Self {
        self.reserves.extend(std::iter::repeat(template).take(n));
        self
    }

    #[must_use]
    pub fn with_internal(mut self) -> Self {
        self.internals += 1;
        self
    }

    /// Create the empty table.
    #[must_use]
    pub fn build(&self) -> StackSet {
        let mut set = StackSet::new();
        set.add(StackConfig::new(StackRole::Talon, AcceptPolicy::Closed).with_caps(self.talon));
        if self.waste {
            set.add(StackConfig::new(StackRole::Waste, AcceptPolicy::Closed));
        }
        for cfg in self.foundations.iter().chain(&self.rows).chain(&self.reserves) {
            set.add(cfg.clone());
        }
        for _ in 0..self.internals {
            set.add(StackConfig::new(StackRole::Internal, AcceptPolicy::Closed));
        }
        set
    }
}

/// Special handling of a player move.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum MoveHook {
    #[default]
    None,
    /// A move onto the draw reserve parks the top card, plays the card
    /// beneath it, then returns the parked card.
    DrawUnder,
}

/// Refilling of emptied rows after a player action.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum FillHook {
    #[default]
    None,
    /// An empty row takes up to `n` cards from the first reserve, aces going
    /// to the foundations.
    RefillFromReserve(usize),
}

/// Complete configuration of one variant.
#[derive(Clone, Debug)]
pub struct VariantDef {
    pub layout: Layout,
    pub shuffle_hook: ShuffleHook,
    pub deal: DealScript,
    pub talon: TalonPolicy,
    pub win: WinRule,
    pub highlight: HighlightRule,
    pub quick_play: QuickPlayRule,
    pub hint: HintPolicy,
    pub move_hook: MoveHook,
    pub fill: FillHook,
    /// Auxiliary model keys saved with the game.
    pub aux_fields: &'static [&'static str],
}

impl VariantDef {
    /// A variant with default policies for everything but layout and deal.
    #[must_use]
    pub fn new(layout: Layout, deal: DealScript) -> Self {
        Self {
            layout,
            shuffle_hook: ShuffleHook::None,
            deal,
            talon: TalonPolicy::InitialDeal,
            win: WinRule::AllFoundationsFull,
            highlight: HighlightRule::None,
            quick_play: QuickPlayRule::Default,
            hint: HintPolicy::Default,
            move_hook: MoveHook::None,
            fill: FillHook::None,
            aux_fields: &[],
        }
    }

    #[must_use]
    pub fn with_deal(mut self, deal: DealScript) -> Self {
        self.deal = deal;
        self
    }

    #[must_use]
    pub fn with_shuffle_hook(mut self, hook: ShuffleHook) -> Self {
        self.shuffle_hook = hook;
        self
    }

    #[must_use]
    pub fn with_talon(mut self, talon: TalonPolicy) -> Self {
        self.talon = talon;
        self
    }

    #[must_use]
    pub fn with_win(mut self, win: WinRule) -> Self {
        self.win = win;
        self
    }

    #[must_use]
    pub fn with_highlight(mut self, highlight: HighlightRule) -> Self {
        self.highlight = highlight;
        self
    }

    #[must_use]
    pub fn with_quick_play(mut self, rule: QuickPlayRule) -> Self {
        self.quick_play = rule;
        self
    }

    #[must_use]
    pub fn with_hint(mut self, hint: HintPolicy) -> Self {
        self.hint = hint;
        self
    }

    #[must_use]
    pub fn with_move_hook(mut self, hook: MoveHook) -> Self {
        self.move_hook = hook;
        self
    }

    #[must_use]
    pub fn with_fill(mut self, fill: FillHook) -> Self {
        self.fill = fill;
        self
    }

    #[must_use]
    pub fn with_aux_fields(mut self, fields: &'static [&'static str]) -> Self {
        self.aux_fields = fields;
        self
    }

    /// Adjust the layout in place.
    #[must_use]
    pub fn map_layout(mut self, f: impl FnOnce(Layout) -> Layout) -> Self {
        self.layout = f(self.layout);
        self
    }
}
