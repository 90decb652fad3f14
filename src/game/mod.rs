//! Playing one game.
//!
//! `Game` ties a `VariantDef` to a live `GameState` and a `MoveLog`. All
//! table changes go through a handful of primitives (`move_cards`, `flip`,
//! `shuffle_stack`, `next_round`, `update_model`) that apply one `Atom`,
//! notify the observer and record the atom in the open history entry.
//!
//! ## Player Actions
//!
//! Player-facing entry points (`try_move`, `quick_play`, `deal_cards`,
//! `flip_top`, `perform`) each run as one grouped history entry:
//!
//! 1. validate without mutating; a refusal is returned as `MoveRejected`
//! 2. apply the action's atoms
//! 3. run the variant's fill hook and flip exposed row cards
//! 4. commit the entry, then check for a win
//!
//! If the action fails half way its atoms are reverted before the error is
//! returned, so a refused action never leaves a trace.
//!
//! ## Example
//!
//! ```
//! use rust_solitaire::games;
//! use rust_solitaire::Game;
//!
//! let manager = games::builtin_manager();
//! let info = manager.get(56).unwrap();
//! let game = Game::new(info, 42);
//! let talon = game.talon();
//! assert!(game.stack(talon).is_empty());
//! ```

pub mod autoplay;
pub mod observer;
pub mod persist;

use tracing::{debug, info};

use crate::cards::Card;
use crate::core::{
    Atom, GameOptions, GameRng, GameState, HistoryEntry, MoveRejected, StackId, DRAW_DONE,
};
use crate::hint::{self, Hint};
use crate::history::MoveLog;
use crate::registry::GameInfo;
use crate::rules::{FillHook, MoveHook, VariantDef};
use crate::stacks::{AcceptPolicy, Stack};

pub use autoplay::{AutoPilot, CancelToken, PilotOutcome};
pub use observer::{GameObserver, NullObserver, Sample};
pub use persist::{SaveGame, SAVE_VERSION};

/// Builder for a new game.
#[must_use]
pub struct GameBuilder<'a> {
    info: &'a GameInfo,
    variant: Option<VariantDef>,
    seed: Option<u64>,
    options: GameOptions,
    observer: Box<dyn GameObserver>,
}

impl<'a> GameBuilder<'a> {
    /// Deal number to play; a fresh random seed when unset.
    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn options(mut self, options: GameOptions) -> Self {
        self.options = options;
        self
    }

    pub fn observer(mut self, observer: Box<dyn GameObserver>) -> Self {
        self.observer = observer;
        self
    }

    /// Play with this definition instead of the one the descriptor builds.
    pub fn variant(mut self, variant: VariantDef) -> Self {
        self.variant = Some(variant);
        self
    }

    /// Create the table and run the initial deal.
    pub fn start(self) -> Game {
        let variant = self.variant.unwrap_or_else(|| (self.info.build)());
        let seed = self.seed.unwrap_or_else(GameRng::fresh_seed);
        let stacks = variant.layout.build();
        let mut game = Game {
            info: self.info.clone(),
            variant,
            state: GameState::new(stacks, seed),
            log: MoveLog::new(),
            options: self.options,
            observer: self.observer,
            dealing: false,
            won_notified: false,
            undo_used: false,
        };
        game.start_game();
        game
    }
}

/// One game in progress.
pub struct Game {
    info: GameInfo,
    variant: VariantDef,
    state: GameState,
    log: MoveLog,
    options: GameOptions,
    observer: Box<dyn GameObserver>,
    dealing: bool,
    won_notified: bool,
    undo_used: bool,
}

impl std::fmt::Debug for Game {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Game")
            .field("id", &self.info.id)
            .field("seed", &self.seed())
            .field("round", &self.state.round)
            .field("cursor", &self.log.cursor())
            .finish_non_exhaustive()
    }
}

impl Game {
    /// Start a game with default options and no observer.
    #[must_use]
    pub fn new(info: &GameInfo, seed: u64) -> Self {
        Self::builder(info).seed(seed).start()
    }

    pub fn builder(info: &GameInfo) -> GameBuilder<'_> {
        GameBuilder {
            info,
            variant: None,
            seed: None,
            options: GameOptions::default(),
            observer: Box::new(NullObserver),
        }
    }

    fn start_game(&mut self) {
        let deck = self.variant.layout.deck;
        assert_eq!(
            deck.total_cards(),
            self.info.ncards(),
            "{}: layout deck does not match the descriptor",
            self.info.name
        );
        let mut cards = deck.create_cards();
        self.state.rng_mut().shuffle(&mut cards);
        let cards = self.variant.shuffle_hook.apply(cards);
        let talon = self.talon();
        self.state.stacks.set_cards(talon, cards);

        self.dealing = true;
        let script = self.variant.deal;
        script.run(self);
        self.dealing = false;

        if self.variant.talon.exhausts_on_start() {
            let left = self.state.stack(talon).len();
            assert!(left == 0, "{}: {left} cards left in the talon after the deal", self.info.name);
        }
        self.log.clear();
        info!(game = self.info.id, name = %self.info.name, seed = self.seed(), "game started");
    }

    // === Accessors ===

    #[must_use]
    pub fn info(&self) -> &GameInfo {
        &self.info
    }

    #[must_use]
    pub fn variant(&self) -> &VariantDef {
        &self.variant
    }

    #[must_use]
    pub fn state(&self) -> &GameState {
        &self.state
    }

    /// Direct table access for arranging positions in tests.
    #[cfg(test)]
    pub(crate) fn state_mut(&mut self) -> &mut GameState {
        &mut self.state
    }

    #[must_use]
    pub fn options(&self) -> &GameOptions {
        &self.options
    }

    pub fn set_options(&mut self, options: GameOptions) {
        self.options = options;
    }

    pub fn set_observer(&mut self, observer: Box<dyn GameObserver>) {
        self.observer = observer;
    }

    #[must_use]
    pub fn seed(&self) -> u64 {
        self.state.rng().seed()
    }

    #[must_use]
    pub fn log(&self) -> &MoveLog {
        &self.log
    }

    #[must_use]
    pub fn round(&self) -> u32 {
        self.state.round
    }

    #[must_use]
    pub fn stack(&self, id: StackId) -> &Stack {
        self.state.stack(id)
    }

    /// Every game has a talon; it is always the first stack.
    #[must_use]
    pub fn talon(&self) -> StackId {
        self.state.stacks.talon().unwrap_or(StackId(0))
    }

    #[must_use]
    pub fn waste(&self) -> Option<StackId> {
        self.state.stacks.waste()
    }

    #[must_use]
    pub fn foundations(&self) -> &[StackId] {
        self.state.stacks.foundations()
    }

    #[must_use]
    pub fn rows(&self) -> &[StackId] {
        self.state.stacks.rows()
    }

    #[must_use]
    pub fn reserves(&self) -> &[StackId] {
        self.state.stacks.reserves()
    }

    #[must_use]
    pub fn internals(&self) -> &[StackId] {
        self.state.stacks.internals()
    }

    #[must_use]
    pub fn is_won(&self) -> bool {
        self.variant.win.is_won(&self.state)
    }

    /// Would the UI highlight these two cards as belonging together?
    #[must_use]
    pub fn shall_highlight_match(&self, a: &Card, b: &Card) -> bool {
        self.variant.highlight.matches(a, b)
    }

    /// Quick-play weight of moving from `from` onto `to`.
    #[must_use]
    pub fn quick_play_score(&self, from: StackId, to: StackId) -> i32 {
        self.variant.quick_play.score(&self.state, from, to)
    }

    // === Primitives ===

    /// Move the top `ncards` of `from` onto `to` without consulting the
    /// acceptance rules.
    ///
    /// Only the table's shape is checked: the cards must exist and `to` must
    /// have room. Nothing changes on error.
    pub fn move_cards(
        &mut self,
        ncards: usize,
        from: StackId,
        to: StackId,
        frames: i32,
    ) -> Result<(), MoveRejected> {
        if from == to {
            return Err(MoveRejected::SameStack { stack: from });
        }
        let src = self.state.stack(from);
        if src.is_empty() {
            return Err(MoveRejected::EmptySource { stack: from });
        }
        if ncards == 0 || ncards > src.len() {
            return Err(MoveRejected::CannotMove { stack: from, ncards });
        }
        let dst = self.state.stack(to);
        if dst.len() + ncards > dst.caps.max_cards {
            return Err(MoveRejected::StackFull { stack: to });
        }
        self.push(Atom::Move { from, to, ncards }, frames);
        Ok(())
    }

    /// Turn the top card of any non-empty stack.
    pub fn flip(&mut self, stack: StackId) -> Result<(), MoveRejected> {
        if self.state.stack(stack).is_empty() {
            return Err(MoveRejected::CannotFlip { stack });
        }
        self.push(Atom::Flip { stack }, 0);
        Ok(())
    }

    /// Reorder a stack with the game's RNG.
    pub fn shuffle_stack(&mut self, stack: StackId) {
        let before = self.state.stack(stack).cards.clone();
        let mut rng = self.state.rng().clone();
        let rng_before = rng.state();
        let mut after = before.clone();
        rng.shuffle(&mut after);
        self.push(
            Atom::Shuffle {
                stack,
                before,
                after,
                rng_before,
                rng_after: rng.state(),
            },
            0,
        );
    }

    /// Advance the talon round counter.
    pub fn next_round(&mut self) {
        let before = self.state.round;
        debug!(game = self.info.id, round = before + 1, "next round");
        self.push(
            Atom::NextRound {
                before,
                after: before + 1,
            },
            0,
        );
    }

    /// Set an auxiliary value through the history.
    pub fn update_model(&mut self, key: &str, value: i64) {
        let old = self.state.get_aux(key, 0);
        if old != value {
            self.push(
                Atom::UpdateModel {
                    key: key.to_string(),
                    old,
                    new: value,
                },
                0,
            );
        }
    }

    /// Draw from the game's RNG outside of a shuffle.
    ///
    /// The draws are recorded so undo and replay see the same stream.
    pub fn with_rng<T>(&mut self, f: impl FnOnce(&mut GameRng) -> T) -> T {
        let mut rng = self.state.rng().clone();
        let before = rng.state();
        let out = f(&mut rng);
        let after = rng.state();
        if before != after {
            self.push(Atom::Reseed { before, after }, 0);
        }
        out
    }

    /// Move cards as part of a deal or redeal.
    ///
    /// Deals place cards physically and may go past `max_cards` (Carthage
    /// piles six cards on one-card reserves); only the source is checked.
    pub(crate) fn transfer(&mut self, ncards: usize, from: StackId, to: StackId, frames: i32) {
        let have = self.state.stack(from).len();
        assert!(
            have >= ncards,
            "{}: {from} holds {have} cards, moving {ncards}",
            self.info.name
        );
        self.push(Atom::Move { from, to, ncards }, frames);
    }

    fn push(&mut self, atom: Atom, frames: i32) {
        if let Err(err) = self.state.apply(&atom) {
            panic!("{}: {err}", self.info.name);
        }
        self.notify(&atom, false, frames);
        if self.log.is_open() {
            self.log.record(atom);
        } else if !self.dealing && self.log.begin().is_ok() {
            self.log.record(atom);
            self.log.commit();
        }
    }

    fn notify(&mut self, atom: &Atom, reverse: bool, frames: i32) {
        let frames = if frames < 0 {
            self.options.animation_frames
        } else {
            frames
        };
        match atom {
            Atom::Move { from, to, ncards } => {
                let (from, to) = if reverse { (*to, *from) } else { (*from, *to) };
                let cards = self.state.stack(to).top_cards(*ncards).unwrap_or(&[]);
                self.observer.on_move(from, to, cards, frames);
            }
            Atom::Flip { stack } => {
                if let Some(card) = self.state.stack(*stack).top() {
                    self.observer.on_flip(*stack, card);
                }
            }
            Atom::Shuffle { stack, .. } => self.observer.on_shuffle(*stack),
            Atom::NextRound { .. } | Atom::UpdateModel { .. } | Atom::Reseed { .. } => {}
        }
    }

    pub(crate) fn play_sample(&mut self, sample: Sample, priority: i32) {
        if self.options.demo && sample == Sample::Drop {
            return;
        }
        self.observer.play_sample(sample, priority);
    }

    pub(crate) fn start_deal_sample(&mut self) {
        self.observer.play_sample(Sample::Deal, 250);
    }

    pub(crate) fn stop_deal_sample(&mut self) {
        self.observer.stop_samples();
    }

    // === Deal Helpers ===

    /// Deal one talon card to each stack in `rows`.
    ///
    /// Each card is turned to match `flip` first. Panics if the talon runs
    /// short.
    pub fn deal_row(&mut self, rows: &[StackId], flip: bool, reverse: bool, frames: i32) -> usize {
        let talon = self.talon();
        let have = self.state.stack(talon).len();
        assert!(
            have >= rows.len(),
            "{}: talon holds {have} cards, dealing {}",
            self.info.name,
            rows.len()
        );
        self.deal_from(talon, rows, flip, reverse, frames)
    }

    /// Like `deal_row` but stops quietly when the talon runs out.
    pub fn deal_row_avail(
        &mut self,
        rows: &[StackId],
        flip: bool,
        reverse: bool,
        frames: i32,
    ) -> usize {
        let talon = self.talon();
        let n = rows.len().min(self.state.stack(talon).len());
        let rows: Vec<StackId> = if reverse {
            rows.iter().rev().take(n).copied().collect()
        } else {
            rows[..n].to_vec()
        };
        self.deal_from(talon, &rows, flip, false, frames)
    }

    fn deal_from(
        &mut self,
        source: StackId,
        rows: &[StackId],
        flip: bool,
        reverse: bool,
        frames: i32,
    ) -> usize {
        let order: Vec<StackId> = if reverse {
            rows.iter().rev().copied().collect()
        } else {
            rows.to_vec()
        };
        for &row in &order {
            self.turn_face(source, flip);
            self.transfer(1, source, row, frames);
        }
        order.len()
    }

    pub(crate) fn turn_face(&mut self, stack: StackId, face_up: bool) {
        if self.state.stack(stack).top().is_some_and(|c| c.face_up != face_up) {
            self.push(Atom::Flip { stack }, 0);
        }
    }

    /// Deal from `source` to each of `stacks` in turn; cards a foundation
    /// accepts go there and the deal to that stack continues.
    pub fn deal_to_stacks_or_foundations(
        &mut self,
        source: StackId,
        stacks: &[StackId],
        flip: bool,
        reverse: bool,
        frames: i32,
    ) -> usize {
        let order: Vec<StackId> = if reverse {
            stacks.iter().rev().copied().collect()
        } else {
            stacks.to_vec()
        };
        let mut dealt = 0;
        for &target in &order {
            loop {
                if flip {
                    self.turn_face(source, true);
                }
                let Some(card) = self.state.stack(source).top().copied() else {
                    return dealt;
                };
                let dest = self
                    .foundations()
                    .iter()
                    .copied()
                    .find(|&f| self.state.accepts_cards(f, source, &[card]))
                    .unwrap_or(target);
                self.transfer(1, source, dest, frames);
                dealt += 1;
                if dest == target {
                    break;
                }
            }
        }
        dealt
    }

    /// Turn up to `n` talon cards onto the waste.
    pub fn deal_to_waste(&mut self, n: usize) -> usize {
        let Some(waste) = self.waste() else {
            return 0;
        };
        let talon = self.talon();
        let n = n.min(self.state.stack(talon).len());
        for _ in 0..n {
            self.turn_face(talon, true);
            self.transfer(1, talon, waste, -1);
        }
        n
    }

    // === Player Actions ===

    /// Move `ncards` from `from` to `to` if the rules allow it.
    pub fn try_move(&mut self, ncards: usize, from: StackId, to: StackId) -> Result<(), MoveRejected> {
        if self.log.is_open() {
            return Err(MoveRejected::ActionInProgress);
        }
        if from == to {
            return Err(MoveRejected::SameStack { stack: from });
        }
        let src = self.state.stack(from);
        if src.is_empty() {
            return Err(MoveRejected::EmptySource { stack: from });
        }
        let Some(cards) = src.top_cards(ncards).filter(|_| src.can_move_cards(ncards)) else {
            return Err(MoveRejected::CannotMove { stack: from, ncards });
        };
        if !self.state.accepts_cards(to, from, cards) {
            return Err(MoveRejected::NotAccepted { from, to });
        }
        self.act(|g| g.play_move(ncards, from, to))?;
        self.play_sample(Sample::Drop, 200);
        Ok(())
    }

    fn play_move(&mut self, ncards: usize, from: StackId, to: StackId) -> Result<(), MoveRejected> {
        let draw = self.variant.move_hook == MoveHook::DrawUnder
            && self.state.stack(to).policy == AcceptPolicy::DrawReserve;
        if !draw {
            return self.move_cards(ncards, from, to, -1);
        }
        let target = self
            .state
            .draw_target(from)
            .ok_or(MoveRejected::NotAccepted { from, to })?;
        self.move_cards(1, from, to, -1)?;
        self.update_model(DRAW_DONE, 1);
        self.play_sample(Sample::Drop, 200);
        self.move_cards(1, from, target, -1)?;
        self.move_cards(1, to, from, -1)
    }

    /// Play the top of `from` to its best destination.
    ///
    /// A foundation that takes the top card wins outright. Otherwise the
    /// largest movable pile goes to the row or reserve with the highest
    /// quick-play score; negative scores are never used.
    pub fn quick_play(&mut self, from: StackId) -> Result<StackId, MoveRejected> {
        if self.log.is_open() {
            return Err(MoveRejected::ActionInProgress);
        }
        let src = self.state.stack(from);
        let Some(&top) = src.top() else {
            return Err(MoveRejected::EmptySource { stack: from });
        };
        if src.can_move_cards(1) {
            let target = self
                .foundations()
                .iter()
                .copied()
                .find(|&f| self.state.accepts_cards(f, from, &[top]));
            if let Some(f) = target {
                self.try_move(1, from, f)?;
                return Ok(f);
            }
        }

        let mut best: Option<(i32, usize, StackId)> = None;
        for n in (1..=src.movable_pile_len()).rev() {
            let Some(pile) = src.top_cards(n) else {
                continue;
            };
            for &to in self.rows().iter().chain(self.reserves()) {
                if !self.state.accepts_cards(to, from, pile) {
                    continue;
                }
                let score = self.quick_play_score(from, to);
                if score >= 0 && best.map_or(true, |(s, _, _)| score > s) {
                    best = Some((score, n, to));
                }
            }
            if best.is_some() {
                break;
            }
        }
        let (_, n, to) = best.ok_or(MoveRejected::CannotMove { stack: from, ncards: 1 })?;
        self.try_move(n, from, to)?;
        Ok(to)
    }

    /// Whether the talon can deal right now.
    #[must_use]
    pub fn can_deal_cards(&self) -> bool {
        self.variant.talon.can_deal(self)
    }

    /// Deal, turn or redeal the talon as one history entry.
    ///
    /// Returns the number of cards dealt.
    pub fn deal_cards(&mut self) -> Result<usize, MoveRejected> {
        if self.log.is_open() {
            return Err(MoveRejected::ActionInProgress);
        }
        let talon = self.variant.talon;
        if !talon.can_deal(self) {
            return Err(talon.refusal(self));
        }
        self.act(|g| talon.deal(g))
    }

    /// Turn a face-down top card the player clicked.
    pub fn flip_top(&mut self, stack: StackId) -> Result<(), MoveRejected> {
        if self.log.is_open() {
            return Err(MoveRejected::ActionInProgress);
        }
        if !self.state.stack(stack).can_flip_top() {
            return Err(MoveRejected::CannotFlip { stack });
        }
        self.act(|g| g.flip(stack))?;
        self.play_sample(Sample::Flip, 200);
        Ok(())
    }

    /// Run `f` as a single undoable action.
    ///
    /// `f` drives the primitives. If it returns an error everything it did
    /// is reverted.
    pub fn perform<T>(
        &mut self,
        f: impl FnOnce(&mut Self) -> Result<T, MoveRejected>,
    ) -> Result<T, MoveRejected> {
        self.act(f)
    }

    fn act<T>(
        &mut self,
        f: impl FnOnce(&mut Self) -> Result<T, MoveRejected>,
    ) -> Result<T, MoveRejected> {
        self.log.begin()?;
        match f(self) {
            Ok(value) => {
                self.finish_action();
                Ok(value)
            }
            Err(err) => {
                self.rollback();
                Err(err)
            }
        }
    }

    fn finish_action(&mut self) {
        self.run_fill_hook();
        if self.options.autoflip {
            self.autoflip();
        }
        self.log.commit();
        self.check_win();
    }

    fn rollback(&mut self) {
        let Some(entry) = self.log.abort() else {
            return;
        };
        self.revert_entry(&entry);
    }

    fn run_fill_hook(&mut self) {
        let FillHook::RefillFromReserve(n) = self.variant.fill else {
            return;
        };
        let Some(&reserve) = self.reserves().first() else {
            return;
        };
        let rows = self.rows().to_vec();
        for row in rows {
            if self.state.stack(row).is_empty() && !self.state.stack(reserve).is_empty() {
                self.deal_to_stacks_or_foundations(reserve, &vec![row; n], true, false, -1);
            }
        }
    }

    fn autoflip(&mut self) {
        let stacks: Vec<StackId> = self.rows().iter().chain(self.reserves()).copied().collect();
        for stack in stacks {
            if self.state.stack(stack).can_flip_top() {
                self.push(Atom::Flip { stack }, -1);
                self.play_sample(Sample::AutoFlip, 15);
            }
        }
    }

    fn check_win(&mut self) {
        if self.won_notified || !self.is_won() {
            return;
        }
        self.won_notified = true;
        let perfect = !self.undo_used;
        info!(game = self.info.id, seed = self.seed(), perfect, "game won");
        self.observer.on_win(perfect);
        let sample = if perfect {
            Sample::GamePerfect
        } else {
            Sample::GameWon
        };
        self.observer.play_sample(sample, 1000);
    }

    // === Undo / Redo ===

    #[must_use]
    pub fn can_undo(&self) -> bool {
        self.log.can_undo()
    }

    #[must_use]
    pub fn can_redo(&self) -> bool {
        self.log.can_redo()
    }

    /// Revert the last action.
    pub fn undo(&mut self) -> Result<(), MoveRejected> {
        if self.log.is_open() {
            return Err(MoveRejected::ActionInProgress);
        }
        let entry = self.log.step_back().ok_or(MoveRejected::NothingToUndo)?;
        self.revert_entry(&entry);
        self.undo_used = true;
        if !self.is_won() {
            self.won_notified = false;
        }
        debug!(game = self.info.id, seq = entry.seq, "undo");
        self.observer.play_sample(Sample::Undo, 10);
        Ok(())
    }

    /// Re-apply the last undone action.
    pub fn redo(&mut self) -> Result<(), MoveRejected> {
        if self.log.is_open() {
            return Err(MoveRejected::ActionInProgress);
        }
        let entry = self.log.step_forward().ok_or(MoveRejected::NothingToRedo)?;
        for atom in &entry.atoms {
            if let Err(err) = self.state.apply(atom) {
                panic!("{}: redo of entry {}: {err}", self.info.name, entry.seq);
            }
            self.notify(atom, false, 0);
        }
        debug!(game = self.info.id, seq = entry.seq, "redo");
        self.observer.play_sample(Sample::Redo, 10);
        self.check_win();
        Ok(())
    }

    fn revert_entry(&mut self, entry: &HistoryEntry) {
        for atom in entry.atoms.iter().rev() {
            if let Err(err) = self.state.revert(atom) {
                panic!("{}: revert of entry {}: {err}", self.info.name, entry.seq);
            }
            self.notify(atom, true, 0);
        }
    }

    // === Hints ===

    /// Legal moves ranked by the variant's hint policy, best first.
    #[must_use]
    pub fn hints(&self) -> Vec<Hint> {
        hint::compute(&self.state, &self.variant)
    }

    /// No hint, no deal, and not won.
    #[must_use]
    pub fn is_stuck(&self) -> bool {
        !self.is_won() && !self.can_deal_cards() && self.hints().is_empty()
    }

    // === Persistence Support ===

    /// Replace the history and replay its applied entries silently.
    pub(crate) fn replay_history(
        &mut self,
        entries: Vec<HistoryEntry>,
        cursor: usize,
    ) -> Result<(), crate::core::LoadError> {
        for (index, entry) in entries.iter().take(cursor).enumerate() {
            for atom in &entry.atoms {
                self.state
                    .apply(atom)
                    .map_err(|err| crate::core::LoadError::ReplayFailed {
                        index,
                        message: err.message,
                    })?;
            }
        }
        self.log = MoveLog::from_parts(entries, cursor);
        self.won_notified = self.is_won();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::games;
    use crate::registry::GameManager;

    fn manager() -> GameManager {
        games::builtin_manager()
    }

    fn first_move(game: &Game) -> Option<Hint> {
        game.hints().into_iter().next()
    }

    #[test]
    fn test_fan_deal_exhausts_talon() {
        let manager = manager();
        let game = Game::new(manager.get(56).unwrap(), 7);
        assert!(game.stack(game.talon()).is_empty());
        let lens: Vec<usize> = game.rows().iter().map(|&r| game.stack(r).len()).collect();
        assert_eq!(lens.len(), 18);
        assert_eq!(lens[..17], [3; 17]);
        assert_eq!(lens[17], 1);
        assert!(game.log().is_empty());
    }

    #[test]
    fn test_refused_move_leaves_no_trace() {
        let manager = manager();
        let mut game = Game::new(manager.get(56).unwrap(), 11);
        let r0 = game.rows()[0];
        let before = game.state().stacks.snapshot();

        assert_eq!(game.try_move(1, r0, r0), Err(MoveRejected::SameStack { stack: r0 }));
        let f0 = game.foundations()[0];
        assert_eq!(game.try_move(1, f0, r0), Err(MoveRejected::EmptySource { stack: f0 }));
        assert_eq!(
            game.try_move(2, r0, game.rows()[1]),
            Err(MoveRejected::CannotMove { stack: r0, ncards: 2 })
        );
        assert_eq!(game.state().stacks.snapshot(), before);
        assert!(game.log().is_empty());
    }

    #[test]
    fn test_move_then_undo_redo() {
        let manager = manager();
        let mut game = Game::new(manager.get(19).unwrap(), 3);
        let hint = first_move(&game).expect("yukon deal has a move");
        let before = game.state().stacks.snapshot();

        game.try_move(hint.ncards, hint.from, hint.to).unwrap();
        let after = game.state().stacks.snapshot();
        assert_eq!(game.log().cursor(), 1);

        game.undo().unwrap();
        assert_eq!(game.state().stacks.snapshot(), before);
        assert_eq!(game.undo(), Err(MoveRejected::NothingToUndo));

        game.redo().unwrap();
        assert_eq!(game.state().stacks.snapshot(), after);
        assert_eq!(game.redo(), Err(MoveRejected::NothingToRedo));
    }

    #[test]
    fn test_perform_rolls_back_on_error() {
        let manager = manager();
        let mut game = Game::new(manager.get(19).unwrap(), 5);
        let before = game.state().stacks.snapshot();
        let r0 = game.rows()[0];
        let r1 = game.rows()[1];
        let talon = game.talon();

        let result = game.perform(|g| {
            g.move_cards(1, r1, r0, 0)?;
            g.move_cards(1, talon, r0, 0)
        });
        assert_eq!(result, Err(MoveRejected::EmptySource { stack: talon }));
        assert_eq!(game.state().stacks.snapshot(), before);
        assert!(!game.can_undo());
    }

    #[test]
    fn test_update_model_is_recorded() {
        let manager = manager();
        let mut game = Game::new(manager.get(128).unwrap(), 5);
        game.perform(|g| {
            g.update_model(DRAW_DONE, 1);
            Ok(())
        })
        .unwrap();
        assert_eq!(game.state().get_aux(DRAW_DONE, 0), 1);
        game.undo().unwrap();
        assert_eq!(game.state().get_aux(DRAW_DONE, 0), 0);
    }

    #[test]
    fn test_stray_primitive_gets_its_own_entry() {
        let manager = manager();
        let mut game = Game::new(manager.get(19).unwrap(), 5);
        game.next_round();
        assert_eq!(game.round(), 2);
        assert_eq!(game.log().cursor(), 1);
        game.undo().unwrap();
        assert_eq!(game.round(), 1);
    }

    #[test]
    fn test_move_cards_respects_max_cards() {
        let manager = manager();
        let mut game = Game::new(manager.get(321).unwrap(), 9);
        let r0 = game.rows()[0];
        let reserve = game.reserves()[0];
        // Carthage deals six cards onto one-card reserves.
        assert_eq!(game.stack(reserve).len(), 6);
        let before = game.state().stacks.snapshot();
        assert_eq!(
            game.move_cards(1, r0, reserve, 0),
            Err(MoveRejected::StackFull { stack: reserve })
        );
        assert_eq!(
            game.move_cards(0, r0, reserve, 0),
            Err(MoveRejected::CannotMove { stack: r0, ncards: 0 })
        );
        assert_eq!(game.state().stacks.snapshot(), before);
        assert!(game.log().is_empty());
    }
}
