//! Presentation and audio hooks.
//!
//! The engine calls these fire-and-forget after every applied atom and at
//! the sound trigger points. Observers never influence the outcome of a
//! move and must not call back into the game.

use crate::cards::Card;
use crate::core::StackId;

/// Named sound events.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Sample {
    Deal,
    DealWaste,
    TurnWaste,
    Drop,
    DropPair,
    AutoDrop,
    AutoFlip,
    AutoPilotWon,
    AutoPilotLost,
    Flip,
    Move,
    NoMove,
    Undo,
    Redo,
    Redeal,
    GameFinished,
    GameLost,
    GameWon,
    GamePerfect,
    StartDrag,
}

impl Sample {
    /// Sample name as the sound collaborator knows it.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Deal => "deal",
            Self::DealWaste => "dealwaste",
            Self::TurnWaste => "turnwaste",
            Self::Drop => "drop",
            Self::DropPair => "droppair",
            Self::AutoDrop => "autodrop",
            Self::AutoFlip => "autoflip",
            Self::AutoPilotWon => "autopilotwon",
            Self::AutoPilotLost => "autopilotlost",
            Self::Flip => "flip",
            Self::Move => "move",
            Self::NoMove => "nomove",
            Self::Undo => "undo",
            Self::Redo => "redo",
            Self::Redeal => "redeal",
            Self::GameFinished => "gamefinished",
            Self::GameLost => "gamelost",
            Self::GameWon => "gamewon",
            Self::GamePerfect => "gameperfect",
            Self::StartDrag => "startdrag",
        }
    }
}

impl std::fmt::Display for Sample {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Receiver for move notifications and sound requests.
///
/// Every method has an empty default so observers implement only what they
/// present.
pub trait GameObserver {
    /// `cards` were moved from `from` onto `to`.
    fn on_move(&mut self, _from: StackId, _to: StackId, _cards: &[Card], _frames: i32) {}

    /// The top card of `stack` was turned; `card` shows its new face.
    fn on_flip(&mut self, _stack: StackId, _card: &Card) {}

    /// `stack` was reordered.
    fn on_shuffle(&mut self, _stack: StackId) {}

    /// The game was won. Fires once per win.
    fn on_win(&mut self, _perfect: bool) {}

    fn play_sample(&mut self, _sample: Sample, _priority: i32) {}

    /// Stop any looping sample (the deal loop).
    fn stop_samples(&mut self) {}
}

/// Observer that ignores everything.
#[derive(Clone, Copy, Debug, Default)]
pub struct NullObserver;

impl GameObserver for NullObserver {}
