//! Save and restore games in progress.
//!
//! A save records the seed, the whole history (redo tail included) and the
//! resulting position. Loading rebuilds the deal from the seed, replays the
//! applied entries and then checks the replayed position against the saved
//! one, so a save written by an incompatible build is refused instead of
//! producing a corrupt game.
//!
//! ## Format
//!
//! `SaveGame` is serialized with bincode. `SAVE_VERSION` changes whenever
//! the layout of `SaveGame` or of the history atoms changes.

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use super::Game;
use crate::core::{HistoryEntry, LoadError};
use crate::registry::GameManager;
use crate::stacks::StackSnapshot;

/// Current save format version.
pub const SAVE_VERSION: u32 = 1;

/// Everything needed to rebuild a game in progress.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SaveGame {
    pub version: u32,
    pub game_id: u32,
    /// Variant class the game was created from.
    pub class: String,
    pub seed: u64,
    /// Post-shuffle rearrangement in effect when the game was dealt.
    pub shuffle_hook: String,
    pub entries: Vec<HistoryEntry>,
    pub cursor: usize,
    pub round: u32,
    /// The variant's auxiliary fields, sorted by key.
    pub aux: Vec<(String, i64)>,
    pub snapshot: Vec<StackSnapshot>,
}

impl SaveGame {
    /// Capture `game` as it stands.
    #[must_use]
    pub fn from_game(game: &Game) -> Self {
        let state = game.state();
        let mut aux: Vec<(String, i64)> = game
            .variant()
            .aux_fields
            .iter()
            .map(|&key| (key.to_owned(), state.get_aux(key, 0)))
            .collect();
        aux.sort();
        Self {
            version: SAVE_VERSION,
            game_id: game.info().id,
            class: game.info().class.to_owned(),
            seed: game.seed(),
            shuffle_hook: format!("{:?}", game.variant().shuffle_hook),
            entries: game.log().entries().cloned().collect(),
            cursor: game.log().cursor(),
            round: state.round,
            aux,
            snapshot: state.stacks.snapshot(),
        }
    }

    pub fn to_bytes(&self) -> Result<Vec<u8>, LoadError> {
        bincode::serialize(self).map_err(|err| LoadError::Encode {
            message: err.to_string(),
        })
    }

    /// Decode a save and check its format version.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, LoadError> {
        let save: Self = bincode::deserialize(bytes)?;
        if save.version != SAVE_VERSION {
            return Err(LoadError::VersionMismatch {
                found: save.version,
                expected: SAVE_VERSION,
            });
        }
        Ok(save)
    }

    /// Rebuild the game this save describes.
    pub fn restore(&self, manager: &GameManager) -> Result<Game, LoadError> {
        let result = self.rebuild(manager);
        match &result {
            Ok(_) => info!(
                game = self.game_id,
                seed = self.seed,
                entries = self.entries.len(),
                cursor = self.cursor,
                "game restored"
            ),
            Err(err) => warn!(game = self.game_id, seed = self.seed, %err, "refusing saved game"),
        }
        result
    }

    fn rebuild(&self, manager: &GameManager) -> Result<Game, LoadError> {
        if self.version != SAVE_VERSION {
            return Err(LoadError::VersionMismatch {
                found: self.version,
                expected: SAVE_VERSION,
            });
        }
        let info = manager
            .get(self.game_id)
            .ok_or(LoadError::UnknownGame { id: self.game_id })?;
        if info.class != self.class {
            return Err(LoadError::ClassMismatch {
                saved: self.class.clone(),
                current: info.class.to_owned(),
            });
        }
        if self.cursor > self.entries.len() {
            return Err(LoadError::StateMismatch {
                detail: format!("cursor {} past {} entries", self.cursor, self.entries.len()),
            });
        }

        let mut game = Game::new(info, self.seed);
        let hook = format!("{:?}", game.variant().shuffle_hook);
        if hook != self.shuffle_hook {
            return Err(LoadError::StateMismatch {
                detail: format!("shuffle hook {hook}, saved {}", self.shuffle_hook),
            });
        }
        game.replay_history(self.entries.clone(), self.cursor)?;
        self.verify(&game)?;
        self.check_redo_tail(&game)?;
        Ok(game)
    }

    /// Redo must be able to replay every undone entry from here.
    fn check_redo_tail(&self, game: &Game) -> Result<(), LoadError> {
        let mut sim = game.state().clone();
        for (index, entry) in self.entries.iter().enumerate().skip(self.cursor) {
            for atom in &entry.atoms {
                sim.apply(atom).map_err(|err| LoadError::ReplayFailed {
                    index,
                    message: err.message,
                })?;
            }
        }
        Ok(())
    }

    fn verify(&self, game: &Game) -> Result<(), LoadError> {
        let state = game.state();
        if state.round != self.round {
            return Err(LoadError::StateMismatch {
                detail: format!("round {}, saved {}", state.round, self.round),
            });
        }
        for &key in game.variant().aux_fields {
            let saved = self
                .aux
                .iter()
                .find(|(k, _)| k == key)
                .map(|&(_, v)| v)
                .ok_or_else(|| LoadError::MissingAuxField { key: key.to_owned() })?;
            let replayed = state.get_aux(key, 0);
            if saved != replayed {
                return Err(LoadError::StateMismatch {
                    detail: format!("{key} is {replayed}, saved {saved}"),
                });
            }
        }
        let snapshot = state.stacks.snapshot();
        if snapshot.len() != self.snapshot.len() {
            return Err(LoadError::StateMismatch {
                detail: format!("{} stacks, saved {}", snapshot.len(), self.snapshot.len()),
            });
        }
        if let Some((now, saved)) = snapshot.iter().zip(&self.snapshot).find(|(a, b)| a != b) {
            return Err(LoadError::StateMismatch {
                detail: format!(
                    "{} holds {} cards, saved {} holds {}",
                    now.id,
                    now.cards.len(),
                    saved.id,
                    saved.cards.len()
                ),
            });
        }
        Ok(())
    }
}

impl Game {
    /// Serialize this game.
    pub fn save(&self) -> Result<Vec<u8>, LoadError> {
        SaveGame::from_game(self).to_bytes()
    }

    /// Decode `bytes` and rebuild the saved game against `manager`.
    pub fn load(manager: &GameManager, bytes: &[u8]) -> Result<Self, LoadError> {
        SaveGame::from_bytes(bytes)?.restore(manager)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{Atom, MoveRejected, DRAW_DONE};
    use crate::games::builtin_manager;

    fn play_hints(game: &mut Game, n: usize) {
        for _ in 0..n {
            let Some(hint) = game.hints().into_iter().next() else {
                break;
            };
            game.try_move(hint.ncards, hint.from, hint.to).unwrap();
        }
    }

    #[test]
    fn test_round_trip_keeps_redo_tail() {
        let m = builtin_manager();
        let mut game = Game::new(m.get(19).unwrap(), 42);
        play_hints(&mut game, 4);
        let played = game.log().cursor();
        assert!(played > 0);
        game.undo().unwrap();

        let bytes = game.save().unwrap();
        let mut loaded = Game::load(&m, &bytes).unwrap();
        assert_eq!(loaded.state().stacks.snapshot(), game.state().stacks.snapshot());
        assert_eq!(loaded.log().cursor(), played - 1);
        assert_eq!(loaded.log().len(), played);

        loaded.redo().unwrap();
        game.redo().unwrap();
        assert_eq!(loaded.state().stacks.snapshot(), game.state().stacks.snapshot());
    }

    #[test]
    fn test_broken_redo_tail_is_refused() {
        let m = builtin_manager();
        let mut game = Game::new(m.get(19).unwrap(), 42);
        play_hints(&mut game, 2);
        game.undo().unwrap();

        let mut save = SaveGame::from_game(&game);
        assert!(save.cursor < save.entries.len());
        let (r0, r1) = (game.rows()[0], game.rows()[1]);
        let tail = save.entries.last_mut().unwrap();
        tail.atoms.clear();
        tail.atoms.push(Atom::Move {
            from: r0,
            to: r1,
            ncards: 99,
        });
        let last = save.entries.len() - 1;
        assert!(matches!(
            save.restore(&m),
            Err(LoadError::ReplayFailed { index, .. }) if index == last
        ));
        assert!(matches!(
            Game::load(&m, &save.to_bytes().unwrap()),
            Err(LoadError::ReplayFailed { .. })
        ));
    }

    #[test]
    fn test_round_trip_after_redeal() {
        let m = builtin_manager();
        let mut game = Game::new(m.get(116).unwrap(), 5);
        game.deal_cards().unwrap();
        let loaded = Game::load(&m, &game.save().unwrap()).unwrap();
        assert_eq!(loaded.round(), 2);
        assert_eq!(loaded.state().stacks.snapshot(), game.state().stacks.snapshot());
        assert_eq!(loaded.state().rng().state(), game.state().rng().state());
    }

    #[test]
    fn test_aux_fields_survive() {
        let m = builtin_manager();
        let mut game = Game::new(m.get(128).unwrap(), 5);
        game.perform(|g| {
            g.update_model(DRAW_DONE, 1);
            Ok::<_, MoveRejected>(())
        })
        .unwrap();
        let save = SaveGame::from_game(&game);
        assert_eq!(save.aux, vec![(DRAW_DONE.to_owned(), 1)]);
        let loaded = save.restore(&m).unwrap();
        assert_eq!(loaded.state().get_aux(DRAW_DONE, 0), 1);

        let mut stripped = save;
        stripped.aux.clear();
        assert!(matches!(
            stripped.restore(&m),
            Err(LoadError::MissingAuxField { key }) if key == DRAW_DONE
        ));
    }

    #[test]
    fn test_garbage_is_a_decode_error() {
        let m = builtin_manager();
        assert!(matches!(Game::load(&m, &[1, 2, 3]), Err(LoadError::Decode { .. })));
    }

    #[test]
    fn test_version_mismatch() {
        let m = builtin_manager();
        let game = Game::new(m.get(56).unwrap(), 1);
        let mut save = SaveGame::from_game(&game);
        save.version = SAVE_VERSION + 1;
        let bytes = save.to_bytes().unwrap();
        assert!(matches!(
            SaveGame::from_bytes(&bytes),
            Err(LoadError::VersionMismatch { found, expected }) if found == SAVE_VERSION + 1 && expected == SAVE_VERSION
        ));
    }

    #[test]
    fn test_unknown_game_and_class() {
        let m = builtin_manager();
        let game = Game::new(m.get(56).unwrap(), 1);
        let mut save = SaveGame::from_game(&game);
        save.class = "Shamrocks".into();
        assert!(matches!(save.restore(&m), Err(LoadError::ClassMismatch { .. })));
        save.game_id = 999_998;
        assert!(matches!(save.restore(&m), Err(LoadError::UnknownGame { id: 999_998 })));
    }

    #[test]
    fn test_tampered_snapshot_is_refused() {
        let m = builtin_manager();
        let mut game = Game::new(m.get(19).unwrap(), 8);
        play_hints(&mut game, 2);
        let mut save = SaveGame::from_game(&game);
        let stack = save
            .snapshot
            .iter_mut()
            .find(|s| !s.cards.is_empty())
            .unwrap();
        stack.cards.pop();
        assert!(matches!(save.restore(&m), Err(LoadError::StateMismatch { .. })));

        let mut save = SaveGame::from_game(&game);
        save.round += 1;
        assert!(matches!(save.restore(&m), Err(LoadError::StateMismatch { .. })));

        let mut save = SaveGame::from_game(&game);
        save.cursor = save.entries.len() + 1;
        assert!(matches!(save.restore(&m), Err(LoadError::StateMismatch { .. })));
    }
}
