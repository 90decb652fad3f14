//! Built-in game families.
//!
//! Each family module exposes one constructor per variant returning its
//! `VariantDef`, plus a `register` function adding the family's
//! descriptors to a `GameManager`.

pub mod algerian;
pub mod fan;
pub mod harp;
pub mod montana;
pub mod yukon;

use crate::core::GameInfoError;
use crate::registry::GameManager;

/// Register every built-in family.
pub fn register_all(manager: &mut GameManager) -> Result<(), GameInfoError> {
    fan::register(manager)?;
    montana::register(manager)?;
    algerian::register(manager)?;
    yukon::register(manager)?;
    harp::register(manager)
}

/// A fresh, unsealed catalog holding the built-in games.
///
/// Panics if a built-in descriptor is rejected; that is a bug in this
/// crate, not a runtime condition.
#[must_use]
pub fn builtin_manager() -> GameManager {
    let mut manager = GameManager::new();
    if let Err(err) = register_all(&mut manager) {
        panic!("built-in game rejected: {err}");
    }
    manager
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::Game;
    use crate::registry::GameType;

    #[test]
    fn test_builtin_catalog() {
        let m = builtin_manager();
        assert_eq!(m.len(), 60);
        assert_eq!(m.registered_type_count(GameType::Fan), 16);
        assert_eq!(m.registered_type_count(GameType::Montana), 8);
        assert_eq!(m.registered_type_count(GameType::Yukon), 23);
        assert_eq!(m.get_by_name("Midnight Oil").unwrap().id, 901);
        assert!(m.is_popular(19));
    }

    #[test]
    fn test_every_builtin_deals() {
        let m = builtin_manager();
        for &id in m.ids_by_id() {
            let gi = m.get(id).unwrap();
            let game = Game::new(gi, 1234);
            let cards = game.state().stacks.total_cards();
            assert_eq!(cards, gi.ncards(), "{}", gi.name);
            assert!(!game.is_won(), "{}", gi.name);
        }
    }
}
