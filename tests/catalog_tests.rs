//! Catalog integration tests: registration through the public API,
//! sorted views, selection and plugins.

mod common;

use rust_solitaire::games::{self, fan, yukon};
use rust_solitaire::registry::{
    self, GameFlags, GameInfo, GameManager, GameType, PluginDescriptor, Provenance,
    SELECT_GAME_BY_TYPE,
};
use rust_solitaire::{Game, GameInfoError};

fn extra(m: &mut GameManager) -> Result<(), GameInfoError> {
    m.register(GameInfo::new(
        9001,
        "ExtraYukon",
        yukon::yukon,
        "Extra Yukon",
        GameType::Yukon,
        1,
        0,
    ))
}

// =============================================================================
// Built-in catalog
// =============================================================================

#[test]
fn test_builtin_views_are_sorted() {
    common::init_logging();
    let m = games::builtin_manager();

    let ids = m.ids_by_id();
    assert!(ids.windows(2).all(|w| w[0] < w[1]));
    assert_eq!(ids.len(), m.visible().count());

    let names: Vec<String> = m
        .ids_by_name()
        .iter()
        .map(|&id| m.get(id).unwrap().name.to_lowercase())
        .collect();
    assert!(names.windows(2).all(|w| w[0] <= w[1]));

    let alts: Vec<String> = m.altnames_sorted().iter().map(|(_, a)| a.to_lowercase()).collect();
    assert!(alts.windows(2).all(|w| w[0] <= w[1]));
    assert!(m.altnames_sorted().contains(&(901, "Fair Lucy".to_string())));
}

#[test]
fn test_lookup_by_any_name() {
    let m = games::builtin_manager();
    assert_eq!(m.get_by_name("La Belle Lucie").unwrap().id, 901);
    assert_eq!(m.get_by_name("Fair Lucy").unwrap().id, 901);
    assert_eq!(m.get_by_name("Gaps").unwrap().id, 53);
    assert!(m.get_by_name("fair lucy").is_none());
}

#[test]
fn test_type_filters() {
    let m = games::builtin_manager();
    let yukon_type = SELECT_GAME_BY_TYPE
        .iter()
        .find(|f| f.name == "Yukon type")
        .unwrap();
    let ids = m.filter(yukon_type);
    assert_eq!(ids.len(), m.registered_type_count(GameType::Yukon));
    assert!(ids.contains(&19));
    assert!(!ids.contains(&56));
}

#[test]
fn test_rejected_registrations_leave_catalog_untouched() {
    let mut m = games::builtin_manager();
    let before = m.len();

    let dup_id = GameInfo::new(19, "OtherYukon", yukon::yukon, "Other", GameType::Yukon, 1, 0);
    assert_eq!(m.register(dup_id), Err(GameInfoError::DuplicateId { id: 19 }));

    let dup_name = GameInfo::new(9002, "OtherFan", fan::fan, "Fan", GameType::Fan, 1, 0);
    assert_eq!(
        m.register(dup_name),
        Err(GameInfoError::DuplicateName { name: "Fan".into() })
    );

    let bad_id = GameInfo::new(0, "ZeroFan", fan::fan, "Zero Fan", GameType::Fan, 1, 0);
    assert_eq!(m.register(bad_id), Err(GameInfoError::InvalidId { id: 0 }));

    assert_eq!(m.len(), before);

    m.seal();
    let late = GameInfo::new(9003, "LateFan", fan::fan, "Late Fan", GameType::Fan, 1, 0);
    assert_eq!(m.register(late), Err(GameInfoError::RegistrySealed { id: 9003 }));
}

#[test]
fn test_popular_flag_is_folded_in() {
    let m = games::builtin_manager();
    let yukon = m.get(19).unwrap();
    assert!(yukon.flags.contains(GameFlags::POPULAR));
    assert!(m.is_popular(19));
    assert!(!m.is_children(19));
}

#[test]
fn test_selection() {
    let m = games::builtin_manager();
    assert_eq!(m.selected(), None);
    m.set_selected(53).unwrap();
    assert_eq!(m.selected(), Some(53));
    assert_eq!(m.set_selected(4242), Err(GameInfoError::UnknownGame { id: 4242 }));
    assert_eq!(m.selected(), Some(53));
}

// =============================================================================
// Process-wide catalog
// =============================================================================

// The only test in this binary that touches the global catalog.
#[test]
fn test_global_catalog_with_plugin() {
    common::init_logging();
    let catalog = registry::init(&[PluginDescriptor::new("extra", extra)]);
    assert!(catalog.is_sealed());
    assert!(std::ptr::eq(catalog, registry::catalog()));

    let info = catalog.get(9001).unwrap();
    assert_eq!(info.provenance, Provenance::Plugin("extra".into()));
    assert_eq!(catalog.len(), games::builtin_manager().len() + 1);

    let game = Game::new(info, 5);
    assert_eq!(game.state().stacks.total_cards(), 52);
}
