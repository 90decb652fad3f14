//! Play-through tests across the built-in families: reproducible deals,
//! hint legality, redeals and the autopilot.

mod common;

use rust_solitaire::games;
use rust_solitaire::{AutoPilot, Game, MoveRejected, PilotOutcome};

// =============================================================================
// Deals
// =============================================================================

#[test]
fn test_same_seed_same_deal() {
    common::init_logging();
    let m = games::builtin_manager();
    for &id in m.ids_by_id() {
        let info = m.get(id).unwrap();
        let a = Game::new(info, 2024);
        let b = Game::new(info, 2024);
        assert_eq!(common::snapshot(&a), common::snapshot(&b), "{}", info.name);
        assert_eq!(a.state().rng().state(), b.state().rng().state(), "{}", info.name);
    }
}

#[test]
fn test_different_seeds_differ() {
    let m = games::builtin_manager();
    let info = m.get(19).unwrap();
    let a = Game::new(info, 1);
    let b = Game::new(info, 2);
    assert_ne!(common::snapshot(&a), common::snapshot(&b));
}

// =============================================================================
// Hints
// =============================================================================

#[test]
fn test_every_hint_is_playable() {
    let m = games::builtin_manager();
    for &id in m.ids_by_id() {
        let info = m.get(id).unwrap();
        let mut game = Game::new(info, 77);
        let before = common::snapshot(&game);
        for hint in game.hints() {
            assert!(hint.ncards > 0, "{}", info.name);
            game.try_move(hint.ncards, hint.from, hint.to)
                .unwrap_or_else(|err| panic!("{}: {hint:?} refused: {err}", info.name));
            game.undo().unwrap();
            assert_eq!(common::snapshot(&game), before, "{}", info.name);
        }
    }
}

#[test]
fn test_hints_are_ranked() {
    let m = games::builtin_manager();
    let game = Game::new(m.get(19).unwrap(), 3);
    let hints = game.hints();
    assert!(!hints.is_empty());
    assert!(hints.windows(2).all(|w| w[0].score >= w[1].score));
}

// =============================================================================
// Redeals
// =============================================================================

#[test]
fn test_la_belle_lucie_redeals_twice() {
    let m = games::builtin_manager();
    let mut game = Game::new(m.get_by_name("La Belle Lucie").unwrap(), 9);
    let total = game.state().stacks.total_cards();

    for round in 2..=3 {
        assert!(game.can_deal_cards());
        let n = game.deal_cards().unwrap();
        assert!(n > 0);
        assert_eq!(game.round(), round);
        assert_eq!(game.state().stacks.total_cards(), total);
        assert!(game.stack(game.talon()).is_empty());
    }
    assert!(!game.can_deal_cards());
    assert_eq!(game.deal_cards(), Err(MoveRejected::NoMoreRedeals));

    assert_eq!(common::undo_all(&mut game), 2);
    assert_eq!(game.round(), 1);
}

#[test]
fn test_montana_redeals_until_exhausted() {
    let m = games::builtin_manager();
    let mut game = Game::new(m.get(53).unwrap(), 4);
    game.deal_cards().unwrap();
    game.deal_cards().unwrap();
    assert_eq!(game.round(), 3);
    assert_eq!(game.deal_cards(), Err(MoveRejected::NoMoreRedeals));
    let filled = game.rows().iter().filter(|&&r| !game.stack(r).is_empty()).count();
    assert_eq!(filled, 48);
}

#[test]
fn test_klondike_waste_recycles() {
    let m = games::builtin_manager();
    let mut game = Game::new(m.get(25).unwrap(), 4);
    let talon = game.talon();
    let waste = game.waste().unwrap();
    let stock = game.stack(talon).len();

    while !game.stack(talon).is_empty() {
        game.deal_cards().unwrap();
    }
    let on_waste = game.stack(waste).len();
    assert_eq!(on_waste, stock + 1);

    // Gargantua allows one pass back through the talon.
    game.deal_cards().unwrap();
    assert_eq!(game.round(), 2);
    assert!(game.stack(talon).len() + game.stack(waste).len() >= stock);
    while !game.stack(talon).is_empty() {
        game.deal_cards().unwrap();
    }
    assert_eq!(game.deal_cards(), Err(MoveRejected::NoMoreRedeals));
}

// =============================================================================
// Autopilot
// =============================================================================

#[test]
fn test_autopilot_terminates_and_unwinds() {
    common::init_logging();
    let m = games::builtin_manager();
    for id in [19, 56, 901, 53, 21, 321, 322, 495] {
        let info = m.get(id).unwrap();
        let mut game = Game::new(info, 31);
        let start = common::snapshot(&game);
        let outcome = AutoPilot::new().with_max_steps(150).run(&mut game);
        assert_ne!(outcome, PilotOutcome::Cancelled, "{}", info.name);
        if outcome == PilotOutcome::Won {
            assert!(game.is_won());
        }
        common::undo_all(&mut game);
        assert_eq!(common::snapshot(&game), start, "{}", info.name);
        assert_eq!(game.round(), 1, "{}", info.name);
    }
}
