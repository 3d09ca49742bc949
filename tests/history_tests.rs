//! Undo/redo and determinism properties over random operation sequences.
//!
//! The level mixes every movement mechanic plus loose words, so random play
//! forms and breaks rules, converts and sinks blocks. It has no WIN word:
//! a won game stops accepting undo.

use proptest::prelude::*;

use rulegrid::core::{ConfigSet, Direction, OperationType};
use rulegrid::game::Game;
use rulegrid::grid::Grid;
use rulegrid::levels::{classic, LevelBuilder};

fn playground() -> Game<ConfigSet> {
    let (config, map) = LevelBuilder::new(7, 7)
        .row(0, &[classic::BABA_WORD, classic::IS, classic::YOU])
        .row(1, &[classic::ROCK_WORD, classic::IS, classic::PUSH])
        .row(2, &[classic::KEKE_WORD, classic::IS, classic::MOVE])
        .row(3, &[classic::WATER_WORD, classic::IS, classic::SINK])
        .row(4, &[classic::WALL_WORD, classic::IS, classic::STOP])
        .place(classic::ROCK_WORD, 4, 3)
        .place(classic::PULL, 5, 0)
        .place(classic::BABA, 4, 5)
        .place(classic::ROCK, 5, 5)
        .place(classic::ROCK, 2, 5)
        .place_facing(classic::KEKE, 6, 1, Direction::Left)
        .place_facing(classic::KEKE, 4, 6, Direction::Up)
        .place(classic::WATER, 3, 6)
        .place(classic::WALL, 6, 6)
        .place(classic::WALL, 6, 5)
        .build();

    let mut game = Game::new(config);
    game.start_game(map).unwrap();
    game
}

fn arb_operation() -> impl Strategy<Value = OperationType> {
    prop_oneof![
        Just(OperationType::Up),
        Just(OperationType::Down),
        Just(OperationType::Left),
        Just(OperationType::Right),
        Just(OperationType::Wait),
        Just(OperationType::None),
    ]
}

fn grid(game: &Game<ConfigSet>) -> Grid {
    game.grid().cloned().unwrap()
}

// =============================================================================
// Fixed sequences
// =============================================================================

#[test]
fn test_playground_starts_clean() {
    let game = playground();
    assert_eq!(game.rules().len(), 5);
    assert!(game.violations().is_empty());
    assert!(!game.can_undo());
}

#[test]
fn test_undo_depth_counts_non_empty_ticks() {
    let mut game = playground();
    game.tick(OperationType::Left).unwrap();
    game.tick(OperationType::None).unwrap();
    game.tick(OperationType::Left).unwrap();

    let depth = game.history().unwrap().undo_depth();
    assert_eq!(depth, 2);

    let mut undone = 0;
    while game.undo().unwrap() {
        undone += 1;
    }
    assert_eq!(undone, depth);
    assert_eq!(game.history().unwrap().redo_depth(), depth);
}

#[test]
fn test_cloned_game_is_independent() {
    let mut game = playground();
    game.tick(OperationType::Down).unwrap();
    let snapshot = game.clone();

    game.tick(OperationType::Down).unwrap();
    game.undo().unwrap();

    assert_eq!(grid(&game), grid(&snapshot));
    assert!(game.can_redo());
    assert!(!snapshot.can_redo());
}

// =============================================================================
// Properties
// =============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn prop_undo_all_restores_initial_grid(operations in prop::collection::vec(arb_operation(), 0..40)) {
        let mut game = playground();
        let initial = grid(&game);

        for operation in operations {
            game.tick(operation).unwrap();
        }
        while game.undo().unwrap() {}

        prop_assert_eq!(grid(&game), initial);
        prop_assert!(game.violations().is_empty());
    }

    #[test]
    fn prop_undo_then_redo_reproduces_state(
        operations in prop::collection::vec(arb_operation(), 1..30),
        steps in 1usize..10,
    ) {
        let mut game = playground();
        for operation in operations {
            game.tick(operation).unwrap();
        }
        let end = grid(&game);
        let rules = game.rules().to_vec();

        let mut undone = 0;
        while undone < steps && game.undo().unwrap() {
            undone += 1;
        }
        for _ in 0..undone {
            prop_assert!(game.redo().unwrap());
        }

        prop_assert_eq!(grid(&game), end);
        prop_assert_eq!(game.rules().to_vec(), rules);
        prop_assert!(!game.can_redo());
    }

    #[test]
    fn prop_replay_is_deterministic(operations in prop::collection::vec(arb_operation(), 0..40)) {
        let mut first = playground();
        let mut second = playground();

        for &operation in &operations {
            let a = first.tick(operation).unwrap();
            let b = second.tick(operation).unwrap();
            prop_assert_eq!(a, b);
        }

        prop_assert_eq!(grid(&first), grid(&second));
        prop_assert_eq!(first.take_events(), second.take_events());
        prop_assert_eq!(first.rules(), second.rules());
    }
}
