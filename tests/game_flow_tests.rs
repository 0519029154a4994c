//! Integration tests for the session orchestrator and the placement helpers

use proptest::prelude::*;

use poly_tetris::core::shape::grid_from_rows;
use poly_tetris::core::{GameState, Piece, PieceId, TickOutcome};
use poly_tetris::engine::{apply_place, choose_placement, play_best, PlaceError};
use poly_tetris::types::{Color, GameAction, GameConfig, GameStatus, Position, Rotation};

fn square() -> Piece {
    Piece::new(
        PieceId(900),
        grid_from_rows(["##..", "##..", "....", "...."]),
        Color(0xF7DC6F),
    )
}

#[test]
fn test_game_lifecycle() {
    let mut state = GameState::new(12345);
    assert_eq!(state.status(), GameStatus::Ready);
    assert!(state.current().is_some());
    assert!(state.next().is_some());

    assert!(state.apply_action(GameAction::Start));
    assert_eq!(state.status(), GameStatus::Playing);
    assert!(state.apply_action(GameAction::Pause));
    assert!(!state.apply_action(GameAction::MoveLeft));
    assert!(state.apply_action(GameAction::Resume));
    assert!(state.apply_action(GameAction::End));
    assert_eq!(state.status(), GameStatus::GameOver);
    assert!(state.apply_action(GameAction::Restart));
    assert_eq!(state.status(), GameStatus::Playing);
}

#[test]
fn test_game_actions() {
    let mut state = GameState::new(12345);
    state.start();
    let initial = state.current().map(|a| a.position).unwrap_or_default();

    if state.apply_action(GameAction::MoveLeft) {
        assert_eq!(state.current().map(|a| a.position.x), Some(initial.x - 1));
    }
    state.apply_action(GameAction::RotateCw);
    let before_drop = state.current().map(|a| a.position.y).unwrap_or_default();
    assert!(state.apply_action(GameAction::SoftDrop));
    assert_eq!(state.current().map(|a| a.position.y), Some(before_drop + 1));
    assert!(state.is_playing());
}

#[test]
fn test_hard_drop_locks_and_promotes_next() {
    let mut state = GameState::new(6);
    state.start();
    let next_id = state.next().map(|p| p.id());

    assert!(state.apply_action(GameAction::HardDrop));
    assert_eq!(state.stats().total_pieces_placed, 1);
    assert_eq!(state.current().map(|a| a.piece.id()), next_id);
    assert_eq!(
        state.current().map(|a| (a.position, a.rotation)),
        Some((Position::new(3, 0), Rotation::North))
    );
    assert!(state.board().filled_count() >= 4);
    assert!(state.take_last_event().is_some());
}

#[test]
fn test_spawn_overlap_in_top_rows_ends_game() {
    let mut state = GameState::new(31);
    state.start();
    // Everything under the spawn box is settled, and the top rows are free.
    for y in 2..20 {
        for x in 0..9 {
            state.board_mut().set(x, y, true);
        }
    }
    state.set_current_piece(Some(square()));
    state.set_next_piece(Some(square()));

    let outcome = state.step();
    assert_eq!(outcome, TickOutcome::GameOver);
    assert_eq!(state.status(), GameStatus::GameOver);
    // The second square never got placed.
    assert_eq!(state.board().filled_count(), 18 * 9 + 4);
    assert_eq!(state.advance(10_000), TickOutcome::Idle);
}

#[test]
fn test_gravity_over_time() {
    let mut state = GameState::new(44);
    state.start();
    state.set_current_piece(Some(square()));

    let mut locked = false;
    for _ in 0..40 {
        match state.advance(500) {
            TickOutcome::Locked(_) => {
                locked = true;
                break;
            }
            TickOutcome::GameOver => panic!("unexpected game over"),
            TickOutcome::Idle | TickOutcome::Fell => {}
        }
    }
    // 18 falls plus the locking step, one step per 1000ms.
    assert!(locked);
    assert_eq!(state.stats().elapsed_ms, 19 * 1000);
}

#[test]
fn test_same_seed_same_session() {
    let play = |seed| {
        let mut state = GameState::new(seed);
        state.start();
        for _ in 0..30 {
            if play_best(&mut state).ok().flatten().is_none() {
                break;
            }
        }
        (state.board().clone(), state.score(), state.stats())
    };
    assert_eq!(play(99), play(99));
}

#[test]
fn test_custom_config_session() {
    let config: GameConfig =
        serde_json::from_str(r#"{ "boardWidth": 6, "boardHeight": 12, "linesPerLevel": 2 }"#)
            .expect("config json");
    let mut state = GameState::with_config(config, 5).expect("valid config");
    state.start();
    assert_eq!(state.board().width(), 6);
    assert_eq!(state.spawn_position(), Position::new(1, 0));

    while state.is_playing() && state.stats().total_pieces_placed < 50 {
        if play_best(&mut state).expect("placement").is_none() {
            break;
        }
    }
    assert_eq!(state.level(), state.lines() / 2 + 1);
}

#[test]
fn test_place_requires_playing_state() {
    let mut state = GameState::new(1);
    assert_eq!(
        apply_place(&mut state, 3, Rotation::North),
        Err(PlaceError::NotPlayable)
    );
    assert!(choose_placement(&state).is_none());
}

#[test]
fn test_snapshot_json_shape() {
    let mut state = GameState::new(17);
    state.start();
    state.apply_action(GameAction::HardDrop);

    let json = serde_json::to_value(state.snapshot()).expect("serialize snapshot");
    assert_eq!(json["status"], "playing");
    assert_eq!(json["board"].as_array().map(Vec::len), Some(20));
    assert_eq!(json["current"]["position"]["x"], 3);
    assert_eq!(json["current"]["piece"]["grid"].as_array().map(Vec::len), Some(4));
    assert_eq!(json["level"], 1);
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(24))]

    #[test]
    fn autoplay_keeps_counters_consistent(seed in any::<u64>(), pieces in 1u32..60) {
        let mut state = GameState::new(seed);
        state.start();

        for _ in 0..pieces {
            if !state.is_playing() {
                break;
            }
            let before = state.stats();
            let next_id = state.next().map(|p| p.id());
            let Some(event) = play_best(&mut state).expect("placement") else {
                break;
            };

            let after = state.stats();
            prop_assert_eq!(after.total_pieces_placed, before.total_pieces_placed + 1);
            prop_assert_eq!(after.score, before.score + event.points);
            prop_assert_eq!(after.total_lines_cleared, before.total_lines_cleared + event.lines_cleared);
            prop_assert_eq!(after.level, after.total_lines_cleared / 10 + 1);
            prop_assert_eq!(state.current().map(|a| a.piece.id()), next_id);
            prop_assert!(state.board().complete_rows().is_empty());

            if event.game_over {
                prop_assert_eq!(state.status(), GameStatus::GameOver);
                let top_used = state.board().rows().take(2).any(|row| row.iter().any(|&c| c));
                prop_assert!(top_used);
            }
        }
    }
}
