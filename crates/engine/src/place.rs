use poly_tetris_core::{GameState, LockError, LockEvent};
use poly_tetris_types::{Direction, Rotation, RotationDirection};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlaceError {
    NotPlayable,
    NoActive,
    RotationBlocked,
    ColumnBlocked,
    Lock(LockError),
}

impl PlaceError {
    pub fn code(self) -> &'static str {
        match self {
            PlaceError::Lock(err) => err.code(),
            PlaceError::NotPlayable
            | PlaceError::NoActive
            | PlaceError::RotationBlocked
            | PlaceError::ColumnBlocked => "invalid_place",
        }
    }

    pub fn message(self) -> &'static str {
        match self {
            PlaceError::NotPlayable => "game is not playable",
            PlaceError::NoActive => "no active piece",
            PlaceError::RotationBlocked => "could not rotate to target rotation",
            PlaceError::ColumnBlocked => "could not move to target column",
            PlaceError::Lock(err) => err.message(),
        }
    }
}

impl std::fmt::Display for PlaceError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.message())
    }
}

impl std::error::Error for PlaceError {}

impl From<LockError> for PlaceError {
    fn from(value: LockError) -> Self {
        PlaceError::Lock(value)
    }
}

/// Rotate the current piece to `target_rotation`, shift it to column `target_x`, then
/// hard-drop and lock it.
///
/// The shorter rotation direction is tried first; if it is blocked the other direction
/// is retried from the untouched state. On a rotation or column failure the piece may
/// be left partially moved but nothing is locked.
pub fn apply_place(
    state: &mut GameState,
    target_x: i32,
    target_rotation: Rotation,
) -> Result<LockEvent, PlaceError> {
    if !state.is_playing() {
        return Err(PlaceError::NotPlayable);
    }

    let Some(start) = state.current().map(|a| a.rotation) else {
        return Err(PlaceError::NoActive);
    };

    let cur = start.index() as i32;
    let tgt = target_rotation.index() as i32;
    let cw = (tgt - cur).rem_euclid(4);
    let ccw = (cur - tgt).rem_euclid(4);

    let mut plans = [
        (RotationDirection::Clockwise, cw),
        (RotationDirection::CounterClockwise, ccw),
    ];
    if plans[1].1 < plans[0].1 {
        plans.swap(0, 1);
    }

    let snapshot = state.clone();
    let rotated = plans.into_iter().any(|(direction, steps)| {
        *state = snapshot.clone();
        (0..steps).all(|_| state.try_rotate(direction))
    });
    if !rotated {
        return Err(PlaceError::RotationBlocked);
    }

    let Some(active) = state.current() else {
        return Err(PlaceError::NoActive);
    };
    if active.rotation != target_rotation {
        return Err(PlaceError::RotationBlocked);
    }

    let dx = target_x - active.position.x;
    let direction = if dx < 0 {
        Direction::Left
    } else {
        Direction::Right
    };
    for _ in 0..dx.abs() {
        if !state.try_move(direction) {
            return Err(PlaceError::ColumnBlocked);
        }
    }

    while state.try_move(Direction::Down) {}
    Ok(state.lock_current_piece()?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use poly_tetris_core::shape::grid_from_rows;
    use poly_tetris_core::{Piece, PieceId};
    use poly_tetris_types::{Color, GameAction, Position};

    fn bar() -> Piece {
        Piece::new(
            PieceId(50),
            grid_from_rows([".#..", ".#..", ".#..", ".#.."]),
            Color(0x45B7D1),
        )
    }

    fn playing() -> GameState {
        let mut gs = GameState::new(1);
        gs.start();
        gs
    }

    #[test]
    fn place_rejected_when_paused() {
        let mut gs = playing();
        assert!(gs.apply_action(GameAction::Pause));

        let err = apply_place(&mut gs, 3, Rotation::North).unwrap_err();
        assert_eq!(err, PlaceError::NotPlayable);
        assert_eq!(err.code(), "invalid_place");
    }

    #[test]
    fn place_rejected_when_column_out_of_bounds() {
        let mut gs = playing();
        let err = apply_place(&mut gs, -50, Rotation::North).unwrap_err();
        assert_eq!(err, PlaceError::ColumnBlocked);
        assert_eq!(gs.stats().total_pieces_placed, 0);
    }

    #[test]
    fn place_rotates_shifts_and_locks() {
        let mut gs = playing();
        gs.set_current_piece(Some(bar()));

        // East grid is row 1, columns 0..=3.
        let event = apply_place(&mut gs, 0, Rotation::East).expect("placement");
        assert_eq!(event.lines_cleared, 0);
        for x in 0..4 {
            assert!(gs.board().is_occupied(x, 19));
        }
        assert_eq!(gs.board().filled_count(), 4);
        assert_eq!(gs.stats().total_pieces_placed, 1);
    }

    #[test]
    fn place_prefers_counter_clockwise_for_west() {
        let mut gs = playing();
        gs.set_current_piece(Some(bar()));
        apply_place(&mut gs, 4, Rotation::West).expect("placement");
        // West grid is row 2, columns 0..=3.
        for x in 4..8 {
            assert!(gs.board().is_occupied(x, 19));
        }
    }

    #[test]
    fn place_rejected_when_column_blocked_by_stack() {
        let mut gs = playing();
        gs.set_current_piece(Some(bar()));
        // Wall at column 6 in the bar's rows.
        for y in 0..4 {
            gs.board_mut().set(6, y, true);
        }
        let err = apply_place(&mut gs, 7, Rotation::North).unwrap_err();
        assert_eq!(err, PlaceError::ColumnBlocked);
        assert_eq!(gs.current().map(|a| a.position), Some(Position::new(4, 0)));
    }

    #[test]
    fn place_surfaces_lock_errors() {
        let mut gs = playing();
        gs.set_next_piece(None);
        let rotation = gs.current().map(|a| a.rotation).unwrap_or_default();
        let x = gs.current().map(|a| a.position.x).unwrap_or_default();
        let err = apply_place(&mut gs, x, rotation).unwrap_err();
        assert_eq!(err, PlaceError::Lock(LockError::NoNextPiece));
        assert_eq!(err.code(), "no_next_piece");
        assert!(gs.is_game_over());
    }
}
