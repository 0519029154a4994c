//! Movement module - translation, rotation with wall kicks, and hard drop
//!
//! Every function here is a pure query: it returns the new position (and rotation) or
//! `None`, and never touches the board. The caller applies the result.
//!
//! Rotation uses one fixed kick list for every piece size. A failed in-place rotation
//! tries [`WALL_KICK_OFFSETS`] in order and keeps the first collision-free offset;
//! there is no distance ranking.

use crate::board::Board;
use crate::collision::{can_move, can_rotate, check_collision};
use crate::piece::Piece;
use crate::types::{Direction, Position, Rotation, RotationDirection};

/// Compensation offsets `(dx, dy)` tried after a blocked in-place rotation:
/// left 1, right 1, up 1, left 2, right 2, up-left, up-right, down 1.
pub const WALL_KICK_OFFSETS: [(i32, i32); 8] = [
    (-1, 0),
    (1, 0),
    (0, -1),
    (-2, 0),
    (2, 0),
    (-1, -1),
    (1, -1),
    (0, 1),
];

/// One unit step, or `None` when the target collides
pub fn move_piece(
    piece: &Piece,
    position: Position,
    direction: Direction,
    rotation: Rotation,
    board: &Board,
) -> Option<Position> {
    can_move(piece, position, direction, rotation, board).then(|| position.offset(direction))
}

/// Rotate one step in `direction`, applying wall kicks if needed.
///
/// Returns the first legal `(position, rotation)`: in place, then each kick offset in
/// list order. `None` leaves the caller's state as it was.
pub fn rotate_piece(
    piece: &Piece,
    position: Position,
    rotation: Rotation,
    direction: RotationDirection,
    board: &Board,
) -> Option<(Position, Rotation)> {
    let target = rotation.rotate(direction);

    std::iter::once((0, 0))
        .chain(WALL_KICK_OFFSETS)
        .map(|(dx, dy)| position.translate(dx, dy))
        .find(|&candidate| can_rotate(piece, candidate, target, board))
        .map(|candidate| (candidate, target))
}

/// Lowest reachable position straight below `position`.
///
/// Terminates because the floor is a boundary; returns `position` unchanged when the
/// piece cannot move down at all.
pub fn hard_drop(piece: &Piece, position: Position, rotation: Rotation, board: &Board) -> Position {
    let mut landing = position;
    while let Some(next) = move_piece(piece, landing, Direction::Down, rotation, board) {
        landing = next;
    }
    landing
}

/// Where the piece would land; used for ghost previews
pub fn ghost_position(
    piece: &Piece,
    position: Position,
    rotation: Rotation,
    board: &Board,
) -> Position {
    hard_drop(piece, position, rotation, board)
}

/// A piece locks once it can no longer move down
pub fn should_lock(piece: &Piece, position: Position, rotation: Rotation, board: &Board) -> bool {
    !can_move(piece, position, Direction::Down, rotation, board)
}

pub fn is_valid_placement(
    piece: &Piece,
    position: Position,
    rotation: Rotation,
    board: &Board,
) -> bool {
    !check_collision(piece, position, rotation, board).has_collision()
}
