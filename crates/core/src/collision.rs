//! Collision module - pure geometric checks
//!
//! A piece at `(position, rotation)` collides when any filled cell leaves the side
//! walls, drops below the floor, or lands on a settled board cell. Rows above the board
//! (`y < 0`) are legal so pieces can spawn partially hidden.
//!
//! Boundary violations take precedence: overlap with settled cells is only reported when
//! every cell is inside the walls and above the floor.

use arrayvec::ArrayVec;

use crate::board::Board;
use crate::piece::Piece;
use crate::types::{
    CollisionResult, Direction, Position, Rotation, GAME_OVER_ROWS, GRID_SIZE,
};

/// Absolute cells covered by a piece, at most one per grid cell
pub type OccupiedCells = ArrayVec<Position, { GRID_SIZE * GRID_SIZE }>;

/// Absolute board cells covered by `piece` at `position`/`rotation`
pub fn occupied_cells(piece: &Piece, position: Position, rotation: Rotation) -> OccupiedCells {
    piece
        .cells(rotation)
        .map(|(dx, dy)| position.translate(dx, dy))
        .collect()
}

/// Full collision check: boundaries first, then settled cells
pub fn check_collision(
    piece: &Piece,
    position: Position,
    rotation: Rotation,
    board: &Board,
) -> CollisionResult {
    let boundary = check_boundary(piece, position, rotation, board.width(), board.height());
    if boundary.has_collision() {
        return boundary;
    }
    check_overlap(piece, position, rotation, board)
}

/// Side walls and floor. The column test runs before the row test for each cell.
pub fn check_boundary(
    piece: &Piece,
    position: Position,
    rotation: Rotation,
    width: usize,
    height: usize,
) -> CollisionResult {
    for cell in occupied_cells(piece, position, rotation) {
        if cell.x < 0 || cell.x >= width as i32 {
            return CollisionResult::Boundary { position: cell };
        }
        if cell.y >= height as i32 {
            return CollisionResult::Boundary { position: cell };
        }
    }
    CollisionResult::None
}

/// Overlap with settled cells; cells outside the board are skipped here
pub fn check_overlap(
    piece: &Piece,
    position: Position,
    rotation: Rotation,
    board: &Board,
) -> CollisionResult {
    occupied_cells(piece, position, rotation)
        .into_iter()
        .find(|cell| board.is_occupied(cell.x, cell.y))
        .map_or(CollisionResult::None, |cell| CollisionResult::Piece {
            position: cell,
        })
}

/// Whether one unit step in `direction` is collision-free
pub fn can_move(
    piece: &Piece,
    position: Position,
    direction: Direction,
    rotation: Rotation,
    board: &Board,
) -> bool {
    !check_collision(piece, position.offset(direction), rotation, board).has_collision()
}

/// Whether `rotation` fits at `position` without any compensation
pub fn can_rotate(piece: &Piece, position: Position, rotation: Rotation, board: &Board) -> bool {
    !check_collision(piece, position, rotation, board).has_collision()
}

/// True when every filled cell is above row 0
pub fn is_above_board(piece: &Piece, position: Position, rotation: Rotation) -> bool {
    piece.cells(rotation).all(|(_, dy)| position.y + dy < 0)
}

/// The spawn area is blocked: some filled cell sits on an already settled cell within
/// the top two visible rows.
pub fn would_cause_game_over(
    piece: &Piece,
    position: Position,
    rotation: Rotation,
    board: &Board,
) -> bool {
    occupied_cells(piece, position, rotation)
        .into_iter()
        .any(|cell| (0..GAME_OVER_ROWS).contains(&cell.y) && board.is_occupied(cell.x, cell.y))
}

/// Alias of [`would_cause_game_over`] under its caller-facing name
pub fn is_game_over(piece: &Piece, position: Position, rotation: Rotation, board: &Board) -> bool {
    would_cause_game_over(piece, position, rotation, board)
}

/// Occupancy lookup where anything outside the board counts as occupied
pub fn is_cell_occupied(board: &Board, x: i32, y: i32) -> bool {
    board.get(x, y).unwrap_or(true)
}
