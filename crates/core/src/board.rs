//! Board module - the grid of settled cells
//!
//! The board is a `width x height` grid stored as a flat row-major vector for cache
//! locality. Coordinates are `(x, y)` with `x` growing right and `y` growing down; row 0
//! is the top. Sizes are fixed for a session.
//!
//! Engine operations never mutate a board in place: [`lock_piece_to_board`] and
//! [`Board::with_rows_cleared`] return a fresh board and leave the input untouched, so
//! callers can keep the previous value as a snapshot. [`Board::set`] exists for building
//! boards and fixtures.

use crate::piece::Piece;
use crate::types::{Cell, Position, Rotation, BOARD_HEIGHT, BOARD_WIDTH};

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Board {
    width: usize,
    height: usize,
    /// Flat array of cells, row-major order (y * width + x)
    cells: Vec<Cell>,
}

impl Board {
    /// Create a new empty board
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            cells: vec![false; width * height],
        }
    }

    /// Build a board from text rows, `#` marking filled cells.
    ///
    /// The width is taken from the first row; shorter rows are padded with empty cells.
    ///
    /// ```
    /// use poly_tetris_core::Board;
    ///
    /// let board = Board::from_rows(&["....", "#..#", "####"]);
    /// assert_eq!((board.width(), board.height()), (4, 3));
    /// assert!(board.is_occupied(3, 1));
    /// assert!(board.is_row_full(2));
    /// ```
    pub fn from_rows(rows: &[&str]) -> Self {
        let width = rows.first().map_or(0, |r| r.chars().count());
        let mut board = Self::new(width, rows.len());
        for (y, row) in rows.iter().enumerate() {
            for (x, ch) in row.chars().take(width).enumerate() {
                if ch == '#' {
                    board.cells[y * width + x] = true;
                }
            }
        }
        board
    }

    /// Calculate flat index from (x, y) coordinates
    #[inline(always)]
    fn index(&self, x: i32, y: i32) -> Option<usize> {
        if self.is_out_of_bounds(x, y) {
            return None;
        }
        Some(y as usize * self.width + x as usize)
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Get cell at position (x, y)
    /// Returns None if out of bounds
    pub fn get(&self, x: i32, y: i32) -> Option<Cell> {
        self.index(x, y).map(|idx| self.cells[idx])
    }

    /// Set cell at position (x, y)
    /// Returns false if out of bounds
    pub fn set(&mut self, x: i32, y: i32, cell: Cell) -> bool {
        match self.index(x, y) {
            Some(idx) => {
                self.cells[idx] = cell;
                true
            }
            None => false,
        }
    }

    /// Check if position is occupied (within bounds and filled)
    pub fn is_occupied(&self, x: i32, y: i32) -> bool {
        self.get(x, y) == Some(true)
    }

    pub fn is_out_of_bounds(&self, x: i32, y: i32) -> bool {
        x < 0 || y < 0 || x as usize >= self.width || y as usize >= self.height
    }

    pub fn is_within_bounds(&self, position: Position) -> bool {
        !self.is_out_of_bounds(position.x, position.y)
    }

    pub fn row(&self, y: usize) -> Option<&[Cell]> {
        if y >= self.height {
            return None;
        }
        let start = y * self.width;
        Some(&self.cells[start..start + self.width])
    }

    /// Rows from top to bottom
    pub fn rows(&self) -> impl Iterator<Item = &[Cell]> {
        self.cells.chunks(self.width.max(1)).take(self.height)
    }

    /// Check if a row is completely filled
    pub fn is_row_full(&self, y: usize) -> bool {
        self.row(y)
            .is_some_and(|row| row.iter().all(|&filled| filled))
    }

    /// Indices of complete rows, scanned top to bottom
    pub fn complete_rows(&self) -> Vec<usize> {
        (0..self.height).filter(|&y| self.is_row_full(y)).collect()
    }

    /// Remove `rows` and prepend as many empty rows at the top.
    ///
    /// Height and width are preserved. Unknown or duplicate indices are ignored; with
    /// nothing to remove the result equals `self`.
    pub fn with_rows_cleared(&self, rows: &[usize]) -> Board {
        let width = self.width;
        let kept: Vec<&[Cell]> = self
            .rows()
            .enumerate()
            .filter(|(y, _)| !rows.contains(y))
            .map(|(_, row)| row)
            .collect();
        let removed = self.height - kept.len();

        let mut cells = Vec::with_capacity(self.cells.len());
        cells.resize(removed * width, false);
        for row in kept {
            cells.extend_from_slice(row);
        }

        Board {
            width,
            height: self.height,
            cells,
        }
    }

    /// Every filled cell, row-major
    pub fn occupied_cells(&self) -> Vec<Position> {
        self.cells
            .iter()
            .enumerate()
            .filter(|&(_, &filled)| filled)
            .map(|(i, _)| Position::new((i % self.width) as i32, (i / self.width) as i32))
            .collect()
    }

    pub fn filled_count(&self) -> usize {
        self.cells.iter().filter(|&&filled| filled).count()
    }

    /// Get a reference to the internal cells array
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Rows as `0`/`1` bytes, for snapshots and renderers
    pub fn to_u8_rows(&self) -> Vec<Vec<u8>> {
        self.rows()
            .map(|row| row.iter().map(|&filled| u8::from(filled)).collect())
            .collect()
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new(BOARD_WIDTH, BOARD_HEIGHT)
    }
}

/// Commit a piece's cells into a copy of `board`.
///
/// Cells that project outside the board (only possible above row 0 for a legal
/// position) are ignored. The input board is left untouched.
pub fn lock_piece_to_board(
    piece: &Piece,
    position: Position,
    rotation: Rotation,
    board: &Board,
) -> Board {
    let mut locked = board.clone();
    for (dx, dy) in piece.cells(rotation) {
        locked.set(position.x + dx, position.y + dy, true);
    }
    locked
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::piece::PieceId;
    use crate::shape::grid_from_rows;
    use crate::types::Color;

    #[test]
    fn test_board_index_calculation() {
        let board = Board::default();
        assert_eq!(board.index(0, 0), Some(0));
        assert_eq!(board.index(9, 0), Some(9));
        assert_eq!(board.index(0, 1), Some(10));
        assert_eq!(board.index(9, 19), Some(199));
        assert_eq!(board.index(-1, 0), None);
        assert_eq!(board.index(10, 0), None);
        assert_eq!(board.index(0, 20), None);
    }

    #[test]
    fn test_rows_cleared_shift_down() {
        let board = Board::from_rows(&["#...", "####", ".#..", "####"]);
        let cleared = board.with_rows_cleared(&[1, 3]);
        assert_eq!(cleared, Board::from_rows(&["....", "....", "#...", ".#.."]));
        // Input is untouched.
        assert!(board.is_row_full(3));
    }

    #[test]
    fn test_rows_cleared_noop() {
        let board = Board::from_rows(&["#...", ".#.."]);
        assert_eq!(board.with_rows_cleared(&[]), board);
        assert_eq!(board.with_rows_cleared(&[7]), board);
    }

    #[test]
    fn test_lock_ignores_cells_above_board() {
        let piece = Piece::new(
            PieceId(1),
            grid_from_rows(["#...", "#...", "##..", "...."]),
            Color(0),
        );
        let board = Board::new(4, 4);
        let locked = lock_piece_to_board(&piece, Position::new(1, -2), Rotation::North, &board);

        assert_eq!(locked.filled_count(), 2);
        assert!(locked.is_occupied(1, 0));
        assert!(locked.is_occupied(2, 0));
        assert_eq!(board.filled_count(), 0);
    }

    #[test]
    fn test_occupied_cells_and_u8_rows() {
        let board = Board::from_rows(&["#..", "..#"]);
        assert_eq!(
            board.occupied_cells(),
            vec![Position::new(0, 0), Position::new(2, 1)]
        );
        assert_eq!(board.to_u8_rows(), vec![vec![1, 0, 0], vec![0, 0, 1]]);
    }
}
