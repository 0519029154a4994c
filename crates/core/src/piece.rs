//! Pieces module - immutable generated polyominoes
//!
//! A [`Piece`] carries its canonical grid plus the three further clockwise rotations,
//! computed once at construction. Nothing mutates a piece afterwards; movement and
//! rotation are expressed as a `(Position, Rotation)` pair held by the caller.

use std::fmt;

use serde::Serialize;

use crate::shape::{
    all_rotations, bounding_size, filled_cells, filled_count, is_connected, Grid, GridCells,
};
use crate::types::{Color, Rotation, MAX_PIECE_SIZE, MIN_PIECE_SIZE};

/// Unique (per generator) piece identifier, displayed as `piece-N`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct PieceId(pub u64);

impl fmt::Display for PieceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "piece-{}", self.0)
    }
}

/// Size of the minimal rectangle around the canonical grid's filled cells
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct BoundingBox {
    pub width: usize,
    pub height: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Piece {
    id: PieceId,
    shape: Grid,
    color: Color,
    size: usize,
    rotations: [Grid; 4],
    bounding_box: BoundingBox,
}

impl Piece {
    /// Package a grid into a piece, precomputing rotations and bounding box.
    ///
    /// No validation happens here; see [`Piece::validate`].
    pub fn new(id: PieceId, shape: Grid, color: Color) -> Self {
        let (width, height) = bounding_size(&shape);
        Self {
            id,
            shape,
            color,
            size: filled_count(&shape),
            rotations: all_rotations(&shape),
            bounding_box: BoundingBox { width, height },
        }
    }

    pub fn id(&self) -> PieceId {
        self.id
    }

    /// Canonical (North) grid
    pub fn shape(&self) -> &Grid {
        &self.shape
    }

    pub fn color(&self) -> Color {
        self.color
    }

    /// Number of filled cells
    pub fn size(&self) -> usize {
        self.size
    }

    pub fn rotations(&self) -> &[Grid; 4] {
        &self.rotations
    }

    pub fn grid(&self, rotation: Rotation) -> &Grid {
        &self.rotations[rotation.index()]
    }

    pub fn bounding_box(&self) -> BoundingBox {
        self.bounding_box
    }

    /// Filled `(dx, dy)` offsets of the grid at `rotation`, row-major
    pub fn cells(&self, rotation: Rotation) -> impl Iterator<Item = (i32, i32)> {
        let cells: GridCells = filled_cells(self.grid(rotation));
        cells.into_iter().map(|(x, y)| (x as i32, y as i32))
    }

    /// Check the generation invariants with the default 4..=7 size bounds
    pub fn validate(&self) -> Result<(), PieceError> {
        self.validate_with(MIN_PIECE_SIZE, MAX_PIECE_SIZE)
    }

    /// Check size bounds, cell counts and connectivity of every rotation
    pub fn validate_with(&self, min_size: usize, max_size: usize) -> Result<(), PieceError> {
        if self.size < min_size || self.size > max_size {
            return Err(PieceError::SizeOutOfBounds {
                size: self.size,
                min: min_size,
                max: max_size,
            });
        }

        for rotation in Rotation::ALL {
            let grid = self.grid(rotation);
            let count = filled_count(grid);
            if count != self.size {
                return Err(PieceError::SizeMismatch {
                    rotation,
                    expected: self.size,
                    actual: count,
                });
            }
            if !is_connected(grid) {
                return Err(PieceError::Disconnected { rotation });
            }
        }

        Ok(())
    }
}

/// Reasons a piece fails [`Piece::validate`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PieceError {
    SizeOutOfBounds {
        size: usize,
        min: usize,
        max: usize,
    },
    SizeMismatch {
        rotation: Rotation,
        expected: usize,
        actual: usize,
    },
    Disconnected {
        rotation: Rotation,
    },
}

impl fmt::Display for PieceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PieceError::SizeOutOfBounds { size, min, max } => {
                write!(f, "piece size {size} outside {min}..={max}")
            }
            PieceError::SizeMismatch {
                rotation,
                expected,
                actual,
            } => write!(
                f,
                "rotation {} has {actual} cells, expected {expected}",
                rotation.as_str()
            ),
            PieceError::Disconnected { rotation } => {
                write!(f, "rotation {} is not 4-connected", rotation.as_str())
            }
        }
    }
}

impl std::error::Error for PieceError {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shape::{grid_from_rows, rotate_cw};

    fn l_piece() -> Piece {
        Piece::new(
            PieceId(1),
            grid_from_rows(["#...", "#...", "##..", "...."]),
            Color(0xFF6B6B),
        )
    }

    #[test]
    fn test_piece_metadata() {
        let piece = l_piece();
        assert_eq!(piece.size(), 4);
        assert_eq!(piece.bounding_box(), BoundingBox { width: 2, height: 3 });
        assert_eq!(piece.id().to_string(), "piece-1");
        assert_eq!(piece.grid(Rotation::North), piece.shape());
    }

    #[test]
    fn test_cells_follow_rotation() {
        let piece = l_piece();
        let north: Vec<_> = piece.cells(Rotation::North).collect();
        assert_eq!(north, vec![(0, 0), (0, 1), (0, 2), (1, 2)]);

        // (x, y) -> (3 - y, x)
        let east: Vec<_> = piece.cells(Rotation::East).collect();
        assert_eq!(east, vec![(1, 0), (2, 0), (3, 0), (1, 1)]);
    }

    #[test]
    fn test_rotations_are_successive_quarter_turns() {
        let piece = l_piece();
        let rotations = piece.rotations();

        assert_eq!(&rotations[0], piece.shape());
        for i in 1..4 {
            assert_eq!(rotations[i], rotate_cw(&rotations[i - 1]));
        }
        assert_eq!(rotate_cw(&rotations[3]), rotations[0]);
        for rotation in Rotation::ALL {
            assert_eq!(&rotations[rotation.index()], piece.grid(rotation));
            assert_eq!(filled_count(&rotations[rotation.index()]), piece.size());
        }
    }

    #[test]
    fn test_validate_accepts_l_piece() {
        assert_eq!(l_piece().validate(), Ok(()));
    }

    #[test]
    fn test_validate_rejects_small_and_split_shapes() {
        let tiny = Piece::new(
            PieceId(2),
            grid_from_rows(["##..", "....", "....", "...."]),
            Color(0),
        );
        assert!(matches!(
            tiny.validate(),
            Err(PieceError::SizeOutOfBounds { size: 2, .. })
        ));

        let split = Piece::new(
            PieceId(3),
            grid_from_rows(["##..", "....", "..##", "...."]),
            Color(0),
        );
        assert_eq!(
            split.validate(),
            Err(PieceError::Disconnected {
                rotation: Rotation::North
            })
        );
    }
}
