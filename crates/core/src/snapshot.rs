//! Read-only, serializable view of a session for renderers and observers.
//!
//! A snapshot is produced by value; holding one never blocks further engine calls.

use serde::Serialize;

use crate::game_state::{ActivePiece, GameState};
use crate::piece::{Piece, PieceId};
use crate::shape::Grid;
use crate::types::{Color, GameStatus, Position, Rotation};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PieceSnapshot {
    pub id: PieceId,
    pub color: Color,
    pub size: usize,
    /// Occupancy grid as 0/1 rows
    pub grid: Vec<Vec<u8>>,
}

impl PieceSnapshot {
    fn new(piece: &Piece, grid: &Grid) -> Self {
        Self {
            id: piece.id(),
            color: piece.color(),
            size: piece.size(),
            grid: grid
                .iter()
                .map(|row| row.iter().map(|&filled| u8::from(filled)).collect())
                .collect(),
        }
    }
}

impl From<&Piece> for PieceSnapshot {
    fn from(piece: &Piece) -> Self {
        Self::new(piece, piece.shape())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ActiveSnapshot {
    /// The grid is the one for `rotation`
    pub piece: PieceSnapshot,
    pub position: Position,
    pub rotation: Rotation,
}

impl From<&ActivePiece> for ActiveSnapshot {
    fn from(value: &ActivePiece) -> Self {
        Self {
            piece: PieceSnapshot::new(&value.piece, value.piece.grid(value.rotation)),
            position: value.position,
            rotation: value.rotation,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GameSnapshot {
    pub board: Vec<Vec<u8>>,
    pub current: Option<ActiveSnapshot>,
    pub next: Option<PieceSnapshot>,
    /// Landing row of the current piece
    pub ghost_y: Option<i32>,
    pub score: u32,
    pub level: u32,
    pub lines: u32,
    pub status: GameStatus,
    pub fall_interval_ms: u32,
}

impl GameSnapshot {
    pub fn from_state(state: &GameState) -> Self {
        Self {
            board: state.board().to_u8_rows(),
            current: state.current().map(ActiveSnapshot::from),
            next: state.next().map(PieceSnapshot::from),
            ghost_y: state.ghost_position().map(|p| p.y),
            score: state.score(),
            level: state.level(),
            lines: state.lines(),
            status: state.status(),
            fall_interval_ms: state.fall_interval_ms(),
        }
    }

    pub fn playable(&self) -> bool {
        self.status == GameStatus::Playing
    }
}
