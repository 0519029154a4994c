//! Core game logic module - pure, deterministic, and testable
//!
//! This crate contains the rules engine for a falling-block game played with randomly
//! generated polyominoes of 4-7 connected cells. It has **zero dependencies** on UI,
//! input timing, or I/O:
//!
//! - **Deterministic**: a seeded generator produces identical piece streams
//! - **Copy-on-write**: every board transformation returns a new [`Board`]; the input
//!   stays valid as a snapshot for renderers
//! - **Synchronous**: no operation blocks, and every loop is bounded
//!
//! # Module Structure
//!
//! - [`shape`]: 4x4 occupancy grids, clockwise rotation, connectivity, bounding boxes
//! - [`piece`]: immutable generated pieces with their four precomputed rotations
//! - [`generator`]: bounded random growth of connected shapes with a fallback piece
//! - [`board`]: the settled-cell grid, locking and row clearing
//! - [`collision`]: boundary/overlap checks and the spawn-blocked game-over rule
//! - [`movement`]: translation, rotation with wall kicks, and hard drop
//! - [`scoring`]: line-clear points, levels and fall intervals
//! - [`game_state`]: the tick/lock/spawn orchestration for one session
//! - [`snapshot`]: serializable read-only view of a session
//!
//! # Example
//!
//! ```
//! use poly_tetris_core::GameState;
//! use poly_tetris_core::types::{GameAction, GameStatus};
//!
//! let mut game = GameState::new(12345);
//! game.start();
//! assert_eq!(game.status(), GameStatus::Playing);
//!
//! game.apply_action(GameAction::MoveLeft);
//! game.apply_action(GameAction::RotateCw);
//! game.apply_action(GameAction::HardDrop);
//!
//! assert_eq!(game.stats().total_pieces_placed, 1);
//! ```

pub mod board;
pub mod collision;
pub mod error;
pub mod game_state;
pub mod generator;
pub mod movement;
pub mod piece;
pub mod scoring;
pub mod shape;
pub mod snapshot;

pub use poly_tetris_types as types;

// Re-export commonly used types for convenience
pub use board::{lock_piece_to_board, Board};
pub use collision::{check_collision, is_game_over, would_cause_game_over};
pub use error::LockError;
pub use game_state::{ActivePiece, GameState, GameStats, LockEvent, TickOutcome};
pub use generator::{generate_piece, PieceGenerator};
pub use movement::{hard_drop, move_piece, rotate_piece, WALL_KICK_OFFSETS};
pub use piece::{BoundingBox, Piece, PieceError, PieceId};
pub use scoring::{detect_and_clear_lines, LineClear, Progress};
pub use snapshot::GameSnapshot;
