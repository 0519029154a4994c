//! Core types module - shared data structures, constants and configuration
//!
//! This crate defines the fundamental types used throughout the engine. All types are
//! plain data with no behaviour beyond small conversions, so they can be shared by the
//! rules engine, the placement helpers and any external renderer or state holder.
//!
//! # Board Dimensions
//!
//! Default playfield dimensions (configurable per session through [`GameConfig`]):
//!
//! - **Width**: 10 columns (indexed 0-9)
//! - **Height**: 20 rows (indexed 0-19, row 0 is the top)
//! - **Spawn position**: `(width / 2 - 2, 0)`, i.e. (3, 0) on the default board
//!
//! Pieces may sit partially or fully above the board (`y < 0`); only the side walls and
//! the floor are hard boundaries.
//!
//! # Timing Constants
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | `BASE_FALL_INTERVAL_MS` | 1000 | Fall interval at level 1 |
//! | `MIN_FALL_INTERVAL_MS` | 50 | Floor for the decaying fall interval |
//! | `LEVEL_SPEED_MULTIPLIER` | 0.9 | Interval factor applied per level |
//!
//! # Examples
//!
//! ```
//! use poly_tetris_types::{Direction, GameAction, Position, Rotation, BOARD_HEIGHT, BOARD_WIDTH};
//!
//! let rotation = Rotation::North.rotate_cw();
//! assert_eq!(rotation, Rotation::East);
//! assert_eq!(rotation.index(), 1);
//!
//! let moved = Position::new(3, 0).offset(Direction::Down);
//! assert_eq!(moved, Position::new(3, 1));
//!
//! assert_eq!(GameAction::from_str("hardDrop"), Some(GameAction::HardDrop));
//! assert_eq!((BOARD_WIDTH, BOARD_HEIGHT), (10, 20));
//! ```

use std::fmt;

use serde::{Deserialize, Serialize};

mod config;

pub use config::{ConfigError, GameConfig, GenerationConfig};

/// Default board width in cells (10 columns)
pub const BOARD_WIDTH: usize = 10;

/// Default board height in cells (20 rows)
pub const BOARD_HEIGHT: usize = 20;

/// Side length of the square grid every piece is generated in
pub const GRID_SIZE: usize = 4;

/// Smallest piece the generator accepts
pub const MIN_PIECE_SIZE: usize = 4;

/// Largest piece the generator targets
pub const MAX_PIECE_SIZE: usize = 7;

/// Bounded number of growth attempts before the fallback shape is used
pub const MAX_GENERATION_ATTEMPTS: u32 = 100;

/// Number of top rows checked by the spawn-blocked game-over rule
pub const GAME_OVER_ROWS: i32 = 2;

/// Fall interval at level 1 (1000ms = 1 second per row)
pub const BASE_FALL_INTERVAL_MS: u32 = 1000;

/// Fall interval floor (50ms)
pub const MIN_FALL_INTERVAL_MS: u32 = 50;

/// Fall interval multiplier applied once per level above 1
pub const LEVEL_SPEED_MULTIPLIER: f64 = 0.9;

/// Lines needed per level
pub const LINES_PER_LEVEL: u32 = 10;

/// Base points for clearing 1, 2, 3 or 4 rows at once (multiplied by level).
///
/// Clears of more than four rows are capped at the last entry.
pub const POINTS_PER_LINE: [u32; 4] = [100, 300, 500, 800];

/// Default piece colour palette
pub const PIECE_COLORS: [Color; 10] = [
    Color(0xFF6B6B), // red
    Color(0x4ECDC4), // teal
    Color(0x45B7D1), // blue
    Color(0x96CEB4), // green
    Color(0xFFEAA7), // yellow
    Color(0xDDA0DD), // plum
    Color(0x98D8C8), // mint
    Color(0xF7DC6F), // light yellow
    Color(0xBB8FCE), // light purple
    Color(0x85C1E9), // light blue
];

/// A cell on the game board: `true` when a settled block occupies it.
pub type Cell = bool;

/// Board-relative coordinate; `x` is the column, `y` the row (growing downward).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Translate by `(dx, dy)`
    pub const fn translate(self, dx: i32, dy: i32) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
        }
    }

    /// Translate by one unit step in `direction`
    pub fn offset(self, direction: Direction) -> Self {
        let (dx, dy) = direction.delta();
        self.translate(dx, dy)
    }
}

/// Unit translation directions. There is no upward move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Left,
    Right,
    Down,
}

impl Direction {
    /// `(dx, dy)` for one step
    pub const fn delta(self) -> (i32, i32) {
        match self {
            Direction::Left => (-1, 0),
            Direction::Right => (1, 0),
            Direction::Down => (0, 1),
        }
    }
}

/// Rotation request direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum RotationDirection {
    Clockwise,
    CounterClockwise,
}

/// Rotation states, one per precomputed rotation grid.
///
/// - **North**: the generated orientation (index 0)
/// - **East**: rotated 90° clockwise (index 1)
/// - **South**: rotated 180° (index 2)
/// - **West**: rotated 270° clockwise (index 3)
///
/// The rotation cycle goes: North → East → South → West → North
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Rotation {
    #[default]
    North,
    East,
    South,
    West,
}

impl Rotation {
    pub const ALL: [Rotation; 4] = [
        Rotation::North,
        Rotation::East,
        Rotation::South,
        Rotation::West,
    ];

    /// Rotate clockwise (90°)
    ///
    /// ```
    /// use poly_tetris_types::Rotation;
    ///
    /// assert_eq!(Rotation::North.rotate_cw(), Rotation::East);
    /// assert_eq!(Rotation::West.rotate_cw(), Rotation::North);
    /// ```
    pub fn rotate_cw(&self) -> Self {
        match self {
            Rotation::North => Rotation::East,
            Rotation::East => Rotation::South,
            Rotation::South => Rotation::West,
            Rotation::West => Rotation::North,
        }
    }

    /// Rotate counter-clockwise (-90° or 270°)
    ///
    /// ```
    /// use poly_tetris_types::Rotation;
    ///
    /// assert_eq!(Rotation::North.rotate_ccw(), Rotation::West);
    /// assert_eq!(Rotation::East.rotate_ccw(), Rotation::North);
    /// ```
    pub fn rotate_ccw(&self) -> Self {
        match self {
            Rotation::North => Rotation::West,
            Rotation::West => Rotation::South,
            Rotation::South => Rotation::East,
            Rotation::East => Rotation::North,
        }
    }

    pub fn rotate(&self, direction: RotationDirection) -> Self {
        match direction {
            RotationDirection::Clockwise => self.rotate_cw(),
            RotationDirection::CounterClockwise => self.rotate_ccw(),
        }
    }

    /// Index into a piece's rotation grid list
    pub const fn index(&self) -> usize {
        match self {
            Rotation::North => 0,
            Rotation::East => 1,
            Rotation::South => 2,
            Rotation::West => 3,
        }
    }

    /// Inverse of [`Rotation::index`]; wraps modulo 4.
    pub const fn from_index(index: usize) -> Self {
        Self::ALL[index % 4]
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Rotation::North => "north",
            Rotation::East => "east",
            Rotation::South => "south",
            Rotation::West => "west",
        }
    }
}

/// Outcome of a collision query.
///
/// Carries the first offending absolute cell when there is a collision.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum CollisionResult {
    None,
    /// A cell left the side walls or went below the floor
    Boundary { position: Position },
    /// A cell overlaps a settled board cell
    Piece { position: Position },
}

impl CollisionResult {
    pub fn has_collision(&self) -> bool {
        !matches!(self, CollisionResult::None)
    }

    pub fn position(&self) -> Option<Position> {
        match self {
            CollisionResult::None => None,
            CollisionResult::Boundary { position } | CollisionResult::Piece { position } => {
                Some(*position)
            }
        }
    }
}

/// Session lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum GameStatus {
    #[default]
    Ready,
    Playing,
    Paused,
    GameOver,
}

impl GameStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            GameStatus::Ready => "ready",
            GameStatus::Playing => "playing",
            GameStatus::Paused => "paused",
            GameStatus::GameOver => "gameOver",
        }
    }
}

/// Discrete events the state holder forwards to the engine
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameAction {
    /// Move piece one cell left
    MoveLeft,
    /// Move piece one cell right
    MoveRight,
    /// Move piece one cell down and reset the fall timer
    SoftDrop,
    /// Drop to the lowest legal row and lock immediately
    HardDrop,
    /// Rotate piece 90° clockwise
    RotateCw,
    /// Rotate piece 90° counter-clockwise
    RotateCcw,
    /// Leave the ready state (or start over after game over)
    Start,
    Pause,
    Resume,
    /// Force game over
    End,
    /// Start a fresh session with the same generator seed
    Restart,
}

impl GameAction {
    /// Parse action from string
    ///
    /// ```
    /// use poly_tetris_types::GameAction;
    ///
    /// assert_eq!(GameAction::from_str("moveLeft"), Some(GameAction::MoveLeft));
    /// assert_eq!(GameAction::from_str("rotateCw"), Some(GameAction::RotateCw));
    /// assert_eq!(GameAction::from_str("unknown"), None);
    /// ```
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "moveleft" => Some(GameAction::MoveLeft),
            "moveright" => Some(GameAction::MoveRight),
            "softdrop" => Some(GameAction::SoftDrop),
            "harddrop" => Some(GameAction::HardDrop),
            "rotatecw" => Some(GameAction::RotateCw),
            "rotateccw" => Some(GameAction::RotateCcw),
            "start" => Some(GameAction::Start),
            "pause" => Some(GameAction::Pause),
            "resume" => Some(GameAction::Resume),
            "end" => Some(GameAction::End),
            "restart" => Some(GameAction::Restart),
            _ => None,
        }
    }

    /// Convert to camelCase string
    pub fn as_str(&self) -> &'static str {
        match self {
            GameAction::MoveLeft => "moveLeft",
            GameAction::MoveRight => "moveRight",
            GameAction::SoftDrop => "softDrop",
            GameAction::HardDrop => "hardDrop",
            GameAction::RotateCw => "rotateCw",
            GameAction::RotateCcw => "rotateCcw",
            GameAction::Start => "start",
            GameAction::Pause => "pause",
            GameAction::Resume => "resume",
            GameAction::End => "end",
            GameAction::Restart => "restart",
        }
    }
}

/// 24-bit RGB display colour. Serialized as `"#RRGGBB"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Color(pub u32);

impl Color {
    /// Parse `#RRGGBB` (the leading `#` is optional)
    ///
    /// ```
    /// use poly_tetris_types::Color;
    ///
    /// assert_eq!(Color::from_hex("#FF6B6B"), Some(Color(0xFF6B6B)));
    /// assert_eq!(Color::from_hex("4ecdc4"), Some(Color(0x4ECDC4)));
    /// assert_eq!(Color::from_hex("#12345"), None);
    /// ```
    pub fn from_hex(s: &str) -> Option<Self> {
        let digits = s.strip_prefix('#').unwrap_or(s);
        if digits.len() != 6 {
            return None;
        }
        u32::from_str_radix(digits, 16).ok().map(Color)
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:06X}", self.0 & 0xFF_FFFF)
    }
}

impl TryFrom<String> for Color {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Color::from_hex(&value).ok_or_else(|| format!("invalid colour: {value}"))
    }
}

impl From<Color> for String {
    fn from(value: Color) -> Self {
        value.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rotation_index_roundtrip() {
        for rotation in Rotation::ALL {
            assert_eq!(Rotation::from_index(rotation.index()), rotation);
        }
        assert_eq!(Rotation::from_index(5), Rotation::East);
    }

    #[test]
    fn test_rotation_wraps() {
        assert_eq!(Rotation::West.rotate(RotationDirection::Clockwise), Rotation::North);
        assert_eq!(
            Rotation::North.rotate(RotationDirection::CounterClockwise),
            Rotation::West
        );
    }

    #[test]
    fn test_direction_offsets() {
        let p = Position::new(4, 4);
        assert_eq!(p.offset(Direction::Left), Position::new(3, 4));
        assert_eq!(p.offset(Direction::Right), Position::new(5, 4));
        assert_eq!(p.offset(Direction::Down), Position::new(4, 5));
    }

    #[test]
    fn test_collision_result_accessors() {
        assert!(!CollisionResult::None.has_collision());
        assert_eq!(CollisionResult::None.position(), None);

        let hit = CollisionResult::Piece {
            position: Position::new(2, 7),
        };
        assert!(hit.has_collision());
        assert_eq!(hit.position(), Some(Position::new(2, 7)));
    }

    #[test]
    fn test_color_serde_as_hex() {
        let json = serde_json::to_string(&Color(0x45B7D1)).unwrap();
        assert_eq!(json, "\"#45B7D1\"");

        let back: Color = serde_json::from_str("\"#bb8fce\"").unwrap();
        assert_eq!(back, Color(0xBB8FCE));

        assert!(serde_json::from_str::<Color>("\"teal\"").is_err());
    }

    #[test]
    fn test_action_string_roundtrip() {
        for action in [
            GameAction::MoveLeft,
            GameAction::MoveRight,
            GameAction::SoftDrop,
            GameAction::HardDrop,
            GameAction::RotateCw,
            GameAction::RotateCcw,
            GameAction::Start,
            GameAction::Pause,
            GameAction::Resume,
            GameAction::End,
            GameAction::Restart,
        ] {
            assert_eq!(GameAction::from_str(action.as_str()), Some(action));
        }
    }
}
