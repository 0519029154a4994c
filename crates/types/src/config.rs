//! Session configuration consumed (not owned) by the engine.
//!
//! Every field has a default matching the classic rules, so a JSON file only needs to
//! name the values it overrides.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::{
    Color, BASE_FALL_INTERVAL_MS, BOARD_HEIGHT, BOARD_WIDTH, GAME_OVER_ROWS, GRID_SIZE,
    LEVEL_SPEED_MULTIPLIER, LINES_PER_LEVEL, MAX_GENERATION_ATTEMPTS, MAX_PIECE_SIZE,
    MIN_FALL_INTERVAL_MS, MIN_PIECE_SIZE, PIECE_COLORS, POINTS_PER_LINE,
};

/// Shape generator bounds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct GenerationConfig {
    pub min_size: usize,
    pub max_size: usize,
    pub max_attempts: u32,
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            min_size: MIN_PIECE_SIZE,
            max_size: MAX_PIECE_SIZE,
            max_attempts: MAX_GENERATION_ATTEMPTS,
        }
    }
}

/// Complete rules configuration for one game session
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct GameConfig {
    pub board_width: usize,
    pub board_height: usize,
    pub base_fall_interval_ms: u32,
    pub min_fall_interval_ms: u32,
    pub level_speed_multiplier: f64,
    /// Points for 1, 2, 3 and 4 simultaneous rows
    pub points_per_line: [u32; 4],
    pub lines_per_level: u32,
    pub generation: GenerationConfig,
    pub colors: Vec<Color>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            board_width: BOARD_WIDTH,
            board_height: BOARD_HEIGHT,
            base_fall_interval_ms: BASE_FALL_INTERVAL_MS,
            min_fall_interval_ms: MIN_FALL_INTERVAL_MS,
            level_speed_multiplier: LEVEL_SPEED_MULTIPLIER,
            points_per_line: POINTS_PER_LINE,
            lines_per_level: LINES_PER_LEVEL,
            generation: GenerationConfig::default(),
            colors: PIECE_COLORS.to_vec(),
        }
    }
}

impl GameConfig {
    /// Check the invariants the engine relies on.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.board_width < GRID_SIZE {
            return Err(ConfigError::BoardTooNarrow(self.board_width));
        }
        if self.board_height <= GAME_OVER_ROWS as usize {
            return Err(ConfigError::BoardTooShort(self.board_height));
        }
        if self.lines_per_level == 0 {
            return Err(ConfigError::ZeroLinesPerLevel);
        }
        if self.colors.is_empty() {
            return Err(ConfigError::EmptyPalette);
        }

        let generation = &self.generation;
        if generation.min_size == 0
            || generation.min_size > generation.max_size
            || generation.max_size > GRID_SIZE * GRID_SIZE
        {
            return Err(ConfigError::InvalidPieceSize {
                min: generation.min_size,
                max: generation.max_size,
            });
        }
        if generation.max_attempts == 0 {
            return Err(ConfigError::ZeroGenerationAttempts);
        }

        let m = self.level_speed_multiplier;
        if !(m > 0.0 && m <= 1.0) {
            return Err(ConfigError::InvalidSpeedMultiplier(m));
        }
        if self.min_fall_interval_ms > self.base_fall_interval_ms {
            return Err(ConfigError::IntervalFloorAboveBase {
                floor: self.min_fall_interval_ms,
                base: self.base_fall_interval_ms,
            });
        }

        Ok(())
    }

    /// Spawn coordinate for new pieces: horizontally centred 4×4 box on row 0
    pub fn spawn_x(&self) -> i32 {
        (self.board_width / 2) as i32 - 2
    }
}

/// Rejected configuration values
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ConfigError {
    BoardTooNarrow(usize),
    BoardTooShort(usize),
    ZeroLinesPerLevel,
    EmptyPalette,
    InvalidPieceSize { min: usize, max: usize },
    ZeroGenerationAttempts,
    InvalidSpeedMultiplier(f64),
    IntervalFloorAboveBase { floor: u32, base: u32 },
}

impl ConfigError {
    pub fn code(&self) -> &'static str {
        match self {
            ConfigError::BoardTooNarrow(_) | ConfigError::BoardTooShort(_) => "invalid_board",
            ConfigError::ZeroLinesPerLevel => "invalid_lines_per_level",
            ConfigError::EmptyPalette => "invalid_palette",
            ConfigError::InvalidPieceSize { .. } | ConfigError::ZeroGenerationAttempts => {
                "invalid_generation"
            }
            ConfigError::InvalidSpeedMultiplier(_) | ConfigError::IntervalFloorAboveBase { .. } => {
                "invalid_timing"
            }
        }
    }
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::BoardTooNarrow(w) => {
                write!(f, "board width {w} is narrower than the {GRID_SIZE}-cell piece grid")
            }
            ConfigError::BoardTooShort(h) => write!(f, "board height {h} is too short"),
            ConfigError::ZeroLinesPerLevel => write!(f, "lines per level must be positive"),
            ConfigError::EmptyPalette => write!(f, "colour palette is empty"),
            ConfigError::InvalidPieceSize { min, max } => {
                write!(f, "piece size bounds {min}..={max} are invalid")
            }
            ConfigError::ZeroGenerationAttempts => {
                write!(f, "generation attempts must be positive")
            }
            ConfigError::InvalidSpeedMultiplier(m) => {
                write!(f, "speed multiplier {m} must be in (0, 1]")
            }
            ConfigError::IntervalFloorAboveBase { floor, base } => {
                write!(f, "fall interval floor {floor}ms exceeds base {base}ms")
            }
        }
    }
}

impl std::error::Error for ConfigError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = GameConfig::default();
        assert_eq!(config.validate(), Ok(()));
        assert_eq!(config.spawn_x(), 3);
        assert_eq!(config.colors.len(), 10);
    }

    #[test]
    fn test_partial_json_falls_back_to_defaults() {
        let config: GameConfig =
            serde_json::from_str(r#"{ "boardWidth": 12, "generation": { "maxSize": 5 } }"#)
                .unwrap();
        assert_eq!(config.board_width, 12);
        assert_eq!(config.board_height, BOARD_HEIGHT);
        assert_eq!(config.generation.min_size, MIN_PIECE_SIZE);
        assert_eq!(config.generation.max_size, 5);
        assert_eq!(config.spawn_x(), 4);
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        let narrow = GameConfig {
            board_width: 3,
            ..GameConfig::default()
        };
        assert_eq!(narrow.validate(), Err(ConfigError::BoardTooNarrow(3)));

        let mut sizes = GameConfig::default();
        sizes.generation.min_size = 8;
        assert!(matches!(
            sizes.validate(),
            Err(ConfigError::InvalidPieceSize { min: 8, max: 7 })
        ));

        let speed = GameConfig {
            level_speed_multiplier: 1.5,
            ..GameConfig::default()
        };
        assert_eq!(speed.validate().unwrap_err().code(), "invalid_timing");

        let palette = GameConfig {
            colors: Vec::new(),
            ..GameConfig::default()
        };
        assert_eq!(palette.validate(), Err(ConfigError::EmptyPalette));
    }
}
