//! Scoring module - line detection, clear points, level and fall speed
//!
//! Rules:
//! - Clearing `n` rows at once scores `table[n - 1] * level`; clears of more than four
//!   rows are capped at the four-row entry. Clearing nothing scores nothing.
//! - Level is `lines / lines_per_level + 1` and never decreases.
//! - The fall interval decays geometrically with level down to a floor.

use crate::board::Board;
use crate::types::{
    BASE_FALL_INTERVAL_MS, LEVEL_SPEED_MULTIPLIER, LINES_PER_LEVEL, MIN_FALL_INTERVAL_MS,
    POINTS_PER_LINE,
};

/// Points for clearing `lines` rows at `level` with the given base table
///
/// ```
/// use poly_tetris_core::scoring::line_clear_points;
/// use poly_tetris_core::types::POINTS_PER_LINE;
///
/// assert_eq!(line_clear_points(1, 1, &POINTS_PER_LINE), 100);
/// assert_eq!(line_clear_points(4, 2, &POINTS_PER_LINE), 1600);
/// assert_eq!(line_clear_points(6, 1, &POINTS_PER_LINE), 800);
/// assert_eq!(line_clear_points(0, 5, &POINTS_PER_LINE), 0);
/// ```
pub fn line_clear_points(lines: u32, level: u32, table: &[u32; 4]) -> u32 {
    if lines == 0 {
        return 0;
    }
    let index = (lines as usize).min(table.len()) - 1;
    table[index].saturating_mul(level)
}

/// Level for a running line total (levels start at 1)
pub fn calculate_level(total_lines: u32, lines_per_level: u32) -> u32 {
    total_lines / lines_per_level.max(1) + 1
}

/// Fall interval in milliseconds: `base * multiplier^(level - 1)`, floored.
///
/// The decayed value is rounded to whole milliseconds before the floor applies, so
/// level 5 at the defaults gives 656 rather than 656.1.
pub fn fall_interval_ms(level: u32, base_ms: u32, multiplier: f64, floor_ms: u32) -> u32 {
    let exponent = level.saturating_sub(1).min(i32::MAX as u32) as i32;
    let decayed = (f64::from(base_ms) * multiplier.powi(exponent)).round();
    // Very high levels underflow towards 0, which the floor absorbs.
    (decayed as u32).max(floor_ms)
}

/// Fall interval with the default timing constants
pub fn default_fall_interval_ms(level: u32) -> u32 {
    fall_interval_ms(
        level,
        BASE_FALL_INTERVAL_MS,
        LEVEL_SPEED_MULTIPLIER,
        MIN_FALL_INTERVAL_MS,
    )
}

/// Result of scanning and clearing a board after a lock
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineClear {
    /// Board with complete rows removed and empty rows prepended
    pub board: Board,
    /// Removed row indices, top to bottom, relative to the input board
    pub rows: Vec<usize>,
    pub lines_cleared: u32,
    pub points: u32,
}

/// Detect and clear complete rows, scoring with the default table
pub fn detect_and_clear_lines(board: &Board, level: u32) -> LineClear {
    detect_and_clear_lines_with(board, level, &POINTS_PER_LINE)
}

/// Detect and clear complete rows. The input board is not modified.
pub fn detect_and_clear_lines_with(board: &Board, level: u32, table: &[u32; 4]) -> LineClear {
    let rows = board.complete_rows();
    let lines_cleared = rows.len() as u32;
    let board = if rows.is_empty() {
        board.clone()
    } else {
        board.with_rows_cleared(&rows)
    };

    LineClear {
        board,
        rows,
        lines_cleared,
        points: line_clear_points(lines_cleared, level, table),
    }
}

/// Score, line total, level and fall speed of a running session
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Progress {
    pub score: u32,
    pub lines: u32,
    pub level: u32,
    pub fall_interval_ms: u32,
    lines_per_level: u32,
    base_fall_interval_ms: u32,
    min_fall_interval_ms: u32,
    level_speed_multiplier: f64,
}

impl Default for Progress {
    fn default() -> Self {
        Self::new(
            LINES_PER_LEVEL,
            BASE_FALL_INTERVAL_MS,
            LEVEL_SPEED_MULTIPLIER,
            MIN_FALL_INTERVAL_MS,
        )
    }
}

impl Progress {
    /// Fresh level-1 progress with the given tuning
    pub fn new(
        lines_per_level: u32,
        base_fall_interval_ms: u32,
        level_speed_multiplier: f64,
        min_fall_interval_ms: u32,
    ) -> Self {
        Self {
            score: 0,
            lines: 0,
            level: 1,
            fall_interval_ms: fall_interval_ms(
                1,
                base_fall_interval_ms,
                level_speed_multiplier,
                min_fall_interval_ms,
            ),
            lines_per_level: lines_per_level.max(1),
            base_fall_interval_ms,
            min_fall_interval_ms,
            level_speed_multiplier,
        }
    }

    /// Apply a clear. Returns whether the level went up.
    ///
    /// A clear of zero rows changes nothing, including the score.
    pub fn record_clear(&mut self, lines_cleared: u32, points: u32) -> bool {
        if lines_cleared == 0 {
            return false;
        }

        self.score = self.score.saturating_add(points);
        self.lines = self.lines.saturating_add(lines_cleared);

        let level = calculate_level(self.lines, self.lines_per_level);
        if level <= self.level {
            return false;
        }

        self.level = level;
        self.fall_interval_ms = fall_interval_ms(
            level,
            self.base_fall_interval_ms,
            self.level_speed_multiplier,
            self.min_fall_interval_ms,
        );
        true
    }

    /// Lines cleared inside the current level and the lines the level needs
    pub fn level_progress(&self) -> (u32, u32) {
        (self.lines % self.lines_per_level, self.lines_per_level)
    }
}
