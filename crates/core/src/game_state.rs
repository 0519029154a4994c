//! Game state module - the tick and game-over orchestrator
//!
//! [`GameState`] owns the single mutable copy of a session: board, current and next
//! piece, score/level progress, the fall timer and the lifecycle status. Every
//! transition goes through the pure engine functions; the state only stores results.
//!
//! A step either moves the current piece one row down or, when it cannot fall, checks
//! the spawn-blocked game-over rule and otherwise locks the piece, clears rows, updates
//! progress and promotes the next piece.

use log::{debug, error, info, trace};

use crate::board::{lock_piece_to_board, Board};
use crate::collision::would_cause_game_over;
use crate::error::LockError;
use crate::generator::PieceGenerator;
use crate::movement::{ghost_position, hard_drop, move_piece, rotate_piece};
use crate::piece::Piece;
use crate::scoring::{detect_and_clear_lines_with, Progress};
use crate::snapshot::GameSnapshot;
use crate::types::{
    ConfigError, Direction, GameAction, GameConfig, GameStatus, Position, Rotation,
    RotationDirection, GAME_OVER_ROWS,
};

/// The falling piece with its placement
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActivePiece {
    pub piece: Piece,
    pub position: Position,
    pub rotation: Rotation,
}

impl ActivePiece {
    /// Place `piece` at `position` in its canonical rotation
    pub fn spawn(piece: Piece, position: Position) -> Self {
        Self {
            piece,
            position,
            rotation: Rotation::North,
        }
    }
}

/// What one lock did to the session
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LockEvent {
    pub lines_cleared: u32,
    pub points: u32,
    pub level_up: bool,
    /// Cleared row indices on the board as it was right after the lock
    pub cleared_rows: Vec<usize>,
    /// The promoted piece was blocked at spawn
    pub game_over: bool,
}

/// Result of one orchestrator step
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TickOutcome {
    /// Nothing happened (not playing, or the fall timer has not elapsed)
    Idle,
    /// The current piece moved one row down
    Fell,
    /// The current piece locked and the next one spawned
    Locked(LockEvent),
    /// The session ended during this step
    GameOver,
}

/// Session counters
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct GameStats {
    pub total_lines_cleared: u32,
    pub total_pieces_placed: u32,
    pub level: u32,
    pub score: u32,
    /// Playing time accumulated through [`GameState::advance`]
    pub elapsed_ms: u64,
}

/// Complete game state
#[derive(Debug, Clone)]
pub struct GameState {
    config: GameConfig,
    seed: u64,
    generator: PieceGenerator,
    board: Board,
    current: Option<ActivePiece>,
    next: Option<Piece>,
    progress: Progress,
    status: GameStatus,
    fall_timer_ms: u32,
    elapsed_ms: u64,
    pieces_placed: u32,
    /// Last lock event (consumed by observers)
    last_event: Option<LockEvent>,
}

impl GameState {
    /// New session with the default configuration, in the ready state
    pub fn new(seed: u64) -> Self {
        Self::build(GameConfig::default(), seed)
    }

    /// New session with a custom configuration
    pub fn with_config(config: GameConfig, seed: u64) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self::build(config, seed))
    }

    fn build(config: GameConfig, seed: u64) -> Self {
        let mut generator =
            PieceGenerator::with_config(seed, config.generation, config.colors.clone());
        let board = Board::new(config.board_width, config.board_height);
        let progress = Progress::new(
            config.lines_per_level,
            config.base_fall_interval_ms,
            config.level_speed_multiplier,
            config.min_fall_interval_ms,
        );
        let spawn = Position::new(config.spawn_x(), 0);
        let current = ActivePiece::spawn(generator.generate(), spawn);
        let next = generator.generate();

        Self {
            config,
            seed,
            generator,
            board,
            current: Some(current),
            next: Some(next),
            progress,
            status: GameStatus::Ready,
            fall_timer_ms: 0,
            elapsed_ms: 0,
            pieces_placed: 0,
            last_event: None,
        }
    }

    // Lifecycle

    /// Ready/GameOver -> Playing.
    ///
    /// A finished session is replaced by a fresh one seeded from the old generator, so
    /// each new game gets its own piece stream while the whole run stays reproducible.
    pub fn start(&mut self) -> bool {
        match self.status {
            GameStatus::Ready => {}
            GameStatus::GameOver => {
                let seed = self.generator.next_seed();
                *self = Self::build(self.config.clone(), seed);
            }
            GameStatus::Playing | GameStatus::Paused => return false,
        }
        self.status = GameStatus::Playing;
        info!("game started (seed {})", self.seed);
        true
    }

    pub fn pause(&mut self) -> bool {
        if self.status != GameStatus::Playing {
            return false;
        }
        self.status = GameStatus::Paused;
        true
    }

    pub fn resume(&mut self) -> bool {
        if self.status != GameStatus::Paused {
            return false;
        }
        self.status = GameStatus::Playing;
        true
    }

    /// Force game over
    pub fn end(&mut self) -> bool {
        if self.status == GameStatus::GameOver {
            return false;
        }
        self.set_game_over("ended by caller");
        true
    }

    /// Fresh session with the same seed and configuration, already playing
    pub fn restart(&mut self) {
        *self = Self::build(self.config.clone(), self.seed);
        self.start();
    }

    fn set_game_over(&mut self, reason: &str) {
        self.status = GameStatus::GameOver;
        info!(
            "game over ({reason}): score {} level {} lines {}",
            self.progress.score, self.progress.level, self.progress.lines
        );
    }

    // Accessors

    pub fn status(&self) -> GameStatus {
        self.status
    }

    pub fn is_playing(&self) -> bool {
        self.status == GameStatus::Playing
    }

    pub fn is_game_over(&self) -> bool {
        self.status == GameStatus::GameOver
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Get mutable reference to the board (for setting up positions)
    pub fn board_mut(&mut self) -> &mut Board {
        &mut self.board
    }

    pub fn current(&self) -> Option<&ActivePiece> {
        self.current.as_ref()
    }

    pub fn next(&self) -> Option<&Piece> {
        self.next.as_ref()
    }

    /// Replace the current piece; it is moved to the spawn coordinate in rotation North.
    /// `None` clears it.
    pub fn set_current_piece(&mut self, piece: Option<Piece>) {
        let spawn = self.spawn_position();
        self.current = piece.map(|piece| ActivePiece::spawn(piece, spawn));
    }

    pub fn set_next_piece(&mut self, piece: Option<Piece>) {
        self.next = piece;
    }

    pub fn spawn_position(&self) -> Position {
        Position::new(self.config.spawn_x(), 0)
    }

    pub fn score(&self) -> u32 {
        self.progress.score
    }

    pub fn level(&self) -> u32 {
        self.progress.level
    }

    pub fn lines(&self) -> u32 {
        self.progress.lines
    }

    pub fn fall_interval_ms(&self) -> u32 {
        self.progress.fall_interval_ms
    }

    pub fn fall_timer_ms(&self) -> u32 {
        self.fall_timer_ms
    }

    pub fn stats(&self) -> GameStats {
        GameStats {
            total_lines_cleared: self.progress.lines,
            total_pieces_placed: self.pieces_placed,
            level: self.progress.level,
            score: self.progress.score,
            elapsed_ms: self.elapsed_ms,
        }
    }

    /// Fraction of the current level already cleared, in `[0, 1)`
    pub fn next_level_progress(&self) -> f64 {
        let (done, needed) = self.progress.level_progress();
        f64::from(done) / f64::from(needed)
    }

    /// Landing position of the current piece
    pub fn ghost_position(&self) -> Option<Position> {
        let active = self.current.as_ref()?;
        Some(ghost_position(
            &active.piece,
            active.position,
            active.rotation,
            &self.board,
        ))
    }

    /// Take and clear the last lock event.
    pub fn take_last_event(&mut self) -> Option<LockEvent> {
        self.last_event.take()
    }

    pub fn snapshot(&self) -> GameSnapshot {
        GameSnapshot::from_state(self)
    }

    // Player actions. All of them are no-ops unless playing.

    /// Move the current piece one column left or right, or one row down
    pub fn try_move(&mut self, direction: Direction) -> bool {
        if !self.is_playing() {
            return false;
        }
        let Some(active) = self.current.as_mut() else {
            return false;
        };
        match move_piece(
            &active.piece,
            active.position,
            direction,
            active.rotation,
            &self.board,
        ) {
            Some(position) => {
                active.position = position;
                true
            }
            None => false,
        }
    }

    /// Rotate the current piece with wall kicks
    pub fn try_rotate(&mut self, direction: RotationDirection) -> bool {
        if !self.is_playing() {
            return false;
        }
        let Some(active) = self.current.as_mut() else {
            return false;
        };
        match rotate_piece(
            &active.piece,
            active.position,
            active.rotation,
            direction,
            &self.board,
        ) {
            Some((position, rotation)) => {
                active.position = position;
                active.rotation = rotation;
                true
            }
            None => false,
        }
    }

    /// One row down; a successful move restarts the fall timer
    pub fn soft_drop(&mut self) -> bool {
        let moved = self.try_move(Direction::Down);
        if moved {
            self.fall_timer_ms = 0;
        }
        moved
    }

    /// Drop to the landing row and lock immediately
    pub fn hard_drop(&mut self) -> TickOutcome {
        if !self.is_playing() {
            return TickOutcome::Idle;
        }
        if let Some(active) = self.current.as_mut() {
            active.position = hard_drop(
                &active.piece,
                active.position,
                active.rotation,
                &self.board,
            );
        }
        self.lock_outcome()
    }

    /// Apply a game action. Returns whether anything changed.
    pub fn apply_action(&mut self, action: GameAction) -> bool {
        match action {
            GameAction::MoveLeft => self.try_move(Direction::Left),
            GameAction::MoveRight => self.try_move(Direction::Right),
            GameAction::SoftDrop => self.soft_drop(),
            GameAction::HardDrop => self.hard_drop() != TickOutcome::Idle,
            GameAction::RotateCw => self.try_rotate(RotationDirection::Clockwise),
            GameAction::RotateCcw => self.try_rotate(RotationDirection::CounterClockwise),
            GameAction::Start => self.start(),
            GameAction::Pause => self.pause(),
            GameAction::Resume => self.resume(),
            GameAction::End => self.end(),
            GameAction::Restart => {
                self.restart();
                true
            }
        }
    }

    // Gravity

    /// Accumulate elapsed time; one step runs once the fall interval is reached.
    pub fn advance(&mut self, elapsed_ms: u32) -> TickOutcome {
        if !self.is_playing() {
            return TickOutcome::Idle;
        }
        self.elapsed_ms = self.elapsed_ms.saturating_add(u64::from(elapsed_ms));
        self.fall_timer_ms = self.fall_timer_ms.saturating_add(elapsed_ms);

        if self.fall_timer_ms < self.progress.fall_interval_ms {
            return TickOutcome::Idle;
        }
        self.fall_timer_ms = 0;
        self.step()
    }

    /// One forced-down step: fall, or check game over and lock.
    pub fn step(&mut self) -> TickOutcome {
        if !self.is_playing() {
            return TickOutcome::Idle;
        }
        let Some(active) = self.current.as_mut() else {
            return self.lock_outcome();
        };

        if let Some(position) = move_piece(
            &active.piece,
            active.position,
            Direction::Down,
            active.rotation,
            &self.board,
        ) {
            trace!("{} fell to ({}, {})", active.piece.id(), position.x, position.y);
            active.position = position;
            return TickOutcome::Fell;
        }

        if active.position.y < GAME_OVER_ROWS
            && would_cause_game_over(&active.piece, active.position, active.rotation, &self.board)
        {
            self.set_game_over("piece blocked in the top rows");
            return TickOutcome::GameOver;
        }

        self.lock_outcome()
    }

    fn lock_outcome(&mut self) -> TickOutcome {
        match self.lock_current_piece() {
            Ok(event) if event.game_over => TickOutcome::GameOver,
            Ok(event) => TickOutcome::Locked(event),
            Err(_) => TickOutcome::GameOver,
        }
    }

    /// Lock the current piece, clear rows, update progress and promote the next piece.
    ///
    /// A missing current or next piece is an inconsistent state: the error is logged,
    /// the session is forced into game over and the board is left as it was.
    pub fn lock_current_piece(&mut self) -> Result<LockEvent, LockError> {
        let result = self.try_lock();
        if let Err(err) = result {
            error!("lock failed ({}): {err}", err.code());
            self.set_game_over("inconsistent lock");
        }
        result
    }

    fn try_lock(&mut self) -> Result<LockEvent, LockError> {
        let active = self.current.as_ref().ok_or(LockError::NoActivePiece)?;
        if self.next.is_none() {
            return Err(LockError::NoNextPiece);
        }

        let locked = lock_piece_to_board(
            &active.piece,
            active.position,
            active.rotation,
            &self.board,
        );
        let clear = detect_and_clear_lines_with(
            &locked,
            self.progress.level,
            &self.config.points_per_line,
        );
        debug!(
            "locked {} at ({}, {}) {}, cleared {} rows",
            active.piece.id(),
            active.position.x,
            active.position.y,
            active.rotation.as_str(),
            clear.lines_cleared
        );

        self.board = clear.board;
        let level_up = self.progress.record_clear(clear.lines_cleared, clear.points);
        if level_up {
            info!(
                "level up: {} (fall interval {}ms)",
                self.progress.level, self.progress.fall_interval_ms
            );
        }
        self.pieces_placed += 1;
        self.fall_timer_ms = 0;

        let Some(next) = self.next.take() else {
            return Err(LockError::NoNextPiece);
        };
        let promoted = ActivePiece::spawn(next, self.spawn_position());
        let blocked = would_cause_game_over(
            &promoted.piece,
            promoted.position,
            promoted.rotation,
            &self.board,
        );
        self.current = Some(promoted);
        self.next = Some(self.generator.generate());

        if blocked {
            self.set_game_over("spawn area blocked");
        }

        let event = LockEvent {
            lines_cleared: clear.lines_cleared,
            points: clear.points,
            level_up,
            cleared_rows: clear.rows,
            game_over: blocked,
        };
        self.last_event = Some(event.clone());
        Ok(event)
    }
}

impl Default for GameState {
    fn default() -> Self {
        Self::new(1)
    }
}
