//! Generator module - random connected polyominoes
//!
//! Each attempt seeds one random cell of the 4x4 grid and grows it one frontier cell at
//! a time until it reaches a random target size. The accepted shape must reach the
//! minimum size and form a single 4-connected component. After a bounded number of
//! failed attempts the generator hands out [`FALLBACK_SHAPE`] instead, so `generate`
//! never fails.
//!
//! The generator owns its randomness: a `Pcg32` seeded from a `u64` by default, so the
//! same seed always yields the same piece stream.

use log::{debug, warn};
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use crate::piece::{Piece, PieceId};
use crate::shape::{filled_count, frontier, is_connected, Grid, EMPTY_GRID};
use crate::types::{Color, GenerationConfig, GRID_SIZE, PIECE_COLORS};

/// 4-cell L shape used when every growth attempt falls short
pub const FALLBACK_SHAPE: Grid = [
    [true, false, false, false],
    [true, false, false, false],
    [true, true, false, false],
    [false, false, false, false],
];

/// Seeded piece source
#[derive(Debug, Clone)]
pub struct PieceGenerator<R = Pcg32> {
    rng: R,
    config: GenerationConfig,
    palette: Vec<Color>,
    next_id: u64,
}

impl PieceGenerator<Pcg32> {
    /// Generator with the default 4..=7 size bounds and colour palette
    pub fn new(seed: u64) -> Self {
        Self::with_config(seed, GenerationConfig::default(), PIECE_COLORS.to_vec())
    }

    pub fn with_config(seed: u64, config: GenerationConfig, palette: Vec<Color>) -> Self {
        Self::from_rng(Pcg32::seed_from_u64(seed), config, palette)
    }
}

impl<R: Rng> PieceGenerator<R> {
    /// Wrap any random source. An empty palette falls back to the default colours.
    pub fn from_rng(rng: R, config: GenerationConfig, palette: Vec<Color>) -> Self {
        let palette = if palette.is_empty() {
            PIECE_COLORS.to_vec()
        } else {
            palette
        };
        Self {
            rng,
            config,
            palette,
            next_id: 1,
        }
    }

    pub fn config(&self) -> &GenerationConfig {
        &self.config
    }

    /// Draw a seed for a follow-up session from this generator's stream
    pub fn next_seed(&mut self) -> u64 {
        self.rng.random()
    }

    /// Produce one piece; substitutes the fallback shape instead of failing.
    pub fn generate(&mut self) -> Piece {
        let shape = (0..self.config.max_attempts)
            .find_map(|attempt| {
                let grid = self.attempt();
                if grid.is_none() {
                    debug!("piece growth attempt {attempt} rejected");
                }
                grid
            })
            .unwrap_or_else(|| {
                warn!(
                    "no valid shape after {} attempts, using fallback piece",
                    self.config.max_attempts
                );
                FALLBACK_SHAPE
            });

        self.package(shape)
    }

    /// One bounded growth attempt; `None` when the shape misses the acceptance gate.
    fn attempt(&mut self) -> Option<Grid> {
        let min = self.config.min_size.clamp(1, GRID_SIZE * GRID_SIZE);
        let max = self.config.max_size.clamp(min, GRID_SIZE * GRID_SIZE);
        let target = self.rng.random_range(min..=max);
        let grid = grow_shape(&mut self.rng, target);

        (filled_count(&grid) >= self.config.min_size && is_connected(&grid)).then_some(grid)
    }

    fn package(&mut self, shape: Grid) -> Piece {
        let id = PieceId(self.next_id);
        self.next_id += 1;
        let color = self.palette[self.rng.random_range(0..self.palette.len())];
        Piece::new(id, shape, color)
    }
}

/// Grow a connected region from a random seed cell towards `target` cells.
///
/// Stops early if the frontier runs dry; the caller's acceptance gate decides whether
/// the result is usable.
pub fn grow_shape<R: Rng>(rng: &mut R, target: usize) -> Grid {
    let mut grid = EMPTY_GRID;
    let seed_x = rng.random_range(0..GRID_SIZE);
    let seed_y = rng.random_range(0..GRID_SIZE);
    grid[seed_y][seed_x] = true;
    let mut filled = 1usize;

    while filled < target {
        let candidates = frontier(&grid);
        if candidates.is_empty() {
            break;
        }
        let (x, y) = candidates[rng.random_range(0..candidates.len())];
        grid[y][x] = true;
        filled += 1;
    }

    grid
}

/// One-off piece from a caller-supplied random source and default bounds.
///
/// Identifiers restart at 1 for each call; hold a [`PieceGenerator`] for a unique
/// stream.
pub fn generate_piece<R: Rng>(rng: R) -> Piece {
    PieceGenerator::from_rng(rng, GenerationConfig::default(), PIECE_COLORS.to_vec()).generate()
}
