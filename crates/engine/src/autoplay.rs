//! Greedy one-piece lookahead built only from core operations.
//!
//! Every reachable `(rotation, column)` for the current piece is tried on a cloned
//! state through [`apply_place`]; the resulting board is ranked by lines cleared
//! (more is better), then holes, aggregate height and bumpiness (less is better).
//! Placements that end the game rank below all others. Ties keep the first candidate
//! in enumeration order.

use std::cmp::Reverse;

use log::{debug, trace};
use poly_tetris_core::{Board, GameState, LockEvent};
use poly_tetris_types::{Rotation, GRID_SIZE};

use crate::place::{apply_place, PlaceError};

/// Classic grid features of a settled board
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct BoardFeatures {
    pub max_height: u32,
    pub aggregate_height: u32,
    pub holes: u32,
    pub bumpiness: u32,
}

impl BoardFeatures {
    pub fn of(board: &Board) -> Self {
        let heights = column_heights(board);
        Self {
            max_height: heights.iter().copied().max().unwrap_or(0),
            aggregate_height: heights.iter().sum(),
            holes: count_holes(board, &heights),
            bumpiness: heights
                .windows(2)
                .map(|pair| pair[0].abs_diff(pair[1]))
                .sum(),
        }
    }
}

/// Height of each column: distance from the floor to its topmost filled cell
pub fn column_heights(board: &Board) -> Vec<u32> {
    let height = board.height();
    (0..board.width())
        .map(|x| {
            (0..height)
                .find(|&y| board.is_occupied(x as i32, y as i32))
                .map_or(0, |top| (height - top) as u32)
        })
        .collect()
}

/// Empty cells below the top of their column
pub fn count_holes(board: &Board, heights: &[u32]) -> u32 {
    let height = board.height();
    heights
        .iter()
        .enumerate()
        .map(|(x, &h)| {
            let top = height - h as usize;
            (top..height)
                .filter(|&y| !board.is_occupied(x as i32, y as i32))
                .count() as u32
        })
        .sum()
}

/// A scored candidate placement
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Placement {
    pub x: i32,
    pub rotation: Rotation,
    pub event: LockEvent,
    pub features: BoardFeatures,
}

impl Placement {
    fn rank(&self) -> (bool, Reverse<u32>, u32, u32, u32) {
        (
            self.event.game_over,
            Reverse(self.event.lines_cleared),
            self.features.holes,
            self.features.aggregate_height,
            self.features.bumpiness,
        )
    }
}

/// Every legal placement of the current piece, in rotation-then-column order
pub fn enumerate_placements(state: &GameState) -> Vec<Placement> {
    let width = state.board().width() as i32;
    let min_x = -(GRID_SIZE as i32 - 1);

    let mut placements = Vec::new();
    for rotation in Rotation::ALL {
        for x in min_x..width {
            let mut trial = state.clone();
            match apply_place(&mut trial, x, rotation) {
                Ok(event) => placements.push(Placement {
                    x,
                    rotation,
                    event,
                    features: BoardFeatures::of(trial.board()),
                }),
                Err(PlaceError::RotationBlocked | PlaceError::ColumnBlocked) => {}
                Err(err) => {
                    trace!("placement ({x}, {}) failed: {err}", rotation.as_str());
                }
            }
        }
    }
    placements
}

/// Best placement for the current piece, or `None` when nothing is placeable
pub fn choose_placement(state: &GameState) -> Option<Placement> {
    enumerate_placements(state)
        .into_iter()
        .min_by_key(Placement::rank)
}

/// Place the current piece at the best candidate.
///
/// Returns `Ok(None)` when no candidate exists.
pub fn play_best(state: &mut GameState) -> Result<Option<LockEvent>, PlaceError> {
    let Some(best) = choose_placement(state) else {
        return Ok(None);
    };
    debug!(
        "autoplay: x {} {} (lines {}, holes {})",
        best.x,
        best.rotation.as_str(),
        best.event.lines_cleared,
        best.features.holes
    );
    apply_place(state, best.x, best.rotation).map(Some)
}
