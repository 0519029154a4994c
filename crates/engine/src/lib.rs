//! Placement helpers on top of the core rules engine.
//!
//! - [`place`]: move the current piece to a target rotation and column, then lock it
//! - [`autoplay`]: greedy choice of the best placement for the current piece

pub mod autoplay;
pub mod place;

pub use autoplay::{choose_placement, play_best, BoardFeatures, Placement};
pub use place::{apply_place, PlaceError};
