//! Polyomino falling-block rules engine (workspace facade crate).
//!
//! The implementation lives in dedicated crates under `crates/`; this package exposes
//! them as `poly_tetris::{core, engine, types}` and hosts the headless runner.

pub use poly_tetris_core as core;
pub use poly_tetris_engine as engine;
pub use poly_tetris_types as types;

pub mod run;
