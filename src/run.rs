//! Headless autoplay session used by the `poly-tetris` binary.

use std::path::PathBuf;

use anyhow::{anyhow, Context, Result};
use log::info;
use serde::Serialize;

use crate::core::GameState;
use crate::engine::play_best;
use crate::types::{GameConfig, GameStatus};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunConfig {
    /// Generator seed; random when not given
    pub seed: Option<u64>,
    /// Stop after this many locked pieces
    pub max_pieces: u32,
    pub config_path: Option<PathBuf>,
    pub json: bool,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            seed: None,
            max_pieces: 500,
            config_path: None,
            json: false,
        }
    }
}

/// Final counters of a session
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RunSummary {
    pub seed: u64,
    pub score: u32,
    pub level: u32,
    pub lines: u32,
    pub pieces: u32,
    pub status: GameStatus,
}

pub fn parse_run_args(args: &[String]) -> Result<RunConfig> {
    let mut config = RunConfig::default();
    let mut i = 0usize;
    while i < args.len() {
        match args[i].as_str() {
            "--seed" => {
                i += 1;
                let v = args
                    .get(i)
                    .ok_or_else(|| anyhow!("missing value for --seed"))?;
                config.seed = Some(
                    v.parse::<u64>()
                        .map_err(|_| anyhow!("invalid --seed value: {}", v))?,
                );
            }
            "--pieces" => {
                i += 1;
                let v = args
                    .get(i)
                    .ok_or_else(|| anyhow!("missing value for --pieces"))?;
                config.max_pieces = v
                    .parse::<u32>()
                    .map_err(|_| anyhow!("invalid --pieces value: {}", v))?;
            }
            "--config" => {
                i += 1;
                let v = args
                    .get(i)
                    .ok_or_else(|| anyhow!("missing value for --config"))?;
                config.config_path = Some(PathBuf::from(v));
            }
            "--json" => config.json = true,
            other => {
                return Err(anyhow!("unknown argument: {}", other));
            }
        }
        i += 1;
    }

    Ok(config)
}

/// Read a JSON rules file; absent fields keep their defaults.
pub fn load_game_config(path: Option<&PathBuf>) -> Result<GameConfig> {
    let Some(path) = path else {
        return Ok(GameConfig::default());
    };
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("reading config {}", path.display()))?;
    let config: GameConfig = serde_json::from_str(&text)
        .with_context(|| format!("parsing config {}", path.display()))?;
    Ok(config)
}

/// Play greedily until game over or `max_pieces` locks.
pub fn run_session(game_config: GameConfig, seed: u64, max_pieces: u32) -> Result<RunSummary> {
    let mut state = GameState::with_config(game_config, seed)
        .map_err(|err| anyhow!("invalid config ({}): {}", err.code(), err))?;
    state.start();

    while state.is_playing() && state.stats().total_pieces_placed < max_pieces {
        if play_best(&mut state)
            .map_err(|err| anyhow!("placement failed ({}): {}", err.code(), err))?
            .is_none()
        {
            // No legal placement left for the current piece.
            state.end();
        }
    }

    let stats = state.stats();
    info!(
        "session finished: {} pieces, score {}",
        stats.total_pieces_placed, stats.score
    );
    Ok(RunSummary {
        seed: state.seed(),
        score: stats.score,
        level: stats.level,
        lines: stats.total_lines_cleared,
        pieces: stats.total_pieces_placed,
        status: state.status(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_run_args_uses_defaults() {
        let cfg = parse_run_args(&[]).unwrap();
        assert_eq!(cfg, RunConfig::default());
    }

    #[test]
    fn parse_run_args_parses_flags() {
        let args: Vec<String> = [
            "--seed", "42", "--pieces", "10", "--config", "rules.json", "--json",
        ]
        .iter()
        .map(|s| s.to_string())
        .collect();
        let cfg = parse_run_args(&args).unwrap();
        assert_eq!(cfg.seed, Some(42));
        assert_eq!(cfg.max_pieces, 10);
        assert_eq!(cfg.config_path, Some(PathBuf::from("rules.json")));
        assert!(cfg.json);
    }

    #[test]
    fn parse_run_args_rejects_bad_input() {
        assert!(parse_run_args(&["--seed".to_string()]).is_err());
        assert!(parse_run_args(&["--pieces".to_string(), "many".to_string()]).is_err());
        assert!(parse_run_args(&["--fast".to_string()]).is_err());
    }

    #[test]
    fn run_session_respects_piece_budget() {
        let summary = run_session(GameConfig::default(), 7, 20).unwrap();
        assert!(summary.pieces <= 20);
        assert_eq!(summary.seed, 7);
        assert!(summary.pieces == 20 || summary.status == GameStatus::GameOver);
    }

    #[test]
    fn run_session_rejects_invalid_config() {
        let config = GameConfig {
            board_width: 2,
            ..GameConfig::default()
        };
        assert!(run_session(config, 1, 5).is_err());
    }

    #[test]
    fn missing_config_path_uses_defaults() {
        assert_eq!(load_game_config(None).unwrap(), GameConfig::default());
        assert!(load_game_config(Some(&PathBuf::from("/nonexistent/rules.json"))).is_err());
    }
}
