//! Headless runner (default binary).
//!
//! Plays one seeded session with the greedy placement policy and prints the result.
//! Set `RUST_LOG=debug` to follow every lock.

use anyhow::Result;

use poly_tetris::run::{load_game_config, parse_run_args, run_session};

fn main() -> Result<()> {
    env_logger::init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let cfg = parse_run_args(&args)?;
    let game_config = load_game_config(cfg.config_path.as_ref())?;
    let seed = cfg.seed.unwrap_or_else(rand::random);

    let summary = run_session(game_config, seed, cfg.max_pieces)?;
    if cfg.json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
    } else {
        println!("seed:   {}", summary.seed);
        println!("status: {}", summary.status.as_str());
        println!("pieces: {}", summary.pieces);
        println!("score:  {}", summary.score);
        println!("level:  {}", summary.level);
        println!("lines:  {}", summary.lines);
    }
    Ok(())
}
