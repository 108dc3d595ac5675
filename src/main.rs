//! Headless simulation runner (default binary).
//!
//! Plays a step script against a seeded game and prints the final snapshot as
//! JSON. Logging goes to stderr and is controlled by `RUST_LOG`.

use std::fs;
use std::io::{self, Read};
use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::Parser;

use tetris_sim::core::{GameConfig, GameState, Randomizer};
use tetris_sim::script::{self, Runner};
use tetris_sim::types::{Command, Shape, TICK_MS};

/// Deterministic falling-block simulation driven by a step script.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Seed for the weighted piece stream.
    #[arg(short, long, default_value_t = 1)]
    seed: u64,

    /// JSON file with tuning overrides.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Host milliseconds between ticks during `wait` steps.
    #[arg(long, default_value_t = TICK_MS)]
    tick_ms: u64,

    /// Fixed piece sequence (e.g. `IOTSZJL`), replayed in a loop instead of
    /// random draws.
    #[arg(short, long)]
    pieces: Option<String>,

    /// Leave the game in `ready` until the script issues `start`.
    #[arg(long)]
    no_start: bool,

    /// Script file; reads stdin when omitted or `-`.
    script: Option<PathBuf>,
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    let config = load_config(args.config.as_ref())?;
    let state = match &args.pieces {
        Some(list) => {
            let randomizer = Randomizer::scripted(parse_pieces(list)?)?;
            GameState::with_randomizer(config, randomizer)?
        }
        None => GameState::with_config(args.seed, config)?,
    };

    let source = read_script(args.script.as_ref())?;
    let steps = script::parse(&source)?;

    let mut runner = Runner::with_tick(state, args.tick_ms);
    if !args.no_start {
        runner.apply(Command::Start);
    }
    runner.run(&steps);

    let snapshot = runner.state().snapshot();
    println!("{}", serde_json::to_string_pretty(&snapshot)?);
    Ok(())
}

fn load_config(path: Option<&PathBuf>) -> Result<GameConfig> {
    let Some(path) = path else {
        return Ok(GameConfig::default());
    };
    let text = fs::read_to_string(path)
        .with_context(|| format!("reading config {}", path.display()))?;
    let config: GameConfig = serde_json::from_str(&text)
        .with_context(|| format!("parsing config {}", path.display()))?;
    config.validate()?;
    Ok(config)
}

fn parse_pieces(list: &str) -> Result<Vec<Shape>> {
    list.chars()
        .filter(|c| !c.is_whitespace() && *c != ',')
        .map(|c| match Shape::from_str(c.encode_utf8(&mut [0u8; 4])) {
            Some(shape) if !shape.is_empty() => Ok(shape),
            _ => bail!("unknown piece `{}` in --pieces", c),
        })
        .collect()
}

fn read_script(path: Option<&PathBuf>) -> Result<String> {
    match path {
        Some(path) if path.as_os_str() != "-" => fs::read_to_string(path)
            .with_context(|| format!("reading script {}", path.display())),
        _ => {
            let mut text = String::new();
            io::stdin()
                .read_to_string(&mut text)
                .context("reading script from stdin")?;
            Ok(text)
        }
    }
}
