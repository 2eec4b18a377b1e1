use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;

use crate::error::{ConfigError, GridError};
use crate::grid::{MAX_SIZE, MIN_SIZE};
use crate::search::Strategy;

pub const DEFAULT_SIZE: usize = 4;
pub const DEFAULT_MAX_UNDO: usize = 64;
pub const MIN_TIME_LIMIT_SECS: u64 = 10;
pub const DEFAULT_BEST_SCORE_FILE: &str = "data/best_score.txt";

#[derive(Parser, Debug, Clone)]
#[command(author, version, about = "2048 in the terminal")]
pub struct Args {
    /// Side length of the grid (4, 5 or 6)
    #[arg(long, default_value_t = DEFAULT_SIZE)]
    pub size: usize,

    /// Timed mode: seconds before the game ends (at least 10)
    #[arg(long, value_name = "SECS")]
    pub time_limit: Option<u64>,

    /// File holding the best score
    #[arg(long, value_name = "FILE", default_value = DEFAULT_BEST_SCORE_FILE)]
    pub best_score_file: PathBuf,

    /// How many moves can be undone
    #[arg(long, default_value_t = DEFAULT_MAX_UNDO)]
    pub max_undo: usize,

    /// Move picker for hints and autoplay
    #[arg(long, value_enum, default_value_t = Strategy::Lookahead)]
    pub strategy: Strategy,

    /// Random seed for a reproducible game
    #[arg(long)]
    pub seed: Option<u64>,

    /// Autoplay only: pause between moves
    #[arg(long, value_name = "ms", default_value_t = 300)]
    pub delay_ms: u64,
}

/// Validated game settings.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GameConfig {
    pub size: usize,
    pub time_limit: Option<Duration>,
    pub best_score_file: PathBuf,
    pub max_undo: usize,
    pub strategy: Strategy,
    pub seed: Option<u64>,
    pub delay: Duration,
}

impl Default for GameConfig {
    fn default() -> Self {
        GameConfig {
            size: DEFAULT_SIZE,
            time_limit: None,
            best_score_file: PathBuf::from(DEFAULT_BEST_SCORE_FILE),
            max_undo: DEFAULT_MAX_UNDO,
            strategy: Strategy::default(),
            seed: None,
            delay: Duration::from_millis(300),
        }
    }
}

impl TryFrom<Args> for GameConfig {
    type Error = ConfigError;

    fn try_from(args: Args) -> Result<Self, Self::Error> {
        if !(MIN_SIZE..=MAX_SIZE).contains(&args.size) {
            return Err(GridError::InvalidSize(args.size).into());
        }
        if args.max_undo == 0 {
            return Err(ConfigError::NoUndo);
        }

        Ok(GameConfig {
            size: args.size,
            time_limit: args
                .time_limit
                .map(|secs| Duration::from_secs(secs.max(MIN_TIME_LIMIT_SECS))),
            best_score_file: args.best_score_file,
            max_undo: args.max_undo,
            strategy: args.strategy,
            seed: args.seed,
            delay: Duration::from_millis(args.delay_ms),
        })
    }
}
