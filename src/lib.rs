//! 2048 on a square grid of side 4 to 6: the move engine, a three-ply
//! lookahead player, and the session state a terminal front end drives.

pub mod config;
pub mod engine;
pub mod error;
pub mod grid;
pub mod heuristic;
pub mod render;
pub mod search;
pub mod session;
pub mod store;

pub use config::{Args, GameConfig};
pub use engine::{execute_move, is_game_over, slide_and_merge, LineOutcome};
pub use error::{Error, Result};
pub use grid::{Grid, Move, ScoreT, TileT};
pub use heuristic::evaluate;
pub use search::{best_move, Strategy};
pub use session::{Hint, MoveOutcome, Session, Status};
pub use store::BestScoreStore;
