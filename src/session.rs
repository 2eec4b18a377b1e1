//! Game state owned by a front end: grid, score, undo history, hint and timer.
//!
//! The engine and the search never see a `Session`; it only passes its grid
//! and score to them.

use std::collections::VecDeque;
use std::fmt;
use std::time::{Duration, Instant};

use log::trace;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::config::{GameConfig, DEFAULT_MAX_UNDO};
use crate::engine::{execute_move, is_game_over};
use crate::error::GridError;
use crate::grid::{Grid, Move, ScoreT, TileT};
use crate::search::{self, Strategy};

fn draw_tile<R: Rng + ?Sized>(rng: &mut R) -> TileT {
    if rng.gen_range(0..10) < 9 {
        2
    } else {
        4
    }
}

/// Places a 2 (90%) or a 4 (10%) on an empty cell chosen uniformly.
///
/// Returns the cell written, or `None` when the grid is full.
pub fn spawn_tile<R: Rng + ?Sized>(grid: &mut Grid, rng: &mut R) -> Option<(usize, usize)> {
    let empty = grid.empty_cells();
    if empty.is_empty() {
        return None;
    }

    let (row, col) = empty[rng.gen_range(0..empty.len())];
    let size = grid.size();
    grid.cells_mut()[row * size + col] = draw_tile(rng);
    Some((row, col))
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Status {
    Playing,
    GameOver,
    TimeUp,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Hint {
    Move(Move),
    NoMove,
}

impl fmt::Display for Hint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Hint::Move(move_) => write!(f, "{}", move_),
            Hint::NoMove => f.write_str("No valid move found."),
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct MoveOutcome {
    pub changed: bool,
    pub gained: ScoreT,
}

struct Snapshot {
    grid: Grid,
    score: ScoreT,
    moveno: u32,
}

pub struct Session<R: Rng> {
    grid: Grid,
    score: ScoreT,
    moveno: u32,
    history: VecDeque<Snapshot>,
    max_undo: usize,
    hint: Option<Hint>,
    strategy: Strategy,
    started: Instant,
    time_limit: Option<Duration>,
    rng: R,
}

impl<R: Rng> Session<R> {
    /// Starts a game on an empty grid with two random tiles.
    pub fn new(config: &GameConfig, mut rng: R) -> Result<Session<R>, GridError> {
        let mut grid = Grid::new(config.size)?;
        spawn_tile(&mut grid, &mut rng);
        spawn_tile(&mut grid, &mut rng);
        Ok(Session::from_grid(grid, config, rng))
    }

    /// Resumes from an existing grid with a zero score.
    pub fn from_grid(grid: Grid, config: &GameConfig, rng: R) -> Session<R> {
        Session {
            grid,
            score: 0,
            moveno: 0,
            history: VecDeque::with_capacity(config.max_undo.min(DEFAULT_MAX_UNDO)),
            max_undo: config.max_undo,
            hint: None,
            strategy: config.strategy,
            started: Instant::now(),
            time_limit: config.time_limit,
            rng,
        }
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn score(&self) -> ScoreT {
        self.score
    }

    /// Number of moves that changed the grid, minus undone ones.
    pub fn moveno(&self) -> u32 {
        self.moveno
    }

    pub fn current_hint(&self) -> Option<Hint> {
        self.hint
    }

    pub fn undo_depth(&self) -> usize {
        self.history.len()
    }

    /// Plays `move_`. A tile is spawned only when the grid changed.
    pub fn apply(&mut self, move_: Move) -> MoveOutcome {
        let snapshot = Snapshot {
            grid: self.grid.clone(),
            score: self.score,
            moveno: self.moveno,
        };
        if !execute_move(&mut self.grid, move_, &mut self.score) {
            return MoveOutcome::default();
        }

        let before = snapshot.score;
        if self.history.len() >= self.max_undo {
            self.history.pop_front();
        }
        self.history.push_back(snapshot);
        self.moveno += 1;
        self.hint = None;
        let cell = spawn_tile(&mut self.grid, &mut self.rng);
        trace!("move {} {}: spawned at {:?}", self.moveno, move_, cell);

        MoveOutcome {
            changed: true,
            gained: self.score - before,
        }
    }

    /// Restores the grid and score from before the last changing move.
    pub fn undo(&mut self) -> bool {
        match self.history.pop_back() {
            Some(snapshot) => {
                self.grid = snapshot.grid;
                self.score = snapshot.score;
                self.moveno = snapshot.moveno;
                self.hint = None;
                trace!("undo to move {}, {} left", self.moveno, self.history.len());
                true
            }
            None => false,
        }
    }

    /// Asks the configured strategy for a move and remembers it until the
    /// next changing move.
    pub fn hint(&mut self) -> Hint {
        let hint = match search::choose(self.strategy, &self.grid, self.score) {
            Some(move_) => Hint::Move(move_),
            None => Hint::NoMove,
        };
        self.hint = Some(hint);
        hint
    }

    /// Lets the configured strategy play one move.
    ///
    /// Returns `None` when no direction changes the grid.
    pub fn step_ai(&mut self) -> Option<(Move, MoveOutcome)> {
        let move_ = search::choose(self.strategy, &self.grid, self.score)?;
        Some((move_, self.apply(move_)))
    }

    pub fn elapsed(&self) -> Duration {
        self.started.elapsed()
    }

    /// Remaining time in timed mode.
    pub fn time_left(&self) -> Option<Duration> {
        self.time_limit.map(|limit| limit.saturating_sub(self.elapsed()))
    }

    pub fn status(&self) -> Status {
        if let Some(limit) = self.time_limit {
            if self.elapsed() >= limit {
                return Status::TimeUp;
            }
        }
        if is_game_over(&self.grid) {
            Status::GameOver
        } else {
            Status::Playing
        }
    }
}

/// Starts a game from validated settings, seeding the RNG from the config
/// when a seed is given and from the OS otherwise.
pub fn start(config: &GameConfig) -> crate::Result<Session<StdRng>> {
    let rng = match config.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    Ok(Session::new(config, rng)?)
}
