//! Move selection for hints and autoplay.
//!
//! [`best_move`] enumerates every sequence of three grid-changing moves and
//! keeps the first-ply direction of the best leaf under
//! [`heuristic::evaluate`]. Ties keep the direction that comes first in
//! [`Move::ALL`]. [`best_move_greedy`] looks one move ahead at the score only.

use log::debug;
use rayon::prelude::*;

use crate::engine::execute_move;
use crate::grid::{Grid, Move, ScoreT};
use crate::heuristic::{self, ScoreHeurT};

pub const SEARCH_DEPTH: u32 = 3;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum Strategy {
    /// Three-ply heuristic lookahead.
    #[default]
    Lookahead,
    /// One-ply, largest resulting score.
    Greedy,
}

/// Outcome of searching below one first-ply direction.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BranchEval {
    pub dir: Move,
    /// The first move changes the grid.
    pub legal: bool,
    /// Best leaf evaluation at full depth, `None` for an illegal first move.
    pub best: Option<ScoreHeurT>,
    pub leaves: u32,
    pub moves_evaled: u32,
}

#[derive(Default)]
struct EvalState {
    leaves: u32,
    moves_evaled: u32,
    nomoves: u32,
}

fn score_move_node(
    state: &mut EvalState,
    grid: &Grid,
    score: ScoreT,
    depth: u32,
) -> Option<ScoreHeurT> {
    if depth == 0 {
        state.leaves += 1;
        return Some(heuristic::evaluate(grid));
    }

    let mut best: Option<ScoreHeurT> = None;
    for move_ in Move::ALL {
        let mut next = grid.clone();
        let mut next_score = score;

        state.moves_evaled += 1;
        if !execute_move(&mut next, move_, &mut next_score) {
            state.nomoves += 1;
            continue;
        }
        if let Some(value) = score_move_node(state, &next, next_score, depth - 1) {
            if best.map_or(true, |b| value > b) {
                best = Some(value);
            }
        }
    }
    best
}

fn score_toplevel_move(grid: &Grid, score: ScoreT, dir: Move) -> BranchEval {
    let mut state = EvalState::default();
    let mut next = grid.clone();
    let mut next_score = score;

    state.moves_evaled += 1;
    let legal = execute_move(&mut next, dir, &mut next_score);
    let best = if legal {
        score_move_node(&mut state, &next, next_score, SEARCH_DEPTH - 1)
    } else {
        None
    };

    debug!(
        "Move {}: result {:?}: eval'd {} moves ({} no moves, {} leaves)",
        dir, best, state.moves_evaled, state.nomoves, state.leaves
    );

    BranchEval {
        dir,
        legal,
        best,
        leaves: state.leaves,
        moves_evaled: state.moves_evaled,
    }
}

/// Per-direction lookahead results in [`Move::ALL`] order.
///
/// Branches share nothing but the read-only input grid and run on the rayon
/// pool.
pub fn branch_evals(grid: &Grid, score: ScoreT) -> Vec<BranchEval> {
    Move::ALL
        .par_iter()
        .map(|&dir| score_toplevel_move(grid, score, dir))
        .collect()
}

// Strictly greater wins, so the earliest candidate keeps a tie.
fn pick_first_max<I>(candidates: I) -> Option<Move>
where
    I: IntoIterator<Item = (Move, ScoreHeurT)>,
{
    let mut best: Option<(Move, ScoreHeurT)> = None;

    for (dir, value) in candidates {
        match best {
            Some((_, b)) if value <= b => {}
            _ => best = Some((dir, value)),
        }
    }
    best.map(|(dir, _)| dir)
}

/// Recommended move for `grid`, or `None` when no direction changes it.
///
/// `score` only flows through the simulated moves; the result does not depend
/// on it. A move that changes a line always leaves an empty cell at that
/// line's far end, so the opposite move is legal next: every legal first move
/// reaches full depth.
pub fn best_move(grid: &Grid, score: ScoreT) -> Option<Move> {
    let branches = branch_evals(grid, score);
    let bestmove = pick_first_max(
        branches
            .iter()
            .filter_map(|branch| branch.best.map(|value| (branch.dir, value))),
    );

    debug!("Selected bestmove: {:?}", bestmove);
    bestmove
}

/// One-ply variant: the legal move with the largest resulting score.
pub fn best_move_greedy(grid: &Grid, score: ScoreT) -> Option<Move> {
    pick_first_max(Move::ALL.iter().filter_map(|&dir| {
        let mut next = grid.clone();
        let mut next_score = score;
        execute_move(&mut next, dir, &mut next_score).then(|| (dir, next_score as ScoreHeurT))
    }))
}

pub fn choose(strategy: Strategy, grid: &Grid, score: ScoreT) -> Option<Move> {
    match strategy {
        Strategy::Lookahead => best_move(grid, score),
        Strategy::Greedy => best_move_greedy(grid, score),
    }
}
