//! Static evaluation of a grid for the lookahead search.
//!
//! The score is a fixed weighted sum and is only meaningful when comparing
//! grids of the same size.
//!
//! The monotonicity term counts adjacent pairs where the left (or upper) tile
//! is `>=` its neighbour. It therefore favours boards that decrease toward the
//! bottom-right and is not symmetric across directions; a board mirrored left
//! to right scores differently. The search relies on this bias as-is.

use crate::grid::Grid;

pub type ScoreHeurT = i64;

pub const SCORE_SUM_WEIGHT: ScoreHeurT = 1;
pub const SCORE_EMPTY_WEIGHT: ScoreHeurT = 200;
pub const SCORE_MONOTONICITY_WEIGHT: ScoreHeurT = 50;
pub const SCORE_MERGES_WEIGHT: ScoreHeurT = 100;

/// Raw counts behind [`evaluate`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Signals {
    pub sum: ScoreHeurT,
    pub empty: ScoreHeurT,
    pub monotonicity: ScoreHeurT,
    pub merges: ScoreHeurT,
}

impl Signals {
    pub fn weighted(&self) -> ScoreHeurT {
        SCORE_SUM_WEIGHT * self.sum
            + SCORE_EMPTY_WEIGHT * self.empty
            + SCORE_MONOTONICITY_WEIGHT * self.monotonicity
            + SCORE_MERGES_WEIGHT * self.merges
    }
}

pub fn signals(grid: &Grid) -> Signals {
    let size = grid.size();
    let mut signals = Signals::default();

    for &value in grid.cells() {
        if value == 0 {
            signals.empty += 1;
        }
        signals.sum += value as ScoreHeurT;
    }

    for i in 0..size {
        for j in 0..size - 1 {
            let (left, right) = (grid.get(i, j), grid.get(i, j + 1));
            let (upper, lower) = (grid.get(j, i), grid.get(j + 1, i));

            if left >= right {
                signals.monotonicity += 1;
            }
            if upper >= lower {
                signals.monotonicity += 1;
            }
            // Pairs of empty cells count too.
            if left == right {
                signals.merges += 1;
            }
            if upper == lower {
                signals.merges += 1;
            }
        }
    }

    signals
}

/// Desirability of `grid`; larger is better.
pub fn evaluate(grid: &Grid) -> ScoreHeurT {
    signals(grid).weighted()
}
