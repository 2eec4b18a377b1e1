//! Move resolution: the slide-and-merge line transform, the four directional
//! operators built on it, and the game-over test.

use crate::grid::{Grid, Move, ScoreT, TileT, MAX_SIZE};

/// Result of sliding a single line.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct LineOutcome {
    /// The final line differs from the input. Packing alone counts.
    pub changed: bool,
    /// Sum of the doubled values produced by merges.
    pub score_delta: ScoreT,
}

/// Pushes the nonzero tiles of `line` toward index 0 and merges equal
/// neighbours once each, left to right.
///
/// A merged tile never merges again in the same pass, so `[2, 2, 2, 2]`
/// becomes `[4, 4, 0, 0]`. Tiles are streamed through a single pending slot:
/// the write cursor always trails the read cursor, so the line can be
/// rewritten in place.
pub fn slide_and_merge(line: &mut [TileT]) -> LineOutcome {
    let mut outcome = LineOutcome::default();
    let mut out = 0;
    let mut pending: Option<TileT> = None;

    for i in 0..line.len() {
        let value = line[i];
        if value == 0 {
            continue;
        }
        match pending {
            Some(prev) if prev == value => {
                let merged = value * 2;
                outcome.score_delta += merged;
                outcome.changed |= put(line, out, merged);
                out += 1;
                pending = None;
            }
            Some(prev) => {
                outcome.changed |= put(line, out, prev);
                out += 1;
                pending = Some(value);
            }
            None => pending = Some(value),
        }
    }
    if let Some(prev) = pending {
        outcome.changed |= put(line, out, prev);
        out += 1;
    }
    for i in out..line.len() {
        outcome.changed |= put(line, i, 0);
    }

    outcome
}

#[inline]
fn put(line: &mut [TileT], index: usize, value: TileT) -> bool {
    let changed = line[index] != value;
    line[index] = value;
    changed
}

/// Flat indices of line `k` of a `size`x`size` grid, in the traversal order
/// of `move_`: the first index is the edge tiles are pushed toward.
fn line_cells(size: usize, move_: Move, k: usize) -> impl Iterator<Item = usize> {
    let size_i = size as isize;
    let k_i = k as isize;
    let (start, step) = match move_ {
        Move::Left => (k_i * size_i, 1),
        Move::Right => (k_i * size_i + size_i - 1, -1),
        Move::Up => (k_i, size_i),
        Move::Down => ((size_i - 1) * size_i + k_i, -size_i),
    };

    (0..size_i).map(move |i| (start + i * step) as usize)
}

/// Applies `move_` to every row or column of `grid` in place and adds the
/// merge total to `score`.
///
/// Returns whether any line changed. This is the legality signal: callers
/// must not spawn a tile when it is `false`.
pub fn execute_move(grid: &mut Grid, move_: Move, score: &mut ScoreT) -> bool {
    let size = grid.size();
    let mut buf: [TileT; MAX_SIZE] = [0; MAX_SIZE];
    let line = &mut buf[..size];
    let cells = grid.cells_mut();
    let mut changed = false;
    let mut score_delta: ScoreT = 0;

    for k in 0..size {
        for (slot, idx) in line.iter_mut().zip(line_cells(size, move_, k)) {
            *slot = cells[idx];
        }
        let outcome = slide_and_merge(line);
        if outcome.changed {
            for (&value, idx) in line.iter().zip(line_cells(size, move_, k)) {
                cells[idx] = value;
            }
            changed = true;
        }
        score_delta += outcome.score_delta;
    }

    *score += score_delta;
    changed
}

pub fn move_up(grid: &mut Grid, score: &mut ScoreT) -> bool {
    execute_move(grid, Move::Up, score)
}

pub fn move_down(grid: &mut Grid, score: &mut ScoreT) -> bool {
    execute_move(grid, Move::Down, score)
}

pub fn move_left(grid: &mut Grid, score: &mut ScoreT) -> bool {
    execute_move(grid, Move::Left, score)
}

pub fn move_right(grid: &mut Grid, score: &mut ScoreT) -> bool {
    execute_move(grid, Move::Right, score)
}

/// Whether `move_` would change `grid`, without touching it.
pub fn can_move(grid: &Grid, move_: Move) -> bool {
    let size = grid.size();
    let mut buf: [TileT; MAX_SIZE] = [0; MAX_SIZE];
    let line = &mut buf[..size];
    let cells = grid.cells();

    (0..size).any(|k| {
        for (slot, idx) in line.iter_mut().zip(line_cells(size, move_, k)) {
            *slot = cells[idx];
        }
        slide_and_merge(line).changed
    })
}

/// Directions that would change `grid`, in `Move::ALL` order.
pub fn legal_moves(grid: &Grid) -> Vec<Move> {
    Move::ALL
        .iter()
        .copied()
        .filter(|&move_| can_move(grid, move_))
        .collect()
}

/// True when no cell is empty and no two orthogonal neighbours are equal.
pub fn is_game_over(grid: &Grid) -> bool {
    let size = grid.size();

    for i in 0..size {
        for j in 0..size {
            let value = grid.get(i, j);
            if value == 0 {
                return false;
            }
            if i + 1 < size && value == grid.get(i + 1, j) {
                return false;
            }
            if j + 1 < size && value == grid.get(i, j + 1) {
                return false;
            }
        }
    }
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    fn slid(mut line: Vec<TileT>) -> (Vec<TileT>, LineOutcome) {
        let outcome = slide_and_merge(&mut line);
        (line, outcome)
    }

    #[test]
    fn merges_pairs_once() {
        let (line, outcome) = slid(vec![2, 2, 4, 4]);
        assert_eq!(line, vec![4, 8, 0, 0]);
        assert_eq!(outcome, LineOutcome { changed: true, score_delta: 12 });

        let (line, outcome) = slid(vec![2, 2, 2, 2]);
        assert_eq!(line, vec![4, 4, 0, 0]);
        assert_eq!(outcome.score_delta, 8);
    }

    #[test]
    fn packed_line_without_pairs_is_unchanged() {
        let (line, outcome) = slid(vec![2, 4, 8, 16]);
        assert_eq!(line, vec![2, 4, 8, 16]);
        assert_eq!(outcome, LineOutcome::default());
    }

    #[test]
    fn packing_alone_is_a_change() {
        let (line, outcome) = slid(vec![0, 0, 2, 4]);
        assert_eq!(line, vec![2, 4, 0, 0]);
        assert!(outcome.changed);
        assert_eq!(outcome.score_delta, 0);
    }

    #[test]
    fn merges_across_gaps() {
        let (line, outcome) = slid(vec![8, 0, 0, 8, 0, 2]);
        assert_eq!(line, vec![16, 2, 0, 0, 0, 0]);
        assert_eq!(outcome.score_delta, 16);

        let (line, _) = slid(vec![4, 2, 2, 0, 0]);
        assert_eq!(line, vec![4, 4, 0, 0, 0]);
    }

    #[test]
    fn empty_line_is_unchanged() {
        let (line, outcome) = slid(vec![0; 5]);
        assert_eq!(line, vec![0; 5]);
        assert!(!outcome.changed);
    }

    #[test]
    fn line_cells_follow_traversal_order() {
        let left: Vec<_> = line_cells(4, Move::Left, 1).collect();
        let right: Vec<_> = line_cells(4, Move::Right, 1).collect();
        let up: Vec<_> = line_cells(4, Move::Up, 2).collect();
        let down: Vec<_> = line_cells(4, Move::Down, 2).collect();
        assert_eq!(left, vec![4, 5, 6, 7]);
        assert_eq!(right, vec![7, 6, 5, 4]);
        assert_eq!(up, vec![2, 6, 10, 14]);
        assert_eq!(down, vec![14, 10, 6, 2]);
    }

    #[test]
    fn unchanged_move_leaves_score_alone() {
        let rows: [[TileT; 4]; 4] = [[2, 0, 0, 0], [4, 0, 0, 0], [8, 0, 0, 0], [16, 0, 0, 0]];
        let mut grid = Grid::from_rows(&rows).unwrap();
        let mut score = 7;
        assert!(!execute_move(&mut grid, Move::Left, &mut score));
        assert_eq!(score, 7);
        assert!(!can_move(&grid, Move::Left));
        assert!(!can_move(&grid, Move::Up));
        assert_eq!(legal_moves(&grid), vec![Move::Right]);
    }
}
