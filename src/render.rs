//! Text view of a game. Reads the grid and scores, never mutates them.

use std::fmt::Write;

use crate::grid::{Grid, ScoreT, TileT};

const CELL_WIDTH: usize = 6;
const COLOR_COUNT: u32 = 7;

// Background colors cycled by tile rank: blue, green, red, cyan, magenta,
// yellow, white.
const TILE_BACKGROUNDS: [u8; COLOR_COUNT as usize] = [44, 42, 41, 46, 45, 43, 47];
const BORDER: &str = "\x1b[33m";
const RESET: &str = "\x1b[0m";

/// Color slot of a tile: 0 for empty, otherwise `1..=7` cycling with log2.
pub fn color_index(value: TileT) -> u32 {
    if value == 0 {
        return 0;
    }
    (value.trailing_zeros().max(1) - 1) % COLOR_COUNT + 1
}

fn cell_width(grid: &Grid) -> usize {
    let digits = grid.max_tile().to_string().len();
    CELL_WIDTH.max(digits + 1)
}

/// The board without colors, one line per row plus borders.
pub fn board_string(grid: &Grid) -> String {
    render(grid, false)
}

fn render(grid: &Grid, color: bool) -> String {
    let width = cell_width(grid);
    let (border, reset) = if color { (BORDER, RESET) } else { ("", "") };
    let separator = format!(
        "{}{}+{}\n",
        border,
        format!("+{}", "-".repeat(width)).repeat(grid.size()),
        reset
    );
    let mut out = String::new();

    out.push_str(&separator);
    for row in grid.rows() {
        for &value in row {
            let _ = write!(out, "{}|{}", border, reset);
            if value == 0 {
                let _ = write!(out, "{:>width$}", ' ', width = width);
            } else if color {
                let bg = TILE_BACKGROUNDS[(color_index(value) - 1) as usize];
                let _ = write!(out, "\x1b[37;{}m{:>width$}{}", bg, value, RESET, width = width);
            } else {
                let _ = write!(out, "{:>width$}", value, width = width);
            }
        }
        let _ = writeln!(out, "{}|{}", border, reset);
        out.push_str(&separator);
    }
    out
}

pub fn print_board(grid: &Grid, score: ScoreT, best_score: ScoreT) {
    print!("{}", render(grid, true));
    println!("Score: {}", score);
    println!("Best Score: {}", best_score);
}

pub fn clear_screen() -> Result<(), clearscreen::Error> {
    clearscreen::clear()
}
