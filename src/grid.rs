use std::fmt;

use crate::error::GridError;

pub type TileT = u64;
pub type ScoreT = u64;

pub const MIN_SIZE: usize = 4;
pub const MAX_SIZE: usize = 6;

/// A direction the tiles can be pushed in.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Move {
    Up,
    Down,
    Left,
    Right,
}

impl Move {
    /// Enumeration order used everywhere a move list is scanned, including
    /// the tie-break of the search.
    pub const ALL: [Move; 4] = [Move::Up, Move::Down, Move::Left, Move::Right];

    pub fn name(self) -> &'static str {
        match self {
            Move::Up => "Up",
            Move::Down => "Down",
            Move::Left => "Left",
            Move::Right => "Right",
        }
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

fn is_valid_tile(value: TileT) -> bool {
    value == 0 || value.is_power_of_two()
}

/// Square board of tiles, `0` meaning empty. Stored row-major.
///
/// Every constructor validates the side length and the tile values, so the
/// engine can treat any `Grid` as well formed.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct Grid {
    size: usize,
    cells: Vec<TileT>,
}

impl Grid {
    pub fn new(size: usize) -> Result<Grid, GridError> {
        if !(MIN_SIZE..=MAX_SIZE).contains(&size) {
            return Err(GridError::InvalidSize(size));
        }
        Ok(Grid {
            size,
            cells: vec![0; size * size],
        })
    }

    pub fn from_rows<R: AsRef<[TileT]>>(rows: &[R]) -> Result<Grid, GridError> {
        let mut grid = Grid::new(rows.len())?;
        let size = grid.size;

        for (row, cells) in rows.iter().enumerate() {
            let cells = cells.as_ref();
            if cells.len() != size {
                return Err(GridError::NotSquare {
                    row,
                    len: cells.len(),
                    expected: size,
                });
            }
            for (col, &value) in cells.iter().enumerate() {
                if !is_valid_tile(value) {
                    return Err(GridError::InvalidTile { row, col, value });
                }
                grid.cells[row * size + col] = value;
            }
        }
        Ok(grid)
    }

    #[inline]
    pub fn size(&self) -> usize {
        self.size
    }

    #[inline]
    pub fn get(&self, row: usize, col: usize) -> TileT {
        self.cells[row * self.size + col]
    }

    pub fn set(&mut self, row: usize, col: usize, value: TileT) -> Result<(), GridError> {
        if !is_valid_tile(value) {
            return Err(GridError::InvalidTile { row, col, value });
        }
        self.cells[row * self.size + col] = value;
        Ok(())
    }

    /// Flat row-major view of all cells.
    #[inline]
    pub fn cells(&self) -> &[TileT] {
        &self.cells
    }

    // Writers inside the crate only ever store merge results or spawned tiles.
    #[inline]
    pub(crate) fn cells_mut(&mut self) -> &mut [TileT] {
        &mut self.cells
    }

    pub fn rows(&self) -> impl Iterator<Item = &[TileT]> + '_ {
        self.cells.chunks(self.size)
    }

    pub fn to_rows(&self) -> Vec<Vec<TileT>> {
        self.rows().map(|row| row.to_vec()).collect()
    }

    pub fn count_empty(&self) -> usize {
        self.cells.iter().filter(|&&v| v == 0).count()
    }

    /// Coordinates of empty cells in row-major order.
    pub fn empty_cells(&self) -> Vec<(usize, usize)> {
        self.cells
            .iter()
            .enumerate()
            .filter(|(_, v)| **v == 0)
            .map(|(i, _)| (i / self.size, i % self.size))
            .collect()
    }

    pub fn count_tiles(&self) -> usize {
        self.cells.len() - self.count_empty()
    }

    pub fn max_tile(&self) -> TileT {
        self.cells.iter().copied().max().unwrap_or(0)
    }
}

impl fmt::Debug for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Grid({}x{})", self.size, self.size)?;
        for row in self.rows() {
            for value in row {
                write!(f, "{:>6}", value)?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_out_of_range_sizes() {
        assert_eq!(Grid::new(3), Err(GridError::InvalidSize(3)));
        assert_eq!(Grid::new(7), Err(GridError::InvalidSize(7)));
        for size in MIN_SIZE..=MAX_SIZE {
            let grid = Grid::new(size).unwrap();
            assert_eq!(grid.count_empty(), size * size);
        }
    }

    #[test]
    fn rejects_ragged_rows() {
        let rows: Vec<Vec<TileT>> = vec![vec![0; 4], vec![0; 4], vec![0; 3], vec![0; 4]];
        assert_eq!(
            Grid::from_rows(&rows),
            Err(GridError::NotSquare {
                row: 2,
                len: 3,
                expected: 4
            })
        );
    }

    #[test]
    fn rejects_non_power_of_two_tiles() {
        let rows: [[TileT; 4]; 4] = [[0, 2, 4, 8], [0, 0, 0, 0], [0, 6, 0, 0], [0, 0, 0, 0]];
        assert_eq!(
            Grid::from_rows(&rows),
            Err(GridError::InvalidTile {
                row: 2,
                col: 1,
                value: 6
            })
        );

        let mut grid = Grid::new(4).unwrap();
        assert!(grid.set(0, 0, 12).is_err());
        assert!(grid.set(0, 0, 16).is_ok());
        assert_eq!(grid.get(0, 0), 16);
    }

    #[test]
    fn empty_cells_are_row_major() {
        let rows: [[TileT; 4]; 4] = [[2, 0, 2, 2], [2, 2, 2, 2], [2, 2, 2, 0], [2, 2, 2, 2]];
        let grid = Grid::from_rows(&rows).unwrap();
        assert_eq!(grid.empty_cells(), vec![(0, 1), (2, 3)]);
        assert_eq!(grid.count_tiles(), 14);
        assert_eq!(grid.to_rows()[2], vec![2, 2, 2, 0]);
    }

    #[test]
    fn move_order_and_names() {
        let names: Vec<_> = Move::ALL.iter().map(|m| m.to_string()).collect();
        assert_eq!(names, ["Up", "Down", "Left", "Right"]);
    }
}
