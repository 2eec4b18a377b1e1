use std::path::PathBuf;

use crate::grid::{TileT, MAX_SIZE, MIN_SIZE};

#[derive(thiserror::Error, Debug, PartialEq, Eq)]
pub enum GridError {
    #[error("grid size {0} is outside {}..={}", MIN_SIZE, MAX_SIZE)]
    InvalidSize(usize),
    #[error("row {row} has {len} cells, expected {expected}")]
    NotSquare { row: usize, len: usize, expected: usize },
    #[error("tile {value} at ({row}, {col}) is not zero or a power of two")]
    InvalidTile { row: usize, col: usize, value: TileT },
}

#[derive(thiserror::Error, Debug)]
pub enum StoreError {
    #[error("best score file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("best score file {path} does not hold an integer: {contents:?}")]
    Parse { path: PathBuf, contents: String },
}

#[derive(thiserror::Error, Debug, PartialEq, Eq)]
pub enum ConfigError {
    #[error(transparent)]
    Grid(#[from] GridError),
    #[error("max undo depth must be at least 1")]
    NoUndo,
}

#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error(transparent)]
    Grid(#[from] GridError),
    #[error(transparent)]
    Store(#[from] StoreError),
    #[error(transparent)]
    Config(#[from] ConfigError),
}

pub type Result<T> = std::result::Result<T, Error>;
