use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use log::warn;

use crate::error::StoreError;
use crate::grid::ScoreT;

/// Best score kept as a single decimal integer in a text file.
#[derive(Clone, Debug)]
pub struct BestScoreStore {
    path: PathBuf,
}

impl BestScoreStore {
    pub fn new(path: impl Into<PathBuf>) -> BestScoreStore {
        BestScoreStore { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// A missing file reads as 0.
    pub fn load(&self) -> Result<ScoreT, StoreError> {
        let contents = match fs::read_to_string(&self.path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(0),
            Err(source) => {
                return Err(StoreError::Io {
                    path: self.path.clone(),
                    source,
                })
            }
        };

        contents.trim().parse().map_err(|_| StoreError::Parse {
            path: self.path.clone(),
            contents,
        })
    }

    /// Like [`load`](Self::load) but falls back to 0 on any error.
    pub fn load_or_default(&self) -> ScoreT {
        self.load().unwrap_or_else(|e| {
            warn!("{}", e);
            0
        })
    }

    pub fn save(&self, score: ScoreT) -> Result<(), StoreError> {
        let io_err = |source: std::io::Error| StoreError::Io {
            path: self.path.clone(),
            source,
        };

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(io_err)?;
        }
        fs::write(&self.path, score.to_string()).map_err(io_err)
    }

    /// Saves `score` if it beats the stored one. Returns the best score after
    /// the update.
    pub fn record(&self, score: ScoreT) -> Result<ScoreT, StoreError> {
        let best = self.load_or_default();
        if score > best {
            self.save(score)?;
            Ok(score)
        } else {
            Ok(best)
        }
    }
}
