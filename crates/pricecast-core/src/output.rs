//! Persistence of extended series as per-stock CSV files.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use csv::WriterBuilder;
use serde::Serialize;
use thiserror::Error;

use crate::{ExtendedSeries, StockId, TradeDate};

#[derive(Debug, Error)]
pub enum OutputError {
    #[error("failed to prepare results directory '{}': {source}", path.display())]
    Prepare {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to remove previous result '{}': {source}", path.display())]
    Remove {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to write '{}': {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },
}

#[derive(Debug, Serialize)]
struct OutputRecord<'a> {
    stock_id: &'a StockId,
    date: TradeDate,
    price: f64,
}

/// Results directory holding one `<stock_id>.csv` per processed series.
#[derive(Debug, Clone)]
pub struct ResultsDir {
    root: PathBuf,
}

impl ResultsDir {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn path_for(&self, stock_id: &StockId) -> PathBuf {
        self.root.join(stock_id.file_name())
    }

    /// Create the directory if needed and delete the regular files directly
    /// inside it. Subdirectories are left alone. Returns the number removed.
    pub fn clear(&self) -> Result<usize, OutputError> {
        let prepare = |source| OutputError::Prepare {
            path: self.root.clone(),
            source,
        };
        fs::create_dir_all(&self.root).map_err(prepare)?;

        let mut removed = 0;
        for entry in fs::read_dir(&self.root).map_err(prepare)? {
            let path = entry.map_err(prepare)?.path();
            if !path.is_file() {
                continue;
            }
            fs::remove_file(&path).map_err(|source| OutputError::Remove {
                path: path.clone(),
                source,
            })?;
            removed += 1;
        }
        Ok(removed)
    }

    /// Write a headerless `stock_id,date,price` file, replacing any existing one.
    pub fn write(&self, series: &ExtendedSeries) -> Result<PathBuf, OutputError> {
        let path = self.path_for(series.stock_id());
        let write_error = |source| OutputError::Write {
            path: path.clone(),
            source,
        };

        let mut writer = WriterBuilder::new()
            .has_headers(false)
            .from_path(&path)
            .map_err(write_error)?;
        for (date, price) in series.rows() {
            writer
                .serialize(OutputRecord {
                    stock_id: series.stock_id(),
                    date,
                    price,
                })
                .map_err(write_error)?;
        }
        writer
            .flush()
            .map_err(|source| write_error(csv::Error::from(source)))?;

        Ok(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{predict, Observation, Window};

    fn extended(stock: &str) -> ExtendedSeries {
        let stock_id = StockId::parse(stock).expect("valid");
        let start = TradeDate::parse_day_first("01-01-2024").expect("valid");
        let observations = (0..10)
            .map(|i| Observation {
                stock_id: stock_id.clone(),
                date: start.add_days(i).expect("in range"),
                price: 10.0 + i as f64,
            })
            .collect();
        let window = Window::try_from_observations(observations).expect("window");
        predict(&window).expect("prediction")
    }

    #[test]
    fn clear_keeps_subdirectories() {
        let dir = tempfile::tempdir().expect("tempdir");
        fs::write(dir.path().join("OLD.csv"), "stale").expect("write");
        fs::create_dir(dir.path().join("archive")).expect("mkdir");

        let results = ResultsDir::new(dir.path());
        assert_eq!(results.clear().expect("clear"), 1);
        assert!(!dir.path().join("OLD.csv").exists());
        assert!(dir.path().join("archive").is_dir());
    }

    #[test]
    fn clear_creates_missing_directory() {
        let dir = tempfile::tempdir().expect("tempdir");
        let results = ResultsDir::new(dir.path().join("out"));
        assert_eq!(results.clear().expect("clear"), 0);
        assert!(results.root().is_dir());
    }

    #[test]
    fn writes_thirteen_headerless_rows() {
        let dir = tempfile::tempdir().expect("tempdir");
        let results = ResultsDir::new(dir.path());
        let path = results.write(&extended("ABC")).expect("write");

        assert_eq!(path, dir.path().join("ABC.csv"));
        let contents = fs::read_to_string(&path).expect("read back");
        let lines: Vec<&str> = contents.lines().collect();
        assert_eq!(lines.len(), 13);
        assert_eq!(lines[0], "ABC,2024-01-01,10.0");
        assert_eq!(lines[10], "ABC,2024-01-11,18.0");
    }
}
