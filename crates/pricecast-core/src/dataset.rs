//! Dataset discovery and table reading.
//!
//! The on-disk layout is a root directory whose immediate subdirectories are
//! exchanges; every entry inside an exchange is one headerless
//! `stock_id,date,price` table.
//!
//! ```text
//! stock_price_data_files/
//! ├── LSE/
//! │   ├── FLTR.csv
//! │   └── GSK.csv
//! └── NYSE/
//!     └── ASH.csv
//! ```

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use csv::{ReaderBuilder, Trim};
use serde::Serialize;
use thiserror::Error;

use crate::RawObservation;

/// Failures raised while discovering or reading dataset tables.
#[derive(Debug, Error)]
pub enum DatasetError {
    #[error("cannot find datasets directory '{}'", path.display())]
    RootNotFound { path: PathBuf },

    #[error("failed to list '{}': {source}", path.display())]
    Listing {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to read '{}': {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("malformed table '{}': {message}", path.display())]
    Malformed { path: PathBuf, message: String },
}

impl DatasetError {
    /// Whether the failure concerns a single table and the batch may continue.
    pub const fn is_recoverable(&self) -> bool {
        matches!(self, Self::Malformed { .. })
    }
}

/// Kind of a directory entry inside an exchange.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum EntryKind {
    File,
    Other,
}

/// One candidate table inside an exchange.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DatasetEntry {
    pub name: String,
    pub path: PathBuf,
    pub kind: EntryKind,
}

/// An exchange and its entries, in enumeration order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Exchange {
    pub name: String,
    pub entries: Vec<DatasetEntry>,
}

/// Source of exchanges and their raw tables.
pub trait DatasetSource {
    /// Enumerate exchanges. Entry order inside an exchange is whatever the
    /// source produces and is not guaranteed to be sorted.
    fn exchanges(&self) -> Result<Vec<Exchange>, DatasetError>;

    /// Read every row of a regular-file entry.
    fn read_table(&self, entry: &DatasetEntry) -> Result<Vec<RawObservation>, DatasetError>;
}

/// Filesystem-backed dataset rooted at a directory.
#[derive(Debug, Clone)]
pub struct DirectoryDataset {
    root: PathBuf,
}

impl DirectoryDataset {
    /// Open the dataset root, failing if it is missing or not a directory.
    pub fn open(root: impl Into<PathBuf>) -> Result<Self, DatasetError> {
        let root = root.into();
        if !root.is_dir() {
            return Err(DatasetError::RootNotFound { path: root });
        }
        Ok(Self { root })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn list(path: &Path) -> Result<Vec<fs::DirEntry>, DatasetError> {
        let listing = |source| DatasetError::Listing {
            path: path.to_path_buf(),
            source,
        };
        fs::read_dir(path)
            .map_err(listing)?
            .collect::<Result<Vec<_>, _>>()
            .map_err(listing)
    }
}

impl DatasetSource for DirectoryDataset {
    fn exchanges(&self) -> Result<Vec<Exchange>, DatasetError> {
        let mut exchanges = Vec::new();
        for exchange in Self::list(&self.root)? {
            let exchange_path = exchange.path();
            if !exchange_path.is_dir() {
                continue;
            }

            let entries = Self::list(&exchange_path)?
                .into_iter()
                .map(|entry| {
                    let path = entry.path();
                    let kind = if path.is_file() {
                        EntryKind::File
                    } else {
                        EntryKind::Other
                    };
                    DatasetEntry {
                        name: entry.file_name().to_string_lossy().into_owned(),
                        path,
                        kind,
                    }
                })
                .collect();

            exchanges.push(Exchange {
                name: exchange.file_name().to_string_lossy().into_owned(),
                entries,
            });
        }
        Ok(exchanges)
    }

    fn read_table(&self, entry: &DatasetEntry) -> Result<Vec<RawObservation>, DatasetError> {
        let file = fs::File::open(&entry.path).map_err(|source| DatasetError::Read {
            path: entry.path.clone(),
            source,
        })?;
        read_csv(file, &entry.path)
    }
}

/// Parse a headerless `stock_id,date,price` table.
pub fn read_csv<R: io::Read>(reader: R, path: &Path) -> Result<Vec<RawObservation>, DatasetError> {
    let mut rdr = ReaderBuilder::new()
        .has_headers(false)
        .trim(Trim::All)
        .from_reader(reader);

    let mut rows = Vec::new();
    for result in rdr.deserialize() {
        let record: RawObservation = result.map_err(|error| {
            if error.is_io_error() {
                DatasetError::Read {
                    path: path.to_path_buf(),
                    source: io::Error::other(error),
                }
            } else {
                DatasetError::Malformed {
                    path: path.to_path_buf(),
                    message: error.to_string(),
                }
            }
        })?;
        rows.push(record);
    }
    Ok(rows)
}
