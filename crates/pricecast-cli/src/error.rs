use pricecast_core::{CoreError, DatasetError};
use thiserror::Error;

/// CLI-level error categories mapped to exit codes.
#[derive(Debug, Error)]
pub enum CliError {
    #[error("configuration error: {0}")]
    Config(String),

    #[error(transparent)]
    Core(#[from] CoreError),

    #[error("strict mode failed: skipped={skipped}")]
    StrictModeViolation { skipped: usize },

    #[error(transparent)]
    Serialization(#[from] serde_json::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl CliError {
    /// Usage problems share clap's status 2; a missing dataset root has its own.
    pub const fn exit_code(&self) -> u8 {
        match self {
            Self::Config(_) => 2,
            Self::Core(CoreError::Dataset(DatasetError::RootNotFound { .. })) => 3,
            Self::Serialization(_) => 4,
            Self::StrictModeViolation { .. } => 5,
            Self::Core(_) | Self::Io(_) => 10,
        }
    }
}
