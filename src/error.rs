//! Error type shared by every stage of a window-counting run.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while counting records in windows.
#[derive(Error, Debug)]
pub enum WindowError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("invalid window size: {0} (must be a positive integer)")]
    InvalidWindowSize(String),

    #[error("invalid match mode: {0} (expected 0, 1 or 2)")]
    InvalidMode(String),

    #[error("failed to open file \"{}\": {message}", .path.display())]
    Open { path: PathBuf, message: String },

    #[error("failed to read the header from \"{}\": {message}", .path.display())]
    Header { path: PathBuf, message: String },

    #[error("failed to open index for \"{}\" (run `samtools index` first)", .path.display())]
    Index { path: PathBuf },

    #[error("invalid region \"{region}\": {message}")]
    Region { region: String, message: String },

    #[error("unknown target: {0}")]
    UnknownTarget(String),

    #[error("alignment read error: {0}")]
    Hts(#[from] rust_htslib::errors::Error),
}

impl WindowError {
    pub(crate) fn region(region: &str, message: impl Into<String>) -> Self {
        WindowError::Region {
            region: region.to_string(),
            message: message.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, WindowError>;
