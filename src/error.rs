//! Error types for kmz-enricher

use std::path::PathBuf;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, EnrichError>;

#[derive(Error, Debug)]
pub enum EnrichError {
    #[error("No .{extension} member found in archive {}", path.display())]
    NotFound { path: PathBuf, extension: String },

    #[error("Malformed document: {0}")]
    MalformedDocument(String),

    #[error("Document contains no Placemark records")]
    NoRecords,

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Archive error: {0}")]
    Archive(#[from] zip::result::ZipError),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl EnrichError {
    /// True when the input artifact itself is bad, as opposed to the
    /// environment failing underneath us. Retrying will not help.
    pub fn is_fatal_input(&self) -> bool {
        matches!(
            self,
            EnrichError::NotFound { .. }
                | EnrichError::MalformedDocument(_)
                | EnrichError::NoRecords
        )
    }
}

impl From<roxmltree::Error> for EnrichError {
    fn from(e: roxmltree::Error) -> Self {
        EnrichError::MalformedDocument(e.to_string())
    }
}
