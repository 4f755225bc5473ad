//! Error types for export conversion

use thiserror::Error;

/// Errors that can occur while reading or converting an export.
#[derive(Error, Debug)]
pub enum Error {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("XML parsing error at byte {pos}: {source}")]
    Xml { pos: u64, source: quick_xml::Error },

    #[error("Unexpected end of document while reading {0}")]
    UnexpectedEof(String),

    #[error("No root element in document")]
    MissingRoot,

    #[error("Invalid number in <{0}>: {1}")]
    InvalidNumber(String, std::num::ParseIntError),

    #[error("JSON encoding error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Convenience result type for export operations.
pub type Result<T> = std::result::Result<T, Error>;
