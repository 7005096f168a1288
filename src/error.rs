//! Error types for the pdf-elongate library

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias using our Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for the pdf-elongate library
#[derive(Error, Debug)]
pub enum Error {
    /// PDF processing error
    #[error("PDF error: {0}")]
    Pdf(#[from] lopdf::Error),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// File not found
    #[error("File not found: {}", .0.display())]
    FileNotFound(PathBuf),

    /// Negative margin rejected by validation
    #[error("Invalid margin: {0} points (margins must be non-negative)")]
    InvalidMargin(i64),

    /// General error
    #[error("{0}")]
    General(String),
}
