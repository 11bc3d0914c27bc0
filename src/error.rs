//! Error types and handling for the PDF link removal library
//! Created: 2025-06-07 10:02:41 UTC
//! Author: kartik4905

use std::{io, path::PathBuf, result::Result as StdResult};

use thiserror::Error;

use crate::report::ReportError;

/// Custom result type for link removal operations
pub type Result<T> = StdResult<T, Error>;

/// Core error type for link removal operations
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum Error {
    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("PDF parse error: {0}")]
    PdfError(#[from] lopdf::Error),

    #[error("Cleaner error: {0}")]
    CleanerError(#[from] CleanerError),

    #[error("Scanner error: {0}")]
    ScannerError(#[from] ScannerError),

    #[error("Report error: {0}")]
    ReportError(#[from] ReportError),

    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("I/O error: {0}")]
    IoError(#[from] io::Error),
}

// -------------------- Sub-Error Categories --------------------

#[derive(Error, Debug)]
#[non_exhaustive]
pub enum CleanerError {
    #[error("Page {0} has no dictionary")]
    MissingPageDictionary(u32),

    #[error("Annotation filtering failed: {0}")]
    FilterError(String),

    #[error("Output serialization failed: {0}")]
    WriteError(String),
}

#[derive(Error, Debug)]
#[non_exhaustive]
pub enum ScannerError {
    #[error("Input path does not exist: {0}")]
    MissingInput(PathBuf),

    #[error("Not a directory: {0}")]
    NotADirectory(PathBuf),

    #[error("File is not a valid PDF: {0}")]
    InvalidSignature(PathBuf),
}
