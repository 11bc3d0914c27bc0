//! PDF Link Removal Library
//! Provides a pipeline-based architecture for loading PDF documents,
//! stripping hyperlink annotations, and writing clean output files.

// Configuration and Core Pipeline
pub mod config;
pub mod error;
pub mod pdf_document;
pub mod pipeline;

// Stage 1: Link Annotation Cleaning
pub mod cleaner;

pub use cleaner::{
    link_cleaner::{CleanStats, LinkCleaner},
    Cleaner,
};

// Input Discovery & Signature Validation
pub mod scanner;

pub use scanner::{PdfScanner, SignatureInfo};

// Report Generation
pub mod report;

pub use report::{
    ReportConfig,
    ReportData,
    ReportEntry,
    ReportError,
    ReportFormat,
    ReportGenerator,
    ReportSeverity,
};

// Shared Utilities
pub mod utils;

// Re-exports for crate consumers
pub use config::{CleanerConfig, ProcessingConfig};
pub use error::{Error, Result};
pub use pdf_document::{PdfDocument, PdfMetadata};
pub use pipeline::{BatchSummary, FileOutcome, Pipeline};
pub use utils::Metrics;
