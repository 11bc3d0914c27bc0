//! Cleaner modules for PDF annotation removal
//! Author: kartik4091

pub mod link_cleaner;

use async_trait::async_trait;

use crate::error::Result;
use crate::pdf_document::PdfDocument;

pub use link_cleaner::{CleanStats, LinkCleaner};

/// Common interface for document cleaners
#[async_trait]
pub trait Cleaner: Send + Sync {
    /// Cleans the loaded document in place and returns run statistics
    async fn clean(&self, document: &mut PdfDocument) -> Result<CleanStats>;

    /// Statistics accumulated since the last reset
    async fn stats(&self) -> CleanStats;

    /// Clears accumulated statistics
    async fn reset(&self) -> Result<()>;
}
