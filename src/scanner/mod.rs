//! Scanner Module Implementation
//! Author: kartik4091
//! Created: 2025-06-07 09:12:44 UTC
//!
//! Input discovery and PDF signature validation: finds the PDF files
//! a batch run will process and rejects non-PDF input early.

use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use crate::error::{Result, ScannerError};

/// Result of a PDF signature check
#[derive(Debug, Clone, Default)]
pub struct SignatureInfo {
    pub is_valid_pdf: bool,
    /// Version string from the header, e.g. "1.4"
    pub pdf_version: Option<String>,
}

/// Scanner for PDF inputs
#[derive(Debug, Default)]
pub struct PdfScanner;

impl PdfScanner {
    pub fn new() -> Self {
        Self
    }

    /// Checks the `%PDF-` magic and extracts the header version.
    pub fn validate_pdf_signature(&self, data: &[u8]) -> SignatureInfo {
        if !data.starts_with(b"%PDF-") {
            return SignatureInfo::default();
        }

        // Header is "%PDF-M.m"; the version runs to the first whitespace.
        let rest = &data[b"%PDF-".len()..];
        let end = rest
            .iter()
            .position(|b| b.is_ascii_whitespace())
            .unwrap_or(rest.len());
        let version = String::from_utf8_lossy(&rest[..end]).into_owned();

        SignatureInfo {
            is_valid_pdf: true,
            pdf_version: (!version.is_empty()).then_some(version),
        }
    }

    /// Finds PDF files directly inside `dir` (non-recursive).
    ///
    /// Extension matching is case-insensitive, so both `.pdf` and
    /// `.PDF` are picked up. Results are sorted for a deterministic
    /// processing order.
    pub async fn find_pdfs(&self, dir: &Path) -> Result<Vec<PathBuf>> {
        if !dir.exists() {
            return Err(ScannerError::MissingInput(dir.to_path_buf()).into());
        }
        if !dir.is_dir() {
            return Err(ScannerError::NotADirectory(dir.to_path_buf()).into());
        }

        let mut pdfs = Vec::new();
        let mut entries = tokio::fs::read_dir(dir).await?;
        while let Some(entry) = entries.next_entry().await? {
            let path = entry.path();
            if !entry.file_type().await?.is_file() {
                continue;
            }
            let is_pdf = path
                .extension()
                .map(|ext| ext.eq_ignore_ascii_case("pdf"))
                .unwrap_or(false);
            if is_pdf {
                debug!("Discovered PDF: {}", path.display());
                pdfs.push(path);
            }
        }

        if pdfs.is_empty() {
            warn!("No PDF files found in '{}'", dir.display());
        }

        pdfs.sort();
        Ok(pdfs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn valid_pdf_signature() {
        let scanner = PdfScanner::new();

        let valid_pdf = b"%PDF-1.4\n%\xE2\xE3\xCF\xD3\n";
        let result = scanner.validate_pdf_signature(valid_pdf);
        assert!(result.is_valid_pdf);
        assert_eq!(result.pdf_version, Some("1.4".to_string()));
    }

    #[test]
    fn invalid_pdf_signature() {
        let scanner = PdfScanner::new();

        let invalid_pdf = b"Not a PDF file";
        let result = scanner.validate_pdf_signature(invalid_pdf);
        assert!(!result.is_valid_pdf);
        assert!(result.pdf_version.is_none());
    }

    #[test]
    fn bare_header_has_no_version() {
        let scanner = PdfScanner::new();

        let result = scanner.validate_pdf_signature(b"%PDF-");
        assert!(result.is_valid_pdf);
        assert!(result.pdf_version.is_none());
    }

    #[tokio::test]
    async fn find_pdfs_rejects_missing_dir() {
        let scanner = PdfScanner::new();
        let result = scanner.find_pdfs(Path::new("/nonexistent/input")).await;
        assert!(result.is_err());
    }
}
