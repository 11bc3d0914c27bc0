//! Link Removal Pipeline — Stage-by-Stage Execution
//! Author: kartik4091
//! Created: 2025-06-07
//! Drives load, clean, and write for a single file, and batches the
//! same stages over every PDF in a directory.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use parking_lot::RwLock;
use serde::Serialize;
use tracing::{debug, error, info, instrument, warn};

use crate::{
    cleaner::{link_cleaner::LinkCleaner, CleanStats, Cleaner},
    config::ProcessingConfig,
    error::{Error, Result},
    pdf_document::PdfDocument,
    report::ReportData,
    scanner::PdfScanner,
    utils::Metrics,
};

/// Outcome of one file in a batch run
#[derive(Debug, Clone, Serialize)]
pub struct FileOutcome {
    pub input: PathBuf,
    pub output: PathBuf,
    pub links_removed: u64,
    pub error: Option<String>,
}

/// Aggregate result of a directory run
#[derive(Debug, Clone, Default, Serialize)]
pub struct BatchSummary {
    pub total: usize,
    pub succeeded: usize,
    pub failed: usize,
    pub outcomes: Vec<FileOutcome>,
}

impl BatchSummary {
    /// A batch succeeds only when no file failed
    pub fn is_success(&self) -> bool {
        self.failed == 0
    }
}

/// Link removal pipeline orchestrating all processing stages
pub struct Pipeline {
    config: ProcessingConfig,
    cleaner: LinkCleaner,
    scanner: PdfScanner,
    metrics: Arc<Metrics>,
    report_data: RwLock<ReportData>,
}

impl Pipeline {
    /// Creates a new pipeline with the given configuration
    pub fn new(config: ProcessingConfig) -> Self {
        let cleaner = LinkCleaner::new(config.cleaner.clone());

        Self {
            config,
            cleaner,
            scanner: PdfScanner::new(),
            metrics: Arc::new(Metrics::new()),
            report_data: RwLock::new(ReportData::new()),
        }
    }

    /// Executes the complete pipeline for a single file
    #[instrument(skip(self))]
    pub async fn execute(&self, input: &Path, output: &Path) -> Result<CleanStats> {
        info!("🚦 Starting link removal: {}", input.display());
        self.metrics.start_timer("pipeline.execute");

        // Stage 0: Load & Verify
        let mut document = self.stage_0_load(input).await?;

        // Stage 1: Link Annotation Cleaning
        let stats = self.stage_1_clean(&mut document).await?;

        // Stage 2: Output Generation
        self.stage_2_write(&mut document, output).await?;

        self.metrics.end_timer("pipeline.execute");
        self.metrics.increment_counter("files.processed");
        self.metrics.add_to_counter("links.removed", stats.links_removed);

        self.report_data.write().add_info(
            "pipeline",
            &format!(
                "Cleaned '{}' -> '{}': {} link(s) removed",
                input.display(),
                output.display(),
                stats.links_removed
            ),
        );

        Ok(stats)
    }

    /// Executes the pipeline for every PDF directly inside `input_dir`.
    ///
    /// One file's failure does not abort the batch; it is recorded in
    /// the summary and processing moves on, as the summary exit code
    /// reflects it at the end.
    #[instrument(skip(self))]
    pub async fn execute_dir(&self, input_dir: &Path, output_dir: &Path) -> Result<BatchSummary> {
        let pdfs = self.scanner.find_pdfs(input_dir).await?;
        tokio::fs::create_dir_all(output_dir).await?;

        let mut summary = BatchSummary::default();
        if pdfs.is_empty() {
            info!("No PDF files found in '{}'", input_dir.display());
            return Ok(summary);
        }

        info!("📁 Found {} PDF file(s) to process", pdfs.len());

        for input in pdfs {
            let name = match input.file_name() {
                Some(name) => name.to_owned(),
                None => continue,
            };
            let output = output_dir.join(&name);
            summary.total += 1;

            info!("Processing: {}", name.to_string_lossy());
            match self.execute(&input, &output).await {
                Ok(stats) => {
                    summary.succeeded += 1;
                    summary.outcomes.push(FileOutcome {
                        input: input.clone(),
                        output,
                        links_removed: stats.links_removed,
                        error: None,
                    });
                }
                Err(e) => {
                    warn!("✗ Failed to process {}: {}", name.to_string_lossy(), e);
                    self.report_data.write().add_error(
                        "batch",
                        &format!("Failed to process '{}': {}", input.display(), e),
                    );

                    // Drop any partial output so a broken file is not left behind
                    if output.exists() {
                        if let Err(cleanup_err) = tokio::fs::remove_file(&output).await {
                            error!("Failed to clean up partial output file: {}", cleanup_err);
                        }
                    }

                    summary.failed += 1;
                    summary.outcomes.push(FileOutcome {
                        input: input.clone(),
                        output,
                        links_removed: 0,
                        error: Some(e.to_string()),
                    });
                }
            }
        }

        info!("📊 Processing Summary:");
        info!("   Successfully processed: {} files", summary.succeeded);
        info!("   Failed to process: {} files", summary.failed);
        info!("   Total files: {}", summary.total);

        self.report_data.write().add_info(
            "batch",
            &format!(
                "Batch finished: {} succeeded, {} failed, {} total",
                summary.succeeded, summary.failed, summary.total
            ),
        );

        Ok(summary)
    }

    /// Stage 0: Load & Verify
    #[instrument(skip(self))]
    async fn stage_0_load(&self, input: &Path) -> Result<PdfDocument> {
        info!("🛠️ Stage 0: Load & Verify");

        let document = PdfDocument::load(input).await?;
        debug!(
            "Loaded PDF v{} with {} page(s)",
            document.version(),
            document.page_count()
        );

        let metadata = document.info_metadata();
        if let Some(title) = &metadata.title {
            debug!("Document title: {}", title);
        }

        Ok(document)
    }

    /// Stage 1: Link Annotation Cleaning
    #[instrument(skip(self, document))]
    async fn stage_1_clean(&self, document: &mut PdfDocument) -> Result<CleanStats> {
        info!("🧹 Stage 1: Link Annotation Cleaning");

        let stats = self.cleaner.clean(document).await?;
        if stats.malformed_annots > 0 {
            self.report_data.write().add_warning(
                "cleaner",
                &format!(
                    "{} malformed /Annots entr(ies) left untouched in '{}'",
                    stats.malformed_annots,
                    document.path.display()
                ),
            );
        }

        Ok(stats)
    }

    /// Stage 2: Output Generation
    #[instrument(skip(self, document))]
    async fn stage_2_write(&self, document: &mut PdfDocument, output: &Path) -> Result<()> {
        info!("🧾 Stage 2: Output Generation");

        document.save(output)?;

        if self.config.verify_output {
            let bytes = tokio::fs::read(output).await?;
            let signature = self.scanner.validate_pdf_signature(&bytes);
            if !signature.is_valid_pdf {
                return Err(Error::ValidationError(format!(
                    "Output file '{}' is not a valid PDF",
                    output.display()
                )));
            }
            debug!("Output verification passed: {}", output.display());
        }

        info!("✅ Clean PDF written: {}", output.display());
        Ok(())
    }

    /// Snapshot of the report accumulated so far
    pub fn report_data(&self) -> ReportData {
        self.report_data.read().clone()
    }

    /// Aggregate cleaning statistics across all files processed
    pub async fn clean_stats(&self) -> CleanStats {
        self.cleaner.stats().await
    }

    pub fn metrics(&self) -> Arc<Metrics> {
        Arc::clone(&self.metrics)
    }
}
