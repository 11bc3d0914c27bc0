//! Report generator implementation
//! Author: kartik4091
//! Created: 2025-06-07

use std::fmt::Write as _;

use super::{ReportConfig, ReportData, ReportError, ReportFormat, ReportSeverity};

/// Writes a populated report to disk in the configured format
pub struct ReportGenerator;

impl ReportGenerator {
    pub async fn generate(data: &ReportData, config: &ReportConfig) -> Result<(), ReportError> {
        let rendered = match config.format {
            ReportFormat::Json => serde_json::to_string_pretty(data)
                .map_err(|e| ReportError::SerializationError(e.to_string()))?,
            ReportFormat::PlainText => Self::render_text(data),
        };

        tokio::fs::write(&config.output_path, rendered).await?;
        Ok(())
    }

    fn render_text(data: &ReportData) -> String {
        let mut out = String::new();
        let _ = writeln!(out, "delink processing report (v{})", data.metadata.tool_version);
        let _ = writeln!(out, "{}", "=".repeat(40));

        for entry in &data.entries {
            let tag = match entry.severity {
                ReportSeverity::Info => "INFO",
                ReportSeverity::Warning => "WARN",
                ReportSeverity::Error => "ERROR",
            };
            let _ = writeln!(
                out,
                "[{}] {:5} {}: {}",
                entry.timestamp, tag, entry.category, entry.message
            );
            if let Some(details) = &entry.details {
                let _ = writeln!(out, "        {}", details);
            }
        }

        let summary = &data.metadata.summary;
        let _ = writeln!(out, "{}", "-".repeat(40));
        let _ = writeln!(
            out,
            "Entries: {} ({} info, {} warning, {} error)",
            data.metadata.total_entries,
            summary.info_count,
            summary.warning_count,
            summary.error_count
        );
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn text_rendering_includes_summary() {
        let mut data = ReportData::new();
        data.add_info("batch", "Processed report.pdf");
        data.add_error("batch", "Failed broken.pdf");

        let text = ReportGenerator::render_text(&data);
        assert!(text.contains("Processed report.pdf"));
        assert!(text.contains("1 info, 0 warning, 1 error"));
    }
}
