mod common;

use delink::config::ProcessingConfig;
use delink::pipeline::Pipeline;
use lopdf::{Document, Object};
use std::path::Path;

#[cfg(test)]
mod tests {
    use super::common::*;
    use super::*;

    fn write_linked_pdf(path: &Path, title: &str) {
        let mut pdf = TestPdf::new();
        let link_id = pdf.add_object(link_annotation("https://example.com"));
        let highlight_id = pdf.add_object(highlight_annotation());
        pdf.add_page(Some(Object::Array(vec![link_id.into(), highlight_id.into()])));
        pdf.with_info(title, "integration test");
        let mut doc = pdf.finish();
        doc.save(path).unwrap();
    }

    #[tokio::test]
    async fn single_file_execution_strips_links() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("input.pdf");
        let output = dir.path().join("output.pdf");
        write_linked_pdf(&input, "Quarterly Report");

        let pipeline = Pipeline::new(ProcessingConfig::default());
        let stats = pipeline.execute(&input, &output).await.unwrap();

        assert_eq!(stats.links_removed, 1);
        assert!(output.exists());

        let cleaned = Document::load(&output).unwrap();
        assert_eq!(count_link_objects(&cleaned), 0);
        match page_annots(&cleaned, 0).unwrap() {
            Object::Array(entries) => assert_eq!(entries.len(), 1),
            other => panic!("expected an array, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn document_metadata_survives_the_rewrite() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("input.pdf");
        let output = dir.path().join("output.pdf");
        write_linked_pdf(&input, "Quarterly Report");

        let pipeline = Pipeline::new(ProcessingConfig::default());
        pipeline.execute(&input, &output).await.unwrap();

        let cleaned = delink::pdf_document::PdfDocument::load(&output).await.unwrap();
        let metadata = cleaned.info_metadata();
        assert_eq!(metadata.title.as_deref(), Some("Quarterly Report"));
        assert_eq!(metadata.author.as_deref(), Some("integration test"));
    }

    #[tokio::test]
    async fn verify_output_passes_for_clean_write() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("input.pdf");
        let output = dir.path().join("output.pdf");
        write_linked_pdf(&input, "Verified");

        let config = ProcessingConfig {
            verify_output: true,
            ..ProcessingConfig::default()
        };
        let pipeline = Pipeline::new(config);
        assert!(pipeline.execute(&input, &output).await.is_ok());
    }

    #[tokio::test]
    async fn rejects_files_without_pdf_signature() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("input.pdf");
        let output = dir.path().join("output.pdf");
        std::fs::write(&input, b"Not a PDF file").unwrap();

        let pipeline = Pipeline::new(ProcessingConfig::default());
        let result = pipeline.execute(&input, &output).await;

        assert!(result.is_err());
        assert!(!output.exists());
    }

    #[tokio::test]
    async fn directory_batch_continues_past_failures() {
        let dir = tempfile::tempdir().unwrap();
        let input_dir = dir.path().join("in");
        let output_dir = dir.path().join("out");
        std::fs::create_dir(&input_dir).unwrap();

        write_linked_pdf(&input_dir.join("a.pdf"), "A");
        write_linked_pdf(&input_dir.join("b.PDF"), "B");
        // Valid signature, unparseable body
        std::fs::write(input_dir.join("broken.pdf"), b"%PDF-1.4\ngarbage").unwrap();
        // Not a PDF extension, must be ignored by discovery
        std::fs::write(input_dir.join("notes.txt"), b"ignore me").unwrap();

        let pipeline = Pipeline::new(ProcessingConfig::default());
        let summary = pipeline.execute_dir(&input_dir, &output_dir).await.unwrap();

        assert_eq!(summary.total, 3);
        assert_eq!(summary.succeeded, 2);
        assert_eq!(summary.failed, 1);
        assert!(!summary.is_success());

        assert!(output_dir.join("a.pdf").exists());
        assert!(output_dir.join("b.PDF").exists());
        assert!(!output_dir.join("broken.pdf").exists());
        assert!(!output_dir.join("notes.txt").exists());

        let failed: Vec<_> = summary
            .outcomes
            .iter()
            .filter(|outcome| outcome.error.is_some())
            .collect();
        assert_eq!(failed.len(), 1);
        assert!(failed[0].input.ends_with("broken.pdf"));
    }

    #[tokio::test]
    async fn empty_directory_is_a_successful_batch() {
        let dir = tempfile::tempdir().unwrap();
        let input_dir = dir.path().join("in");
        let output_dir = dir.path().join("out");
        std::fs::create_dir(&input_dir).unwrap();

        let pipeline = Pipeline::new(ProcessingConfig::default());
        let summary = pipeline.execute_dir(&input_dir, &output_dir).await.unwrap();

        assert_eq!(summary.total, 0);
        assert!(summary.is_success());
        assert!(output_dir.exists(), "output directory is still created");
    }

    #[tokio::test]
    async fn missing_input_directory_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let pipeline = Pipeline::new(ProcessingConfig::default());
        let result = pipeline
            .execute_dir(&dir.path().join("missing"), &dir.path().join("out"))
            .await;
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn report_records_batch_outcomes() {
        let dir = tempfile::tempdir().unwrap();
        let input_dir = dir.path().join("in");
        let output_dir = dir.path().join("out");
        std::fs::create_dir(&input_dir).unwrap();
        write_linked_pdf(&input_dir.join("a.pdf"), "A");

        let pipeline = Pipeline::new(ProcessingConfig::default());
        pipeline.execute_dir(&input_dir, &output_dir).await.unwrap();

        let report = pipeline.report_data();
        assert!(report.metadata.total_entries >= 2);
        assert_eq!(report.metadata.summary.error_count, 0);
    }
}
