//! PDF Link Removal Tool - CLI Interface
//! Author: kartik4091
//! Created: 2025-06-07
//!
//! Command-line interface for stripping hyperlink annotations from a
//! single PDF file or from every PDF in a directory.

use clap::{value_parser, Arg, ArgAction, Command, ValueEnum};
use delink::config::ProcessingConfig;
use delink::pipeline::Pipeline;
use delink::report::{ReportConfig, ReportFormat, ReportGenerator};
use delink::scanner::PdfScanner;
use std::fs;
use std::path::{Path, PathBuf};
use std::process;
use tracing::{error, info, warn};

#[derive(Debug, Clone, ValueEnum)]
enum OutputFormat {
    /// Plain text report (default)
    Text,
    /// JSON report
    Json,
}

#[derive(Debug, Clone, ValueEnum)]
enum LogLevel {
    /// Error messages only
    Error,
    /// Warning and error messages
    Warn,
    /// Info, warning, and error messages (default)
    Info,
    /// Debug and all messages
    Debug,
    /// Trace and all messages (most verbose)
    Trace,
}

#[tokio::main]
async fn main() {
    // Parse command line arguments
    let matches = build_cli().get_matches();

    // Initialize logging based on verbosity
    let quiet = matches.get_flag("quiet");
    let log_level = matches.get_one::<LogLevel>("verbose").unwrap_or(&LogLevel::Info);
    init_logging(log_level, quiet);

    info!("🚀 delink v{} - Starting...", env!("CARGO_PKG_VERSION"));

    // Extract CLI arguments
    let input_path = matches.get_one::<String>("input").unwrap();
    let output_path = matches.get_one::<String>("output").unwrap();
    let dir_mode = matches.get_flag("dir");
    let config_file = matches.get_one::<String>("config");
    let report_path = matches.get_one::<String>("report");
    let output_format = matches.get_one::<OutputFormat>("format").unwrap_or(&OutputFormat::Text);

    // Advanced options
    let force_overwrite = matches.get_flag("force");
    let backup_original = matches.get_flag("backup");
    let verify_output = matches.get_flag("verify");
    let dry_run = matches.get_flag("dry-run");

    // Load configuration
    let mut config = if let Some(config_path) = config_file {
        match load_config_file(config_path) {
            Ok(cfg) => cfg,
            Err(e) => {
                error!("❌ Failed to load config file: {}", e);
                process::exit(1);
            }
        }
    } else {
        ProcessingConfig::default()
    };

    // Override config with CLI arguments
    if verify_output {
        config.verify_output = true;
    }

    if let Err(e) = config.validate() {
        error!("❌ Invalid configuration: {}", e);
        process::exit(1);
    }

    // Validate input exists
    if !PathBuf::from(input_path).exists() {
        error!("❌ Input path does not exist: {}", input_path);
        process::exit(1);
    }

    display_config_summary(&config, input_path, output_path, dir_mode);

    if dry_run {
        info!("🔍 Dry run mode - no files will be modified");
        if dir_mode {
            let scanner = PdfScanner::new();
            match scanner.find_pdfs(Path::new(input_path)).await {
                Ok(pdfs) => info!("   Would process {} PDF file(s)", pdfs.len()),
                Err(e) => {
                    error!("❌ {}", e);
                    process::exit(1);
                }
            }
        }
        info!("✅ Configuration validated successfully");
        return;
    }

    // Create and execute pipeline
    let pipeline = Pipeline::new(config);

    let start_time = std::time::Instant::now();
    let success = if dir_mode {
        run_directory(&pipeline, input_path, output_path).await
    } else {
        run_single_file(
            &pipeline,
            input_path,
            output_path,
            force_overwrite,
            backup_original,
        )
        .await
    };

    let duration = start_time.elapsed();

    // Generate report if requested
    if let Some(report_output) = report_path {
        info!("📊 Generating processing report...");
        let report_format = match output_format {
            OutputFormat::Json => ReportFormat::Json,
            OutputFormat::Text => ReportFormat::PlainText,
        };

        let report_config = ReportConfig {
            output_path: report_output.into(),
            format: report_format,
        };

        if let Err(e) = ReportGenerator::generate(&pipeline.report_data(), &report_config).await {
            error!("❌ Failed to generate report: {}", e);
        } else {
            info!("📋 Report generated: {}", report_output);
        }
    }

    if success {
        let stats = pipeline.clean_stats().await;
        info!("📊 Processing Summary:");
        info!("   Total Time: {:.2?}", duration);
        info!("   Links Removed: {}", stats.links_removed);
        info!("   Pages Visited: {}", stats.pages_visited);
        info!("🎉 Link removal completed successfully!");
    } else {
        error!("❌ Link removal failed!");
        process::exit(1);
    }
}

async fn run_single_file(
    pipeline: &Pipeline,
    input_path: &str,
    output_path: &str,
    force_overwrite: bool,
    backup_original: bool,
) -> bool {
    if !input_path.to_lowercase().ends_with(".pdf") {
        warn!("⚠️  Input file doesn't have a .pdf extension");
    }
    if !output_path.to_lowercase().ends_with(".pdf") {
        warn!("⚠️  Output file doesn't have a .pdf extension");
    }

    // Check if output exists and handle accordingly
    if PathBuf::from(output_path).exists() && !force_overwrite {
        error!("❌ Output file already exists: {}", output_path);
        error!("   Use --force to overwrite existing files");
        return false;
    }

    // Create backup if requested
    if backup_original {
        if let Err(e) = create_backup(input_path) {
            error!("❌ Failed to create backup: {}", e);
            return false;
        }
        info!("📁 Created backup of original file");
    }

    match pipeline
        .execute(Path::new(input_path), Path::new(output_path))
        .await
    {
        Ok(stats) => {
            info!(
                "✅ Successfully removed {} link(s) from PDF. Output saved to: {}",
                stats.links_removed, output_path
            );
            true
        }
        Err(e) => {
            error!("❌ Pipeline execution failed: {}", e);

            // Clean up partial output file if it exists
            if PathBuf::from(output_path).exists() {
                if let Err(cleanup_err) = fs::remove_file(output_path) {
                    error!("❌ Failed to clean up partial output file: {}", cleanup_err);
                }
            }
            false
        }
    }
}

async fn run_directory(pipeline: &Pipeline, input_dir: &str, output_dir: &str) -> bool {
    match pipeline
        .execute_dir(Path::new(input_dir), Path::new(output_dir))
        .await
    {
        Ok(summary) => summary.is_success(),
        Err(e) => {
            error!("❌ Directory processing failed: {}", e);
            false
        }
    }
}

fn build_cli() -> Command {
    Command::new("delink")
        .version(env!("CARGO_PKG_VERSION"))
        .author("kartik4091")
        .about("Remove all hyperlink annotations from PDF file(s)")
        .long_about(
            "Strips /Link annotations from a PDF's pages and writes a clean copy. \
             Operates on a single file, or on every PDF directly inside a directory \
             with --dir. All other annotations, page content, and document metadata \
             are preserved.",
        )
        // Input/Output
        .arg(
            Arg::new("input")
                .short('i')
                .long("input")
                .value_name("PATH")
                .help("Input PDF file or directory path")
                .required(true),
        )
        .arg(
            Arg::new("output")
                .short('o')
                .long("output")
                .value_name("PATH")
                .help("Output PDF file or directory path")
                .required(true),
        )
        .arg(
            Arg::new("dir")
                .short('d')
                .long("dir")
                .action(ArgAction::SetTrue)
                .help("Process all PDFs in a directory"),
        )
        // Configuration
        .arg(
            Arg::new("config")
                .short('c')
                .long("config")
                .value_name("FILE")
                .help("Configuration file (JSON/YAML)"),
        )
        // Output and reporting
        .arg(
            Arg::new("report")
                .short('r')
                .long("report")
                .value_name("FILE")
                .help("Generate processing report"),
        )
        .arg(
            Arg::new("format")
                .short('f')
                .long("format")
                .value_parser(value_parser!(OutputFormat))
                .default_value("text")
                .help("Report output format"),
        )
        // Advanced options
        .arg(
            Arg::new("force")
                .long("force")
                .action(ArgAction::SetTrue)
                .help("Force overwrite existing output files"),
        )
        .arg(
            Arg::new("backup")
                .short('b')
                .long("backup")
                .action(ArgAction::SetTrue)
                .help("Create backup of original file"),
        )
        .arg(
            Arg::new("verify")
                .long("verify")
                .action(ArgAction::SetTrue)
                .help("Verify output file after processing"),
        )
        .arg(
            Arg::new("dry-run")
                .long("dry-run")
                .action(ArgAction::SetTrue)
                .help("Show what would be done without making changes"),
        )
        // Logging
        .arg(
            Arg::new("verbose")
                .short('v')
                .long("verbose")
                .value_parser(value_parser!(LogLevel))
                .default_value("info")
                .help("Set logging verbosity"),
        )
        .arg(
            Arg::new("quiet")
                .short('q')
                .long("quiet")
                .action(ArgAction::SetTrue)
                .conflicts_with("verbose")
                .help("Suppress all output except errors"),
        )
}

fn init_logging(level: &LogLevel, quiet: bool) {
    use tracing_subscriber::{EnvFilter, FmtSubscriber};

    let filter_level = if quiet {
        "error"
    } else {
        match level {
            LogLevel::Error => "error",
            LogLevel::Warn => "warn",
            LogLevel::Info => "info",
            LogLevel::Debug => "debug",
            LogLevel::Trace => "trace",
        }
    };

    let subscriber = FmtSubscriber::builder()
        .with_env_filter(EnvFilter::new(format!("delink={}", filter_level)))
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .compact()
        .finish();

    tracing::subscriber::set_global_default(subscriber)
        .expect("Failed to set tracing subscriber");
}

fn load_config_file(path: &str) -> Result<ProcessingConfig, String> {
    let content = fs::read_to_string(path)
        .map_err(|e| format!("Failed to read config file: {}", e))?;

    // Try JSON first, then YAML
    serde_json::from_str(&content)
        .or_else(|_| serde_yaml::from_str(&content))
        .map_err(|e| format!("Config parsing error: {}", e))
}

fn create_backup(input_path: &str) -> Result<(), std::io::Error> {
    let backup_path = format!("{}.backup", input_path);
    fs::copy(input_path, backup_path)?;
    Ok(())
}

fn display_config_summary(
    config: &ProcessingConfig,
    input: &str,
    output: &str,
    dir_mode: bool,
) {
    info!("📋 Configuration Summary:");
    if dir_mode {
        info!("   Input directory:  {}", input);
        info!("   Output directory: {}", output);
    } else {
        info!("   Input:  {}", input);
        info!("   Output: {}", output);
    }
    info!("   Prune orphaned objects: {}", config.cleaner.prune_orphans);
    info!("   Verify output: {}", config.verify_output);
}
