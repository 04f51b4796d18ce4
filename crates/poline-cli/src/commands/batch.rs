//! Batch processing command for multiple files.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Instant;

use clap::Args;
use console::style;
use glob::glob;
use indicatif::{ProgressBar, ProgressStyle};
use tokio::sync::Semaphore;
use tracing::{debug, error, warn};

use poline_core::models::amount::{format_amount, sum_amounts};
use poline_core::source::{SourceKind, load_pages};
use poline_core::{ExtractionResult, LineRecord, PageDriver};

use crate::format::{OutputFormat, format_records};

/// Arguments for the batch command.
#[derive(Args)]
pub struct BatchArgs {
    /// Input files or glob pattern
    #[arg(required = true)]
    input: String,

    /// Output directory (one file per input); without it, all records are
    /// written to stdout
    #[arg(short, long)]
    output_dir: Option<PathBuf>,

    /// Output format (default: from config, else json)
    #[arg(short, long, value_enum)]
    format: Option<OutputFormat>,

    /// Also generate a summary CSV
    #[arg(long)]
    summary: bool,

    /// Number of parallel workers
    #[arg(short = 'j', long, default_value = "4")]
    jobs: usize,

    /// Continue on error
    #[arg(long)]
    continue_on_error: bool,
}

/// Result of processing a single file.
struct ProcessResult {
    path: PathBuf,
    extraction: Option<ExtractionResult>,
    error: Option<String>,
    processing_time_ms: u64,
}

pub async fn run(args: BatchArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let start = Instant::now();

    let config = super::load_config(config_path)?;

    // Expand glob pattern
    let files: Vec<PathBuf> = glob(&args.input)?
        .filter_map(|r| r.ok())
        .filter(|p| SourceKind::from_path(p).is_some())
        .collect();

    if files.is_empty() {
        anyhow::bail!("No matching files found for pattern: {}", args.input);
    }

    eprintln!(
        "{} Found {} files to process",
        style("ℹ").blue(),
        files.len()
    );

    if let Some(ref output_dir) = args.output_dir {
        fs::create_dir_all(output_dir)?;
    }

    let overall_pb = ProgressBar::new(files.len() as u64);
    overall_pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} files")?
            .progress_chars("=>-"),
    );

    // Files run concurrently, bounded by --jobs; results are collected in
    // input order.
    let driver = Arc::new(config.to_driver());
    let semaphore = Arc::new(Semaphore::new(args.jobs.max(1)));
    let mut handles = Vec::with_capacity(files.len());

    for path in files {
        let driver = Arc::clone(&driver);
        let semaphore = Arc::clone(&semaphore);
        let pb = overall_pb.clone();

        handles.push(tokio::spawn(async move {
            let _permit = semaphore.acquire_owned().await?;
            let result = tokio::task::spawn_blocking(move || process_single_file(path, &driver)).await?;
            pb.inc(1);
            anyhow::Ok(result)
        }));
    }

    let mut results = Vec::with_capacity(handles.len());
    for handle in handles {
        let result = handle.await??;

        if let Some(error_msg) = &result.error {
            if args.continue_on_error {
                warn!("Failed to process {}: {}", result.path.display(), error_msg);
            } else {
                error!("Failed to process {}: {}", result.path.display(), error_msg);
                overall_pb.abandon();
                anyhow::bail!("Processing failed: {}", error_msg);
            }
        }

        results.push(result);
    }

    overall_pb.finish_and_clear();

    let format = args.format.unwrap_or_else(|| config.output.format.into());
    let pretty = config.output.pretty_json;

    let successful: Vec<_> = results.iter().filter(|r| r.extraction.is_some()).collect();
    let failed: Vec<_> = results.iter().filter(|r| r.error.is_some()).collect();

    match &args.output_dir {
        Some(output_dir) => {
            let output_names = output_names(&successful);
            for (result, output_name) in successful.iter().zip(&output_names) {
                if let Some(extraction) = &result.extraction {
                    let output_path = output_dir.join(format!("{}.{}", output_name, format.extension()));
                    let content = format_records(&extraction.records, format, pretty)?;

                    fs::write(&output_path, content)?;
                    debug!("Wrote output to {}", output_path.display());
                }
            }
        }
        None => {
            let merged: Vec<LineRecord> = successful
                .iter()
                .filter_map(|r| r.extraction.as_ref())
                .flat_map(|e| e.records.iter().cloned())
                .collect();
            let output = format_records(&merged, format, pretty)?;
            print!("{}", output);
            if !output.ends_with('\n') {
                println!();
            }
        }
    }

    if args.summary {
        let summary_path = args
            .output_dir
            .as_ref()
            .map(|d| d.join("summary.csv"))
            .unwrap_or_else(|| PathBuf::from("summary.csv"));

        write_summary(&summary_path, &results)?;
        eprintln!(
            "{} Summary written to {}",
            style("✓").green(),
            summary_path.display()
        );
    }

    eprintln!();
    eprintln!(
        "{} Processed {} files in {:?}",
        style("✓").green(),
        results.len(),
        start.elapsed()
    );
    eprintln!(
        "   {} successful, {} failed",
        style(successful.len()).green(),
        style(failed.len()).red()
    );

    if !failed.is_empty() {
        eprintln!();
        eprintln!("{}", style("Failed files:").red());
        for result in &failed {
            eprintln!(
                "  - {}: {}",
                result.path.display(),
                result.error.as_deref().unwrap_or("unknown error")
            );
        }
    }

    Ok(())
}

/// Output file names (without format extension) for each result.
///
/// Inputs are named by file stem. Inputs whose stems collide (`po.pdf` and
/// `po.txt`) keep their full file name so no output overwrites another.
fn output_names(results: &[&ProcessResult]) -> Vec<String> {
    let mut stem_counts: HashMap<String, usize> = HashMap::new();
    for result in results {
        *stem_counts.entry(file_stem(&result.path)).or_default() += 1;
    }

    results
        .iter()
        .map(|result| {
            let stem = file_stem(&result.path);
            if stem_counts.get(&stem).copied().unwrap_or(0) > 1 {
                let full = result
                    .path
                    .file_name()
                    .map(|s| s.to_string_lossy().into_owned())
                    .unwrap_or(stem);
                debug!("Output name collision, using {}", full);
                full
            } else {
                stem
            }
        })
        .collect()
}

fn file_stem(path: &Path) -> String {
    path.file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "records".to_string())
}

fn process_single_file(path: PathBuf, driver: &PageDriver) -> ProcessResult {
    let file_start = Instant::now();

    let outcome = load_pages(&path).map(|pages| driver.extract_pages(&pages));
    let processing_time_ms = file_start.elapsed().as_millis() as u64;

    match outcome {
        Ok(extraction) => ProcessResult {
            path,
            extraction: Some(extraction),
            error: None,
            processing_time_ms,
        },
        Err(e) => ProcessResult {
            path,
            extraction: None,
            error: Some(e.to_string()),
            processing_time_ms,
        },
    }
}

fn write_summary(path: &Path, results: &[ProcessResult]) -> anyhow::Result<()> {
    let mut wtr = csv::Writer::from_path(path)?;

    wtr.write_record([
        "filename",
        "status",
        "pages",
        "records",
        "terminated_pages",
        "extended_total",
        "processing_time_ms",
        "error",
    ])?;

    for result in results {
        let filename = result.path.file_name().and_then(|s| s.to_str()).unwrap_or("");

        if let Some(extraction) = &result.extraction {
            let terminated = extraction.pages.iter().filter(|p| p.terminated).count();
            let (total, _) =
                sum_amounts(extraction.records.iter().map(|r| r.extended_amount.as_str()));

            let row: [&str; 8] = [
                filename,
                "success",
                &extraction.pages.len().to_string(),
                &extraction.records.len().to_string(),
                &terminated.to_string(),
                &format_amount(total),
                &result.processing_time_ms.to_string(),
                "",
            ];
            wtr.write_record(row)?;
        } else {
            let row: [&str; 8] = [
                filename,
                "error",
                "",
                "",
                "",
                "",
                &result.processing_time_ms.to_string(),
                result.error.as_deref().unwrap_or(""),
            ];
            wtr.write_record(row)?;
        }
    }

    wtr.flush()?;
    Ok(())
}
