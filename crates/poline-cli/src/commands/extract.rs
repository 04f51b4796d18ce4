//! Extract command - pull line items from a single file.

use std::fs;
use std::path::PathBuf;
use std::time::{Duration, Instant};

use clap::Args;
use console::style;
use indicatif::{ProgressBar, ProgressStyle};
use tracing::{debug, info, warn};

use poline_core::source::{SourceKind, load_pages};

use crate::format::{OutputFormat, format_records};

/// Arguments for the extract command.
#[derive(Args)]
pub struct ExtractArgs {
    /// Input file (PDF, or text with form-feed page breaks)
    #[arg(required = true)]
    input: PathBuf,

    /// Output file (default: stdout)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Output format (default: from config, else json)
    #[arg(short, long, value_enum)]
    format: Option<OutputFormat>,

    /// Write JSON on a single line
    #[arg(long)]
    compact: bool,

    /// Maximum pages to scan (0 = unlimited)
    #[arg(long)]
    max_pages: Option<usize>,

    /// Scan pages one at a time
    #[arg(long)]
    sequential: bool,

    /// Print a per-page summary to stderr
    #[arg(long)]
    show_pages: bool,
}

pub async fn run(args: ExtractArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let start = Instant::now();

    let mut config = super::load_config(config_path)?;
    if let Some(max_pages) = args.max_pages {
        config.extraction.max_pages = max_pages;
    }
    if args.sequential {
        config.extraction.parallel_pages = false;
    }

    if !args.input.exists() {
        anyhow::bail!("Input file not found: {}", args.input.display());
    }
    if SourceKind::from_path(&args.input).is_none() {
        anyhow::bail!("Unsupported file format: {}", args.input.display());
    }

    info!("Processing file: {}", args.input.display());

    let pb = ProgressBar::new_spinner();
    pb.set_style(ProgressStyle::default_spinner().template("{spinner:.green} [{elapsed_precise}] {msg}")?);
    pb.enable_steady_tick(Duration::from_millis(100));

    pb.set_message("Reading pages...");
    let pages = load_pages(&args.input)?;
    debug!("Read {} pages", pages.len());

    pb.set_message("Extracting line items...");
    let result = config.to_driver().extract_pages(&pages);

    pb.finish_and_clear();

    if result.records.is_empty() {
        warn!("No line items found in {}", args.input.display());
    }

    if args.show_pages {
        for page in &result.pages {
            eprintln!(
                "{} Page {}: {} lines, {} records{}",
                style("ℹ").blue(),
                page.page,
                page.lines,
                page.records,
                if page.terminated { ", stopped at total" } else { "" }
            );
        }
    }

    let format = args.format.unwrap_or_else(|| config.output.format.into());
    let pretty = config.output.pretty_json && !args.compact;
    let output = format_records(&result.records, format, pretty)?;

    if let Some(output_path) = &args.output {
        fs::write(output_path, &output)?;
        println!(
            "{} {} records written to {}",
            style("✓").green(),
            result.records.len(),
            output_path.display()
        );
    } else if output.ends_with('\n') {
        print!("{}", output);
    } else {
        println!("{}", output);
    }

    debug!("Total processing time: {:?}", start.elapsed());

    Ok(())
}
