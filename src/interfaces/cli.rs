//! Command-line surface
//!
//! - tb-laundry serve                 # HTTP API on the configured address
//! - tb-laundry process <FILE>        # one run, writes clean_tb.csv + prompt.txt

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use tracing::info;

use crate::application::{PreprocessedTrialBalance, RunOptions, TrialBalancePreprocessor};
use crate::domain::error::{AppError, Result};
use crate::infrastructure::config::AppConfig;
use crate::infrastructure::csv::CsvWriter;

pub const PROMPT_FILE_NAME: &str = "prompt.txt";

#[derive(Debug, Parser)]
#[command(name = "tb-laundry")]
#[command(about = "Clean, anonymize and export trial balances for AI mapping")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Start the HTTP API
    Serve {
        /// Path to configuration file
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Preprocess one CSV or spreadsheet file
    Process(ProcessArgs),
}

#[derive(Debug, Clone, clap::Args)]
pub struct ProcessArgs {
    /// Input file (.csv, .xlsx, .xlsm, .xls, .xlsb, .ods)
    pub file: PathBuf,

    /// Zero-based row holding the column names
    #[arg(long, default_value_t = 0)]
    pub header_row: usize,

    /// Scale numeric columns by a random factor
    #[arg(long)]
    pub anonymize: bool,

    /// Use this factor instead of sampling one (requires --anonymize)
    #[arg(long)]
    pub factor: Option<f64>,

    /// Directory for the CSV and prompt files
    #[arg(long, default_value = ".")]
    pub out_dir: PathBuf,

    /// Path to configuration file
    #[arg(long)]
    pub config: Option<PathBuf>,
}

impl ProcessArgs {
    pub fn run_options(&self) -> RunOptions {
        RunOptions {
            header_row: self.header_row,
            anonymize: self.anonymize,
            factor: self.factor,
        }
    }
}

#[derive(Debug)]
pub struct ProcessOutput {
    pub csv_path: PathBuf,
    pub prompt_path: PathBuf,
    pub result: PreprocessedTrialBalance,
}

/// Run the pipeline on a file, print the previews to `out` and write both artifacts
pub fn run_process<W: Write>(
    args: &ProcessArgs,
    config: &AppConfig,
    out: &mut W,
) -> Result<ProcessOutput> {
    let bytes = fs::read(&args.file)
        .map_err(|e| AppError::IoError(format!("{}: {}", args.file.display(), e)))?;
    let file_name = args
        .file
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default();

    let preprocessor = TrialBalancePreprocessor::new(config.processing.clone());
    let result = preprocessor.preprocess(&file_name, &bytes, &args.run_options())?;

    print_summary(&result, out)?;

    fs::create_dir_all(&args.out_dir)?;
    let csv_path = args.out_dir.join(&config.processing.output_file_name);
    let prompt_path = args.out_dir.join(PROMPT_FILE_NAME);
    write_file(&csv_path, &result.csv)?;
    write_file(&prompt_path, &result.prompt.content)?;

    writeln!(out, "Wrote {}", csv_path.display())?;
    writeln!(out, "Wrote {}", prompt_path.display())?;
    info!(csv = %csv_path.display(), prompt = %prompt_path.display(), "Artifacts written");

    Ok(ProcessOutput {
        csv_path,
        prompt_path,
        result,
    })
}

fn print_summary<W: Write>(result: &PreprocessedTrialBalance, out: &mut W) -> Result<()> {
    let writer = CsvWriter::new();

    writeln!(
        out,
        "Raw preview ({} rows):",
        result.raw_preview.row_count()
    )?;
    write!(out, "{}", writer.write_table(&result.raw_preview)?)?;
    writeln!(out)?;

    if let Some(factor) = result.factor {
        writeln!(out, "Anonymization factor: {}", factor)?;
    }

    writeln!(
        out,
        "Processed preview ({} of {} rows, {} columns):",
        result.processed_preview.row_count(),
        result.row_count,
        result.column_count
    )?;
    write!(out, "{}", writer.write_table(&result.processed_preview)?)?;
    writeln!(out)?;

    let cleaning = &result.cleaning;
    writeln!(
        out,
        "Filled {} cells, dropped {} rows and {} columns",
        cleaning.filled_cells,
        cleaning.dropped_rows,
        cleaning.dropped_columns.len()
    )?;
    Ok(())
}

fn write_file(path: &Path, content: &str) -> Result<()> {
    fs::write(path, content).map_err(|e| AppError::IoError(format!("{}: {}", path.display(), e)))
}
