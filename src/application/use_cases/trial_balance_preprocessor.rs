// ============================================================
// TRIAL BALANCE PREPROCESSOR USE CASE
// ============================================================
// One run: load -> clean -> optionally anonymize -> CSV -> prompt

use std::time::Instant;

use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use super::anonymizer::Anonymizer;
use super::table_cleaner::{CleaningReport, TableCleaner};
use crate::domain::anonymization::AnonymizationFactor;
use crate::domain::error::Result;
use crate::domain::file_kind::FileKind;
use crate::domain::processing_config::ProcessingConfig;
use crate::domain::prompt::MappingPrompt;
use crate::domain::table::Table;
use crate::infrastructure::csv::CsvWriter;
use crate::infrastructure::loader::RawSheet;

/// User-controlled parameters of a run
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RunOptions {
    /// Row of the input holding the column names (0 = first row)
    pub header_row: usize,

    /// Scale numeric columns by a random factor
    pub anonymize: bool,

    /// Use this factor instead of sampling one, e.g. the value already
    /// shown to the user. Ignored unless `anonymize` is set.
    pub factor: Option<f64>,
}

/// Everything a run produces
#[derive(Debug, Clone, Serialize)]
pub struct PreprocessedTrialBalance {
    pub file_name: String,
    pub file_kind: FileKind,
    pub header_row: usize,

    /// Factor applied, if anonymization was requested
    pub factor: Option<AnonymizationFactor>,

    /// First rows of the upload as parsed, before any header is applied
    pub raw_preview: Table,

    /// First rows of the cleaned (and possibly scaled) table
    pub processed_preview: Table,

    pub row_count: usize,
    pub column_count: usize,
    pub cleaning: CleaningReport,

    /// Cleaned table as CSV, header first
    pub csv: String,

    pub prompt: MappingPrompt,
    pub processing_time_ms: u64,
}

pub struct TrialBalancePreprocessor {
    config: ProcessingConfig,
}

impl TrialBalancePreprocessor {
    pub fn new(config: ProcessingConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ProcessingConfig {
        &self.config
    }

    /// Decide the factor for a run: none, the caller's, or a fresh sample
    pub fn resolve_factor<R: Rng>(
        &self,
        options: &RunOptions,
        rng: &mut R,
    ) -> Result<Option<AnonymizationFactor>> {
        if !options.anonymize {
            if options.factor.is_some() {
                warn!("Factor supplied without anonymize; ignoring it");
            }
            return Ok(None);
        }

        match options.factor {
            Some(value) => AnonymizationFactor::new(value).map(Some),
            None => Ok(Some(AnonymizationFactor::sample(
                rng,
                &self.config.factor_range(),
            ))),
        }
    }

    pub fn preprocess(
        &self,
        file_name: &str,
        bytes: &[u8],
        options: &RunOptions,
    ) -> Result<PreprocessedTrialBalance> {
        self.preprocess_with_rng(file_name, bytes, options, &mut rand::rng())
    }

    pub fn preprocess_with_rng<R: Rng>(
        &self,
        file_name: &str,
        bytes: &[u8],
        options: &RunOptions,
        rng: &mut R,
    ) -> Result<PreprocessedTrialBalance> {
        let start = Instant::now();

        self.config.validate()?;
        let file_kind = FileKind::from_file_name(file_name)?;
        let factor = self.resolve_factor(options, rng)?;

        let sheet = RawSheet::parse(bytes, file_kind)?;
        let raw_preview = sheet.preview(self.config.preview_rows);

        let table = sheet.to_table(options.header_row)?;
        info!(
            file_kind = %file_kind,
            header_row = options.header_row,
            rows = table.row_count(),
            columns = table.column_count(),
            "Loaded trial balance"
        );

        let (mut table, cleaning) = TableCleaner::clean_with_report(table);
        info!(
            filled = cleaning.filled_cells,
            dropped_rows = cleaning.dropped_rows,
            dropped_columns = cleaning.dropped_columns.len(),
            "Cleaned table"
        );

        if let Some(factor) = factor {
            table = Anonymizer::anonymize(table, factor);
            info!(factor = %factor, "Anonymized numeric columns");
        }

        let csv = CsvWriter::new().write_table(&table)?;
        let prompt = MappingPrompt::new(&csv);
        let processing_time_ms = start.elapsed().as_millis() as u64;

        info!(
            rows = table.row_count(),
            prompt_tokens = prompt.estimated_tokens,
            elapsed_ms = processing_time_ms,
            "Preprocessing complete"
        );

        Ok(PreprocessedTrialBalance {
            file_name: file_name.to_string(),
            file_kind,
            header_row: options.header_row,
            factor,
            raw_preview,
            processed_preview: table.head(self.config.preview_rows),
            row_count: table.row_count(),
            column_count: table.column_count(),
            cleaning,
            csv,
            prompt,
            processing_time_ms,
        })
    }
}

impl Default for TrialBalancePreprocessor {
    fn default() -> Self {
        Self::new(ProcessingConfig::default())
    }
}
