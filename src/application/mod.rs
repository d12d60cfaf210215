pub mod use_cases;

pub use use_cases::anonymizer::Anonymizer;
pub use use_cases::table_cleaner::{CleaningReport, TableCleaner};
pub use use_cases::trial_balance_preprocessor::{
    PreprocessedTrialBalance, RunOptions, TrialBalancePreprocessor,
};
