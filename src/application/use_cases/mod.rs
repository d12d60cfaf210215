pub mod anonymizer;
pub mod table_cleaner;
pub mod trial_balance_preprocessor;

#[cfg(test)]
pub(crate) mod test_support;
