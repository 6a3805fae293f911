//! Error types for Unihosts.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum UnihostsError {
    #[error("Failed to compile exclusion pattern '{pattern}': {source}")]
    Pattern {
        pattern: String,
        source: regex::Error,
    },
}
