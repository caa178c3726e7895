//! Pipeline error taxonomy
//!
//! `FetchError` (transport) and `ParsingError` (missing fields) belong to the
//! infrastructure layer. `ResolutionError` wraps either for one listing, and
//! `ScrapeError` covers the few things that stop a whole scrape.

use thiserror::Error;

use crate::domain::ParameterError;
use crate::infrastructure::{FetchError, ParsingError};

/// Failure to turn one listing stub into a record
#[derive(Error, Debug)]
pub enum ResolutionError {
    #[error(transparent)]
    Fetch(#[from] FetchError),

    #[error(transparent)]
    Parse(#[from] ParsingError),
}

impl ResolutionError {
    pub fn is_cancelled(&self) -> bool {
        matches!(self, Self::Fetch(FetchError::Cancelled { .. }))
    }
}

/// Failure of a scrape as a whole
#[derive(Error, Debug)]
pub enum ScrapeError {
    #[error("Invalid search parameters: {0}")]
    InvalidParameters(#[from] ParameterError),

    #[error("Failed to set up scraper: {0}")]
    Setup(String),

    #[error("Scrape cancelled")]
    Cancelled,
}
