//! Job Scout - keyword-ranked job listing scraper
//!
//! Runs a search against a job board, follows every listing on the
//! requested results pages and ranks them by how well their title and
//! description match an ordered list of preferred keywords.

pub mod application;
pub mod domain;
pub mod infrastructure;

pub use application::{ScrapeError, ScrapeOrchestrator, ScrapeReport, ScrapeStatus};
pub use domain::{ListingRecord, ResultSet, ResultTable, SearchParameters};
pub use infrastructure::{AppConfig, ScraperConfig};
