//! Application layer - the scrape pipeline
//!
//! Scoring, listing resolution, per-page work and the orchestrator that
//! fans pages out and merges them into a ranked `ResultSet`.

pub mod error;
pub mod listing_resolver;
pub mod page_worker;
pub mod result_store;
pub mod scoring;
pub mod scrape_orchestrator;
pub mod scrape_status;

#[cfg(test)]
mod test_support;

pub use error::{ResolutionError, ScrapeError};
pub use listing_resolver::ListingResolver;
pub use page_worker::{PageOutcome, PageWorker, page_url};
pub use result_store::{ResultStore, ScrapeId, StoredResult};
pub use scoring::{ScoreOutcome, score};
pub use scrape_orchestrator::{ScrapeOrchestrator, ScrapeReport, build_search_url};
pub use scrape_status::{InProgressGuard, ScrapeStatus};
