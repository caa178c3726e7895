//! Processes one search results page
//!
//! Fetch the page, enumerate listing stubs, resolve them with bounded
//! concurrency and tag each record with the 1-based page number. A failing
//! listing is logged and dropped; a failing results page yields no records.

use std::sync::Arc;

use futures::stream::{self, StreamExt};
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use super::listing_resolver::ListingResolver;
use crate::domain::{ListingRecord, SearchParameters};
use crate::infrastructure::{DocumentFetcher, SearchResultsParser};

/// What one results page contributed
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PageOutcome {
    /// 1-based
    pub page_number: u32,
    /// Records in stub encounter order
    pub records: Vec<ListingRecord>,
    /// Listings dropped because they could not be resolved
    pub failed_listings: usize,
    /// The results page itself could not be fetched
    pub page_failed: bool,
}

impl PageOutcome {
    fn failed(page_number: u32) -> Self {
        Self {
            page_number,
            page_failed: true,
            ..Default::default()
        }
    }
}

/// URL of the results page at 0-based `page_index`
pub fn page_url(base_url: &str, page_index: u32, results_per_page: u32) -> String {
    if page_index == 0 {
        base_url.to_string()
    } else {
        format!("{}&start={}", base_url, page_index * results_per_page)
    }
}

pub struct PageWorker {
    fetcher: Arc<dyn DocumentFetcher>,
    results_parser: Arc<SearchResultsParser>,
    resolver: Arc<ListingResolver>,
    results_per_page: u32,
    max_concurrent_listings: usize,
}

impl PageWorker {
    pub fn new(
        fetcher: Arc<dyn DocumentFetcher>,
        results_parser: Arc<SearchResultsParser>,
        resolver: Arc<ListingResolver>,
        results_per_page: u32,
        max_concurrent_listings: usize,
    ) -> Self {
        Self {
            fetcher,
            results_parser,
            resolver,
            results_per_page,
            max_concurrent_listings: max_concurrent_listings.max(1),
        }
    }

    pub async fn process_page(
        &self,
        base_url: &str,
        page_index: u32,
        params: &SearchParameters,
        cancellation_token: &CancellationToken,
    ) -> PageOutcome {
        let page_number = page_index + 1;
        let url = page_url(base_url, page_index, self.results_per_page);

        let document = match self.fetcher.fetch(&url, cancellation_token).await {
            Ok(document) => document,
            Err(e) => {
                warn!(page = page_number, "Failed to fetch results page: {}", e);
                return PageOutcome::failed(page_number);
            }
        };

        let stubs = self.results_parser.parse_stubs(&document.body);
        debug!(page = page_number, listings = stubs.len(), "Found listing stubs");

        // `buffered` keeps stub order so ties stay deterministic
        let results: Vec<_> = stream::iter(stubs.clone())
            .map(|stub| async move {
                self.resolver
                    .resolve(&stub, params, page_number, cancellation_token)
                    .await
            })
            .buffered(self.max_concurrent_listings)
            .collect()
            .await;

        let mut outcome = PageOutcome {
            page_number,
            ..Default::default()
        };
        for (stub, result) in stubs.iter().zip(results) {
            match result {
                Ok(record) => outcome.records.push(record),
                Err(e) => {
                    if !e.is_cancelled() {
                        warn!(page = page_number, "Dropping listing '{}': {}", stub.title, e);
                    }
                    outcome.failed_listings += 1;
                }
            }
        }

        info!(
            page = page_number,
            records = outcome.records.len(),
            failed = outcome.failed_listings,
            "Page processed"
        );
        outcome
    }
}
