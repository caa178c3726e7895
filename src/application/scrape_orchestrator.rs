//! Scrape orchestrator - the entry point of the pipeline
//!
//! 1. Validate parameters (nothing touches the network before this)
//! 2. Build the base search URL
//! 3. Fan out one page worker per requested page, at most
//!    `min(pages, max_concurrent_pages)` at a time
//! 4. After the full join, merge in page order and rank into a `ResultSet`
//!
//! Failing pages and listings are contained; they only show up in the
//! counters of the returned [`ScrapeReport`].

use std::sync::Arc;

use tokio::sync::Semaphore;
use tokio::task::JoinSet;
use tokio_util::sync::CancellationToken;
use tracing::{error, info, warn};
use url::form_urlencoded;

use super::error::ScrapeError;
use super::listing_resolver::ListingResolver;
use super::page_worker::{PageOutcome, PageWorker};
use super::scrape_status::ScrapeStatus;
use crate::domain::{ResultSet, SearchParameters};
use crate::infrastructure::{
    DocumentFetcher, HttpClient, ListingDetailParser, ScraperConfig, SearchResultsParser,
};

/// Ranked results plus failure counters
#[derive(Debug, Clone, PartialEq)]
pub struct ScrapeReport {
    pub result_set: ResultSet,
    pub pages_requested: u32,
    /// Results pages that could not be fetched (or whose worker crashed)
    pub pages_failed: u32,
    /// Listings dropped across all pages
    pub listings_failed: usize,
}

impl ScrapeReport {
    /// Every requested page failed
    pub fn is_total_failure(&self) -> bool {
        self.pages_requested > 0 && self.pages_failed == self.pages_requested
    }
}

/// Base search URL: `{origin}{path}?q=..&l=..&radius=..`, spaces as `+`
pub fn build_search_url(origin: &str, search_path: &str, params: &SearchParameters) -> String {
    let encode = |value: &str| form_urlencoded::byte_serialize(value.as_bytes()).collect::<String>();
    format!(
        "{}{}?q={}&l={}&radius={}",
        origin.trim_end_matches('/'),
        search_path,
        encode(params.query()),
        encode(params.location()),
        params.radius_miles()
    )
}

pub struct ScrapeOrchestrator {
    config: ScraperConfig,
    worker: Arc<PageWorker>,
    status: ScrapeStatus,
}

impl ScrapeOrchestrator {
    /// Orchestrator backed by a real HTTP client
    pub fn new(config: ScraperConfig) -> Result<Self, ScrapeError> {
        let client = HttpClient::new(&config).map_err(|e| ScrapeError::Setup(format!("{e:#}")))?;
        Self::with_fetcher(config, Arc::new(client))
    }

    /// Orchestrator over any document source
    pub fn with_fetcher(config: ScraperConfig, fetcher: Arc<dyn DocumentFetcher>) -> Result<Self, ScrapeError> {
        config
            .validate()
            .map_err(|e| ScrapeError::Setup(e.to_string()))?;

        let setup = |e: crate::infrastructure::ParsingError| ScrapeError::Setup(e.to_string());
        let results_parser = SearchResultsParser::with_config(&config.selectors).map_err(setup)?;
        let detail_parser = ListingDetailParser::with_config(&config.selectors).map_err(setup)?;

        let resolver = ListingResolver::new(
            Arc::clone(&fetcher),
            Arc::new(detail_parser),
            config.origin.clone(),
        );
        let worker = PageWorker::new(
            fetcher,
            Arc::new(results_parser),
            Arc::new(resolver),
            config.results_per_page,
            config.max_concurrent_listings,
        );

        Ok(Self {
            config,
            worker: Arc::new(worker),
            status: ScrapeStatus::new(),
        })
    }

    /// Handle for polling whether a scrape is running
    pub fn status(&self) -> ScrapeStatus {
        self.status.clone()
    }

    pub fn config(&self) -> &ScraperConfig {
        &self.config
    }

    pub async fn scrape(&self, params: &SearchParameters) -> Result<ScrapeReport, ScrapeError> {
        self.scrape_with_cancellation(params, CancellationToken::new()).await
    }

    pub async fn scrape_with_cancellation(
        &self,
        params: &SearchParameters,
        cancellation_token: CancellationToken,
    ) -> Result<ScrapeReport, ScrapeError> {
        params.validate()?;

        let _in_progress = self.status.begin();
        let base_url: Arc<str> = build_search_url(&self.config.origin, &self.config.search_path, params).into();
        let pages = params.page_count();
        let pool_size = (pages as usize).min(self.config.max_concurrent_pages).max(1);

        info!(
            pages,
            pool_size,
            "🚀 Starting scrape for '{}' in '{}'",
            params.query(),
            params.location()
        );

        let semaphore = Arc::new(Semaphore::new(pool_size));
        let shared_params = Arc::new(params.clone());
        let mut tasks = JoinSet::new();

        for page_index in 0..pages {
            let semaphore = Arc::clone(&semaphore);
            let worker = Arc::clone(&self.worker);
            let base_url = Arc::clone(&base_url);
            let params = Arc::clone(&shared_params);
            let token = cancellation_token.clone();

            tasks.spawn(async move {
                let _permit = tokio::select! {
                    permit = semaphore.acquire_owned() => permit.ok()?,
                    _ = token.cancelled() => return None,
                };
                Some(worker.process_page(&base_url, page_index, &params, &token).await)
            });
        }

        let mut outcomes: Vec<PageOutcome> = Vec::with_capacity(pages as usize);
        while let Some(joined) = tasks.join_next().await {
            match joined {
                Ok(Some(outcome)) => outcomes.push(outcome),
                Ok(None) => {}
                Err(e) => error!("Page task failed to complete: {}", e),
            }
        }

        if cancellation_token.is_cancelled() {
            warn!("🛑 Scrape cancelled after {} of {} pages", outcomes.len(), pages);
            return Err(ScrapeError::Cancelled);
        }

        outcomes.sort_by_key(|outcome| outcome.page_number);

        let crashed_pages = pages - outcomes.len() as u32;
        let pages_failed = crashed_pages + outcomes.iter().filter(|o| o.page_failed).count() as u32;
        let listings_failed = outcomes.iter().map(|o| o.failed_listings).sum();
        let merged = outcomes.into_iter().flat_map(|o| o.records).collect();
        let result_set = ResultSet::from_records(merged);

        info!(
            results = result_set.len(),
            pages_failed,
            listings_failed,
            "✅ Scrape completed"
        );
        if pages_failed == pages {
            warn!("Every results page failed; returning an empty result set");
        }

        Ok(ScrapeReport {
            result_set,
            pages_requested: pages,
            pages_failed,
            listings_failed,
        })
    }
}
