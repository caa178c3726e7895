//! Resolves one listing stub into a scored record
//!
//! Fetch the detail page, extract company and description, score against the
//! stub title. The record URL is the post-redirect URL, not the stub link.

use std::sync::Arc;

use tokio_util::sync::CancellationToken;
use tracing::debug;

use super::error::ResolutionError;
use super::scoring::score;
use crate::domain::{ListingRecord, ListingStub, SearchParameters};
use crate::infrastructure::{DocumentFetcher, ListingDetailParser, resolve_listing_url};

pub struct ListingResolver {
    fetcher: Arc<dyn DocumentFetcher>,
    detail_parser: Arc<ListingDetailParser>,
    origin: String,
}

impl ListingResolver {
    pub fn new(
        fetcher: Arc<dyn DocumentFetcher>,
        detail_parser: Arc<ListingDetailParser>,
        origin: impl Into<String>,
    ) -> Self {
        Self {
            fetcher,
            detail_parser,
            origin: origin.into(),
        }
    }

    pub async fn resolve(
        &self,
        stub: &ListingStub,
        params: &SearchParameters,
        page_number: u32,
        cancellation_token: &CancellationToken,
    ) -> Result<ListingRecord, ResolutionError> {
        let url = resolve_listing_url(&stub.url, &self.origin);
        let document = self.fetcher.fetch(&url, cancellation_token).await?;

        let detail = self.detail_parser.parse_detail(&document.body, &document.final_url)?;
        let outcome = score(&stub.title, &detail.description, params);

        debug!(
            page = page_number,
            rating = outcome.rating,
            "Resolved '{}' at {}",
            stub.title,
            document.final_url
        );

        Ok(ListingRecord {
            rating: outcome.rating,
            title: stub.title.clone(),
            company: detail.company,
            description: detail.description,
            url: document.final_url,
            matched_keywords: outcome.matched_keywords,
            matched_title_keywords: outcome.matched_title_keywords,
            page_number,
        })
    }
}
