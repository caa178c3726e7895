//! In-memory fetcher for pipeline unit tests

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use tokio_util::sync::CancellationToken;

use crate::infrastructure::{DocumentFetcher, FetchError, FetchedDocument};

/// Serves canned documents by URL; unknown URLs answer 404
#[derive(Default)]
pub struct StubFetcher {
    pages: HashMap<String, (String, String)>,
    delay: Option<Duration>,
    pub in_flight: Arc<AtomicUsize>,
    pub max_in_flight: Arc<AtomicUsize>,
    pub requests: Arc<Mutex<Vec<String>>>,
}

impl StubFetcher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_page(self, url: &str, body: impl Into<String>) -> Self {
        self.with_redirect(url, url, body)
    }

    pub fn with_redirect(mut self, url: &str, final_url: &str, body: impl Into<String>) -> Self {
        self.pages
            .insert(url.to_string(), (final_url.to_string(), body.into()));
        self
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    pub fn results_page(listings: &[(&str, &str)]) -> String {
        let cards: String = listings
            .iter()
            .map(|(href, title)| {
                format!(
                    r#"<div class="jobsearch-SerpJobCard"><h2 class="title"><a href="{href}" title="{title}">{title}</a></h2></div>"#
                )
            })
            .collect();
        format!("<html><body>{cards}</body></html>")
    }

    pub fn detail_page(company: &str, description: &str) -> String {
        format!(
            r#"<html><body><div class="icl-u-lg-mr--sm">{company}</div><div id="jobDescriptionText">{description}</div></body></html>"#
        )
    }
}

#[async_trait]
impl DocumentFetcher for StubFetcher {
    async fn fetch(&self, url: &str, cancellation_token: &CancellationToken) -> Result<FetchedDocument, FetchError> {
        if let Ok(mut requests) = self.requests.lock() {
            requests.push(url.to_string());
        }

        let current = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.max_in_flight.fetch_max(current, Ordering::SeqCst);

        let cancelled = match self.delay {
            Some(delay) => tokio::select! {
                _ = tokio::time::sleep(delay) => false,
                _ = cancellation_token.cancelled() => true,
            },
            None => cancellation_token.is_cancelled(),
        };
        self.in_flight.fetch_sub(1, Ordering::SeqCst);

        if cancelled {
            return Err(FetchError::Cancelled { url: url.to_string() });
        }

        match self.pages.get(url) {
            Some((final_url, body)) => Ok(FetchedDocument {
                requested_url: url.to_string(),
                final_url: final_url.clone(),
                body: body.clone(),
            }),
            None => Err(FetchError::Status {
                url: url.to_string(),
                status: 404,
            }),
        }
    }
}
