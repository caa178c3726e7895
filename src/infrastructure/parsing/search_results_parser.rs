//! Listing stub extraction from search results pages
//!
//! A card missing its link or title is skipped, so a changed layout degrades
//! to zero stubs instead of failing the page.

use scraper::{ElementRef, Html, Selector};
use tracing::debug;

use super::{ParsingResult, SelectorConfig, compile_selector, parse_document};
use crate::domain::ListingStub;

/// Parser for search results pages
pub struct SearchResultsParser {
    card_selector: Selector,
    title_link_selector: Selector,
}

impl SearchResultsParser {
    pub fn new() -> ParsingResult<Self> {
        Self::with_config(&SelectorConfig::default())
    }

    pub fn with_config(selectors: &SelectorConfig) -> ParsingResult<Self> {
        Ok(Self {
            card_selector: compile_selector(&selectors.listing_card)?,
            title_link_selector: compile_selector(&selectors.title_link)?,
        })
    }

    /// All well-formed stubs on the page, in document order
    pub fn extract_listing_stubs(&self, html: &Html) -> Vec<ListingStub> {
        html.select(&self.card_selector)
            .enumerate()
            .filter_map(|(index, card)| {
                let stub = self.extract_stub(&card);
                if stub.is_none() {
                    debug!("Skipping listing card {} without link or title", index);
                }
                stub
            })
            .collect()
    }

    /// Parse raw HTML and extract stubs in one step
    pub fn parse_stubs(&self, raw_html: &str) -> Vec<ListingStub> {
        let html = parse_document(raw_html);
        self.extract_listing_stubs(&html)
    }

    fn extract_stub(&self, card: &ElementRef) -> Option<ListingStub> {
        let link = card.select(&self.title_link_selector).next()?;
        let href = link.value().attr("href").map(str::trim).filter(|h| !h.is_empty())?;

        // Fall back to the link text when the title attribute is absent
        let title = match link.value().attr("title") {
            Some(title) if !title.trim().is_empty() => title.trim().to_string(),
            _ => {
                let text = link.text().collect::<String>();
                let text = text.trim();
                if text.is_empty() {
                    return None;
                }
                text.to_string()
            }
        };

        Some(ListingStub::new(href, title))
    }
}
