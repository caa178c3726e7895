//! HTML parsing for search results and listing detail pages
//!
//! Documents are parsed with `scraper` into a navigable tree and fields are
//! pulled out with CSS selectors compiled once from [`SelectorConfig`].
//! `scraper::Html` is not `Send`, so parsers always finish with a tree before
//! handing owned data back to async code.

pub mod config;
pub mod context;
pub mod error;
pub mod listing_detail_parser;
pub mod search_results_parser;

pub use config::SelectorConfig;
pub use context::DetailParseContext;
pub use error::{ParsingError, ParsingResult};
pub use listing_detail_parser::{ListingDetail, ListingDetailParser};
pub use search_results_parser::SearchResultsParser;

use scraper::{Html, Selector};

/// Parser that needs context about where the document came from
pub trait ContextualParser {
    type Output;
    type Context;

    fn parse_with_context(&self, html: &Html, context: &Self::Context) -> ParsingResult<Self::Output>;
}

/// Parse raw HTML into a document tree
pub fn parse_document(raw_html: &str) -> Html {
    Html::parse_document(raw_html)
}

/// Compile one selector string
pub fn compile_selector(selector: &str) -> ParsingResult<Selector> {
    Selector::parse(selector).map_err(|e| ParsingError::invalid_selector(selector, e))
}

/// Prefix root-relative links with the canonical origin; anything else passes through
pub fn resolve_listing_url(href: &str, origin: &str) -> String {
    if href.starts_with('/') {
        format!("{}{}", origin.trim_end_matches('/'), href)
    } else {
        href.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("/rc/clk?jk=abc", "https://www.indeed.co.uk/rc/clk?jk=abc")]
    #[case("/viewjob", "https://www.indeed.co.uk/viewjob")]
    #[case("https://other.example/job/1", "https://other.example/job/1")]
    #[case("viewjob?jk=1", "viewjob?jk=1")]
    fn test_resolve_listing_url(#[case] href: &str, #[case] expected: &str) {
        assert_eq!(resolve_listing_url(href, "https://www.indeed.co.uk"), expected);
    }

    #[test]
    fn test_resolve_ignores_trailing_slash_on_origin() {
        assert_eq!(
            resolve_listing_url("/job/1", "http://127.0.0.1:1234/"),
            "http://127.0.0.1:1234/job/1"
        );
    }

    #[test]
    fn test_invalid_selector_is_reported() {
        let err = compile_selector("div[").unwrap_err();
        assert!(matches!(err, ParsingError::InvalidSelector { .. }));
    }
}
