//! Company and description extraction from listing detail pages

use scraper::{Html, Selector};
use tracing::debug;

use super::{
    ContextualParser, DetailParseContext, ParsingError, ParsingResult, SelectorConfig,
    compile_selector, parse_document,
};

/// Fields a detail page contributes to a listing record
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListingDetail {
    pub company: String,
    /// Text content of the description container, unmodified
    pub description: String,
}

/// Parser for listing detail pages
pub struct ListingDetailParser {
    description_selector: Selector,
    company_selector: Selector,
}

impl ListingDetailParser {
    pub fn new() -> ParsingResult<Self> {
        Self::with_config(&SelectorConfig::default())
    }

    pub fn with_config(selectors: &SelectorConfig) -> ParsingResult<Self> {
        Ok(Self {
            description_selector: compile_selector(&selectors.description)?,
            company_selector: compile_selector(&selectors.company)?,
        })
    }

    /// Concatenated text of the description container
    pub fn extract_description(&self, html: &Html, url: &str) -> ParsingResult<String> {
        html.select(&self.description_selector)
            .next()
            .map(|element| element.text().collect::<String>())
            .ok_or_else(|| ParsingError::required_field_missing("description", url))
    }

    /// Trimmed company name
    pub fn extract_company(&self, html: &Html, url: &str) -> ParsingResult<String> {
        html.select(&self.company_selector)
            .next()
            .map(|element| element.text().collect::<String>().trim().to_string())
            .ok_or_else(|| ParsingError::required_field_missing("company", url))
    }

    /// Parse raw HTML served from `url` and extract both fields
    pub fn parse_detail(&self, raw_html: &str, url: &str) -> ParsingResult<ListingDetail> {
        let html = parse_document(raw_html);
        self.parse_with_context(&html, &DetailParseContext::new(url))
    }
}

impl ContextualParser for ListingDetailParser {
    type Output = ListingDetail;
    type Context = DetailParseContext;

    fn parse_with_context(&self, html: &Html, context: &Self::Context) -> ParsingResult<Self::Output> {
        let company = self.extract_company(html, &context.url)?;
        let description = self.extract_description(html, &context.url)?;
        debug!("Extracted detail for {} ({} chars)", context.url, description.len());
        Ok(ListingDetail {
            company,
            description,
        })
    }
}
