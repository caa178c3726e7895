//! Search parameters for a single scrape
//!
//! `SearchParameters` is immutable once built. The builder validates the
//! query, location and page count before any network activity can happen,
//! and normalizes keyword lists (trimmed, empty entries dropped).

use std::collections::BTreeSet;

use serde::Serialize;
use thiserror::Error;

/// Largest number of result pages the job board serves for one search
pub const MAX_PAGE_COUNT: u32 = 100;

/// Rejection reasons for caller-supplied parameters
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParameterError {
    #[error("search query must not be empty")]
    EmptyQuery,

    #[error("location must not be empty")]
    EmptyLocation,

    #[error("page count {pages} is outside the allowed range 1..={max}")]
    PageCountOutOfRange { pages: u32, max: u32 },
}

/// Validated search request
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SearchParameters {
    query: String,
    location: String,
    radius_miles: u32,
    /// Preference order is priority order
    description_keywords: Vec<String>,
    /// Matched against the listing title; outrank description keywords
    title_keywords: Vec<String>,
    /// Any hit in the title zeroes the rating
    exclude_keywords: BTreeSet<String>,
    page_count: u32,
}

impl SearchParameters {
    /// Start building parameters for `query` around `location`
    pub fn builder(query: impl Into<String>, location: impl Into<String>) -> SearchParametersBuilder {
        SearchParametersBuilder {
            query: query.into(),
            location: location.into(),
            radius_miles: 0,
            description_keywords: Vec::new(),
            title_keywords: Vec::new(),
            exclude_keywords: Vec::new(),
            page_count: 1,
        }
    }

    /// Build parameters from the comma separated keyword strings a search form collects
    /// (e.g. `"Banking, Finance, Python"`).
    pub fn from_comma_lists(
        query: &str,
        location: &str,
        radius_miles: u32,
        description_keywords: &str,
        title_keywords: &str,
        exclude_keywords: &str,
        page_count: u32,
    ) -> Result<Self, ParameterError> {
        Self::builder(query, location)
            .radius_miles(radius_miles)
            .description_keywords(split_keyword_list(description_keywords))
            .title_keywords(split_keyword_list(title_keywords))
            .exclude_keywords(split_keyword_list(exclude_keywords))
            .page_count(page_count)
            .build()
    }

    /// The search the original job board form was pre-filled with
    pub fn default_search() -> Self {
        Self {
            query: "Graduate Python".to_string(),
            location: "London".to_string(),
            radius_miles: 15,
            description_keywords: split_keyword_list(
                "Banking, Finance, Hedge, Python, Fintech, SQL, Analysis, Modelling",
            ),
            title_keywords: split_keyword_list("Graduate, Junior"),
            exclude_keywords: split_keyword_list("Recruitment, Headhunting").into_iter().collect(),
            page_count: 10,
        }
    }

    /// Re-check the invariants the builder enforces
    pub fn validate(&self) -> Result<(), ParameterError> {
        validate_fields(&self.query, &self.location, self.page_count)
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn location(&self) -> &str {
        &self.location
    }

    pub fn radius_miles(&self) -> u32 {
        self.radius_miles
    }

    pub fn description_keywords(&self) -> &[String] {
        &self.description_keywords
    }

    pub fn title_keywords(&self) -> &[String] {
        &self.title_keywords
    }

    pub fn exclude_keywords(&self) -> &BTreeSet<String> {
        &self.exclude_keywords
    }

    pub fn page_count(&self) -> u32 {
        self.page_count
    }

    /// Combined size of both ranked keyword lists
    pub fn total_keywords(&self) -> usize {
        self.description_keywords.len() + self.title_keywords.len()
    }
}

/// Builder for [`SearchParameters`]
#[derive(Debug, Clone)]
pub struct SearchParametersBuilder {
    query: String,
    location: String,
    radius_miles: u32,
    description_keywords: Vec<String>,
    title_keywords: Vec<String>,
    exclude_keywords: Vec<String>,
    page_count: u32,
}

impl SearchParametersBuilder {
    pub fn radius_miles(mut self, miles: u32) -> Self {
        self.radius_miles = miles;
        self
    }

    pub fn description_keywords<I, S>(mut self, keywords: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.description_keywords = keywords.into_iter().map(Into::into).collect();
        self
    }

    pub fn title_keywords<I, S>(mut self, keywords: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.title_keywords = keywords.into_iter().map(Into::into).collect();
        self
    }

    pub fn exclude_keywords<I, S>(mut self, keywords: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.exclude_keywords = keywords.into_iter().map(Into::into).collect();
        self
    }

    pub fn page_count(mut self, pages: u32) -> Self {
        self.page_count = pages;
        self
    }

    /// Validate and freeze the parameters
    pub fn build(self) -> Result<SearchParameters, ParameterError> {
        let query = self.query.trim().to_string();
        let location = self.location.trim().to_string();
        validate_fields(&query, &location, self.page_count)?;

        Ok(SearchParameters {
            query,
            location,
            radius_miles: self.radius_miles,
            description_keywords: clean_keywords(self.description_keywords),
            title_keywords: clean_keywords(self.title_keywords),
            exclude_keywords: clean_keywords(self.exclude_keywords).into_iter().collect(),
            page_count: self.page_count,
        })
    }
}

fn validate_fields(query: &str, location: &str, page_count: u32) -> Result<(), ParameterError> {
    if query.trim().is_empty() {
        return Err(ParameterError::EmptyQuery);
    }
    if location.trim().is_empty() {
        return Err(ParameterError::EmptyLocation);
    }
    if page_count == 0 || page_count > MAX_PAGE_COUNT {
        return Err(ParameterError::PageCountOutOfRange {
            pages: page_count,
            max: MAX_PAGE_COUNT,
        });
    }
    Ok(())
}

// An empty keyword is a substring of every text, so it is never kept.
fn clean_keywords(keywords: Vec<String>) -> Vec<String> {
    keywords
        .into_iter()
        .map(|k| k.trim().to_string())
        .filter(|k| !k.is_empty())
        .collect()
}

/// Split a comma separated keyword list, trimming entries and dropping blanks
pub fn split_keyword_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}
