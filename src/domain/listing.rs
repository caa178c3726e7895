//! Listing entities
//!
//! A `ListingStub` is what a search results page tells us about a posting.
//! A `ListingRecord` is the fully resolved and scored posting.

use serde::{Deserialize, Serialize};

/// Reference to one posting found on a search results page
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListingStub {
    /// Detail page link as it appeared in the markup (may be relative)
    pub url: String,
    /// Title attribute of the listing link
    pub title: String,
}

impl ListingStub {
    pub fn new(url: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            title: title.into(),
        }
    }
}

/// Resolved, scored posting
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ListingRecord {
    /// Normalized relevance in `[0, 1]`
    pub rating: f64,
    pub title: String,
    pub company: String,
    pub description: String,
    /// URL after the redirect chain was followed
    pub url: String,
    /// Subset of the description keywords, in preference order
    pub matched_keywords: Vec<String>,
    /// Subset of the title keywords, in preference order
    pub matched_title_keywords: Vec<String>,
    /// 1-based results page the listing was found on
    pub page_number: u32,
}
