//! CSS selectors for the job board markup
//!
//! Kept in configuration so a layout change can be followed without a rebuild.

use serde::{Deserialize, Serialize};

/// Selector strings for search results and detail pages
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SelectorConfig {
    /// One element per listing on a search results page
    pub listing_card: String,

    /// Title link inside a listing card; carries `href` and `title`
    pub title_link: String,

    /// Description container on a detail page
    pub description: String,

    /// Company name element on a detail page
    pub company: String,
}

impl Default for SelectorConfig {
    fn default() -> Self {
        Self {
            listing_card: ".jobsearch-SerpJobCard".to_string(),
            title_link: ".title a".to_string(),
            description: "#jobDescriptionText".to_string(),
            company: ".icl-u-lg-mr--sm".to_string(),
        }
    }
}
