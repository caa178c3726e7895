//! Final ranked result collection and its tabular view
//!
//! Ordering rules:
//! - records are stably sorted by rating, highest first, so ties keep
//!   encounter order (lower page first)
//! - ratings are rounded to three decimals after sorting
//! - duplicates on (rounded rating, title, company) collapse to the first one

use std::collections::HashSet;

use serde::Serialize;

use super::listing::ListingRecord;

/// Column headers of the exported table, in order
pub const RESULT_COLUMNS: [&str; 8] = [
    "Rating",
    "Job Title",
    "Company",
    "Description",
    "Job URL",
    "Keywords Present",
    "Title Keywords",
    "Page Found",
];

/// Ordered, de-duplicated listings
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ResultSet {
    records: Vec<ListingRecord>,
}

impl ResultSet {
    /// Rank merged page results. `records` must be in encounter order.
    pub fn from_records(mut records: Vec<ListingRecord>) -> Self {
        // `sort_by` is stable, which gives the encounter-order tie break
        records.sort_by(|a, b| b.rating.total_cmp(&a.rating));

        let mut seen: HashSet<(u64, String, String)> = HashSet::with_capacity(records.len());
        let mut ranked = Vec::with_capacity(records.len());

        for mut record in records {
            record.rating = round_rating(record.rating);
            let key = (
                record.rating.to_bits(),
                record.title.clone(),
                record.company.clone(),
            );
            if seen.insert(key) {
                ranked.push(record);
            }
        }

        Self { records: ranked }
    }

    pub fn records(&self) -> &[ListingRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn into_records(self) -> Vec<ListingRecord> {
        self.records
    }

    /// Row-per-record view with the export column layout
    pub fn to_table(&self) -> ResultTable {
        ResultTable {
            rows: self.records.iter().map(ResultRow::from).collect(),
        }
    }
}

/// Round to three decimal places, halves to even
pub fn round_rating(rating: f64) -> f64 {
    (rating * 1000.0).round_ties_even() / 1000.0
}

/// One exported row; field order matches [`RESULT_COLUMNS`]
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResultRow {
    #[serde(rename = "Rating")]
    pub rating: f64,
    #[serde(rename = "Job Title")]
    pub job_title: String,
    #[serde(rename = "Company")]
    pub company: String,
    #[serde(rename = "Description")]
    pub description: String,
    #[serde(rename = "Job URL")]
    pub job_url: String,
    #[serde(rename = "Keywords Present")]
    pub keywords_present: String,
    #[serde(rename = "Title Keywords")]
    pub title_keywords: String,
    #[serde(rename = "Page Found")]
    pub page_found: u32,
}

impl From<&ListingRecord> for ResultRow {
    fn from(record: &ListingRecord) -> Self {
        Self {
            rating: record.rating,
            job_title: record.title.clone(),
            company: record.company.clone(),
            description: record.description.clone(),
            job_url: record.url.clone(),
            keywords_present: render_keyword_list(&record.matched_keywords),
            title_keywords: render_keyword_list(&record.matched_title_keywords),
            page_found: record.page_number,
        }
    }
}

/// Spreadsheet-shaped result: no index column, one row per listing
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ResultTable {
    pub rows: Vec<ResultRow>,
}

impl ResultTable {
    pub fn columns(&self) -> &'static [&'static str] {
        &RESULT_COLUMNS
    }
}

/// Literal list rendering, e.g. `['Python', 'SQL']`
pub fn render_keyword_list(keywords: &[String]) -> String {
    let quoted: Vec<String> = keywords.iter().map(|k| format!("'{k}'")).collect();
    format!("[{}]", quoted.join(", "))
}
