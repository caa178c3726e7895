//! Domain module - search requests, listings and ranked results
//!
//! Plain data types shared by the pipeline. Nothing here performs I/O.

pub mod listing;
pub mod result_set;
pub mod search;

pub use listing::{ListingRecord, ListingStub};
pub use result_set::{RESULT_COLUMNS, ResultRow, ResultSet, ResultTable, round_rating};
pub use search::{MAX_PAGE_COUNT, ParameterError, SearchParameters, SearchParametersBuilder};
