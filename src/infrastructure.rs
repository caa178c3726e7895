//! Infrastructure layer for HTTP access, HTML parsing, configuration,
//! logging and export.

pub mod config;
pub mod export;
pub mod http_client;
pub mod logging;
pub mod parsing;

pub use config::{AppConfig, ConfigError, LoggingConfig, ScraperConfig, indeed};
pub use http_client::{DocumentFetcher, FetchError, FetchedDocument, HttpClient};
pub use logging::{LoggingGuard, get_log_directory, init_logging, init_logging_with_config};
pub use parsing::{
    ListingDetail, ListingDetailParser, ParsingError, ParsingResult, SearchResultsParser,
    SelectorConfig, parse_document, resolve_listing_url,
};
