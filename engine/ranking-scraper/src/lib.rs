//! Ranking Scraper - fetches player rankings from fantasy football sites
//!
//! Each source is scraped into `RawRankingRecord`s: rows without a positive
//! integer rank are dropped and unknown teams become an empty string, so the
//! records can go straight into the consensus builder.

pub mod config;
pub mod scraper;
pub mod source;

pub use config::{default_sources, ScraperSettings, SourceConfig};
pub use crate::scraper::{parse_rank, TableParser, TableScraper};
pub use source::{build_sources, fetch_all, RankingSource};
