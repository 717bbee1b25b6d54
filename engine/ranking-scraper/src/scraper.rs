use anyhow::{Context, Result};
use async_trait::async_trait;
use rank_consensus::RawRankingRecord;
use regex::Regex;
use reqwest::Client;
use scraper::{ElementRef, Html, Selector};
use tracing::{debug, info};

use crate::config::{ScraperSettings, SourceConfig};
use crate::source::RankingSource;

/// First 2-3 letter uppercase run in the team cell (e.g., "@ PHI" -> "PHI")
const TEAM_PATTERN: &str = r"[A-Z]{2,3}";

/// Build the HTTP client shared by all table scrapers
pub fn build_client(settings: &ScraperSettings) -> Result<Client> {
    Client::builder()
        .timeout(settings.timeout())
        .user_agent(settings.user_agent.as_str())
        .build()
        .context("Failed to create HTTP client")
}

/// Turns a source's ranking table into raw records
#[derive(Debug)]
pub struct TableParser {
    source_id: String,
    row_selector: Selector,
    cell_selector: Selector,
    team_pattern: Regex,
    min_cells: usize,
    rank_column: usize,
    name_column: usize,
    team_column: usize,
}

impl TableParser {
    pub fn new(config: &SourceConfig) -> Result<Self> {
        let row_selector = Selector::parse(&config.row_selector).map_err(|e| {
            anyhow::anyhow!("Invalid row selector '{}' for {}: {}", config.row_selector, config.id, e)
        })?;

        let cell_selector = Selector::parse("td")
            .map_err(|e| anyhow::anyhow!("Failed to create cell selector: {}", e))?;

        let team_pattern = Regex::new(TEAM_PATTERN).context("Failed to compile team pattern")?;

        Ok(Self {
            source_id: config.id.clone(),
            row_selector,
            cell_selector,
            team_pattern,
            min_cells: config.min_cells(),
            rank_column: config.rank_column,
            name_column: config.name_column,
            team_column: config.team_column,
        })
    }

    /// Parse every usable row of the page; rows without a valid rank or name are skipped
    pub fn parse(&self, html: &str) -> Vec<RawRankingRecord> {
        let document = Html::parse_document(html);

        document
            .select(&self.row_selector)
            .enumerate()
            .filter_map(|(row_index, row)| {
                let record = self.parse_row(&row);
                if record.is_none() {
                    debug!("Skipping {} row {}", self.source_id, row_index);
                }
                record
            })
            .collect()
    }

    fn parse_row(&self, row: &ElementRef) -> Option<RawRankingRecord> {
        let cells: Vec<String> = row
            .select(&self.cell_selector)
            .map(|cell| cell.text().collect::<String>().trim().to_string())
            .collect();

        if cells.len() < self.min_cells {
            return None;
        }

        let rank = parse_rank(&cells[self.rank_column])?;

        let name = &cells[self.name_column];
        if name.is_empty() {
            return None;
        }

        let team = self
            .team_pattern
            .find(&cells[self.team_column])
            .map(|m| m.as_str().to_string())
            .unwrap_or_default();

        Some(RawRankingRecord::new(self.source_id.as_str(), rank, name.as_str(), team))
    }
}

/// Read the leading integer of a rank cell ("12", "3.", "7 (T)")
///
/// Returns `None` for text without leading digits and for zero, since ranks
/// start at 1.
pub fn parse_rank(text: &str) -> Option<u32> {
    let text = text.trim();
    let text = text.strip_prefix('+').unwrap_or(text);

    let digits_end = text.find(|c: char| !c.is_ascii_digit()).unwrap_or(text.len());
    match text[..digits_end].parse::<u32>() {
        Ok(rank) if rank > 0 => Some(rank),
        _ => None,
    }
}

/// Scrapes a ranking table from a single web page
pub struct TableScraper {
    client: Client,
    url: String,
    parser: TableParser,
}

impl TableScraper {
    pub fn new(client: Client, config: &SourceConfig) -> Result<Self> {
        Ok(Self { client, url: config.url.clone(), parser: TableParser::new(config)? })
    }
}

#[async_trait]
impl RankingSource for TableScraper {
    fn id(&self) -> &str {
        &self.parser.source_id
    }

    async fn fetch(&self) -> Result<Vec<RawRankingRecord>> {
        info!("Fetching {} rankings from: {}", self.id(), self.url);

        let response = self
            .client
            .get(&self.url)
            .send()
            .await
            .with_context(|| format!("Failed to fetch {} rankings page", self.id()))?;

        if !response.status().is_success() {
            anyhow::bail!("HTTP request for {} failed with status: {}", self.id(), response.status());
        }

        let html = response.text().await.context("Failed to read response body")?;
        info!("Successfully fetched {} HTML ({} bytes)", self.id(), html.len());

        let records = self.parser.parse(&html);
        info!("Parsed {} ranking rows from {}", records.len(), self.id());

        Ok(records)
    }
}
