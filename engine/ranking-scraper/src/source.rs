use anyhow::{Context, Result};
use async_trait::async_trait;
use futures::future::try_join_all;
use rank_consensus::RawRankingRecord;
use std::sync::Arc;
use tracing::info;

use crate::config::{ScraperSettings, SourceConfig};
use crate::scraper::{build_client, TableScraper};

/// A provider of one ranked list of players
#[async_trait]
pub trait RankingSource: Send + Sync {
    /// Identifier recorded as the `source` of every record
    fn id(&self) -> &str;

    /// Fetch the source's current ranking list
    async fn fetch(&self) -> Result<Vec<RawRankingRecord>>;
}

/// Create a scraper for every enabled source, sharing one HTTP client
pub fn build_sources(
    settings: &ScraperSettings,
    configs: &[SourceConfig],
) -> Result<Vec<Arc<dyn RankingSource>>> {
    let client = build_client(settings)?;

    configs
        .iter()
        .filter(|config| config.enabled)
        .map(|config| {
            let scraper = TableScraper::new(client.clone(), config)
                .with_context(|| format!("Failed to set up source '{}'", config.id))?;
            Ok(Arc::new(scraper) as Arc<dyn RankingSource>)
        })
        .collect()
}

/// Fetch all sources concurrently and concatenate their records
///
/// Fails as soon as any source fails; partial results are discarded.
pub async fn fetch_all(sources: &[Arc<dyn RankingSource>]) -> Result<Vec<RawRankingRecord>> {
    let fetches = sources.iter().map(|source| async move {
        source.fetch().await.with_context(|| format!("Source '{}' failed", source.id()))
    });

    let per_source = try_join_all(fetches).await?;
    let records: Vec<RawRankingRecord> = per_source.into_iter().flatten().collect();

    info!("Fetched {} ranking records from {} sources", records.len(), sources.len());
    Ok(records)
}
