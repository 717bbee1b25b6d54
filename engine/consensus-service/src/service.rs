//! Service state: configured ranking sources and consensus generation

use chrono::Utc;
use rank_consensus::{build_consensus, ConsensusResponse};
use ranking_scraper::{build_sources, fetch_all, RankingSource};
use std::sync::Arc;
use tracing::{debug, info};

use crate::config::ServiceConfig;
use crate::error::{Result, ServiceError};

/// Shared state handed to every request handler
pub struct ServiceState {
    /// Service configuration
    pub config: ServiceConfig,

    /// Ranking sources queried on every consensus request
    sources: Vec<Arc<dyn RankingSource>>,
}

impl ServiceState {
    /// Create service state with a scraper for every enabled source
    pub fn new(config: ServiceConfig) -> Result<Self> {
        let sources = build_sources(&config.scraper, &config.sources)
            .map_err(|e| ServiceError::Config(format!("{e:#}")))?;

        info!(
            "Configured {} ranking sources: {}",
            sources.len(),
            sources.iter().map(|s| s.id()).collect::<Vec<_>>().join(", ")
        );

        Ok(Self::with_sources(config, sources))
    }

    /// Create service state around already-built sources
    pub fn with_sources(config: ServiceConfig, sources: Vec<Arc<dyn RankingSource>>) -> Self {
        Self { config, sources }
    }

    pub fn source_count(&self) -> usize {
        self.sources.len()
    }

    /// Fetch every source and build a fresh consensus
    ///
    /// Any failing source fails the whole request.
    pub async fn consensus(&self) -> Result<ConsensusResponse> {
        let records =
            fetch_all(&self.sources).await.map_err(|e| ServiceError::SourceFetch(format!("{e:#}")))?;

        let consensus = build_consensus(&records);
        debug!("Built consensus of {} players from {} records", consensus.len(), records.len());

        Ok(ConsensusResponse::new(Utc::now(), consensus))
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use anyhow::Result;
    use async_trait::async_trait;
    use rank_consensus::RawRankingRecord;
    use ranking_scraper::RankingSource;

    /// Source returning a fixed list of records
    pub struct StaticSource {
        pub id: &'static str,
        pub records: Vec<RawRankingRecord>,
    }

    #[async_trait]
    impl RankingSource for StaticSource {
        fn id(&self) -> &str {
            self.id
        }

        async fn fetch(&self) -> Result<Vec<RawRankingRecord>> {
            Ok(self.records.clone())
        }
    }

    /// Source that always fails like an unreachable site
    pub struct FailingSource;

    #[async_trait]
    impl RankingSource for FailingSource {
        fn id(&self) -> &str {
            "espn"
        }

        async fn fetch(&self) -> Result<Vec<RawRankingRecord>> {
            anyhow::bail!("HTTP request for espn failed with status: 502 Bad Gateway")
        }
    }

    pub fn cbs_source() -> StaticSource {
        StaticSource {
            id: "cbs",
            records: vec![
                RawRankingRecord::new("cbs", 1, "A.J. Brown", "PHI"),
                RawRankingRecord::new("cbs", 2, "Ja'Marr Chase", "CIN"),
            ],
        }
    }

    pub fn fp_source() -> StaticSource {
        StaticSource {
            id: "fp",
            records: vec![
                RawRankingRecord::new("fp", 1, "JaMarr Chase", ""),
                RawRankingRecord::new("fp", 2, "aj brown", ""),
                RawRankingRecord::new("fp", 3, "Puka Nacua", "LAR"),
            ],
        }
    }
}
