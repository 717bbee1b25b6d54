use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// One row of a source's ranking list, as emitted by a scraper
///
/// Scrapers drop rows whose rank does not parse to a positive integer and
/// default the team to an empty string, so the builder trusts these fields.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawRankingRecord {
    /// Ranking source identifier (e.g., "cbs")
    pub source: String,
    /// Position in that source's list (1 = best)
    pub rank: u32,
    /// Player name exactly as the source shows it
    pub display_name: String,
    /// Team abbreviation (e.g., "PHI"), empty when unknown
    #[serde(default)]
    pub team: String,
}

impl RawRankingRecord {
    pub fn new(
        source: impl Into<String>,
        rank: u32,
        display_name: impl Into<String>,
        team: impl Into<String>,
    ) -> Self {
        Self { source: source.into(), rank, display_name: display_name.into(), team: team.into() }
    }
}

/// A player's merged ranking across every source that listed them
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConsensusPlayer {
    /// Slug of the canonical identity (e.g., "aj-brown")
    pub player_id: String,
    /// Display name of the first record seen for this player
    pub name: String,
    /// First non-empty team seen for this player
    pub team: String,
    /// Rank per source identifier
    pub ranks: BTreeMap<String, u32>,
    /// Mean of `ranks`
    pub average_rank: f64,
    /// Number of sources that ranked this player
    pub sources: usize,
}

/// Consensus list plus the time it was generated
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConsensusResponse {
    pub updated_at: DateTime<Utc>,
    pub consensus: Vec<ConsensusPlayer>,
}

impl ConsensusResponse {
    /// Wrap a consensus list with the time the caller generated it
    pub fn new(updated_at: DateTime<Utc>, consensus: Vec<ConsensusPlayer>) -> Self {
        Self { updated_at, consensus }
    }

    /// Get top N players by average rank
    pub fn top_players(&self, limit: usize) -> &[ConsensusPlayer] {
        &self.consensus[..limit.min(self.consensus.len())]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_json_uses_camel_case() {
        let record = RawRankingRecord::new("cbs", 1, "A.J. Brown", "PHI");
        let json = serde_json::to_value(&record).unwrap();

        assert_eq!(json["displayName"], "A.J. Brown");
        assert_eq!(json["source"], "cbs");
        assert_eq!(json["rank"], 1);
    }

    #[test]
    fn test_record_team_defaults_to_empty() {
        let record: RawRankingRecord =
            serde_json::from_str(r#"{"source":"fp","rank":3,"displayName":"Puka Nacua"}"#)
                .unwrap();
        assert_eq!(record.team, "");
    }

    #[test]
    fn test_response_field_names() {
        let mut ranks = BTreeMap::new();
        ranks.insert("cbs".to_string(), 4);
        let response = ConsensusResponse::new(Utc::now(), vec![ConsensusPlayer {
            player_id: "puka-nacua".to_string(),
            name: "Puka Nacua".to_string(),
            team: "LAR".to_string(),
            ranks,
            average_rank: 4.0,
            sources: 1,
        }]);

        let json = serde_json::to_value(&response).unwrap();
        assert!(json["updatedAt"].is_string());
        let player = &json["consensus"][0];
        assert_eq!(player["playerId"], "puka-nacua");
        assert_eq!(player["averageRank"], 4.0);
        assert_eq!(player["ranks"]["cbs"], 4);
        assert_eq!(player["sources"], 1);
    }

    #[test]
    fn test_top_players_clamps_to_len() {
        let response = ConsensusResponse::new(Utc::now(), Vec::new());
        assert!(response.top_players(10).is_empty());
    }

    #[test]
    fn test_response_keeps_caller_timestamp() {
        let generated_at =
            DateTime::parse_from_rfc3339("2025-09-07T17:00:00Z").unwrap().with_timezone(&Utc);
        let response = ConsensusResponse::new(generated_at, Vec::new());

        assert_eq!(response.updated_at, generated_at);
        let json = serde_json::to_value(&response).unwrap();
        assert_eq!(json["updatedAt"], "2025-09-07T17:00:00Z");
    }
}
