use serde::{Deserialize, Serialize};
use std::time::Duration;

/// CBS Sports PPR wide receiver rankings
pub const CBS_WR_RANKINGS_URL: &str =
    "https://www.cbssports.com/fantasy/football/rankings/ppr/WR/";

/// HTTP client settings shared by every source
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ScraperSettings {
    /// Request timeout in seconds
    pub timeout_secs: u64,

    /// User agent sent with every request
    pub user_agent: String,
}

impl Default for ScraperSettings {
    fn default() -> Self {
        Self {
            timeout_secs: 30,
            user_agent: "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/91.0.4472.124 Safari/537.36".to_string(),
        }
    }
}

impl ScraperSettings {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

/// Where a ranking source lives and how to read its table
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceConfig {
    /// Source identifier used as the key in each player's ranks (e.g., "cbs")
    pub id: String,

    /// Page holding the ranking table
    pub url: String,

    /// Disabled sources are skipped when fetching
    #[serde(default = "default_enabled")]
    pub enabled: bool,

    /// CSS selector matching one table row per player
    #[serde(default = "default_row_selector")]
    pub row_selector: String,

    /// Zero-based cell index holding the rank
    #[serde(default)]
    pub rank_column: usize,

    /// Zero-based cell index holding the player name
    #[serde(default = "default_name_column")]
    pub name_column: usize,

    /// Zero-based cell index whose text contains the team abbreviation
    #[serde(default = "default_team_column")]
    pub team_column: usize,
}

fn default_enabled() -> bool {
    true
}

fn default_row_selector() -> String {
    "table tbody tr".to_string()
}

fn default_name_column() -> usize {
    1
}

fn default_team_column() -> usize {
    2
}

impl SourceConfig {
    /// Source reading the default `rank | name | team` table layout
    pub fn new(id: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            url: url.into(),
            enabled: default_enabled(),
            row_selector: default_row_selector(),
            rank_column: 0,
            name_column: default_name_column(),
            team_column: default_team_column(),
        }
    }

    /// Same source, switched off
    pub fn disabled(mut self) -> Self {
        self.enabled = false;
        self
    }

    /// Minimum number of cells a row needs to be parsed
    pub fn min_cells(&self) -> usize {
        self.rank_column.max(self.name_column).max(self.team_column) + 1
    }
}

/// Built-in ranking sources
///
/// FantasyPros ("fp") and ESPN are placeholders with no page wired yet. Give
/// them a url and column layout in the config file to switch them on.
pub fn default_sources() -> Vec<SourceConfig> {
    vec![
        SourceConfig::new("cbs", CBS_WR_RANKINGS_URL),
        SourceConfig::new("fp", "").disabled(),
        SourceConfig::new("espn", "").disabled(),
    ]
}
