use anyhow::{Context, Result};
use chrono::Utc;
use rank_consensus::{build_consensus, ConsensusResponse};
use ranking_scraper::{build_sources, default_sources, fetch_all, ScraperSettings};
use std::fs;
use tracing::info;

const OUTPUT_DIR: &str = "data/rankings";
const OUTPUT_PATH: &str = "data/rankings/wr_consensus.json";

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::fmt::init();

    info!("Starting WR consensus scraper...");

    let sources = build_sources(&ScraperSettings::default(), &default_sources())?;
    let records = fetch_all(&sources).await.context("Failed to fetch rankings")?;

    let response = ConsensusResponse::new(Utc::now(), build_consensus(&records));

    // Create data directory if it doesn't exist
    fs::create_dir_all(OUTPUT_DIR)?;

    let json_content = serde_json::to_string_pretty(&response)?;
    fs::write(OUTPUT_PATH, json_content)?;

    info!("Saved {} consensus players to {}", response.consensus.len(), OUTPUT_PATH);

    // Print top 10 players
    println!("\nTop 10 Consensus Wide Receivers:");
    println!("{:<4} {:<24} {:<4} {:<8} {:<7}", "Rank", "Name", "Team", "Avg", "Sources");
    println!("{}", "-".repeat(52));

    for (index, player) in response.top_players(10).iter().enumerate() {
        println!(
            "{:<4} {:<24} {:<4} {:<8.2} {:<7}",
            index + 1,
            player.name,
            player.team,
            player.average_rank,
            player.sources
        );
    }

    println!("\nSummary:");
    println!("- Sources scraped: {}", sources.len());
    println!("- Ranking rows: {}", records.len());
    println!("- Consensus players: {}", response.consensus.len());

    Ok(())
}
