mod config;
mod models;
mod scraper;
mod store;

use anyhow::{Context, Result};
use log::info;
use shared::ProfileEndpoint;

use crate::config::LoaderConfig;
use crate::models::{collect_player_ids, read_rosters};
use crate::scraper::{HttpFetcher, ProfileScraper};
use crate::store::PlayerStore;

#[tokio::main]
async fn main() -> Result<()> {
    // Load environment variables
    dotenv::dotenv().ok();

    // Initialize logging
    env_logger::init();
    info!("Starting player profile loader");

    let config = LoaderConfig::from_env();

    let rosters = read_rosters(&config.roster_file)?;
    let player_ids = collect_player_ids(&rosters);
    info!(
        "Found {} players across {} rosters",
        player_ids.len(),
        rosters.len()
    );

    let mut store = PlayerStore::read_or_create(&config.player_file)
        .context(format!("Failed to open {}", config.player_file.display()))?;

    let pending = store.pending_ids(&player_ids);
    if pending.is_empty() {
        info!("No new players to scrape");
        return Ok(());
    }
    let requested = pending.len();

    let fetcher = HttpFetcher::new(ProfileEndpoint::new(config.api_base_url.clone()))?;
    let scraper = ProfileScraper::new(fetcher, config.scrape.clone());
    let summary = scraper
        .scrape(pending, &mut store, player_ids.len())
        .await?;

    info!(
        "Added {} of {} new players to {} ({} dropped, {} batches, {} checkpoints)",
        summary.fetched,
        requested,
        store.path().display(),
        summary.dropped,
        summary.batches,
        summary.checkpoints
    );

    Ok(())
}
