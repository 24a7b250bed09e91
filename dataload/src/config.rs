use std::env;
use std::path::PathBuf;
use std::time::Duration;

use log::info;
use shared::DEFAULT_API_BASE_URL;

use crate::scraper::ScrapeSettings;

#[derive(Debug, Clone, PartialEq)]
pub struct LoaderConfig {
    pub roster_file: PathBuf,
    pub player_file: PathBuf,
    pub api_base_url: String,
    pub scrape: ScrapeSettings,
}

impl LoaderConfig {
    /// Reads the loader settings from the process environment.
    pub fn from_env() -> Self {
        Self::from_vars(|key| env::var(key).ok())
    }

    pub fn from_vars<F>(var: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = ScrapeSettings::default();

        let batch_size = var("SCRAPE_BATCH_SIZE")
            .and_then(|v| v.parse().ok())
            .filter(|size| *size > 0)
            .unwrap_or(defaults.batch_size);
        let delay_step = var("SCRAPE_DELAY_MS")
            .and_then(|v| v.parse().ok())
            .map(Duration::from_millis)
            .unwrap_or(defaults.delay_step);

        let config = Self {
            roster_file: var("ROSTER_FILE")
                .unwrap_or_else(|| "data/rgl_roster_data.json".to_string())
                .into(),
            player_file: var("PLAYER_FILE")
                .unwrap_or_else(|| "data/rgl_player_data.json".to_string())
                .into(),
            api_base_url: var("PROFILE_API_BASE_URL")
                .unwrap_or_else(|| DEFAULT_API_BASE_URL.to_string()),
            scrape: ScrapeSettings {
                batch_size,
                delay_step,
                ..defaults
            },
        };

        info!(
            "Loader config: rosters={}, players={}, api={}, batch_size={}, delay={:?}",
            config.roster_file.display(),
            config.player_file.display(),
            config.api_base_url,
            config.scrape.batch_size,
            config.scrape.delay_step
        );
        config
    }
}
