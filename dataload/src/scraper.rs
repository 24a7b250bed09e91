use anyhow::{Context, Result};
use async_trait::async_trait;
use futures::future::join_all;
use log::{debug, info, warn};
use reqwest::{Client, StatusCode};
use shared::{PlayerProfile, ProfileEndpoint};
use std::collections::VecDeque;
use std::time::Duration;

use crate::store::PlayerStore;

#[derive(Debug, Clone, PartialEq)]
pub struct ScrapeSettings {
    /// Requests in flight per batch
    pub batch_size: usize,
    /// Extra delay added for each group of `delay_size` requests in a batch
    pub delay_step: Duration,
    pub delay_size: usize,
    /// Drop ids that answer HTTP 500 instead of requeueing them
    pub ignore_server_errors: bool,
    pub max_attempts: u32,
    /// Save the store every this many batches
    pub checkpoint_every: usize,
}

impl Default for ScrapeSettings {
    fn default() -> Self {
        Self {
            batch_size: 9,
            delay_step: Duration::from_millis(200),
            delay_size: 1,
            ignore_server_errors: true,
            max_attempts: 3,
            checkpoint_every: 10,
        }
    }
}

/// Start delay for each request of a batch: request `i` waits
/// `step * (i / size)`, which keeps the API's rate limiter happy.
pub fn delay_profile(len: usize, step: Duration, size: usize) -> Vec<Duration> {
    let size = size.max(1);
    (0..len).map(|i| step * (i / size) as u32).collect()
}

#[derive(Debug)]
pub enum FetchOutcome {
    Loaded(PlayerProfile),
    ServerError,
    /// Any other status, a transport failure, or an unparseable body.
    Rejected(String),
}

#[derive(Debug, Clone, PartialEq)]
pub struct PendingId {
    pub id: String,
    pub attempts: u32,
}

/// Ids still to be fetched. Failed ids go to the back of the queue until
/// they run out of attempts.
#[derive(Debug)]
pub struct ScrapeQueue {
    pending: VecDeque<PendingId>,
    max_attempts: u32,
    ignore_server_errors: bool,
    dropped: usize,
}

impl ScrapeQueue {
    pub fn new(ids: Vec<String>, settings: &ScrapeSettings) -> Self {
        Self {
            pending: ids
                .into_iter()
                .map(|id| PendingId { id, attempts: 0 })
                .collect(),
            max_attempts: settings.max_attempts.max(1),
            ignore_server_errors: settings.ignore_server_errors,
            dropped: 0,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn dropped(&self) -> usize {
        self.dropped
    }

    pub fn next_batch(&mut self, size: usize) -> Vec<PendingId> {
        let size = size.max(1).min(self.pending.len());
        self.pending.drain(..size).collect()
    }

    /// Records the outcome for one id. Returns the profile and the key to
    /// store it under when the fetch succeeded.
    pub fn settle(
        &mut self,
        mut item: PendingId,
        outcome: FetchOutcome,
    ) -> Option<(String, PlayerProfile)> {
        let reason = match outcome {
            FetchOutcome::Loaded(profile) => {
                let key = profile.steam_id().unwrap_or(item.id);
                return Some((key, profile));
            }
            FetchOutcome::ServerError if self.ignore_server_errors => {
                warn!("Server error for player {}, skipping", item.id);
                self.dropped += 1;
                return None;
            }
            FetchOutcome::ServerError => "HTTP 500".to_string(),
            FetchOutcome::Rejected(reason) => reason,
        };

        item.attempts += 1;
        if item.attempts >= self.max_attempts {
            warn!(
                "Giving up on player {} after {} attempts: {}",
                item.id, item.attempts, reason
            );
            self.dropped += 1;
        } else {
            debug!("Requeueing player {} ({}): {}", item.id, item.attempts, reason);
            self.pending.push_back(item);
        }
        None
    }
}

#[derive(Debug, Default, Clone, PartialEq)]
pub struct ScrapeSummary {
    pub fetched: usize,
    pub dropped: usize,
    pub batches: usize,
    /// Saves made while scraping, not counting the final one
    pub checkpoints: usize,
}

/// Maps a profile response to an outcome. Only HTTP 200 with a JSON body
/// loads; 500 is reported separately so it can be skipped.
pub fn classify_response(status: StatusCode, body: &str) -> FetchOutcome {
    match status {
        StatusCode::OK => match PlayerProfile::from_json(body) {
            Ok(profile) => FetchOutcome::Loaded(profile),
            Err(e) => FetchOutcome::Rejected(format!("invalid body: {}", e)),
        },
        StatusCode::INTERNAL_SERVER_ERROR => FetchOutcome::ServerError,
        status => FetchOutcome::Rejected(format!("HTTP {}", status)),
    }
}

/// One profile request, without retries or delays.
#[async_trait]
pub trait ProfileFetcher {
    async fn fetch(&self, player_id: &str) -> FetchOutcome;
}

pub struct HttpFetcher {
    client: Client,
    endpoint: ProfileEndpoint,
}

impl HttpFetcher {
    pub fn new(endpoint: ProfileEndpoint) -> Result<Self> {
        let client = Client::builder()
            .build()
            .context("Failed to build HTTP client")?;
        Ok(Self { client, endpoint })
    }
}

#[async_trait]
impl ProfileFetcher for HttpFetcher {
    async fn fetch(&self, player_id: &str) -> FetchOutcome {
        let url = self.endpoint.profile_url(player_id);
        let response = match self.client.get(&url).send().await {
            Ok(response) => response,
            Err(e) => return FetchOutcome::Rejected(format!("request failed: {}", e)),
        };

        let status = response.status();
        match response.text().await {
            Ok(body) => classify_response(status, &body),
            Err(e) => FetchOutcome::Rejected(format!("failed to read body: {}", e)),
        }
    }
}

pub struct ProfileScraper<F> {
    fetcher: F,
    settings: ScrapeSettings,
}

impl<F: ProfileFetcher> ProfileScraper<F> {
    pub fn new(fetcher: F, settings: ScrapeSettings) -> Self {
        Self { fetcher, settings }
    }

    async fn fetch_after(&self, player_id: &str, delay: Duration) -> FetchOutcome {
        tokio::time::sleep(delay).await;
        self.fetcher.fetch(player_id).await
    }

    /// Fetches every id in `ids` into `store`, checkpointing after the
    /// first batch and every `checkpoint_every` batches after that.
    /// `total_players` is only used for progress reporting.
    pub async fn scrape(
        &self,
        ids: Vec<String>,
        store: &mut PlayerStore,
        total_players: usize,
    ) -> Result<ScrapeSummary> {
        let mut queue = ScrapeQueue::new(ids, &self.settings);
        let mut summary = ScrapeSummary::default();

        info!("Scraping {} players", queue.len());

        while !queue.is_empty() {
            let batch = queue.next_batch(self.settings.batch_size);
            let delays =
                delay_profile(batch.len(), self.settings.delay_step, self.settings.delay_size);

            let outcomes = join_all(
                batch
                    .iter()
                    .zip(delays)
                    .map(|(item, delay)| self.fetch_after(&item.id, delay)),
            )
            .await;

            for (item, outcome) in batch.into_iter().zip(outcomes) {
                if let Some((steam_id, profile)) = queue.settle(item, outcome) {
                    store.insert(steam_id, profile);
                    summary.fetched += 1;
                }
            }

            info!(
                "Scraping players {:.2}%",
                store.len() as f64 * 100.0 / total_players.max(1) as f64
            );

            if summary.batches % self.settings.checkpoint_every.max(1) == 0 {
                store
                    .save()
                    .context(format!("Failed to checkpoint {}", store.path().display()))?;
                summary.checkpoints += 1;
            }
            summary.batches += 1;
        }

        store
            .save()
            .context(format!("Failed to save {}", store.path().display()))?;

        summary.dropped = queue.dropped();
        Ok(summary)
    }
}
