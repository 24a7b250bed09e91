use anyhow::{Context, Result};
use serde::{Deserialize, Deserializer};
use std::collections::{BTreeSet, HashMap};
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

/// Roster data keyed by roster id, as produced by the team scrape.
pub type RosterFile = HashMap<String, Roster>;

#[derive(Debug, Deserialize, Clone)]
pub struct Roster {
    #[serde(default)]
    pub players: Vec<RosterPlayer>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct RosterPlayer {
    #[serde(rename = "steamId", deserialize_with = "deserialize_steam_id")]
    pub steam_id: String,
}

fn deserialize_steam_id<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum SteamId {
        Text(String),
        Number(u64),
    }

    Ok(match SteamId::deserialize(deserializer)? {
        SteamId::Text(id) => id,
        SteamId::Number(id) => id.to_string(),
    })
}

pub fn read_rosters(path: &Path) -> Result<RosterFile> {
    let file = File::open(path).context(format!("Failed to open {}", path.display()))?;
    serde_json::from_reader(BufReader::new(file))
        .context(format!("Failed to parse roster data in {}", path.display()))
}

/// Every distinct player id across all rosters, in sorted order.
pub fn collect_player_ids(rosters: &RosterFile) -> BTreeSet<String> {
    rosters
        .values()
        .flat_map(|roster| roster.players.iter())
        .map(|player| player.steam_id.clone())
        .collect()
}
