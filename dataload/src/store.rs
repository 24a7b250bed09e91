use log::{debug, info};
use shared::{PlayerProfile, Result};
use std::collections::BTreeMap;
use std::fs::{self, File};
use std::io::{BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

/// Scraped profiles keyed by steam id, persisted as a single JSON object.
#[derive(Debug)]
pub struct PlayerStore {
    path: PathBuf,
    players: BTreeMap<String, PlayerProfile>,
}

impl PlayerStore {
    /// Loads the store at `path`, creating it as `{}` when it does not exist.
    pub fn read_or_create(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();

        let players = if path.exists() {
            let file = File::open(&path)?;
            serde_json::from_reader(BufReader::new(file))?
        } else {
            info!("Creating player store at {}", path.display());
            if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
                fs::create_dir_all(parent)?;
            }
            fs::write(&path, "{}")?;
            BTreeMap::new()
        };

        debug!("Player store {} holds {} players", path.display(), players.len());
        Ok(Self { path, players })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn len(&self) -> usize {
        self.players.len()
    }

    pub fn is_empty(&self) -> bool {
        self.players.is_empty()
    }

    pub fn contains(&self, steam_id: &str) -> bool {
        self.players.contains_key(steam_id)
    }

    pub fn get(&self, steam_id: &str) -> Option<&PlayerProfile> {
        self.players.get(steam_id)
    }

    pub fn insert(&mut self, steam_id: String, profile: PlayerProfile) {
        self.players.insert(steam_id, profile);
    }

    /// Ids from `ids` that have not been scraped yet, in the given order.
    pub fn pending_ids<'a, I>(&self, ids: I) -> Vec<String>
    where
        I: IntoIterator<Item = &'a String>,
    {
        ids.into_iter()
            .filter(|id| !self.contains(id))
            .cloned()
            .collect()
    }

    /// Writes the store next to its path and renames it into place, so an
    /// interrupted save leaves the previous file intact.
    pub fn save(&self) -> Result<()> {
        let tmp = self.path.with_extension("json.tmp");
        let mut writer = BufWriter::new(File::create(&tmp)?);
        serde_json::to_writer(&mut writer, &self.players)?;
        writer.flush()?;
        writer.get_ref().sync_all()?;
        drop(writer);
        fs::rename(&tmp, &self.path)?;
        debug!("Saved {} players to {}", self.len(), self.path.display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn temp_path(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!("dataload-store-{}-{}.json", name, std::process::id()))
    }

    fn profile(avatar: &str) -> PlayerProfile {
        PlayerProfile::from_json(&format!(r#"{{"avatar": "{}", "name": "n"}}"#, avatar)).unwrap()
    }

    #[test]
    fn test_read_or_create_writes_empty_object() {
        let path = temp_path("create");
        fs::remove_file(&path).ok();

        let store = PlayerStore::read_or_create(&path).unwrap();
        let written = fs::read_to_string(&path).unwrap();
        fs::remove_file(&path).ok();

        assert!(store.is_empty());
        assert_eq!(written, "{}");
    }

    #[test]
    fn test_save_and_reload() {
        let path = temp_path("reload");
        fs::remove_file(&path).ok();

        let mut store = PlayerStore::read_or_create(&path).unwrap();
        store.insert("1".to_string(), profile("https://example.com/1.png"));
        store.insert("2".to_string(), profile("https://example.com/2.png"));
        store.save().unwrap();

        let reloaded = PlayerStore::read_or_create(&path).unwrap();
        fs::remove_file(&path).ok();

        assert_eq!(reloaded.len(), 2);
        assert_eq!(
            reloaded.get("2").map(PlayerProfile::avatar_src),
            Some("https://example.com/2.png")
        );
        assert_eq!(reloaded.get("1").and_then(PlayerProfile::name), Some("n"));
    }

    #[test]
    fn test_save_replaces_existing_store() {
        let path = temp_path("replace");
        fs::write(&path, r#"{"old": {"avatar": "old.png"}, "stale": {}}"#).unwrap();

        let mut store = PlayerStore::read_or_create(&path).unwrap();
        store.insert("new".to_string(), profile("new.png"));
        store.save().unwrap();
        store.insert("newer".to_string(), profile("newer.png"));
        store.save().unwrap();

        let written: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
        let tmp_left = path.with_extension("json.tmp").exists();
        fs::remove_file(&path).ok();

        assert!(!tmp_left);
        assert_eq!(written.as_object().map(|players| players.len()), Some(4));
        assert_eq!(written["newer"]["avatar"], "newer.png");
    }

    #[test]
    fn test_pending_ids_skips_stored_players() {
        let path = temp_path("pending");
        fs::remove_file(&path).ok();

        let mut store = PlayerStore::read_or_create(&path).unwrap();
        fs::remove_file(&path).ok();
        store.insert("2".to_string(), profile("a"));

        let ids = vec!["1".to_string(), "2".to_string(), "3".to_string()];
        assert_eq!(store.pending_ids(&ids), vec!["1".to_string(), "3".to_string()]);
    }

    #[test]
    fn test_corrupt_store_is_parse_error() {
        let path = temp_path("corrupt");
        fs::write(&path, "{ not json").unwrap();

        let err = PlayerStore::read_or_create(&path).unwrap_err();
        fs::remove_file(&path).ok();

        assert!(matches!(err, shared::SharedError::Parse(_)));
    }
}
