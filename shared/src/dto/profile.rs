use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

/// Player profile as returned by `GET {base}/profile/{player_id}`.
///
/// Any JSON value is accepted and kept exactly as received, so a profile
/// read from the API can be written back out without losing data. Only
/// `avatar` is interpreted, and only when it is a string; any other shape
/// counts as no avatar.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PlayerProfile {
    raw: Value,
}

impl PlayerProfile {
    pub fn new(raw: Value) -> Self {
        Self { raw }
    }

    /// A profile object carrying only an avatar URL.
    pub fn with_avatar(url: impl Into<String>) -> Self {
        Self::new(json!({ "avatar": url.into() }))
    }

    /// Parses a raw response body. Fails only when the body is not JSON.
    pub fn from_json(body: &str) -> crate::Result<Self> {
        Ok(serde_json::from_str(body)?)
    }

    pub fn raw(&self) -> &Value {
        &self.raw
    }

    /// URL of the player's avatar image
    pub fn avatar(&self) -> Option<&str> {
        self.raw.get("avatar").and_then(Value::as_str)
    }

    /// Avatar URL, or an empty string when the API did not send one.
    pub fn avatar_src(&self) -> &str {
        self.avatar().unwrap_or_default()
    }

    /// The `steamId` field, accepting either a JSON string or number.
    pub fn steam_id(&self) -> Option<String> {
        match self.raw.get("steamId")? {
            Value::String(s) => Some(s.clone()),
            Value::Number(n) => Some(n.to_string()),
            _ => None,
        }
    }

    pub fn name(&self) -> Option<&str> {
        self.raw.get("name").and_then(Value::as_str)
    }
}
