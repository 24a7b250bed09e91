/// Base URL of the public RGL API.
pub const DEFAULT_API_BASE_URL: &str = "https://api.rgl.gg/v0";

/// URL template for the profile resource: `{base}/profile/{player_id}`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProfileEndpoint {
    base_url: String,
}

impl ProfileEndpoint {
    pub fn new(base_url: impl Into<String>) -> Self {
        let mut base_url = base_url.into();
        while base_url.ends_with('/') {
            base_url.pop();
        }
        Self { base_url }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// The identifier is interpolated verbatim, without percent-encoding.
    pub fn profile_url(&self, player_id: &str) -> String {
        format!("{}/profile/{}", self.base_url, player_id)
    }
}

impl Default for ProfileEndpoint {
    fn default() -> Self {
        Self::new(DEFAULT_API_BASE_URL)
    }
}
