use shared::DEFAULT_API_BASE_URL;

pub struct Config;

impl Config {
    pub fn api_base_url() -> String {
        // PROFILE_API_BASE_URL is read at build time (e.g. `PROFILE_API_BASE_URL=... trunk build`)
        // so a staging or mock API can be targeted without touching the code.
        option_env!("PROFILE_API_BASE_URL")
            .filter(|url| !url.trim().is_empty())
            .unwrap_or(DEFAULT_API_BASE_URL)
            .to_string()
    }
}
