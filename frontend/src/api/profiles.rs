use std::rc::Rc;

use gloo_net::http::Request;
use log::debug;
use shared::{PlayerProfile, ProfileEndpoint, ProfileSource, SharedError};

use crate::api::profile_endpoint;

/// Fetches profiles from the RGL API with a plain, unauthenticated GET.
#[derive(Debug, Clone, PartialEq)]
pub struct HttpProfileSource {
    endpoint: ProfileEndpoint,
}

impl HttpProfileSource {
    pub fn new(endpoint: ProfileEndpoint) -> Self {
        Self { endpoint }
    }
}

impl Default for HttpProfileSource {
    fn default() -> Self {
        Self::new(profile_endpoint())
    }
}

/// Turns a response into a profile. The status is only logged: any body
/// that parses as JSON is a profile, whatever the status.
pub fn parse_profile_response(status: u16, body: &str) -> Result<PlayerProfile, SharedError> {
    debug!("Profile response: HTTP {}", status);
    PlayerProfile::from_json(body)
}

#[async_trait::async_trait(?Send)]
impl ProfileSource for HttpProfileSource {
    async fn fetch_profile(&self, player_id: &str) -> Result<PlayerProfile, SharedError> {
        let url = self.endpoint.profile_url(player_id);
        debug!("GET {}", url);

        let response = Request::get(&url)
            .send()
            .await
            .map_err(|e| SharedError::Network(format!("Failed to fetch profile: {}", e)))?;

        let body = response
            .text()
            .await
            .map_err(|e| SharedError::Network(format!("Failed to read profile body: {}", e)))?;

        parse_profile_response(response.status(), &body)
    }
}

/// Profile source used by `ProfileView`, provided through a Yew context.
/// Without a provider the view talks to the configured API.
#[derive(Clone)]
pub struct ProfileSourceHandle(pub Rc<dyn ProfileSource>);

impl ProfileSourceHandle {
    pub fn new(source: impl ProfileSource + 'static) -> Self {
        Self(Rc::new(source))
    }
}

impl Default for ProfileSourceHandle {
    fn default() -> Self {
        Self::new(HttpProfileSource::default())
    }
}

impl PartialEq for ProfileSourceHandle {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_status_is_not_checked() {
        for status in [200, 404, 500] {
            let profile =
                parse_profile_response(status, r#"{"avatar": "https://example.com/a.png"}"#)
                    .unwrap();
            assert_eq!(profile.avatar_src(), "https://example.com/a.png");
        }
    }

    #[test]
    fn test_json_error_body_loads_without_avatar() {
        let profile =
            parse_profile_response(404, r#"{"statusCode": 404, "message": "Not Found"}"#).unwrap();
        assert_eq!(profile.avatar_src(), "");
    }

    #[test]
    fn test_non_json_body_is_parse_error() {
        let err = parse_profile_response(502, "<html>Bad Gateway</html>").unwrap_err();
        assert!(matches!(err, SharedError::Parse(_)));
    }

    #[test]
    fn test_handles_compare_by_identity() {
        let handle = ProfileSourceHandle::new(HttpProfileSource::default());
        assert!(handle == handle.clone());
        assert!(handle != ProfileSourceHandle::new(HttpProfileSource::default()));
    }
}
