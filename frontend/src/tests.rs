#[cfg(test)]
mod tests {
    use crate::api::profile_endpoint;
    use crate::config::Config;
    use crate::Route;
    use pretty_assertions::assert_eq;
    use yew_router::Routable;

    // Routing tests
    #[test]
    fn test_player_route_recognized() {
        assert_eq!(
            Route::recognize("/player/12345"),
            Some(Route::PlayerProfile {
                player_id: "12345".to_string()
            })
        );
    }

    #[test]
    fn test_player_route_path() {
        let route = Route::PlayerProfile {
            player_id: "76561198000000001".to_string(),
        };
        assert_eq!(route.to_path(), "/player/76561198000000001");
    }

    #[test]
    fn test_not_found_route_path() {
        assert_eq!(Route::NotFound.to_path(), "/404");
    }

    // Configuration tests
    #[test]
    fn test_api_base_url_is_absolute() {
        let base = Config::api_base_url();
        assert!(base.starts_with("http://") || base.starts_with("https://"));
        assert!(!base.trim().is_empty());
    }

    #[test]
    fn test_profile_endpoint_uses_configured_base() {
        let endpoint = profile_endpoint();
        assert_eq!(
            endpoint.profile_url("12345"),
            format!("{}/profile/12345", Config::api_base_url().trim_end_matches('/'))
        );
    }
}
