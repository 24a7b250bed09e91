pub mod profiles;

use crate::config::Config;
use shared::ProfileEndpoint;

pub fn profile_endpoint() -> ProfileEndpoint {
    ProfileEndpoint::new(Config::api_base_url())
}
