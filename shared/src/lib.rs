pub mod dto {
    pub mod profile;
}

pub mod endpoint;
pub mod error;
pub mod loader;
pub mod view_state;

// Re-export commonly used items
pub use error::{SharedError, Result};

pub use dto::profile::PlayerProfile;
pub use endpoint::{ProfileEndpoint, DEFAULT_API_BASE_URL};
pub use loader::{load_on_mount, MountGuard, ProfileSource};
pub use view_state::ViewState;
