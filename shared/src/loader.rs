use std::cell::Cell;
use std::rc::Rc;

use log::{debug, warn};

use crate::dto::profile::PlayerProfile;
use crate::view_state::ViewState;
use crate::Result;

/// Something that can fetch a player profile by identifier.
///
/// `?Send` because the browser implementation holds JS handles.
#[async_trait::async_trait(?Send)]
pub trait ProfileSource {
    /// Issues exactly one request. Implementations must not retry and must
    /// not inspect the HTTP status: any body that parses is a profile.
    async fn fetch_profile(&self, player_id: &str) -> Result<PlayerProfile>;
}

/// Liveness flag shared between a mounted view and its pending load.
///
/// The view keeps one clone and releases it on teardown; the load checks
/// its clone before touching view state.
#[derive(Debug, Clone)]
pub struct MountGuard {
    alive: Rc<Cell<bool>>,
}

impl MountGuard {
    pub fn new() -> Self {
        Self {
            alive: Rc::new(Cell::new(true)),
        }
    }

    pub fn is_alive(&self) -> bool {
        self.alive.get()
    }

    pub fn release(&self) {
        self.alive.set(false);
    }
}

impl Default for MountGuard {
    fn default() -> Self {
        Self::new()
    }
}

/// Body of the view's mount effect.
///
/// Fetches the profile once and hands `ViewState::Loaded` to `on_loaded`.
/// Returns whether `on_loaded` was called. It is skipped when the fetch
/// fails (the view stays `Loading`) and when the guard was released while
/// the request was in flight.
pub async fn load_on_mount<S, F>(
    source: &S,
    player_id: &str,
    guard: &MountGuard,
    on_loaded: F,
) -> bool
where
    S: ProfileSource + ?Sized,
    F: FnOnce(ViewState),
{
    debug!("Loading profile for player {}", player_id);

    let profile = match source.fetch_profile(player_id).await {
        Ok(profile) => profile,
        Err(e) => {
            warn!("Failed to load profile for player {}: {}", player_id, e);
            return false;
        }
    };

    if !guard.is_alive() {
        debug!(
            "Profile view for player {} was unmounted, discarding response",
            player_id
        );
        return false;
    }

    if profile.avatar().is_none() {
        warn!("Profile for player {} has no avatar", player_id);
    }
    on_loaded(ViewState::Loading.resolve(Ok(profile)));
    true
}
