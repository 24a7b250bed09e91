use crate::dto::profile::PlayerProfile;

/// What the profile view shows.
///
/// Every mount starts in `Loading`. The only transition is to `Loaded`,
/// taken once when the profile request resolves; there is no way back.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum ViewState {
    #[default]
    Loading,
    Loaded(PlayerProfile),
}

impl ViewState {
    pub fn is_loading(&self) -> bool {
        matches!(self, ViewState::Loading)
    }

    pub fn profile(&self) -> Option<&PlayerProfile> {
        match self {
            ViewState::Loading => None,
            ViewState::Loaded(profile) => Some(profile),
        }
    }

    /// Applies a fetch result. Failures leave the state untouched, as does
    /// a second result once loaded.
    pub fn resolve(self, result: crate::Result<PlayerProfile>) -> Self {
        match (self, result) {
            (ViewState::Loading, Ok(profile)) => ViewState::Loaded(profile),
            (state, _) => state,
        }
    }
}
