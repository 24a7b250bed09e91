use crate::api::profiles::ProfileSourceHandle;
use shared::{load_on_mount, MountGuard, ViewState};
use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub struct ProfileViewProps {
    pub player_id: String,
}

/// Fetches the player's profile once on mount and shows their avatar.
///
/// The profile comes from the `ProfileSourceHandle` context when one is
/// provided, otherwise from the configured API. A failed request is logged
/// and leaves the loading text on screen.
#[function_component(ProfileView)]
pub fn profile_view(props: &ProfileViewProps) -> Html {
    let state = use_state(ViewState::default);
    let source = use_context::<ProfileSourceHandle>().unwrap_or_default();

    {
        let state = state.clone();
        let player_id = props.player_id.clone();
        use_effect_with((), move |_| {
            let guard = MountGuard::new();
            let pending = guard.clone();
            wasm_bindgen_futures::spawn_local(async move {
                load_on_mount(source.0.as_ref(), &player_id, &pending, |next| state.set(next))
                    .await;
            });
            move || guard.release()
        });
    }

    html! {
        <ProfileBody state={(*state).clone()} />
    }
}

#[derive(Properties, PartialEq)]
pub struct ProfileBodyProps {
    pub state: ViewState,
}

#[function_component(ProfileBody)]
pub fn profile_body(props: &ProfileBodyProps) -> Html {
    match &props.state {
        ViewState::Loading => html! {
            <h1>{"Loading..."}</h1>
        },
        ViewState::Loaded(profile) => html! {
            <img src={profile.avatar_src().to_string()} />
        },
    }
}
