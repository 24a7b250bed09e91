use crate::components::ProfileView;
use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub struct PlayerProfileProps {
    pub player_id: String,
}

#[function_component(PlayerProfilePage)]
pub fn player_profile_page(props: &PlayerProfileProps) -> Html {
    html! {
        <div class="player-profile-page">
            <ProfileView player_id={props.player_id.clone()} />
        </div>
    }
}
