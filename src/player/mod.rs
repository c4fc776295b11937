//! Player domain — the farmer: spawning, walking, trigger areas, and
//! picking up watered plants underfoot.

mod collect;
pub mod interaction;
pub mod movement;
mod spawn;

use bevy::prelude::*;
use crate::shared::*;

pub use collect::collect_under_player;
pub use interaction::{interact_with_nearby, track_nearby_interactables};
pub use movement::player_movement;
pub use spawn::spawn_player;

pub struct PlayerPlugin;

impl Plugin for PlayerPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<NearbyInteractable>();

        // -- Spawn player when we enter Playing --
        app.add_systems(OnEnter(GameState::Playing), spawn::spawn_player);

        // -- Systems that run every frame while Playing --
        app.add_systems(
            Update,
            (
                movement::player_movement,
                interaction::track_nearby_interactables,
                interaction::interact_with_nearby,
                collect::collect_under_player,
            )
                .chain()
                .run_if(in_state(GameState::Playing)),
        );
    }
}
