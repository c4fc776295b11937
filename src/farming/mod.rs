//! Farming domain — seed inventory, planting on farmland, watering seedlings.
//!
//! Communicates with other domains exclusively through crate::shared events/resources.

pub mod field;
pub mod inventory;
mod render;

use bevy::prelude::*;
use crate::shared::*;

pub use render::FarmSprites;

pub struct FarmingPlugin;

impl Plugin for FarmingPlugin {
    fn build(&self, app: &mut App) {
        app
            .init_resource::<FarmField>()
            .init_resource::<SeedInventory>()
            .init_resource::<FarmSprites>()
            .add_systems(OnEnter(GameState::Playing), reset_field)
            .add_systems(
                Update,
                (
                    apply_session_inventory,
                    plant_from_input,
                    handle_water_seedlings,
                )
                    .run_if(in_state(GameState::Playing)),
            )
            // Visual sync runs after all state mutations.
            .add_systems(
                PostUpdate,
                (render::sync_farmland_sprites, render::sync_plant_sprites)
                    .run_if(in_state(GameState::Playing)),
            );
    }
}

/// Clear last session's plants and re-till the layout's plots.
pub fn reset_field(
    layout: Res<FarmLayout>,
    mut field: ResMut<FarmField>,
    mut sprites: ResMut<FarmSprites>,
) {
    *field = FarmField::from_layout(&layout);
    sprites.clear();
    debug!("Planting: {} farmland cells ready.", field.farmland.len());
}

/// Hand out seeds once the session knows its quota: the weather target
/// split over the three slots, or the configured starting seeds.
pub fn apply_session_inventory(
    mut events: EventReader<SessionStartedEvent>,
    config: Res<GameConfig>,
    mut inventory: ResMut<SeedInventory>,
) {
    for event in events.read() {
        *inventory = match event.params {
            Some(params) => SeedInventory::from_target(params.target_plant_count),
            None => SeedInventory {
                counts: config.starting_seeds,
            },
        };
        info!(
            "Planting: Inventory set to [1:{}] [2:{}] [3:{}] ({} seeds).",
            inventory.counts[0],
            inventory.counts[1],
            inventory.counts[2],
            inventory.total()
        );
    }
}

/// Hotkeys 1/2/3 plant that slot's seed in the cell under the player.
pub fn plant_from_input(
    input: Res<PlayerInput>,
    catalogue: Res<SeedCatalogue>,
    player: Query<&GridPosition, With<Player>>,
    mut field: ResMut<FarmField>,
    mut inventory: ResMut<SeedInventory>,
    mut toasts: EventWriter<ToastEvent>,
) {
    let Some(kind) = input.plant_slot else {
        return;
    };
    let Ok(grid_pos) = player.get_single() else {
        return;
    };
    let cell = (grid_pos.x, grid_pos.y);

    match field::try_plant(&mut field, &mut inventory, &catalogue, cell, kind) {
        Ok(()) => {
            debug!(
                "Planting: Planted {:?} at {:?}; inventory [1:{}] [2:{}] [3:{}].",
                kind, cell, inventory.counts[0], inventory.counts[1], inventory.counts[2]
            );
        }
        Err(blocked) => {
            debug!("Planting: {} at {:?}; planting blocked.", blocked, cell);
            if let field::PlantBlocked::NoSeeds(_) = blocked {
                let name = catalogue
                    .get(kind)
                    .map(|def| def.name.clone())
                    .unwrap_or_else(|| format!("{:?}", kind));
                toasts.send(ToastEvent {
                    message: format!("Out of {} seeds", name),
                    duration_secs: 1.5,
                });
            }
        }
    }
}

pub fn handle_water_seedlings(
    mut events: EventReader<WaterSeedlingsEvent>,
    catalogue: Res<SeedCatalogue>,
    mut field: ResMut<FarmField>,
    mut toasts: EventWriter<ToastEvent>,
) {
    for _event in events.read() {
        let upgraded = field.upgrade_seedlings(&catalogue);
        let message = if upgraded > 0 {
            info!("Planting: Watered {} seedlings.", upgraded);
            format!("Watered {} seedlings", upgraded)
        } else {
            info!("Planting: No seedlings to water.");
            "Nothing planted to water".to_string()
        };
        toasts.send(ToastEvent {
            message,
            duration_secs: 2.0,
        });
    }
}
