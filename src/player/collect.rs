use bevy::prelude::*;
use crate::shared::*;

/// Standing on a watered plant collects it.
pub fn collect_under_player(
    player: Query<&GridPosition, With<Player>>,
    mut field: ResMut<FarmField>,
    mut collected: EventWriter<PlantCollectedEvent>,
) {
    let Ok(grid_pos) = player.get_single() else {
        return;
    };
    let cell = (grid_pos.x, grid_pos.y);

    // Peek first so the field is only marked changed on a real pickup.
    let ready = field
        .plant_at(cell)
        .is_some_and(|crop| crop.stage == PlantStage::Watered);
    if !ready {
        return;
    }

    if let Some(crop) = field.collect_watered(cell) {
        debug!("Player: collected {:?} at {:?}.", crop.kind, cell);
        collected.send(PlantCollectedEvent {
            grid_x: cell.0,
            grid_y: cell.1,
            kind: crop.kind,
        });
    }
}
