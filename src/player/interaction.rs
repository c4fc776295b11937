use bevy::prelude::*;
use crate::shared::*;

/// Apply this frame's trigger overlaps. Entering an area makes it the
/// current interactable; leaving the current one clears it.
pub fn update_nearby(nearby: &mut NearbyInteractable, in_range: &[Entity]) {
    let exited: Vec<Entity> = nearby
        .inside
        .iter()
        .filter(|entity| !in_range.contains(*entity))
        .copied()
        .collect();
    for entity in exited {
        nearby.inside.remove(&entity);
        if nearby.current == Some(entity) {
            nearby.current = None;
        }
    }

    for &entity in in_range {
        if nearby.inside.insert(entity) {
            nearby.current = Some(entity);
        }
    }
}

/// The prompt an interactable opens.
pub fn prompt_for(entity: Entity, interactable: &Interactable) -> PromptRequest {
    let on_use = match interactable.action {
        InteractAction::WaterSeedlings => PromptAction::WaterSeedlings,
        InteractAction::Notify => PromptAction::Interact {
            entity,
            name: interactable.name.clone(),
        },
    };
    PromptRequest {
        message: interactable.prompt_message.clone(),
        on_use,
    }
}

pub fn track_nearby_interactables(
    player: Query<&Transform, With<Player>>,
    interactables: Query<(Entity, &Transform), (With<Interactable>, Without<Player>)>,
    mut nearby: ResMut<NearbyInteractable>,
) {
    let Ok(player_tf) = player.get_single() else {
        return;
    };
    let origin = player_tf.translation.truncate();
    let radius = INTERACT_RADIUS_TILES * TILE_SIZE;

    let in_range: Vec<Entity> = interactables
        .iter()
        .filter(|(_, tf)| tf.translation.truncate().distance(origin) <= radius)
        .map(|(entity, _)| entity)
        .collect();

    let before = nearby.current;
    update_nearby(&mut nearby, &in_range);
    if nearby.current != before {
        debug!("Interaction: current interactable now {:?}", nearby.current);
    }
}

/// The interact key opens the current interactable's prompt.
pub fn interact_with_nearby(
    input: Res<PlayerInput>,
    nearby: Res<NearbyInteractable>,
    interactables: Query<&Interactable>,
    mut prompts: EventWriter<PromptRequest>,
) {
    if !input.interact {
        return;
    }
    let Some(entity) = nearby.current else {
        return;
    };
    let Ok(interactable) = interactables.get(entity) else {
        return;
    };
    info!("Interaction: {} used.", interactable.name);
    prompts.send(prompt_for(entity, interactable));
}
