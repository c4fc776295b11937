//! Keeps farm sprites in step with FarmField.

use bevy::prelude::*;
use std::collections::HashMap;
use crate::shared::*;

const FARMLAND_COLOR: Color = Color::srgb(0.45, 0.32, 0.20);
const FARMLAND_Z: f32 = 1.0;
const PLANT_Z: f32 = 2.0;

/// Sprite entities spawned for the field, keyed by grid cell.
#[derive(Resource, Default, Debug)]
pub struct FarmSprites {
    pub farmland: HashMap<(i32, i32), Entity>,
    pub plants: HashMap<(i32, i32), (Entity, PlantedCrop)>,
}

impl FarmSprites {
    pub fn clear(&mut self) {
        self.farmland.clear();
        self.plants.clear();
    }
}

/// Placeholder look for a plant: a small pale sprout, or a full-size
/// plant in the seed's colour once watered.
fn plant_sprite(crop: &PlantedCrop, catalogue: &SeedCatalogue) -> Sprite {
    let (r, g, b) = catalogue
        .get(crop.kind)
        .map(|def| def.color)
        .unwrap_or((0.3, 0.7, 0.3));
    let (color, size) = match crop.stage {
        PlantStage::Seedling => (
            Color::srgb(0.5 + r * 0.3, 0.75, 0.3 + b * 0.2),
            TILE_SIZE * 0.45,
        ),
        PlantStage::Watered => (Color::srgb(r, g, b), TILE_SIZE * 0.8),
    };
    Sprite {
        color,
        custom_size: Some(Vec2::splat(size)),
        ..default()
    }
}

pub fn sync_farmland_sprites(
    mut commands: Commands,
    field: Res<FarmField>,
    mut sprites: ResMut<FarmSprites>,
) {
    if !field.is_changed() {
        return;
    }
    for &cell in &field.farmland {
        if sprites.farmland.contains_key(&cell) {
            continue;
        }
        let pos = grid_to_world(cell.0, cell.1);
        let entity = commands
            .spawn((
                Sprite {
                    color: FARMLAND_COLOR,
                    custom_size: Some(Vec2::splat(TILE_SIZE)),
                    ..default()
                },
                Transform::from_xyz(pos.x, pos.y, FARMLAND_Z),
                SessionEntity,
            ))
            .id();
        sprites.farmland.insert(cell, entity);
    }
}

/// Spawn sprites for new plants, restyle changed ones and despawn the
/// sprites of collected plants.
pub fn sync_plant_sprites(
    mut commands: Commands,
    field: Res<FarmField>,
    catalogue: Res<SeedCatalogue>,
    mut sprites: ResMut<FarmSprites>,
) {
    if !field.is_changed() {
        return;
    }

    let stale: Vec<(i32, i32)> = sprites
        .plants
        .keys()
        .filter(|cell| !field.plants.contains_key(cell))
        .copied()
        .collect();
    for cell in stale {
        if let Some((entity, _)) = sprites.plants.remove(&cell) {
            commands.entity(entity).despawn();
        }
    }

    for (&cell, crop) in &field.plants {
        match sprites.plants.get_mut(&cell) {
            Some((entity, shown)) if shown != crop => {
                commands.entity(*entity).insert(plant_sprite(crop, &catalogue));
                *shown = *crop;
            }
            Some(_) => {}
            None => {
                let pos = grid_to_world(cell.0, cell.1);
                let entity = commands
                    .spawn((
                        plant_sprite(crop, &catalogue),
                        Transform::from_xyz(pos.x, pos.y, PLANT_Z),
                        SessionEntity,
                    ))
                    .id();
                sprites.plants.insert(cell, (entity, *crop));
            }
        }
    }
}
