use bevy::prelude::*;
use crate::shared::*;

const PLAYER_Z: f32 = 10.0;

/// Spawn the player at the layout's start cell.
/// Runs on every `OnEnter(GameState::Playing)`; the previous session's
/// player was despawned with the other session entities.
pub fn spawn_player(
    mut commands: Commands,
    config: Res<GameConfig>,
    layout: Res<FarmLayout>,
    mut nearby: ResMut<NearbyInteractable>,
) {
    let (gx, gy) = layout.player_spawn;
    let pos = grid_to_world(gx, gy);
    *nearby = NearbyInteractable::default();

    commands.spawn((
        Player,
        PlayerMovement {
            speed: config.move_speed_tiles * TILE_SIZE,
            is_idle: true,
            facing_left: false,
        },
        GridPosition { x: gx, y: gy },
        // Placeholder sprite: a straw-hat yellow square
        Sprite {
            color: Color::srgb(0.95, 0.8, 0.35),
            custom_size: Some(Vec2::new(TILE_SIZE * 0.8, TILE_SIZE)),
            ..default()
        },
        Transform::from_translation(pos.extend(PLAYER_Z)),
        Visibility::default(),
        SessionEntity,
    ));
    debug!("Player: spawned at ({}, {}).", gx, gy);
}
