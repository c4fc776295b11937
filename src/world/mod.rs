//! World domain plugin for Heatwave Harvest.
//!
//! Responsible for:
//! - The farm ground and its fixed props (well, notice board)
//! - Framing the camera on the farm
//! - Clearing everything a session spawned when it ends

use bevy::prelude::*;

use crate::shared::*;

const GROUND_Z: f32 = 0.0;
const PROP_Z: f32 = 5.0;

pub const WELL_NAME: &str = "Water 1";
pub const NOTICE_BOARD_NAME: &str = "Notice Board";

// ═══════════════════════════════════════════════════════════════════════
// PLUGIN
// ═══════════════════════════════════════════════════════════════════════

pub struct WorldPlugin;

impl Plugin for WorldPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<FarmLayout>()
            .add_systems(OnEnter(GameState::Playing), (spawn_farm, center_camera))
            .add_systems(
                Update,
                read_notice_board.run_if(in_state(GameState::Playing)),
            )
            .add_systems(OnExit(GameState::Playing), despawn_session_entities);
    }
}

// ═══════════════════════════════════════════════════════════════════════
// SPAWNING
// ═══════════════════════════════════════════════════════════════════════

/// The well's interactable. Using it waters every seedling on the farm.
pub fn well_interactable() -> Interactable {
    Interactable {
        name: WELL_NAME.to_string(),
        prompt_message: "Draw water and soak the seedlings?".to_string(),
        action: InteractAction::WaterSeedlings,
    }
}

pub fn notice_board_interactable() -> Interactable {
    Interactable {
        name: NOTICE_BOARD_NAME.to_string(),
        prompt_message: "Read today's weather report?".to_string(),
        action: InteractAction::Notify,
    }
}

pub fn spawn_farm(mut commands: Commands, layout: Res<FarmLayout>) {
    // Ground: one sprite covering every tile, anchored on tile centres.
    let size = Vec2::new(layout.width as f32, layout.height as f32) * TILE_SIZE;
    let centre = (grid_to_world(layout.width - 1, layout.height - 1)) * 0.5;
    commands.spawn((
        Sprite {
            color: Color::srgb(0.55, 0.68, 0.3),
            custom_size: Some(size),
            ..default()
        },
        Transform::from_translation(centre.extend(GROUND_Z)),
        SessionEntity,
    ));

    let (wx, wy) = layout.well;
    commands.spawn((
        well_interactable(),
        Sprite {
            color: Color::srgb(0.3, 0.45, 0.75),
            custom_size: Some(Vec2::splat(TILE_SIZE)),
            ..default()
        },
        Transform::from_translation(grid_to_world(wx, wy).extend(PROP_Z)),
        SessionEntity,
    ));

    let (bx, by) = layout.notice_board;
    commands.spawn((
        notice_board_interactable(),
        Sprite {
            color: Color::srgb(0.5, 0.35, 0.2),
            custom_size: Some(Vec2::new(TILE_SIZE, TILE_SIZE * 1.2)),
            ..default()
        },
        Transform::from_translation(grid_to_world(bx, by).extend(PROP_Z)),
        SessionEntity,
    ));

    info!(
        "World: farm {}x{} ready, well at {:?}, notice board at {:?}.",
        layout.width, layout.height, layout.well, layout.notice_board
    );
}

/// The farm fits on screen, so the camera just sits over its middle.
fn center_camera(
    layout: Res<FarmLayout>,
    mut cameras: Query<&mut Transform, With<Camera2d>>,
) {
    let centre = grid_to_world(layout.width - 1, layout.height - 1) * 0.5;
    for mut transform in &mut cameras {
        transform.translation.x = centre.x;
        transform.translation.y = centre.y;
    }
}

// ═══════════════════════════════════════════════════════════════════════
// INTERACTIONS
// ═══════════════════════════════════════════════════════════════════════

/// What the notice board says about the day.
pub fn notice_board_text(selection: &WeatherSelection) -> String {
    if selection.has_selection() {
        selection.info.clone()
    } else {
        "No heatwave today. Standard quota.".to_string()
    }
}

pub fn read_notice_board(
    mut events: EventReader<InteractedEvent>,
    selection: Res<WeatherSelection>,
    mut toasts: EventWriter<ToastEvent>,
) {
    for event in events.read() {
        if event.name != NOTICE_BOARD_NAME {
            continue;
        }
        toasts.send(ToastEvent {
            message: notice_board_text(&selection),
            duration_secs: 4.0,
        });
    }
}

pub fn despawn_session_entities(
    mut commands: Commands,
    query: Query<Entity, With<SessionEntity>>,
) {
    let mut count = 0;
    for entity in &query {
        commands.entity(entity).despawn_recursive();
        count += 1;
    }
    debug!("World: despawned {} session entities.", count);
}
