//! Short-lived notices stacked in the top-right corner.

use bevy::prelude::*;
use crate::shared::*;
use super::UiFontHandle;

const MAX_VISIBLE_TOASTS: usize = 3;
const FADE_SECS: f32 = 0.5;
const TOAST_BG_ALPHA: f32 = 0.8;

#[derive(Component)]
pub struct ToastStack;

/// Seconds left on screen, counting the fade at the end.
#[derive(Component)]
pub struct Toast {
    pub remaining_secs: f32,
}

/// Opacity for a toast with `remaining_secs` left: solid until the last
/// [`FADE_SECS`], then a linear fade to zero.
pub fn toast_alpha(remaining_secs: f32) -> f32 {
    (remaining_secs / FADE_SECS).clamp(0.0, 1.0)
}

pub fn spawn_toast_container(mut commands: Commands) {
    commands.spawn((
        ToastStack,
        Node {
            position_type: PositionType::Absolute,
            top: Val::Px(84.0),
            right: Val::Px(12.0),
            flex_direction: FlexDirection::Column,
            align_items: AlignItems::FlexEnd,
            row_gap: Val::Px(4.0),
            ..default()
        },
        PickingBehavior::IGNORE,
    ));
}

pub fn handle_toast_events(
    mut commands: Commands,
    mut events: EventReader<ToastEvent>,
    font_handle: Res<UiFontHandle>,
    stack: Query<Entity, With<ToastStack>>,
    shown: Query<Entity, With<Toast>>,
) {
    let Ok(stack) = stack.get_single() else {
        events.clear();
        return;
    };

    let mut visible: Vec<Entity> = shown.iter().collect();
    for event in events.read() {
        while visible.len() >= MAX_VISIBLE_TOASTS {
            let oldest = visible.remove(0);
            commands.entity(oldest).despawn_recursive();
        }

        let toast = commands
            .spawn((
                Toast {
                    remaining_secs: event.duration_secs + FADE_SECS,
                },
                Node {
                    padding: UiRect::axes(Val::Px(10.0), Val::Px(4.0)),
                    ..default()
                },
                BackgroundColor(Color::srgba(0.1, 0.07, 0.03, TOAST_BG_ALPHA)),
                PickingBehavior::IGNORE,
            ))
            .with_child((
                Text::new(event.message.clone()),
                TextFont {
                    font: font_handle.0.clone(),
                    font_size: 14.0,
                    ..default()
                },
                TextColor(Color::srgb(1.0, 0.95, 0.85)),
                PickingBehavior::IGNORE,
            ))
            .id();

        commands.entity(stack).add_child(toast);
        visible.push(toast);
    }
}

pub fn update_toasts(
    mut commands: Commands,
    time: Res<Time>,
    mut toasts: Query<(Entity, &mut Toast, &mut BackgroundColor, &Children)>,
    mut labels: Query<&mut TextColor>,
) {
    for (entity, mut toast, mut background, children) in &mut toasts {
        toast.remaining_secs -= time.delta_secs();
        if toast.remaining_secs <= 0.0 {
            commands.entity(entity).despawn_recursive();
            continue;
        }

        let alpha = toast_alpha(toast.remaining_secs);
        if alpha < 1.0 {
            background.0.set_alpha(TOAST_BG_ALPHA * alpha);
            for &child in children.iter() {
                if let Ok(mut color) = labels.get_mut(child) {
                    color.0.set_alpha(alpha);
                }
            }
        }
    }
}

pub fn wire_collect_toasts(
    mut collected: EventReader<PlantCollectedEvent>,
    catalogue: Res<SeedCatalogue>,
    mut toast_writer: EventWriter<ToastEvent>,
) {
    for event in collected.read() {
        let name = catalogue
            .get(event.kind)
            .map(|def| def.name.as_str())
            .unwrap_or("Plant");
        toast_writer.send(ToastEvent {
            message: format!("Collected {}", name),
            duration_secs: 1.5,
        });
    }
}
