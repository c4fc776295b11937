use bevy::prelude::*;
use crate::session::timer::format_time_label;
use crate::shared::*;
use super::UiFontHandle;

// ═══════════════════════════════════════════════════════════════════════
// MARKER COMPONENTS — used to query and update HUD elements
// ═══════════════════════════════════════════════════════════════════════

#[derive(Component)]
pub struct HudRoot;

/// Countdown label, `m:ss:cc`.
#[derive(Component)]
pub struct HudTimerText;

#[derive(Component)]
pub struct HudProgressFill;

/// Weather pick summary, or a note that the defaults are in use.
#[derive(Component)]
pub struct HudWeatherText;

#[derive(Component)]
pub struct HudSeedText {
    pub slot: usize,
}

#[derive(Component)]
pub struct HudCollectedText;

// ═══════════════════════════════════════════════════════════════════════
// SPAWN / DESPAWN
// ═══════════════════════════════════════════════════════════════════════

pub fn spawn_hud(mut commands: Commands, font_handle: Res<UiFontHandle>) {
    let font = font_handle.0.clone();

    // Full-screen overlay that never blocks clicks
    commands
        .spawn((
            HudRoot,
            Node {
                width: Val::Percent(100.0),
                height: Val::Percent(100.0),
                flex_direction: FlexDirection::Column,
                justify_content: JustifyContent::SpaceBetween,
                ..default()
            },
            PickingBehavior::IGNORE,
        ))
        .with_children(|parent| {
            // ─── TOP BAR ───
            parent
                .spawn((
                    Node {
                        width: Val::Percent(100.0),
                        height: Val::Px(44.0),
                        flex_direction: FlexDirection::Row,
                        justify_content: JustifyContent::SpaceBetween,
                        align_items: AlignItems::Center,
                        padding: UiRect::axes(Val::Px(12.0), Val::Px(4.0)),
                        ..default()
                    },
                    BackgroundColor(Color::srgba(0.0, 0.0, 0.0, 0.6)),
                    PickingBehavior::IGNORE,
                ))
                .with_children(|top_bar| {
                    // Left group: countdown + progress bar
                    top_bar
                        .spawn((
                            Node {
                                flex_direction: FlexDirection::Row,
                                align_items: AlignItems::Center,
                                column_gap: Val::Px(12.0),
                                ..default()
                            },
                            PickingBehavior::IGNORE,
                        ))
                        .with_children(|left| {
                            left.spawn((
                                HudTimerText,
                                Text::new("1:00:00"),
                                TextFont {
                                    font: font.clone(),
                                    font_size: 20.0,
                                    ..default()
                                },
                                TextColor(Color::WHITE),
                                PickingBehavior::IGNORE,
                            ));

                            left.spawn((
                                Node {
                                    width: Val::Px(140.0),
                                    height: Val::Px(12.0),
                                    border: UiRect::all(Val::Px(1.0)),
                                    ..default()
                                },
                                BackgroundColor(Color::srgba(0.1, 0.1, 0.1, 0.9)),
                                BorderColor(Color::srgba(0.6, 0.6, 0.6, 0.8)),
                                PickingBehavior::IGNORE,
                            ))
                            .with_children(|bar| {
                                bar.spawn((
                                    HudProgressFill,
                                    Node {
                                        width: Val::Percent(0.0),
                                        height: Val::Percent(100.0),
                                        ..default()
                                    },
                                    BackgroundColor(Color::srgb(0.95, 0.6, 0.15)),
                                    PickingBehavior::IGNORE,
                                ));
                            });
                        });

                    // Right: plants collected
                    top_bar.spawn((
                        HudCollectedText,
                        Text::new("Plants 0/0"),
                        TextFont {
                            font: font.clone(),
                            font_size: 18.0,
                            ..default()
                        },
                        TextColor(Color::srgb(0.6, 1.0, 0.5)),
                        PickingBehavior::IGNORE,
                    ));
                });

            // ─── WEATHER LINE (under the top bar) ───
            parent.spawn((
                HudWeatherText,
                Text::new(""),
                TextFont {
                    font: font.clone(),
                    font_size: 14.0,
                    ..default()
                },
                TextColor(Color::srgb(1.0, 0.85, 0.5)),
                Node {
                    position_type: PositionType::Absolute,
                    top: Val::Px(50.0),
                    left: Val::Px(12.0),
                    ..default()
                },
                PickingBehavior::IGNORE,
            ));

            // ─── BOTTOM: SEED SLOTS ───
            parent
                .spawn((
                    Node {
                        width: Val::Percent(100.0),
                        height: Val::Px(48.0),
                        flex_direction: FlexDirection::Row,
                        justify_content: JustifyContent::Center,
                        align_items: AlignItems::Center,
                        column_gap: Val::Px(6.0),
                        padding: UiRect::bottom(Val::Px(6.0)),
                        ..default()
                    },
                    PickingBehavior::IGNORE,
                ))
                .with_children(|slots| {
                    for slot in 0..SEED_SLOTS {
                        slots
                            .spawn((
                                Node {
                                    min_width: Val::Px(110.0),
                                    height: Val::Px(36.0),
                                    justify_content: JustifyContent::Center,
                                    align_items: AlignItems::Center,
                                    border: UiRect::all(Val::Px(2.0)),
                                    ..default()
                                },
                                BackgroundColor(Color::srgba(0.15, 0.12, 0.1, 0.85)),
                                BorderColor(Color::srgba(0.4, 0.35, 0.3, 0.8)),
                                PickingBehavior::IGNORE,
                            ))
                            .with_children(|cell| {
                                cell.spawn((
                                    HudSeedText { slot },
                                    Text::new(""),
                                    TextFont {
                                        font: font.clone(),
                                        font_size: 14.0,
                                        ..default()
                                    },
                                    TextColor(Color::WHITE),
                                    PickingBehavior::IGNORE,
                                ));
                            });
                    }
                });
        });
}

pub fn despawn_hud(mut commands: Commands, query: Query<Entity, With<HudRoot>>) {
    for entity in &query {
        commands.entity(entity).despawn_recursive();
    }
}

// ═══════════════════════════════════════════════════════════════════════
// UPDATE SYSTEMS
// ═══════════════════════════════════════════════════════════════════════

pub fn update_timer_display(
    timer: Res<SessionTimer>,
    mut query: Query<&mut Text, With<HudTimerText>>,
) {
    if !timer.is_changed() {
        return;
    }
    for mut text in &mut query {
        **text = format_time_label(timer.remaining_secs());
    }
}

pub fn update_progress_bar(
    timer: Res<SessionTimer>,
    mut query: Query<&mut Node, With<HudProgressFill>>,
) {
    if !timer.is_changed() {
        return;
    }
    for mut node in &mut query {
        node.width = Val::Percent(timer.progress_percent());
    }
}

pub fn update_weather_display(
    selection: Res<WeatherSelection>,
    mut query: Query<&mut Text, With<HudWeatherText>>,
) {
    if !selection.is_changed() {
        return;
    }
    for mut text in &mut query {
        **text = if selection.has_selection() {
            selection.info.clone()
        } else {
            "No heatwave on record. Standard day.".to_string()
        };
    }
}

pub fn update_seed_display(
    inventory: Res<SeedInventory>,
    catalogue: Res<SeedCatalogue>,
    mut query: Query<(&mut Text, &HudSeedText)>,
) {
    if !inventory.is_changed() {
        return;
    }
    for (mut text, slot) in &mut query {
        let Some(kind) = SeedKind::from_index(slot.slot) else {
            continue;
        };
        let name = catalogue
            .get(kind)
            .map(|def| def.name.as_str())
            .unwrap_or("Seed");
        **text = format!("[{}] {} x{}", slot.slot + 1, name, inventory.count(kind));
    }
}

pub fn update_collected_display(
    stats: Res<SessionStats>,
    mut query: Query<&mut Text, With<HudCollectedText>>,
) {
    if !stats.is_changed() {
        return;
    }
    for mut text in &mut query {
        **text = format!("Plants {}/{}", stats.collected, stats.required);
    }
}
