//! The Use / Cancel prompt shown when the player interacts with something.
//!
//! Only one prompt exists at a time. A new request replaces the message of
//! the open one. Both buttons close the panel; only Use runs the action.

use bevy::prelude::*;
use crate::shared::*;
use super::UiFontHandle;

// ═══════════════════════════════════════════════════════════════════════
// COMPONENTS
// ═══════════════════════════════════════════════════════════════════════

#[derive(Component)]
pub struct PromptRoot;

#[derive(Component)]
pub struct PromptMessageText;

#[derive(Component, Debug, Clone, Copy, PartialEq, Eq)]
pub enum PromptButton {
    Use,
    Cancel,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PromptChoice {
    Use,
    Cancel,
}

// ═══════════════════════════════════════════════════════════════════════
// LOGIC
// ═══════════════════════════════════════════════════════════════════════

/// Close the prompt and return the action to run, if the choice was Use.
/// Does nothing when no prompt is open.
pub fn resolve_prompt(active: &mut ActivePrompt, choice: PromptChoice) -> Option<PromptAction> {
    let request = active.request.take()?;
    match choice {
        PromptChoice::Use => Some(request.on_use),
        PromptChoice::Cancel => None,
    }
}

pub fn open_prompt_on_request(
    mut requests: EventReader<PromptRequest>,
    mut active: ResMut<ActivePrompt>,
) {
    // Last request of the frame wins.
    if let Some(request) = requests.read().last() {
        debug!("UI: prompt opened: {}", request.message);
        active.request = Some(request.clone());
    }
}

/// Keyboard (confirm / cancel) or a click on either button resolves the
/// open prompt.
pub fn resolve_prompt_input(
    input: Res<PlayerInput>,
    buttons: Query<(&Interaction, &PromptButton), Changed<Interaction>>,
    mut active: ResMut<ActivePrompt>,
    mut water_events: EventWriter<WaterSeedlingsEvent>,
    mut interacted_events: EventWriter<InteractedEvent>,
) {
    if !active.is_open() {
        return;
    }

    let clicked = buttons
        .iter()
        .find(|(interaction, _)| **interaction == Interaction::Pressed)
        .map(|(_, button)| *button);

    let choice = match clicked {
        Some(PromptButton::Use) => PromptChoice::Use,
        Some(PromptButton::Cancel) => PromptChoice::Cancel,
        None if input.ui_confirm => PromptChoice::Use,
        None if input.ui_cancel => PromptChoice::Cancel,
        None => return,
    };

    match resolve_prompt(&mut active, choice) {
        Some(PromptAction::WaterSeedlings) => {
            water_events.send(WaterSeedlingsEvent);
        }
        Some(PromptAction::Interact { entity, name }) => {
            interacted_events.send(InteractedEvent { entity, name });
        }
        None => debug!("UI: prompt cancelled."),
    }
}

pub fn close_prompt(mut active: ResMut<ActivePrompt>) {
    active.request = None;
}

// ═══════════════════════════════════════════════════════════════════════
// VISUALS
// ═══════════════════════════════════════════════════════════════════════

/// Rebuild the panel whenever the open prompt changes.
pub fn sync_prompt_panel(
    mut commands: Commands,
    active: Res<ActivePrompt>,
    font_handle: Res<UiFontHandle>,
    roots: Query<Entity, With<PromptRoot>>,
) {
    if !active.is_changed() {
        return;
    }
    for entity in &roots {
        commands.entity(entity).despawn_recursive();
    }
    let Some(request) = &active.request else {
        return;
    };

    let font = font_handle.0.clone();
    commands
        .spawn((
            PromptRoot,
            Node {
                position_type: PositionType::Absolute,
                width: Val::Percent(100.0),
                bottom: Val::Px(40.0),
                justify_content: JustifyContent::Center,
                ..default()
            },
            PickingBehavior::IGNORE,
        ))
        .with_children(|parent| {
            parent
                .spawn((
                    Node {
                        width: Val::Px(420.0),
                        flex_direction: FlexDirection::Column,
                        align_items: AlignItems::Center,
                        row_gap: Val::Px(12.0),
                        padding: UiRect::all(Val::Px(14.0)),
                        border: UiRect::all(Val::Px(2.0)),
                        ..default()
                    },
                    BackgroundColor(Color::srgba(0.08, 0.06, 0.04, 0.92)),
                    BorderColor(Color::srgb(0.75, 0.6, 0.35)),
                ))
                .with_children(|panel| {
                    panel.spawn((
                        PromptMessageText,
                        Text::new(request.message.clone()),
                        TextFont {
                            font: font.clone(),
                            font_size: 18.0,
                            ..default()
                        },
                        TextColor(Color::srgb(1.0, 0.95, 0.8)),
                    ));

                    panel
                        .spawn(Node {
                            flex_direction: FlexDirection::Row,
                            column_gap: Val::Px(24.0),
                            ..default()
                        })
                        .with_children(|row| {
                            spawn_button(row, &font, PromptButton::Use, "Use [Enter]");
                            spawn_button(row, &font, PromptButton::Cancel, "Cancel [Esc]");
                        });
                });
        });
}

fn spawn_button(parent: &mut ChildBuilder, font: &Handle<Font>, kind: PromptButton, label: &str) {
    let color = match kind {
        PromptButton::Use => Color::srgb(0.25, 0.5, 0.2),
        PromptButton::Cancel => Color::srgb(0.45, 0.2, 0.15),
    };
    parent
        .spawn((
            kind,
            Button,
            Node {
                padding: UiRect::axes(Val::Px(16.0), Val::Px(6.0)),
                ..default()
            },
            BackgroundColor(color),
        ))
        .with_children(|button| {
            button.spawn((
                Text::new(label),
                TextFont {
                    font: font.clone(),
                    font_size: 16.0,
                    ..default()
                },
                TextColor(Color::WHITE),
                PickingBehavior::IGNORE,
            ));
        });
}

#[cfg(test)]
mod tests {
    use super::*;

    fn water_request() -> PromptRequest {
        PromptRequest {
            message: "Water the seedlings?".into(),
            on_use: PromptAction::WaterSeedlings,
        }
    }

    #[test]
    fn use_returns_the_action_and_closes() {
        let mut active = ActivePrompt {
            request: Some(water_request()),
        };
        assert_eq!(
            resolve_prompt(&mut active, PromptChoice::Use),
            Some(PromptAction::WaterSeedlings)
        );
        assert!(!active.is_open());
    }

    #[test]
    fn cancel_closes_without_action() {
        let mut active = ActivePrompt {
            request: Some(water_request()),
        };
        assert_eq!(resolve_prompt(&mut active, PromptChoice::Cancel), None);
        assert!(!active.is_open());
    }

    #[test]
    fn nothing_to_resolve_when_closed() {
        let mut active = ActivePrompt::default();
        assert_eq!(resolve_prompt(&mut active, PromptChoice::Use), None);
    }
}
