use bevy::prelude::*;
use crate::shared::*;

pub struct InputPlugin;

impl Plugin for InputPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<KeyBindings>()
            .init_resource::<PlayerInput>()
            .init_resource::<InputContext>()
            .add_systems(
                PreUpdate,
                (reset_and_read_input, manage_input_context).chain(),
            );
    }
}

/// The single point where hardware input becomes game actions.
fn reset_and_read_input(
    keys: Res<ButtonInput<KeyCode>>,
    bindings: Res<KeyBindings>,
    context: Res<InputContext>,
    mut input: ResMut<PlayerInput>,
) {
    *input = read_input(&keys, &bindings, *context);
}

/// Map the keys held / pressed this frame to actions for `context`.
pub fn read_input(
    keys: &ButtonInput<KeyCode>,
    bindings: &KeyBindings,
    context: InputContext,
) -> PlayerInput {
    let mut input = PlayerInput::default();

    match context {
        InputContext::Disabled => {}

        InputContext::Gameplay => {
            let mut axis = Vec2::ZERO;
            if keys.pressed(bindings.move_up) || keys.pressed(KeyCode::ArrowUp) {
                axis.y += 1.0;
            }
            if keys.pressed(bindings.move_down) || keys.pressed(KeyCode::ArrowDown) {
                axis.y -= 1.0;
            }
            if keys.pressed(bindings.move_left) || keys.pressed(KeyCode::ArrowLeft) {
                axis.x -= 1.0;
            }
            if keys.pressed(bindings.move_right) || keys.pressed(KeyCode::ArrowRight) {
                axis.x += 1.0;
            }
            // Only shorten diagonals; a single axis stays at full length.
            input.move_axis = if axis.length_squared() > 1.0 {
                axis.normalize()
            } else {
                axis
            };

            // One slot per frame, lowest number first.
            input.plant_slot = bindings
                .plant_slots
                .iter()
                .position(|key| keys.just_pressed(*key))
                .and_then(SeedKind::from_index);

            input.interact = keys.just_pressed(bindings.interact);
        }

        InputContext::Prompt => {
            input.ui_confirm =
                keys.just_pressed(bindings.ui_confirm) || keys.just_pressed(bindings.interact);
            input.ui_cancel = keys.just_pressed(bindings.ui_cancel);
        }

        InputContext::Menu => {
            input.ui_confirm =
                keys.just_pressed(bindings.ui_confirm) || keys.just_pressed(KeyCode::Space);
            input.ui_cancel = keys.just_pressed(bindings.ui_cancel);
        }
    }

    input
}

/// Derives InputContext from GameState and the open prompt. ONE system,
/// replaces all per-domain guards.
fn manage_input_context(
    game_state: Res<State<GameState>>,
    prompt: Option<Res<ActivePrompt>>,
    mut context: ResMut<InputContext>,
) {
    let prompt_open = prompt.is_some_and(|p| p.is_open());
    *context = match *game_state.get() {
        GameState::Loading => InputContext::Disabled,
        GameState::Playing if prompt_open => InputContext::Prompt,
        GameState::Playing => InputContext::Gameplay,
        GameState::MainMenu | GameState::GameOver | GameState::Victory => InputContext::Menu,
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    fn press(keys: &mut ButtonInput<KeyCode>, codes: &[KeyCode]) {
        for code in codes {
            keys.press(*code);
        }
    }

    #[test]
    fn diagonal_movement_is_normalised() {
        let mut keys = ButtonInput::<KeyCode>::default();
        press(&mut keys, &[KeyCode::KeyW, KeyCode::KeyD]);
        let input = read_input(&keys, &KeyBindings::default(), InputContext::Gameplay);
        assert!((input.move_axis.length() - 1.0).abs() < 1e-5);
        assert!(input.move_axis.x > 0.0 && input.move_axis.y > 0.0);
    }

    #[test]
    fn opposite_keys_cancel() {
        let mut keys = ButtonInput::<KeyCode>::default();
        press(&mut keys, &[KeyCode::KeyA, KeyCode::KeyD]);
        let input = read_input(&keys, &KeyBindings::default(), InputContext::Gameplay);
        assert_eq!(input.move_axis, Vec2::ZERO);
    }

    #[test]
    fn first_pressed_slot_wins() {
        let mut keys = ButtonInput::<KeyCode>::default();
        press(&mut keys, &[KeyCode::Digit3, KeyCode::Digit2]);
        let input = read_input(&keys, &KeyBindings::default(), InputContext::Gameplay);
        assert_eq!(input.plant_slot, Some(SeedKind::Pepper));
    }

    #[test]
    fn prompt_context_blocks_movement_and_planting() {
        let mut keys = ButtonInput::<KeyCode>::default();
        press(&mut keys, &[KeyCode::KeyW, KeyCode::Digit1, KeyCode::KeyE]);
        let input = read_input(&keys, &KeyBindings::default(), InputContext::Prompt);
        assert_eq!(input.move_axis, Vec2::ZERO);
        assert_eq!(input.plant_slot, None);
        assert!(!input.interact);
        assert!(input.ui_confirm);
    }

    #[test]
    fn disabled_context_reads_nothing() {
        let mut keys = ButtonInput::<KeyCode>::default();
        press(&mut keys, &[KeyCode::Enter, KeyCode::KeyS]);
        let input = read_input(&keys, &KeyBindings::default(), InputContext::Disabled);
        assert!(!input.ui_confirm);
        assert_eq!(input.move_axis, Vec2::ZERO);
    }
}
