mod hud;
pub mod prompt;
mod screens;
mod toast;

use bevy::prelude::*;
use crate::shared::*;

pub use prompt::{open_prompt_on_request, resolve_prompt, resolve_prompt_input, PromptChoice};
pub use screens::screen_navigation;

/// Font used by every UI text node. The default handle resolves to Bevy's
/// embedded font.
#[derive(Resource, Default, Clone)]
pub struct UiFontHandle(pub Handle<Font>);

pub struct UiPlugin;

impl Plugin for UiPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<UiFontHandle>()
            .init_resource::<ActivePrompt>();

        // ─── TOASTS — always present ───
        app.add_systems(Startup, toast::spawn_toast_container);
        app.add_systems(
            Update,
            (
                toast::wire_collect_toasts,
                toast::handle_toast_events,
                toast::update_toasts,
            )
                .chain(),
        );

        // ─── MAIN MENU ───
        app.add_systems(OnEnter(GameState::MainMenu), screens::spawn_main_menu);
        app.add_systems(OnExit(GameState::MainMenu), screens::despawn_screens);

        // ─── RESULT SCREENS ───
        app.add_systems(OnEnter(GameState::GameOver), screens::spawn_game_over);
        app.add_systems(OnExit(GameState::GameOver), screens::despawn_screens);
        app.add_systems(OnEnter(GameState::Victory), screens::spawn_victory);
        app.add_systems(OnExit(GameState::Victory), screens::despawn_screens);

        app.add_systems(
            Update,
            screens::screen_navigation.run_if(
                in_state(GameState::MainMenu)
                    .or(in_state(GameState::GameOver))
                    .or(in_state(GameState::Victory)),
            ),
        );

        // ─── HUD — visible during Playing state ───
        app.add_systems(OnEnter(GameState::Playing), hud::spawn_hud);
        app.add_systems(OnExit(GameState::Playing), hud::despawn_hud);
        app.add_systems(
            Update,
            (
                hud::update_timer_display,
                hud::update_progress_bar,
                hud::update_weather_display,
                hud::update_seed_display,
                hud::update_collected_display,
            )
                .run_if(in_state(GameState::Playing)),
        );

        // ─── USE / CANCEL PROMPT ───
        app.add_systems(
            Update,
            (
                prompt::open_prompt_on_request,
                prompt::resolve_prompt_input,
                prompt::sync_prompt_panel,
            )
                .chain()
                .run_if(in_state(GameState::Playing)),
        );
        app.add_systems(OnExit(GameState::Playing), prompt::close_prompt);
    }
}
