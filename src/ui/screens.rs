//! Full-screen menus: title, game over, victory.

use bevy::prelude::*;
use crate::shared::*;
use super::UiFontHandle;

#[derive(Component)]
pub struct ScreenRoot;

const TITLE_BG: Color = Color::srgb(0.16, 0.11, 0.05);
const GAME_OVER_BG: Color = Color::srgb(0.18, 0.06, 0.05);
const VICTORY_BG: Color = Color::srgb(0.07, 0.16, 0.07);

/// Where confirm / cancel lead from each menu screen.
pub fn next_screen(current: GameState, input: &PlayerInput) -> Option<GameState> {
    match current {
        GameState::MainMenu if input.ui_confirm => Some(GameState::Playing),
        GameState::GameOver | GameState::Victory if input.ui_confirm => Some(GameState::Playing),
        GameState::GameOver | GameState::Victory if input.ui_cancel => Some(GameState::MainMenu),
        _ => None,
    }
}

pub fn screen_navigation(
    state: Res<State<GameState>>,
    input: Res<PlayerInput>,
    mut next_state: ResMut<NextState<GameState>>,
) {
    if let Some(target) = next_screen(*state.get(), &input) {
        info!("UI: {:?} -> {:?}", state.get(), target);
        next_state.set(target);
    }
}

// ═══════════════════════════════════════════════════════════════════════
// SPAWN / DESPAWN
// ═══════════════════════════════════════════════════════════════════════

fn spawn_screen(
    commands: &mut Commands,
    font: &Handle<Font>,
    background: Color,
    title: &str,
    title_color: Color,
    lines: &[String],
    hint: &str,
) {
    commands
        .spawn((
            ScreenRoot,
            Node {
                width: Val::Percent(100.0),
                height: Val::Percent(100.0),
                justify_content: JustifyContent::Center,
                align_items: AlignItems::Center,
                flex_direction: FlexDirection::Column,
                row_gap: Val::Px(18.0),
                ..default()
            },
            BackgroundColor(background),
        ))
        .with_children(|parent| {
            parent.spawn((
                Text::new(title),
                TextFont {
                    font: font.clone(),
                    font_size: 48.0,
                    ..default()
                },
                TextColor(title_color),
            ));

            for line in lines {
                parent.spawn((
                    Text::new(line.clone()),
                    TextFont {
                        font: font.clone(),
                        font_size: 18.0,
                        ..default()
                    },
                    TextColor(Color::srgb(0.85, 0.85, 0.8)),
                ));
            }

            parent.spawn((
                Text::new(hint),
                TextFont {
                    font: font.clone(),
                    font_size: 14.0,
                    ..default()
                },
                TextColor(Color::srgb(0.6, 0.6, 0.55)),
            ));
        });
}

pub fn spawn_main_menu(
    mut commands: Commands,
    font_handle: Res<UiFontHandle>,
    history: Option<Res<RunHistory>>,
) {
    let mut lines = vec![
        "Plant with 1 / 2 / 3, water at the well, collect before time runs out.".to_string(),
        "Hotter days mean a shorter clock and a bigger quota.".to_string(),
    ];
    if let Some(tally) = history.as_deref().and_then(run_tally) {
        lines.push(tally);
    }
    spawn_screen(
        &mut commands,
        &font_handle.0,
        TITLE_BG,
        "HEATWAVE HARVEST",
        Color::srgb(1.0, 0.75, 0.3),
        &lines,
        "Press Enter to start",
    );
}

/// "Won X of Y runs", or nothing before the first run.
pub fn run_tally(history: &RunHistory) -> Option<String> {
    if history.runs.is_empty() {
        return None;
    }
    Some(format!("Won {} of {} runs", history.wins(), history.runs.len()))
}

fn result_lines(stats: &SessionStats, selection: &WeatherSelection) -> Vec<String> {
    let mut lines = vec![format!(
        "Plants collected: {}/{}",
        stats.collected, stats.required
    )];
    if selection.has_selection() {
        lines.push(selection.info.clone());
    }
    lines
}

pub fn spawn_game_over(
    mut commands: Commands,
    font_handle: Res<UiFontHandle>,
    stats: Res<SessionStats>,
    selection: Res<WeatherSelection>,
) {
    spawn_screen(
        &mut commands,
        &font_handle.0,
        GAME_OVER_BG,
        "OUT OF TIME",
        Color::srgb(1.0, 0.4, 0.3),
        &result_lines(&stats, &selection),
        "Enter: try again    Esc: main menu",
    );
}

pub fn spawn_victory(
    mut commands: Commands,
    font_handle: Res<UiFontHandle>,
    stats: Res<SessionStats>,
    selection: Res<WeatherSelection>,
) {
    spawn_screen(
        &mut commands,
        &font_handle.0,
        VICTORY_BG,
        "HARVEST COMPLETE",
        Color::srgb(0.6, 1.0, 0.5),
        &result_lines(&stats, &selection),
        "Enter: play again    Esc: main menu",
    );
}

pub fn despawn_screens(mut commands: Commands, query: Query<Entity, With<ScreenRoot>>) {
    for entity in &query {
        commands.entity(entity).despawn_recursive();
    }
}
