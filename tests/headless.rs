//! Headless integration tests for Heatwave Harvest.
//!
//! These tests exercise the game's ECS logic without a window or GPU.
//! They use Bevy's `MinimalPlugins` to tick the app, register only the
//! pure-logic plugins and systems (skipping rendering-only UI), and verify
//! that a full session plays out correctly.
//!
//! Run with: `cargo test --test headless`

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use bevy::prelude::*;
use bevy::state::app::StatesPlugin;
use bevy::time::TimeUpdateStrategy;
use heatwave_harvest::data::DataPlugin;
use heatwave_harvest::farming::FarmingPlugin;
use heatwave_harvest::player::PlayerPlugin;
use heatwave_harvest::save::{read_run_history, RunHistoryLocation, SavePlugin};
use heatwave_harvest::session::SessionPlugin;
use heatwave_harvest::shared::*;
use heatwave_harvest::ui::{open_prompt_on_request, resolve_prompt_input};
use heatwave_harvest::world::WorldPlugin;

const HEADER: &str = "Location,Date_Time,Temperature_C,Humidity_pct,Precipitation_mm,Wind_Speed_kmh";

// ─────────────────────────────────────────────────────────────────────────────
// Test App Builder
// ─────────────────────────────────────────────────────────────────────────────

/// Builds a minimal Bevy app with all shared events registered and the
/// gameplay plugins added, but NO rendering, windowing, or keyboard. Tests
/// drive `PlayerInput` directly.
fn build_test_app(config: GameConfig) -> App {
    let mut app = App::new();
    app.add_plugins(MinimalPlugins);
    app.add_plugins(StatesPlugin);
    app.insert_resource(TimeUpdateStrategy::ManualDuration(Duration::from_millis(100)));

    // ── Game State ───────────────────────────────────────────────────────
    app.init_state::<GameState>();

    // ── Shared Events (mirrors main.rs) ──────────────────────────────────
    app.add_event::<SessionStartedEvent>()
        .add_event::<SessionEndEvent>()
        .add_event::<PlantCollectedEvent>()
        .add_event::<WaterSeedlingsEvent>()
        .add_event::<InteractedEvent>()
        .add_event::<PromptRequest>()
        .add_event::<ToastEvent>();

    // ── Input & prompt, without keyboard or UI nodes ─────────────────────
    app.init_resource::<PlayerInput>()
        .init_resource::<ActivePrompt>()
        .add_systems(
            Update,
            (open_prompt_on_request, resolve_prompt_input)
                .chain()
                .run_if(in_state(GameState::Playing)),
        );

    app.insert_resource(config);
    app.add_plugins((
        DataPlugin,
        SessionPlugin,
        FarmingPlugin,
        PlayerPlugin,
        WorldPlugin,
    ));

    app
}

fn temp_dir(name: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("heatwave_headless_{}_{}", std::process::id(), name));
    fs::create_dir_all(&dir).expect("temp dir");
    dir
}

fn write_table(name: &str, rows: &[&str]) -> PathBuf {
    let path = temp_dir(name).join("weather.csv");
    let mut text = String::from(HEADER);
    for row in rows {
        text.push('\n');
        text.push_str(row);
    }
    fs::write(&path, text).expect("write weather table");
    path
}

fn config_for(table: &Path) -> GameConfig {
    GameConfig {
        weather_table_path: table.to_string_lossy().into_owned(),
        rng_seed: Some(7),
        record_runs: false,
        ..default()
    }
}

fn state(app: &App) -> GameState {
    *app.world().resource::<State<GameState>>().get()
}

/// Boot through Loading and MainMenu into Playing.
fn start_playing(app: &mut App) {
    app.update();
    app.update();
    assert_eq!(state(app), GameState::MainMenu);
    app.world_mut()
        .resource_mut::<NextState<GameState>>()
        .set(GameState::Playing);
    app.update();
    assert_eq!(state(app), GameState::Playing);
}

/// Apply `input` for exactly one frame.
fn frame_with_input(app: &mut App, input: PlayerInput) {
    *app.world_mut().resource_mut::<PlayerInput>() = input;
    app.update();
    *app.world_mut().resource_mut::<PlayerInput>() = PlayerInput::default();
}

fn place_player(app: &mut App, x: i32, y: i32) {
    let world = app.world_mut();
    let mut query = world.query_filtered::<(&mut Transform, &mut GridPosition), With<Player>>();
    let (mut transform, mut grid_pos) = query.single_mut(world);
    let pos = grid_to_world(x, y);
    transform.translation.x = pos.x;
    transform.translation.y = pos.y;
    *grid_pos = GridPosition { x, y };
}

fn player_count(app: &mut App) -> usize {
    let world = app.world_mut();
    world.query_filtered::<Entity, With<Player>>().iter(world).count()
}

// ─────────────────────────────────────────────────────────────────────────────
// Boot
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn test_headless_boot_reaches_main_menu_with_bundled_data() {
    let mut app = App::new();
    app.add_plugins(MinimalPlugins);
    app.add_plugins(StatesPlugin);
    app.init_state::<GameState>();
    app.add_plugins(DataPlugin);

    // First update enters Loading and loads data; second applies NextState.
    app.update();
    app.update();

    assert_eq!(state(&app), GameState::MainMenu);
    assert_eq!(app.world().resource::<SeedCatalogue>().seeds.len(), SEED_SLOTS);
    let config = app.world().resource::<GameConfig>();
    assert_eq!(config.heat_threshold_c, DEFAULT_HEAT_THRESHOLD_C);
    assert!(config.weather_table_path.ends_with("weather_data.csv"));
}

// ─────────────────────────────────────────────────────────────────────────────
// Session start
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn test_hot_row_sets_timer_quota_and_seeds() {
    let table = write_table(
        "hot_row",
        &[
            "Oslo,2024-06-01 12:00,21.0,60,0,10",
            "Scorch,2024-07-14 15:00,40.0,12,0,5",
        ],
    );
    let mut app = build_test_app(config_for(&table));
    start_playing(&mut app);

    let selection = app.world().resource::<WeatherSelection>();
    assert!(selection.has_selection());
    assert_eq!(selection.target_plant_count(), 14);
    assert!(selection.info.starts_with("Scorch 2024-07-14 15:00"));

    let timer = app.world().resource::<SessionTimer>();
    assert!(timer.running);
    assert_eq!(timer.duration_secs, 60.0);

    assert_eq!(app.world().resource::<SessionStats>().required, 14);
    assert_eq!(app.world().resource::<SeedInventory>().counts, [5, 5, 4]);
    assert_eq!(player_count(&mut app), 1);
}

#[test]
fn test_same_seed_picks_the_same_row() {
    let rows: Vec<String> = (0..40)
        .map(|i| format!("Town{},2024-07-{:02} 14:00,{}.5,20,0,8", i, i % 28 + 1, 35 + i % 10))
        .collect();
    let row_refs: Vec<&str> = rows.iter().map(String::as_str).collect();
    let table = write_table("seeded", &row_refs);

    let pick = |table: &Path| {
        let mut app = build_test_app(config_for(table));
        start_playing(&mut app);
        app.world()
            .resource::<WeatherSelection>()
            .sample
            .clone()
            .map(|s| s.location)
    };

    let first = pick(&table);
    assert!(first.is_some());
    assert_eq!(first, pick(&table));
}

// ─────────────────────────────────────────────────────────────────────────────
// Time-out
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn test_no_hot_rows_falls_back_and_times_out() {
    let table = write_table(
        "cool_only",
        &[
            "Oslo,2024-06-01 12:00,21.0,60,0,10",
            "Bergen,2024-06-02 12:00,18.5,80,3,20",
        ],
    );
    let config = GameConfig {
        fallback_timer_label: "0:02:00".into(),
        ..config_for(&table)
    };
    let mut app = build_test_app(config);
    start_playing(&mut app);

    assert!(!app.world().resource::<WeatherSelection>().has_selection());
    assert_eq!(app.world().resource::<SessionTimer>().duration_secs, 2.0);
    assert_eq!(app.world().resource::<SessionStats>().required, DEFAULT_TARGET_PLANTS);
    assert_eq!(app.world().resource::<SeedInventory>().counts, [3, 3, 3]);

    for _ in 0..40 {
        app.update();
    }

    assert_eq!(state(&app), GameState::GameOver);
    let stats = app.world().resource::<SessionStats>();
    assert_eq!(stats.outcome, Some(SessionOutcome::TimedOut));
    assert!(!app.world().resource::<SessionTimer>().running);
    assert_eq!(player_count(&mut app), 0, "session entities despawn on exit");
}

#[test]
fn test_finished_run_is_written_to_history() {
    let table = write_table("history", &["Oslo,2024-06-01 12:00,21.0,60,0,10"]);
    let history_path = temp_dir("history").join("runs.json");
    let _ = fs::remove_file(&history_path);

    let config = GameConfig {
        fallback_timer_label: "0:01:00".into(),
        record_runs: true,
        ..config_for(&table)
    };
    let mut app = build_test_app(config);
    app.add_plugins(SavePlugin);
    app.insert_resource(RunHistoryLocation(history_path.to_string_lossy().into_owned()));
    start_playing(&mut app);

    for _ in 0..30 {
        app.update();
    }
    assert_eq!(state(&app), GameState::GameOver);

    let runs = read_run_history(&history_path).expect("history readable");
    assert_eq!(runs.len(), 1);
    assert_eq!(runs[0].outcome, SessionOutcome::TimedOut);
    assert_eq!(runs[0].required, DEFAULT_TARGET_PLANTS);
    assert_eq!(app.world().resource::<RunHistory>().runs.len(), 1);
}

#[test]
fn test_unrecorded_run_stays_in_memory_only() {
    let table = write_table("unrecorded", &["Oslo,2024-06-01 12:00,21.0,60,0,10"]);
    let history_path = temp_dir("unrecorded").join("runs.json");
    let _ = fs::remove_file(&history_path);

    let config = GameConfig {
        fallback_timer_label: "0:01:00".into(),
        record_runs: false,
        ..config_for(&table)
    };
    let mut app = build_test_app(config);
    app.add_plugins(SavePlugin);
    app.insert_resource(RunHistoryLocation(history_path.to_string_lossy().into_owned()));
    start_playing(&mut app);

    for _ in 0..30 {
        app.update();
    }
    assert_eq!(state(&app), GameState::GameOver);

    let history = app.world().resource::<RunHistory>();
    assert_eq!(history.runs.len(), 1);
    assert_eq!(history.runs[0].outcome, SessionOutcome::TimedOut);
    assert!(!history_path.exists(), "nothing is written when recording is off");
}

// ─────────────────────────────────────────────────────────────────────────────
// Full loop: plant, water at the well, collect, win
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn test_plant_water_collect_wins() {
    let table = write_table("win", &["Scorch,2024-07-14 15:00,45.0,12,0,5"]);
    let config = GameConfig {
        difficulty: DifficultyCurve {
            cool_target_plants: 2.0,
            hot_target_plants: 2.0,
            cool_duration_secs: 600.0,
            hot_duration_secs: 600.0,
            ..default()
        },
        ..config_for(&table)
    };
    let mut app = build_test_app(config);
    start_playing(&mut app);

    assert_eq!(app.world().resource::<SessionStats>().required, 2);
    assert_eq!(app.world().resource::<SeedInventory>().counts, [1, 1, 0]);

    // Plant one turnip and one pepper on the first plot.
    place_player(&mut app, 3, 2);
    frame_with_input(
        &mut app,
        PlayerInput {
            plant_slot: Some(SeedKind::Turnip),
            ..default()
        },
    );
    place_player(&mut app, 4, 2);
    frame_with_input(
        &mut app,
        PlayerInput {
            plant_slot: Some(SeedKind::Pepper),
            ..default()
        },
    );
    // Out of turnips: a second one is refused.
    place_player(&mut app, 5, 2);
    frame_with_input(
        &mut app,
        PlayerInput {
            plant_slot: Some(SeedKind::Turnip),
            ..default()
        },
    );
    {
        let field = app.world().resource::<FarmField>();
        assert_eq!(field.plants.len(), 2);
        assert!(field
            .plants
            .values()
            .all(|crop| crop.stage == PlantStage::Seedling));
    }
    assert_eq!(app.world().resource::<SeedInventory>().counts, [0, 0, 0]);

    // Seedlings cannot be collected yet.
    place_player(&mut app, 3, 2);
    app.update();
    assert_eq!(app.world().resource::<SessionStats>().collected, 0);

    // Use the well through its prompt.
    let (wx, wy) = app.world().resource::<FarmLayout>().well;
    place_player(&mut app, wx, wy);
    app.update();
    frame_with_input(
        &mut app,
        PlayerInput {
            interact: true,
            ..default()
        },
    );
    app.update();
    assert!(app.world().resource::<ActivePrompt>().is_open());

    frame_with_input(
        &mut app,
        PlayerInput {
            ui_confirm: true,
            ..default()
        },
    );
    app.update();
    assert!(!app.world().resource::<ActivePrompt>().is_open());
    assert!(app
        .world()
        .resource::<FarmField>()
        .plants
        .values()
        .all(|crop| crop.stage == PlantStage::Watered));

    // Walk over both watered plants.
    place_player(&mut app, 3, 2);
    app.update();
    place_player(&mut app, 4, 2);
    app.update();
    app.update();
    app.update();

    assert_eq!(state(&app), GameState::Victory);
    let stats = app.world().resource::<SessionStats>();
    assert_eq!(stats.collected, 2);
    assert_eq!(stats.outcome, Some(SessionOutcome::Won));
    assert!(app.world().resource::<FarmField>().plants.is_empty());
}

#[test]
fn test_cancelled_prompt_does_not_water() {
    let table = write_table("cancel", &["Scorch,2024-07-14 15:00,45.0,12,0,5"]);
    let mut app = build_test_app(config_for(&table));
    start_playing(&mut app);

    place_player(&mut app, 3, 2);
    frame_with_input(
        &mut app,
        PlayerInput {
            plant_slot: Some(SeedKind::Melon),
            ..default()
        },
    );

    let (wx, wy) = app.world().resource::<FarmLayout>().well;
    place_player(&mut app, wx, wy);
    app.update();
    frame_with_input(
        &mut app,
        PlayerInput {
            interact: true,
            ..default()
        },
    );
    app.update();
    frame_with_input(
        &mut app,
        PlayerInput {
            ui_cancel: true,
            ..default()
        },
    );
    app.update();

    assert!(!app.world().resource::<ActivePrompt>().is_open());
    let field = app.world().resource::<FarmField>();
    assert_eq!(field.plant_at((3, 2)).map(|c| c.stage), Some(PlantStage::Seedling));
}

#[test]
fn test_replay_starts_a_fresh_session() {
    let table = write_table("replay", &["Oslo,2024-06-01 12:00,21.0,60,0,10"]);
    let config = GameConfig {
        fallback_timer_label: "0:01:00".into(),
        ..config_for(&table)
    };
    let mut app = build_test_app(config);
    start_playing(&mut app);

    place_player(&mut app, 3, 2);
    frame_with_input(
        &mut app,
        PlayerInput {
            plant_slot: Some(SeedKind::Turnip),
            ..default()
        },
    );
    for _ in 0..30 {
        app.update();
    }
    assert_eq!(state(&app), GameState::GameOver);

    app.world_mut()
        .resource_mut::<NextState<GameState>>()
        .set(GameState::Playing);
    app.update();

    assert_eq!(state(&app), GameState::Playing);
    assert_eq!(player_count(&mut app), 1);
    assert!(app.world().resource::<FarmField>().plants.is_empty());
    assert_eq!(app.world().resource::<SeedInventory>().counts, [3, 3, 3]);
    let stats = app.world().resource::<SessionStats>();
    assert_eq!(stats.collected, 0);
    assert_eq!(stats.outcome, None);
}
