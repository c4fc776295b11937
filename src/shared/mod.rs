//! Shared components, resources, events, and states for Heatwave Harvest.
//!
//! This is the type contract. Every domain plugin imports from here.
//! Plugins talk to each other only through the events and resources below;
//! the few cross-module imports are pure helpers (weather sampling, timer
//! labels).

use bevy::prelude::*;
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};

// ═══════════════════════════════════════════════════════════════════════
// GAME STATE — top-level state machine
// ═══════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, States, Default)]
pub enum GameState {
    #[default]
    Loading,
    MainMenu,
    Playing,
    GameOver,
    Victory,
}

// ═══════════════════════════════════════════════════════════════════════
// WEATHER — sampled observation and the difficulty it implies
// ═══════════════════════════════════════════════════════════════════════

/// One weather observation picked from the weather table.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct WeatherSample {
    pub location: String,
    pub timestamp: String,
    pub temperature_c: f32,
    pub humidity_pct: f32,
    pub precipitation_mm: f32,
    pub wind_speed_kmh: f32,
}

/// Session length and plant quota derived from a weather sample.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DifficultyParameters {
    pub duration_secs: f32,
    pub target_plant_count: u32,
}

impl Default for DifficultyParameters {
    fn default() -> Self {
        Self {
            duration_secs: DEFAULT_DURATION_SECS,
            target_plant_count: DEFAULT_TARGET_PLANTS,
        }
    }
}

/// Interpolation endpoints for the heat → difficulty mapping.
///
/// A factor of 0 (at or below the threshold) yields the `cool` values,
/// a factor of 1 (`band_width_c` or more above it) the `hot` values.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DifficultyCurve {
    pub band_width_c: f32,
    pub cool_duration_secs: f32,
    pub hot_duration_secs: f32,
    pub cool_target_plants: f32,
    pub hot_target_plants: f32,
}

impl Default for DifficultyCurve {
    fn default() -> Self {
        Self {
            band_width_c: 10.0,
            cool_duration_secs: 75.0,
            hot_duration_secs: 45.0,
            cool_target_plants: 8.0,
            hot_target_plants: 20.0,
        }
    }
}

/// The session's weather pick. Owned by the app as a resource and read by
/// the timer, the seed inventory and the win check.
///
/// `initialized` backs the "first call wins" mode of
/// [`WeatherSelection::initialize`]; a forced reselect ignores it.
#[derive(Resource, Debug, Clone, Default)]
pub struct WeatherSelection {
    pub initialized: bool,
    pub sample: Option<WeatherSample>,
    pub params: DifficultyParameters,
    pub info: String,
}

/// Random source for weather sampling. Seeded from the config when a seed
/// is given, from OS entropy otherwise.
#[derive(Resource)]
pub struct SessionRng(pub StdRng);

impl Default for SessionRng {
    fn default() -> Self {
        Self(StdRng::from_entropy())
    }
}

impl SessionRng {
    pub fn seeded(seed: u64) -> Self {
        Self(StdRng::seed_from_u64(seed))
    }
}

// ═══════════════════════════════════════════════════════════════════════
// CONFIG — loaded from assets/config/game.ron by the data layer
// ═══════════════════════════════════════════════════════════════════════

#[derive(Resource, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub heat_threshold_c: f32,
    pub weather_table_path: String,
    /// Countdown used when no weather row qualifies, as `mm:ss:cc`.
    pub fallback_timer_label: String,
    pub fallback_target_plants: u32,
    pub starting_seeds: [u32; SEED_SLOTS],
    pub difficulty: DifficultyCurve,
    pub move_speed_tiles: f32,
    pub rng_seed: Option<u64>,
    pub record_runs: bool,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            heat_threshold_c: DEFAULT_HEAT_THRESHOLD_C,
            weather_table_path: String::from("assets/data/weather_data.csv"),
            fallback_timer_label: String::from("1:00:00"),
            fallback_target_plants: DEFAULT_TARGET_PLANTS,
            starting_seeds: [3, 3, 3],
            difficulty: DifficultyCurve::default(),
            move_speed_tiles: 3.0,
            rng_seed: None,
            record_runs: true,
        }
    }
}

// ═══════════════════════════════════════════════════════════════════════
// INPUT — hardware keys become game actions in one place
// ═══════════════════════════════════════════════════════════════════════

#[derive(Resource, Debug, Clone)]
pub struct KeyBindings {
    pub move_up: KeyCode,
    pub move_down: KeyCode,
    pub move_left: KeyCode,
    pub move_right: KeyCode,
    pub plant_slots: [KeyCode; SEED_SLOTS],
    pub interact: KeyCode,
    pub ui_confirm: KeyCode,
    pub ui_cancel: KeyCode,
}

impl Default for KeyBindings {
    fn default() -> Self {
        Self {
            move_up: KeyCode::KeyW,
            move_down: KeyCode::KeyS,
            move_left: KeyCode::KeyA,
            move_right: KeyCode::KeyD,
            plant_slots: [KeyCode::Digit1, KeyCode::Digit2, KeyCode::Digit3],
            interact: KeyCode::KeyE,
            ui_confirm: KeyCode::Enter,
            ui_cancel: KeyCode::Escape,
        }
    }
}

/// Per-frame game actions. Reset and refilled every frame by the input plugin.
#[derive(Resource, Debug, Clone, Default)]
pub struct PlayerInput {
    pub move_axis: Vec2,
    pub plant_slot: Option<SeedKind>,
    pub interact: bool,
    pub ui_confirm: bool,
    pub ui_cancel: bool,
}

#[derive(Resource, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InputContext {
    #[default]
    Disabled,
    Gameplay,
    Prompt,
    Menu,
}

// ═══════════════════════════════════════════════════════════════════════
// FARMING
// ═══════════════════════════════════════════════════════════════════════

pub const SEED_SLOTS: usize = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SeedKind {
    Turnip,
    Pepper,
    Melon,
}

impl SeedKind {
    pub const ALL: [SeedKind; SEED_SLOTS] = [SeedKind::Turnip, SeedKind::Pepper, SeedKind::Melon];

    pub fn index(self) -> usize {
        match self {
            SeedKind::Turnip => 0,
            SeedKind::Pepper => 1,
            SeedKind::Melon => 2,
        }
    }

    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PlantStage {
    Seedling,
    Watered,
}

/// A plant occupying one farm cell. `sprite_index` is the visual the cell
/// currently shows; seedlings may be matched on it as well as on `kind`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlantedCrop {
    pub kind: SeedKind,
    pub stage: PlantStage,
    pub sprite_index: usize,
}

/// Static description of a seed kind and its two plant visuals.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SeedDef {
    pub kind: SeedKind,
    pub name: String,
    pub seedling_sprite: usize,
    pub watered_sprite: usize,
    pub color: (f32, f32, f32),
}

#[derive(Resource, Debug, Clone, Default)]
pub struct SeedCatalogue {
    pub seeds: Vec<SeedDef>,
}

impl SeedCatalogue {
    pub fn get(&self, kind: SeedKind) -> Option<&SeedDef> {
        self.seeds.iter().find(|def| def.kind == kind)
    }
}

/// The farm grid: which cells are farmland and what grows on them.
#[derive(Resource, Debug, Clone, Default)]
pub struct FarmField {
    pub farmland: HashSet<(i32, i32)>,
    pub plants: HashMap<(i32, i32), PlantedCrop>,
}

/// Seeds left to plant, one counter per hotkey slot.
#[derive(Resource, Debug, Clone, Default, PartialEq, Eq)]
pub struct SeedInventory {
    pub counts: [u32; SEED_SLOTS],
}

// ═══════════════════════════════════════════════════════════════════════
// PLAYER & WORLD
// ═══════════════════════════════════════════════════════════════════════

#[derive(Component, Debug, Clone, Default)]
pub struct Player;

#[derive(Component, Debug, Clone)]
pub struct PlayerMovement {
    /// Pixels per second.
    pub speed: f32,
    pub is_idle: bool,
    pub facing_left: bool,
}

#[derive(Component, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct GridPosition {
    pub x: i32,
    pub y: i32,
}

/// What the Use button does for an interactable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InteractAction {
    /// Upgrade every planted seedling to its watered stage.
    WaterSeedlings,
    /// Broadcast an [`InteractedEvent`] for whoever listens.
    Notify,
}

#[derive(Component, Debug, Clone)]
pub struct Interactable {
    pub name: String,
    pub prompt_message: String,
    pub action: InteractAction,
}

/// The interactable whose trigger area the player is standing in.
#[derive(Resource, Debug, Clone, Default)]
pub struct NearbyInteractable {
    pub current: Option<Entity>,
    pub inside: HashSet<Entity>,
}

/// Everything spawned for one play session; despawned when Playing exits.
#[derive(Component, Debug, Clone, Default)]
pub struct SessionEntity;

/// Farm bounds and fixed placements, in grid cells.
#[derive(Resource, Debug, Clone)]
pub struct FarmLayout {
    pub width: i32,
    pub height: i32,
    /// Inclusive rectangles `(min_x, min_y, max_x, max_y)` of farmland.
    pub plots: Vec<(i32, i32, i32, i32)>,
    pub well: (i32, i32),
    pub notice_board: (i32, i32),
    pub player_spawn: (i32, i32),
}

impl Default for FarmLayout {
    fn default() -> Self {
        Self {
            width: 20,
            height: 12,
            plots: vec![(3, 2, 8, 5), (11, 2, 16, 5), (3, 7, 8, 9)],
            well: (14, 8),
            notice_board: (17, 9),
            player_spawn: (10, 6),
        }
    }
}

// ═══════════════════════════════════════════════════════════════════════
// SESSION
// ═══════════════════════════════════════════════════════════════════════

#[derive(Resource, Debug, Clone, Default)]
pub struct SessionTimer {
    pub duration_secs: f32,
    pub elapsed_secs: f32,
    pub running: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SessionOutcome {
    Won,
    TimedOut,
}

#[derive(Resource, Debug, Clone, Default)]
pub struct SessionStats {
    pub collected: u32,
    pub required: u32,
    pub outcome: Option<SessionOutcome>,
}

/// One finished session, as kept in the run history.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunRecord {
    /// Seconds since the Unix epoch (0 where no clock is available).
    pub timestamp: u64,
    pub outcome: SessionOutcome,
    pub collected: u32,
    pub required: u32,
    pub duration_secs: f32,
    pub sample: Option<WeatherSample>,
}

/// Past runs, oldest first. Filled by the save plugin at startup.
#[derive(Resource, Debug, Clone, Default)]
pub struct RunHistory {
    pub runs: Vec<RunRecord>,
}

impl RunHistory {
    pub fn wins(&self) -> usize {
        self.runs
            .iter()
            .filter(|run| run.outcome == SessionOutcome::Won)
            .count()
    }
}

// ═══════════════════════════════════════════════════════════════════════
// EVENTS
// ═══════════════════════════════════════════════════════════════════════

/// Fired once a session's weather pick and timer are in place.
#[derive(Event, Debug, Clone)]
pub struct SessionStartedEvent {
    pub params: Option<DifficultyParameters>,
}

#[derive(Event, Debug, Clone)]
pub struct SessionEndEvent {
    pub outcome: SessionOutcome,
    pub collected: u32,
    pub required: u32,
    pub duration_secs: f32,
    pub sample: Option<WeatherSample>,
}

#[derive(Event, Debug, Clone)]
pub struct PlantCollectedEvent {
    pub grid_x: i32,
    pub grid_y: i32,
    pub kind: SeedKind,
}

#[derive(Event, Debug, Clone)]
pub struct WaterSeedlingsEvent;

#[derive(Event, Debug, Clone)]
pub struct InteractedEvent {
    pub entity: Entity,
    pub name: String,
}

/// Ask the UI to show the Use / Cancel prompt.
#[derive(Event, Debug, Clone, PartialEq)]
pub struct PromptRequest {
    pub message: String,
    pub on_use: PromptAction,
}

#[derive(Debug, Clone, PartialEq)]
pub enum PromptAction {
    WaterSeedlings,
    Interact { entity: Entity, name: String },
}

/// The prompt currently on screen, if any. Owned by the UI plugin.
#[derive(Resource, Debug, Clone, Default)]
pub struct ActivePrompt {
    pub request: Option<PromptRequest>,
}

impl ActivePrompt {
    pub fn is_open(&self) -> bool {
        self.request.is_some()
    }
}

/// Toast notification for player feedback.
#[derive(Event, Debug, Clone)]
pub struct ToastEvent {
    pub message: String,
    pub duration_secs: f32,
}

// ═══════════════════════════════════════════════════════════════════════
// CONSTANTS
// ═══════════════════════════════════════════════════════════════════════

pub const TILE_SIZE: f32 = 16.0;
pub const PIXEL_SCALE: f32 = 3.0; // render scale (16px × 3 = 48px on screen)
pub const SCREEN_WIDTH: f32 = 960.0;
pub const SCREEN_HEIGHT: f32 = 540.0;

pub const DEFAULT_HEAT_THRESHOLD_C: f32 = 35.0;
pub const DEFAULT_DURATION_SECS: f32 = 60.0;
pub const DEFAULT_TARGET_PLANTS: u32 = 10;

/// Distance (in tiles) at which an interactable's trigger area is entered.
pub const INTERACT_RADIUS_TILES: f32 = 1.25;

/// Convert a grid cell to the world-space centre of that tile.
pub fn grid_to_world(x: i32, y: i32) -> Vec2 {
    Vec2::new(x as f32 * TILE_SIZE, y as f32 * TILE_SIZE)
}

/// Convert a world position to the grid cell containing it.
pub fn world_to_grid(x: f32, y: f32) -> (i32, i32) {
    ((x / TILE_SIZE).round() as i32, (y / TILE_SIZE).round() as i32)
}
