//! Data layer — loads the game config and seed catalogue at startup.
//!
//! This plugin runs in OnEnter(GameState::Loading), reads
//! `assets/config/game.ron` into [`GameConfig`] (falling back to defaults on
//! any problem), fills the [`SeedCatalogue`], seeds the session RNG, then
//! transitions the game into GameState::MainMenu.

mod seeds;

use bevy::prelude::*;
#[cfg(not(target_arch = "wasm32"))]
use std::path::Path;

use crate::shared::*;

pub use seeds::default_seed_catalogue;

pub const CONFIG_PATH: &str = "assets/config/game.ron";

#[cfg(target_arch = "wasm32")]
const EMBEDDED_CONFIG: &str = include_str!("../../assets/config/game.ron");

pub struct DataPlugin;

impl Plugin for DataPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<GameConfig>()
            .init_resource::<SeedCatalogue>()
            .add_systems(OnEnter(GameState::Loading), load_all_data);
    }
}

/// Parse a RON config. Fields missing from the file keep their defaults.
pub fn parse_game_config(text: &str) -> Result<GameConfig, String> {
    ron::from_str::<GameConfig>(text).map_err(|e| format!("Invalid game config: {}", e))
}

#[cfg(not(target_arch = "wasm32"))]
pub fn read_game_config(path: &Path) -> Result<GameConfig, String> {
    let text = std::fs::read_to_string(path)
        .map_err(|e| format!("Read failed for {}: {}", path.display(), e))?;
    parse_game_config(&text)
}

#[cfg(not(target_arch = "wasm32"))]
fn load_game_config() -> Result<GameConfig, String> {
    read_game_config(Path::new(CONFIG_PATH))
}

#[cfg(target_arch = "wasm32")]
fn load_game_config() -> Result<GameConfig, String> {
    parse_game_config(EMBEDDED_CONFIG)
}

/// Single system that fills config and catalogue, then moves to MainMenu.
///
/// A config that was inserted before startup (tests, tools) is kept as is.
fn load_all_data(
    mut commands: Commands,
    mut config: ResMut<GameConfig>,
    mut catalogue: ResMut<SeedCatalogue>,
    mut next_state: ResMut<NextState<GameState>>,
) {
    info!("DataPlugin: loading game data…");

    if *config == GameConfig::default() {
        match load_game_config() {
            Ok(loaded) => {
                *config = loaded;
                info!("  Config loaded from {}", CONFIG_PATH);
            }
            Err(e) => warn!("  {}; using default config.", e),
        }
    }
    info!(
        "  Heat threshold {:.1}°C, weather table {}",
        config.heat_threshold_c, config.weather_table_path
    );

    if catalogue.seeds.is_empty() {
        *catalogue = default_seed_catalogue();
    }
    info!("  Seeds loaded: {}", catalogue.seeds.len());

    if let Some(seed) = config.rng_seed {
        commands.insert_resource(SessionRng::seeded(seed));
        info!("  Session RNG seeded with {}", seed);
    }

    info!("DataPlugin: ready. Transitioning to MainMenu.");
    next_state.set(GameState::MainMenu);
}
