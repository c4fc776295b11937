//! Weather-driven session difficulty.
//!
//! Picks one high-heat observation from the weather table and turns its
//! temperature into the session's countdown length and plant quota. The
//! pick and the derivation are plain functions; [`WeatherSelection`] is the
//! resource the rest of the game reads them from.

pub mod difficulty;
pub mod reservoir;

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::PathBuf;

use bevy::prelude::*;
use rand::Rng;

use crate::shared::*;

/// Bundled copy of the table for builds without a filesystem.
#[cfg(target_arch = "wasm32")]
pub const EMBEDDED_WEATHER_TABLE: &str = include_str!("../../assets/data/weather_data.csv");

/// Where the weather table is read from.
#[derive(Debug, Clone)]
pub enum WeatherSource {
    File(PathBuf),
    Text(String),
}

impl WeatherSource {
    /// The table the config points at (the embedded copy on wasm).
    pub fn from_config(config: &GameConfig) -> Self {
        #[cfg(target_arch = "wasm32")]
        {
            let _ = config;
            WeatherSource::Text(EMBEDDED_WEATHER_TABLE.to_string())
        }
        #[cfg(not(target_arch = "wasm32"))]
        {
            WeatherSource::File(PathBuf::from(&config.weather_table_path))
        }
    }

    /// Open the source for line-by-line reading. Absent or empty sources
    /// are errors so callers can fall back to defaults.
    pub fn open(&self) -> Result<Box<dyn BufRead + '_>, String> {
        match self {
            WeatherSource::File(path) => {
                let file = File::open(path)
                    .map_err(|e| format!("Could not open {}: {}", path.display(), e))?;
                let len = file
                    .metadata()
                    .map_err(|e| format!("Could not stat {}: {}", path.display(), e))?
                    .len();
                if len == 0 {
                    return Err(format!("{} is empty", path.display()));
                }
                Ok(Box::new(BufReader::new(file)))
            }
            WeatherSource::Text(text) => {
                if text.trim().is_empty() {
                    return Err("weather table text is empty".to_string());
                }
                Ok(Box::new(text.as_bytes()))
            }
        }
    }
}

impl WeatherSelection {
    pub fn has_selection(&self) -> bool {
        self.sample.is_some()
    }

    pub fn duration_secs(&self) -> f32 {
        self.params.duration_secs
    }

    pub fn target_plant_count(&self) -> u32 {
        self.params.target_plant_count
    }

    /// Drop any pick and go back to the default 60 s / 10 plant session.
    pub fn reset(&mut self) {
        self.sample = None;
        self.params = DifficultyParameters::default();
        self.info.clear();
    }

    /// Pick a sample and derive the session parameters from it.
    ///
    /// Without `force_reselect` only the first call does any work. With it,
    /// the previous pick is cleared and a new one is drawn. Any failure
    /// (missing table, nothing hot enough) leaves the defaults in place.
    /// Returns whether a sample is selected afterwards.
    pub fn initialize<R: Rng + ?Sized>(
        &mut self,
        source: &WeatherSource,
        heat_threshold_c: f32,
        curve: &DifficultyCurve,
        rng: &mut R,
        force_reselect: bool,
    ) -> bool {
        if self.initialized && !force_reselect {
            return self.has_selection();
        }
        self.initialized = true;

        if force_reselect {
            self.reset();
        }

        let reader = match source.open() {
            Ok(reader) => reader,
            Err(e) => {
                warn!("WeatherConfig: could not load weather table ({}); using defaults.", e);
                return false;
            }
        };

        let scan = reservoir::scan_table(reader, heat_threshold_c, rng);
        let Some(sample) = scan.sample else {
            warn!(
                "WeatherConfig: no rows at or above {:.1}°C; using defaults.",
                heat_threshold_c
            );
            return false;
        };

        self.params = difficulty::derive_with_curve(&sample, heat_threshold_c, curve);
        self.info = summary(&sample, &self.params);
        debug!(
            "WeatherConfig: picked 1 of {} high-heat rows ({} malformed skipped).",
            scan.matched, scan.malformed
        );
        info!("WeatherConfig: {}", self.info);
        self.sample = Some(sample);
        true
    }
}

/// One-line description of the pick shown on the HUD and end screens.
pub fn summary(sample: &WeatherSample, params: &DifficultyParameters) -> String {
    format!(
        "{} {} | {:.1}°C | Plants: {} | Duration: {}s",
        sample.location,
        sample.timestamp,
        sample.temperature_c,
        params.target_plant_count,
        params.duration_secs.round_ties_even() as i64
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    const TABLE: &str = "Location,Date_Time,Temperature_C,Humidity_pct,Precipitation_mm,Wind_Speed_kmh\n\
                         Mild,2024-05-01,22.0,40,0,8\n\
                         Scorch,2024-07-14 15:00,40.0,12,0,14\n";

    fn text(s: &str) -> WeatherSource {
        WeatherSource::Text(s.to_string())
    }

    #[test]
    fn empty_source_keeps_defaults() {
        let mut selection = WeatherSelection::default();
        let mut rng = StdRng::seed_from_u64(0);
        let picked =
            selection.initialize(&text(""), 35.0, &DifficultyCurve::default(), &mut rng, false);

        assert!(!picked);
        assert!(!selection.has_selection());
        assert!(selection.initialized);
        assert_eq!(selection.duration_secs(), 60.0);
        assert_eq!(selection.target_plant_count(), 10);
        assert!(selection.info.is_empty());
    }

    #[test]
    fn missing_file_keeps_defaults() {
        let mut selection = WeatherSelection::default();
        let mut rng = StdRng::seed_from_u64(0);
        let source = WeatherSource::File(PathBuf::from("definitely/not/here/weather.csv"));
        assert!(!selection.initialize(&source, 35.0, &DifficultyCurve::default(), &mut rng, true));
        assert_eq!(selection.params, DifficultyParameters::default());
    }

    #[test]
    fn hot_row_drives_parameters_and_summary() {
        let mut selection = WeatherSelection::default();
        let mut rng = StdRng::seed_from_u64(0);
        assert!(selection.initialize(&text(TABLE), 35.0, &DifficultyCurve::default(), &mut rng, false));

        assert_eq!(selection.sample.as_ref().map(|s| s.location.as_str()), Some("Scorch"));
        assert_eq!(selection.target_plant_count(), 14);
        assert!((selection.duration_secs() - 60.0).abs() < 1e-4);
        assert_eq!(
            selection.info,
            "Scorch 2024-07-14 15:00 | 40.0°C | Plants: 14 | Duration: 60s"
        );
    }

    #[test]
    fn half_second_duration_rounds_to_even_in_summary() {
        let mut selection = WeatherSelection::default();
        let mut rng = StdRng::seed_from_u64(0);
        let table = text("h\nCityX,2024-01-01,36.5,50,0,10\n");
        assert!(selection.initialize(&table, 35.0, &DifficultyCurve::default(), &mut rng, false));

        assert!((selection.duration_secs() - 70.5).abs() < 1e-4);
        assert_eq!(selection.target_plant_count(), 10);
        assert_eq!(
            selection.info,
            "CityX 2024-01-01 | 36.5°C | Plants: 10 | Duration: 70s"
        );
    }

    #[test]
    fn first_initialize_wins_unless_forced() {
        let mut selection = WeatherSelection::default();
        let mut rng = StdRng::seed_from_u64(0);
        let curve = DifficultyCurve::default();
        selection.initialize(&text(TABLE), 35.0, &curve, &mut rng, false);

        let other = text("h\nBlaze,2024-08-01,45,0,0,0\n");
        selection.initialize(&other, 35.0, &curve, &mut rng, false);
        assert_eq!(selection.sample.as_ref().map(|s| s.location.as_str()), Some("Scorch"));

        selection.initialize(&other, 35.0, &curve, &mut rng, true);
        assert_eq!(selection.sample.as_ref().map(|s| s.location.as_str()), Some("Blaze"));
        assert_eq!(selection.target_plant_count(), 20);
    }

    #[test]
    fn forced_reselect_with_no_hot_rows_clears_previous_pick() {
        let mut selection = WeatherSelection::default();
        let mut rng = StdRng::seed_from_u64(0);
        let curve = DifficultyCurve::default();
        selection.initialize(&text(TABLE), 35.0, &curve, &mut rng, true);
        assert!(selection.has_selection());

        selection.initialize(&text("h\nCold,2024-01-01,2,90,4,20\n"), 35.0, &curve, &mut rng, true);
        assert!(!selection.has_selection());
        assert_eq!(selection.params, DifficultyParameters::default());
        assert!(selection.info.is_empty());
    }
}
