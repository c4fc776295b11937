//! Run history: every finished session is appended to a small JSON log.
//!
//! Native builds keep `saves/runs.json` next to the executable, the
//! browser build keeps the same JSON in localStorage. Failures are logged
//! and never interrupt play.

use bevy::prelude::*;
#[cfg(not(target_arch = "wasm32"))]
use std::fs;
#[cfg(not(target_arch = "wasm32"))]
use std::path::{Path, PathBuf};
#[cfg(not(target_arch = "wasm32"))]
use std::time::{SystemTime, UNIX_EPOCH};

use crate::shared::*;

/// Oldest runs are dropped past this many.
pub const MAX_RECORDED_RUNS: usize = 100;

#[cfg(target_arch = "wasm32")]
const STORAGE_KEY: &str = "heatwave_harvest.runs";

/// Where the history lives: a file path natively, a localStorage key in
/// the browser.
#[derive(Resource, Debug, Clone)]
pub struct RunHistoryLocation(pub String);

impl Default for RunHistoryLocation {
    #[cfg(not(target_arch = "wasm32"))]
    fn default() -> Self {
        Self(saves_directory().join("runs.json").to_string_lossy().into_owned())
    }

    #[cfg(target_arch = "wasm32")]
    fn default() -> Self {
        Self(STORAGE_KEY.to_string())
    }
}

pub struct SavePlugin;

impl Plugin for SavePlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<RunHistory>()
            .init_resource::<RunHistoryLocation>()
            .add_systems(Startup, load_run_history)
            .add_systems(Update, record_finished_runs);
    }
}

// ═══════════════════════════════════════════════════════════════════════
// RECORDS
// ═══════════════════════════════════════════════════════════════════════

pub fn run_record(event: &SessionEndEvent, timestamp: u64) -> RunRecord {
    RunRecord {
        timestamp,
        outcome: event.outcome,
        collected: event.collected,
        required: event.required,
        duration_secs: event.duration_secs,
        sample: event.sample.clone(),
    }
}

/// Append `record`, dropping the oldest entries beyond [`MAX_RECORDED_RUNS`].
pub fn push_capped(runs: &mut Vec<RunRecord>, record: RunRecord) {
    runs.push(record);
    if runs.len() > MAX_RECORDED_RUNS {
        let excess = runs.len() - MAX_RECORDED_RUNS;
        runs.drain(..excess);
    }
}

pub fn parse_run_history(json: &str) -> Result<Vec<RunRecord>, String> {
    if json.trim().is_empty() {
        return Ok(Vec::new());
    }
    serde_json::from_str(json).map_err(|e| format!("Deserialization failed: {}", e))
}

// ═══════════════════════════════════════════════════════════════════════
// STORAGE — filesystem
// ═══════════════════════════════════════════════════════════════════════

#[cfg(not(target_arch = "wasm32"))]
fn saves_directory() -> PathBuf {
    let exe_dir = std::env::current_exe()
        .ok()
        .and_then(|p| p.parent().map(|p| p.to_path_buf()))
        .unwrap_or_else(|| PathBuf::from("."));
    exe_dir.join("saves")
}

#[cfg(not(target_arch = "wasm32"))]
fn current_timestamp() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0)
}

/// A missing file is an empty history.
#[cfg(not(target_arch = "wasm32"))]
pub fn read_run_history(path: &Path) -> Result<Vec<RunRecord>, String> {
    if !path.exists() {
        return Ok(Vec::new());
    }
    let json = fs::read_to_string(path)
        .map_err(|e| format!("Read failed for {}: {}", path.display(), e))?;
    parse_run_history(&json)
}

/// Write the whole history through a temp file and a rename.
#[cfg(not(target_arch = "wasm32"))]
pub fn write_run_history(path: &Path, runs: &[RunRecord]) -> Result<(), String> {
    if let Some(dir) = path.parent().filter(|dir| !dir.as_os_str().is_empty()) {
        fs::create_dir_all(dir)
            .map_err(|e| format!("Could not create {}: {}", dir.display(), e))?;
    }
    let json =
        serde_json::to_string_pretty(runs).map_err(|e| format!("Serialization failed: {}", e))?;

    let tmp_path = path.with_extension("json.tmp");
    fs::write(&tmp_path, &json)
        .map_err(|e| format!("Write failed for {}: {}", tmp_path.display(), e))?;
    fs::rename(&tmp_path, path).map_err(|e| format!("Rename failed: {}", e))?;
    Ok(())
}

/// Read, append, write back. Returns the new number of stored runs.
/// An unreadable existing file is left alone.
#[cfg(not(target_arch = "wasm32"))]
pub fn append_run_record(path: &Path, record: RunRecord) -> Result<usize, String> {
    let mut runs = read_run_history(path)?;
    push_capped(&mut runs, record);
    write_run_history(path, &runs)?;
    Ok(runs.len())
}

#[cfg(not(target_arch = "wasm32"))]
fn load_from(location: &RunHistoryLocation) -> Result<Vec<RunRecord>, String> {
    read_run_history(Path::new(&location.0))
}

#[cfg(not(target_arch = "wasm32"))]
fn append_to(location: &RunHistoryLocation, record: RunRecord) -> Result<usize, String> {
    append_run_record(Path::new(&location.0), record)
}

// ═══════════════════════════════════════════════════════════════════════
// STORAGE — browser localStorage
// ═══════════════════════════════════════════════════════════════════════

#[cfg(target_arch = "wasm32")]
fn current_timestamp() -> u64 {
    0
}

#[cfg(target_arch = "wasm32")]
fn local_storage() -> Result<web_sys::Storage, String> {
    web_sys::window()
        .ok_or_else(|| "No browser window".to_string())?
        .local_storage()
        .map_err(|e| format!("localStorage unavailable: {:?}", e))?
        .ok_or_else(|| "localStorage unavailable".to_string())
}

#[cfg(target_arch = "wasm32")]
fn load_from(location: &RunHistoryLocation) -> Result<Vec<RunRecord>, String> {
    let stored = local_storage()?
        .get_item(&location.0)
        .map_err(|e| format!("Read failed for {}: {:?}", location.0, e))?;
    parse_run_history(stored.as_deref().unwrap_or(""))
}

#[cfg(target_arch = "wasm32")]
fn append_to(location: &RunHistoryLocation, record: RunRecord) -> Result<usize, String> {
    let mut runs = load_from(location)?;
    push_capped(&mut runs, record);
    let json = serde_json::to_string(&runs).map_err(|e| format!("Serialization failed: {}", e))?;
    local_storage()?
        .set_item(&location.0, &json)
        .map_err(|e| format!("Write failed for {}: {:?}", location.0, e))?;
    Ok(runs.len())
}

// ═══════════════════════════════════════════════════════════════════════
// SYSTEMS
// ═══════════════════════════════════════════════════════════════════════

fn load_run_history(location: Res<RunHistoryLocation>, mut history: ResMut<RunHistory>) {
    match load_from(&location) {
        Ok(runs) => {
            info!("SavePlugin: {} past runs on record.", runs.len());
            history.runs = runs;
        }
        Err(e) => warn!("SavePlugin: could not read run history: {}", e),
    }
}

pub fn record_finished_runs(
    mut events: EventReader<SessionEndEvent>,
    config: Res<GameConfig>,
    location: Res<RunHistoryLocation>,
    mut history: ResMut<RunHistory>,
) {
    for event in events.read() {
        let record = run_record(event, current_timestamp());
        push_capped(&mut history.runs, record.clone());

        if !config.record_runs {
            continue;
        }
        match append_to(&location, record) {
            Ok(count) => debug!("SavePlugin: run recorded ({} on file).", count),
            Err(e) => warn!("SavePlugin: could not record run: {}", e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(outcome: SessionOutcome, collected: u32) -> RunRecord {
        RunRecord {
            timestamp: 1_700_000_000,
            outcome,
            collected,
            required: 10,
            duration_secs: 60.0,
            sample: None,
        }
    }

    #[test]
    fn cap_drops_the_oldest_runs() {
        let mut runs: Vec<RunRecord> = (0..MAX_RECORDED_RUNS as u32)
            .map(|i| record(SessionOutcome::TimedOut, i))
            .collect();
        push_capped(&mut runs, record(SessionOutcome::Won, 999));
        assert_eq!(runs.len(), MAX_RECORDED_RUNS);
        assert_eq!(runs[0].collected, 1);
        assert_eq!(runs.last().map(|r| r.collected), Some(999));
    }

    #[test]
    fn blank_history_is_empty_and_garbage_is_an_error() {
        assert!(parse_run_history("  \n").unwrap().is_empty());
        assert!(parse_run_history("{not json").is_err());
    }

    #[test]
    fn record_copies_the_end_event() {
        let event = SessionEndEvent {
            outcome: SessionOutcome::Won,
            collected: 12,
            required: 12,
            duration_secs: 52.5,
            sample: Some(WeatherSample {
                location: "Phoenix".into(),
                temperature_c: 41.0,
                ..default()
            }),
        };
        let rec = run_record(&event, 7);
        assert_eq!(rec.timestamp, 7);
        assert_eq!(rec.outcome, SessionOutcome::Won);
        assert_eq!(rec.sample.as_ref().map(|s| s.location.as_str()), Some("Phoenix"));
    }

    #[cfg(not(target_arch = "wasm32"))]
    #[test]
    fn append_creates_the_file_and_keeps_order() {
        let dir = std::env::temp_dir().join(format!(
            "heatwave_runs_{}_{}",
            std::process::id(),
            current_timestamp()
        ));
        let path = dir.join("runs.json");

        assert_eq!(append_run_record(&path, record(SessionOutcome::TimedOut, 3)), Ok(1));
        assert_eq!(append_run_record(&path, record(SessionOutcome::Won, 10)), Ok(2));

        let runs = read_run_history(&path).unwrap();
        assert_eq!(runs.len(), 2);
        assert_eq!(runs[0].outcome, SessionOutcome::TimedOut);
        assert_eq!(runs[1].collected, 10);
        assert!(!path.with_extension("json.tmp").exists());

        let _ = fs::remove_dir_all(&dir);
    }

    #[cfg(not(target_arch = "wasm32"))]
    #[test]
    fn corrupt_file_is_not_overwritten() {
        let dir = std::env::temp_dir().join(format!("heatwave_corrupt_{}", std::process::id()));
        fs::create_dir_all(&dir).unwrap();
        let path = dir.join("runs.json");
        fs::write(&path, "[{broken").unwrap();

        assert!(append_run_record(&path, record(SessionOutcome::Won, 10)).is_err());
        assert_eq!(fs::read_to_string(&path).unwrap(), "[{broken");

        let _ = fs::remove_dir_all(&dir);
    }
}
