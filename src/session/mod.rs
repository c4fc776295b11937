//! Session domain — weather pick at session start, the countdown, and the
//! win / time-out resolution.

pub mod timer;

use bevy::prelude::*;
use crate::shared::*;
use crate::weather::WeatherSource;

pub struct SessionPlugin;

impl Plugin for SessionPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<WeatherSelection>()
            .init_resource::<SessionRng>()
            .init_resource::<SessionTimer>()
            .init_resource::<SessionStats>()
            .add_systems(OnEnter(GameState::Playing), start_session)
            .add_systems(
                Update,
                (tick_session_timer, count_collected_plants, resolve_session_end)
                    .chain()
                    .run_if(in_state(GameState::Playing)),
            );
    }
}

/// Plants needed to win: the weather pick's quota, or the configured
/// fallback when nothing was picked. Never less than one.
pub fn required_plants(selection: &WeatherSelection, config: &GameConfig) -> u32 {
    let target = if selection.has_selection() {
        selection.target_plant_count()
    } else {
        config.fallback_target_plants
    };
    target.max(1)
}

/// Fresh weather pick for every play-through, then arm the countdown.
pub fn start_session(
    config: Res<GameConfig>,
    mut selection: ResMut<WeatherSelection>,
    mut rng: ResMut<SessionRng>,
    mut timer: ResMut<SessionTimer>,
    mut stats: ResMut<SessionStats>,
    mut started: EventWriter<SessionStartedEvent>,
) {
    let source = WeatherSource::from_config(&config);
    let picked = selection.initialize(
        &source,
        config.heat_threshold_c,
        &config.difficulty,
        &mut rng.0,
        true,
    );

    let duration = if picked {
        selection.duration_secs()
    } else {
        self::timer::parse_time_label(&config.fallback_timer_label)
    };
    timer.start(duration);

    *stats = SessionStats {
        collected: 0,
        required: required_plants(&selection, &config),
        outcome: None,
    };

    info!(
        "Session: started, {:.0}s on the clock, {} plants to collect.",
        duration, stats.required
    );

    started.send(SessionStartedEvent {
        params: picked.then_some(selection.params),
    });
}

pub fn tick_session_timer(time: Res<Time>, mut timer: ResMut<SessionTimer>) {
    timer.tick(time.delta_secs());
}

pub fn count_collected_plants(
    mut events: EventReader<PlantCollectedEvent>,
    mut stats: ResMut<SessionStats>,
) {
    for _event in events.read() {
        stats.collected += 1;
    }
}

/// Decide whether the session is over. Reaching the quota wins even on the
/// frame the clock runs out.
pub fn resolve_session_end(
    config: Res<GameConfig>,
    selection: Res<WeatherSelection>,
    mut timer: ResMut<SessionTimer>,
    mut stats: ResMut<SessionStats>,
    mut end_events: EventWriter<SessionEndEvent>,
    mut next_state: ResMut<NextState<GameState>>,
) {
    if stats.outcome.is_some() {
        return;
    }

    // The quota is re-read here so a late weather pick is never missed.
    stats.required = required_plants(&selection, &config);

    let outcome = if stats.collected >= stats.required {
        SessionOutcome::Won
    } else if timer.is_expired() {
        SessionOutcome::TimedOut
    } else {
        return;
    };

    timer.running = false;
    stats.outcome = Some(outcome);
    info!(
        "Session: {:?} with {}/{} plants collected.",
        outcome, stats.collected, stats.required
    );

    end_events.send(SessionEndEvent {
        outcome,
        collected: stats.collected,
        required: stats.required,
        duration_secs: timer.duration_secs,
        sample: selection.sample.clone(),
    });

    next_state.set(match outcome {
        SessionOutcome::Won => GameState::Victory,
        SessionOutcome::TimedOut => GameState::GameOver,
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn required_plants_prefers_selection() {
        let config = GameConfig {
            fallback_target_plants: 7,
            ..Default::default()
        };
        let mut selection = WeatherSelection::default();
        assert_eq!(required_plants(&selection, &config), 7);

        selection.sample = Some(WeatherSample::default());
        selection.params.target_plant_count = 16;
        assert_eq!(required_plants(&selection, &config), 16);
    }

    #[test]
    fn required_plants_is_at_least_one() {
        let config = GameConfig {
            fallback_target_plants: 0,
            ..Default::default()
        };
        assert_eq!(required_plants(&WeatherSelection::default(), &config), 1);
    }
}
