//! Heat → session difficulty. Hotter samples give less time and a larger
//! plant quota.

use crate::shared::{DifficultyCurve, DifficultyParameters, WeatherSample};

/// How far `temperature_c` sits above the threshold, as a fraction of the
/// band width, clamped to `[0, 1]`.
pub fn heat_factor(temperature_c: f32, heat_threshold_c: f32, band_width_c: f32) -> f32 {
    let band = if band_width_c.is_finite() && band_width_c > 0.0 {
        band_width_c
    } else {
        DifficultyCurve::default().band_width_c
    };
    let factor = (temperature_c - heat_threshold_c) / band;
    if factor.is_nan() {
        return 0.0;
    }
    factor.clamp(0.0, 1.0)
}

fn lerp(from: f32, to: f32, t: f32) -> f32 {
    from + (to - from) * t
}

/// Difficulty for `sample` on the default curve.
pub fn derive(sample: &WeatherSample, heat_threshold_c: f32) -> DifficultyParameters {
    derive_with_curve(sample, heat_threshold_c, &DifficultyCurve::default())
}

pub fn derive_with_curve(
    sample: &WeatherSample,
    heat_threshold_c: f32,
    curve: &DifficultyCurve,
) -> DifficultyParameters {
    let factor = heat_factor(sample.temperature_c, heat_threshold_c, curve.band_width_c);

    let mut duration_secs = lerp(curve.cool_duration_secs, curve.hot_duration_secs, factor);
    if !(duration_secs.is_finite() && duration_secs > 0.0) {
        duration_secs = DifficultyParameters::default().duration_secs;
    }

    let target = lerp(curve.cool_target_plants, curve.hot_target_plants, factor).round_ties_even();
    let target_plant_count = if target.is_finite() && target >= 1.0 {
        target as u32
    } else {
        1
    };

    DifficultyParameters {
        duration_secs,
        target_plant_count,
    }
}
