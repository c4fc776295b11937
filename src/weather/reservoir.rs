//! Single-pass uniform pick of one high-heat row from the weather table.
//!
//! Rows are read one line at a time and never collected, so the table can
//! be arbitrarily long. Each qualifying row replaces the held pick with
//! probability `1 / matched`, which leaves every qualifying row equally
//! likely to be the final pick.

use std::io::BufRead;

use rand::Rng;

use crate::shared::WeatherSample;

/// `location,timestamp,temperatureC,humidityPct,precipitationMm,windSpeedKmh`
pub const WEATHER_FIELD_COUNT: usize = 6;

const TEMPERATURE_FIELD: usize = 2;

/// Holds at most one item out of a stream of offers.
#[derive(Debug, Clone)]
pub struct Reservoir<T> {
    offered: u32,
    held: Option<T>,
}

impl<T> Default for Reservoir<T> {
    fn default() -> Self {
        Self {
            offered: 0,
            held: None,
        }
    }
}

impl<T> Reservoir<T> {
    /// Offer one more candidate. `make` is only called when the candidate
    /// is kept. Returns whether it was kept.
    pub fn offer_with<R, F>(&mut self, rng: &mut R, make: F) -> bool
    where
        R: Rng + ?Sized,
        F: FnOnce() -> T,
    {
        self.offered += 1;
        let keep = rng.gen::<f64>() < 1.0 / f64::from(self.offered);
        if keep {
            self.held = Some(make());
        }
        keep
    }

    pub fn offered(&self) -> u32 {
        self.offered
    }

    pub fn into_inner(self) -> Option<T> {
        self.held
    }
}

/// Outcome of one pass over the weather rows.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct WeatherScan {
    pub sample: Option<WeatherSample>,
    /// Rows at or above the heat threshold.
    pub matched: u32,
    /// Rows dropped for too few fields or an unreadable temperature.
    pub malformed: u32,
}

/// Pick a uniformly random row whose temperature is at least
/// `heat_threshold_c`. The first line of `reader` is the header.
///
/// Returns `None` for an empty source, a source with no qualifying rows,
/// or one whose header cannot be read.
pub fn select<B, R>(reader: B, heat_threshold_c: f32, rng: &mut R) -> Option<WeatherSample>
where
    B: BufRead,
    R: Rng + ?Sized,
{
    scan_table(reader, heat_threshold_c, rng).sample
}

/// Like [`select`], but also reports how many rows matched or were dropped.
pub fn scan_table<B, R>(reader: B, heat_threshold_c: f32, rng: &mut R) -> WeatherScan
where
    B: BufRead,
    R: Rng + ?Sized,
{
    let mut lines = reader.lines();
    match lines.next() {
        Some(Ok(_header)) => {}
        _ => return WeatherScan::default(),
    }
    // A read error mid-stream ends the pass with whatever was seen so far.
    scan_rows(lines.map_while(Result::ok), heat_threshold_c, rng)
}

/// Run the pick over data rows (no header).
pub fn scan_rows<I, R>(rows: I, heat_threshold_c: f32, rng: &mut R) -> WeatherScan
where
    I: IntoIterator,
    I::Item: AsRef<str>,
    R: Rng + ?Sized,
{
    let mut reservoir = Reservoir::default();
    let mut malformed = 0;

    for row in rows {
        let row = row.as_ref();
        let fields: Vec<&str> = row.split(',').collect();
        if fields.len() < WEATHER_FIELD_COUNT {
            malformed += 1;
            continue;
        }
        let Some(temperature_c) = parse_float(fields[TEMPERATURE_FIELD]) else {
            malformed += 1;
            continue;
        };
        if temperature_c < heat_threshold_c {
            continue;
        }

        reservoir.offer_with(rng, || sample_from_fields(&fields, temperature_c));
    }

    WeatherScan {
        matched: reservoir.offered(),
        sample: reservoir.into_inner(),
        malformed,
    }
}

fn sample_from_fields(fields: &[&str], temperature_c: f32) -> WeatherSample {
    WeatherSample {
        location: fields[0].to_string(),
        timestamp: fields[1].to_string(),
        temperature_c,
        humidity_pct: parse_float(fields[3]).unwrap_or(0.0),
        precipitation_mm: parse_float(fields[4]).unwrap_or(0.0),
        wind_speed_kmh: parse_float(fields[5]).unwrap_or(0.0),
    }
}

/// Culture-independent float parse. Non-finite values count as unreadable.
fn parse_float(field: &str) -> Option<f32> {
    field
        .trim()
        .parse::<f32>()
        .ok()
        .filter(|value| value.is_finite())
}
