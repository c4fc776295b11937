//! Countdown bookkeeping and the `m:ss:cc` time label.

use crate::shared::{SessionTimer, DEFAULT_DURATION_SECS};

impl SessionTimer {
    pub fn start(&mut self, duration_secs: f32) {
        self.duration_secs = duration_secs;
        self.elapsed_secs = 0.0;
        self.running = true;
    }

    pub fn tick(&mut self, delta_secs: f32) {
        if self.running {
            self.elapsed_secs += delta_secs;
        }
    }

    /// Elapsed share of the session in `[0, 1]`. A non-positive duration
    /// counts as already over.
    pub fn fraction(&self) -> f32 {
        if self.duration_secs > 0.0 {
            (self.elapsed_secs / self.duration_secs).clamp(0.0, 1.0)
        } else {
            1.0
        }
    }

    /// Progress bar value, 0–100.
    pub fn progress_percent(&self) -> f32 {
        self.fraction() * 100.0
    }

    pub fn remaining_secs(&self) -> f32 {
        (self.duration_secs - self.elapsed_secs).max(0.0)
    }

    pub fn is_expired(&self) -> bool {
        self.progress_percent() >= 100.0
    }
}

/// Format seconds as `m:ss:cc` (minutes, seconds, centiseconds).
pub fn format_time_label(remaining_secs: f32) -> String {
    let remaining = remaining_secs.max(0.0);
    let minutes = (remaining / 60.0).floor() as u32;
    let seconds = (remaining % 60.0).floor() as u32;
    let centiseconds = ((remaining - remaining.floor()) * 100.0).floor() as u32;
    format!("{}:{:02}:{:02}", minutes, seconds, centiseconds)
}

/// Parse a `mm:ss:cc` label into seconds. Missing or unreadable parts count
/// as zero; seconds clamp to 0–59 and centiseconds to 0–99. Anything that
/// adds up to no time at all falls back to 60 seconds.
pub fn parse_time_label(label: &str) -> f32 {
    let text = label.trim();
    if text.is_empty() {
        return DEFAULT_DURATION_SECS;
    }

    let mut parts = text.split(':').map(|part| part.trim().parse::<i32>().unwrap_or(0));
    let minutes = parts.next().unwrap_or(0).max(0);
    let seconds = parts.next().unwrap_or(0).clamp(0, 59);
    let centiseconds = parts.next().unwrap_or(0).clamp(0, 99);

    let total = minutes as f32 * 60.0 + seconds as f32 + centiseconds as f32 / 100.0;
    if total <= 0.0 {
        DEFAULT_DURATION_SECS
    } else {
        total
    }
}
