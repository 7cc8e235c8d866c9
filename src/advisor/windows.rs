//! Feeding-window ranking over one day of hourly weather.

use chrono::{DateTime, Utc};

use super::models::{DaySunEvents, HourlyRecord, TimeWindow};

/// Hours considered (one calendar day).
const HOURS_PER_DAY: usize = 24;
/// Maximum number of windows returned.
const MAX_WINDOWS: usize = 6;
/// Hours below this are not worth surfacing.
const MIN_WINDOW_SCORE: u8 = 10;

const WIND_PEAK_MPH: f64 = 6.0;
const WIND_CUTOFF_MPH: f64 = 10.0;
const CLOUD_BAND_PCT: (f64, f64) = (30.0, 80.0);
const CLOUD_IN_BAND: f64 = 5.0;
const CLOUD_OUT_OF_BAND: f64 = 2.0;
const SUN_EVENT_BONUS: f64 = 8.0;
const SUN_EVENT_REACH_MINUTES: i64 = 90;

fn near(time: DateTime<Utc>, event: Option<DateTime<Utc>>) -> bool {
    event.is_some_and(|e| (time - e).num_seconds().abs() <= SUN_EVENT_REACH_MINUTES * 60)
}

/// Heuristic feeding score for one hour, `0..=100`.
pub fn hour_score(sun: &DaySunEvents, hour: &HourlyRecord) -> u8 {
    let mut score = 0.0;

    if let Some(w) = hour.wind_mph.filter(|w| w.is_finite()) {
        if w <= WIND_CUTOFF_MPH {
            score += WIND_CUTOFF_MPH - (w - WIND_PEAK_MPH).abs();
        }
    }

    let in_cloud_band = hour
        .cloud_pct
        .is_some_and(|c| (CLOUD_BAND_PCT.0..=CLOUD_BAND_PCT.1).contains(&c));
    score += if in_cloud_band {
        CLOUD_IN_BAND
    } else {
        CLOUD_OUT_OF_BAND
    };

    // Sunrise and sunset bonuses stack when the day is short.
    if near(hour.time, sun.sunrise) {
        score += SUN_EVENT_BONUS;
    }
    if near(hour.time, sun.sunset) {
        score += SUN_EVENT_BONUS;
    }

    score.clamp(0.0, 100.0).round() as u8
}

/// Best hours of the day, highest score first, at most six.
///
/// Only the first 24 records are scored. Equal scores keep their input
/// order.
pub fn rank_time_windows(sun: &DaySunEvents, hourly: &[HourlyRecord]) -> Vec<TimeWindow> {
    let mut windows: Vec<TimeWindow> = hourly
        .iter()
        .take(HOURS_PER_DAY)
        .map(|h| TimeWindow {
            time: h.time,
            score: hour_score(sun, h),
        })
        .filter(|w| w.score >= MIN_WINDOW_SCORE)
        .collect();

    // `sort_by` is stable.
    windows.sort_by(|a, b| b.score.cmp(&a.score));
    windows.truncate(MAX_WINDOWS);
    windows
}
