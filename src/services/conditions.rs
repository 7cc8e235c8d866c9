//! Assemble a `ConditionSet` from weather and hydrology.
//!
//! Weather supplies wind, cloud and pressure for one snapshot hour. Water
//! temperature comes from the nearest gauge when one reports it, otherwise it
//! is estimated from the day's air temperature and flagged as such.

use chrono::{DateTime, FixedOffset, NaiveDate, NaiveTime, TimeZone, Utc};

use crate::advisor::{ConditionSet, HourlyRecord};
use crate::helpers::{hpa_to_inhg, round_1dp};
use crate::services::usgs::HydroSnapshot;

/// Water near the surface does not stay far below freezing or climb much
/// past hot-tub air; estimates are clamped to this range (°F).
const ESTIMATE_MIN_F: f64 = 33.0;
const ESTIMATE_MAX_F: f64 = 90.0;

/// Local hour used for days other than today.
const SNAPSHOT_LOCAL_HOUR: u32 = 12;

/// Time the conditions describe.
///
/// Today (in the site's local offset) uses `now`; any other date uses local
/// noon of that date.
pub fn snapshot_time(date: NaiveDate, offset: FixedOffset, now: DateTime<Utc>) -> DateTime<Utc> {
    if now.with_timezone(&offset).date_naive() == date {
        return now;
    }
    let noon = date.and_time(NaiveTime::from_hms_opt(SNAPSHOT_LOCAL_HOUR, 0, 0).unwrap_or_default());
    offset
        .from_local_datetime(&noon)
        .single()
        .map(|dt| dt.with_timezone(&Utc))
        .unwrap_or_else(|| DateTime::from_naive_utc_and_offset(noon, Utc))
}

/// Hourly record closest to `at`. On an exact tie the earlier record wins.
pub fn nearest_hour(hourly: &[HourlyRecord], at: DateTime<Utc>) -> Option<&HourlyRecord> {
    let target = at.timestamp();
    hourly
        .iter()
        .min_by_key(|h| (h.time.timestamp() - target).unsigned_abs())
}

/// Water temperature estimate from the mean of the day's known air
/// temperatures. `None` when the day has no air temperature at all.
pub fn estimate_water_temp_f(hourly: &[HourlyRecord]) -> Option<f64> {
    let temps: Vec<f64> = hourly
        .iter()
        .filter_map(|h| h.air_temp_f)
        .filter(|t| t.is_finite())
        .collect();
    if temps.is_empty() {
        return None;
    }
    let mean = temps.iter().sum::<f64>() / temps.len() as f64;
    Some(round_1dp(mean.clamp(ESTIMATE_MIN_F, ESTIMATE_MAX_F)))
}

pub fn build_conditions(
    hourly: &[HourlyRecord],
    at: DateTime<Utc>,
    hydro: &HydroSnapshot,
) -> ConditionSet {
    let hour = nearest_hour(hourly, at);

    let (water_temp_f, estimated) = match hydro.water_temp_f {
        Some(t) => (Some(round_1dp(t)), false),
        None => (estimate_water_temp_f(hourly), true),
    };

    ConditionSet {
        water_temp_f,
        wind_mph: hour.and_then(|h| h.wind_mph),
        cloud_pct: hour.and_then(|h| h.cloud_pct),
        barometer_inhg: hour
            .and_then(|h| h.pressure_msl_hpa)
            .map(|p| (hpa_to_inhg(p) * 100.0).round() / 100.0),
        turbidity_fnu: hydro.turbidity_fnu,
        estimated,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn utc(s: &str) -> DateTime<Utc> {
        s.parse::<DateTime<Utc>>().unwrap()
    }

    fn hour(time: &str, air: Option<f64>) -> HourlyRecord {
        HourlyRecord {
            time: utc(time),
            air_temp_f: air,
            wind_mph: Some(5.0),
            cloud_pct: Some(40.0),
            pressure_msl_hpa: Some(1013.25),
        }
    }

    fn pacific() -> FixedOffset {
        FixedOffset::west_opt(7 * 3600).unwrap()
    }

    #[test]
    fn test_snapshot_today_uses_now() {
        let now = utc("2026-06-01T18:20:00Z"); // 11:20 local
        let date = NaiveDate::from_ymd_opt(2026, 6, 1).unwrap();
        assert_eq!(snapshot_time(date, pacific(), now), now);
    }

    #[test]
    fn test_snapshot_other_day_uses_local_noon() {
        let now = utc("2026-06-01T18:20:00Z");
        let date = NaiveDate::from_ymd_opt(2026, 6, 3).unwrap();
        assert_eq!(
            snapshot_time(date, pacific(), now),
            utc("2026-06-03T19:00:00Z")
        );
    }

    #[test]
    fn test_snapshot_today_is_local_date() {
        // 02:00 UTC on the 2nd is still the 1st in Pacific time.
        let now = utc("2026-06-02T02:00:00Z");
        let date = NaiveDate::from_ymd_opt(2026, 6, 1).unwrap();
        assert_eq!(snapshot_time(date, pacific(), now), now);
    }

    #[test]
    fn test_nearest_hour_tie_picks_first() {
        let hourly = vec![
            hour("2026-06-01T07:00:00Z", Some(50.0)),
            hour("2026-06-01T08:00:00Z", Some(52.0)),
        ];
        let h = nearest_hour(&hourly, utc("2026-06-01T07:30:00Z")).unwrap();
        assert_eq!(h.air_temp_f, Some(50.0));
        assert!(nearest_hour(&[], utc("2026-06-01T07:30:00Z")).is_none());
    }

    #[test]
    fn test_estimate_is_mean_of_known_air_temps() {
        let hourly = vec![
            hour("2026-06-01T07:00:00Z", Some(50.0)),
            hour("2026-06-01T08:00:00Z", None),
            hour("2026-06-01T09:00:00Z", Some(61.0)),
        ];
        assert_eq!(estimate_water_temp_f(&hourly), Some(55.5));
        assert_eq!(estimate_water_temp_f(&[hour("2026-06-01T07:00:00Z", None)]), None);
    }

    #[test]
    fn test_estimate_is_clamped() {
        let frigid = vec![hour("2026-01-01T07:00:00Z", Some(-10.0))];
        assert_eq!(estimate_water_temp_f(&frigid), Some(33.0));
        let scorching = vec![hour("2026-07-01T07:00:00Z", Some(118.0))];
        assert_eq!(estimate_water_temp_f(&scorching), Some(90.0));
    }

    #[test]
    fn test_measured_water_temp_wins() {
        let hourly = vec![hour("2026-06-01T07:00:00Z", Some(70.0))];
        let hydro = HydroSnapshot {
            water_temp_f: Some(55.04),
            turbidity_fnu: Some(3.0),
            ..HydroSnapshot::default()
        };
        let c = build_conditions(&hourly, utc("2026-06-01T07:00:00Z"), &hydro);
        assert_eq!(c.water_temp_f, Some(55.0));
        assert!(!c.estimated);
        assert_eq!(c.turbidity_fnu, Some(3.0));
        assert_eq!(c.wind_mph, Some(5.0));
        assert_eq!(c.cloud_pct, Some(40.0));
        assert_eq!(c.barometer_inhg, Some(29.92));
    }

    #[test]
    fn test_missing_hydro_estimates_and_leaves_turbidity_unknown() {
        let hourly = vec![hour("2026-06-01T07:00:00Z", Some(64.0))];
        let c = build_conditions(&hourly, utc("2026-06-01T07:00:00Z"), &HydroSnapshot::default());
        assert_eq!(c.water_temp_f, Some(64.0));
        assert!(c.estimated);
        assert_eq!(c.turbidity_fnu, None);
    }

    #[test]
    fn test_no_weather_at_all() {
        let c = build_conditions(&[], utc("2026-06-01T07:00:00Z"), &HydroSnapshot::default());
        assert_eq!(c, ConditionSet { estimated: true, ..ConditionSet::default() });
    }
}
