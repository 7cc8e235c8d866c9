//! Behaviour of the scoring core through the public API only.

use chrono::{DateTime, Duration, Utc};

use fishing_advisor::advisor::species::CURATED_SPECIES;
use fishing_advisor::advisor::{
    classify, rank_time_windows, recommend_gear, success_score, ConditionSet, DaySunEvents,
    HourlyRecord, ThermalBand,
};

fn conditions(temp: f64, wind: f64, cloud: f64, baro: f64, turbidity: f64) -> ConditionSet {
    ConditionSet {
        water_temp_f: Some(temp),
        wind_mph: Some(wind),
        cloud_pct: Some(cloud),
        barometer_inhg: Some(baro),
        turbidity_fnu: Some(turbidity),
        estimated: false,
    }
}

#[test]
fn test_classification_ignores_case_and_decoration() {
    assert_eq!(classify("RAINBOW TROUT"), ThermalBand::Cold);
    assert_eq!(classify("rainbow trout (wild)"), ThermalBand::Cold);
    assert_eq!(classify("Tiger Muskie"), ThermalBand::Cool);
    assert_eq!(classify(""), ThermalBand::Warm);
    assert_eq!(classify("carp"), ThermalBand::Warm);
}

#[test]
fn test_reference_scores() {
    let unknown = ConditionSet::default();
    assert_eq!(
        success_score(Some("Largemouth Bass"), "Lake", Some(&unknown)),
        Some(70)
    );

    let ideal = conditions(54.0, 6.0, 60.0, 29.95, 5.0);
    assert_eq!(success_score(Some("Rainbow Trout"), "Stream", Some(&ideal)), Some(100));

    let adverse = conditions(30.0, 40.0, 0.0, 32.0, 100.0);
    let score = success_score(Some("Largemouth Bass"), "Lake", Some(&adverse)).unwrap();
    assert!(score < 45, "score {}", score);
}

#[test]
fn test_absent_inputs() {
    let c = ConditionSet::default();
    assert_eq!(success_score(None, "Lake", Some(&c)), None);
    assert_eq!(success_score(Some(""), "Lake", Some(&c)), None);
    assert_eq!(success_score(Some("Walleye"), "Lake", None), None);
}

#[test]
fn test_every_curated_species_scores_in_range() {
    let extremes = [
        ConditionSet::default(),
        conditions(-40.0, 0.0, 0.0, 25.0, 0.0),
        conditions(120.0, 90.0, 100.0, 35.0, 1000.0),
    ];
    for species in CURATED_SPECIES {
        for water in ["Lake", "River", "Reservoir", "Small Stream"] {
            for c in &extremes {
                let score = success_score(Some(*species), water, Some(c));
                assert!(matches!(score, Some(s) if s <= 100), "{} {}", species, water);
            }
        }
    }
}

#[test]
fn test_toothy_override_beats_turbidity() {
    let muddy = conditions(60.0, 5.0, 50.0, 29.9, 80.0);
    for species in ["Northern Pike", "Muskellunge", "tiger musky"] {
        for c in [None, Some(&muddy)] {
            let gear = recommend_gear(species, "River", c);
            assert!(gear.rod_and_line.contains("heavy"), "{}", species);
            assert!(gear.rod_and_line.contains("30–60 lb braid"), "{}", species);
        }
    }
}

#[test]
fn test_time_window_contract() {
    let start: DateTime<Utc> = "2026-06-01T00:00:00Z".parse().unwrap();
    let sun = DaySunEvents {
        sunrise: Some(start + Duration::hours(5)),
        sunset: Some(start + Duration::hours(20)),
    };
    let hourly: Vec<HourlyRecord> = (0..30)
        .map(|i| HourlyRecord {
            time: start + Duration::hours(i),
            air_temp_f: None,
            wind_mph: Some((i % 12) as f64),
            cloud_pct: Some(if i % 2 == 0 { 50.0 } else { 95.0 }),
            pressure_msl_hpa: None,
        })
        .collect();

    assert!(rank_time_windows(&sun, &[]).is_empty());

    let windows = rank_time_windows(&sun, &hourly);
    assert!(!windows.is_empty() && windows.len() <= 6);
    assert!(windows.iter().all(|w| w.score >= 10 && w.score <= 100));
    assert!(windows.windows(2).all(|p| p[0].score >= p[1].score));
    assert!(windows
        .iter()
        .all(|w| w.time < start + Duration::hours(24)));
}
