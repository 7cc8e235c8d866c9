//! Plain-text rendering of an advisory for the terminal.

use chrono::{DateTime, FixedOffset, Offset, Utc};
use std::fmt::Write;

use crate::advisor::ConditionSet;
use crate::services::advisory::Advisory;

const UNKNOWN: &str = "unknown";

fn local(offset: FixedOffset, time: DateTime<Utc>) -> String {
    time.with_timezone(&offset).format("%H:%M").to_string()
}

fn reading(value: Option<f64>, unit: &str, decimals: usize) -> String {
    match value {
        Some(v) if v.is_finite() => format!("{:.*}{}", decimals, v, unit),
        _ => UNKNOWN.to_string(),
    }
}

fn water_temp_line(conditions: &ConditionSet) -> String {
    let temp = reading(conditions.water_temp_f, "°F", 1);
    if conditions.estimated && conditions.water_temp_f.is_some() {
        format!("{} (estimated from air temperature)", temp)
    } else {
        temp
    }
}

fn bullet_list(out: &mut String, title: &str, items: &[String]) {
    let _ = writeln!(out, "  {}:", title);
    for item in items {
        let _ = writeln!(out, "    - {}", item);
    }
}

pub fn render_text(advisory: &Advisory) -> String {
    let offset = FixedOffset::east_opt(advisory.utc_offset_seconds).unwrap_or(Utc.fix());
    let c = &advisory.conditions;
    let mut out = String::new();

    let _ = writeln!(
        out,
        "{} at {} ({}) on {}",
        advisory.species, advisory.site.name, advisory.site.kind, advisory.date
    );
    let _ = writeln!(out, "Thermal band: {}", advisory.band);

    match advisory.score {
        Some(score) => {
            let _ = writeln!(out, "Success score: {}/100", score);
        }
        None => {
            let _ = writeln!(out, "Success score: n/a");
        }
    }

    let b = &advisory.breakdown;
    let _ = writeln!(
        out,
        "  temperature {:.1}, wind {:.1}, cloud {:.1}, pressure {:.1}, turbidity {:.1}",
        b.temperature, b.wind, b.cloud, b.pressure, b.turbidity
    );

    let _ = writeln!(out);
    let _ = writeln!(
        out,
        "Conditions at {} local:",
        local(offset, advisory.snapshot_time)
    );
    let _ = writeln!(out, "  Water temperature: {}", water_temp_line(c));
    let _ = writeln!(out, "  Wind: {}", reading(c.wind_mph, " mph", 0));
    let _ = writeln!(out, "  Cloud cover: {}", reading(c.cloud_pct, "%", 0));
    let _ = writeln!(out, "  Barometer: {}", reading(c.barometer_inhg, " inHg", 2));
    let _ = writeln!(out, "  Turbidity: {}", reading(c.turbidity_fnu, " FNU", 1));

    if let Some(gauge) = &advisory.hydro.temperature_gauge {
        let _ = writeln!(
            out,
            "  Gauge: {} ({}), {:.1} km away",
            gauge.site_name, gauge.site_code, gauge.distance_km
        );
    }

    let g = &advisory.gear;
    let _ = writeln!(out);
    let _ = writeln!(out, "Gear:");
    let _ = writeln!(out, "  Rod and line: {}", g.rod_and_line);
    bullet_list(&mut out, "Lures", &g.lures);
    bullet_list(&mut out, "Flies", &g.flies);
    let _ = writeln!(out, "  Fly setup: {}", g.fly_setup);
    let _ = writeln!(out, "  Presentation: {}", g.fly_presentation);
    bullet_list(&mut out, "Where to fish", &g.locations);

    let _ = writeln!(out);
    let sunrise = advisory.sun.sunrise.map(|t| local(offset, t));
    let sunset = advisory.sun.sunset.map(|t| local(offset, t));
    let _ = writeln!(
        out,
        "Sunrise {}, sunset {}",
        sunrise.as_deref().unwrap_or(UNKNOWN),
        sunset.as_deref().unwrap_or(UNKNOWN)
    );

    if advisory.best_times.is_empty() {
        let _ = writeln!(out, "Best times: none stand out");
    } else {
        let _ = writeln!(out, "Best times:");
        for window in &advisory.best_times {
            let _ = writeln!(out, "  {}  {:>3}", local(offset, window.time), window.score);
        }
    }

    out
}
