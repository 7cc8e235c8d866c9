//! Unit conversions and small numeric helpers shared by the clients.
//!
//! The scoring core works in US units (°F, mph, inHg) while several upstream
//! sources report metric. Conversions live here so every client converts the
//! same way.

/// Standard inches of mercury per hectopascal.
const INHG_PER_HPA: f64 = 0.029_529_983_071_4;

const EARTH_RADIUS_KM: f64 = 6371.0;

pub(crate) fn celsius_to_fahrenheit(c: f64) -> f64 {
    c * 9.0 / 5.0 + 32.0
}

pub(crate) fn hpa_to_inhg(hpa: f64) -> f64 {
    hpa * INHG_PER_HPA
}

/// Great-circle distance in kilometres.
pub(crate) fn haversine_km(lat1: f64, lon1: f64, lat2: f64, lon2: f64) -> f64 {
    let d_lat = (lat2 - lat1).to_radians();
    let d_lon = (lon2 - lon1).to_radians();
    let a = (d_lat / 2.0).sin().powi(2)
        + lat1.to_radians().cos() * lat2.to_radians().cos() * (d_lon / 2.0).sin().powi(2);
    2.0 * EARTH_RADIUS_KM * a.sqrt().asin()
}

/// Round to one decimal place. Non-finite values pass through unchanged.
pub(crate) fn round_1dp(v: f64) -> f64 {
    if !v.is_finite() {
        return v;
    }
    (v * 10.0).round() / 10.0
}

/// Build a cache fingerprint from a source name and coordinates rounded to
/// 4 decimal places (~11 m), plus any extra discriminator.
pub(crate) fn location_key(source: &str, lat: f64, lon: f64, extra: &str) -> String {
    format!("{}:{:.4}:{:.4}:{}", source, lat, lon, extra)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_celsius_to_fahrenheit() {
        assert_eq!(celsius_to_fahrenheit(0.0), 32.0);
        assert_eq!(celsius_to_fahrenheit(100.0), 212.0);
        assert!((celsius_to_fahrenheit(12.2) - 53.96).abs() < 1e-10);
    }

    #[test]
    fn test_hpa_to_inhg() {
        assert!((hpa_to_inhg(1013.25) - 29.92).abs() < 0.01);
        assert!((hpa_to_inhg(1014.2) - 29.95).abs() < 0.01);
    }

    #[test]
    fn test_haversine_zero_distance() {
        assert_eq!(haversine_km(41.6, -87.5, 41.6, -87.5), 0.0);
    }

    #[test]
    fn test_haversine_one_degree_latitude() {
        let d = haversine_km(40.0, -90.0, 41.0, -90.0);
        assert!((d - 111.19).abs() < 0.1, "got {}", d);
    }

    #[test]
    fn test_round_1dp() {
        assert_eq!(round_1dp(3.14), 3.1);
        assert_eq!(round_1dp(3.16), 3.2);
        assert!(round_1dp(f64::NAN).is_nan());
    }

    #[test]
    fn test_location_key_rounds_coordinates() {
        assert_eq!(
            location_key("open-meteo", 39.096_849_1, -120.032_417, "2026-06-01"),
            "open-meteo:39.0968:-120.0324:2026-06-01"
        );
        assert_eq!(
            location_key("usgs", 39.096_841, -120.032_42, ""),
            location_key("usgs", 39.096_839, -120.032_418, "")
        );
    }
}
