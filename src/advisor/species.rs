//! Species → thermal band classification.

use super::models::ThermalBand;

/// Ordered keyword rules. The first rule with a matching keyword wins;
/// anything unmatched falls through to `ThermalBand::Warm`.
const BAND_RULES: &[(&[&str], ThermalBand)] = &[
    (
        &["trout", "salmon", "grayling", "whitefish", "steelhead", "kokanee"],
        ThermalBand::Cold,
    ),
    (
        &["walleye", "sauger", "pike", "musk", "pickerel"],
        ThermalBand::Cool,
    ),
];

/// Species offered in the picker. Free text is accepted everywhere; this is
/// only the suggested list.
pub const CURATED_SPECIES: &[&str] = &[
    "Rainbow Trout",
    "Brown Trout",
    "Brook Trout",
    "Lake Trout",
    "Cutthroat Trout",
    "Steelhead",
    "Chinook Salmon",
    "Coho Salmon",
    "Kokanee",
    "Arctic Grayling",
    "Mountain Whitefish",
    "Walleye",
    "Sauger",
    "Northern Pike",
    "Muskellunge",
    "Chain Pickerel",
    "Largemouth Bass",
    "Smallmouth Bass",
    "Spotted Bass",
    "Striped Bass",
    "Bluegill",
    "Crappie",
    "Yellow Perch",
    "Channel Catfish",
    "Flathead Catfish",
    "Common Carp",
];

/// Classify a free-text species name. Total: unknown or empty names are warm.
pub fn classify(species: &str) -> ThermalBand {
    let lower = species.to_lowercase();
    BAND_RULES
        .iter()
        .find(|(keywords, _)| keywords.iter().any(|k| lower.contains(k)))
        .map(|(_, band)| *band)
        .unwrap_or(ThermalBand::Warm)
}

/// Pike and muskellunge need a heavy rod whatever their band says.
pub fn is_toothy(species: &str) -> bool {
    let lower = species.to_lowercase();
    lower.contains("pike") || lower.contains("musk")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cold_species() {
        assert_eq!(classify("Rainbow Trout"), ThermalBand::Cold);
        assert_eq!(classify("RAINBOW TROUT"), ThermalBand::Cold);
        assert_eq!(classify("rainbow trout (wild)"), ThermalBand::Cold);
        assert_eq!(classify("Chinook Salmon"), ThermalBand::Cold);
        assert_eq!(classify("Arctic Grayling"), ThermalBand::Cold);
        assert_eq!(classify("Steelhead"), ThermalBand::Cold);
        assert_eq!(classify("kokanee"), ThermalBand::Cold);
        assert_eq!(classify("Lake Whitefish"), ThermalBand::Cold);
    }

    #[test]
    fn test_cool_species() {
        assert_eq!(classify("Walleye"), ThermalBand::Cool);
        assert_eq!(classify("Sauger"), ThermalBand::Cool);
        assert_eq!(classify("Northern Pike"), ThermalBand::Cool);
        assert_eq!(classify("Muskellunge"), ThermalBand::Cool);
        assert_eq!(classify("musky"), ThermalBand::Cool);
        assert_eq!(classify("Tiger Muskie"), ThermalBand::Cool);
        assert_eq!(classify("Chain Pickerel"), ThermalBand::Cool);
    }

    #[test]
    fn test_warm_is_the_default() {
        assert_eq!(classify("Largemouth Bass"), ThermalBand::Warm);
        assert_eq!(classify("Bluegill"), ThermalBand::Warm);
        assert_eq!(classify("Channel Catfish"), ThermalBand::Warm);
        assert_eq!(classify("Common Carp"), ThermalBand::Warm);
        assert_eq!(classify(""), ThermalBand::Warm);
        assert_eq!(classify("zzqx"), ThermalBand::Warm);
    }

    #[test]
    fn test_cold_rule_wins_over_cool() {
        // Both vocabularies match; rule order decides.
        assert_eq!(classify("trout-pike hybrid"), ThermalBand::Cold);
    }

    #[test]
    fn test_curated_list_covers_every_band() {
        let bands: Vec<ThermalBand> = CURATED_SPECIES.iter().map(|s| classify(s)).collect();
        assert!(bands.contains(&ThermalBand::Cold));
        assert!(bands.contains(&ThermalBand::Cool));
        assert!(bands.contains(&ThermalBand::Warm));
    }

    #[test]
    fn test_toothy_species() {
        assert!(is_toothy("Northern Pike"));
        assert!(is_toothy("MUSKELLUNGE"));
        assert!(!is_toothy("Walleye"));
        assert!(!is_toothy("Chain Pickerel"));
    }
}
