//! Gear recommendation from species, water type and conditions.

use super::models::{is_river_like, ConditionSet, GearRecommendation, ThermalBand};
use super::species::{classify, is_toothy};

/// Turbidity above this reads as stained water (FNU).
const STAINED_FNU: f64 = 15.0;

/// A catalog entry. `Tinted` entries come in a natural colorway for clear
/// water and a bright or loud one for stained water.
#[derive(Debug, Clone, Copy)]
enum Tackle {
    Fixed(&'static str),
    Tinted {
        clear: &'static str,
        stained: &'static str,
    },
}

impl Tackle {
    fn pick(&self, stained: bool) -> &'static str {
        match *self {
            Tackle::Fixed(name) => name,
            Tackle::Tinted { clear, stained: s } => {
                if stained {
                    s
                } else {
                    clear
                }
            }
        }
    }
}

const COLD_LURES: &[Tackle] = &[
    Tackle::Tinted {
        clear: "Inline spinner, silver blade (#1–#2)",
        stained: "Inline spinner, gold or firetiger blade (#2–#3)",
    },
    Tackle::Tinted {
        clear: "Small spoon, natural trout finish",
        stained: "Small spoon, orange or chartreuse",
    },
    Tackle::Fixed("Suspending minnow jerkbait (2–3 in)"),
    Tackle::Fixed("Drift rig with bait or bead"),
];

const COOL_LURES: &[Tackle] = &[
    Tackle::Tinted {
        clear: "Jig and minnow, natural shad or smoke",
        stained: "Jig and minnow, chartreuse or glow",
    },
    Tackle::Tinted {
        clear: "Minnow crankbait, perch or shad pattern",
        stained: "Rattling crankbait, firetiger",
    },
    Tackle::Fixed("Bottom bouncer with spinner harness"),
    Tackle::Tinted {
        clear: "Spoon, silver",
        stained: "Inline bucktail, bright blade",
    },
];

const WARM_LURES: &[Tackle] = &[
    Tackle::Tinted {
        clear: "Soft-plastic worm, green pumpkin",
        stained: "Soft-plastic worm, black and blue",
    },
    Tackle::Tinted {
        clear: "Spinnerbait, silver willow blades",
        stained: "Spinnerbait, gold Colorado blades",
    },
    Tackle::Tinted {
        clear: "Square-bill crankbait, shad",
        stained: "Square-bill crankbait, chartreuse with rattles",
    },
    Tackle::Fixed("Topwater popper or walking bait at low light"),
];

const COLD_FLIES: &[Tackle] = &[
    Tackle::Tinted {
        clear: "Pheasant Tail Nymph (#14–#18)",
        stained: "Copper John, red (#14–#16)",
    },
    Tackle::Tinted {
        clear: "Woolly Bugger, olive",
        stained: "Woolly Bugger, black with flash",
    },
    Tackle::Fixed("Elk Hair Caddis (#14–#16)"),
    Tackle::Tinted {
        clear: "Zebra Midge",
        stained: "Egg pattern, orange",
    },
];

const COOL_FLIES: &[Tackle] = &[
    Tackle::Tinted {
        clear: "Clouser Minnow, olive and white",
        stained: "Clouser Minnow, chartreuse and white",
    },
    Tackle::Tinted {
        clear: "Lefty's Deceiver, white",
        stained: "Lefty's Deceiver, red and yellow with flash",
    },
    Tackle::Fixed("Bunny leech"),
];

const WARM_FLIES: &[Tackle] = &[
    Tackle::Tinted {
        clear: "Deer-hair popper, natural frog",
        stained: "Foam popper, chartreuse",
    },
    Tackle::Tinted {
        clear: "Woolly Bugger, olive",
        stained: "Woolly Bugger, black",
    },
    Tackle::Fixed("Crayfish pattern"),
    Tackle::Fixed("Foam spider (#10)"),
];

const RIVER_LOCATIONS: &[&str] = &[
    "Current breaks behind boulders and logs",
    "Eddy seams",
    "Deep pools",
    "Riffle tails at dawn and dusk",
];

const LAKE_LOCATIONS: &[&str] = &[
    "Points and windblown banks",
    "Weedlines",
    "Drop-offs",
    "Shallow flats at dawn and dusk",
];

const TOOTHY_ROD: &str = "7'6\"–8' heavy rod, 30–60 lb braid with a wire or heavy fluorocarbon leader";

fn rod_and_line(band: ThermalBand) -> &'static str {
    match band {
        ThermalBand::Cold => "6'6\"–7' light spinning rod, 4–6 lb mono or fluorocarbon",
        ThermalBand::Cool => "7' medium spinning rod, 10 lb braid with 8–10 lb fluorocarbon leader",
        ThermalBand::Warm => "7' medium-heavy casting or spinning rod, 12–15 lb line",
    }
}

fn fly_setup(band: ThermalBand) -> &'static str {
    match band {
        ThermalBand::Cold => "4–5 wt, 9' rod, floating line, 9' 4X–5X leader",
        ThermalBand::Cool => "7–8 wt rod, sink-tip line, 3–4' 15–20 lb fluorocarbon leader",
        ThermalBand::Warm => "6–7 wt rod, floating line, 7.5' 0X–2X leader",
    }
}

fn fly_presentation(river_like: bool, stained: bool) -> String {
    let base = if river_like {
        "Dead-drift nymphs through seams and pool heads; swing streamers across the current"
    } else {
        "Strip streamers along weedlines; count down and crawl flies over drop-offs"
    };
    if stained {
        format!("{}. Stained water: slow down and fish tight to cover", base)
    } else {
        base.to_string()
    }
}

fn catalogs(band: ThermalBand) -> (&'static [Tackle], &'static [Tackle]) {
    match band {
        ThermalBand::Cold => (COLD_LURES, COLD_FLIES),
        ThermalBand::Cool => (COOL_LURES, COOL_FLIES),
        ThermalBand::Warm => (WARM_LURES, WARM_FLIES),
    }
}

fn pick_all(catalog: &[Tackle], stained: bool) -> Vec<String> {
    catalog.iter().map(|t| t.pick(stained).to_string()).collect()
}

/// Whether conditions read as stained water. Unknown turbidity is clear.
pub fn is_stained(conditions: Option<&ConditionSet>) -> bool {
    conditions
        .and_then(|c| c.turbidity_fnu)
        .filter(|f| f.is_finite())
        .is_some_and(|f| f > STAINED_FNU)
}

/// Recommend tackle for a species on a given water. Always fully populated.
pub fn recommend_gear(
    species: &str,
    water_type: &str,
    conditions: Option<&ConditionSet>,
) -> GearRecommendation {
    let band = classify(species);
    let river_like = is_river_like(water_type);
    let stained = is_stained(conditions);

    let rod = if is_toothy(species) {
        TOOTHY_ROD
    } else {
        rod_and_line(band)
    };

    let (lures, flies) = catalogs(band);
    let locations = if river_like {
        RIVER_LOCATIONS
    } else {
        LAKE_LOCATIONS
    };

    GearRecommendation {
        rod_and_line: rod.to_string(),
        lures: pick_all(lures, stained),
        flies: pick_all(flies, stained),
        fly_setup: fly_setup(band).to_string(),
        fly_presentation: fly_presentation(river_like, stained),
        locations: locations.iter().map(|s| s.to_string()).collect(),
    }
}
