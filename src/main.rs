// Fishing Advisor CLI v0.1
use chrono::NaiveDate;
use clap::Parser;
use std::process::ExitCode;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use fishing_advisor::advisor::species::CURATED_SPECIES;
use fishing_advisor::advisor::{WaterKind, WaterSite};
use fishing_advisor::config::{log_json_from_env, AppConfig};
use fishing_advisor::errors::AppError;
use fishing_advisor::report::render_text;
use fishing_advisor::services::advisory::{AdvisoryRequest, AdvisoryService};

/// Fishing conditions, gear and best times for a species at nearby water
#[derive(Parser, Debug)]
#[command(name = "fishing-advisor")]
#[command(about = "Fishing success score, gear and feeding windows", long_about = None)]
struct Args {
    /// Target species, e.g. "Rainbow Trout"
    #[arg(short, long, required_unless_present = "list_species")]
    species: Option<String>,

    /// Place to search around, e.g. "Lake Tahoe"
    #[arg(short, long, conflicts_with_all = ["lat", "lon"])]
    place: Option<String>,

    /// Latitude of the search center
    #[arg(long, requires = "lon", allow_negative_numbers = true)]
    lat: Option<f64>,

    /// Longitude of the search center
    #[arg(long, requires = "lat", allow_negative_numbers = true)]
    lon: Option<f64>,

    /// Day to plan for (YYYY-MM-DD), defaults to today
    #[arg(short, long)]
    date: Option<NaiveDate>,

    /// Which nearby water to use, by position in the list (0 = nearest)
    #[arg(long, default_value_t = 0)]
    site: usize,

    /// Print the advisory as JSON
    #[arg(long)]
    json: bool,

    /// List the built-in species names and exit
    #[arg(long)]
    list_species: bool,
}

fn init_tracing() {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "fishing_advisor=info".into());

    if log_json_from_env() {
        tracing_subscriber::registry()
            .with(filter)
            .with(
                tracing_subscriber::fmt::layer()
                    .json()
                    .with_writer(std::io::stderr),
            )
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .init();
    }
}

fn check_coordinates(lat: f64, lon: f64) -> Result<(f64, f64), AppError> {
    if !(-90.0..=90.0).contains(&lat) || !(-180.0..=180.0).contains(&lon) {
        return Err(AppError::BadRequest(format!(
            "coordinates out of range: {}, {}",
            lat, lon
        )));
    }
    Ok((lat, lon))
}

/// Open water right at the point, used when the map has nothing nearby.
fn point_site(lat: f64, lon: f64) -> WaterSite {
    WaterSite {
        id: format!("point/{:.4},{:.4}", lat, lon),
        name: format!("Water at {:.4}, {:.4}", lat, lon),
        lat,
        lon,
        kind: WaterKind::Water,
    }
}

async fn run(args: Args, config: &AppConfig) -> Result<(), AppError> {
    if args.list_species {
        for species in CURATED_SPECIES {
            println!("{}", species);
        }
        return Ok(());
    }

    let species = args.species.unwrap_or_default();
    if species.trim().is_empty() {
        return Err(AppError::BadRequest("species must not be empty".to_string()));
    }

    let service = AdvisoryService::from_config(config)?;

    let (lat, lon) = match (&args.place, args.lat, args.lon) {
        (Some(place), _, _) => {
            let point = service.geocode(place).await?;
            tracing::info!(
                "Geocoded '{}' to {:.4}, {:.4} ({})",
                place,
                point.lat,
                point.lon,
                point.display_name
            );
            (point.lat, point.lon)
        }
        (None, Some(lat), Some(lon)) => check_coordinates(lat, lon)?,
        _ => {
            return Err(AppError::BadRequest(
                "either --place or both --lat and --lon are required".to_string(),
            ))
        }
    };

    let sites = service.find_water_sites(lat, lon).await?;
    let site = if sites.is_empty() {
        tracing::warn!("No mapped water near {:.4}, {:.4}, using the point itself", lat, lon);
        point_site(lat, lon)
    } else {
        sites.get(args.site).cloned().ok_or_else(|| {
            AppError::BadRequest(format!(
                "--site {} is out of range, {} sites found",
                args.site,
                sites.len()
            ))
        })?
    };

    if !args.json && sites.len() > 1 {
        println!("Nearby water:");
        for (i, s) in sites.iter().enumerate() {
            let marker = if i == args.site { '*' } else { ' ' };
            println!(" {}{:>2}  {} ({})", marker, i, s.name, s.kind);
        }
        println!();
    }

    let request = AdvisoryRequest {
        species,
        site,
        date: args
            .date
            .unwrap_or_else(|| chrono::Local::now().date_naive()),
    };
    let advisory = service.advise(&request).await?;

    if args.json {
        let json = serde_json::to_string_pretty(&advisory)
            .map_err(|e| AppError::InternalError(format!("Failed to serialize advisory: {}", e)))?;
        println!("{}", json);
    } else {
        print!("{}", render_text(&advisory));
    }

    Ok(())
}

#[tokio::main]
async fn main() -> ExitCode {
    init_tracing();

    let args = Args::parse();
    let config = AppConfig::from_env();

    match run(args, &config).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("{}", e);
            eprintln!("error: {}", e);
            e.exit_code()
        }
    }
}
