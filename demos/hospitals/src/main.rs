//! hospitals: command-line hospital finder.
//!
//! Loads a facility list (the built-in New Delhi sample unless
//! `--facilities` is given), builds the router once, answers one request and
//! prints the JSON response.  Request errors are printed as
//! `{"status": .., "error": ..}` with the HTTP status the hospital-finder API
//! would have returned.
//!
//! ```text
//! hospitals nearest --lat 28.60 --lon 77.20
//! hospitals route --from AIIMS --to "GTB Hospital"
//! hospitals from-point --lat 28.60 --lon 77.20 --to "Max Saket"
//! hospitals batch --point 28.60,77.20 --point 28.70,77.30
//! RUST_LOG=debug hospitals --facilities hospitals.csv distances --from AIIMS
//! ```

mod sample;

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use serde::Serialize;
use tracing::info;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use fr_core::{FacilitySet, GeoPoint, RouterConfig};
use fr_load::load_facilities;
use fr_query::{QueryError, QueryResult, RouterBuilder};

// ── CLI ───────────────────────────────────────────────────────────────────────

#[derive(Parser, Debug)]
#[command(author, version, about = "Nearest-hospital and route finder")]
struct Cli {
    /// Facility list (.json or .csv).  Defaults to the built-in sample.
    #[arg(long)]
    facilities: Option<PathBuf>,

    /// Router configuration as JSON.
    #[arg(long)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Nearest hospital to a coordinate, with the route to it.
    Nearest {
        #[arg(long, allow_negative_numbers = true)]
        lat: Option<f64>,
        #[arg(long, allow_negative_numbers = true)]
        lon: Option<f64>,
    },
    /// Shortest route between two hospitals.
    Route {
        #[arg(long = "from")]
        from: String,
        #[arg(long = "to")]
        to: String,
    },
    /// Distance from one hospital to every other.
    Distances {
        #[arg(long = "from")]
        from: String,
    },
    /// Route from a coordinate to a chosen hospital.
    FromPoint {
        #[arg(long, allow_negative_numbers = true)]
        lat: f64,
        #[arg(long, allow_negative_numbers = true)]
        lon: f64,
        #[arg(long = "to")]
        to: String,
    },
    /// Nearest hospital for several coordinates at once.
    Batch {
        /// `LAT,LON`; repeat for each point.
        #[arg(long = "point", value_parser = parse_point, allow_negative_numbers = true)]
        points: Vec<GeoPoint>,
    },
    /// Print the full weighted graph.
    Graph,
}

fn parse_point(s: &str) -> Result<GeoPoint, String> {
    let (lat, lon) = s
        .split_once(',')
        .ok_or_else(|| format!("expected LAT,LON, got {s:?}"))?;
    let lat = lat.trim().parse::<f64>().map_err(|e| format!("latitude: {e}"))?;
    let lon = lon.trim().parse::<f64>().map_err(|e| format!("longitude: {e}"))?;
    Ok(GeoPoint::new(lat, lon))
}

// ── main ──────────────────────────────────────────────────────────────────────

fn main() -> Result<ExitCode> {
    init_tracing();
    let cli = Cli::parse();

    let config = match cli.config.as_deref() {
        Some(path) => load_config(path)?,
        None => RouterConfig::default(),
    };
    let facilities = match cli.facilities.as_deref() {
        Some(path) => load_facilities(path)
            .with_context(|| format!("failed to load facilities from {}", path.display()))?,
        None => sample::sample_facilities().context("built-in sample is malformed")?,
    };

    let ok = run(cli.command, facilities, config)?;
    Ok(if ok { ExitCode::SUCCESS } else { ExitCode::FAILURE })
}

/// Answer one command; `Ok(false)` means the request itself failed and an
/// error body was printed.
fn run(command: Command, facilities: FacilitySet, config: RouterConfig) -> Result<bool> {
    let router = RouterBuilder::new(facilities)
        .config(config)
        .build()
        .context("failed to build the facility graph")?;

    match command {
        Command::Nearest { lat, lon } => respond(router.nearest_to_coords(lat, lon)),
        Command::Route { from, to } => respond(router.route_between(&from, &to)),
        Command::Distances { from } => respond(router.distances_from(&from)),
        Command::FromPoint { lat, lon, to } => {
            respond(router.route_from_point(GeoPoint::new(lat, lon), &to))
        }
        Command::Batch { points } => {
            info!(points = points.len(), "answering batch");
            let mut all_ok = true;
            for result in router.nearest_many(&points) {
                all_ok &= respond(result)?;
            }
            Ok(all_ok)
        }
        Command::Graph => print_json(&router.graph_snapshot()).map(|()| true),
    }
}

// ── Output ────────────────────────────────────────────────────────────────────

#[derive(Serialize)]
struct ErrorBody {
    status: u16,
    error:  String,
}

fn status_of(err: &QueryError) -> u16 {
    if err.is_bad_request() {
        400
    } else if err.is_not_found() {
        404
    } else {
        500
    }
}

fn respond<T: Serialize>(result: QueryResult<T>) -> Result<bool> {
    match result {
        Ok(body) => {
            print_json(&body)?;
            Ok(true)
        }
        Err(err) => {
            print_json(&ErrorBody { status: status_of(&err), error: err.to_string() })?;
            Ok(false)
        }
    }
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

// ── Setup ─────────────────────────────────────────────────────────────────────

fn load_config(path: &Path) -> Result<RouterConfig> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read config {}", path.display()))?;
    let config = serde_json::from_str(&text)
        .with_context(|| format!("failed to parse config {}", path.display()))?;
    Ok(config)
}

fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .finish();

    let _ = tracing::subscriber::set_global_default(subscriber);
}
