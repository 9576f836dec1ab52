//! Command-line interface for finding shawarma near you.
#![forbid(unsafe_code)]

use clap::{Parser, Subcommand};

mod distance;
mod error;
mod nearby;
mod render;

pub use error::CliError;

use distance::DistanceArgs;
use nearby::NearbyArgs;

const ARG_LAT: &str = "lat";
const ARG_LNG: &str = "lng";
const ARG_LOCATE: &str = "locate";
const ARG_GEOLOCATION_URL: &str = "geolocation-url";
const ARG_CATALOG: &str = "catalog";
const ARG_FILTERS: &str = "filters";
const ARG_SORT: &str = "sort";
const ARG_LOCALE: &str = "locale";
const ARG_LIMIT: &str = "limit";
const ARG_JSON: &str = "json";
const ARG_FROM: &str = "from";
const ARG_TO: &str = "to";
const ENV_LAT: &str = "SHAWARMAP_CMDS_NEARBY_LAT";
const ENV_LNG: &str = "SHAWARMAP_CMDS_NEARBY_LNG";
const ENV_FROM: &str = "SHAWARMAP_CMDS_DISTANCE_FROM";
const ENV_TO: &str = "SHAWARMAP_CMDS_DISTANCE_TO";

/// Run the ShawarMap CLI with the current process arguments and environment.
///
/// # Errors
///
/// Returns a [`CliError`] when arguments are invalid or the command fails.
pub fn run() -> Result<(), CliError> {
    let cli = Cli::try_parse().map_err(CliError::ArgumentParsing)?;
    match cli.command {
        Command::Nearby(args) => nearby::run_nearby(args),
        Command::Distance(args) => distance::run_distance(args),
    }
}

#[derive(Debug, Parser)]
#[command(
    name = "shawarmap",
    about = "Find the nearest shawarma and how far away it is",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// List places, nearest first when your position is known.
    Nearby(NearbyArgs),
    /// Print the great-circle distance between two points.
    Distance(DistanceArgs),
}

#[cfg(test)]
mod tests;
