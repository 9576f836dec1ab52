//! Distance command implementation for the ShawarMap CLI.

use clap::Parser;
use ortho_config::{OrthoConfig, SubcmdConfigMerge};
use serde::{Deserialize, Serialize};
use shawarmap_core::{GeoPoint, Locale};
use std::io::Write;

use crate::{ARG_FROM, ARG_LOCALE, ARG_TO, CliError, ENV_FROM, ENV_TO};

/// CLI arguments for the `distance` subcommand.
#[derive(Debug, Clone, Parser, Deserialize, Serialize, OrthoConfig, Default)]
#[command(
    long_about = "Print the haversine distance between two `lat,lng` points, \
                 formatted for the chosen locale.",
    about = "Measure the distance between two points"
)]
#[ortho_config(prefix = "SHAWARMAP")]
pub(crate) struct DistanceArgs {
    /// Starting point as `lat,lng`.
    #[arg(long = ARG_FROM, value_name = "lat,lng", allow_hyphen_values = true)]
    #[serde(default)]
    pub(crate) from: Option<String>,
    /// End point as `lat,lng`.
    #[arg(long = ARG_TO, value_name = "lat,lng", allow_hyphen_values = true)]
    #[serde(default)]
    pub(crate) to: Option<String>,
    /// Output language (`en` or `he`).
    #[arg(long = ARG_LOCALE, value_name = "code")]
    #[serde(default)]
    pub(crate) locale: Option<String>,
}

impl DistanceArgs {
    pub(crate) fn into_config(self) -> Result<DistanceConfig, CliError> {
        let merged = self.load_and_merge().map_err(CliError::Configuration)?;
        DistanceConfig::try_from(merged)
    }
}

/// Resolved `distance` command configuration.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct DistanceConfig {
    pub(crate) from: GeoPoint,
    pub(crate) to: GeoPoint,
    pub(crate) locale: Locale,
}

impl TryFrom<DistanceArgs> for DistanceConfig {
    type Error = CliError;

    fn try_from(args: DistanceArgs) -> Result<Self, Self::Error> {
        let from = parse_point(args.from, ARG_FROM, ENV_FROM)?;
        let to = parse_point(args.to, ARG_TO, ENV_TO)?;
        let locale = args
            .locale
            .as_deref()
            .map(str::parse::<Locale>)
            .transpose()?
            .unwrap_or_default();
        Ok(Self { from, to, locale })
    }
}

fn parse_point(
    value: Option<String>,
    field: &'static str,
    env: &'static str,
) -> Result<GeoPoint, CliError> {
    let raw = value.ok_or(CliError::MissingArgument { field, env })?;
    raw.parse()
        .map_err(|source| CliError::InvalidPoint { field, source })
}

pub(crate) fn run_distance(args: DistanceArgs) -> Result<(), CliError> {
    let mut stdout = std::io::stdout().lock();
    run_distance_with(args, &mut stdout)
}

pub(crate) fn run_distance_with(
    args: DistanceArgs,
    writer: &mut dyn Write,
) -> Result<(), CliError> {
    let config = args.into_config()?;
    let km = config.from.distance_km(&config.to);
    writeln!(writer, "{}", config.locale.format_distance(km)).map_err(CliError::WriteOutput)
}
