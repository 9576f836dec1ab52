//! Nearby command implementation for the ShawarMap CLI.

use camino::Utf8PathBuf;
use clap::Parser;
use log::{debug, warn};
use ortho_config::{OrthoConfig, SubcmdConfigMerge};
use serde::{Deserialize, Serialize};
use shawarmap_core::{GeoPoint, Locale, LocationError, LocationService, UserLocation};
use shawarmap_data::{
    Catalog, DiscoveryQuery, FilterSet, FixedLocationProvider, HttpLocationProvider,
    HttpLocationProviderConfig, SortOrder, discover, resolve_user_location,
};
use std::io::Write;

use crate::render::{NearbyReport, write_json, write_text};
use crate::{
    ARG_CATALOG, ARG_FILTERS, ARG_GEOLOCATION_URL, ARG_JSON, ARG_LAT, ARG_LIMIT, ARG_LNG,
    ARG_LOCALE, ARG_LOCATE, ARG_SORT, CliError, ENV_LAT, ENV_LNG,
};

/// CLI arguments for the `nearby` subcommand.
#[derive(Debug, Clone, Parser, Deserialize, Serialize, OrthoConfig, Default)]
#[command(
    long_about = "List places from the catalogue. Give your position with \
                 --lat/--lng, or --locate to estimate it from your IP \
                 address. When a position is known and no --sort is given, \
                 places are listed nearest first.",
    about = "List places, nearest first when your position is known"
)]
#[ortho_config(prefix = "SHAWARMAP")]
pub(crate) struct NearbyArgs {
    /// Your latitude in degrees.
    #[arg(long = ARG_LAT, value_name = "degrees", allow_negative_numbers = true)]
    #[serde(default)]
    pub(crate) lat: Option<f64>,
    /// Your longitude in degrees.
    #[arg(long = ARG_LNG, value_name = "degrees", allow_negative_numbers = true)]
    #[serde(default)]
    pub(crate) lng: Option<f64>,
    /// Estimate your position from your public IP address.
    #[arg(long = ARG_LOCATE, num_args = 0..=1, default_missing_value = "true")]
    #[serde(default)]
    pub(crate) locate: Option<bool>,
    /// IP geolocation endpoint used by --locate.
    #[arg(long = ARG_GEOLOCATION_URL, value_name = "url")]
    #[serde(default)]
    pub(crate) geolocation_url: Option<String>,
    /// JSON catalogue to read instead of the built-in sample.
    #[arg(long = ARG_CATALOG, value_name = "path")]
    #[serde(default)]
    pub(crate) catalog: Option<Utf8PathBuf>,
    /// Comma-separated filters: kosher, halal, vegan, spicy, budget, premium.
    #[arg(long = ARG_FILTERS, value_name = "list")]
    #[serde(default)]
    pub(crate) filters: Option<String>,
    /// Listing order: rating, distance or price.
    #[arg(long = ARG_SORT, value_name = "order")]
    #[serde(default)]
    pub(crate) sort: Option<String>,
    /// Output language (`en` or `he`).
    #[arg(long = ARG_LOCALE, value_name = "code")]
    #[serde(default)]
    pub(crate) locale: Option<String>,
    /// Show at most this many places.
    #[arg(long = ARG_LIMIT, value_name = "count")]
    #[serde(default)]
    pub(crate) limit: Option<usize>,
    /// Print JSON instead of text.
    #[arg(long = ARG_JSON, num_args = 0..=1, default_missing_value = "true")]
    #[serde(default)]
    pub(crate) json: Option<bool>,
}

impl NearbyArgs {
    pub(crate) fn into_config(self) -> Result<NearbyConfig, CliError> {
        let merged = self.load_and_merge().map_err(CliError::Configuration)?;
        NearbyConfig::try_from(merged)
    }
}

/// Where the user's position comes from.
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum PositionSource {
    /// No position; distances are not shown.
    Unknown,
    /// Explicit coordinates.
    Fixed(GeoPoint),
    /// IP geolocation through `endpoint`.
    Locate { endpoint: String },
}

/// Resolved `nearby` command configuration.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct NearbyConfig {
    pub(crate) position: PositionSource,
    pub(crate) catalog: Option<Utf8PathBuf>,
    pub(crate) query: DiscoveryQuery,
    pub(crate) locale: Locale,
    pub(crate) json: bool,
}

impl NearbyConfig {
    fn load_catalog(&self) -> Result<Catalog, CliError> {
        let catalog = self
            .catalog
            .as_deref()
            .map_or_else(Catalog::sample, Catalog::from_path)?;
        debug!("catalogue holds {} places", catalog.len());
        Ok(catalog)
    }
}

impl TryFrom<NearbyArgs> for NearbyConfig {
    type Error = CliError;

    fn try_from(args: NearbyArgs) -> Result<Self, Self::Error> {
        let locate = args.locate.unwrap_or(false);
        let position = match (args.lat, args.lng) {
            (Some(_), Some(_)) if locate => {
                return Err(CliError::ConflictingArguments {
                    first: ARG_LOCATE,
                    second: ARG_LAT,
                });
            }
            (Some(lat), Some(lng)) => PositionSource::Fixed(GeoPoint::validated(lat, lng)?),
            (Some(_), None) => {
                return Err(CliError::MissingArgument {
                    field: ARG_LNG,
                    env: ENV_LNG,
                });
            }
            (None, Some(_)) => {
                return Err(CliError::MissingArgument {
                    field: ARG_LAT,
                    env: ENV_LAT,
                });
            }
            (None, None) if locate => PositionSource::Locate {
                endpoint: args
                    .geolocation_url
                    .unwrap_or_else(|| HttpLocationProviderConfig::default().endpoint),
            },
            (None, None) => PositionSource::Unknown,
        };

        let filters = args
            .filters
            .as_deref()
            .map(FilterSet::parse_list)
            .transpose()?
            .unwrap_or_default();
        let sort = args
            .sort
            .as_deref()
            .map(str::parse::<SortOrder>)
            .transpose()?;
        let locale = args
            .locale
            .as_deref()
            .map(str::parse::<Locale>)
            .transpose()?
            .unwrap_or_default();

        Ok(Self {
            position,
            catalog: args.catalog,
            query: DiscoveryQuery {
                filters,
                sort,
                limit: args.limit,
            },
            locale,
            json: args.json.unwrap_or(false),
        })
    }
}

/// Builds the location service for the current nearby invocation.
pub(crate) trait LocationServiceBuilder {
    fn build(&self, position: &PositionSource) -> Result<LocationService, CliError>;
}

pub(crate) struct DefaultLocationServiceBuilder;

impl LocationServiceBuilder for DefaultLocationServiceBuilder {
    fn build(&self, position: &PositionSource) -> Result<LocationService, CliError> {
        match position {
            PositionSource::Unknown => Ok(LocationService::without_provider()),
            PositionSource::Fixed(point) => {
                Ok(LocationService::new(FixedLocationProvider::at(*point)))
            }
            PositionSource::Locate { endpoint } => {
                let provider = HttpLocationProvider::new(endpoint.clone()).map_err(|source| {
                    CliError::BuildLocationProvider {
                        endpoint: endpoint.clone(),
                        source,
                    }
                })?;
                Ok(LocationService::new(provider))
            }
        }
    }
}

pub(crate) fn run_nearby(args: NearbyArgs) -> Result<(), CliError> {
    let mut stdout = std::io::stdout().lock();
    run_nearby_with(args, &DefaultLocationServiceBuilder, &mut stdout)
}

pub(crate) fn run_nearby_with(
    args: NearbyArgs,
    builder: &dyn LocationServiceBuilder,
    writer: &mut dyn Write,
) -> Result<(), CliError> {
    let config = args.into_config()?;
    let catalog = config.load_catalog()?;
    let service = builder.build(&config.position)?;
    let located = locate_user(&config.position, &service)?;

    let discovery = discover(&catalog, located.location(), &config.query);
    if discovery.fell_back {
        warn!("no position available; listing by rating instead of distance");
    }

    let report = NearbyReport::new(&discovery, config.locale, located.error());
    if config.json {
        write_json(writer, &report)
    } else {
        write_text(writer, &report)
    }
}

/// Outcome of looking up the user's position.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) enum Located {
    /// No position source was configured.
    Skipped,
    /// A fix was obtained.
    Found(UserLocation),
    /// The lookup failed.
    Failed(LocationError),
}

impl Located {
    pub(crate) const fn location(&self) -> Option<&UserLocation> {
        match self {
            Self::Found(location) => Some(location),
            Self::Skipped | Self::Failed(_) => None,
        }
    }

    pub(crate) const fn error(&self) -> Option<LocationError> {
        match self {
            Self::Failed(error) => Some(*error),
            Self::Skipped | Self::Found(_) => None,
        }
    }
}

fn locate_user(
    position: &PositionSource,
    service: &LocationService,
) -> Result<Located, CliError> {
    if *position == PositionSource::Unknown {
        return Ok(Located::Skipped);
    }
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .map_err(CliError::Runtime)?;
    Ok(match runtime.block_on(resolve_user_location(service)) {
        Ok(location) => Located::Found(location),
        Err(error) => Located::Failed(error),
    })
}

#[cfg(test)]
pub(crate) fn config_from_layers_for_test(
    layers: Vec<ortho_config::MergeLayer<'static>>,
) -> Result<NearbyConfig, CliError> {
    let merged = NearbyArgs::merge_from_layers(layers).map_err(CliError::from)?;
    NearbyConfig::try_from(merged)
}
