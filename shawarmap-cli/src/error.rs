//! Error types emitted by the ShawarMap CLI.
//!
//! Keep this error type reasonably small, as every command helper returns
//! `Result<_, CliError>`.

use std::sync::Arc;

use shawarmap_core::{CoordinateError, GeoPointParseError, UnknownLocale};
use shawarmap_data::{CatalogError, ProviderBuildError, UnknownFilter, UnknownSortOrder};
use thiserror::Error;

/// Errors emitted by the ShawarMap CLI.
#[derive(Debug, Error)]
pub enum CliError {
    /// Provided arguments failed Clap validation.
    #[error(transparent)]
    ArgumentParsing(#[from] clap::Error),
    /// Configuration layering failed (files, env, CLI).
    #[error("failed to load configuration: {0}")]
    Configuration(#[from] Arc<ortho_config::OrthoError>),
    /// A required option is missing after configuration merging.
    #[error("missing {field} (set --{field} or {env})")]
    MissingArgument {
        field: &'static str,
        env: &'static str,
    },
    /// Two options that cannot be combined were both set.
    #[error("--{first} cannot be combined with --{second}")]
    ConflictingArguments {
        first: &'static str,
        second: &'static str,
    },
    /// Explicit coordinates were out of range.
    #[error("invalid coordinates: {0}")]
    InvalidCoordinates(#[from] CoordinateError),
    /// A `lat,lng` option could not be parsed.
    #[error("invalid --{field}: {source}")]
    InvalidPoint {
        field: &'static str,
        #[source]
        source: GeoPointParseError,
    },
    /// A filter name was not recognised.
    #[error(transparent)]
    InvalidFilter(#[from] UnknownFilter),
    /// A sort order was not recognised.
    #[error(transparent)]
    InvalidSort(#[from] UnknownSortOrder),
    /// A locale was not recognised.
    #[error(transparent)]
    InvalidLocale(#[from] UnknownLocale),
    /// Loading the place catalogue failed.
    #[error(transparent)]
    Catalog(#[from] CatalogError),
    /// Constructing the IP geolocation provider failed.
    #[error("failed to build location provider for {endpoint:?}: {source}")]
    BuildLocationProvider {
        endpoint: String,
        #[source]
        source: ProviderBuildError,
    },
    /// The async runtime could not start.
    #[error("failed to start async runtime: {0}")]
    Runtime(#[source] std::io::Error),
    /// Serialising JSON output failed.
    #[error("failed to serialise output: {0}")]
    SerialiseOutput(#[source] serde_json::Error),
    /// Writing output failed.
    #[error("failed to write output: {0}")]
    WriteOutput(#[source] std::io::Error),
}
