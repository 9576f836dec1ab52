use camino::Utf8PathBuf;
use shawarmap_core::CoordinateError;
use thiserror::Error;

/// Errors raised while loading or validating a [`crate::Catalog`].
#[derive(Debug, Error)]
pub enum CatalogError {
    /// The catalogue file could not be read.
    #[error("failed to read catalogue {path}: {source}")]
    Read {
        path: Utf8PathBuf,
        #[source]
        source: std::io::Error,
    },
    /// The catalogue was not valid JSON for a list of places.
    #[error("failed to parse catalogue: {0}")]
    Parse(#[from] serde_json::Error),
    /// The catalogue contained no places.
    #[error("catalogue must contain at least one place")]
    Empty,
    /// Two places shared an identifier.
    #[error("duplicate place id {0:?}")]
    DuplicateId(String),
    /// A price level fell outside `1..=3`.
    #[error("place {id:?} has price level {level}; expected 1 to 3")]
    InvalidPriceLevel { id: String, level: u8 },
    /// A place had out-of-range coordinates.
    #[error("place {id:?} has invalid coordinates: {source}")]
    InvalidCoordinates {
        id: String,
        #[source]
        source: CoordinateError,
    },
}
