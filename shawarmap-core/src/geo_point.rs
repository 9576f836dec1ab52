//! Positions in decimal degrees and the user's resolved location.

use std::fmt;
use std::num::ParseFloatError;
use std::str::FromStr;

use geo::{Coord, Point};
use thiserror::Error;

/// A WGS84 position in decimal degrees.
///
/// [`GeoPoint::new`] accepts any value. Distances computed from out-of-range
/// degrees are mathematically defined but carry no geographic meaning; use
/// [`GeoPoint::validated`] when input comes from an untrusted source.
///
/// # Examples
///
/// ```
/// use geo::Coord;
/// use shawarmap_core::GeoPoint;
///
/// let jaffa = GeoPoint::new(32.0641, 34.7696);
/// let coord: Coord<f64> = jaffa.into();
/// assert_eq!(coord.x, 34.7696);
/// assert_eq!(coord.y, 32.0641);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GeoPoint {
    /// Degrees north of the equator.
    pub latitude: f64,
    /// Degrees east of the prime meridian.
    pub longitude: f64,
}

/// Errors returned by [`GeoPoint::validated`].
#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum CoordinateError {
    /// A component was NaN or infinite.
    #[error("coordinates must be finite numbers")]
    NotFinite,
    /// Latitude fell outside `[-90, 90]`.
    #[error("latitude {0} is outside [-90, 90]")]
    LatitudeOutOfRange(f64),
    /// Longitude fell outside `[-180, 180]`.
    #[error("longitude {0} is outside [-180, 180]")]
    LongitudeOutOfRange(f64),
}

impl GeoPoint {
    /// Construct a point without range checks.
    #[must_use]
    pub const fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }

    /// Construct a point, rejecting non-finite or out-of-range degrees.
    ///
    /// # Examples
    ///
    /// ```
    /// use shawarmap_core::{CoordinateError, GeoPoint};
    ///
    /// assert!(GeoPoint::validated(32.08, 34.78).is_ok());
    /// assert_eq!(
    ///     GeoPoint::validated(91.0, 0.0),
    ///     Err(CoordinateError::LatitudeOutOfRange(91.0)),
    /// );
    /// ```
    pub fn validated(latitude: f64, longitude: f64) -> Result<Self, CoordinateError> {
        if !latitude.is_finite() || !longitude.is_finite() {
            return Err(CoordinateError::NotFinite);
        }
        if !(-90.0..=90.0).contains(&latitude) {
            return Err(CoordinateError::LatitudeOutOfRange(latitude));
        }
        if !(-180.0..=180.0).contains(&longitude) {
            return Err(CoordinateError::LongitudeOutOfRange(longitude));
        }
        Ok(Self::new(latitude, longitude))
    }

    /// Great-circle distance to `other` in kilometres.
    #[must_use]
    pub fn distance_km(&self, other: &Self) -> f64 {
        crate::calculate_distance(
            self.latitude,
            self.longitude,
            other.latitude,
            other.longitude,
        )
    }
}

impl fmt::Display for GeoPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{}", self.latitude, self.longitude)
    }
}

/// Errors returned when parsing a `"lat,lng"` string.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum GeoPointParseError {
    /// The input was not two comma-separated values.
    #[error("expected `latitude,longitude`, got {0:?}")]
    Format(String),
    /// A component was not a number.
    #[error("invalid coordinate: {0}")]
    Number(#[from] ParseFloatError),
    /// The numbers were outside the valid ranges.
    #[error(transparent)]
    Range(#[from] CoordinateError),
}

impl FromStr for GeoPoint {
    type Err = GeoPointParseError;

    /// Parse `"lat,lng"`, validating the ranges.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (lat, lng) = s
            .split_once(',')
            .ok_or_else(|| GeoPointParseError::Format(s.to_owned()))?;
        let latitude = lat.trim().parse::<f64>()?;
        let longitude = lng.trim().parse::<f64>()?;
        Ok(Self::validated(latitude, longitude)?)
    }
}

impl From<GeoPoint> for Coord<f64> {
    fn from(point: GeoPoint) -> Self {
        Self {
            x: point.longitude,
            y: point.latitude,
        }
    }
}

impl From<Coord<f64>> for GeoPoint {
    fn from(coord: Coord<f64>) -> Self {
        Self::new(coord.y, coord.x)
    }
}

impl From<GeoPoint> for Point<f64> {
    fn from(point: GeoPoint) -> Self {
        Self::from(Coord::from(point))
    }
}

impl From<Point<f64>> for GeoPoint {
    fn from(point: Point<f64>) -> Self {
        Self::from(point.0)
    }
}

/// The user's position as reported by a location provider.
///
/// `accuracy_m` is advisory and never feeds into distance calculations.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct UserLocation {
    /// Reported position.
    pub point: GeoPoint,
    /// Reported accuracy radius in metres, when known.
    #[cfg_attr(feature = "serde", serde(default))]
    pub accuracy_m: Option<f64>,
}

impl UserLocation {
    /// A location with unknown accuracy.
    #[must_use]
    pub const fn new(point: GeoPoint) -> Self {
        Self {
            point,
            accuracy_m: None,
        }
    }

    /// Attach an accuracy radius in metres.
    #[must_use]
    pub const fn with_accuracy(mut self, accuracy_m: f64) -> Self {
        self.accuracy_m = Some(accuracy_m);
        self
    }
}

impl From<GeoPoint> for UserLocation {
    fn from(point: GeoPoint) -> Self {
        Self::new(point)
    }
}
