//! Core geolocation types for the ShawarMap engine.
//!
//! The crate covers three concerns:
//! - pure great-circle maths ([`calculate_distance`], [`sort_by_distance`]);
//! - acquisition of the user's position through a [`LocationProvider`],
//!   mediated by an injectable [`LocationService`];
//! - human-readable presentation in the supported [`Locale`]s.
//!
//! No global state lives here. Callers build one [`LocationService`] and share
//! it with whatever needs the user's position.

#![cfg_attr(docsrs, feature(doc_cfg))]

pub mod distance;
pub mod geo_point;
pub mod locale;
pub mod location;

#[doc(hidden)]
pub mod test_support;

pub use distance::{EARTH_RADIUS_KM, Locatable, Ranked, calculate_distance, sort_by_distance};
pub use geo_point::{CoordinateError, GeoPoint, GeoPointParseError, UserLocation};
pub use locale::{Locale, UnknownLocale, format_distance};
pub use location::{
    LocationError, LocationProvider, LocationService, LocationServiceConfig, PermissionQueryError,
    PermissionState, PositionOptions, WatchObserver, WatchStart,
};
