//! Facade crate for the ShawarMap proximity engine.
//!
//! This crate re-exports the core geolocation types and exposes the place
//! catalogue and concrete location providers behind the `data` feature.

#![forbid(unsafe_code)]

pub use shawarmap_core::{
    CoordinateError, EARTH_RADIUS_KM, GeoPoint, Locale, Locatable, LocationError,
    LocationProvider, LocationService, LocationServiceConfig, PermissionQueryError,
    PermissionState, PositionOptions, Ranked, UserLocation, WatchObserver, WatchStart,
    calculate_distance, format_distance, sort_by_distance,
};

#[cfg(feature = "data")]
pub use shawarmap_data::{
    Catalog, CatalogError, Discovery, DiscoveryQuery, FilterSet, FixedLocationProvider,
    HttpLocationProvider, HttpLocationProviderConfig, Listing, Place, PlaceFilter, PlaceTag,
    SortOrder, discover, resolve_user_location,
};
