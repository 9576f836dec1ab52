//! Place data and location sources for the ShawarMap engine.
//!
//! Responsibilities:
//! - Load and validate the place catalogue.
//! - Apply the filter-bar rules and sort orders to produce a listing.
//! - Provide concrete [`shawarmap_core::LocationProvider`] implementations.
//!
//! Boundaries:
//! - Distance maths and the location service live in `shawarmap-core`.
//! - No user-facing text beyond what [`shawarmap_core::Locale`] supplies.

pub mod catalog;
pub mod discovery;
pub mod geolocation;

pub use catalog::{Catalog, CatalogError, Place, PlaceTag};
pub use discovery::{
    Discovery, DiscoveryQuery, FilterSet, Listing, PlaceFilter, SortOrder, UnknownFilter,
    UnknownSortOrder, discover, resolve_user_location,
};
pub use geolocation::{
    FixedLocationProvider, HttpLocationProvider, HttpLocationProviderConfig, ProviderBuildError,
};
