//! Concrete [`shawarmap_core::LocationProvider`] implementations.
//!
//! - [`FixedLocationProvider`] answers with configured coordinates, for
//!   users who type their position in.
//! - [`HttpLocationProvider`] estimates the position from the caller's IP
//!   address through a JSON geolocation endpoint.
//!
//! # Example
//!
//! ```no_run
//! use std::time::Duration;
//! use shawarmap_core::LocationService;
//! use shawarmap_data::geolocation::{HttpLocationProvider, HttpLocationProviderConfig};
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let config = HttpLocationProviderConfig::default()
//!     .with_timeout(Duration::from_secs(5))
//!     .with_user_agent("my-app/1.0");
//! let service = LocationService::new(HttpLocationProvider::with_config(config)?);
//! let here = service.current_location().await?;
//! println!("{}", here.point);
//! # Ok(())
//! # }
//! ```

mod fixed;
mod http;
mod ipapi;

pub use fixed::FixedLocationProvider;
pub use http::{
    DEFAULT_ENDPOINT, DEFAULT_USER_AGENT, HttpLocationProvider, HttpLocationProviderConfig,
    ProviderBuildError,
};
