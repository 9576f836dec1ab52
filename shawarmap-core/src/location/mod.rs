//! Acquire the user's position from a platform capability.
//!
//! The [`LocationProvider`] trait abstracts whatever can produce a position
//! fix: a browser bridge, an IP lookup, fixed coordinates or a test double.
//! [`LocationService`] wraps one provider, enforces request timeouts, keeps
//! the most recent fix and manages at most one continuous watch.
//!
//! Failures are reported as [`LocationError`] codes; turning them into text
//! is the job of [`crate::Locale`].

mod error;
mod provider;
mod service;

pub use error::{LocationError, PermissionQueryError};
pub use provider::{LocationProvider, PermissionState, PositionOptions};
pub use service::{LocationService, LocationServiceConfig, WatchObserver, WatchStart};
