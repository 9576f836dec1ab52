//! Location provider trait and request options.

use std::fmt;
use std::time::Duration;

use async_trait::async_trait;

use super::error::{LocationError, PermissionQueryError};
use crate::UserLocation;

/// Tuning for a single position request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PositionOptions {
    /// Ask the platform for its most precise source.
    pub high_accuracy: bool,
    /// Give up after this long.
    pub timeout: Duration,
    /// Accept a cached fix no older than this.
    pub maximum_age: Duration,
}

impl PositionOptions {
    /// Defaults for a one-shot request: high accuracy, 10 s timeout, fixes up
    /// to 60 s old.
    pub const ONE_SHOT: Self = Self {
        high_accuracy: true,
        timeout: Duration::from_secs(10),
        maximum_age: Duration::from_secs(60),
    };

    /// Defaults for each fix of a watch: high accuracy, 5 s timeout, fixes up
    /// to 30 s old.
    pub const WATCH: Self = Self {
        high_accuracy: true,
        timeout: Duration::from_secs(5),
        maximum_age: Duration::from_secs(30),
    };

    /// Set the request timeout.
    #[must_use]
    pub const fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Set the oldest acceptable cached fix.
    #[must_use]
    pub const fn with_maximum_age(mut self, maximum_age: Duration) -> Self {
        self.maximum_age = maximum_age;
        self
    }

    /// Toggle high-accuracy mode.
    #[must_use]
    pub const fn with_high_accuracy(mut self, high_accuracy: bool) -> Self {
        self.high_accuracy = high_accuracy;
        self
    }
}

impl Default for PositionOptions {
    fn default() -> Self {
        Self::ONE_SHOT
    }
}

/// Whether the platform lets us read the user's position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "lowercase")
)]
pub enum PermissionState {
    /// Access is allowed.
    Granted,
    /// Access is refused.
    Denied,
    /// The user has not decided yet; an explicit request will ask them.
    Prompt,
}

impl PermissionState {
    /// Lowercase name, matching the web permission states.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Granted => "granted",
            Self::Denied => "denied",
            Self::Prompt => "prompt",
        }
    }
}

impl fmt::Display for PermissionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A source of position fixes.
///
/// Implementations should honour `options` as far as the underlying
/// capability allows. [`crate::LocationService`] enforces the timeout
/// regardless, so a provider that ignores it is still bounded.
///
/// # Examples
///
/// ```
/// use async_trait::async_trait;
/// use shawarmap_core::{
///     GeoPoint, LocationError, LocationProvider, PositionOptions, UserLocation,
/// };
///
/// struct Jaffa;
///
/// #[async_trait]
/// impl LocationProvider for Jaffa {
///     async fn current_position(
///         &self,
///         _options: &PositionOptions,
///     ) -> Result<UserLocation, LocationError> {
///         Ok(UserLocation::new(GeoPoint::new(32.0543, 34.7516)))
///     }
/// }
/// ```
#[async_trait]
pub trait LocationProvider: Send + Sync {
    /// Resolve a single position fix.
    async fn current_position(
        &self,
        options: &PositionOptions,
    ) -> Result<UserLocation, LocationError>;

    /// Report the current permission state.
    ///
    /// The default implementation reports that permission queries are not
    /// supported.
    async fn permission_state(&self) -> Result<PermissionState, PermissionQueryError> {
        Err(PermissionQueryError::Unsupported)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn one_shot_defaults() {
        let options = PositionOptions::default();
        assert!(options.high_accuracy);
        assert_eq!(options.timeout, Duration::from_secs(10));
        assert_eq!(options.maximum_age, Duration::from_secs(60));
    }

    #[rstest]
    fn watch_defaults() {
        let options = PositionOptions::WATCH;
        assert_eq!(options.timeout, Duration::from_secs(5));
        assert_eq!(options.maximum_age, Duration::from_secs(30));
    }

    #[rstest]
    fn builder_overrides_fields() {
        let options = PositionOptions::ONE_SHOT
            .with_timeout(Duration::from_secs(1))
            .with_maximum_age(Duration::ZERO)
            .with_high_accuracy(false);
        assert_eq!(options.timeout, Duration::from_secs(1));
        assert_eq!(options.maximum_age, Duration::ZERO);
        assert!(!options.high_accuracy);
    }

    #[rstest]
    fn permission_names_match_web_states() {
        assert_eq!(PermissionState::Granted.to_string(), "granted");
        assert_eq!(PermissionState::Denied.to_string(), "denied");
        assert_eq!(PermissionState::Prompt.to_string(), "prompt");
    }
}
