//! IP-based [`LocationProvider`] backed by an HTTP JSON endpoint.

use std::sync::{Mutex, PoisonError};
use std::time::Duration;

use async_trait::async_trait;
use log::{debug, warn};
use reqwest::Client;
use shawarmap_core::{
    GeoPoint, LocationError, LocationProvider, PermissionQueryError, PermissionState,
    PositionOptions, UserLocation,
};
use thiserror::Error;
use tokio::time::Instant;
use url::Url;

use super::ipapi::IpApiResponse;

/// Default IP geolocation endpoint.
pub const DEFAULT_ENDPOINT: &str = "https://ipapi.co/json/";

/// Default user agent for geolocation requests.
pub const DEFAULT_USER_AGENT: &str = "shawarmap/0.1";

/// Default request timeout in seconds.
const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// Error type for [`HttpLocationProvider`] construction failures.
#[derive(Debug, Error)]
pub enum ProviderBuildError {
    /// Failed to build the HTTP client.
    #[error("failed to build HTTP client: {0}")]
    HttpClient(#[source] reqwest::Error),
    /// The endpoint is not a valid URL.
    #[error("invalid geolocation endpoint: {0}")]
    InvalidEndpoint(#[from] url::ParseError),
}

/// Configuration for [`HttpLocationProvider`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpLocationProviderConfig {
    /// Geolocation endpoint URL.
    pub endpoint: String,
    /// Upper bound on each request, in addition to the caller's timeout.
    pub timeout: Duration,
    /// User agent string for requests.
    pub user_agent: String,
}

impl Default for HttpLocationProviderConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_owned(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            user_agent: DEFAULT_USER_AGENT.to_owned(),
        }
    }
}

impl HttpLocationProviderConfig {
    /// Create a configuration for `endpoint`.
    #[must_use]
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
            ..Default::default()
        }
    }

    /// Set the request timeout.
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Set the user agent string.
    #[must_use]
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }
}

#[derive(Debug, Clone, Copy)]
struct CachedFix {
    location: UserLocation,
    fetched_at: Instant,
}

/// Estimates the user's position from their public IP address.
///
/// A fix younger than [`PositionOptions::maximum_age`] is reused without a
/// request. Request timeouts map to [`LocationError::Timeout`]; every other
/// failure is [`LocationError::PositionUnavailable`]. No user prompt exists,
/// so permission is always granted.
#[derive(Debug)]
pub struct HttpLocationProvider {
    client: Client,
    endpoint: Url,
    config: HttpLocationProviderConfig,
    cache: Mutex<Option<CachedFix>>,
}

impl HttpLocationProvider {
    /// Create a provider for `endpoint` with default settings.
    ///
    /// # Errors
    ///
    /// Returns an error if the endpoint is not a URL or the HTTP client
    /// fails to build.
    pub fn new(endpoint: impl Into<String>) -> Result<Self, ProviderBuildError> {
        Self::with_config(HttpLocationProviderConfig::new(endpoint))
    }

    /// Create a provider with explicit configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the endpoint is not a URL or the HTTP client
    /// fails to build.
    pub fn with_config(config: HttpLocationProviderConfig) -> Result<Self, ProviderBuildError> {
        let endpoint = Url::parse(&config.endpoint)?;
        let client = Client::builder()
            .user_agent(&config.user_agent)
            .connect_timeout(config.timeout)
            .timeout(config.timeout)
            .build()
            .map_err(ProviderBuildError::HttpClient)?;
        Ok(Self {
            client,
            endpoint,
            config,
            cache: Mutex::new(None),
        })
    }

    /// Active configuration.
    #[must_use]
    pub fn config(&self) -> &HttpLocationProviderConfig {
        &self.config
    }

    async fn fetch(&self, options: &PositionOptions) -> Result<UserLocation, LocationError> {
        let response = self
            .client
            .get(self.endpoint.clone())
            .timeout(options.timeout.min(self.config.timeout))
            .send()
            .await
            .map_err(|err| self.convert_reqwest_error(&err))?
            .error_for_status()
            .map_err(|err| self.convert_reqwest_error(&err))?;

        let body: IpApiResponse = response.json().await.map_err(|err| {
            warn!("malformed geolocation response from {}: {err}", self.endpoint);
            LocationError::PositionUnavailable
        })?;

        convert_response(body)
    }

    /// Convert a reqwest error to a `LocationError`.
    fn convert_reqwest_error(&self, error: &reqwest::Error) -> LocationError {
        if error.is_timeout() {
            debug!("geolocation request to {} timed out", self.endpoint);
            return LocationError::Timeout;
        }
        match error.status() {
            Some(status) => warn!("geolocation service {} answered {status}", self.endpoint),
            None => warn!("geolocation request to {} failed: {error}", self.endpoint),
        }
        LocationError::PositionUnavailable
    }

    fn cached(&self, maximum_age: Duration) -> Option<UserLocation> {
        let cache = *self.cache.lock().unwrap_or_else(PoisonError::into_inner);
        cache
            .filter(|fix| fix.fetched_at.elapsed() <= maximum_age)
            .map(|fix| fix.location)
    }

    fn remember(&self, location: UserLocation) {
        *self.cache.lock().unwrap_or_else(PoisonError::into_inner) = Some(CachedFix {
            location,
            fetched_at: Instant::now(),
        });
    }
}

/// Convert a geolocation response to a `UserLocation`.
fn convert_response(response: IpApiResponse) -> Result<UserLocation, LocationError> {
    if response.error {
        warn!(
            "geolocation service refused: {}",
            response.reason.as_deref().unwrap_or("no reason given")
        );
        return Err(LocationError::PositionUnavailable);
    }
    let (Some(latitude), Some(longitude)) = (response.latitude, response.longitude) else {
        warn!("geolocation response missing coordinates");
        return Err(LocationError::PositionUnavailable);
    };
    let point = GeoPoint::validated(latitude, longitude).map_err(|err| {
        warn!("geolocation response has invalid coordinates: {err}");
        LocationError::PositionUnavailable
    })?;
    let location = UserLocation::new(point);
    Ok(match response.accuracy.filter(|m| m.is_finite() && *m >= 0.0) {
        Some(metres) => location.with_accuracy(metres),
        None => location,
    })
}

#[async_trait]
impl LocationProvider for HttpLocationProvider {
    async fn current_position(
        &self,
        options: &PositionOptions,
    ) -> Result<UserLocation, LocationError> {
        if let Some(location) = self.cached(options.maximum_age) {
            debug!("reusing cached IP geolocation fix");
            return Ok(location);
        }
        let location = self.fetch(options).await?;
        self.remember(location);
        Ok(location)
    }

    async fn permission_state(&self) -> Result<PermissionState, PermissionQueryError> {
        Ok(PermissionState::Granted)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::{fixture, rstest};

    #[fixture]
    fn provider() -> HttpLocationProvider {
        HttpLocationProvider::new("http://localhost:8080/json/").expect("provider should build")
    }

    #[rstest]
    fn convert_response_handles_success() {
        let response = IpApiResponse {
            latitude: Some(32.0809),
            longitude: Some(34.7806),
            accuracy: Some(5000.0),
            ..IpApiResponse::default()
        };

        let location = convert_response(response).expect("should convert");

        assert_eq!(location.point, GeoPoint::new(32.0809, 34.7806));
        assert_eq!(location.accuracy_m, Some(5000.0));
    }

    #[rstest]
    #[case(IpApiResponse { error: true, reason: Some("RateLimited".to_owned()), ..IpApiResponse::default() })]
    #[case(IpApiResponse { latitude: Some(32.0), ..IpApiResponse::default() })]
    #[case(IpApiResponse { latitude: Some(132.0), longitude: Some(34.0), ..IpApiResponse::default() })]
    fn convert_response_reports_unavailable(#[case] response: IpApiResponse) {
        assert_eq!(
            convert_response(response),
            Err(LocationError::PositionUnavailable)
        );
    }

    #[rstest]
    fn convert_response_ignores_negative_accuracy() {
        let response = IpApiResponse {
            latitude: Some(0.0),
            longitude: Some(0.0),
            accuracy: Some(-1.0),
            ..IpApiResponse::default()
        };
        let location = convert_response(response).expect("should convert");
        assert_eq!(location.accuracy_m, None);
    }

    #[rstest]
    fn rejects_invalid_endpoint() {
        let err = HttpLocationProvider::new("not a url").expect_err("should fail");
        assert!(matches!(err, ProviderBuildError::InvalidEndpoint(_)));
    }

    #[rstest]
    #[tokio::test(start_paused = true)]
    async fn cache_honours_maximum_age(provider: HttpLocationProvider) {
        let fix = UserLocation::new(GeoPoint::new(32.08, 34.78));
        assert_eq!(provider.cached(Duration::from_secs(60)), None);

        provider.remember(fix);
        tokio::time::advance(Duration::from_secs(30)).await;
        assert_eq!(provider.cached(Duration::from_secs(60)), Some(fix));
        assert_eq!(provider.cached(Duration::from_secs(10)), None);

        tokio::time::advance(Duration::from_secs(31)).await;
        assert_eq!(provider.cached(Duration::from_secs(60)), None);
    }

    #[rstest]
    #[tokio::test(start_paused = true)]
    async fn fresh_cache_skips_the_network(provider: HttpLocationProvider) {
        let fix = UserLocation::new(GeoPoint::new(32.08, 34.78));
        provider.remember(fix);

        let location = provider
            .current_position(&PositionOptions::ONE_SHOT)
            .await
            .expect("cached fix");

        assert_eq!(location, fix);
    }

    #[rstest]
    #[tokio::test]
    async fn permission_is_granted(provider: HttpLocationProvider) {
        assert_eq!(
            provider.permission_state().await,
            Ok(PermissionState::Granted)
        );
    }

    #[rstest]
    fn config_builder_pattern() {
        let config = HttpLocationProviderConfig::new("http://example.com/json")
            .with_timeout(Duration::from_secs(3))
            .with_user_agent("test-agent/1.0");

        assert_eq!(config.endpoint, "http://example.com/json");
        assert_eq!(config.timeout, Duration::from_secs(3));
        assert_eq!(config.user_agent, "test-agent/1.0");
        assert_eq!(
            HttpLocationProviderConfig::default().endpoint,
            DEFAULT_ENDPOINT
        );
    }
}
