//! Response body of an ipapi-style IP geolocation endpoint.
//!
//! Successful answers carry `latitude` and `longitude`. Failures set
//! `error: true` and explain themselves in `reason`.

use serde::Deserialize;

/// IP geolocation response.
#[derive(Debug, Default, Deserialize)]
pub struct IpApiResponse {
    /// Latitude in degrees.
    pub latitude: Option<f64>,
    /// Longitude in degrees.
    pub longitude: Option<f64>,
    /// Accuracy radius in metres, when the service reports one.
    pub accuracy: Option<f64>,
    /// Set when the service could not answer.
    #[serde(default)]
    pub error: bool,
    /// Explanation accompanying `error`.
    pub reason: Option<String>,
}
