//! Test doubles for [`LocationProvider`].
//!
//! [`StubLocationProvider`] replays scripted fixes without touching any real
//! location capability. Clones share their script and call log, so a test
//! can hand one clone to a [`crate::LocationService`] and inspect the other.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex, PoisonError};

use async_trait::async_trait;

use crate::{
    GeoPoint, LocationError, LocationProvider, PermissionQueryError, PermissionState,
    PositionOptions, UserLocation,
};

/// Scripted `LocationProvider` for tests.
///
/// Responses are consumed in order; the final one repeats forever. An empty
/// script answers [`LocationError::PositionUnavailable`].
///
/// # Example
///
/// ```
/// use shawarmap_core::test_support::StubLocationProvider;
/// use shawarmap_core::{GeoPoint, LocationError, UserLocation};
///
/// let provider = StubLocationProvider::with_responses([
///     Err(LocationError::Timeout),
///     Ok(UserLocation::new(GeoPoint::new(32.08, 34.78))),
/// ]);
/// assert_eq!(provider.calls(), 0);
/// ```
#[derive(Debug, Clone)]
pub struct StubLocationProvider {
    state: Arc<Mutex<StubState>>,
}

#[derive(Debug)]
struct StubState {
    responses: VecDeque<StubResponse>,
    permission: Result<PermissionState, PermissionQueryError>,
    calls: usize,
    last_options: Option<PositionOptions>,
}

#[derive(Debug, Clone)]
enum StubResponse {
    Fix(Result<UserLocation, LocationError>),
    Hang,
}

impl StubLocationProvider {
    fn from_script<I>(responses: I) -> Self
    where
        I: IntoIterator<Item = StubResponse>,
    {
        Self {
            state: Arc::new(Mutex::new(StubState {
                responses: responses.into_iter().collect(),
                permission: Err(PermissionQueryError::Unsupported),
                calls: 0,
                last_options: None,
            })),
        }
    }

    /// Always answer with `location`.
    #[must_use]
    pub fn with_location(location: UserLocation) -> Self {
        Self::with_responses([Ok(location)])
    }

    /// Always answer with a location at `point`.
    #[must_use]
    pub fn at(point: GeoPoint) -> Self {
        Self::with_location(UserLocation::new(point))
    }

    /// Always fail with `error`.
    #[must_use]
    pub fn with_error(error: LocationError) -> Self {
        Self::with_responses([Err(error)])
    }

    /// Replay `responses` in order, repeating the last one.
    #[must_use]
    pub fn with_responses<I>(responses: I) -> Self
    where
        I: IntoIterator<Item = Result<UserLocation, LocationError>>,
    {
        Self::from_script(responses.into_iter().map(StubResponse::Fix))
    }

    /// Never answer, forcing the caller's timeout.
    #[must_use]
    pub fn hanging() -> Self {
        Self::from_script([StubResponse::Hang])
    }

    /// Report `state` from permission queries.
    #[must_use]
    pub fn with_permission(self, state: PermissionState) -> Self {
        self.state().permission = Ok(state);
        self
    }

    /// Fail permission queries with `error`.
    #[must_use]
    pub fn with_permission_error(self, error: PermissionQueryError) -> Self {
        self.state().permission = Err(error);
        self
    }

    /// Number of position requests received so far.
    #[must_use]
    pub fn calls(&self) -> usize {
        self.state().calls
    }

    /// Options passed with the latest position request.
    #[must_use]
    pub fn last_options(&self) -> Option<PositionOptions> {
        self.state().last_options
    }

    fn state(&self) -> std::sync::MutexGuard<'_, StubState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn next_response(&self, options: &PositionOptions) -> StubResponse {
        let mut state = self.state();
        state.calls += 1;
        state.last_options = Some(*options);
        if state.responses.len() > 1 {
            state
                .responses
                .pop_front()
                .unwrap_or(StubResponse::Fix(Err(LocationError::PositionUnavailable)))
        } else {
            state
                .responses
                .front()
                .cloned()
                .unwrap_or(StubResponse::Fix(Err(LocationError::PositionUnavailable)))
        }
    }
}

#[async_trait]
impl LocationProvider for StubLocationProvider {
    async fn current_position(
        &self,
        options: &PositionOptions,
    ) -> Result<UserLocation, LocationError> {
        match self.next_response(options) {
            StubResponse::Fix(result) => result,
            StubResponse::Hang => std::future::pending().await,
        }
    }

    async fn permission_state(&self) -> Result<PermissionState, PermissionQueryError> {
        self.state().permission.clone()
    }
}
