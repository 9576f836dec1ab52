use async_trait::async_trait;
use shawarmap_core::{
    GeoPoint, LocationError, LocationProvider, PermissionQueryError, PermissionState,
    PositionOptions, UserLocation,
};

/// Provider that always reports the same position.
///
/// Used when the position is supplied explicitly, for example from command
/// line coordinates. Permission is always granted.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FixedLocationProvider {
    location: UserLocation,
}

impl FixedLocationProvider {
    /// Report `location` on every request.
    #[must_use]
    pub const fn new(location: UserLocation) -> Self {
        Self { location }
    }

    /// Report `point` with no accuracy estimate.
    #[must_use]
    pub const fn at(point: GeoPoint) -> Self {
        Self::new(UserLocation::new(point))
    }

    /// The configured location.
    #[must_use]
    pub const fn location(&self) -> UserLocation {
        self.location
    }
}

#[async_trait]
impl LocationProvider for FixedLocationProvider {
    async fn current_position(
        &self,
        _options: &PositionOptions,
    ) -> Result<UserLocation, LocationError> {
        Ok(self.location)
    }

    async fn permission_state(&self) -> Result<PermissionState, PermissionQueryError> {
        Ok(PermissionState::Granted)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use shawarmap_core::LocationService;

    #[rstest]
    #[tokio::test]
    async fn service_sees_fixed_location() {
        let point = GeoPoint::new(32.0853, 34.7818);
        let service = LocationService::new(FixedLocationProvider::at(point));

        assert_eq!(service.check_permission().await, PermissionState::Granted);
        let location = service.current_location().await.expect("fixed fix");
        assert_eq!(location.point, point);
        assert_eq!(location.accuracy_m, None);
    }
}
