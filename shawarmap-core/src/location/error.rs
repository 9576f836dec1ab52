use thiserror::Error;

/// Why a position fix could not be obtained.
///
/// Each variant maps to a stable numeric code (see [`LocationError::code`]).
/// None of them is retried internally.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Error)]
pub enum LocationError {
    /// No location capability is available (code 0).
    #[error("location capability is not available")]
    Unsupported,
    /// The user or platform refused access (code 1).
    #[error("permission to access the location was denied")]
    PermissionDenied,
    /// The platform could not determine a position (code 2).
    #[error("position is unavailable")]
    PositionUnavailable,
    /// No fix arrived within the configured timeout (code 3).
    #[error("timed out waiting for a position fix")]
    Timeout,
}

impl LocationError {
    /// Numeric code of this error.
    ///
    /// # Examples
    ///
    /// ```
    /// use shawarmap_core::LocationError;
    ///
    /// assert_eq!(LocationError::Timeout.code(), 3);
    /// assert_eq!(LocationError::from_code(1), Some(LocationError::PermissionDenied));
    /// ```
    #[must_use]
    pub const fn code(self) -> u8 {
        match self {
            Self::Unsupported => 0,
            Self::PermissionDenied => 1,
            Self::PositionUnavailable => 2,
            Self::Timeout => 3,
        }
    }

    /// Inverse of [`LocationError::code`]; `None` for unknown codes.
    #[must_use]
    pub const fn from_code(code: u8) -> Option<Self> {
        match code {
            0 => Some(Self::Unsupported),
            1 => Some(Self::PermissionDenied),
            2 => Some(Self::PositionUnavailable),
            3 => Some(Self::Timeout),
            _ => None,
        }
    }
}

/// Errors from [`crate::LocationProvider::permission_state`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PermissionQueryError {
    /// The provider cannot report permission state.
    #[error("permission queries are not supported")]
    Unsupported,
    /// The query itself failed.
    #[error("permission query failed: {0}")]
    Failed(String),
}
