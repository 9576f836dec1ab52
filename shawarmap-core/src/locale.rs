//! Human-readable text for the supported locales.
//!
//! Everything user-facing lives here; the rest of the crate returns
//! structured values only.

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

use crate::{LocationError, PermissionState};

/// Presentation locale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "lowercase")
)]
pub enum Locale {
    /// English, left-to-right.
    #[default]
    English,
    /// Hebrew, right-to-left.
    Hebrew,
}

/// Returned when parsing an unsupported locale tag.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unsupported locale {0:?} (expected `en` or `he`)")]
pub struct UnknownLocale(pub String);

impl Locale {
    /// BCP 47 language tag.
    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            Self::English => "en",
            Self::Hebrew => "he",
        }
    }

    /// Whether text in this locale runs right-to-left.
    #[must_use]
    pub const fn is_rtl(self) -> bool {
        matches!(self, Self::Hebrew)
    }

    const fn metre_suffix(self) -> &'static str {
        match self {
            Self::English => "m",
            Self::Hebrew => "מ'",
        }
    }

    const fn kilometre_suffix(self) -> &'static str {
        match self {
            Self::English => "km",
            Self::Hebrew => "ק\"מ",
        }
    }

    /// Render a distance for display.
    ///
    /// Distances below one kilometre are shown as whole metres; longer ones
    /// as kilometres with one decimal. Both round half away from zero.
    ///
    /// # Examples
    ///
    /// ```
    /// use shawarmap_core::Locale;
    ///
    /// assert_eq!(Locale::English.format_distance(0.3), "300 m");
    /// assert_eq!(Locale::English.format_distance(2.04), "2.0 km");
    /// assert_eq!(Locale::Hebrew.format_distance(1.25), "1.3 ק\"מ");
    /// ```
    #[must_use]
    pub fn format_distance(self, distance_km: f64) -> String {
        if distance_km < 1.0 {
            let metres = (distance_km * 1000.0).round();
            format!("{metres:.0} {}", self.metre_suffix())
        } else {
            let tenths = (distance_km * 10.0).round() / 10.0;
            format!("{tenths:.1} {}", self.kilometre_suffix())
        }
    }

    /// Message explaining why the position could not be obtained.
    #[must_use]
    pub const fn location_error_message(self, error: LocationError) -> &'static str {
        match (self, error) {
            (Self::English, LocationError::Unsupported) => {
                "Location services are not supported on this device"
            }
            (Self::English, LocationError::PermissionDenied) => {
                "Location access was denied by the user"
            }
            (Self::English, LocationError::PositionUnavailable) => "Location is unavailable",
            (Self::English, LocationError::Timeout) => "Timed out while getting the location",
            (Self::Hebrew, LocationError::Unsupported) => "הדפדפן שלך אינו תומך במיקום גיאוגרפי",
            (Self::Hebrew, LocationError::PermissionDenied) => "גישה למיקום נדחתה על ידי המשתמש",
            (Self::Hebrew, LocationError::PositionUnavailable) => "מיקום לא זמין",
            (Self::Hebrew, LocationError::Timeout) => "תם הזמן לקבלת המיקום",
        }
    }

    /// Short description of a permission state.
    #[must_use]
    pub const fn permission_label(self, state: PermissionState) -> &'static str {
        match (self, state) {
            (Self::English, PermissionState::Granted) => "Location access granted",
            (Self::English, PermissionState::Denied) => "Location access blocked",
            (Self::English, PermissionState::Prompt) => "Location access not yet requested",
            (Self::Hebrew, PermissionState::Granted) => "הגישה למיקום אושרה",
            (Self::Hebrew, PermissionState::Denied) => "הגישה למיקום חסומה",
            (Self::Hebrew, PermissionState::Prompt) => "טרם התבקשה גישה למיקום",
        }
    }

    /// Opening-status badge text.
    #[must_use]
    pub const fn open_label(self, open: bool) -> &'static str {
        match (self, open) {
            (Self::English, true) => "Open",
            (Self::English, false) => "Closed",
            (Self::Hebrew, true) => "פתוח",
            (Self::Hebrew, false) => "סגור",
        }
    }

    /// Shown when no place matches the active filters.
    #[must_use]
    pub const fn no_places_message(self) -> &'static str {
        match self {
            Self::English => "No places match your filters",
            Self::Hebrew => "לא נמצאו מקומות מתאימים",
        }
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Locale {
    type Err = UnknownLocale;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "en" | "english" => Ok(Self::English),
            "he" | "iw" | "hebrew" => Ok(Self::Hebrew),
            _ => Err(UnknownLocale(s.to_owned())),
        }
    }
}

/// [`Locale::format_distance`] in English.
#[must_use]
pub fn format_distance(distance_km: f64) -> String {
    Locale::English.format_distance(distance_km)
}
