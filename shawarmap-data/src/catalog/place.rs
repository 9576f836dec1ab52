use std::collections::BTreeSet;
use std::fmt;

use serde::{Deserialize, Serialize};
use shawarmap_core::{GeoPoint, Locatable};

/// Dietary and flavour tags shown on a place card.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PlaceTag {
    /// Certified kosher.
    Kosher,
    /// Certified halal.
    Halal,
    /// Has vegan options.
    Vegan,
    /// Known for heat.
    Spicy,
}

impl PlaceTag {
    /// Lower-case identifier used in JSON and on the command line.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Kosher => "kosher",
            Self::Halal => "halal",
            Self::Vegan => "vegan",
            Self::Spicy => "spicy",
        }
    }
}

impl fmt::Display for PlaceTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

const fn default_price_level() -> u8 {
    2
}

const fn default_open_now() -> bool {
    true
}

/// A shawarma stand or restaurant.
///
/// Missing `price_level` defaults to 2 and missing `open_now` to `true`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Place {
    /// Unique identifier within a catalogue.
    pub id: String,
    /// Display name.
    pub name: String,
    /// Latitude in degrees.
    pub lat: f64,
    /// Longitude in degrees.
    pub lng: f64,
    /// Street address.
    pub address: String,
    /// Average rating out of 5.
    pub rating: f64,
    /// Number of reviews behind `rating`.
    pub reviews: u32,
    /// Price band from 1 (cheap) to 3 (premium).
    #[serde(default = "default_price_level")]
    pub price_level: u8,
    /// Cuisine labels.
    #[serde(default)]
    pub cuisine: Vec<String>,
    /// Dietary and flavour tags.
    #[serde(default)]
    pub tags: BTreeSet<PlaceTag>,
    /// Whether the place is currently open.
    #[serde(default = "default_open_now")]
    pub open_now: bool,
}

impl Place {
    /// Whether the place carries `tag`.
    #[must_use]
    pub fn has_tag(&self, tag: PlaceTag) -> bool {
        self.tags.contains(&tag)
    }

    /// Price band rendered as shekel signs, e.g. `"₪₪"`.
    #[must_use]
    pub fn price_symbol(&self) -> String {
        "₪".repeat(usize::from(self.price_level))
    }
}

impl Locatable for Place {
    fn position(&self) -> GeoPoint {
        GeoPoint::new(self.lat, self.lng)
    }
}
