//! The catalogue of places shown on the map and in the list.
//!
//! Catalogues are JSON arrays of [`Place`] records. [`Catalog::sample`]
//! returns the built-in Tel Aviv dataset.

mod error;
mod place;

use std::collections::HashSet;

use camino::Utf8Path;
use shawarmap_core::GeoPoint;

pub use error::CatalogError;
pub use place::{Place, PlaceTag};

const SAMPLE_PLACES: &str = include_str!("../../data/sample_places.json");

/// Valid values for [`Place::price_level`].
const PRICE_LEVELS: std::ops::RangeInclusive<u8> = 1..=3;

/// A validated, non-empty set of places with unique identifiers.
///
/// # Examples
///
/// ```
/// use shawarmap_data::Catalog;
///
/// let catalog = Catalog::sample()?;
/// assert_eq!(catalog.len(), 5);
/// assert_eq!(catalog.get("5").map(|p| p.name.as_str()), Some("Miznon"));
/// # Ok::<(), shawarmap_data::CatalogError>(())
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Catalog {
    places: Vec<Place>,
}

impl Catalog {
    /// Validate and wrap `places`, preserving their order.
    ///
    /// # Errors
    ///
    /// Fails when the list is empty, an identifier repeats, a price level is
    /// outside `1..=3`, or coordinates are out of range.
    pub fn new(places: Vec<Place>) -> Result<Self, CatalogError> {
        if places.is_empty() {
            return Err(CatalogError::Empty);
        }
        let mut seen = HashSet::with_capacity(places.len());
        for place in &places {
            if !seen.insert(place.id.as_str()) {
                return Err(CatalogError::DuplicateId(place.id.clone()));
            }
            if !PRICE_LEVELS.contains(&place.price_level) {
                return Err(CatalogError::InvalidPriceLevel {
                    id: place.id.clone(),
                    level: place.price_level,
                });
            }
            GeoPoint::validated(place.lat, place.lng).map_err(|source| {
                CatalogError::InvalidCoordinates {
                    id: place.id.clone(),
                    source,
                }
            })?;
        }
        Ok(Self { places })
    }

    /// The built-in sample catalogue.
    ///
    /// # Errors
    ///
    /// Only fails if the bundled data is corrupt.
    pub fn sample() -> Result<Self, CatalogError> {
        Self::from_json_str(SAMPLE_PLACES)
    }

    /// Parse a JSON array of places.
    ///
    /// # Errors
    ///
    /// Fails on malformed JSON or any [`Catalog::new`] validation error.
    pub fn from_json_str(json: &str) -> Result<Self, CatalogError> {
        let places: Vec<Place> = serde_json::from_str(json)?;
        Self::new(places)
    }

    /// Read and parse a catalogue file.
    ///
    /// # Errors
    ///
    /// Fails when the file cannot be read or [`Catalog::from_json_str`]
    /// rejects its contents.
    pub fn from_path(path: &Utf8Path) -> Result<Self, CatalogError> {
        let json = std::fs::read_to_string(path).map_err(|source| CatalogError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&json)
    }

    /// Places in catalogue order.
    #[must_use]
    pub fn places(&self) -> &[Place] {
        &self.places
    }

    /// Iterate over places in catalogue order.
    pub fn iter(&self) -> std::slice::Iter<'_, Place> {
        self.places.iter()
    }

    /// Look a place up by identifier.
    #[must_use]
    pub fn get(&self, id: &str) -> Option<&Place> {
        self.places.iter().find(|place| place.id == id)
    }

    /// Number of places.
    #[must_use]
    pub fn len(&self) -> usize {
        self.places.len()
    }

    /// Always `false`; catalogues are never empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.places.is_empty()
    }
}

impl<'a> IntoIterator for &'a Catalog {
    type Item = &'a Place;
    type IntoIter = std::slice::Iter<'a, Place>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::{fixture, rstest};
    use std::collections::BTreeSet;
    use tempfile::TempDir;

    #[fixture]
    fn place() -> Place {
        Place {
            id: "a".to_owned(),
            name: "Stand".to_owned(),
            lat: 32.0,
            lng: 34.8,
            address: "Somewhere".to_owned(),
            rating: 4.0,
            reviews: 10,
            price_level: 1,
            cuisine: Vec::new(),
            tags: BTreeSet::new(),
            open_now: true,
        }
    }

    #[rstest]
    fn sample_catalogue_is_valid() {
        let catalog = Catalog::sample().expect("bundled data parses");
        let names: Vec<_> = catalog.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(
            names,
            [
                "Abu Hassan",
                "Shawarma HaKosem",
                "HaShamen",
                "Sabich Frishman",
                "Miznon"
            ]
        );
    }

    #[rstest]
    fn rejects_empty_catalogue() {
        assert!(matches!(Catalog::new(Vec::new()), Err(CatalogError::Empty)));
    }

    #[rstest]
    fn rejects_duplicate_ids(place: Place) {
        let err = Catalog::new(vec![place.clone(), place]).expect_err("duplicate");
        assert!(matches!(err, CatalogError::DuplicateId(id) if id == "a"));
    }

    #[rstest]
    #[case(0)]
    #[case(4)]
    fn rejects_out_of_range_price(mut place: Place, #[case] level: u8) {
        place.price_level = level;
        let err = Catalog::new(vec![place]).expect_err("bad price level");
        assert!(matches!(err, CatalogError::InvalidPriceLevel { level: l, .. } if l == level));
    }

    #[rstest]
    fn rejects_invalid_coordinates(mut place: Place) {
        place.lat = 123.0;
        let err = Catalog::new(vec![place]).expect_err("bad latitude");
        assert!(matches!(err, CatalogError::InvalidCoordinates { .. }));
    }

    #[rstest]
    fn reports_malformed_json() {
        let err = Catalog::from_json_str("{ not json").expect_err("malformed");
        assert!(matches!(err, CatalogError::Parse(_)));
    }

    #[rstest]
    fn loads_from_disk() {
        let dir = TempDir::new().expect("tempdir");
        let path = camino::Utf8PathBuf::from_path_buf(dir.path().join("places.json"))
            .expect("utf-8 path");
        std::fs::write(
            &path,
            r#"[{"id":"x","name":"Cart","lat":32.1,"lng":34.8,"address":"Port","rating":3.9,"reviews":4}]"#,
        )
        .expect("write catalogue");

        let catalog = Catalog::from_path(&path).expect("catalogue loads");

        let cart = catalog.get("x").expect("place present");
        assert_eq!(cart.price_level, 2);
        assert!(cart.open_now);
        assert!(cart.tags.is_empty());
    }

    #[rstest]
    fn missing_file_is_a_read_error() {
        let err = Catalog::from_path(Utf8Path::new("/nonexistent/places.json"))
            .expect_err("missing file");
        assert!(matches!(err, CatalogError::Read { .. }));
    }
}
