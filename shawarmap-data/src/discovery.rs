//! Filtering and ordering the catalogue for display.
//!
//! [`discover`] turns a [`Catalog`] plus an optional user position into the
//! listing shown by the front end. [`resolve_user_location`] is the start-up
//! flow that decides whether a position is available at all.

use std::cmp::Ordering;
use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use log::{debug, warn};
use shawarmap_core::{
    Locale, Locatable, LocationError, LocationService, PermissionState, UserLocation,
    sort_by_distance,
};
use thiserror::Error;

use crate::catalog::{Catalog, Place, PlaceTag};

/// A chip in the filter bar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum PlaceFilter {
    /// Places tagged kosher.
    Kosher,
    /// Places tagged halal.
    Halal,
    /// Places tagged vegan.
    Vegan,
    /// Places tagged spicy.
    Spicy,
    /// Price level 1.
    Budget,
    /// Price level 3.
    Premium,
}

impl PlaceFilter {
    /// Every filter in display order.
    pub const ALL: [Self; 6] = [
        Self::Kosher,
        Self::Halal,
        Self::Vegan,
        Self::Spicy,
        Self::Budget,
        Self::Premium,
    ];

    /// Identifier accepted by [`PlaceFilter::from_str`].
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Kosher => "kosher",
            Self::Halal => "halal",
            Self::Vegan => "vegan",
            Self::Spicy => "spicy",
            Self::Budget => "budget",
            Self::Premium => "premium",
        }
    }

    /// Whether `place` passes this filter.
    #[must_use]
    pub fn matches(self, place: &Place) -> bool {
        match self {
            Self::Kosher => place.has_tag(PlaceTag::Kosher),
            Self::Halal => place.has_tag(PlaceTag::Halal),
            Self::Vegan => place.has_tag(PlaceTag::Vegan),
            Self::Spicy => place.has_tag(PlaceTag::Spicy),
            Self::Budget => place.price_level == 1,
            Self::Premium => place.price_level == 3,
        }
    }
}

impl fmt::Display for PlaceFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned for an unrecognised filter identifier.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown filter {0:?}; expected one of kosher, halal, vegan, spicy, budget, premium")]
pub struct UnknownFilter(pub String);

impl FromStr for PlaceFilter {
    type Err = UnknownFilter;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "kosher" => Ok(Self::Kosher),
            "halal" => Ok(Self::Halal),
            "vegan" => Ok(Self::Vegan),
            "spicy" => Ok(Self::Spicy),
            "budget" | "cheap" => Ok(Self::Budget),
            "premium" => Ok(Self::Premium),
            _ => Err(UnknownFilter(s.to_owned())),
        }
    }
}

/// The active filter chips. All of them must match; an empty set matches
/// every place.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterSet {
    active: BTreeSet<PlaceFilter>,
}

impl FilterSet {
    /// No filters.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Flip `filter` on or off. Returns whether it is now active.
    pub fn toggle(&mut self, filter: PlaceFilter) -> bool {
        if self.active.remove(&filter) {
            false
        } else {
            self.active.insert(filter);
            true
        }
    }

    /// Activate `filter`.
    pub fn insert(&mut self, filter: PlaceFilter) {
        self.active.insert(filter);
    }

    /// Deactivate every filter.
    pub fn clear(&mut self) {
        self.active.clear();
    }

    /// Whether no filter is active.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.active.is_empty()
    }

    /// Whether `filter` is active.
    #[must_use]
    pub fn contains(&self, filter: PlaceFilter) -> bool {
        self.active.contains(&filter)
    }

    /// Active filters in display order.
    pub fn iter(&self) -> impl Iterator<Item = PlaceFilter> + '_ {
        self.active.iter().copied()
    }

    /// Whether `place` passes every active filter.
    #[must_use]
    pub fn matches(&self, place: &Place) -> bool {
        self.active.iter().all(|filter| filter.matches(place))
    }

    /// Parse a comma-separated list such as `"kosher, spicy"`.
    ///
    /// Blank entries are ignored and `all` clears the set, so `""` and
    /// `"all"` both mean no filtering.
    ///
    /// # Errors
    ///
    /// Returns [`UnknownFilter`] for the first unrecognised entry.
    pub fn parse_list(list: &str) -> Result<Self, UnknownFilter> {
        let mut set = Self::new();
        for entry in list.split(',').map(str::trim).filter(|e| !e.is_empty()) {
            if entry.eq_ignore_ascii_case("all") {
                set.clear();
            } else {
                set.insert(entry.parse()?);
            }
        }
        Ok(set)
    }
}

impl FromIterator<PlaceFilter> for FilterSet {
    fn from_iter<I: IntoIterator<Item = PlaceFilter>>(iter: I) -> Self {
        Self {
            active: iter.into_iter().collect(),
        }
    }
}

/// Listing order.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SortOrder {
    /// Highest rating first, more reviews breaking ties.
    #[default]
    Rating,
    /// Nearest first. Needs a user position.
    Distance,
    /// Cheapest first.
    Price,
}

impl SortOrder {
    /// Identifier accepted by [`SortOrder::from_str`].
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Rating => "rating",
            Self::Distance => "distance",
            Self::Price => "price",
        }
    }
}

impl fmt::Display for SortOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned for an unrecognised sort identifier.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown sort order {0:?}; expected rating, distance or price")]
pub struct UnknownSortOrder(pub String);

impl FromStr for SortOrder {
    type Err = UnknownSortOrder;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "rating" => Ok(Self::Rating),
            "distance" => Ok(Self::Distance),
            "price" => Ok(Self::Price),
            _ => Err(UnknownSortOrder(s.to_owned())),
        }
    }
}

/// What to show and in which order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DiscoveryQuery {
    /// Active filters.
    pub filters: FilterSet,
    /// Requested order. `None` means distance when a position is known and
    /// rating otherwise.
    pub sort: Option<SortOrder>,
    /// Maximum number of listings.
    pub limit: Option<usize>,
}

impl DiscoveryQuery {
    /// Set the filters.
    #[must_use]
    pub fn with_filters(mut self, filters: FilterSet) -> Self {
        self.filters = filters;
        self
    }

    /// Request a sort order.
    #[must_use]
    pub const fn with_sort(mut self, sort: SortOrder) -> Self {
        self.sort = Some(sort);
        self
    }

    /// Cap the number of listings.
    #[must_use]
    pub const fn with_limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }
}

/// One row of the listing.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Listing<'a> {
    /// The place shown.
    pub place: &'a Place,
    /// Distance from the user, when their position is known.
    pub distance_km: Option<f64>,
}

impl Listing<'_> {
    /// Distance formatted for `locale`, if known.
    #[must_use]
    pub fn formatted_distance(&self, locale: Locale) -> Option<String> {
        self.distance_km.map(|km| locale.format_distance(km))
    }
}

/// Result of [`discover`].
#[derive(Debug, Clone, PartialEq)]
pub struct Discovery<'a> {
    /// Matching places in display order.
    pub listings: Vec<Listing<'a>>,
    /// The order actually applied.
    pub sort: SortOrder,
    /// `true` when distance order was requested without a user position and
    /// rating order was used instead.
    pub fell_back: bool,
    /// The position distances were measured from.
    pub user: Option<UserLocation>,
}

/// Filter, annotate and sort `catalog` for display.
///
/// # Examples
///
/// ```
/// use shawarmap_core::{GeoPoint, UserLocation};
/// use shawarmap_data::{Catalog, DiscoveryQuery, SortOrder, discover};
///
/// let catalog = Catalog::sample()?;
/// let user = UserLocation::new(GeoPoint::new(32.08, 34.78));
/// let found = discover(&catalog, Some(&user), &DiscoveryQuery::default());
///
/// assert_eq!(found.sort, SortOrder::Distance);
/// assert_eq!(found.listings[0].place.name, "HaShamen");
/// # Ok::<(), shawarmap_data::CatalogError>(())
/// ```
#[must_use]
pub fn discover<'a>(
    catalog: &'a Catalog,
    user: Option<&UserLocation>,
    query: &DiscoveryQuery,
) -> Discovery<'a> {
    let requested = query.sort.unwrap_or(if user.is_some() {
        SortOrder::Distance
    } else {
        SortOrder::Rating
    });
    let matching = catalog.iter().filter(|place| query.filters.matches(place));

    let (mut listings, sort, fell_back) = match (requested, user) {
        (SortOrder::Distance, Some(origin)) => {
            let ranked = sort_by_distance(matching, origin)
                .into_iter()
                .map(|ranked| Listing {
                    place: ranked.candidate,
                    distance_km: Some(ranked.distance_km),
                })
                .collect();
            (ranked, SortOrder::Distance, false)
        }
        (SortOrder::Distance, None) => {
            warn!("distance sort requested without a user location; sorting by rating");
            let mut listings = annotate(matching, None);
            listings.sort_by(|a, b| by_rating(a.place, b.place));
            (listings, SortOrder::Rating, true)
        }
        (SortOrder::Rating, _) => {
            let mut listings = annotate(matching, user);
            listings.sort_by(|a, b| by_rating(a.place, b.place));
            (listings, SortOrder::Rating, false)
        }
        (SortOrder::Price, _) => {
            let mut listings = annotate(matching, user);
            listings.sort_by_key(|listing| listing.place.price_level);
            (listings, SortOrder::Price, false)
        }
    };

    if let Some(limit) = query.limit {
        listings.truncate(limit);
    }
    debug!("discovered {} places sorted by {sort}", listings.len());

    Discovery {
        listings,
        sort,
        fell_back,
        user: user.copied(),
    }
}

fn annotate<'a>(
    places: impl Iterator<Item = &'a Place>,
    user: Option<&UserLocation>,
) -> Vec<Listing<'a>> {
    places
        .map(|place| Listing {
            place,
            distance_km: user.map(|origin| origin.point.distance_km(&place.position())),
        })
        .collect()
}

fn by_rating(a: &Place, b: &Place) -> Ordering {
    b.rating
        .total_cmp(&a.rating)
        .then_with(|| b.reviews.cmp(&a.reviews))
}

/// Obtain the user's position at start-up.
///
/// A `Denied` permission short-circuits without requesting a fix. Otherwise
/// one fix is requested; failures are logged and returned so the caller can
/// continue without distances.
///
/// # Errors
///
/// Returns [`LocationError::PermissionDenied`] when permission is denied, or
/// the error from [`LocationService::current_location`].
pub async fn resolve_user_location(
    service: &LocationService,
) -> Result<UserLocation, LocationError> {
    let permission = service.check_permission().await;
    debug!("location permission is {permission}");
    if permission == PermissionState::Denied {
        return Err(LocationError::PermissionDenied);
    }
    service
        .current_location()
        .await
        .inspect_err(|err| warn!("continuing without a user location: {err}"))
}
