//! Great-circle distances and proximity ordering.

use crate::{GeoPoint, UserLocation};

/// Mean Earth radius used by [`calculate_distance`], in kilometres.
pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// Haversine distance in kilometres between two positions given in degrees.
///
/// The function is pure and performs no validation.
///
/// # Examples
///
/// ```
/// use shawarmap_core::calculate_distance;
///
/// let one_degree = calculate_distance(0.0, 0.0, 1.0, 0.0);
/// assert!((one_degree - 111.19).abs() < 0.01);
/// ```
#[must_use]
pub fn calculate_distance(lat1: f64, lon1: f64, lat2: f64, lon2: f64) -> f64 {
    let d_lat = (lat2 - lat1).to_radians();
    let d_lon = (lon2 - lon1).to_radians();
    let half_chord = (d_lat / 2.0).sin().powi(2)
        + lat1.to_radians().cos() * lat2.to_radians().cos() * (d_lon / 2.0).sin().powi(2);
    // Rounding can push near-antipodal inputs a hair past 1.0.
    let half_chord = half_chord.clamp(0.0, 1.0);
    let angle = 2.0 * half_chord.sqrt().atan2((1.0 - half_chord).sqrt());
    EARTH_RADIUS_KM * angle
}

/// Anything with a geographic position.
///
/// Implemented for references so callers can rank borrowed records without
/// cloning them.
pub trait Locatable {
    /// The position used for distance calculations.
    fn position(&self) -> GeoPoint;
}

impl<T: Locatable + ?Sized> Locatable for &T {
    fn position(&self) -> GeoPoint {
        (**self).position()
    }
}

impl Locatable for GeoPoint {
    fn position(&self) -> GeoPoint {
        *self
    }
}

impl Locatable for UserLocation {
    fn position(&self) -> GeoPoint {
        self.point
    }
}

/// A candidate annotated with its distance from an origin.
///
/// The distance only describes the origin used for the sort that produced
/// this value.
#[derive(Debug, Clone, PartialEq)]
pub struct Ranked<T> {
    /// The ranked candidate.
    pub candidate: T,
    /// Distance from the origin in kilometres.
    pub distance_km: f64,
}

impl<T> Ranked<T> {
    /// Discard the distance and return the record.
    pub fn into_inner(self) -> T {
        self.candidate
    }
}

/// Rank `candidates` by increasing distance from `origin`.
///
/// Returns a new vector; equidistant candidates keep their input order. NaN
/// distances, which only arise from non-finite input, sort last.
///
/// # Examples
///
/// ```
/// use shawarmap_core::{GeoPoint, UserLocation, sort_by_distance};
///
/// let user = UserLocation::new(GeoPoint::new(32.08, 34.78));
/// let places = [GeoPoint::new(32.0641, 34.7696), GeoPoint::new(32.0849, 34.7806)];
///
/// let ranked = sort_by_distance(&places, &user);
/// assert_eq!(*ranked[0].candidate, places[1]);
/// assert!(ranked[0].distance_km < ranked[1].distance_km);
/// ```
pub fn sort_by_distance<I, O>(candidates: I, origin: &O) -> Vec<Ranked<I::Item>>
where
    I: IntoIterator,
    I::Item: Locatable,
    O: Locatable + ?Sized,
{
    let origin = origin.position();
    let mut ranked: Vec<_> = candidates
        .into_iter()
        .map(|candidate| {
            let distance_km = origin.distance_km(&candidate.position());
            Ranked {
                candidate,
                distance_km,
            }
        })
        .collect();
    // `sort_by` is stable.
    ranked.sort_by(|a, b| a.distance_km.total_cmp(&b.distance_km));
    ranked
}
