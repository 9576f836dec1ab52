//! Behavioural tests for `sort_by_distance`.

use rstest::fixture;
use rstest_bdd_macros::{given, scenario, then, when};
use shawarmap_core::{
    EARTH_RADIUS_KM, GeoPoint, Locatable, Ranked, UserLocation, sort_by_distance,
};
use std::cell::RefCell;

#[derive(Debug, Clone, PartialEq)]
struct Stand {
    name: &'static str,
    at: GeoPoint,
}

impl Locatable for Stand {
    fn position(&self) -> GeoPoint {
        self.at
    }
}

fn north_of_equator(name: &'static str, km: f64) -> Stand {
    Stand {
        name,
        at: GeoPoint::new((km / EARTH_RADIUS_KM).to_degrees(), 0.0),
    }
}

#[fixture]
fn user() -> RefCell<UserLocation> {
    RefCell::new(UserLocation::new(GeoPoint::new(0.0, 0.0)))
}

#[fixture]
fn stands() -> RefCell<Vec<Stand>> {
    RefCell::new(Vec::new())
}

#[fixture]
fn ranking() -> RefCell<Vec<Ranked<Stand>>> {
    RefCell::new(Vec::new())
}

#[given("a user at the equator")]
fn user_at_equator(#[from(user)] user: &RefCell<UserLocation>) {
    *user.borrow_mut() = UserLocation::new(GeoPoint::new(0.0, 0.0));
}

#[given("a user near Rabin Square in Tel Aviv")]
fn user_in_tel_aviv(#[from(user)] user: &RefCell<UserLocation>) {
    *user.borrow_mut() = UserLocation::new(GeoPoint::new(32.08, 34.78));
}

#[given("places 5, 1 and 3 kilometres north of the user")]
fn scattered_places(#[from(stands)] stands: &RefCell<Vec<Stand>>) {
    *stands.borrow_mut() = vec![
        north_of_equator("five", 5.0),
        north_of_equator("one", 1.0),
        north_of_equator("three", 3.0),
    ];
}

#[given("two places exactly 2 kilometres away to the north and south")]
fn equidistant_places(#[from(stands)] stands: &RefCell<Vec<Stand>>) {
    let north = north_of_equator("north", 2.0);
    let south = Stand {
        name: "south",
        at: GeoPoint::new(-north.at.latitude, 0.0),
    };
    *stands.borrow_mut() = vec![north, south];
}

#[given("the Abu Hassan, HaKosem and HaShamen stands")]
fn tel_aviv_stands(#[from(stands)] stands: &RefCell<Vec<Stand>>) {
    *stands.borrow_mut() = vec![
        Stand {
            name: "Abu Hassan",
            at: GeoPoint::new(32.0641, 34.7696),
        },
        Stand {
            name: "HaKosem",
            at: GeoPoint::new(32.0753, 34.7778),
        },
        Stand {
            name: "HaShamen",
            at: GeoPoint::new(32.0849, 34.7806),
        },
    ];
}

#[when("I rank the places by distance")]
fn rank(
    #[from(user)] user: &RefCell<UserLocation>,
    #[from(stands)] stands: &RefCell<Vec<Stand>>,
    #[from(ranking)] ranking: &RefCell<Vec<Ranked<Stand>>>,
) {
    let input = stands.borrow().clone();
    *ranking.borrow_mut() = sort_by_distance(input, &*user.borrow());
}

#[then("the ranked distances are 1, 3 and 5 kilometres")]
fn distances_ascending(#[from(ranking)] ranking: &RefCell<Vec<Ranked<Stand>>>) {
    let ranking = ranking.borrow();
    let names: Vec<_> = ranking.iter().map(|r| r.candidate.name).collect();
    assert_eq!(names, ["one", "three", "five"]);
    for (entry, expected) in ranking.iter().zip([1.0, 3.0, 5.0]) {
        assert!((entry.distance_km - expected).abs() < 1e-9);
    }
}

#[then("the northern place is listed before the southern place")]
fn ties_stable(#[from(ranking)] ranking: &RefCell<Vec<Ranked<Stand>>>) {
    let ranking = ranking.borrow();
    let names: Vec<_> = ranking.iter().map(|r| r.candidate.name).collect();
    assert_eq!(names, ["north", "south"]);
}

#[then("the ranking is empty")]
fn ranking_empty(#[from(ranking)] ranking: &RefCell<Vec<Ranked<Stand>>>) {
    assert!(ranking.borrow().is_empty());
}

#[then("the order is HaShamen, HaKosem then Abu Hassan")]
fn tel_aviv_order(#[from(ranking)] ranking: &RefCell<Vec<Ranked<Stand>>>) {
    let ranking = ranking.borrow();
    let names: Vec<_> = ranking.iter().map(|r| r.candidate.name).collect();
    assert_eq!(names, ["HaShamen", "HaKosem", "Abu Hassan"]);
}

#[then("each distance matches the haversine reference")]
fn tel_aviv_distances(#[from(ranking)] ranking: &RefCell<Vec<Ranked<Stand>>>) {
    let expected = [0.547_779_670_6, 0.562_221_592_1, 2.021_408_741_3];
    for (entry, km) in ranking.borrow().iter().zip(expected) {
        assert!(
            (entry.distance_km - km).abs() < 1e-3,
            "{} was {} km, expected {km}",
            entry.candidate.name,
            entry.distance_km
        );
    }
}

#[scenario(path = "tests/features/proximity.feature", index = 0)]
fn nearest_first(
    user: RefCell<UserLocation>,
    stands: RefCell<Vec<Stand>>,
    ranking: RefCell<Vec<Ranked<Stand>>>,
) {
    let _ = (user, stands, ranking);
}

#[scenario(path = "tests/features/proximity.feature", index = 1)]
fn equidistant_stable(
    user: RefCell<UserLocation>,
    stands: RefCell<Vec<Stand>>,
    ranking: RefCell<Vec<Ranked<Stand>>>,
) {
    let _ = (user, stands, ranking);
}

#[scenario(path = "tests/features/proximity.feature", index = 2)]
fn empty_ranking(
    user: RefCell<UserLocation>,
    stands: RefCell<Vec<Stand>>,
    ranking: RefCell<Vec<Ranked<Stand>>>,
) {
    let _ = (user, stands, ranking);
}

#[scenario(path = "tests/features/proximity.feature", index = 3)]
fn tel_aviv_reference(
    user: RefCell<UserLocation>,
    stands: RefCell<Vec<Stand>>,
    ranking: RefCell<Vec<Ranked<Stand>>>,
) {
    let _ = (user, stands, ranking);
}
