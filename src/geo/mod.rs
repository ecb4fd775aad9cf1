//! Distance model over geographic points.
//!
//! Distances are great-circle (haversine) kilometres on a spherical Earth.
//! They are not travel distances over a road network.
//!
//! # Key Types
//!
//! - [`Coordinate`]: longitude/latitude pair in degrees
//! - [`Point`]: a stop to visit, carrying its display attributes
//! - [`DistanceMatrix`]: precomputed pairwise distances for one run
//!
//! # References
//!
//! - Sinnott (1984), "Virtues of the Haversine", *Sky and Telescope* 68(2)

mod matrix;

pub use matrix::DistanceMatrix;

use crate::error::TourError;
use std::collections::HashSet;

/// Mean Earth radius used by [`distance`].
pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// A geographic position in degrees.
///
/// Field order follows the `[longitude, latitude]` convention of GeoJSON.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(from = "[f64; 2]", into = "[f64; 2]")
)]
pub struct Coordinate {
    pub lon: f64,
    pub lat: f64,
}

impl Coordinate {
    pub fn new(lon: f64, lat: f64) -> Self {
        Self { lon, lat }
    }

    /// Whether both components are finite and within their angular range.
    pub fn is_valid(&self) -> bool {
        self.lon.is_finite()
            && self.lat.is_finite()
            && (-180.0..=180.0).contains(&self.lon)
            && (-90.0..=90.0).contains(&self.lat)
    }
}

impl From<[f64; 2]> for Coordinate {
    fn from([lon, lat]: [f64; 2]) -> Self {
        Self { lon, lat }
    }
}

impl From<Coordinate> for [f64; 2] {
    fn from(c: Coordinate) -> Self {
        [c.lon, c.lat]
    }
}

impl AsRef<Coordinate> for Coordinate {
    fn as_ref(&self) -> &Coordinate {
        self
    }
}

/// A stop on the tour.
///
/// Only [`coordinate`](Point::coordinate) affects optimization; the remaining
/// fields are carried through to the result for display.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "camelCase")
)]
pub struct Point {
    pub id: String,
    pub name: String,
    pub population: u64,
    pub density: f64,
    #[cfg_attr(feature = "serde", serde(rename = "coordinates"))]
    pub coordinate: Coordinate,
}

impl Point {
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        population: u64,
        density: f64,
        coordinate: impl Into<Coordinate>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            population,
            density,
            coordinate: coordinate.into(),
        }
    }

    /// A point with only an id and a position.
    pub fn at(id: impl Into<String>, lon: f64, lat: f64) -> Self {
        let id = id.into();
        Self::new(id.clone(), id, 0, 0.0, Coordinate::new(lon, lat))
    }
}

impl AsRef<Coordinate> for Point {
    fn as_ref(&self) -> &Coordinate {
        &self.coordinate
    }
}

/// Haversine distance between two coordinates in kilometres.
///
/// Symmetric, and zero exactly when the coordinates are identical.
pub fn distance(a: Coordinate, b: Coordinate) -> f64 {
    if a == b {
        return 0.0;
    }
    let lat1 = a.lat.to_radians();
    let lat2 = b.lat.to_radians();
    let dlat = lat2 - lat1;
    let dlon = (b.lon - a.lon).to_radians();

    let h = (dlat / 2.0).sin().powi(2) + lat1.cos() * lat2.cos() * (dlon / 2.0).sin().powi(2);
    // Rounding can push `h` just past 1 for near-antipodal pairs.
    let h = h.clamp(0.0, 1.0);
    let c = 2.0 * h.sqrt().atan2((1.0 - h).sqrt());
    EARTH_RADIUS_KM * c
}

/// Length of the closed circuit through `route` in order.
///
/// Includes the edge from the last stop back to the first. Routes with
/// fewer than two stops have length 0.
pub fn tour_distance<C: AsRef<Coordinate>>(route: &[C]) -> f64 {
    if route.len() < 2 {
        return 0.0;
    }
    let open: f64 = leg_distances(route).iter().sum();
    let first = *route[0].as_ref();
    let last = *route[route.len() - 1].as_ref();
    open + distance(last, first)
}

/// Distance of each leg `route[i] -> route[i + 1]`, without the closing edge.
pub fn leg_distances<C: AsRef<Coordinate>>(route: &[C]) -> Vec<f64> {
    route
        .windows(2)
        .map(|w| distance(*w[0].as_ref(), *w[1].as_ref()))
        .collect()
}

/// Checks that `points` can be optimized as a single tour.
///
/// # Errors
///
/// - [`TourError::InsufficientPoints`] for fewer than two points
/// - [`TourError::InvalidCoordinate`] for a non-finite or out-of-range position
/// - [`TourError::DuplicatePoint`] when two points share an id
pub fn validate_points(points: &[Point]) -> Result<(), TourError> {
    if points.len() < 2 {
        return Err(TourError::InsufficientPoints {
            count: points.len(),
        });
    }

    let mut seen = HashSet::with_capacity(points.len());
    for p in points {
        if !p.coordinate.is_valid() {
            return Err(TourError::InvalidCoordinate {
                id: p.id.clone(),
                lon: p.coordinate.lon,
                lat: p.coordinate.lat,
            });
        }
        if !seen.insert(p.id.as_str()) {
            return Err(TourError::DuplicatePoint { id: p.id.clone() });
        }
    }
    Ok(())
}
