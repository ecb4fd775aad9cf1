//! Candidate tour representation.
//!
//! A [`Tour`] is a permutation of point indices together with its cached
//! closed-circuit distance. The GA framework computes the distance via
//! [`Tour::evaluate`] and reads it back through [`Tour::distance`] and
//! [`Tour::fitness`].

use crate::geo::DistanceMatrix;

/// Maps a tour distance to a selection score.
///
/// `1 / (1 + distance)`: strictly decreasing in distance and always in
/// `(0, 1]`, so a zero-length tour scores exactly 1.
#[inline]
pub fn fitness(distance: f64) -> f64 {
    1.0 / (1.0 + distance)
}

/// A candidate solution: visiting order over `0..n` and its distance.
///
/// Freshly built tours are unevaluated and report an infinite distance
/// (fitness 0) until [`evaluate`](Tour::evaluate) is called.
#[derive(Debug, Clone, PartialEq)]
pub struct Tour {
    order: Vec<usize>,
    distance: f64,
}

impl Tour {
    /// Wraps a visiting order. The caller guarantees it is a permutation.
    pub fn new(order: Vec<usize>) -> Self {
        Self {
            order,
            distance: f64::INFINITY,
        }
    }

    /// Builds a tour and evaluates it against `matrix`.
    pub fn evaluated(order: Vec<usize>, matrix: &DistanceMatrix) -> Self {
        let distance = matrix.tour_distance(&order);
        Self { order, distance }
    }

    /// Visiting order as point indices.
    pub fn order(&self) -> &[usize] {
        &self.order
    }

    /// Consumes the tour, returning its visiting order.
    pub fn into_order(self) -> Vec<usize> {
        self.order
    }

    /// Number of stops.
    pub fn len(&self) -> usize {
        self.order.len()
    }

    /// Whether the tour has no stops.
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Cached closed-circuit distance in kilometres.
    pub fn distance(&self) -> f64 {
        self.distance
    }

    /// Selection score derived from the cached distance.
    pub fn fitness(&self) -> f64 {
        fitness(self.distance)
    }

    /// Whether a distance has been computed since construction.
    pub fn is_evaluated(&self) -> bool {
        self.distance.is_finite()
    }

    /// Recomputes and caches the distance.
    pub fn evaluate(&mut self, matrix: &DistanceMatrix) {
        self.distance = matrix.tour_distance(&self.order);
    }
}
