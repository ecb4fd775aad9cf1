//! Optimization result and per-generation statistics.

use crate::geo::{self, Point};

/// Statistics of one generation's population, taken before breeding.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "camelCase")
)]
pub struct GenerationRecord {
    /// Zero-based generation index.
    pub generation: usize,
    /// Shortest tour distance in the population (km).
    pub best_distance: f64,
    /// Mean tour distance over the population (km).
    pub average_distance: f64,
}

/// Outcome of a tour optimization run.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "camelCase")
)]
pub struct OptimizationResult {
    /// Points in visiting order. The tour closes back to the first point.
    pub best_route: Vec<Point>,

    /// The same tour as indices into the input point slice.
    pub best_order: Vec<usize>,

    /// Closed-circuit distance of `best_route` in kilometres.
    pub best_distance: f64,

    /// One record per executed generation, in order.
    pub generation_history: Vec<GenerationRecord>,

    /// `(initial_best - best_distance) / initial_best * 100`, where
    /// `initial_best` is the shortest tour of the seeded population.
    ///
    /// 0 when the seeded population already had a zero-length tour.
    pub improvement_percentage: f64,

    /// Number of generations executed.
    pub generations: usize,

    /// Whether the run stopped early on cancellation or its time limit.
    pub cancelled: bool,
}

impl OptimizationResult {
    /// Distance of each leg between consecutive stops of `best_route`,
    /// excluding the closing leg back to the start.
    pub fn leg_distances(&self) -> Vec<f64> {
        geo::leg_distances(&self.best_route)
    }

    /// Best distance recorded for generation 0, if any generation ran.
    pub fn initial_best_distance(&self) -> Option<f64> {
        self.generation_history.first().map(|r| r.best_distance)
    }
}

/// Relative improvement of `final_best` over `initial_best`, in percent.
///
/// Returns 0 when `initial_best` is 0, since no improvement is possible.
pub(crate) fn improvement_percentage(initial_best: f64, final_best: f64) -> f64 {
    if initial_best <= 0.0 {
        return 0.0;
    }
    (initial_best - final_best) / initial_best * 100.0
}
