//! Closed-tour optimization over geographic points.
//!
//! Given a set of stops, finds a short circuit visiting each exactly once
//! and returning to the start (a Traveling Salesman Problem instance). The
//! search is a genetic algorithm hybridized with 2-opt local search; it is a
//! bounded-time heuristic with no optimality guarantee.
//!
//! - **Geo**: haversine distances, closed-tour length, pairwise distance matrix
//! - **GA**: population seeding, tournament selection, order crossover,
//!   swap mutation, elitism and the generation loop
//! - **Local search**: 2-opt refinement of individual tours
//!
//! # Quick Start
//!
//! ```
//! use u_tour::{optimize_route, Point, TourGaConfig};
//!
//! let stops = vec![
//!     Point::new("tejgaon-ind", "Tejgaon Industrial Area", 48_000, 8_200.0, [90.3938, 23.7639]),
//!     Point::new("karwan-bazar", "Karwan Bazar", 52_000, 9_100.0, [90.3912, 23.7511]),
//!     Point::new("farmgate", "Farmgate", 45_000, 7_800.0, [90.3889, 23.7567]),
//!     Point::new("panthapath", "Panthapath", 38_000, 7_200.0, [90.3756, 23.7456]),
//! ];
//!
//! let result = optimize_route(&stops, &TourGaConfig::default().with_seed(7)).unwrap();
//! assert_eq!(result.best_route.len(), stops.len());
//! assert!(result.improvement_percentage >= 0.0);
//! ```
//!
//! # Architecture
//!
//! The core is a pure, synchronous function of points, parameters and a
//! random source. It performs no I/O, keeps no state between calls and
//! installs no `tracing` subscriber; progress is reported through `tracing`
//! events only.

pub mod error;
pub mod ga;
pub mod geo;
pub mod local_search;

pub use error::TourError;
pub use ga::{GenerationRecord, OptimizationResult, TourGaConfig, TourGaRunner};
pub use geo::{distance, tour_distance, Coordinate, Point};

/// Optimizes the visiting order of `points` with `config`.
///
/// Shorthand for [`TourGaRunner::run`]. Use `TourGaConfig::default()` to
/// get `population_size = 50`, `generations = 100`, `mutation_rate = 0.02`
/// and `elitism_rate = 0.1`.
///
/// # Errors
/// Returns [`TourError`] for fewer than two points, an invalid coordinate,
/// a duplicate point id or an out-of-range parameter.
pub fn optimize_route(
    points: &[Point],
    config: &TourGaConfig,
) -> Result<OptimizationResult, TourError> {
    TourGaRunner::run(points, config)
}
