//! GA evolutionary loop execution.
//!
//! [`TourGaRunner`] orchestrates the complete evolutionary process:
//! seeding → evaluation → elitism → selection → crossover → mutation →
//! periodic 2-opt → repeat.

use super::config::TourGaConfig;
use super::operators::{mutate, order_crossover};
use super::population::{
    best_index, evaluate_population, mean_distance, seed, select_parent, sort_by_fitness,
};
use super::result::{improvement_percentage, GenerationRecord, OptimizationResult};
use super::types::Tour;
use crate::error::TourError;
use crate::geo::{validate_points, DistanceMatrix, Point};
use crate::local_search::two_opt;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, info, instrument, warn};

/// Executes the tour GA.
///
/// Each call is independent: all state lives on the stack of the call and
/// is dropped once the result is returned.
///
/// # Usage
///
/// ```
/// use u_tour::ga::{TourGaConfig, TourGaRunner};
/// use u_tour::geo::Point;
///
/// let points = vec![
///     Point::at("tejgaon", 90.3938, 23.7639),
///     Point::at("karwan", 90.3912, 23.7511),
///     Point::at("farmgate", 90.3889, 23.7567),
///     Point::at("panthapath", 90.3756, 23.7456),
///     Point::at("dhanmondi", 90.3742, 23.7461),
/// ];
/// let config = TourGaConfig::default().with_generations(30).with_seed(42);
/// let result = TourGaRunner::run(&points, &config).unwrap();
/// assert_eq!(result.best_route.len(), 5);
/// assert_eq!(result.generation_history.len(), 30);
/// ```
pub struct TourGaRunner;

impl TourGaRunner {
    /// Runs the GA optimization.
    ///
    /// # Errors
    /// Returns [`TourError`] if the points or the configuration are invalid.
    pub fn run(points: &[Point], config: &TourGaConfig) -> Result<OptimizationResult, TourError> {
        Self::run_with_cancel(points, config, None)
    }

    /// Runs the GA with an optional cancellation token.
    ///
    /// If `cancel` is `Some` and the flag is set to `true`, the GA stops at
    /// the start of the next generation and reports the best tour of the
    /// current population.
    pub fn run_with_cancel(
        points: &[Point],
        config: &TourGaConfig,
        cancel: Option<Arc<AtomicBool>>,
    ) -> Result<OptimizationResult, TourError> {
        let mut rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::seed_from_u64(rand::random()),
        };
        Self::run_with_rng(points, config, &mut rng, cancel.as_deref())
    }

    /// Runs the GA drawing every random decision from `rng`.
    ///
    /// `config.seed` is ignored. The outcome is a pure function of the
    /// points, the configuration and the generator state.
    #[instrument(
        level = "debug",
        skip_all,
        fields(
            points = points.len(),
            population_size = config.population_size,
            generations = config.generations
        )
    )]
    pub fn run_with_rng<R: Rng>(
        points: &[Point],
        config: &TourGaConfig,
        rng: &mut R,
        cancel: Option<&AtomicBool>,
    ) -> Result<OptimizationResult, TourError> {
        validate_points(points)?;
        config.validate()?;

        let started = Instant::now();
        let matrix = DistanceMatrix::from_coordinates(points);
        let size = config.population_size;

        // 1. Seed and evaluate the initial population
        let mut population = seed(points.len(), size, rng);
        evaluate_population(&mut population, &matrix, config.parallel);

        let initial_best = population
            .iter()
            .map(Tour::distance)
            .fold(f64::INFINITY, f64::min);

        let mut history = Vec::new();
        let mut cancelled = false;

        // 2. Evolutionary loop
        for generation in 0..config.generations {
            if cancel.is_some_and(|flag| flag.load(Ordering::Relaxed)) {
                warn!(generation, "optimization cancelled");
                cancelled = true;
                break;
            }
            if let Some(limit) = config.time_limit_ms {
                if started.elapsed().as_millis() >= u128::from(limit) {
                    warn!(generation, limit_ms = limit, "optimization time limit reached");
                    cancelled = true;
                    break;
                }
            }

            sort_by_fitness(&mut population);

            let record = GenerationRecord {
                generation,
                best_distance: population[0].distance(),
                average_distance: mean_distance(&population),
            };
            debug!(
                generation,
                best = record.best_distance,
                mean = record.average_distance,
                "generation evaluated"
            );
            history.push(record);

            let mut next_gen = next_generation(&population, config, &matrix, generation, rng);

            // Elites keep their cached distance; only new tours are evaluated
            evaluate_population(&mut next_gen, &matrix, config.parallel);
            population = next_gen;
        }

        // 3. Report the shortest tour of the final population
        let best_idx = best_index(&population).expect("population_size is validated positive");
        let best = population.swap_remove(best_idx);
        let best_distance = best.distance();
        let improvement = improvement_percentage(initial_best, best_distance);
        let best_order = best.into_order();
        let best_route = best_order.iter().map(|&i| points[i].clone()).collect();

        info!(
            best_distance,
            improvement_percentage = improvement,
            generations = history.len(),
            cancelled,
            "optimization finished"
        );

        Ok(OptimizationResult {
            best_route,
            best_order,
            best_distance,
            generations: history.len(),
            generation_history: history,
            improvement_percentage: improvement,
            cancelled,
        })
    }
}

/// Breeds the population that follows `population`, which must already be
/// sorted by fitness.
///
/// Elites are copied first, offspring fill the rest, and on 2-opt
/// generations the leading tours are replaced by their refined versions.
/// New tours are left unevaluated.
fn next_generation<R: Rng>(
    population: &[Tour],
    config: &TourGaConfig,
    matrix: &DistanceMatrix,
    generation: usize,
    rng: &mut R,
) -> Vec<Tour> {
    let size = config.population_size;

    // Elite preservation
    let mut next_gen: Vec<Tour> = population[..config.elite_count()].to_vec();

    // Generate offspring
    while next_gen.len() < size {
        let parent1 = select_parent(population, rng);
        let parent2 = select_parent(population, rng);
        let mut child = order_crossover(parent1.order(), parent2.order(), rng);
        mutate(&mut child, config.mutation_rate, rng);
        next_gen.push(Tour::new(child));
    }

    // Periodic local search on the leading tours of the new population
    if config.two_opt_interval > 0 && generation % config.two_opt_interval == 0 {
        let count = config.two_opt_count.min(next_gen.len());
        for tour in &mut next_gen[..count] {
            *tour = Tour::new(two_opt(tour.order(), matrix));
        }
        debug!(generation, count, "applied 2-opt");
    }

    next_gen
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geo::{distance, tour_distance, Coordinate};
    use std::collections::HashSet;

    /// Deterministic scatter of `n` stops around Dhaka.
    fn scatter(n: usize) -> Vec<Point> {
        (0..n)
            .map(|i| {
                let t = i as f64;
                Point::new(
                    format!("p{i}"),
                    format!("Stop {i}"),
                    10_000 + i as u64 * 500,
                    5_000.0,
                    Coordinate::new(
                        90.35 + ((t * 1.7).sin() + 1.0) * 0.05,
                        23.70 + ((t * 2.3).cos() + 1.0) * 0.05,
                    ),
                )
            })
            .collect()
    }

    fn assert_same_point_set(route: &[Point], input: &[Point]) {
        assert_eq!(route.len(), input.len());
        let got: HashSet<&str> = route.iter().map(|p| p.id.as_str()).collect();
        let want: HashSet<&str> = input.iter().map(|p| p.id.as_str()).collect();
        assert_eq!(got, want);
    }

    #[test]
    fn test_two_point_tour() {
        let a = Point::at("A", 90.40, 23.75);
        let b = Point::at("B", 90.42, 23.79);
        let points = vec![a.clone(), b.clone()];
        let config = TourGaConfig::default().with_generations(20).with_seed(1);

        let result = TourGaRunner::run(&points, &config).unwrap();

        assert_same_point_set(&result.best_route, &points);
        let expected = 2.0 * distance(a.coordinate, b.coordinate);
        assert!((result.best_distance - expected).abs() < 1e-9);
        assert!(result.improvement_percentage >= 0.0);
    }

    #[test]
    fn test_single_generation() {
        let points = scatter(12);
        let config = TourGaConfig::default()
            .with_population_size(20)
            .with_generations(1)
            .with_seed(5);

        let result = TourGaRunner::run(&points, &config).unwrap();
        assert_eq!(result.generation_history.len(), 1);
        assert_eq!(result.generations, 1);

        // Seeding is the first use of the generator
        let matrix = DistanceMatrix::from_coordinates(&points);
        let mut rng = StdRng::seed_from_u64(5);
        let mut seeded = seed(points.len(), 20, &mut rng);
        evaluate_population(&mut seeded, &matrix, false);
        let seeded_min = seeded
            .iter()
            .map(Tour::distance)
            .fold(f64::INFINITY, f64::min);

        assert_eq!(result.generation_history[0].generation, 0);
        assert_eq!(result.generation_history[0].best_distance, seeded_min);
        assert!(result.best_distance <= seeded_min);
    }

    #[test]
    fn test_best_distance_non_increasing_with_elitism() {
        let points = scatter(15);
        let config = TourGaConfig::default()
            .with_population_size(30)
            .with_generations(60)
            .with_elitism_rate(0.1)
            .with_mutation_rate(0.1)
            .with_seed(42);

        let result = TourGaRunner::run(&points, &config).unwrap();

        for window in result.generation_history.windows(2) {
            assert!(
                window[1].best_distance <= window[0].best_distance,
                "best distance should never get worse with elitism: {} > {}",
                window[1].best_distance,
                window[0].best_distance
            );
        }
        let last = result.generation_history.last().unwrap();
        assert!(result.best_distance <= last.best_distance);
    }

    #[test]
    fn test_history_records_in_order() {
        let points = scatter(8);
        let config = TourGaConfig::default().with_generations(25).with_seed(3);
        let result = TourGaRunner::run(&points, &config).unwrap();

        assert_eq!(result.generation_history.len(), 25);
        for (i, record) in result.generation_history.iter().enumerate() {
            assert_eq!(record.generation, i);
            assert!(record.best_distance <= record.average_distance + 1e-9);
        }
    }

    #[test]
    fn test_zero_mutation_zero_elitism() {
        let points = scatter(10);
        let config = TourGaConfig::default()
            .with_population_size(20)
            .with_generations(30)
            .with_mutation_rate(0.0)
            .with_elitism_rate(0.0)
            .with_seed(8);

        let result = TourGaRunner::run(&points, &config).unwrap();
        assert_same_point_set(&result.best_route, &points);
        assert_eq!(result.generation_history.len(), 30);
    }

    #[test]
    fn test_identical_coordinates() {
        let points: Vec<Point> = (0..6)
            .map(|i| Point::at(format!("same{i}"), 90.40, 23.75))
            .collect();
        let config = TourGaConfig::default()
            .with_population_size(20)
            .with_generations(15)
            .with_seed(4);

        let result = TourGaRunner::run(&points, &config).unwrap();
        assert_eq!(result.best_distance, 0.0);
        assert_eq!(result.improvement_percentage, 0.0);
        assert!(result
            .generation_history
            .iter()
            .all(|r| r.best_distance == 0.0 && r.average_distance == 0.0));
    }

    #[test]
    fn test_improves_on_seeded_population() {
        let points = scatter(20);
        let config = TourGaConfig::default()
            .with_population_size(40)
            .with_generations(80)
            .with_seed(42);

        let result = TourGaRunner::run(&points, &config).unwrap();
        let initial = result.initial_best_distance().unwrap();
        assert!(result.best_distance < initial);
        assert!(result.improvement_percentage > 0.0);
        let expected = (initial - result.best_distance) / initial * 100.0;
        assert!((result.improvement_percentage - expected).abs() < 1e-9);
    }

    #[test]
    fn test_result_route_consistent() {
        let points = scatter(11);
        let config = TourGaConfig::default().with_generations(20).with_seed(10);
        let result = TourGaRunner::run(&points, &config).unwrap();

        assert_same_point_set(&result.best_route, &points);
        for (p, &i) in result.best_route.iter().zip(&result.best_order) {
            assert_eq!(p, &points[i]);
        }
        assert!((tour_distance(&result.best_route) - result.best_distance).abs() < 1e-9);
        assert!(!result.cancelled);
    }

    #[test]
    fn test_same_seed_same_result() {
        let points = scatter(14);
        let config = TourGaConfig::default().with_generations(40).with_seed(99);

        let a = TourGaRunner::run(&points, &config).unwrap();
        let b = TourGaRunner::run(&points, &config).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_parallel_gives_same_result() {
        let points = scatter(14);
        let config = TourGaConfig::default().with_generations(40).with_seed(99);

        let sequential = TourGaRunner::run(&points, &config).unwrap();
        let parallel = TourGaRunner::run(&points, &config.clone().with_parallel(true)).unwrap();
        assert_eq!(sequential, parallel);
    }

    #[test]
    fn test_run_with_rng_matches_seeded_run() {
        let points = scatter(9);
        let config = TourGaConfig::default().with_generations(15).with_seed(21);

        let seeded = TourGaRunner::run(&points, &config).unwrap();
        let mut rng = StdRng::seed_from_u64(21);
        let external = TourGaRunner::run_with_rng(&points, &config, &mut rng, None).unwrap();
        assert_eq!(seeded, external);
    }

    #[test]
    fn test_two_opt_disabled() {
        let points = scatter(10);
        let config = TourGaConfig::default()
            .with_generations(20)
            .with_two_opt(0, 5)
            .with_seed(6);

        let result = TourGaRunner::run(&points, &config).unwrap();
        assert_same_point_set(&result.best_route, &points);
    }

    #[test]
    fn test_population_smaller_than_two_opt_count() {
        let points = scatter(7);
        let config = TourGaConfig::default()
            .with_population_size(3)
            .with_generations(12)
            .with_seed(2);

        let result = TourGaRunner::run(&points, &config).unwrap();
        assert_eq!(result.generation_history.len(), 12);
        assert_same_point_set(&result.best_route, &points);
    }

    #[test]
    fn test_every_generation_holds_permutations() {
        let points = scatter(9);
        let config = TourGaConfig::default()
            .with_population_size(12)
            .with_elitism_rate(0.25)
            .with_mutation_rate(0.5)
            .with_two_opt(10, 5);
        let n = points.len();
        let matrix = DistanceMatrix::from_coordinates(&points);
        let mut rng = StdRng::seed_from_u64(17);

        let mut population = seed(n, config.population_size, &mut rng);
        evaluate_population(&mut population, &matrix, false);

        // Generations 0, 10 and 20 apply 2-opt
        for generation in 0..25 {
            sort_by_fitness(&mut population);
            let mut next_gen = next_generation(&population, &config, &matrix, generation, &mut rng);
            assert_eq!(next_gen.len(), config.population_size);
            assert_eq!(
                &next_gen[..config.elite_count()],
                &population[..config.elite_count()]
            );

            evaluate_population(&mut next_gen, &matrix, false);
            for tour in &next_gen {
                let mut sorted = tour.order().to_vec();
                sorted.sort_unstable();
                assert_eq!(
                    sorted,
                    (0..n).collect::<Vec<_>>(),
                    "generation {generation}: {:?}",
                    tour.order()
                );
                assert!(tour.distance().is_finite());
            }
            population = next_gen;
        }
    }

    #[test]
    fn test_near_antipodal_points_stay_finite() {
        let points = vec![
            Point::at("south", 0.0, -87.843),
            Point::at("north", -180.0, 87.843),
            Point::at("mid", 10.0, 10.0),
        ];
        let config = TourGaConfig::default().with_generations(5).with_seed(1);

        let result = TourGaRunner::run(&points, &config).unwrap();
        assert!(result.best_distance.is_finite());
        assert!(result.improvement_percentage.is_finite());
        assert!(result
            .generation_history
            .iter()
            .all(|r| r.best_distance.is_finite() && r.average_distance.is_finite()));
    }

    // ---- Cancellation ----

    #[test]
    fn test_cancelled_before_start() {
        let points = scatter(10);
        let config = TourGaConfig::default().with_seed(1);
        let cancel = Arc::new(AtomicBool::new(true));

        let result = TourGaRunner::run_with_cancel(&points, &config, Some(cancel)).unwrap();
        assert!(result.cancelled);
        assert_eq!(result.generations, 0);
        assert!(result.generation_history.is_empty());
        assert_eq!(result.improvement_percentage, 0.0);
        assert_same_point_set(&result.best_route, &points);
    }

    #[test]
    fn test_cancellation() {
        let points = scatter(10);
        let config = TourGaConfig::default()
            .with_population_size(20)
            .with_generations(10_000_000)
            .with_seed(42);

        let cancel = Arc::new(AtomicBool::new(false));

        // Cancel after a few generations
        let cancel_clone = cancel.clone();
        std::thread::spawn(move || {
            std::thread::sleep(std::time::Duration::from_millis(10));
            cancel_clone.store(true, Ordering::Relaxed);
        });

        let result = TourGaRunner::run_with_cancel(&points, &config, Some(cancel)).unwrap();

        assert!(result.cancelled, "expected cancelled result");
        assert!(result.generations < 10_000_000, "should have stopped early");
        assert_eq!(result.generations, result.generation_history.len());
    }

    #[test]
    fn test_time_limit() {
        let points = scatter(10);
        let config = TourGaConfig::default()
            .with_population_size(20)
            .with_generations(10_000_000)
            .with_time_limit_ms(20)
            .with_seed(42);

        let result = TourGaRunner::run(&points, &config).unwrap();
        assert!(result.cancelled);
        assert!(result.generations < 10_000_000);
    }

    // ---- Errors ----

    #[test]
    fn test_rejects_single_point() {
        let points = vec![Point::at("only", 90.40, 23.75)];
        let err = TourGaRunner::run(&points, &TourGaConfig::default()).unwrap_err();
        assert_eq!(err, TourError::InsufficientPoints { count: 1 });
    }

    #[test]
    fn test_rejects_invalid_parameter() {
        let points = scatter(5);
        let config = TourGaConfig::default().with_elitism_rate(1.0);
        let err = TourGaRunner::run(&points, &config).unwrap_err();
        assert_eq!(err.field(), Some("elitism_rate"));
    }

    #[test]
    fn test_rejects_invalid_coordinate() {
        let mut points = scatter(5);
        points[3].coordinate.lat = f64::INFINITY;
        match TourGaRunner::run(&points, &TourGaConfig::default()) {
            Err(TourError::InvalidCoordinate { id, .. }) => assert_eq!(id, "p3"),
            other => panic!("expected InvalidCoordinate, got {other:?}"),
        }
    }
}
