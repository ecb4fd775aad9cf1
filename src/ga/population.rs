//! Population seeding, evaluation and parent selection.
//!
//! # References
//!
//! - Blickle & Thiele (1996), "A Comparison of Selection Schemes used in
//!   Evolutionary Algorithms"
//! - Knuth (1997), *TAOCP Vol. 2*, §3.4.2 (Fisher–Yates shuffle)

use super::types::Tour;
use crate::geo::DistanceMatrix;
use rand::seq::SliceRandom;
use rand::Rng;

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// Number of contestants drawn per tournament.
pub const TOURNAMENT_SIZE: usize = 3;

/// Creates `size` independent uniformly random tours over `0..n`.
///
/// Each individual gets its own Fisher–Yates shuffle.
pub fn seed<R: Rng>(n: usize, size: usize, rng: &mut R) -> Vec<Tour> {
    (0..size)
        .map(|_| {
            let mut order: Vec<usize> = (0..n).collect();
            order.shuffle(rng);
            Tour::new(order)
        })
        .collect()
}

/// Evaluates every tour that does not yet carry a distance.
///
/// Evaluation is pure, so the parallel path yields exactly the same values
/// as the sequential one. `parallel` has no effect unless the crate is built
/// with the `parallel` feature.
pub fn evaluate_population(population: &mut [Tour], matrix: &DistanceMatrix, parallel: bool) {
    if parallel {
        evaluate_parallel(population, matrix);
    } else {
        evaluate_sequential(population, matrix);
    }
}

fn evaluate_sequential(population: &mut [Tour], matrix: &DistanceMatrix) {
    for tour in population.iter_mut().filter(|t| !t.is_evaluated()) {
        tour.evaluate(matrix);
    }
}

#[cfg(feature = "parallel")]
fn evaluate_parallel(population: &mut [Tour], matrix: &DistanceMatrix) {
    population
        .par_iter_mut()
        .filter(|t| !t.is_evaluated())
        .for_each(|t| t.evaluate(matrix));
}

#[cfg(not(feature = "parallel"))]
fn evaluate_parallel(population: &mut [Tour], matrix: &DistanceMatrix) {
    evaluate_sequential(population, matrix);
}

/// Tournament selection with [`TOURNAMENT_SIZE`] contestants.
///
/// Contestants are drawn uniformly with replacement; the one with the highest
/// fitness wins (the first drawn wins ties). Returns an independent copy, so
/// the population is never modified.
///
/// # Panics
/// Panics if `population` is empty.
pub fn select_parent<R: Rng>(population: &[Tour], rng: &mut R) -> Tour {
    assert!(
        !population.is_empty(),
        "cannot select from empty population"
    );
    population[tournament(population, TOURNAMENT_SIZE, rng)].clone()
}

/// Tournament selection: pick k random individuals, return the fittest index.
fn tournament<R: Rng>(population: &[Tour], k: usize, rng: &mut R) -> usize {
    let k = k.max(1);
    let n = population.len();

    let mut best_idx = rng.random_range(0..n);
    for _ in 1..k {
        let idx = rng.random_range(0..n);
        if population[idx].fitness() > population[best_idx].fitness() {
            best_idx = idx;
        }
    }
    best_idx
}

/// Sorts by descending fitness (ascending distance); stable for equal scores.
pub fn sort_by_fitness(population: &mut [Tour]) {
    population.sort_by(|a, b| b.fitness().total_cmp(&a.fitness()));
}

/// Index of the tour with the lowest distance.
///
/// Returns `None` for an empty population.
pub fn best_index(population: &[Tour]) -> Option<usize> {
    population
        .iter()
        .enumerate()
        .min_by(|(_, a), (_, b)| a.distance().total_cmp(&b.distance()))
        .map(|(i, _)| i)
}

/// Mean distance over the population (0 for an empty slice).
pub fn mean_distance(population: &[Tour]) -> f64 {
    if population.is_empty() {
        return 0.0;
    }
    population.iter().map(Tour::distance).sum::<f64>() / population.len() as f64
}
