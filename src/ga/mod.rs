//! Genetic algorithm for closed tours.
//!
//! Candidate solutions are permutations of point indices ([`Tour`]). The
//! engine evolves them with tournament selection, order crossover and swap
//! mutation, keeps an elite fraction unchanged, and periodically refines
//! the leading tours with [2-opt](crate::local_search::two_opt).
//!
//! # Key Types
//!
//! - [`TourGaConfig`]: Algorithm parameters (population size, rates, 2-opt schedule)
//! - [`TourGaRunner`]: Executes the evolutionary loop
//! - [`OptimizationResult`]: Best tour found with per-generation statistics
//!
//! # Submodules
//!
//! - [`operators`]: Order crossover (OX) and swap mutation over index permutations
//! - [`population`]: Seeding, evaluation and tournament selection
//!
//! # References
//!
//! - Holland (1975), *Adaptation in Natural and Artificial Systems*
//! - Goldberg (1989), *Genetic Algorithms in Search, Optimization, and Machine Learning*
//! - Potvin (1996), "Genetic algorithms for the traveling salesman problem",
//!   *Annals of Operations Research* 63, 337-370

mod config;
pub mod operators;
pub mod population;
mod result;
mod runner;
mod types;

pub use config::TourGaConfig;
pub use result::{GenerationRecord, OptimizationResult};
pub use runner::TourGaRunner;
pub use types::{fitness, Tour};
