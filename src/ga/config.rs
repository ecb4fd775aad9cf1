//! Tour GA configuration.
//!
//! [`TourGaConfig`] holds all parameters that control the evolutionary loop.

use crate::error::TourError;

/// Configuration for the tour genetic algorithm.
///
/// Every field has a documented default, so callers only set what they
/// want to change.
///
/// # Defaults
///
/// ```
/// use u_tour::ga::TourGaConfig;
///
/// let config = TourGaConfig::default();
/// assert_eq!(config.population_size, 50);
/// assert_eq!(config.generations, 100);
/// assert!((config.mutation_rate - 0.02).abs() < 1e-12);
/// assert!((config.elitism_rate - 0.1).abs() < 1e-12);
/// ```
///
/// # Builder Pattern
///
/// ```
/// use u_tour::ga::TourGaConfig;
///
/// let config = TourGaConfig::default()
///     .with_population_size(80)
///     .with_generations(300)
///     .with_mutation_rate(0.05)
///     .with_seed(42);
/// assert!(config.validate().is_ok());
/// ```
///
/// Setters store values as given; out-of-range values are reported by
/// [`validate`](Self::validate) rather than clamped.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(default, rename_all = "camelCase")
)]
pub struct TourGaConfig {
    /// Number of tours in the population.
    ///
    /// Typical range: 20–100.
    pub population_size: usize,

    /// Number of generations to run.
    ///
    /// Typical range: 50–500.
    pub generations: usize,

    /// Probability that an offspring receives one swap mutation (0.0–1.0).
    ///
    /// Typical range: 0.01–0.10.
    pub mutation_rate: f64,

    /// Fraction of the population copied unchanged into the next
    /// generation (0.0 inclusive to 1.0 exclusive).
    ///
    /// The elite count is `floor(population_size * elitism_rate)`. With at
    /// least one elite the best distance never gets worse between
    /// generations.
    pub elitism_rate: f64,

    /// 2-opt is applied after every generation whose index is a multiple
    /// of this value. Set to 0 to disable local search.
    pub two_opt_interval: usize,

    /// Number of leading tours of the new population refined by 2-opt.
    pub two_opt_count: usize,

    /// Random seed for reproducibility.
    ///
    /// `None` uses a random seed.
    pub seed: Option<u64>,

    /// Whether to evaluate tour distances in parallel using rayon.
    ///
    /// Only effective with the `parallel` feature. Results are identical
    /// either way.
    pub parallel: bool,

    /// Optional wall-clock time limit in milliseconds.
    ///
    /// Checked at the start of each generation, so the actual runtime may
    /// exceed it by up to one generation's worth of work.
    pub time_limit_ms: Option<u64>,
}

impl Default for TourGaConfig {
    fn default() -> Self {
        Self {
            population_size: 50,
            generations: 100,
            mutation_rate: 0.02,
            elitism_rate: 0.1,
            two_opt_interval: 10,
            two_opt_count: 5,
            seed: None,
            parallel: false,
            time_limit_ms: None,
        }
    }
}

impl TourGaConfig {
    /// Sets the population size.
    pub fn with_population_size(mut self, n: usize) -> Self {
        self.population_size = n;
        self
    }

    /// Sets the number of generations.
    pub fn with_generations(mut self, n: usize) -> Self {
        self.generations = n;
        self
    }

    /// Sets the mutation rate.
    pub fn with_mutation_rate(mut self, rate: f64) -> Self {
        self.mutation_rate = rate;
        self
    }

    /// Sets the elitism rate.
    pub fn with_elitism_rate(mut self, rate: f64) -> Self {
        self.elitism_rate = rate;
        self
    }

    /// Sets the 2-opt schedule: every `interval` generations, refine the
    /// first `count` tours. `interval == 0` disables local search.
    pub fn with_two_opt(mut self, interval: usize, count: usize) -> Self {
        self.two_opt_interval = interval;
        self.two_opt_count = count;
        self
    }

    /// Sets the random seed for reproducibility.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Enables or disables parallel evaluation.
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Sets the wall-clock time limit in milliseconds.
    pub fn with_time_limit_ms(mut self, ms: u64) -> Self {
        self.time_limit_ms = Some(ms);
        self
    }

    /// Number of elites carried into each new generation.
    pub fn elite_count(&self) -> usize {
        (self.population_size as f64 * self.elitism_rate).floor() as usize
    }

    /// Validates the configuration.
    ///
    /// # Errors
    ///
    /// [`TourError::InvalidParameter`] naming the first offending field.
    pub fn validate(&self) -> Result<(), TourError> {
        if self.population_size == 0 {
            return Err(TourError::invalid_parameter(
                "population_size",
                "must be at least 1",
            ));
        }
        if self.generations == 0 {
            return Err(TourError::invalid_parameter(
                "generations",
                "must be at least 1",
            ));
        }
        if !(0.0..=1.0).contains(&self.mutation_rate) {
            return Err(TourError::invalid_parameter(
                "mutation_rate",
                format!("must be within [0, 1], got {}", self.mutation_rate),
            ));
        }
        if !(0.0..1.0).contains(&self.elitism_rate) {
            return Err(TourError::invalid_parameter(
                "elitism_rate",
                format!("must be within [0, 1), got {}", self.elitism_rate),
            ));
        }
        if self.time_limit_ms == Some(0) {
            return Err(TourError::invalid_parameter(
                "time_limit_ms",
                "must be positive or None",
            ));
        }
        Ok(())
    }
}
