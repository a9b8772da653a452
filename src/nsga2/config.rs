//! NSGA-II configuration.
//!
//! [`Nsga2Config`] holds all parameters that control the evolutionary loop.

use thiserror::Error;

/// A rejected [`Nsga2Config`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{0}")]
pub struct InvalidConfig(pub String);

/// Configuration for the NSGA-II search.
///
/// # Defaults
///
/// ```
/// use idc_recommend::nsga2::Nsga2Config;
///
/// let config = Nsga2Config::default();
/// assert_eq!(config.population_size, 40);
/// assert_eq!(config.offspring_size, 10);
/// assert_eq!(config.max_generations, 40);
/// ```
///
/// # Builder Pattern
///
/// ```
/// use idc_recommend::nsga2::Nsga2Config;
///
/// let config = Nsga2Config::default()
///     .with_population_size(80)
///     .with_max_generations(100)
///     .with_seed(7)
///     .with_parallel(false);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone)]
pub struct Nsga2Config {
    /// Maximum number of individuals kept after survival selection.
    ///
    /// The population can be smaller when the problem has fewer distinct
    /// decoded solutions than this.
    pub population_size: usize,

    /// Number of offspring produced per generation.
    pub offspring_size: usize,

    /// Number of generations. There is no early stopping.
    pub max_generations: usize,

    /// Number of contestants per tournament (2 = binary tournament).
    pub tournament_size: usize,

    /// Probability of recombining a parent pair with SBX (0.0–1.0).
    pub crossover_probability: f64,

    /// SBX distribution index. Larger values keep children near parents.
    pub crossover_eta: f64,

    /// Per-gene mutation probability. `None` means `1 / n_var`.
    pub mutation_probability: Option<f64>,

    /// Polynomial mutation distribution index.
    pub mutation_eta: f64,

    /// Maximum number of parent pairs drawn per generation while looking
    /// for offspring that are not duplicates.
    pub mating_attempts: usize,

    /// Whether to evaluate offspring in parallel using rayon.
    ///
    /// Has no effect without the `parallel` feature. Results are identical
    /// either way.
    pub parallel: bool,

    /// Random seed for reproducibility.
    ///
    /// `None` draws a seed from the OS; the seed used is reported in the
    /// run result.
    pub seed: Option<u64>,
}

impl Default for Nsga2Config {
    fn default() -> Self {
        Self {
            population_size: 40,
            offspring_size: 10,
            max_generations: 40,
            tournament_size: 2,
            crossover_probability: 0.9,
            crossover_eta: 15.0,
            mutation_probability: None,
            mutation_eta: 20.0,
            mating_attempts: 100,
            parallel: true,
            seed: None,
        }
    }
}

impl Nsga2Config {
    /// Sets the population size.
    pub fn with_population_size(mut self, n: usize) -> Self {
        self.population_size = n;
        self
    }

    /// Sets the number of offspring per generation.
    pub fn with_offspring_size(mut self, n: usize) -> Self {
        self.offspring_size = n;
        self
    }

    /// Sets the number of generations.
    pub fn with_max_generations(mut self, n: usize) -> Self {
        self.max_generations = n;
        self
    }

    /// Sets the tournament size.
    pub fn with_tournament_size(mut self, k: usize) -> Self {
        self.tournament_size = k;
        self
    }

    /// Sets the SBX crossover probability.
    pub fn with_crossover_probability(mut self, p: f64) -> Self {
        self.crossover_probability = p.clamp(0.0, 1.0);
        self
    }

    /// Sets the SBX distribution index.
    pub fn with_crossover_eta(mut self, eta: f64) -> Self {
        self.crossover_eta = eta;
        self
    }

    /// Sets a fixed per-gene mutation probability.
    pub fn with_mutation_probability(mut self, p: f64) -> Self {
        self.mutation_probability = Some(p.clamp(0.0, 1.0));
        self
    }

    /// Sets the polynomial mutation distribution index.
    pub fn with_mutation_eta(mut self, eta: f64) -> Self {
        self.mutation_eta = eta;
        self
    }

    /// Sets the number of mating attempts per generation.
    pub fn with_mating_attempts(mut self, n: usize) -> Self {
        self.mating_attempts = n;
        self
    }

    /// Enables or disables parallel evaluation.
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Sets the random seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Per-gene mutation probability for a problem with `n_var` genes.
    pub fn mutation_probability_for(&self, n_var: usize) -> f64 {
        self.mutation_probability
            .unwrap_or_else(|| 1.0 / n_var.max(1) as f64)
    }

    /// Validates the configuration.
    pub fn validate(&self) -> Result<(), InvalidConfig> {
        if self.population_size < 2 {
            return Err(InvalidConfig("population_size must be at least 2".into()));
        }
        if self.offspring_size == 0 {
            return Err(InvalidConfig("offspring_size must be at least 1".into()));
        }
        if self.tournament_size == 0 {
            return Err(InvalidConfig("tournament_size must be at least 1".into()));
        }
        if self.mating_attempts == 0 {
            return Err(InvalidConfig("mating_attempts must be at least 1".into()));
        }
        if !(0.0..=1.0).contains(&self.crossover_probability) {
            return Err(InvalidConfig(
                "crossover_probability must be within [0, 1]".into(),
            ));
        }
        if let Some(p) = self.mutation_probability {
            if !(0.0..=1.0).contains(&p) {
                return Err(InvalidConfig(
                    "mutation_probability must be within [0, 1]".into(),
                ));
            }
        }
        if !(self.crossover_eta.is_finite() && self.crossover_eta >= 0.0) {
            return Err(InvalidConfig(
                "crossover_eta must be finite and non-negative".into(),
            ));
        }
        if !(self.mutation_eta.is_finite() && self.mutation_eta >= 0.0) {
            return Err(InvalidConfig(
                "mutation_eta must be finite and non-negative".into(),
            ));
        }
        Ok(())
    }
}
