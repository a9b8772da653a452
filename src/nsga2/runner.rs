//! NSGA-II evolutionary loop execution.
//!
//! [`Nsga2Runner`] orchestrates the complete evolutionary process:
//! sampling → evaluation → survival, then per generation
//! tournament → SBX → mutation → evaluation → survival.

use super::config::{InvalidConfig, Nsga2Config};
use super::operators::{polynomial_mutation, random_vector, sbx_crossover};
use super::selection::tournament;
use super::survival::{eliminate_duplicates, rank_and_crowding};
use super::types::{BinaryProblem, Individual};
use crate::random::{create_rng, SearchRng};
#[cfg(feature = "parallel")]
use rayon::prelude::*;
use std::collections::HashSet;
use tracing::{debug, info, warn};

/// Snapshot of one generation after survival selection.
#[derive(Debug, Clone, PartialEq)]
pub struct GenerationStats {
    /// Generation number (0 = initial population).
    pub generation: usize,

    /// Number of individuals that survived.
    pub population_size: usize,

    /// Number of individuals in the first front.
    pub front_size: usize,

    /// Number of feasible individuals.
    pub feasible: usize,

    /// Offspring accepted this generation (0 for the initial population).
    pub offspring: usize,

    /// Lowest first objective among feasible individuals.
    pub best_f1: Option<f64>,

    /// Lowest second objective among feasible individuals.
    pub best_f2: Option<f64>,
}

/// Result of an NSGA-II run.
#[derive(Debug, Clone)]
pub struct Nsga2Result<K> {
    /// Terminal population, front by front.
    pub population: Vec<Individual<K>>,

    /// Number of generations executed.
    pub generations: usize,

    /// Seed the run was driven by.
    pub seed: u64,

    /// Statistics per generation, starting with the initial population.
    pub history: Vec<GenerationStats>,
}

impl<K> Nsga2Result<K> {
    /// Members of the first non-dominated front, in population order.
    pub fn pareto_front(&self) -> impl Iterator<Item = &Individual<K>> {
        self.population.iter().filter(|ind| ind.rank == 0)
    }
}

/// Executes the NSGA-II loop.
///
/// # Usage
///
/// ```ignore
/// let config = Nsga2Config::default().with_seed(42);
/// let result = Nsga2Runner::run(&problem, &config)?;
/// for ind in result.pareto_front() {
///     println!("{:?}", ind.objectives());
/// }
/// ```
///
/// # Random draw order
///
/// 1. Initial sampling: `population_size` vectors, gene by gene.
/// 2. Per generation, per mating round: two tournaments, one SBX call,
///    then polynomial mutation of each child that is still needed.
///
/// Evaluation never draws, so parallel evaluation yields the same run.
pub struct Nsga2Runner;

impl Nsga2Runner {
    /// Runs the search.
    pub fn run<P: BinaryProblem>(
        problem: &P,
        config: &Nsga2Config,
    ) -> Result<Nsga2Result<P::Key>, InvalidConfig> {
        config.validate()?;

        let n_var = problem.n_var();
        if n_var == 0 {
            return Err(InvalidConfig(
                "problem must have at least one decision variable".into(),
            ));
        }

        let seed = config.seed.unwrap_or_else(rand::random);
        let mut rng = create_rng(seed);
        let mutation_probability = config.mutation_probability_for(n_var);

        info!(
            seed,
            n_var,
            population_size = config.population_size,
            offspring_size = config.offspring_size,
            generations = config.max_generations,
            "starting NSGA-II"
        );

        // 1. Initialize population
        let sampled: Vec<(Vec<f64>, P::Key)> = (0..config.population_size)
            .map(|_| {
                let genes = random_vector(n_var, &mut rng);
                let key = problem.decode(&genes);
                (genes, key)
            })
            .collect();
        let sampled = unique_candidates(sampled);

        // 2. Evaluate and rank it
        let population = evaluate_candidates(problem, sampled, config.parallel);
        let mut population = rank_and_crowding(population, config.population_size);

        let mut history = Vec::with_capacity(config.max_generations + 1);
        history.push(generation_stats(0, &population, 0));

        // 3. Evolutionary loop
        for gen in 1..=config.max_generations {
            let offspring = make_offspring(
                problem,
                &population,
                config,
                mutation_probability,
                &mut rng,
            );
            let accepted = offspring.len();
            if accepted < config.offspring_size {
                warn!(
                    generation = gen,
                    accepted,
                    requested = config.offspring_size,
                    "could not find enough distinct offspring"
                );
            }

            let mut merged = population;
            merged.extend(evaluate_candidates(problem, offspring, config.parallel));
            population = rank_and_crowding(eliminate_duplicates(merged), config.population_size);

            let stats = generation_stats(gen, &population, accepted);
            debug!(
                generation = stats.generation,
                population = stats.population_size,
                front = stats.front_size,
                feasible = stats.feasible,
                best_f1 = ?stats.best_f1,
                best_f2 = ?stats.best_f2,
                "generation complete"
            );
            history.push(stats);
        }

        info!(
            generations = config.max_generations,
            front = population.iter().filter(|ind| ind.rank == 0).count(),
            "NSGA-II finished"
        );

        Ok(Nsga2Result {
            population,
            generations: config.max_generations,
            seed,
            history,
        })
    }
}

/// Produces up to `config.offspring_size` children whose keys are new to
/// the population and to each other.
fn make_offspring<P: BinaryProblem>(
    problem: &P,
    population: &[Individual<P::Key>],
    config: &Nsga2Config,
    mutation_probability: f64,
    rng: &mut SearchRng,
) -> Vec<(Vec<f64>, P::Key)> {
    let mut seen: HashSet<P::Key> = population.iter().map(|ind| ind.key.clone()).collect();
    let mut offspring = Vec::with_capacity(config.offspring_size);

    for _ in 0..config.mating_attempts {
        if offspring.len() >= config.offspring_size {
            break;
        }

        let p1 = tournament(population, config.tournament_size, rng);
        let p2 = tournament(population, config.tournament_size, rng);
        let (c1, c2) = sbx_crossover(
            &population[p1].genes,
            &population[p2].genes,
            config.crossover_probability,
            config.crossover_eta,
            rng,
        );

        for mut child in [c1, c2] {
            if offspring.len() >= config.offspring_size {
                break;
            }
            polynomial_mutation(&mut child, mutation_probability, config.mutation_eta, rng);
            let key = problem.decode(&child);
            if seen.insert(key.clone()) {
                offspring.push((child, key));
            }
        }
    }

    offspring
}

/// Keeps the first candidate of every key.
fn unique_candidates<K: Clone + Eq + std::hash::Hash>(
    candidates: Vec<(Vec<f64>, K)>,
) -> Vec<(Vec<f64>, K)> {
    let mut seen = HashSet::with_capacity(candidates.len());
    candidates
        .into_iter()
        .filter(|(_, key)| seen.insert(key.clone()))
        .collect()
}

/// Evaluate candidates, preserving their order.
#[cfg(feature = "parallel")]
fn evaluate_candidates<P: BinaryProblem>(
    problem: &P,
    candidates: Vec<(Vec<f64>, P::Key)>,
    parallel: bool,
) -> Vec<Individual<P::Key>> {
    if parallel {
        candidates
            .into_par_iter()
            .map(|(genes, key)| evaluate_one(problem, genes, key))
            .collect()
    } else {
        candidates
            .into_iter()
            .map(|(genes, key)| evaluate_one(problem, genes, key))
            .collect()
    }
}

/// Evaluate candidates, preserving their order.
#[cfg(not(feature = "parallel"))]
fn evaluate_candidates<P: BinaryProblem>(
    problem: &P,
    candidates: Vec<(Vec<f64>, P::Key)>,
    _parallel: bool,
) -> Vec<Individual<P::Key>> {
    candidates
        .into_iter()
        .map(|(genes, key)| evaluate_one(problem, genes, key))
        .collect()
}

fn evaluate_one<P: BinaryProblem>(problem: &P, genes: Vec<f64>, key: P::Key) -> Individual<P::Key> {
    let evaluation = problem.evaluate(&key);
    Individual::new(genes, key, evaluation)
}

fn generation_stats<K>(
    generation: usize,
    population: &[Individual<K>],
    offspring: usize,
) -> GenerationStats {
    let feasible: Vec<&Individual<K>> = population
        .iter()
        .filter(|ind| ind.evaluation.is_feasible())
        .collect();
    let best = |obj: usize| {
        feasible
            .iter()
            .map(|ind| ind.objectives()[obj])
            .min_by(|a, b| a.total_cmp(b))
    };

    GenerationStats {
        generation,
        population_size: population.len(),
        front_size: population.iter().filter(|ind| ind.rank == 0).count(),
        feasible: feasible.len(),
        offspring,
        best_f1: best(0),
        best_f2: best(1),
    }
}

// ============================================================================
// Tests
// ============================================================================
