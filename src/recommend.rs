//! End-to-end recommendation: input document in, Pareto list out.

use tracing::info;

use crate::error::Result;
use crate::input::{AlgorithmInput, PreparedInput};
use crate::nsga2::{Nsga2Config, Nsga2Runner};
use crate::resolve::{AlgorithmOutput, ParetoResolver};

/// Validates `input`, runs the search and resolves its first front.
///
/// # Examples
///
/// ```
/// use idc_recommend::{recommend, AlgorithmInput, Nsga2Config};
///
/// let input = AlgorithmInput::from_json_str(r#"{
///     "idc_list": ["A", "B"],
///     "ping_info": {"kr": {"A": 10, "B": 80}, "jp": {"A": 50, "B": 20}},
///     "country_rate": {"kr": 60, "jp": 40},
///     "idc_price": {"A": 5, "B": 3},
///     "cover_ping": 60,
///     "cover_rate": 0.5,
///     "cover_ping_ranges": [{"range": [0, 20], "score": 100}],
///     "idc_price_ranges": [{"range": [0, 10], "score": 100}]
/// }"#).unwrap();
///
/// let output = recommend(&input, &Nsga2Config::default().with_seed(1)).unwrap();
/// assert!(!output.pareto_list.is_empty());
/// ```
pub fn recommend(input: &AlgorithmInput, config: &Nsga2Config) -> Result<AlgorithmOutput> {
    let PreparedInput {
        problem,
        latency_scores,
        cost_scores,
    } = input.prepare()?;

    info!(
        candidates = problem.candidates().len(),
        countries = problem.countries().len(),
        picked = problem.mandatory().len(),
        banned = input.ban_idc_list.len(),
        "input prepared"
    );

    let result = Nsga2Runner::run(&problem, config)?;

    let resolver = ParetoResolver::new(&problem, &latency_scores, &cost_scores);
    let pareto_list = resolver.resolve(result.pareto_front());

    info!(
        seed = result.seed,
        generations = result.generations,
        solutions = pareto_list.len(),
        "recommendation finished"
    );

    Ok(AlgorithmOutput { pareto_list })
}
