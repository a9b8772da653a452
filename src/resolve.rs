//! Pareto resolution: from the terminal front to scored recommendations.

use serde::{Deserialize, Serialize};

use crate::nsga2::Individual;
use crate::problem::{IdcSelectionProblem, IdcSubset};

/// Score reported for a value outside every configured range.
pub const UNSCORED: f64 = -1.0;

/// One score bucket: values in `[range[0], range[1])` get `score`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreRange {
    pub range: [f64; 2],
    pub score: f64,
}

impl ScoreRange {
    /// Whether `value` falls in this bucket's half-open range.
    pub fn contains(&self, value: f64) -> bool {
        self.range[0] <= value && value < self.range[1]
    }
}

/// Ordered list of score buckets. The first bucket containing a value wins.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ScoreTable {
    ranges: Vec<ScoreRange>,
}

impl ScoreTable {
    pub fn new(ranges: Vec<ScoreRange>) -> Self {
        Self { ranges }
    }

    /// Score of `value`, or [`UNSCORED`] when no bucket contains it.
    pub fn lookup(&self, value: f64) -> f64 {
        self.ranges
            .iter()
            .find(|r| r.contains(value))
            .map_or(UNSCORED, |r| r.score)
    }
}

/// A recommended IDC set with its objective values and scores.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParetoSolution {
    /// Selected IDC identifiers, in candidate order.
    pub idc: Vec<String>,
    /// Player-weighted latency.
    pub f1: f64,
    /// Total unit price.
    pub f2: f64,
    /// Achieved covered player share.
    pub cover_rate: f64,
    pub f1_score: f64,
    pub f2_score: f64,
    /// Mean of the two scores.
    pub composite_score: f64,
}

/// The document written back to the caller.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AlgorithmOutput {
    pub pareto_list: Vec<ParetoSolution>,
}

/// Turns terminal individuals into an ordered, deduplicated frontier.
#[derive(Debug, Clone, Copy)]
pub struct ParetoResolver<'a> {
    problem: &'a IdcSelectionProblem,
    latency_scores: &'a ScoreTable,
    cost_scores: &'a ScoreTable,
}

impl<'a> ParetoResolver<'a> {
    pub fn new(
        problem: &'a IdcSelectionProblem,
        latency_scores: &'a ScoreTable,
        cost_scores: &'a ScoreTable,
    ) -> Self {
        Self {
            problem,
            latency_scores,
            cost_scores,
        }
    }

    /// Scores one individual. `None` when it decodes to an empty subset.
    pub fn solution(&self, individual: &Individual<IdcSubset>) -> Option<ParetoSolution> {
        let subset = self.problem.decode_genes(&individual.genes);
        if subset.is_empty() {
            return None;
        }
        let [f1, f2] = individual.evaluation.objectives;
        let f1_score = self.latency_scores.lookup(f1);
        let f2_score = self.cost_scores.lookup(f2);
        Some(ParetoSolution {
            idc: self.problem.idc_names(&subset),
            f1,
            f2,
            cover_rate: self.problem.implied_coverage(&individual.evaluation),
            f1_score,
            f2_score,
            composite_score: (f1_score + f2_score) / 2.0,
        })
    }

    /// Resolves `individuals` into the output frontier.
    ///
    /// Empty subsets are dropped, repeated solutions keep their first
    /// occurrence, and the result is stably sorted by ascending F1.
    pub fn resolve<'b, I>(&self, individuals: I) -> Vec<ParetoSolution>
    where
        I: IntoIterator<Item = &'b Individual<IdcSubset>>,
    {
        let mut solutions: Vec<ParetoSolution> = Vec::new();
        for individual in individuals {
            if let Some(solution) = self.solution(individual) {
                if !solutions.contains(&solution) {
                    solutions.push(solution);
                }
            }
        }
        solutions.sort_by(|a, b| a.f1.total_cmp(&b.f1));
        solutions
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::nsga2::{BinaryProblem, Evaluation};
    use crate::problem::{Candidate, CoverageRule, Country, PingTable};
    use proptest::prelude::*;

    fn table(entries: &[(f64, f64, f64)]) -> ScoreTable {
        ScoreTable::new(
            entries
                .iter()
                .map(|&(low, high, score)| ScoreRange {
                    range: [low, high],
                    score,
                })
                .collect(),
        )
    }

    fn candidate(name: &str, price: f64) -> Candidate {
        Candidate {
            name: name.into(),
            price,
        }
    }

    fn country(name: &str, weight: f64) -> Country {
        Country {
            name: name.into(),
            weight,
        }
    }

    fn problem(mandatory: Vec<usize>) -> IdcSelectionProblem {
        let mut pings = PingTable::new(2, 2);
        pings.set(0, 0, 10.0);
        pings.set(1, 0, 50.0);
        pings.set(0, 1, 80.0);
        pings.set(1, 1, 20.0);
        IdcSelectionProblem::new(
            vec![candidate("A", 5.0), candidate("B", 3.0)],
            vec![country("c1", 0.6), country("c2", 0.4)],
            pings,
            mandatory,
            CoverageRule {
                ping_threshold: 60.0,
                required_rate: 0.5,
            },
        )
    }

    fn individual(problem: &IdcSelectionProblem, genes: Vec<f64>) -> Individual<IdcSubset> {
        let key = problem.decode(&genes);
        let evaluation = problem.evaluate(&key);
        Individual::new(genes, key, evaluation)
    }

    #[test]
    fn test_lookup_half_open() {
        let t = table(&[(0.0, 10.0, 100.0), (10.0, 20.0, 80.0)]);
        assert_eq!(t.lookup(0.0), 100.0);
        assert_eq!(t.lookup(9.999), 100.0);
        assert_eq!(t.lookup(10.0), 80.0);
        assert_eq!(t.lookup(20.0), UNSCORED);
        assert_eq!(t.lookup(-0.1), UNSCORED);
    }

    #[test]
    fn test_lookup_first_match_wins() {
        let t = table(&[(0.0, 50.0, 1.0), (10.0, 20.0, 2.0)]);
        assert_eq!(t.lookup(15.0), 1.0);
    }

    #[test]
    fn test_empty_table_is_unscored() {
        assert_eq!(ScoreTable::default().lookup(3.0), UNSCORED);
    }

    #[test]
    fn test_solution_fields() {
        let p = problem(vec![]);
        let latency = table(&[(0.0, 20.0, 90.0)]);
        let cost = table(&[(0.0, 6.0, 70.0), (6.0, 10.0, 50.0)]);
        let resolver = ParetoResolver::new(&p, &latency, &cost);

        let s = resolver.solution(&individual(&p, vec![0.9, 0.8])).unwrap();
        assert_eq!(s.idc, vec!["A", "B"]);
        assert!((s.f1 - 14.0).abs() < 1e-9);
        assert!((s.f2 - 8.0).abs() < 1e-9);
        assert!((s.cover_rate - 1.0).abs() < 1e-9);
        assert_eq!(s.f1_score, 90.0);
        assert_eq!(s.f2_score, 50.0);
        assert_eq!(s.composite_score, 70.0);
    }

    #[test]
    fn test_resolve_drops_empty_dedups_and_sorts() {
        let p = problem(vec![]);
        let scores = ScoreTable::default();
        let resolver = ParetoResolver::new(&p, &scores, &scores);

        let population = vec![
            individual(&p, vec![0.9, 0.0]),
            individual(&p, vec![0.1, 0.2]),
            individual(&p, vec![0.9, 0.9]),
            individual(&p, vec![0.7, 0.3]),
        ];
        let solutions = resolver.resolve(&population);

        assert_eq!(solutions.len(), 2);
        assert_eq!(solutions[0].idc, vec!["A", "B"]);
        assert_eq!(solutions[1].idc, vec!["A"]);
        assert!(solutions.windows(2).all(|w| w[0].f1 <= w[1].f1));
    }

    #[test]
    fn test_resolve_keeps_mandatory() {
        let p = problem(vec![1]);
        let scores = ScoreTable::default();
        let resolver = ParetoResolver::new(&p, &scores, &scores);

        // Genes select nothing; the mandatory IDC still decodes in.
        let solutions = resolver.resolve(&[individual(&p, vec![0.0, 0.0])]);
        assert_eq!(solutions.len(), 1);
        assert_eq!(solutions[0].idc, vec!["B"]);
    }

    #[test]
    fn test_degenerate_coverage_reported() {
        let p = problem(vec![]);
        let scores = ScoreTable::default();
        let resolver = ParetoResolver::new(&p, &scores, &scores);
        let ind = Individual::new(
            vec![1.0, 0.0],
            IdcSubset::from_mask(vec![true, false]),
            Evaluation::degenerate([crate::problem::LATENCY_PENALTY, 5.0], 0.499),
        );
        let s = resolver.solution(&ind).unwrap();
        assert!((s.cover_rate - 0.001).abs() < 1e-12);
    }

    #[test]
    fn test_output_serializes_snake_case() {
        let output = AlgorithmOutput {
            pareto_list: vec![ParetoSolution {
                idc: vec!["A".into()],
                f1: 26.0,
                f2: 5.0,
                cover_rate: 1.0,
                f1_score: 60.0,
                f2_score: -1.0,
                composite_score: 29.5,
            }],
        };
        let value = serde_json::to_value(&output).unwrap();
        assert_eq!(value["pareto_list"][0]["idc"][0], "A");
        assert_eq!(value["pareto_list"][0]["f2_score"], -1.0);
        assert_eq!(value["pareto_list"][0]["composite_score"], 29.5);
    }

    proptest! {
        #[test]
        fn prop_value_in_bucket_gets_its_score(
            low in -1.0e6f64..1.0e6,
            width in 1.0e-3f64..1.0e4,
            t in 0.0f64..1.0,
            score in -100.0f64..100.0,
        ) {
            let high = low + width;
            let value = (low + t * width).min(high - width * 1e-6).max(low);
            prop_assume!(value >= low && value < high);
            let table = table(&[(low, high, score)]);
            prop_assert_eq!(table.lookup(value), score);
        }

        #[test]
        fn prop_value_outside_all_buckets_is_unscored(
            low in -1.0e6f64..1.0e6,
            width in 1.0e-3f64..1.0e4,
            gap in 0.0f64..1.0e3,
        ) {
            let high = low + width;
            let table = table(&[(low, high, 10.0)]);
            prop_assert_eq!(table.lookup(high + gap), UNSCORED);
            prop_assert_eq!(table.lookup(low - gap - 1e-3), UNSCORED);
        }
    }
}
