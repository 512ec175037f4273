//! Benchmark command
//!
//! Samples random hidden targets, follows the optimal policy for each and
//! aggregates the entropy trajectories per step.

use super::summary::{StepSummary, summarize_trajectories};
use crate::core::OracleError;
use crate::oracle::{ExactQueryOracle, Trajectory};
use rand::SeedableRng;
use rand::rngs::StdRng;
use rand::seq::IndexedRandom;
use std::collections::HashMap;
use std::time::{Duration, Instant};

/// Configuration for a benchmark run
pub struct BenchmarkConfig {
    /// Number of targets to sample without replacement
    pub count: usize,
    /// Seed for reproducible sampling; fresh entropy when `None`
    pub seed: Option<u64>,
    /// Model name written to the summary rows
    pub label: String,
}

impl BenchmarkConfig {
    #[must_use]
    pub fn new(count: usize) -> Self {
        Self {
            count,
            seed: None,
            label: "Oracle".to_string(),
        }
    }
}

/// Result of a benchmark run
pub struct BenchmarkResult {
    pub label: String,
    pub targets: Vec<String>,
    pub root_cost: f64,
    pub average_questions: f64,
    pub min_questions: usize,
    pub max_questions: usize,
    /// Targets isolated down to a single object
    pub resolved: usize,
    pub distribution: HashMap<usize, usize>,
    pub summary: Vec<StepSummary>,
    pub trajectories: Vec<Trajectory>,
    pub solve_duration: Duration,
    pub simulate_duration: Duration,
}

/// Draw up to `count` distinct target IDs
#[must_use]
pub fn sample_targets(ids: &[String], count: usize, seed: Option<u64>) -> Vec<String> {
    let mut rng = match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_os_rng(),
    };
    ids.choose_multiple(&mut rng, count).cloned().collect()
}

/// Run the benchmark over randomly sampled targets
///
/// # Errors
///
/// Only fails if the solved policy cannot answer a lookup, which would be a
/// solver bug.
pub fn run_benchmark(
    oracle: &mut ExactQueryOracle,
    config: &BenchmarkConfig,
) -> Result<BenchmarkResult, OracleError> {
    let targets = sample_targets(oracle.items().ids(), config.count, config.seed);

    let start = Instant::now();
    let policy = oracle.solved_policy();
    let solve_duration = start.elapsed();

    let start = Instant::now();
    let trajectories = policy.simulate_targets(&targets)?;
    let simulate_duration = start.elapsed();

    let mut distribution: HashMap<usize, usize> = HashMap::new();
    for trajectory in &trajectories {
        *distribution.entry(trajectory.num_questions()).or_insert(0) += 1;
    }

    let total_questions: usize = trajectories.iter().map(Trajectory::num_questions).sum();
    let average_questions = if trajectories.is_empty() {
        0.0
    } else {
        total_questions as f64 / trajectories.len() as f64
    };

    Ok(BenchmarkResult {
        label: config.label.clone(),
        root_cost: policy.root_cost(),
        average_questions,
        min_questions: trajectories
            .iter()
            .map(Trajectory::num_questions)
            .min()
            .unwrap_or(0),
        max_questions: trajectories
            .iter()
            .map(Trajectory::num_questions)
            .max()
            .unwrap_or(0),
        resolved: trajectories.iter().filter(|t| t.is_resolved()).count(),
        distribution,
        summary: summarize_trajectories(&config.label, &trajectories),
        targets,
        trajectories,
        solve_duration,
        simulate_duration,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::datasets::demo_items;
    use crate::oracle::fixtures::random_table;

    #[test]
    fn seeded_sampling_is_reproducible() {
        let ids: Vec<String> = (0..50).map(|n| format!("{n:04}")).collect();

        let first = sample_targets(&ids, 10, Some(7));
        let second = sample_targets(&ids, 10, Some(7));
        assert_eq!(first, second);
        assert_eq!(first.len(), 10);

        let mut unique = first.clone();
        unique.sort();
        unique.dedup();
        assert_eq!(unique.len(), 10);
    }

    #[test]
    fn sampling_more_than_available_takes_everything() {
        let ids: Vec<String> = vec!["a".into(), "b".into(), "c".into()];
        let mut sampled = sample_targets(&ids, 30, Some(1));
        sampled.sort();
        assert_eq!(sampled, ids);
    }

    #[test]
    fn benchmark_runs() {
        let mut oracle = ExactQueryOracle::new(demo_items().unwrap()).unwrap();
        let mut config = BenchmarkConfig::new(10);
        config.seed = Some(3);

        let result = run_benchmark(&mut oracle, &config).unwrap();

        assert_eq!(result.targets.len(), 10);
        assert_eq!(result.trajectories.len(), 10);
        assert_eq!(result.label, "Oracle");
        assert!(result.average_questions >= result.min_questions as f64);
        assert!(result.average_questions <= result.max_questions as f64);
        assert!((result.root_cost - 53.0 / 24.0).abs() < 1e-12);
    }

    #[test]
    fn distribution_sums_to_targets() {
        let mut oracle = ExactQueryOracle::new(random_table(8, 40, 5, 3)).unwrap();
        let mut config = BenchmarkConfig::new(25);
        config.seed = Some(11);

        let result = run_benchmark(&mut oracle, &config).unwrap();
        assert_eq!(result.distribution.values().sum::<usize>(), 25);
    }

    #[test]
    fn summary_starts_at_prior_entropy() {
        let mut oracle = ExactQueryOracle::new(demo_items().unwrap()).unwrap();
        let mut config = BenchmarkConfig::new(30);
        config.seed = Some(5);
        config.label = "Exact".into();

        let result = run_benchmark(&mut oracle, &config).unwrap();
        let first = &result.summary[0];

        assert_eq!(first.model, "Exact");
        assert_eq!(first.step, 1);
        assert!((first.entropy_bits_mean - 24f64.log2()).abs() < 1e-12);
        assert!(first.entropy_bits_std.abs() < 1e-12);

        let means: Vec<f64> = result.summary.iter().map(|r| r.entropy_bits_mean).collect();
        assert!(means.windows(2).all(|w| w[1] <= w[0]));
    }

    #[test]
    fn full_sample_average_equals_root_cost() {
        let mut oracle = ExactQueryOracle::new(demo_items().unwrap()).unwrap();
        let mut config = BenchmarkConfig::new(usize::MAX);
        config.seed = Some(0);

        let result = run_benchmark(&mut oracle, &config).unwrap();
        assert_eq!(result.targets.len(), 24);
        assert!((result.average_questions - result.root_cost).abs() < 1e-12);
        assert_eq!(result.resolved, 22);
    }
}
