//! Target solving command
//!
//! Follows the optimal policy for one hidden target and returns the path.

use crate::core::OracleError;
use crate::oracle::{ExactQueryOracle, Trajectory};

/// Configuration for solving a target
pub struct SolveConfig {
    pub target: String,
}

impl SolveConfig {
    #[must_use]
    pub const fn new(target: String) -> Self {
        Self { target }
    }
}

/// Result of solving a target
pub struct SolveResult {
    pub target: String,
    /// The target's attribute record in schema order
    pub record: Vec<(String, String)>,
    /// Expected questions over all targets, for comparison
    pub root_cost: f64,
    pub trajectory: Trajectory,
}

impl SolveResult {
    /// Whether the target ended alone rather than in an equivalence class
    #[must_use]
    pub fn success(&self) -> bool {
        self.trajectory.is_resolved()
    }
}

/// Solve a specific target with the oracle
///
/// # Errors
///
/// Returns `OracleError::UnknownItem` if the target is not in the table.
pub fn solve_target(
    config: SolveConfig,
    oracle: &mut ExactQueryOracle,
) -> Result<SolveResult, OracleError> {
    let trajectory = oracle.simulate_target(&config.target)?;
    let root_cost = oracle.optimal_root_cost();

    let items = oracle.items();
    let record = items
        .index_of(&config.target)
        .map(|index| {
            items
                .record(index)
                .map(|(name, value)| (name.to_string(), value.to_string()))
                .collect()
        })
        .unwrap_or_default();

    Ok(SolveResult {
        target: config.target,
        record,
        root_cost,
        trajectory,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::datasets::demo_items;
    use crate::oracle::fixtures::three_objects;

    #[test]
    fn solve_target_succeeds() {
        let mut oracle = ExactQueryOracle::new(three_objects()).unwrap();
        let result = solve_target(SolveConfig::new("b".to_string()), &mut oracle).unwrap();

        assert!(result.success());
        assert_eq!(result.trajectory.asked_attributes(), vec!["color", "size"]);
        assert_eq!(
            result.record,
            vec![
                ("color".to_string(), "red".to_string()),
                ("size".to_string(), "L".to_string())
            ]
        );
        assert!((result.root_cost - 5.0 / 3.0).abs() < 1e-12);
    }

    #[test]
    fn solve_records_shrinking_candidates() {
        let mut oracle = ExactQueryOracle::new(demo_items().unwrap()).unwrap();
        let result = solve_target(SolveConfig::new("0005".to_string()), &mut oracle).unwrap();

        for step in &result.trajectory.steps {
            assert!(step.candidates_after < step.candidates_before);
        }
        assert_eq!(result.trajectory.steps[0].candidates_before, 24);
    }

    #[test]
    fn solve_unknown_target_returns_error() {
        let mut oracle = ExactQueryOracle::new(three_objects()).unwrap();
        let result = solve_target(SolveConfig::new("zzz".to_string()), &mut oracle);
        assert!(matches!(result, Err(OracleError::UnknownItem(_))));
    }

    #[test]
    fn solve_indistinguishable_target_is_not_success() {
        let mut oracle = ExactQueryOracle::new(demo_items().unwrap()).unwrap();
        let result = solve_target(SolveConfig::new("0023".to_string()), &mut oracle).unwrap();

        assert!(!result.success());
        assert_eq!(result.trajectory.final_candidates.len(), 2);
    }
}
