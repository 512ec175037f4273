//! Read-only view of a solved oracle
//!
//! Once the root is solved, every state the optimal policy can reach is in
//! the memo. A `SolvedPolicy` answers lookups through `&self`, so batches of
//! targets can be simulated in parallel without locking.

use super::solver::Memo;
use super::trajectory::{Trajectory, walk};
use crate::core::{AttributeIndex, CandidateSet, ItemTable, OracleError};
use rayon::prelude::*;

/// Optimal policy backed by an already-solved memo table
#[derive(Debug, Clone, Copy)]
pub struct SolvedPolicy<'a> {
    items: &'a ItemTable,
    root: &'a CandidateSet,
    memo: &'a Memo,
    root_cost: f64,
}

impl<'a> SolvedPolicy<'a> {
    pub(crate) const fn new(
        items: &'a ItemTable,
        root: &'a CandidateSet,
        memo: &'a Memo,
        root_cost: f64,
    ) -> Self {
        Self {
            items,
            root,
            memo,
            root_cost,
        }
    }

    #[must_use]
    pub const fn items(&self) -> &'a ItemTable {
        self.items
    }

    /// Expected number of questions from the full candidate pool
    #[must_use]
    pub const fn root_cost(&self) -> f64 {
        self.root_cost
    }

    /// Optimal next attribute for a solved state
    ///
    /// # Errors
    ///
    /// Returns `OracleError::UnsolvedState` if the state was never solved.
    pub fn best_attribute(
        &self,
        state: &CandidateSet,
    ) -> Result<Option<AttributeIndex>, OracleError> {
        self.memo
            .get(state)
            .map(|solution| solution.attribute)
            .ok_or(OracleError::UnsolvedState(state.len()))
    }

    /// Follow the optimal policy for one hidden target
    ///
    /// # Errors
    ///
    /// Returns `OracleError::UnknownItem` if `target_id` is not in the table.
    pub fn simulate_target(&self, target_id: &str) -> Result<Trajectory, OracleError> {
        let target = self
            .items
            .index_of(target_id)
            .ok_or_else(|| OracleError::UnknownItem(target_id.to_string()))?;

        walk(self.items, self.root, target, |state| {
            self.best_attribute(state)
        })
    }

    /// Simulate many targets in parallel, preserving input order
    ///
    /// # Errors
    ///
    /// Returns the first `OracleError::UnknownItem` encountered.
    pub fn simulate_targets<S>(&self, target_ids: &[S]) -> Result<Vec<Trajectory>, OracleError>
    where
        S: AsRef<str> + Sync,
    {
        target_ids
            .par_iter()
            .map(|id| self.simulate_target(id.as_ref()))
            .collect()
    }

    /// Simulate every object in the table as the hidden target
    ///
    /// # Errors
    ///
    /// Only fails if the memo is missing a state on the policy path.
    pub fn simulate_all(&self) -> Result<Vec<Trajectory>, OracleError> {
        self.simulate_targets(self.items.ids())
    }
}

#[cfg(test)]
mod tests {
    use crate::core::OracleError;
    use crate::oracle::ExactQueryOracle;
    use crate::oracle::fixtures::{random_table, three_objects, twins};

    #[test]
    fn policy_matches_oracle_trajectories() {
        let items = random_table(9, 45, 5, 3);
        let ids = items.ids().to_vec();

        let mut sequential = ExactQueryOracle::new(items.clone()).unwrap();
        let expected: Vec<_> = ids
            .iter()
            .map(|id| sequential.simulate_target(id).unwrap())
            .collect();

        let mut oracle = ExactQueryOracle::new(items).unwrap();
        let policy = oracle.solved_policy();
        let parallel = policy.simulate_targets(&ids).unwrap();

        assert_eq!(parallel, expected);
    }

    #[test]
    fn simulate_all_covers_every_object() {
        let mut oracle = ExactQueryOracle::new(three_objects()).unwrap();
        let policy = oracle.solved_policy();
        let trajectories = policy.simulate_all().unwrap();

        let targets: Vec<&str> = trajectories.iter().map(|t| t.target.as_str()).collect();
        assert_eq!(targets, vec!["a", "b", "c"]);

        let mean = trajectories.iter().map(|t| t.num_questions()).sum::<usize>() as f64 / 3.0;
        assert!((mean - policy.root_cost()).abs() < 1e-12);
    }

    #[test]
    fn unknown_target_is_reported() {
        let mut oracle = ExactQueryOracle::new(twins()).unwrap();
        let policy = oracle.solved_policy();

        assert_eq!(
            policy.simulate_targets(&["x", "missing"]),
            Err(OracleError::UnknownItem("missing".into()))
        );
    }

    #[test]
    fn unsolved_state_is_reported() {
        let mut oracle = ExactQueryOracle::new(three_objects()).unwrap();
        let policy = oracle.solved_policy();
        let items = policy.items();

        // {a, c} answers "size = S"; no single answer yields {b, c}
        let reachable = items.candidate_set(["a", "c"]).unwrap();
        assert_eq!(policy.best_attribute(&reachable), Ok(Some(0)));

        let unreachable = items.candidate_set(["b", "c"]).unwrap();
        assert_eq!(
            policy.best_attribute(&unreachable),
            Err(OracleError::UnsolvedState(2))
        );
    }
}
