//! Exact dynamic-programming oracle
//!
//! For a candidate set S, the optimal expected number of remaining questions is
//!
//! ```text
//! C(S) = 0                                        if |S| <= 1
//! C(S) = min over splitting attributes a of
//!        1 + Σ_children (|child| / |S|) * C(child)
//! C(S) = 0                                        if no attribute splits S
//! ```
//!
//! The last case is an irreducible equivalence class: its members cannot be
//! told apart by any attribute, so the walk ends there with entropy > 0.
//! Results are memoized per canonical candidate set, since the same subset is
//! reached through many different question orders.

use super::metrics::AttributeMetrics;
use super::partition::split_on_attribute;
use super::policy::SolvedPolicy;
use super::trajectory::{Trajectory, walk};
use crate::core::{AttributeIndex, CandidateSet, ItemTable, OracleError};
use rustc_hash::FxHashMap;

/// Optimal expected cost of a state and the attribute achieving it
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Solution {
    pub cost: f64,
    /// `None` for singletons and irreducible equivalence classes
    pub attribute: Option<AttributeIndex>,
}

impl Solution {
    pub const TERMINAL: Self = Self {
        cost: 0.0,
        attribute: None,
    };
}

/// Memo table keyed by canonical candidate set
///
/// Singleton and empty states are never stored; they are terminal by definition.
#[derive(Debug, Default)]
pub(crate) struct Memo {
    solutions: FxHashMap<CandidateSet, Solution>,
}

impl Memo {
    pub(crate) fn get(&self, state: &CandidateSet) -> Option<Solution> {
        if state.len() <= 1 {
            return Some(Solution::TERMINAL);
        }
        self.solutions.get(state).copied()
    }

    pub(crate) fn len(&self) -> usize {
        self.solutions.len()
    }

    pub(crate) fn solve(&mut self, items: &ItemTable, state: &CandidateSet) -> Solution {
        if let Some(solution) = self.get(state) {
            return solution;
        }

        let mut best = Solution::TERMINAL;
        let mut best_cost = f64::INFINITY;

        for attribute in 0..items.num_attributes() {
            let children = split_on_attribute(items, state, attribute);
            if children.len() <= 1 {
                continue;
            }

            let expected_cost = self.expected_cost(items, state, &children);

            // Strict comparison: ties keep the earliest attribute in schema order
            if expected_cost < best_cost {
                best_cost = expected_cost;
                best = Solution {
                    cost: expected_cost,
                    attribute: Some(attribute),
                };
            }
        }

        self.solutions.insert(state.clone(), best);
        best
    }

    /// `1 + Σ (|child| / |state|) * C(child)` for an attribute that splits `state`
    fn expected_cost(
        &mut self,
        items: &ItemTable,
        state: &CandidateSet,
        children: &[CandidateSet],
    ) -> f64 {
        let n = state.len() as f64;
        let mut expected_cost = 1.0;
        for child in children {
            let weight = child.len() as f64 / n;
            expected_cost += weight * self.solve(items, child).cost;
        }
        expected_cost
    }
}

/// Exact oracle for multi-way attribute questions
///
/// Owns the item table and its memo table. The memo grows monotonically
/// across every call on one instance; separate instances share nothing.
///
/// # Examples
/// ```
/// use kary_oracle::core::ItemTable;
/// use kary_oracle::oracle::ExactQueryOracle;
///
/// let items = ItemTable::from_records([
///     ("a", vec![("color", "red"), ("size", "S")]),
///     ("b", vec![("color", "red"), ("size", "L")]),
///     ("c", vec![("color", "blue"), ("size", "S")]),
/// ])
/// .unwrap();
///
/// let mut oracle = ExactQueryOracle::new(items).unwrap();
/// let cost = oracle.optimal_root_cost();
/// assert!((cost - 5.0 / 3.0).abs() < 1e-12);
///
/// let trajectory = oracle.simulate_target("a").unwrap();
/// assert_eq!(trajectory.asked_attributes(), vec!["color", "size"]);
/// ```
#[derive(Debug)]
pub struct ExactQueryOracle {
    items: ItemTable,
    root: CandidateSet,
    memo: Memo,
}

impl ExactQueryOracle {
    /// Create an oracle over a validated item table
    ///
    /// # Errors
    ///
    /// Returns `OracleError::EmptyTable` if the table has no objects.
    pub fn new(items: ItemTable) -> Result<Self, OracleError> {
        if items.is_empty() {
            return Err(OracleError::EmptyTable);
        }

        let root = items.all_candidates();
        Ok(Self {
            items,
            root,
            memo: Memo::default(),
        })
    }

    /// The object table the oracle reasons about
    #[must_use]
    pub fn items(&self) -> &ItemTable {
        &self.items
    }

    /// Candidate set holding every object
    #[must_use]
    pub fn root(&self) -> &CandidateSet {
        &self.root
    }

    /// Number of non-trivial candidate sets solved so far
    #[must_use]
    pub fn cached_states(&self) -> usize {
        self.memo.len()
    }

    /// Optimal expected cost and best attribute for `state`
    pub fn solve(&mut self, state: &CandidateSet) -> Solution {
        self.memo.solve(&self.items, state)
    }

    /// Expected number of questions from the full candidate pool
    pub fn optimal_root_cost(&mut self) -> f64 {
        self.memo.solve(&self.items, &self.root).cost
    }

    /// Optimal next attribute for the objects with the given IDs
    ///
    /// The IDs are canonicalized first, so order and duplicates do not matter.
    ///
    /// # Errors
    ///
    /// Returns `OracleError::UnknownItem` if an ID is not in the table.
    pub fn best_attribute_for_state<I, S>(&mut self, ids: I) -> Result<Option<&str>, OracleError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let state = self.items.candidate_set(ids)?;
        let attribute = self.memo.solve(&self.items, &state).attribute;
        Ok(attribute.map(|a| self.items.attribute_name(a)))
    }

    /// Optimal expected number of further questions for the given IDs
    ///
    /// # Errors
    ///
    /// Returns `OracleError::UnknownItem` if an ID is not in the table.
    pub fn expected_cost_for_state<I, S>(&mut self, ids: I) -> Result<f64, OracleError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let state = self.items.candidate_set(ids)?;
        Ok(self.memo.solve(&self.items, &state).cost)
    }

    /// Partition `state` by a named attribute
    ///
    /// # Errors
    ///
    /// Returns `OracleError::UnknownAttribute` if the name is not in the schema.
    pub fn split_on_attribute(
        &self,
        state: &CandidateSet,
        attribute: &str,
    ) -> Result<Vec<CandidateSet>, OracleError> {
        let attribute = self.items.attribute_index(attribute)?;
        Ok(split_on_attribute(&self.items, state, attribute))
    }

    /// Follow the optimal policy for a hidden target
    ///
    /// # Errors
    ///
    /// Returns `OracleError::UnknownItem` if `target_id` is not in the table.
    /// Nothing is solved in that case.
    pub fn simulate_target(&mut self, target_id: &str) -> Result<Trajectory, OracleError> {
        let target = self
            .items
            .index_of(target_id)
            .ok_or_else(|| OracleError::UnknownItem(target_id.to_string()))?;

        let items = &self.items;
        let memo = &mut self.memo;
        walk(items, &self.root, target, |state| {
            Ok(memo.solve(items, state).attribute)
        })
    }

    /// Diagnostics for every attribute as the next question at `state`
    ///
    /// Returned in schema order.
    pub fn attribute_metrics(&mut self, state: &CandidateSet) -> Vec<AttributeMetrics> {
        let items = &self.items;
        let memo = &mut self.memo;

        (0..items.num_attributes())
            .map(|attribute| {
                let children = split_on_attribute(items, state, attribute);
                let expected_cost =
                    (children.len() > 1).then(|| memo.expected_cost(items, state, &children));
                AttributeMetrics::from_children(
                    items.attribute_name(attribute),
                    &children,
                    expected_cost,
                )
            })
            .collect()
    }

    /// Solve the root and expose the result as a read-only policy
    ///
    /// Solving the root visits every state reachable along the optimal
    /// policy, so the returned view can answer lookups through `&self` and be
    /// shared across threads.
    pub fn solved_policy(&mut self) -> SolvedPolicy<'_> {
        let root_cost = self.optimal_root_cost();
        SolvedPolicy::new(&self.items, &self.root, &self.memo, root_cost)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::oracle::entropy::entropy_uniform;
    use crate::oracle::fixtures::{grid, random_table, single, three_objects, twins};

    #[test]
    fn three_object_root_cost() {
        let mut oracle = ExactQueryOracle::new(three_objects()).unwrap();
        let cost = oracle.optimal_root_cost();

        // 1 + (2/3) * 1 + (1/3) * 0
        assert!((cost - 5.0 / 3.0).abs() < 1e-12);
        assert!(cost > 1.0 && cost < 2.0);

        // root, {a, b} and {a, c}; singletons are never stored
        assert_eq!(oracle.cached_states(), 3);
    }

    #[test]
    fn ties_keep_first_attribute_in_schema_order() {
        // Both color and size split {a, b, c} into a pair and a singleton
        let mut oracle = ExactQueryOracle::new(three_objects()).unwrap();
        assert_eq!(
            oracle.best_attribute_for_state(["a", "b", "c"]).unwrap(),
            Some("color")
        );
    }

    #[test]
    fn three_object_trajectory() {
        let mut oracle = ExactQueryOracle::new(three_objects()).unwrap();

        let (entropies, asked) = oracle.simulate_target("a").unwrap().into_parts();
        assert_eq!(asked, vec!["color", "size"]);
        assert_eq!(entropies.len(), 3);
        assert!((entropies[0] - 3f64.log2()).abs() < 1e-12);
        assert!((entropies[1] - 1.0).abs() < 1e-12);
        assert!(entropies[2].abs() < 1e-12);

        let (entropies, asked) = oracle.simulate_target("c").unwrap().into_parts();
        assert_eq!(asked, vec!["color"]);
        assert_eq!(entropies.len(), 2);
        assert!(entropies[1].abs() < 1e-12);
    }

    #[test]
    fn twins_end_in_equivalence_class() {
        let mut oracle = ExactQueryOracle::new(twins()).unwrap();

        for target in ["x", "y"] {
            let trajectory = oracle.simulate_target(target).unwrap();
            assert_eq!(trajectory.asked_attributes(), vec!["color"]);
            assert!((trajectory.final_entropy() - 1.0).abs() < 1e-12);
            assert_eq!(trajectory.final_candidates, vec!["x", "y"]);
            assert!(!trajectory.is_resolved());
        }

        assert_eq!(oracle.best_attribute_for_state(["x", "y"]).unwrap(), None);
        assert!(oracle.expected_cost_for_state(["y", "x"]).unwrap().abs() < 1e-12);
        assert!((oracle.optimal_root_cost() - 1.0).abs() < 1e-12);
    }

    #[test]
    fn identical_table_is_terminal_at_root() {
        let items = ItemTable::from_records([
            ("p", vec![("color", "red")]),
            ("q", vec![("color", "red")]),
            ("r", vec![("color", "red")]),
        ])
        .unwrap();
        let mut oracle = ExactQueryOracle::new(items).unwrap();

        assert!(oracle.optimal_root_cost().abs() < f64::EPSILON);
        assert_eq!(oracle.best_attribute_for_state(["r", "p", "q"]).unwrap(), None);

        let (entropies, asked) = oracle.simulate_target("q").unwrap().into_parts();
        assert_eq!(entropies.len(), 1);
        assert!((entropies[0] - 3f64.log2()).abs() < 1e-12);
        assert!(asked.is_empty());

        // the irreducible root is the only stored state
        assert_eq!(oracle.cached_states(), 1);
    }

    #[test]
    fn single_object_table() {
        let mut oracle = ExactQueryOracle::new(single()).unwrap();

        assert!(oracle.optimal_root_cost().abs() < f64::EPSILON);
        let (entropies, asked) = oracle.simulate_target("only").unwrap().into_parts();
        assert_eq!(entropies, vec![0.0]);
        assert!(asked.is_empty());
        assert_eq!(oracle.cached_states(), 0);
    }

    #[test]
    fn unknown_target_is_rejected_without_solving() {
        let mut oracle = ExactQueryOracle::new(three_objects()).unwrap();

        assert_eq!(
            oracle.simulate_target("nope"),
            Err(OracleError::UnknownItem("nope".into()))
        );
        assert_eq!(oracle.cached_states(), 0);
    }

    #[test]
    fn unknown_state_member_is_rejected() {
        let mut oracle = ExactQueryOracle::new(three_objects()).unwrap();
        assert!(matches!(
            oracle.best_attribute_for_state(["a", "q"]),
            Err(OracleError::UnknownItem(_))
        ));
    }

    #[test]
    fn best_attribute_ignores_input_order() {
        let mut oracle = ExactQueryOracle::new(grid(3, 3)).unwrap();
        let ids: Vec<String> = oracle.items().ids().iter().take(12).cloned().collect();
        let reversed: Vec<String> = ids.iter().rev().cloned().collect();

        let forward = oracle.best_attribute_for_state(&ids).unwrap().map(str::to_string);
        let backward = oracle
            .best_attribute_for_state(&reversed)
            .unwrap()
            .map(str::to_string);
        let cached = oracle.cached_states();
        let again = oracle.best_attribute_for_state(&reversed).unwrap().map(str::to_string);

        assert_eq!(forward, backward);
        assert_eq!(forward, again);
        assert_eq!(oracle.cached_states(), cached);
    }

    #[test]
    fn root_cost_is_idempotent() {
        let mut oracle = ExactQueryOracle::new(random_table(7, 40, 4, 3)).unwrap();
        let first = oracle.optimal_root_cost();
        let second = oracle.optimal_root_cost();
        assert_eq!(first.to_bits(), second.to_bits());
    }

    #[test]
    fn memo_grows_monotonically() {
        let mut oracle = ExactQueryOracle::new(random_table(3, 30, 4, 3)).unwrap();
        assert_eq!(oracle.cached_states(), 0);

        let subset: Vec<String> = oracle.items().ids().iter().take(10).cloned().collect();
        oracle.best_attribute_for_state(&subset).unwrap();
        let after_subset = oracle.cached_states();
        assert!(after_subset > 0);

        oracle.optimal_root_cost();
        assert!(oracle.cached_states() >= after_subset);
    }

    #[test]
    fn full_factorial_needs_one_question_per_attribute() {
        for (attributes, values) in [(2, 2), (3, 2), (2, 4), (3, 3)] {
            let mut oracle = ExactQueryOracle::new(grid(attributes, values)).unwrap();
            let cost = oracle.optimal_root_cost();
            assert!(
                (cost - attributes as f64).abs() < 1e-9,
                "grid({attributes}, {values}) cost {cost}"
            );
        }
    }

    #[test]
    fn mean_questions_equal_root_cost() {
        for seed in 0..5 {
            let mut oracle = ExactQueryOracle::new(random_table(seed, 35, 5, 3)).unwrap();
            let root_cost = oracle.optimal_root_cost();
            let ids = oracle.items().ids().to_vec();

            let total: usize = ids
                .iter()
                .map(|id| oracle.simulate_target(id).unwrap().num_questions())
                .sum();
            let mean = total as f64 / ids.len() as f64;

            assert!(
                (mean - root_cost).abs() < 1e-9,
                "seed {seed}: mean {mean} vs root cost {root_cost}"
            );
        }
    }

    #[test]
    fn trajectories_are_monotone_and_bounded() {
        let mut oracle = ExactQueryOracle::new(random_table(11, 50, 6, 4)).unwrap();
        let num_attributes = oracle.items().num_attributes();
        let prior = entropy_uniform(oracle.items().len());

        for id in oracle.items().ids().to_vec() {
            let trajectory = oracle.simulate_target(&id).unwrap();
            let entropies = trajectory.entropies();

            assert!((entropies[0] - prior).abs() < 1e-12);
            assert!(entropies.windows(2).all(|w| w[1] < w[0]));
            assert!(trajectory.num_questions() <= num_attributes);
            assert!(trajectory.final_candidates.contains(&id));
        }
    }

    #[test]
    fn root_cost_is_finite_and_positive_for_splittable_tables() {
        for seed in 20..25 {
            let mut oracle = ExactQueryOracle::new(random_table(seed, 25, 4, 3)).unwrap();
            let cost = oracle.optimal_root_cost();
            assert!(cost.is_finite());
            assert!(cost > 0.0);
        }
    }

    #[test]
    fn root_cost_beats_fixed_question_order() {
        // Asking attributes in schema order (skipping useless ones) is one
        // valid policy, so the optimum can never be worse
        let items = random_table(42, 60, 5, 3);
        let mut oracle = ExactQueryOracle::new(items.clone()).unwrap();
        let optimal = oracle.optimal_root_cost();

        let root = items.all_candidates();
        let mut total = 0usize;
        for target in 0..items.len() {
            let trajectory = walk(&items, &root, target, |state| {
                Ok((0..items.num_attributes())
                    .find(|&a| split_on_attribute(&items, state, a).len() > 1))
            })
            .unwrap();
            total += trajectory.num_questions();
        }
        let fixed = total as f64 / items.len() as f64;

        assert!(optimal <= fixed + 1e-9);
    }

    #[test]
    fn attribute_metrics_at_root() {
        let mut oracle = ExactQueryOracle::new(twins()).unwrap();
        let root = oracle.root().clone();
        let metrics = oracle.attribute_metrics(&root);

        assert_eq!(metrics.len(), 2);
        assert_eq!(metrics[0].attribute, "color");
        assert_eq!(metrics[0].branches, 2);
        assert_eq!(metrics[0].expected_cost, Some(1.0));
        assert_eq!(metrics[1].attribute, "size");
        assert!(!metrics[1].splits());
        assert_eq!(metrics[1].expected_cost, None);
    }

    #[test]
    fn best_metric_matches_solution() {
        let mut oracle = ExactQueryOracle::new(random_table(5, 40, 5, 3)).unwrap();
        let root = oracle.root().clone();
        let solution = oracle.solve(&root);
        let metrics = oracle.attribute_metrics(&root);

        let best = metrics
            .iter()
            .filter_map(|m| m.expected_cost)
            .fold(f64::INFINITY, f64::min);
        assert!((best - solution.cost).abs() < 1e-12);

        let chosen = &metrics[solution.attribute.unwrap()];
        assert_eq!(chosen.expected_cost, Some(solution.cost));
    }

    #[test]
    fn split_on_named_attribute() {
        let oracle = ExactQueryOracle::new(three_objects()).unwrap();
        let children = oracle.split_on_attribute(oracle.root(), "size").unwrap();
        assert_eq!(children.len(), 2);

        assert_eq!(
            oracle.split_on_attribute(oracle.root(), "weight"),
            Err(OracleError::UnknownAttribute("weight".into()))
        );
    }

    #[test]
    fn independent_instances_share_nothing() {
        let mut first = ExactQueryOracle::new(three_objects()).unwrap();
        let second = ExactQueryOracle::new(three_objects()).unwrap();

        first.optimal_root_cost();
        assert!(first.cached_states() > 0);
        assert_eq!(second.cached_states(), 0);
    }
}
