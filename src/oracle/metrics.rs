//! Per-attribute diagnostics for a candidate state

use super::entropy::branch_entropy;
use crate::core::CandidateSet;

/// How useful one attribute is as the next question for a given state
#[derive(Debug, Clone, PartialEq)]
pub struct AttributeMetrics {
    pub attribute: String,
    /// Number of distinct answers over the state
    pub branches: usize,
    /// Shannon entropy of the answer distribution (expected bits gained)
    pub information_gain: f64,
    /// Expected number of candidates left after the answer
    pub expected_remaining: f64,
    /// Largest branch (worst-case candidates left)
    pub max_branch: usize,
    /// Expected total questions if this attribute is asked next and the
    /// optimal policy is followed afterwards; `None` when it does not split
    pub expected_cost: Option<f64>,
}

impl AttributeMetrics {
    /// Build metrics from the children the attribute splits a state into
    pub(crate) fn from_children(
        attribute: &str,
        children: &[CandidateSet],
        expected_cost: Option<f64>,
    ) -> Self {
        let sizes: Vec<usize> = children.iter().map(CandidateSet::len).collect();
        let total = sizes.iter().sum::<usize>() as f64;

        let expected_remaining = if total > 0.0 {
            sizes.iter().map(|&size| size as f64 * size as f64).sum::<f64>() / total
        } else {
            0.0
        };

        Self {
            attribute: attribute.to_string(),
            branches: sizes.len(),
            information_gain: branch_entropy(&sizes),
            expected_remaining,
            max_branch: sizes.iter().copied().max().unwrap_or(0),
            expected_cost,
        }
    }

    /// Whether asking this attribute narrows the state at all
    #[must_use]
    pub fn splits(&self) -> bool {
        self.branches > 1
    }
}
