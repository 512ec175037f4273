//! State analysis command
//!
//! Restricts the table by known `attribute=value` answers and reports the
//! optimal next question together with diagnostics for every attribute.

use crate::core::{CandidateSet, OracleError};
use crate::oracle::partition::restrict;
use crate::oracle::{AttributeMetrics, ExactQueryOracle, entropy_uniform};
use std::cmp::Ordering;
use thiserror::Error;

/// Errors raised while analyzing a state
#[derive(Error, Debug, PartialEq, Eq)]
pub enum AnalyzeError {
    #[error("expected ATTRIBUTE=VALUE, got {0:?}")]
    InvalidConstraint(String),
    #[error("attribute {attribute:?} has no value {value:?}")]
    UnknownValue { attribute: String, value: String },
    #[error("no item matches the given answers")]
    NoMatches,
    #[error(transparent)]
    Oracle(#[from] OracleError),
}

/// Split `attr=value` into its two halves
///
/// # Errors
///
/// Returns `AnalyzeError::InvalidConstraint` if there is no `=` or either
/// side is empty.
pub fn parse_constraint(text: &str) -> Result<(String, String), AnalyzeError> {
    match text.split_once('=') {
        Some((attribute, value)) if !attribute.trim().is_empty() && !value.trim().is_empty() => {
            Ok((attribute.trim().to_string(), value.trim().to_string()))
        }
        _ => Err(AnalyzeError::InvalidConstraint(text.to_string())),
    }
}

/// Result of analyzing a candidate state
pub struct AnalysisResult {
    pub constraints: Vec<(String, String)>,
    /// IDs consistent with every constraint
    pub candidates: Vec<String>,
    pub entropy: f64,
    /// Optimal expected number of further questions
    pub expected_cost: f64,
    pub best_attribute: Option<String>,
    /// Cheapest first; attributes that do not split come last
    pub metrics: Vec<AttributeMetrics>,
    pub cached_states: usize,
}

/// Analyze the state left after the given answers
///
/// # Errors
///
/// Returns an error for unknown attributes or values, and
/// `AnalyzeError::NoMatches` when the answers contradict each other.
pub fn analyze_state(
    oracle: &mut ExactQueryOracle,
    constraints: &[(String, String)],
) -> Result<AnalysisResult, AnalyzeError> {
    let state = constrained_state(oracle, constraints)?;
    if state.is_empty() {
        return Err(AnalyzeError::NoMatches);
    }

    let solution = oracle.solve(&state);
    let mut metrics = oracle.attribute_metrics(&state);
    metrics.sort_by(|a, b| match (a.expected_cost, b.expected_cost) {
        (Some(x), Some(y)) => x.partial_cmp(&y).unwrap_or(Ordering::Equal),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    });

    let items = oracle.items();
    Ok(AnalysisResult {
        constraints: constraints.to_vec(),
        candidates: state.iter().map(|i| items.id(i).to_string()).collect(),
        entropy: entropy_uniform(state.len()),
        expected_cost: solution.cost,
        best_attribute: solution
            .attribute
            .map(|a| items.attribute_name(a).to_string()),
        metrics,
        cached_states: oracle.cached_states(),
    })
}

fn constrained_state(
    oracle: &ExactQueryOracle,
    constraints: &[(String, String)],
) -> Result<CandidateSet, AnalyzeError> {
    let items = oracle.items();
    let mut state = oracle.root().clone();

    for (attribute, value) in constraints {
        let index = items.attribute_index(attribute)?;
        let code = items
            .value_code_of(index, value)
            .ok_or_else(|| AnalyzeError::UnknownValue {
                attribute: attribute.clone(),
                value: value.clone(),
            })?;
        state = restrict(items, &state, index, code);
    }

    Ok(state)
}
