//! Demo command
//!
//! Prints the optimal expected number of questions and one example
//! trajectory, the quickest way to check a dataset loads and solves.

use crate::core::OracleError;
use crate::oracle::{ExactQueryOracle, Trajectory};

/// Result of the demo run
pub struct DemoResult {
    pub items: usize,
    pub attributes: usize,
    pub root_cost: f64,
    pub cached_states: usize,
    /// Trajectory for the first object ID in sorted order
    pub example: Trajectory,
}

/// Solve the table and simulate its first object
///
/// # Errors
///
/// Never fails for a constructed oracle; the error type is shared with
/// `simulate_target`.
pub fn run_demo(oracle: &mut ExactQueryOracle) -> Result<DemoResult, OracleError> {
    let root_cost = oracle.optimal_root_cost();
    let first = oracle.items().id(0).to_string();
    let example = oracle.simulate_target(&first)?;

    Ok(DemoResult {
        items: oracle.items().len(),
        attributes: oracle.items().num_attributes(),
        root_cost,
        cached_states: oracle.cached_states(),
        example,
    })
}
