//! Exact k-ary question-asking oracle
//!
//! Dynamic programming over candidate sets: for every set of still-possible
//! objects, the minimum expected number of attribute questions and the
//! attribute to ask next.

mod entropy;
#[cfg(test)]
pub(crate) mod fixtures;
mod metrics;
pub mod partition;
mod policy;
mod solver;
mod trajectory;

pub use entropy::{branch_entropy, entropy_uniform};
pub use metrics::AttributeMetrics;
pub use policy::SolvedPolicy;
pub use solver::{ExactQueryOracle, Solution};
pub use trajectory::{Trajectory, TrajectoryStep};
