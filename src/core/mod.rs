//! Core domain types for the oracle
//!
//! Candidate sets, the validated item table and the shared error type.
//! Everything here is pure data with no I/O.

mod candidate_set;
mod error;
mod item_table;

pub use candidate_set::{CandidateSet, ItemIndex};
pub use error::OracleError;
pub use item_table::{AttributeIndex, ItemTable, ValueCode};
