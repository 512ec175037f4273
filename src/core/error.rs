//! Error type shared by the item table and the oracle

use thiserror::Error;

/// Errors raised while building an item table or querying the oracle
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum OracleError {
    /// The object table has no entries, so no attribute schema can be derived
    #[error("item table is empty")]
    EmptyTable,

    /// The same object ID appeared more than once
    #[error("duplicate item ID: {0:?}")]
    DuplicateItem(String),

    /// A record's attribute names differ from the reference schema
    #[error("item {id:?} has attributes {found:?}, expected {expected:?}")]
    SchemaMismatch {
        id: String,
        expected: Vec<String>,
        found: Vec<String>,
    },

    /// An object ID that is not a key of the item table
    #[error("unknown item ID: {0:?}")]
    UnknownItem(String),

    /// An attribute name outside the table's schema
    #[error("unknown attribute: {0:?}")]
    UnknownAttribute(String),

    /// A read-only policy lookup reached a state the solver never visited
    #[error("candidate state of size {0} has not been solved")]
    UnsolvedState(usize),
}
