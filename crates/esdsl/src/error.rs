//! Error types for query construction and serialization.
//!
//! There is one distinguished failure: an operator kind absent from the
//! operator table, raised the first time the serializer encounters it and
//! aborting the entire document (and any batch containing it). Lower-level
//! JSON encoding failures pass through unchanged.

use thiserror::Error;

use crate::operator::Operator;

/// The primary error type for query serialization.
#[derive(Error, Debug)]
pub enum QueryError {
    /// The operator kind is absent from the operator table.
    #[error("unsupported operator kind: {operator}")]
    UnsupportedOperator {
        /// The unresolved operator kind.
        operator: Operator,
    },

    /// The carried value does not have the shape the operator requires.
    #[error("operator '{operator}' requires a {expected} value")]
    InvalidValue {
        /// The operator whose value-shape contract was violated.
        operator: Operator,
        /// The shape the operator table expects.
        expected: &'static str,
    },

    /// Lower-level JSON encoding failure, passed through unchanged.
    #[error(transparent)]
    Serialization(#[from] serde_json::Error),
}

/// Result type alias for query serialization operations.
pub type QueryResult<T> = Result<T, QueryError>;
