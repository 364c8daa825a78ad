//! The operator table.
//!
//! Maps each operator kind to the JSON key it emits and the value shape it
//! accepts. The table is process-wide immutable data, fixed at compile time;
//! looking up an unregistered kind fails with
//! [`QueryError::UnsupportedOperator`].

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{QueryError, QueryResult};

/// Operator kinds understood by the serializer.
///
/// Each registered kind maps to exactly one Elasticsearch query clause.
/// Numeric codes outside the registered set are carried as
/// [`Operator::Unregistered`] and rejected at serialization time, never
/// silently dropped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Operator {
    /// Analyzed full-text match (`match`).
    Match,
    /// Exact term match (`term`).
    Term,
    /// Membership in a set of terms (`terms`).
    Terms,
    /// Range comparison against a mapping of bounds (`range`).
    Range,
    /// Field-existence check (`exists`).
    Exists,
    /// Free-text search with reserved-character escaping (`query_string`).
    QueryString,
    /// Query scoped to a nested document path (`nested`).
    Nested,
    /// Boolean combinator wrapper (`bool`), produced by
    /// [`QueryItem::wrap`](crate::QueryItem::wrap).
    Bool,
    /// Wildcard pattern match (`wildcard`).
    Wildcard,
    /// Prefix match (`prefix`).
    Prefix,
    /// An operator code absent from the operator table.
    Unregistered(u32),
}

/// A single operator-table entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct OperatorSpec {
    /// The literal JSON key emitted for the clause object.
    pub key: &'static str,
    /// The value shape the operator accepts.
    pub shape: ValueShape,
}

/// Value shape expectations, one per operator family.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ValueShape {
    /// A single scalar value.
    Scalar,
    /// An ordered list of values.
    List,
    /// A key-value mapping, e.g. range bounds.
    Mapping,
    /// A free-text string, escaped before emission.
    Text,
    /// A nested boolean expression.
    Nested,
}

impl ValueShape {
    /// Human-readable shape name for error messages.
    pub fn expected(self) -> &'static str {
        match self {
            ValueShape::Scalar => "scalar",
            ValueShape::List => "list",
            ValueShape::Mapping => "mapping",
            ValueShape::Text => "string",
            ValueShape::Nested => "nested expression",
        }
    }
}

impl Operator {
    /// Maps a numeric wire code to its operator kind.
    ///
    /// Codes outside the registered table map to [`Operator::Unregistered`],
    /// which fails at serialization time rather than here; construction is
    /// infallible so query trees can be assembled before validation.
    pub fn from_code(code: u32) -> Self {
        match code {
            0 => Operator::Match,
            1 => Operator::Term,
            2 => Operator::Terms,
            3 => Operator::Range,
            4 => Operator::Exists,
            5 => Operator::QueryString,
            6 => Operator::Nested,
            7 => Operator::Bool,
            8 => Operator::Wildcard,
            9 => Operator::Prefix,
            other => Operator::Unregistered(other),
        }
    }

    /// The numeric wire code for this operator kind.
    pub fn code(self) -> u32 {
        match self {
            Operator::Match => 0,
            Operator::Term => 1,
            Operator::Terms => 2,
            Operator::Range => 3,
            Operator::Exists => 4,
            Operator::QueryString => 5,
            Operator::Nested => 6,
            Operator::Bool => 7,
            Operator::Wildcard => 8,
            Operator::Prefix => 9,
            Operator::Unregistered(code) => code,
        }
    }

    /// Looks up this operator's table entry.
    ///
    /// Fails with [`QueryError::UnsupportedOperator`] for
    /// [`Operator::Unregistered`] kinds.
    pub(crate) fn spec(self) -> QueryResult<OperatorSpec> {
        let spec = match self {
            Operator::Match => OperatorSpec {
                key: "match",
                shape: ValueShape::Scalar,
            },
            Operator::Term => OperatorSpec {
                key: "term",
                shape: ValueShape::Scalar,
            },
            Operator::Terms => OperatorSpec {
                key: "terms",
                shape: ValueShape::List,
            },
            Operator::Range => OperatorSpec {
                key: "range",
                shape: ValueShape::Mapping,
            },
            Operator::Exists => OperatorSpec {
                key: "exists",
                shape: ValueShape::Scalar,
            },
            Operator::QueryString => OperatorSpec {
                key: "query_string",
                shape: ValueShape::Text,
            },
            Operator::Nested => OperatorSpec {
                key: "nested",
                shape: ValueShape::Nested,
            },
            Operator::Bool => OperatorSpec {
                key: "bool",
                shape: ValueShape::Nested,
            },
            Operator::Wildcard => OperatorSpec {
                key: "wildcard",
                shape: ValueShape::Scalar,
            },
            Operator::Prefix => OperatorSpec {
                key: "prefix",
                shape: ValueShape::Scalar,
            },
            Operator::Unregistered(_) => {
                return Err(QueryError::UnsupportedOperator { operator: self });
            }
        };
        Ok(spec)
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Operator::Match => write!(f, "match"),
            Operator::Term => write!(f, "term"),
            Operator::Terms => write!(f, "terms"),
            Operator::Range => write!(f, "range"),
            Operator::Exists => write!(f, "exists"),
            Operator::QueryString => write!(f, "query_string"),
            Operator::Nested => write!(f, "nested"),
            Operator::Bool => write!(f, "bool"),
            Operator::Wildcard => write!(f, "wildcard"),
            Operator::Prefix => write!(f, "prefix"),
            Operator::Unregistered(code) => write!(f, "{code}"),
        }
    }
}
