//! Query entity types.
//!
//! The immutable value trees the serializer walks: leaf query items, boolean
//! combinator nodes, document-level query descriptors, and sort directives.
//! Trees are fully constructed by the caller before serialization; nothing
//! mutates during a serialization call.

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::operator::Operator;

/// Synthetic field key carried by combinator items built with
/// [`QueryItem::wrap`]. Never emitted.
pub(crate) const WRAPPED_FIELD: &str = "_wrapped";

/// The value carried by a [`QueryItem`].
///
/// The operator kind determines which shape is accepted at serialization
/// time: `terms` requires a list, `range` a mapping, `nested` and `bool` a
/// nested expression, everything else a scalar.
#[derive(Debug, Clone, PartialEq)]
pub enum QueryValue {
    /// A single scalar value (string, number, or boolean).
    Scalar(Value),
    /// An ordered list of values.
    List(Vec<Value>),
    /// A key-value mapping, e.g. range bounds.
    Mapping(Map<String, Value>),
    /// A nested boolean expression.
    Nested(NestedQueryItem),
}

impl From<Value> for QueryValue {
    /// Classifies a raw JSON value: arrays become lists, objects become
    /// mappings, everything else is a scalar.
    fn from(value: Value) -> Self {
        match value {
            Value::Array(values) => QueryValue::List(values),
            Value::Object(mapping) => QueryValue::Mapping(mapping),
            scalar => QueryValue::Scalar(scalar),
        }
    }
}

impl From<&str> for QueryValue {
    fn from(value: &str) -> Self {
        QueryValue::Scalar(Value::from(value))
    }
}

impl From<String> for QueryValue {
    fn from(value: String) -> Self {
        QueryValue::Scalar(Value::from(value))
    }
}

impl From<i32> for QueryValue {
    fn from(value: i32) -> Self {
        QueryValue::Scalar(Value::from(value))
    }
}

impl From<i64> for QueryValue {
    fn from(value: i64) -> Self {
        QueryValue::Scalar(Value::from(value))
    }
}

impl From<u64> for QueryValue {
    fn from(value: u64) -> Self {
        QueryValue::Scalar(Value::from(value))
    }
}

impl From<f64> for QueryValue {
    fn from(value: f64) -> Self {
        QueryValue::Scalar(Value::from(value))
    }
}

impl From<bool> for QueryValue {
    fn from(value: bool) -> Self {
        QueryValue::Scalar(Value::from(value))
    }
}

impl<T: Into<Value>> From<Vec<T>> for QueryValue {
    fn from(values: Vec<T>) -> Self {
        QueryValue::List(values.into_iter().map(Into::into).collect())
    }
}

impl From<Map<String, Value>> for QueryValue {
    fn from(mapping: Map<String, Value>) -> Self {
        QueryValue::Mapping(mapping)
    }
}

impl From<NestedQueryItem> for QueryValue {
    fn from(item: NestedQueryItem) -> Self {
        QueryValue::Nested(item)
    }
}

/// Names a boolean combinator slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Combinator {
    /// All clauses must match (AND).
    Must,
    /// No clause may match (NOT).
    MustNot,
    /// All clauses must match without scoring (AND, non-scoring).
    Filter,
}

impl fmt::Display for Combinator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Combinator::Must => write!(f, "must"),
            Combinator::MustNot => write!(f, "must_not"),
            Combinator::Filter => write!(f, "filter"),
        }
    }
}

/// A leaf query expression: field, operator kind, and value.
#[derive(Debug, Clone, PartialEq)]
pub struct QueryItem {
    /// The document field the clause applies to. For `nested` items this is
    /// the nesting path.
    pub field: String,
    /// The value to match.
    pub value: QueryValue,
    /// The operator kind.
    pub operator: Operator,
}

impl QueryItem {
    /// Creates a new query item.
    pub fn new(
        field: impl Into<String>,
        value: impl Into<QueryValue>,
        operator: Operator,
    ) -> Self {
        Self {
            field: field.into(),
            value: value.into(),
            operator,
        }
    }

    /// Wraps `items` in a single boolean combinator item.
    ///
    /// The returned item serializes to a standalone `{"bool": {...}}` object
    /// holding `items` under the named combinator slot, for embedding one
    /// bool block inside an outer clause array. The item's field is a fixed
    /// synthetic key and is never emitted.
    pub fn wrap(combinator: Combinator, items: Vec<QueryItem>) -> Self {
        let nested = match combinator {
            Combinator::Must => NestedQueryItem {
                must: items,
                ..NestedQueryItem::default()
            },
            Combinator::MustNot => NestedQueryItem {
                must_not: items,
                ..NestedQueryItem::default()
            },
            Combinator::Filter => NestedQueryItem {
                filter: items,
                ..NestedQueryItem::default()
            },
        };
        Self {
            field: WRAPPED_FIELD.to_string(),
            value: QueryValue::Nested(nested),
            operator: Operator::Bool,
        }
    }
}

/// A boolean combinator node holding ordered clause sequences.
///
/// Serializes to `{"bool": {...}}` with only the non-empty slots present.
/// When carried as a [`QueryItem`]'s value under the `nested` operator, the
/// owning item's field is the nesting path.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct NestedQueryItem {
    /// Clauses that must match (AND).
    pub must: Vec<QueryItem>,
    /// Clauses that must not match (NOT).
    pub must_not: Vec<QueryItem>,
    /// Clauses that must match without scoring (AND, non-scoring).
    pub filter: Vec<QueryItem>,
}

impl NestedQueryItem {
    /// Creates an empty combinator node.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a clause to the `must` slot.
    pub fn with_must(mut self, item: QueryItem) -> Self {
        self.must.push(item);
        self
    }

    /// Adds a clause to the `must_not` slot.
    pub fn with_must_not(mut self, item: QueryItem) -> Self {
        self.must_not.push(item);
        self
    }

    /// Adds a clause to the `filter` slot.
    pub fn with_filter(mut self, item: QueryItem) -> Self {
        self.filter.push(item);
        self
    }

    /// Returns true when every slot is empty.
    pub fn is_empty(&self) -> bool {
        self.must.is_empty() && self.must_not.is_empty() && self.filter.is_empty()
    }
}

/// Sort order for a sort directive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    /// Ascending order.
    #[default]
    Ascending,
    /// Descending order.
    Descending,
}

impl SortDirection {
    /// The wire token for this direction.
    pub fn as_str(self) -> &'static str {
        match self {
            SortDirection::Ascending => "asc",
            SortDirection::Descending => "desc",
        }
    }
}

/// A sort directive.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortDirective {
    /// The field to sort by.
    pub field: String,
    /// The sort direction.
    pub direction: SortDirection,
}

impl SortDirective {
    /// Creates a sort directive.
    pub fn new(field: impl Into<String>, direction: SortDirection) -> Self {
        Self {
            field: field.into(),
            direction,
        }
    }

    /// Parses a sort value (e.g. `-date` for descending).
    pub fn parse(s: &str) -> Self {
        if let Some(stripped) = s.strip_prefix('-') {
            Self {
                field: stripped.to_string(),
                direction: SortDirection::Descending,
            }
        } else {
            Self {
                field: s.to_string(),
                direction: SortDirection::Ascending,
            }
        }
    }
}

/// A document-level query descriptor.
///
/// The index identifier is consumed only by the multi-search assembler; the
/// serialized body never contains it.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct QueryDoc {
    /// The target index.
    pub index: String,
    /// Sort directives, in order.
    pub sort: Vec<SortDirective>,
    /// Top-level clauses that must match.
    pub must: Vec<QueryItem>,
    /// Top-level clauses that must not match.
    pub must_not: Vec<QueryItem>,
    /// Top-level non-scoring clauses.
    pub filter: Vec<QueryItem>,
}

impl QueryDoc {
    /// Creates an empty query against `index`.
    pub fn new(index: impl Into<String>) -> Self {
        Self {
            index: index.into(),
            ..Self::default()
        }
    }

    /// Adds a clause to the top-level `must` slot.
    pub fn with_must(mut self, item: QueryItem) -> Self {
        self.must.push(item);
        self
    }

    /// Adds a clause to the top-level `must_not` slot.
    pub fn with_must_not(mut self, item: QueryItem) -> Self {
        self.must_not.push(item);
        self
    }

    /// Adds a clause to the top-level `filter` slot.
    pub fn with_filter(mut self, item: QueryItem) -> Self {
        self.filter.push(item);
        self
    }

    /// Adds a sort directive.
    pub fn with_sort(mut self, sort: SortDirective) -> Self {
        self.sort.push(sort);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_query_value_classification() {
        assert!(matches!(
            QueryValue::from(json!("text")),
            QueryValue::Scalar(_)
        ));
        assert!(matches!(QueryValue::from(json!([1, 2])), QueryValue::List(_)));
        assert!(matches!(
            QueryValue::from(json!({"gte": 1})),
            QueryValue::Mapping(_)
        ));
    }

    #[test]
    fn test_query_value_from_primitives() {
        assert_eq!(QueryValue::from("a"), QueryValue::Scalar(json!("a")));
        assert_eq!(QueryValue::from(7i64), QueryValue::Scalar(json!(7)));
        assert_eq!(QueryValue::from(true), QueryValue::Scalar(json!(true)));
        assert_eq!(
            QueryValue::from(vec!["a", "b"]),
            QueryValue::List(vec![json!("a"), json!("b")])
        );
    }

    #[test]
    fn test_wrap_places_items_in_named_slot() {
        let item = QueryItem::new("status", "published", Operator::Term);
        let wrapped = QueryItem::wrap(Combinator::Filter, vec![item.clone()]);

        assert_eq!(wrapped.operator, Operator::Bool);
        match &wrapped.value {
            QueryValue::Nested(nested) => {
                assert_eq!(nested.filter, vec![item]);
                assert!(nested.must.is_empty());
                assert!(nested.must_not.is_empty());
            }
            other => panic!("unexpected value: {other:?}"),
        }
    }

    #[test]
    fn test_nested_item_builders() {
        let nested = NestedQueryItem::new()
            .with_must(QueryItem::new("a", 1i64, Operator::Term))
            .with_must_not(QueryItem::new("b", 2i64, Operator::Term))
            .with_filter(QueryItem::new("c", 3i64, Operator::Term));

        assert_eq!(nested.must.len(), 1);
        assert_eq!(nested.must_not.len(), 1);
        assert_eq!(nested.filter.len(), 1);
        assert!(!nested.is_empty());
        assert!(NestedQueryItem::new().is_empty());
    }

    #[test]
    fn test_sort_directive_parse() {
        let asc = SortDirective::parse("id");
        assert_eq!(asc.field, "id");
        assert_eq!(asc.direction, SortDirection::Ascending);

        let desc = SortDirective::parse("-published_at");
        assert_eq!(desc.field, "published_at");
        assert_eq!(desc.direction, SortDirection::Descending);
    }

    #[test]
    fn test_combinator_display() {
        assert_eq!(Combinator::Must.to_string(), "must");
        assert_eq!(Combinator::MustNot.to_string(), "must_not");
        assert_eq!(Combinator::Filter.to_string(), "filter");
    }

    #[test]
    fn test_query_doc_builders() {
        let doc = QueryDoc::new("articles")
            .with_must(QueryItem::new("title", "rust", Operator::Match))
            .with_filter(QueryItem::new("status", "published", Operator::Term))
            .with_sort(SortDirective::parse("-id"));

        assert_eq!(doc.index, "articles");
        assert_eq!(doc.must.len(), 1);
        assert_eq!(doc.filter.len(), 1);
        assert_eq!(doc.sort.len(), 1);
        assert!(doc.must_not.is_empty());
    }
}
