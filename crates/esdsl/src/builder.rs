//! Query DSL clause builders.
//!
//! The single-pass recursive walk that translates query trees into the JSON
//! bodies of the Elasticsearch query DSL. Output object key order is
//! insertion order (and therefore deterministic across runs), which is part
//! of the wire contract.

use serde_json::{Map, Value, json};

use crate::error::{QueryError, QueryResult};
use crate::escape::escape_query_string;
use crate::operator::{Operator, ValueShape};
use crate::types::{NestedQueryItem, QueryDoc, QueryItem, QueryValue, SortDirective};

/// Builds a single-key object, for clause and field keys that are not
/// literals.
fn singleton(key: &str, value: Value) -> Value {
    let mut object = Map::new();
    object.insert(key.to_string(), value);
    Value::Object(object)
}

/// Builds the clause object for a single query item.
///
/// The emitted shape is determined by the operator table entry; the carried
/// value must match the entry's shape expectation. Combinator items (the
/// `bool` operator) emit their nested expression directly and never emit
/// their synthetic field.
pub fn build_item_clause(item: &QueryItem) -> QueryResult<Value> {
    let spec = item.operator.spec()?;

    let clause = match (spec.shape, &item.value) {
        (ValueShape::Scalar, QueryValue::Scalar(value)) => {
            singleton(spec.key, singleton(&item.field, value.clone()))
        }
        (ValueShape::List, QueryValue::List(values)) => singleton(
            spec.key,
            singleton(&item.field, Value::Array(values.clone())),
        ),
        (ValueShape::Mapping, QueryValue::Mapping(bounds)) => singleton(
            spec.key,
            singleton(&item.field, Value::Object(bounds.clone())),
        ),
        (ValueShape::Text, QueryValue::Scalar(value)) => {
            let raw = value.as_str().ok_or(QueryError::InvalidValue {
                operator: item.operator,
                expected: "string",
            })?;
            singleton(
                spec.key,
                json!({
                    "analyze_wildcard": true,
                    "fields": [&item.field],
                    "query": escape_query_string(raw),
                }),
            )
        }
        (ValueShape::Nested, QueryValue::Nested(inner)) => {
            let query = build_bool_clause(inner)?;
            match item.operator {
                Operator::Bool => query,
                _ => singleton(
                    spec.key,
                    json!({
                        "path": [&item.field],
                        "query": query,
                    }),
                ),
            }
        }
        (shape, _) => {
            return Err(QueryError::InvalidValue {
                operator: item.operator,
                expected: shape.expected(),
            });
        }
    };

    Ok(clause)
}

/// Serializes each item in `items` into a clause array.
fn build_clause_array(items: &[QueryItem]) -> QueryResult<Value> {
    let clauses = items
        .iter()
        .map(build_item_clause)
        .collect::<QueryResult<Vec<_>>>()?;
    Ok(Value::Array(clauses))
}

/// Builds the inner bool object, inserting only non-empty slots in the fixed
/// order `must`, `must_not`, `filter`.
fn build_bool_body(
    must: &[QueryItem],
    must_not: &[QueryItem],
    filter: &[QueryItem],
) -> QueryResult<Value> {
    let mut body = Map::new();
    if !must.is_empty() {
        body.insert("must".to_string(), build_clause_array(must)?);
    }
    if !must_not.is_empty() {
        body.insert("must_not".to_string(), build_clause_array(must_not)?);
    }
    if !filter.is_empty() {
        body.insert("filter".to_string(), build_clause_array(filter)?);
    }
    Ok(Value::Object(body))
}

/// Builds the `{"bool": {...}}` clause for a combinator node.
///
/// Slots whose sequence is empty are omitted entirely rather than emitted as
/// empty lists; an all-empty node yields `{"bool":{}}`.
pub(crate) fn build_bool_clause(item: &NestedQueryItem) -> QueryResult<Value> {
    Ok(singleton(
        "bool",
        build_bool_body(&item.must, &item.must_not, &item.filter)?,
    ))
}

/// Builds the standalone `{"bool": {...}}` object for a combinator node not
/// attached to a query document.
pub fn build_wrapped_query(item: &NestedQueryItem) -> QueryResult<Value> {
    build_bool_clause(item)
}

/// Builds the sort clause array: one `{"<field>": "<asc|desc>"}` object per
/// directive, in order.
fn build_sort(directives: &[SortDirective]) -> Value {
    let clauses = directives
        .iter()
        .map(|directive| {
            singleton(
                &directive.field,
                Value::from(directive.direction.as_str()),
            )
        })
        .collect();
    Value::Array(clauses)
}

/// Builds the query body for a document.
///
/// Emits `{"query": {"bool": {...}}}` plus a `"sort"` key when directives
/// are present, with `query` preceding `sort`. Empty clause slots are
/// omitted from the inner bool object; a document with no clauses at all
/// still yields a valid `{"query":{"bool":{}}}`. The target index is not
/// part of the body; the multi-search assembler consumes it.
pub fn build_query_body(doc: &QueryDoc) -> QueryResult<Value> {
    tracing::trace!("building query body for index '{}'", doc.index);

    let bool_query = singleton(
        "bool",
        build_bool_body(&doc.must, &doc.must_not, &doc.filter)?,
    );

    let mut body = Map::new();
    body.insert("query".to_string(), bool_query);
    if !doc.sort.is_empty() {
        body.insert("sort".to_string(), build_sort(&doc.sort));
    }
    Ok(Value::Object(body))
}

/// Serializes a document's query body to its compact single-line wire form.
pub fn build_query_body_string(doc: &QueryDoc) -> QueryResult<String> {
    let body = build_query_body(doc)?;
    Ok(serde_json::to_string(&body)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Combinator, SortDirection};

    fn term(field: &str, value: &str) -> QueryItem {
        QueryItem::new(field, value, Operator::Term)
    }

    #[test]
    fn test_scalar_clause() {
        let clause = build_item_clause(&term("status", "published")).unwrap();
        let s = serde_json::to_string(&clause).unwrap();
        assert_eq!(s, r#"{"term":{"status":"published"}}"#);
    }

    #[test]
    fn test_terms_clause() {
        let item = QueryItem::new("id", vec!["a", "b"], Operator::Terms);
        let clause = build_item_clause(&item).unwrap();
        let s = serde_json::to_string(&clause).unwrap();
        assert_eq!(s, r#"{"terms":{"id":["a","b"]}}"#);
    }

    #[test]
    fn test_range_clause() {
        let item = QueryItem::new(
            "publish_date",
            json!({"gte": "2015-01-01"}),
            Operator::Range,
        );
        let clause = build_item_clause(&item).unwrap();
        let s = serde_json::to_string(&clause).unwrap();
        assert_eq!(s, r#"{"range":{"publish_date":{"gte":"2015-01-01"}}}"#);
    }

    #[test]
    fn test_query_string_clause_escapes_and_orders_keys() {
        let item = QueryItem::new("user.id", "kimchy!", Operator::QueryString);
        let clause = build_item_clause(&item).unwrap();
        let s = serde_json::to_string(&clause).unwrap();
        assert_eq!(
            s,
            r#"{"query_string":{"analyze_wildcard":true,"fields":["user.id"],"query":"kimchy\\!"}}"#
        );
    }

    #[test]
    fn test_query_string_requires_string_value() {
        let item = QueryItem::new("user.id", 42i64, Operator::QueryString);
        let err = build_item_clause(&item).unwrap_err();
        assert!(matches!(err, QueryError::InvalidValue { expected: "string", .. }));
    }

    #[test]
    fn test_shape_mismatch() {
        let item = QueryItem::new("id", "not-a-list", Operator::Terms);
        let err = build_item_clause(&item).unwrap_err();
        match err {
            QueryError::InvalidValue { operator, expected } => {
                assert_eq!(operator, Operator::Terms);
                assert_eq!(expected, "list");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_unregistered_operator() {
        let item = QueryItem::new("f", "v", Operator::Unregistered(100001));
        let err = build_item_clause(&item).unwrap_err();
        assert!(matches!(
            err,
            QueryError::UnsupportedOperator {
                operator: Operator::Unregistered(100001)
            }
        ));
    }

    #[test]
    fn test_nested_clause() {
        let inner = NestedQueryItem::new().with_must(term("comments.author", "kimchy"));
        let item = QueryItem::new("comments", inner, Operator::Nested);
        let clause = build_item_clause(&item).unwrap();
        let s = serde_json::to_string(&clause).unwrap();
        assert_eq!(
            s,
            r#"{"nested":{"path":["comments"],"query":{"bool":{"must":[{"term":{"comments.author":"kimchy"}}]}}}}"#
        );
    }

    #[test]
    fn test_wrapped_item_emits_bool_directly() {
        let wrapped = QueryItem::wrap(Combinator::Filter, vec![term("status", "published")]);
        let clause = build_item_clause(&wrapped).unwrap();
        let s = serde_json::to_string(&clause).unwrap();
        assert_eq!(s, r#"{"bool":{"filter":[{"term":{"status":"published"}}]}}"#);
    }

    #[test]
    fn test_bool_clause_omits_empty_slots() {
        let nested = NestedQueryItem::new().with_filter(term("status", "published"));
        let clause = build_bool_clause(&nested).unwrap();
        let s = serde_json::to_string(&clause).unwrap();
        assert!(s.contains("filter"));
        assert!(!s.contains("must"));
    }

    #[test]
    fn test_empty_bool_clause() {
        let clause = build_bool_clause(&NestedQueryItem::new()).unwrap();
        assert_eq!(serde_json::to_string(&clause).unwrap(), r#"{"bool":{}}"#);
    }

    #[test]
    fn test_query_body_key_order() {
        let doc = QueryDoc::new("articles")
            .with_must(term("title", "rust"))
            .with_sort(SortDirective::new("id", SortDirection::Ascending));
        let s = build_query_body_string(&doc).unwrap();
        assert_eq!(
            s,
            r#"{"query":{"bool":{"must":[{"term":{"title":"rust"}}]}},"sort":[{"id":"asc"}]}"#
        );
    }

    #[test]
    fn test_empty_query_body() {
        let s = build_query_body_string(&QueryDoc::new("articles")).unwrap();
        assert_eq!(s, r#"{"query":{"bool":{}}}"#);
    }
}
