//! Elasticsearch Query DSL construction and serialization.
//!
//! This crate converts structured query trees (field/operator/value triples
//! combined with boolean combinators and nested sub-queries) into the exact
//! JSON bodies of the Elasticsearch query DSL, plus the newline-delimited
//! multi-search batch format.
//!
//! It is a pure serialization layer: no transport, no response parsing, no
//! index management. An external HTTP client transmits the produced bytes
//! and interprets the engine's response. Serialization is stateless and
//! synchronous; trees are immutable, so concurrent serialization from
//! multiple threads needs no locking.
//!
//! Output bytes are deterministic: emitted object key order is part of the
//! wire contract (`query` before `sort`, `must` before `must_not` before
//! `filter`), and serializing the same tree twice yields identical bytes.
//!
//! # Quick Start
//!
//! ```
//! use esdsl::{Operator, QueryDoc, QueryItem, SortDirective, build_query_body_string};
//!
//! let doc = QueryDoc::new("articles")
//!     .with_must(QueryItem::new("title", "Search", Operator::Match))
//!     .with_filter(QueryItem::new("status", "published", Operator::Term))
//!     .with_sort(SortDirective::parse("-published_at"));
//!
//! let body = build_query_body_string(&doc).unwrap();
//! assert_eq!(
//!     body,
//!     r#"{"query":{"bool":{"must":[{"match":{"title":"Search"}}],"filter":[{"term":{"status":"published"}}]}},"sort":[{"published_at":"desc"}]}"#
//! );
//! ```
//!
//! # Free-text queries
//!
//! Values for the `query_string` operator are escaped per the engine's
//! reserved-character syntax before emission:
//!
//! ```
//! use esdsl::{Operator, QueryItem, build_item_clause};
//!
//! let item = QueryItem::new("user.id", "kimchy!", Operator::QueryString);
//! let clause = build_item_clause(&item).unwrap();
//! assert_eq!(
//!     serde_json::to_string(&clause).unwrap(),
//!     r#"{"query_string":{"analyze_wildcard":true,"fields":["user.id"],"query":"kimchy\\!"}}"#
//! );
//! ```
//!
//! # Multi-search batches
//!
//! ```
//! use esdsl::{Operator, QueryDoc, QueryItem, build_multi_search_body};
//!
//! let batch = build_multi_search_body(&[
//!     QueryDoc::new("index1")
//!         .with_must(QueryItem::new("user.id", "kimchy!", Operator::QueryString)),
//!     QueryDoc::new("index2")
//!         .with_must(QueryItem::new("some_index_id", "some-long-key-id-value", Operator::Match)),
//! ])
//! .unwrap();
//!
//! // One header line and one body line per document, plus a trailing newline.
//! assert_eq!(batch.lines().count(), 4);
//! assert!(batch.starts_with(r#"{"index":"index1"}"#));
//! assert!(batch.ends_with('\n'));
//! ```
//!
//! # Errors
//!
//! An operator kind absent from the operator table fails serialization of
//! the entire document with [`QueryError::UnsupportedOperator`], carrying
//! the offending kind, distinguishable by variant match, never by message
//! inspection:
//!
//! ```
//! use esdsl::{Operator, QueryDoc, QueryError, QueryItem, build_query_body};
//!
//! let doc = QueryDoc::new("some_index")
//!     .with_must(QueryItem::new("f", "v", Operator::from_code(100001)));
//!
//! match build_query_body(&doc) {
//!     Err(QueryError::UnsupportedOperator { operator }) => {
//!         assert_eq!(operator.code(), 100001);
//!     }
//!     other => panic!("unexpected result: {other:?}"),
//! }
//! ```

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

pub mod builder;
pub mod error;
pub mod escape;
pub mod msearch;
pub mod operator;
pub mod types;

// Re-export the public surface at the crate root
pub use builder::{build_item_clause, build_query_body, build_query_body_string, build_wrapped_query};
pub use error::{QueryError, QueryResult};
pub use escape::escape_query_string;
pub use msearch::build_multi_search_body;
pub use operator::Operator;
pub use types::{
    Combinator, NestedQueryItem, QueryDoc, QueryItem, QueryValue, SortDirection, SortDirective,
};

/// Crate version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Crate name.
pub const NAME: &str = env!("CARGO_PKG_NAME");
