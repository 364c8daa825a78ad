//! Multi-search batch assembly.
//!
//! Produces the newline-delimited body of the `_msearch` API: one
//! `{"index":"..."}` header line and one query body line per document, in
//! input order, with a mandatory trailing newline.

use serde_json::json;

use crate::builder::build_query_body_string;
use crate::error::QueryResult;
use crate::types::QueryDoc;

/// Assembles the multi-search body for `docs`.
///
/// Each document contributes a header line naming its index followed by its
/// compact query body line, byte-identical to the document's standalone
/// serialization. The first document that fails to serialize fails the whole
/// batch with that document's error; no partial output is returned.
pub fn build_multi_search_body(docs: &[QueryDoc]) -> QueryResult<String> {
    let mut body = String::new();
    for doc in docs {
        let query = build_query_body_string(doc)?;
        let header = serde_json::to_string(&json!({ "index": doc.index }))?;
        body.push_str(&header);
        body.push('\n');
        body.push_str(&query);
        body.push('\n');
    }
    tracing::debug!("assembled multi-search body for {} queries", docs.len());
    Ok(body)
}
