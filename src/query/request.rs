//! Search request assembly
//!
//! A `SearchRequest` is everything a transport needs besides the index: the
//! compiled query, sort, window and source projection. It renders to the
//! request body of a `_search` call:
//!
//! ```json
//! {
//!   "query": { "term": { "status": "active" } },
//!   "sort": [ { "created_at": "desc" } ],
//!   "from": 30,
//!   "size": 15,
//!   "_source": ["title", "created_at"]
//! }
//! ```

use crate::query::ast::QueryNode;
use crate::query::types::SortField;
use serde_json::{Map, Value};

/// Which stored fields the engine should return with each hit
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SourceFilter {
    /// Ids only; used when hits are hydrated from a record store
    Disabled,
    /// Listed fields (`*` for all)
    Fields(Vec<String>),
}

impl Default for SourceFilter {
    fn default() -> Self {
        SourceFilter::Fields(vec!["*".to_string()])
    }
}

impl SourceFilter {
    pub fn to_json(&self) -> Value {
        match self {
            SourceFilter::Disabled => Value::Bool(false),
            SourceFilter::Fields(fields) => {
                Value::Array(fields.iter().cloned().map(Value::String).collect())
            }
        }
    }
}

/// A fully assembled search request
#[derive(Clone, Debug, Default)]
pub struct SearchRequest {
    /// Compiled query; `None` matches everything
    pub query: Option<Box<dyn QueryNode>>,
    pub sort: Vec<SortField>,
    pub from: Option<u64>,
    pub size: Option<u64>,
    pub source: SourceFilter,
}

impl SearchRequest {
    /// Render the `_search` body
    ///
    /// `from` is left out when it is zero and `size` when no limit was set,
    /// leaving the engine defaults in effect.
    pub fn to_json(&self) -> Value {
        let mut body = Map::new();
        if let Some(query) = &self.query {
            body.insert("query".to_string(), query.to_json());
        }
        if !self.sort.is_empty() {
            body.insert(
                "sort".to_string(),
                Value::Array(self.sort.iter().map(SortField::to_json).collect()),
            );
        }
        if let Some(from) = self.from.filter(|&from| from > 0) {
            body.insert("from".to_string(), Value::from(from));
        }
        if let Some(size) = self.size {
            body.insert("size".to_string(), Value::from(size));
        }
        body.insert("_source".to_string(), self.source.to_json());
        Value::Object(body)
    }

    /// Render the `_count` body: the query section only
    pub fn count_json(&self) -> Value {
        let mut body = Map::new();
        if let Some(query) = &self.query {
            body.insert("query".to_string(), query.to_json());
        }
        Value::Object(body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::query::nodes::TermQuery;
    use crate::query::types::SortDirection;
    use serde_json::json;

    #[test]
    fn test_empty_request_matches_all() {
        let request = SearchRequest::default();
        assert_eq!(request.to_json(), json!({ "_source": ["*"] }));
        assert_eq!(request.count_json(), json!({}));
    }

    #[test]
    fn test_full_request_body() {
        let request = SearchRequest {
            query: Some(Box::new(TermQuery::new("status", "active"))),
            sort: vec![SortField::new("created_at", SortDirection::Desc)],
            from: Some(30),
            size: Some(15),
            source: SourceFilter::Disabled,
        };

        assert_eq!(
            request.to_json(),
            json!({
                "query": { "term": { "status": "active" } },
                "sort": [ { "created_at": "desc" } ],
                "from": 30,
                "size": 15,
                "_source": false
            })
        );
        assert_eq!(
            request.count_json(),
            json!({ "query": { "term": { "status": "active" } } })
        );
    }

    #[test]
    fn test_zero_offset_is_omitted() {
        let request = SearchRequest {
            from: Some(0),
            size: Some(15),
            ..Default::default()
        };
        let body = request.to_json();
        assert!(body.get("from").is_none());
        assert_eq!(body["size"], 15);
    }
}
