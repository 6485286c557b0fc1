//! Term query - exact match on a field

use crate::query::ast::QueryNode;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

/// Query that matches documents containing an exact value in a field
///
/// The value is sent to the engine as-is, so numbers, booleans and
/// strings keep their JSON type.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TermQuery {
    /// Field to search in
    pub field: String,
    /// Exact value to match
    pub value: Value,
}

impl TermQuery {
    /// Create a new term query
    pub fn new(field: impl Into<String>, value: impl Into<Value>) -> Self {
        Self {
            field: field.into(),
            value: value.into(),
        }
    }
}

impl QueryNode for TermQuery {
    fn to_json(&self) -> Value {
        json!({ "term": { self.field.as_str(): self.value } })
    }

    fn query_type(&self) -> &'static str {
        "term"
    }

    fn clone_box(&self) -> Box<dyn QueryNode> {
        Box::new(self.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_term_query_creation() {
        let query = TermQuery::new("title", "rust");
        assert_eq!(query.field, "title");
        assert_eq!(query.value, json!("rust"));
    }

    #[test]
    fn test_term_query_keeps_value_type() {
        assert_eq!(
            TermQuery::new("age", 18).to_json(),
            json!({ "term": { "age": 18 } })
        );
        assert_eq!(
            TermQuery::new("published", true).to_json(),
            json!({ "term": { "published": true } })
        );
    }

    #[test]
    fn test_term_query_type() {
        let query = TermQuery::new("title", "rust");
        assert_eq!(query.query_type(), "term");
    }
}
