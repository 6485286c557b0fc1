//! Phrase query - matches an exact sequence of terms
//!
//! # Example
//!
//! ```rust
//! use squidex_builder::query::nodes::PhraseQuery;
//! use squidex_builder::QueryNode;
//!
//! let query = PhraseQuery::new("content", "rust programming");
//! assert_eq!(query.query_type(), "match_phrase");
//! ```

use crate::query::ast::QueryNode;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

/// Query that matches an exact phrase of terms
///
/// The engine tokenizes the phrase with the field's analyzer; all terms
/// must appear next to each other, in order.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PhraseQuery {
    /// Field to search in
    pub field: String,
    /// The phrase to match
    pub phrase: Value,
}

impl PhraseQuery {
    pub fn new(field: impl Into<String>, phrase: impl Into<Value>) -> Self {
        Self {
            field: field.into(),
            phrase: phrase.into(),
        }
    }
}

impl QueryNode for PhraseQuery {
    fn to_json(&self) -> Value {
        json!({ "match_phrase": { self.field.as_str(): self.phrase } })
    }

    fn query_type(&self) -> &'static str {
        "match_phrase"
    }

    fn clone_box(&self) -> Box<dyn QueryNode> {
        Box::new(self.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_phrase_query_json() {
        let query = PhraseQuery::new("content", "rust programming");
        assert_eq!(
            query.to_json(),
            json!({ "match_phrase": { "content": "rust programming" } })
        );
        assert_eq!(query.query_type(), "match_phrase");
    }
}
