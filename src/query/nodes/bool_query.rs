//! Boolean query - combines multiple clauses with AND, OR, NOT semantics

use crate::query::ast::QueryNode;
use crate::query::types::Connector;
use serde_json::{Map, Value};

/// Boolean query combining multiple clauses
///
/// The boolean query supports three types of clauses:
/// - `must`: All clauses must match (AND).
/// - `should`: At least one clause should match (OR).
/// - `must_not`: No clause must match (NOT).
///
/// Empty buckets are left out of the rendered DSL.
///
/// # Example
///
/// ```json
/// {
///   "bool": {
///     "must": [
///       { "match_phrase": { "content": "rust programming" } }
///     ],
///     "should": [
///       { "term": { "tags": "tutorial" } }
///     ],
///     "must_not": [
///       { "term": { "status": "draft" } }
///     ]
///   }
/// }
/// ```
#[derive(Clone, Debug, Default)]
pub struct BoolQuery {
    /// Clauses that must match (AND)
    pub must: Vec<Box<dyn QueryNode>>,
    /// Clauses where at least one should match (OR)
    pub should: Vec<Box<dyn QueryNode>>,
    /// Clauses that must not match (NOT)
    pub must_not: Vec<Box<dyn QueryNode>>,
}

impl BoolQuery {
    /// Create a new empty boolean query
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a must clause
    pub fn must(mut self, query: impl QueryNode + 'static) -> Self {
        self.must.push(Box::new(query));
        self
    }

    /// Add a should clause
    pub fn should(mut self, query: impl QueryNode + 'static) -> Self {
        self.should.push(Box::new(query));
        self
    }

    /// Add a must_not clause
    pub fn must_not(mut self, query: impl QueryNode + 'static) -> Self {
        self.must_not.push(Box::new(query));
        self
    }

    /// Append a boxed clause to the bucket named by `connector`
    pub fn push(&mut self, connector: Connector, query: Box<dyn QueryNode>) {
        match connector {
            Connector::Must => self.must.push(query),
            Connector::Should => self.should.push(query),
            Connector::MustNot => self.must_not.push(query),
        }
    }

}

fn render_bucket(nodes: &[Box<dyn QueryNode>]) -> Value {
    Value::Array(nodes.iter().map(|q| q.to_json()).collect())
}

impl QueryNode for BoolQuery {
    fn to_json(&self) -> Value {
        let mut body = Map::new();
        for (name, bucket) in [
            ("must", &self.must),
            ("should", &self.should),
            ("must_not", &self.must_not),
        ] {
            if !bucket.is_empty() {
                body.insert(name.to_string(), render_bucket(bucket));
            }
        }

        let mut root = Map::new();
        root.insert("bool".to_string(), Value::Object(body));
        Value::Object(root)
    }

    fn query_type(&self) -> &'static str {
        "bool"
    }

    fn clone_box(&self) -> Box<dyn QueryNode> {
        Box::new(self.clone())
    }
}
