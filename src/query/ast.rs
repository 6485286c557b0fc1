//! Abstract Syntax Tree for compiled queries
//!
//! This module defines the core `QueryNode` trait that every compiled query
//! implements. Nodes are never executed locally: they render themselves into
//! the JSON query DSL that a search transport submits to the engine.

use serde_json::Value;
use std::fmt::Debug;

/// Core trait for all query nodes in the AST
///
/// Query nodes form a tree that mirrors the bool/leaf structure of the
/// query DSL. Callers may supply their own implementations through raw
/// clauses; the compiler passes those through untouched.
pub trait QueryNode: Send + Sync + Debug {
    /// Render this node as a query DSL object, e.g. `{"term": {"status": "active"}}`
    fn to_json(&self) -> Value;

    /// Get the query type name for debugging and logging
    fn query_type(&self) -> &'static str;

    /// Clone this query node into a boxed trait object
    fn clone_box(&self) -> Box<dyn QueryNode>;
}

impl Clone for Box<dyn QueryNode> {
    fn clone(&self) -> Self {
        self.clone_box()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::query::nodes::TermQuery;

    #[test]
    fn test_boxed_clone() {
        let node: Box<dyn QueryNode> = Box::new(TermQuery::new("a", 1));
        let cloned = node.clone();
        assert_eq!(cloned.query_type(), "term");
        assert_eq!(cloned.to_json(), node.to_json());
    }
}
