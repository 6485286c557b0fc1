//! Exists query - matches documents that have a value for a field

use crate::query::ast::QueryNode;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

/// Query that matches documents where `field` is present and non-null
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExistsQuery {
    pub field: String,
}

impl ExistsQuery {
    pub fn new(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
        }
    }
}

impl QueryNode for ExistsQuery {
    fn to_json(&self) -> Value {
        json!({ "exists": { "field": self.field } })
    }

    fn query_type(&self) -> &'static str {
        "exists"
    }

    fn clone_box(&self) -> Box<dyn QueryNode> {
        Box::new(self.clone())
    }
}
