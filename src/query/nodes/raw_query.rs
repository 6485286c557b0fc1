//! Raw query - hand-written DSL passed through verbatim

use crate::query::ast::QueryNode;
use serde_json::Value;

/// A query DSL object the builder does not model
///
/// Useful for engine features such as `geo_distance` or `script` queries.
/// The value is never inspected; it goes on the wire exactly as given.
#[derive(Clone, Debug, PartialEq)]
pub struct RawQuery {
    pub body: Value,
}

impl RawQuery {
    pub fn new(body: Value) -> Self {
        Self { body }
    }
}

impl QueryNode for RawQuery {
    fn to_json(&self) -> Value {
        self.body.clone()
    }

    fn query_type(&self) -> &'static str {
        "raw"
    }

    fn clone_box(&self) -> Box<dyn QueryNode> {
        Box::new(self.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_raw_query_passthrough() {
        let body = json!({ "geo_distance": { "distance": "12km", "pin": [-70, 40] } });
        let query = RawQuery::new(body.clone());
        assert_eq!(query.to_json(), body);
        assert_eq!(query.query_type(), "raw");
    }
}
