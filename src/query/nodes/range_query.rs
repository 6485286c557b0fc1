//! Range query - matches documents with field values in a range

use crate::query::ast::QueryNode;
use crate::query::types::RangeBounds;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

/// Query that matches documents with field values within a specified range
///
/// Bounds are plain JSON scalars, so numeric, date and keyword ranges are
/// all expressed the same way.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RangeQuery {
    /// Field to search in
    pub field: String,
    /// Range bounds (gte, gt, lte, lt)
    #[serde(flatten)]
    pub bounds: RangeBounds,
}

impl RangeQuery {
    /// Create a new unbounded range query
    pub fn new(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            bounds: RangeBounds::default(),
        }
    }

    /// Set the greater-than-or-equal bound
    pub fn gte(mut self, value: impl Into<Value>) -> Self {
        self.bounds.gte = Some(value.into());
        self
    }

    /// Set the greater-than bound
    pub fn gt(mut self, value: impl Into<Value>) -> Self {
        self.bounds.gt = Some(value.into());
        self
    }

    /// Set the less-than-or-equal bound
    pub fn lte(mut self, value: impl Into<Value>) -> Self {
        self.bounds.lte = Some(value.into());
        self
    }

    /// Set the less-than bound
    pub fn lt(mut self, value: impl Into<Value>) -> Self {
        self.bounds.lt = Some(value.into());
        self
    }

    /// Set the bounds from a RangeBounds struct
    pub fn with_bounds(mut self, bounds: RangeBounds) -> Self {
        self.bounds = bounds;
        self
    }
}

impl QueryNode for RangeQuery {
    fn to_json(&self) -> Value {
        json!({ "range": { self.field.as_str(): self.bounds.to_json() } })
    }

    fn query_type(&self) -> &'static str {
        "range"
    }

    fn clone_box(&self) -> Box<dyn QueryNode> {
        Box::new(self.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_range_query_builder() {
        let query = RangeQuery::new("age").gt(18).lt(65);
        assert_eq!(query.field, "age");
        assert_eq!(query.bounds.gt, Some(json!(18)));
        assert_eq!(query.bounds.lt, Some(json!(65)));
        assert!(query.bounds.gte.is_none());
    }

    #[test]
    fn test_range_query_json() {
        let query = RangeQuery::new("created_at").gte("2024-01-01");
        assert_eq!(
            query.to_json(),
            json!({ "range": { "created_at": { "gte": "2024-01-01" } } })
        );
    }

    #[test]
    fn test_range_query_with_bounds() {
        let query = RangeQuery::new("year").with_bounds(RangeBounds::between(2020, 2024));
        assert_eq!(
            query.to_json(),
            json!({ "range": { "year": { "gte": 2020, "lte": 2024 } } })
        );
    }

    #[test]
    fn test_range_query_type() {
        let query = RangeQuery::new("price");
        assert_eq!(query.query_type(), "range");
    }
}
