//! Function score query - replaces relevance with a script

use crate::query::ast::QueryNode;
use crate::query::types::ScoreScript;
use serde_json::{json, Map, Value};

/// Wraps a filtering query and scores its matches with a script
///
/// The script result replaces the default relevance (`boost_mode: replace`).
/// Without an inner query the engine scores every document.
#[derive(Clone, Debug)]
pub struct FunctionScoreQuery {
    pub query: Option<Box<dyn QueryNode>>,
    pub script: ScoreScript,
}

impl FunctionScoreQuery {
    pub fn new(script: ScoreScript) -> Self {
        Self {
            query: None,
            script,
        }
    }

    pub fn with_query(mut self, query: Box<dyn QueryNode>) -> Self {
        self.query = Some(query);
        self
    }
}

impl QueryNode for FunctionScoreQuery {
    fn to_json(&self) -> Value {
        let mut body = Map::new();
        if let Some(query) = &self.query {
            body.insert("query".to_string(), query.to_json());
        }
        body.insert(
            "functions".to_string(),
            json!([ { "script_score": { "script": self.script.to_json() } } ]),
        );
        body.insert("boost_mode".to_string(), json!("replace"));

        json!({ "function_score": Value::Object(body) })
    }

    fn query_type(&self) -> &'static str {
        "function_score"
    }

    fn clone_box(&self) -> Box<dyn QueryNode> {
        Box::new(self.clone())
    }
}
