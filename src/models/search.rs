use serde::{Deserialize, Serialize};
use serde_json::Value;

/// One matching document as reported by the engine
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Hit {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(rename = "_score", default, skip_serializing_if = "Option::is_none")]
    pub score: Option<f32>,
    #[serde(rename = "_source", default, skip_serializing_if = "Option::is_none")]
    pub source: Option<Value>,
}

impl Hit {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            score: None,
            source: None,
        }
    }

    pub fn with_score(mut self, score: f32) -> Self {
        self.score = Some(score);
        self
    }

    pub fn with_source(mut self, source: Value) -> Self {
        self.source = Some(source);
        self
    }
}

/// Ranked hits for one window plus the size of the full matching set
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ResultPage {
    pub hits: Vec<Hit>,
    /// Total matches, independent of offset and limit
    pub total_hits: u64,
}

impl ResultPage {
    pub fn new(hits: Vec<Hit>, total_hits: u64) -> Self {
        Self { hits, total_hits }
    }

    pub fn len(&self) -> usize {
        self.hits.len()
    }

    pub fn is_empty(&self) -> bool {
        self.hits.is_empty()
    }

    /// Hit identifiers in rank order
    pub fn ids(&self) -> Vec<String> {
        self.hits.iter().map(|h| h.id.clone()).collect()
    }

    /// Parse an engine response body (`{"hits": {"total": ..., "hits": [...]}}`)
    ///
    /// `total` may be a bare number or `{"value": n, "relation": ...}`.
    pub fn from_response(body: &Value) -> crate::Result<Self> {
        let hits_section = body.get("hits").ok_or_else(|| {
            crate::BuilderError::Transport("response has no 'hits' section".to_string())
        })?;

        let total_hits = match hits_section.get("total") {
            Some(Value::Number(n)) => n.as_u64().unwrap_or(0),
            Some(Value::Object(total)) => total.get("value").and_then(Value::as_u64).unwrap_or(0),
            _ => 0,
        };

        let hits = match hits_section.get("hits") {
            Some(list) => serde_json::from_value(list.clone())?,
            None => Vec::new(),
        };

        Ok(Self { hits, total_hits })
    }
}
