//! Search transport collaborator
//!
//! The builder never talks to an engine itself. It renders a request body and
//! hands it to a `SearchTransport`, which owns connections, retries and
//! timeouts.

use crate::config::IndexTarget;
use crate::models::ResultPage;
use crate::Result;
use serde_json::Value;

/// Executes rendered request bodies against a search engine
pub trait SearchTransport: Send + Sync {
    /// Run a search body and return hits in engine order (relevance or the
    /// requested sort) along with the total match count
    fn search(&self, target: &IndexTarget, body: &Value) -> Result<ResultPage>;

    /// Count documents matching a body that holds at most a `query` section
    fn count(&self, target: &IndexTarget, body: &Value) -> Result<u64>;
}
