//! Recording transport
//!
//! Captures every request body it receives and answers with a canned
//! result page, so tests can assert on exactly what would go on the wire.

use crate::client::SearchTransport;
use crate::config::IndexTarget;
use crate::error::BuilderError;
use crate::models::ResultPage;
use crate::Result;
use parking_lot::Mutex;
use serde_json::Value;

/// Which transport call produced a recorded request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequestKind {
    Search,
    Count,
}

/// One captured call
#[derive(Debug, Clone, PartialEq)]
pub struct RecordedRequest {
    pub kind: RequestKind,
    pub target: IndexTarget,
    pub body: Value,
}

/// Transport double that records requests and replays fixed answers
#[derive(Debug, Default)]
pub struct RecordingTransport {
    page: ResultPage,
    count: u64,
    failure: Option<String>,
    requests: Mutex<Vec<RecordedRequest>>,
}

impl RecordingTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Answer every search with `page`
    pub fn with_page(mut self, page: ResultPage) -> Self {
        self.page = page;
        self
    }

    /// Answer every count with `count`
    pub fn with_count(mut self, count: u64) -> Self {
        self.count = count;
        self
    }

    /// Fail every call with a transport error carrying `message`
    pub fn failing(mut self, message: impl Into<String>) -> Self {
        self.failure = Some(message.into());
        self
    }

    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.requests.lock().clone()
    }

    pub fn last_request(&self) -> Option<RecordedRequest> {
        self.requests.lock().last().cloned()
    }

    pub fn request_count(&self) -> usize {
        self.requests.lock().len()
    }

    fn record(&self, kind: RequestKind, target: &IndexTarget, body: &Value) -> Result<()> {
        self.requests.lock().push(RecordedRequest {
            kind,
            target: target.clone(),
            body: body.clone(),
        });
        match &self.failure {
            Some(message) => Err(BuilderError::Transport(message.clone())),
            None => Ok(()),
        }
    }
}

impl SearchTransport for RecordingTransport {
    fn search(&self, target: &IndexTarget, body: &Value) -> Result<ResultPage> {
        self.record(RequestKind::Search, target, body)?;
        Ok(self.page.clone())
    }

    fn count(&self, target: &IndexTarget, body: &Value) -> Result<u64> {
        self.record(RequestKind::Count, target, body)?;
        Ok(self.count)
    }
}
