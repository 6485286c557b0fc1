//! Clause model
//!
//! A `Clause` is one constraint contributed by one fluent builder call. Each
//! kind carries exactly the data it needs, so "unset" can never be confused
//! with an explicit zero or empty value.
//!
//! Clause lists can also be stored as JSON (saved searches, fixtures) and
//! read back with [`Clause::from_json`]:
//!
//! ```json
//! [
//!   { "kind": "term", "connector": "must", "field": "status", "value": "active" },
//!   { "kind": "range", "connector": "should", "field": "age", "value": { "gte": 18 } },
//!   { "kind": "nested", "connector": "must", "clauses": [ ... ] },
//!   { "kind": "raw", "connector": "must", "query": { "match_all": {} } }
//! ]
//! ```

use crate::error::BuilderError;
use crate::query::ast::QueryNode;
use crate::query::nodes::RawQuery;
use crate::query::types::{Connector, RangeBounds};
use crate::Result;
use serde_json::{Map, Value};

/// Canonical operator kind of a clause, with its payload
#[derive(Clone, Debug)]
pub enum ClauseKind {
    /// Exact match of a scalar
    Term { field: String, value: Value },
    /// Bounded comparison
    Range { field: String, bounds: RangeBounds },
    /// Phrase match on an analyzed field
    MatchPhrase { field: String, value: Value },
    /// Field presence
    Exists { field: String },
    /// Sub-group compiled on its own and folded into the parent
    Nested(Vec<Clause>),
    /// Caller-built query used verbatim
    Raw(Box<dyn QueryNode>),
}

impl ClauseKind {
    pub fn name(&self) -> &'static str {
        match self {
            ClauseKind::Term { .. } => "term",
            ClauseKind::Range { .. } => "range",
            ClauseKind::MatchPhrase { .. } => "match_phrase",
            ClauseKind::Exists { .. } => "exists",
            ClauseKind::Nested(_) => "nested",
            ClauseKind::Raw(_) => "raw",
        }
    }
}

/// One constraint and how it combines with its siblings
#[derive(Clone, Debug)]
pub struct Clause {
    pub connector: Connector,
    pub kind: ClauseKind,
}

impl Clause {
    pub fn new(kind: ClauseKind, connector: Connector) -> Self {
        Self { connector, kind }
    }

    pub fn term(field: impl Into<String>, value: impl Into<Value>) -> Self {
        Self::new(
            ClauseKind::Term {
                field: field.into(),
                value: value.into(),
            },
            Connector::Must,
        )
    }

    pub fn range(field: impl Into<String>, bounds: RangeBounds) -> Self {
        Self::new(
            ClauseKind::Range {
                field: field.into(),
                bounds,
            },
            Connector::Must,
        )
    }

    pub fn match_phrase(field: impl Into<String>, value: impl Into<Value>) -> Self {
        Self::new(
            ClauseKind::MatchPhrase {
                field: field.into(),
                value: value.into(),
            },
            Connector::Must,
        )
    }

    pub fn exists(field: impl Into<String>) -> Self {
        Self::new(
            ClauseKind::Exists {
                field: field.into(),
            },
            Connector::Must,
        )
    }

    pub fn nested(clauses: Vec<Clause>) -> Self {
        Self::new(ClauseKind::Nested(clauses), Connector::Must)
    }

    pub fn raw(query: Box<dyn QueryNode>) -> Self {
        Self::new(ClauseKind::Raw(query), Connector::Must)
    }

    /// Replace the connector
    pub fn with_connector(mut self, connector: Connector) -> Self {
        self.connector = connector;
        self
    }

    /// Target field, absent for nested and raw clauses
    pub fn field(&self) -> Option<&str> {
        match &self.kind {
            ClauseKind::Term { field, .. }
            | ClauseKind::Range { field, .. }
            | ClauseKind::MatchPhrase { field, .. }
            | ClauseKind::Exists { field } => Some(field),
            ClauseKind::Nested(_) | ClauseKind::Raw(_) => None,
        }
    }

    /// Encode this clause (and any children) as JSON
    pub fn to_json(&self) -> Value {
        let mut map = Map::new();
        map.insert("kind".into(), Value::String(self.kind.name().into()));
        map.insert("connector".into(), Value::String(self.connector.as_str().into()));

        match &self.kind {
            ClauseKind::Term { field, value } | ClauseKind::MatchPhrase { field, value } => {
                map.insert("field".into(), Value::String(field.clone()));
                map.insert("value".into(), value.clone());
            }
            ClauseKind::Range { field, bounds } => {
                map.insert("field".into(), Value::String(field.clone()));
                map.insert("value".into(), bounds.to_json());
            }
            ClauseKind::Exists { field } => {
                map.insert("field".into(), Value::String(field.clone()));
            }
            ClauseKind::Nested(children) => {
                map.insert("clauses".into(), clauses_to_json(children));
            }
            ClauseKind::Raw(query) => {
                map.insert("query".into(), query.to_json());
            }
        }

        Value::Object(map)
    }

    /// Decode a clause written by [`Clause::to_json`]
    ///
    /// An unrecognized `kind` fails with `UnsupportedOperator`; structurally
    /// broken input fails with `InvalidClause`.
    pub fn from_json(value: &Value) -> Result<Self> {
        let map = value
            .as_object()
            .ok_or_else(|| BuilderError::InvalidClause("clause must be a JSON object".into()))?;

        let kind = map
            .get("kind")
            .and_then(Value::as_str)
            .ok_or_else(|| BuilderError::InvalidClause("clause is missing 'kind'".into()))?;

        let connector = match map.get("connector") {
            None => Connector::Must,
            Some(Value::String(s)) => Connector::parse(s).ok_or_else(|| {
                BuilderError::InvalidClause(format!("unknown connector '{}'", s))
            })?,
            Some(other) => {
                return Err(BuilderError::InvalidClause(format!(
                    "connector must be a string, got {}",
                    other
                )))
            }
        };

        let kind = match kind {
            "term" => ClauseKind::Term {
                field: required_field(map, kind)?,
                value: map.get("value").cloned().unwrap_or(Value::Null),
            },
            "match_phrase" => ClauseKind::MatchPhrase {
                field: required_field(map, kind)?,
                value: map.get("value").cloned().unwrap_or(Value::Null),
            },
            "range" => ClauseKind::Range {
                field: required_field(map, kind)?,
                bounds: parse_bounds(map.get("value"))?,
            },
            "exists" => ClauseKind::Exists {
                field: required_field(map, kind)?,
            },
            "nested" => {
                let children = map.get("clauses").ok_or_else(|| {
                    BuilderError::InvalidClause("nested clause is missing 'clauses'".into())
                })?;
                ClauseKind::Nested(clauses_from_json(children)?)
            }
            "raw" => {
                let query = map.get("query").ok_or_else(|| {
                    BuilderError::InvalidClause("raw clause is missing 'query'".into())
                })?;
                ClauseKind::Raw(Box::new(RawQuery::new(query.clone())))
            }
            other => {
                return Err(BuilderError::UnsupportedOperator {
                    kind: other.to_string(),
                })
            }
        };

        Ok(Clause { connector, kind })
    }
}

fn required_field(map: &Map<String, Value>, kind: &str) -> Result<String> {
    map.get("field")
        .and_then(Value::as_str)
        .map(str::to_string)
        .ok_or_else(|| BuilderError::InvalidClause(format!("{} clause is missing 'field'", kind)))
}

fn parse_bounds(value: Option<&Value>) -> Result<RangeBounds> {
    let map = value.and_then(Value::as_object).ok_or_else(|| {
        BuilderError::InvalidClause("range clause needs an object of bounds".into())
    })?;

    let mut bounds = RangeBounds::default();
    for (name, bound) in map {
        if !bounds.set(name, bound.clone()) {
            return Err(BuilderError::InvalidClause(format!(
                "unknown range bound '{}'",
                name
            )));
        }
    }
    if bounds.is_empty() {
        return Err(BuilderError::InvalidClause(
            "range clause needs at least one bound".into(),
        ));
    }
    Ok(bounds)
}

/// Encode a clause list as a JSON array
pub fn clauses_to_json(clauses: &[Clause]) -> Value {
    Value::Array(clauses.iter().map(Clause::to_json).collect())
}

/// Decode a JSON array of clauses, keeping their order
pub fn clauses_from_json(value: &Value) -> Result<Vec<Clause>> {
    match value {
        Value::Array(items) => items.iter().map(Clause::from_json).collect(),
        _ => Err(BuilderError::InvalidClause(
            "clause list must be a JSON array".into(),
        )),
    }
}
