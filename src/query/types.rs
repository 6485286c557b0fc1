//! Core types for the query system

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;

/// How a clause combines with its siblings inside a bool query
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Connector {
    /// Clause must match (AND)
    #[default]
    Must,
    /// At least one should clause matches (OR)
    Should,
    /// Clause must not match (NOT)
    MustNot,
}

impl Connector {
    /// Name used for the matching bucket of a bool query
    pub fn as_str(&self) -> &'static str {
        match self {
            Connector::Must => "must",
            Connector::Should => "should",
            Connector::MustNot => "must_not",
        }
    }

    /// Parse a bucket name, returning `None` for anything else
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "must" => Some(Connector::Must),
            "should" => Some(Connector::Should),
            "must_not" => Some(Connector::MustNot),
            _ => None,
        }
    }
}

impl fmt::Display for Connector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Range bounds for range queries
///
/// Unset bounds are `None` and never serialized, so an explicit `0` bound
/// stays distinguishable from a missing one.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct RangeBounds {
    /// Greater than or equal to
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gte: Option<Value>,
    /// Greater than
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gt: Option<Value>,
    /// Less than or equal to
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lte: Option<Value>,
    /// Less than
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lt: Option<Value>,
}

impl RangeBounds {
    /// Inclusive range on both ends
    pub fn between(low: impl Into<Value>, high: impl Into<Value>) -> Self {
        Self {
            gte: Some(low.into()),
            lte: Some(high.into()),
            ..Default::default()
        }
    }

    /// Set a single bound by its DSL name (`lt`, `lte`, `gt`, `gte`)
    ///
    /// Returns `false` if the name is not a bound.
    pub fn set(&mut self, bound: &str, value: Value) -> bool {
        let slot = match bound {
            "gte" => &mut self.gte,
            "gt" => &mut self.gt,
            "lte" => &mut self.lte,
            "lt" => &mut self.lt,
            _ => return false,
        };
        *slot = Some(value);
        true
    }

    /// Check if no bound is set
    pub fn is_empty(&self) -> bool {
        self.gte.is_none() && self.gt.is_none() && self.lte.is_none() && self.lt.is_none()
    }

    /// Render the bounds as a JSON object in `gte, gt, lte, lt` order
    pub fn to_json(&self) -> Value {
        let mut map = Map::new();
        for (name, bound) in [
            ("gte", &self.gte),
            ("gt", &self.gt),
            ("lte", &self.lte),
            ("lt", &self.lt),
        ] {
            if let Some(value) = bound {
                map.insert(name.to_string(), value.clone());
            }
        }
        Value::Object(map)
    }
}

/// Sort direction
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

impl SortDirection {
    /// Anything other than a case-insensitive `asc` sorts descending
    pub fn parse_lenient(direction: &str) -> Self {
        if direction.eq_ignore_ascii_case("asc") {
            SortDirection::Asc
        } else {
            SortDirection::Desc
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SortDirection::Asc => "asc",
            SortDirection::Desc => "desc",
        }
    }
}

/// One entry of an ordered sort specification
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortField {
    pub field: String,
    pub direction: SortDirection,
}

impl SortField {
    pub fn new(field: impl Into<String>, direction: SortDirection) -> Self {
        Self {
            field: field.into(),
            direction,
        }
    }

    /// `{ "<field>": "<direction>" }`
    pub fn to_json(&self) -> Value {
        let mut map = Map::new();
        map.insert(
            self.field.clone(),
            Value::String(self.direction.as_str().to_string()),
        );
        Value::Object(map)
    }
}

/// Script used to replace relevance scoring
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ScoreScript {
    /// Script source
    pub source: String,
    /// Script language (engine default when unset)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lang: Option<String>,
    /// Script parameters
    #[serde(default, skip_serializing_if = "Map::is_empty")]
    pub params: Map<String, Value>,
}

impl ScoreScript {
    pub fn new(source: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            lang: None,
            params: Map::new(),
        }
    }

    /// Script written in the engine's expression language
    pub fn expression(source: impl Into<String>) -> Self {
        Self::new(source).with_lang("expression")
    }

    pub fn with_lang(mut self, lang: impl Into<String>) -> Self {
        self.lang = Some(lang.into());
        self
    }

    pub fn with_param(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.params.insert(name.into(), value.into());
        self
    }

    pub fn to_json(&self) -> Value {
        serde_json::to_value(self).unwrap_or(Value::Null)
    }
}
