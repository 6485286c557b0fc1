//! Operator normalization
//!
//! Maps the operator tokens accepted by the fluent builder onto canonical
//! clause kinds:
//!
//! | token          | clause                                   |
//! |----------------|------------------------------------------|
//! | `=`            | term                                     |
//! | `!=`, `<>`     | term, connector forced to `must_not`     |
//! | `<` `<=` `>` `>=` | range with one bound (`lt` `lte` `gt` `gte`) |
//! | `text`         | match_phrase                             |
//! | `range`        | range `{gte: low, lte: high}`            |
//!
//! Tokens are matched case-insensitively. A token that is not recognized is
//! taken to be the value of an equality test, so `where_op("status",
//! "active", None)` is the same as `where_eq("status", "active")`.

use crate::error::BuilderError;
use crate::query::clause::{Clause, ClauseKind};
use crate::query::types::{Connector, RangeBounds};
use crate::Result;
use serde_json::Value;
use std::fmt;
use tracing::trace;

/// A recognized comparison operator
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Operator {
    Eq,
    NotEq,
    Lt,
    Lte,
    Gt,
    Gte,
    Text,
    Range,
}

impl Operator {
    /// Parse a user-facing token, ignoring ASCII case
    pub fn parse(token: &str) -> Option<Self> {
        let op = match token.to_ascii_lowercase().as_str() {
            "=" => Operator::Eq,
            "!=" | "<>" => Operator::NotEq,
            "<" => Operator::Lt,
            "<=" => Operator::Lte,
            ">" => Operator::Gt,
            ">=" => Operator::Gte,
            "text" => Operator::Text,
            "range" => Operator::Range,
            _ => return None,
        };
        Some(op)
    }

    pub fn token(&self) -> &'static str {
        match self {
            Operator::Eq => "=",
            Operator::NotEq => "!=",
            Operator::Lt => "<",
            Operator::Lte => "<=",
            Operator::Gt => ">",
            Operator::Gte => ">=",
            Operator::Text => "text",
            Operator::Range => "range",
        }
    }

    /// Range bound name for the comparison operators
    pub fn range_bound(&self) -> Option<&'static str> {
        match self {
            Operator::Lt => Some("lt"),
            Operator::Lte => Some("lte"),
            Operator::Gt => Some("gt"),
            Operator::Gte => Some("gte"),
            _ => None,
        }
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.token())
    }
}

/// Turns builder arguments into a canonical clause
pub struct OperatorNormalizer;

impl OperatorNormalizer {
    /// Two-argument shape: always an equality test
    pub fn equality(field: impl Into<String>, value: Value, connector: Connector) -> Clause {
        Clause::new(
            ClauseKind::Term {
                field: field.into(),
                value,
            },
            connector,
        )
    }

    /// Three-argument shape
    ///
    /// `value` of `None` means no value was supplied. That is only legal for
    /// `=` (which then matches JSON `null`) or when `operator` is not a
    /// recognized token and therefore becomes the value itself.
    pub fn normalize(
        field: impl Into<String>,
        operator: &str,
        value: Option<Value>,
        connector: Connector,
    ) -> Result<Clause> {
        let field = field.into();

        let Some(op) = Operator::parse(operator) else {
            trace!(
                field = %field,
                token = operator,
                "unrecognized operator used as equality value"
            );
            return Ok(Self::equality(field, Value::String(operator.to_string()), connector));
        };

        let value = match value {
            Some(v) => v,
            None if op == Operator::Eq => Value::Null,
            None => return Err(BuilderError::missing_value()),
        };

        let clause = match op {
            Operator::Eq => Self::equality(field, value, connector),
            Operator::NotEq => Self::equality(field, value, Connector::MustNot),
            Operator::Lt | Operator::Lte | Operator::Gt | Operator::Gte => {
                let mut bounds = RangeBounds::default();
                if let Some(bound) = op.range_bound() {
                    bounds.set(bound, value);
                }
                Clause::new(ClauseKind::Range { field, bounds }, connector)
            }
            Operator::Text => Clause::new(ClauseKind::MatchPhrase { field, value }, connector),
            Operator::Range => {
                let (low, high) = Self::bound_pair(value)?;
                Clause::new(
                    ClauseKind::Range {
                        field,
                        bounds: RangeBounds::between(low, high),
                    },
                    connector,
                )
            }
        };

        trace!(
            operator = %op,
            kind = clause.kind.name(),
            connector = %clause.connector,
            "normalized clause"
        );
        Ok(clause)
    }

    /// Split a `[low, high]` array into its two bounds
    pub fn bound_pair(value: Value) -> Result<(Value, Value)> {
        match value {
            Value::Array(items) if items.len() == 2 => {
                let mut items = items.into_iter();
                match (items.next(), items.next()) {
                    (Some(low), Some(high)) => Ok((low, high)),
                    _ => Err(BuilderError::InvalidArgument(
                        "range needs exactly two bounds".to_string(),
                    )),
                }
            }
            other => Err(BuilderError::InvalidArgument(format!(
                "range needs a [low, high] pair, got {}",
                other
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn bounds_of(clause: &Clause) -> RangeBounds {
        match &clause.kind {
            ClauseKind::Range { bounds, .. } => bounds.clone(),
            other => panic!("expected range clause, got {:?}", other),
        }
    }

    #[test]
    fn test_parse_tokens() {
        assert_eq!(Operator::parse("="), Some(Operator::Eq));
        assert_eq!(Operator::parse("<>"), Some(Operator::NotEq));
        assert_eq!(Operator::parse("TEXT"), Some(Operator::Text));
        assert_eq!(Operator::parse("Range"), Some(Operator::Range));
        assert_eq!(Operator::parse("like"), None);
        assert_eq!(Operator::Gte.range_bound(), Some("gte"));
        assert_eq!(Operator::Text.range_bound(), None);
    }

    #[test]
    fn test_comparison_becomes_single_bound_range() {
        let clause =
            OperatorNormalizer::normalize("age", ">", Some(json!(18)), Connector::Must).unwrap();
        assert_eq!(clause.kind.name(), "range");
        assert_eq!(bounds_of(&clause).to_json(), json!({ "gt": 18 }));

        let clause =
            OperatorNormalizer::normalize("age", "<=", Some(json!(0)), Connector::Must).unwrap();
        assert_eq!(bounds_of(&clause).to_json(), json!({ "lte": 0 }));
    }

    #[test]
    fn test_not_equal_forces_must_not() {
        for token in ["!=", "<>"] {
            let clause =
                OperatorNormalizer::normalize("age", token, Some(json!(18)), Connector::Should)
                    .unwrap();
            assert_eq!(clause.kind.name(), "term");
            assert_eq!(clause.connector, Connector::MustNot);
        }
    }

    #[test]
    fn test_unrecognized_token_is_the_value() {
        let shortcut =
            OperatorNormalizer::normalize("status", "active", None, Connector::Must).unwrap();
        match shortcut.kind {
            ClauseKind::Term { field, value } => {
                assert_eq!(field, "status");
                assert_eq!(value, json!("active"));
            }
            other => panic!("expected term clause, got {:?}", other),
        }
    }

    #[test]
    fn test_text_and_range_tokens() {
        let clause = OperatorNormalizer::normalize(
            "body",
            "text",
            Some(json!("hello world")),
            Connector::Must,
        )
        .unwrap();
        assert_eq!(clause.kind.name(), "match_phrase");

        let clause =
            OperatorNormalizer::normalize("price", "range", Some(json!([10, 20])), Connector::Must)
                .unwrap();
        assert_eq!(bounds_of(&clause).to_json(), json!({ "gte": 10, "lte": 20 }));
    }

    #[test]
    fn test_missing_value_is_invalid() {
        let err = OperatorNormalizer::normalize("age", ">", None, Connector::Must).unwrap_err();
        assert!(matches!(err, BuilderError::InvalidArgument(_)));

        // Equality without a value matches null
        let clause = OperatorNormalizer::normalize("age", "=", None, Connector::Must).unwrap();
        assert!(matches!(clause.kind, ClauseKind::Term { value: Value::Null, .. }));
    }

    #[test]
    fn test_range_needs_a_pair() {
        assert!(
            OperatorNormalizer::normalize("price", "range", Some(json!([1])), Connector::Must)
                .is_err()
        );
        assert!(
            OperatorNormalizer::normalize("price", "range", Some(json!(5)), Connector::Must)
                .is_err()
        );
    }
}
