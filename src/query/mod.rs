//! Fluent query builder and compiler
//!
//! This module turns an ordered list of clauses into one query tree in the
//! engine's JSON DSL:
//! - Term clauses (exact match)
//! - Range clauses (`gt`, `gte`, `lt`, `lte`)
//! - Phrase clauses (`match_phrase`)
//! - Existence checks
//! - Nested groups and raw passthrough
//!
//! Every clause carries a connector (`must`, `should`, `must_not`) that picks
//! its bucket in the compiled `bool` query.
//!
//! # Example
//!
//! ```json
//! {
//!   "query": {
//!     "bool": {
//!       "must": [
//!         { "term": { "status": "active" } },
//!         { "range": { "age": { "gt": 18 } } }
//!       ],
//!       "must_not": [
//!         { "exists": { "field": "deleted_at" } }
//!       ]
//!     }
//!   }
//! }
//! ```

pub mod ast;
pub mod builder;
pub mod clause;
pub mod compiler;
pub mod executor;
pub mod nodes;
pub mod operator;
pub mod request;
pub mod types;

pub use ast::QueryNode;
pub use builder::{IdResolver, SearchBuilder};
pub use clause::{clauses_from_json, clauses_to_json, Clause, ClauseKind};
pub use compiler::QueryCompiler;
pub use nodes::{
    BoolQuery, ExistsQuery, FunctionScoreQuery, PhraseQuery, RangeQuery, RawQuery, TermQuery,
};
pub use operator::{Operator, OperatorNormalizer};
pub use request::{SearchRequest, SourceFilter};
pub use types::*;
