//! Concrete query node implementations
//!
//! This module provides implementations of the `QueryNode` trait for
//! the query types the compiler emits.

mod bool_query;
mod exists_query;
mod function_score;
mod phrase_query;
mod range_query;
mod raw_query;
mod term_query;

pub use bool_query::BoolQuery;
pub use exists_query::ExistsQuery;
pub use function_score::FunctionScoreQuery;
pub use phrase_query::PhraseQuery;
pub use range_query::RangeQuery;
pub use raw_query::RawQuery;
pub use term_query::TermQuery;
