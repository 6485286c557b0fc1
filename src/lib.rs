pub mod client;
pub mod config;
pub mod error;
pub mod hydrate;
pub mod models;
pub mod pagination;
pub mod query;
pub mod scope;
pub mod searchable;
pub mod testing;

pub use client::SearchTransport;
pub use config::{IndexTarget, SearchSettings, DEFAULT_DOC_TYPE};
pub use error::{BuilderError, Result};
pub use hydrate::{Hydrator, RecordStore};
pub use models::*;
pub use pagination::Paginator;
pub use query::{
    Clause, ClauseKind, Connector, QueryCompiler, QueryNode, ScoreScript, SearchBuilder,
    SearchRequest, SortDirection,
};
pub use scope::ScopeRegistry;
pub use searchable::Searchable;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
