//! Searchable record types
//!
//! Implemented by the record side (usually a store or model type) to hand out
//! builders already bound to its index and scopes.

use crate::config::{IndexTarget, DEFAULT_DOC_TYPE};
use crate::query::SearchBuilder;
use crate::scope::ScopeRegistry;
use std::sync::Arc;

pub trait Searchable {
    /// Index backing this record type
    fn search_index(&self) -> String;

    fn search_doc_type(&self) -> Option<String> {
        Some(DEFAULT_DOC_TYPE.to_string())
    }

    fn search_target(&self) -> IndexTarget {
        IndexTarget {
            index: self.search_index(),
            doc_type: self.search_doc_type(),
        }
    }

    /// Named scopes available to builders from [`Searchable::search`]
    fn search_scopes(&self) -> Arc<ScopeRegistry> {
        Arc::new(ScopeRegistry::new())
    }

    /// Start a new search against this record type
    fn search(&self) -> SearchBuilder {
        SearchBuilder::new(self.search_target()).with_scopes(self.search_scopes())
    }
}
