//! Named search scopes
//!
//! A scope is a reusable query fragment registered under a name at setup
//! time, e.g. `published` adding `where_eq("status", "published")`. Builders
//! apply scopes by name; an unregistered name fails with `UnknownOperation`.

use crate::error::BuilderError;
use crate::query::SearchBuilder;
use crate::Result;
use serde_json::Value;
use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

/// Handler behind a scope name: receives the builder plus call arguments
pub type ScopeFn = Arc<dyn Fn(SearchBuilder, &[Value]) -> Result<SearchBuilder> + Send + Sync>;

/// Registry of named scopes, shared by a builder and its nested groups
#[derive(Clone, Default)]
pub struct ScopeRegistry {
    scopes: BTreeMap<String, ScopeFn>,
}

impl ScopeRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a scope, replacing any previous one with the same name
    pub fn register<F>(mut self, name: impl Into<String>, scope: F) -> Self
    where
        F: Fn(SearchBuilder, &[Value]) -> Result<SearchBuilder> + Send + Sync + 'static,
    {
        self.insert(name, scope);
        self
    }

    /// In-place form of [`ScopeRegistry::register`]
    pub fn insert<F>(&mut self, name: impl Into<String>, scope: F)
    where
        F: Fn(SearchBuilder, &[Value]) -> Result<SearchBuilder> + Send + Sync + 'static,
    {
        self.scopes.insert(name.into(), Arc::new(scope));
    }

    pub fn contains(&self, name: &str) -> bool {
        self.scopes.contains_key(name)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.scopes.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.scopes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.scopes.is_empty()
    }

    /// Run the scope registered as `name`
    pub fn apply(
        &self,
        name: &str,
        builder: SearchBuilder,
        args: &[Value],
    ) -> Result<SearchBuilder> {
        let scope = self
            .scopes
            .get(name)
            .ok_or_else(|| BuilderError::UnknownOperation {
                name: name.to_string(),
            })?;
        scope(builder, args)
    }
}

impl fmt::Debug for ScopeRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.scopes.keys()).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::IndexTarget;
    use serde_json::json;

    fn registry() -> ScopeRegistry {
        ScopeRegistry::new()
            .register("published", |q, _| Ok(q.where_eq("status", "published")))
            .register("older_than", |q, args| {
                let age = args.first().cloned().ok_or_else(|| {
                    BuilderError::InvalidArgument("older_than needs an age".to_string())
                })?;
                q.where_op("age", ">", age)
            })
    }

    #[test]
    fn test_registry_lookup() {
        let registry = registry();
        assert_eq!(registry.len(), 2);
        assert!(registry.contains("published"));
        assert!(!registry.contains("Published"));
        assert_eq!(registry.names().collect::<Vec<_>>(), vec!["older_than", "published"]);
    }

    #[test]
    fn test_apply_scope() {
        let builder = SearchBuilder::new(IndexTarget::new("users"));
        let builder = registry().apply("older_than", builder, &[json!(30)]).unwrap();
        assert_eq!(
            builder.compile().map(|q| q.to_json()),
            Some(json!({ "range": { "age": { "gt": 30 } } }))
        );
    }

    #[test]
    fn test_unknown_scope() {
        let builder = SearchBuilder::new(IndexTarget::new("users"));
        let err = registry().apply("popular", builder, &[]).unwrap_err();
        assert!(matches!(err, BuilderError::UnknownOperation { ref name } if name == "popular"));
    }

    #[test]
    fn test_scope_argument_errors_propagate() {
        let builder = SearchBuilder::new(IndexTarget::new("users"));
        let err = registry().apply("older_than", builder, &[]).unwrap_err();
        assert!(matches!(err, BuilderError::InvalidArgument(_)));
    }
}
