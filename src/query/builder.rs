//! Fluent search builder
//!
//! `SearchBuilder` collects clauses in call order and carries the window,
//! sort and scoring options of one logical search. It is consumed and
//! returned by every call, so a builder cannot be shared between two
//! searches by accident; clone it explicitly to fork a search.
//!
//! Calls that can fail (`where_op`, `where_with`, `where_text`, `scope`,
//! `try_where_nested`) take the builder by value and return `Result<Self>`.
//! On error nothing is appended, but the builder passed in is consumed and
//! dropped along with every clause collected so far. Clone the builder
//! before a fallible call if the search must survive a rejected clause.
//!
//! # Example
//!
//! ```rust
//! use squidex_builder::{IndexTarget, SearchBuilder};
//!
//! let search = SearchBuilder::new(IndexTarget::new("posts"))
//!     .where_eq("status", "published")
//!     .where_op("likes", ">=", 10)?
//!     .where_nested(|q| q.where_eq("lang", "en").or_where_eq("lang", "fr"))
//!     .order_by("created_at", "desc")
//!     .for_page(2, 15);
//!
//! let body = search.to_request(&["title".to_string()]).to_json();
//! assert_eq!(body["from"], 15);
//! # Ok::<(), squidex_builder::BuilderError>(())
//! ```

use crate::config::{IndexTarget, SearchSettings, DEFAULT_PAGE_NAME, DEFAULT_PER_PAGE};
use crate::models::Hit;
use crate::query::ast::QueryNode;
use crate::query::clause::{Clause, ClauseKind};
use crate::query::compiler::QueryCompiler;
use crate::query::nodes::{FunctionScoreQuery, RawQuery};
use crate::query::operator::OperatorNormalizer;
use crate::query::request::{SearchRequest, SourceFilter};
use crate::query::types::{Connector, RangeBounds, ScoreScript, SortDirection, SortField};
use crate::scope::ScopeRegistry;
use crate::Result;
use serde_json::Value;
use std::fmt;
use std::sync::Arc;
use tracing::{debug, warn};

/// Maps a hit onto the identifier used by the record store
pub type IdResolver = Arc<dyn Fn(&Hit) -> String + Send + Sync>;

/// Clause collector and request options for one search
#[derive(Clone)]
pub struct SearchBuilder {
    target: IndexTarget,
    scopes: Arc<ScopeRegistry>,
    wheres: Vec<Clause>,
    orders: Vec<SortField>,
    script: Option<ScoreScript>,
    limit: Option<u64>,
    offset: Option<u64>,
    id_resolver: Option<IdResolver>,
    per_page: i64,
    page_name: String,
    columns: Vec<String>,
}

impl SearchBuilder {
    /// Create an empty builder for `target`
    pub fn new(target: IndexTarget) -> Self {
        Self {
            target,
            scopes: Arc::new(ScopeRegistry::new()),
            wheres: Vec::new(),
            orders: Vec::new(),
            script: None,
            limit: None,
            offset: None,
            id_resolver: None,
            per_page: DEFAULT_PER_PAGE,
            page_name: DEFAULT_PAGE_NAME.to_string(),
            columns: vec!["*".to_string()],
        }
    }

    /// Create an empty builder from search settings
    ///
    /// The settings' page size, page parameter name and columns become the
    /// defaults for execution.
    pub fn from_settings(settings: &SearchSettings) -> Self {
        Self::new(settings.target())
            .with_per_page(settings.per_page)
            .with_page_name(settings.page_name.clone())
            .with_columns(settings.columns.clone())
    }

    /// Page size used when pagination is given no explicit size
    pub fn with_per_page(mut self, per_page: i64) -> Self {
        self.per_page = per_page;
        self
    }

    /// Query parameter name reported on paginators
    pub fn with_page_name(mut self, page_name: impl Into<String>) -> Self {
        self.page_name = page_name.into();
        self
    }

    /// Columns fetched when execution is given an empty column list
    pub fn with_columns(mut self, columns: Vec<String>) -> Self {
        self.columns = columns;
        self
    }

    /// Attach a scope registry
    pub fn with_scopes(mut self, scopes: Arc<ScopeRegistry>) -> Self {
        self.scopes = scopes;
        self
    }

    /// Use a custom mapping from hits to record ids (default: the hit id)
    pub fn with_id_resolver<F>(mut self, resolver: F) -> Self
    where
        F: Fn(&Hit) -> String + Send + Sync + 'static,
    {
        self.id_resolver = Some(Arc::new(resolver));
        self
    }

    /// A fresh builder on the same target and scopes, with no clauses or
    /// request options
    pub fn new_search(&self) -> Self {
        Self::new(self.target.clone())
            .with_scopes(Arc::clone(&self.scopes))
            .with_per_page(self.per_page)
            .with_page_name(self.page_name.clone())
            .with_columns(self.columns.clone())
    }

    pub fn target(&self) -> &IndexTarget {
        &self.target
    }

    pub fn clauses(&self) -> &[Clause] {
        &self.wheres
    }

    pub fn has_where(&self) -> bool {
        !self.wheres.is_empty()
    }

    pub fn orders(&self) -> &[SortField] {
        &self.orders
    }

    pub fn offset_value(&self) -> Option<u64> {
        self.offset
    }

    pub fn limit_value(&self) -> Option<u64> {
        self.limit
    }

    pub fn per_page(&self) -> i64 {
        self.per_page
    }

    pub fn page_name(&self) -> &str {
        &self.page_name
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn script(&self) -> Option<&ScoreScript> {
        self.script.as_ref()
    }

    /// Append a prepared clause as-is
    pub fn add_clause(mut self, clause: Clause) -> Self {
        self.wheres.push(clause);
        self
    }

    // ---- equality / operator clauses ----

    /// `field = value`
    pub fn where_eq(self, field: impl Into<String>, value: impl Into<Value>) -> Self {
        self.add_clause(OperatorNormalizer::equality(field, value.into(), Connector::Must))
    }

    /// `OR field = value`
    pub fn or_where_eq(self, field: impl Into<String>, value: impl Into<Value>) -> Self {
        self.add_clause(OperatorNormalizer::equality(field, value.into(), Connector::Should))
    }

    /// `field <op> value`, see [`OperatorNormalizer`] for the accepted tokens
    ///
    /// A JSON `null` value counts as no value.
    pub fn where_op(
        self,
        field: impl Into<String>,
        operator: &str,
        value: impl Into<Value>,
    ) -> Result<Self> {
        self.where_with(field, operator, non_null(value.into()), Connector::Must)
    }

    /// `OR field <op> value`
    pub fn or_where_op(
        self,
        field: impl Into<String>,
        operator: &str,
        value: impl Into<Value>,
    ) -> Result<Self> {
        self.where_with(field, operator, non_null(value.into()), Connector::Should)
    }

    /// General form with an explicit connector
    ///
    /// On error nothing is appended.
    pub fn where_with(
        self,
        field: impl Into<String>,
        operator: &str,
        value: Option<Value>,
        connector: Connector,
    ) -> Result<Self> {
        let clause = OperatorNormalizer::normalize(field, operator, value, connector)?;
        Ok(self.add_clause(clause))
    }

    // ---- phrase match ----

    pub fn where_text(self, field: impl Into<String>, value: impl Into<Value>) -> Result<Self> {
        self.where_with(field, "text", non_null(value.into()), Connector::Must)
    }

    pub fn or_where_text(self, field: impl Into<String>, value: impl Into<Value>) -> Result<Self> {
        self.where_with(field, "text", non_null(value.into()), Connector::Should)
    }

    // ---- ranges ----

    /// `low <= field <= high`
    pub fn where_between(
        self,
        field: impl Into<String>,
        low: impl Into<Value>,
        high: impl Into<Value>,
    ) -> Self {
        self.where_between_with(field, low, high, Connector::Must)
    }

    pub fn or_where_between(
        self,
        field: impl Into<String>,
        low: impl Into<Value>,
        high: impl Into<Value>,
    ) -> Self {
        self.where_between_with(field, low, high, Connector::Should)
    }

    pub fn where_between_with(
        self,
        field: impl Into<String>,
        low: impl Into<Value>,
        high: impl Into<Value>,
        connector: Connector,
    ) -> Self {
        self.add_clause(Clause::new(
            ClauseKind::Range {
                field: field.into(),
                bounds: RangeBounds::between(low, high),
            },
            connector,
        ))
    }

    // ---- existence ----

    pub fn where_not_null(self, field: impl Into<String>) -> Self {
        self.where_not_null_with(field, Connector::Must)
    }

    pub fn where_not_null_with(self, field: impl Into<String>, connector: Connector) -> Self {
        self.add_clause(Clause::exists(field).with_connector(connector))
    }

    /// Field is missing or null
    pub fn where_null(self, field: impl Into<String>) -> Self {
        self.where_not_null_with(field, Connector::MustNot)
    }

    // ---- raw ----

    /// Add a prebuilt query node, used verbatim
    pub fn where_raw(self, query: impl QueryNode + 'static) -> Self {
        self.where_raw_with(query, Connector::Must)
    }

    pub fn or_where_raw(self, query: impl QueryNode + 'static) -> Self {
        self.where_raw_with(query, Connector::Should)
    }

    pub fn where_raw_with(self, query: impl QueryNode + 'static, connector: Connector) -> Self {
        self.add_clause(Clause::raw(Box::new(query)).with_connector(connector))
    }

    /// Add hand-written query DSL, used verbatim
    pub fn where_raw_json(self, query: Value) -> Self {
        self.where_raw(RawQuery::new(query))
    }

    pub fn or_where_raw_json(self, query: Value) -> Self {
        self.or_where_raw(RawQuery::new(query))
    }

    // ---- nested groups ----

    /// Group the clauses added by `group` into one sub-query
    ///
    /// `group` receives a fresh builder on the same target and scopes. If it
    /// adds no clauses, nothing is appended here.
    pub fn where_nested<F>(self, group: F) -> Self
    where
        F: FnOnce(SearchBuilder) -> SearchBuilder,
    {
        self.where_nested_with(group, Connector::Must)
    }

    pub fn or_where_nested<F>(self, group: F) -> Self
    where
        F: FnOnce(SearchBuilder) -> SearchBuilder,
    {
        self.where_nested_with(group, Connector::Should)
    }

    pub fn where_nested_with<F>(self, group: F, connector: Connector) -> Self
    where
        F: FnOnce(SearchBuilder) -> SearchBuilder,
    {
        let sub = group(self.new_search());
        self.absorb(sub, connector)
    }

    /// [`SearchBuilder::where_nested`] for groups built with fallible calls
    pub fn try_where_nested<F>(self, group: F) -> Result<Self>
    where
        F: FnOnce(SearchBuilder) -> Result<SearchBuilder>,
    {
        self.try_where_nested_with(group, Connector::Must)
    }

    pub fn try_where_nested_with<F>(self, group: F, connector: Connector) -> Result<Self>
    where
        F: FnOnce(SearchBuilder) -> Result<SearchBuilder>,
    {
        let sub = group(self.new_search())?;
        Ok(self.absorb(sub, connector))
    }

    fn absorb(self, sub: SearchBuilder, connector: Connector) -> Self {
        if sub.wheres.is_empty() {
            return self;
        }
        self.add_clause(Clause::nested(sub.wheres).with_connector(connector))
    }

    // ---- scopes ----

    /// Apply the named scope from the attached registry
    pub fn scope(self, name: &str, args: &[Value]) -> Result<Self> {
        let scopes = Arc::clone(&self.scopes);
        scopes.apply(name, self, args)
    }

    // ---- window ----

    /// Number of hits to skip; negative values clamp to zero
    pub fn offset(mut self, value: i64) -> Self {
        self.offset = Some(value.max(0) as u64);
        self
    }

    pub fn skip(self, value: i64) -> Self {
        self.offset(value)
    }

    /// Maximum number of hits; ignored unless positive
    pub fn limit(mut self, value: i64) -> Self {
        if value > 0 {
            self.limit = Some(value as u64);
        }
        self
    }

    pub fn take(self, value: i64) -> Self {
        self.limit(value)
    }

    /// Window for a 1-based page number
    pub fn for_page(self, page: i64, per_page: i64) -> Self {
        self.skip(page.saturating_sub(1).saturating_mul(per_page))
            .take(per_page)
    }

    // ---- ordering / scoring ----

    /// Sort by `field`; a case-insensitive `asc` sorts ascending, anything
    /// else descending
    pub fn order_by(mut self, field: impl Into<String>, direction: &str) -> Self {
        let field = field.into();
        if !direction.eq_ignore_ascii_case("asc") && !direction.eq_ignore_ascii_case("desc") {
            warn!(field = %field, direction, "unknown sort direction, sorting descending");
        }
        self.orders
            .push(SortField::new(field, SortDirection::parse_lenient(direction)));
        self
    }

    pub fn order_by_desc(self, field: impl Into<String>) -> Self {
        self.order_by(field, "desc")
    }

    /// Score hits with `script` instead of relevance; any sort is ignored
    pub fn set_script_score(mut self, script: ScoreScript) -> Self {
        self.script = Some(script);
        self
    }

    /// Score hits with an expression-language script
    pub fn order_by_script_score(self, expression: impl Into<String>) -> Self {
        self.set_script_score(ScoreScript::expression(expression))
    }

    // ---- compilation ----

    /// Compile the clause list; `None` when there are no clauses
    pub fn compile(&self) -> Option<Box<dyn QueryNode>> {
        QueryCompiler::compile(&self.wheres)
    }

    /// Assemble the request, returning the given source columns
    pub fn to_request(&self, columns: &[String]) -> SearchRequest {
        self.to_request_with_source(SourceFilter::Fields(columns.to_vec()))
    }

    /// Assemble the request with an explicit source projection
    pub fn to_request_with_source(&self, source: SourceFilter) -> SearchRequest {
        let compiled = self.compile();

        let (query, sort) = match &self.script {
            Some(script) => {
                let mut scored = FunctionScoreQuery::new(script.clone());
                if let Some(inner) = compiled {
                    scored = scored.with_query(inner);
                }
                let query: Box<dyn QueryNode> = Box::new(scored);
                (Some(query), Vec::new())
            }
            None => (compiled, self.orders.clone()),
        };

        let request = SearchRequest {
            query,
            sort,
            from: self.offset,
            size: self.limit,
            source,
        };
        debug!(index = %self.target, clauses = self.wheres.len(), "assembled search request");
        request
    }

    pub(crate) fn resolve_id(&self, hit: &Hit) -> String {
        match &self.id_resolver {
            Some(resolver) => resolver(hit),
            None => hit.id.clone(),
        }
    }
}

fn non_null(value: Value) -> Option<Value> {
    match value {
        Value::Null => None,
        v => Some(v),
    }
}

impl fmt::Debug for SearchBuilder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SearchBuilder")
            .field("target", &self.target)
            .field("scopes", &self.scopes)
            .field("wheres", &self.wheres)
            .field("orders", &self.orders)
            .field("script", &self.script)
            .field("limit", &self.limit)
            .field("offset", &self.offset)
            .field("id_resolver", &self.id_resolver.is_some())
            .field("per_page", &self.per_page)
            .field("page_name", &self.page_name)
            .field("columns", &self.columns)
            .finish()
    }
}
