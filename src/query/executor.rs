//! Query execution through a search transport
//!
//! These methods assemble the request, hand it to the transport and, when a
//! record store is given, hydrate the hits into records in rank order.
//!
//! An empty column list means the builder's default columns (`["*"]` unless
//! set from settings). Pagination without an explicit page size uses the
//! builder's page size.

use crate::client::SearchTransport;
use crate::error::BuilderError;
use crate::hydrate::{Hydrator, RecordStore};
use crate::models::{Collection, Hit, ResultPage};
use crate::pagination::Paginator;
use crate::query::builder::SearchBuilder;
use crate::query::request::{SearchRequest, SourceFilter};
use crate::Result;
use tracing::debug;

impl SearchBuilder {
    /// Run the search and return raw hits
    pub fn get(&self, transport: &dyn SearchTransport, columns: &[String]) -> Result<ResultPage> {
        let body = self.to_request(self.effective_columns(columns)).to_json();
        debug!(index = %self.target(), body = %body, "executing search");
        transport.search(self.target(), &body)
    }

    /// First hit, if any; the builder's own limit is left untouched
    pub fn first(
        &self,
        transport: &dyn SearchTransport,
        columns: &[String],
    ) -> Result<Option<Hit>> {
        let page = self.clone().take(1).get(transport, columns)?;
        Ok(page.hits.into_iter().next())
    }

    /// Number of matching documents
    ///
    /// Only the compiled clauses are sent; sort, window and score script are
    /// left out.
    pub fn count(&self, transport: &dyn SearchTransport) -> Result<u64> {
        let request = SearchRequest {
            query: self.compile(),
            ..Default::default()
        };
        let body = request.count_json();
        debug!(index = %self.target(), body = %body, "executing count");
        transport.count(self.target(), &body)
    }

    /// One page of raw hits
    ///
    /// `per_page` of `None` uses the builder's page size; a size that is not
    /// positive is rejected.
    pub fn paginate(
        &self,
        transport: &dyn SearchTransport,
        per_page: Option<i64>,
        page: i64,
        columns: &[String],
    ) -> Result<Paginator<Hit>> {
        let per_page = self.page_size(per_page)?;
        let results = self.clone().for_page(page, per_page).get(transport, columns)?;
        Ok(self.paginator(results.hits, results.total_hits, per_page, page))
    }

    /// Run the search and hydrate hits into records, in hit order
    pub fn get_records<S: RecordStore>(
        &self,
        transport: &dyn SearchTransport,
        store: &S,
        columns: &[String],
    ) -> Result<Collection<S::Record>> {
        let results = self.search_ids_only(transport)?;
        let records = self.hydrate_hits(store, &results, columns)?;
        Ok(Collection::new(records, results.total_hits))
    }

    /// Record behind the first hit, if any
    pub fn first_record<S: RecordStore>(
        &self,
        transport: &dyn SearchTransport,
        store: &S,
        columns: &[String],
    ) -> Result<Option<S::Record>> {
        let results = self.clone().take(1).search_ids_only(transport)?;
        let records = self.hydrate_hits(store, &results, columns)?;
        Ok(records.into_iter().next())
    }

    /// One page of hydrated records
    pub fn paginate_records<S: RecordStore>(
        &self,
        transport: &dyn SearchTransport,
        store: &S,
        per_page: Option<i64>,
        page: i64,
        columns: &[String],
    ) -> Result<Paginator<S::Record>> {
        let per_page = self.page_size(per_page)?;
        let results = self
            .clone()
            .for_page(page, per_page)
            .search_ids_only(transport)?;
        let records = self.hydrate_hits(store, &results, columns)?;
        Ok(self.paginator(records, results.total_hits, per_page, page))
    }

    fn page_size(&self, per_page: Option<i64>) -> Result<i64> {
        let per_page = per_page.unwrap_or_else(|| self.per_page());
        if per_page <= 0 {
            return Err(BuilderError::InvalidArgument(format!(
                "per_page must be positive, got {}",
                per_page
            )));
        }
        Ok(per_page)
    }

    fn paginator<T>(&self, items: Vec<T>, total: u64, per_page: i64, page: i64) -> Paginator<T> {
        Paginator::new(items, total, per_page as u64, page.max(1) as u64)
            .with_page_name(self.page_name())
    }

    fn effective_columns<'a>(&'a self, columns: &'a [String]) -> &'a [String] {
        if columns.is_empty() {
            self.columns()
        } else {
            columns
        }
    }

    fn search_ids_only(&self, transport: &dyn SearchTransport) -> Result<ResultPage> {
        let body = self.to_request_with_source(SourceFilter::Disabled).to_json();
        debug!(index = %self.target(), body = %body, "executing search for hydration");
        transport.search(self.target(), &body)
    }

    fn hydrate_hits<S: RecordStore>(
        &self,
        store: &S,
        results: &ResultPage,
        columns: &[String],
    ) -> Result<Vec<S::Record>> {
        let ids: Vec<String> = results.hits.iter().map(|hit| self.resolve_id(hit)).collect();
        Hydrator::hydrate(store, &ids, self.effective_columns(columns))
    }
}
