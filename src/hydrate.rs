//! Hydration of hit identifiers into domain records

use crate::Result;
use std::collections::HashMap;
use tracing::debug;

/// Record store collaborator that resolves identifiers into records
pub trait RecordStore {
    type Record;

    /// Identifier of a record, comparable with hit ids
    fn record_id(&self, record: &Self::Record) -> String;

    /// Bulk lookup; records may come back in any order
    fn find_many(&self, ids: &[String], columns: &[String]) -> Result<Vec<Self::Record>>;

    /// Cache-first lookup
    ///
    /// `None` means the store has no cache path and `find_many` is used.
    fn find_from_cache(&self, _ids: &[String]) -> Option<Result<Vec<Self::Record>>> {
        None
    }
}

/// Resolves ranked ids into records in the same order
pub struct Hydrator;

impl Hydrator {
    /// Fetch records for `ids` and return them in `ids` order
    ///
    /// Records whose id is not in `ids` are dropped. Duplicate ids are not
    /// expected; if present, every copy sorts to the rank of its last
    /// occurrence.
    pub fn hydrate<S: RecordStore + ?Sized>(
        store: &S,
        ids: &[String],
        columns: &[String],
    ) -> Result<Vec<S::Record>> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        let records = match store.find_from_cache(ids) {
            Some(cached) => cached?,
            None => store.find_many(ids, columns)?,
        };

        let fetched = records.len();
        let ordered = Self::reorder(store, ids, records);
        debug!(requested = ids.len(), fetched, kept = ordered.len(), "hydrated records");
        Ok(ordered)
    }

    /// Stable reindex of `records` by each id's rank in `ids`
    pub fn reorder<S: RecordStore + ?Sized>(
        store: &S,
        ids: &[String],
        records: Vec<S::Record>,
    ) -> Vec<S::Record> {
        let rank: HashMap<&str, usize> = ids
            .iter()
            .enumerate()
            .map(|(i, id)| (id.as_str(), i))
            .collect();

        let mut ranked: Vec<(usize, S::Record)> = records
            .into_iter()
            .filter_map(|record| {
                let id = store.record_id(&record);
                rank.get(id.as_str()).map(|&r| (r, record))
            })
            .collect();

        ranked.sort_by_key(|(r, _)| *r);
        ranked.into_iter().map(|(_, record)| record).collect()
    }
}
