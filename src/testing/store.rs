//! In-memory record store
//!
//! Returns records in storage order (never hit order) so hydration tests
//! exercise the reordering. The optional cache path answers in reverse
//! storage order.

use crate::error::BuilderError;
use crate::hydrate::RecordStore;
use crate::Result;
use parking_lot::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

type KeyFn<R> = Box<dyn Fn(&R) -> String + Send + Sync>;

/// Record store double backed by a `Vec`
pub struct MemoryRecordStore<R> {
    records: Vec<R>,
    key: KeyFn<R>,
    cache_enabled: bool,
    failure: Option<String>,
    bulk_lookups: AtomicUsize,
    cache_lookups: AtomicUsize,
    last_columns: Mutex<Vec<String>>,
}

impl<R: Clone> MemoryRecordStore<R> {
    /// `key` extracts the identifier hits refer to
    pub fn new<F>(key: F) -> Self
    where
        F: Fn(&R) -> String + Send + Sync + 'static,
    {
        Self {
            records: Vec::new(),
            key: Box::new(key),
            cache_enabled: false,
            failure: None,
            bulk_lookups: AtomicUsize::new(0),
            cache_lookups: AtomicUsize::new(0),
            last_columns: Mutex::new(Vec::new()),
        }
    }

    pub fn with_records(mut self, records: Vec<R>) -> Self {
        self.records = records;
        self
    }

    /// Serve lookups from the cache path instead of bulk lookups
    pub fn with_cache(mut self) -> Self {
        self.cache_enabled = true;
        self
    }

    /// Fail every lookup with a record store error
    pub fn failing(mut self, message: impl Into<String>) -> Self {
        self.failure = Some(message.into());
        self
    }

    pub fn bulk_lookups(&self) -> usize {
        self.bulk_lookups.load(Ordering::SeqCst)
    }

    pub fn cache_lookups(&self) -> usize {
        self.cache_lookups.load(Ordering::SeqCst)
    }

    /// Columns passed to the most recent bulk lookup
    pub fn last_columns(&self) -> Vec<String> {
        self.last_columns.lock().clone()
    }

    fn matching(&self, ids: &[String]) -> Result<Vec<R>> {
        if let Some(message) = &self.failure {
            return Err(BuilderError::RecordStore(message.clone()));
        }
        Ok(self
            .records
            .iter()
            .filter(|record| ids.contains(&(self.key)(record)))
            .cloned()
            .collect())
    }
}

impl<R: Clone> RecordStore for MemoryRecordStore<R> {
    type Record = R;

    fn record_id(&self, record: &R) -> String {
        (self.key)(record)
    }

    fn find_many(&self, ids: &[String], columns: &[String]) -> Result<Vec<R>> {
        self.bulk_lookups.fetch_add(1, Ordering::SeqCst);
        *self.last_columns.lock() = columns.to_vec();
        self.matching(ids)
    }

    fn find_from_cache(&self, ids: &[String]) -> Option<Result<Vec<R>>> {
        if !self.cache_enabled {
            return None;
        }
        self.cache_lookups.fetch_add(1, Ordering::SeqCst);
        Some(self.matching(ids).map(|mut records| {
            records.reverse();
            records
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ids(raw: &[&str]) -> Vec<String> {
        raw.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_find_many_uses_storage_order() {
        let store = MemoryRecordStore::new(|n: &u32| n.to_string()).with_records(vec![1, 2, 3]);
        let found = store
            .find_many(&ids(&["3", "1"]), &["name".to_string()])
            .unwrap();
        assert_eq!(found, vec![1, 3]);
        assert_eq!(store.bulk_lookups(), 1);
        assert_eq!(store.last_columns(), vec!["name".to_string()]);
        assert!(store.find_from_cache(&ids(&["1"])).is_none());
    }

    #[test]
    fn test_cache_path() {
        let store = MemoryRecordStore::new(|n: &u32| n.to_string())
            .with_records(vec![1, 2, 3])
            .with_cache();
        let found = store.find_from_cache(&ids(&["1", "3"])).unwrap().unwrap();
        assert_eq!(found, vec![3, 1]);
        assert_eq!(store.cache_lookups(), 1);
    }

    #[test]
    fn test_failing_store() {
        let store = MemoryRecordStore::new(|n: &u32| n.to_string()).failing("db down");
        assert!(matches!(
            store.find_many(&ids(&["1"]), &[]),
            Err(BuilderError::RecordStore(_))
        ));
    }
}
