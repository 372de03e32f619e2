//! In-memory implementation of the URL store.

use async_trait::async_trait;
use dashmap::DashMap;
use dashmap::mapref::entry::Entry;
use std::sync::atomic::{AtomicI64, Ordering};

use crate::domain::entities::{NewShortUrl, ShortUrl};
use crate::domain::repositories::{StoreError, UrlStore};

/// `DashMap`-backed store with the same contract as [`super::PgUrlStore`].
///
/// Ids are assigned sequentially starting at 1. Nothing survives a restart,
/// so this is meant for tests and local experiments.
#[derive(Debug)]
pub struct InMemoryUrlStore {
    records: DashMap<String, ShortUrl>,
    next_id: AtomicI64,
}

impl InMemoryUrlStore {
    pub fn new() -> Self {
        Self {
            records: DashMap::new(),
            next_id: AtomicI64::new(1),
        }
    }

    /// Number of stored records.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

impl Default for InMemoryUrlStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl UrlStore for InMemoryUrlStore {
    async fn save(&self, new_url: NewShortUrl) -> Result<ShortUrl, StoreError> {
        // The entry guard holds the shard lock, so check-and-insert is atomic.
        match self.records.entry(new_url.code.clone()) {
            Entry::Occupied(_) => Err(StoreError::DuplicateCode(new_url.code)),
            Entry::Vacant(slot) => {
                let id = self.next_id.fetch_add(1, Ordering::Relaxed);
                let stored = new_url.into_stored(id);
                slot.insert(stored.clone());
                Ok(stored)
            }
        }
    }

    async fn get(&self, code: &str) -> Result<String, StoreError> {
        self.records
            .get(code)
            .map(|record| record.original_url.clone())
            .ok_or_else(|| StoreError::NotFound(code.to_string()))
    }

    async fn ping(&self) -> Result<(), StoreError> {
        Ok(())
    }
}
