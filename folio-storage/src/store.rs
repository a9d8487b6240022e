//! Generic per-kind content collection.
//!
//! A [`ContentStore<K>`] owns the live items of one kind and writes every
//! mutation through the shared [`VersionLedger`]. The collection write lock
//! is held across validate-stamp-append-replace, so two writes to the same
//! id cannot interleave and the ledger order always matches the order in
//! which the collection changed.

use std::sync::{Arc, RwLock};

use chrono::Utc;
use folio_core::{
    new_content_id, ContentItem, FolioResult, StorageError, Validator, VersionRecord,
    DELETED_MESSAGE,
};
use tracing::{info, warn};

use crate::VersionLedger;

/// Live items of one content kind, in insertion order.
#[derive(Debug)]
pub struct ContentStore<K: ContentItem> {
    items: RwLock<Vec<K>>,
    ledger: Arc<VersionLedger>,
}

impl<K: ContentItem> ContentStore<K> {
    /// Create an empty collection writing history to `ledger`.
    pub fn new(ledger: Arc<VersionLedger>) -> Self {
        Self {
            items: RwLock::new(Vec::new()),
            ledger,
        }
    }

    /// Load initial items without recording history.
    ///
    /// Seeded items are validated and get timestamps if they have none.
    /// The first write to a seeded id becomes its version 1.
    pub fn seed(&self, seed: Vec<K>) -> FolioResult<()> {
        let mut items = self
            .items
            .write()
            .map_err(|_| StorageError::LockPoisoned("collection write"))?;

        for mut item in seed {
            item.validate()?;
            if item.id().is_empty() {
                item.set_id(new_content_id());
            }
            let mut v = Validator::new(K::KIND);
            v.check(
                !items.iter().any(|existing| existing.id() == item.id()),
                "id",
                "duplicate id in seed data",
            );
            v.finish()?;

            let now = Utc::now();
            let created_at = item.created_at().unwrap_or(now);
            let updated_at = item.updated_at().unwrap_or(created_at);
            item.set_timestamps(created_at, updated_at);
            items.push(item);
        }
        Ok(())
    }

    /// All live items, in insertion order.
    pub fn list(&self) -> FolioResult<Vec<K>> {
        let items = self
            .items
            .read()
            .map_err(|_| StorageError::LockPoisoned("collection read"))?;
        Ok(items.clone())
    }

    pub fn get_by_id(&self, id: &str) -> FolioResult<Option<K>> {
        let items = self
            .items
            .read()
            .map_err(|_| StorageError::LockPoisoned("collection read"))?;
        Ok(items.iter().find(|item| item.id() == id).cloned())
    }

    /// Create or replace an item, recording a new version.
    pub fn upsert(&self, item: K, author: &str) -> FolioResult<K> {
        self.upsert_with_message(item, author, None).map(|(item, _)| item)
    }

    /// Create or replace an item with a note on the version record.
    ///
    /// Rejects the write before touching anything if the item is invalid.
    /// `created_at` is kept from the existing item; both caller-supplied
    /// timestamps are ignored.
    pub fn upsert_with_message(
        &self,
        mut item: K,
        author: &str,
        message: Option<String>,
    ) -> FolioResult<(K, VersionRecord)> {
        if let Err(err) = item.validate() {
            warn!(kind = %K::KIND, id = item.id(), error = %err, "Rejected invalid write");
            return Err(err.into());
        }

        let mut items = self
            .items
            .write()
            .map_err(|_| StorageError::LockPoisoned("collection write"))?;

        if item.id().is_empty() {
            item.set_id(new_content_id());
        }

        let now = Utc::now();
        let position = items.iter().position(|existing| existing.id() == item.id());
        let created_at = position
            .and_then(|pos| items[pos].created_at())
            .unwrap_or(now);
        item.set_timestamps(created_at, now);

        let record = self.ledger.append(
            K::KIND,
            item.id(),
            item.clone().into_snapshot(),
            author,
            message,
        )?;

        match position {
            Some(pos) => items[pos] = item.clone(),
            None => items.push(item.clone()),
        }

        info!(
            kind = %K::KIND,
            id = item.id(),
            version = record.version,
            created = position.is_none(),
            "Committed write"
        );
        Ok((item, record))
    }

    /// Remove an item, leaving a tombstone in its history.
    ///
    /// Returns `false` if there was nothing to delete.
    pub fn delete(&self, id: &str, author: &str) -> FolioResult<bool> {
        let mut items = self
            .items
            .write()
            .map_err(|_| StorageError::LockPoisoned("collection write"))?;

        let Some(pos) = items.iter().position(|item| item.id() == id) else {
            return Ok(false);
        };

        let record = self.ledger.append(
            K::KIND,
            id,
            items[pos].clone().into_snapshot(),
            author,
            Some(DELETED_MESSAGE.to_string()),
        )?;
        items.remove(pos);

        info!(kind = %K::KIND, id, version = record.version, "Deleted item");
        Ok(true)
    }

    /// Number of live items.
    pub fn len(&self) -> FolioResult<usize> {
        let items = self
            .items
            .read()
            .map_err(|_| StorageError::LockPoisoned("collection read"))?;

        Ok(items.len())
    }

    pub fn is_empty(&self) -> FolioResult<bool> {
        self.len().map(|len| len == 0)
    }
}

// ============================================================================
// TESTS
// ============================================================================
