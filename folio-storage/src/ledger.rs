//! Append-only version ledger.
//!
//! Every successful create, update, delete and revert appends one
//! [`VersionRecord`]. Records are never edited or removed. Version numbers
//! are per `(kind, content id)`, start at 1 and have no gaps; computing the
//! next number and appending happen under the same write lock.

use std::collections::HashMap;
use std::sync::RwLock;

use chrono::Utc;
use folio_core::{
    new_record_id, ContentId, ContentKind, ContentSnapshot, FolioResult, StorageError,
    VersionNumber, VersionRecord,
};

type HistoryKey = (ContentKind, ContentId);

#[derive(Debug, Default)]
struct LedgerInner {
    /// All records in append order.
    records: Vec<VersionRecord>,
    /// Positions into `records` per item, ascending by version.
    index: HashMap<HistoryKey, Vec<usize>>,
}

/// In-memory version history for every content item.
#[derive(Debug, Default)]
pub struct VersionLedger {
    inner: RwLock<LedgerInner>,
}

impl VersionLedger {
    /// Create an empty ledger.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a snapshot as the next version of `content_id`.
    ///
    /// The snapshot is owned by the ledger from here on, so later changes to
    /// the caller's copy of the item cannot reach it.
    ///
    /// # Panics
    ///
    /// Panics if `data` is a snapshot of another kind than `content_type`,
    /// which would corrupt the per-kind history.
    pub fn append(
        &self,
        content_type: ContentKind,
        content_id: &str,
        data: ContentSnapshot,
        author: &str,
        message: Option<String>,
    ) -> FolioResult<VersionRecord> {
        assert_eq!(
            data.kind(),
            content_type,
            "snapshot kind does not match ledger kind for {}",
            content_id
        );

        let mut inner = self
            .inner
            .write()
            .map_err(|_| StorageError::LockPoisoned("ledger write"))?;

        let key = (content_type, content_id.to_string());
        let next_version = inner
            .index
            .get(&key)
            .and_then(|positions| positions.last())
            .map(|&pos| inner.records[pos].version + 1)
            .unwrap_or(1);

        let record = VersionRecord {
            id: new_record_id(),
            content_id: content_id.to_string(),
            content_type,
            data,
            version: next_version,
            author: author.to_string(),
            created_at: Utc::now(),
            message,
        };

        let position = inner.records.len();
        inner.records.push(record.clone());
        inner.index.entry(key).or_default().push(position);

        Ok(record)
    }

    /// All versions of an item, newest first.
    pub fn list_versions(
        &self,
        content_type: ContentKind,
        content_id: &str,
    ) -> FolioResult<Vec<VersionRecord>> {
        let inner = self
            .inner
            .read()
            .map_err(|_| StorageError::LockPoisoned("ledger read"))?;

        let key = (content_type, content_id.to_string());
        Ok(inner
            .index
            .get(&key)
            .map(|positions| {
                positions
                    .iter()
                    .rev()
                    .map(|&pos| inner.records[pos].clone())
                    .collect()
            })
            .unwrap_or_default())
    }

    /// Exact lookup of one version.
    pub fn get_version(
        &self,
        content_type: ContentKind,
        content_id: &str,
        version: VersionNumber,
    ) -> FolioResult<Option<VersionRecord>> {
        let inner = self
            .inner
            .read()
            .map_err(|_| StorageError::LockPoisoned("ledger read"))?;

        // Versions are gapless from 1, so the version doubles as an index.
        let key = (content_type, content_id.to_string());
        Ok(inner.index.get(&key).and_then(|positions| {
            let slot = usize::try_from(version).ok()?.checked_sub(1)?;
            positions.get(slot).map(|&pos| inner.records[pos].clone())
        }))
    }

    /// Latest version number recorded for an item.
    pub fn latest_version(
        &self,
        content_type: ContentKind,
        content_id: &str,
    ) -> FolioResult<Option<VersionNumber>> {
        let inner = self
            .inner
            .read()
            .map_err(|_| StorageError::LockPoisoned("ledger read"))?;

        let key = (content_type, content_id.to_string());
        Ok(inner
            .index
            .get(&key)
            .and_then(|positions| positions.last())
            .map(|&pos| inner.records[pos].version))
    }

    /// The most recent records across all content, newest first.
    pub fn recent(&self, limit: usize) -> FolioResult<Vec<VersionRecord>> {
        let inner = self
            .inner
            .read()
            .map_err(|_| StorageError::LockPoisoned("ledger read"))?;

        Ok(inner.records.iter().rev().take(limit).cloned().collect())
    }

    /// Total number of records.
    pub fn len(&self) -> FolioResult<usize> {
        let inner = self
            .inner
            .read()
            .map_err(|_| StorageError::LockPoisoned("ledger read"))?;

        Ok(inner.records.len())
    }

    pub fn is_empty(&self) -> FolioResult<bool> {
        self.len().map(|len| len == 0)
    }
}

// ============================================================================
// TESTS
// ============================================================================


// ============================================================================
// PROPERTY-BASED TESTS
// ============================================================================

#[cfg(test)]
mod prop_tests {
    use super::*;
    use folio_core::{ContentItem, Project};
    use proptest::prelude::*;

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(64))]

        /// N appends to one item yield versions 1..=N in call order.
        #[test]
        fn prop_versions_are_gapless(titles in prop::collection::vec("[A-Za-z]{1,12}", 1..30)) {
            let ledger = VersionLedger::new();
            for (i, title) in titles.iter().enumerate() {
                let snapshot = Project::new("p1", title.as_str(), "desc", "web")
                    .unwrap()
                    .into_snapshot();
                let record = ledger
                    .append(ContentKind::Project, "p1", snapshot, "admin", None)
                    .unwrap();
                prop_assert_eq!(record.version, i as u64 + 1);
            }

            for (i, title) in titles.iter().enumerate() {
                let record = ledger
                    .get_version(ContentKind::Project, "p1", i as u64 + 1)
                    .unwrap()
                    .unwrap();
                let project = record.data.into_item::<Project>().unwrap();
                prop_assert_eq!(&project.title, title);
            }
        }
    }
}
