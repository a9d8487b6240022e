//! Version records kept by the ledger.

use crate::{ContentId, ContentKind, ContentSnapshot, Timestamp, VersionNumber};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Message recorded on deletion tombstones.
pub const DELETED_MESSAGE: &str = "Deleted";

/// Message recorded when a revert is written.
pub fn revert_message(version: VersionNumber) -> String {
    format!("Reverted to version {}", version)
}

/// One immutable entry in an item's history.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VersionRecord {
    /// Id of the record itself.
    pub id: Uuid,
    pub content_id: ContentId,
    pub content_type: ContentKind,
    /// Full state of the item as written, including its post-write `updatedAt`.
    pub data: ContentSnapshot,
    pub version: VersionNumber,
    pub author: String,
    pub created_at: Timestamp,
    pub message: Option<String>,
}

impl VersionRecord {
    /// Whether this record marks a deletion.
    pub fn is_tombstone(&self) -> bool {
        self.message.as_deref() == Some(DELETED_MESSAGE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{new_record_id, ContentItem, Project};

    #[test]
    fn test_tombstone_detection() {
        let project = Project::new("p1", "Folio", "A CMS", "web").unwrap();
        let mut record = VersionRecord {
            id: new_record_id(),
            content_id: "p1".to_string(),
            content_type: ContentKind::Project,
            data: project.into_snapshot(),
            version: 3,
            author: "admin".to_string(),
            created_at: chrono::Utc::now(),
            message: Some(DELETED_MESSAGE.to_string()),
        };
        assert!(record.is_tombstone());

        record.message = Some(revert_message(1));
        assert!(!record.is_tombstone());
        assert_eq!(record.message.as_deref(), Some("Reverted to version 1"));
    }
}
