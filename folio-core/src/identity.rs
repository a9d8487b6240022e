//! Identity types for folio content

use chrono::{DateTime, Utc};
use uuid::Uuid;

/// Content identifier. Unique within its kind, immutable after creation.
pub type ContentId = String;

/// Timestamp type using UTC timezone.
pub type Timestamp = DateTime<Utc>;

/// Version number inside one item's history. The first write is version 1.
pub type VersionNumber = u64;

/// Generate a new content id (UUIDv7, so ids sort by creation time).
pub fn new_content_id() -> ContentId {
    Uuid::now_v7().to_string()
}

/// Generate a new id for a version record.
pub fn new_record_id() -> Uuid {
    Uuid::now_v7()
}
