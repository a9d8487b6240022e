//! In-process TTL cache for read-through content access.
//!
//! Expiry only bounds staleness. Correctness comes from invalidation: every
//! write through the service drops the item key and the collection key of
//! the kind it touched, so a read after a write never sees the old value.
//!
//! # Example
//!
//! ```
//! use std::time::Duration;
//! use folio_core::ContentKind;
//! use folio_storage::{CacheKey, TtlCache};
//!
//! let cache: TtlCache<CacheKey, String> = TtlCache::new(Duration::from_secs(300));
//! let key = CacheKey::item(ContentKind::Project, "p1");
//!
//! let value = cache.get_or_load(key.clone(), None, || "loaded".to_string());
//! assert_eq!(value, "loaded");
//! assert!(cache.delete(&key));
//! ```

mod entry;
mod key;
mod ttl_cache;

pub use entry::CacheEntry;
pub use key::CacheKey;
pub use ttl_cache::{CacheStats, TtlCache};
