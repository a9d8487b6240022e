//! Folio Storage - Ledger, Content Store and Cache
//!
//! In-memory, volatile storage for portfolio content. Every write goes
//! through a [`ContentStore`], which validates, stamps and records a
//! version in the shared [`VersionLedger`] before the live collection
//! changes. [`PortfolioStore`] composes one collection per kind.
//! The [`TtlCache`] lives here too but is driven by the service layer.

pub mod cache;
mod ledger;
mod portfolio;
mod seed;
mod store;

pub use cache::{CacheEntry, CacheKey, CacheStats, TtlCache};
pub use ledger::VersionLedger;
pub use portfolio::{PortfolioStore, StoredKind};
pub use seed::SeedData;
pub use store::ContentStore;
