//! Folio Service - Content Facade
//!
//! [`ContentService`] is what an HTTP or RPC layer talks to. It serves
//! reads from a TTL cache over the [`folio_storage::PortfolioStore`] and
//! runs every write through the authorization, rate-limit and sanitizer
//! hooks before the store sees it.
//!
//! # Example
//!
//! ```
//! use folio_core::{FolioConfig, Project};
//! use folio_service::{ContentService, TokenAuthorizer, WriteContext};
//!
//! let service = ContentService::builder(FolioConfig::default())
//!     .authorizer(TokenAuthorizer::new(["s3cret"]))
//!     .build()
//!     .unwrap();
//!
//! let ctx = WriteContext::new("s3cret", "admin-ui");
//! let project = Project::new("p1", "Folio", "Versioned CMS", "web").unwrap();
//! service.upsert(&ctx, project).unwrap();
//!
//! assert_eq!(service.get::<Project>("p1").unwrap().unwrap().title, "Folio");
//! ```

mod context;
mod gates;
mod sanitize;
mod service;
pub mod telemetry;

pub use context::WriteContext;
pub use gates::{AllowAll, Authorizer, KeyedRateLimiter, RequestLimiter, TokenAuthorizer};
pub use sanitize::{HtmlSanitizer, PassThrough, Sanitizer};
pub use service::{CachedContent, ContentService, ContentServiceBuilder};
pub use telemetry::{init_tracing, TelemetryConfig};
