//! Folio Core - Content Types
//!
//! Content kinds, their schemas, version records, errors and configuration.
//! Every other folio crate depends on this one; it holds no state.

mod config;
mod entities;
mod error;
mod identity;
mod item;
mod kind;
mod validation;
mod version;

pub use config::{FolioConfig, DEFAULT_CACHE_TTL, DEFAULT_METADATA_ID};
pub use entities::{
    Author, BlogPost, Experience, Metadata, Project, ProjectLinks, Skill, SkillCategory,
    SocialLinks,
};
pub use error::{
    AccessError, ConfigError, FolioError, FolioResult, StorageError, ValidationError, Violation,
};
pub use identity::{new_content_id, new_record_id, ContentId, Timestamp, VersionNumber};
pub use item::{ContentItem, ContentSnapshot};
pub use kind::{ContentKind, ContentKindParseError};
pub use validation::Validator;
pub use version::{revert_message, VersionRecord, DELETED_MESSAGE};
