//! The `ContentItem` trait and the `ContentSnapshot` tagged union.
//!
//! The store is generic over [`ContentItem`]; the ledger stores
//! [`ContentSnapshot`] values so one history log can hold every kind while
//! the compiler still checks exhaustiveness wherever a snapshot is taken
//! apart again.

use crate::{
    BlogPost, ContentId, ContentKind, Experience, Metadata, Project, Skill, SkillCategory,
    Timestamp, ValidationError,
};
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use std::fmt::Debug;

/// A storable content kind.
///
/// # Implementation Requirements
///
/// - `KIND` must be the same for every value of the type
/// - `into_snapshot` followed by `from_snapshot` yields the same value
/// - `sanitize_with` rewrites free-text fields only; ids, slugs, URLs and
///   dates are left alone
pub trait ContentItem:
    Clone + Debug + PartialEq + Serialize + DeserializeOwned + Send + Sync + 'static
{
    /// The kind discriminator for this type.
    const KIND: ContentKind;

    fn id(&self) -> &str;

    fn set_id(&mut self, id: ContentId);

    fn created_at(&self) -> Option<Timestamp>;

    fn updated_at(&self) -> Option<Timestamp>;

    /// Overwrite both server-owned timestamps.
    fn set_timestamps(&mut self, created_at: Timestamp, updated_at: Timestamp);

    /// Check the payload against the kind's schema.
    fn validate(&self) -> Result<(), ValidationError>;

    /// Apply a text transform to every free-text field.
    fn sanitize_with(&mut self, clean: &dyn Fn(&str) -> String);

    fn into_snapshot(self) -> ContentSnapshot;

    /// Recover the typed item, or `None` if the snapshot is another kind.
    fn from_snapshot(snapshot: ContentSnapshot) -> Option<Self>;
}

/// A full copy of one item's state, tagged with its kind.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "data", rename_all = "snake_case")]
pub enum ContentSnapshot {
    Project(Project),
    Skill(Skill),
    Experience(Experience),
    BlogPost(BlogPost),
    SkillCategory(SkillCategory),
    Metadata(Metadata),
}

impl ContentSnapshot {
    pub fn kind(&self) -> ContentKind {
        match self {
            ContentSnapshot::Project(_) => ContentKind::Project,
            ContentSnapshot::Skill(_) => ContentKind::Skill,
            ContentSnapshot::Experience(_) => ContentKind::Experience,
            ContentSnapshot::BlogPost(_) => ContentKind::BlogPost,
            ContentSnapshot::SkillCategory(_) => ContentKind::SkillCategory,
            ContentSnapshot::Metadata(_) => ContentKind::Metadata,
        }
    }

    pub fn id(&self) -> &str {
        match self {
            ContentSnapshot::Project(item) => item.id(),
            ContentSnapshot::Skill(item) => item.id(),
            ContentSnapshot::Experience(item) => item.id(),
            ContentSnapshot::BlogPost(item) => item.id(),
            ContentSnapshot::SkillCategory(item) => item.id(),
            ContentSnapshot::Metadata(item) => item.id(),
        }
    }

    pub fn updated_at(&self) -> Option<Timestamp> {
        match self {
            ContentSnapshot::Project(item) => item.updated_at(),
            ContentSnapshot::Skill(item) => item.updated_at(),
            ContentSnapshot::Experience(item) => item.updated_at(),
            ContentSnapshot::BlogPost(item) => item.updated_at(),
            ContentSnapshot::SkillCategory(item) => item.updated_at(),
            ContentSnapshot::Metadata(item) => item.updated_at(),
        }
    }

    /// Typed view of the snapshot.
    pub fn into_item<K: ContentItem>(self) -> Option<K> {
        K::from_snapshot(self)
    }
}

macro_rules! impl_content_item {
    ($ty:ident, $kind:ident) => {
        impl ContentItem for $ty {
            const KIND: ContentKind = ContentKind::$kind;

            fn id(&self) -> &str {
                &self.id
            }

            fn set_id(&mut self, id: ContentId) {
                self.id = id;
            }

            fn created_at(&self) -> Option<Timestamp> {
                self.created_at
            }

            fn updated_at(&self) -> Option<Timestamp> {
                self.updated_at
            }

            fn set_timestamps(&mut self, created_at: Timestamp, updated_at: Timestamp) {
                self.created_at = Some(created_at);
                self.updated_at = Some(updated_at);
            }

            fn validate(&self) -> Result<(), ValidationError> {
                self.check()
            }

            fn sanitize_with(&mut self, clean: &dyn Fn(&str) -> String) {
                self.clean_text(clean)
            }

            fn into_snapshot(self) -> ContentSnapshot {
                ContentSnapshot::$kind(self)
            }

            fn from_snapshot(snapshot: ContentSnapshot) -> Option<Self> {
                match snapshot {
                    ContentSnapshot::$kind(item) => Some(item),
                    _ => None,
                }
            }
        }
    };
}

impl_content_item!(Project, Project);
impl_content_item!(Skill, Skill);
impl_content_item!(Experience, Experience);
impl_content_item!(BlogPost, BlogPost);
impl_content_item!(SkillCategory, SkillCategory);
impl_content_item!(Metadata, Metadata);
