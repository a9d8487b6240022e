//! Cache keys for content reads.

use std::fmt;

use folio_core::{ContentId, ContentKind};

/// What a cached value was read from.
///
/// Keys always carry their kind, so a project and a skill that happen to
/// share an id can never collide.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum CacheKey {
    /// One item, by id.
    Item { kind: ContentKind, id: ContentId },
    /// Every live item of a kind.
    Collection(ContentKind),
}

impl CacheKey {
    pub fn item(kind: ContentKind, id: impl Into<ContentId>) -> Self {
        CacheKey::Item {
            kind,
            id: id.into(),
        }
    }

    pub fn collection(kind: ContentKind) -> Self {
        CacheKey::Collection(kind)
    }

    pub fn kind(&self) -> ContentKind {
        match self {
            CacheKey::Item { kind, .. } | CacheKey::Collection(kind) => *kind,
        }
    }

    /// Keys a write to `id` of `kind` can make stale.
    pub fn affected_by_write(kind: ContentKind, id: &str) -> [CacheKey; 2] {
        [CacheKey::item(kind, id), CacheKey::Collection(kind)]
    }
}

impl fmt::Display for CacheKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CacheKey::Item { kind, id } => write!(f, "{}:{}", kind, id),
            CacheKey::Collection(kind) => write!(f, "{}:*", kind),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display() {
        assert_eq!(
            CacheKey::item(ContentKind::BlogPost, "b1").to_string(),
            "blog_post:b1"
        );
        assert_eq!(CacheKey::collection(ContentKind::Skill).to_string(), "skill:*");
    }

    #[test]
    fn test_same_id_different_kind_differs() {
        assert_ne!(
            CacheKey::item(ContentKind::Project, "x"),
            CacheKey::item(ContentKind::Skill, "x")
        );
    }

    #[test]
    fn test_affected_by_write() {
        let keys = CacheKey::affected_by_write(ContentKind::Project, "p1");
        assert!(keys.contains(&CacheKey::item(ContentKind::Project, "p1")));
        assert!(keys.contains(&CacheKey::Collection(ContentKind::Project)));
        assert!(keys.iter().all(|k| k.kind() == ContentKind::Project));
    }
}
