//! Content kind discriminator.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The fixed set of content categories held by the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContentKind {
    Project,
    Skill,
    Experience,
    BlogPost,
    SkillCategory,
    /// Site-wide singleton, not a collection.
    Metadata,
}

impl ContentKind {
    /// All kinds, in display order.
    pub const ALL: [ContentKind; 6] = [
        ContentKind::Project,
        ContentKind::Skill,
        ContentKind::Experience,
        ContentKind::BlogPost,
        ContentKind::SkillCategory,
        ContentKind::Metadata,
    ];

    /// Stable string form, used in cache keys and logs.
    pub fn as_str(&self) -> &'static str {
        match self {
            ContentKind::Project => "project",
            ContentKind::Skill => "skill",
            ContentKind::Experience => "experience",
            ContentKind::BlogPost => "blog_post",
            ContentKind::SkillCategory => "skill_category",
            ContentKind::Metadata => "metadata",
        }
    }

    /// Whether the kind is a collection (everything except metadata).
    pub fn is_collection(&self) -> bool {
        !matches!(self, ContentKind::Metadata)
    }
}

impl fmt::Display for ContentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error when parsing an unknown content kind string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContentKindParseError(pub String);

impl fmt::Display for ContentKindParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Invalid content kind: {}", self.0)
    }
}

impl std::error::Error for ContentKindParseError {}

impl FromStr for ContentKind {
    type Err = ContentKindParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().replace('-', "_").as_str() {
            "project" | "projects" => Ok(ContentKind::Project),
            "skill" | "skills" => Ok(ContentKind::Skill),
            "experience" | "experiences" => Ok(ContentKind::Experience),
            "blog_post" | "blog_posts" | "blogpost" => Ok(ContentKind::BlogPost),
            "skill_category" | "skill_categories" => Ok(ContentKind::SkillCategory),
            "metadata" => Ok(ContentKind::Metadata),
            _ => Err(ContentKindParseError(s.to_string())),
        }
    }
}
