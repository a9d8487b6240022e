//! Initial store state.

use folio_core::{BlogPost, Experience, Metadata, Project, Skill, SkillCategory};
use serde::{Deserialize, Serialize};

/// Content a [`crate::PortfolioStore`] starts with, or a capture of its live state.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SeedData {
    pub projects: Vec<Project>,
    pub skills: Vec<Skill>,
    pub experiences: Vec<Experience>,
    pub blog_posts: Vec<BlogPost>,
    pub skill_categories: Vec<SkillCategory>,
    pub metadata: Option<Metadata>,
}

impl SeedData {
    /// Parse seed data from JSON. Missing collections default to empty.
    pub fn from_json_str(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }

    pub fn to_json_string(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }

    /// Total number of items, counting metadata as one.
    pub fn item_count(&self) -> usize {
        self.projects.len()
            + self.skills.len()
            + self.experiences.len()
            + self.blog_posts.len()
            + self.skill_categories.len()
            + usize::from(self.metadata.is_some())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_json_defaults_missing_collections() {
        let json = r#"{
            "skills": [{"id": "s1", "name": "Rust", "level": 90, "category": "languages"}],
            "metadata": {"name": "Ada", "title": "Engineer"}
        }"#;
        let seed = SeedData::from_json_str(json).unwrap();
        assert!(seed.projects.is_empty());
        assert_eq!(seed.skills[0].level, 90);
        assert_eq!(seed.item_count(), 2);
    }

    #[test]
    fn test_json_roundtrip() {
        let seed = SeedData {
            projects: vec![Project::new("p1", "Folio", "A CMS", "web").unwrap()],
            ..Default::default()
        };
        let json = seed.to_json_string().unwrap();
        assert!(json.contains("\"blogPosts\""));
        assert_eq!(SeedData::from_json_str(&json).unwrap(), seed);
    }
}
