//! Portfolio content structures.
//!
//! `created_at` and `updated_at` are owned by the store: whatever a caller
//! puts there is overwritten on every write. They are `None` on drafts that
//! have never been stored.

use crate::{ContentId, ContentKind, Timestamp, ValidationError, Validator};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// External links of a project.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectLinks {
    pub github: Option<String>,
    pub live: Option<String>,
}

/// A showcased project.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    #[serde(default)]
    pub id: ContentId,
    pub title: String,
    pub description: String,
    pub category: String,
    #[serde(default)]
    pub tech: Vec<String>,
    #[serde(default)]
    pub highlights: Vec<String>,
    #[serde(default)]
    pub links: Option<ProjectLinks>,
    #[serde(default)]
    pub featured: Option<bool>,
    #[serde(default)]
    pub created_at: Option<Timestamp>,
    #[serde(default)]
    pub updated_at: Option<Timestamp>,
}

impl Project {
    /// Build a validated project with no tech, highlights or links.
    pub fn new(
        id: impl Into<ContentId>,
        title: impl Into<String>,
        description: impl Into<String>,
        category: impl Into<String>,
    ) -> Result<Self, ValidationError> {
        let project = Self {
            id: id.into(),
            title: title.into(),
            description: description.into(),
            category: category.into(),
            tech: Vec::new(),
            highlights: Vec::new(),
            links: None,
            featured: None,
            created_at: None,
            updated_at: None,
        };
        project.check()?;
        Ok(project)
    }

    pub(crate) fn check(&self) -> Result<(), ValidationError> {
        let mut v = Validator::new(ContentKind::Project);
        v.non_empty("title", &self.title)
            .non_empty("description", &self.description)
            .non_empty("category", &self.category)
            .each_non_empty("tech", &self.tech)
            .each_non_empty("highlights", &self.highlights);
        if let Some(links) = &self.links {
            v.http_url("links.github", links.github.as_deref())
                .http_url("links.live", links.live.as_deref());
        }
        v.finish()
    }

    pub(crate) fn clean_text(&mut self, clean: &dyn Fn(&str) -> String) {
        clean_string(&mut self.title, clean);
        clean_string(&mut self.description, clean);
        clean_string(&mut self.category, clean);
        clean_all(&mut self.tech, clean);
        clean_all(&mut self.highlights, clean);
    }
}

/// A skill with a self-assessed proficiency.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Skill {
    #[serde(default)]
    pub id: ContentId,
    pub name: String,
    /// Proficiency, 0 to 100 inclusive.
    pub level: i64,
    pub category: String,
    #[serde(default)]
    pub icon: Option<String>,
    #[serde(default)]
    pub years_of_experience: Option<f32>,
    #[serde(default)]
    pub created_at: Option<Timestamp>,
    #[serde(default)]
    pub updated_at: Option<Timestamp>,
}

impl Skill {
    pub fn new(
        id: impl Into<ContentId>,
        name: impl Into<String>,
        level: i64,
        category: impl Into<String>,
    ) -> Result<Self, ValidationError> {
        let skill = Self {
            id: id.into(),
            name: name.into(),
            level,
            category: category.into(),
            icon: None,
            years_of_experience: None,
            created_at: None,
            updated_at: None,
        };
        skill.check()?;
        Ok(skill)
    }

    pub(crate) fn check(&self) -> Result<(), ValidationError> {
        let mut v = Validator::new(ContentKind::Skill);
        v.non_empty("name", &self.name)
            .range("level", self.level, 0, 100)
            .non_empty("category", &self.category);
        if let Some(years) = self.years_of_experience {
            v.check(
                years.is_finite() && years >= 0.0,
                "yearsOfExperience",
                "must be a non-negative number",
            );
        }
        v.finish()
    }

    pub(crate) fn clean_text(&mut self, clean: &dyn Fn(&str) -> String) {
        clean_string(&mut self.name, clean);
        clean_string(&mut self.category, clean);
        clean_option(&mut self.icon, clean);
    }
}

/// A position held, past or current.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Experience {
    #[serde(default)]
    pub id: ContentId,
    pub company: String,
    pub role: String,
    #[serde(default)]
    pub location: Option<String>,
    pub start_date: NaiveDate,
    #[serde(default)]
    pub end_date: Option<NaiveDate>,
    #[serde(default)]
    pub current: bool,
    pub description: String,
    #[serde(default)]
    pub achievements: Vec<String>,
    #[serde(default)]
    pub tech: Vec<String>,
    #[serde(default)]
    pub created_at: Option<Timestamp>,
    #[serde(default)]
    pub updated_at: Option<Timestamp>,
}

impl Experience {
    /// Build a validated, current experience starting at `start_date`.
    pub fn new(
        id: impl Into<ContentId>,
        company: impl Into<String>,
        role: impl Into<String>,
        start_date: NaiveDate,
        description: impl Into<String>,
    ) -> Result<Self, ValidationError> {
        let experience = Self {
            id: id.into(),
            company: company.into(),
            role: role.into(),
            location: None,
            start_date,
            end_date: None,
            current: true,
            description: description.into(),
            achievements: Vec::new(),
            tech: Vec::new(),
            created_at: None,
            updated_at: None,
        };
        experience.check()?;
        Ok(experience)
    }

    pub(crate) fn check(&self) -> Result<(), ValidationError> {
        let mut v = Validator::new(ContentKind::Experience);
        v.non_empty("company", &self.company)
            .non_empty("role", &self.role)
            .non_empty("description", &self.description)
            .each_non_empty("achievements", &self.achievements)
            .each_non_empty("tech", &self.tech);
        if let Some(end) = self.end_date {
            v.check(end >= self.start_date, "endDate", "must not be before startDate")
                .check(!self.current, "endDate", "a current role has no end date");
        }
        v.finish()
    }

    pub(crate) fn clean_text(&mut self, clean: &dyn Fn(&str) -> String) {
        clean_string(&mut self.company, clean);
        clean_string(&mut self.role, clean);
        clean_option(&mut self.location, clean);
        clean_string(&mut self.description, clean);
        clean_all(&mut self.achievements, clean);
        clean_all(&mut self.tech, clean);
    }
}

/// Author byline of a blog post.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Author {
    pub name: String,
    #[serde(default)]
    pub avatar: Option<String>,
    #[serde(default)]
    pub bio: Option<String>,
}

/// A blog post.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BlogPost {
    #[serde(default)]
    pub id: ContentId,
    pub title: String,
    pub slug: String,
    #[serde(default)]
    pub excerpt: Option<String>,
    pub content: String,
    pub author: Author,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub published: bool,
    #[serde(default)]
    pub cover_image: Option<String>,
    #[serde(default)]
    pub reading_time_minutes: Option<u32>,
    #[serde(default)]
    pub created_at: Option<Timestamp>,
    #[serde(default)]
    pub updated_at: Option<Timestamp>,
}

impl BlogPost {
    /// Build a validated, unpublished post.
    pub fn new(
        id: impl Into<ContentId>,
        title: impl Into<String>,
        slug: impl Into<String>,
        content: impl Into<String>,
        author_name: impl Into<String>,
    ) -> Result<Self, ValidationError> {
        let post = Self {
            id: id.into(),
            title: title.into(),
            slug: slug.into(),
            excerpt: None,
            content: content.into(),
            author: Author {
                name: author_name.into(),
                avatar: None,
                bio: None,
            },
            tags: Vec::new(),
            published: false,
            cover_image: None,
            reading_time_minutes: None,
            created_at: None,
            updated_at: None,
        };
        post.check()?;
        Ok(post)
    }

    pub(crate) fn check(&self) -> Result<(), ValidationError> {
        let mut v = Validator::new(ContentKind::BlogPost);
        v.non_empty("title", &self.title)
            .slug("slug", &self.slug)
            .non_empty("content", &self.content)
            .non_empty("author.name", &self.author.name)
            .each_non_empty("tags", &self.tags)
            .http_url("coverImage", self.cover_image.as_deref());
        v.finish()
    }

    pub(crate) fn clean_text(&mut self, clean: &dyn Fn(&str) -> String) {
        clean_string(&mut self.title, clean);
        clean_option(&mut self.excerpt, clean);
        clean_string(&mut self.content, clean);
        clean_string(&mut self.author.name, clean);
        clean_option(&mut self.author.bio, clean);
        clean_all(&mut self.tags, clean);
    }
}

/// A named group of skills, ordered for display.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SkillCategory {
    #[serde(default)]
    pub id: ContentId,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub icon: Option<String>,
    #[serde(default)]
    pub order: i32,
    #[serde(default)]
    pub skill_ids: Vec<ContentId>,
    #[serde(default)]
    pub created_at: Option<Timestamp>,
    #[serde(default)]
    pub updated_at: Option<Timestamp>,
}

impl SkillCategory {
    pub fn new(id: impl Into<ContentId>, name: impl Into<String>) -> Result<Self, ValidationError> {
        let category = Self {
            id: id.into(),
            name: name.into(),
            description: None,
            icon: None,
            order: 0,
            skill_ids: Vec::new(),
            created_at: None,
            updated_at: None,
        };
        category.check()?;
        Ok(category)
    }

    pub(crate) fn check(&self) -> Result<(), ValidationError> {
        let mut v = Validator::new(ContentKind::SkillCategory);
        v.non_empty("name", &self.name)
            .range("order", i64::from(self.order), 0, i64::from(i32::MAX))
            .each_non_empty("skillIds", &self.skill_ids);
        v.finish()
    }

    pub(crate) fn clean_text(&mut self, clean: &dyn Fn(&str) -> String) {
        clean_string(&mut self.name, clean);
        clean_option(&mut self.description, clean);
        clean_option(&mut self.icon, clean);
    }
}

/// Social profile links shown in the site footer.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SocialLinks {
    pub github: Option<String>,
    pub linkedin: Option<String>,
    pub twitter: Option<String>,
    pub website: Option<String>,
}

/// Site-wide metadata. There is exactly one, stored under a fixed id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Metadata {
    #[serde(default)]
    pub id: ContentId,
    pub name: String,
    pub title: String,
    #[serde(default)]
    pub bio: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub resume_url: Option<String>,
    #[serde(default)]
    pub social: SocialLinks,
    #[serde(default)]
    pub created_at: Option<Timestamp>,
    #[serde(default)]
    pub updated_at: Option<Timestamp>,
}

impl Metadata {
    /// Build validated metadata. The id is assigned by the store.
    pub fn new(name: impl Into<String>, title: impl Into<String>) -> Result<Self, ValidationError> {
        let metadata = Self {
            id: ContentId::new(),
            name: name.into(),
            title: title.into(),
            bio: None,
            email: None,
            location: None,
            resume_url: None,
            social: SocialLinks::default(),
            created_at: None,
            updated_at: None,
        };
        metadata.check()?;
        Ok(metadata)
    }

    pub(crate) fn check(&self) -> Result<(), ValidationError> {
        let mut v = Validator::new(ContentKind::Metadata);
        v.non_empty("name", &self.name)
            .non_empty("title", &self.title)
            .email("email", self.email.as_deref())
            .http_url("resumeUrl", self.resume_url.as_deref())
            .http_url("social.github", self.social.github.as_deref())
            .http_url("social.linkedin", self.social.linkedin.as_deref())
            .http_url("social.twitter", self.social.twitter.as_deref())
            .http_url("social.website", self.social.website.as_deref());
        v.finish()
    }

    pub(crate) fn clean_text(&mut self, clean: &dyn Fn(&str) -> String) {
        clean_string(&mut self.name, clean);
        clean_string(&mut self.title, clean);
        clean_option(&mut self.bio, clean);
        clean_option(&mut self.location, clean);
    }
}

fn clean_string(value: &mut String, clean: &dyn Fn(&str) -> String) {
    *value = clean(value);
}

fn clean_option(value: &mut Option<String>, clean: &dyn Fn(&str) -> String) {
    if let Some(value) = value {
        clean_string(value, clean);
    }
}

fn clean_all(values: &mut [String], clean: &dyn Fn(&str) -> String) {
    for value in values {
        clean_string(value, clean);
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Violation;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_project_new_rejects_missing_fields() {
        let err = Project::new("p1", "", "desc", " ").unwrap_err();
        assert_eq!(err.kind, ContentKind::Project);
        assert!(err.has_field("title"));
        assert!(err.has_field("category"));
        assert!(!err.has_field("description"));
    }

    #[test]
    fn test_project_links_must_be_http() {
        let mut project = Project::new("p1", "Folio", "A CMS", "web").unwrap();
        project.links = Some(ProjectLinks {
            github: Some("ftp://github.com/x".to_string()),
            live: Some("https://folio.dev".to_string()),
        });
        let err = project.check().unwrap_err();
        assert!(err.has_field("links.github"));
        assert!(!err.has_field("links.live"));
    }

    #[test]
    fn test_skill_level_range() {
        assert!(Skill::new("s1", "Rust", 100, "languages").is_ok());
        let err = Skill::new("s1", "Rust", 150, "languages").unwrap_err();
        assert_eq!(
            err.violations,
            vec![Violation::OutOfRange {
                field: "level".to_string(),
                value: 150,
                min: 0,
                max: 100,
            }]
        );
    }

    #[test]
    fn test_skill_negative_years_rejected() {
        let mut skill = Skill::new("s1", "Rust", 80, "languages").unwrap();
        skill.years_of_experience = Some(-1.0);
        assert!(skill.check().unwrap_err().has_field("yearsOfExperience"));
    }

    #[test]
    fn test_experience_dates() {
        let mut exp =
            Experience::new("e1", "Acme", "Engineer", date(2020, 1, 1), "Built things").unwrap();
        exp.current = false;
        exp.end_date = Some(date(2019, 12, 31));
        assert!(exp.check().unwrap_err().has_field("endDate"));

        exp.end_date = Some(date(2022, 6, 30));
        assert!(exp.check().is_ok());

        exp.current = true;
        assert!(exp.check().is_err());
    }

    #[test]
    fn test_blog_post_requires_author_name_and_slug() {
        let err = BlogPost::new("b1", "Hello", "Hello World", "body", "").unwrap_err();
        assert!(err.has_field("slug"));
        assert!(err.has_field("author.name"));
        assert!(BlogPost::new("b1", "Hello", "hello-world", "body", "Ada").is_ok());
    }

    #[test]
    fn test_skill_category_order_non_negative() {
        let mut category = SkillCategory::new("c1", "Languages").unwrap();
        category.order = -3;
        assert!(category.check().unwrap_err().has_field("order"));
    }

    #[test]
    fn test_metadata_email_and_social() {
        let mut metadata = Metadata::new("Ada", "Engineer").unwrap();
        metadata.email = Some("ada@example.com".to_string());
        metadata.social.github = Some("https://github.com/ada".to_string());
        assert!(metadata.check().is_ok());

        metadata.email = Some("nope".to_string());
        metadata.social.twitter = Some("@ada".to_string());
        let err = metadata.check().unwrap_err();
        assert!(err.has_field("email"));
        assert!(err.has_field("social.twitter"));
    }

    #[test]
    fn test_project_json_uses_camel_case_and_defaults() {
        let json = r#"{"title":"Folio","description":"A CMS","category":"web","createdAt":null}"#;
        let project: Project = serde_json::from_str(json).unwrap();
        assert_eq!(project.id, "");
        assert!(project.tech.is_empty());
        assert!(project.created_at.is_none());

        let out = serde_json::to_value(&project).unwrap();
        assert!(out.get("updatedAt").is_some());
    }

    #[test]
    fn test_clean_text_touches_text_but_not_urls() {
        let mut project = Project::new("p1", "<b>Folio</b>", "A CMS", "web").unwrap();
        project.links = Some(ProjectLinks {
            github: Some("https://github.com/a?x=1&y=2".to_string()),
            live: None,
        });
        project.clean_text(&|s: &str| s.replace('<', "").replace('>', ""));
        assert_eq!(project.title, "bFolio/b");
        assert_eq!(
            project.links.unwrap().github.unwrap(),
            "https://github.com/a?x=1&y=2"
        );
    }
}
