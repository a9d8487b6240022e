//! Folio Test Utilities
//!
//! Shared test infrastructure for the folio workspace:
//! - Proptest generators for every content kind
//! - Fixtures for common scenarios
//! - Assertions on folio results and errors

pub use folio_core::{
    Author, BlogPost, ContentItem, ContentKind, Experience, FolioConfig, FolioError, FolioResult,
    Metadata, Project, ProjectLinks, Skill, SkillCategory, SocialLinks, VersionRecord,
};

use chrono::NaiveDate;

// ============================================================================
// PROPTEST GENERATORS
// ============================================================================

pub mod generators {
    //! Proptest strategies that only produce schema-valid content.

    use super::*;
    use proptest::prelude::*;

    /// Non-blank display text.
    pub fn arb_text() -> impl Strategy<Value = String> {
        "[A-Za-z][A-Za-z0-9 ]{0,30}"
    }

    /// Ids as clients send them.
    pub fn arb_content_id() -> impl Strategy<Value = String> {
        "[a-z0-9]{1,12}"
    }

    pub fn arb_slug() -> impl Strategy<Value = String> {
        prop::collection::vec("[a-z0-9]{1,8}", 1..4).prop_map(|parts| parts.join("-"))
    }

    pub fn arb_content_kind() -> impl Strategy<Value = ContentKind> {
        prop::sample::select(ContentKind::ALL.to_vec())
    }

    pub fn arb_date() -> impl Strategy<Value = NaiveDate> {
        (2000i32..2030, 1u32..=12, 1u32..=28)
            .prop_filter_map("valid calendar date", |(y, m, d)| {
                NaiveDate::from_ymd_opt(y, m, d)
            })
    }

    pub fn arb_project() -> impl Strategy<Value = Project> {
        (
            arb_content_id(),
            arb_text(),
            arb_text(),
            arb_text(),
            prop::collection::vec(arb_text(), 0..4),
            any::<Option<bool>>(),
        )
            .prop_map(|(id, title, description, category, tech, featured)| Project {
                tech,
                featured,
                ..Project::new(id, title, description, category)
                    .expect("generated project is valid")
            })
    }

    /// Skills with any level, valid or not.
    pub fn arb_skill_with_level(level: impl Strategy<Value = i64>) -> impl Strategy<Value = Skill> {
        (arb_content_id(), arb_text(), arb_text(), level).prop_map(|(id, name, category, level)| {
            let mut skill =
                Skill::new(id, name, 50, category).expect("generated skill is valid");
            skill.level = level;
            skill
        })
    }

    pub fn arb_skill() -> impl Strategy<Value = Skill> {
        arb_skill_with_level(0i64..=100)
    }

    pub fn arb_experience() -> impl Strategy<Value = Experience> {
        (
            arb_content_id(),
            arb_text(),
            arb_text(),
            arb_date(),
            arb_text(),
            prop::option::of(0i64..2000),
        )
            .prop_map(|(id, company, role, start, description, ended_after)| {
                let mut experience = Experience::new(id, company, role, start, description)
                    .expect("generated experience is valid");
                if let Some(days) = ended_after {
                    experience.current = false;
                    experience.end_date = Some(start + chrono::Duration::days(days));
                }
                experience
            })
    }

    pub fn arb_blog_post() -> impl Strategy<Value = BlogPost> {
        (
            arb_content_id(),
            arb_text(),
            arb_slug(),
            arb_text(),
            arb_text(),
            any::<bool>(),
        )
            .prop_map(|(id, title, slug, content, author, published)| BlogPost {
                published,
                ..BlogPost::new(id, title, slug, content, author)
                    .expect("generated blog post is valid")
            })
    }

    pub fn arb_skill_category() -> impl Strategy<Value = SkillCategory> {
        (arb_content_id(), arb_text(), 0i32..50).prop_map(|(id, name, order)| SkillCategory {
            order,
            ..SkillCategory::new(id, name).expect("generated category is valid")
        })
    }

    pub fn arb_metadata() -> impl Strategy<Value = Metadata> {
        (arb_text(), arb_text(), prop::option::of("[a-z]{1,8}@[a-z]{1,8}\\.com"))
            .prop_map(|(name, title, email)| Metadata {
                email,
                ..Metadata::new(name, title).expect("generated metadata is valid")
            })
    }
}

// ============================================================================
// TEST FIXTURES
// ============================================================================

pub mod fixtures {
    //! Pre-built, valid content for common testing scenarios.

    use super::*;

    /// Config with rate limiting off, so tests can write freely.
    pub fn test_config() -> FolioConfig {
        FolioConfig::default().with_rate_limit(false)
    }

    pub fn sample_project(id: &str, title: &str) -> Project {
        let mut project = Project::new(id, title, "A portfolio project", "web")
            .expect("fixture project is valid");
        project.tech = vec!["rust".to_string()];
        project.links = Some(ProjectLinks {
            github: Some("https://github.com/example/folio".to_string()),
            live: None,
        });
        project
    }

    pub fn sample_skill(id: &str, level: i64) -> Skill {
        Skill::new(id, "Rust", level, "languages").expect("fixture skill is valid")
    }

    pub fn sample_experience(id: &str) -> Experience {
        let start = NaiveDate::from_ymd_opt(2021, 3, 1).expect("fixture date is valid");
        Experience::new(id, "Acme", "Engineer", start, "Built things")
            .expect("fixture experience is valid")
    }

    pub fn sample_blog_post(id: &str, slug: &str) -> BlogPost {
        let mut post = BlogPost::new(id, "Hello", slug, "First post.", "Ada")
            .expect("fixture blog post is valid");
        post.tags = vec!["intro".to_string()];
        post.published = true;
        post
    }

    pub fn sample_skill_category(id: &str, order: i32) -> SkillCategory {
        let mut category =
            SkillCategory::new(id, "Languages").expect("fixture category is valid");
        category.order = order;
        category
    }

    pub fn sample_metadata() -> Metadata {
        let mut metadata =
            Metadata::new("Ada Lovelace", "Engineer").expect("fixture metadata is valid");
        metadata.email = Some("ada@example.com".to_string());
        metadata.social = SocialLinks {
            github: Some("https://github.com/ada".to_string()),
            ..SocialLinks::default()
        };
        metadata
    }
}

// ============================================================================
// ASSERTIONS
// ============================================================================

pub mod assertions {
    //! Assertions for folio results.

    use super::*;

    #[track_caller]
    pub fn assert_validation_error<T: std::fmt::Debug>(result: &FolioResult<T>, field: &str) {
        match result {
            Err(FolioError::Validation(err)) => assert!(
                err.has_field(field),
                "Expected violation on {}, got: {}",
                field,
                err
            ),
            other => panic!("Expected Validation error, got: {:?}", other),
        }
    }

    #[track_caller]
    pub fn assert_unauthorized<T: std::fmt::Debug>(result: &FolioResult<T>) {
        match result {
            Err(FolioError::Access(folio_core::AccessError::Unauthorized { .. })) => {}
            other => panic!("Expected Unauthorized, got: {:?}", other),
        }
    }

    #[track_caller]
    pub fn assert_rate_limited<T: std::fmt::Debug>(result: &FolioResult<T>) {
        match result {
            Err(FolioError::Access(folio_core::AccessError::RateLimited { .. })) => {}
            other => panic!("Expected RateLimited, got: {:?}", other),
        }
    }

    /// Assert that `versions` (newest first) numbers `n..=1` without gaps.
    #[track_caller]
    pub fn assert_gapless_history(versions: &[VersionRecord]) {
        let numbers: Vec<u64> = versions.iter().map(|r| r.version).collect();
        let expected: Vec<u64> = (1..=versions.len() as u64).rev().collect();
        assert_eq!(numbers, expected, "Version history has gaps or repeats");
    }
}

// ============================================================================
// TESTS
// ============================================================================
