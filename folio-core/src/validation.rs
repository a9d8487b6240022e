//! Schema validation helpers.
//!
//! Each content kind validates itself by feeding its fields through a
//! [`Validator`], which collects every violated constraint and turns them
//! into a single [`ValidationError`] at the end.

use crate::{ContentKind, ValidationError, Violation};
use once_cell::sync::Lazy;
use regex::Regex;
use url::Url;

static SLUG_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[a-z0-9]+(?:-[a-z0-9]+)*$").expect("slug regex is valid"));

static EMAIL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").expect("email regex is valid"));

/// Collects schema violations for one payload.
///
/// # Example
/// ```
/// use folio_core::{ContentKind, Validator};
///
/// let mut v = Validator::new(ContentKind::Skill);
/// v.non_empty("name", "Rust");
/// v.range("level", 150, 0, 100);
/// let err = v.finish().unwrap_err();
/// assert!(err.has_field("level"));
/// ```
#[derive(Debug)]
pub struct Validator {
    kind: ContentKind,
    violations: Vec<Violation>,
}

impl Validator {
    pub fn new(kind: ContentKind) -> Self {
        Self {
            kind,
            violations: Vec::new(),
        }
    }

    /// Require a non-blank string.
    pub fn non_empty(&mut self, field: &str, value: &str) -> &mut Self {
        if value.trim().is_empty() {
            self.violations.push(Violation::RequiredFieldMissing {
                field: field.to_string(),
            });
        }
        self
    }

    /// Require every entry of a list to be non-blank.
    pub fn each_non_empty(&mut self, field: &str, values: &[String]) -> &mut Self {
        for (i, value) in values.iter().enumerate() {
            if value.trim().is_empty() {
                self.violations.push(Violation::InvalidValue {
                    field: format!("{}[{}]", field, i),
                    reason: "must not be blank".to_string(),
                });
            }
        }
        self
    }

    /// Require an integer inside an inclusive range.
    pub fn range(&mut self, field: &str, value: i64, min: i64, max: i64) -> &mut Self {
        if value < min || value > max {
            self.violations.push(Violation::OutOfRange {
                field: field.to_string(),
                value,
                min,
                max,
            });
        }
        self
    }

    /// Require an absolute http(s) URL when a value is present.
    pub fn http_url(&mut self, field: &str, value: Option<&str>) -> &mut Self {
        let Some(value) = value else {
            return self;
        };
        let ok = Url::parse(value)
            .map(|u| matches!(u.scheme(), "http" | "https") && u.host_str().is_some())
            .unwrap_or(false);
        if !ok {
            self.invalid(field, "must be an absolute http(s) URL");
        }
        self
    }

    /// Require a plausible email address when a value is present.
    pub fn email(&mut self, field: &str, value: Option<&str>) -> &mut Self {
        if let Some(value) = value {
            if !EMAIL_RE.is_match(value) {
                self.invalid(field, "must be an email address");
            }
        }
        self
    }

    /// Require a lowercase kebab-case slug. Blank slugs are reported as missing.
    pub fn slug(&mut self, field: &str, value: &str) -> &mut Self {
        if value.trim().is_empty() {
            return self.non_empty(field, value);
        }
        if !SLUG_RE.is_match(value) {
            self.invalid(field, "must be lowercase letters, digits and single hyphens");
        }
        self
    }

    /// Record a violation unless `ok` holds.
    pub fn check(&mut self, ok: bool, field: &str, reason: &str) -> &mut Self {
        if !ok {
            self.invalid(field, reason);
        }
        self
    }

    fn invalid(&mut self, field: &str, reason: &str) {
        self.violations.push(Violation::InvalidValue {
            field: field.to_string(),
            reason: reason.to_string(),
        });
    }

    /// Ok if nothing was violated, otherwise every violation at once.
    pub fn finish(self) -> Result<(), ValidationError> {
        if self.violations.is_empty() {
            Ok(())
        } else {
            Err(ValidationError {
                kind: self.kind,
                violations: self.violations,
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_validator_passes() {
        assert!(Validator::new(ContentKind::Project).finish().is_ok());
    }

    #[test]
    fn test_blank_strings_are_missing() {
        let mut v = Validator::new(ContentKind::Project);
        v.non_empty("title", "   ").non_empty("category", "web");
        let err = v.finish().unwrap_err();
        assert_eq!(
            err.violations,
            vec![Violation::RequiredFieldMissing {
                field: "title".to_string()
            }]
        );
    }

    #[test]
    fn test_each_non_empty_names_the_index() {
        let mut v = Validator::new(ContentKind::Project);
        v.each_non_empty("tech", &["rust".to_string(), "".to_string()]);
        let err = v.finish().unwrap_err();
        assert!(err.has_field("tech[1]"));
    }

    #[test]
    fn test_range_bounds_are_inclusive() {
        let mut v = Validator::new(ContentKind::Skill);
        v.range("level", 0, 0, 100).range("level", 100, 0, 100);
        assert!(v.finish().is_ok());

        let mut v = Validator::new(ContentKind::Skill);
        v.range("level", -1, 0, 100);
        assert!(v.finish().is_err());
    }

    #[test]
    fn test_http_url() {
        let mut v = Validator::new(ContentKind::Project);
        v.http_url("links.github", Some("https://github.com/folio"))
            .http_url("links.live", None);
        assert!(v.finish().is_ok());

        let mut v = Validator::new(ContentKind::Project);
        v.http_url("links.github", Some("javascript:alert(1)"))
            .http_url("links.live", Some("not a url"));
        let err = v.finish().unwrap_err();
        assert_eq!(err.violations.len(), 2);
    }

    #[test]
    fn test_email() {
        let mut v = Validator::new(ContentKind::Metadata);
        v.email("email", Some("me@example.com"));
        assert!(v.finish().is_ok());

        let mut v = Validator::new(ContentKind::Metadata);
        v.email("email", Some("me-at-example"));
        assert!(v.finish().unwrap_err().has_field("email"));
    }

    #[test]
    fn test_slug() {
        let mut v = Validator::new(ContentKind::BlogPost);
        v.slug("slug", "hello-world-2");
        assert!(v.finish().is_ok());

        for bad in ["Hello", "hello--world", "-hello", "hello world"] {
            let mut v = Validator::new(ContentKind::BlogPost);
            v.slug("slug", bad);
            assert!(v.finish().is_err(), "{bad} should be rejected");
        }

        let mut v = Validator::new(ContentKind::BlogPost);
        v.slug("slug", "");
        let err = v.finish().unwrap_err();
        assert!(matches!(
            err.violations[0],
            Violation::RequiredFieldMissing { .. }
        ));
    }
}
