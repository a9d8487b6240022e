//! Text sanitizers applied to incoming writes before validation.

use std::collections::HashSet;

/// Rewrites one free-text field.
pub trait Sanitizer: Send + Sync {
    fn sanitize_text(&self, input: &str) -> String;
}

/// Leaves text untouched.
#[derive(Debug, Clone, Copy, Default)]
pub struct PassThrough;

impl Sanitizer for PassThrough {
    fn sanitize_text(&self, input: &str) -> String {
        input.to_string()
    }
}

/// HTML sanitizer backed by `ammonia`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum HtmlSanitizer {
    /// Keep ammonia's safe tag set; drop scripts, styles and event handlers.
    #[default]
    SafeMarkup,
    /// Drop every tag and keep only text.
    PlainText,
}

impl Sanitizer for HtmlSanitizer {
    fn sanitize_text(&self, input: &str) -> String {
        match self {
            HtmlSanitizer::SafeMarkup => ammonia::clean(input),
            HtmlSanitizer::PlainText => ammonia::Builder::default()
                .tags(HashSet::<&str>::new())
                .clean(input)
                .to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_safe_markup_removes_scripts_and_handlers() {
        let out = HtmlSanitizer::SafeMarkup
            .sanitize_text(r#"<b onclick="steal()">Hi</b><script>alert(1)</script>"#);
        assert_eq!(out, "<b>Hi</b>");
    }

    #[test]
    fn test_plain_text_strips_all_tags() {
        let out = HtmlSanitizer::PlainText.sanitize_text("<p>Hello <em>world</em></p>");
        assert_eq!(out, "Hello world");
    }

    #[test]
    fn test_plain_input_is_unchanged() {
        for sanitizer in [HtmlSanitizer::SafeMarkup, HtmlSanitizer::PlainText] {
            assert_eq!(sanitizer.sanitize_text("Rust engineer"), "Rust engineer");
        }
        assert_eq!(PassThrough.sanitize_text("<b>x</b>"), "<b>x</b>");
    }
}
