// src/models/content.rs

use std::fmt;

use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::utils::html::{excerpt, plain_text, sanitize};

/// SEO meta-description length.
pub const EXCERPT_MAX_CHARS: usize = 160;

/// Rich text that has passed the sanitization boundary.
///
/// The only constructor runs [`sanitize`], so holding a `SafeContent` means
/// the markup is safe to inject into the DOM as-is.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct SafeContent(String);

impl SafeContent {
    pub fn new(raw: &str) -> Self {
        Self(sanitize(raw))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_inner(self) -> String {
        self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for SafeContent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for SafeContent {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// CMS collections whose bodies are rendered on the site.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContentKind {
    Service,
    Project,
    Testimonial,
    BlogPost,
    CaseStudy,
}

/// DTO for rendering a CMS document (preview or final page).
#[derive(Debug, Deserialize, Validate)]
pub struct RenderRequest {
    pub kind: ContentKind,

    #[validate(
        length(
            min = 1,
            max = 200,
            message = "Title length must be between 1 and 200 chars"
        ),
        custom(function = validate_title_text)
    )]
    pub title: String,

    /// Untrusted rich text.
    pub body: String,

    /// Author-supplied summary. Derived from the body when absent.
    #[validate(length(max = 500, message = "Excerpt must be at most 500 chars"))]
    pub excerpt: Option<String>,
}

/// Rejects titles that are empty once markup is stripped, e.g. `<script>x</script>`.
fn validate_title_text(title: &str) -> Result<(), validator::ValidationError> {
    if plain_text(title).trim().is_empty() {
        return Err(validator::ValidationError::new("title_has_no_text"));
    }
    Ok(())
}

/// A document ready for the page template.
#[derive(Debug, Serialize)]
pub struct RenderedDocument {
    pub kind: ContentKind,

    /// Escaped plain text; markup in titles is never rendered.
    pub title: String,

    pub body: SafeContent,

    /// Escaped plain text suitable for `<meta name="description">`.
    pub excerpt: String,

    pub rendered_at: chrono::DateTime<chrono::Utc>,
}

impl RenderedDocument {
    pub fn render(request: &RenderRequest) -> Self {
        let body = SafeContent::new(&request.body);
        let excerpt = match request.excerpt.as_deref() {
            Some(summary) if !summary.trim().is_empty() => excerpt(summary, EXCERPT_MAX_CHARS),
            _ => excerpt(body.as_str(), EXCERPT_MAX_CHARS),
        };

        Self {
            kind: request.kind,
            title: plain_text(&request.title).trim().to_string(),
            body,
            excerpt,
            rendered_at: chrono::Utc::now(),
        }
    }
}

/// DTO for sanitizing a single fragment.
#[derive(Debug, Deserialize)]
pub struct SanitizeRequest {
    pub content: String,
}

/// DTO for sanitizing several fragments in one call.
#[derive(Debug, Deserialize)]
pub struct BatchSanitizeRequest {
    pub items: Vec<String>,
}

#[derive(Debug, Serialize)]
pub struct SanitizeResponse {
    pub content: SafeContent,

    /// Whether the boundary changed anything.
    pub modified: bool,
}

impl SanitizeResponse {
    pub fn from_raw(raw: &str) -> Self {
        let content = SafeContent::new(raw);
        let modified = content.as_str() != raw;
        Self { content, modified }
    }
}

#[derive(Debug, Serialize)]
pub struct BatchSanitizeResponse {
    pub items: Vec<SanitizeResponse>,
}
