// src/models/policy.rs

use serde::Serialize;

/// Allow-list configuration for rich text coming from the CMS.
///
/// Anything not named here is dropped. There is exactly one instance,
/// [`POLICY`], compiled into the binary.
#[derive(Debug, Serialize)]
pub struct SanitizationPolicy {
    /// Elements that survive sanitization.
    pub allowed_tags: &'static [&'static str],

    /// Attributes kept on any allowed element.
    pub allowed_attributes: &'static [&'static str],

    /// Absolute URI schemes admitted in `href`/`src`. Relative URLs always pass.
    pub allowed_uri_schemes: &'static [&'static str],

    /// Elements removed together with everything inside them.
    /// Other disallowed elements are unwrapped and their content kept.
    pub clean_content_tags: &'static [&'static str],

    /// Attributes whose values are checked against `allowed_uri_schemes`.
    pub uri_attributes: &'static [&'static str],
}

pub static POLICY: SanitizationPolicy = SanitizationPolicy {
    allowed_tags: &[
        "p",
        "h1",
        "h2",
        "h3",
        "h4",
        "h5",
        "h6",
        "ul",
        "ol",
        "li",
        "strong",
        "em",
        "b",
        "i",
        "u",
        "a",
        "img",
        "br",
        "blockquote",
        "code",
        "pre",
        "table",
        "thead",
        "tbody",
        "tr",
        "th",
        "td",
        "div",
        "span",
    ],
    allowed_attributes: &[
        "href", "src", "alt", "class", "target", "rel", "title", "id", "style",
    ],
    allowed_uri_schemes: &[
        "http", "https", "mailto", "tel", "callto", "sms", "cid", "xmpp",
    ],
    clean_content_tags: &["script", "style"],
    uri_attributes: &["href", "src"],
};

impl SanitizationPolicy {
    pub fn allows_tag(&self, tag: &str) -> bool {
        self.allowed_tags.contains(&tag)
    }

    pub fn allows_attribute(&self, attribute: &str) -> bool {
        self.allowed_attributes.contains(&attribute)
    }

    pub fn is_uri_attribute(&self, attribute: &str) -> bool {
        self.uri_attributes.contains(&attribute)
    }
}
