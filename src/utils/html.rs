// src/utils/html.rs

use std::borrow::Cow;
use std::collections::{HashMap, HashSet};
use std::sync::LazyLock;

use ammonia::{Builder, UrlRelative};
use regex::Regex;

use crate::models::policy::{POLICY, SanitizationPolicy};

/// Sanitizer built from [`POLICY`] on first use and shared by every caller.
static SANITIZER: LazyLock<Builder<'static>> = LazyLock::new(|| build_sanitizer(&POLICY));

/// Strips every tag; used for titles and excerpts.
static TEXT_EXTRACTOR: LazyLock<Builder<'static>> = LazyLock::new(|| {
    let mut builder = Builder::default();
    builder
        .tags(HashSet::new())
        .clean_content_tags(POLICY.clean_content_tags.iter().copied().collect());
    builder
});

/// Admits an allowed scheme, anything starting with a non-letter, or a
/// leading run of scheme characters that is not followed by `:`.
static URI_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    let schemes = POLICY
        .allowed_uri_schemes
        .iter()
        .map(|s| regex::escape(s))
        .collect::<Vec<_>>()
        .join("|");
    Regex::new(&format!(
        r"(?i)^(?:(?:{schemes}):|[^a-z]|[a-z][a-z0-9+.\-]*(?:[^a-z0-9+.\-:]|$))"
    ))
    .expect("URI allow-list pattern must compile")
});

/// Ends of block-level elements; text on either side belongs to separate words.
static BLOCK_BREAK: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)</(?:p|h[1-6]|li|div|blockquote|pre|td|th|tr)\s*>|<br\s*/?>")
        .expect("block break pattern must compile")
});

/// A whole start tag in serialized output plus an optional newline after it.
/// Text never holds a raw `<`, so matches cannot begin inside attribute values.
static START_TAG: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"<([a-z0-9]+)(?:\s+[^\s=>/]+(?:="[^"]*")?)*\s*/?>\n?"#)
        .expect("start tag pattern must compile")
});

/// Upper bound on re-cleaning passes. Table repairs settle within two.
const MAX_PASSES: usize = 8;

fn build_sanitizer(policy: &'static SanitizationPolicy) -> Builder<'static> {
    let mut builder = Builder::default();
    builder
        .tags(policy.allowed_tags.iter().copied().collect())
        .tag_attributes(HashMap::new())
        .generic_attributes(policy.allowed_attributes.iter().copied().collect())
        .url_schemes(policy.allowed_uri_schemes.iter().copied().collect())
        .url_relative(UrlRelative::PassThrough)
        // `rel` is author-controlled here, so ammonia must not manage it.
        .link_rel(None)
        .clean_content_tags(policy.clean_content_tags.iter().copied().collect())
        .strip_comments(true)
        .attribute_filter(filter_uri_attribute);
    builder
}

fn filter_uri_attribute<'u>(
    _element: &str,
    attribute: &str,
    value: &'u str,
) -> Option<Cow<'u, str>> {
    if POLICY.is_uri_attribute(attribute) && !is_allowed_uri(value) {
        return None;
    }
    Some(Cow::Borrowed(value))
}

/// Characters browsers ignore inside URI attribute values.
fn is_uri_whitespace(c: char) -> bool {
    matches!(
        c,
        '\u{0000}'..='\u{0020}'
            | '\u{00A0}'
            | '\u{1680}'
            | '\u{180E}'
            | '\u{2000}'..='\u{2029}'
            | '\u{205F}'
            | '\u{3000}'
    )
}

/// Returns `true` when `value` may be used as an `href`/`src`.
///
/// Whitespace and control characters are ignored before matching, so
/// `"java\tscript:"` is treated as `"javascript:"`. The empty value is a
/// same-document reference and is allowed.
pub fn is_allowed_uri(value: &str) -> bool {
    let compact: String = value.chars().filter(|c| !is_uri_whitespace(*c)).collect();
    compact.is_empty() || URI_PATTERN.is_match(&compact)
}

/// Clean CMS-authored rich text so it can be injected into a page.
///
/// Allow-list based: only the tags and attributes in [`POLICY`] survive.
///
/// Note:
/// 1. `<script>` and `<style>` are removed with their entire content. Any
///    other disallowed tag is unwrapped and its allowed children are kept.
/// 2. `href`/`src` values with a scheme outside the policy are dropped;
///    the element itself stays.
/// 3. Never fails, and running it on its own output changes nothing.
pub fn sanitize(raw: &str) -> String {
    if raw.is_empty() {
        return String::new();
    }

    // Removing table parts such as `caption` or `tfoot` can leave a tree the
    // parser reshapes on the next read, so clean until the output is stable.
    let mut current = clean_once(raw);
    for _ in 1..MAX_PASSES {
        let next = clean_once(&current);
        if next == current {
            break;
        }
        current = next;
    }
    current
}

fn clean_once(html: &str) -> String {
    let cleaned = SANITIZER.clean(html).to_string();
    // The parser drops one newline right after `<pre>` and the serializer
    // does not write it back, so restore it.
    START_TAG
        .replace_all(&cleaned, |caps: &regex::Captures| {
            let tag = &caps[0];
            if &caps[1] == "pre" && tag.ends_with('\n') {
                format!("{tag}\n")
            } else {
                tag.to_string()
            }
        })
        .into_owned()
}

/// Reduce markup to HTML-escaped text.
pub fn plain_text(raw: &str) -> String {
    TEXT_EXTRACTOR.clean(raw).to_string()
}

/// Plain text with whitespace collapsed, cut to `max_chars` on a word
/// boundary. A trailing `…` marks truncation.
///
/// The result stays HTML-escaped; truncation never splits an entity.
pub fn excerpt(raw: &str, max_chars: usize) -> String {
    let spaced = BLOCK_BREAK.replace_all(raw, "$0 ");
    let text = plain_text(&spaced)
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ");

    if text.chars().count() <= max_chars {
        return text;
    }

    let cut = text
        .char_indices()
        // Leave room for the ellipsis.
        .nth(max_chars.saturating_sub(1))
        .map(|(idx, _)| idx)
        .unwrap_or(text.len());
    let mut head = &text[..cut];

    if let Some(space) = head.rfind(' ') {
        head = &head[..space];
    } else if let Some(amp) = head.rfind('&') {
        // Entities contain no spaces, so only a spaceless head can end mid-entity.
        if !head[amp..].contains(';') {
            head = &head[..amp];
        }
    }

    format!("{}…", head.trim_end())
}
