// tests/sanitize_properties.rs

use content_sanitizer::models::policy::POLICY;
use content_sanitizer::utils::html::is_allowed_uri;
use content_sanitizer::{SafeContent, sanitize};
use regex::Regex;

/// Hostile and malformed inputs collected from common XSS cheat sheets plus
/// typical CMS output.
const CORPUS: &[&str] = &[
    "",
    "plain text",
    "<p>Hello <strong>world</strong></p>",
    "<script>alert(1)</script>",
    "<img src=x onerror=alert(1)>",
    "<a href=\"javascript:alert(1)\">x</a>",
    "<a href=\"  JAVASCRIPT:alert(1)\">x</a>",
    "<a href=\"jav&#x0A;ascript:alert(1)\">x</a>",
    "<a href=\"data:text/html;base64,PHNjcmlwdD4=\">x</a>",
    "<a href=\"vbscript:msgbox(1)\">x</a>",
    "<svg onload=alert(1)><circle r=1></svg>",
    "<math><mi xlink:href=\"javascript:alert(1)\">x</mi></math>",
    "<iframe src=\"https://evil.example\"></iframe>after",
    "<object data=\"x.swf\"></object><embed src=\"x.swf\">",
    "<form action=\"javascript:alert(1)\"><input type=submit></form>",
    "<div style=\"background:url(javascript:alert(1))\" id=\"hero\">x</div>",
    "<body onload=alert(1)>",
    "<p>unclosed <b>bold <i>italic",
    "</p></div>stray closers",
    "<<script>script>alert(1)<</script>/script>",
    "<scr<script>ipt>alert(1)</script>",
    "<!-- <script>alert(1)</script> -->visible",
    "<![CDATA[<script>alert(1)</script>]]>",
    "<table><tr><td onclick=x>cell</td></tr></table>",
    "<ul><li><a href=\"/services/roofing\" target=\"_blank\" rel=\"noopener\">Roofing</a></li></ul>",
    "<blockquote class=\"quote\" title=\"Client\">Great work</blockquote>",
    "<pre><code>fn main() { println!(\"&lt;hi&gt;\"); }</code></pre>",
    "<img src=\"https://cdn.example.com/a.jpg\" alt=\"Deck\" width=\"10\">",
    "<a href=\"mailto:office@example.com\">mail</a> <a href=\"tel:+15550100\">call</a>",
    "<h1>a</h1><h2>b</h2><h3>c</h3><h4>d</h4><h5>e</h5><h6>f</h6>",
    "<noscript><p title=\"</noscript><img src=x onerror=alert(1)>\"></noscript>",
    "<style>@import 'evil.css';</style><p>styled</p>",
    "<base href=\"https://evil.example/\"><a href=\"x\">x</a>",
    "<meta http-equiv=\"refresh\" content=\"0;url=javascript:alert(1)\">",
    "<details open ontoggle=alert(1)>",
    "&lt;script&gt;alert(1)&lt;/script&gt;",
    "<span>\u{0}null</span>",
    "<table><caption>Schedule</caption><tr><td>Framing</td></tr></table>",
    "<table><tr><th>Phase</th></tr><tfoot><tr><td>Total</td></tr></tfoot></table>",
    "<table><tfoot><tr><td>x</td></tr></tfoot></table>",
    "<table><colgroup><col span=2></colgroup><tr><td>a</td><td>b</td></tr></table>",
    "<table><caption>c</caption><colgroup><col></colgroup><thead><tr><th>h</th></tr></thead><tfoot><tr><td>f</td></tr></tfoot><tbody><tr><td>b</td></tr></tbody></table>",
    "<pre>\n\nx</pre>",
    "<pre id=\"snippet\">\n\n\n  indented</pre>",
];

struct Tag {
    name: String,
    attributes: Vec<(String, String)>,
}

/// Scans serialized output. Text never contains a raw `<`, and attribute
/// values are always double-quoted, so this is exact for sanitizer output.
fn tags(html: &str) -> Vec<Tag> {
    let tag_re = Regex::new(r#"<(/?)([a-zA-Z0-9]+)((?:\s+[^\s=>/]+(?:="[^"]*")?)*)\s*/?>"#).unwrap();
    let attr_re = Regex::new(r#"([^\s=>/]+)(?:="([^"]*)")?"#).unwrap();

    tag_re
        .captures_iter(html)
        .map(|caps| Tag {
            name: caps[2].to_string(),
            attributes: attr_re
                .captures_iter(&caps[3])
                .map(|a| {
                    (
                        a[1].to_string(),
                        a.get(2).map_or(String::new(), |v| v.as_str().to_string()),
                    )
                })
                .collect(),
        })
        .collect()
}

fn unescape(value: &str) -> String {
    value
        .replace("&quot;", "\"")
        .replace("&nbsp;", "\u{a0}")
        .replace("&amp;", "&")
}

#[test]
fn only_allowed_elements_remain() {
    for input in CORPUS {
        let output = sanitize(input);
        for tag in tags(&output) {
            assert!(
                POLICY.allows_tag(&tag.name),
                "<{}> survived in {:?} -> {:?}",
                tag.name,
                input,
                output
            );
        }
    }
}

#[test]
fn only_allowed_attributes_remain() {
    for input in CORPUS {
        let output = sanitize(input);
        for tag in tags(&output) {
            for (name, _) in &tag.attributes {
                assert!(
                    POLICY.allows_attribute(name),
                    "attribute {} survived in {:?} -> {:?}",
                    name,
                    input,
                    output
                );
            }
        }
    }
}

#[test]
fn uri_attributes_match_allowed_schemes() {
    for input in CORPUS {
        let output = sanitize(input);
        for tag in tags(&output) {
            for (name, value) in &tag.attributes {
                if POLICY.is_uri_attribute(name) {
                    let value = unescape(value);
                    assert!(
                        is_allowed_uri(&value),
                        "{}={:?} survived in {:?}",
                        name,
                        value,
                        input
                    );
                    assert!(!value.to_ascii_lowercase().contains("javascript:"));
                }
            }
        }
    }
}

#[test]
fn no_script_text_leaks_from_script_elements() {
    let output = sanitize("<p>before</p><script>document.cookie</script><p>after</p>");
    assert_eq!(output, "<p>before</p><p>after</p>");
}

#[test]
fn sanitize_is_idempotent_over_corpus() {
    for input in CORPUS {
        let once = sanitize(input);
        let twice = sanitize(&once);
        assert_eq!(once, twice, "not idempotent for {:?}", input);
    }
}

#[test]
fn safe_content_matches_sanitize() {
    for input in CORPUS {
        assert_eq!(SafeContent::new(input).as_str(), sanitize(input));
    }
}

#[test]
fn concurrent_callers_share_the_policy() {
    let handles: Vec<_> = (0..8)
        .map(|i| {
            std::thread::spawn(move || {
                let input = CORPUS[i % CORPUS.len()];
                (input, sanitize(input))
            })
        })
        .collect();

    for handle in handles {
        let (input, output) = handle.join().unwrap();
        assert_eq!(output, sanitize(input));
    }
}
