//! Escaping of untrusted text for HTML and CSS output.

use std::sync::LazyLock;

use regex::Regex;
use sha2::{Digest, Sha256};

/// Escape HTML special characters including single quotes for XSS prevention.
///
/// Safe for both text nodes and quoted attribute values.
pub fn escape_html(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#x27;"),
            _ => out.push(c),
        }
    }
    out
}

static UNSAFE_CSS_RE: LazyLock<Regex> = LazyLock::new(|| {
    // Anything that could end a declaration, a rule, or the enclosing <style>
    Regex::new(r"[{};<>\\]|/\*|\*/|[\x00-\x1f\x7f]").expect("Invalid unsafe css regex")
});

static WHITESPACE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[ \t\n\x0C\r]+").expect("Invalid whitespace regex"));

/// ASCII whitespace as HTML and CSS define it.
///
/// Other Unicode spaces such as U+00A0 are content and must survive unchanged.
pub fn is_html_whitespace(c: char) -> bool {
    matches!(c, ' ' | '\t' | '\n' | '\x0C' | '\r')
}

/// Make a user supplied CSS value safe to place after `property:`.
///
/// The value is otherwise passed through unchanged; no attempt is made to check
/// that it is a meaningful color or shadow. Returns `fallback` when nothing is left.
pub fn css_value(value: &str, fallback: &str) -> String {
    let stripped = UNSAFE_CSS_RE.replace_all(value, " ");
    let collapsed = WHITESPACE_RE.replace_all(stripped.trim_matches(is_html_whitespace), " ");
    if collapsed.is_empty() {
        fallback.to_string()
    } else {
        collapsed.into_owned()
    }
}

/// Derive a class-name-safe token from an item id.
///
/// Ids that are already lowercase `[a-z0-9_-]` are used as is. Anything else is
/// normalized and suffixed with a short digest so distinct ids stay distinct.
pub fn class_token(id: &str) -> String {
    let normalized: String = id
        .chars()
        .map(|c| {
            let c = c.to_ascii_lowercase();
            if c.is_ascii_alphanumeric() || c == '-' || c == '_' {
                c
            } else {
                '-'
            }
        })
        .collect();

    if normalized == id && !id.is_empty() {
        return normalized;
    }

    let trimmed = normalized.trim_matches('-');
    let digest = short_digest(id, 6);
    if trimmed.is_empty() {
        digest
    } else {
        format!("{trimmed}-{digest}")
    }
}

/// First `len` hex characters of the SHA-256 of `input`.
pub fn short_digest(input: &str, len: usize) -> String {
    let mut hasher = Sha256::new();
    hasher.update(input.as_bytes());
    let hex = format!("{:x}", hasher.finalize());
    hex[..len.min(hex.len())].to_string()
}

/// Convert snake_case to kebab-case.
pub fn to_kebab_case(s: &str) -> String {
    s.replace('_', "-")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn escapes_markup() {
        assert_eq!(
            escape_html(r#"<script>alert("x" & 'y')</script>"#),
            "&lt;script&gt;alert(&quot;x&quot; &amp; &#x27;y&#x27;)&lt;/script&gt;"
        );
        assert_eq!(escape_html("plain text"), "plain text");
    }

    #[test]
    fn strips_structural_characters_from_css_values() {
        assert_eq!(css_value("#fff", "transparent"), "#fff");
        assert_eq!(
            css_value("red;}</style><script>", "transparent"),
            "red /style script"
        );
        assert_eq!(css_value("a /* b */ c", "x"), "a b c");
        assert_eq!(css_value("  ", "none"), "none");
        assert_eq!(css_value("rgba(0, 0, 0,\n 0.1)", "none"), "rgba(0, 0, 0, 0.1)");
        assert_eq!(css_value("Open\u{a0}Sans", "serif"), "Open\u{a0}Sans");
    }

    #[test]
    fn keeps_simple_ids_as_tokens() {
        assert_eq!(class_token("1"), "1");
        assert_eq!(class_token("feature-a"), "feature-a");
    }

    #[test]
    fn normalizes_unsafe_ids_distinctly() {
        let upper = class_token("A");
        let lower = class_token("a");
        assert_ne!(upper, lower);
        assert!(upper.starts_with("a-"));

        let weird = class_token("\"><x");
        assert!(weird.chars().all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_'));
    }

    #[test]
    fn digest_is_stable() {
        assert_eq!(short_digest("abc", 8), "ba7816bf");
    }

    #[test]
    fn kebab_cases_tags() {
        assert_eq!(to_kebab_case("pricing_card"), "pricing-card");
    }
}
