//! Clipboard and download bundles.

use std::sync::LazyLock;

use regex::Regex;
use tessera_blocks::GeneratedCode;

static WHITESPACE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s+").expect("Invalid whitespace regex"));

/// The single text a user pastes into a page builder: styles first, then markup.
pub fn bundle(code: &GeneratedCode) -> String {
    format!("<style>{}</style>\n{}", code.css, code.html)
}

/// File name for a downloaded bundle.
pub fn download_file_name(name: &str) -> String {
    format!("{}.html", slug(name))
}

/// Lowercase, hyphenated, filesystem-safe form of a block name.
pub fn slug(name: &str) -> String {
    let hyphenated = WHITESPACE_RE.replace_all(name.trim(), "-").to_lowercase();
    let safe: String = hyphenated
        .chars()
        .filter(|c| c.is_alphanumeric() || *c == '-' || *c == '_')
        .collect();

    if safe.is_empty() {
        "block".to_string()
    } else {
        safe
    }
}
