//! Whitespace and comment minifier for generated HTML and CSS.
//!
//! Both scanners only ever remove characters or replace a run with one space, so
//! output is never longer than input, and running them twice changes nothing.

use tessera_blocks::escape::is_html_whitespace;
use tessera_blocks::GeneratedCode;

/// Kind of source text to minify.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceKind {
    Html,
    Css,
}

/// Minify `source` as `kind`.
pub fn minify(source: &str, kind: SourceKind) -> String {
    match kind {
        SourceKind::Html => minify_html(source),
        SourceKind::Css => minify_css(source),
    }
}

/// Minify both halves of compiled output.
pub fn minify_code(code: &GeneratedCode) -> GeneratedCode {
    GeneratedCode {
        html: minify_html(&code.html),
        css: minify_css(&code.css),
    }
}

const RAW_TEXT_ELEMENTS: [&str; 4] = ["pre", "textarea", "script", "style"];

/// Minify HTML.
pub fn minify_html(source: &str) -> String {
    let mut out = String::with_capacity(source.len());
    let mut text = String::new();
    let mut pos = 0;

    while pos < source.len() {
        let rest = &source[pos..];

        if rest.starts_with("<!--") {
            // Comments vanish without splitting the surrounding text node
            pos += match rest[4..].find("-->") {
                Some(end) => 4 + end + 3,
                None => rest.len(),
            };
            continue;
        }

        if starts_tag(rest) {
            flush_text(&mut out, &mut text);

            let end = tag_end(rest);
            let tag = &rest[..end];
            write_tag(&mut out, tag);
            pos += end;

            if let Some(name) = raw_text_opening(tag) {
                let body_end = find_closing(&source[pos..], name);
                out.push_str(&source[pos..pos + body_end]);
                pos += body_end;
            }
            continue;
        }

        let Some(c) = rest.chars().next() else {
            break;
        };
        text.push(c);
        pos += c.len_utf8();
    }

    flush_text(&mut out, &mut text);
    out
}

fn starts_tag(s: &str) -> bool {
    let mut chars = s.chars();
    if chars.next() != Some('<') {
        return false;
    }
    match chars.next() {
        Some('/') => chars.next().is_some_and(|c| c.is_ascii_alphabetic()),
        Some('!') => true,
        Some(c) => c.is_ascii_alphabetic(),
        None => false,
    }
}

/// Byte length of the tag at the start of `s`, including `>`.
fn tag_end(s: &str) -> usize {
    let mut quote = None;
    for (i, c) in s.char_indices() {
        match (quote, c) {
            (Some(q), c) if c == q => quote = None,
            (Some(_), _) => {}
            (None, '"') | (None, '\'') => quote = Some(c),
            (None, '>') => return i + 1,
            _ => {}
        }
    }
    s.len()
}

fn write_tag(out: &mut String, tag: &str) {
    let mut quote = None;
    let mut pending_space = false;
    let mut chars = tag.chars().peekable();

    while let Some(c) = chars.next() {
        if let Some(q) = quote {
            out.push(c);
            if c == q {
                quote = None;
            }
            continue;
        }

        if is_html_whitespace(c) {
            pending_space = true;
            continue;
        }

        if pending_space {
            pending_space = false;
            let closes = c == '>' || (c == '/' && chars.peek() == Some(&'>'));
            if !closes && c != '=' && !out.ends_with('=') {
                out.push(' ');
            }
        }

        if c == '"' || c == '\'' {
            quote = Some(c);
        }
        out.push(c);
    }
}

/// Name of a raw text element opened by `tag`, if any.
fn raw_text_opening(tag: &str) -> Option<&'static str> {
    if tag.starts_with("</") || tag.ends_with("/>") {
        return None;
    }
    let name: String = tag[1..]
        .chars()
        .take_while(|c| c.is_ascii_alphanumeric())
        .collect::<String>()
        .to_ascii_lowercase();

    RAW_TEXT_ELEMENTS.into_iter().find(|raw| *raw == name)
}

/// Byte offset of `</name` in `s`, case-insensitively, or the end of `s`.
fn find_closing(s: &str, name: &str) -> usize {
    let needle = format!("</{name}");
    let lower = s.to_ascii_lowercase();
    lower.find(&needle).unwrap_or(s.len())
}

fn flush_text(out: &mut String, text: &mut String) {
    if text.chars().any(|c| !is_html_whitespace(c)) {
        let mut in_space = false;
        for c in text.chars() {
            if is_html_whitespace(c) {
                if !in_space {
                    out.push(' ');
                }
                in_space = true;
            } else {
                out.push(c);
                in_space = false;
            }
        }
    }
    text.clear();
}

/// Minify CSS.
pub fn minify_css(source: &str) -> String {
    let mut out = String::with_capacity(source.len());
    let mut pending_space = false;
    let mut chars = source.chars().peekable();

    while let Some(c) = chars.next() {
        if c == '/' && chars.peek() == Some(&'*') {
            chars.next();
            let mut prev = '\0';
            for c in chars.by_ref() {
                if prev == '*' && c == '/' {
                    break;
                }
                prev = c;
            }
            pending_space = true;
            continue;
        }

        if is_html_whitespace(c) {
            pending_space = true;
            continue;
        }

        if pending_space {
            pending_space = false;
            let after_tight = out
                .chars()
                .last()
                .map_or(true, |last| matches!(last, '{' | '}' | ';' | ',' | ':' | '>' | '('));
            let before_tight = matches!(c, '{' | '}' | ';' | ',' | '>' | ')');
            if !after_tight && !before_tight {
                out.push(' ');
            }
        }

        if c == '}' {
            while out.ends_with(';') {
                out.pop();
            }
        }

        out.push(c);

        if c == '"' || c == '\'' {
            let mut escaped = false;
            for s in chars.by_ref() {
                out.push(s);
                if escaped {
                    escaped = false;
                } else if s == '\\' {
                    escaped = true;
                } else if s == c {
                    break;
                }
            }
        }
    }

    out
}
