//! Redirect-target lookup for click-tracking pages.
//!
//! Tracking pages hand the browser its destination through a tiny script,
//! typically `var u = "https://…";`. Patterns are regexes with a named `url`
//! group; the default list covers short `var`/`let`/`const` assignments with
//! either quote style.

use regex::Regex;

use crate::error::{Result, SerpError};

/// Default assignment patterns, tried in order.
pub const DEFAULT_PATTERNS: &[&str] = &[
    r#"\b(?:var|let|const)\s+[A-Za-z_$][\w$]{0,2}\s*=\s*"(?P<url>(?:https?:)?(?:\\?/){2}(?:[^"\\]|\\.)+)""#,
    r#"\b(?:var|let|const)\s+[A-Za-z_$][\w$]{0,2}\s*=\s*'(?P<url>(?:https?:)?(?:\\?/){2}(?:[^'\\]|\\.)+)'"#,
];

pub struct ClickTargetExtractor {
    patterns: Vec<Regex>,
}

impl ClickTargetExtractor {
    /// Compile `patterns`; each must contain a `url` capture group.
    pub fn new<I, S>(patterns: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let patterns = patterns
            .into_iter()
            .map(|p| {
                let p = p.as_ref();
                let re = Regex::new(p).map_err(|source| SerpError::Pattern {
                    pattern: p.to_string(),
                    source,
                })?;
                if !re.capture_names().any(|name| name == Some("url")) {
                    return Err(SerpError::MissingCaptureGroup(p.to_string()));
                }
                Ok(re)
            })
            .collect::<Result<_>>()?;
        Ok(Self { patterns })
    }

    /// Extractor over [`DEFAULT_PATTERNS`].
    pub fn with_defaults() -> Result<Self> {
        Self::new(DEFAULT_PATTERNS)
    }

    /// Destination URL embedded in `html`, or `None` when no pattern matches.
    ///
    /// ```
    /// use sift_serp::ClickTargetExtractor;
    ///
    /// let extractor = ClickTargetExtractor::with_defaults().unwrap();
    /// let page = r#"<script>var u = "https:\/\/example.com\/a?x=1&amp;y=2";</script>"#;
    /// assert_eq!(
    ///     extractor.extract(page).as_deref(),
    ///     Some("https://example.com/a?x=1&y=2")
    /// );
    /// assert_eq!(extractor.extract("<html></html>"), None);
    /// ```
    pub fn extract(&self, html: &str) -> Option<String> {
        self.patterns.iter().find_map(|re| {
            let raw = re.captures(html)?.name("url")?.as_str();
            let decoded = decode_js_string(raw);
            let decoded = decoded.trim();
            if decoded.is_empty() {
                None
            } else {
                Some(decoded.to_string())
            }
        })
    }
}

/// Undo JavaScript string escapes and the `&amp;` entity.
fn decode_js_string(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    let mut chars = raw.chars().peekable();
    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        match chars.next() {
            Some('x') => push_hex(&mut out, &mut chars, 2, "\\x"),
            Some('u') => push_hex(&mut out, &mut chars, 4, "\\u"),
            Some('n') => out.push('\n'),
            Some('t') => out.push('\t'),
            Some(other) => out.push(other),
            None => out.push('\\'),
        }
    }
    out.replace("&amp;", "&")
}

/// Read `width` hex digits as one code point; on bad input keep the text as-is.
fn push_hex(
    out: &mut String,
    chars: &mut std::iter::Peekable<std::str::Chars<'_>>,
    width: usize,
    prefix: &str,
) {
    let mut digits = String::with_capacity(width);
    while digits.len() < width {
        match chars.peek() {
            Some(c) if c.is_ascii_hexdigit() => {
                digits.push(*c);
                chars.next();
            }
            _ => break,
        }
    }
    let decoded = (digits.len() == width)
        .then(|| u32::from_str_radix(&digits, 16).ok())
        .flatten()
        .and_then(char::from_u32);
    match decoded {
        Some(ch) => out.push(ch),
        None => {
            out.push_str(prefix);
            out.push_str(&digits);
        }
    }
}
