use serde::Deserialize;

use crate::types::SearchResult;

/// Keyword and domain constraints applied after extraction.
///
/// Matching is case-insensitive. Keywords are looked up in the title and
/// snippet; domains match themselves and their subdomains.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct FilterOptions {
    /// Every keyword must appear.
    pub include: Vec<String>,
    /// No keyword may appear.
    pub exclude: Vec<String>,
    /// When non-empty, only these domains are kept.
    pub allow_domains: Vec<String>,
    pub deny_domains: Vec<String>,
}

impl FilterOptions {
    pub fn is_empty(&self) -> bool {
        self.include.is_empty()
            && self.exclude.is_empty()
            && self.allow_domains.is_empty()
            && self.deny_domains.is_empty()
    }

    /// Append the lists of `other` to these.
    pub fn merge(mut self, other: FilterOptions) -> Self {
        self.include.extend(other.include);
        self.exclude.extend(other.exclude);
        self.allow_domains.extend(other.allow_domains);
        self.deny_domains.extend(other.deny_domains);
        self
    }
}

/// Keep the results that satisfy `opts`, preserving order.
///
/// ```
/// use sift_serp::filter::{FilterOptions, filter_results};
/// use sift_serp::SearchResult;
///
/// let hit = |title: &str, domain: &str| SearchResult {
///     title: title.into(),
///     url: format!("https://{domain}/"),
///     domain: domain.into(),
///     display_url: String::new(),
///     snippet: String::new(),
///     attribution: String::new(),
///     guessed_time: None,
/// };
/// let rows = vec![hit("Rust 2024", "blog.rust-lang.org"), hit("Rust", "spam.example")];
/// let opts = FilterOptions {
///     allow_domains: vec!["rust-lang.org".into()],
///     ..Default::default()
/// };
/// let kept = filter_results(rows, &opts);
/// assert_eq!(kept.len(), 1);
/// assert_eq!(kept[0].domain, "blog.rust-lang.org");
/// ```
pub fn filter_results(rows: Vec<SearchResult>, opts: &FilterOptions) -> Vec<SearchResult> {
    if opts.is_empty() {
        return rows;
    }
    let include = lowered(&opts.include);
    let exclude = lowered(&opts.exclude);
    let allow = lowered(&opts.allow_domains);
    let deny = lowered(&opts.deny_domains);

    rows.into_iter()
        .filter(|row| {
            let domain = row.domain.to_lowercase();
            if !allow.is_empty() && !allow.iter().any(|a| domain_matches(&domain, a)) {
                return false;
            }
            if deny.iter().any(|d| domain_matches(&domain, d)) {
                return false;
            }
            let text = format!("{} {}", row.title, row.snippet).to_lowercase();
            include.iter().all(|w| text.contains(w.as_str()))
                && !exclude.iter().any(|w| text.contains(w.as_str()))
        })
        .collect()
}

fn lowered(words: &[String]) -> Vec<String> {
    words
        .iter()
        .map(|w| w.trim().to_lowercase())
        .filter(|w| !w.is_empty())
        .collect()
}

/// `domain` is `suffix` or one of its subdomains.
fn domain_matches(domain: &str, suffix: &str) -> bool {
    let suffix = suffix.trim_start_matches('.');
    domain == suffix
        || domain
            .strip_suffix(suffix)
            .is_some_and(|head| head.ends_with('.'))
}
