use std::fmt;
use std::str::FromStr;

use serde::Deserialize;
use url::form_urlencoded;

/// Search endpoint every built URL starts with.
pub const BING_SEARCH_URL: &str = "https://www.bing.com/search";

/// Freshness window for results.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Freshness {
    Day,
    Week,
    Month,
    Year,
}

impl Freshness {
    /// Parse a bucket name; unknown names give `None`.
    pub fn from_bucket(bucket: &str) -> Option<Self> {
        bucket.parse().ok()
    }

    /// Width of the window in minutes.
    pub fn minutes(self) -> u32 {
        match self {
            Freshness::Day => 1440,
            Freshness::Week => 10080,
            Freshness::Month => 43200,
            Freshness::Year => 525600,
        }
    }
}

impl FromStr for Freshness {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "day" => Ok(Freshness::Day),
            "week" => Ok(Freshness::Week),
            "month" => Ok(Freshness::Month),
            "year" => Ok(Freshness::Year),
            other => Err(format!("unknown freshness bucket: {other}")),
        }
    }
}

impl fmt::Display for Freshness {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Freshness::Day => "day",
            Freshness::Week => "week",
            Freshness::Month => "month",
            Freshness::Year => "year",
        })
    }
}

/// Optional filters applied to a search URL.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchOptions {
    pub when: Option<Freshness>,
    /// Restrict to one site via a `site:` prefix on the query.
    pub site: Option<String>,
    /// Interface language, passed as `setlang`.
    pub lang: Option<String>,
    /// Market tag such as `en-GB`; also yields the `cc` country code.
    pub country: Option<String>,
    /// `Some(true)` turns adult filtering off, `Some(false)` makes it strict,
    /// `None` leaves the engine default.
    pub safe: Option<bool>,
}

/// Build a search URL for `query` with the given filters.
///
/// Parameters always appear in the order `q, qft, setlang, cc, mkt, adlt`.
///
/// ```
/// use sift_serp::search_url::{Freshness, SearchOptions, build_search_url};
///
/// let url = build_search_url(
///     "cats",
///     &SearchOptions {
///         site: Some("wikipedia.org".into()),
///         when: Some(Freshness::Week),
///         ..Default::default()
///     },
/// );
/// assert_eq!(
///     url,
///     "https://www.bing.com/search?q=site%3Awikipedia.org+cats&qft=%2Bfilterui%3Aage-lt10080"
/// );
/// ```
pub fn build_search_url(query: &str, opts: &SearchOptions) -> String {
    let q = match opts.site.as_deref() {
        Some(site) if !site.is_empty() => format!("site:{site} {query}"),
        _ => query.to_string(),
    };

    let mut params: Vec<(&str, String)> = vec![("q", q)];
    if let Some(when) = opts.when {
        params.push(("qft", format!("+filterui:age-lt{}", when.minutes())));
    }
    if let Some(lang) = non_empty(&opts.lang) {
        params.push(("setlang", lang.to_string()));
    }
    if let Some(country) = non_empty(&opts.country) {
        params.push(("cc", country_code(country)));
        params.push(("mkt", country.to_string()));
    }
    if let Some(safe) = opts.safe {
        params.push(("adlt", if safe { "off" } else { "strict" }.to_string()));
    }

    let mut query_string = form_urlencoded::Serializer::new(String::new());
    for (key, value) in &params {
        query_string.append_pair(key, value);
    }
    format!("{BING_SEARCH_URL}?{}", query_string.finish())
}

/// Lower-cased segment after the last hyphen of a market tag (`en-GB` → `gb`).
fn country_code(market: &str) -> String {
    market.rsplit('-').next().unwrap_or(market).to_lowercase()
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn url_for(opts: SearchOptions) -> String {
        build_search_url("x", &opts)
    }

    #[test]
    fn bare_query() {
        assert_eq!(
            build_search_url("rust lang", &SearchOptions::default()),
            "https://www.bing.com/search?q=rust+lang"
        );
    }

    #[test]
    fn freshness_minutes() {
        for (when, minutes) in [
            (Freshness::Day, "1440"),
            (Freshness::Week, "10080"),
            (Freshness::Month, "43200"),
            (Freshness::Year, "525600"),
        ] {
            let url = url_for(SearchOptions {
                when: Some(when),
                ..Default::default()
            });
            assert!(url.ends_with(&format!("&qft=%2Bfilterui%3Aage-lt{minutes}")), "{url}");
        }
    }

    #[test]
    fn unknown_bucket_is_dropped() {
        assert_eq!(Freshness::from_bucket("fortnight"), None);
        assert_eq!(Freshness::from_bucket("Week"), Some(Freshness::Week));
        let url = url_for(SearchOptions {
            when: Freshness::from_bucket("fortnight"),
            ..Default::default()
        });
        assert!(!url.contains("qft"));
    }

    #[test]
    fn country_sets_cc_and_mkt() {
        let url = url_for(SearchOptions {
            lang: Some("en-GB".into()),
            country: Some("en-GB".into()),
            ..Default::default()
        });
        assert_eq!(
            url,
            "https://www.bing.com/search?q=x&setlang=en-GB&cc=gb&mkt=en-GB"
        );
        assert_eq!(country_code("zh-Hant-TW"), "tw");
        assert_eq!(country_code("US"), "us");
    }

    #[test]
    fn safe_search_is_three_valued() {
        let off = url_for(SearchOptions {
            safe: Some(true),
            ..Default::default()
        });
        let strict = url_for(SearchOptions {
            safe: Some(false),
            ..Default::default()
        });
        let unset = url_for(SearchOptions::default());

        assert!(off.ends_with("&adlt=off"));
        assert!(strict.ends_with("&adlt=strict"));
        assert!(!unset.contains("adlt"));
        assert_ne!(off, strict);
        assert_ne!(off, unset);
        assert_ne!(strict, unset);
    }

    #[test]
    fn parameter_order_is_fixed() {
        let url = url_for(SearchOptions {
            when: Some(Freshness::Day),
            site: Some("example.com".into()),
            lang: Some("de".into()),
            country: Some("de-DE".into()),
            safe: Some(false),
        });
        let keys: Vec<&str> = url
            .split_once('?')
            .unwrap()
            .1
            .split('&')
            .map(|kv| kv.split_once('=').unwrap().0)
            .collect();
        assert_eq!(keys, ["q", "qft", "setlang", "cc", "mkt", "adlt"]);
    }

    #[test]
    fn display_round_trips_from_str() {
        for when in [Freshness::Day, Freshness::Week, Freshness::Month, Freshness::Year] {
            assert_eq!(when.to_string().parse::<Freshness>(), Ok(when));
        }
    }
}
