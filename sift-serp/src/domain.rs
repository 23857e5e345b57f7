use url::Url;

/// Host (and explicit port) of `raw`, or an empty string when it is not an
/// absolute URL with a host.
///
/// ```
/// use sift_serp::domain::extract_domain;
///
/// assert_eq!(extract_domain("https://example.com/a?b=1"), "example.com");
/// assert_eq!(extract_domain("not a url"), "");
/// ```
pub fn extract_domain(raw: &str) -> String {
    let raw = raw.trim();
    let parsed = match raw.strip_prefix("//") {
        Some(rest) => Url::parse(&format!("https://{rest}")),
        None => Url::parse(raw),
    };

    let Ok(url) = parsed else {
        return String::new();
    };
    match (url.host_str(), url.port()) {
        (Some(host), Some(port)) => format!("{host}:{port}"),
        (Some(host), None) => host.to_string(),
        (None, _) => String::new(),
    }
}
