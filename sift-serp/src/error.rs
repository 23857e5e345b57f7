use thiserror::Error;

/// Failures raised while building extractors from configuration.
///
/// Extraction itself never fails; these only surface when a caller hands
/// in a selector or pattern that cannot be compiled.
#[derive(Debug, Error)]
pub enum SerpError {
    #[error("invalid CSS selector for {field}: {selector:?} ({message})")]
    Selector {
        field: &'static str,
        selector: String,
        message: String,
    },
    #[error("invalid click-target pattern {pattern:?}: {source}")]
    Pattern {
        pattern: String,
        #[source]
        source: regex::Error,
    },
    #[error("click-target pattern {0:?} has no `url` capture group")]
    MissingCaptureGroup(String),
}

pub type Result<T> = std::result::Result<T, SerpError>;
