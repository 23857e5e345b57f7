use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// One result pulled out of a results page.
///
/// Text fields are empty strings when the page had nothing for them;
/// `guessed_time` is `None` when no date pattern matched.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchResult {
    pub title: String,
    /// Raw href of the result anchor, trimmed.
    pub url: String,
    /// Host of `url`, empty when it does not parse.
    pub domain: String,
    #[serde(default)]
    pub display_url: String,
    #[serde(default)]
    pub snippet: String,
    #[serde(default)]
    pub attribution: String,
    #[serde(rename = "guessed_time_iso", default)]
    pub guessed_time: Option<NaiveDateTime>,
}
