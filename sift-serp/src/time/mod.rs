//! Publication-time guessing for result text.
//!
//! Every function takes the reference `now` explicitly. An extraction run
//! captures it once so that identical phrases resolve to identical instants.

mod absolute;
mod relative;

use chrono::NaiveDateTime;

pub use absolute::{DATE_TEMPLATES, match_template_at, parse_absolute_date};
pub use relative::parse_relative_time;

/// Best guess at when `text` was published: a relative "… ago" phrase if one
/// is present, else an absolute date, else `None`.
pub fn guess_time(text: &str, now: NaiveDateTime) -> Option<NaiveDateTime> {
    parse_relative_time(text, now).or_else(|| parse_absolute_date(text))
}
