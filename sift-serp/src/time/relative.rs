use std::sync::LazyLock;

use chrono::{NaiveDateTime, TimeDelta};
use regex::Regex;

static ABBREVIATION: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\b(mins?|hrs?|secs?)\b").unwrap());

static AGO: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)([0-9]+)\s+(second|minute|hour|day|week|month|year)s?\s+ago\b").unwrap()
});

/// Resolve the first "`<n>` `<unit>` ago" phrase in `text` against `now`.
///
/// Months count as 30 days and years as 365 days. Returns `None` when no
/// phrase matches or the offset does not fit the calendar range.
///
/// ```
/// use chrono::{NaiveDate, TimeDelta};
/// use sift_serp::time::parse_relative_time;
///
/// let now = NaiveDate::from_ymd_opt(2024, 3, 1).unwrap().and_hms_opt(12, 0, 0).unwrap();
/// assert_eq!(parse_relative_time("2 mins ago", now), Some(now - TimeDelta::minutes(2)));
/// ```
pub fn parse_relative_time(text: &str, now: NaiveDateTime) -> Option<NaiveDateTime> {
    let normalized = expand_abbreviations(text);
    let caps = AGO.captures(&normalized)?;
    let n: i64 = caps[1].parse().ok()?;
    let delta = unit_delta(&caps[2].to_ascii_lowercase(), n)?;
    now.checked_sub_signed(delta)
}

fn expand_abbreviations(text: &str) -> String {
    ABBREVIATION
        .replace_all(text, |caps: &regex::Captures<'_>| {
            let word = caps[1].to_ascii_lowercase();
            let unit = match word.trim_end_matches('s') {
                "min" => "minute",
                "hr" => "hour",
                _ => "second",
            };
            if word.ends_with('s') {
                format!("{unit}s")
            } else {
                unit.to_string()
            }
        })
        .into_owned()
}

fn unit_delta(unit: &str, n: i64) -> Option<TimeDelta> {
    match unit {
        "second" => TimeDelta::try_seconds(n),
        "minute" => TimeDelta::try_minutes(n),
        "hour" => TimeDelta::try_hours(n),
        "day" => TimeDelta::try_days(n),
        "week" => TimeDelta::try_weeks(n),
        "month" => TimeDelta::try_days(n.checked_mul(30)?),
        "year" => TimeDelta::try_days(n.checked_mul(365)?),
        _ => None,
    }
}
