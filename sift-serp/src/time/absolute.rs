use std::sync::LazyLock;

use chrono::{NaiveDate, NaiveDateTime};
use regex::Regex;

/// Full-string date templates, tried in order. The first that consumes the
/// whole (cleaned) text wins, so ambiguous slash dates read day-first.
///
/// "Whole text" is chrono's notion of a match: a space in a template accepts
/// any run of whitespace including none, and `%Y` accepts a leading sign. So
/// `Jan 5,2024` reads as `%b %d, %Y`.
pub const DATE_TEMPLATES: &[&str] = &[
    "%b %d, %Y",
    "%d %b %Y",
    "%Y-%m-%d",
    "%B %d, %Y",
    "%d %B %Y",
    "%b %d %Y",
    "%d/%m/%Y",
    "%m/%d/%Y",
    "%Y/%m/%d",
    "%Y.%m.%d",
    "%d.%m.%Y",
];

/// An embedded month-name date located by regex, with the templates used to
/// read the matched substring.
struct EmbeddedDate {
    pattern: &'static LazyLock<Regex>,
    templates: [&'static str; 2],
}

static MONTH_DAY_YEAR: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\b(?:Jan|Feb|Mar|Apr|May|Jun|Jul|Aug|Sep|Oct|Nov|Dec)[a-z]*\s+[0-9]{1,2},\s+[0-9]{4}")
        .unwrap()
});

static DAY_MONTH_YEAR: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\b[0-9]{1,2}\s+(?:Jan|Feb|Mar|Apr|May|Jun|Jul|Aug|Sep|Oct|Nov|Dec)[a-z]*\s+[0-9]{4}\b")
        .unwrap()
});

static EMBEDDED_DATES: [EmbeddedDate; 2] = [
    EmbeddedDate {
        pattern: &MONTH_DAY_YEAR,
        templates: ["%b %d, %Y", "%B %d, %Y"],
    },
    EmbeddedDate {
        pattern: &DAY_MONTH_YEAR,
        templates: ["%d %b %Y", "%d %B %Y"],
    },
];

/// Separators that sit between a byline and its date: bullets, pipes, dashes.
const DECORATIONS: &[char] = &['•', '·', '|', '-', '–', '—'];

static INNER_DECORATION: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s[•·|\-–—]+\s").unwrap());

/// Read an absolute calendar date out of `text`, at midnight.
///
/// Whole-string templates from [`DATE_TEMPLATES`] are preferred; only when
/// none fits is the text searched for an embedded `Month d, yyyy` or
/// `d Month yyyy` date.
///
/// ```
/// use chrono::NaiveDate;
/// use sift_serp::time::parse_absolute_date;
///
/// let jan5 = NaiveDate::from_ymd_opt(2024, 1, 5).unwrap().and_hms_opt(0, 0, 0);
/// assert_eq!(parse_absolute_date("Jan 5, 2024"), jan5);
/// assert_eq!(parse_absolute_date("5 January 2024"), jan5);
/// ```
pub fn parse_absolute_date(text: &str) -> Option<NaiveDateTime> {
    let cleaned = clean(text);
    match_template(&cleaned).or_else(|| match_embedded(&cleaned))
}

/// Index into [`DATE_TEMPLATES`] and the date of the first template that
/// matches all of `text`.
pub fn match_template_at(text: &str) -> Option<(usize, NaiveDate)> {
    DATE_TEMPLATES
        .iter()
        .enumerate()
        .find_map(|(idx, fmt)| NaiveDate::parse_from_str(text, fmt).ok().map(|d| (idx, d)))
}

fn match_template(text: &str) -> Option<NaiveDateTime> {
    match_template_at(text).and_then(|(_, date)| date.and_hms_opt(0, 0, 0))
}

fn match_embedded(text: &str) -> Option<NaiveDateTime> {
    EMBEDDED_DATES.iter().find_map(|embedded| {
        let found = embedded.pattern.find(text)?;
        embedded
            .templates
            .iter()
            .find_map(|fmt| NaiveDate::parse_from_str(found.as_str(), fmt).ok())
            .and_then(|date| date.and_hms_opt(0, 0, 0))
    })
}

/// Trim decorations at both ends, turn free-standing separators inside the
/// text into spaces and collapse whitespace. Dashes inside a token survive.
fn clean(text: &str) -> String {
    let trimmed = text.trim_matches(|c: char| c.is_whitespace() || DECORATIONS.contains(&c));
    let spaced = INNER_DECORATION.replace_all(trimmed, " ");
    spaced.split_whitespace().collect::<Vec<_>>().join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ymd(y: i32, m: u32, d: u32) -> Option<NaiveDateTime> {
        NaiveDate::from_ymd_opt(y, m, d).and_then(|d| d.and_hms_opt(0, 0, 0))
    }

    #[test]
    fn month_name_forms_use_full_templates() {
        assert_eq!(match_template_at("Jan 5, 2024").map(|(i, _)| i), Some(0));
        assert_eq!(match_template_at("5 January 2024").map(|(i, _)| i), Some(4));
        assert_eq!(parse_absolute_date("Jan 5, 2024"), ymd(2024, 1, 5));
        assert_eq!(parse_absolute_date("5 January 2024"), ymd(2024, 1, 5));
        assert_eq!(parse_absolute_date("January 5, 2024"), ymd(2024, 1, 5));
        assert_eq!(parse_absolute_date("5 Jan 2024"), ymd(2024, 1, 5));
        assert_eq!(parse_absolute_date("Jan 5 2024"), ymd(2024, 1, 5));
    }

    #[test]
    fn template_spaces_are_optional() {
        assert_eq!(match_template_at("Jan 5,2024").map(|(i, _)| i), Some(0));
        assert_eq!(parse_absolute_date("Jan  5,   2024"), ymd(2024, 1, 5));
    }

    #[test]
    fn numeric_forms() {
        assert_eq!(parse_absolute_date("2024-01-05"), ymd(2024, 1, 5));
        assert_eq!(parse_absolute_date("2024/01/05"), ymd(2024, 1, 5));
        assert_eq!(parse_absolute_date("2024.01.05"), ymd(2024, 1, 5));
        assert_eq!(parse_absolute_date("05.01.2024"), ymd(2024, 1, 5));
    }

    #[test]
    fn slash_dates_read_day_first_unless_impossible() {
        assert_eq!(parse_absolute_date("05/01/2024"), ymd(2024, 1, 5));
        assert_eq!(parse_absolute_date("12/25/2023"), ymd(2023, 12, 25));
    }

    #[test]
    fn surrounding_decorations_are_stripped() {
        assert_eq!(parse_absolute_date(" · Jan 5, 2024 "), ymd(2024, 1, 5));
        assert_eq!(parse_absolute_date("| 2024-01-05 |"), ymd(2024, 1, 5));
        assert_eq!(parse_absolute_date("— 5 January 2024"), ymd(2024, 1, 5));
    }

    #[test]
    fn embedded_month_day_year() {
        assert_eq!(
            parse_absolute_date("example.com · Mar 12, 2023 · Rates went up again"),
            ymd(2023, 3, 12)
        );
        assert_eq!(
            parse_absolute_date("Posted on September 9, 2022 by staff"),
            ymd(2022, 9, 9)
        );
    }

    #[test]
    fn embedded_dates_need_ascii_digits() {
        assert_eq!(
            parse_absolute_date("Mar \u{0661}\u{0662}, 2023 · Mar 12, 2023"),
            ymd(2023, 3, 12)
        );
        assert_eq!(
            parse_absolute_date("\u{0665} June 2019 · 6 June 2019"),
            ymd(2019, 6, 6)
        );
    }

    #[test]
    fn embedded_day_month_year() {
        assert_eq!(
            parse_absolute_date("The Guardian | 14 February 2021 | Letters"),
            ymd(2021, 2, 14)
        );
        assert_eq!(parse_absolute_date("updated 3 aug 2020, read more"), ymd(2020, 8, 3));
    }

    #[test]
    fn month_day_year_searched_before_day_month_year() {
        assert_eq!(
            parse_absolute_date("seen 2 June 2019 and Jul 4, 2020"),
            ymd(2020, 7, 4)
        );
    }

    #[test]
    fn nothing_to_find() {
        assert_eq!(parse_absolute_date(""), None);
        assert_eq!(parse_absolute_date("no dates here, 42 apples"), None);
        assert_eq!(parse_absolute_date("Feb 30, 2024"), None);
        assert_eq!(parse_absolute_date("13/13/2024"), None);
    }
}
