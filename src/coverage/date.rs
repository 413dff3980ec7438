//! Coverage date parsing and locale-aware display

use std::collections::HashMap;

use chrono::{DateTime, Datelike, NaiveDate, Utc};
use once_cell::sync::Lazy;

use crate::models::coverage::CoverageRange;

/// Wire format of coverage dates
pub const ISO_DATE_FORMAT: &str = "%Y-%m-%d";

/// Label shown for an open end date
pub const PRESENT_LABEL: &str = "Present";

const DEFAULT_LOCALE: &str = "en-US";
const DEFAULT_PATTERN: (&str, &str) = ("%m/%d/%Y", "MM/DD/YYYY");

/// Stand-in for an open end date when ordering or comparing ranges.
pub fn present_sentinel() -> NaiveDate {
    NaiveDate::from_ymd_opt(9999, 1, 1).unwrap_or(NaiveDate::MAX)
}

/// Renders dates for error messages and coverage listings.
///
/// Any `Fn(NaiveDate) -> String` closure is a formatter; it only knows how to
/// render, so it accepts ISO input only and advertises the ISO pattern.
pub trait DateFormatter {
    fn format_date(&self, date: NaiveDate) -> String;

    /// Pattern shown to users when a date cannot be read
    fn format_hint(&self) -> String {
        "YYYY-MM-DD".to_string()
    }

    /// Parse a date typed in this formatter's display pattern
    fn parse_display(&self, _raw: &str) -> Option<NaiveDate> {
        None
    }
}

impl<F> DateFormatter for F
where
    F: Fn(NaiveDate) -> String,
{
    fn format_date(&self, date: NaiveDate) -> String {
        self(date)
    }
}

/// (chrono pattern, user-facing hint) by locale tag
static LOCALE_PATTERNS: Lazy<HashMap<&'static str, (&'static str, &'static str)>> =
    Lazy::new(|| {
        HashMap::from([
            ("en-US", DEFAULT_PATTERN),
            ("en", DEFAULT_PATTERN),
            ("en-GB", ("%d/%m/%Y", "DD/MM/YYYY")),
            ("en-AU", ("%d/%m/%Y", "DD/MM/YYYY")),
            ("de", ("%d.%m.%Y", "DD.MM.YYYY")),
            ("fr", ("%d/%m/%Y", "DD/MM/YYYY")),
            ("es", ("%d/%m/%Y", "DD/MM/YYYY")),
            ("it", ("%d/%m/%Y", "DD/MM/YYYY")),
            ("pt", ("%d/%m/%Y", "DD/MM/YYYY")),
            ("hu", ("%Y.%m.%d.", "YYYY.MM.DD.")),
            ("ja", ("%Y/%m/%d", "YYYY/MM/DD")),
            ("zh", ("%Y/%m/%d", "YYYY/MM/DD")),
            ("sv", ("%Y-%m-%d", "YYYY-MM-DD")),
        ])
    });

/// Numeric short-date formatter for a locale
#[derive(Debug, Clone)]
pub struct LocaleDateFormatter {
    locale: String,
    pattern: &'static str,
    hint: &'static str,
}

impl LocaleDateFormatter {
    /// Resolve a locale tag, falling back to its language and then to en-US.
    pub fn new(locale: &str) -> Self {
        let language = locale.split(['-', '_']).next().unwrap_or_default();
        let resolved = LOCALE_PATTERNS
            .get_key_value(locale)
            .or_else(|| LOCALE_PATTERNS.get_key_value(language));

        let (tag, (pattern, hint)) = match resolved {
            Some((tag, entry)) => (*tag, *entry),
            None => {
                tracing::warn!("Unknown locale '{}', falling back to {}", locale, DEFAULT_LOCALE);
                (DEFAULT_LOCALE, DEFAULT_PATTERN)
            }
        };

        Self {
            locale: tag.to_string(),
            pattern,
            hint,
        }
    }

    pub fn locale(&self) -> &str {
        &self.locale
    }
}

impl Default for LocaleDateFormatter {
    fn default() -> Self {
        Self::new(DEFAULT_LOCALE)
    }
}

impl DateFormatter for LocaleDateFormatter {
    fn format_date(&self, date: NaiveDate) -> String {
        date.format(self.pattern).to_string()
    }

    fn format_hint(&self) -> String {
        self.hint.to_string()
    }

    fn parse_display(&self, raw: &str) -> Option<NaiveDate> {
        NaiveDate::parse_from_str(raw, self.pattern).ok()
    }
}

/// Parse a coverage date.
///
/// Accepts the ISO wire format, an RFC 3339 timestamp (date-pickers submit
/// UTC midnight) and finally the formatter's display pattern.
pub fn parse_coverage_date(raw: &str, formatter: &dyn DateFormatter) -> Option<NaiveDate> {
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }

    NaiveDate::parse_from_str(raw, ISO_DATE_FORMAT)
        .ok()
        .or_else(|| {
            DateTime::parse_from_rfc3339(raw)
                .ok()
                .map(|dt| dt.with_timezone(&Utc).date_naive())
        })
        .or_else(|| formatter.parse_display(raw))
}

/// Strict ISO check used before persisting
pub fn is_iso_date(raw: &str) -> bool {
    NaiveDate::parse_from_str(raw.trim(), ISO_DATE_FORMAT).is_ok()
}

pub fn format_year(date: NaiveDate) -> String {
    date.year().to_string()
}

/// Render one bound of a range; an absent end reads "Present".
pub fn format_bound(raw: Option<&str>, formatter: &dyn DateFormatter, year_only: bool) -> String {
    match raw {
        None => PRESENT_LABEL.to_string(),
        Some(raw) => match parse_coverage_date(raw, formatter) {
            Some(date) if year_only => format_year(date),
            Some(date) => formatter.format_date(date),
            None => raw.to_string(),
        },
    }
}

/// "start - end" display string of a range, e.g. `01/01/2003 - Present`
pub fn describe_range(range: &CoverageRange, formatter: &dyn DateFormatter, year_only: bool) -> String {
    let start = match range.begin() {
        Some(begin) => format_bound(Some(begin), formatter, year_only),
        None => String::new(),
    };
    format!("{} - {}", start, format_bound(range.end(), formatter, year_only))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_parse_iso_and_timestamp() {
        let fmt = LocaleDateFormatter::default();
        assert_eq!(parse_coverage_date("2003-01-01", &fmt), Some(date(2003, 1, 1)));
        assert_eq!(
            parse_coverage_date("2017-02-01T00:00:00.000Z", &fmt),
            Some(date(2017, 2, 1))
        );
        assert_eq!(parse_coverage_date("  ", &fmt), None);
        assert_eq!(parse_coverage_date("not a date", &fmt), None);
        assert_eq!(parse_coverage_date("2003-02-30", &fmt), None);
    }

    #[test]
    fn test_parse_locale_display_format() {
        let us = LocaleDateFormatter::new("en-US");
        assert_eq!(parse_coverage_date("02/03/2004", &us), Some(date(2004, 2, 3)));

        let de = LocaleDateFormatter::new("de-DE");
        assert_eq!(de.locale(), "de");
        assert_eq!(parse_coverage_date("02.03.2004", &de), Some(date(2004, 3, 2)));
        assert_eq!(de.format_hint(), "DD.MM.YYYY");
    }

    #[test]
    fn test_unknown_locale_falls_back() {
        let fmt = LocaleDateFormatter::new("xx-YY");
        assert_eq!(fmt.locale(), "en-US");
        assert_eq!(fmt.format_date(date(2010, 1, 5)), "01/05/2010");
    }

    #[test]
    fn test_closure_formatter() {
        let fmt = |d: NaiveDate| d.format("%Y").to_string();
        assert_eq!(fmt.format_date(date(2011, 6, 1)), "2011");
        assert_eq!(fmt.format_hint(), "YYYY-MM-DD");
        assert_eq!(parse_coverage_date("06/01/2011", &fmt), None);
    }

    #[test]
    fn test_describe_range() {
        let fmt = LocaleDateFormatter::new("en-GB");
        let closed = CoverageRange::new("2003-01-01", Some("2003-12-12"));
        assert_eq!(describe_range(&closed, &fmt, false), "01/01/2003 - 12/12/2003");
        assert_eq!(describe_range(&closed, &fmt, true), "2003 - 2003");

        let open = CoverageRange::open_ended("2017-02-01");
        assert_eq!(describe_range(&open, &fmt, true), "2017 - Present");
    }

    #[test]
    fn test_is_iso_date() {
        assert!(is_iso_date("2010-01-01"));
        assert!(!is_iso_date("01/01/2010"));
    }
}
