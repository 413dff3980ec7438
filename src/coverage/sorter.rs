//! Display and persistence ordering of coverage sets

use chrono::NaiveDate;

use super::date::{parse_coverage_date, present_sentinel, DateFormatter};
use crate::models::coverage::CoverageRange;

/// Sort ranges ascending by end date.
///
/// Open-ended (and unreadable) end dates sort as year 9999, after every closed
/// range. Ties keep their input order. The input is left untouched.
pub fn sort_coverage_set(ranges: &[CoverageRange], formatter: &dyn DateFormatter) -> Vec<CoverageRange> {
    let mut sorted = ranges.to_vec();
    sorted.sort_by_cached_key(|range| sort_key(range, formatter));
    sorted
}

fn sort_key(range: &CoverageRange, formatter: &dyn DateFormatter) -> NaiveDate {
    range
        .end()
        .and_then(|raw| parse_coverage_date(raw, formatter))
        .unwrap_or_else(present_sentinel)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::coverage::date::LocaleDateFormatter;

    fn sort(ranges: &[CoverageRange]) -> Vec<CoverageRange> {
        sort_coverage_set(ranges, &LocaleDateFormatter::default())
    }

    #[test]
    fn test_sorts_by_end_date() {
        let ranges = vec![
            CoverageRange::new("2003-01-01", Some("2003-12-12")),
            CoverageRange::new("2017-02-01", Some("2017-02-12")),
            CoverageRange::new("2002-02-03", Some("2002-01-12")),
        ];
        let sorted = sort(&ranges);
        let begins: Vec<_> = sorted.iter().map(|r| r.begin().unwrap()).collect();
        assert_eq!(begins, vec!["2002-02-03", "2003-01-01", "2017-02-01"]);
        // input untouched
        assert_eq!(ranges[0].begin(), Some("2003-01-01"));
    }

    #[test]
    fn test_open_ended_sorts_last() {
        let ranges = vec![
            CoverageRange::open_ended("2018-02-06"),
            CoverageRange::new("2018-07-29", Some("2018-09-21")),
            CoverageRange::new("1999-01-01", Some("9998-12-31")),
        ];
        let sorted = sort(&ranges);
        assert_eq!(sorted[0].begin(), Some("2018-07-29"));
        assert_eq!(sorted[1].begin(), Some("1999-01-01"));
        assert_eq!(sorted[2].end(), None);
    }

    #[test]
    fn test_ties_keep_input_order() {
        let ranges = vec![
            CoverageRange::open_ended("2010-01-01"),
            CoverageRange::new("2001-01-01", Some("2002-01-01")),
            CoverageRange::open_ended("2005-01-01"),
        ];
        let sorted = sort(&ranges);
        assert_eq!(sorted[1].begin(), Some("2010-01-01"));
        assert_eq!(sorted[2].begin(), Some("2005-01-01"));
    }

    #[test]
    fn test_sort_is_idempotent() {
        let ranges = vec![
            CoverageRange::open_ended("2012-01-01"),
            CoverageRange::new("2003-01-01", Some("2003-12-12")),
            CoverageRange::default(),
            CoverageRange::new("2001-05-01", Some("01/31/2002")),
        ];
        let once = sort(&ranges);
        assert_eq!(sort(&once), once);
        assert_eq!(once[0].begin(), Some("2001-05-01"));
    }
}
