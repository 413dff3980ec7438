//! Conversion of validated coverage sets to the persisted shape

use super::date::{is_iso_date, parse_coverage_date, DateFormatter, ISO_DATE_FORMAT};
use crate::models::coverage::{CoveragePayload, CoverageRange};

/// Every date that is present is an ISO `YYYY-MM-DD` date
pub fn is_valid_coverage(range: &CoveragePayload) -> bool {
    let present = [range.begin_coverage.as_str(), range.end_coverage.as_str()];
    present
        .iter()
        .filter(|raw| !raw.trim().is_empty())
        .all(|raw| is_iso_date(raw))
}

pub fn is_valid_coverage_list(ranges: &[CoveragePayload]) -> bool {
    ranges.iter().all(is_valid_coverage)
}

/// Normalize validated ranges to ISO dates.
///
/// Blank placeholder rows are dropped; the whole set replaces whatever was
/// stored before. Returns `None` if a non-blank range has an unreadable date,
/// which validation rules out.
pub fn to_payload(ranges: &[CoverageRange], formatter: &dyn DateFormatter) -> Option<Vec<CoveragePayload>> {
    ranges
        .iter()
        .filter(|range| !range.is_blank())
        .map(|range| {
            let begin = parse_coverage_date(range.begin()?, formatter)?;
            let end = match range.end() {
                Some(raw) => parse_coverage_date(raw, formatter)?
                    .format(ISO_DATE_FORMAT)
                    .to_string(),
                None => String::new(),
            };
            Some(CoveragePayload {
                begin_coverage: begin.format(ISO_DATE_FORMAT).to_string(),
                end_coverage: end,
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::coverage::date::LocaleDateFormatter;

    #[test]
    fn test_payload_normalizes_dates() {
        let fmt = LocaleDateFormatter::new("en-US");
        let ranges = vec![
            CoverageRange::new("01/31/2002", Some("2002-12-31T00:00:00Z")),
            CoverageRange::default(),
            CoverageRange::open_ended("2010-01-01"),
        ];
        let payload = to_payload(&ranges, &fmt).unwrap();
        assert_eq!(
            payload,
            vec![
                CoveragePayload {
                    begin_coverage: "2002-01-31".to_string(),
                    end_coverage: "2002-12-31".to_string(),
                },
                CoveragePayload {
                    begin_coverage: "2010-01-01".to_string(),
                    end_coverage: String::new(),
                },
            ]
        );
        assert!(is_valid_coverage_list(&payload));
    }

    #[test]
    fn test_payload_rejects_unreadable_dates() {
        let fmt = LocaleDateFormatter::default();
        assert!(to_payload(&[CoverageRange::new("someday", None)], &fmt).is_none());
    }

    #[test]
    fn test_is_valid_coverage() {
        let ok = CoveragePayload {
            begin_coverage: "2010-01-01".to_string(),
            end_coverage: String::new(),
        };
        let bad = CoveragePayload {
            begin_coverage: "01/01/2010".to_string(),
            end_coverage: String::new(),
        };
        assert!(is_valid_coverage(&ok));
        assert!(!is_valid_coverage(&bad));
        assert!(!is_valid_coverage_list(&[ok, bad]));
    }
}
