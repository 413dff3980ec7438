//! Coverage set validation
//!
//! Each range runs through a fixed sequence of checks and reports the errors
//! of the first check that fails:
//!
//! 1. date format
//! 2. start before end
//! 3. containment in the parent package's range (resources only)
//! 4. no overlap with sibling ranges (resources only)
//!
//! Failures are returned as data, one [`RangeErrors`] per input range.

use chrono::NaiveDate;
use indexmap::IndexMap;
use serde::{Serialize, Serializer};
use thiserror::Error;

use super::{
    date::{format_bound, parse_coverage_date, present_sentinel, DateFormatter},
    interval::DateInterval,
};
use crate::models::coverage::{CoverageField, CoverageRange};

/// Validation failure attached to one field of a coverage range
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CoverageError {
    #[error("Enter date in {date_format} format.")]
    InvalidDateFormat { date_format: String },

    #[error("Start date must be before end date.")]
    StartAfterEnd,

    #[error("Dates must be within the package's date range ({start} - {end}).")]
    OutOfParentRange { start: String, end: String },

    #[error("Date range overlaps with {start} - {end}.")]
    RangeOverlap { start: String, end: String },
}

impl CoverageError {
    pub fn code(&self) -> &'static str {
        match self {
            CoverageError::InvalidDateFormat { .. } => "InvalidDateFormat",
            CoverageError::StartAfterEnd => "StartAfterEnd",
            CoverageError::OutOfParentRange { .. } => "OutOfParentRange",
            CoverageError::RangeOverlap { .. } => "RangeOverlap",
        }
    }
}

/// Field errors of a single coverage range, empty when the range is valid.
///
/// Serializes as `{ "beginCoverage": "<message>", ... }`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RangeErrors(IndexMap<CoverageField, CoverageError>);

impl RangeErrors {
    fn single(field: CoverageField, error: CoverageError) -> Self {
        let mut errors = Self::default();
        errors.insert(field, error);
        errors
    }

    fn both(error: CoverageError) -> Self {
        let mut errors = Self::default();
        errors.insert(CoverageField::BeginCoverage, error.clone());
        errors.insert(CoverageField::EndCoverage, error);
        errors
    }

    pub fn insert(&mut self, field: CoverageField, error: CoverageError) {
        self.0.insert(field, error);
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn get(&self, field: CoverageField) -> Option<&CoverageError> {
        self.0.get(&field)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&CoverageField, &CoverageError)> {
        self.0.iter()
    }
}

impl Serialize for RangeErrors {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_map(self.0.iter().map(|(field, error)| (field, error.to_string())))
    }
}

/// Which checks apply to a coverage set
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CoverageRules {
    /// Title/resource custom coverage: every check
    #[default]
    Resource,
    /// A package's own custom coverage: format and ordering only
    Package,
}

/// Inputs shared by every range of one validation pass
#[derive(Clone, Copy)]
pub struct ValidationContext<'a> {
    /// Parent package coverage constraining the set
    pub parent: Option<&'a CoverageRange>,
    pub formatter: &'a dyn DateFormatter,
    /// Stands in for open end dates in the containment check
    pub today: NaiveDate,
    pub rules: CoverageRules,
}

impl<'a> ValidationContext<'a> {
    pub fn new(formatter: &'a dyn DateFormatter, today: NaiveDate) -> Self {
        Self {
            parent: None,
            formatter,
            today,
            rules: CoverageRules::default(),
        }
    }

    pub fn with_parent(mut self, parent: Option<&'a CoverageRange>) -> Self {
        self.parent = parent;
        self
    }

    pub fn with_rules(mut self, rules: CoverageRules) -> Self {
        self.rules = rules;
        self
    }
}

#[derive(Debug, Clone, Copy)]
struct ParsedRange {
    begin: NaiveDate,
    end: Option<NaiveDate>,
}

impl ParsedRange {
    fn is_ordered(&self) -> bool {
        self.end.map_or(true, |end| self.begin <= end)
    }

    fn interval(&self, open_end: NaiveDate) -> DateInterval {
        DateInterval::new(self.begin, self.end.unwrap_or(open_end))
    }
}

/// Validate every range of a coverage set.
///
/// The result is parallel to `ranges`.
pub fn validate_coverage_set(ranges: &[CoverageRange], ctx: &ValidationContext<'_>) -> Vec<RangeErrors> {
    let parsed: Vec<Option<ParsedRange>> = ranges
        .iter()
        .map(|range| parse_range(range, ctx.formatter))
        .collect();

    ranges
        .iter()
        .enumerate()
        .map(|(index, range)| validate_range(index, range, ranges, &parsed, ctx))
        .collect()
}

/// True when no range of a validation result carries an error
pub fn is_valid(results: &[RangeErrors]) -> bool {
    results.iter().all(RangeErrors::is_empty)
}

pub fn invalid_count(results: &[RangeErrors]) -> usize {
    results.iter().filter(|errors| !errors.is_empty()).count()
}

fn validate_range(
    index: usize,
    range: &CoverageRange,
    ranges: &[CoverageRange],
    parsed: &[Option<ParsedRange>],
    ctx: &ValidationContext<'_>,
) -> RangeErrors {
    // Placeholder row added but never filled in
    if range.is_blank() {
        return RangeErrors::default();
    }

    let current = match check_date_format(range, ctx) {
        Ok(current) => current,
        Err(errors) => return errors,
    };

    let checks_siblings = ctx.rules == CoverageRules::Resource;

    check_start_before_end(&current)
        .or_else(|| checks_siblings.then(|| check_within_parent(&current, ctx)).flatten())
        .or_else(|| {
            checks_siblings
                .then(|| check_no_overlaps(index, &current, ranges, parsed, ctx))
                .flatten()
        })
        .unwrap_or_default()
}

fn parse_range(range: &CoverageRange, formatter: &dyn DateFormatter) -> Option<ParsedRange> {
    let begin = parse_coverage_date(range.begin()?, formatter)?;
    let end = match range.end() {
        Some(raw) => Some(parse_coverage_date(raw, formatter)?),
        None => None,
    };
    Some(ParsedRange { begin, end })
}

fn check_date_format(range: &CoverageRange, ctx: &ValidationContext<'_>) -> Result<ParsedRange, RangeErrors> {
    let invalid = || CoverageError::InvalidDateFormat {
        date_format: ctx.formatter.format_hint(),
    };
    let mut errors = RangeErrors::default();

    let begin = range.begin().and_then(|raw| parse_coverage_date(raw, ctx.formatter));
    if begin.is_none() {
        // An end date alone counts as a missing start date
        errors.insert(CoverageField::BeginCoverage, invalid());
    }

    let end = match range.end() {
        Some(raw) => {
            let end = parse_coverage_date(raw, ctx.formatter);
            if end.is_none() {
                errors.insert(CoverageField::EndCoverage, invalid());
            }
            end
        }
        None => None,
    };

    match begin {
        Some(begin) if errors.is_empty() => Ok(ParsedRange { begin, end }),
        _ => Err(errors),
    }
}

fn check_start_before_end(current: &ParsedRange) -> Option<RangeErrors> {
    (!current.is_ordered())
        .then(|| RangeErrors::single(CoverageField::BeginCoverage, CoverageError::StartAfterEnd))
}

/// Open ends on either side are compared as `today`, not as unbounded.
///
/// A parent window with an unreadable date contains nothing.
fn check_within_parent(current: &ParsedRange, ctx: &ValidationContext<'_>) -> Option<RangeErrors> {
    let parent = ctx.parent?;
    let raw_begin = parent.begin()?;
    let error = CoverageError::OutOfParentRange {
        start: format_bound(Some(raw_begin), ctx.formatter, false),
        end: format_bound(parent.end(), ctx.formatter, false),
    };

    let parent_begin = parse_coverage_date(raw_begin, ctx.formatter);
    let parent_end = match parent.end() {
        Some(raw) => parse_coverage_date(raw, ctx.formatter),
        None => Some(ctx.today),
    };
    let (Some(parent_begin), Some(parent_end)) = (parent_begin, parent_end) else {
        return Some(RangeErrors::both(error));
    };

    let window = DateInterval::new(parent_begin, parent_end);

    let mut errors = RangeErrors::default();
    if !window.contains_date(current.begin) {
        errors.insert(CoverageField::BeginCoverage, error.clone());
    }
    if !window.contains_date(current.end.unwrap_or(ctx.today)) {
        errors.insert(CoverageField::EndCoverage, error);
    }

    (!errors.is_empty()).then_some(errors)
}

fn check_no_overlaps(
    index: usize,
    current: &ParsedRange,
    ranges: &[CoverageRange],
    parsed: &[Option<ParsedRange>],
    ctx: &ValidationContext<'_>,
) -> Option<RangeErrors> {
    let sentinel = present_sentinel();
    let interval = current.interval(sentinel);

    parsed
        .iter()
        .zip(ranges)
        .enumerate()
        .filter(|(other_index, _)| *other_index != index)
        // Blank, unreadable and reversed siblings report their own errors
        .filter_map(|(_, (other, range))| other.filter(ParsedRange::is_ordered).map(|p| (p, range)))
        .find(|(other, _)| other.interval(sentinel).conflicts_with(&interval))
        .map(|(_, conflicting)| {
            RangeErrors::both(CoverageError::RangeOverlap {
                start: format_bound(conflicting.begin(), ctx.formatter, false),
                end: format_bound(conflicting.end(), ctx.formatter, false),
            })
        })
}
