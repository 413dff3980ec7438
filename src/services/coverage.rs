//! Coverage service: validation, ordering and save preparation of coverage sets

use chrono::{NaiveDate, Utc};

use crate::{
    config::CoverageConfig,
    coverage::{
        date::describe_range, invalid_count, is_valid, payload::to_payload, sort_coverage_set, validate_coverage_set,
        CoverageRules, LocaleDateFormatter, RangeErrors, ValidationContext,
    },
    error::{AppError, AppResult},
    models::{CoveragePayload, CoverageRange, PublicationType},
};

#[derive(Clone)]
pub struct CoverageService {
    formatter: LocaleDateFormatter,
    fixed_today: Option<NaiveDate>,
}

impl CoverageService {
    pub fn new(config: &CoverageConfig) -> Self {
        Self {
            formatter: LocaleDateFormatter::new(&config.locale),
            fixed_today: None,
        }
    }

    /// Pin the date open ranges are compared against
    pub fn with_today(mut self, today: NaiveDate) -> Self {
        self.fixed_today = Some(today);
        self
    }

    pub fn formatter(&self) -> &LocaleDateFormatter {
        &self.formatter
    }

    pub fn today(&self) -> NaiveDate {
        self.fixed_today.unwrap_or_else(|| Utc::now().date_naive())
    }

    /// Field errors for each range, parallel to `ranges`
    pub fn validate_set(
        &self,
        ranges: &[CoverageRange],
        parent: Option<&CoverageRange>,
        rules: CoverageRules,
    ) -> Vec<RangeErrors> {
        let ctx = ValidationContext::new(&self.formatter, self.today())
            .with_parent(parent)
            .with_rules(rules);
        let results = validate_coverage_set(ranges, &ctx);

        tracing::debug!(
            ranges = ranges.len(),
            invalid = invalid_count(&results),
            has_parent = parent.is_some(),
            ?rules,
            "Validated coverage set"
        );
        for (index, errors) in results.iter().enumerate().filter(|(_, e)| !e.is_empty()) {
            let codes: Vec<String> = errors
                .iter()
                .map(|(field, error)| format!("{}:{}", field, error.code()))
                .collect();
            tracing::trace!(index, ?codes, "Coverage range rejected");
        }
        results
    }

    pub fn sort_set(&self, ranges: &[CoverageRange]) -> Vec<CoverageRange> {
        sort_coverage_set(ranges, &self.formatter)
    }

    /// Validate, then sort and normalize a set for persistence.
    ///
    /// Nothing is returned for a set with any invalid range: a set is saved
    /// whole or not at all.
    pub fn prepare_save(
        &self,
        ranges: &[CoverageRange],
        parent: Option<&CoverageRange>,
        rules: CoverageRules,
    ) -> AppResult<Vec<CoveragePayload>> {
        let results = self.validate_set(ranges, parent, rules);
        self.payload_for(&results, ranges, rules)
    }

    /// Sorted persistence payload for `ranges`, given their validation `results`
    pub fn payload_for(
        &self,
        results: &[RangeErrors],
        ranges: &[CoverageRange],
        rules: CoverageRules,
    ) -> AppResult<Vec<CoveragePayload>> {
        if !is_valid(results) {
            tracing::info!("Rejected coverage set of {} range(s)", ranges.len());
            return Err(AppError::CoverageRejected(results.to_vec()));
        }

        let filled: Vec<CoverageRange> = ranges.iter().filter(|r| !r.is_blank()).cloned().collect();
        if rules == CoverageRules::Package && filled.len() > 1 {
            return Err(AppError::Validation(
                "A package's custom coverage holds a single date range".to_string(),
            ));
        }

        let sorted = self.sort_set(&filled);
        to_payload(&sorted, &self.formatter)
            .ok_or_else(|| AppError::Internal("Validated coverage dates could not be read".to_string()))
    }

    /// Display strings such as `01/01/2003 - Present`; book-like titles show years only
    pub fn describe(&self, ranges: &[CoverageRange], publication_type: Option<PublicationType>) -> Vec<String> {
        let year_only = publication_type.map_or(false, |p| p.is_book_like());
        ranges
            .iter()
            .filter(|range| !range.is_blank())
            .map(|range| describe_range(range, &self.formatter, year_only))
            .collect()
    }
}
