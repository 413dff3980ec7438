//! Custom coverage date ranges: validation, ordering and editing

pub mod date;
pub mod form;
pub mod interval;
pub mod payload;
pub mod sorter;
pub mod validator;

pub use date::{DateFormatter, LocaleDateFormatter};
pub use form::{CoverageForm, FormError, FormMode, SubmitOutcome};
pub use sorter::sort_coverage_set;
pub use validator::{
    invalid_count, is_valid, validate_coverage_set, CoverageError, CoverageRules, RangeErrors, ValidationContext,
};
