//! Coverage date range models

use serde::{Deserialize, Deserializer, Serialize};
use utoipa::ToSchema;

/// A coverage date range as entered in an edit form.
///
/// Dates are kept as raw strings until validation: a row may be partially
/// filled in or hold text that is not a date at all. `None` on the end date
/// means the range is open-ended ("Present").
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CoverageRange {
    /// Start date (YYYY-MM-DD or locale format)
    #[serde(default, deserialize_with = "blank_as_none")]
    pub begin_coverage: Option<String>,
    /// End date, absent for an ongoing range
    #[serde(default, deserialize_with = "blank_as_none")]
    pub end_coverage: Option<String>,
}

impl CoverageRange {
    pub fn new(begin: impl Into<String>, end: Option<&str>) -> Self {
        Self {
            begin_coverage: Some(begin.into()),
            end_coverage: end.map(str::to_string),
        }
    }

    pub fn open_ended(begin: impl Into<String>) -> Self {
        Self::new(begin, None)
    }

    pub fn begin(&self) -> Option<&str> {
        non_blank(self.begin_coverage.as_deref())
    }

    pub fn end(&self) -> Option<&str> {
        non_blank(self.end_coverage.as_deref())
    }

    /// A row with neither date filled in (a freshly added form row)
    pub fn is_blank(&self) -> bool {
        self.begin().is_none() && self.end().is_none()
    }
}

/// Form field of a coverage range an error is attached to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub enum CoverageField {
    BeginCoverage,
    EndCoverage,
}

impl CoverageField {
    pub fn as_str(&self) -> &'static str {
        match self {
            CoverageField::BeginCoverage => "beginCoverage",
            CoverageField::EndCoverage => "endCoverage",
        }
    }
}

impl std::fmt::Display for CoverageField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Coverage range in the shape the backend persists.
///
/// An open end is sent as an empty string.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CoveragePayload {
    pub begin_coverage: String,
    pub end_coverage: String,
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

/// Forms submit cleared date pickers as `""`
fn blank_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<String>::deserialize(deserializer)?;
    Ok(value.filter(|v| !v.trim().is_empty()))
}
