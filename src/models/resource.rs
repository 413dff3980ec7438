//! Edit-form models for resources, custom packages and custom titles

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use indexmap::IndexMap;

use super::{
    coverage::{CoveragePayload, CoverageRange},
    enums::PublicationType,
};
use crate::coverage::RangeErrors;

/// Maximum length of a coverage statement
pub const COVERAGE_STATEMENT_MAX_LENGTH: usize = 350;
/// Custom package names must be shorter than this
pub const PACKAGE_NAME_MAX_LENGTH: usize = 200;
/// Custom title names must be shorter than this
pub const TITLE_NAME_MAX_LENGTH: usize = 400;

/// Custom embargo period as entered in the form.
///
/// The value is kept as raw JSON so non-numeric input can be reported instead
/// of being rejected at deserialization.
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CustomEmbargo {
    #[schema(value_type = Option<Object>)]
    pub custom_embargo_value: Option<serde_json::Value>,
    pub custom_embargo_unit: Option<String>,
}

/// Resource edit form submission
#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ResourceEdit {
    #[serde(default)]
    pub custom_coverages: Vec<CoverageRange>,
    /// Custom coverage of the parent package, if any
    pub package_coverage: Option<CoverageRange>,
    pub publication_type: Option<PublicationType>,
    /// Whether the coverage statement replaces the coverage dates ("yes"/"no")
    pub has_coverage_statement: Option<String>,
    #[validate(length(
        max = 350,
        message = "Statement must be 350 characters or less."
    ))]
    pub coverage_statement: Option<String>,
    /// Present only when the custom embargo inputs are shown
    pub custom_embargo: Option<CustomEmbargo>,
}

impl ResourceEdit {
    pub fn uses_coverage_statement(&self) -> bool {
        self.has_coverage_statement.as_deref() == Some("yes")
    }
}

/// Custom package edit form submission
#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PackageEdit {
    #[validate(length(
        min = 1,
        max = 199,
        message = "A package name must be between 1 and 199 characters."
    ))]
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub custom_coverages: Vec<CoverageRange>,
}

/// Custom title edit form submission
#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TitleEdit {
    #[validate(
        required(message = "Custom titles must have a name."),
        length(max = 399, message = "A title name must be 399 characters or less.")
    )]
    pub name: Option<String>,
    pub publication_type: Option<PublicationType>,
}

/// Outcome of validating an edit form
#[derive(Debug, Clone, Default, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct EditValidation {
    pub valid: bool,
    /// Errors on non-coverage fields, keyed by form field name
    #[schema(value_type = Object)]
    pub errors: IndexMap<String, String>,
    /// Field errors per coverage row, parallel to the submitted rows
    #[schema(value_type = Vec<Object>)]
    pub custom_coverages: Vec<RangeErrors>,
    /// Sorted coverage set to persist, present when the form is valid
    pub payload: Option<Vec<CoveragePayload>>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resource_edit_statement_length() {
        let edit = ResourceEdit {
            coverage_statement: Some("x".repeat(COVERAGE_STATEMENT_MAX_LENGTH)),
            ..Default::default()
        };
        assert!(edit.validate().is_ok());

        let edit = ResourceEdit {
            coverage_statement: Some("x".repeat(COVERAGE_STATEMENT_MAX_LENGTH + 1)),
            ..Default::default()
        };
        assert!(edit.validate().is_err());
    }

    #[test]
    fn test_package_name_bounds() {
        let blank = PackageEdit::default();
        assert!(blank.validate().is_err());

        let long = PackageEdit {
            name: "p".repeat(PACKAGE_NAME_MAX_LENGTH),
            ..Default::default()
        };
        assert!(long.validate().is_err());

        let ok = PackageEdit {
            name: "My package".to_string(),
            ..Default::default()
        };
        assert!(ok.validate().is_ok());
    }

    #[test]
    fn test_title_name_required() {
        assert!(TitleEdit::default().validate().is_err());

        let edit = TitleEdit {
            name: Some("t".repeat(TITLE_NAME_MAX_LENGTH)),
            publication_type: None,
        };
        assert!(edit.validate().is_err());
    }

    #[test]
    fn test_resource_edit_deserializes_camel_case() {
        let edit: ResourceEdit = serde_json::from_str(
            r#"{
                "customCoverages": [{"beginCoverage": "2010-01-01", "endCoverage": ""}],
                "hasCoverageStatement": "yes",
                "coverageStatement": "Only 2010 onwards",
                "customEmbargo": {"customEmbargoValue": 6, "customEmbargoUnit": "Months"}
            }"#,
        )
        .unwrap();
        assert_eq!(edit.custom_coverages.len(), 1);
        assert!(edit.uses_coverage_statement());
        assert!(edit.custom_embargo.is_some());
    }
}
