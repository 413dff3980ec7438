//! Edit form validation for resources, custom packages and custom titles

use indexmap::IndexMap;
use serde_json::Value;
use validator::{Validate, ValidationErrors};

use super::coverage::CoverageService;
use crate::{
    coverage::{invalid_count, is_valid, CoverageRules},
    error::{AppError, AppResult},
    models::{CoverageRange, CustomEmbargo, EditValidation, EmbargoUnit, PackageEdit, ResourceEdit, TitleEdit},
};

#[derive(Clone)]
pub struct EditsService {
    coverage: CoverageService,
}

impl EditsService {
    pub fn new(coverage: CoverageService) -> Self {
        Self { coverage }
    }

    /// Validate a resource edit: coverage dates against the package's
    /// coverage, coverage statement and custom embargo.
    pub fn validate_resource(&self, edit: &ResourceEdit) -> AppResult<EditValidation> {
        let mut errors = field_errors(edit.validate());

        if edit.uses_coverage_statement()
            && edit.coverage_statement.as_deref().map_or(true, |s| s.trim().is_empty())
        {
            errors.insert(
                "coverageStatement".to_string(),
                "Enter a coverage statement.".to_string(),
            );
        }

        if let Some(embargo) = &edit.custom_embargo {
            check_embargo(embargo, &mut errors);
        }

        self.finish(
            errors,
            &edit.custom_coverages,
            edit.package_coverage.as_ref(),
            CoverageRules::Resource,
        )
    }

    /// Validate a custom package edit: name and the package's own coverage
    pub fn validate_package(&self, edit: &PackageEdit) -> AppResult<EditValidation> {
        let errors = field_errors(edit.validate());
        self.finish(errors, &edit.custom_coverages, None, CoverageRules::Package)
    }

    pub fn validate_title(&self, edit: &TitleEdit) -> AppResult<EditValidation> {
        let errors = field_errors(edit.validate());
        Ok(EditValidation {
            valid: errors.is_empty(),
            errors,
            ..Default::default()
        })
    }

    fn finish(
        &self,
        mut errors: IndexMap<String, String>,
        ranges: &[CoverageRange],
        parent: Option<&CoverageRange>,
        rules: CoverageRules,
    ) -> AppResult<EditValidation> {
        let custom_coverages = self.coverage.validate_set(ranges, parent, rules);

        let payload = if is_valid(&custom_coverages) {
            match self.coverage.payload_for(&custom_coverages, ranges, rules) {
                Ok(payload) => Some(payload),
                Err(AppError::Validation(message)) => {
                    errors.insert("customCoverages".to_string(), message);
                    None
                }
                Err(e) => return Err(e),
            }
        } else {
            None
        };

        let valid = errors.is_empty() && payload.is_some();
        tracing::debug!(
            valid,
            field_errors = errors.len(),
            invalid_ranges = invalid_count(&custom_coverages),
            "Validated edit form"
        );

        Ok(EditValidation {
            valid,
            errors,
            custom_coverages: if valid { Vec::new() } else { custom_coverages },
            payload: payload.filter(|_| valid),
        })
    }
}

/// Flatten `validator` errors to `{ camelCaseField: message }`
fn field_errors(result: Result<(), ValidationErrors>) -> IndexMap<String, String> {
    let mut errors = IndexMap::new();
    if let Err(validation) = result {
        for (field, field_errors) in validation.field_errors() {
            if let Some(error) = field_errors.first() {
                let message = error
                    .message
                    .as_ref()
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| format!("Invalid value ({})", error.code));
                errors.insert(camel_case(&field.to_string()), message);
            }
        }
    }
    errors.sort_keys();
    errors
}

fn camel_case(field: &str) -> String {
    let mut out = String::with_capacity(field.len());
    let mut upper = false;
    for c in field.chars() {
        if c == '_' {
            upper = true;
        } else if upper {
            out.extend(c.to_uppercase());
            upper = false;
        } else {
            out.push(c);
        }
    }
    out
}

/// Embargo value as a number; a blank string counts as zero, a missing value
/// is not a number.
fn embargo_number(value: Option<&Value>) -> Option<f64> {
    match value {
        None | Some(Value::Null) => None,
        Some(Value::Number(n)) => n.as_f64(),
        Some(Value::String(s)) if s.trim().is_empty() => Some(0.0),
        Some(Value::String(s)) => s.trim().parse::<f64>().ok().filter(|n| n.is_finite()),
        Some(_) => None,
    }
}

fn check_embargo(embargo: &CustomEmbargo, errors: &mut IndexMap<String, String>) {
    let Some(value) = embargo_number(embargo.custom_embargo_value.as_ref()) else {
        errors.insert(
            "customEmbargoValue".to_string(),
            "Enter a number.".to_string(),
        );
        return;
    };

    if value <= 0.0 {
        errors.insert(
            "customEmbargoValue".to_string(),
            "Enter a number greater than 0.".to_string(),
        );
        return;
    }

    let unit = embargo
        .custom_embargo_unit
        .as_deref()
        .and_then(|u| u.parse::<EmbargoUnit>().ok());
    if unit.is_none() {
        errors.insert(
            "customEmbargoUnit".to_string(),
            "Select a unit of time.".to_string(),
        );
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;
    use serde_json::json;

    use super::*;
    use crate::config::CoverageConfig;

    fn service() -> EditsService {
        let coverage = CoverageService::new(&CoverageConfig::default())
            .with_today(NaiveDate::from_ymd_opt(2024, 6, 15).unwrap());
        EditsService::new(coverage)
    }

    fn embargo(value: Value, unit: Option<&str>) -> CustomEmbargo {
        CustomEmbargo {
            custom_embargo_value: Some(value),
            custom_embargo_unit: unit.map(str::to_string),
        }
    }

    #[test]
    fn test_valid_resource_edit_returns_sorted_payload() {
        let edit = ResourceEdit {
            custom_coverages: vec![
                CoverageRange::open_ended("2012-01-01"),
                CoverageRange::new("2010-01-01", Some("2011-01-01")),
            ],
            package_coverage: Some(CoverageRange::open_ended("2005-01-01")),
            custom_embargo: Some(embargo(json!(6), Some("Months"))),
            ..Default::default()
        };
        let result = service().validate_resource(&edit).unwrap();
        assert!(result.valid, "{:?}", result);
        let payload = result.payload.unwrap();
        assert_eq!(payload[0].begin_coverage, "2010-01-01");
        assert_eq!(payload[1].begin_coverage, "2012-01-01");
    }

    #[test]
    fn test_resource_out_of_package_range() {
        let edit = ResourceEdit {
            custom_coverages: vec![CoverageRange::new("2009-01-01", Some("2011-01-01"))],
            package_coverage: Some(CoverageRange::new("2010-01-01", Some("2015-01-01"))),
            ..Default::default()
        };
        let result = service().validate_resource(&edit).unwrap();
        assert!(!result.valid);
        assert!(result.payload.is_none());
        assert_eq!(invalid_count(&result.custom_coverages), 1);
    }

    #[test]
    fn test_resource_edit_rejected_by_package_window() {
        let edit = ResourceEdit {
            custom_coverages: vec![CoverageRange::open_ended("2011-01-01")],
            package_coverage: Some(CoverageRange::new("2010-13-45", None)),
            ..Default::default()
        };
        let result = service().validate_resource(&edit).unwrap();
        assert!(!result.valid);
        assert!(result.payload.is_none());
        assert_eq!(result.custom_coverages[0].len(), 2);
    }

    #[test]
    fn test_embargo_rules() {
        let mut errors = IndexMap::new();
        check_embargo(&embargo(json!("abc"), Some("Days")), &mut errors);
        assert_eq!(errors["customEmbargoValue"], "Enter a number.");

        let mut errors = IndexMap::new();
        check_embargo(&embargo(json!(0), Some("Days")), &mut errors);
        assert_eq!(errors["customEmbargoValue"], "Enter a number greater than 0.");

        let mut errors = IndexMap::new();
        check_embargo(&embargo(json!("-3"), None), &mut errors);
        assert!(errors.contains_key("customEmbargoValue"));
        assert!(!errors.contains_key("customEmbargoUnit"));

        let mut errors = IndexMap::new();
        check_embargo(&embargo(json!("4"), Some("")), &mut errors);
        assert_eq!(errors["customEmbargoUnit"], "Select a unit of time.");

        let mut errors = IndexMap::new();
        check_embargo(&embargo(json!(2), Some("Years")), &mut errors);
        assert!(errors.is_empty());

        let mut errors = IndexMap::new();
        let missing = CustomEmbargo {
            custom_embargo_value: None,
            custom_embargo_unit: Some("Days".to_string()),
        };
        check_embargo(&missing, &mut errors);
        assert_eq!(errors["customEmbargoValue"], "Enter a number.");

        let mut errors = IndexMap::new();
        check_embargo(&embargo(json!(""), Some("Days")), &mut errors);
        assert_eq!(errors["customEmbargoValue"], "Enter a number greater than 0.");
    }

    #[test]
    fn test_coverage_statement_rules() {
        let edit = ResourceEdit {
            has_coverage_statement: Some("yes".to_string()),
            coverage_statement: Some("   ".to_string()),
            ..Default::default()
        };
        let result = service().validate_resource(&edit).unwrap();
        assert_eq!(result.errors["coverageStatement"], "Enter a coverage statement.");

        let edit = ResourceEdit {
            has_coverage_statement: Some("yes".to_string()),
            coverage_statement: Some("s".repeat(351)),
            ..Default::default()
        };
        let result = service().validate_resource(&edit).unwrap();
        assert_eq!(
            result.errors["coverageStatement"],
            "Statement must be 350 characters or less."
        );
    }

    #[test]
    fn test_package_edit() {
        let edit = PackageEdit {
            name: String::new(),
            custom_coverages: vec![CoverageRange::new("2012-01-01", Some("2011-01-01"))],
        };
        let result = service().validate_package(&edit).unwrap();
        assert!(!result.valid);
        assert!(result.errors.contains_key("name"));
        assert_eq!(invalid_count(&result.custom_coverages), 1);

        let edit = PackageEdit {
            name: "Open access journals".to_string(),
            custom_coverages: vec![
                CoverageRange::new("2001-01-01", Some("2002-01-01")),
                CoverageRange::new("2003-01-01", Some("2004-01-01")),
            ],
        };
        let result = service().validate_package(&edit).unwrap();
        assert!(!result.valid);
        assert!(result.errors.contains_key("customCoverages"));
    }

    #[test]
    fn test_title_edit() {
        let result = service().validate_title(&TitleEdit::default()).unwrap();
        assert_eq!(result.errors["name"], "Custom titles must have a name.");

        let edit = TitleEdit {
            name: Some("Journal of Things".to_string()),
            publication_type: None,
        };
        assert!(service().validate_title(&edit).unwrap().valid);
    }

    #[test]
    fn test_camel_case() {
        assert_eq!(camel_case("coverage_statement"), "coverageStatement");
        assert_eq!(camel_case("name"), "name");
    }
}
