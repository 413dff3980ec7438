//! Data models for eHoldings edit forms

pub mod coverage;
pub mod enums;
pub mod resource;

// Re-export commonly used types
pub use coverage::{CoverageField, CoveragePayload, CoverageRange};
pub use enums::{EmbargoUnit, PublicationType};
pub use resource::{CustomEmbargo, EditValidation, PackageEdit, ResourceEdit, TitleEdit};
