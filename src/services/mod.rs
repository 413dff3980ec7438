//! Business logic services

pub mod coverage;
pub mod edits;

use crate::config::CoverageConfig;

/// Container for all services
#[derive(Clone)]
pub struct Services {
    pub coverage: coverage::CoverageService,
    pub edits: edits::EditsService,
}

impl Services {
    /// Create all services from the coverage configuration
    pub fn new(config: &CoverageConfig) -> Self {
        Self::with_coverage(coverage::CoverageService::new(config))
    }

    /// Build services around an already configured coverage service
    pub fn with_coverage(coverage: coverage::CoverageService) -> Self {
        Self {
            edits: edits::EditsService::new(coverage.clone()),
            coverage,
        }
    }
}
