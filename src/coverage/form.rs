//! Edit lifecycle of a coverage set
//!
//! A coverage list is either shown read-only, edited as a draft, or waiting
//! for the user to confirm removing one draft row. Saving validates the draft,
//! sorts it and replaces the saved set as a whole.

use std::mem;

use thiserror::Error;

use super::{
    payload::to_payload,
    sorter::sort_coverage_set,
    validator::{is_valid, validate_coverage_set, RangeErrors, ValidationContext},
};
use crate::models::coverage::{CoveragePayload, CoverageRange};

/// Transition not allowed from the current mode
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FormError {
    #[error("Coverage dates are not being edited")]
    NotEditing,

    #[error("Coverage dates are already being edited")]
    AlreadyEditing,

    #[error("No coverage row at index {0}")]
    NoSuchRow(usize),

    #[error("A row removal is waiting for confirmation")]
    RemovalPending,

    #[error("No row removal to confirm")]
    NothingToConfirm,

    #[error("Coverage dates could not be read")]
    UnreadableDates,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormMode {
    Viewing,
    Editing { draft: Vec<CoverageRange> },
    ConfirmingDelete { draft: Vec<CoverageRange>, index: usize },
}

/// Result of submitting a draft
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// Draft saved; this is the set to persist
    Saved(Vec<CoveragePayload>),
    /// Draft kept for correction, errors parallel to its rows
    Rejected(Vec<RangeErrors>),
}

#[derive(Debug, Clone)]
pub struct CoverageForm {
    saved: Vec<CoverageRange>,
    mode: FormMode,
}

impl CoverageForm {
    pub fn new(saved: Vec<CoverageRange>) -> Self {
        Self {
            saved,
            mode: FormMode::Viewing,
        }
    }

    pub fn saved(&self) -> &[CoverageRange] {
        &self.saved
    }

    pub fn mode(&self) -> &FormMode {
        &self.mode
    }

    pub fn draft(&self) -> Option<&[CoverageRange]> {
        match &self.mode {
            FormMode::Viewing => None,
            FormMode::Editing { draft } | FormMode::ConfirmingDelete { draft, .. } => Some(draft),
        }
    }

    /// Whether there is saved coverage to list, as opposed to an "add" prompt
    pub fn has_coverage(&self) -> bool {
        self.saved.first().map_or(false, |range| range.begin().is_some())
    }

    /// Start editing a copy of the saved set; an empty set starts with one blank row.
    pub fn begin_edit(&mut self) -> Result<(), FormError> {
        if self.mode != FormMode::Viewing {
            return Err(FormError::AlreadyEditing);
        }
        let mut draft = self.saved.clone();
        if draft.is_empty() {
            draft.push(CoverageRange::default());
        }
        self.mode = FormMode::Editing { draft };
        Ok(())
    }

    pub fn add_row(&mut self) -> Result<(), FormError> {
        self.editing_draft()?.push(CoverageRange::default());
        Ok(())
    }

    pub fn update_row(&mut self, index: usize, range: CoverageRange) -> Result<(), FormError> {
        let row = self
            .editing_draft()?
            .get_mut(index)
            .ok_or(FormError::NoSuchRow(index))?;
        *row = range;
        Ok(())
    }

    pub fn request_remove(&mut self, index: usize) -> Result<(), FormError> {
        let len = self.editing_draft()?.len();
        if index >= len {
            return Err(FormError::NoSuchRow(index));
        }
        if let FormMode::Editing { draft } = mem::replace(&mut self.mode, FormMode::Viewing) {
            self.mode = FormMode::ConfirmingDelete { draft, index };
        }
        Ok(())
    }

    pub fn confirm_remove(&mut self) -> Result<(), FormError> {
        match mem::replace(&mut self.mode, FormMode::Viewing) {
            FormMode::ConfirmingDelete { mut draft, index } => {
                draft.remove(index);
                self.mode = FormMode::Editing { draft };
                Ok(())
            }
            other => {
                self.mode = other;
                Err(FormError::NothingToConfirm)
            }
        }
    }

    pub fn cancel_remove(&mut self) -> Result<(), FormError> {
        match mem::replace(&mut self.mode, FormMode::Viewing) {
            FormMode::ConfirmingDelete { draft, .. } => {
                self.mode = FormMode::Editing { draft };
                Ok(())
            }
            other => {
                self.mode = other;
                Err(FormError::NothingToConfirm)
            }
        }
    }

    /// Drop the draft and go back to the saved set
    pub fn cancel(&mut self) -> Result<(), FormError> {
        if self.mode == FormMode::Viewing {
            return Err(FormError::NotEditing);
        }
        self.mode = FormMode::Viewing;
        Ok(())
    }

    /// Validate the draft and, when every row passes, save it sorted.
    pub fn submit(&mut self, ctx: &ValidationContext<'_>) -> Result<SubmitOutcome, FormError> {
        let draft = self.editing_draft()?;

        let errors = validate_coverage_set(draft, ctx);
        if !is_valid(&errors) {
            return Ok(SubmitOutcome::Rejected(errors));
        }

        let filled: Vec<CoverageRange> = draft.iter().filter(|r| !r.is_blank()).cloned().collect();
        let sorted = sort_coverage_set(&filled, ctx.formatter);
        let payload = to_payload(&sorted, ctx.formatter).ok_or(FormError::UnreadableDates)?;

        self.saved = sorted;
        self.mode = FormMode::Viewing;
        Ok(SubmitOutcome::Saved(payload))
    }

    fn editing_draft(&mut self) -> Result<&mut Vec<CoverageRange>, FormError> {
        match &mut self.mode {
            FormMode::Editing { draft } => Ok(draft),
            FormMode::ConfirmingDelete { .. } => Err(FormError::RemovalPending),
            FormMode::Viewing => Err(FormError::NotEditing),
        }
    }
}
