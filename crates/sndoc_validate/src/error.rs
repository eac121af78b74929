//! Error types for the validation module.

use thiserror::Error;

use crate::result::ValidationReport;

/// Result type alias for validation operations.
pub type ValidateResult<T> = Result<T, ValidateError>;

/// Errors that can occur while validating documents or exporting reports.
#[derive(Error, Debug)]
pub enum ValidateError {
    /// Raised in strict mode when a report contains errors.
    #[error("Validation failed for {document_type}: {errors} error(s)")]
    Rejected {
        document_type: String,
        errors: usize,
        report: Box<ValidationReport>,
    },

    #[error("Unsupported export format: {0}")]
    UnsupportedFormat(String),

    #[error("Unknown validation mode: {0}")]
    UnknownMode(String),

    #[error("Report serialization failed: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl ValidateError {
    pub(crate) fn rejected(report: ValidationReport) -> Self {
        ValidateError::Rejected {
            document_type: report.document_type.clone(),
            errors: report.errors,
            report: Box::new(report),
        }
    }

    /// The report carried by a strict-mode rejection.
    pub fn report(&self) -> Option<&ValidationReport> {
        match self {
            ValidateError::Rejected { report, .. } => Some(report),
            _ => None,
        }
    }

    /// Take ownership of the report carried by a strict-mode rejection.
    pub fn into_report(self) -> Option<ValidationReport> {
        match self {
            ValidateError::Rejected { report, .. } => Some(*report),
            _ => None,
        }
    }
}
