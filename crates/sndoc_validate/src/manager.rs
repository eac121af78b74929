//! Validation manager: validator selection, validation modes, history and
//! report export.

use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use sndoc_core::{DocumentData, DocumentType};

use crate::error::{ValidateError, ValidateResult};
use crate::incident::IncidentManagementValidator;
use crate::knowledge::KnowledgeManagementValidator;
use crate::render::ReportFormat;
use crate::result::ValidationReport;
use crate::slm::SlmDesignValidator;
use crate::validator::{DocumentValidator, Validator};

static DOCUMENT: DocumentValidator = DocumentValidator;
static INCIDENT: IncidentManagementValidator = IncidentManagementValidator;
static KNOWLEDGE: KnowledgeManagementValidator = KnowledgeManagementValidator;
static SLM: SlmDesignValidator = SlmDesignValidator;

/// The built-in validator for a document type. Types without dedicated
/// rules use the generic [`DocumentValidator`].
pub fn validator_for(doc_type: DocumentType) -> &'static dyn Validator {
    match doc_type {
        DocumentType::IncidentManagement => &INCIDENT,
        DocumentType::KnowledgeManagement => &KNOWLEDGE,
        DocumentType::SlmDesign => &SLM,
        _ => &DOCUMENT,
    }
}

/// How a failed validation is treated.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case", try_from = "String")]
pub enum ValidationMode {
    /// Any error rejects the document.
    Strict,
    /// The report is always returned; errors fail the gate.
    #[default]
    Permissive,
    /// The report is always returned and the gate never fails.
    InfoOnly,
}

impl ValidationMode {
    /// Whether the report should stop the caller's workflow.
    pub fn blocks(&self, report: &ValidationReport) -> bool {
        match self {
            ValidationMode::Strict | ValidationMode::Permissive => !report.is_valid,
            ValidationMode::InfoOnly => false,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ValidationMode::Strict => "strict",
            ValidationMode::Permissive => "permissive",
            ValidationMode::InfoOnly => "info_only",
        }
    }
}

impl fmt::Display for ValidationMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ValidationMode {
    type Err = ValidateError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().replace('-', "_").as_str() {
            "strict" => Ok(ValidationMode::Strict),
            "permissive" => Ok(ValidationMode::Permissive),
            "info_only" | "info" => Ok(ValidationMode::InfoOnly),
            _ => Err(ValidateError::UnknownMode(s.to_string())),
        }
    }
}

impl TryFrom<String> for ValidationMode {
    type Error = ValidateError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

/// Aggregate statistics over the validation history.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct ValidationSummary {
    pub total_validations: usize,
    pub total_errors: usize,
    pub total_warnings: usize,
    pub total_checks: usize,
    /// Share of valid reports, between 0.0 and 1.0
    pub success_rate: f64,
    /// Document type of the latest report
    pub most_recent_validation: Option<String>,
}

/// Runs validators in a given mode and keeps the reports it produced.
pub struct ValidationManager {
    mode: ValidationMode,
    overrides: HashMap<DocumentType, Box<dyn Validator>>,
    history: Vec<ValidationReport>,
}

impl Default for ValidationManager {
    fn default() -> Self {
        Self::new(ValidationMode::default())
    }
}

impl ValidationManager {
    pub fn new(mode: ValidationMode) -> Self {
        Self {
            mode,
            overrides: HashMap::new(),
            history: Vec::new(),
        }
    }

    pub fn mode(&self) -> ValidationMode {
        self.mode
    }

    /// Use `validator` for `doc_type` instead of the built-in one.
    pub fn register(&mut self, doc_type: DocumentType, validator: impl Validator + 'static) -> &mut Self {
        debug!("Registering {} validator for {}", validator.name(), doc_type.key());
        self.overrides.insert(doc_type, Box::new(validator));
        self
    }

    /// The validator this manager runs for `doc_type`.
    pub fn validator(&self, doc_type: DocumentType) -> &dyn Validator {
        match self.overrides.get(&doc_type) {
            Some(validator) => validator.as_ref(),
            None => validator_for(doc_type),
        }
    }

    /// Validate one document and record the report.
    ///
    /// In strict mode a report with errors is still recorded, then returned
    /// inside [`ValidateError::Rejected`].
    pub fn validate_document(
        &mut self,
        doc_type: DocumentType,
        data: &DocumentData,
    ) -> ValidateResult<ValidationReport> {
        let validator = self.validator(doc_type);
        info!("Validating {} with the {} validator", doc_type.key(), validator.name());

        let report = validator.validate(data);
        debug!(
            "{}: {} check(s), {} error(s), {} warning(s)",
            report.document_type, report.total_checks, report.errors, report.warnings
        );
        self.history.push(report.clone());

        if self.mode == ValidationMode::Strict && !report.is_valid {
            warn!("Strict validation rejected {}", doc_type.key());
            return Err(ValidateError::rejected(report));
        }

        Ok(report)
    }

    /// Validate several documents in order. Only strict mode can fail, on
    /// the first rejected document.
    pub fn validate_documents(
        &mut self,
        documents: &[(DocumentType, DocumentData)],
    ) -> ValidateResult<Vec<(DocumentType, ValidationReport)>> {
        documents
            .iter()
            .map(|(doc_type, data)| Ok((*doc_type, self.validate_document(*doc_type, data)?)))
            .collect()
    }

    pub fn history(&self) -> &[ValidationReport] {
        &self.history
    }

    pub fn clear_history(&mut self) {
        self.history.clear();
    }

    pub fn summary(&self) -> ValidationSummary {
        if self.history.is_empty() {
            return ValidationSummary::default();
        }

        let total = self.history.len();
        let valid = self.history.iter().filter(|r| r.is_valid).count();

        ValidationSummary {
            total_validations: total,
            total_errors: self.history.iter().map(|r| r.errors).sum(),
            total_warnings: self.history.iter().map(|r| r.warnings).sum(),
            total_checks: self.history.iter().map(|r| r.total_checks).sum(),
            success_rate: valid as f64 / total as f64,
            most_recent_validation: self.history.last().map(|r| r.document_type.clone()),
        }
    }

    /// Render a report in the named format (`text`, `markdown`, `html`, `json`).
    pub fn export_report(&self, report: &ValidationReport, format: &str) -> ValidateResult<String> {
        format.parse::<ReportFormat>()?.render(report)
    }
}

/// Validate one document with a throwaway manager.
pub fn validate_document_data(
    doc_type: DocumentType,
    data: &DocumentData,
    mode: ValidationMode,
) -> ValidateResult<ValidationReport> {
    ValidationManager::new(mode).validate_document(doc_type, data)
}
