//! Validation levels, individual results and the aggregated report.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Severity of a validation result.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum ValidationLevel {
    /// Missing required data or a malformed value. Makes the report invalid.
    Error,
    /// Recommended data is missing or could be improved.
    Warning,
    /// Best-practice hints.
    Info,
}

impl ValidationLevel {
    pub fn icon(&self) -> &'static str {
        match self {
            ValidationLevel::Error => "🚨",
            ValidationLevel::Warning => "⚠️",
            ValidationLevel::Info => "ℹ️",
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ValidationLevel::Error => "error",
            ValidationLevel::Warning => "warning",
            ValidationLevel::Info => "info",
        }
    }
}

impl fmt::Display for ValidationLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ValidationLevel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "error" => Ok(ValidationLevel::Error),
            "warning" => Ok(ValidationLevel::Warning),
            "info" => Ok(ValidationLevel::Info),
            other => Err(format!("unknown validation level: {other}")),
        }
    }
}

/// Outcome of a single check.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ValidationResult {
    /// False only for error-level results
    pub is_valid: bool,
    pub level: ValidationLevel,
    /// Dotted path of the checked field, e.g. `author.email`
    pub field: String,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub suggestion: Option<String>,
    /// The offending value, when useful for the reader
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<Value>,
}

impl ValidationResult {
    pub fn new(level: ValidationLevel, field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            is_valid: level != ValidationLevel::Error,
            level,
            field: field.into(),
            message: message.into(),
            suggestion: None,
            value: None,
        }
    }

    pub fn error(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(ValidationLevel::Error, field, message)
    }

    pub fn warning(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(ValidationLevel::Warning, field, message)
    }

    pub fn info(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(ValidationLevel::Info, field, message)
    }

    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestion = Some(suggestion.into());
        self
    }

    pub fn with_value(mut self, value: Value) -> Self {
        self.value = Some(value);
        self
    }
}

/// Aggregated outcome of validating one document.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValidationReport {
    /// Name of the validator that produced the report
    pub document_type: String,
    pub total_checks: usize,
    pub passed_checks: usize,
    pub failed_checks: usize,
    pub warnings: usize,
    pub errors: usize,
    /// Results in the order the checks ran
    pub results: Vec<ValidationResult>,
    /// True when the report has no errors
    pub is_valid: bool,
    pub validated_at: DateTime<Utc>,
}

impl ValidationReport {
    /// Build a report, deriving every count from the results.
    pub fn from_results(document_type: impl Into<String>, results: Vec<ValidationResult>) -> Self {
        let count = |level: ValidationLevel| results.iter().filter(|r| r.level == level).count();
        let errors = count(ValidationLevel::Error);
        let warnings = count(ValidationLevel::Warning);
        let passed = results.iter().filter(|r| r.is_valid).count();

        Self {
            document_type: document_type.into(),
            total_checks: results.len(),
            passed_checks: passed,
            failed_checks: results.len() - passed,
            warnings,
            errors,
            is_valid: errors == 0,
            results,
            validated_at: Utc::now(),
        }
    }

    /// Results of one level, in report order.
    pub fn by_level(&self, level: ValidationLevel) -> impl Iterator<Item = &ValidationResult> {
        self.results.iter().filter(move |r| r.level == level)
    }

    pub fn errors_iter(&self) -> impl Iterator<Item = &ValidationResult> {
        self.by_level(ValidationLevel::Error)
    }

    /// Distinct fields that have at least one result of the given level.
    pub fn fields_with(&self, level: ValidationLevel) -> Vec<&str> {
        let mut fields: Vec<&str> = Vec::new();
        for result in self.by_level(level) {
            if !fields.contains(&result.field.as_str()) {
                fields.push(&result.field);
            }
        }
        fields
    }

    /// Results touching a field or any of its nested paths.
    pub fn results_for<'a>(&'a self, field: &'a str) -> impl Iterator<Item = &'a ValidationResult> {
        self.results.iter().filter(move |r| {
            r.field == field
                || r.field
                    .strip_prefix(field)
                    .is_some_and(|rest| rest.starts_with('.') || rest.starts_with('['))
        })
    }
}
