//! # sndoc_validate
//!
//! Leveled validation of design-document data.
//!
//! This crate provides:
//! - **Results and reports**: error, warning and info findings aggregated
//!   into a [`ValidationReport`]
//! - **Validators**: generic document checks plus incident, knowledge and
//!   SLM design rules
//! - **Validation manager**: strict, permissive and info-only modes with a
//!   history and summary
//! - **Report export**: text, markdown, html and json
//!
//! ## Example
//!
//! ```rust
//! use serde_json::json;
//! use sndoc_core::DocumentType;
//! use sndoc_validate::{ValidationManager, ValidationMode};
//!
//! let data = json!({
//!     "project_name": "ITSM導入",
//!     "author": {"name": "山田太郎", "email": "yamada@example.com"}
//! });
//!
//! let mut manager = ValidationManager::new(ValidationMode::Permissive);
//! let report = manager
//!     .validate_document(DocumentType::IncidentManagement, data.as_object().unwrap())
//!     .unwrap();
//!
//! assert!(report.is_valid);
//! println!("{}", manager.export_report(&report, "text").unwrap());
//! ```

pub mod checks;
pub mod error;
pub mod incident;
pub mod knowledge;
pub mod manager;
pub mod render;
pub mod result;
pub mod slm;
pub mod validator;

pub use checks::{Checks, FieldKind};
pub use error::{ValidateError, ValidateResult};
pub use incident::IncidentManagementValidator;
pub use knowledge::KnowledgeManagementValidator;
pub use manager::{validate_document_data, validator_for, ValidationManager, ValidationMode, ValidationSummary};
pub use render::{HtmlRenderer, JsonRenderer, MarkdownRenderer, ReportFormat, ReportRenderer, TextRenderer};
pub use result::{ValidationLevel, ValidationReport, ValidationResult};
pub use slm::SlmDesignValidator;
pub use validator::{DocumentValidator, Validator};
