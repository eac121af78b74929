//! # sndoc_core
//!
//! Document model shared by the sndoc crates.
//!
//! - **Document types**: the catalogue of ServiceNow design documents, with
//!   their official names, keys and categories
//! - **Users**: authors and reviewers
//! - **Data bags**: untyped document data loaded from JSON or YAML
//!
//! ## Example
//!
//! ```rust
//! use sndoc_core::{parse_data, DataFormat, DocumentType};
//!
//! let doc_type: DocumentType = "incident_management".parse().unwrap();
//! assert_eq!(doc_type.label(), "インシデント管理設計書");
//!
//! let data = parse_data("project_name: ITSM導入\n", DataFormat::Yaml).unwrap();
//! assert_eq!(data["project_name"], "ITSM導入");
//! ```

pub mod data;
pub mod error;
pub mod models;

pub use data::{kind_name, load_data_file, parse_data, DataFormat, DocumentData};
pub use error::{CoreError, CoreResult};
pub use models::{DocumentCategory, DocumentType, User};
