//! The validator trait and the generic document validator.

use chrono::{DateTime, Local, NaiveDateTime, TimeZone};
use serde_json::{Map, Value};
use tracing::debug;

use sndoc_core::DocumentData;

use crate::checks::{parse_date, Checks, FieldKind};
use crate::result::{ValidationReport, ValidationResult};

/// A set of checks for one kind of document.
///
/// Validators hold no state between runs: [`Validator::validate`] starts a
/// fresh [`Checks`] collector every time, and composite validators call the
/// `check` method of the validators they extend.
pub trait Validator: Send + Sync {
    /// Document type name written into the report.
    fn name(&self) -> &str;

    /// Append every finding for `data` to `checks`.
    fn check(&self, data: &DocumentData, checks: &mut Checks);

    fn validate(&self, data: &DocumentData) -> ValidationReport {
        let mut checks = Checks::new();
        self.check(data, &mut checks);
        debug!("{} validator produced {} result(s)", self.name(), checks.len());
        checks.into_report(self.name())
    }
}

/// Checks common to every design document: project name, author, version,
/// client and creation date.
#[derive(Debug, Default, Clone, Copy)]
pub struct DocumentValidator;

impl DocumentValidator {
    pub fn new() -> Self {
        Self
    }

    fn check_author(&self, author: &Map<String, Value>, checks: &mut Checks) {
        checks.required_field(author, Some("author"), "name", FieldKind::String);
        checks.required_field(author, Some("author"), "email", FieldKind::String);

        if let Some(name) = author.get("name").and_then(Value::as_str) {
            if name.trim().chars().count() < 2 {
                checks.push(
                    ValidationResult::warning("author.name", "Author name is too short")
                        .with_suggestion("Use a full name or a recognisable identifier"),
                );
            }
        }

        if let Some(email) = author.get("email").and_then(Value::as_str) {
            checks.email(email, "author.email");
        }

        if let Some(role) = author.get("role").and_then(Value::as_str) {
            checks.text_length(role, "author.role", 2, 50);
        }
    }

    fn check_client(&self, client: &Map<String, Value>, checks: &mut Checks) {
        match client.get("name") {
            None => checks.push(
                ValidationResult::info("client.name", "Setting a client name is recommended")
                    .with_suggestion("Name the client to make the project scope clear"),
            ),
            Some(Value::String(name)) => {
                checks.text_length(name, "client.name", 2, 100);
            }
            Some(_) => {}
        }

        if let Some(department) = client.get("department").and_then(Value::as_str) {
            checks.text_length(department, "client.department", 2, 50);
        }
    }

    fn check_created_date(&self, value: &Value, checks: &mut Checks) {
        let Value::String(text) = value else {
            return;
        };

        // Timestamps come from serialized datetimes and are only checked for
        // lying in the future, to the second.
        let in_future = match parse_timestamp(text) {
            Some(timestamp) => timestamp > Local::now(),
            None if checks.date_format(text, "created_date") => {
                parse_date(text).is_some_and(|date| date > Local::now().date_naive())
            }
            None => false,
        };

        if in_future {
            checks.push(
                ValidationResult::warning("created_date", "Creation date lies in the future")
                    .with_suggestion("Use today's date or a past date")
                    .with_value(value.clone()),
            );
        }
    }
}

fn parse_timestamp(text: &str) -> Option<DateTime<Local>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(text) {
        return Some(dt.with_timezone(&Local));
    }
    ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"]
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(text, fmt).ok())
        .and_then(|dt| Local.from_local_datetime(&dt).earliest())
}

impl Validator for DocumentValidator {
    fn name(&self) -> &str {
        "Document"
    }

    fn check(&self, data: &DocumentData, checks: &mut Checks) {
        checks.required_field(data, None, "project_name", FieldKind::String);
        checks.required_field(data, None, "author", FieldKind::Object);

        if let Some(name) = data.get("project_name").and_then(Value::as_str) {
            checks.project_name(name);
        }

        if let Some(author) = data.get("author").and_then(Value::as_object) {
            self.check_author(author, checks);
        }

        if let Some(version) = data.get("version") {
            checks.version_format(version);
        }

        if let Some(client) = data.get("client").and_then(Value::as_object) {
            self.check_client(client, checks);
        }

        if let Some(created_date) = data.get("created_date") {
            self.check_created_date(created_date, checks);
        }
    }
}
