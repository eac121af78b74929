//! Check primitives shared by all validators.
//!
//! A [`Checks`] collector accumulates [`ValidationResult`]s. Every check
//! appends its findings and returns whether it passed, so a validator can
//! guard follow-up checks without ever stopping early.

use std::sync::LazyLock;

use chrono::NaiveDate;
use regex::Regex;
use serde_json::{Map, Value};

use sndoc_core::{kind_name, DocumentData};

use crate::result::{ValidationLevel, ValidationReport, ValidationResult};

static EMAIL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}$").expect("valid email regex")
});

static VERSION: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[0-9]+\.[0-9]+(\.[0-9]+)?(-[a-zA-Z0-9]+)?$").expect("valid version regex")
});

static DATE_PATTERNS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    [
        r"^([0-9]{4})-([0-9]{2})-([0-9]{2})$",
        r"^([0-9]{4})/([0-9]{2})/([0-9]{2})$",
        r"^([0-9]{4})年([0-9]{1,2})月([0-9]{1,2})日$",
    ]
    .iter()
    .map(|p| Regex::new(p).expect("valid date regex"))
    .collect()
});

const FORBIDDEN_NAME_CHARS: &[char] = &['<', '>', ':', '"', '/', '\\', '|', '?', '*'];

/// Expected JSON kind of a required field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    String,
    Object,
    Array,
    Number,
    Boolean,
}

impl FieldKind {
    pub fn name(&self) -> &'static str {
        match self {
            FieldKind::String => "string",
            FieldKind::Object => "object",
            FieldKind::Array => "array",
            FieldKind::Number => "number",
            FieldKind::Boolean => "boolean",
        }
    }

    pub fn matches(&self, value: &Value) -> bool {
        match self {
            FieldKind::String => value.is_string(),
            FieldKind::Object => value.is_object(),
            FieldKind::Array => value.is_array(),
            FieldKind::Number => value.is_number(),
            FieldKind::Boolean => value.is_boolean(),
        }
    }
}

/// Join a parent path and a key into a dotted field path.
pub fn field_path(prefix: Option<&str>, field: &str) -> String {
    match prefix {
        Some(prefix) if !prefix.is_empty() => format!("{prefix}.{field}"),
        _ => field.to_string(),
    }
}

/// Names of list entries: strings are taken as-is, objects contribute their
/// `name` key. Other entries are skipped.
pub fn entry_names(items: &[Value]) -> Vec<&str> {
    items
        .iter()
        .filter_map(|item| match item {
            Value::String(s) => Some(s.as_str()),
            Value::Object(map) => map.get("name").and_then(Value::as_str),
            _ => None,
        })
        .collect()
}

/// Parse a date written in one of the accepted document formats.
pub fn parse_date(text: &str) -> Option<NaiveDate> {
    DATE_PATTERNS.iter().find_map(|pattern| {
        let caps = pattern.captures(text)?;
        let year = caps[1].parse().ok()?;
        let month = caps[2].parse().ok()?;
        let day = caps[3].parse().ok()?;
        NaiveDate::from_ymd_opt(year, month, day)
    })
}

/// Collector for validation results.
#[derive(Debug, Default)]
pub struct Checks {
    results: Vec<ValidationResult>,
}

impl Checks {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, result: ValidationResult) {
        self.results.push(result);
    }

    pub fn results(&self) -> &[ValidationResult] {
        &self.results
    }

    pub fn len(&self) -> usize {
        self.results.len()
    }

    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }

    pub fn into_report(self, document_type: impl Into<String>) -> ValidationReport {
        ValidationReport::from_results(document_type, self.results)
    }

    /// A required field must exist, be non-empty and have the expected kind.
    pub fn required_field(
        &mut self,
        map: &DocumentData,
        prefix: Option<&str>,
        field: &str,
        kind: FieldKind,
    ) -> bool {
        let path = field_path(prefix, field);

        let Some(value) = map.get(field) else {
            self.push(
                ValidationResult::error(&path, format!("Required field '{path}' is missing"))
                    .with_suggestion(format!("Add the field '{path}'")),
            );
            return false;
        };

        let blank = match value {
            Value::Null => true,
            Value::String(s) => s.trim().is_empty(),
            _ => false,
        };
        if blank {
            self.push(
                ValidationResult::error(&path, format!("Required field '{path}' is empty"))
                    .with_suggestion(format!("Set a meaningful value for '{path}'")),
            );
            return false;
        }

        if !kind.matches(value) {
            self.push(
                ValidationResult::error(
                    &path,
                    format!(
                        "Field '{path}' has the wrong type: expected {}, found {}",
                        kind.name(),
                        kind_name(value)
                    ),
                )
                .with_suggestion(format!("Provide '{path}' as a {}", kind.name()))
                .with_value(value.clone()),
            );
            return false;
        }

        true
    }

    pub fn email(&mut self, email: &str, field: &str) -> bool {
        let local = email.split('@').next().unwrap_or_default();
        let valid = EMAIL.is_match(email)
            && !email.contains("..")
            && !local.starts_with('.')
            && !local.ends_with('.');

        if !valid {
            self.push(
                ValidationResult::error(field, format!("Invalid email address: {email}"))
                    .with_suggestion("Use a valid address such as user@example.com")
                    .with_value(Value::String(email.to_string())),
            );
        }
        valid
    }

    /// Project names become file names, so they must be reasonably sized and
    /// free of characters file systems reject.
    pub fn project_name(&mut self, name: &str) -> bool {
        let field = "project_name";

        if name.trim().chars().count() < 3 {
            self.push(
                ValidationResult::warning(field, "Project name is too short (under 3 characters)")
                    .with_suggestion("Use a more specific project name"),
            );
            return false;
        }

        if name.chars().count() > 100 {
            self.push(
                ValidationResult::warning(field, "Project name is too long (over 100 characters)")
                    .with_suggestion("Use a more concise project name"),
            );
            return false;
        }

        if name.contains(FORBIDDEN_NAME_CHARS) {
            self.push(
                ValidationResult::warning(
                    field,
                    "Project name contains characters that cannot be used in file names",
                )
                .with_suggestion(r#"Avoid the characters < > : " / \ | ? *"#),
            );
            return false;
        }

        true
    }

    /// Versions are expected as `X.Y` or `X.Y.Z`, optionally with a suffix.
    pub fn version_format(&mut self, value: &Value) -> bool {
        let text = match value {
            Value::String(s) => s.clone(),
            Value::Number(n) => n.to_string(),
            other => kind_name(other).to_string(),
        };

        if VERSION.is_match(&text) {
            return true;
        }

        self.push(
            ValidationResult::warning(
                "version",
                format!("Version does not follow the recommended format: {text}"),
            )
            .with_suggestion("Use X.Y.Z or X.Y (e.g. 1.0.0, 2.1)")
            .with_value(value.clone()),
        );
        false
    }

    pub fn date_format(&mut self, text: &str, field: &str) -> bool {
        if !DATE_PATTERNS.iter().any(|p| p.is_match(text)) {
            self.push(
                ValidationResult::warning(
                    field,
                    format!("Date does not follow a recommended format: {text}"),
                )
                .with_suggestion("Use YYYY-MM-DD, YYYY/MM/DD or YYYY年MM月DD日"),
            );
            return false;
        }

        if parse_date(text).is_none() {
            self.push(
                ValidationResult::warning(field, format!("Date is not a valid calendar date: {text}"))
                    .with_suggestion("Check the month and day values"),
            );
            return false;
        }

        true
    }

    /// Length bounds are inclusive and counted in characters.
    pub fn text_length(&mut self, text: &str, field: &str, min: usize, max: usize) -> bool {
        let len = text.chars().count();

        if len < min {
            self.push(
                ValidationResult::warning(
                    field,
                    format!("Text of '{field}' is too short ({len} characters, minimum {min})"),
                )
                .with_suggestion(format!("Enter at least {min} characters")),
            );
            return false;
        }

        if len > max {
            self.push(
                ValidationResult::warning(
                    field,
                    format!("Text of '{field}' is too long ({len} characters, maximum {max})"),
                )
                .with_suggestion(format!("Keep the text within {max} characters")),
            );
            return false;
        }

        true
    }

    /// An optional list field: absent passes, a non-list is an error, and the
    /// item count should stay within bounds.
    pub fn list_field(&mut self, map: &DocumentData, field: &str, min: usize, max: usize) -> bool {
        let Some(value) = map.get(field) else {
            return true;
        };

        let Some(items) = value.as_array() else {
            self.push(
                ValidationResult::error(field, format!("Field '{field}' must be a list"))
                    .with_suggestion(format!("Provide '{field}' as an array"))
                    .with_value(value.clone()),
            );
            return false;
        };

        let count = items.len();
        if count < min {
            self.push(
                ValidationResult::warning(
                    field,
                    format!("Field '{field}' has too few items ({count} items, minimum {min})"),
                )
                .with_suggestion(format!("Provide at least {min} items")),
            );
            return false;
        }

        if count > max {
            self.push(
                ValidationResult::warning(
                    field,
                    format!("Field '{field}' has too many items ({count} items, maximum {max})"),
                )
                .with_suggestion(format!("Keep the list within {max} items")),
            );
            return false;
        }

        true
    }

    /// Report, as one result, every recommended entry absent from `present`.
    pub fn missing_recommended(
        &mut self,
        level: ValidationLevel,
        field: &str,
        present: &[&str],
        recommended: &[&str],
        what: &str,
        suggestion: &str,
    ) -> bool {
        let missing: Vec<&str> = recommended
            .iter()
            .copied()
            .filter(|r| !present.contains(r))
            .collect();

        if missing.is_empty() {
            return true;
        }

        self.push(
            ValidationResult::new(level, field, format!("Missing {what}: {}", missing.join(", ")))
                .with_suggestion(suggestion),
        );
        false
    }

    /// One warning per key of `required` absent from `object`.
    pub fn missing_keys(
        &mut self,
        object: &Map<String, Value>,
        prefix: &str,
        required: &[&str],
        what: &str,
    ) -> bool {
        let mut all_present = true;
        for key in required {
            if object.contains_key(*key) {
                continue;
            }
            all_present = false;
            self.push(
                ValidationResult::warning(
                    field_path(Some(prefix), key),
                    format!("The {what} has no '{key}'"),
                )
                .with_suggestion(format!("Set '{key}' to make the {what} explicit")),
            );
        }
        all_present
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn data(value: Value) -> DocumentData {
        value.as_object().cloned().unwrap()
    }

    #[test]
    fn test_required_field_present() {
        let mut checks = Checks::new();
        let map = data(json!({"required_field": "value"}));
        assert!(checks.required_field(&map, None, "required_field", FieldKind::String));
        assert!(checks.is_empty());
    }

    #[test]
    fn test_required_field_missing_empty_and_mistyped() {
        let mut checks = Checks::new();
        let map = data(json!({"blank": "   ", "nothing": null, "author": "someone"}));

        assert!(!checks.required_field(&map, None, "absent", FieldKind::String));
        assert!(!checks.required_field(&map, None, "blank", FieldKind::String));
        assert!(!checks.required_field(&map, None, "nothing", FieldKind::String));
        assert!(!checks.required_field(&map, None, "author", FieldKind::Object));

        let report = checks.into_report("test");
        assert_eq!(report.errors, 4);
        assert!(report.results[0].message.contains("missing"));
        assert!(report.results[1].message.contains("empty"));
        assert!(report.results[3].message.contains("expected object, found string"));
    }

    #[test]
    fn test_required_field_nested_path() {
        let mut checks = Checks::new();
        checks.required_field(&DocumentData::new(), Some("author"), "email", FieldKind::String);
        assert_eq!(checks.results()[0].field, "author.email");
    }

    #[test]
    fn test_valid_emails() {
        for email in ["test@example.com", "user.name@domain.co.jp", "admin+tag@company.org"] {
            let mut checks = Checks::new();
            assert!(checks.email(email, "email"), "valid email failed: {email}");
        }
    }

    #[test]
    fn test_invalid_emails() {
        for email in [
            "invalid-email",
            "@domain.com",
            "user@",
            "user..name@domain.com",
            ".user@domain.com",
            "user@domain..com",
        ] {
            let mut checks = Checks::new();
            assert!(!checks.email(email, "email"), "invalid email passed: {email}");
            assert_eq!(checks.results()[0].level, ValidationLevel::Error);
        }
    }

    #[test]
    fn test_project_names() {
        for name in ["ServiceNow ITSM Project", "システム構築プロジェクト", "Project ABC-123"] {
            let mut checks = Checks::new();
            assert!(checks.project_name(name), "valid project name failed: {name}");
        }

        let mut checks = Checks::new();
        assert!(!checks.project_name("AB"));
        assert!(!checks.project_name(&"x".repeat(101)));
        assert!(!checks.project_name("Project: Phase 1"));
        let report = checks.into_report("test");
        assert_eq!(report.warnings, 3);
        assert_eq!(report.errors, 0);
    }

    #[test]
    fn test_project_name_counts_characters() {
        // Three multi-byte characters are long enough.
        let mut checks = Checks::new();
        assert!(checks.project_name("設計書"));
    }

    #[test]
    fn test_version_format() {
        let mut checks = Checks::new();
        assert!(checks.version_format(&json!("1.0.0")));
        assert!(checks.version_format(&json!("2.1")));
        assert!(checks.version_format(&json!("1.0.0-beta1")));
        assert!(checks.version_format(&json!(1.5)));
        assert!(checks.is_empty());

        assert!(!checks.version_format(&json!("v1")));
        assert!(!checks.version_format(&json!(3)));
        assert_eq!(checks.len(), 2);
        assert_eq!(checks.results()[0].field, "version");
    }

    #[test]
    fn test_date_format() {
        let mut checks = Checks::new();
        assert!(checks.date_format("2024-04-01", "created_date"));
        assert!(checks.date_format("2024/04/01", "created_date"));
        assert!(checks.date_format("2024年4月1日", "created_date"));
        assert!(checks.is_empty());

        assert!(!checks.date_format("04/01/2024", "created_date"));
        assert!(!checks.date_format("2024-02-30", "created_date"));
        assert_eq!(checks.len(), 2);
        assert!(checks.results()[1].message.contains("calendar"));
    }

    #[test]
    fn test_parse_date() {
        assert_eq!(parse_date("2024年12月5日"), NaiveDate::from_ymd_opt(2024, 12, 5));
        assert_eq!(parse_date("2024-13-01"), None);
    }

    #[test]
    fn test_text_length() {
        let mut checks = Checks::new();
        assert!(checks.text_length("管理者", "author.role", 2, 50));
        assert!(!checks.text_length("a", "author.role", 2, 50));
        assert!(!checks.text_length(&"a".repeat(51), "author.role", 2, 50));
        assert_eq!(checks.len(), 2);
    }

    #[test]
    fn test_list_field() {
        let map = data(json!({
            "few": ["a"],
            "many": ["a", "b", "c", "d"],
            "ok": ["a", "b"],
            "scalar": "a"
        }));
        let mut checks = Checks::new();

        assert!(checks.list_field(&map, "absent", 1, 3));
        assert!(checks.list_field(&map, "ok", 1, 3));
        assert!(!checks.list_field(&map, "few", 2, 3));
        assert!(!checks.list_field(&map, "many", 1, 3));
        assert!(!checks.list_field(&map, "scalar", 1, 3));

        let report = checks.into_report("test");
        assert_eq!(report.warnings, 2);
        assert_eq!(report.errors, 1);
        assert_eq!(report.results[2].field, "scalar");
    }

    #[test]
    fn test_missing_recommended_lists_all_missing() {
        let mut checks = Checks::new();
        let passed = checks.missing_recommended(
            ValidationLevel::Info,
            "incident_types",
            &["システム障害"],
            &["システム障害", "パフォーマンス問題", "ユーザーサポート"],
            "recommended incident types",
            "Consider adding common incident types",
        );

        assert!(!passed);
        let result = &checks.results()[0];
        assert_eq!(result.level, ValidationLevel::Info);
        assert!(result.message.ends_with("パフォーマンス問題, ユーザーサポート"));
    }

    #[test]
    fn test_missing_keys() {
        let object = data(json!({"name": "基本操作"}));
        let mut checks = Checks::new();
        assert!(!checks.missing_keys(
            &object,
            "content_categories[0]",
            &["name", "description", "audience"],
            "category"
        ));

        let fields: Vec<_> = checks.results().iter().map(|r| r.field.as_str()).collect();
        assert_eq!(
            fields,
            vec!["content_categories[0].description", "content_categories[0].audience"]
        );
    }

    #[test]
    fn test_entry_names_mixes_strings_and_objects() {
        let items = vec![json!("FAQ"), json!({"name": "How-to記事"}), json!({"title": "x"}), json!(3)];
        assert_eq!(entry_names(&items), vec!["FAQ", "How-to記事"]);
    }
}
