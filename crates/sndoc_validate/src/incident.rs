//! Incident management design document validator.

use std::sync::LazyLock;

use regex::Regex;
use serde_json::Value;

use sndoc_core::DocumentData;

use crate::checks::Checks;
use crate::result::{ValidationLevel, ValidationResult};
use crate::validator::{DocumentValidator, Validator};

pub const RECOMMENDED_INCIDENT_TYPES: &[&str] = &["システム障害", "パフォーマンス問題", "ユーザーサポート"];
pub const RECOMMENDED_SLA_LEVELS: &[&str] = &["critical", "high", "medium", "low"];

const ESCALATION_TIME_WORDS: &[&str] = &["分", "時間", "日", "営業日"];

static ENGLISH_TIME_UNIT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\b(min(ute)?s?|h(ou)?rs?|hours?|(business\s+)?days?)\b")
        .expect("valid time unit regex")
});

static DURATION: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)[0-9]+\s*(分|時間|日|営業日|min(ute)?s?\b|h(ou)?rs?\b|hours?\b|(business\s+)?days?\b)",
    )
    .expect("valid duration regex")
});

/// Whether an SLA target names a concrete duration ("4時間", "30 minutes").
pub fn has_duration(text: &str) -> bool {
    DURATION.is_match(text)
}

#[derive(Debug, Default, Clone, Copy)]
pub struct IncidentManagementValidator;

impl IncidentManagementValidator {
    pub fn new() -> Self {
        Self
    }

    fn check_incident_types(&self, data: &DocumentData, checks: &mut Checks) {
        if !checks.list_field(data, "incident_types", 3, 20) {
            return;
        }
        let Some(types) = data.get("incident_types").and_then(Value::as_array) else {
            return;
        };

        let has_duplicates = types
            .iter()
            .enumerate()
            .any(|(i, t)| types[..i].contains(t));
        if has_duplicates {
            checks.push(
                ValidationResult::warning("incident_types", "Incident types contain duplicates")
                    .with_suggestion("Remove the duplicated entries"),
            );
        }

        let present: Vec<&str> = types.iter().filter_map(Value::as_str).collect();
        checks.missing_recommended(
            ValidationLevel::Info,
            "incident_types",
            &present,
            RECOMMENDED_INCIDENT_TYPES,
            "recommended incident types",
            "Consider adding the common incident types",
        );
    }

    fn check_priority_levels(&self, data: &DocumentData, checks: &mut Checks) {
        if !checks.list_field(data, "priority_levels", 3, 7) {
            return;
        }
        let Some(levels) = data.get("priority_levels").and_then(Value::as_array) else {
            return;
        };

        if levels.len() < 4 {
            checks.push(
                ValidationResult::info("priority_levels", "Few priority levels are defined")
                    .with_suggestion("Four or five priority levels are common practice"),
            );
        }
    }

    fn check_sla_targets(&self, data: &DocumentData, checks: &mut Checks) {
        let Some(targets) = data.get("sla_targets").and_then(Value::as_object) else {
            return;
        };

        let present: Vec<&str> = targets.keys().map(String::as_str).collect();
        checks.missing_recommended(
            ValidationLevel::Info,
            "sla_targets",
            &present,
            RECOMMENDED_SLA_LEVELS,
            "recommended SLA levels",
            "Define a target for every priority level",
        );

        for (level, target) in targets {
            let Some(text) = target.as_str() else {
                continue;
            };
            if !has_duration(text) {
                checks.push(
                    ValidationResult::warning(
                        format!("sla_targets.{level}"),
                        format!("SLA target does not name a clear duration: {text}"),
                    )
                    .with_suggestion("Use explicit durations such as 4時間, 30分 or 2営業日")
                    .with_value(target.clone()),
                );
            }
        }
    }

    fn check_escalation_rules(&self, data: &DocumentData, checks: &mut Checks) {
        let Some(rules) = data.get("escalation_rules").and_then(Value::as_str) else {
            return;
        };

        if rules.trim().chars().count() < 10 {
            checks.push(
                ValidationResult::warning("escalation_rules", "Escalation rules are too brief")
                    .with_suggestion("Describe the concrete conditions and steps"),
            );
        }

        let names_time = ESCALATION_TIME_WORDS.iter().any(|w| rules.contains(w))
            || ENGLISH_TIME_UNIT.is_match(rules);
        if !names_time {
            checks.push(
                ValidationResult::info("escalation_rules", "Escalation rules name no time limit")
                    .with_suggestion("Include a concrete time limit for each escalation"),
            );
        }
    }
}

impl Validator for IncidentManagementValidator {
    fn name(&self) -> &str {
        "Incident Management"
    }

    fn check(&self, data: &DocumentData, checks: &mut Checks) {
        DocumentValidator.check(data, checks);

        self.check_incident_types(data, checks);
        self.check_priority_levels(data, checks);
        self.check_sla_targets(data, checks);
        self.check_escalation_rules(data, checks);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn data(value: Value) -> DocumentData {
        value.as_object().cloned().unwrap()
    }

    fn base() -> DocumentData {
        data(json!({
            "project_name": "インシデント管理プロジェクト",
            "author": {"name": "山田太郎", "email": "yamada@example.com"}
        }))
    }

    #[test]
    fn test_valid_incident_management_data() {
        let mut input = base();
        input.insert(
            "incident_types".into(),
            json!(["システム障害", "パフォーマンス問題", "ユーザーサポート"]),
        );
        input.insert("priority_levels".into(), json!(["重要", "高", "中", "低"]));
        input.insert(
            "sla_targets".into(),
            json!({"critical": "4時間", "high": "8時間", "medium": "24時間", "low": "72時間"}),
        );
        input.insert("escalation_rules".into(), json!("30分以内に上位者へエスカレーション"));

        let report = IncidentManagementValidator.validate(&input);
        assert_eq!(report.document_type, "Incident Management");
        assert_eq!(report.errors, 0);
        assert_eq!(report.total_checks, 0);
    }

    #[test]
    fn test_insufficient_incident_types() {
        let mut input = base();
        input.insert("incident_types".into(), json!(["システム障害"]));

        let report = IncidentManagementValidator.validate(&input);
        let results: Vec<_> = report.results_for("incident_types").collect();
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].level, ValidationLevel::Warning);
    }

    #[test]
    fn test_duplicate_incident_types() {
        let mut input = base();
        input.insert(
            "incident_types".into(),
            json!(["システム障害", "システム障害", "パフォーマンス問題", "ユーザーサポート"]),
        );

        let report = IncidentManagementValidator.validate(&input);
        assert_eq!(report.warnings, 1);
        assert!(report.results[0].message.contains("duplicates"));
    }

    #[test]
    fn test_priority_levels() {
        let mut three = base();
        three.insert("priority_levels".into(), json!(["高", "中", "低"]));
        let report = IncidentManagementValidator.validate(&three);
        assert_eq!(report.fields_with(ValidationLevel::Info), vec!["priority_levels"]);

        let mut eight = base();
        eight.insert("priority_levels".into(), json!([1, 2, 3, 4, 5, 6, 7, 8]));
        let report = IncidentManagementValidator.validate(&eight);
        assert_eq!(report.fields_with(ValidationLevel::Warning), vec!["priority_levels"]);
        assert!(report.fields_with(ValidationLevel::Info).is_empty());
    }

    #[test]
    fn test_sla_targets_validation() {
        let mut input = base();
        input.insert("sla_targets".into(), json!({"critical": "4時間", "high": "ASAP"}));

        let report = IncidentManagementValidator.validate(&input);
        let info = report.fields_with(ValidationLevel::Info);
        assert_eq!(info, vec!["sla_targets"]);
        assert!(report.results[0].message.ends_with("medium, low"));
        assert_eq!(report.fields_with(ValidationLevel::Warning), vec!["sla_targets.high"]);
    }

    #[test]
    fn test_escalation_rules() {
        let mut input = base();
        input.insert("escalation_rules".into(), json!("上位者へ"));

        let report = IncidentManagementValidator.validate(&input);
        assert_eq!(report.warnings, 1);
        assert_eq!(report.fields_with(ValidationLevel::Info), vec!["escalation_rules"]);
    }

    #[test]
    fn test_escalation_time_words_are_whole_units() {
        for rules in [
            "Escalate to the duty manager today if unresolved",
            "Escalate on Monday when the backlog grows",
            "Review hourly reports and escalate someday",
        ] {
            let mut input = base();
            input.insert("escalation_rules".into(), json!(rules));
            let report = IncidentManagementValidator.validate(&input);
            assert_eq!(report.fields_with(ValidationLevel::Info), vec!["escalation_rules"], "{rules}");
        }

        for rules in [
            "Escalate to level 2 after 30 minutes",
            "Escalate within one hour of the first report",
            "Escalate after 2 business days without progress",
        ] {
            let mut input = base();
            input.insert("escalation_rules".into(), json!(rules));
            assert_eq!(IncidentManagementValidator.validate(&input).total_checks, 0, "{rules}");
        }
    }

    #[test]
    fn test_escalation_rules_as_list_are_ignored() {
        let mut input = base();
        input.insert("escalation_rules".into(), json!([{"level": 1, "time": "30分"}]));
        assert_eq!(IncidentManagementValidator.validate(&input).total_checks, 0);
    }

    #[test]
    fn test_has_duration() {
        for text in ["4時間", "30分", "2営業日", "1 日", "30 minutes", "4 hours", "2 business days", "8hrs"] {
            assert!(has_duration(text), "expected a duration in {text}");
        }
        for text in ["ASAP", "当日中", "hours", "4h later"] {
            assert!(!has_duration(text), "unexpected duration in {text}");
        }
    }

    #[test]
    fn test_document_checks_come_first() {
        let mut input = data(json!({"project_name": "テストプロジェクト"}));
        input.insert("incident_types".into(), json!(["システム障害"]));

        let report = IncidentManagementValidator.validate(&input);
        assert_eq!(report.results[0].field, "author");
        assert_eq!(report.results[1].field, "incident_types");
    }
}
