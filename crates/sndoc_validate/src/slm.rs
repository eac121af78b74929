//! Service level management (SLM) design document validator.

use serde_json::Value;

use sndoc_core::DocumentData;

use crate::checks::{entry_names, Checks};
use crate::result::{ValidationLevel, ValidationResult};
use crate::validator::{DocumentValidator, Validator};

pub const RECOMMENDED_SERVICE_CATEGORIES: &[&str] =
    &["基幹業務システム", "インフラサービス", "オフィス系システム"];
pub const REQUIRED_MEASUREMENT_METRICS: &[&str] = &["可用性", "応答時間", "顧客満足度"];
pub const RECOMMENDED_REPORTING_FREQUENCIES: &[&str] = &["daily", "weekly", "monthly", "quarterly"];

const METRIC_KEYS: &[&str] = &["name", "definition", "formula"];
const REVIEW_CYCLE_KEYS: &[&str] = &["name", "frequency", "participants"];

#[derive(Debug, Default, Clone, Copy)]
pub struct SlmDesignValidator;

impl SlmDesignValidator {
    pub fn new() -> Self {
        Self
    }

    fn check_service_categories(&self, data: &DocumentData, checks: &mut Checks) {
        if !checks.list_field(data, "service_categories", 2, 15) {
            return;
        }
        let Some(categories) = data.get("service_categories").and_then(Value::as_array) else {
            return;
        };

        checks.missing_recommended(
            ValidationLevel::Info,
            "service_categories",
            &entry_names(categories),
            RECOMMENDED_SERVICE_CATEGORIES,
            "recommended service categories",
            "Consider adding the basic service categories",
        );
    }

    fn check_measurement_metrics(&self, data: &DocumentData, checks: &mut Checks) {
        let Some(metrics) = data.get("measurement_metrics").and_then(Value::as_array) else {
            return;
        };

        checks.missing_recommended(
            ValidationLevel::Warning,
            "measurement_metrics",
            &entry_names(metrics),
            REQUIRED_MEASUREMENT_METRICS,
            "key measurement metrics",
            "Add the metrics service level management is built on",
        );

        for (i, metric) in metrics.iter().enumerate() {
            if let Some(metric) = metric.as_object() {
                checks.missing_keys(metric, &format!("measurement_metrics[{i}]"), METRIC_KEYS, "metric");
            }
        }
    }

    fn check_reporting_frequency(&self, data: &DocumentData, checks: &mut Checks) {
        let Some(frequency) = data.get("reporting_frequency").and_then(Value::as_object) else {
            return;
        };

        let present: Vec<&str> = frequency.keys().map(String::as_str).collect();
        checks.missing_recommended(
            ValidationLevel::Info,
            "reporting_frequency",
            &present,
            RECOMMENDED_REPORTING_FREQUENCIES,
            "recommended reporting frequencies",
            "Regular reports keep service levels under continuous watch",
        );
    }

    fn check_review_cycles(&self, data: &DocumentData, checks: &mut Checks) {
        let Some(cycles) = data.get("review_cycles").and_then(Value::as_array) else {
            return;
        };

        if cycles.len() < 2 {
            checks.push(
                ValidationResult::info("review_cycles", "Few review cycles are defined")
                    .with_suggestion("Several review cycles support continuous improvement"),
            );
        }

        for (i, cycle) in cycles.iter().enumerate() {
            if let Some(cycle) = cycle.as_object() {
                checks.missing_keys(cycle, &format!("review_cycles[{i}]"), REVIEW_CYCLE_KEYS, "review cycle");
            }
        }
    }
}

impl Validator for SlmDesignValidator {
    fn name(&self) -> &str {
        "SLM Design"
    }

    fn check(&self, data: &DocumentData, checks: &mut Checks) {
        DocumentValidator.check(data, checks);

        self.check_service_categories(data, checks);
        self.check_measurement_metrics(data, checks);
        self.check_reporting_frequency(data, checks);
        self.check_review_cycles(data, checks);
    }
}
