//! Knowledge management design document validator.

use serde_json::Value;

use sndoc_core::DocumentData;

use crate::checks::{entry_names, Checks};
use crate::result::ValidationLevel;
use crate::validator::{DocumentValidator, Validator};

pub const RECOMMENDED_KNOWLEDGE_TYPES: &[&str] =
    &["How-to記事", "FAQ", "トラブルシューティングガイド", "ベストプラクティス"];
pub const RECOMMENDED_SEARCH_FEATURES: &[&str] = &["全文検索", "ファセット検索", "タグ検索"];
pub const RECOMMENDED_QUALITY_METRICS: &[&str] =
    &["ナレッジ活用率", "検索成功率", "ナレッジ品質スコア", "更新適時性"];

const CATEGORY_KEYS: &[&str] = &["name", "description", "audience"];

#[derive(Debug, Default, Clone, Copy)]
pub struct KnowledgeManagementValidator;

impl KnowledgeManagementValidator {
    pub fn new() -> Self {
        Self
    }

    fn check_knowledge_types(&self, data: &DocumentData, checks: &mut Checks) {
        if !checks.list_field(data, "knowledge_types", 2, 15) {
            return;
        }
        let Some(types) = data.get("knowledge_types").and_then(Value::as_array) else {
            return;
        };

        checks.missing_recommended(
            ValidationLevel::Info,
            "knowledge_types",
            &entry_names(types),
            RECOMMENDED_KNOWLEDGE_TYPES,
            "recommended knowledge types",
            "Consider adding the basic knowledge article types",
        );
    }

    fn check_content_categories(&self, data: &DocumentData, checks: &mut Checks) {
        if !checks.list_field(data, "content_categories", 3, 20) {
            return;
        }
        let Some(categories) = data.get("content_categories").and_then(Value::as_array) else {
            return;
        };

        for (i, category) in categories.iter().enumerate() {
            if let Some(category) = category.as_object() {
                let prefix = format!("content_categories[{i}]");
                checks.missing_keys(category, &prefix, CATEGORY_KEYS, "category");
            }
        }
    }

    fn check_search_features(&self, data: &DocumentData, checks: &mut Checks) {
        let Some(features) = data.get("search_features").and_then(Value::as_array) else {
            return;
        };

        checks.missing_recommended(
            ValidationLevel::Info,
            "search_features",
            &entry_names(features),
            RECOMMENDED_SEARCH_FEATURES,
            "recommended search features",
            "Basic search features improve usability",
        );
    }

    fn check_quality_metrics(&self, data: &DocumentData, checks: &mut Checks) {
        let Some(metrics) = data.get("quality_metrics").and_then(Value::as_array) else {
            return;
        };

        checks.missing_recommended(
            ValidationLevel::Info,
            "quality_metrics",
            &entry_names(metrics),
            RECOMMENDED_QUALITY_METRICS,
            "recommended quality metrics",
            "Track the basic metrics to manage knowledge quality",
        );
    }
}

impl Validator for KnowledgeManagementValidator {
    fn name(&self) -> &str {
        "Knowledge Management"
    }

    fn check(&self, data: &DocumentData, checks: &mut Checks) {
        DocumentValidator.check(data, checks);

        self.check_knowledge_types(data, checks);
        self.check_content_categories(data, checks);
        self.check_search_features(data, checks);
        self.check_quality_metrics(data, checks);
    }
}
