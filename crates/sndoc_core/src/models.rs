//! Document model: the catalogue of design-document types and the people
//! who author them.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use crate::error::CoreError;

/// Groups of design documents delivered in a ServiceNow project.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum DocumentCategory {
    Foundation,
    ItsmProcess,
    CmdbHierarchy,
    SecurityGovernance,
    EnvironmentRelease,
    Technical,
    MigrationCutover,
    OrganizationalChange,
    OperationMaintenance,
    TestQuality,
}

impl DocumentCategory {
    pub fn label(&self) -> &'static str {
        match self {
            DocumentCategory::Foundation => "基本設計書類",
            DocumentCategory::ItsmProcess => "ITSMプロセス設計書類",
            DocumentCategory::CmdbHierarchy => "CMDB・サービス階層設計書類",
            DocumentCategory::SecurityGovernance => "セキュリティ・ガバナンス設計書類",
            DocumentCategory::EnvironmentRelease => "環境・リリース管理設計書類",
            DocumentCategory::Technical => "技術設計書類",
            DocumentCategory::MigrationCutover => "移行・カットオーバー設計書類",
            DocumentCategory::OrganizationalChange => "組織変更管理・教育設計書類",
            DocumentCategory::OperationMaintenance => "運用・保守設計書類",
            DocumentCategory::TestQuality => "テスト・品質管理書類",
        }
    }
}

/// A kind of design document.
///
/// The serde form is the snake_case key (`incident_management`); `Display`
/// prints the official document name.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum DocumentType {
    CurrentStateAnalysis,
    BusinessRequirements,
    BasicDesign,
    DetailedDesign,

    IncidentManagement,
    ProblemManagement,
    ChangeManagement,
    ServiceCatalog,
    KnowledgeManagement,
    SlmDesign,

    CmdbDesign,
    ServiceHierarchy,
    CiIdentification,
    DiscoveryMid,

    SecurityDesign,
    AclRoleMapping,
    ComplianceDesign,
    AuditLogDesign,

    EnvironmentStrategy,
    CicdDevops,
    ReleaseManagement,
    UpdateSetStrategy,

    DatabaseDesign,
    WorkflowDesign,
    UiUxDesign,
    IntegrationDesign,
    LicenseRole,

    DataMigration,
    CutoverPlan,
    MigrationRunbook,
    HypercarePlan,

    OcmDesign,
    TrainingPlan,
    CommunicationPlan,
    ChampionNetwork,

    OperationDesign,
    MaintenanceProcedure,
    KpiPaDesign,
    PerformanceCapacity,

    TestDesign,
    QualityAssurance,
    ReviewChecklist,
}

use DocumentCategory as C;
use DocumentType as D;

// (type, key, label, category) in catalogue order.
const CATALOGUE: &[(DocumentType, &str, &str, DocumentCategory)] = &[
    (D::CurrentStateAnalysis, "current_state_analysis", "現状分析書", C::Foundation),
    (D::BusinessRequirements, "business_requirements", "業務要件定義書", C::Foundation),
    (D::BasicDesign, "basic_design", "基本設計書", C::Foundation),
    (D::DetailedDesign, "detailed_design", "詳細設計書", C::Foundation),
    (D::IncidentManagement, "incident_management", "インシデント管理設計書", C::ItsmProcess),
    (D::ProblemManagement, "problem_management", "問題管理設計書", C::ItsmProcess),
    (D::ChangeManagement, "change_management", "変更管理設計書", C::ItsmProcess),
    (D::ServiceCatalog, "service_catalog", "サービスカタログ設計書", C::ItsmProcess),
    (D::KnowledgeManagement, "knowledge_management", "ナレッジ管理設計書", C::ItsmProcess),
    (D::SlmDesign, "slm_design", "SLM設計書", C::ItsmProcess),
    (D::CmdbDesign, "cmdb_design", "CMDB設計書", C::CmdbHierarchy),
    (D::ServiceHierarchy, "service_hierarchy", "サービス階層設計書", C::CmdbHierarchy),
    (D::CiIdentification, "ci_identification", "CI識別・正規化設計書", C::CmdbHierarchy),
    (D::DiscoveryMid, "discovery_mid", "Discovery・MID設計書", C::CmdbHierarchy),
    (D::SecurityDesign, "security_design", "セキュリティ設計書", C::SecurityGovernance),
    (D::AclRoleMapping, "acl_role_mapping", "ACL・ロールマッピング設計書", C::SecurityGovernance),
    (D::ComplianceDesign, "compliance_design", "コンプライアンス設計書", C::SecurityGovernance),
    (D::AuditLogDesign, "audit_log_design", "監査ログ設計書", C::SecurityGovernance),
    (D::EnvironmentStrategy, "environment_strategy", "環境戦略設計書", C::EnvironmentRelease),
    (D::CicdDevops, "cicd_devops", "CI/CD・DevOps設計書", C::EnvironmentRelease),
    (D::ReleaseManagement, "release_management", "リリース管理設計書", C::EnvironmentRelease),
    (D::UpdateSetStrategy, "update_set_strategy", "Update Set管理設計書", C::EnvironmentRelease),
    (D::DatabaseDesign, "database_design", "データベース設計書", C::Technical),
    (D::WorkflowDesign, "workflow_design", "ワークフロー設計書", C::Technical),
    (D::UiUxDesign, "ui_ux_design", "UI/UX設計書", C::Technical),
    (D::IntegrationDesign, "integration_design", "システム連携設計書", C::Technical),
    (D::LicenseRole, "license_role", "ライセンス・ロール設計書", C::Technical),
    (D::DataMigration, "data_migration", "データ移行設計書", C::MigrationCutover),
    (D::CutoverPlan, "cutover_plan", "カットオーバー計画書", C::MigrationCutover),
    (D::MigrationRunbook, "migration_runbook", "移行ランブック", C::MigrationCutover),
    (D::HypercarePlan, "hypercare_plan", "HyperCare計画書", C::MigrationCutover),
    (D::OcmDesign, "ocm_design", "組織変更管理設計書", C::OrganizationalChange),
    (D::TrainingPlan, "training_plan", "教育・トレーニング計画書", C::OrganizationalChange),
    (D::CommunicationPlan, "communication_plan", "コミュニケーション計画書", C::OrganizationalChange),
    (D::ChampionNetwork, "champion_network", "Champion Network設計書", C::OrganizationalChange),
    (D::OperationDesign, "operation_design", "運用設計書", C::OperationMaintenance),
    (D::MaintenanceProcedure, "maintenance_procedure", "保守運用手順書", C::OperationMaintenance),
    (D::KpiPaDesign, "kpi_pa_design", "KPI・PA設計書", C::OperationMaintenance),
    (D::PerformanceCapacity, "performance_capacity", "性能・キャパシティ設計書", C::OperationMaintenance),
    (D::TestDesign, "test_design", "テスト設計書", C::TestQuality),
    (D::QualityAssurance, "quality_assurance", "品質保証計画書", C::TestQuality),
    (D::ReviewChecklist, "review_checklist", "レビューチェックリスト", C::TestQuality),
];

impl DocumentType {
    /// All document types in catalogue order.
    pub fn all() -> impl Iterator<Item = DocumentType> {
        CATALOGUE.iter().map(|(doc_type, ..)| *doc_type)
    }

    fn entry(&self) -> &'static (DocumentType, &'static str, &'static str, DocumentCategory) {
        // Every variant has exactly one catalogue row; see `catalogue_is_complete`.
        CATALOGUE
            .iter()
            .find(|(doc_type, ..)| doc_type == self)
            .unwrap_or(&CATALOGUE[0])
    }

    /// Snake_case identifier, identical to the serde form.
    pub fn key(&self) -> &'static str {
        self.entry().1
    }

    /// Official document name.
    pub fn label(&self) -> &'static str {
        self.entry().2
    }

    pub fn category(&self) -> DocumentCategory {
        self.entry().3
    }
}

impl fmt::Display for DocumentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for DocumentType {
    type Err = CoreError;

    /// Accepts the key in any case with `-`, `_` or spaces as separators,
    /// or the exact document name.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let normalized = trimmed.to_lowercase().replace(['-', ' '], "_");

        CATALOGUE
            .iter()
            .find(|(_, key, label, _)| *key == normalized || *label == trimmed)
            .map(|(doc_type, ..)| *doc_type)
            .ok_or_else(|| CoreError::UnknownDocumentType(s.to_string()))
    }
}

/// Author, reviewer or approver of a document.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct User {
    pub name: String,
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub department: Option<String>,
}

impl User {
    pub fn new(name: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
            role: None,
            department: None,
        }
    }

    pub fn with_role(mut self, role: impl Into<String>) -> Self {
        self.role = Some(role.into());
        self
    }

    pub fn with_department(mut self, department: impl Into<String>) -> Self {
        self.department = Some(department.into());
        self
    }

    /// The object shape validators expect under `author`.
    pub fn to_value(&self) -> Value {
        let mut value = json!({
            "name": self.name,
            "email": self.email,
        });
        if let Some(map) = value.as_object_mut() {
            if let Some(role) = &self.role {
                map.insert("role".to_string(), Value::String(role.clone()));
            }
            if let Some(department) = &self.department {
                map.insert("department".to_string(), Value::String(department.clone()));
            }
        }
        value
    }
}
