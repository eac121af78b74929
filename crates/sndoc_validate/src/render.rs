//! Report export in text, markdown, html and json.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{ValidateError, ValidateResult};
use crate::result::{ValidationLevel, ValidationReport, ValidationResult};

/// Output format of an exported report.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case", try_from = "String")]
pub enum ReportFormat {
    #[default]
    Text,
    Markdown,
    Html,
    Json,
}

impl ReportFormat {
    pub fn all() -> &'static [ReportFormat] {
        &[ReportFormat::Text, ReportFormat::Markdown, ReportFormat::Html, ReportFormat::Json]
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ReportFormat::Text => "text",
            ReportFormat::Markdown => "markdown",
            ReportFormat::Html => "html",
            ReportFormat::Json => "json",
        }
    }

    /// File extension for reports written to disk.
    pub fn extension(&self) -> &'static str {
        match self {
            ReportFormat::Text => "txt",
            ReportFormat::Markdown => "md",
            ReportFormat::Html => "html",
            ReportFormat::Json => "json",
        }
    }

    pub fn render(&self, report: &ValidationReport) -> ValidateResult<String> {
        match self {
            ReportFormat::Text => TextRenderer.render(report),
            ReportFormat::Markdown => MarkdownRenderer.render(report),
            ReportFormat::Html => HtmlRenderer.render(report),
            ReportFormat::Json => JsonRenderer.render(report),
        }
    }
}

impl fmt::Display for ReportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ReportFormat {
    type Err = ValidateError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "text" | "txt" => Ok(ReportFormat::Text),
            "markdown" | "md" => Ok(ReportFormat::Markdown),
            "html" => Ok(ReportFormat::Html),
            "json" => Ok(ReportFormat::Json),
            _ => Err(ValidateError::UnsupportedFormat(s.to_string())),
        }
    }
}

impl TryFrom<String> for ReportFormat {
    type Error = ValidateError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

/// Turns a report into a document of one format.
pub trait ReportRenderer {
    fn render(&self, report: &ValidationReport) -> ValidateResult<String>;
}

fn verdict(report: &ValidationReport) -> &'static str {
    if report.is_valid {
        "✅ PASSED"
    } else {
        "❌ FAILED"
    }
}

fn status_icon(result: &ValidationResult) -> &'static str {
    if result.is_valid {
        "✅"
    } else {
        "❌"
    }
}

/// Plain text, one numbered entry per result.
#[derive(Debug, Default, Clone, Copy)]
pub struct TextRenderer;

impl ReportRenderer for TextRenderer {
    fn render(&self, report: &ValidationReport) -> ValidateResult<String> {
        let mut lines = vec![
            format!("=== Validation Report: {} ===", report.document_type),
            format!("Total checks: {}", report.total_checks),
            format!("Passed: {}, Failed: {}", report.passed_checks, report.failed_checks),
            format!("Errors: {}, Warnings: {}", report.errors, report.warnings),
            format!("Result: {}", verdict(report)),
            String::new(),
        ];

        if !report.results.is_empty() {
            lines.push("Details:".to_string());
            for (i, result) in report.results.iter().enumerate() {
                lines.push(format!(
                    "{:2}. {} {} [{}] {}",
                    i + 1,
                    status_icon(result),
                    result.level.icon(),
                    result.field,
                    result.message
                ));
                if let Some(suggestion) = &result.suggestion {
                    lines.push(format!("    💡 Suggestion: {suggestion}"));
                }
                lines.push(String::new());
            }
        }

        Ok(lines.join("\n"))
    }
}

/// Markdown with a summary list and details grouped by level.
#[derive(Debug, Default, Clone, Copy)]
pub struct MarkdownRenderer;

impl MarkdownRenderer {
    fn heading(level: ValidationLevel) -> &'static str {
        match level {
            ValidationLevel::Error => "### 🚨 Errors",
            ValidationLevel::Warning => "### ⚠️ Warnings",
            ValidationLevel::Info => "### ℹ️ Info and recommendations",
        }
    }
}

impl ReportRenderer for MarkdownRenderer {
    fn render(&self, report: &ValidationReport) -> ValidateResult<String> {
        let mut lines = vec![
            format!("# Validation Report: {}", report.document_type),
            String::new(),
            "## Summary".to_string(),
            format!("- **Total checks**: {}", report.total_checks),
            format!("- **Passed**: {}", report.passed_checks),
            format!("- **Failed**: {}", report.failed_checks),
            format!("- **Errors**: {}", report.errors),
            format!("- **Warnings**: {}", report.warnings),
            format!("- **Result**: {}", verdict(report)),
            String::new(),
        ];

        if !report.results.is_empty() {
            lines.push("## Details".to_string());
            lines.push(String::new());

            for level in [ValidationLevel::Error, ValidationLevel::Warning, ValidationLevel::Info] {
                let mut results = report.by_level(level).peekable();
                if results.peek().is_none() {
                    continue;
                }

                lines.push(Self::heading(level).to_string());
                for result in results {
                    lines.push(format!("- **{}**: {}", result.field, result.message));
                    if let Some(suggestion) = &result.suggestion {
                        lines.push(format!("  - 💡 **Suggestion**: {suggestion}"));
                    }
                }
                lines.push(String::new());
            }
        }

        Ok(lines.join("\n"))
    }
}

/// Escape text for use in HTML element content and attribute values.
pub fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

const HTML_STYLE: &str = r#"        body { font-family: 'Segoe UI', Tahoma, Geneva, Verdana, sans-serif; margin: 20px; }
        .header { background: #f8f9fa; padding: 20px; border-radius: 8px; margin-bottom: 20px; }
        .summary { display: grid; grid-template-columns: repeat(auto-fit, minmax(150px, 1fr)); gap: 15px; margin-bottom: 20px; }
        .metric { background: white; padding: 15px; border-radius: 6px; box-shadow: 0 2px 4px rgba(0,0,0,0.1); text-align: center; }
        .metric-value { font-size: 24px; font-weight: bold; color: #0066cc; }
        .metric-label { font-size: 12px; color: #666; margin-top: 5px; }
        .status.success { color: #28a745; }
        .status.error { color: #dc3545; }
        .result-item { margin: 10px 0; padding: 15px; border-radius: 6px; }
        .result-error { background: #fee; border-left: 4px solid #dc3545; }
        .result-warning { background: #fff3cd; border-left: 4px solid #ffc107; }
        .result-info { background: #e7f3ff; border-left: 4px solid #0066cc; }
        .suggestion { margin-top: 8px; font-style: italic; color: #666; }"#;

/// Standalone HTML page.
#[derive(Debug, Default, Clone, Copy)]
pub struct HtmlRenderer;

impl HtmlRenderer {
    fn metric(value: usize, label: &str) -> String {
        format!(
            "        <div class=\"metric\">\n            <div class=\"metric-value\">{value}</div>\n            <div class=\"metric-label\">{label}</div>\n        </div>"
        )
    }
}

impl ReportRenderer for HtmlRenderer {
    fn render(&self, report: &ValidationReport) -> ValidateResult<String> {
        let title = escape_html(&report.document_type);
        let status_class = if report.is_valid { "success" } else { "error" };

        let mut lines = vec![
            "<!DOCTYPE html>".to_string(),
            "<html lang=\"ja\">".to_string(),
            "<head>".to_string(),
            "    <meta charset=\"UTF-8\">".to_string(),
            "    <meta name=\"viewport\" content=\"width=device-width, initial-scale=1.0\">".to_string(),
            format!("    <title>Validation Report: {title}</title>"),
            "    <style>".to_string(),
            HTML_STYLE.to_string(),
            "    </style>".to_string(),
            "</head>".to_string(),
            "<body>".to_string(),
            "    <div class=\"header\">".to_string(),
            format!("        <h1>Validation Report: {title}</h1>"),
            format!(
                "        <p class=\"status {status_class}\"><strong>{}</strong></p>",
                verdict(report)
            ),
            "    </div>".to_string(),
            "    <div class=\"summary\">".to_string(),
            Self::metric(report.total_checks, "Total checks"),
            Self::metric(report.passed_checks, "Passed"),
            Self::metric(report.failed_checks, "Failed"),
            Self::metric(report.errors, "Errors"),
            Self::metric(report.warnings, "Warnings"),
            "    </div>".to_string(),
        ];

        if !report.results.is_empty() {
            lines.push("    <h2>Details</h2>".to_string());
            for result in &report.results {
                lines.push(format!("    <div class=\"result-item result-{}\">", result.level));
                lines.push(format!(
                    "        <strong>{} {}</strong>: {}",
                    result.level.icon(),
                    escape_html(&result.field),
                    escape_html(&result.message)
                ));
                if let Some(suggestion) = &result.suggestion {
                    lines.push(format!(
                        "        <div class=\"suggestion\">💡 Suggestion: {}</div>",
                        escape_html(suggestion)
                    ));
                }
                lines.push("    </div>".to_string());
            }
        }

        lines.push("</body>".to_string());
        lines.push("</html>".to_string());
        lines.push(String::new());

        Ok(lines.join("\n"))
    }
}

/// Pretty-printed JSON of the whole report.
#[derive(Debug, Default, Clone, Copy)]
pub struct JsonRenderer;

impl ReportRenderer for JsonRenderer {
    fn render(&self, report: &ValidationReport) -> ValidateResult<String> {
        Ok(serde_json::to_string_pretty(report)?)
    }
}
