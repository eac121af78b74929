//! Validate command - Validate a document data file.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Args;
use thiserror::Error;
use tracing::info;

use sndoc_core::{load_data_file, DocumentType};
use sndoc_validate::{
    ReportFormat, ValidateError, ValidationManager, ValidationMode, ValidationReport,
};

use crate::config::SndocConfig;

#[derive(Args)]
pub struct ValidateArgs {
    /// Document type key or name (e.g. incident_management)
    #[arg(short = 't', long = "type")]
    doc_type: DocumentType,

    /// JSON or YAML data file
    #[arg(short, long)]
    data: PathBuf,

    /// Validation mode: strict, permissive or info_only
    #[arg(short, long)]
    mode: Option<ValidationMode>,

    /// Report format: text, markdown, html or json
    #[arg(short, long)]
    format: Option<ReportFormat>,

    /// Write the report to a file instead of stdout; a name without an
    /// extension gets the format's extension
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Fill missing version, author and client from the config defaults
    #[arg(long)]
    apply_defaults: bool,
}

/// The report failed the gate of the active validation mode.
#[derive(Error, Debug)]
#[error("Validation failed for {document}: {errors} error(s) in {mode} mode")]
pub struct GateFailure {
    pub document: String,
    pub errors: usize,
    pub mode: ValidationMode,
}

pub fn execute(args: ValidateArgs, config_path: Option<&Path>) -> Result<()> {
    let current_dir = std::env::current_dir()?;
    let config = SndocConfig::load(config_path, &current_dir, dirs::home_dir().as_deref())?;

    let mode = args.mode.unwrap_or(config.validation.mode);
    let format = args.format.unwrap_or(config.validation.format);

    let mut data = load_data_file(&args.data)
        .with_context(|| format!("Failed to load document data from {}", args.data.display()))?;

    if args.apply_defaults {
        let filled = config.defaults.apply(&mut data);
        if !filled.is_empty() {
            info!("Applied config defaults: {}", filled.join(", "));
        }
    }

    info!(
        "Validating {} as {} ({} mode)",
        args.data.display(),
        args.doc_type.label(),
        mode
    );

    let mut manager = ValidationManager::new(mode);
    let report = match manager.validate_document(args.doc_type, &data) {
        Ok(report) => report,
        Err(ValidateError::Rejected { report, .. }) => *report,
        Err(e) => return Err(e.into()),
    };

    write_report(&report, format, args.output.as_deref())?;

    if mode.blocks(&report) {
        return Err(GateFailure {
            document: args.doc_type.label().to_string(),
            errors: report.errors,
            mode,
        }
        .into());
    }

    Ok(())
}

fn write_report(report: &ValidationReport, format: ReportFormat, output: Option<&Path>) -> Result<()> {
    let rendered = format.render(report)?;

    match output {
        Some(path) => {
            // A bare name gets the extension of its format.
            let path = if path.extension().is_none() {
                path.with_extension(format.extension())
            } else {
                path.to_path_buf()
            };
            let path = path.as_path();

            if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
                fs::create_dir_all(parent)
                    .with_context(|| format!("Failed to create {}", parent.display()))?;
            }
            fs::write(path, rendered)
                .with_context(|| format!("Failed to write report to {}", path.display()))?;
            println!(
                "📄 {} report written to {} ({} error(s), {} warning(s))",
                format,
                path.display(),
                report.errors,
                report.warnings
            );
        }
        None => println!("{rendered}"),
    }

    Ok(())
}
