//! CLI command definitions.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

pub mod types;
pub mod validate;

/// sndoc - ServiceNow design document tooling
#[derive(Parser)]
#[command(name = "sndoc")]
#[command(version, about = "sndoc - validate ServiceNow ITSM design-document data")]
#[command(long_about = r#"
sndoc checks the data behind ServiceNow ITSM design documents before the
documents are generated.

COMMANDS:
  validate  → Validate a JSON or YAML data file and print the report
  types     → List the known document types and their validators

EXIT CODES:
  0 - Success
  1 - General error
  2 - Invalid arguments
  3 - Validation failure
"#)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Suppress non-essential output
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Config file (default: config/sndoc.yaml, sndoc.yaml, ~/.sndoc/config.yaml)
    #[arg(short, long, global = true, env = "SNDOC_CONFIG")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Validate document data against the rules of its type
    Validate(validate::ValidateArgs),

    /// List document types
    Types(types::TypesArgs),
}
