//! Types command - List document types.

use anyhow::Result;
use clap::Args;
use serde::Serialize;

use sndoc_core::DocumentType;
use sndoc_validate::validator_for;

#[derive(Args)]
pub struct TypesArgs {
    /// Print the list as JSON
    #[arg(long)]
    json: bool,
}

#[derive(Serialize)]
struct TypeEntry {
    key: &'static str,
    label: &'static str,
    category: &'static str,
    validator: String,
}

pub fn execute(args: TypesArgs) -> Result<()> {
    let entries: Vec<TypeEntry> = DocumentType::all()
        .map(|doc_type| TypeEntry {
            key: doc_type.key(),
            label: doc_type.label(),
            category: doc_type.category().label(),
            validator: validator_for(doc_type).name().to_string(),
        })
        .collect();

    if args.json {
        println!("{}", serde_json::to_string_pretty(&entries)?);
        return Ok(());
    }

    let width = entries.iter().map(|e| e.key.len()).max().unwrap_or(0);
    for entry in &entries {
        println!(
            "{:width$}  {} [{}] ({})",
            entry.key,
            entry.label,
            entry.category,
            entry.validator,
            width = width
        );
    }
    println!();
    println!("{} document types", entries.len());

    Ok(())
}
