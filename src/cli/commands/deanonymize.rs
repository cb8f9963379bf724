//! Deanonymize command implementation
//!
//! Restores original values in a tokenized text from a mapping written by
//! `anonymize --mapping-out` (or from a full `--json` result).

use super::{read_input, write_output};
use crate::anonymization::{deanonymize, MappingSummary};
use anyhow::Context;
use clap::Args;
use std::path::{Path, PathBuf};

/// Arguments for the deanonymize command
#[derive(Args, Debug)]
pub struct DeanonymizeArgs {
    /// Mapping JSON file
    #[arg(short, long)]
    pub mapping: PathBuf,

    /// Input file (stdin when omitted)
    #[arg(short, long)]
    pub input: Option<PathBuf>,

    /// Output file (stdout when omitted)
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

/// Parse a mapping file: either a bare mapping summary or an anonymization
/// result carrying one
fn parse_mapping(content: &str) -> anyhow::Result<MappingSummary> {
    let value: serde_json::Value =
        serde_json::from_str(content).context("Mapping file is not valid JSON")?;

    let summary = match value.get("mapping_summary") {
        Some(inner) => inner.clone(),
        None => value,
    };
    serde_json::from_value(summary).context("Mapping file has an unexpected shape")
}

async fn load_mapping(path: &Path) -> anyhow::Result<MappingSummary> {
    let content = tokio::fs::read_to_string(path)
        .await
        .with_context(|| format!("Failed to read mapping file {}", path.display()))?;
    parse_mapping(&content)
}

impl DeanonymizeArgs {
    /// Execute the deanonymize command
    pub async fn execute(&self) -> anyhow::Result<i32> {
        tracing::info!(mapping = %self.mapping.display(), "Starting deanonymize command");

        let mapping = match load_mapping(&self.mapping).await {
            Ok(m) => m,
            Err(e) => {
                eprintln!("❌ {e:#}");
                return Ok(3); // Input error exit code
            }
        };

        let text = match read_input(self.input.as_deref()).await {
            Ok(t) => t,
            Err(e) => {
                eprintln!("❌ {e:#}");
                return Ok(3);
            }
        };

        let restored = deanonymize(&text, &mapping)?;
        write_output(self.output.as_deref(), &restored).await?;

        tracing::info!(
            tokens = mapping.values().map(|v| v.len()).sum::<usize>(),
            "Deanonymize command completed"
        );
        Ok(0)
    }
}
