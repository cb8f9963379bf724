//! Anonymize command implementation
//!
//! This module implements the `anonymize` command: read text, run the
//! engine, write the redacted text and optionally the mapping and a report.

use super::{read_input, write_output};
use crate::anonymization::{AnonymizationEngine, RunReport, Settings};
use crate::config::load_config;
use clap::Args;
use std::path::PathBuf;

/// Arguments for the anonymize command
#[derive(Args, Debug)]
pub struct AnonymizeArgs {
    /// Input file (stdin when omitted)
    #[arg(short, long)]
    pub input: Option<PathBuf>,

    /// Output file (stdout when omitted)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Write the original → token mapping as JSON to this file
    #[arg(long, value_name = "PATH")]
    pub mapping_out: Option<PathBuf>,

    /// Emit the full result as JSON instead of the redacted text
    #[arg(long)]
    pub json: bool,

    /// Print a run report on stderr
    #[arg(long)]
    pub report: bool,

    /// Enable every detection category, ignoring the configured toggles
    #[arg(long)]
    pub all: bool,
}

impl AnonymizeArgs {
    /// Execute the anonymize command
    pub async fn execute(&self, config_path: &str) -> anyhow::Result<i32> {
        tracing::info!(config_path = %config_path, "Starting anonymize command");

        let config = match load_config(config_path) {
            Ok(c) => c,
            Err(e) => {
                tracing::error!(error = %e, "Failed to load configuration");
                eprintln!("❌ Failed to load configuration: {e}");
                return Ok(2); // Configuration error exit code
            }
        };

        let settings = if self.all {
            Settings {
                tokens: config.anonymization.tokens.clone(),
                use_consistent_tokens: config.anonymization.use_consistent_tokens,
                ..Settings::all()
            }
        } else {
            config.anonymization.clone()
        };

        let lexicon = match config.lexicon.load() {
            Ok(l) => l,
            Err(e) => {
                tracing::error!(error = %format!("{e:#}"), "Failed to load lexicon");
                eprintln!("❌ Failed to load lexicon: {e:#}");
                return Ok(2);
            }
        };

        let text = match read_input(self.input.as_deref()).await {
            Ok(t) => t,
            Err(e) => {
                eprintln!("❌ {e:#}");
                return Ok(3); // Input error exit code
            }
        };
        if text.trim().is_empty() {
            eprintln!("❌ Input is empty");
            return Ok(3);
        }

        // No entity model is bundled with the CLI: names come from the regex
        // detector. Hosts that load a model build the engine with a registry.
        let engine = AnonymizationEngine::with_components(lexicon, None)?;
        let result = tokio::task::spawn_blocking(move || engine.anonymize(&text, &settings)).await?;

        if self.report {
            eprint!("{}", RunReport::from_result(&result));
        }

        if !result.success {
            for error in &result.errors {
                eprintln!("❌ Anonymization failed: {error}");
            }
            return Ok(4); // Anonymization failure exit code
        }

        let content = if self.json {
            serde_json::to_string_pretty(&result)?
        } else {
            result.anonymized_text.clone()
        };
        write_output(self.output.as_deref(), &content).await?;

        if let Some(path) = &self.mapping_out {
            match &result.mapping_summary {
                Some(summary) => {
                    let json = serde_json::to_string_pretty(summary)?;
                    write_output(Some(path), &json).await?;
                    tracing::info!(path = %path.display(), "Mapping written");
                }
                None => {
                    eprintln!("⚠️  No mapping kept: consistent tokens are disabled");
                }
            }
        }

        tracing::info!(
            anonymizations = result.anonymizations_count,
            processing_time_ms = result.processing_time_ms,
            "Anonymize command completed"
        );
        Ok(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::{NamedTempFile, TempDir};

    fn args(input: PathBuf, output: PathBuf) -> AnonymizeArgs {
        AnonymizeArgs {
            input: Some(input),
            output: Some(output),
            mapping_out: None,
            json: false,
            report: false,
            all: false,
        }
    }

    fn config_file(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file.flush().unwrap();
        file
    }

    #[tokio::test]
    async fn test_anonymize_file() {
        let dir = TempDir::new().unwrap();
        let input = dir.path().join("in.txt");
        let output = dir.path().join("out.txt");
        let mapping = dir.path().join("mapping.json");
        std::fs::write(&input, "Écrire à test@example.com\nMerci").unwrap();
        let config = config_file("");

        let mut args = args(input, output.clone());
        args.mapping_out = Some(mapping.clone());
        let code = args.execute(config.path().to_str().unwrap()).await.unwrap();

        assert_eq!(code, 0);
        assert_eq!(
            std::fs::read_to_string(&output).unwrap(),
            "Écrire à [EMAIL_1]\nMerci"
        );
        let mapping: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(&mapping).unwrap()).unwrap();
        assert_eq!(mapping["EMAIL"]["test@example.com"], "[EMAIL_1]");
    }

    #[tokio::test]
    async fn test_empty_input_is_rejected() {
        let dir = TempDir::new().unwrap();
        let input = dir.path().join("in.txt");
        std::fs::write(&input, "  \n").unwrap();
        let config = config_file("");

        let code = args(input, dir.path().join("out.txt"))
            .execute(config.path().to_str().unwrap())
            .await
            .unwrap();
        assert_eq!(code, 3);
    }

    #[tokio::test]
    async fn test_missing_config() {
        let dir = TempDir::new().unwrap();
        let code = args(dir.path().join("in.txt"), dir.path().join("out.txt"))
            .execute("/nonexistent/whisper.toml")
            .await
            .unwrap();
        assert_eq!(code, 2);
    }

    #[tokio::test]
    async fn test_invalid_prefix_fails_config() {
        let dir = TempDir::new().unwrap();
        let input = dir.path().join("in.txt");
        std::fs::write(&input, "a@b.fr").unwrap();
        let config = config_file("[anonymization.tokens]\nemail = \"\"\n");

        let code = args(input, dir.path().join("out.txt"))
            .execute(config.path().to_str().unwrap())
            .await
            .unwrap();
        assert_eq!(code, 2);
    }
}
