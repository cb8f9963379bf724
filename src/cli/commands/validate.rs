//! Validate config command implementation
//!
//! This module implements the `validate-config` command for validating
//! the Whisper configuration file and the lexicon it points to.

use crate::anonymization::DetectionCategory;
use crate::config::load_config;
use clap::Args;

/// Arguments for the validate-config command
#[derive(Args, Debug)]
pub struct ValidateArgs {}

impl ValidateArgs {
    /// Execute the validate-config command
    pub async fn execute(&self, config_path: &str) -> anyhow::Result<i32> {
        tracing::info!(config_path = %config_path, "Validating configuration");

        println!("🔍 Validating configuration file: {config_path}");
        println!();

        // Loading validates every section
        let config = match load_config(config_path) {
            Ok(c) => {
                println!("✅ Configuration is valid");
                c
            }
            Err(e) => {
                println!("❌ Configuration validation failed");
                println!("   Error: {e}");
                return Ok(2); // Configuration error exit code
            }
        };

        if let Err(e) = config.lexicon.load() {
            println!("❌ Failed to load lexicon");
            println!("   Error: {e:#}");
            return Ok(2);
        }
        println!("✅ Lexicon loaded");

        let settings = &config.anonymization;
        let enabled: Vec<&str> = DetectionCategory::ALL
            .iter()
            .filter(|c| settings.is_enabled(**c))
            .map(|c| c.label())
            .collect();

        println!();
        println!("Configuration Summary:");
        println!("  Log Level: {}", config.application.log_level);
        println!(
            "  File Logging: {}",
            if config.logging.local_enabled {
                format!("{} ({})", config.logging.local_path, config.logging.local_rotation)
            } else {
                "disabled".to_string()
            }
        );
        println!(
            "  Lexicon: {}",
            config.lexicon.path.as_deref().unwrap_or("embedded")
        );
        println!(
            "  Token Mode: {}",
            if settings.use_consistent_tokens {
                "consistent"
            } else {
                "prefix only"
            }
        );
        println!(
            "  Enabled Categories: {}",
            if enabled.is_empty() {
                "none".to_string()
            } else {
                enabled.join(", ")
            }
        );
        println!();
        Ok(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[tokio::test]
    async fn test_validate_valid_config() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(b"[anonymization]\nnames = true\n").unwrap();
        file.flush().unwrap();

        let code = ValidateArgs {}
            .execute(file.path().to_str().unwrap())
            .await
            .unwrap();
        assert_eq!(code, 0);
    }

    #[tokio::test]
    async fn test_validate_missing_lexicon() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(b"[lexicon]\npath = \"/nonexistent/lexicon.toml\"\n")
            .unwrap();
        file.flush().unwrap();

        let code = ValidateArgs {}
            .execute(file.path().to_str().unwrap())
            .await
            .unwrap();
        assert_eq!(code, 2);
    }
}
