//! CLI command implementations
//!
//! This module contains all CLI command implementations plus the input and
//! output helpers they share.

pub mod anonymize;
pub mod deanonymize;
pub mod init;
pub mod validate;

use anyhow::Context;
use std::path::Path;
use tokio::io::{AsyncReadExt, AsyncWriteExt};

/// Read the whole input, from a file or from stdin
pub(crate) async fn read_input(path: Option<&Path>) -> anyhow::Result<String> {
    match path {
        Some(path) => tokio::fs::read_to_string(path)
            .await
            .with_context(|| format!("Failed to read input file {}", path.display())),
        None => {
            let mut buffer = String::new();
            tokio::io::stdin()
                .read_to_string(&mut buffer)
                .await
                .context("Failed to read standard input")?;
            Ok(buffer)
        }
    }
}

/// Write `content` to a file, or to stdout
pub(crate) async fn write_output(path: Option<&Path>, content: &str) -> anyhow::Result<()> {
    match path {
        Some(path) => tokio::fs::write(path, content)
            .await
            .with_context(|| format!("Failed to write output file {}", path.display())),
        None => {
            let mut stdout = tokio::io::stdout();
            stdout.write_all(content.as_bytes()).await?;
            stdout.flush().await?;
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_file_round_trip() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("texte.txt");

        write_output(Some(&path), "Bonjour\n\tMarie").await.unwrap();
        let content = read_input(Some(&path)).await.unwrap();
        assert_eq!(content, "Bonjour\n\tMarie");
    }

    #[tokio::test]
    async fn test_missing_input_file() {
        let dir = TempDir::new().unwrap();
        let result = read_input(Some(&dir.path().join("absent.txt"))).await;
        assert!(result.is_err());
    }
}
