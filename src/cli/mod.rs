//! CLI interface and argument parsing
//!
//! This module provides the command-line interface for Whisper using clap.
//!
//! Exit codes: 0 success, 2 configuration error, 3 input error,
//! 4 anonymization failure, 5 fatal error.

pub mod commands;

use clap::{Parser, Subcommand};

/// Whisper - rule-based anonymization of personal data in text
#[derive(Parser, Debug)]
#[command(name = "whisper")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Path to configuration file
    #[arg(short, long, default_value = "whisper.toml", env = "WHISPER_CONFIG")]
    pub config: String,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, env = "WHISPER_LOG_LEVEL")]
    pub log_level: Option<String>,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Replace personal data in a text with tokens
    Anonymize(commands::anonymize::AnonymizeArgs),

    /// Restore original values from a token mapping
    Deanonymize(commands::deanonymize::DeanonymizeArgs),

    /// Validate configuration file
    ValidateConfig(commands::validate::ValidateArgs),

    /// Initialize a new configuration file
    Init(commands::init::InitArgs),
}
