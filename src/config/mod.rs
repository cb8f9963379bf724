//! Configuration management for Whisper.
//!
//! # Overview
//!
//! Whisper uses TOML configuration files with support for:
//! - Environment variable substitution (`${VAR_NAME}`)
//! - Default values for every setting
//! - `WHISPER_*` environment overrides
//! - Validation on load
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use whisper::config::load_config;
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = load_config("whisper.toml")?;
//!
//! println!("Log level: {}", config.application.log_level);
//! println!("Names enabled: {}", config.anonymization.names);
//! # Ok(())
//! # }
//! ```
//!
//! # Configuration Structure
//!
//! - [`ApplicationConfig`] - Application settings (log level)
//! - [`LoggingConfig`] - Local file logging
//! - [`Settings`](crate::anonymization::Settings) - Category toggles and token prefixes
//! - [`LexiconConfig`] - Stoplist source
//!
//! # Example Configuration
//!
//! ```toml
//! [application]
//! log_level = "info"
//!
//! [logging]
//! local_enabled = true
//! local_path = "/var/log/whisper"
//! local_rotation = "daily"
//!
//! [anonymization]
//! names = true
//! addresses = true
//! use_consistent_tokens = true
//!
//! [anonymization.tokens]
//! email = "[EMAIL]"
//!
//! [lexicon]
//! path = "${WHISPER_HOME}/lexicon.toml"
//! ```

pub mod loader;
pub mod schema;

// Re-export commonly used types
pub use loader::{load_config, parse_config};
pub use schema::{ApplicationConfig, LexiconConfig, LoggingConfig, WhisperConfig};
