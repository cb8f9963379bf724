//! Domain error types
//!
//! This module defines the error hierarchy for Whisper. Errors are
//! domain-specific and don't expose third-party types in their variants.

use thiserror::Error;

/// Main Whisper error type
///
/// This is the primary error type used outside the rule engine: configuration
/// loading, logging setup, and the CLI surface.
#[derive(Debug, Error)]
pub enum WhisperError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Validation errors
    #[error("Validation error: {0}")]
    Validation(String),

    /// Pattern compilation errors
    #[error("Pattern error: {0}")]
    Pattern(String),

    /// A detector failed while scanning text
    #[error("Detection error: {0}")]
    Detection(String),

    /// Entity tagger errors surfaced outside the adapter
    #[error("Entity tagger error: {0}")]
    Tagger(String),

    /// Span substitution errors
    #[error("Substitution error: {0}")]
    Substitution(String),

    /// Serialization/deserialization errors
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// I/O errors
    #[error("I/O error: {0}")]
    Io(String),

    /// Generic errors with context
    #[error("{0}")]
    Other(String),
}

impl WhisperError {
    /// Whether the error originates from user-provided configuration
    pub fn is_configuration(&self) -> bool {
        matches!(self, Self::Configuration(_) | Self::Validation(_))
    }
}

// Conversion from std::io::Error
impl From<std::io::Error> for WhisperError {
    fn from(err: std::io::Error) -> Self {
        WhisperError::Io(err.to_string())
    }
}

// Conversion from serde_json::Error
impl From<serde_json::Error> for WhisperError {
    fn from(err: serde_json::Error) -> Self {
        WhisperError::Serialization(err.to_string())
    }
}

// Conversion from toml parse errors
impl From<toml::de::Error> for WhisperError {
    fn from(err: toml::de::Error) -> Self {
        WhisperError::Configuration(format!("TOML parse error: {err}"))
    }
}

// Conversion from regex compilation errors
impl From<regex::Error> for WhisperError {
    fn from(err: regex::Error) -> Self {
        WhisperError::Pattern(err.to_string())
    }
}
