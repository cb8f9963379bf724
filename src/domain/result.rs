//! Crate-wide `Result` alias

use super::errors::WhisperError;

/// Outcome of config loading and CLI plumbing; the anonymization internals
/// use `anyhow` instead.
pub type Result<T> = std::result::Result<T, WhisperError>;
