//! Configuration loader with TOML parsing and environment variable overrides

use super::schema::WhisperConfig;
use crate::domain::errors::WhisperError;
use crate::domain::result::Result;
use regex::Regex;
use std::fs;
use std::path::Path;

/// Loads configuration from a TOML file
///
/// This function:
/// 1. Reads the TOML file
/// 2. Performs environment variable substitution (${VAR} syntax)
/// 3. Parses the TOML into WhisperConfig
/// 4. Applies environment variable overrides (WHISPER_* prefix)
/// 5. Validates the configuration
///
/// # Errors
///
/// Returns [`WhisperError::Configuration`] if the file is missing or
/// unreadable, a referenced variable is unset, parsing fails, or a value is
/// invalid.
///
/// # Examples
///
/// ```no_run
/// use whisper::config::loader::load_config;
///
/// let config = load_config("whisper.toml").expect("Failed to load config");
/// ```
pub fn load_config(path: impl AsRef<Path>) -> Result<WhisperConfig> {
    let path = path.as_ref();

    if !path.exists() {
        return Err(WhisperError::Configuration(format!(
            "Configuration file not found: {}",
            path.display()
        )));
    }

    let contents = fs::read_to_string(path).map_err(|e| {
        WhisperError::Configuration(format!(
            "Failed to read configuration file {}: {}",
            path.display(),
            e
        ))
    })?;

    parse_config(&contents)
}

/// Parses configuration from TOML text, with the same substitution,
/// overrides and validation as [`load_config`]
pub fn parse_config(contents: &str) -> Result<WhisperConfig> {
    let contents = substitute_env_vars(contents)?;

    let mut config: WhisperConfig = toml::from_str(&contents)
        .map_err(|e| WhisperError::Configuration(format!("Failed to parse TOML: {e}")))?;

    apply_env_overrides(&mut config)?;

    config.validate().map_err(|e| {
        WhisperError::Configuration(format!("Configuration validation failed: {e}"))
    })?;

    Ok(config)
}

/// Substitutes environment variables in the format ${VAR_NAME}
///
/// Comment lines are left untouched.
///
/// # Errors
///
/// Returns an error if a referenced environment variable is not set
fn substitute_env_vars(input: &str) -> Result<String> {
    let re = Regex::new(r"\$\{([A-Z_][A-Z0-9_]*)\}")?;
    let mut result = String::with_capacity(input.len());
    let mut missing_vars: Vec<String> = Vec::new();

    for line in input.lines() {
        if line.trim_start().starts_with('#') {
            result.push_str(line);
            result.push('\n');
            continue;
        }

        let processed = re.replace_all(line, |caps: &regex::Captures<'_>| {
            let var_name = &caps[1];
            match std::env::var(var_name) {
                Ok(value) => value,
                Err(_) => {
                    if !missing_vars.iter().any(|v| v == var_name) {
                        missing_vars.push(var_name.to_string());
                    }
                    caps[0].to_string()
                }
            }
        });
        result.push_str(&processed);
        result.push('\n');
    }

    if !missing_vars.is_empty() {
        return Err(WhisperError::Configuration(format!(
            "Missing required environment variables: {}",
            missing_vars.join(", ")
        )));
    }

    Ok(result)
}

/// Applies environment variable overrides using the WHISPER_* prefix
///
/// Category toggles follow `WHISPER_ANONYMIZE_<FIELD>`, for example
/// `WHISPER_ANONYMIZE_NAMES=true`.
fn apply_env_overrides(config: &mut WhisperConfig) -> Result<()> {
    // Application overrides
    if let Ok(val) = std::env::var("WHISPER_LOG_LEVEL") {
        config.application.log_level = val;
    }

    // Logging overrides
    if let Ok(val) = std::env::var("WHISPER_LOGGING_LOCAL_ENABLED") {
        config.logging.local_enabled = val.trim().parse().map_err(|_| {
            WhisperError::Configuration(format!("Invalid WHISPER_LOGGING_LOCAL_ENABLED value: {val}"))
        })?;
    }
    if let Ok(val) = std::env::var("WHISPER_LOGGING_LOCAL_PATH") {
        config.logging.local_path = val;
    }
    if let Ok(val) = std::env::var("WHISPER_LOGGING_LOCAL_ROTATION") {
        config.logging.local_rotation = val;
    }

    // Lexicon override
    if let Ok(val) = std::env::var("WHISPER_LEXICON_PATH") {
        config.lexicon.path = Some(val);
    }

    // Anonymization toggles
    config
        .anonymization
        .apply_env_overrides()
        .map_err(|e| WhisperError::Configuration(format!("{e:#}")))?;

    Ok(())
}
