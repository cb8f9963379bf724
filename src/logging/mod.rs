//! Logging and observability
//!
//! Structured logging built on `tracing`:
//! - Console output with configurable level
//! - Optional JSON log files with rotation
//! - Fingerprints instead of plaintext whenever a detected value must be
//!   referenced in a log line
//!
//! # Example
//!
//! ```no_run
//! use whisper::logging::init_logging;
//! use whisper::config::LoggingConfig;
//!
//! let config = LoggingConfig::default();
//! let _guard = init_logging("info", &config).expect("Failed to initialize logging");
//!
//! tracing::info!("Application started");
//! ```

pub mod structured;

pub use structured::{fingerprint, init_logging, LoggingGuard};

/// Log the candidate count produced by one detection phase
///
/// # Example
///
/// ```no_run
/// use whisper::log_phase_complete;
///
/// log_phase_complete!("email", 3);
/// ```
#[macro_export]
macro_rules! log_phase_complete {
    ($phase:expr, $count:expr) => {
        tracing::debug!(phase = $phase, candidates = $count, "Detection phase complete");
    };
}

/// Log a fallback from the entity tagger to regex name detection
///
/// # Example
///
/// ```no_run
/// use whisper::log_tagger_fallback;
///
/// log_tagger_fallback!("model not loaded");
/// ```
#[macro_export]
macro_rules! log_tagger_fallback {
    ($reason:expr) => {
        tracing::warn!(
            reason = %$reason,
            "Entity tagger unavailable, using regex name detection"
        );
    };
}

/// Log the completion of one anonymization call
///
/// # Example
///
/// ```no_run
/// use whisper::log_anonymization_complete;
///
/// log_anonymization_complete!(4, 1.25_f64, true);
/// ```
#[macro_export]
macro_rules! log_anonymization_complete {
    ($count:expr, $elapsed_ms:expr, $success:expr) => {
        tracing::debug!(
            anonymizations = $count,
            processing_time_ms = $elapsed_ms,
            success = $success,
            "Anonymization completed"
        );
    };
}

#[cfg(test)]
mod tests {
    #[test]
    fn test_macros_expand() {
        log_phase_complete!("email", 2usize);
        log_tagger_fallback!("no model");
        log_anonymization_complete!(2usize, 0.5_f64, true);
    }
}
