//! Domain types shared across Whisper.
//!
//! The domain layer provides the crate-wide error type ([`WhisperError`]) and
//! a [`Result`] alias used by configuration loading, logging setup and the CLI.
//! The rule engine itself lives in [`crate::anonymization`].
//!
//! ```rust
//! use whisper::domain::{Result, WhisperError};
//!
//! fn example() -> Result<()> {
//!     Err(WhisperError::Validation("token prefix must not be empty".into()))
//! }
//! # assert!(example().is_err());
//! ```

pub mod errors;
pub mod result;

pub use errors::WhisperError;
pub use result::Result;
