//! Detection module
//!
//! Every category is found by an object implementing [`Detector`]. The
//! engine holds them in a fixed, ordered list and runs them over the raw
//! input text; adding a category means adding a detector, not touching the
//! resolver.

pub mod address;
pub mod ip;
pub mod name;
pub mod patterns;
pub mod structured;

pub use address::AddressDetector;
pub use ip::IpDetector;
pub use name::NameDetector;
pub use patterns::PatternLibrary;
pub use structured::{KeywordIdentifierDetector, PatternDetector, PhoneDetector};

use crate::anonymization::models::CandidateMatch;
use crate::anonymization::settings::Settings;
use anyhow::Result;

/// Trait for span detectors
pub trait Detector: Send + Sync {
    /// Short name used in logs
    fn name(&self) -> &'static str;

    /// Whether this detector has anything to do under `settings`
    fn is_enabled(&self, settings: &Settings) -> bool;

    /// Scan the whole text and return every candidate span, with the
    /// configured token prefix as proposed replacement
    fn detect(&self, text: &str, settings: &Settings) -> Result<Vec<CandidateMatch>>;
}
