//! Data model of the rule engine

pub mod category;
pub mod matches;
pub mod result;

pub use category::DetectionCategory;
pub use matches::{AcceptedSet, CandidateMatch};
pub use result::{AnonymizationResult, MappingSummary};
