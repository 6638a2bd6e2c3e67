//! Scoring and weight normalization for worker responses.
//!
//! Everything in this crate is a stateless pure function over its inputs;
//! the components can be shared freely across concurrent cycles.

pub mod error;
pub mod normalize;
pub mod processor;
pub mod scorer;

pub use error::ScoringError;
pub use normalize::normalize;
pub use processor::{processor_for, WorkProcessor};
pub use scorer::Scorer;

/// Score assigned to a response that could not be scored normally
/// (timeout, transport failure, unparseable payload). Deliberately above
/// zero: "unknown" is not "proven bad", and a nonzero floor keeps a single
/// failed worker from degenerating the normalization range.
pub const FALLBACK_SCORE: f64 = 0.1;

/// Weight assigned when normalization has no usable dynamic range, and to
/// sentinel entries excluded from the min/max computation.
pub const FALLBACK_WEIGHT: f64 = 0.1;

/// Raw-score marker for "no data at all". Entries carrying it are excluded
/// from the min/max computation so they do not compress the dynamic range
/// of the rest, but they still receive `FALLBACK_WEIGHT` in the output.
pub const SENTINEL_SCORE: f64 = 0.0;
