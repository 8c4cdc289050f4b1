//! Domain error types.
//!
//! These errors represent validation failures in the transit data model.
//! They are distinct from planner and I/O errors.

use super::LineId;

/// Domain-level errors for validation and data consistency.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum DomainError {
    /// A single line cannot take part in a computation.
    ///
    /// The planner skips the offending line (or pair/triple) and carries on.
    #[error("line {line} is malformed: {reason}")]
    MalformedLine { line: LineId, reason: &'static str },

    /// Two lines in one catalog share an identifier
    #[error("duplicate line identifier: {0}")]
    DuplicateLine(LineId),

    /// A line identifier was empty or whitespace
    #[error("line identifier must not be empty")]
    EmptyLineId,

    /// Itinerary has no segments
    #[error("itinerary must have at least one segment")]
    EmptyItinerary,
}
