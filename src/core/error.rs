use thiserror::Error;

/// Errors that can occur around the calculation core.
///
/// The engine itself never fails: malformed input is coerced to zero at
/// the boundary and every calculation is total. Only the surrounding
/// plumbing (persistence, numbering, finalization) has error paths.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum FactureError {
    /// One or more finalization checks failed.
    #[error("validation failed: {0}")]
    Validation(String),

    /// Draft store read/write failed (e.g. storage quota exhausted).
    #[error("draft store error: {0}")]
    Store(String),

    /// Invoice number sequencing error.
    #[error("numbering error: {0}")]
    Numbering(String),
}

/// A single finalization error with the path of the offending field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    /// Dot-separated path to the invalid field (e.g. "client.email").
    pub field: String,
    /// Human-readable description.
    pub message: String,
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

impl ValidationError {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}
