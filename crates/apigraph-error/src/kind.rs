//! Error kinds for apigraph operations

use strum_macros::{Display, IntoStaticStr};

/// The kind of error that occurred.
///
/// Callers match on `ErrorKind` to tell bad input apart from a failing
/// render backend or a broken environment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, IntoStaticStr, Display)]
#[non_exhaustive]
pub enum ErrorKind {
    // =========================================================================
    // General errors
    // =========================================================================
    /// An unexpected error occurred - catch-all for unhandled cases
    Unexpected,

    /// Invalid argument passed to a function or on the command line
    InvalidArgument,

    // =========================================================================
    // Input contract errors
    // =========================================================================
    /// A caller broke an input precondition (empty symbol name, missing symbol)
    ContractViolation,

    /// A node id does not exist in the call graph
    NodeNotFound,

    /// The graph interchange file is structurally wrong
    InvalidGraph,

    // =========================================================================
    // Rendering errors
    // =========================================================================
    /// The rendering backend could not create a node or edge
    RenderFailed,

    // =========================================================================
    // File/IO errors
    // =========================================================================
    /// File not found
    FileNotFound,

    /// Permission denied
    PermissionDenied,

    /// IO operation failed
    IoFailed,

    // =========================================================================
    // Serialization errors
    // =========================================================================
    /// Serialization failed
    SerializationFailed,

    /// Deserialization failed
    DeserializationFailed,
}

impl ErrorKind {
    /// Returns the error kind as a static string
    pub fn as_str(&self) -> &'static str {
        (*self).into()
    }

    /// Check if this error kind is retryable by default
    pub fn is_retryable(&self) -> bool {
        matches!(self, ErrorKind::IoFailed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_kind_display() {
        assert_eq!(ErrorKind::ContractViolation.to_string(), "ContractViolation");
        assert_eq!(ErrorKind::RenderFailed.as_str(), "RenderFailed");
    }

    #[test]
    fn test_is_retryable() {
        assert!(ErrorKind::IoFailed.is_retryable());
        assert!(!ErrorKind::ContractViolation.is_retryable());
        assert!(!ErrorKind::InvalidGraph.is_retryable());
        assert!(!ErrorKind::RenderFailed.is_retryable());
    }
}
