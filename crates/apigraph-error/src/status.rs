//! Error status: whether a failed run is worth repeating.

use std::fmt;

/// The status of an error.
///
/// Building the whole-program call graph is expensive, so apigraph itself never
/// retries. The status only tells the caller what a retry could achieve:
/// - `Permanent`: the input is wrong, running again gives the same failure
/// - `Temporary`: the environment failed (e.g. a read error), a rerun may succeed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ErrorStatus {
    /// Examples: ContractViolation, InvalidGraph, DeserializationFailed
    #[default]
    Permanent,

    /// Examples: IoFailed
    Temporary,
}

impl ErrorStatus {
    pub fn is_retryable(&self) -> bool {
        matches!(self, ErrorStatus::Temporary)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorStatus::Permanent => "permanent",
            ErrorStatus::Temporary => "temporary",
        }
    }
}

impl fmt::Display for ErrorStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
