//! The main Error type for apigraph.

use crate::{ErrorKind, ErrorStatus};
use std::fmt;

/// Unified error type for all apigraph operations.
pub struct Error {
    kind: ErrorKind,
    message: String,
    status: ErrorStatus,
    operation: &'static str,
    context: Vec<(&'static str, String)>,
    source: Option<Box<dyn std::error::Error + Send + Sync + 'static>>,
}

impl Error {
    /// Create a new error with the given kind and message.
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        let status = if kind.is_retryable() {
            ErrorStatus::Temporary
        } else {
            ErrorStatus::Permanent
        };

        Self {
            kind,
            message: message.into(),
            status,
            operation: "",
            context: Vec::new(),
            source: None,
        }
    }

    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn status(&self) -> ErrorStatus {
        self.status
    }

    /// Get the operation that caused this error
    pub fn operation(&self) -> &'static str {
        self.operation
    }

    pub fn context(&self) -> &[(&'static str, String)] {
        &self.context
    }

    /// Look up the first context value recorded under `key`.
    pub fn context_value(&self, key: &str) -> Option<&str> {
        self.context
            .iter()
            .find(|(k, _)| *k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Get the source error (if any).
    pub fn source_ref(&self) -> Option<&(dyn std::error::Error + Send + Sync + 'static)> {
        self.source.as_ref().map(|e| e.as_ref())
    }

    /// Set the operation that caused this error.
    ///
    /// If an operation was already set, the previous one is moved to context
    /// as "called" to preserve the call chain.
    pub fn with_operation(mut self, operation: &'static str) -> Self {
        if !self.operation.is_empty() {
            self.context.push(("called", self.operation.to_string()));
        }
        self.operation = operation;
        self
    }

    pub fn with_context(mut self, key: &'static str, value: impl Into<String>) -> Self {
        self.context.push((key, value.into()));
        self
    }

    /// Set the source error.
    ///
    /// # Panics (debug only)
    /// Panics in debug mode if source was already set.
    pub fn set_source<E>(mut self, source: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        debug_assert!(self.source.is_none(), "source error already set");
        self.source = Some(Box::new(source));
        self
    }

    pub fn is_retryable(&self) -> bool {
        self.status.is_retryable()
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.kind, self.status)?;
        if !self.operation.is_empty() {
            write!(f, " at {}", self.operation)?;
        }

        if !self.context.is_empty() {
            write!(f, ", context {{ ")?;
            for (i, (key, value)) in self.context.iter().enumerate() {
                if i > 0 {
                    write!(f, ", ")?;
                }
                write!(f, "{}: {}", key, value)?;
            }
            write!(f, " }}")?;
        }

        if !self.message.is_empty() {
            write!(f, " => {}", self.message)?;
        }

        Ok(())
    }
}

impl fmt::Debug for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{} ({}) at {}", self.kind, self.status, self.operation)?;

        if !self.message.is_empty() {
            writeln!(f)?;
            writeln!(f, "    Message: {}", self.message)?;
        }

        if !self.context.is_empty() {
            writeln!(f)?;
            writeln!(f, "    Context:")?;
            for (key, value) in &self.context {
                writeln!(f, "        {}: {}", key, value)?;
            }
        }

        if let Some(source) = &self.source {
            writeln!(f)?;
            writeln!(f, "    Source: {:?}", source)?;
        }

        Ok(())
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.source
            .as_ref()
            .map(|e| e.as_ref() as &(dyn std::error::Error + 'static))
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        let kind = match err.kind() {
            std::io::ErrorKind::NotFound => ErrorKind::FileNotFound,
            std::io::ErrorKind::PermissionDenied => ErrorKind::PermissionDenied,
            _ => ErrorKind::IoFailed,
        };
        Error::new(kind, err.to_string())
            .with_operation("io")
            .set_source(err)
    }
}

impl From<String> for Error {
    fn from(msg: String) -> Self {
        Error::new(ErrorKind::Unexpected, msg)
    }
}

impl From<&str> for Error {
    fn from(msg: &str) -> Self {
        Error::new(ErrorKind::Unexpected, msg)
    }
}

impl Error {
    pub fn unexpected(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Unexpected, message)
    }

    pub fn invalid_argument(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::InvalidArgument, message)
    }

    /// Create a ContractViolation error
    pub fn contract_violation(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::ContractViolation, message)
    }

    /// Create a NodeNotFound error
    pub fn node_not_found(node_id: impl Into<String>) -> Self {
        let node_id = node_id.into();
        Self::new(
            ErrorKind::NodeNotFound,
            format!("node '{}' not found", node_id),
        )
        .with_context("node", node_id)
    }

    pub fn invalid_graph(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::InvalidGraph, message)
    }

    pub fn render_failed(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::RenderFailed, message)
    }

    /// Create a FileNotFound error
    pub fn file_not_found(path: impl Into<String>) -> Self {
        let path = path.into();
        Self::new(
            ErrorKind::FileNotFound,
            format!("file '{}' not found", path),
        )
        .with_context("path", path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_creation() {
        let err = Error::new(ErrorKind::ContractViolation, "empty symbol name");
        assert_eq!(err.kind(), ErrorKind::ContractViolation);
        assert_eq!(err.message(), "empty symbol name");
        assert_eq!(err.status(), ErrorStatus::Permanent);
    }

    #[test]
    fn test_error_with_context() {
        let err = Error::new(ErrorKind::RenderFailed, "node key is empty")
            .with_operation("dot::add_node")
            .with_context("from", "a.Foo")
            .with_context("to", "");

        assert_eq!(err.operation(), "dot::add_node");
        assert_eq!(err.context().len(), 2);
        assert_eq!(err.context()[0], ("from", "a.Foo".to_string()));
        assert_eq!(err.context_value("to"), Some(""));
        assert_eq!(err.context_value("missing"), None);
    }

    #[test]
    fn test_operation_chaining() {
        let err = Error::new(ErrorKind::RenderFailed, "failed")
            .with_operation("dot::add_node")
            .with_operation("traverse::visit");

        assert_eq!(err.operation(), "traverse::visit");
        assert_eq!(err.context().len(), 1);
        assert_eq!(err.context()[0], ("called", "dot::add_node".to_string()));
    }

    #[test]
    fn test_io_errors_are_temporary() {
        let err: Error = std::io::Error::other("disk went away").into();
        assert_eq!(err.kind(), ErrorKind::IoFailed);
        assert!(err.is_retryable());
        assert_eq!(err.status(), ErrorStatus::Temporary);
    }

    #[test]
    fn test_io_not_found_maps_to_file_not_found() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "no such file");
        let err: Error = io_err.into();
        assert_eq!(err.kind(), ErrorKind::FileNotFound);
        assert!(err.source_ref().is_some());
        assert!(!err.is_retryable());
    }

    #[test]
    fn test_display() {
        let err = Error::contract_violation("symbol name is empty")
            .with_operation("visibility::is_exported")
            .with_context("node", "4");

        let display = format!("{}", err);
        assert!(display.contains("ContractViolation"));
        assert!(display.contains("permanent"));
        assert!(display.contains("visibility::is_exported"));
        assert!(display.contains("node: 4"));
        assert!(display.ends_with("=> symbol name is empty"));
    }

    #[test]
    fn test_display_without_operation() {
        let err = Error::invalid_argument("unknown package 'x'");
        assert_eq!(
            err.to_string(),
            "InvalidArgument (permanent) => unknown package 'x'"
        );
    }

    #[test]
    fn test_convenience_constructors() {
        let err = Error::node_not_found("42");
        assert_eq!(err.kind(), ErrorKind::NodeNotFound);
        assert_eq!(err.context_value("node"), Some("42"));

        let err = Error::file_not_found("callgraph.json");
        assert_eq!(err.kind(), ErrorKind::FileNotFound);

        assert_eq!(Error::invalid_graph("x").kind(), ErrorKind::InvalidGraph);
        assert_eq!(Error::render_failed("x").kind(), ErrorKind::RenderFailed);
    }
}
