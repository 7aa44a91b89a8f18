use std::fmt;

use apigraph_error::Result;

use crate::visibility::is_exported;

/// A callable program entity: a package-level function or a method.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Symbol {
    name: String,
    /// Package path, e.g. "example.com/server"
    package: String,
    /// Receiver type name for methods
    receiver: Option<String>,
}

impl Symbol {
    pub fn function(package: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            package: package.into(),
            receiver: None,
        }
    }

    pub fn method(
        package: impl Into<String>,
        receiver: impl Into<String>,
        name: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            package: package.into(),
            receiver: Some(receiver.into()),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn package(&self) -> &str {
        &self.package
    }

    pub fn receiver(&self) -> Option<&str> {
        self.receiver.as_deref()
    }

    /// Methods hang off a type, so only receiver-less symbols are package members.
    pub fn is_top_level(&self) -> bool {
        self.receiver.is_none()
    }

    pub fn is_exported(&self) -> Result<bool> {
        is_exported(&self.name)
    }

    /// `pkg.Name` for functions, `pkg.(Recv).Name` for methods.
    pub fn qualified_name(&self) -> String {
        match &self.receiver {
            Some(receiver) => format!("{}.({}).{}", self.package, receiver, self.name),
            None => format!("{}.{}", self.package, self.name),
        }
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.qualified_name())
    }
}
