//! # apigraph-error
//!
//! Unified error handling for apigraph, following OpenDAL's error handling practices.
//!
//! ## Design Philosophy
//!
//! - **ErrorKind**: Know what error occurred (e.g., ContractViolation, RenderFailed)
//! - **ErrorStatus**: Decide how to handle it (Permanent, Temporary)
//! - **Error Context**: Assist in locating the cause with rich context
//! - **Error Source**: Wrap underlying errors without leaking raw types
//!
//! ## Usage
//!
//! ```rust
//! use apigraph_error::{Error, ErrorKind};
//!
//! fn example() -> Result<(), Error> {
//!     Err(Error::new(ErrorKind::ContractViolation, "symbol name is empty")
//!         .with_operation("visibility::is_exported")
//!         .with_context("node", "7"))
//! }
//! ```
//!
//! ## Principles
//!
//! - All functions return `Result<T, apigraph_error::Error>`
//! - External errors are wrapped with `set_source(err)`
//! - Same error handled once, subsequent ops only append context
//! - No library code terminates the process; the binary decides

mod error;
mod kind;
mod status;

pub use error::Error;
pub use kind::ErrorKind;
pub use status::ErrorStatus;

/// Result type alias using apigraph Error
pub type Result<T> = std::result::Result<T, Error>;
