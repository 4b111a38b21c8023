//! Core error types and persistent collections for Vision.
//!
//! This crate provides:
//! - [`Error`] - Rich error types with context
//! - [`UnrecognizedToken`] - Diagnostic payload for tokenizer failures
//! - [`HistoryVec`] - Append-only persistent sequence for command history

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod collections;
pub mod error;

pub use collections::HistoryVec;
pub use error::{Error, ErrorContext, ErrorKind, UnrecognizedToken};

/// Result type alias using the Vision error type.
pub type Result<T> = std::result::Result<T, Error>;
