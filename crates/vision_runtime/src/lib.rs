//! Interpreter orchestration and scope resolution for Vision.
//!
//! This crate provides:
//! - [`Interpreter`] - Command history, scanner registry and lexicon lookup
//! - [`ScopeStack`] - Module sets introduced at each scope depth
//! - [`ScopeClassifier`] - Collaborator deciding how commands change scope
//! - [`InterpreterConfig`] - Configuration loaded from TOML
//! - [`logging`] - `tracing` subscriber setup

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod config;
pub mod interpreter;
pub mod logging;
pub mod registry;
pub mod scope;


pub use config::InterpreterConfig;
pub use interpreter::Interpreter;
pub use registry::ScannerRegistry;
pub use scope::{ScopeClassifier, ScopeStack, Unscoped, merge_modules};
