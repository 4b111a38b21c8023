//! Configuration for the interpreter.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::debug;
use vision_foundation::{Error, ErrorKind, Result};

/// Configuration for an [`Interpreter`](crate::Interpreter).
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct InterpreterConfig {
    /// Reserved scanner name for console input.
    pub interactive_name: String,

    /// Base directory for test files.
    pub test_directory: PathBuf,

    /// Replay history after every accepted command and compare the result
    /// with the incremental scope stack.
    pub verify_scope: bool,

    /// Default `tracing` filter directive.
    pub log_filter: String,
}

impl Default for InterpreterConfig {
    fn default() -> Self {
        Self {
            interactive_name: "interactive".to_string(),
            test_directory: PathBuf::from("."),
            verify_scope: false,
            log_filter: "warn".to_string(),
        }
    }
}

impl InterpreterConfig {
    /// Creates a configuration for debugging: scope verification on, verbose logs.
    #[must_use]
    pub fn debug() -> Self {
        Self {
            verify_scope: true,
            log_filter: "debug".to_string(),
            ..Self::default()
        }
    }

    /// Builder method to set the interactive scanner name.
    #[must_use]
    pub fn with_interactive_name(mut self, name: impl Into<String>) -> Self {
        self.interactive_name = name.into();
        self
    }

    /// Builder method to set the test directory.
    #[must_use]
    pub fn with_test_directory(mut self, path: impl Into<PathBuf>) -> Self {
        self.test_directory = path.into();
        self
    }

    /// Builder method to enable/disable scope verification.
    #[must_use]
    pub fn with_verify_scope(mut self, verify: bool) -> Self {
        self.verify_scope = verify;
        self
    }

    /// Builder method to set the log filter.
    #[must_use]
    pub fn with_log_filter(mut self, filter: impl Into<String>) -> Self {
        self.log_filter = filter.into();
        self
    }

    /// Installs the global `tracing` subscriber with this configuration's
    /// filter. Returns false if a subscriber was already installed.
    pub fn init_logging(&self) -> bool {
        crate::logging::init(&self.log_filter)
    }

    /// Parses a configuration from TOML. Missing keys take their defaults.
    pub fn from_toml_str(text: &str) -> Result<Self> {
        toml::from_str(text).map_err(|err| Error::new(ErrorKind::Config(err.to_string())))
    }

    /// Renders the configuration as TOML.
    pub fn to_toml_string(&self) -> Result<String> {
        toml::to_string(self).map_err(|err| Error::new(ErrorKind::Config(err.to_string())))
    }

    /// Loads a configuration file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)
            .map_err(|err| Error::io(path.display().to_string(), &err))?;
        let config = Self::from_toml_str(&text)?;
        debug!(path = %path.display(), "loaded interpreter config");
        Ok(config)
    }
}
