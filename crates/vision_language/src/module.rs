//! Vocabulary modules.
//!
//! A [`Module`] is a named, ordered set of [`Definition`]s. Modules are
//! immutable once built and shared by `Arc` across lexicons.

use std::sync::Arc;

use vision_foundation::Result;

use crate::definition::Definition;

/// A named bundle of token definitions.
#[derive(Clone, Debug, PartialEq)]
pub struct Module {
    name: String,
    definitions: Vec<Definition>,
}

impl Module {
    /// Creates an empty module.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            definitions: Vec::new(),
        }
    }

    /// Compiles and appends a definition.
    pub fn define(self, pattern: &str, kind: &str) -> Result<Self> {
        Ok(self.with_definition(Definition::new(pattern, kind)?))
    }

    /// Appends an already-built definition.
    #[must_use]
    pub fn with_definition(mut self, definition: Definition) -> Self {
        self.definitions.push(definition);
        self
    }

    /// Returns the module name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the definitions in declaration order.
    #[must_use]
    pub fn definitions(&self) -> &[Definition] {
        &self.definitions
    }

    /// Returns the number of definitions.
    #[must_use]
    pub fn len(&self) -> usize {
        self.definitions.len()
    }

    /// Returns true if the module defines nothing.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.definitions.is_empty()
    }

    /// Wraps the module for sharing.
    #[must_use]
    pub fn shared(self) -> Arc<Self> {
        Arc::new(self)
    }
}
