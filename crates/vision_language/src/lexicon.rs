//! Lexicons: ordered pattern tables distilled from active modules.
//!
//! A [`Lexicon`] is built fresh for each tokenization pass and never mutated
//! afterwards. Table order is precedence: modules in merge order, each
//! module's definitions in declaration order.

use std::sync::Arc;

use tracing::trace;

use crate::definition::Definition;
use crate::module::Module;

/// Read-only snapshot of the vocabulary in scope.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Lexicon {
    modules: Vec<Arc<Module>>,
}

impl Lexicon {
    /// Creates a lexicon over `modules`, in the given order.
    #[must_use]
    pub fn new(modules: Vec<Arc<Module>>) -> Self {
        trace!(
            modules = modules.len(),
            patterns = modules.iter().map(|m| m.len()).sum::<usize>(),
            "built lexicon"
        );
        Self { modules }
    }

    /// Returns the modules in table order.
    #[must_use]
    pub fn modules(&self) -> &[Arc<Module>] {
        &self.modules
    }

    /// Returns the module names in table order.
    #[must_use]
    pub fn module_names(&self) -> Vec<&str> {
        self.modules.iter().map(|m| m.name()).collect()
    }

    /// Iterates the pattern table as `(module name, definition)` pairs.
    pub fn entries(&self) -> impl Iterator<Item = (&str, &Definition)> {
        self.modules
            .iter()
            .flat_map(|m| m.definitions().iter().map(move |d| (m.name(), d)))
    }

    /// Returns the pattern table as `(pattern, kind)` pairs.
    #[must_use]
    pub fn pattern_table(&self) -> Vec<(String, String)> {
        self.entries()
            .map(|(_, d)| (d.pattern().to_string(), d.kind().to_string()))
            .collect()
    }

    /// Returns the number of table entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.modules.iter().map(|m| m.len()).sum()
    }

    /// Returns true if the table has no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Finds the first definition, in table order, matching at the start of
    /// `text`, with the match length in bytes.
    ///
    /// First match wins, not longest.
    #[must_use]
    pub fn match_at(&self, text: &str) -> Option<(&Definition, usize)> {
        self.entries()
            .find_map(|(_, d)| d.match_len(text).map(|len| (d, len)))
    }
}
