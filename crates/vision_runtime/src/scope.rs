//! Scope resolution.
//!
//! Scope is not lexical: it is defined by replaying the command history.
//! Each command carries a signed scope delta. A positive delta pushes the
//! modules the command declares as one stack entry, a negative delta pops
//! that many entries from the end, and zero leaves the stack alone. The
//! active vocabulary is the base modules overlaid with every module still on
//! the stack, in push order.
//!
//! [`ScopeStack`] applies deltas incrementally as commands are accepted;
//! [`ScopeStack::replay`] rebuilds the same state from history alone.

use std::sync::Arc;

use tracing::{debug, warn};
use vision_language::{Command, Lexicon, Module, ScopeChange};

/// Decides how a command changes scope.
pub trait ScopeClassifier {
    /// Levels the command enters (positive) or exits (negative).
    fn scope_delta(&self, command: &Command) -> i32;

    /// Modules the command introduces when it enters a scope.
    fn declared_modules(&self, _command: &Command) -> Vec<Arc<Module>> {
        Vec::new()
    }

    /// Classifies `command`.
    fn classify(&self, command: &Command) -> ScopeChange {
        let delta = self.scope_delta(command);
        let modules = if delta > 0 {
            self.declared_modules(command)
        } else {
            Vec::new()
        };
        ScopeChange { delta, modules }
    }
}

impl<F> ScopeClassifier for F
where
    F: Fn(&Command) -> i32,
{
    fn scope_delta(&self, command: &Command) -> i32 {
        self(command)
    }
}

/// Classifier that never changes scope.
#[derive(Clone, Copy, Debug, Default)]
pub struct Unscoped;

impl ScopeClassifier for Unscoped {
    fn scope_delta(&self, _command: &Command) -> i32 {
        0
    }
}

/// Module sets introduced at each open scope depth.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ScopeStack {
    frames: Vec<Vec<Arc<Module>>>,
    depth: i64,
}

impl ScopeStack {
    /// Creates an empty stack.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuilds a stack by replaying `commands` in order.
    pub fn replay<'a>(commands: impl IntoIterator<Item = &'a Command>) -> Self {
        let mut stack = Self::new();
        for command in commands {
            stack.apply(command.scope());
        }
        stack
    }

    /// Applies one scope change.
    ///
    /// Pops are strictly LIFO; popping more entries than exist empties the
    /// stack.
    pub fn apply(&mut self, change: &ScopeChange) {
        match change.delta {
            0 => {}
            delta if delta > 0 => {
                debug!(
                    delta,
                    modules = ?change.modules.iter().map(|m| m.name()).collect::<Vec<_>>(),
                    "scope entered"
                );
                self.frames.push(change.modules.clone());
            }
            delta => {
                let levels = usize::try_from(delta.unsigned_abs()).unwrap_or(usize::MAX);
                if levels > self.frames.len() {
                    warn!(
                        levels,
                        open = self.frames.len(),
                        "scope exit past outermost level"
                    );
                }
                let keep = self.frames.len().saturating_sub(levels);
                self.frames.truncate(keep);
                debug!(delta, open = self.frames.len(), "scope exited");
            }
        }
        self.depth += i64::from(change.delta);
    }

    /// Returns the running sum of deltas.
    #[must_use]
    pub const fn depth(&self) -> i64 {
        self.depth
    }

    /// Returns the open stack entries, outermost first.
    #[must_use]
    pub fn frames(&self) -> &[Vec<Arc<Module>>] {
        &self.frames
    }

    /// Returns the number of open stack entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.frames.len()
    }

    /// Returns true if no scope is open.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    /// Returns the active modules: `base` overlaid with every stacked module.
    #[must_use]
    pub fn active_modules(&self, base: &[Arc<Module>]) -> Vec<Arc<Module>> {
        merge_modules(base.iter().chain(self.frames.iter().flatten()))
    }

    /// Builds the lexicon for the active modules.
    #[must_use]
    pub fn lexicon(&self, base: &[Arc<Module>]) -> Lexicon {
        Lexicon::new(self.active_modules(base))
    }
}

/// Merges modules in order. A later module replaces an earlier one of the
/// same name in that module's original slot.
pub fn merge_modules<'a>(modules: impl IntoIterator<Item = &'a Arc<Module>>) -> Vec<Arc<Module>> {
    let mut merged: Vec<Arc<Module>> = Vec::new();
    for module in modules {
        match merged.iter_mut().find(|m| m.name() == module.name()) {
            Some(slot) => *slot = Arc::clone(module),
            None => merged.push(Arc::clone(module)),
        }
    }
    merged
}
