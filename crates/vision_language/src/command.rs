//! Commands: non-blank logical lines of Vision code.
//!
//! A [`Command`] wraps a [`CodeSpan`] together with the scope classification
//! assigned when it was built. Commands built by an interpreter also carry a
//! [`LexiconProvider`], so their vocabulary is resolved when they are
//! tokenized rather than when they are scanned.

use std::fmt;
use std::rc::Rc;
use std::sync::Arc;

use crate::lexicon::Lexicon;
use crate::module::Module;
use crate::span::{CodeProvider, CodeSpan};
use crate::tokenizer::Tokenizer;

/// Source of the live vocabulary for a command.
pub trait LexiconProvider {
    /// Builds the lexicon currently in scope, if the owner is still alive.
    fn lexicon(&self) -> Option<Lexicon>;
}

/// How a command changes scope when it is accepted into history.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ScopeChange {
    /// Levels entered (positive) or exited (negative).
    pub delta: i32,
    /// Modules introduced when the command enters a scope.
    pub modules: Vec<Arc<Module>>,
}

impl ScopeChange {
    /// A change that enters one level carrying `modules`.
    #[must_use]
    pub fn enter(modules: Vec<Arc<Module>>) -> Self {
        Self { delta: 1, modules }
    }

    /// A change that exits `levels` levels.
    #[must_use]
    pub fn exit(levels: u16) -> Self {
        Self {
            delta: -i32::from(levels),
            modules: Vec::new(),
        }
    }

    /// Returns true if the change is a no-op.
    #[must_use]
    pub fn is_neutral(&self) -> bool {
        self.delta == 0
    }
}

/// One non-blank line of Vision code, lexically unprocessed.
#[derive(Clone)]
pub struct Command {
    span: CodeSpan,
    scope: ScopeChange,
    lexicon: Option<Rc<dyn LexiconProvider>>,
}

impl Command {
    /// Creates an unclassified command over `span`.
    #[must_use]
    pub fn new(span: CodeSpan) -> Self {
        Self {
            span,
            scope: ScopeChange::default(),
            lexicon: None,
        }
    }

    /// Sets the scope classification.
    #[must_use]
    pub fn with_scope(mut self, scope: ScopeChange) -> Self {
        self.scope = scope;
        self
    }

    /// Attaches the live vocabulary source.
    #[must_use]
    pub fn with_lexicon(mut self, provider: Rc<dyn LexiconProvider>) -> Self {
        self.lexicon = Some(provider);
        self
    }

    /// Returns the current text of the command.
    #[must_use]
    pub fn code(&self) -> String {
        self.span.code()
    }

    /// Returns the command's span.
    #[must_use]
    pub fn span(&self) -> &CodeSpan {
        &self.span
    }

    /// Returns the origin name.
    #[must_use]
    pub fn origin(&self) -> &str {
        self.span.origin()
    }

    /// Returns the zero-based line index.
    #[must_use]
    pub fn line(&self) -> usize {
        self.span.line()
    }

    /// Returns the scope classification.
    #[must_use]
    pub fn scope(&self) -> &ScopeChange {
        &self.scope
    }

    /// Returns the signed scope delta.
    #[must_use]
    pub fn scope_delta(&self) -> i32 {
        self.scope.delta
    }

    /// Returns the modules this command declares.
    #[must_use]
    pub fn modules(&self) -> &[Arc<Module>] {
        &self.scope.modules
    }

    /// Resolves the vocabulary in scope right now, if a provider is attached.
    #[must_use]
    pub fn lexicon(&self) -> Option<Lexicon> {
        self.lexicon.as_ref().and_then(|provider| provider.lexicon())
    }

    /// Starts tokenizing against the live vocabulary.
    ///
    /// Returns `None` if no provider is attached or its owner is gone.
    #[must_use]
    pub fn tokens(&self) -> Option<Tokenizer> {
        self.lexicon().map(|lexicon| self.tokenize(lexicon))
    }

    /// Starts tokenizing against an explicit lexicon.
    #[must_use]
    pub fn tokenize(&self, lexicon: Lexicon) -> Tokenizer {
        Tokenizer::new(self, lexicon)
    }
}

impl PartialEq for Command {
    fn eq(&self, other: &Self) -> bool {
        self.span == other.span && self.scope == other.scope
    }
}

impl fmt::Debug for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Command")
            .field("span", &self.span)
            .field("delta", &self.scope.delta)
            .field(
                "modules",
                &self.scope.modules.iter().map(|m| m.name()).collect::<Vec<_>>(),
            )
            .finish_non_exhaustive()
    }
}
