//! Tokens produced by the tokenizer.

use crate::definition::Definition;
use crate::span::{CodeProvider, CodeSpan};

/// A positioned, typed fragment of a command's text.
#[derive(Clone, Debug, PartialEq)]
pub struct Token {
    /// Source location of this token.
    pub span: CodeSpan,
    /// The text matched when the token was produced.
    pub text: String,
    /// Private copy of the definition that produced this token.
    pub definition: Definition,
}

impl Token {
    /// Creates a new token.
    #[must_use]
    pub fn new(span: CodeSpan, text: String, definition: Definition) -> Self {
        Self {
            span,
            text,
            definition,
        }
    }

    /// Returns the token kind.
    #[must_use]
    pub fn kind(&self) -> &str {
        self.definition.kind()
    }

    /// Returns the start offset within the source line.
    #[must_use]
    pub fn start(&self) -> usize {
        self.span.start()
    }

    /// Returns the end offset within the source line.
    #[must_use]
    pub fn end(&self) -> usize {
        self.span.end().unwrap_or(self.span.start() + self.text.len())
    }

    /// Returns true if the definition marks this token as skippable.
    #[must_use]
    pub fn is_trivia(&self) -> bool {
        self.definition.meta("skip") == Some("true")
    }
}
