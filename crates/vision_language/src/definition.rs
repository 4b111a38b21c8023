//! Token definitions.
//!
//! A [`Definition`] pairs a pattern with a token constructor and scope
//! metadata. Every token receives its own clone of the definition that
//! produced it; definitions hold no interior mutability, so a clone can never
//! observe changes made through another.

use std::collections::BTreeMap;
use std::fmt;

use regex::{Regex, RegexBuilder};
use vision_foundation::{Error, Result};

use crate::span::CodeSpan;
use crate::token::Token;

/// Builds a token from its span, extracted text and definition copy.
pub type TokenConstructor = fn(CodeSpan, String, Definition) -> Token;

/// A pattern, a token constructor, and scope metadata.
#[derive(Clone)]
pub struct Definition {
    pattern: String,
    regex: Regex,
    kind: String,
    metadata: BTreeMap<String, String>,
    constructor: TokenConstructor,
}

impl Definition {
    /// Compiles `pattern` into a definition producing tokens of `kind`.
    ///
    /// The pattern is anchored at the match position and matched
    /// case-insensitively.
    pub fn new(pattern: impl Into<String>, kind: impl Into<String>) -> Result<Self> {
        let pattern = pattern.into();
        let regex = RegexBuilder::new(&format!("^(?:{pattern})"))
            .case_insensitive(true)
            .build()
            .map_err(|err| Error::invalid_pattern(pattern.clone(), err.to_string()))?;
        Ok(Self {
            pattern,
            regex,
            kind: kind.into(),
            metadata: BTreeMap::new(),
            constructor: Token::new,
        })
    }

    /// Adds a metadata entry.
    #[must_use]
    pub fn with_metadata(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.metadata.insert(key.into(), value.into());
        self
    }

    /// Replaces the token constructor.
    #[must_use]
    pub fn with_constructor(mut self, constructor: TokenConstructor) -> Self {
        self.constructor = constructor;
        self
    }

    /// Returns the source pattern.
    #[must_use]
    pub fn pattern(&self) -> &str {
        &self.pattern
    }

    /// Returns the token kind this definition produces.
    #[must_use]
    pub fn kind(&self) -> &str {
        &self.kind
    }

    /// Returns all metadata entries.
    #[must_use]
    pub fn metadata(&self) -> &BTreeMap<String, String> {
        &self.metadata
    }

    /// Looks up one metadata entry.
    #[must_use]
    pub fn meta(&self, key: &str) -> Option<&str> {
        self.metadata.get(key).map(String::as_str)
    }

    /// Returns the byte length of a non-empty match at the start of `text`.
    ///
    /// Empty matches never count, so a match always advances the cursor.
    #[must_use]
    pub fn match_len(&self, text: &str) -> Option<usize> {
        self.regex
            .find(text)
            .map(|m| m.end())
            .filter(|len| *len > 0)
    }

    /// Builds a token over `span` carrying a private copy of this definition.
    #[must_use]
    pub fn construct(&self, span: CodeSpan, text: String) -> Token {
        (self.constructor)(span, text, self.clone())
    }
}

impl PartialEq for Definition {
    fn eq(&self, other: &Self) -> bool {
        self.pattern == other.pattern && self.kind == other.kind && self.metadata == other.metadata
    }
}

impl fmt::Debug for Definition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Definition")
            .field("pattern", &self.pattern)
            .field("kind", &self.kind)
            .field("metadata", &self.metadata)
            .finish_non_exhaustive()
    }
}
