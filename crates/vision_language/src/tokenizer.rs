//! Pattern-table tokenizer.
//!
//! Converts one command's text into tokens using a [`Lexicon`]. At each
//! cursor position the table is tried in order and the first anchored,
//! case-insensitive match wins. Positions where nothing matches accumulate
//! into a pending unmatched run; the run is reported as soon as a later
//! position matches or the text ends, so a later match never excuses earlier
//! unmatched text.

use tracing::trace;
use vision_foundation::{Error, ErrorContext, Result, UnrecognizedToken};

use crate::command::Command;
use crate::lexicon::Lexicon;
use crate::span::{CodeProvider, CodeSpan};
use crate::token::Token;

/// Produces the tokens of one command.
#[derive(Debug)]
pub struct Tokenizer {
    span: CodeSpan,
    code: String,
    lexicon: Lexicon,
    position: usize,
    failed: bool,
}

impl Tokenizer {
    /// Creates a tokenizer over `command` using `lexicon`.
    #[must_use]
    pub fn new(command: &Command, lexicon: Lexicon) -> Self {
        Self {
            span: command.span().clone(),
            code: command.code(),
            lexicon,
            position: 0,
            failed: false,
        }
    }

    /// Returns the cursor as a byte offset into the command text.
    #[must_use]
    pub const fn position(&self) -> usize {
        self.position
    }

    /// Returns the command text being tokenized.
    #[must_use]
    pub fn code(&self) -> &str {
        &self.code
    }

    /// Returns the lexicon in use.
    #[must_use]
    pub fn lexicon(&self) -> &Lexicon {
        &self.lexicon
    }

    /// Returns the next token, `Ok(None)` at the end of the command, or an
    /// `UnrecognizedToken` error naming the maximal unmatched run.
    pub fn next_token(&mut self) -> Result<Option<Token>> {
        let mut pending: Option<usize> = None;

        while self.position < self.code.len() {
            let rest = &self.code[self.position..];
            if let Some((definition, len)) = self.lexicon.match_at(rest) {
                if let Some(start) = pending {
                    return Err(self.unrecognized(start, self.position));
                }
                let start = self.position;
                let end = start + len;
                let span = self.span.narrow(start, end)?;
                let token = definition.construct(span, self.code[start..end].to_string());
                trace!(kind = token.kind(), start, end, "matched token");
                self.position = end;
                return Ok(Some(token));
            }

            pending.get_or_insert(self.position);
            self.position += rest.chars().next().map_or(1, char::len_utf8);
        }

        match pending {
            Some(start) => Err(self.unrecognized(start, self.code.len())),
            None => Ok(None),
        }
    }

    /// Collects every remaining token, stopping at the first failure.
    pub fn collect_tokens(&mut self) -> Result<Vec<Token>> {
        let mut tokens = Vec::new();
        while let Some(token) = self.next_token()? {
            tokens.push(token);
        }
        Ok(tokens)
    }

    fn unrecognized(&mut self, start: usize, end: usize) -> Error {
        self.failed = true;
        let detail = UnrecognizedToken {
            text: self.code[start..end].to_string(),
            start,
            origin: self.span.origin().to_string(),
            line: self.span.line(),
            code: self.code.clone(),
            cursor: self.position,
        };
        trace!(text = %detail.text, start, "unrecognized run");
        let context = ErrorContext::at(&detail.origin, detail.line, self.span.start() + start)
            .within("tokenize");
        Error::unrecognized_token(detail).with_context(context)
    }
}

impl Iterator for Tokenizer {
    type Item = Result<Token>;

    /// Yields tokens until the end of the command; fused after a failure.
    fn next(&mut self) -> Option<Self::Item> {
        if self.failed {
            return None;
        }
        self.next_token().transpose()
    }
}
