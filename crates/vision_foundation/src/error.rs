//! Error types for the Vision front end.
//!
//! Uses `thiserror` for ergonomic error definition with rich context.

use std::fmt;

use thiserror::Error;

/// The main error type for Vision operations.
#[derive(Debug, Error)]
#[error("{kind}")]
pub struct Error {
    /// The kind of error that occurred.
    pub kind: ErrorKind,
    /// Optional context about where the error occurred.
    pub context: Option<ErrorContext>,
}

impl Error {
    /// Creates a new error with the given kind.
    #[must_use]
    pub fn new(kind: ErrorKind) -> Self {
        Self {
            kind,
            context: None,
        }
    }

    /// Adds context to this error.
    #[must_use]
    pub fn with_context(mut self, context: ErrorContext) -> Self {
        self.context = Some(context);
        self
    }

    /// Creates an edge-of-source error for a cursor that left `[0, length)`.
    #[must_use]
    pub fn edge_of_source(position: isize, length: usize) -> Self {
        Self::new(ErrorKind::EdgeOfSource { position, length })
    }

    /// Creates an error for a span or command built over a whitespace-only line.
    #[must_use]
    pub fn blank_line(origin: impl Into<String>, line: usize) -> Self {
        Self::new(ErrorKind::BlankLineRejected {
            origin: origin.into(),
            line,
        })
    }

    /// Creates an unrecognized token error.
    #[must_use]
    pub fn unrecognized_token(detail: UnrecognizedToken) -> Self {
        Self::new(ErrorKind::UnrecognizedToken(Box::new(detail)))
    }

    /// Creates an error for comparing spans that do not share origin and line.
    #[must_use]
    pub fn incomparable_spans(left: impl Into<String>, right: impl Into<String>) -> Self {
        Self::new(ErrorKind::IncomparableSpans {
            left: left.into(),
            right: right.into(),
        })
    }

    /// Creates an error for span offsets outside the resolved line.
    #[must_use]
    pub fn span_out_of_range(start: usize, end: Option<usize>, length: usize) -> Self {
        Self::new(ErrorKind::SpanOutOfRange { start, end, length })
    }

    /// Creates an invalid pattern error.
    #[must_use]
    pub fn invalid_pattern(pattern: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(ErrorKind::InvalidPattern {
            pattern: pattern.into(),
            message: message.into(),
        })
    }

    /// Creates an I/O error for the given path.
    #[must_use]
    pub fn io(path: impl Into<String>, err: &std::io::Error) -> Self {
        Self::new(ErrorKind::Io {
            path: path.into(),
            message: err.to_string(),
        })
    }

    /// Returns true if this is an edge-of-source condition.
    #[must_use]
    pub fn is_edge_of_source(&self) -> bool {
        self.kind.is_edge_of_source()
    }
}

/// Categorized error kinds for pattern matching.
#[derive(Debug, Error)]
pub enum ErrorKind {
    /// A cursor move or read fell outside `[0, length)`.
    #[error("edge of source: position {position} outside 0..{length}")]
    EdgeOfSource {
        /// The rejected position.
        position: isize,
        /// Number of lines in the source.
        length: usize,
    },

    /// A span or command was requested over a whitespace-only line.
    #[error("blank line rejected: {origin} line {line} is whitespace only")]
    BlankLineRejected {
        /// Name of the line source.
        origin: String,
        /// Zero-based line index.
        line: usize,
    },

    /// No active pattern matched a run of text.
    #[error("{0}")]
    UnrecognizedToken(Box<UnrecognizedToken>),

    /// Two spans were ordered that do not share origin and line.
    #[error("incomparable spans: {left} and {right}")]
    IncomparableSpans {
        /// Description of the left-hand span.
        left: String,
        /// Description of the right-hand span.
        right: String,
    },

    /// Span offsets do not fit the resolved line text.
    #[error("span out of range: {start}..{end:?} in line of length {length}")]
    SpanOutOfRange {
        /// Start offset.
        start: usize,
        /// Optional end offset.
        end: Option<usize>,
        /// Byte length of the line text.
        length: usize,
    },

    /// A scanner was created over an empty line sequence.
    #[error("empty source: {origin} has no lines")]
    EmptySource {
        /// Name of the line source.
        origin: String,
    },

    /// A definition pattern failed to compile.
    #[error("invalid pattern {pattern:?}: {message}")]
    InvalidPattern {
        /// The pattern text.
        pattern: String,
        /// Compiler message.
        message: String,
    },

    /// No scanner is registered under the requested name.
    #[error("unknown scanner: {0}")]
    UnknownScanner(String),

    /// Reading a source file failed.
    #[error("i/o error reading {path}: {message}")]
    Io {
        /// The path that failed.
        path: String,
        /// Underlying error message.
        message: String,
    },

    /// Configuration could not be parsed.
    #[error("config error: {0}")]
    Config(String),

    /// Replaying history produced a different scope than the incremental stack.
    #[error("scope divergence: replay gave {replayed:?}, stack holds {incremental:?}")]
    ScopeDivergence {
        /// Module names from the replay.
        replayed: Vec<String>,
        /// Module names from the incremental stack.
        incremental: Vec<String>,
    },

    /// Internal error (should not happen).
    #[error("internal error: {0}")]
    Internal(String),
}

impl ErrorKind {
    /// Returns true for the recoverable edge-of-source condition.
    #[must_use]
    pub const fn is_edge_of_source(&self) -> bool {
        matches!(self, Self::EdgeOfSource { .. })
    }
}

/// Diagnostics for a run of text no active pattern recognized.
///
/// Carries the tokenizer's identity (origin, line, cursor) alongside the
/// offending run so the failure can be reported without the tokenizer.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct UnrecognizedToken {
    /// The exact unmatched run.
    pub text: String,
    /// Byte offset of the run within the command text.
    pub start: usize,
    /// Name of the line source the command came from.
    pub origin: String,
    /// Zero-based line index of the command.
    pub line: usize,
    /// Full text of the command being tokenized.
    pub code: String,
    /// Tokenizer cursor when the failure was raised.
    pub cursor: usize,
}

impl fmt::Display for UnrecognizedToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "unrecognized token {:?} at {}:{}:{}",
            self.text,
            self.origin,
            self.line + 1,
            self.start + 1
        )
    }
}

/// Position in the Vision input an error points at.
///
/// Lines and columns are one-based, matching editor conventions; columns
/// count bytes.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ErrorContext {
    /// Name of the line source.
    pub origin: String,
    /// One-based line number.
    pub line: usize,
    /// One-based byte column.
    pub column: usize,
    /// Operations in progress when the error arose, outermost first.
    pub frames: Vec<String>,
}

impl ErrorContext {
    /// Points at byte `offset` of zero-based line `line` in `origin`.
    #[must_use]
    pub fn at(origin: impl Into<String>, line: usize, offset: usize) -> Self {
        Self {
            origin: origin.into(),
            line: line + 1,
            column: offset + 1,
            frames: Vec::new(),
        }
    }

    /// Records the operation that was running.
    #[must_use]
    pub fn within(mut self, frame: impl Into<String>) -> Self {
        self.frames.push(frame.into());
        self
    }
}

impl fmt::Display for ErrorContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}:{}", self.origin, self.line, self.column)?;
        for frame in &self.frames {
            write!(f, " (while {frame})")?;
        }
        Ok(())
    }
}
