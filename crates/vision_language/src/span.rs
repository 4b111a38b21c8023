//! Source spans.
//!
//! A [`CodeProvider`] abstracts "a range of text within some origin". Two
//! providers are comparable only when they share origin and line; comparable
//! providers order by start offset. [`CodeSpan`] is the concrete span bound
//! to a [`LineSource`] line.

use std::cmp::Ordering;
use std::fmt;
use std::rc::Rc;

use vision_foundation::{Error, ErrorContext, Result};

use crate::source::{LineSource, is_blank};

/// A range of text within a named origin.
pub trait CodeProvider {
    /// Returns the current text of the span.
    fn code(&self) -> String;

    /// Returns the origin identity (the line source name).
    fn origin(&self) -> &str;

    /// Returns the zero-based line index.
    fn line(&self) -> usize;

    /// Returns the start byte offset within the line.
    fn start(&self) -> usize;

    /// Reports whether both spans share origin and line.
    fn can_compare_to(&self, other: &dyn CodeProvider) -> bool {
        self.origin() == other.origin() && self.line() == other.line()
    }

    /// Orders two spans by start offset.
    ///
    /// Fails with `IncomparableSpans` if they do not share origin and line.
    fn compare(&self, other: &dyn CodeProvider) -> Result<Ordering> {
        if !self.can_compare_to(other) {
            return Err(Error::incomparable_spans(
                describe(self.origin(), self.line(), self.start()),
                describe(other.origin(), other.line(), other.start()),
            ));
        }
        Ok(self.start().cmp(&other.start()))
    }
}

fn describe(origin: &str, line: usize, start: usize) -> String {
    format!("{origin}:{line}+{start}")
}

/// Sorts spans by start offset.
///
/// Fails with `IncomparableSpans`, leaving `spans` untouched, if any two
/// spans do not share origin and line.
pub fn sort_spans<T: CodeProvider>(spans: &mut [T]) -> Result<()> {
    if let Some((first, rest)) = spans.split_first() {
        for other in rest {
            first.compare(other)?;
        }
    }
    spans.sort_by_key(|span| span.start());
    Ok(())
}

/// A span over one line of a [`LineSource`], with optional byte offsets.
#[derive(Clone)]
pub struct CodeSpan {
    source: Rc<LineSource>,
    line: usize,
    start: usize,
    end: Option<usize>,
}

impl CodeSpan {
    /// Creates a span over the whole of line `line`.
    ///
    /// Fails with `EdgeOfSource` for an index outside the source and with
    /// `BlankLineRejected` if the line resolves to whitespace only.
    pub fn new(source: Rc<LineSource>, line: usize) -> Result<Self> {
        Self::with_range(source, line, 0, None)
    }

    /// Creates a span over `start..end` of line `line` (`end = None` runs to
    /// the end of the line).
    pub fn with_range(
        source: Rc<LineSource>,
        line: usize,
        start: usize,
        end: Option<usize>,
    ) -> Result<Self> {
        let position = isize::try_from(line).unwrap_or(isize::MAX);
        source.check_index(position)?;
        let text = source.read(line)?;
        if is_blank(&text) {
            return Err(Error::blank_line(source.name(), line)
                .with_context(ErrorContext::at(source.name(), line, start)));
        }
        let stop = end.unwrap_or(text.len());
        if start > stop || text.get(start..stop).is_none() {
            return Err(Error::span_out_of_range(start, end, text.len()));
        }
        Ok(Self {
            source,
            line,
            start,
            end,
        })
    }

    /// Creates a sub-span. Offsets are relative to this span's text.
    pub fn narrow(&self, start: usize, end: usize) -> Result<Self> {
        Self::with_range(
            Rc::clone(&self.source),
            self.line,
            self.start + start,
            Some(self.start + end),
        )
    }

    /// Returns the end byte offset, if bounded.
    #[must_use]
    pub const fn end(&self) -> Option<usize> {
        self.end
    }

    /// Returns the line source this span reads from.
    #[must_use]
    pub fn source(&self) -> &Rc<LineSource> {
        &self.source
    }

    /// Returns the full text of the span's line.
    #[must_use]
    pub fn line_text(&self) -> String {
        self.source.read(self.line).unwrap_or_default()
    }
}

impl CodeProvider for CodeSpan {
    fn code(&self) -> String {
        let text = self.line_text();
        let slice = match self.end {
            Some(end) => text.get(self.start..end),
            None => text.get(self.start..),
        };
        slice.unwrap_or_default().to_string()
    }

    fn origin(&self) -> &str {
        self.source.name()
    }

    fn line(&self) -> usize {
        self.line
    }

    fn start(&self) -> usize {
        self.start
    }
}

impl PartialEq for CodeSpan {
    fn eq(&self, other: &Self) -> bool {
        self.origin() == other.origin()
            && self.line == other.line
            && self.start == other.start
            && self.end == other.end
    }
}

impl Eq for CodeSpan {}

impl fmt::Debug for CodeSpan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CodeSpan")
            .field("origin", &self.origin())
            .field("line", &self.line)
            .field("start", &self.start)
            .field("end", &self.end)
            .finish()
    }
}

impl fmt::Display for CodeSpan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.code())
    }
}
