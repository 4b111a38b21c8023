//! Line-to-command scanner.
//!
//! A [`Scanner`] walks an ordered line sequence and yields a [`Command`] for
//! every non-blank line. The cursor always satisfies `0 <= position < len`;
//! a move that would leave that range fails with `EdgeOfSource` and leaves
//! the cursor where it was. Forward traversal reports exhaustion as
//! `Ok(None)`. [`Scanner::reversed`] walks back over the lines already
//! consumed, rewinding the cursor to line 0 as it goes.

use std::fmt;
use std::rc::Rc;

use tracing::trace;
use vision_foundation::{Error, ErrorKind, Result};

use crate::command::Command;
use crate::source::{LineReader, LineSource, is_blank};
use crate::span::CodeSpan;

/// Builds a command from the span of a non-blank line.
pub type CommandBuilder = Rc<dyn Fn(CodeSpan) -> Result<Command>>;

fn default_builder() -> CommandBuilder {
    Rc::new(|span| Ok(Command::new(span)))
}

/// Scans commands out of one named line source.
pub struct Scanner {
    source: Rc<LineSource>,
    position: usize,
    /// True while the line under the cursor has not been read yet.
    fresh: bool,
    builder: CommandBuilder,
}

impl Scanner {
    /// Creates a scanner over `lines`.
    ///
    /// Fails with `EmptySource` if there are no lines.
    pub fn new<I, S>(name: impl Into<String>, lines: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let name = name.into();
        let lines: Vec<String> = lines.into_iter().map(Into::into).collect();
        if lines.is_empty() {
            return Err(Error::new(ErrorKind::EmptySource { origin: name }));
        }
        Ok(Self {
            source: Rc::new(LineSource::new(name, lines)),
            position: 0,
            fresh: true,
            builder: default_builder(),
        })
    }

    /// Replaces the command constructor.
    #[must_use]
    pub fn with_builder(mut self, builder: CommandBuilder) -> Self {
        self.builder = builder;
        self
    }

    /// Replaces the command constructor in place.
    pub fn set_builder(&mut self, builder: CommandBuilder) {
        self.builder = builder;
    }

    /// Returns the scanner name (the origin of its spans).
    #[must_use]
    pub fn name(&self) -> &str {
        self.source.name()
    }

    /// Returns the cursor.
    #[must_use]
    pub const fn position(&self) -> usize {
        self.position
    }

    /// Returns the number of lines.
    #[must_use]
    pub fn len(&self) -> usize {
        self.source.len()
    }

    /// Always false: a scanner holds at least one line.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.source.is_empty()
    }

    /// Returns the shared line source.
    #[must_use]
    pub fn source(&self) -> &Rc<LineSource> {
        &self.source
    }

    /// Installs a line reader; `None` restores reading from the held lines.
    pub fn set_line_reader(&mut self, reader: Option<LineReader>) {
        self.source.set_reader(reader);
    }

    /// Reads line `index` through the active line reader.
    pub fn read_line(&self, index: usize) -> Result<String> {
        self.source.read(index)
    }

    /// Appends a line. A scanner that has run out resumes from it.
    pub fn push_line(&mut self, line: impl Into<String>) {
        self.source.push(line.into());
    }

    /// Moves the cursor to `position`, leaving it unchanged on failure.
    pub fn seek(&mut self, position: usize) -> Result<usize> {
        let position = isize::try_from(position).unwrap_or(isize::MAX);
        self.position = self.source.check_index(position)?;
        self.fresh = true;
        Ok(self.position)
    }

    /// Moves the cursor forward by one and returns the new position.
    pub fn advance(&mut self) -> Result<usize> {
        self.step(1)
    }

    /// Moves the cursor back by one and returns the new position.
    pub fn rewind(&mut self) -> Result<usize> {
        self.step(-1)
    }

    fn step(&mut self, by: isize) -> Result<usize> {
        let current = isize::try_from(self.position).unwrap_or(isize::MAX);
        let next = self.source.check_index(current + by)?;
        trace!(scanner = self.name(), from = self.position, to = next, "cursor moved");
        self.position = next;
        Ok(next)
    }

    /// Returns the command for the next non-blank line, or `Ok(None)` once
    /// the lines run out.
    ///
    /// A line reader that returns `None` also ends the scan; the cursor stays
    /// where it was so a later call can pick up from the same place.
    pub fn next_command(&mut self) -> Result<Option<Command>> {
        loop {
            let resume = (self.position, self.fresh);
            if self.fresh {
                self.fresh = false;
            } else if let Err(err) = self.advance() {
                if err.is_edge_of_source() {
                    trace!(scanner = self.name(), "scanner exhausted");
                    return Ok(None);
                }
                return Err(err);
            }

            let text = match self.source.read(self.position) {
                Ok(text) => text,
                Err(err) if err.is_edge_of_source() => {
                    (self.position, self.fresh) = resume;
                    trace!(scanner = self.name(), line = self.position, "line reader ran out");
                    return Ok(None);
                }
                Err(err) => return Err(err),
            };
            if !is_blank(&text) {
                return self.build(self.position).map(Some);
            }
        }
    }

    /// Walks back over consumed lines, yielding their commands newest first.
    ///
    /// The walk rewinds the cursor as it goes and leaves it at line 0 when
    /// complete; it cannot be restarted over the same lines. A line that has
    /// not been read yet is not part of the walk, so on a new scanner or
    /// right after [`seek`](Self::seek) it starts one line above the cursor.
    /// The walk ends early if the line reader returns `None`.
    pub fn reversed(&mut self) -> Reversed<'_> {
        Reversed {
            scanner: self,
            started: false,
            done: false,
        }
    }

    fn build(&self, line: usize) -> Result<Command> {
        let span = CodeSpan::new(Rc::clone(&self.source), line)?;
        (self.builder)(span)
    }
}

impl Iterator for Scanner {
    type Item = Result<Command>;

    fn next(&mut self) -> Option<Self::Item> {
        self.next_command().transpose()
    }
}

impl fmt::Debug for Scanner {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Scanner")
            .field("name", &self.name())
            .field("position", &self.position)
            .finish_non_exhaustive()
    }
}

/// Destructive reverse traversal returned by [`Scanner::reversed`].
pub struct Reversed<'s> {
    scanner: &'s mut Scanner,
    started: bool,
    done: bool,
}

impl Reversed<'_> {
    fn finish(&mut self) {
        self.done = true;
        // Line 0 becomes unread again so forward scanning restarts there.
        self.scanner.fresh = true;
    }
}

impl Iterator for Reversed<'_> {
    type Item = Result<Command>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        if !self.started {
            self.started = true;
            if self.scanner.fresh && self.scanner.rewind().is_err() {
                self.finish();
                return None;
            }
        }

        loop {
            let line = self.scanner.position;
            let text = match self.scanner.source.read(line) {
                Ok(text) => text,
                Err(err) if err.is_edge_of_source() => {
                    self.finish();
                    return None;
                }
                Err(err) => {
                    self.done = true;
                    return Some(Err(err));
                }
            };
            let command = (!is_blank(&text)).then(|| self.scanner.build(line));

            if self.scanner.rewind().is_err() {
                self.finish();
            }
            if let Some(result) = command {
                if result.is_err() {
                    self.done = true;
                }
                return Some(result);
            }
            if self.done {
                return None;
            }
        }
    }
}
