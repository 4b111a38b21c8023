//! Named line storage shared between a scanner and the spans it produces.
//!
//! A [`LineSource`] owns the ordered line sequence for one input stream and
//! the strategy used to read a line by index. Spans keep an `Rc` to the
//! source so their text always resolves through the current reader.

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use vision_foundation::{Error, Result};

/// Replacement line-access strategy: maps a line index to its text.
///
/// Returning `None` reports the index as outside the source.
pub type LineReader = Rc<dyn Fn(usize) -> Option<String>>;

/// Returns true if `text` is empty or whitespace only.
#[must_use]
pub fn is_blank(text: &str) -> bool {
    text.trim().is_empty()
}

/// Ordered lines of one input stream, addressed by zero-based index.
pub struct LineSource {
    name: String,
    lines: RefCell<Vec<String>>,
    reader: RefCell<Option<LineReader>>,
}

impl LineSource {
    /// Creates a source holding `lines`.
    #[must_use]
    pub fn new(name: impl Into<String>, lines: Vec<String>) -> Self {
        Self {
            name: name.into(),
            lines: RefCell::new(lines),
            reader: RefCell::new(None),
        }
    }

    /// Returns the origin name of this source.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the number of held lines.
    #[must_use]
    pub fn len(&self) -> usize {
        self.lines.borrow().len()
    }

    /// Returns true if no lines are held.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.borrow().is_empty()
    }

    /// Appends a line to the held sequence.
    pub fn push(&self, line: String) {
        self.lines.borrow_mut().push(line);
    }

    /// Checks that `position` lies in `[0, len)`.
    pub fn check_index(&self, position: isize) -> Result<usize> {
        let length = self.len();
        usize::try_from(position)
            .ok()
            .filter(|index| *index < length)
            .ok_or_else(|| Error::edge_of_source(position, length))
    }

    /// Reads the text of line `index` through the active reader.
    ///
    /// Without a custom reader this reads from the held sequence.
    pub fn read(&self, index: usize) -> Result<String> {
        let reader = self.reader.borrow().clone();
        let text = match reader {
            Some(reader) => reader(index),
            None => self.lines.borrow().get(index).cloned(),
        };
        text.ok_or_else(|| {
            Error::edge_of_source(isize::try_from(index).unwrap_or(isize::MAX), self.len())
        })
    }

    /// Replaces the line reader; `None` restores the default strategy.
    pub fn set_reader(&self, reader: Option<LineReader>) {
        *self.reader.borrow_mut() = reader;
    }

    /// Returns true if a custom reader is installed.
    #[must_use]
    pub fn has_custom_reader(&self) -> bool {
        self.reader.borrow().is_some()
    }
}

impl fmt::Debug for LineSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LineSource")
            .field("name", &self.name)
            .field("len", &self.len())
            .field("custom_reader", &self.has_custom_reader())
            .finish()
    }
}
