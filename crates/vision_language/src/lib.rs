//! Scanner, spans, lexicon and tokenizer for the Vision command language.
//!
//! This crate provides:
//! - [`LineSource`] - Named, shared line storage with a pluggable line reader
//! - [`CodeSpan`] - A range of text within one line of a source
//! - [`Scanner`] - Line-to-command traversal, forward and destructive-reverse
//! - [`Module`] / [`Definition`] - Vocabulary contributed to scope
//! - [`Lexicon`] - Ordered pattern table distilled from active modules
//! - [`Tokenizer`] - Pattern-table tokenization with unmatched-run reporting

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod command;
pub mod definition;
pub mod lexicon;
pub mod module;
pub mod scanner;
pub mod source;
pub mod span;
pub mod token;
pub mod tokenizer;


pub use command::{Command, LexiconProvider, ScopeChange};
pub use definition::{Definition, TokenConstructor};
pub use lexicon::Lexicon;
pub use module::Module;
pub use scanner::{CommandBuilder, Reversed, Scanner};
pub use source::{LineReader, LineSource, is_blank};
pub use span::{CodeProvider, CodeSpan, sort_spans};
pub use token::Token;
pub use tokenizer::Tokenizer;
