//! Integration tests for Layer 1: Language
//!
//! Tests for line sources, spans, the scanner, lexicons and the tokenizer.

mod spans;
mod tokenizer;
