//! Vision - lexical and scope-resolution front end
//!
//! This crate re-exports all layers of the Vision front end for convenient access.
//! For detailed documentation, see the individual layer crates.
//!
//! # Architecture
//!
//! ```text
//! Layer 2: vision_runtime     - Interpreter, scanner registry, scope, config, logging
//! Layer 1: vision_language    - Line sources, spans, scanner, lexicon, tokenizer
//! Layer 0: vision_foundation  - Errors and persistent history
//! ```

pub use vision_foundation as foundation;
pub use vision_language as language;
pub use vision_runtime as runtime;
