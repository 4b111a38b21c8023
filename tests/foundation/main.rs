//! Integration tests for Layer 0: Foundation
//!
//! Tests for error kinds, diagnostics and the persistent command history.
