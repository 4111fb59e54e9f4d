//! Internal test modules - whitebox tests with crate access
//!
//! Tests here drive the TUI against a `TestBackend` with a live controller.
