//! Test utilities
//!
//! Fixtures and hand-written analyzer mocks for unit testing.
//! Analyzers are plain synchronous traits, so a mock is just a struct that
//! returns what it was configured with.

pub mod fixtures;
pub mod mocks;

pub use fixtures::*;
pub use mocks::*;
