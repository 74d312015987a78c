//! Domain ports (traits)
//!
//! Port traits define the interfaces the pipeline requires.
//! Adapters provide concrete implementations of these traits.

pub mod analyzer;

pub use analyzer::Analyzer;
