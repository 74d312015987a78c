//! Adapters layer
//!
//! Concrete analyzers implementing the `Analyzer` port:
//! - `technical_analyzer`: keyword heuristics over subject and message
//! - `customer_context_analyzer`: tier, revenue and history heuristics

pub mod customer_context_analyzer;
pub mod technical_analyzer;

pub use customer_context_analyzer::{CustomerContextAnalyzer, CustomerThresholds};
pub use technical_analyzer::TechnicalAnalyzer;
