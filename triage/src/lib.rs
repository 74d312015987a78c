//! Ticket Triage
//!
//! Classifies support tickets by running independent analyzers over each one
//! and merging their opinions into a single routing decision: category,
//! priority, responsible team and a readable explanation.
//! Uses hexagonal (ports & adapters) architecture: analyzers plug in behind
//! the `Analyzer` port and the orchestrator only sees their opinions.

pub mod adapters;
pub mod app;
pub mod config;
pub mod domain;
pub mod error;
pub mod samples;

#[cfg(test)]
mod test_utils;


pub use adapters::{CustomerContextAnalyzer, CustomerThresholds, TechnicalAnalyzer};
pub use app::{
    parse_records, process_ticket, read_records, EvaluationReport, Evaluator, Orchestrator,
    PrecedencePolicy, RoutingPolicy, TriageService,
};
pub use config::Config;
pub use domain::entities::{
    AgentOutput, Category, CustomerTier, Opinion, Priority, SourceId, Ticket,
};
pub use domain::ports::Analyzer;
pub use error::{AppError, ConfigError, FieldError, ValidationError};
