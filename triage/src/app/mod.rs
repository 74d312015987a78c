//! Application layer
//!
//! Contains the triage pipeline and the evaluation run built on top of it.
//! Services coordinate between domain entities, the analyzer port and the
//! orchestrator.

pub mod evaluation_service;
pub mod orchestrator;
pub mod routing_policy;
pub mod triage_service;

pub use evaluation_service::{batch_digest, correctness_points, EvaluationReport, Evaluator};
pub use orchestrator::{compose_explanation, resolve_priority, Orchestrator};
pub use routing_policy::{CategoryMatch, PrecedencePolicy, PrecedenceRule, RoutingPolicy};
pub use triage_service::{parse_records, read_records, TriageService};

use serde_json::Value;

use crate::domain::entities::AgentOutput;

/// Decide one raw ticket with the default analyzers and routing policy
pub fn process_ticket(raw: &Value) -> AgentOutput {
    TriageService::default().process_ticket(raw)
}
