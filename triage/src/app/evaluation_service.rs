//! Evaluation service
//!
//! Runs a batch of raw tickets through the pipeline and scores the results:
//! how often the analyzers agree, whether every final output is complete,
//! and a heuristic correctness score for the final routing.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::Value;
use sha2::{Digest, Sha256};
use uuid::Uuid;

use super::routing_policy::{PrecedencePolicy, RoutingPolicy};
use super::triage_service::TriageService;
use crate::domain::entities::{
    AgentOutput, Opinion, Priority, SourceId, Ticket, TEAM_CUSTOMER_SUCCESS, TEAM_DEVOPS,
    TEAM_ENGINEERING,
};
use crate::error::AppError;

/// Aggregate metrics for one evaluation run
#[derive(Debug, Clone, Serialize)]
pub struct EvaluationReport {
    pub run_id: Uuid,
    pub generated_at: DateTime<Utc>,
    /// SHA-256 over the evaluated records, for telling runs on the same batch apart
    pub batch_digest: String,
    pub total_tickets: usize,
    /// Share of tickets where the technical and customer categories match
    pub category_agreement_rate: f64,
    /// Share of tickets where the technical and customer priorities match
    pub priority_agreement_rate: f64,
    /// Share of final outputs with every field populated
    pub completeness_rate: f64,
    /// Mean final reasoning length in characters
    pub avg_reasoning_length: f64,
    pub heuristic_correctness_score: f64,
}

impl std::fmt::Display for EvaluationReport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "- total_tickets: {}", self.total_tickets)?;
        writeln!(
            f,
            "- category_agreement_rate: {}",
            self.category_agreement_rate
        )?;
        writeln!(
            f,
            "- priority_agreement_rate: {}",
            self.priority_agreement_rate
        )?;
        writeln!(f, "- completeness_rate: {}", self.completeness_rate)?;
        writeln!(f, "- avg_reasoning_length: {}", self.avg_reasoning_length)?;
        write!(
            f,
            "- heuristic_correctness_score: {}",
            self.heuristic_correctness_score
        )
    }
}

#[derive(Debug, Default)]
struct Tally {
    category_agreements: usize,
    priority_agreements: usize,
    complete_outputs: usize,
    reasoning_chars: usize,
    correctness_points: usize,
}

impl Tally {
    fn into_report(self, records: &[Value]) -> EvaluationReport {
        let total = records.len();
        let rate = |count: usize| {
            if total == 0 {
                0.0
            } else {
                count as f64 / total as f64
            }
        };

        EvaluationReport {
            run_id: Uuid::new_v4(),
            generated_at: Utc::now(),
            batch_digest: batch_digest(records),
            total_tickets: total,
            category_agreement_rate: rate(self.category_agreements),
            priority_agreement_rate: rate(self.priority_agreements),
            completeness_rate: rate(self.complete_outputs),
            avg_reasoning_length: rate(self.reasoning_chars),
            heuristic_correctness_score: rate(self.correctness_points),
        }
    }
}

/// Scores triage decisions over a batch of raw tickets
pub struct Evaluator<P = PrecedencePolicy>
where
    P: RoutingPolicy,
{
    service: Arc<TriageService<P>>,
}

impl<P> Evaluator<P>
where
    P: RoutingPolicy + 'static,
{
    pub fn new(service: Arc<TriageService<P>>) -> Self {
        Self { service }
    }

    /// Decide the batch concurrently through the service, then score it
    pub async fn evaluate(&self, records: &[Value]) -> Result<EvaluationReport, AppError> {
        let outputs = self.service.process_batch(records.to_vec()).await?;
        self.score(records, &outputs)
    }

    /// Decide each record with `process`, then score it
    pub fn evaluate_with<F>(&self, records: &[Value], process: F) -> EvaluationReport
    where
        F: Fn(&Value) -> AgentOutput,
    {
        let outputs: Vec<AgentOutput> = records.iter().map(process).collect();
        // Lengths match by construction
        self.tally(records, &outputs).into_report(records)
    }

    /// Score final outputs already produced for `records`, index by index
    pub fn score(
        &self,
        records: &[Value],
        outputs: &[AgentOutput],
    ) -> Result<EvaluationReport, AppError> {
        if records.len() != outputs.len() {
            return Err(AppError::InvalidBatch(format!(
                "{} records but {} outputs",
                records.len(),
                outputs.len()
            )));
        }
        Ok(self.tally(records, outputs).into_report(records))
    }

    fn tally(&self, records: &[Value], outputs: &[AgentOutput]) -> Tally {
        let mut tally = Tally::default();

        for (raw, output) in records.iter().zip(outputs) {
            if output.is_complete() {
                tally.complete_outputs += 1;
            }
            tally.reasoning_chars += output.reasoning.chars().count();

            // Invalid records have no opinions to compare
            let Ok(ticket) = Ticket::from_raw(raw) else {
                continue;
            };

            let opinions = self.service.analyze(&ticket);
            if let (Some(technical), Some(customer)) = (
                find_source(&opinions, SourceId::TECHNICAL),
                find_source(&opinions, SourceId::CUSTOMER),
            ) {
                if technical.category == customer.category {
                    tally.category_agreements += 1;
                }
                if technical.priority == customer.priority {
                    tally.priority_agreements += 1;
                }
            }

            tally.correctness_points += correctness_points(&ticket, output);
        }

        tracing::debug!(?tally, "Evaluation tally");
        tally
    }
}

/// Hex SHA-256 of the records in order, one compact JSON document per line
pub fn batch_digest(records: &[Value]) -> String {
    let mut hasher = Sha256::new();
    for record in records {
        hasher.update(record.to_string().as_bytes());
        hasher.update(b"\n");
    }
    hex::encode(hasher.finalize())
}

fn find_source<'a>(opinions: &'a [Opinion], source: &str) -> Option<&'a AgentOutput> {
    opinions
        .iter()
        .find(|opinion| opinion.source.as_str() == source)
        .map(|opinion| &opinion.output)
}

/// Heuristic points (0 to 3) for one final decision
pub fn correctness_points(ticket: &Ticket, output: &AgentOutput) -> usize {
    let subject = ticket.subject.to_lowercase();
    let message = ticket.message.to_lowercase();
    let mut points = 0;

    if ticket.customer_tier.is_high_value() && output.priority >= Priority::High {
        points += 1;
    }

    let looks_technical = subject.contains("error") || message.contains("failing");
    let technical_team =
        output.recommended_team == TEAM_ENGINEERING || output.recommended_team == TEAM_DEVOPS;
    if looks_technical && output.category.is_technical_family() && technical_team {
        points += 1;
    }

    if subject.contains("question") && output.recommended_team == TEAM_CUSTOMER_SUCCESS {
        points += 1;
    }

    points
}
