//! Orchestrator
//!
//! Merges every analyzer opinion for a ticket into one final decision:
//! - priority is the most urgent priority any source reported
//! - category and team come from the opinion the routing policy selects
//! - reasoning concatenates each source's perspective, in opinion order,
//!   followed by a sentence describing the decision
//!
//! `resolve` is total and deterministic. It never mutates its inputs.

use tracing::{info, warn};

use super::routing_policy::{PrecedencePolicy, RoutingPolicy};
use crate::domain::entities::{
    AgentOutput, Category, Opinion, Priority, Ticket, TEAM_SUPPORT_TIER_1,
};

/// Priority used when there are no opinions at all
const DEFAULT_PRIORITY: Priority = Priority::Medium;

const MISSING_REASONING: &str = "No reasoning provided.";

/// Merges analyzer opinions into a final routing decision
#[derive(Debug, Clone, Default)]
pub struct Orchestrator<P = PrecedencePolicy> {
    policy: P,
}

impl Orchestrator<PrecedencePolicy> {
    pub fn new() -> Self {
        Self::default()
    }
}

impl<P: RoutingPolicy> Orchestrator<P> {
    pub fn with_policy(policy: P) -> Self {
        Self { policy }
    }

    pub fn policy(&self) -> &P {
        &self.policy
    }

    /// Resolve the final decision for `ticket` from its analyzer opinions
    pub fn resolve(&self, ticket: &Ticket, opinions: &[Opinion]) -> AgentOutput {
        let opinions: Vec<Opinion> = opinions
            .iter()
            .map(|opinion| enforce_contract(ticket, opinion))
            .collect();

        let priority = resolve_priority(&opinions);

        let (category, team) = match self.policy.select(&opinions) {
            Some(selected) => (
                selected.output.category.clone(),
                selected.output.recommended_team.clone(),
            ),
            None => {
                warn!(ticket_id = %ticket.ticket_id, "No analyzer opinions to resolve");
                (Category::GeneralInquiry, TEAM_SUPPORT_TIER_1.to_string())
            }
        };

        let reasoning = compose_explanation(&opinions, priority, &category, &team);

        info!(
            ticket_id = %ticket.ticket_id,
            category = %category,
            priority = %priority,
            team = %team,
            "Final decision"
        );

        AgentOutput::new(category, priority, team, reasoning)
    }
}

/// Most urgent priority across all opinions
pub fn resolve_priority(opinions: &[Opinion]) -> Priority {
    opinions
        .iter()
        .map(|opinion| opinion.output.priority)
        .max()
        .unwrap_or(DEFAULT_PRIORITY)
}

/// Build the final explanation. Same inputs, same bytes.
pub fn compose_explanation(
    opinions: &[Opinion],
    priority: Priority,
    category: &Category,
    team: &str,
) -> String {
    let mut lines: Vec<String> = opinions
        .iter()
        .map(|opinion| {
            format!(
                "{} perspective: {}",
                opinion.source.perspective_label(),
                opinion.output.reasoning
            )
        })
        .collect();

    lines.push(format!(
        "Orchestration decision: Final priority is '{}' based on maximum urgency. \
         Final routing to '{}' with '{}' recommended team.",
        priority, category, team
    ));

    lines.join("\n")
}

/// Replace blank fields left by a misbehaving analyzer so the final output
/// is always complete.
fn enforce_contract(ticket: &Ticket, opinion: &Opinion) -> Opinion {
    if opinion.output.is_complete() {
        return opinion.clone();
    }

    warn!(
        ticket_id = %ticket.ticket_id,
        source = %opinion.source,
        "Analyzer returned an incomplete output; filling blank fields"
    );

    let mut repaired = opinion.clone();
    if repaired.output.category.is_blank() {
        repaired.output.category = Category::GeneralInquiry;
    }
    if repaired.output.recommended_team.trim().is_empty() {
        repaired.output.recommended_team = TEAM_SUPPORT_TIER_1.to_string();
    }
    if repaired.output.reasoning.trim().is_empty() {
        repaired.output.reasoning = MISSING_REASONING.to_string();
    }
    repaired
}
