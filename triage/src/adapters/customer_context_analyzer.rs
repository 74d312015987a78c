//! Customer context analyzer
//!
//! Judges business impact from the account rather than the ticket text: tier,
//! monthly revenue and support history set the priority, a few subject and
//! message keywords pick the customer-facing team.

use crate::domain::entities::{
    AgentOutput, Category, CustomerTier, Priority, SourceId, Ticket, TEAM_ACCOUNT_MANAGER,
    TEAM_BILLING_SUPPORT, TEAM_CUSTOMER_SUCCESS,
};
use crate::domain::ports::Analyzer;

const REASONING_PREFIX: &str = "Customer context analysis: ";

/// Thresholds for the revenue and history adjustments
#[derive(Debug, Clone, PartialEq)]
pub struct CustomerThresholds {
    /// Monthly revenue at or above which priority is raised
    pub high_revenue: f64,
    /// Monthly revenue below which a Medium priority is lowered
    pub medium_revenue: f64,
    /// Previous tickets at or above which priority is raised
    pub many_previous_tickets: u32,
    /// Previous tickets at or above which the history is noted
    pub some_previous_tickets: u32,
    /// Skip the low-revenue downgrade so priority only ever goes up
    pub monotonic_priority: bool,
}

impl Default for CustomerThresholds {
    fn default() -> Self {
        Self {
            high_revenue: 10_000.0,
            medium_revenue: 1_000.0,
            many_previous_tickets: 5,
            some_previous_tickets: 2,
            monotonic_priority: false,
        }
    }
}

/// Raise Low to Medium and Medium to High; anything else is left alone.
fn bump(priority: Priority) -> Priority {
    match priority {
        Priority::Low => Priority::Medium,
        Priority::Medium => Priority::High,
        other => other,
    }
}

/// Revenue as a decimal with at least one fractional digit ("5000.0")
fn format_revenue(amount: f64) -> String {
    if amount.fract() == 0.0 {
        format!("{:.1}", amount)
    } else {
        format!("{}", amount)
    }
}

/// Account-driven classifier
#[derive(Debug, Clone, Default)]
pub struct CustomerContextAnalyzer {
    thresholds: CustomerThresholds,
}

impl CustomerContextAnalyzer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_thresholds(mut self, thresholds: CustomerThresholds) -> Self {
        self.thresholds = thresholds;
        self
    }

    pub fn thresholds(&self) -> &CustomerThresholds {
        &self.thresholds
    }

    fn tier_priority(tier: CustomerTier, reasoning: &mut Vec<String>) -> Priority {
        match tier {
            CustomerTier::Enterprise => {
                reasoning.push("Enterprise customer, elevating priority.".to_string());
                Priority::Low.raise_to(Priority::High)
            }
            CustomerTier::Premium => {
                reasoning.push("Premium customer, elevating priority to Medium.".to_string());
                Priority::Low.raise_to(Priority::Medium)
            }
            CustomerTier::Free => {
                reasoning.push("Free tier customer.".to_string());
                Priority::Low
            }
        }
    }

    fn adjust_for_revenue(
        &self,
        ticket: &Ticket,
        priority: Priority,
        reasoning: &mut Vec<String>,
    ) -> Priority {
        let revenue = format_revenue(ticket.monthly_revenue);

        if ticket.monthly_revenue >= self.thresholds.high_revenue {
            reasoning.push(format!(
                "High monthly revenue (${}), further elevating priority.",
                revenue
            ));
            return bump(priority);
        }

        if ticket.monthly_revenue >= self.thresholds.medium_revenue {
            reasoning.push(format!("Medium monthly revenue (${}).", revenue));
            return priority;
        }

        reasoning.push(format!("Low monthly revenue (${}).", revenue));

        // The only rule that lowers priority. Kept by default because the
        // routing results depend on it; `monotonic_priority` turns it off.
        if priority == Priority::Medium {
            if self.thresholds.monotonic_priority {
                tracing::debug!(
                    ticket_id = %ticket.ticket_id,
                    "Skipping low-revenue downgrade (monotonic priority)"
                );
                return priority;
            }
            return Priority::Low;
        }
        priority
    }

    fn adjust_for_history(
        &self,
        previous_tickets: u32,
        priority: Priority,
        reasoning: &mut Vec<String>,
    ) -> Priority {
        if previous_tickets >= self.thresholds.many_previous_tickets {
            reasoning.push(format!(
                "Many previous tickets ({}), indicates potential chronic issue or frustrated \
                 customer, elevating priority.",
                previous_tickets
            ));
            bump(priority)
        } else if previous_tickets >= self.thresholds.some_previous_tickets {
            reasoning.push(format!("Some previous tickets ({}).", previous_tickets));
            priority
        } else {
            reasoning.push(format!("Few previous tickets ({}).", previous_tickets));
            priority
        }
    }

    fn classify(
        ticket: &Ticket,
        priority: Priority,
        reasoning: &mut Vec<String>,
    ) -> (Category, &'static str) {
        let subject = ticket.subject.to_lowercase();
        let message = ticket.message.to_lowercase();

        let (category, team, reason) = if subject.contains("billing") || message.contains("payment")
        {
            (
                Category::Billing,
                TEAM_BILLING_SUPPORT,
                "Detected billing-related keywords.",
            )
        } else if subject.contains("account")
            || message.contains("login")
            || subject.contains("password")
        {
            (
                Category::AccountManagement,
                TEAM_CUSTOMER_SUCCESS,
                "Detected account management keywords.",
            )
        } else if priority.is_urgent() && ticket.customer_tier.is_high_value() {
            (
                Category::UrgentCustomer,
                TEAM_ACCOUNT_MANAGER,
                "Urgent issue for high-value customer, recommending Account Manager.",
            )
        } else {
            (
                Category::GeneralInquiry,
                TEAM_CUSTOMER_SUCCESS,
                "General customer inquiry.",
            )
        };

        reasoning.push(reason.to_string());
        (category, team)
    }
}

impl Analyzer for CustomerContextAnalyzer {
    fn source(&self) -> SourceId {
        SourceId::customer()
    }

    fn analyze(&self, ticket: &Ticket) -> AgentOutput {
        let mut reasoning = Vec::new();

        let priority = Self::tier_priority(ticket.customer_tier, &mut reasoning);
        let priority = self.adjust_for_revenue(ticket, priority, &mut reasoning);
        let priority = self.adjust_for_history(ticket.previous_tickets, priority, &mut reasoning);
        let (category, team) = Self::classify(ticket, priority, &mut reasoning);

        tracing::debug!(
            ticket_id = %ticket.ticket_id,
            tier = %ticket.customer_tier,
            category = %category,
            priority = %priority,
            "Customer context analysis complete"
        );

        AgentOutput::new(
            category,
            priority,
            team,
            format!("{}{}", REASONING_PREFIX, reasoning.join(" ")),
        )
    }
}
