//! Test fixtures
//!
//! Factory functions for creating test data with sensible defaults.
//! Default subjects and messages avoid every analyzer keyword, so each test
//! only triggers the rules it sets up.

use serde_json::{json, Value};

use crate::domain::entities::{AgentOutput, Category, CustomerTier, Priority, Ticket};

/// Create a test ticket with neutral text
pub fn test_ticket() -> Ticket {
    Ticket {
        ticket_id: "TEST-1".to_string(),
        customer_tier: CustomerTier::Free,
        subject: "Hello".to_string(),
        message: "Something looks off".to_string(),
        previous_tickets: 0,
        monthly_revenue: 0.0,
        account_age_days: 30,
    }
}

/// Create a test ticket with the given subject and message
pub fn test_ticket_about(subject: &str, message: &str) -> Ticket {
    Ticket {
        subject: subject.to_string(),
        message: message.to_string(),
        ..test_ticket()
    }
}

/// Create a test ticket with a specific account profile
pub fn test_ticket_for(tier: CustomerTier, monthly_revenue: f64, previous_tickets: u32) -> Ticket {
    Ticket {
        customer_tier: tier,
        monthly_revenue,
        previous_tickets,
        ..test_ticket()
    }
}

/// Create an analyzer output with placeholder reasoning
pub fn test_output(category: Category, priority: Priority, team: &str) -> AgentOutput {
    AgentOutput::new(category, priority, team, format!("{} reasoning.", team))
}

/// Create a well-formed raw ticket record
pub fn raw_ticket(ticket_id: &str) -> Value {
    json!({
        "ticket_id": ticket_id,
        "customer_tier": "premium",
        "subject": "Hello",
        "message": "Something looks off",
        "previous_tickets": 1,
        "monthly_revenue": 2000.0,
        "account_age_days": 90
    })
}
