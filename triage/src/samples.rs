//! Built-in sample tickets
//!
//! A small mixed batch covering API outages, UI glitches, feature requests and
//! high-value accounts. Used by the CLI when no input file is given.

use serde_json::{json, Value};

pub fn sample_tickets() -> Vec<Value> {
    vec![
        json!({
            "ticket_id": "1001",
            "customer_tier": "premium",
            "subject": "API returning 500 errors intermittently",
            "message": "Hi, our production system has been failing for the last hour due to intermittent 500 errors from your user API. We need an urgent fix.",
            "previous_tickets": 3,
            "monthly_revenue": 5000.0,
            "account_age_days": 450
        }),
        json!({
            "ticket_id": "SUP-001",
            "customer_tier": "free",
            "subject": "This product is completely broken!!!",
            "message": "Nothing works! I can't even log in. This is the worst software I've ever used.",
            "previous_tickets": 0,
            "monthly_revenue": 0,
            "account_age_days": 2
        }),
        json!({
            "ticket_id": "SUP-002",
            "customer_tier": "enterprise",
            "subject": "Minor UI issue with dashboard",
            "message": "Hi team, just noticed the dashboard numbers are slightly misaligned on mobile view",
            "previous_tickets": 15,
            "monthly_revenue": 25000,
            "account_age_days": 730
        }),
        json!({
            "ticket_id": "SUP-003",
            "customer_tier": "premium",
            "subject": "Feature Request: Bulk export",
            "message": "We need bulk export functionality for our quarterly reports.",
            "previous_tickets": 5,
            "monthly_revenue": 5000,
            "account_age_days": 400
        }),
        json!({
            "ticket_id": "SUP-004",
            "customer_tier": "premium",
            "subject": "API rate limits unclear",
            "message": "Getting rate limited but documentation says we should have 1000 requests/hour.",
            "previous_tickets": 8,
            "monthly_revenue": 3000,
            "account_age_days": 180
        }),
        json!({
            "ticket_id": "SUP-005",
            "customer_tier": "enterprise",
            "subject": "Urgent: Security vulnerability?",
            "message": "Our security team flagged that your API responses include internal server paths",
            "previous_tickets": 20,
            "monthly_revenue": 50000,
            "account_age_days": 900
        }),
        json!({
            "ticket_id": "1007",
            "customer_tier": "premium",
            "subject": "Frontend rendering glitch on dashboard",
            "message": "The main dashboard is not loading correctly for me. Some elements are overlapping. I'm using Chrome browser.",
            "previous_tickets": 0,
            "monthly_revenue": 3000.0,
            "account_age_days": 200
        }),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::Ticket;

    #[test]
    fn every_sample_validates() {
        let samples = sample_tickets();
        assert_eq!(samples.len(), 7);
        for raw in &samples {
            assert!(Ticket::from_raw(raw).is_ok(), "sample failed validation: {}", raw);
        }
    }
}
