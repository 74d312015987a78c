//! Technical content analyzer
//!
//! Classifies a ticket by the technical keywords in its subject and message.
//! Matching is plain substring search over the lowercased text, so short
//! keywords such as "ui" or "rest" also hit inside longer words.

use crate::domain::entities::{
    AgentOutput, Category, Priority, SourceId, TechnicalArea, Ticket, TEAM_DEVOPS,
    TEAM_ENGINEERING, TEAM_SUPPORT_TIER_2,
};
use crate::domain::ports::Analyzer;

const API_KEYWORDS: &[&str] = &[
    "api",
    "endpoint",
    "integration",
    "sdk",
    "webhook",
    "rest",
    "graphql",
    "request",
    "response",
    "status code",
    "500",
    "404",
    "authentication",
    "authorization",
];

const DATABASE_KEYWORDS: &[&str] = &[
    "database",
    "db",
    "sql",
    "nosql",
    "query",
    "schema",
    "migration",
    "data loss",
    "performance slow",
    "corrupt data",
];

const FRONTEND_KEYWORDS: &[&str] = &[
    "ui",
    "ux",
    "frontend",
    "website",
    "dashboard",
    "button",
    "layout",
    "rendering",
    "browser",
    "css",
    "javascript",
    "react",
    "angular",
    "vue",
];

const BACKEND_KEYWORDS: &[&str] = &[
    "service",
    "server",
    "microservice",
    "logic",
    "computation",
    "timeout",
    "latency",
    "deployment",
];

const NETWORK_KEYWORDS: &[&str] = &["network", "connectivity", "firewall", "vpn", "dns"];

const CRITICAL_IMPACT_KEYWORDS: &[&str] = &[
    "production down",
    "critical",
    "blocking",
    "major outage",
    "all users affected",
    "data loss",
    "security breach",
];

const HIGH_IMPACT_KEYWORDS: &[&str] = &[
    "intermittent",
    "significant impact",
    "many users",
    "degraded performance",
    "unable to complete task",
];

const MEDIUM_IMPACT_KEYWORDS: &[&str] = &["minor issue", "bug", "improvement", "one user affected"];

const LOW_IMPACT_KEYWORDS: &[&str] = &["question", "suggestion", "feature request", "cosmetic"];

const REASONING_PREFIX: &str = "Technical analysis: ";

fn contains_any(text: &str, keywords: &[&str]) -> bool {
    keywords.iter().any(|keyword| text.contains(keyword))
}

/// Keyword-driven technical classifier
#[derive(Debug, Clone, Copy, Default)]
pub struct TechnicalAnalyzer;

impl TechnicalAnalyzer {
    pub fn new() -> Self {
        Self
    }

    /// First matching area wins, checked in a fixed order
    fn detect_area(text: &str) -> Option<(TechnicalArea, &'static str)> {
        if contains_any(text, API_KEYWORDS) {
            Some((TechnicalArea::Api, "Detected API-related keywords."))
        } else if contains_any(text, DATABASE_KEYWORDS) {
            Some((
                TechnicalArea::Database,
                "Detected database-related keywords.",
            ))
        } else if contains_any(text, FRONTEND_KEYWORDS) {
            Some((
                TechnicalArea::FrontendUi,
                "Detected frontend/UI-related keywords.",
            ))
        } else if contains_any(text, BACKEND_KEYWORDS) {
            Some((
                TechnicalArea::BackendService,
                "Detected backend/service-related keywords.",
            ))
        } else if contains_any(text, NETWORK_KEYWORDS) {
            Some((TechnicalArea::Network, "Detected network-related keywords."))
        } else {
            None
        }
    }

    fn detect_impact(text: &str) -> Option<(Priority, &'static str)> {
        if contains_any(text, CRITICAL_IMPACT_KEYWORDS) {
            Some((Priority::Critical, "Detected critical impact keywords."))
        } else if contains_any(text, HIGH_IMPACT_KEYWORDS) {
            Some((Priority::High, "Detected high impact keywords."))
        } else if contains_any(text, MEDIUM_IMPACT_KEYWORDS) {
            Some((Priority::Medium, "Detected medium impact keywords."))
        } else if contains_any(text, LOW_IMPACT_KEYWORDS) {
            Some((Priority::Low, "Detected low impact/informational keywords."))
        } else {
            None
        }
    }

    fn route(priority: Priority, area: Option<&TechnicalArea>) -> (&'static str, &'static str) {
        let needs_engineering = priority == Priority::Critical
            || matches!(
                area,
                Some(TechnicalArea::Api | TechnicalArea::Database | TechnicalArea::BackendService)
            );

        if needs_engineering {
            (TEAM_ENGINEERING, "Issue requires Engineering expertise.")
        } else if matches!(
            area,
            Some(TechnicalArea::FrontendUi | TechnicalArea::Network)
        ) {
            (TEAM_DEVOPS, "Issue suitable for DevOps/IT Support.")
        } else {
            (
                TEAM_SUPPORT_TIER_2,
                "General technical issue for Tier 2 support.",
            )
        }
    }
}

impl Analyzer for TechnicalAnalyzer {
    fn source(&self) -> SourceId {
        SourceId::technical()
    }

    fn analyze(&self, ticket: &Ticket) -> AgentOutput {
        let text = format!(
            "{} {}",
            ticket.subject.to_lowercase(),
            ticket.message.to_lowercase()
        );
        let mut reasoning: Vec<&str> = Vec::new();

        let area = Self::detect_area(&text).map(|(area, reason)| {
            reasoning.push(reason);
            area
        });

        let priority = match Self::detect_impact(&text) {
            Some((priority, reason)) => {
                reasoning.push(reason);
                priority
            }
            None => Priority::Medium,
        };

        let (team, reason) = Self::route(priority, area.as_ref());
        reasoning.push(reason);

        let category = area.map_or(Category::GeneralTechnical, Category::Technical);

        tracing::debug!(
            ticket_id = %ticket.ticket_id,
            category = %category,
            priority = %priority,
            "Technical analysis complete"
        );

        AgentOutput::new(
            category,
            priority,
            team,
            format!("{}{}", REASONING_PREFIX, reasoning.join(" ")),
        )
    }
}
