//! Agent output domain entity
//!
//! A routing opinion: category, priority, recommended team and the reasoning
//! behind it. Produced once per analyzer per ticket, and once more by the
//! orchestrator for the final decision.

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

// ============================================================================
// Teams
// ============================================================================

pub const TEAM_ENGINEERING: &str = "Engineering";
pub const TEAM_DEVOPS: &str = "DevOps";
pub const TEAM_SUPPORT_TIER_1: &str = "Support Tier 1";
pub const TEAM_SUPPORT_TIER_2: &str = "Support Tier 2";
pub const TEAM_CUSTOMER_SUCCESS: &str = "Customer Success";
pub const TEAM_BILLING_SUPPORT: &str = "Billing Support";
pub const TEAM_ACCOUNT_MANAGER: &str = "Account Manager";
pub const TEAM_SYSTEM_ADMIN: &str = "System Admin";

// ============================================================================
// Priority
// ============================================================================

/// Ticket priority, ordered from least to most urgent
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Priority {
    Info,
    Low,
    Medium,
    High,
    Critical,
}

impl Priority {
    /// Severity rank: Info=1 through Critical=5
    pub fn rank(&self) -> u8 {
        match self {
            Priority::Info => 1,
            Priority::Low => 2,
            Priority::Medium => 3,
            Priority::High => 4,
            Priority::Critical => 5,
        }
    }

    /// Return the more urgent of the two. Never lowers `self`.
    pub fn raise_to(self, other: Priority) -> Priority {
        self.max(other)
    }

    pub fn is_urgent(&self) -> bool {
        *self >= Priority::High
    }
}

impl std::fmt::Display for Priority {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Priority::Info => write!(f, "Info"),
            Priority::Low => write!(f, "Low"),
            Priority::Medium => write!(f, "Medium"),
            Priority::High => write!(f, "High"),
            Priority::Critical => write!(f, "Critical"),
        }
    }
}

impl std::str::FromStr for Priority {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "info" => Ok(Priority::Info),
            "low" => Ok(Priority::Low),
            "medium" => Ok(Priority::Medium),
            "high" => Ok(Priority::High),
            "critical" => Ok(Priority::Critical),
            _ => Err(format!("Unknown priority: {}", s)),
        }
    }
}

// ============================================================================
// Category
// ============================================================================

const TECHNICAL_PREFIX: &str = "Technical - ";

/// Technical area named by a `Technical - <area>` category
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum TechnicalArea {
    Api,
    Database,
    FrontendUi,
    BackendService,
    Network,
    /// Area reported by a third-party analyzer
    Other(String),
}

impl TechnicalArea {
    pub fn from_label(label: &str) -> Self {
        match label.trim().to_lowercase().as_str() {
            "api" => TechnicalArea::Api,
            "database" => TechnicalArea::Database,
            "frontend/ui" => TechnicalArea::FrontendUi,
            "backend/service" => TechnicalArea::BackendService,
            "network" => TechnicalArea::Network,
            _ => TechnicalArea::Other(label.trim().to_string()),
        }
    }
}

impl std::fmt::Display for TechnicalArea {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TechnicalArea::Api => write!(f, "API"),
            TechnicalArea::Database => write!(f, "Database"),
            TechnicalArea::FrontendUi => write!(f, "Frontend/UI"),
            TechnicalArea::BackendService => write!(f, "Backend/Service"),
            TechnicalArea::Network => write!(f, "Network"),
            TechnicalArea::Other(area) => write!(f, "{}", area),
        }
    }
}

/// Ticket category.
///
/// Categories travel as plain labels (`"Technical - API"`, `"General Inquiry"`)
/// but are matched by kind, so routing precedence never depends on substrings.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Category {
    Technical(TechnicalArea),
    GeneralTechnical,
    UrgentCustomer,
    Billing,
    AccountManagement,
    GeneralInquiry,
    Error,
    /// Label outside the known set
    Custom(String),
}

impl Category {
    pub fn from_label(label: &str) -> Self {
        let label = label.trim();
        if let Some(area) = label.strip_prefix(TECHNICAL_PREFIX) {
            return Category::Technical(TechnicalArea::from_label(area));
        }
        match label {
            "General Technical" => Category::GeneralTechnical,
            "Urgent Customer Issue" => Category::UrgentCustomer,
            "Billing Inquiry" => Category::Billing,
            "Account Management" => Category::AccountManagement,
            "General Inquiry" => Category::GeneralInquiry,
            "Error" => Category::Error,
            other => Category::Custom(other.to_string()),
        }
    }

    /// A specific technical area was identified
    pub fn is_technical(&self) -> bool {
        matches!(self, Category::Technical(_))
    }

    /// Specific technical area or the generic technical bucket
    pub fn is_technical_family(&self) -> bool {
        matches!(self, Category::Technical(_) | Category::GeneralTechnical)
    }

    pub fn is_urgent_customer(&self) -> bool {
        matches!(self, Category::UrgentCustomer)
    }

    pub fn is_general_inquiry(&self) -> bool {
        matches!(self, Category::GeneralInquiry)
    }

    /// Blank labels only arise from a misbehaving analyzer
    pub fn is_blank(&self) -> bool {
        match self {
            Category::Custom(label) => label.trim().is_empty(),
            _ => false,
        }
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Category::Technical(area) => write!(f, "{}{}", TECHNICAL_PREFIX, area),
            Category::GeneralTechnical => write!(f, "General Technical"),
            Category::UrgentCustomer => write!(f, "Urgent Customer Issue"),
            Category::Billing => write!(f, "Billing Inquiry"),
            Category::AccountManagement => write!(f, "Account Management"),
            Category::GeneralInquiry => write!(f, "General Inquiry"),
            Category::Error => write!(f, "Error"),
            Category::Custom(label) => write!(f, "{}", label),
        }
    }
}

impl From<String> for Category {
    fn from(label: String) -> Self {
        Category::from_label(&label)
    }
}

impl From<&str> for Category {
    fn from(label: &str) -> Self {
        Category::from_label(label)
    }
}

impl From<Category> for String {
    fn from(category: Category) -> Self {
        category.to_string()
    }
}

// ============================================================================
// Agent output
// ============================================================================

/// A routing opinion or final decision
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AgentOutput {
    pub category: Category,
    pub priority: Priority,
    pub recommended_team: String,
    /// Human-readable explanation
    pub reasoning: String,
}

impl AgentOutput {
    pub fn new(
        category: Category,
        priority: Priority,
        recommended_team: impl Into<String>,
        reasoning: impl Into<String>,
    ) -> Self {
        Self {
            category,
            priority,
            recommended_team: recommended_team.into(),
            reasoning: reasoning.into(),
        }
    }

    pub fn with_reasoning(mut self, reasoning: impl Into<String>) -> Self {
        self.reasoning = reasoning.into();
        self
    }

    /// Terminal output for a ticket that failed validation.
    ///
    /// Malformed input is escalated to Critical for a human to look at rather
    /// than being dropped or routed with a guessed low priority.
    pub fn validation_failure(err: &ValidationError) -> Self {
        Self::new(
            Category::Error,
            Priority::Critical,
            TEAM_SYSTEM_ADMIN,
            format!("Failed to parse ticket input: {}", err),
        )
    }

    /// All four fields carry a non-blank value
    pub fn is_complete(&self) -> bool {
        !self.category.is_blank()
            && !self.recommended_team.trim().is_empty()
            && !self.reasoning.trim().is_empty()
    }
}
