//! Domain entities
//!
//! Immutable value types shared by analyzers, the orchestrator and the
//! evaluation layer.

pub mod agent_output;
pub mod opinion;
pub mod ticket;

pub use agent_output::{
    AgentOutput, Category, Priority, TechnicalArea, TEAM_ACCOUNT_MANAGER, TEAM_BILLING_SUPPORT,
    TEAM_CUSTOMER_SUCCESS, TEAM_DEVOPS, TEAM_ENGINEERING, TEAM_SUPPORT_TIER_1,
    TEAM_SUPPORT_TIER_2, TEAM_SYSTEM_ADMIN,
};
pub use opinion::{Opinion, SourceId};
pub use ticket::{CustomerTier, Ticket};
