//! Analyzer opinions
//!
//! An `AgentOutput` tagged with the analyzer that produced it.

use serde::{Deserialize, Serialize};

use super::agent_output::AgentOutput;

/// Name of an analyzer source
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct SourceId(pub String);

impl SourceId {
    pub const TECHNICAL: &'static str = "technical";
    pub const CUSTOMER: &'static str = "customer";

    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn technical() -> Self {
        Self::new(Self::TECHNICAL)
    }

    pub fn customer() -> Self {
        Self::new(Self::CUSTOMER)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Label used in front of this source's reasoning in the final explanation
    pub fn perspective_label(&self) -> String {
        match self.0.as_str() {
            Self::TECHNICAL => "Technical".to_string(),
            Self::CUSTOMER => "Customer context".to_string(),
            other => {
                let mut chars = other.chars();
                match chars.next() {
                    Some(first) => first.to_uppercase().chain(chars).collect(),
                    None => "Unnamed".to_string(),
                }
            }
        }
    }
}

impl From<&str> for SourceId {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

impl std::fmt::Display for SourceId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// One analyzer's view of a ticket
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Opinion {
    pub source: SourceId,
    pub output: AgentOutput,
}

impl Opinion {
    pub fn new(source: impl Into<SourceId>, output: AgentOutput) -> Self {
        Self {
            source: source.into(),
            output,
        }
    }
}
