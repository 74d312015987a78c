//! Mock analyzers
//!
//! In-memory implementations of the `Analyzer` port that let tests control
//! opinions and count how often they were asked.

use std::sync::atomic::{AtomicUsize, Ordering};

use crate::domain::entities::{AgentOutput, SourceId, Ticket};
use crate::domain::ports::Analyzer;

// ============================================================================
// Static Analyzer
// ============================================================================

/// Always returns the same output
pub struct StaticAnalyzer {
    source: SourceId,
    output: AgentOutput,
    calls: AtomicUsize,
}

impl StaticAnalyzer {
    pub fn new(source: impl Into<SourceId>, output: AgentOutput) -> Self {
        Self {
            source: source.into(),
            output,
            calls: AtomicUsize::new(0),
        }
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl Analyzer for StaticAnalyzer {
    fn source(&self) -> SourceId {
        self.source.clone()
    }

    fn analyze(&self, _ticket: &Ticket) -> AgentOutput {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.output.clone()
    }
}

// ============================================================================
// Panicking Analyzer
// ============================================================================

/// Panics on every ticket, for exercising worker failure paths
pub struct PanickingAnalyzer;

impl Analyzer for PanickingAnalyzer {
    fn source(&self) -> SourceId {
        SourceId::new("panicking")
    }

    fn analyze(&self, ticket: &Ticket) -> AgentOutput {
        panic!("analyzer crashed on {}", ticket.ticket_id)
    }
}
