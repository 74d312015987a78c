//! Analyzer port trait
//!
//! Every analyzer turns a validated ticket into one routing opinion.

use std::sync::Arc;

use crate::domain::entities::{AgentOutput, Opinion, SourceId, Ticket};

/// A ticket analyzer.
///
/// Implementations must be pure and deterministic: the same ticket always
/// yields the same output, no I/O happens, and every field of the output is
/// populated. `analyze` never fails for a validated ticket.
pub trait Analyzer: Send + Sync {
    /// Name under which this analyzer's opinion is reported
    fn source(&self) -> SourceId;

    fn analyze(&self, ticket: &Ticket) -> AgentOutput;

    /// Analyze and tag the output with this analyzer's source
    fn opinion(&self, ticket: &Ticket) -> Opinion {
        Opinion::new(self.source(), self.analyze(ticket))
    }
}

impl<A: Analyzer + ?Sized> Analyzer for Arc<A> {
    fn source(&self) -> SourceId {
        (**self).source()
    }

    fn analyze(&self, ticket: &Ticket) -> AgentOutput {
        (**self).analyze(ticket)
    }
}
