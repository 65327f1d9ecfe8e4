//! Side-effect-free processing trace
//!
//! The pipeline is a pure computation, so it never writes to a global logger;
//! instead each invocation can collect a [`ProcessingTrace`] describing what
//! the stages did. The trace is a plain value: callers that want an audit
//! trail use [`crate::processor::process_instruction_traced`], everyone else
//! pays nothing.

use serde::{Deserialize, Serialize};

use crate::error::ErrorCode;

/// One recorded pipeline event, in occurrence order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum TraceEvent {
    /// The grammar walk finished (normally or by a fatal violation).
    ParseFinished {
        /// Number of syntax violations recorded by the state machine.
        syntax_violations: usize,
    },
    /// All business rules ran.
    RulesEvaluated {
        /// Combined syntax plus business-rule violation count.
        total_violations: usize,
    },
    /// A primary violation was selected and the instruction failed.
    PrimarySelected { code: ErrorCode },
    /// The instruction settled immediately.
    SettlementApplied { amount: i64 },
    /// The instruction was accepted for a future execution date.
    SettlementDeferred { execute_by: String },
    /// An internal failure was degraded to the malformed outcome.
    FailedClosed,
}

/// Ordered collection of [`TraceEvent`]s for one invocation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProcessingTrace {
    events: Vec<TraceEvent>,
}

impl ProcessingTrace {
    /// Create an empty trace.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an event.
    pub fn record(&mut self, event: TraceEvent) {
        self.events.push(event);
    }

    /// All recorded events, in order.
    pub fn events(&self) -> &[TraceEvent] {
        &self.events
    }

    /// Number of recorded events.
    pub fn len(&self) -> usize {
        self.events.len()
    }

    /// Whether nothing was recorded.
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}
