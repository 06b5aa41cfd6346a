//! # Flow States and Events
//!
//! The deterministic transition table of the verification flow.
//! Transitions are strictly one-directional — `Checking` can never go
//! back to `Idle` on its own, `NotFound`/`Rendered`/`Error` are terminal
//! — with two exceptions: `Reset` returns to `Idle` from every state,
//! and a new non-empty `Submit` supersedes whatever was in flight.

use serde::{Deserialize, Serialize};

/// Where a verification flow currently stands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FlowState {
    /// Waiting for a submission.
    #[default]
    Idle,
    /// Digest computed, registry lookup in flight.
    Checking,
    /// Registry resolved a non-sentinel identifier; fetch + stamp runs
    /// immediately.
    Found,
    /// Registry resolved the sentinel: no certificate issued. Terminal
    /// until reset.
    NotFound,
    /// Fetch and stamp both succeeded; watermarked bytes are available.
    /// Terminal until reset.
    Rendered,
    /// A lookup, fetch, or stamp failure. Terminal until reset.
    Error,
}

/// Discrete events the flow controller feeds into the table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlowEvent {
    /// The user submitted an identity. `empty` submissions are no-ops.
    Submit {
        /// True when the submitted identity was the empty string.
        empty: bool,
    },
    /// The registry lookup completed successfully.
    LookupResolved {
        /// True when the registry returned the sentinel identifier.
        sentinel: bool,
    },
    /// Fetch and stamp completed; rendered bytes exist.
    FetchCompleted,
    /// Lookup, fetch, or stamp failed.
    OperationFailed,
    /// Explicit reset back to `Idle`.
    Reset,
}

impl FlowState {
    /// The next state after `event`. Pure and total: events that make no
    /// sense in the current state leave it unchanged.
    pub fn apply(self, event: FlowEvent) -> FlowState {
        use FlowEvent::*;
        use FlowState::*;
        match (self, event) {
            (_, Reset) => Idle,
            (_, Submit { empty: true }) => self,
            // A fresh submission supersedes anything, including an
            // in-flight check; stale completions are filtered by the
            // controller's generation guard, not by the table.
            (_, Submit { empty: false }) => Checking,
            (Checking, LookupResolved { sentinel: true }) => NotFound,
            (Checking, LookupResolved { sentinel: false }) => Found,
            (Checking, OperationFailed) => Error,
            (Found, FetchCompleted) => Rendered,
            (Found, OperationFailed) => Error,
            // Terminal states and out-of-order completions.
            (state, _) => state,
        }
    }

    /// True for states that only a reset or a new submission can leave.
    pub fn is_terminal(&self) -> bool {
        matches!(self, FlowState::NotFound | FlowState::Rendered | FlowState::Error)
    }
}

impl std::fmt::Display for FlowState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            FlowState::Idle => "idle",
            FlowState::Checking => "checking",
            FlowState::Found => "found",
            FlowState::NotFound => "not_found",
            FlowState::Rendered => "rendered",
            FlowState::Error => "error",
        };
        write!(f, "{name}")
    }
}
