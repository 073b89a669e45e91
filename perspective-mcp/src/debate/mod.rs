//! Debate Orchestration: bounded round-robin debate between perspectives
//!
//! # Debate Flow
//!
//! ```text
//! Inactive ─start─► Active(round 1) ─P turns─► Active(round 2) ─P turns─► Active(round 3)
//!    ▲                                                                        │
//!    │                                                                 P turns: no more
//!    │                                                                 turns needed,
//!    └──────────── start / redefine perspectives ◄─────────────────── session stays open
//! ```

pub mod orchestrator;
pub mod state;

pub use orchestrator::{DebateOrchestrator, DebateSnapshot, DebateSummary, TurnOutcome};
pub use state::{
    round_label, DebatePhase, DebateSession, DebateTurn, MAX_PARTICIPANTS, MAX_ROUNDS,
    MIN_PARTICIPANTS,
};
