//! Panel session: the single process-wide owner of tracker and debate state.
//!
//! Reset points are part of the contract:
//! - `define_perspectives` resets everything (perspectives, cursor,
//!   analyses, debate)
//! - `start_debate` resets only the debate

use std::sync::{Arc, Mutex};

use tracing::info;

use crate::debate::{DebateOrchestrator, DebateSnapshot, DebateSummary, TurnOutcome};
use crate::error::PanelResult;
use crate::perspective::{AnalysisOutcome, Perspective, PerspectiveTracker, TrackerSnapshot};

/// Owns both subsystems for the lifetime of the process.
#[derive(Debug, Default)]
pub struct PanelSession {
    tracker: PerspectiveTracker,
    debate: DebateOrchestrator,
}

/// Thread-safe panel wrapper used by the MCP server
pub type SharedPanelState = Arc<Mutex<PanelSession>>;

/// Create shared panel state
pub fn create_shared_state(session: PanelSession) -> SharedPanelState {
    Arc::new(Mutex::new(session))
}

impl PanelSession {
    pub fn new() -> Self {
        Self::default()
    }

    /// Discard perspectives, analyses and any debate.
    pub fn reset(&mut self) {
        self.tracker.reset();
        self.debate.reset();
    }

    /// Replace the perspective set. On success all other state is reset; on
    /// failure nothing changes.
    pub fn define_perspectives(&mut self, perspectives: Vec<Perspective>) -> PanelResult<()> {
        self.tracker.set_perspectives(perspectives)?;
        self.debate.reset();
        Ok(())
    }

    pub fn tracker(&self) -> &PerspectiveTracker {
        &self.tracker
    }

    pub fn debate(&self) -> &DebateOrchestrator {
        &self.debate
    }

    pub fn record_analysis(&mut self, text: &str, advance: bool) -> PanelResult<AnalysisOutcome> {
        let outcome = self.tracker.record_analysis(text, advance)?;
        if !outcome.next_perspective_needed {
            info!(
                analyses = self.tracker.snapshot().completed(),
                "Perspective sequence complete"
            );
        }
        Ok(outcome)
    }

    pub fn tracker_snapshot(&self) -> TrackerSnapshot {
        self.tracker.snapshot()
    }

    /// Start a debate among `roles`, resolved against the current perspectives.
    /// Returns the first speaker's role.
    pub fn start_debate(&mut self, topic: &str, roles: &[String]) -> PanelResult<String> {
        let speaker = self
            .debate
            .start(topic, roles, self.tracker.perspectives())?;
        Ok(speaker.role.clone())
    }

    pub fn record_turn(&mut self, statement: &str, advance: bool) -> PanelResult<TurnOutcome> {
        self.debate.record_turn(statement, advance)
    }

    pub fn add_constraint(&mut self, constraint: &str) -> PanelResult<usize> {
        self.debate.add_constraint(constraint)
    }

    pub fn debate_snapshot(&self) -> DebateSnapshot {
        self.debate.snapshot()
    }

    pub fn summarize_debate(&self) -> PanelResult<DebateSummary> {
        self.debate.summarize()
    }
}
