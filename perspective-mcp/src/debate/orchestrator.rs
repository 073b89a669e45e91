//! Debate orchestrator: drives the round-robin turn protocol.
//!
//! Speakers rotate in the order they were supplied at start. A round is
//! complete when every participant has taken an advancing turn; after the
//! third round the orchestrator stops asking for more turns but keeps the
//! session open.

use chrono::Utc;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};
use uuid::Uuid;

use super::state::{
    DebateSession, DebateTurn, MAX_PARTICIPANTS, MAX_ROUNDS, MIN_PARTICIPANTS,
};
use crate::error::{PanelError, PanelResult};
use crate::perspective::Perspective;

/// Result of a single recorded turn.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TurnOutcome {
    /// Round after this call.
    pub round: u32,
    /// Role that just spoke.
    pub participant: String,
    /// False only once round 3 has completed.
    pub next_participant_needed: bool,
    /// Whether this turn closed a round.
    pub is_round_complete: bool,
    /// Attribution of the recorded turn, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub responding_to: Option<String>,
}

/// Read-only view of the debate.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DebateSnapshot {
    pub id: String,
    pub active: bool,
    pub topic: String,
    pub current_round: u32,
    pub current_participant: Option<Perspective>,
    pub participants: Vec<Perspective>,
    pub history: Vec<DebateTurn>,
    pub constraints: Vec<String>,
    /// Turns from the previous round; empty in round 1.
    pub previous_round_statements: Vec<DebateTurn>,
}

impl DebateSnapshot {
    /// First statement of the previous round not made by the current speaker.
    pub fn suggested_response_target(&self) -> Option<&DebateTurn> {
        let current = self.current_participant.as_ref()?;
        self.previous_round_statements
            .iter()
            .find(|t| t.persona != current.role)
    }
}

/// Statements grouped by participant.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DebateSummary {
    pub topic: String,
    pub participants: Vec<String>,
    pub rounds: u32,
    /// Participant role → statements in recorded order, in participant order.
    pub key_points: IndexMap<String, Vec<String>>,
    pub constraints: Vec<String>,
    pub total_turns: usize,
}

/// The debate orchestrator.
///
/// Usage:
/// 1. `start()` with a topic, participant roles and the current perspectives
/// 2. `record_turn()` once per statement, in speaker order
/// 3. `add_constraint()` at any point while active
/// 4. `summarize()` for the grouped transcript
#[derive(Debug, Default)]
pub struct DebateOrchestrator {
    session: DebateSession,
}

impl DebateOrchestrator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Drop any session and return to `Inactive`.
    pub fn reset(&mut self) {
        self.session = DebateSession::inactive();
    }

    /// Start a new debate, replacing any previous one.
    ///
    /// Participants keep the order of `roles`, not the order of
    /// `perspectives`.
    pub fn start(
        &mut self,
        topic: &str,
        roles: &[String],
        perspectives: &[Perspective],
    ) -> PanelResult<&Perspective> {
        if roles.len() < MIN_PARTICIPANTS || roles.len() > MAX_PARTICIPANTS {
            return Err(PanelError::invalid_input(format!(
                "Debate requires {}-{} participants, got {}",
                MIN_PARTICIPANTS,
                MAX_PARTICIPANTS,
                roles.len()
            )));
        }

        let mut participants = Vec::with_capacity(roles.len());
        let mut missing = Vec::new();
        for role in roles {
            match perspectives.iter().find(|p| &p.role == role) {
                Some(p) => participants.push(p.clone()),
                None => missing.push(role.as_str()),
            }
        }
        if !missing.is_empty() {
            return Err(PanelError::invalid_input(format!(
                "One or more specified personas not found in perspectives: {}",
                missing.join(", ")
            )));
        }

        self.reset();
        self.session =
            DebateSession::started(&Uuid::new_v4().to_string(), topic, participants);
        info!(
            debate_id = %self.session.id,
            topic,
            participants = ?self.session.participant_roles(),
            "Debate started"
        );

        self.session
            .current_speaker()
            .ok_or_else(|| PanelError::internal("Debate started without a speaker"))
    }

    pub fn session(&self) -> &DebateSession {
        &self.session
    }

    pub fn is_active(&self) -> bool {
        self.session.active
    }

    pub fn current_round(&self) -> u32 {
        self.session.current_round
    }

    pub fn current_speaker(&self) -> Option<&Perspective> {
        self.session.current_speaker()
    }

    /// Record a statement from the current speaker.
    ///
    /// The turn is appended whether or not `advance` is set. Recording after
    /// round 3 has completed is accepted; the outcome keeps reporting that no
    /// further participant is needed.
    pub fn record_turn(&mut self, statement: &str, advance: bool) -> PanelResult<TurnOutcome> {
        if !self.session.active {
            return Err(PanelError::precondition(
                "No active debate. Use start_debate first.",
            ));
        }
        if statement.trim().is_empty() {
            return Err(PanelError::invalid_input(
                "Statement must be a non-empty string",
            ));
        }

        let speaker = self
            .session
            .current_speaker()
            .map(|p| p.role.clone())
            .ok_or_else(|| PanelError::internal("No current participant found"))?;

        let round = self.session.current_round;
        let responding_to = if round > 1 {
            self.session.response_target(&speaker)
        } else {
            None
        };

        self.session.history.push(DebateTurn {
            round,
            persona: speaker.clone(),
            statement: statement.to_string(),
            responding_to: responding_to.clone(),
            timestamp: Utc::now(),
        });

        let mut is_round_complete = false;
        let mut next_participant_needed = true;

        if advance {
            self.session.current_turn_index += 1;

            if self.session.current_turn_index % self.session.participants.len() == 0 {
                is_round_complete = true;
                if self.session.current_round < MAX_ROUNDS {
                    self.session.current_round += 1;
                } else {
                    next_participant_needed = false;
                }
            }
        }

        debug!(
            debate_id = %self.session.id,
            round,
            persona = %speaker,
            responding_to = ?responding_to,
            advance,
            is_round_complete,
            "Debate turn recorded"
        );
        if is_round_complete {
            info!(
                debate_id = %self.session.id,
                completed_round = round,
                finished = !next_participant_needed,
                "Debate round complete"
            );
        }

        Ok(TurnOutcome {
            round: self.session.current_round,
            participant: speaker,
            next_participant_needed,
            is_round_complete,
            responding_to,
        })
    }

    /// Append a constraint to the active debate. Returns the new total.
    pub fn add_constraint(&mut self, constraint: &str) -> PanelResult<usize> {
        if !self.session.active {
            return Err(PanelError::precondition(
                "No active debate to add constraints to",
            ));
        }
        self.session.constraints.push(constraint.to_string());
        info!(
            debate_id = %self.session.id,
            total = self.session.constraints.len(),
            "Constraint injected"
        );
        Ok(self.session.constraints.len())
    }

    pub fn snapshot(&self) -> DebateSnapshot {
        let session = &self.session;
        DebateSnapshot {
            id: session.id.clone(),
            active: session.active,
            topic: session.topic.clone(),
            current_round: session.current_round,
            current_participant: session.current_speaker().cloned(),
            participants: session.participants.clone(),
            history: session.history.clone(),
            constraints: session.constraints.clone(),
            previous_round_statements: session
                .previous_round_turns()
                .into_iter()
                .cloned()
                .collect(),
        }
    }

    /// Group the transcript by participant.
    pub fn summarize(&self) -> PanelResult<DebateSummary> {
        let session = &self.session;
        if !session.active && session.history.is_empty() {
            return Err(PanelError::precondition("No debate to summarize"));
        }

        let mut key_points = IndexMap::new();
        for p in &session.participants {
            let statements: Vec<String> = session
                .history
                .iter()
                .filter(|t| t.persona == p.role)
                .map(|t| t.statement.clone())
                .collect();
            key_points.insert(p.role.clone(), statements);
        }

        debug!(
            debate_id = %session.id,
            total_turns = session.history.len(),
            "Debate summary produced"
        );

        Ok(DebateSummary {
            topic: session.topic.clone(),
            participants: session.participant_roles(),
            rounds: session.current_round,
            key_points,
            constraints: session.constraints.clone(),
            total_turns: session.history.len(),
        })
    }
}
