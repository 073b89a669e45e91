//! Debate state: phases, turn records, and the session record.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::perspective::Perspective;

/// Rounds in a debate: initial positions, rebuttals, synthesis.
pub const MAX_ROUNDS: u32 = 3;
/// Fewest participants a debate accepts.
pub const MIN_PARTICIPANTS: usize = 2;
/// Most participants a debate accepts.
pub const MAX_PARTICIPANTS: usize = 4;

/// Phase of the debate subsystem.
///
/// Reaching the end of round 3 is not a phase of its own; the session stays
/// `Active` and only the turn outcome reports that no more turns are needed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "phase", rename_all = "snake_case")]
pub enum DebatePhase {
    /// No debate started since the last reset.
    Inactive,
    /// Debate running in the given round.
    Active { round: u32 },
}

impl DebatePhase {
    pub fn is_active(self) -> bool {
        matches!(self, Self::Active { .. })
    }
}

impl std::fmt::Display for DebatePhase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Inactive => write!(f, "inactive"),
            Self::Active { round } => write!(f, "active(round {})", round),
        }
    }
}

/// What each round asks of the speakers.
pub fn round_label(round: u32) -> &'static str {
    match round {
        1 => "Initial positions",
        2 => "Responses to conflicting viewpoints",
        _ => "Synthesis and compromise proposals",
    }
}

/// One recorded statement. Never mutated after it is appended.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DebateTurn {
    /// Round the statement was made in (1-indexed).
    pub round: u32,
    /// Role of the speaker.
    pub persona: String,
    pub statement: String,
    /// Persona from the previous round this turn is attributed to.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub responding_to: Option<String>,
    pub timestamp: DateTime<Utc>,
}

/// A debate session and its append-only logs.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DebateSession {
    /// Session identifier, regenerated on every start.
    pub id: String,
    pub active: bool,
    pub topic: String,
    /// Speaking order, fixed at start.
    pub participants: Vec<Perspective>,
    /// 0 while inactive, then bounded to 1..=3.
    pub current_round: u32,
    /// Advancing turns taken so far. Never reset within a session.
    pub current_turn_index: usize,
    pub history: Vec<DebateTurn>,
    pub constraints: Vec<String>,
    pub started_at: Option<DateTime<Utc>>,
}

impl Default for DebateSession {
    fn default() -> Self {
        Self::inactive()
    }
}

impl DebateSession {
    /// A session that has not been started.
    pub fn inactive() -> Self {
        Self {
            id: String::new(),
            active: false,
            topic: String::new(),
            participants: Vec::new(),
            current_round: 0,
            current_turn_index: 0,
            history: Vec::new(),
            constraints: Vec::new(),
            started_at: None,
        }
    }

    /// A freshly started session in round 1.
    pub fn started(id: &str, topic: &str, participants: Vec<Perspective>) -> Self {
        Self {
            id: id.to_string(),
            active: true,
            topic: topic.to_string(),
            participants,
            current_round: 1,
            current_turn_index: 0,
            history: Vec::new(),
            constraints: Vec::new(),
            started_at: Some(Utc::now()),
        }
    }

    pub fn phase(&self) -> DebatePhase {
        if self.active {
            DebatePhase::Active {
                round: self.current_round,
            }
        } else {
            DebatePhase::Inactive
        }
    }

    /// Participant whose turn it is, or `None` while inactive.
    pub fn current_speaker(&self) -> Option<&Perspective> {
        if !self.active || self.participants.is_empty() {
            return None;
        }
        let index = self.current_turn_index % self.participants.len();
        self.participants.get(index)
    }

    /// Turns recorded during `round`, in recorded order.
    pub fn turns_in_round(&self, round: u32) -> Vec<&DebateTurn> {
        self.history.iter().filter(|t| t.round == round).collect()
    }

    /// Turns from the round before the current one; empty in round 1.
    pub fn previous_round_turns(&self) -> Vec<&DebateTurn> {
        if self.current_round > 1 {
            self.turns_in_round(self.current_round - 1)
        } else {
            Vec::new()
        }
    }

    /// First persona from the previous round other than `speaker`.
    ///
    /// Structural only: with three or more participants every speaker is
    /// pointed at the earliest other voice of the previous round.
    pub fn response_target(&self, speaker: &str) -> Option<String> {
        self.previous_round_turns()
            .into_iter()
            .find(|t| t.persona != speaker)
            .map(|t| t.persona.clone())
    }

    pub fn participant_roles(&self) -> Vec<String> {
        self.participants.iter().map(|p| p.role.clone()).collect()
    }

    /// Compact status line.
    pub fn status_line(&self) -> String {
        match self.current_speaker() {
            Some(speaker) => format!(
                "[{}] round {}/{} | {} turns | next={}",
                self.phase(),
                self.current_round,
                MAX_ROUNDS,
                self.history.len(),
                speaker.role
            ),
            None => format!("[{}]", self.phase()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pair() -> Vec<Perspective> {
        vec![
            Perspective::new("Economist", &["markets"], "Pragmatic"),
            Perspective::new("Ethicist", &["fairness"], "Principled"),
        ]
    }

    fn turn(round: u32, persona: &str) -> DebateTurn {
        DebateTurn {
            round,
            persona: persona.to_string(),
            statement: format!("{} speaks", persona),
            responding_to: None,
            timestamp: Utc::now(),
        }
    }

    #[test]
    fn test_inactive_session() {
        let session = DebateSession::inactive();
        assert_eq!(session.phase(), DebatePhase::Inactive);
        assert_eq!(session.current_round, 0);
        assert!(session.current_speaker().is_none());
        assert_eq!(session.status_line(), "[inactive]");
    }

    #[test]
    fn test_started_session() {
        let session = DebateSession::started("d-1", "Carbon tax", pair());
        assert_eq!(session.phase(), DebatePhase::Active { round: 1 });
        assert_eq!(session.current_speaker().unwrap().role, "Economist");
        assert!(session.started_at.is_some());
        assert!(session.status_line().contains("round 1/3"));
        assert!(session.status_line().contains("next=Economist"));
    }

    #[test]
    fn test_speaker_wraps() {
        let mut session = DebateSession::started("d-1", "t", pair());
        session.current_turn_index = 3;
        assert_eq!(session.current_speaker().unwrap().role, "Ethicist");
    }

    #[test]
    fn test_previous_round_turns() {
        let mut session = DebateSession::started("d-1", "t", pair());
        session.history.push(turn(1, "Economist"));
        session.history.push(turn(1, "Ethicist"));
        assert!(session.previous_round_turns().is_empty());

        session.current_round = 2;
        assert_eq!(session.previous_round_turns().len(), 2);
    }

    #[test]
    fn test_response_target_skips_self() {
        let mut session = DebateSession::started("d-1", "t", pair());
        session.history.push(turn(1, "Economist"));
        session.history.push(turn(1, "Ethicist"));
        session.current_round = 2;

        assert_eq!(
            session.response_target("Economist").as_deref(),
            Some("Ethicist")
        );
        assert_eq!(
            session.response_target("Ethicist").as_deref(),
            Some("Economist")
        );
    }

    #[test]
    fn test_response_target_none_when_only_self_spoke() {
        let mut session = DebateSession::started("d-1", "t", pair());
        session.history.push(turn(1, "Economist"));
        session.current_round = 2;
        assert!(session.response_target("Economist").is_none());
    }

    #[test]
    fn test_phase_display() {
        assert_eq!(DebatePhase::Inactive.to_string(), "inactive");
        assert_eq!(
            DebatePhase::Active { round: 2 }.to_string(),
            "active(round 2)"
        );
    }

    #[test]
    fn test_turn_wire_names() {
        let mut t = turn(2, "Ethicist");
        t.responding_to = Some("Economist".to_string());
        let value = serde_json::to_value(&t).unwrap();
        assert_eq!(value["respondingTo"], "Economist");

        let value = serde_json::to_value(turn(1, "Economist")).unwrap();
        assert!(value.get("respondingTo").is_none());
    }

    #[test]
    fn test_round_labels() {
        assert_eq!(round_label(1), "Initial positions");
        assert!(round_label(3).contains("Synthesis"));
    }
}
