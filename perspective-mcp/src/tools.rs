//! MCP tool operations
//!
//! Request/response types and the tool entry points:
//! - set_perspectives: Define the perspective sequence
//! - perspective: Record analysis for the current perspective
//! - start_debate: Start a debate between 2-4 perspectives
//! - debate_turn: Record the current speaker's statement
//! - inject_constraint: Add a constraint to the running debate
//! - debate_summary: Group the transcript by participant
//! - perspective_status / debate_status: Read-only snapshots
//!
//! Each entry point takes the panel session, calls into the core and returns
//! a serializable response. Rendering to text lives in `format`.

use rmcp::schemars;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::debate::{DebateSnapshot, DebateSummary, TurnOutcome};
use crate::error::{PanelError, PanelResult};
use crate::perspective::{Perspective, TrackerSnapshot};
use crate::session::PanelSession;

// ============================================================================
// Request Types
// ============================================================================

/// A flag that older clients send as a string.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, schemars::JsonSchema)]
#[serde(untagged)]
pub enum FlexibleBool {
    Flag(bool),
    Text(String),
}

impl FlexibleBool {
    pub fn as_bool(&self) -> bool {
        match self {
            Self::Flag(b) => *b,
            Self::Text(s) => s.trim().eq_ignore_ascii_case("true"),
        }
    }
}

impl From<bool> for FlexibleBool {
    fn from(b: bool) -> Self {
        Self::Flag(b)
    }
}

/// Perspective as sent by the client
#[derive(Debug, Clone, Deserialize, schemars::JsonSchema)]
pub struct PerspectiveInput {
    #[schemars(description = "The professional role or persona name")]
    pub role: String,
    #[serde(rename = "focusAreas")]
    #[schemars(description = "Primary focus areas for this perspective")]
    pub focus_areas: Vec<String>,
    #[schemars(description = "Personality traits and approach style")]
    pub personality: String,
}

impl From<PerspectiveInput> for Perspective {
    fn from(p: PerspectiveInput) -> Self {
        Perspective {
            role: p.role,
            focus_areas: p.focus_areas,
            personality: p.personality,
        }
    }
}

/// Request for set_perspectives tool
#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct SetPerspectivesRequest {
    #[schemars(description = "Array of perspective objects")]
    pub perspectives: Vec<PerspectiveInput>,
}

/// Request for perspective tool
#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct AnalysisRequest {
    #[schemars(description = "The analysis from the current perspective")]
    pub analysis: String,
    #[serde(rename = "nextPerspectiveNeeded", default)]
    #[schemars(description = "Whether to move to the next perspective after this analysis")]
    pub next_perspective_needed: Option<FlexibleBool>,
    #[serde(rename = "nextThoughtNeeded", default)]
    #[schemars(description = "Alias for nextPerspectiveNeeded for compatibility")]
    pub next_thought_needed: Option<FlexibleBool>,
}

impl AnalysisRequest {
    /// `nextPerspectiveNeeded`, else `nextThoughtNeeded`, else false.
    pub fn advance(&self) -> bool {
        self.next_perspective_needed
            .as_ref()
            .or(self.next_thought_needed.as_ref())
            .map(FlexibleBool::as_bool)
            .unwrap_or(false)
    }
}

/// Request for start_debate tool
#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct StartDebateRequest {
    #[schemars(description = "The specific question or constraint to debate")]
    pub topic: String,
    #[schemars(description = "Array of 2-4 persona roles to participate in the debate")]
    pub participants: Vec<String>,
}

/// Request for debate_turn tool
#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct DebateTurnRequest {
    #[schemars(description = "The participant's statement or response")]
    pub statement: String,
    #[serde(rename = "nextTurnNeeded")]
    #[schemars(description = "Whether to proceed to the next turn")]
    pub next_turn_needed: FlexibleBool,
}

/// Request for inject_constraint tool
#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct InjectConstraintRequest {
    #[schemars(description = "The new constraint or consideration to add")]
    pub constraint: String,
}

// ============================================================================
// Response Types
// ============================================================================

/// Response for set_perspectives tool
#[derive(Debug, Clone, Serialize)]
pub struct SetPerspectivesResponse {
    pub count: usize,
    pub first_role: String,
}

/// Response for perspective tool
#[derive(Debug, Clone, Serialize)]
pub struct AnalysisResponse {
    pub recorded_role: String,
    pub completed: usize,
    pub total: usize,
    pub next_perspective_needed: bool,
    /// Perspective now at the cursor, if any
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next_perspective: Option<Perspective>,
}

/// Response for start_debate tool
#[derive(Debug, Clone, Serialize)]
pub struct StartDebateResponse {
    pub debate_id: String,
    pub topic: String,
    pub participants: Vec<String>,
    pub current_speaker: String,
}

/// Response for debate_turn tool
#[derive(Debug, Clone, Serialize)]
pub struct DebateTurnResponse {
    pub outcome: TurnOutcome,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next_speaker: Option<String>,
    /// Previous-round persona the next speaker should answer
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next_responds_to: Option<String>,
    pub total_turns: usize,
}

/// Response for inject_constraint tool
#[derive(Debug, Clone, Serialize)]
pub struct InjectConstraintResponse {
    pub constraint: String,
    pub total_constraints: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub current_speaker: Option<String>,
}

// ============================================================================
// Tool Entry Points
// ============================================================================

pub fn set_perspectives(
    session: &mut PanelSession,
    req: SetPerspectivesRequest,
) -> PanelResult<SetPerspectivesResponse> {
    let perspectives: Vec<Perspective> =
        req.perspectives.into_iter().map(Perspective::from).collect();
    let count = perspectives.len();
    let first_role = perspectives
        .first()
        .map(|p| p.role.clone())
        .ok_or_else(|| PanelError::invalid_input("Perspectives must be a non-empty array"))?;

    session.define_perspectives(perspectives)?;

    Ok(SetPerspectivesResponse { count, first_role })
}

pub fn perspective(
    session: &mut PanelSession,
    req: AnalysisRequest,
) -> PanelResult<AnalysisResponse> {
    let advance = req.advance();
    debug!(advance, "perspective tool called");

    let outcome = session.record_analysis(&req.analysis, advance)?;
    let snapshot = session.tracker_snapshot();

    Ok(AnalysisResponse {
        recorded_role: outcome.role,
        completed: snapshot.completed(),
        total: snapshot.total_perspectives,
        next_perspective_needed: outcome.next_perspective_needed,
        next_perspective: snapshot.current_perspective,
    })
}

pub fn start_debate(
    session: &mut PanelSession,
    req: StartDebateRequest,
) -> PanelResult<StartDebateResponse> {
    let current_speaker = session.start_debate(&req.topic, &req.participants)?;
    let debate = session.debate().session();

    Ok(StartDebateResponse {
        debate_id: debate.id.clone(),
        topic: debate.topic.clone(),
        participants: debate.participant_roles(),
        current_speaker,
    })
}

pub fn debate_turn(
    session: &mut PanelSession,
    req: DebateTurnRequest,
) -> PanelResult<DebateTurnResponse> {
    let outcome = session.record_turn(&req.statement, req.next_turn_needed.as_bool())?;
    let snapshot = session.debate_snapshot();

    let next_speaker = if outcome.next_participant_needed {
        snapshot.current_participant.as_ref().map(|p| p.role.clone())
    } else {
        None
    };
    let next_responds_to = next_speaker
        .as_ref()
        .and(snapshot.suggested_response_target())
        .map(|t| t.persona.clone());

    Ok(DebateTurnResponse {
        outcome,
        next_speaker,
        next_responds_to,
        total_turns: snapshot.history.len(),
    })
}

pub fn inject_constraint(
    session: &mut PanelSession,
    req: InjectConstraintRequest,
) -> PanelResult<InjectConstraintResponse> {
    let total_constraints = session.add_constraint(&req.constraint)?;
    let current_speaker = session
        .debate()
        .current_speaker()
        .map(|p| p.role.clone());

    Ok(InjectConstraintResponse {
        constraint: req.constraint,
        total_constraints,
        current_speaker,
    })
}

pub fn debate_summary(session: &PanelSession) -> PanelResult<DebateSummary> {
    session.summarize_debate()
}

pub fn perspective_status(session: &PanelSession) -> TrackerSnapshot {
    session.tracker_snapshot()
}

pub fn debate_status(session: &PanelSession) -> DebateSnapshot {
    session.debate_snapshot()
}
