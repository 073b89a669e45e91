//! MCP server handler
//!
//! Thin wrapper over `tools`: locks the shared panel, runs the tool, renders
//! the reply. Failures are returned as structured error JSON.

use rmcp::{
    handler::server::{router::tool::ToolRouter, wrapper::Parameters},
    model::{ServerCapabilities, ServerInfo},
    tool, tool_handler, tool_router, ServerHandler,
};
use tracing::warn;

use crate::config::ServerConfig;
use crate::error::PanelError;
use crate::format;
use crate::session::{PanelSession, SharedPanelState};
use crate::tools::{
    self, AnalysisRequest, DebateTurnRequest, InjectConstraintRequest, SetPerspectivesRequest,
    StartDebateRequest,
};

const INSTRUCTIONS: &str = "MCP server for multi-perspective analysis and structured debate.

## Perspective Analysis
1. `set_perspectives` → Define the roles that will analyze the topic (resets everything)
2. `perspective` → Record analysis for the current role; set nextPerspectiveNeeded=true to move on
3. Repeat step 2 until all perspectives are completed

## Debate
1. `start_debate` → Pick 2-4 of the defined roles and a topic (resets any previous debate)
2. `debate_turn` → Submit the current speaker's statement; set nextTurnNeeded=true to rotate
3. Three rounds: initial positions, responses to conflicting viewpoints, synthesis
4. `inject_constraint` → Add a consideration at any point while the debate is running
5. `debate_summary` → Key points grouped by participant

### Read-only
- `perspective_status`, `debate_status`: safe to call anytime

### Errors
All errors are JSON with `code` and `recovery_action` naming the tool to call next.";

/// The MCP server handler
#[derive(Clone)]
pub struct PerspectiveServer {
    state: SharedPanelState,
    config: ServerConfig,
    tool_router: ToolRouter<Self>,
}

impl PerspectiveServer {
    /// Run `f` against the locked panel, mapping failures to structured JSON.
    fn with_panel<T>(
        &self,
        tool: &str,
        f: impl FnOnce(&mut PanelSession) -> Result<T, PanelError>,
    ) -> Result<T, String> {
        let mut panel = self
            .state
            .lock()
            .map_err(|e| format!("Lock error: {}", e))?;
        f(&mut panel).map_err(|e| {
            warn!(tool, code = e.code(), error = %e, "Tool call rejected");
            serde_json::to_string_pretty(&e.to_structured().with_tool(tool))
                .unwrap_or_else(|_| e.to_structured_json())
        })
    }
}

#[tool_router]
impl PerspectiveServer {
    pub fn new(state: SharedPanelState, config: ServerConfig) -> Self {
        Self {
            state,
            config,
            tool_router: Self::tool_router(),
        }
    }

    #[tool(
        description = "Define the list of professional roles/personas that will analyze the topic. Replaces any previous perspectives, analyses and debate."
    )]
    pub async fn set_perspectives(
        &self,
        Parameters(req): Parameters<SetPerspectivesRequest>,
    ) -> Result<String, String> {
        let resp = self.with_panel("set_perspectives", |panel| {
            tools::set_perspectives(panel, req)
        })?;
        Ok(format::set_perspectives(&resp))
    }

    #[tool(
        description = "Perform analysis from the current perspective, building on previous insights"
    )]
    pub async fn perspective(
        &self,
        Parameters(req): Parameters<AnalysisRequest>,
    ) -> Result<String, String> {
        let resp = self.with_panel("perspective", |panel| tools::perspective(panel, req))?;
        Ok(format::analysis(&resp))
    }

    #[tool(description = "Start a debate between selected personas on a specific topic")]
    pub async fn start_debate(
        &self,
        Parameters(req): Parameters<StartDebateRequest>,
    ) -> Result<String, String> {
        let resp = self.with_panel("start_debate", |panel| tools::start_debate(panel, req))?;
        Ok(format::start_debate(&resp))
    }

    #[tool(description = "Submit a statement in the ongoing debate")]
    pub async fn debate_turn(
        &self,
        Parameters(req): Parameters<DebateTurnRequest>,
    ) -> Result<String, String> {
        let resp = self.with_panel("debate_turn", |panel| tools::debate_turn(panel, req))?;
        Ok(format::debate_turn(&resp))
    }

    #[tool(description = "Add a new constraint or consideration to the ongoing debate")]
    pub async fn inject_constraint(
        &self,
        Parameters(req): Parameters<InjectConstraintRequest>,
    ) -> Result<String, String> {
        let resp = self.with_panel("inject_constraint", |panel| {
            tools::inject_constraint(panel, req)
        })?;
        Ok(format::constraint(&resp))
    }

    #[tool(
        description = "Generate a summary of the debate including key points from each participant",
        annotations(read_only_hint = true)
    )]
    pub async fn debate_summary(&self) -> Result<String, String> {
        let summary = self.with_panel("debate_summary", |panel| tools::debate_summary(panel))?;
        Ok(format::summary(&summary, self.config.excerpt_chars))
    }

    #[tool(
        description = "Get perspective progress: current perspective, recorded analyses and remaining count.",
        annotations(read_only_hint = true)
    )]
    pub async fn perspective_status(&self) -> Result<String, String> {
        let snapshot = self.with_panel("perspective_status", |panel| {
            Ok(tools::perspective_status(panel))
        })?;
        serde_json::to_string_pretty(&snapshot).map_err(|e| e.to_string())
    }

    #[tool(
        description = "Get debate state: topic, round, current speaker, history, constraints and the previous round's statements.",
        annotations(read_only_hint = true)
    )]
    pub async fn debate_status(&self) -> Result<String, String> {
        let snapshot = self.with_panel("debate_status", |panel| Ok(tools::debate_status(panel)))?;
        serde_json::to_string_pretty(&snapshot).map_err(|e| e.to_string())
    }
}

#[tool_handler]
impl ServerHandler for PerspectiveServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            instructions: Some(INSTRUCTIONS.to_string()),
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            ..Default::default()
        }
    }
}
