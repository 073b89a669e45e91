//! Perspective MCP Library
//!
//! This library provides:
//! - A perspective tracker that walks a caller-defined list of roles,
//!   recording one analysis per role
//! - A debate orchestrator running a three-round, round-robin debate between
//!   2-4 of those roles, with response attribution and constraint injection
//! - MCP tools exposing both over stdio
//!
//! # Tools
//!
//! ## Perspective Analysis
//! - `set_perspectives`: Define the roles (resets all state)
//! - `perspective`: Record analysis for the current role, optionally advancing
//! - `perspective_status`: Read-only tracker snapshot
//!
//! ## Debate
//! - `start_debate`: Start a debate between 2-4 defined roles
//! - `debate_turn`: Record the current speaker's statement
//! - `inject_constraint`: Add a constraint to the running debate
//! - `debate_summary`: Key points grouped by participant
//! - `debate_status`: Read-only debate snapshot
//!
//! # Usage
//!
//! ```bash
//! # Standard MCP mode
//! perspective-mcp
//!
//! # Preload perspectives from a TOML preset
//! perspective-mcp --preset ./panel.toml
//! ```

#![allow(clippy::uninlined_format_args)]

pub mod config;
pub mod debate;
pub mod error;
pub mod format;
pub mod perspective;
pub mod server;
pub mod session;
pub mod tools;

pub use config::{PerspectivePreset, ServerConfig};
pub use debate::{
    DebateOrchestrator, DebatePhase, DebateSession, DebateSnapshot, DebateSummary, DebateTurn,
    TurnOutcome,
};
pub use error::{PanelError, PanelResult, StructuredError};
pub use perspective::{AnalysisEntry, AnalysisOutcome, Perspective, PerspectiveTracker, TrackerSnapshot};
pub use server::PerspectiveServer;
pub use session::{create_shared_state, PanelSession, SharedPanelState};
