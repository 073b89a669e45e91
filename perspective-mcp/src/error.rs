//! Panel error types
//!
//! Every core operation fails synchronously with one of these variants and
//! leaves state untouched. Tool replies carry the structured form so an agent
//! can recover without parsing prose.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for panel operations
pub type PanelResult<T> = Result<T, PanelError>;

// ============================================================================
// Structured Error Response (Agent-Friendly)
// ============================================================================

/// Structured error response returned from MCP tools.
///
/// # Example Response
/// ```json
/// {
///   "code": "PRECONDITION_FAILED",
///   "message": "Precondition failed: No active debate. Use start_debate first.",
///   "recovery_action": "Call start_debate with a topic and 2-4 participant roles"
/// }
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StructuredError {
    /// Machine-readable error code (e.g., "INVALID_INPUT")
    pub code: String,

    /// Human-readable error message
    pub message: String,

    /// Actionable recovery instruction for the agent
    pub recovery_action: String,

    /// Relevant context for debugging and recovery
    #[serde(default, skip_serializing_if = "HashMap::is_empty")]
    pub context: HashMap<String, serde_json::Value>,

    /// Whether this error is retryable (transient failure)
    #[serde(default)]
    pub retryable: bool,
}

impl StructuredError {
    pub fn new(
        code: impl Into<String>,
        message: impl Into<String>,
        recovery_action: impl Into<String>,
    ) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            recovery_action: recovery_action.into(),
            context: HashMap::new(),
            retryable: false,
        }
    }

    /// Add context key-value pair
    pub fn with_context(
        mut self,
        key: impl Into<String>,
        value: impl Into<serde_json::Value>,
    ) -> Self {
        self.context.insert(key.into(), value.into());
        self
    }

    /// Tag the error with the tool that produced it
    pub fn with_tool(self, tool: &str) -> Self {
        self.with_context("tool", tool.to_string())
    }
}

impl std::fmt::Display for StructuredError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}] {}", self.code, self.message)
    }
}

impl std::error::Error for StructuredError {}

/// Errors raised by the perspective tracker, the debate orchestrator and
/// startup preset loading
#[derive(Error, Debug)]
pub enum PanelError {
    /// Malformed or out-of-range caller data
    #[error("Invalid input: {message}")]
    InvalidInput { message: String },

    /// Operation attempted in a state that forbids it
    #[error("Precondition failed: {message}")]
    PreconditionFailed { message: String },

    /// Internal consistency violation (unreachable while invariants hold)
    #[error("Internal error: {message}")]
    Internal { message: String },

    /// Startup preset could not be loaded
    #[error("Preset error ({path}): {message}")]
    Preset { path: PathBuf, message: String },
}

impl PanelError {
    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::InvalidInput {
            message: message.into(),
        }
    }

    pub fn precondition(message: impl Into<String>) -> Self {
        Self::PreconditionFailed {
            message: message.into(),
        }
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }

    pub fn preset(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        Self::Preset {
            path: path.into(),
            message: message.into(),
        }
    }

    /// Whether this error came from caller-supplied data
    pub fn is_invalid_input(&self) -> bool {
        matches!(self, Self::InvalidInput { .. })
    }

    /// Whether this error came from calling an operation in the wrong state
    pub fn is_precondition(&self) -> bool {
        matches!(self, Self::PreconditionFailed { .. })
    }

    /// Machine-readable code for this error
    pub fn code(&self) -> &'static str {
        match self {
            Self::InvalidInput { .. } => "INVALID_INPUT",
            Self::PreconditionFailed { .. } => "PRECONDITION_FAILED",
            Self::Internal { .. } => "INTERNAL_ERROR",
            Self::Preset { .. } => "PRESET_ERROR",
        }
    }

    /// Get recovery suggestion for this error
    pub fn recovery_suggestion(&self) -> String {
        match self {
            Self::InvalidInput { message } => {
                let lower = message.to_lowercase();
                if lower.contains("participants") {
                    "Pass between 2 and 4 participant roles to start_debate".to_string()
                } else if lower.contains("not found") {
                    "Use roles exactly as defined with set_perspectives; call perspective_status to list them".to_string()
                } else if lower.contains("perspectives") {
                    "Call set_perspectives with a non-empty array of {role, focusAreas, personality}".to_string()
                } else {
                    format!("Invalid input: {}. Check parameters and try again.", message)
                }
            }
            Self::PreconditionFailed { message } => {
                let lower = message.to_lowercase();
                if lower.contains("debate") {
                    "Call start_debate with a topic and 2-4 participant roles".to_string()
                } else {
                    "Call set_perspectives to define (or redefine) the perspective sequence".to_string()
                }
            }
            Self::Internal { .. } => {
                "Restart the debate with start_debate; report this if it persists".to_string()
            }
            Self::Preset { path, .. } => format!(
                "Fix or remove the preset file at {} (expects [[perspectives]] tables)",
                path.display()
            ),
        }
    }

    /// Convert to structured error for MCP tool responses
    pub fn to_structured(&self) -> StructuredError {
        StructuredError::new(self.code(), self.to_string(), self.recovery_suggestion())
    }

    /// Convert to structured error JSON string for MCP responses
    pub fn to_structured_json(&self) -> String {
        serde_json::to_string_pretty(&self.to_structured())
            .unwrap_or_else(|_| format!(r#"{{"code":"SERIALIZATION_ERROR","message":"{}"}}"#, self))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = PanelError::invalid_input("Perspectives must be a non-empty array");
        assert!(err.to_string().contains("non-empty array"));

        let err = PanelError::precondition("No active debate");
        assert!(err.to_string().starts_with("Precondition failed"));
    }

    #[test]
    fn test_kind_predicates() {
        assert!(PanelError::invalid_input("x").is_invalid_input());
        assert!(!PanelError::invalid_input("x").is_precondition());
        assert!(PanelError::precondition("x").is_precondition());
        assert!(!PanelError::internal("x").is_invalid_input());
    }

    #[test]
    fn test_recovery_points_at_next_tool() {
        let err = PanelError::precondition("No active debate. Use start_debate first.");
        assert!(err.recovery_suggestion().contains("start_debate"));

        let err = PanelError::precondition("No perspectives defined or all perspectives completed");
        assert!(err.recovery_suggestion().contains("set_perspectives"));

        let err = PanelError::invalid_input("Debate requires 2-4 participants");
        assert!(err.recovery_suggestion().contains("between 2 and 4"));

        let err = PanelError::invalid_input("Persona not found in perspectives: Pirate");
        assert!(err.recovery_suggestion().contains("perspective_status"));
    }

    #[test]
    fn test_to_structured_json() {
        let err = PanelError::precondition("No debate to summarize");
        let json = err.to_structured_json();

        let parsed: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed["code"], "PRECONDITION_FAILED");
        assert_eq!(parsed["retryable"], false);
        assert!(parsed["message"]
            .as_str()
            .unwrap()
            .contains("No debate to summarize"));
    }

    #[test]
    fn test_structured_error_with_tool() {
        let err = PanelError::invalid_input("Analysis must be a non-empty string")
            .to_structured()
            .with_tool("perspective");
        assert_eq!(err.code, "INVALID_INPUT");
        assert_eq!(err.context.get("tool").unwrap(), "perspective");
        assert!(err.to_string().starts_with("[INVALID_INPUT]"));
    }

    #[test]
    fn test_preset_error() {
        let err = PanelError::preset("/tmp/panel.toml", "missing field `role`");
        assert_eq!(err.code(), "PRESET_ERROR");
        assert!(err.to_string().contains("/tmp/panel.toml"));
        assert!(err.recovery_suggestion().contains("[[perspectives]]"));
    }
}
