//! Server configuration and startup presets.

use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::error::{PanelError, PanelResult};
use crate::perspective::Perspective;

/// Default excerpt length for summary key points.
pub const DEFAULT_EXCERPT_CHARS: usize = 150;

/// Default tracing directive.
pub const DEFAULT_LOG_FILTER: &str = "perspective_mcp=info";

/// Server configuration
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Characters kept per statement in the debate summary
    pub excerpt_chars: usize,
    /// Optional TOML file with perspectives applied at startup
    pub preset_path: Option<PathBuf>,
    /// Tracing directive added to the env filter
    pub log_filter: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            excerpt_chars: DEFAULT_EXCERPT_CHARS,
            preset_path: None,
            log_filter: DEFAULT_LOG_FILTER.to_string(),
        }
    }
}

impl ServerConfig {
    /// Defaults overridden by `PERSPECTIVE_*` environment variables.
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Ok(val) = std::env::var("PERSPECTIVE_EXCERPT_CHARS") {
            if let Ok(n) = val.parse::<usize>() {
                if n > 0 {
                    config.excerpt_chars = n;
                }
            }
        }
        if let Ok(path) = std::env::var("PERSPECTIVE_PRESET_PATH") {
            if !path.trim().is_empty() {
                config.preset_path = Some(PathBuf::from(path));
            }
        }

        config
    }

    /// Load the preset, if one is configured.
    pub fn load_preset(&self) -> PanelResult<Option<PerspectivePreset>> {
        self.preset_path
            .as_deref()
            .map(PerspectivePreset::from_file)
            .transpose()
    }
}

/// One perspective as written in a preset file.
#[derive(Debug, Clone, Deserialize)]
pub struct PresetPerspective {
    pub role: String,
    #[serde(default)]
    pub focus_areas: Vec<String>,
    #[serde(default)]
    pub personality: String,
}

impl From<PresetPerspective> for Perspective {
    fn from(p: PresetPerspective) -> Self {
        Perspective {
            role: p.role,
            focus_areas: p.focus_areas,
            personality: p.personality,
        }
    }
}

/// Perspective set parsed from TOML.
///
/// ```toml
/// [[perspectives]]
/// role = "Economist"
/// focus_areas = ["markets", "incentives"]
/// personality = "Pragmatic"
/// ```
#[derive(Debug, Clone, Deserialize)]
pub struct PerspectivePreset {
    #[serde(default)]
    pub perspectives: Vec<PresetPerspective>,
}

impl PerspectivePreset {
    pub fn from_file(path: &Path) -> PanelResult<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| PanelError::preset(path, format!("failed to read: {}", e)))?;
        Self::parse(&content).map_err(|e| match e {
            PanelError::Preset { message, .. } => PanelError::preset(path, message),
            other => other,
        })
    }

    pub fn parse(content: &str) -> PanelResult<Self> {
        toml::from_str(content).map_err(|e| PanelError::preset("<inline>", e.to_string()))
    }

    pub fn into_perspectives(self) -> Vec<Perspective> {
        self.perspectives.into_iter().map(Perspective::from).collect()
    }
}
