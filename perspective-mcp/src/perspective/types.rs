//! Perspective records and tracker snapshots.

use serde::{Deserialize, Serialize};

/// A named analysis lens.
///
/// `role` is the identity: within one perspective set no two entries share
/// a role.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Perspective {
    /// Professional role or persona name.
    pub role: String,
    /// Primary focus areas, in priority order.
    #[serde(default)]
    pub focus_areas: Vec<String>,
    /// Personality traits and approach style.
    #[serde(default)]
    pub personality: String,
}

impl Perspective {
    pub fn new(role: &str, focus_areas: &[&str], personality: &str) -> Self {
        Self {
            role: role.to_string(),
            focus_areas: focus_areas.iter().map(|s| s.to_string()).collect(),
            personality: personality.to_string(),
        }
    }

    /// Focus areas joined for display.
    pub fn focus_line(&self) -> String {
        self.focus_areas.join(", ")
    }
}

impl std::fmt::Display for Perspective {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.role)
    }
}

/// One entry of the analysis log.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalysisEntry {
    pub role: String,
    pub analysis: String,
}

/// Result of recording an analysis.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalysisOutcome {
    /// Role the analysis was stored under.
    pub role: String,
    /// Whether a perspective is still waiting after this call.
    pub next_perspective_needed: bool,
}

/// Read-only view of tracker progress.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrackerSnapshot {
    pub current_perspective: Option<Perspective>,
    /// Analyses in first-recorded order.
    pub previous_analyses: Vec<AnalysisEntry>,
    pub perspectives_remaining: usize,
    pub total_perspectives: usize,
    pub cursor: usize,
}

impl TrackerSnapshot {
    /// Number of perspectives that have an analysis recorded.
    pub fn completed(&self) -> usize {
        self.previous_analyses.len()
    }

    /// Compact status line.
    pub fn status_line(&self) -> String {
        match &self.current_perspective {
            Some(p) => format!(
                "perspective {}/{} ({}) | {} analyses recorded",
                self.cursor + 1,
                self.total_perspectives,
                p.role,
                self.completed()
            ),
            None => format!(
                "all {} perspectives completed | {} analyses recorded",
                self.total_perspectives,
                self.completed()
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_perspective_wire_names() {
        let json = r#"{"role":"Economist","focusAreas":["markets","incentives"],"personality":"Pragmatic"}"#;
        let p: Perspective = serde_json::from_str(json).unwrap();
        assert_eq!(p.role, "Economist");
        assert_eq!(p.focus_areas, vec!["markets", "incentives"]);

        let back = serde_json::to_value(&p).unwrap();
        assert!(back.get("focusAreas").is_some());
        assert!(back.get("focus_areas").is_none());
    }

    #[test]
    fn test_focus_line() {
        let p = Perspective::new("Ethicist", &["fairness", "harm"], "Principled");
        assert_eq!(p.focus_line(), "fairness, harm");
        assert_eq!(p.to_string(), "Ethicist");
    }

    #[test]
    fn test_status_line() {
        let snapshot = TrackerSnapshot {
            current_perspective: None,
            previous_analyses: vec![AnalysisEntry {
                role: "Economist".to_string(),
                analysis: "Costs rise".to_string(),
            }],
            perspectives_remaining: 0,
            total_perspectives: 1,
            cursor: 1,
        };
        assert!(snapshot.status_line().contains("all 1 perspectives completed"));
    }
}
