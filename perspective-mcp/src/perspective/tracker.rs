//! Perspective tracker: ordered perspectives, a cursor, and the analysis log.

use indexmap::IndexMap;
use tracing::{debug, info};

use super::types::{AnalysisEntry, AnalysisOutcome, Perspective, TrackerSnapshot};
use crate::error::{PanelError, PanelResult};

/// Walks a fixed perspective list one entry at a time.
///
/// The cursor never exceeds `perspectives.len()`; at that value the sequence
/// is exhausted and no perspective is current.
#[derive(Debug, Default, Clone)]
pub struct PerspectiveTracker {
    perspectives: Vec<Perspective>,
    cursor: usize,
    analyses: IndexMap<String, String>,
}

impl PerspectiveTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace perspectives, cursor and analyses in one step.
    ///
    /// Validation runs before anything is cleared, so a rejected list leaves
    /// the previous set in place.
    pub fn set_perspectives(&mut self, perspectives: Vec<Perspective>) -> PanelResult<()> {
        validate_perspectives(&perspectives)?;

        self.reset();
        self.perspectives = perspectives;
        info!(count = self.perspectives.len(), "Perspectives defined");
        Ok(())
    }

    /// Discard perspectives, cursor and analyses.
    pub fn reset(&mut self) {
        self.perspectives.clear();
        self.cursor = 0;
        self.analyses.clear();
    }

    pub fn perspectives(&self) -> &[Perspective] {
        &self.perspectives
    }

    pub fn current(&self) -> Option<&Perspective> {
        self.perspectives.get(self.cursor)
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn remaining(&self) -> usize {
        self.perspectives.len().saturating_sub(self.cursor)
    }

    pub fn is_exhausted(&self) -> bool {
        self.current().is_none()
    }

    /// Analysis recorded for a role, if any.
    pub fn analysis_for(&self, role: &str) -> Option<&str> {
        self.analyses.get(role).map(String::as_str)
    }

    /// Store `text` under the current perspective and optionally advance.
    pub fn record_analysis(&mut self, text: &str, advance: bool) -> PanelResult<AnalysisOutcome> {
        if text.trim().is_empty() {
            return Err(PanelError::invalid_input(
                "Analysis must be a non-empty string",
            ));
        }

        let role = match self.current() {
            Some(p) => p.role.clone(),
            None => {
                return Err(PanelError::precondition(
                    "No perspectives defined or all perspectives completed. Use set_perspectives first.",
                ))
            }
        };

        // Overwrites keep the original insertion slot.
        self.analyses.insert(role.clone(), text.to_string());

        if advance && self.cursor < self.perspectives.len() {
            self.cursor += 1;
        }

        let next_perspective_needed = self.cursor < self.perspectives.len();
        debug!(
            role = %role,
            advance,
            remaining = self.remaining(),
            "Analysis recorded"
        );

        Ok(AnalysisOutcome {
            role,
            next_perspective_needed,
        })
    }

    pub fn snapshot(&self) -> TrackerSnapshot {
        TrackerSnapshot {
            current_perspective: self.current().cloned(),
            previous_analyses: self
                .analyses
                .iter()
                .map(|(role, analysis)| AnalysisEntry {
                    role: role.clone(),
                    analysis: analysis.clone(),
                })
                .collect(),
            perspectives_remaining: self.remaining(),
            total_perspectives: self.perspectives.len(),
            cursor: self.cursor,
        }
    }
}

fn validate_perspectives(perspectives: &[Perspective]) -> PanelResult<()> {
    if perspectives.is_empty() {
        return Err(PanelError::invalid_input(
            "Perspectives must be a non-empty array",
        ));
    }

    let mut seen = std::collections::HashSet::new();
    for (i, p) in perspectives.iter().enumerate() {
        if p.role.trim().is_empty() {
            return Err(PanelError::invalid_input(format!(
                "Perspective at index {} has an empty role",
                i
            )));
        }
        if !seen.insert(p.role.as_str()) {
            return Err(PanelError::invalid_input(format!(
                "Duplicate perspective role: {}",
                p.role
            )));
        }
    }
    Ok(())
}
