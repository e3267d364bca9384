//! Session snapshot types.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// The six fixed phases of a guided session, in order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Stage {
    /// Opening value statement.
    Value,
    /// Situation choice.
    Situation,
    /// Breathing gesture.
    Presence,
    /// Streamed cognitive text.
    Cognitive,
    /// Old narrative vs. new cognition.
    Reframe,
    /// Closing aftercare; terminal, the host navigates away from here.
    Aftercare,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Stage::Value => "value",
            Stage::Situation => "situation",
            Stage::Presence => "presence",
            Stage::Cognitive => "cognitive",
            Stage::Reframe => "reframe",
            Stage::Aftercare => "aftercare",
        };
        write!(f, "{name}")
    }
}

/// Where the breath gesture is within one press/release cycle.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BreathPhase {
    /// Circle at rest, waiting for a press.
    #[default]
    Idle,
    /// Press held: slow inhale.
    Inhale,
    /// Press released: slow exhale.
    Exhale,
}

/// Snapshot of one user's run through the guided stages.
///
/// Read-only for hosts; all mutation goes through
/// [`StageSequencer`](super::StageSequencer) operations.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Session {
    /// Unique session identifier.
    pub id: String,
    /// When the session began.
    pub started_at: DateTime<Utc>,
    /// The currently active stage.
    pub stage: Stage,
    /// Situation picked during the `situation` stage; set once per session.
    pub selected_situation: Option<String>,
    /// Cursor into the selected situation's cognitive steps. Only
    /// meaningful during `cognitive`; resets when a situation is selected.
    pub cognitive_step: usize,
    /// Current breath gesture phase (only meaningful during `presence`).
    pub breath_phase: BreathPhase,
    /// Completed press/release cycles, 0..=target.
    pub breath_count: u8,
    /// True between a transition request and its commit; hosts fade the
    /// stage out while this is set.
    pub is_transitioning: bool,
    /// True once the new-cognition line has been revealed in `reframe`.
    pub show_new_cognition: bool,
}

impl Session {
    /// Create a fresh session at the `value` stage.
    pub fn new() -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            started_at: Utc::now(),
            stage: Stage::Value,
            selected_situation: None,
            cognitive_step: 0,
            breath_phase: BreathPhase::Idle,
            breath_count: 0,
            is_transitioning: false,
            show_new_cognition: false,
        }
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fresh_session() {
        let session = Session::new();
        assert_eq!(session.stage, Stage::Value);
        assert_eq!(session.breath_phase, BreathPhase::Idle);
        assert_eq!(session.breath_count, 0);
        assert!(!session.is_transitioning);
        assert!(session.selected_situation.is_none());
    }

    #[test]
    fn test_stage_serde_names() {
        assert_eq!(serde_json::to_string(&Stage::Presence).unwrap(), "\"presence\"");
        assert_eq!(Stage::Aftercare.to_string(), "aftercare");
        let phase: BreathPhase = serde_json::from_str("\"inhale\"").unwrap();
        assert_eq!(phase, BreathPhase::Inhale);
    }
}
