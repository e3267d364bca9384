//! Explore module (quiz) definitions.

use serde::{Deserialize, Serialize};

/// One selectable answer to a [`Question`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuestionOption {
    /// Stable option id, unique within its question.
    pub id: String,
    /// Display text.
    pub text: String,
    /// The archetype this option votes for.
    pub archetype: String,
}

/// One multiple-choice question within a module.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Question {
    /// Stable question id, unique within its module.
    pub id: String,
    /// Display text.
    pub text: String,
    /// Answer options, in display order.
    pub options: Vec<QuestionOption>,
}

impl Question {
    /// Look up an option by id.
    pub fn option(&self, id: &str) -> Option<&QuestionOption> {
        self.options.iter().find(|o| o.id == id)
    }
}

/// A named quiz: its questions, candidate archetype pools, and the
/// priority order used to break score ties.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExploreModule {
    pub id: String,
    pub name: String,
    pub subtitle: String,
    pub description: String,
    /// Questions asked in order.
    pub questions: Vec<Question>,
    /// Archetypes this module is primarily designed to surface.
    /// Informational only; the resolver does not consult it.
    #[serde(default)]
    pub primary_archetypes: Vec<String>,
    /// Secondary candidate pool. Informational only.
    #[serde(default)]
    pub secondary_archetypes: Vec<String>,
    /// Tie-break priority order. Must be non-empty; its first entry doubles
    /// as the module's fallback when no votes land at all.
    pub tiebreaker: Vec<String>,
}

impl ExploreModule {
    /// Look up a question by id.
    pub fn question(&self, id: &str) -> Option<&Question> {
        self.questions.iter().find(|q| q.id == id)
    }
}
