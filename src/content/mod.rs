//! Read-only content catalogs consumed by the sequencer and the resolver.
//!
//! A [`ContentCatalog`] bundles every lookup table the engines need:
//! situations and their anchor content (cognitive steps, old narrative, new
//! cognition), explore modules (questions, options, tiebreakers), archetype
//! display definitions, and the static value/aftercare copy blocks. Catalogs
//! are loaded once at startup and never mutated; both engines treat every id
//! inside them as an opaque string.

mod archetypes;
mod builtin;
mod loader;
mod modules;
mod situations;

pub use archetypes::Archetype;
pub use builtin::builtin_catalog;
pub use modules::{ExploreModule, Question, QuestionOption};
pub use situations::{
    AftercareContent, AnchorContent, CognitiveStep, SessionAction, Situation, ValueStatement,
};

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// The complete set of lookup tables for one deployment.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContentCatalog {
    /// Situation options shown on the situation-entry page, in display order.
    pub situations: Vec<Situation>,
    /// Anchor content keyed by situation id.
    pub anchor_contents: HashMap<String, AnchorContent>,
    /// Explore modules (quizzes) keyed by module id.
    pub modules: HashMap<String, ExploreModule>,
    /// Archetype display definitions keyed by archetype id.
    pub archetypes: HashMap<String, Archetype>,
    /// Copy for the value-statement page.
    pub value_statement: ValueStatement,
    /// Copy for the aftercare page.
    pub aftercare: AftercareContent,
}

impl ContentCatalog {
    /// Whether `id` names a known situation.
    pub fn has_situation(&self, id: &str) -> bool {
        self.situations.iter().any(|s| s.id == id)
    }

    /// Anchor content for a situation, if any.
    pub fn anchor_content(&self, situation_id: &str) -> Option<&AnchorContent> {
        self.anchor_contents.get(situation_id)
    }

    /// Cognitive steps for a situation. Unknown ids yield an empty slice so
    /// the cognitive phase fails closed instead of panicking.
    pub fn cognitive_steps(&self, situation_id: &str) -> &[CognitiveStep] {
        self.anchor_contents
            .get(situation_id)
            .map(|c| c.cognitive_steps.as_slice())
            .unwrap_or(&[])
    }

    /// Number of cognitive steps for a situation (0 when unknown).
    pub fn cognitive_step_count(&self, situation_id: &str) -> usize {
        self.cognitive_steps(situation_id).len()
    }

    /// Look up an explore module by id.
    pub fn module(&self, id: &str) -> Option<&ExploreModule> {
        self.modules.get(id)
    }

    /// Look up an archetype definition by id.
    pub fn archetype(&self, id: &str) -> Option<&Archetype> {
        self.archetypes.get(id)
    }
}
