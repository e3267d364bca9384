//! Archetype resolution engine.
//!
//! Scores a completed answer list against a module's option votes and picks
//! one archetype: a pure frequency count over the surviving answers, with
//! the module's tiebreaker list breaking equal scores deterministically.
//! Resolution never fails; every malformed input degrades to a documented
//! fallback.

use std::collections::HashMap;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::content::{ContentCatalog, Question};

/// Returned when the module id itself is unknown, and when a known module
/// somehow has an empty tiebreaker list (the loader rejects such catalogs,
/// but hand-built ones can still reach here).
pub const FALLBACK_ARCHETYPE: &str = "carrier";

/// One submitted answer: which option the user picked for which question.
///
/// Append-only during a quiz run; the full list is consumed exactly once at
/// completion.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Answer {
    pub question_id: String,
    pub option_id: String,
}

impl Answer {
    pub fn new(question_id: impl Into<String>, option_id: impl Into<String>) -> Self {
        Self {
            question_id: question_id.into(),
            option_id: option_id.into(),
        }
    }
}

/// Resolve a completed answer list to an archetype id.
///
/// Answers referencing a question or option outside the module are silently
/// skipped, which tolerates partial or replayed submissions. The result
/// depends only on the set of surviving votes, never on submission order.
pub fn resolve(catalog: &ContentCatalog, module_id: &str, answers: &[Answer]) -> String {
    let Some(module) = catalog.module(module_id) else {
        tracing::warn!(module = module_id, "unknown module, using global fallback");
        return FALLBACK_ARCHETYPE.to_string();
    };

    let mut hits: HashMap<&str, u32> = HashMap::new();
    for answer in answers {
        let Some(question) = module.question(&answer.question_id) else {
            tracing::debug!(question = %answer.question_id, "skipping vote for unknown question");
            continue;
        };
        let Some(option) = question.option(&answer.option_id) else {
            tracing::debug!(option = %answer.option_id, "skipping vote for unknown option");
            continue;
        };
        *hits.entry(option.archetype.as_str()).or_insert(0) += 1;
    }

    let max_hits = hits.values().copied().max().unwrap_or(0);
    let top: Vec<&str> = hits
        .iter()
        .filter(|(_, &count)| count == max_hits)
        .map(|(&archetype, _)| archetype)
        .collect();

    if top.len() == 1 {
        tracing::debug!(module = module_id, archetype = top[0], hits = max_hits, "resolved");
        return top[0].to_string();
    }

    // Tie (or no votes at all): the module's priority order decides.
    for archetype in &module.tiebreaker {
        if top.contains(&archetype.as_str()) {
            tracing::debug!(module = module_id, archetype = %archetype, "resolved by tiebreaker");
            return archetype.clone();
        }
    }

    module
        .tiebreaker
        .first()
        .cloned()
        .unwrap_or_else(|| FALLBACK_ARCHETYPE.to_string())
}

/// Bookkeeping for one walk through a module's questions.
///
/// Holds the question cursor and the growing answer list so the host only
/// forwards option picks; the final pick triggers resolution.
#[derive(Debug, Clone)]
pub struct ExploreRun {
    catalog: Arc<ContentCatalog>,
    module_id: String,
    question_index: usize,
    answers: Vec<Answer>,
}

impl ExploreRun {
    /// Start a run for a module. Returns `None` when the module id is
    /// unknown; the host shows its "module not found" copy.
    pub fn new(catalog: Arc<ContentCatalog>, module_id: &str) -> Option<Self> {
        catalog.module(module_id)?;
        Some(Self {
            catalog,
            module_id: module_id.to_string(),
            question_index: 0,
            answers: Vec::new(),
        })
    }

    /// The question currently on screen, if any remain.
    pub fn current_question(&self) -> Option<&Question> {
        self.catalog
            .module(&self.module_id)?
            .questions
            .get(self.question_index)
    }

    /// Whether the current question is the final one.
    pub fn is_last_question(&self) -> bool {
        let total = self.total_questions();
        total == 0 || self.question_index + 1 >= total
    }

    /// `(current 1-based position, total)` for the progress indicator.
    pub fn progress(&self) -> (usize, usize) {
        (self.question_index + 1, self.total_questions())
    }

    /// Answers submitted so far.
    pub fn answers(&self) -> &[Answer] {
        &self.answers
    }

    /// Whether every question has been answered.
    pub fn is_complete(&self) -> bool {
        self.question_index >= self.total_questions()
    }

    /// Record the picked option for the current question and move on.
    ///
    /// Returns the resolved archetype id once the final question is
    /// answered, `None` while questions remain. Calls after completion
    /// return `None` without recording anything.
    pub fn answer(&mut self, option_id: &str) -> Option<String> {
        let question_id = self.current_question()?.id.clone();
        self.answers.push(Answer::new(question_id, option_id));
        self.question_index += 1;

        if self.is_complete() {
            Some(resolve(&self.catalog, &self.module_id, &self.answers))
        } else {
            None
        }
    }

    fn total_questions(&self) -> usize {
        self.catalog
            .module(&self.module_id)
            .map(|m| m.questions.len())
            .unwrap_or(0)
    }
}
