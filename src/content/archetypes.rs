//! Reaction-pattern archetype display definitions.
//!
//! The engines treat archetype ids as opaque strings; these fields exist
//! solely for the result view.

use serde::{Deserialize, Serialize};

/// One named reaction-pattern archetype.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Archetype {
    pub id: String,
    /// Human-readable name.
    pub name: String,
    /// Caption shown above the name (e.g. "current reaction pattern").
    pub label: String,
    /// One-sentence definition of the pattern.
    pub definition: String,
    /// The "you are seen" statement.
    pub identify_statement: String,
    /// The permission-granting statement.
    pub allow_statement: String,
    /// Phrases the result view must never show for this archetype.
    #[serde(default)]
    pub forbidden: Vec<String>,
}
