//! # anchorkit
//!
//! Engine for short guided anchoring sessions: a timer-driven stage
//! sequencer that walks one visitor through six fixed phases (value
//! statement, situation choice, breathing gesture, streamed cognitive text,
//! reframing, aftercare), and a resolver that scores multiple-choice answers
//! into one of a small fixed set of reaction-pattern archetypes.
//!
//! The crate owns no presentation: a host renders whatever the current
//! [`Session`] snapshot says, forwards gesture and choice events into the
//! [`StageSequencer`], and hands completed answer lists to [`resolve`]. All
//! copy lives in read-only [`ContentCatalog`] lookup tables, either the
//! built-in set or one loaded from YAML/JSON.

pub mod content;
pub mod error;
pub mod resolver;
pub mod session;

pub use content::{builtin_catalog, ContentCatalog};
pub use error::CatalogError;
pub use resolver::{resolve, Answer, ExploreRun, FALLBACK_ARCHETYPE};
pub use session::{
    BreathPhase, SequencerConfig, Session, SessionEvent, Stage, StageSequencer,
};

/// Library version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
