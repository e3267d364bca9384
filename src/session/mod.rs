//! Guided-session stage machine.
//!
//! The [`StageSequencer`] owns one [`Session`] and is the only mutator of
//! it. A host renders whatever the current snapshot says and forwards user
//! gestures in; delayed stage commits run on cancellable tokio timers so a
//! fade animation can finish before content swaps.

mod config;
mod events;
mod sequencer;
mod stage;
mod timer;

pub use config::SequencerConfig;
pub use events::{
    SessionEvent, COMPLETE_PULSE_MS, PRESS_PULSE_MS, RELEASE_PULSE_MS,
};
pub use sequencer::StageSequencer;
pub use stage::{BreathPhase, Session, Stage};
pub use timer::DelayedTask;
