//! Session lifecycle events.
//!
//! The sequencer reports state changes to an optional listener so the host
//! can trigger side effects (fades, haptic pulses) without polling. The
//! pulse lengths carried on breath events are suggested vibration durations
//! in milliseconds; purely advisory.

use serde::{Deserialize, Serialize};

use super::stage::Stage;

/// Suggested vibration on press start.
pub const PRESS_PULSE_MS: u32 = 30;
/// Suggested vibration on press release.
pub const RELEASE_PULSE_MS: u32 = 20;
/// Suggested vibration when the breath cycle completes.
pub const COMPLETE_PULSE_MS: u32 = 50;

/// Events emitted by the sequencer, in the order they occur.
///
/// Listeners are invoked synchronously and outside the session lock, so
/// reading a snapshot from inside a listener is safe.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum SessionEvent {
    /// A transition was requested; the host starts its fade-out.
    TransitionStarted { to: Stage },
    /// A stage commit after the settle delay; the host fades back in.
    StageEntered { stage: Stage },
    /// Breath press began (inhale).
    BreathPressed { pulse_ms: u32 },
    /// Breath press ended (exhale); `count` is the new completed-cycle count.
    BreathReleased { count: u8, pulse_ms: u32 },
    /// All breath cycles done; the completion transition is pending.
    BreathCompleted { pulse_ms: u32 },
    /// The cognitive cursor moved to `step`.
    CognitiveStepAdvanced { step: usize },
    /// The new-cognition line became visible in `reframe`.
    NewCognitionRevealed,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_serde_tagging() {
        let event = SessionEvent::BreathReleased {
            count: 2,
            pulse_ms: RELEASE_PULSE_MS,
        };
        let json = serde_json::to_string(&event).unwrap();
        assert!(json.contains("\"type\":\"breath_released\""));
        let back: SessionEvent = serde_json::from_str(&json).unwrap();
        assert_eq!(back, event);
    }
}
