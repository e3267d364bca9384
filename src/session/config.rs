//! Sequencer timing configuration.

use std::time::Duration;

/// Delays and thresholds for the stage sequencer.
///
/// Every delay exists so a host-side fade can finish before content swaps;
/// none of them carries business meaning. Tests drive them against a paused
/// clock, and hosts with different animation timings override the defaults.
#[derive(Debug, Clone)]
pub struct SequencerConfig {
    /// Gap between a transition request and the stage commit.
    pub settle: Duration,
    /// Gap before the cognitive cursor moves to the next step.
    pub step_advance: Duration,
    /// Gap between the final breath release and entering `cognitive`.
    pub breath_complete: Duration,
    /// Gap before a non-final exhale returns the circle to idle.
    pub exhale_reset: Duration,
    /// Gap between entering `reframe` and revealing the new cognition.
    pub reveal: Duration,
    /// Full press/release cycles required to complete `presence`.
    pub breath_target: u8,
}

impl Default for SequencerConfig {
    fn default() -> Self {
        Self {
            settle: Duration::from_millis(400),
            step_advance: Duration::from_millis(300),
            breath_complete: Duration::from_millis(1000),
            exhale_reset: Duration::from_millis(2000),
            reveal: Duration::from_millis(800),
            breath_target: 3,
        }
    }
}
