//! The stage sequencer.
//!
//! Drives one session through the six stages. All mutation happens under a
//! single lock; delayed continuations run as [`DelayedTask`]s and re-check
//! an epoch counter before committing, so a timer superseded by a later
//! event can never mutate stale state. User input arriving outside its
//! valid stage is silently ignored (input timing relative to animations is
//! inherently racy).

use std::sync::Arc;

use parking_lot::Mutex;

use crate::content::ContentCatalog;

use super::config::SequencerConfig;
use super::events::{SessionEvent, COMPLETE_PULSE_MS, PRESS_PULSE_MS, RELEASE_PULSE_MS};
use super::stage::{BreathPhase, Session, Stage};
use super::timer::DelayedTask;

type Listener = Arc<dyn Fn(&SessionEvent) + Send + Sync>;

struct Inner {
    session: Session,
    /// Bumped by every accepted state-changing event. Delayed callbacks
    /// capture the value current at scheduling time and no-op once it has
    /// moved on; replacing a slot additionally aborts the old task.
    epoch: u64,
    /// Pending stage-commit or step-advance timer.
    settle: Option<DelayedTask>,
    /// Pending exhale-reset or breath-completion timer (mutually exclusive
    /// per press/release cycle).
    breath: Option<DelayedTask>,
    /// Pending new-cognition reveal timer.
    reveal: Option<DelayedTask>,
}

/// Sequences one guided session.
///
/// Cheap to clone (all state is shared); operations must be called from
/// within a tokio runtime because stage commits run on spawned timers.
#[derive(Clone)]
pub struct StageSequencer {
    inner: Arc<Mutex<Inner>>,
    catalog: Arc<ContentCatalog>,
    config: SequencerConfig,
    listener: Option<Listener>,
}

impl StageSequencer {
    /// Create a sequencer with default timings.
    pub fn new(catalog: Arc<ContentCatalog>) -> Self {
        Self::with_config(catalog, SequencerConfig::default())
    }

    /// Create a sequencer with custom timings.
    pub fn with_config(catalog: Arc<ContentCatalog>, config: SequencerConfig) -> Self {
        Self {
            inner: Arc::new(Mutex::new(Inner {
                session: Session::new(),
                epoch: 0,
                settle: None,
                breath: None,
                reveal: None,
            })),
            catalog,
            config,
            listener: None,
        }
    }

    /// Attach a listener invoked synchronously for every emitted event.
    pub fn with_listener<F>(mut self, listener: F) -> Self
    where
        F: Fn(&SessionEvent) + Send + Sync + 'static,
    {
        self.listener = Some(Arc::new(listener));
        self
    }

    /// Current session snapshot; hosts read this on every render.
    pub fn snapshot(&self) -> Session {
        self.inner.lock().session.clone()
    }

    /// Request a move to `next`.
    ///
    /// Sets `is_transitioning` immediately for visual feedback and commits
    /// the stage after the settle delay. A second request while one is in
    /// flight overwrites it: the last call before the timer fires wins.
    /// Ignored once the session reached `aftercare` (terminal).
    pub fn transition_to(&self, next: Stage) {
        let mut inner = self.inner.lock();
        if inner.session.stage == Stage::Aftercare {
            tracing::trace!(to = %next, "transition ignored, session is terminal");
            return;
        }
        self.start_transition(&mut inner, next);
        drop(inner);
        self.emit(SessionEvent::TransitionStarted { to: next });
    }

    /// Pick a situation; valid only during `situation`.
    ///
    /// Unknown ids are stored anyway and fail closed later: the cognitive
    /// phase sees an empty step list and skips straight to `reframe`.
    pub fn select_situation(&self, id: &str) {
        let mut inner = self.inner.lock();
        if inner.session.stage != Stage::Situation {
            tracing::trace!(situation = id, "situation pick ignored outside situation stage");
            return;
        }
        if !self.catalog.has_situation(id) {
            tracing::warn!(situation = id, "unknown situation selected, content will be empty");
        }
        inner.session.selected_situation = Some(id.to_string());
        inner.session.cognitive_step = 0;
        self.start_transition(&mut inner, Stage::Presence);
        drop(inner);
        self.emit(SessionEvent::TransitionStarted { to: Stage::Presence });
    }

    /// Breath press began; valid only during `presence`.
    ///
    /// Ignored while already pressed and once the cycle target is reached
    /// (a 4th press cannot disturb the pending completion transition).
    pub fn on_press_start(&self) {
        let mut inner = self.inner.lock();
        if inner.session.stage != Stage::Presence
            || inner.session.breath_phase == BreathPhase::Inhale
            || inner.session.breath_count >= self.config.breath_target
        {
            return;
        }
        // A new press supersedes any pending exhale reset.
        inner.epoch += 1;
        if let Some(reset) = inner.breath.take() {
            reset.cancel();
        }
        inner.session.breath_phase = BreathPhase::Inhale;
        drop(inner);
        tracing::trace!("breath press started");
        self.emit(SessionEvent::BreathPressed {
            pulse_ms: PRESS_PULSE_MS,
        });
    }

    /// Breath press ended; valid only while pressed during `presence`.
    ///
    /// Counts one full cycle. The final release schedules the completion
    /// transition to `cognitive`; earlier releases schedule an idle reset.
    pub fn on_press_end(&self) {
        let mut inner = self.inner.lock();
        if inner.session.stage != Stage::Presence
            || inner.session.breath_phase != BreathPhase::Inhale
        {
            return;
        }
        inner.session.breath_phase = BreathPhase::Exhale;
        inner.session.breath_count += 1;
        inner.epoch += 1;
        let epoch = inner.epoch;
        let count = inner.session.breath_count;
        let complete = count >= self.config.breath_target;

        let seq = self.clone();
        inner.breath = Some(if complete {
            DelayedTask::schedule(self.config.breath_complete, move || {
                seq.complete_breath(epoch)
            })
        } else {
            DelayedTask::schedule(self.config.exhale_reset, move || seq.reset_breath(epoch))
        });
        drop(inner);

        tracing::debug!(count, complete, "breath released");
        self.emit(SessionEvent::BreathReleased {
            count,
            pulse_ms: RELEASE_PULSE_MS,
        });
    }

    /// Move to the next cognitive step, or to `reframe` from the last one;
    /// valid only during `cognitive`. Idempotent while its own delay is
    /// pending (guarded by `is_transitioning`).
    pub fn advance_cognitive_step(&self) {
        let mut inner = self.inner.lock();
        if inner.session.stage != Stage::Cognitive || inner.session.is_transitioning {
            return;
        }
        let steps = inner
            .session
            .selected_situation
            .as_deref()
            .map(|id| self.catalog.cognitive_step_count(id))
            .unwrap_or(0);
        // An empty step list (unknown situation) counts as the last step.
        if steps == 0 || inner.session.cognitive_step + 1 >= steps {
            self.start_transition(&mut inner, Stage::Reframe);
            drop(inner);
            self.emit(SessionEvent::TransitionStarted { to: Stage::Reframe });
            return;
        }
        inner.session.is_transitioning = true;
        inner.epoch += 1;
        let epoch = inner.epoch;
        let seq = self.clone();
        inner.settle = Some(DelayedTask::schedule(self.config.step_advance, move || {
            seq.commit_step(epoch)
        }));
    }

    /// Acknowledge the reframe; valid only during `reframe`.
    pub fn confirm_reframe(&self) {
        let mut inner = self.inner.lock();
        if inner.session.stage != Stage::Reframe {
            return;
        }
        self.start_transition(&mut inner, Stage::Aftercare);
        drop(inner);
        self.emit(SessionEvent::TransitionStarted {
            to: Stage::Aftercare,
        });
    }

    // -----------------------------------------------------------------
    // Delayed continuations
    // -----------------------------------------------------------------

    fn start_transition(&self, inner: &mut Inner, next: Stage) {
        inner.session.is_transitioning = true;
        inner.epoch += 1;
        let epoch = inner.epoch;
        tracing::debug!(from = %inner.session.stage, to = %next, "transition requested");
        // Overwrite semantics: cancel whatever was in flight, and with it
        // any reveal pending for a stage we are now leaving.
        if let Some(pending) = inner.settle.take() {
            pending.cancel();
        }
        if let Some(reveal) = inner.reveal.take() {
            reveal.cancel();
        }
        let seq = self.clone();
        inner.settle = Some(DelayedTask::schedule(self.config.settle, move || {
            seq.commit_transition(epoch, next)
        }));
    }

    fn commit_transition(&self, epoch: u64, next: Stage) {
        let mut inner = self.inner.lock();
        if inner.epoch != epoch {
            tracing::trace!(to = %next, "stale transition discarded");
            return;
        }
        inner.session.stage = next;
        inner.session.is_transitioning = false;
        match next {
            Stage::Presence => {
                inner.session.breath_phase = BreathPhase::Idle;
                inner.session.breath_count = 0;
            }
            Stage::Reframe => {
                inner.session.show_new_cognition = false;
                let seq = self.clone();
                inner.reveal = Some(DelayedTask::schedule(self.config.reveal, move || {
                    seq.reveal_new_cognition(epoch)
                }));
            }
            _ => {}
        }
        drop(inner);
        tracing::debug!(stage = %next, "stage entered");
        self.emit(SessionEvent::StageEntered { stage: next });
    }

    fn commit_step(&self, epoch: u64) {
        let mut inner = self.inner.lock();
        if inner.epoch != epoch {
            return;
        }
        inner.session.cognitive_step += 1;
        inner.session.is_transitioning = false;
        let step = inner.session.cognitive_step;
        drop(inner);
        tracing::trace!(step, "cognitive step advanced");
        self.emit(SessionEvent::CognitiveStepAdvanced { step });
    }

    fn complete_breath(&self, epoch: u64) {
        {
            let inner = self.inner.lock();
            if inner.epoch != epoch || inner.session.stage != Stage::Presence {
                return;
            }
        }
        self.emit(SessionEvent::BreathCompleted {
            pulse_ms: COMPLETE_PULSE_MS,
        });
        self.transition_to(Stage::Cognitive);
    }

    fn reset_breath(&self, epoch: u64) {
        let mut inner = self.inner.lock();
        if inner.epoch != epoch || inner.session.stage != Stage::Presence {
            return;
        }
        inner.session.breath_phase = BreathPhase::Idle;
        tracing::trace!("breath circle back to idle");
    }

    fn reveal_new_cognition(&self, epoch: u64) {
        let mut inner = self.inner.lock();
        if inner.epoch != epoch {
            return;
        }
        inner.session.show_new_cognition = true;
        drop(inner);
        self.emit(SessionEvent::NewCognitionRevealed);
    }

    fn emit(&self, event: SessionEvent) {
        if let Some(listener) = &self.listener {
            listener(&event);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::builtin_catalog;
    use std::time::Duration;
    use tokio::time::sleep;

    fn catalog() -> Arc<ContentCatalog> {
        Arc::new(builtin_catalog().clone())
    }

    fn sequencer() -> StageSequencer {
        StageSequencer::new(catalog())
    }

    /// Wait out a settle delay (default 400 ms) plus slack.
    async fn settled() {
        sleep(Duration::from_millis(450)).await;
    }

    /// One full press/release cycle followed by the exhale reset window.
    async fn breath_cycle(seq: &StageSequencer) {
        seq.on_press_start();
        seq.on_press_end();
        sleep(Duration::from_millis(2100)).await;
    }

    #[tokio::test(start_paused = true)]
    async fn test_transition_commits_after_settle() {
        let seq = sequencer();
        assert_eq!(seq.snapshot().stage, Stage::Value);

        seq.transition_to(Stage::Situation);
        let mid = seq.snapshot();
        assert_eq!(mid.stage, Stage::Value);
        assert!(mid.is_transitioning);

        settled().await;
        let after = seq.snapshot();
        assert_eq!(after.stage, Stage::Situation);
        assert!(!after.is_transitioning);
    }

    #[tokio::test(start_paused = true)]
    async fn test_transition_overwrite_last_call_wins() {
        let events = Arc::new(Mutex::new(Vec::new()));
        let log = Arc::clone(&events);
        let seq = StageSequencer::new(catalog())
            .with_listener(move |e| log.lock().push(e.clone()));

        seq.transition_to(Stage::Situation);
        seq.transition_to(Stage::Presence);
        settled().await;

        assert_eq!(seq.snapshot().stage, Stage::Presence);
        let entered: Vec<_> = events
            .lock()
            .iter()
            .filter(|e| matches!(e, SessionEvent::StageEntered { .. }))
            .cloned()
            .collect();
        assert_eq!(
            entered,
            vec![SessionEvent::StageEntered {
                stage: Stage::Presence
            }]
        );
    }

    #[tokio::test(start_paused = true)]
    async fn test_full_linear_flow() {
        let events = Arc::new(Mutex::new(Vec::new()));
        let log = Arc::clone(&events);
        let seq = StageSequencer::new(catalog())
            .with_listener(move |e| log.lock().push(e.clone()));

        seq.transition_to(Stage::Situation);
        settled().await;
        seq.select_situation("bracing");
        settled().await;
        assert_eq!(seq.snapshot().stage, Stage::Presence);

        for _ in 0..2 {
            breath_cycle(&seq).await;
        }
        seq.on_press_start();
        seq.on_press_end();
        // Completion delay (1000) plus the settle into cognitive.
        sleep(Duration::from_millis(1500)).await;
        assert_eq!(seq.snapshot().stage, Stage::Cognitive);

        // bracing has 4 steps; three advances move the cursor, the fourth
        // leaves the stage.
        for expected in 1..=3 {
            seq.advance_cognitive_step();
            sleep(Duration::from_millis(350)).await;
            assert_eq!(seq.snapshot().cognitive_step, expected);
        }
        seq.advance_cognitive_step();
        settled().await;
        assert_eq!(seq.snapshot().stage, Stage::Reframe);

        seq.confirm_reframe();
        settled().await;
        assert_eq!(seq.snapshot().stage, Stage::Aftercare);

        let visited: Vec<Stage> = events
            .lock()
            .iter()
            .filter_map(|e| match e {
                SessionEvent::StageEntered { stage } => Some(*stage),
                _ => None,
            })
            .collect();
        assert_eq!(
            visited,
            vec![
                Stage::Situation,
                Stage::Presence,
                Stage::Cognitive,
                Stage::Reframe,
                Stage::Aftercare,
            ]
        );
    }

    #[tokio::test(start_paused = true)]
    async fn test_breath_counter_boundary() {
        let seq = sequencer();
        seq.transition_to(Stage::Situation);
        settled().await;
        seq.select_situation("blaming");
        settled().await;

        breath_cycle(&seq).await;
        breath_cycle(&seq).await;
        let two = seq.snapshot();
        assert_eq!(two.stage, Stage::Presence);
        assert_eq!(two.breath_count, 2);
        assert_eq!(two.breath_phase, BreathPhase::Idle);

        seq.on_press_start();
        seq.on_press_end();
        let third = seq.snapshot();
        assert_eq!(third.breath_count, 3);
        assert_eq!(third.stage, Stage::Presence);

        sleep(Duration::from_millis(1500)).await;
        let done = seq.snapshot();
        assert_eq!(done.stage, Stage::Cognitive);
        assert_eq!(done.breath_count, 3);
    }

    #[tokio::test(start_paused = true)]
    async fn test_fourth_cycle_is_a_no_op() {
        let seq = sequencer();
        seq.transition_to(Stage::Situation);
        settled().await;
        seq.select_situation("numb");
        settled().await;

        breath_cycle(&seq).await;
        breath_cycle(&seq).await;
        seq.on_press_start();
        seq.on_press_end();
        sleep(Duration::from_millis(1500)).await;
        assert_eq!(seq.snapshot().stage, Stage::Cognitive);

        let before = seq.snapshot();
        seq.on_press_start();
        seq.on_press_end();
        sleep(Duration::from_millis(3000)).await;
        let after = seq.snapshot();
        assert_eq!(after.stage, Stage::Cognitive);
        assert_eq!(after.breath_count, before.breath_count);
        assert_eq!(after.breath_phase, before.breath_phase);
    }

    #[tokio::test(start_paused = true)]
    async fn test_stale_exhale_reset_cannot_clobber_next_inhale() {
        let seq = sequencer();
        seq.transition_to(Stage::Situation);
        settled().await;
        seq.select_situation("bracing");
        settled().await;

        seq.on_press_start();
        seq.on_press_end();
        // Press again well before the 2000 ms reset would fire.
        sleep(Duration::from_millis(100)).await;
        seq.on_press_start();
        sleep(Duration::from_millis(2100)).await;
        // The superseded reset must not have knocked the phase back to idle.
        assert_eq!(seq.snapshot().breath_phase, BreathPhase::Inhale);

        seq.on_press_end();
        assert_eq!(seq.snapshot().breath_count, 2);
    }

    #[tokio::test(start_paused = true)]
    async fn test_out_of_phase_input_is_ignored() {
        let seq = sequencer();

        // All stage-specific operations are no-ops at the value stage.
        seq.select_situation("bracing");
        seq.on_press_start();
        seq.on_press_end();
        seq.advance_cognitive_step();
        seq.confirm_reframe();
        settled().await;

        let session = seq.snapshot();
        assert_eq!(session.stage, Stage::Value);
        assert!(session.selected_situation.is_none());
        assert_eq!(session.breath_count, 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_double_release_counts_once() {
        let seq = sequencer();
        seq.transition_to(Stage::Situation);
        settled().await;
        seq.select_situation("bracing");
        settled().await;

        seq.on_press_start();
        seq.on_press_end();
        seq.on_press_end();
        assert_eq!(seq.snapshot().breath_count, 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_advance_is_idempotent_while_pending() {
        let seq = sequencer();
        seq.transition_to(Stage::Situation);
        settled().await;
        seq.select_situation("bracing");
        settled().await;
        for _ in 0..3 {
            seq.on_press_start();
            seq.on_press_end();
            sleep(Duration::from_millis(2100)).await;
        }
        sleep(Duration::from_millis(500)).await;
        assert_eq!(seq.snapshot().stage, Stage::Cognitive);

        seq.advance_cognitive_step();
        seq.advance_cognitive_step();
        seq.advance_cognitive_step();
        sleep(Duration::from_millis(350)).await;
        assert_eq!(seq.snapshot().cognitive_step, 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_unknown_situation_fails_closed() {
        let seq = sequencer();
        seq.transition_to(Stage::Situation);
        settled().await;
        seq.select_situation("ghost");
        settled().await;
        assert_eq!(seq.snapshot().stage, Stage::Presence);

        for _ in 0..3 {
            seq.on_press_start();
            seq.on_press_end();
            sleep(Duration::from_millis(2100)).await;
        }
        sleep(Duration::from_millis(500)).await;
        assert_eq!(seq.snapshot().stage, Stage::Cognitive);

        // No steps to show: one advance skips straight to reframe.
        seq.advance_cognitive_step();
        settled().await;
        assert_eq!(seq.snapshot().stage, Stage::Reframe);
    }

    #[tokio::test(start_paused = true)]
    async fn test_new_cognition_reveals_after_delay() {
        let seq = sequencer();
        seq.transition_to(Stage::Situation);
        settled().await;
        seq.select_situation("ghost");
        settled().await;
        for _ in 0..3 {
            seq.on_press_start();
            seq.on_press_end();
            sleep(Duration::from_millis(2100)).await;
        }
        sleep(Duration::from_millis(500)).await;
        seq.advance_cognitive_step();
        settled().await;
        assert_eq!(seq.snapshot().stage, Stage::Reframe);
        assert!(!seq.snapshot().show_new_cognition);

        sleep(Duration::from_millis(850)).await;
        assert!(seq.snapshot().show_new_cognition);
    }

    #[tokio::test(start_paused = true)]
    async fn test_leaving_reframe_early_cancels_reveal() {
        let seq = sequencer();
        seq.transition_to(Stage::Situation);
        settled().await;
        seq.select_situation("ghost");
        settled().await;
        for _ in 0..3 {
            seq.on_press_start();
            seq.on_press_end();
            sleep(Duration::from_millis(2100)).await;
        }
        sleep(Duration::from_millis(500)).await;
        seq.advance_cognitive_step();
        settled().await;
        assert_eq!(seq.snapshot().stage, Stage::Reframe);

        // Confirm before the 800 ms reveal fires.
        seq.confirm_reframe();
        sleep(Duration::from_millis(2000)).await;
        let session = seq.snapshot();
        assert_eq!(session.stage, Stage::Aftercare);
        assert!(!session.show_new_cognition);
    }

    #[tokio::test(start_paused = true)]
    async fn test_terminal_stage_accepts_no_transitions() {
        let seq = sequencer();
        seq.transition_to(Stage::Situation);
        settled().await;
        seq.select_situation("ghost");
        settled().await;
        for _ in 0..3 {
            seq.on_press_start();
            seq.on_press_end();
            sleep(Duration::from_millis(2100)).await;
        }
        sleep(Duration::from_millis(500)).await;
        seq.advance_cognitive_step();
        settled().await;
        seq.confirm_reframe();
        settled().await;
        assert_eq!(seq.snapshot().stage, Stage::Aftercare);

        seq.transition_to(Stage::Value);
        settled().await;
        assert_eq!(seq.snapshot().stage, Stage::Aftercare);
    }
}
