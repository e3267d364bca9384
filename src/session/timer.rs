//! Cancellable delayed tasks.

use std::time::Duration;

use tokio::task::JoinHandle;

/// Handle to a delayed callback scheduled on the tokio runtime.
///
/// Dropping the handle aborts the callback if it has not fired yet, so
/// replacing a pending timer in a slot cancels it. Abortion is best-effort:
/// a callback that already started keeps running, which is why sequencer
/// callbacks re-check the epoch before touching state.
#[derive(Debug)]
pub struct DelayedTask {
    handle: JoinHandle<()>,
}

impl DelayedTask {
    /// Run `f` after `delay`. Must be called from within a tokio runtime.
    pub fn schedule<F>(delay: Duration, f: F) -> Self
    where
        F: FnOnce() + Send + 'static,
    {
        let handle = tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            f();
        });
        Self { handle }
    }

    /// Abort the callback if it has not fired yet.
    pub fn cancel(&self) {
        self.handle.abort();
    }
}

impl Drop for DelayedTask {
    fn drop(&mut self) {
        self.handle.abort();
    }
}
