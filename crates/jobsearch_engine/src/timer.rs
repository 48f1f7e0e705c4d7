use std::time::Duration;

use tokio::runtime::Handle;
use tokio_util::sync::CancellationToken;

/// Holds at most one scheduled poll tick.
///
/// Scheduling a tick cancels the one before it, so two poll streams can never
/// run side by side.
pub struct PollTimer {
    runtime: Handle,
    pending: Option<CancellationToken>,
}

impl PollTimer {
    pub fn new(runtime: Handle) -> Self {
        Self {
            runtime,
            pending: None,
        }
    }

    pub fn schedule<F>(&mut self, delay: Duration, on_due: F)
    where
        F: FnOnce() + Send + 'static,
    {
        self.cancel();
        let token = CancellationToken::new();
        let cancelled = token.clone();
        self.runtime.spawn(async move {
            tokio::select! {
                _ = cancelled.cancelled() => {}
                _ = tokio::time::sleep(delay) => on_due(),
            }
        });
        self.pending = Some(token);
    }

    pub fn cancel(&mut self) {
        if let Some(token) = self.pending.take() {
            token.cancel();
        }
    }
}

impl Drop for PollTimer {
    fn drop(&mut self) {
        self.cancel();
    }
}
