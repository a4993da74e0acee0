//! Cooperative progress display for the slow part of a domain audit.
//!
//! A [`ProgressTask`] ticks an [`Indicator`]'s [`Ticker`] on a fixed interval
//! until it is stopped. [`ProgressTask::stop`] returns only after the task has
//! exited, so nothing is drawn once the owning stage moves on.

use std::time::Duration;

use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

/// Something that can show a domain is being worked on.
pub trait Indicator: Send + Sync {
    fn begin(&self, domain: &str) -> Box<dyn Ticker>;
}

/// One running display, owned by the background task.
pub trait Ticker: Send {
    /// Draws the next frame.
    fn tick(&mut self);

    /// Erases the display. Called exactly once, after the last tick.
    fn clear(&mut self);
}

/// Draws nothing.
pub struct Silent;

impl Indicator for Silent {
    fn begin(&self, _domain: &str) -> Box<dyn Ticker> {
        Box::new(Silent)
    }
}

impl Ticker for Silent {
    fn tick(&mut self) {}

    fn clear(&mut self) {}
}

/// `interval` rejects a zero period.
const MIN_TICK: Duration = Duration::from_millis(1);

pub struct ProgressTask {
    token: CancellationToken,
    handle: Option<JoinHandle<()>>,
}

impl ProgressTask {
    pub fn spawn(mut ticker: Box<dyn Ticker>, every: Duration) -> Self {
        let token = CancellationToken::new();
        let cancelled = token.clone();

        let handle = tokio::spawn(async move {
            let mut interval = tokio::time::interval(every.max(MIN_TICK));
            loop {
                tokio::select! {
                    biased;
                    _ = cancelled.cancelled() => break,
                    _ = interval.tick() => ticker.tick(),
                }
            }
            ticker.clear();
        });

        Self {
            token,
            handle: Some(handle),
        }
    }

    /// Cancels the task and waits for it to clear its display.
    pub async fn stop(mut self) {
        self.token.cancel();
        if let Some(handle) = self.handle.take() {
            let _ = handle.await;
        }
    }
}

impl Drop for ProgressTask {
    fn drop(&mut self) {
        self.token.cancel();
    }
}
