//! Cancellation and deadline scope for a single contract call.

use crate::errors::ContextError;
use std::future::Future;
use std::time::Duration;
use tokio::time::Instant;
use tokio_util::sync::CancellationToken;

/// Request scope carried into every backend call.
///
/// Clones share the same cancellation token. Child contexts are cancelled
/// with their parent but can be cancelled on their own.
#[derive(Debug, Clone, Default)]
pub struct RequestContext {
    token: CancellationToken,
    deadline: Option<Instant>,
}

impl RequestContext {
    /// A context that is never cancelled and has no deadline.
    pub fn background() -> Self {
        Self::default()
    }

    pub fn with_timeout(timeout: Duration) -> Self {
        Self::with_deadline(Instant::now() + timeout)
    }

    pub fn with_deadline(deadline: Instant) -> Self {
        Self {
            token: CancellationToken::new(),
            deadline: Some(deadline),
        }
    }

    /// Derive a child context, optionally tightening the deadline.
    pub fn child(&self, timeout: Option<Duration>) -> Self {
        let deadline = match (self.deadline, timeout) {
            (Some(current), Some(timeout)) => Some(current.min(Instant::now() + timeout)),
            (None, Some(timeout)) => Some(Instant::now() + timeout),
            (current, None) => current,
        };
        Self {
            token: self.token.child_token(),
            deadline,
        }
    }

    pub fn cancel(&self) {
        self.token.cancel();
    }

    pub fn deadline(&self) -> Option<Instant> {
        self.deadline
    }

    /// Time left before the deadline, if one is set.
    pub fn remaining(&self) -> Option<Duration> {
        self.deadline
            .map(|deadline| deadline.saturating_duration_since(Instant::now()))
    }

    /// Why this context is done, or `None` while it is still live.
    pub fn err(&self) -> Option<ContextError> {
        if self.token.is_cancelled() {
            return Some(ContextError::Cancelled);
        }
        match self.deadline {
            Some(deadline) if Instant::now() >= deadline => Some(ContextError::DeadlineExceeded),
            _ => None,
        }
    }

    /// Drive `fut` until it completes or the context ends.
    ///
    /// A context that is already done fails without polling `fut`.
    pub async fn run<F: Future>(&self, fut: F) -> Result<F::Output, ContextError> {
        if let Some(err) = self.err() {
            return Err(err);
        }

        let deadline = async {
            match self.deadline {
                Some(deadline) => tokio::time::sleep_until(deadline).await,
                None => std::future::pending::<()>().await,
            }
        };

        tokio::select! {
            biased;
            _ = self.token.cancelled() => Err(ContextError::Cancelled),
            _ = deadline => Err(ContextError::DeadlineExceeded),
            output = fut => Ok(output),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn background_runs_to_completion() {
        let ctx = RequestContext::background();
        assert_eq!(ctx.err(), None);
        assert_eq!(ctx.run(async { 7 }).await, Ok(7));
    }

    #[tokio::test]
    async fn cancelled_context_does_not_poll() {
        let ctx = RequestContext::background();
        ctx.cancel();
        let polled = std::sync::atomic::AtomicBool::new(false);
        let result = ctx
            .run(async { polled.store(true, std::sync::atomic::Ordering::SeqCst) })
            .await;
        assert_eq!(result, Err(ContextError::Cancelled));
        assert!(!polled.load(std::sync::atomic::Ordering::SeqCst));
    }

    #[tokio::test]
    async fn deadline_interrupts_pending_work() {
        let ctx = RequestContext::with_timeout(Duration::from_millis(20));
        let result = ctx.run(std::future::pending::<()>()).await;
        assert_eq!(result, Err(ContextError::DeadlineExceeded));
        assert_eq!(ctx.err(), Some(ContextError::DeadlineExceeded));
    }

    #[tokio::test]
    async fn cancel_while_pending() {
        let ctx = RequestContext::background();
        let canceller = ctx.clone();
        tokio::spawn(async move {
            tokio::time::sleep(Duration::from_millis(10)).await;
            canceller.cancel();
        });
        let result = ctx.run(std::future::pending::<()>()).await;
        assert_eq!(result, Err(ContextError::Cancelled));
    }

    #[tokio::test]
    async fn child_follows_parent() {
        let parent = RequestContext::with_timeout(Duration::from_secs(60));
        let child = parent.child(Some(Duration::from_secs(1)));
        assert!(child.deadline() < parent.deadline());

        let loose = parent.child(Some(Duration::from_secs(600)));
        assert_eq!(loose.deadline(), parent.deadline());

        parent.cancel();
        assert_eq!(child.err(), Some(ContextError::Cancelled));

        let other = RequestContext::background();
        let sibling = other.child(None);
        sibling.cancel();
        assert_eq!(other.err(), None);
    }
}
