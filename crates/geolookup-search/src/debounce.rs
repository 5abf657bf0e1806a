//! Trailing-edge debouncing on the tokio runtime.

use std::future::Future;
use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;

use futures::future::BoxFuture;
use tokio::task::JoinHandle;

type Operation<A> = Arc<dyn Fn(A) -> BoxFuture<'static, ()> + Send + Sync>;

/// Delays an async operation until calls to [`Debouncer::schedule`] pause
/// for `quiet_period`.
///
/// Each call retires the timer armed by the previous one, so at most one
/// timer is pending per instance. Once a timer fires the operation is
/// spawned as its own task and later calls no longer affect it.
pub struct Debouncer<A> {
    quiet_period: Duration,
    operation: Operation<A>,
    pending: Mutex<Option<JoinHandle<()>>>,
}

impl<A> Debouncer<A>
where
    A: Send + 'static,
{
    pub fn new<F, Fut>(quiet_period: Duration, operation: F) -> Self
    where
        F: Fn(A) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = ()> + Send + 'static,
    {
        let operation: Operation<A> =
            Arc::new(move |args: A| -> BoxFuture<'static, ()> { Box::pin(operation(args)) });
        Self {
            quiet_period,
            operation,
            pending: Mutex::new(None),
        }
    }

    /// Arms a new timer for `args`, retiring any pending one.
    ///
    /// Must be called from within a tokio runtime.
    pub fn schedule(&self, args: A) {
        let mut pending = self.pending.lock().unwrap_or_else(PoisonError::into_inner);
        if let Some(previous) = pending.take() {
            previous.abort();
        }

        let operation = Arc::clone(&self.operation);
        let quiet_period = self.quiet_period;
        *pending = Some(tokio::spawn(async move {
            tokio::time::sleep(quiet_period).await;
            tokio::spawn(operation(args));
        }));
    }

    /// Retires the pending timer, if any, without running the operation.
    pub fn cancel(&self) {
        let mut pending = self.pending.lock().unwrap_or_else(PoisonError::into_inner);
        if let Some(previous) = pending.take() {
            previous.abort();
        }
    }

    /// `true` while a timer is armed and has not fired yet.
    #[must_use]
    pub fn is_pending(&self) -> bool {
        self.pending
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .as_ref()
            .is_some_and(|handle| !handle.is_finished())
    }
}

impl<A> Drop for Debouncer<A> {
    fn drop(&mut self) {
        let pending = self
            .pending
            .get_mut()
            .unwrap_or_else(PoisonError::into_inner);
        if let Some(handle) = pending.take() {
            handle.abort();
        }
    }
}
