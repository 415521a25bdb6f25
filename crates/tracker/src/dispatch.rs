//! Completion handle for fire-and-forget tracking calls.

use std::future::Future;
use std::pin::Pin;
use std::task::{Context, Poll};
use tokio::task::JoinHandle;

/// How a dispatched tracking call ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DispatchOutcome {
    /// Persistence was attempted and pixel forwarding decided.
    Completed,
    /// A later debounced call replaced this one before it fired.
    Superseded,
    /// Nothing ran: no async runtime was available, or the task failed.
    Dropped,
}

/// Handle to a spawned tracking call.
///
/// Dropping the handle does not cancel the call. Awaiting it resolves once
/// the call has finished.
#[must_use = "drop the handle explicitly for fire-and-forget, or await it"]
#[derive(Debug)]
pub struct Dispatch {
    handle: Option<JoinHandle<DispatchOutcome>>,
}

impl Dispatch {
    pub(crate) fn spawned(handle: JoinHandle<DispatchOutcome>) -> Self {
        Self {
            handle: Some(handle),
        }
    }

    pub(crate) fn dropped() -> Self {
        Self { handle: None }
    }

    /// Whether the call has already finished.
    pub fn is_finished(&self) -> bool {
        self.handle.as_ref().map_or(true, JoinHandle::is_finished)
    }

    /// Explicitly discard the handle; the call keeps running.
    pub fn detach(self) {}
}

impl Future for Dispatch {
    type Output = DispatchOutcome;

    fn poll(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        let Some(handle) = self.handle.as_mut() else {
            return Poll::Ready(DispatchOutcome::Dropped);
        };

        match Pin::new(handle).poll(cx) {
            Poll::Ready(Ok(outcome)) => Poll::Ready(outcome),
            Poll::Ready(Err(e)) if e.is_cancelled() => Poll::Ready(DispatchOutcome::Superseded),
            Poll::Ready(Err(_)) => Poll::Ready(DispatchOutcome::Dropped),
            Poll::Pending => Poll::Pending,
        }
    }
}
