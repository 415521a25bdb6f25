//! Single-slot debouncer.
//!
//! Holds at most one pending call. A new call inside the window aborts the
//! pending one and restarts the window, so a burst fires once with the
//! arguments of its last call.

use parking_lot::Mutex;
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;
use tokio::runtime::Handle;
use tokio::task::AbortHandle;
use tracing::warn;

use crate::dispatch::{Dispatch, DispatchOutcome};

#[derive(Debug, Default)]
struct Slot {
    generation: u64,
    pending: Option<AbortHandle>,
}

/// Trailing-edge debouncer with one pending slot.
#[derive(Debug)]
pub struct Debouncer {
    window: Duration,
    slot: Arc<Mutex<Slot>>,
}

impl Debouncer {
    pub fn new(window: Duration) -> Self {
        Self {
            window,
            slot: Arc::new(Mutex::new(Slot::default())),
        }
    }

    /// Whether a call is waiting for its window to elapse.
    pub fn is_pending(&self) -> bool {
        self.slot.lock().pending.is_some()
    }

    /// Schedule `work` to run once the window passes without another call.
    ///
    /// Returns the handle of this call and whether it replaced a pending one.
    /// Work that has already started is never aborted.
    pub fn call<F>(&self, work: F) -> (Dispatch, bool)
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let Ok(runtime) = Handle::try_current() else {
            warn!("No async runtime, debounced call dropped");
            return (Dispatch::dropped(), false);
        };

        let mut slot = self.slot.lock();
        let superseded = match slot.pending.take() {
            Some(previous) => {
                previous.abort();
                true
            }
            None => false,
        };
        slot.generation += 1;
        let generation = slot.generation;

        let window = self.window;
        let shared = Arc::clone(&self.slot);
        let task = runtime.spawn(async move {
            tokio::time::sleep(window).await;
            {
                let mut slot = shared.lock();
                if slot.generation != generation {
                    return DispatchOutcome::Superseded;
                }
                slot.pending = None;
            }
            work.await;
            DispatchOutcome::Completed
        });

        slot.pending = Some(task.abort_handle());
        (Dispatch::spawned(task), superseded)
    }

    /// Abort the pending call, if any. Returns whether one was pending.
    pub fn cancel(&self) -> bool {
        let mut slot = self.slot.lock();
        slot.generation += 1;
        match slot.pending.take() {
            Some(pending) => {
                pending.abort();
                true
            }
            None => false,
        }
    }
}
