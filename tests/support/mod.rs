//! Shared test collaborators: recording/failing dispatchers and a stub
//! unit-of-work participant.

#![allow(dead_code)]

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::thread;
use std::time::Duration;

use txbus::{
    CancellationToken, CommitError, CommitHandle, DispatchError, Dispatcher, Message, UnitOfWork,
};

/// Dispatcher recording every message type it sees, in order.
#[derive(Clone, Default)]
pub struct RecordingDispatcher {
    seen: Arc<Mutex<Vec<String>>>,
    delay: Option<Duration>,
}

impl RecordingDispatcher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sleep for `delay` before recording each message, to widen race
    /// windows in concurrency tests.
    pub fn with_delay(delay: Duration) -> Self {
        Self {
            seen: Arc::new(Mutex::new(Vec::new())),
            delay: Some(delay),
        }
    }

    pub fn seen(&self) -> Vec<String> {
        self.seen.lock().unwrap().clone()
    }

    pub fn count(&self) -> usize {
        self.seen.lock().unwrap().len()
    }
}

impl Dispatcher for RecordingDispatcher {
    fn dispatch(&self, message: Message) -> Result<(), DispatchError> {
        if let Some(delay) = self.delay {
            thread::sleep(delay);
        }
        self.seen.lock().unwrap().push(message.message_type);
        Ok(())
    }
}

/// Dispatcher failing the first `times` dispatches of one message type,
/// recording everything it successfully processes.
#[derive(Clone)]
pub struct FailingDispatcher {
    fail_on: String,
    failures_left: Arc<AtomicUsize>,
    seen: Arc<Mutex<Vec<String>>>,
}

impl FailingDispatcher {
    pub fn new(fail_on: impl Into<String>, times: usize) -> Self {
        Self {
            fail_on: fail_on.into(),
            failures_left: Arc::new(AtomicUsize::new(times)),
            seen: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn seen(&self) -> Vec<String> {
        self.seen.lock().unwrap().clone()
    }
}

impl Dispatcher for FailingDispatcher {
    fn dispatch(&self, message: Message) -> Result<(), DispatchError> {
        if message.message_type == self.fail_on {
            // Claim one failure from the budget atomically, in case the
            // dispatcher is shared across committing threads.
            let claimed = self
                .failures_left
                .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |left| {
                    left.checked_sub(1)
                })
                .is_ok();
            if claimed {
                return Err(DispatchError::handler(
                    &message.message_type,
                    "induced failure",
                ));
            }
        }
        self.seen.lock().unwrap().push(message.message_type);
        Ok(())
    }
}

/// Unit-of-work participant recording commit order into a shared log.
pub struct StubUnitOfWork {
    label: String,
    distributed: bool,
    fail_commit: bool,
    committed: AtomicBool,
    rollbacks: AtomicUsize,
    log: Arc<Mutex<Vec<String>>>,
}

impl StubUnitOfWork {
    pub fn new(
        label: impl Into<String>,
        distributed: bool,
        log: Arc<Mutex<Vec<String>>>,
    ) -> Arc<Self> {
        Arc::new(Self {
            label: label.into(),
            distributed,
            fail_commit: false,
            committed: AtomicBool::new(false),
            rollbacks: AtomicUsize::new(0),
            log,
        })
    }

    /// A participant whose commit always fails (after logging the attempt).
    pub fn failing(
        label: impl Into<String>,
        distributed: bool,
        log: Arc<Mutex<Vec<String>>>,
    ) -> Arc<Self> {
        Arc::new(Self {
            label: label.into(),
            distributed,
            fail_commit: true,
            committed: AtomicBool::new(false),
            rollbacks: AtomicUsize::new(0),
            log,
        })
    }

    pub fn rollback_count(&self) -> usize {
        self.rollbacks.load(Ordering::SeqCst)
    }
}

impl UnitOfWork for StubUnitOfWork {
    fn distributed_transaction_supported(&self) -> bool {
        self.distributed
    }

    fn committed(&self) -> bool {
        self.committed.load(Ordering::SeqCst)
    }

    fn commit(&self) -> Result<(), CommitError> {
        self.log.lock().unwrap().push(self.label.clone());
        if self.fail_commit {
            return Err(CommitError::Other("stub commit failure".into()));
        }
        self.committed.store(true, Ordering::SeqCst);
        Ok(())
    }

    fn commit_async_with(&self, token: CancellationToken) -> CommitHandle {
        if token.is_cancelled() {
            return CommitHandle::ready(Err(CommitError::Cancelled));
        }
        CommitHandle::ready(self.commit())
    }

    fn rollback(&self) {
        self.rollbacks.fetch_add(1, Ordering::SeqCst);
        self.committed.store(false, Ordering::SeqCst);
    }
}
