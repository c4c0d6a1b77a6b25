//! The transactional bus: buffered publish, snapshot commit, rollback.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, MutexGuard};

use tracing::debug;

use super::{Dispatcher, Message, MessageQueue};
use crate::unit_of_work::{CancellationToken, CommitError, CommitHandle, UnitOfWork};
use crate::worker::CommitPool;

/// The message-bus surface layered on top of [`UnitOfWork`].
///
/// Publishing has no side effects; dispatch happens only on commit.
pub trait Bus: UnitOfWork {
    /// Stage one message. Marks the bus uncommitted; never dispatches.
    fn publish(&self, message: Message);

    /// Stage an ordered batch of messages, preserving their relative order.
    fn publish_all(&self, messages: Vec<Message>);

    /// Discard every staged message without dispatching.
    ///
    /// A destructive reset, not a commit. Leaves the bus committed: an
    /// empty buffer has nothing pending (see DESIGN.md for the behavior
    /// this pins down).
    fn clear(&self);

    /// Number of staged, undispatched messages.
    fn pending(&self) -> usize;
}

/// A bus that dispatches its staged messages when committed.
///
/// Messages accumulate in a staging buffer until `commit` drains them, in
/// publish order, through the dispatcher `D`. `rollback` restores the
/// buffer to the snapshot taken at the most recent commit attempt.
///
/// Cloning creates another handle to the same bus (thread-safe via shared
/// inner state). Concurrent commits serialize: only one drain proceeds at a
/// time, and the later caller finds nothing left to dispatch.
///
/// ## Example
///
/// ```
/// use txbus::{Bus, DirectBus, HandlerRegistry, Message, UnitOfWork};
///
/// let bus = DirectBus::new(HandlerRegistry::new());
/// bus.publish(Message::with_string_payload("msg-1", "order-created", "{}"));
/// bus.commit().unwrap();
/// assert!(bus.committed());
/// ```
pub struct DirectBus<D> {
    inner: Arc<Inner<D>>,
}

impl<D> Clone for DirectBus<D> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

struct Inner<D> {
    dispatcher: D,
    queue: MessageQueue,
    // An empty bus has nothing pending and counts as committed.
    committed: AtomicBool,
    // Serializes commit and rollback per bus instance, and owns the
    // snapshot from the most recent commit attempt.
    commit_state: Mutex<CommitState>,
    pool: CommitPool,
}

#[derive(Default)]
struct CommitState {
    snapshot: Vec<Message>,
}

impl<D: Dispatcher> DirectBus<D> {
    /// Create a bus over the given dispatcher.
    pub fn new(dispatcher: D) -> Self {
        Self {
            inner: Arc::new(Inner {
                dispatcher,
                queue: MessageQueue::new(),
                committed: AtomicBool::new(true),
                commit_state: Mutex::new(CommitState::default()),
                pool: CommitPool::single(),
            }),
        }
    }

    /// Access the dispatcher collaborator.
    pub fn dispatcher(&self) -> &D {
        &self.inner.dispatcher
    }
}

impl<D> DirectBus<D> {
    // CommitState stays valid across a panicking dispatcher, so recover a
    // poisoned guard rather than propagate.
    fn commit_state(&self) -> MutexGuard<'_, CommitState> {
        match self.inner.commit_state.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        }
    }
}

impl<D: Dispatcher + 'static> Bus for DirectBus<D> {
    fn publish(&self, message: Message) {
        self.inner.queue.push(message);
        self.inner.committed.store(false, Ordering::SeqCst);
    }

    fn publish_all(&self, messages: Vec<Message>) {
        if messages.is_empty() {
            return;
        }
        self.inner.queue.extend(messages);
        self.inner.committed.store(false, Ordering::SeqCst);
    }

    fn clear(&self) {
        let discarded = self.inner.queue.take_all();
        self.inner.committed.store(true, Ordering::SeqCst);
        debug!(
            discarded = discarded.len(),
            "cleared staged messages without dispatch"
        );
    }

    fn pending(&self) -> usize {
        self.inner.queue.len()
    }
}

impl<D: Dispatcher + 'static> UnitOfWork for DirectBus<D> {
    fn committed(&self) -> bool {
        self.inner.committed.load(Ordering::SeqCst)
    }

    /// Snapshot the buffer, then drain it FIFO through the dispatcher.
    ///
    /// A dispatcher failure on message *k* propagates immediately: the bus
    /// stays uncommitted and the live buffer holds only the not-yet-
    /// dispatched remainder, while messages up to and including *k* survive
    /// only in the snapshot. There is no automatic rollback; callers choose
    /// between retrying `commit` (remainder only) and `rollback` (full
    /// pre-commit set, redispatching what already went out).
    fn commit(&self) -> Result<(), CommitError> {
        let mut state = self.commit_state();
        state.snapshot = self.inner.queue.snapshot();
        debug!(pending = state.snapshot.len(), "committing bus");
        while let Some(message) = self.inner.queue.pop_front() {
            self.inner.dispatcher.dispatch(message)?;
        }
        self.inner.committed.store(true, Ordering::SeqCst);
        Ok(())
    }

    fn commit_async_with(&self, token: CancellationToken) -> CommitHandle {
        let bus = self.clone();
        CommitHandle::new(self.inner.pool.submit(move || {
            if token.is_cancelled() {
                return Err(CommitError::Cancelled);
            }
            bus.commit()
        }))
    }

    fn rollback(&self) {
        let state = self.commit_state();
        if !state.snapshot.is_empty() {
            debug!(
                restored = state.snapshot.len(),
                "rolling back to last commit snapshot"
            );
            // The snapshot is retained, so a repeated rollback restores the
            // same set again.
            self.inner.queue.replace(state.snapshot.clone());
        }
        self.inner.committed.store(false, Ordering::SeqCst);
    }
}
