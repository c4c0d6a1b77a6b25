//! The staging buffer backing the bus.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex, MutexGuard};

use super::Message;

/// Insertion-order-preserving staging buffer, safe for concurrent producers.
///
/// Cloning creates another handle to the same buffer (thread-safe via
/// `Arc<Mutex<...>>`). Appended messages are never reordered before
/// dispatch; [`take_all`](MessageQueue::take_all) swaps the whole buffer in
/// one step, so a producer racing a clear lands entirely in the old or the
/// new buffer, never torn across both.
#[derive(Clone, Default)]
pub struct MessageQueue {
    inner: Arc<Mutex<VecDeque<Message>>>,
}

impl MessageQueue {
    /// Create a new, empty queue.
    pub fn new() -> Self {
        Self::default()
    }

    // A poisoned lock only means a producer panicked mid-call; the deque
    // itself is still structurally valid, so recover the guard. This keeps
    // the producer-side operations infallible.
    fn lock(&self) -> MutexGuard<'_, VecDeque<Message>> {
        match self.inner.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        }
    }

    /// Append one message.
    pub fn push(&self, message: Message) {
        self.lock().push_back(message);
    }

    /// Append an ordered batch under a single lock acquisition.
    ///
    /// The batch is never interleaved with messages from racing producers.
    pub fn extend(&self, messages: Vec<Message>) {
        self.lock().extend(messages);
    }

    /// Remove and return the head message, if any.
    pub fn pop_front(&self) -> Option<Message> {
        self.lock().pop_front()
    }

    /// Immutable copy of the current contents, in order.
    pub fn snapshot(&self) -> Vec<Message> {
        self.lock().iter().cloned().collect()
    }

    /// Replace the contents wholesale, preserving the given order.
    pub fn replace(&self, messages: Vec<Message>) {
        let mut queue = self.lock();
        queue.clear();
        queue.extend(messages);
    }

    /// Swap in an empty buffer, returning everything that was staged.
    pub fn take_all(&self) -> Vec<Message> {
        std::mem::take(&mut *self.lock()).into()
    }

    /// Number of staged messages.
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    /// Whether nothing is staged.
    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }
}
