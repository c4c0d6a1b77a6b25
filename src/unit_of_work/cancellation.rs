use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Cooperative cancellation flag for scheduled commits.
///
/// A token handed to [`UnitOfWork::commit_async_with`] is checked once,
/// before the drain begins. Cancelling after that point has no effect; a
/// started commit runs to completion or error.
///
/// [`UnitOfWork::commit_async_with`]: super::UnitOfWork::commit_async_with
#[derive(Clone, Default)]
pub struct CancellationToken {
    cancelled: Arc<AtomicBool>,
}

impl CancellationToken {
    /// Create a fresh, uncancelled token.
    pub fn new() -> Self {
        Self::default()
    }

    /// Request cancellation. Idempotent.
    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::SeqCst);
    }

    /// Whether cancellation has been requested.
    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::SeqCst)
    }
}
