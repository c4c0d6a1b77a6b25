use std::sync::atomic::{AtomicBool, Ordering};

use crate::unit_of_work::CommitError;

/// Boundary to a platform transaction scope.
///
/// The scope internals are whatever the platform provides; the coordinator
/// only ever completes a scope after all participants committed, or
/// abandons it on rollback. A scope that is never completed is expected to
/// roll its transaction-aware resources back on its own.
pub trait TransactionScope: Send + Sync {
    /// Mark the scope as successfully completed.
    fn complete(&self) -> Result<(), CommitError>;

    /// Abandon the scope without completing it.
    fn abandon(&self);
}

/// In-process scope recording completion and abandonment.
///
/// The default scope for [`DistributedCoordinator`]; a pass-through with no
/// external resources behind it.
///
/// [`DistributedCoordinator`]: super::DistributedCoordinator
#[derive(Default)]
pub struct LocalTransactionScope {
    completed: AtomicBool,
    abandoned: AtomicBool,
}

impl LocalTransactionScope {
    /// Create a fresh scope.
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether the scope was completed.
    pub fn is_completed(&self) -> bool {
        self.completed.load(Ordering::SeqCst)
    }

    /// Whether the scope was abandoned.
    pub fn is_abandoned(&self) -> bool {
        self.abandoned.load(Ordering::SeqCst)
    }
}

impl TransactionScope for LocalTransactionScope {
    fn complete(&self) -> Result<(), CommitError> {
        self.completed.store(true, Ordering::SeqCst);
        Ok(())
    }

    fn abandon(&self) {
        self.abandoned.store(true, Ordering::SeqCst);
    }
}
