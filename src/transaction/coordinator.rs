use std::error::Error;
use std::fmt;
use std::sync::Arc;

use tracing::debug;

use super::TransactionScope;
use crate::unit_of_work::{CancellationToken, CommitError, CommitHandle, UnitOfWork};
use crate::worker::CommitPool;

/// Marker for coordinators presenting many participants as one
/// [`UnitOfWork`].
pub trait TransactionCoordinator: UnitOfWork {}

/// Error type for coordinator construction.
#[derive(Debug, PartialEq, Eq)]
pub enum CoordinatorError {
    /// No participants were supplied.
    NoParticipants,
}

impl fmt::Display for CoordinatorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CoordinatorError::NoParticipants => {
                write!(f, "a transaction coordinator requires at least one participant")
            }
        }
    }
}

impl Error for CoordinatorError {}

/// Coordinator committing each participant in turn, with no atomicity
/// across them.
///
/// If participant *n* fails, participants before *n* have already committed
/// and are not undone. `rollback` is a no-op: with no transaction to
/// unwind, participants keep whatever state their own commits left behind.
pub struct SuppressedCoordinator {
    inner: Arc<SuppressedInner>,
}

struct SuppressedInner {
    participants: Vec<Arc<dyn UnitOfWork>>,
    pool: CommitPool,
}

impl Clone for SuppressedCoordinator {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl SuppressedCoordinator {
    /// Create a coordinator over the given participants.
    ///
    /// Fails fast when no participants are supplied.
    pub fn new(participants: Vec<Arc<dyn UnitOfWork>>) -> Result<Self, CoordinatorError> {
        if participants.is_empty() {
            return Err(CoordinatorError::NoParticipants);
        }
        Ok(Self {
            inner: Arc::new(SuppressedInner {
                participants,
                pool: CommitPool::single(),
            }),
        })
    }
}

fn commit_in_order(participants: &[Arc<dyn UnitOfWork>]) -> Result<(), CommitError> {
    for (index, participant) in participants.iter().enumerate() {
        debug!(participant = index, "committing participant");
        participant.commit()?;
    }
    Ok(())
}

impl UnitOfWork for SuppressedCoordinator {
    fn committed(&self) -> bool {
        self.inner.participants.iter().all(|p| p.committed())
    }

    fn commit(&self) -> Result<(), CommitError> {
        commit_in_order(&self.inner.participants)
    }

    fn commit_async_with(&self, token: CancellationToken) -> CommitHandle {
        let coordinator = self.clone();
        CommitHandle::new(self.inner.pool.submit(move || {
            if token.is_cancelled() {
                return Err(CommitError::Cancelled);
            }
            coordinator.commit()
        }))
    }

    fn rollback(&self) {}
}

impl TransactionCoordinator for SuppressedCoordinator {}

/// Coordinator committing participants inside a platform transaction scope.
///
/// The per-participant loop is the same as the suppressed variant; on
/// success the scope is completed. If any participant fails, the scope is
/// never completed, and its platform-level rollback applies to
/// transaction-aware participants only — a bus keeps no transactional log
/// and is not protected by it.
pub struct DistributedCoordinator<S> {
    inner: Arc<DistributedInner<S>>,
}

struct DistributedInner<S> {
    participants: Vec<Arc<dyn UnitOfWork>>,
    scope: S,
    pool: CommitPool,
}

impl<S> Clone for DistributedCoordinator<S> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl DistributedCoordinator<super::LocalTransactionScope> {
    /// Create a coordinator with a fresh [`LocalTransactionScope`].
    ///
    /// [`LocalTransactionScope`]: super::LocalTransactionScope
    pub fn new(participants: Vec<Arc<dyn UnitOfWork>>) -> Result<Self, CoordinatorError> {
        Self::with_scope(participants, super::LocalTransactionScope::new())
    }
}

impl<S: TransactionScope> DistributedCoordinator<S> {
    /// Create a coordinator over the given participants and scope.
    ///
    /// Fails fast when no participants are supplied.
    pub fn with_scope(
        participants: Vec<Arc<dyn UnitOfWork>>,
        scope: S,
    ) -> Result<Self, CoordinatorError> {
        if participants.is_empty() {
            return Err(CoordinatorError::NoParticipants);
        }
        Ok(Self {
            inner: Arc::new(DistributedInner {
                participants,
                scope,
                pool: CommitPool::single(),
            }),
        })
    }

    /// Access the transaction scope.
    pub fn scope(&self) -> &S {
        &self.inner.scope
    }
}

impl<S: TransactionScope + 'static> UnitOfWork for DistributedCoordinator<S> {
    fn distributed_transaction_supported(&self) -> bool {
        true
    }

    fn committed(&self) -> bool {
        self.inner.participants.iter().all(|p| p.committed())
    }

    fn commit(&self) -> Result<(), CommitError> {
        commit_in_order(&self.inner.participants)?;
        self.inner.scope.complete()
    }

    fn commit_async_with(&self, token: CancellationToken) -> CommitHandle {
        let coordinator = self.clone();
        CommitHandle::new(self.inner.pool.submit(move || {
            if token.is_cancelled() {
                return Err(CommitError::Cancelled);
            }
            coordinator.commit()
        }))
    }

    fn rollback(&self) {
        self.inner.scope.abandon();
    }
}

impl<S: TransactionScope + 'static> TransactionCoordinator for DistributedCoordinator<S> {}
