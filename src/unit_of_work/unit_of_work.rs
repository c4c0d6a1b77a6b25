use super::{CancellationToken, CommitError, CommitHandle};

/// The transactional lifecycle contract shared by all stateful participants.
///
/// See Martin Fowler's Unit of Work pattern:
/// <https://martinfowler.com/eaaCatalog/unitOfWork.html>.
///
/// A participant is *committed* when it has no outstanding uncommitted
/// changes; a fresh, empty participant starts committed. Implementations
/// must keep `commit` idempotent: committing an already-committed
/// participant performs no externally observable work.
pub trait UnitOfWork: Send + Sync {
    /// Whether this participant can take part in a distributed transaction.
    ///
    /// Pure capability declaration, no side effects. Buses report `false`;
    /// only participants backed by a platform transaction scope report
    /// `true`.
    fn distributed_transaction_supported(&self) -> bool {
        false
    }

    /// Whether there are no outstanding uncommitted changes.
    fn committed(&self) -> bool;

    /// Commit synchronously.
    ///
    /// On success `committed()` becomes `true`. Collaborator failures
    /// propagate unchanged and leave `committed() == false`; no retries are
    /// performed here.
    fn commit(&self) -> Result<(), CommitError>;

    /// Schedule [`commit`](UnitOfWork::commit) on a worker, without
    /// cancellation.
    fn commit_async(&self) -> CommitHandle {
        self.commit_async_with(CancellationToken::new())
    }

    /// Schedule [`commit`](UnitOfWork::commit) on a worker.
    ///
    /// The whole synchronous commit runs as one unit; there is no
    /// per-message yielding. The token is observed only before dispatch
    /// begins: a commit cancelled in time resolves to
    /// [`CommitError::Cancelled`] and leaves the participant untouched,
    /// while a commit that has started runs to completion or error.
    fn commit_async_with(&self, token: CancellationToken) -> CommitHandle;

    /// Roll back to the state captured at the most recent commit attempt.
    ///
    /// Always leaves `committed() == false`, signalling that a fresh commit
    /// is required to re-synchronize, even when there was no snapshot to
    /// restore.
    fn rollback(&self);
}
