use super::CommitError;
use crate::worker::TaskHandle;

/// Join handle for a commit scheduled via [`UnitOfWork::commit_async_with`].
///
/// [`UnitOfWork::commit_async_with`]: super::UnitOfWork::commit_async_with
pub struct CommitHandle {
    task: TaskHandle<Result<(), CommitError>>,
}

impl CommitHandle {
    /// Wrap a pool submission that resolves to a commit outcome.
    pub fn new(task: TaskHandle<Result<(), CommitError>>) -> Self {
        Self { task }
    }

    /// Wrap an already-known outcome.
    ///
    /// Useful for participants that commit inline and have nothing to
    /// schedule.
    pub fn ready(result: Result<(), CommitError>) -> Self {
        Self {
            task: TaskHandle::ready(result),
        }
    }

    /// Block until the scheduled commit resolves.
    ///
    /// Returns [`CommitError::WorkerStopped`] if the worker pool was torn
    /// down before the commit ran.
    pub fn join(self) -> Result<(), CommitError> {
        self.task.join().unwrap_or(Err(CommitError::WorkerStopped))
    }
}
