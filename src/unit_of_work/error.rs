use std::error::Error;
use std::fmt;

use crate::bus::DispatchError;

/// Error type for commit operations.
#[derive(Debug)]
pub enum CommitError {
    /// The dispatcher failed while draining the message buffer.
    Dispatch(DispatchError),
    /// The commit was cancelled before dispatch began.
    Cancelled,
    /// The worker pool was torn down before the scheduled commit ran.
    WorkerStopped,
    /// Other error from a participant or transaction scope.
    Other(Box<dyn Error + Send + Sync>),
}

impl fmt::Display for CommitError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CommitError::Dispatch(e) => write!(f, "dispatch failed during commit: {}", e),
            CommitError::Cancelled => write!(f, "commit cancelled before dispatch began"),
            CommitError::WorkerStopped => {
                write!(f, "commit worker stopped before the scheduled commit ran")
            }
            CommitError::Other(e) => write!(f, "commit error: {}", e),
        }
    }
}

impl Error for CommitError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            CommitError::Dispatch(e) => Some(e),
            CommitError::Other(e) => Some(e.as_ref()),
            _ => None,
        }
    }
}

impl From<DispatchError> for CommitError {
    fn from(e: DispatchError) -> Self {
        CommitError::Dispatch(e)
    }
}
