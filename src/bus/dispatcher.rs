//! The dispatcher collaborator boundary.

use std::error::Error;
use std::fmt;
use std::sync::Arc;

use super::Message;

/// Routes one message to zero or more handlers matching its type.
///
/// The bus trusts a dispatcher to either fully process a message or return
/// an error; errors are not caught by the bus and propagate to the commit
/// caller.
pub trait Dispatcher: Send + Sync {
    /// Dispatch a single message.
    fn dispatch(&self, message: Message) -> Result<(), DispatchError>;
}

impl<D: Dispatcher + ?Sized> Dispatcher for Arc<D> {
    fn dispatch(&self, message: Message) -> Result<(), DispatchError> {
        (**self).dispatch(message)
    }
}

/// Error type for dispatch operations.
#[derive(Debug)]
pub enum DispatchError {
    /// A handler failed while processing the message.
    Handler {
        message_type: String,
        reason: String,
    },
    /// Other error
    Other(Box<dyn Error + Send + Sync>),
}

impl DispatchError {
    /// Convenience constructor for a handler failure.
    pub fn handler(message_type: impl Into<String>, reason: impl Into<String>) -> Self {
        DispatchError::Handler {
            message_type: message_type.into(),
            reason: reason.into(),
        }
    }
}

impl fmt::Display for DispatchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DispatchError::Handler {
                message_type,
                reason,
            } => write!(f, "handler for {} failed: {}", message_type, reason),
            DispatchError::Other(e) => write!(f, "dispatch error: {}", e),
        }
    }
}

impl Error for DispatchError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            DispatchError::Other(e) => Some(e.as_ref()),
            _ => None,
        }
    }
}
